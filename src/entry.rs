use crate::errors::{EntityResult, MalformedEntityError};
use crate::slug::{base_slug, slugify};
use schema::{LocalizedName, RawSpecies, RawType, Region};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

const SPRITE_BASE_URL: &str = "https://raw.githubusercontent.com/Yarkis01/TyraDex/images/sprites";

/// Key of an entry: the species plus the regional form (`None` = standard).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    pub species_id: u32,
    pub region: Option<Region>,
}

impl Identity {
    pub fn standard(species_id: u32) -> Self {
        Self {
            species_id,
            region: None,
        }
    }

    pub fn regional(species_id: u32, region: Region) -> Self {
        Self {
            species_id,
            region: Some(region),
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.region {
            Some(region) => write!(f, "#{:03} ({})", self.species_id, region),
            None => write!(f, "#{:03}", self.species_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteRefs {
    pub regular: String,
    pub shiny: Option<String>,
    pub gmax: Option<String>,
}

/// A normalized, displayable creature variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub species_id: u32,
    pub generation: u8,
    pub display_name: LocalizedName,
    pub name_slug: String,
    pub base_slug: String,
    pub region: Option<Region>,
    pub sprites: SpriteRefs,
    pub types: Vec<String>,
}

/// What the presentation layer needs to open an entry's detail screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationTarget {
    pub species_id: u32,
    pub region: Option<Region>,
    pub name_slug: String,
}

impl Entry {
    /// Build an entry, deriving both slugs from the French name.
    pub fn new(
        species_id: u32,
        display_name: LocalizedName,
        region: Option<Region>,
        sprites: SpriteRefs,
        types: Vec<String>,
    ) -> Self {
        let name_slug = slugify(&display_name.fr);
        let base_slug = base_slug(&display_name.fr);
        Self {
            species_id,
            generation: 0,
            display_name,
            name_slug,
            base_slug,
            region,
            sprites,
            types,
        }
    }

    pub fn with_generation(mut self, generation: u8) -> Self {
        self.generation = generation;
        self
    }

    pub fn identity(&self) -> Identity {
        Identity {
            species_id: self.species_id,
            region: self.region,
        }
    }

    pub fn is_regional(&self) -> bool {
        self.region.is_some()
    }

    pub fn name(&self) -> &str {
        &self.display_name.fr
    }

    pub fn navigation_target(&self) -> NavigationTarget {
        NavigationTarget {
            species_id: self.species_id,
            region: self.region,
            name_slug: self.name_slug.clone(),
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_name.fr, self.identity())
    }
}

/// Sprite URI for a species, optionally in a regional form. Reproducible from
/// the identity alone.
pub fn sprite_url(species_id: u32, region: Option<Region>, shiny: bool) -> String {
    let variant = if shiny { "shiny" } else { "regular" };
    match region {
        Some(region) => format!("{}/{}/{}_{}.png", SPRITE_BASE_URL, species_id, variant, region.tag()),
        None => format!("{}/{}/{}.png", SPRITE_BASE_URL, species_id, variant),
    }
}

/// Sprite set synthesized for a regional form that the list payload does not
/// carry artwork for.
pub fn regional_sprites(species_id: u32, region: Region) -> SpriteRefs {
    SpriteRefs {
        regular: sprite_url(species_id, Some(region), false),
        shiny: Some(sprite_url(species_id, Some(region), true)),
        gmax: None,
    }
}

fn type_names(types: Option<&Vec<RawType>>) -> Vec<String> {
    types
        .map(|types| types.iter().map(|t| t.name.clone()).collect())
        .unwrap_or_default()
}

/// Flatten raw species records and their regional formes into entries.
///
/// Each record yields its standard entry followed by one entry per forme, in
/// declared order. Formes with an unknown region tag are skipped. A repeated
/// (species, region) identity is an input-data error.
pub fn normalize(raw_species: &[RawSpecies]) -> EntityResult<Vec<Entry>> {
    let mut seen: HashSet<Identity> = HashSet::new();
    let mut entries = Vec::with_capacity(raw_species.len());

    for species in raw_species {
        let types = type_names(species.types.as_ref());

        let standard = Entry::new(
            species.pokedex_id,
            species.name.clone(),
            None,
            SpriteRefs {
                regular: species.sprites.regular.clone(),
                shiny: species.sprites.shiny.clone(),
                gmax: species.sprites.gmax.as_ref().map(|g| g.regular().to_string()),
            },
            types.clone(),
        )
        .with_generation(species.generation);
        push_unique(&mut entries, &mut seen, standard)?;

        for forme in species.formes.iter().flatten() {
            let region = match Region::from_str(forme.region.trim()) {
                Ok(region) => region,
                Err(_) => {
                    tracing::warn!(
                        species_id = species.pokedex_id,
                        region = %forme.region,
                        "skipping forme with unknown region"
                    );
                    continue;
                }
            };

            let regional = Entry::new(
                species.pokedex_id,
                forme.name.clone(),
                Some(region),
                regional_sprites(species.pokedex_id, region),
                types.clone(),
            )
            .with_generation(species.generation);
            push_unique(&mut entries, &mut seen, regional)?;
        }
    }

    tracing::debug!(species = raw_species.len(), entries = entries.len(), "normalized species list");
    Ok(entries)
}

fn push_unique(
    entries: &mut Vec<Entry>,
    seen: &mut HashSet<Identity>,
    entry: Entry,
) -> EntityResult<()> {
    let identity = entry.identity();
    if !seen.insert(identity) {
        return Err(MalformedEntityError::DuplicateIdentity {
            species_id: identity.species_id,
            region: identity.region,
        });
    }
    entries.push(entry);
    Ok(())
}
