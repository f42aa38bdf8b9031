use crate::entry::{normalize, regional_sprites, sprite_url, Entry, Identity, SpriteRefs};
use crate::resolver::{ResolvedEvolution, Resolver, ResolverOptions};
use crate::rules::{Direction, RuleTable};
use schema::{LocalizedName, RawEvolutionRef, RawForme, RawSpecies, RawSprites, RawType, Region};

/// A builder for raw species records with common defaults.
///
/// # Example
/// ```
/// let raichu = TestSpeciesBuilder::new(26, "Raichu")
///     .with_forme(Region::Alola, "Raichu d'Alola")
///     .build();
/// ```
pub struct TestSpeciesBuilder {
    pokedex_id: u32,
    name: String,
    generation: u8,
    types: Vec<String>,
    formes: Vec<(String, String)>,
}

impl TestSpeciesBuilder {
    pub fn new(pokedex_id: u32, name: &str) -> Self {
        Self {
            pokedex_id,
            name: name.to_string(),
            generation: 1,
            types: vec!["Normal".to_string()],
            formes: Vec::new(),
        }
    }

    pub fn with_generation(mut self, generation: u8) -> Self {
        self.generation = generation;
        self
    }

    pub fn with_types(mut self, types: &[&str]) -> Self {
        self.types = types.iter().map(|t| t.to_string()).collect();
        self
    }

    /// Adds a regional forme. The region is written as its upstream tag.
    pub fn with_forme(mut self, region: Region, name: &str) -> Self {
        self.formes.push((region.tag().to_string(), name.to_string()));
        self
    }

    pub fn build(self) -> RawSpecies {
        RawSpecies {
            pokedex_id: self.pokedex_id,
            generation: self.generation,
            category: None,
            name: LocalizedName::fr(self.name),
            sprites: RawSprites {
                regular: sprite_url(self.pokedex_id, None, false),
                shiny: Some(sprite_url(self.pokedex_id, None, true)),
                gmax: None,
            },
            types: Some(
                self.types
                    .into_iter()
                    .map(|name| RawType { name, image: None })
                    .collect(),
            ),
            formes: if self.formes.is_empty() {
                None
            } else {
                Some(
                    self.formes
                        .into_iter()
                        .map(|(region, name)| RawForme {
                            region,
                            name: LocalizedName::fr(name),
                        })
                        .collect(),
                )
            },
        }
    }
}

/// Raw species list covering the regional splits exercised by the tests.
pub fn fixture_species() -> Vec<RawSpecies> {
    vec![
        TestSpeciesBuilder::new(19, "Rattata")
            .with_forme(Region::Alola, "Rattata d'Alola")
            .build(),
        TestSpeciesBuilder::new(20, "Rattatac")
            .with_forme(Region::Alola, "Rattatac d'Alola")
            .build(),
        TestSpeciesBuilder::new(25, "Pikachu").with_types(&["Électrik"]).build(),
        TestSpeciesBuilder::new(26, "Raichu")
            .with_types(&["Électrik"])
            .with_forme(Region::Alola, "Raichu d'Alola")
            .build(),
        TestSpeciesBuilder::new(52, "Miaouss")
            .with_forme(Region::Alola, "Miaouss d'Alola")
            .with_forme(Region::Galar, "Miaouss de Galar")
            .build(),
        TestSpeciesBuilder::new(53, "Persian")
            .with_forme(Region::Alola, "Persian d'Alola")
            .build(),
        TestSpeciesBuilder::new(79, "Ramoloss")
            .with_types(&["Eau", "Psy"])
            .with_forme(Region::Galar, "Ramoloss de Galar")
            .build(),
        TestSpeciesBuilder::new(80, "Flagadoss")
            .with_types(&["Eau", "Psy"])
            .with_forme(Region::Galar, "Flagadoss de Galar")
            .build(),
        TestSpeciesBuilder::new(122, "M. Mime")
            .with_types(&["Psy", "Fée"])
            .with_forme(Region::Galar, "M. Mime de Galar")
            .build(),
        TestSpeciesBuilder::new(199, "Roigada")
            .with_generation(2)
            .with_types(&["Eau", "Psy"])
            .with_forme(Region::Galar, "Roigada de Galar")
            .build(),
        TestSpeciesBuilder::new(215, "Farfuret")
            .with_generation(2)
            .with_types(&["Ténèbres", "Glace"])
            .with_forme(Region::Hisui, "Farfuret d'Hisui")
            .build(),
        TestSpeciesBuilder::new(439, "Mime Jr.")
            .with_generation(4)
            .with_types(&["Psy", "Fée"])
            .build(),
        TestSpeciesBuilder::new(461, "Dimoret")
            .with_generation(4)
            .with_types(&["Ténèbres", "Glace"])
            .build(),
        TestSpeciesBuilder::new(863, "Berserkatt").with_generation(8).build(),
        TestSpeciesBuilder::new(866, "M. Glaquette")
            .with_generation(8)
            .with_types(&["Glace", "Psy"])
            .build(),
        TestSpeciesBuilder::new(903, "Farfurex")
            .with_generation(8)
            .with_types(&["Combat", "Poison"])
            .build(),
    ]
}

pub fn fixture_entries() -> Vec<Entry> {
    match normalize(&fixture_species()) {
        Ok(entries) => entries,
        Err(err) => panic!("fixture species failed to normalize: {}", err),
    }
}

/// An entry built directly, bypassing the normalizer.
pub fn entry(species_id: u32, name: &str, region: Option<Region>) -> Entry {
    let sprites = match region {
        Some(region) => regional_sprites(species_id, region),
        None => SpriteRefs {
            regular: sprite_url(species_id, None, false),
            shiny: None,
            gmax: None,
        },
    };
    Entry::new(species_id, LocalizedName::fr(name), region, sprites, Vec::new())
}

pub fn reference(pokedex_id: u32, name: &str) -> RawEvolutionRef {
    RawEvolutionRef::new(pokedex_id, name)
}

pub fn rule_table(source: &str) -> RuleTable {
    match RuleTable::from_ron_str(source) {
        Ok(table) => table,
        Err(err) => panic!("invalid test rule table: {}", err),
    }
}

pub fn debug_resolver(table: &RuleTable) -> Resolver<'_> {
    Resolver::new(table).with_options(ResolverOptions { debug: true })
}

pub fn identities(evolutions: &[ResolvedEvolution]) -> Vec<Identity> {
    evolutions.iter().map(ResolvedEvolution::identity).collect()
}

/// Resolve against `table` and return only the identities.
pub fn resolve_identities(
    table: &RuleTable,
    current: Identity,
    refs: &[RawEvolutionRef],
    direction: Direction,
    entries: &[Entry],
) -> Vec<Identity> {
    identities(&Resolver::new(table).resolve(current, refs, direction, entries))
}
