use serde::{Deserialize, Serialize};

// Record shapes returned by the species source (Tyradex). Every field that the
// upstream is known to omit or null out is optional so that partial payloads
// still deserialize.

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedName {
    pub fr: String,
    #[serde(default)]
    pub en: Option<String>,
    #[serde(default)]
    pub jp: Option<String>,
}

impl LocalizedName {
    pub fn fr(name: impl Into<String>) -> Self {
        Self {
            fr: name.into(),
            en: None,
            jp: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawType {
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// Gigantamax artwork: a bare URL in list payloads, a regular/shiny pair in
/// detail payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GmaxSprite {
    Url(String),
    Pair { regular: String, shiny: Option<String> },
}

impl GmaxSprite {
    pub fn regular(&self) -> &str {
        match self {
            GmaxSprite::Url(url) => url,
            GmaxSprite::Pair { regular, .. } => regular,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSprites {
    pub regular: String,
    #[serde(default)]
    pub shiny: Option<String>,
    #[serde(default)]
    pub gmax: Option<GmaxSprite>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawForme {
    pub region: String,
    pub name: LocalizedName,
}

/// One element of the `/pokemon` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSpecies {
    pub pokedex_id: u32,
    #[serde(default)]
    pub generation: u8,
    #[serde(default)]
    pub category: Option<String>,
    pub name: LocalizedName,
    pub sprites: RawSprites,
    #[serde(default)]
    pub types: Option<Vec<RawType>>,
    #[serde(default)]
    pub formes: Option<Vec<RawForme>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawStats {
    pub hp: u16,
    pub atk: u16,
    pub def: u16,
    pub spe_atk: u16,
    pub spe_def: u16,
    pub vit: u16,
}

/// Evolution reference as the species source returns it: no region, the
/// region has to be inferred by the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvolutionRef {
    pub pokedex_id: u32,
    pub name: String,
    #[serde(default)]
    pub condition: Option<String>,
}

impl RawEvolutionRef {
    pub fn new(pokedex_id: u32, name: impl Into<String>) -> Self {
        Self {
            pokedex_id,
            name: name.into(),
            condition: None,
        }
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MegaSprites {
    pub regular: String,
    #[serde(default)]
    pub shiny: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MegaEvolution {
    pub orbe: String,
    pub sprites: MegaSprites,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionBlock {
    #[serde(default)]
    pub pre: Option<Vec<RawEvolutionRef>>,
    #[serde(default)]
    pub next: Option<Vec<RawEvolutionRef>>,
    #[serde(default)]
    pub mega: Option<Vec<MegaEvolution>>,
}

impl EvolutionBlock {
    pub fn pre_refs(&self) -> &[RawEvolutionRef] {
        self.pre.as_deref().unwrap_or_default()
    }

    pub fn next_refs(&self) -> &[RawEvolutionRef] {
        self.next.as_deref().unwrap_or_default()
    }

    pub fn megas(&self) -> &[MegaEvolution] {
        self.mega.as_deref().unwrap_or_default()
    }
}

/// Payload of `/pokemon/[id]` and `/pokemon/[name]/[region]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesDetail {
    pub pokedex_id: u32,
    #[serde(default)]
    pub generation: u8,
    #[serde(default)]
    pub category: Option<String>,
    pub name: LocalizedName,
    pub sprites: RawSprites,
    #[serde(default)]
    pub types: Option<Vec<RawType>>,
    #[serde(default)]
    pub stats: Option<RawStats>,
    #[serde(default)]
    pub height: Option<String>,
    #[serde(default)]
    pub weight: Option<String>,
    #[serde(default)]
    pub evolution: Option<EvolutionBlock>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_species_list_record_tolerates_nulls() {
        let json = r#"{
            "pokedex_id": 0,
            "generation": 0,
            "name": { "fr": "MissingNo.", "en": "MissingNo.", "jp": "けつばん" },
            "sprites": { "regular": "https://example.test/0.png", "shiny": null, "gmax": null },
            "types": null,
            "formes": null
        }"#;

        let species: RawSpecies = serde_json::from_str(json).unwrap();
        assert_eq!(species.pokedex_id, 0);
        assert!(species.types.is_none());
        assert!(species.sprites.gmax.is_none());
    }

    #[test]
    fn test_detail_gmax_accepts_pair() {
        let json = r#"{
            "pokedex_id": 25,
            "name": { "fr": "Pikachu" },
            "sprites": {
                "regular": "r.png",
                "shiny": "s.png",
                "gmax": { "regular": "g.png", "shiny": "gs.png" }
            },
            "evolution": { "pre": [{ "pokedex_id": 172, "name": "Pichu", "condition": "Bonheur" }], "next": null, "mega": null }
        }"#;

        let detail: SpeciesDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.sprites.gmax.as_ref().map(GmaxSprite::regular), Some("g.png"));
        let evolution = detail.evolution.unwrap();
        assert_eq!(evolution.pre_refs().len(), 1);
        assert!(evolution.next_refs().is_empty());
    }
}
