use serde::{Deserialize, Serialize};

// Record shapes returned by the chain source (PokeAPI). Only the fields the
// engine reads are modelled; everything else in the payload is ignored.

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ApiResource {
    pub url: String,
}

/// `/pokemon-species/[id]`, used only to find the chain URL.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SpeciesResource {
    #[serde(default)]
    pub evolution_chain: Option<ApiResource>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct EvolutionDetail {
    #[serde(default)]
    pub min_level: Option<u32>,
    #[serde(default)]
    pub trigger: Option<NamedResource>,
    #[serde(default)]
    pub item: Option<NamedResource>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChainLink {
    pub species: NamedResource,
    #[serde(default)]
    pub evolution_details: Vec<EvolutionDetail>,
    #[serde(default)]
    pub evolves_to: Vec<ChainLink>,
}

/// `/evolution-chain/[id]`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EvolutionChainResponse {
    #[serde(default)]
    pub id: u32,
    pub chain: ChainLink,
}
