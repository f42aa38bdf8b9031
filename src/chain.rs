//! Evolution chains from the chain source and the stage classifier.

use crate::entry::Entry;
use crate::errors::{UpstreamDataError, UpstreamResult};
use schema::{ChainLink, EvolutionDetail, RawEvolutionRef};
use serde::Serialize;
use std::fmt;

/// Depth of a chain the panel knows how to lay out.
pub const MAX_STAGES: usize = 3;

/// One species in an evolution chain with the species it evolves into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainNode {
    pub species_id: u32,
    pub species_name: String,
    /// How this species is reached from its parent, already formatted.
    pub condition: Option<String>,
    pub evolves_to: Vec<ChainNode>,
}

impl ChainNode {
    pub fn new(species_id: u32, species_name: impl Into<String>) -> Self {
        Self {
            species_id,
            species_name: species_name.into(),
            condition: None,
            evolves_to: Vec::new(),
        }
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn with_child(mut self, child: ChainNode) -> Self {
        self.evolves_to.push(child);
        self
    }

    /// Convert an upstream chain link, recursively.
    pub fn from_link(link: &ChainLink) -> UpstreamResult<Self> {
        let species_id = species_id_from_url(&link.species.url)
            .ok_or_else(|| UpstreamDataError::MalformedSpeciesUrl(link.species.url.clone()))?;
        let evolves_to = link
            .evolves_to
            .iter()
            .map(ChainNode::from_link)
            .collect::<UpstreamResult<Vec<_>>>()?;

        Ok(Self {
            species_id,
            species_name: link.species.name.clone(),
            condition: format_chain_condition(&link.evolution_details),
            evolves_to,
        })
    }
}

/// Numeric id at the end of a species URL
/// (`https://pokeapi.co/api/v2/pokemon-species/133/` -> 133).
pub fn species_id_from_url(url: &str) -> Option<u32> {
    url.split('/')
        .filter(|segment| !segment.is_empty())
        .next_back()
        .and_then(|segment| segment.parse().ok())
}

/// Human-readable condition for the first evolution detail.
pub fn format_chain_condition(details: &[EvolutionDetail]) -> Option<String> {
    let detail = details.first()?;
    let trigger = detail.trigger.as_ref().map(|t| t.name.as_str());

    if let Some(level) = detail.min_level.filter(|&level| level > 0) {
        return Some(format!("Niveau {}", level));
    }
    if trigger == Some("trade") {
        return Some("Échange".to_string());
    }
    if let Some(item) = &detail.item {
        return Some(format!("Objet: {}", item.name));
    }
    trigger.filter(|name| !name.is_empty()).map(str::to_string)
}

/// Position of a species within its chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ChainStage {
    Base = 1,
    Middle = 2,
    Final = 3,
}

impl ChainStage {
    pub fn number(self) -> u8 {
        self as u8
    }

    fn from_depth(depth: usize) -> Option<Self> {
        match depth {
            0 => Some(ChainStage::Base),
            1 => Some(ChainStage::Middle),
            2 => Some(ChainStage::Final),
            _ => None,
        }
    }

    fn depth(self) -> usize {
        self as usize - 1
    }
}

impl fmt::Display for ChainStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stage {}", self.number())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainMember {
    pub species_id: u32,
    pub species_name: String,
    pub condition: Option<String>,
}

/// A chain flattened by depth. Levels past the third are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageBuckets {
    buckets: [Vec<ChainMember>; MAX_STAGES],
}

impl StageBuckets {
    pub fn from_chain(root: &ChainNode) -> Self {
        let mut buckets: [Vec<ChainMember>; MAX_STAGES] = Default::default();
        let mut level = vec![root];
        for bucket in buckets.iter_mut() {
            bucket.extend(level.iter().map(|node| ChainMember {
                species_id: node.species_id,
                species_name: node.species_name.clone(),
                condition: node.condition.clone(),
            }));
            level = level.iter().flat_map(|node| node.evolves_to.iter()).collect();
        }
        Self { buckets }
    }

    pub fn bucket(&self, stage: ChainStage) -> &[ChainMember] {
        &self.buckets[stage.depth()]
    }

    /// Lowest stage whose bucket contains `species_id`.
    pub fn stage_of(&self, species_id: u32) -> Option<ChainStage> {
        self.buckets
            .iter()
            .position(|bucket| bucket.iter().any(|m| m.species_id == species_id))
            .and_then(ChainStage::from_depth)
    }

    /// Members one stage below `stage`.
    pub fn pre_of(&self, stage: ChainStage) -> &[ChainMember] {
        match stage {
            ChainStage::Base => &[],
            ChainStage::Middle => self.bucket(ChainStage::Base),
            ChainStage::Final => self.bucket(ChainStage::Middle),
        }
    }

    /// Members one stage above `stage`.
    pub fn next_of(&self, stage: ChainStage) -> &[ChainMember] {
        match stage {
            ChainStage::Base => self.bucket(ChainStage::Middle),
            ChainStage::Middle => self.bucket(ChainStage::Final),
            ChainStage::Final => &[],
        }
    }
}

/// Stage of `species_id` in `chain`, or `None` when it is not a member.
pub fn classify(chain: &ChainNode, species_id: u32) -> Option<ChainStage> {
    StageBuckets::from_chain(chain).stage_of(species_id)
}

/// Turn chain members into evolution references named after their entries.
///
/// The species' standard entry provides the French name (falling back to its
/// first entry). Members with no entry at all are dropped.
pub fn member_references(members: &[ChainMember], entries: &[Entry]) -> Vec<RawEvolutionRef> {
    members
        .iter()
        .filter_map(|member| {
            let entry = entries
                .iter()
                .find(|e| e.species_id == member.species_id && e.region.is_none())
                .or_else(|| entries.iter().find(|e| e.species_id == member.species_id));
            match entry {
                Some(entry) => Some(RawEvolutionRef {
                    pokedex_id: member.species_id,
                    name: entry.name().to_string(),
                    condition: member.condition.clone(),
                }),
                None => {
                    tracing::warn!(
                        species_id = member.species_id,
                        species = %member.species_name,
                        "chain member has no entry"
                    );
                    None
                }
            }
        })
        .collect()
}
