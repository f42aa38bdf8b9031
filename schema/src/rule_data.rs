use crate::Region;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A directed evolution edge between two (species, region) pairs.
///
/// `from` and `to` are written as authored in the rule file, usually as the
/// French display name of the species. They are normalized before any
/// comparison, so "Raichu", "raichu" and "Raichu d'Alola" all address the
/// same species.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionRule {
    pub from: String,
    #[serde(default)]
    pub from_region: Option<Region>,
    pub to: String,
    #[serde(default)]
    pub to_region: Option<Region>,
    #[serde(default)]
    pub condition: Option<String>,
}

/// The four relation classes of the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleClass {
    NormalToNormal,
    NormalToRegional,
    RegionalToNormal,
    RegionalToRegional,
}

impl RuleClass {
    pub const ALL: [RuleClass; 4] = [
        RuleClass::NormalToNormal,
        RuleClass::NormalToRegional,
        RuleClass::RegionalToNormal,
        RuleClass::RegionalToRegional,
    ];

    /// Whether the (from, to) region pair is allowed in this class.
    pub fn admits(self, from_region: Option<Region>, to_region: Option<Region>) -> bool {
        match self {
            RuleClass::NormalToNormal => from_region.is_none() && to_region.is_none(),
            RuleClass::NormalToRegional => from_region.is_none() && to_region.is_some(),
            RuleClass::RegionalToNormal => from_region.is_some() && to_region.is_none(),
            RuleClass::RegionalToRegional => from_region.is_some() && to_region.is_some(),
        }
    }
}

impl fmt::Display for RuleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RuleClass::NormalToNormal => "normal → normal",
            RuleClass::NormalToRegional => "normal → regional",
            RuleClass::RegionalToNormal => "regional → normal",
            RuleClass::RegionalToRegional => "regional → regional",
        };
        write!(f, "{}", name)
    }
}

/// On-disk shape of the rule table (RON source, postcard in `OUT_DIR`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTableData {
    #[serde(default)]
    pub normal_to_normal: Vec<EvolutionRule>,
    #[serde(default)]
    pub normal_to_regional: Vec<EvolutionRule>,
    #[serde(default)]
    pub regional_to_normal: Vec<EvolutionRule>,
    #[serde(default)]
    pub regional_to_regional: Vec<EvolutionRule>,
}

impl RuleTableData {
    pub fn class(&self, class: RuleClass) -> &[EvolutionRule] {
        match class {
            RuleClass::NormalToNormal => &self.normal_to_normal,
            RuleClass::NormalToRegional => &self.normal_to_regional,
            RuleClass::RegionalToNormal => &self.regional_to_normal,
            RuleClass::RegionalToRegional => &self.regional_to_regional,
        }
    }

    /// All rules in class order, each tagged with its class.
    pub fn iter_classified(&self) -> impl Iterator<Item = (RuleClass, &EvolutionRule)> {
        RuleClass::ALL
            .into_iter()
            .flat_map(move |class| self.class(class).iter().map(move |rule| (class, rule)))
    }

    pub fn len(&self) -> usize {
        RuleClass::ALL.iter().map(|class| self.class(*class).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Encode for embedding in the binary.
    pub fn to_compiled(&self) -> Result<Vec<u8>, postcard::Error> {
        postcard::to_allocvec(self)
    }

    /// Decode bytes produced by [`RuleTableData::to_compiled`].
    pub fn from_compiled(bytes: &[u8]) -> Result<Self, postcard::Error> {
        postcard::from_bytes(bytes)
    }
}
