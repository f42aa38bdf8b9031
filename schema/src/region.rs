use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Regional form discriminator. The standard form of a species has no region
/// and is represented as `Option::<Region>::None` everywhere.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Region {
    Alola,
    Galar,
    Hisui,
    Paldea,
    WhiteStriped,
}

impl Region {
    /// Upstream tag used in sprite file names and route parameters (e.g. "alola").
    pub fn tag(self) -> &'static str {
        self.into()
    }

    /// French label as shown in the regional Pokedex selector.
    pub fn label_fr(self) -> &'static str {
        match self {
            Region::Alola => "Alola",
            Region::Galar => "Galar",
            Region::Hisui => "Hisui",
            Region::Paldea => "Paldea",
            Region::WhiteStriped => "Motif Blanc",
        }
    }

    /// French suffix appended to a species name for this form.
    pub fn name_suffix_fr(self) -> Option<&'static str> {
        match self {
            Region::Alola => Some("d'Alola"),
            Region::Galar => Some("de Galar"),
            Region::Hisui => Some("d'Hisui"),
            Region::Paldea => Some("de Paldea"),
            Region::WhiteStriped => None,
        }
    }

    /// Slugged form of the French suffix carried by regional display names
    /// ("Raichu d'Alola" ends in "dalola"). White-striped forms carry none.
    pub fn name_suffix_slug(self) -> Option<&'static str> {
        match self {
            Region::Alola => Some("dalola"),
            Region::Galar => Some("degalar"),
            Region::Hisui => Some("dhisui"),
            Region::Paldea => Some("depaldea"),
            Region::WhiteStriped => None,
        }
    }
}
