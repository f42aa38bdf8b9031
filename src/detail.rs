//! Helpers for the species detail screen: merged base/regional data, stat
//! rows, and the sprite form toggle.

use crate::entry::Entry;
use schema::{EvolutionBlock, LocalizedName, MegaEvolution, RawStats, SpeciesDetail};
use serde::{Deserialize, Serialize};

/// Shown in place of a missing height or weight.
pub const MISSING_MEASURE: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub sp_attack: u16,
    pub sp_defense: u16,
    pub speed: u16,
}

impl Default for BaseStats {
    /// Placeholder shown while the detail record has no stats.
    fn default() -> Self {
        Self {
            hp: 1,
            attack: 1,
            defense: 1,
            sp_attack: 1,
            sp_defense: 1,
            speed: 1,
        }
    }
}

impl From<&RawStats> for BaseStats {
    fn from(raw: &RawStats) -> Self {
        Self {
            hp: raw.hp,
            attack: raw.atk,
            defense: raw.def,
            sp_attack: raw.spe_atk,
            sp_defense: raw.spe_def,
            speed: raw.vit,
        }
    }
}

impl BaseStats {
    /// Labelled rows in display order.
    pub fn rows(&self) -> [(&'static str, u16); 6] {
        [
            ("hp", self.hp),
            ("atk", self.attack),
            ("def", self.defense),
            ("spe-atk", self.sp_attack),
            ("spe-def", self.sp_defense),
            ("vit", self.speed),
        ]
    }

    pub fn total(&self) -> u32 {
        self.rows().iter().map(|(_, value)| u32::from(*value)).sum()
    }
}

pub fn format_measure(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => MISSING_MEASURE.to_string(),
    }
}

/// Detail record as displayed: regional values win over the base species.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayedDetail {
    pub name: LocalizedName,
    pub types: Vec<String>,
    pub category: Option<String>,
    pub stats: BaseStats,
    pub evolution: Option<EvolutionBlock>,
    pub height: String,
    pub weight: String,
}

impl DisplayedDetail {
    pub fn merge(base: &SpeciesDetail, regional: Option<&SpeciesDetail>) -> Self {
        let types = regional
            .and_then(|r| r.types.as_ref())
            .or(base.types.as_ref())
            .map(|types| types.iter().map(|t| t.name.clone()).collect())
            .unwrap_or_default();
        let stats = regional
            .and_then(|r| r.stats.as_ref())
            .or(base.stats.as_ref())
            .map(BaseStats::from)
            .unwrap_or_default();

        Self {
            name: regional.map_or_else(|| base.name.clone(), |r| r.name.clone()),
            types,
            category: regional
                .and_then(|r| r.category.clone())
                .or_else(|| base.category.clone()),
            stats,
            evolution: regional
                .and_then(|r| r.evolution.clone())
                .or_else(|| base.evolution.clone()),
            height: format_measure(
                regional
                    .and_then(|r| r.height.as_deref())
                    .or(base.height.as_deref()),
            ),
            weight: format_measure(
                regional
                    .and_then(|r| r.weight.as_deref())
                    .or(base.weight.as_deref()),
            ),
        }
    }

    /// Lowercased first type, used to pick the accent colour.
    pub fn main_type(&self) -> Option<String> {
        self.types.first().map(|t| t.to_lowercase())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpriteForm {
    Regular,
    Shiny,
    Mega,
    Gmax,
}

/// Cycles the artwork through the forms a species has.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormCycle {
    forms: Vec<SpriteForm>,
    current: usize,
    mega_orbs: Vec<String>,
    mega_index: usize,
}

impl FormCycle {
    pub fn new(detail: &SpeciesDetail) -> Self {
        let megas = detail
            .evolution
            .as_ref()
            .map(EvolutionBlock::megas)
            .unwrap_or_default();

        let mut forms = vec![SpriteForm::Regular];
        if detail.sprites.shiny.is_some() {
            forms.push(SpriteForm::Shiny);
        }
        if !megas.is_empty() {
            forms.push(SpriteForm::Mega);
        }
        if detail.sprites.gmax.is_some() {
            forms.push(SpriteForm::Gmax);
        }

        Self {
            forms,
            current: 0,
            mega_orbs: megas.iter().map(|m| m.orbe.clone()).collect(),
            mega_index: 0,
        }
    }

    pub fn forms(&self) -> &[SpriteForm] {
        &self.forms
    }

    pub fn current(&self) -> SpriteForm {
        self.forms[self.current]
    }

    pub fn mega_index(&self) -> usize {
        self.mega_index
    }

    /// Only the regular artwork exists; the toggle is hidden.
    pub fn is_fixed(&self) -> bool {
        self.forms.len() == 1
    }

    /// Advance to the next form. Several megas are shown one after the other
    /// before moving on.
    pub fn toggle(&mut self) {
        if self.current() == SpriteForm::Mega {
            if self.mega_index + 1 < self.mega_orbs.len() {
                self.mega_index += 1;
                return;
            }
            self.mega_index = 0;
        }
        self.current = (self.current + 1) % self.forms.len();
    }

    /// Badge text for the current form.
    pub fn label(&self) -> Option<String> {
        match self.current() {
            SpriteForm::Regular => None,
            SpriteForm::Shiny => Some("Shiny".to_string()),
            SpriteForm::Gmax => Some("Gmax".to_string()),
            SpriteForm::Mega if self.mega_orbs.len() > 1 => {
                let orb = self.mega_orbs.get(self.mega_index).map(String::as_str).unwrap_or("");
                let suffix = match orb.split_whitespace().next_back() {
                    Some(token) if token.eq_ignore_ascii_case("x") || token.eq_ignore_ascii_case("y") => {
                        token.to_uppercase()
                    }
                    _ => match self.mega_index {
                        0 => "X".to_string(),
                        1 => "Y".to_string(),
                        n => (n + 1).to_string(),
                    },
                };
                Some(format!("Méga {}", suffix))
            }
            SpriteForm::Mega => Some("Méga".to_string()),
        }
    }

    /// Artwork for the current form. An active regional entry only has
    /// regular and shiny artwork.
    pub fn sprite_url(&self, detail: &SpeciesDetail, regional: Option<&Entry>) -> String {
        if let Some(entry) = regional {
            return match (self.current(), &entry.sprites.shiny) {
                (SpriteForm::Shiny, Some(shiny)) => shiny.clone(),
                _ => entry.sprites.regular.clone(),
            };
        }

        let sprites = &detail.sprites;
        match self.current() {
            SpriteForm::Regular => sprites.regular.clone(),
            SpriteForm::Shiny => sprites.shiny.clone().unwrap_or_else(|| sprites.regular.clone()),
            SpriteForm::Mega => self
                .current_mega(detail)
                .map(|mega| mega.sprites.regular.clone())
                .unwrap_or_else(|| sprites.regular.clone()),
            SpriteForm::Gmax => sprites
                .gmax
                .as_ref()
                .map(|gmax| gmax.regular().to_string())
                .unwrap_or_else(|| sprites.regular.clone()),
        }
    }

    fn current_mega<'d>(&self, detail: &'d SpeciesDetail) -> Option<&'d MegaEvolution> {
        detail
            .evolution
            .as_ref()
            .and_then(|evolution| evolution.megas().get(self.mega_index))
    }
}
