//! Evolution resolver.
//!
//! Turns the region-less evolution references returned upstream into the
//! region-correct entries to display next to the current entry. Each raw
//! reference goes through, in order:
//!
//! 1. **Rule override** - a rule from the current (species, region) to the
//!    reference's species decides the target outright.
//! 2. **Region-exclusivity suppression** - the reference's species is only
//!    reachable from another form of the current species, so it is hidden.
//! 3. **Default matching** - same region as the current entry, else the
//!    standard form, else the first variant.
//!
//! Resolution is a pure function of its arguments and the rule table.

pub mod events;

#[cfg(test)]
pub(crate) mod tests;

pub use events::{EventBus, ResolutionEvent};

use crate::entry::{regional_sprites, sprite_url, Entry, Identity, SpriteRefs};
use crate::errors::RuleTableResult;
use crate::rules::{Direction, IndexedRule, RuleTable};
use crate::slug::{base_slug, slugify};
use schema::{LocalizedName, RawEvolutionRef, Region};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Resolver configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Record a [`ResolutionEvent`] for every decision.
    pub debug: bool,
}

/// How a resolved evolution was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchSource {
    RuleOverride,
    SameRegion,
    Standard,
    FirstVariant,
    /// A rule target with no matching entry; the entry was built from the rule.
    Synthesized,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedEvolution {
    pub entry: Entry,
    pub condition: Option<String>,
    pub source: MatchSource,
}

impl ResolvedEvolution {
    pub fn identity(&self) -> Identity {
        self.entry.identity()
    }

    pub fn is_synthesized(&self) -> bool {
        self.source == MatchSource::Synthesized
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub evolutions: Vec<ResolvedEvolution>,
    pub events: EventBus,
}

/// Resolve against the built-in rule table.
pub fn resolve(
    current: Identity,
    raw_refs: &[RawEvolutionRef],
    direction: Direction,
    all_entries: &[Entry],
) -> RuleTableResult<Vec<ResolvedEvolution>> {
    Ok(Resolver::builtin()?.resolve(current, raw_refs, direction, all_entries))
}

#[derive(Debug, Clone, Copy)]
pub struct Resolver<'t> {
    table: &'t RuleTable,
    options: ResolverOptions,
}

impl Resolver<'static> {
    pub fn builtin() -> RuleTableResult<Self> {
        Ok(Resolver::new(RuleTable::builtin()?))
    }
}

impl<'t> Resolver<'t> {
    pub fn new(table: &'t RuleTable) -> Self {
        Self {
            table,
            options: ResolverOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ResolverOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> ResolverOptions {
        self.options
    }

    pub fn table(&self) -> &'t RuleTable {
        self.table
    }

    pub fn resolve(
        &self,
        current: Identity,
        raw_refs: &[RawEvolutionRef],
        direction: Direction,
        all_entries: &[Entry],
    ) -> Vec<ResolvedEvolution> {
        self.resolve_with_events(current, raw_refs, direction, all_entries)
            .evolutions
    }

    pub fn resolve_with_events(
        &self,
        current: Identity,
        raw_refs: &[RawEvolutionRef],
        direction: Direction,
        all_entries: &[Entry],
    ) -> Resolution {
        let index = EntryIndex::build(all_entries);
        let mut diagnostics = Diagnostics::new(self.options.debug);
        diagnostics.record(|| ResolutionEvent::ResolutionStarted {
            current,
            direction,
            references: raw_refs.len(),
        });

        let current_entry = index
            .find(current)
            .or_else(|| index.variants(current.species_id).first().copied());
        if current_entry.is_none() {
            diagnostics.record(|| ResolutionEvent::CurrentEntryMissing { current });
        }

        let mut natural = Vec::new();
        let mut synthesized = Vec::new();
        for reference in raw_refs {
            let step = self.resolve_reference(
                current,
                current_entry,
                reference,
                direction,
                &index,
                &mut diagnostics,
            );
            match step {
                Step::Resolved(evolution) => natural.push(evolution),
                Step::Synthesized(evolution) => synthesized.push(evolution),
                Step::Dropped => {}
            }
        }

        let mut seen = HashSet::new();
        let mut evolutions = Vec::with_capacity(natural.len() + synthesized.len());
        for evolution in natural.into_iter().chain(synthesized) {
            if seen.insert(evolution.identity()) {
                evolutions.push(evolution);
            } else {
                diagnostics.record(|| ResolutionEvent::DuplicateDropped {
                    resolved: evolution.identity(),
                });
            }
        }

        Resolution {
            evolutions,
            events: diagnostics.into_bus(),
        }
    }

    fn resolve_reference(
        &self,
        current: Identity,
        current_entry: Option<&Entry>,
        reference: &RawEvolutionRef,
        direction: Direction,
        index: &EntryIndex<'_>,
        diagnostics: &mut Diagnostics,
    ) -> Step {
        let candidates = candidate_slugs(reference, index);

        if let Some(current_entry) = current_entry {
            let near_slug = current_entry.base_slug.as_str();

            let matches = self
                .table
                .matching(direction, near_slug, current.region, &candidates);
            if let Some(choice) = RuleTable::most_specific(&matches, direction, current.region) {
                if choice.is_ambiguous() {
                    if choice.has_same_class_conflict() {
                        tracing::warn!(
                            rule = %choice.rule,
                            outranked = choice.outranked.len(),
                            "rule table lists conflicting targets for the same edge"
                        );
                    }
                    diagnostics.record(|| ResolutionEvent::AmbiguousRule {
                        reference: reference.pokedex_id,
                        chosen: choice.rule.to_string(),
                        outranked: choice.outranked.iter().map(|r| r.to_string()).collect(),
                    });
                }
                return self.apply_rule(choice.rule, reference, direction, index, diagnostics);
            }

            if let Some(rule) = self.exclusive_rule(direction, near_slug, current.region, &candidates) {
                tracing::debug!(reference = reference.pokedex_id, rule = %rule, "suppressed by regional rule");
                diagnostics.record(|| ResolutionEvent::SuppressedByRegionRule {
                    reference: reference.pokedex_id,
                    rule: rule.to_string(),
                    required_region: rule.near(direction).1,
                });
                return Step::Dropped;
            }
        }

        let variants = index.variants(reference.pokedex_id);
        let picked = variants
            .iter()
            .find(|entry| entry.region == current.region)
            .map(|entry| (*entry, MatchSource::SameRegion))
            .or_else(|| {
                variants
                    .iter()
                    .find(|entry| entry.region.is_none())
                    .map(|entry| (*entry, MatchSource::Standard))
            })
            .or_else(|| variants.first().map(|entry| (*entry, MatchSource::FirstVariant)));

        match picked {
            Some((entry, source)) => {
                diagnostics.record(|| ResolutionEvent::DefaultMatch {
                    reference: reference.pokedex_id,
                    resolved: entry.identity(),
                    source,
                });
                Step::Resolved(ResolvedEvolution {
                    entry: entry.clone(),
                    condition: reference.condition.clone(),
                    source,
                })
            }
            None => {
                tracing::debug!(reference = reference.pokedex_id, name = %reference.name, "unresolvable evolution reference");
                diagnostics.record(|| ResolutionEvent::UnresolvableReference {
                    reference: reference.pokedex_id,
                    name: reference.name.clone(),
                });
                Step::Dropped
            }
        }
    }

    fn apply_rule(
        &self,
        rule: &IndexedRule,
        reference: &RawEvolutionRef,
        direction: Direction,
        index: &EntryIndex<'_>,
        diagnostics: &mut Diagnostics,
    ) -> Step {
        let target = Identity {
            species_id: reference.pokedex_id,
            region: rule.far(direction).1,
        };
        let condition = rule
            .rule
            .condition
            .clone()
            .or_else(|| reference.condition.clone());

        diagnostics.record(|| ResolutionEvent::RuleOverride {
            reference: reference.pokedex_id,
            rule: rule.to_string(),
            target,
        });

        match index.find(target) {
            Some(entry) => Step::Resolved(ResolvedEvolution {
                entry: entry.clone(),
                condition,
                source: MatchSource::RuleOverride,
            }),
            None => {
                let entry = synthesize_entry(rule.far_name(direction), target, index);
                diagnostics.record(|| ResolutionEvent::Synthesized {
                    reference: reference.pokedex_id,
                    target,
                    name: entry.display_name.fr.clone(),
                });
                Step::Synthesized(ResolvedEvolution {
                    entry,
                    condition,
                    source: MatchSource::Synthesized,
                })
            }
        }
    }

    /// A rule from another form of the current species to one of the
    /// candidate slugs. Its presence means the candidate is exclusive to that
    /// other form.
    fn exclusive_rule(
        &self,
        direction: Direction,
        near_slug: &str,
        near_region: Option<Region>,
        candidates: &[String],
    ) -> Option<&'t IndexedRule> {
        let table: &'t RuleTable = self.table;
        candidates
            .iter()
            .flat_map(|slug| table.rules_touching(slug))
            .find(|rule| {
                let (rule_near, rule_near_region) = rule.near(direction);
                let (rule_far, _) = rule.far(direction);
                rule_near == near_slug
                    && rule_near_region != near_region
                    && candidates.iter().any(|slug| slug == rule_far)
            })
    }
}

enum Step {
    Resolved(ResolvedEvolution),
    Synthesized(ResolvedEvolution),
    Dropped,
}

/// Base slugs that identify a reference: its own name plus every known
/// variant of its species, without repeats.
fn candidate_slugs(reference: &RawEvolutionRef, index: &EntryIndex<'_>) -> Vec<String> {
    let mut slugs = Vec::new();
    let own = base_slug(&reference.name);
    if !own.is_empty() {
        slugs.push(own);
    }
    for entry in index.variants(reference.pokedex_id) {
        if !entry.base_slug.is_empty() && !slugs.contains(&entry.base_slug) {
            slugs.push(entry.base_slug.clone());
        }
    }
    slugs
}

/// Minimal entry for a rule target that the entry list does not contain.
fn synthesize_entry(rule_name: &str, target: Identity, index: &EntryIndex<'_>) -> Entry {
    let name = match target.region.and_then(Region::name_suffix_fr) {
        Some(suffix) if base_slug(rule_name) == slugify(rule_name) => {
            format!("{} {}", rule_name.trim(), suffix)
        }
        _ => rule_name.trim().to_string(),
    };

    let sibling = index.variants(target.species_id).first().copied();
    let sprites = match target.region {
        Some(region) => regional_sprites(target.species_id, region),
        None => SpriteRefs {
            regular: sprite_url(target.species_id, None, false),
            shiny: Some(sprite_url(target.species_id, None, true)),
            gmax: None,
        },
    };

    Entry::new(
        target.species_id,
        LocalizedName::fr(name),
        target.region,
        sprites,
        sibling.map(|e| e.types.clone()).unwrap_or_default(),
    )
    .with_generation(sibling.map(|e| e.generation).unwrap_or(0))
}

/// Entries grouped by species, in input order.
struct EntryIndex<'e> {
    by_species: HashMap<u32, Vec<&'e Entry>>,
}

impl<'e> EntryIndex<'e> {
    fn build(entries: &'e [Entry]) -> Self {
        let mut by_species: HashMap<u32, Vec<&'e Entry>> = HashMap::new();
        for entry in entries {
            by_species.entry(entry.species_id).or_default().push(entry);
        }
        Self { by_species }
    }

    fn variants(&self, species_id: u32) -> &[&'e Entry] {
        self.by_species
            .get(&species_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn find(&self, identity: Identity) -> Option<&'e Entry> {
        self.variants(identity.species_id)
            .iter()
            .find(|entry| entry.region == identity.region)
            .copied()
    }
}

struct Diagnostics {
    enabled: bool,
    bus: EventBus,
}

impl Diagnostics {
    fn new(enabled: bool) -> Self {
        Self {
            enabled,
            bus: EventBus::new(),
        }
    }

    fn record(&mut self, event: impl FnOnce() -> ResolutionEvent) {
        if self.enabled {
            self.bus.push(event());
        }
    }

    fn into_bus(self) -> EventBus {
        self.bus
    }
}
