use crate::errors::{RuleTableError, RuleTableResult};
use crate::slug::base_slug;
use schema::{EvolutionRule, Region, RuleClass, RuleTableData};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Which way an evolution list points from the current entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    /// Pre-evolutions: the current entry is the rule's `to` side.
    Pre,
    /// Next evolutions: the current entry is the rule's `from` side.
    Next,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Pre => write!(f, "pre"),
            Direction::Next => write!(f, "next"),
        }
    }
}

/// A rule together with its class, its position in the table, and the
/// normalized slugs of both endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedRule {
    pub rule: EvolutionRule,
    pub class: RuleClass,
    pub position: usize,
    pub from_slug: String,
    pub to_slug: String,
}

impl IndexedRule {
    /// The endpoint on the current entry's side.
    pub fn near(&self, direction: Direction) -> (&str, Option<Region>) {
        match direction {
            Direction::Next => (&self.from_slug, self.rule.from_region),
            Direction::Pre => (&self.to_slug, self.rule.to_region),
        }
    }

    /// The endpoint the rule resolves to.
    pub fn far(&self, direction: Direction) -> (&str, Option<Region>) {
        match direction {
            Direction::Next => (&self.to_slug, self.rule.to_region),
            Direction::Pre => (&self.from_slug, self.rule.from_region),
        }
    }

    /// The far endpoint's name as authored in the rule file.
    pub fn far_name(&self, direction: Direction) -> &str {
        match direction {
            Direction::Next => &self.rule.to,
            Direction::Pre => &self.rule.from,
        }
    }
}

impl fmt::Display for IndexedRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let region = |r: Option<Region>| r.map(|r| r.tag()).unwrap_or("standard");
        write!(
            f,
            "{}({}) -> {}({})",
            self.from_slug,
            region(self.rule.from_region),
            self.to_slug,
            region(self.rule.to_region)
        )
    }
}

/// Outcome of the most-specific-match tie-break.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleChoice<'a> {
    pub rule: &'a IndexedRule,
    /// Matching rules that point somewhere else and lost the tie-break.
    pub outranked: Vec<&'a IndexedRule>,
}

impl RuleChoice<'_> {
    pub fn is_ambiguous(&self) -> bool {
        !self.outranked.is_empty()
    }

    /// Whether a losing rule comes from the winner's own class, i.e. the
    /// table lists the same edge twice.
    pub fn has_same_class_conflict(&self) -> bool {
        self.outranked.iter().any(|r| r.class == self.rule.class)
    }
}

/// Several rules answering the same (near side, far species) query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOverlap<'a> {
    pub direction: Direction,
    pub near_slug: String,
    pub near_region: Option<Region>,
    pub far_slug: String,
    pub rules: Vec<&'a IndexedRule>,
}

impl RuleOverlap<'_> {
    pub fn is_same_class(&self) -> bool {
        self.rules
            .iter()
            .any(|a| self.rules.iter().any(|b| a.position != b.position && a.class == b.class))
    }
}

type SlugKey = (String, Option<Region>);

/// Indexed, read-only evolution rule table.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: Vec<IndexedRule>,
    forward: HashMap<SlugKey, Vec<usize>>,
    backward: HashMap<SlugKey, Vec<usize>>,
    endpoints: HashMap<String, Vec<usize>>,
}

impl RuleTable {
    /// Validate and index rule data. Every rule must fit its class and both
    /// endpoints must normalize to a non-empty slug.
    pub fn from_data(data: RuleTableData) -> RuleTableResult<Self> {
        let mut table = RuleTable::default();

        for (class, rule) in data.iter_classified() {
            if !class.admits(rule.from_region, rule.to_region) {
                return Err(RuleTableError::ClassMismatch {
                    class,
                    from: rule.from.clone(),
                    to: rule.to.clone(),
                });
            }

            let from_slug = base_slug(&rule.from);
            let to_slug = base_slug(&rule.to);
            for (name, slug) in [(&rule.from, &from_slug), (&rule.to, &to_slug)] {
                if slug.is_empty() {
                    return Err(RuleTableError::EmptySlug {
                        class,
                        name: name.clone(),
                    });
                }
            }

            let position = table.rules.len();
            table
                .forward
                .entry((from_slug.clone(), rule.from_region))
                .or_default()
                .push(position);
            table
                .backward
                .entry((to_slug.clone(), rule.to_region))
                .or_default()
                .push(position);
            table.endpoints.entry(from_slug.clone()).or_default().push(position);
            if to_slug != from_slug {
                table.endpoints.entry(to_slug.clone()).or_default().push(position);
            }

            table.rules.push(IndexedRule {
                rule: rule.clone(),
                class,
                position,
                from_slug,
                to_slug,
            });
        }

        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// All rules in table order (class order, then authoring order).
    pub fn iter(&self) -> impl Iterator<Item = &IndexedRule> {
        self.rules.iter()
    }

    pub fn class(&self, class: RuleClass) -> impl Iterator<Item = &IndexedRule> {
        self.rules.iter().filter(move |r| r.class == class)
    }

    /// Rules whose near side is exactly (`near_slug`, `near_region`).
    pub fn candidates(
        &self,
        direction: Direction,
        near_slug: &str,
        near_region: Option<Region>,
    ) -> Vec<&IndexedRule> {
        let index = match direction {
            Direction::Next => &self.forward,
            Direction::Pre => &self.backward,
        };
        index
            .get(&(near_slug.to_string(), near_region))
            .map(|positions| positions.iter().map(|&p| &self.rules[p]).collect())
            .unwrap_or_default()
    }

    /// Candidate rules whose far side is one of `far_slugs`.
    pub fn matching(
        &self,
        direction: Direction,
        near_slug: &str,
        near_region: Option<Region>,
        far_slugs: &[String],
    ) -> Vec<&IndexedRule> {
        self.candidates(direction, near_slug, near_region)
            .into_iter()
            .filter(|rule| far_slugs.iter().any(|slug| slug == rule.far(direction).0))
            .collect()
    }

    /// Rule for `from -> to_candidate`, after the tie-break.
    pub fn find_forward_rule(
        &self,
        from_slug: &str,
        from_region: Option<Region>,
        to_candidate: &str,
    ) -> Option<&IndexedRule> {
        let matches = self.matching(
            Direction::Next,
            &base_slug(from_slug),
            from_region,
            &[base_slug(to_candidate)],
        );
        Self::most_specific(&matches, Direction::Next, from_region).map(|choice| choice.rule)
    }

    /// Rule for `from_candidate -> to`, after the tie-break.
    pub fn find_backward_rule(
        &self,
        to_slug: &str,
        to_region: Option<Region>,
        from_candidate: &str,
    ) -> Option<&IndexedRule> {
        let matches = self.matching(
            Direction::Pre,
            &base_slug(to_slug),
            to_region,
            &[base_slug(from_candidate)],
        );
        Self::most_specific(&matches, Direction::Pre, to_region).map(|choice| choice.rule)
    }

    /// Every rule with `slug` at either endpoint, in table order.
    pub fn rules_touching(&self, slug: &str) -> Vec<&IndexedRule> {
        self.endpoints
            .get(&base_slug(slug))
            .map(|positions| positions.iter().map(|&p| &self.rules[p]).collect())
            .unwrap_or_default()
    }

    /// Pick one rule out of several matches for the same query.
    ///
    /// Ranking: far region equal to the current region, then a standard far
    /// side, then any other region; ties go to the earlier rule in the table.
    pub fn most_specific<'a>(
        matches: &[&'a IndexedRule],
        direction: Direction,
        near_region: Option<Region>,
    ) -> Option<RuleChoice<'a>> {
        let rank = |rule: &IndexedRule| {
            let (_, far_region) = rule.far(direction);
            let region_rank = if far_region == near_region {
                0
            } else if far_region.is_none() {
                1
            } else {
                2
            };
            (region_rank, rule.position)
        };

        let winner = matches.iter().copied().min_by_key(|&rule| rank(rule))?;
        let outranked = matches
            .iter()
            .copied()
            .filter(|rule| rule.position != winner.position && rule.far(direction) != winner.far(direction))
            .collect();

        Some(RuleChoice {
            rule: winner,
            outranked,
        })
    }

    /// Queries answered by more than one rule, for reviewing the table.
    pub fn overlaps(&self) -> Vec<RuleOverlap<'_>> {
        let mut overlaps = Vec::new();
        for (direction, index) in [(Direction::Next, &self.forward), (Direction::Pre, &self.backward)] {
            let mut keys: Vec<&SlugKey> = index.keys().collect();
            keys.sort();
            for key in keys {
                let mut by_far: Vec<(&str, Vec<&IndexedRule>)> = Vec::new();
                for &position in &index[key] {
                    let rule = &self.rules[position];
                    let far_slug = rule.far(direction).0;
                    match by_far.iter_mut().find(|(slug, _)| *slug == far_slug) {
                        Some((_, rules)) => rules.push(rule),
                        None => by_far.push((far_slug, vec![rule])),
                    }
                }
                for (far_slug, rules) in by_far {
                    if rules.len() > 1 {
                        overlaps.push(RuleOverlap {
                            direction,
                            near_slug: key.0.clone(),
                            near_region: key.1,
                            far_slug: far_slug.to_string(),
                            rules,
                        });
                    }
                }
            }
        }
        overlaps
    }

    /// Overlaps within a single class: latent duplicates in the rule file.
    pub fn ambiguities(&self) -> Vec<RuleOverlap<'_>> {
        self.overlaps()
            .into_iter()
            .filter(RuleOverlap::is_same_class)
            .collect()
    }
}
