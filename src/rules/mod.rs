//! Evolution rule table.
//!
//! The table is a hand-authored list of directed edges between
//! (species, region) pairs, split into four relation classes. It is compiled
//! from `data/evolution_rules.ron` at build time and indexed once on first
//! use; see [`RuleTable::builtin`].

mod builtin;
mod table;

pub use table::{Direction, IndexedRule, RuleChoice, RuleOverlap, RuleTable};
