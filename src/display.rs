//! Evolution panel assembly: which lists to show and what goes in them.

use crate::chain::{member_references, ChainNode, ChainStage, StageBuckets};
use crate::entry::{Entry, Identity};
use crate::resolver::{EventBus, ResolvedEvolution, Resolver};
use crate::rules::Direction;
use schema::{EvolutionBlock, RawEvolutionRef};
use serde::Serialize;

/// Text shown when a species has nothing to display.
pub const NO_EVOLUTION_LABEL: &str = "Pas d'évolution";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EvolutionLayout {
    Empty,
    NextOnly,
    PreOnly,
    Both,
}

impl EvolutionLayout {
    pub fn shows_pre(self) -> bool {
        matches!(self, EvolutionLayout::PreOnly | EvolutionLayout::Both)
    }

    pub fn shows_next(self) -> bool {
        matches!(self, EvolutionLayout::NextOnly | EvolutionLayout::Both)
    }
}

/// Choose the layout from the chain stage and what the resolver produced.
///
/// A middle stage without a next evolution is terminal and laid out like a
/// final stage.
pub fn select_layout(stage: Option<ChainStage>, has_pre: bool, has_next: bool) -> EvolutionLayout {
    let layout = match stage {
        Some(ChainStage::Base) => EvolutionLayout::NextOnly,
        Some(ChainStage::Middle) if has_next => EvolutionLayout::Both,
        Some(ChainStage::Middle) | Some(ChainStage::Final) => EvolutionLayout::PreOnly,
        None => match (has_pre, has_next) {
            (true, true) => EvolutionLayout::Both,
            (false, true) => EvolutionLayout::NextOnly,
            (true, false) => EvolutionLayout::PreOnly,
            (false, false) => EvolutionLayout::Empty,
        },
    };

    let visible = (layout.shows_pre() && has_pre) || (layout.shows_next() && has_next);
    if visible {
        layout
    } else {
        EvolutionLayout::Empty
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PanelInputs<'a> {
    pub current: Identity,
    pub entries: &'a [Entry],
    /// Evolution block from the species source.
    pub upstream: Option<&'a EvolutionBlock>,
    /// Chain from the chain source, when it could be loaded.
    pub chain: Option<&'a ChainNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvolutionPanel {
    pub stage: Option<ChainStage>,
    pub layout: EvolutionLayout,
    pub pre: Vec<ResolvedEvolution>,
    pub next: Vec<ResolvedEvolution>,
    pub events: EventBus,
}

impl EvolutionPanel {
    pub fn visible_pre(&self) -> &[ResolvedEvolution] {
        if self.layout.shows_pre() {
            &self.pre
        } else {
            &[]
        }
    }

    pub fn visible_next(&self) -> &[ResolvedEvolution] {
        if self.layout.shows_next() {
            &self.next
        } else {
            &[]
        }
    }

    pub fn is_empty(&self) -> bool {
        self.layout == EvolutionLayout::Empty
    }
}

/// Build the evolution panel for the current entry.
///
/// Chain references take precedence for a direction when the chain yields
/// any; otherwise the species source's `evolution.pre/next` is used.
pub fn build_panel(resolver: &Resolver<'_>, inputs: PanelInputs<'_>) -> EvolutionPanel {
    let species_id = inputs.current.species_id;
    let buckets = inputs.chain.map(StageBuckets::from_chain);
    let stage = buckets.as_ref().and_then(|b| b.stage_of(species_id));
    if inputs.chain.is_some() && stage.is_none() {
        tracing::warn!(species_id, "species is not part of its own evolution chain");
    }

    let (chain_pre, chain_next) = match (&buckets, stage) {
        (Some(buckets), Some(stage)) => (
            member_references(buckets.pre_of(stage), inputs.entries),
            member_references(buckets.next_of(stage), inputs.entries),
        ),
        _ => (Vec::new(), Vec::new()),
    };

    let upstream = inputs.upstream;
    let pre_refs = pick_references(chain_pre, upstream.map(EvolutionBlock::pre_refs));
    let next_refs = pick_references(chain_next, upstream.map(EvolutionBlock::next_refs));

    let pre = resolver.resolve_with_events(inputs.current, &pre_refs, Direction::Pre, inputs.entries);
    let next = resolver.resolve_with_events(inputs.current, &next_refs, Direction::Next, inputs.entries);

    let layout = select_layout(stage, !pre.evolutions.is_empty(), !next.evolutions.is_empty());
    tracing::debug!(
        current = %inputs.current,
        ?stage,
        ?layout,
        pre = pre.evolutions.len(),
        next = next.evolutions.len(),
        "built evolution panel"
    );

    let mut events = pre.events;
    events.extend(next.events);

    EvolutionPanel {
        stage,
        layout,
        pre: pre.evolutions,
        next: next.evolutions,
        events,
    }
}

fn pick_references(chain: Vec<RawEvolutionRef>, upstream: Option<&[RawEvolutionRef]>) -> Vec<RawEvolutionRef> {
    if chain.is_empty() {
        upstream.map(<[RawEvolutionRef]>::to_vec).unwrap_or_default()
    } else {
        chain
    }
}
