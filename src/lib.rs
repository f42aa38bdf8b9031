// In: src/lib.rs

//! Pokédex Regional-Evolution Engine
//!
//! Normalizes upstream species records into region-aware entries and resolves
//! each entry's pre- and next-evolutions to the correct regional forms, using a
//! declarative rule table compiled into the crate at build time.

// --- MODULE DECLARATIONS ---
pub mod chain;
pub mod detail;
pub mod display;
pub mod entry;
pub mod errors;
pub mod fetch;
pub mod pokedex;
pub mod resolver;
pub mod rules;
pub mod slug;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
// Shared upstream record shapes and rule data.
pub use schema::{
    ChainLink, EvolutionBlock, EvolutionChainResponse, EvolutionRule, LocalizedName, RawEvolutionRef,
    RawSpecies, Region, RuleClass, RuleTableData, SpeciesDetail,
};

// --- From this crate's modules (`src/`) ---

// Core pipeline: normalize, resolve, classify.
pub use chain::{classify, ChainNode, ChainStage};
pub use entry::{normalize, Entry, Identity, NavigationTarget};
pub use resolver::{
    resolve, EventBus, MatchSource, Resolution, ResolutionEvent, ResolvedEvolution, Resolver,
    ResolverOptions,
};
pub use rules::{Direction, RuleTable};

// Presentation helpers.
pub use display::{build_panel, select_layout, EvolutionLayout, EvolutionPanel, PanelInputs};
pub use pokedex::{PokedexFilter, SortKey};

// Upstream access.
pub use fetch::{ChainSource, SnapshotDir, SpeciesSource};

// Crate-specific error and result types.
pub use errors::{
    EntityResult, MalformedEntityError, PokedexError, PokedexResult, RuleTableError, RuleTableResult,
    UpstreamDataError, UpstreamResult,
};
