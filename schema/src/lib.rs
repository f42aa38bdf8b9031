// Pokedex Evolutions Schema - Shared type definitions
// This crate contains the region enum, the upstream record shapes and the
// evolution rule data that are shared between the main crate and its build
// script, enabling the use of postcard for the compiled rule table.

// Re-export the main types
pub use chain_data::*;
pub use region::*;
pub use rule_data::*;
pub use species_data::*;

pub mod chain_data;
pub mod region;
pub mod rule_data;
pub mod species_data;
