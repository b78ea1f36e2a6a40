//! Aroma Explorer
//!
//! Content management and browsing service for a flavor/aroma reference
//! dataset: ingredients, nine fixed aroma-group slots, molecules with
//! per-ingredient flags, temperature ranges and phases, and flavor matches.
//! Reads are open; writes require the admin role.

// Public exports
pub mod contract;
pub use contract::{
    AromaError, AromaGroup, AuthContext, FlavorMatch, GroupProfile, Ingredient,
    IngredientProfile, IngredientRef, MatchRecord, Molecule, MoleculeFlags, MoleculeWithFlags,
    TasteProfile, TemperaturePhase, TemperatureRange, Variation,
};

pub mod domain;
pub use domain::{ProfilePage, Service};

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod import;
#[doc(hidden)]
pub mod infra;
