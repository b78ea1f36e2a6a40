//! Contract layer - transport-agnostic models and errors
//!
//! NO serde derives on models - these are pure domain types.

pub mod error;
pub mod model;

pub use error::AromaError;
pub use model::{
    AromaGroup, AuthContext, FlavorMatch, GroupProfile, Ingredient, IngredientProfile,
    IngredientRef, MatchRecord, Molecule, MoleculeFlags, MoleculeWithFlags, TasteProfile, TemperaturePhase,
    TemperatureRange, Variation, MAX_TEMP_C, SLOT_COUNT, TRIGEMINAL_SLOT,
};
