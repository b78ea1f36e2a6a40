//! Contract models for the aroma explorer
//!
//! These models are transport-agnostic and shared between the domain layer
//! and its callers. NO serde derives - these are pure domain types.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Upper end of the fixed temperature axis in degrees Celsius.
pub const MAX_TEMP_C: i32 = 170;

/// Slot reserved for the trigeminal (chemesthetic) aroma group.
pub const TRIGEMINAL_SLOT: u8 = 9;

/// Number of fixed aroma group slots.
pub const SLOT_COUNT: u8 = 9;

/// An ingredient with its taste profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub id: Uuid,
    /// German display name
    pub name_de: String,
    pub taste: TasteProfile,
    /// Free-text taste description
    pub taste_description_de: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Five taste-intensity scores, each 0-3 or absent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TasteProfile {
    pub sweet: Option<u8>,
    pub sour: Option<u8>,
    pub salty: Option<u8>,
    pub bitter: Option<u8>,
    pub umami: Option<u8>,
}

impl TasteProfile {
    /// All five scores in a fixed order, for validation sweeps.
    pub fn scores(&self) -> [Option<u8>; 5] {
        [self.sweet, self.sour, self.salty, self.bitter, self.umami]
    }
}

/// Minimal ingredient reference for lists and match targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientRef {
    pub id: Uuid,
    pub name_de: String,
}

/// One of the nine fixed aroma group slots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AromaGroup {
    pub id: Uuid,
    /// Slot number, 1-9; slot 9 is the trigeminal group
    pub slot: u8,
    pub name_de: String,
    pub descriptor_de: String,
    pub color_hex: String,
}

/// A molecule; global entity shared across ingredients
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Molecule {
    pub id: Uuid,
    /// Owning aroma group
    pub group_id: Uuid,
    pub name_de: String,
    pub descriptors_de: String,
    pub solubility_de: String,
    /// Set when this molecule is a named variant of another molecule in the
    /// same group (e.g. an isomer)
    pub variation: Option<Variation>,
}

/// Reference to a parent molecule plus a variant label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variation {
    pub parent_id: Uuid,
    pub label: String,
}

/// Per-(ingredient, molecule) association flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoleculeFlags {
    /// Defining/signature molecule for this ingredient
    pub is_key: bool,
    /// Monitored but not defining
    pub is_tracked: bool,
    /// Triggers a chemesthetic response for this ingredient specifically
    pub has_trigeminal_activation: bool,
}

/// A molecule resolved together with its association flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoleculeWithFlags {
    pub molecule: Molecule,
    pub flags: MoleculeFlags,
}

/// Temperature range assigned to one (ingredient, group) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemperatureRange {
    pub temp_start_c: i32,
    pub temp_end_c: i32,
    pub behavior_description_de: Option<String>,
}

/// One of the nine group slots resolved for a single ingredient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupProfile {
    pub group: AromaGroup,
    pub molecules: Vec<MoleculeWithFlags>,
    pub temperature: Option<TemperatureRange>,
}

/// Full nested profile of an ingredient: the ingredient row plus all nine
/// group slots with resolved molecules and optional temperature ranges
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientProfile {
    pub ingredient: Ingredient,
    /// Always nine entries, ordered by slot
    pub groups: Vec<GroupProfile>,
}

/// Named segment of the 0-170 degree axis annotating an ingredient's
/// aroma-development narrative, independent of any group's range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemperaturePhase {
    pub id: Uuid,
    pub ingredient_id: Uuid,
    /// Single letter label, A-F, unique per ingredient
    pub phase_name: String,
    pub temp_start_c: i32,
    pub temp_end_c: i32,
    pub description_de: Option<String>,
}

/// Stored flavor-match row, as persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    pub id: Uuid,
    pub source_ingredient_id: Uuid,
    pub target_ingredient_id: Uuid,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Directed pairing from a source ingredient to a target ingredient,
/// resolved for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlavorMatch {
    pub id: Uuid,
    pub note: Option<String>,
    pub target: IngredientRef,
    /// Derived active slots of the target, for the mini circle strip
    pub target_active_slots: Vec<u8>,
}

/// Authentication context resolved by the session boundary and passed
/// through every service call; only admins unlock write operations
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthContext {
    pub is_admin: bool,
    /// Subject identifier for logging, when known
    pub subject: Option<String>,
}

impl AuthContext {
    /// Read-only viewer context
    pub fn viewer() -> Self {
        Self::default()
    }

    /// Admin context with an optional subject for logging
    pub fn admin(subject: Option<String>) -> Self {
        Self {
            is_admin: true,
            subject,
        }
    }
}
