//! REST DTOs with serde derives for HTTP API

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// ===== Ingredient DTOs =====

/// Ingredient list entry
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IngredientRefDto {
    pub id: Uuid,
    /// German display name
    #[schema(example = "Zimt")]
    pub name_de: String,
}

/// Full ingredient response DTO
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IngredientDto {
    pub id: Uuid,
    #[schema(example = "Zimt")]
    pub name_de: String,

    /// Taste-intensity scores, 0-3 or absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taste_sweet: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taste_sour: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taste_salty: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taste_bitter: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taste_umami: Option<u8>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub taste_description_de: Option<String>,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Create ingredient request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateIngredientRequest {
    #[schema(example = "Zimt")]
    pub name_de: String,
}

/// Rename ingredient request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RenameIngredientRequest {
    pub name_de: String,
}

/// Replace taste profile request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateTasteRequest {
    pub taste_sweet: Option<u8>,
    pub taste_sour: Option<u8>,
    pub taste_salty: Option<u8>,
    pub taste_bitter: Option<u8>,
    pub taste_umami: Option<u8>,
    pub taste_description_de: Option<String>,
}

// ===== Group DTOs =====

/// One of the nine static aroma groups
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AromaGroupDto {
    pub id: Uuid,
    /// Slot number 1-9; slot 9 is the trigeminal group
    #[schema(example = 1)]
    pub slot: u8,
    #[schema(example = "Fruchtig")]
    pub name_de: String,
    pub descriptor_de: String,
    #[schema(example = "#E4572E")]
    pub color_hex: String,
}

// ===== Molecule DTOs =====

/// Molecule response DTO (global fields only)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MoleculeDto {
    pub id: Uuid,
    pub group_id: Uuid,
    #[schema(example = "Zimtaldehyd")]
    pub name_de: String,
    pub descriptors_de: String,
    pub solubility_de: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variation_label: Option<String>,
}

/// Molecule resolved with its per-ingredient association flags
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MoleculeWithFlagsDto {
    pub id: Uuid,
    pub group_id: Uuid,
    pub name_de: String,
    pub descriptors_de: String,
    pub solubility_de: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variation_label: Option<String>,
    pub is_key: bool,
    pub is_tracked: bool,
    pub has_trigeminal_activation: bool,
}

/// Attach a molecule to an ingredient. Either `molecule_id` references an
/// existing molecule, or `group_id` + `name_de` describe a new one.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AttachMoleculeRequest {
    /// Existing molecule to link
    pub molecule_id: Option<Uuid>,

    /// Fields for creating a new molecule
    pub group_id: Option<Uuid>,
    pub name_de: Option<String>,
    #[serde(default)]
    pub descriptors_de: String,
    #[serde(default)]
    pub solubility_de: String,
    pub parent_id: Option<Uuid>,
    pub variation_label: Option<String>,

    /// Association flags, local to this (ingredient, molecule) pairing
    #[serde(default)]
    pub is_key: bool,
    #[serde(default)]
    pub is_tracked: bool,
    #[serde(default)]
    pub has_trigeminal_activation: bool,
}

/// Global molecule edit; affects every ingredient referencing it
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateMoleculeRequest {
    pub descriptors_de: String,
    pub solubility_de: String,
    pub parent_id: Option<Uuid>,
    pub variation_label: Option<String>,
}

/// Replace the three association flags of an (ingredient, molecule) link
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateFlagsRequest {
    #[serde(default)]
    pub is_key: bool,
    #[serde(default)]
    pub is_tracked: bool,
    #[serde(default)]
    pub has_trigeminal_activation: bool,
}

// ===== Temperature DTOs =====

/// Temperature range of one (ingredient, group) pair
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TemperatureRangeDto {
    #[schema(example = 40)]
    pub temp_start_c: i32,
    #[schema(example = 90)]
    pub temp_end_c: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub behavior_description_de: Option<String>,
}

/// Upsert a group temperature range
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpsertTemperatureRequest {
    pub temp_start_c: i32,
    pub temp_end_c: i32,
    pub behavior_description_de: Option<String>,
}

/// Temperature phase response DTO
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TemperaturePhaseDto {
    pub id: Uuid,
    pub ingredient_id: Uuid,
    /// Single letter A-F
    #[schema(example = "A")]
    pub phase_name: String,
    pub temp_start_c: i32,
    pub temp_end_c: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_de: Option<String>,
}

/// Upsert a temperature phase; omit `id` to create a new one
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpsertPhaseRequest {
    pub id: Option<Uuid>,
    pub phase_name: String,
    pub temp_start_c: i32,
    pub temp_end_c: i32,
    pub description_de: Option<String>,
}

// ===== Profile View DTOs =====

/// One group slot of an ingredient profile, with resolved molecules
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GroupProfileDto {
    pub id: Uuid,
    pub slot: u8,
    pub name_de: String,
    pub descriptor_de: String,
    pub color_hex: String,
    pub molecules: Vec<MoleculeWithFlagsDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<TemperatureRangeDto>,
}

/// Temperature bar placement for one group, percent of the 0-170 axis
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GroupBarDto {
    pub slot: u8,
    pub left_pct: f64,
    pub width_pct: f64,
}

/// Vertical marker at a deduplicated phase boundary
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BoundaryMarkDto {
    pub temp_c: i32,
    pub offset_pct: f64,
}

/// Phase label centered over its sub-range
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PhaseLabelDto {
    pub phase_name: String,
    pub center_pct: f64,
}

/// Derived view-model for the profile page
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProfileViewDto {
    /// Active slot numbers, ascending; includes the auto-activated
    /// trigeminal slot
    pub active_slots: Vec<u8>,
    pub bars: Vec<GroupBarDto>,
    pub boundary_marks: Vec<BoundaryMarkDto>,
    pub phase_labels: Vec<PhaseLabelDto>,
}

/// Full profile page response: raw nested data plus the derived view
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProfilePageResponse {
    pub ingredient: IngredientDto,
    /// Always nine entries, ordered by slot
    pub groups: Vec<GroupProfileDto>,
    pub temperature_phases: Vec<TemperaturePhaseDto>,
    pub view: ProfileViewDto,
}

// ===== Match DTOs =====

/// Resolved flavor match for display
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FlavorMatchDto {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub target: IngredientRefDto,
    /// Derived active slots of the target ingredient
    pub target_active_slots: Vec<u8>,
}

/// Stored flavor-match row
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MatchRecordDto {
    pub id: Uuid,
    pub source_ingredient_id: Uuid,
    pub target_ingredient_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Create a directed flavor match
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateMatchRequest {
    pub target_ingredient_id: Uuid,
    pub note: Option<String>,
}

// ===== List Response DTOs =====

/// List of ingredients
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IngredientsListResponse {
    pub items: Vec<IngredientRefDto>,
    pub total: usize,
}

/// The nine aroma groups
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GroupsListResponse {
    pub items: Vec<AromaGroupDto>,
    pub total: usize,
}

/// Molecule search results
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MoleculesListResponse {
    pub items: Vec<MoleculeDto>,
    pub total: usize,
}

/// Temperature phases of one ingredient
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PhasesListResponse {
    pub items: Vec<TemperaturePhaseDto>,
    pub total: usize,
}

/// Flavor matches of one ingredient
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MatchesListResponse {
    pub items: Vec<FlavorMatchDto>,
    pub total: usize,
}

// Note: Conversion implementations live in mapper.rs
