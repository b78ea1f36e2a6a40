//! Repository traits for data access
//!
//! These traits define the interface for data access operations.
//! Implementations are in infra/storage/repositories.rs

use crate::contract::{
    AromaGroup, Ingredient, IngredientRef, MatchRecord, Molecule, MoleculeFlags,
    MoleculeWithFlags, TasteProfile, TemperaturePhase, TemperatureRange, Variation,
};
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository for ingredient rows
#[async_trait]
pub trait IngredientRepository: Send + Sync {
    /// Insert a new ingredient
    async fn create(&self, ingredient: &Ingredient) -> Result<()>;

    /// Rename an ingredient; `false` when the id is unknown
    async fn rename(&self, id: Uuid, name_de: &str) -> Result<bool>;

    /// Replace the taste scores and description; `false` when unknown
    async fn update_taste(
        &self,
        id: Uuid,
        taste: &TasteProfile,
        description_de: Option<&str>,
    ) -> Result<bool>;

    /// Find an ingredient by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Ingredient>>;

    /// All ingredients, alphabetical by German name
    async fn list_all(&self) -> Result<Vec<IngredientRef>>;
}

/// Repository for the nine static aroma groups
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// The nine rows, ordered by slot
    async fn list_all(&self) -> Result<Vec<AromaGroup>>;

    /// Find a group by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AromaGroup>>;
}

/// Repository for molecules and their per-ingredient associations
#[async_trait]
pub trait MoleculeRepository: Send + Sync {
    /// Insert a new molecule
    async fn create(&self, molecule: &Molecule) -> Result<()>;

    /// Update the global fields of a molecule; `false` when unknown
    async fn update(
        &self,
        id: Uuid,
        descriptors_de: &str,
        solubility_de: &str,
        variation: Option<&Variation>,
    ) -> Result<bool>;

    /// Find a molecule by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Molecule>>;

    /// Molecules of a group, optionally filtered by a case-insensitive name
    /// substring, alphabetical
    async fn search_by_group(&self, group_id: Uuid, query: Option<&str>) -> Result<Vec<Molecule>>;

    /// Whether an (ingredient, molecule) link exists
    async fn link_exists(&self, ingredient_id: Uuid, molecule_id: Uuid) -> Result<bool>;

    /// Insert an (ingredient, molecule) link with its flags
    async fn add_link(
        &self,
        ingredient_id: Uuid,
        molecule_id: Uuid,
        flags: MoleculeFlags,
    ) -> Result<()>;

    /// Replace the flags of an existing link; `false` when the link is unknown
    async fn update_link(
        &self,
        ingredient_id: Uuid,
        molecule_id: Uuid,
        flags: MoleculeFlags,
    ) -> Result<bool>;

    /// Remove a link (the molecule itself stays); `false` when unknown
    async fn remove_link(&self, ingredient_id: Uuid, molecule_id: Uuid) -> Result<bool>;

    /// All molecules linked to an ingredient, with their flags resolved
    async fn molecules_for_ingredient(&self, ingredient_id: Uuid) -> Result<Vec<MoleculeWithFlags>>;
}

/// Repository for group temperature ranges and temperature phases
#[async_trait]
pub trait TemperatureRepository: Send + Sync {
    /// Stored ranges for an ingredient, keyed by group id
    async fn ranges_for_ingredient(
        &self,
        ingredient_id: Uuid,
    ) -> Result<Vec<(Uuid, TemperatureRange)>>;

    /// Insert or replace the range for an (ingredient, group) pair
    async fn upsert_range(
        &self,
        ingredient_id: Uuid,
        group_id: Uuid,
        range: &TemperatureRange,
    ) -> Result<()>;

    /// Delete the range for an (ingredient, group) pair; `false` when absent
    async fn delete_range(&self, ingredient_id: Uuid, group_id: Uuid) -> Result<bool>;

    /// Phases of an ingredient, ordered by start temperature
    async fn phases_for_ingredient(&self, ingredient_id: Uuid) -> Result<Vec<TemperaturePhase>>;

    /// Insert or replace a phase by id
    async fn upsert_phase(&self, phase: &TemperaturePhase) -> Result<()>;

    /// Delete a phase; `false` when unknown
    async fn delete_phase(&self, phase_id: Uuid) -> Result<bool>;
}

/// Repository for directed flavor matches
#[async_trait]
pub trait MatchRepository: Send + Sync {
    /// Insert a new match
    async fn create(&self, record: &MatchRecord) -> Result<()>;

    /// Delete a match; `false` when unknown
    async fn delete(&self, id: Uuid) -> Result<bool>;

    /// Outgoing matches of an ingredient, oldest first
    async fn find_by_source(&self, source_ingredient_id: Uuid) -> Result<Vec<MatchRecord>>;
}
