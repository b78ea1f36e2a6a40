//! Domain service - business logic orchestration

use super::profile::{self, ProfileView};
use super::repository::{
    GroupRepository, IngredientRepository, MatchRepository, MoleculeRepository,
    TemperatureRepository,
};
use super::validation;
use crate::contract::{
    AromaError, AromaGroup, AuthContext, FlavorMatch, GroupProfile, Ingredient,
    IngredientProfile, IngredientRef, MatchRecord, Molecule, MoleculeFlags, TasteProfile,
    TemperaturePhase, TemperatureRange, Variation,
};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Everything the profile page needs for one ingredient: the raw nested
/// profile, the phase list and the derived view-model
#[derive(Debug, Clone, PartialEq)]
pub struct ProfilePage {
    pub profile: IngredientProfile,
    pub phases: Vec<TemperaturePhase>,
    pub view: ProfileView,
}

/// How a molecule is attached to an ingredient: link an existing molecule,
/// or create a new one (optionally as a variation) and link it
#[derive(Debug, Clone)]
pub enum AttachMolecule {
    Existing {
        molecule_id: Uuid,
    },
    New {
        group_id: Uuid,
        name_de: String,
        descriptors_de: String,
        solubility_de: String,
        variation: Option<Variation>,
    },
}

/// Domain service for the aroma dataset
pub struct Service {
    ingredients: Arc<dyn IngredientRepository>,
    groups: Arc<dyn GroupRepository>,
    molecules: Arc<dyn MoleculeRepository>,
    temperatures: Arc<dyn TemperatureRepository>,
    matches: Arc<dyn MatchRepository>,
}

fn internal(err: anyhow::Error) -> AromaError {
    tracing::error!(error = %err, "storage operation failed");
    AromaError::Internal
}

impl Service {
    pub fn new(
        ingredients: Arc<dyn IngredientRepository>,
        groups: Arc<dyn GroupRepository>,
        molecules: Arc<dyn MoleculeRepository>,
        temperatures: Arc<dyn TemperatureRepository>,
        matches: Arc<dyn MatchRepository>,
    ) -> Self {
        Self {
            ingredients,
            groups,
            molecules,
            temperatures,
            matches,
        }
    }

    // ===== Read Operations =====

    /// All ingredients, alphabetical
    pub async fn list_ingredients(&self) -> Result<Vec<IngredientRef>, AromaError> {
        self.ingredients.list_all().await.map_err(internal)
    }

    /// The nine static aroma groups, ordered by slot
    pub async fn list_groups(&self) -> Result<Vec<AromaGroup>, AromaError> {
        self.groups.list_all().await.map_err(internal)
    }

    /// Molecules of a group, optionally filtered by a name substring
    pub async fn search_molecules(
        &self,
        group_id: Uuid,
        query: Option<&str>,
    ) -> Result<Vec<Molecule>, AromaError> {
        self.require_group(group_id).await?;
        self.molecules
            .search_by_group(group_id, query)
            .await
            .map_err(internal)
    }

    /// Full profile page for one ingredient: raw nested data plus the
    /// derived view-model (active slots, bar placements, phase marks)
    pub async fn ingredient_profile(&self, id: Uuid) -> Result<ProfilePage, AromaError> {
        let ingredient = self.require_ingredient(id).await?;
        let groups = self.assemble_groups(id).await?;
        let phases = self
            .temperatures
            .phases_for_ingredient(id)
            .await
            .map_err(internal)?;

        let view = profile::derive_view(&groups, &phases);

        Ok(ProfilePage {
            profile: IngredientProfile { ingredient, groups },
            phases,
            view,
        })
    }

    /// Temperature phases for one ingredient, ordered by start temperature
    pub async fn temperature_phases(
        &self,
        ingredient_id: Uuid,
    ) -> Result<Vec<TemperaturePhase>, AromaError> {
        self.require_ingredient(ingredient_id).await?;
        self.temperatures
            .phases_for_ingredient(ingredient_id)
            .await
            .map_err(internal)
    }

    /// Outgoing flavor matches of an ingredient, with each target's derived
    /// active-slot list
    pub async fn flavor_matches(
        &self,
        ingredient_id: Uuid,
    ) -> Result<Vec<FlavorMatch>, AromaError> {
        self.require_ingredient(ingredient_id).await?;
        let records = self
            .matches
            .find_by_source(ingredient_id)
            .await
            .map_err(internal)?;

        let mut resolved = Vec::with_capacity(records.len());
        for record in records {
            let Some(target) = self
                .ingredients
                .find_by_id(record.target_ingredient_id)
                .await
                .map_err(internal)?
            else {
                // Target was deleted out from under the match; skip it
                // rather than failing the whole list.
                tracing::warn!(
                    match_id = %record.id,
                    target_id = %record.target_ingredient_id,
                    "flavor match points at a missing ingredient"
                );
                continue;
            };

            let target_groups = self.assemble_groups(target.id).await?;
            let target_active_slots = profile::active_slots(&target_groups)
                .into_iter()
                .collect();

            resolved.push(FlavorMatch {
                id: record.id,
                note: record.note,
                target: IngredientRef {
                    id: target.id,
                    name_de: target.name_de,
                },
                target_active_slots,
            });
        }

        Ok(resolved)
    }

    // ===== Ingredient Writes =====

    /// Create a new ingredient
    pub async fn create_ingredient(
        &self,
        ctx: &AuthContext,
        name_de: &str,
    ) -> Result<Ingredient, AromaError> {
        self.require_admin(ctx)?;
        validation::validate_name(name_de)?;

        let ingredient = Ingredient {
            id: Uuid::new_v4(),
            name_de: name_de.trim().to_string(),
            taste: TasteProfile::default(),
            taste_description_de: None,
            created_at: chrono::Utc::now(),
        };
        self.ingredients
            .create(&ingredient)
            .await
            .map_err(internal)?;

        tracing::info!(ingredient_id = %ingredient.id, name = %ingredient.name_de, "ingredient created");
        Ok(ingredient)
    }

    /// Rename an ingredient
    pub async fn rename_ingredient(
        &self,
        ctx: &AuthContext,
        id: Uuid,
        name_de: &str,
    ) -> Result<(), AromaError> {
        self.require_admin(ctx)?;
        validation::validate_name(name_de)?;

        let updated = self
            .ingredients
            .rename(id, name_de.trim())
            .await
            .map_err(internal)?;
        if !updated {
            return Err(AromaError::not_found("ingredient", id));
        }
        Ok(())
    }

    /// Replace an ingredient's five taste scores and description
    pub async fn update_taste_profile(
        &self,
        ctx: &AuthContext,
        id: Uuid,
        taste: TasteProfile,
        description_de: Option<&str>,
    ) -> Result<(), AromaError> {
        self.require_admin(ctx)?;
        validation::validate_taste_profile(&taste)?;

        let updated = self
            .ingredients
            .update_taste(id, &taste, description_de)
            .await
            .map_err(internal)?;
        if !updated {
            return Err(AromaError::not_found("ingredient", id));
        }
        Ok(())
    }

    // ===== Molecule Writes =====

    /// Attach a molecule to an ingredient, creating it first when needed
    pub async fn attach_molecule(
        &self,
        ctx: &AuthContext,
        ingredient_id: Uuid,
        attach: AttachMolecule,
        flags: MoleculeFlags,
    ) -> Result<Molecule, AromaError> {
        self.require_admin(ctx)?;
        self.require_ingredient(ingredient_id).await?;

        let molecule = match attach {
            AttachMolecule::Existing { molecule_id } => self
                .molecules
                .find_by_id(molecule_id)
                .await
                .map_err(internal)?
                .ok_or_else(|| AromaError::not_found("molecule", molecule_id))?,
            AttachMolecule::New {
                group_id,
                name_de,
                descriptors_de,
                solubility_de,
                variation,
            } => {
                validation::validate_name(&name_de)?;
                self.require_group(group_id).await?;
                if let Some(variation) = &variation {
                    self.check_variation_parent(group_id, None, variation).await?;
                }

                let molecule = Molecule {
                    id: Uuid::new_v4(),
                    group_id,
                    name_de: name_de.trim().to_string(),
                    descriptors_de,
                    solubility_de,
                    variation,
                };
                self.molecules.create(&molecule).await.map_err(internal)?;
                tracing::info!(molecule_id = %molecule.id, name = %molecule.name_de, "molecule created");
                molecule
            }
        };

        if self
            .molecules
            .link_exists(ingredient_id, molecule.id)
            .await
            .map_err(internal)?
        {
            return Err(AromaError::conflict(format!(
                "molecule {} is already attached to ingredient {ingredient_id}",
                molecule.id
            )));
        }

        self.molecules
            .add_link(ingredient_id, molecule.id, flags)
            .await
            .map_err(internal)?;
        Ok(molecule)
    }

    /// Update a molecule's global fields; affects every ingredient that
    /// references it
    pub async fn update_molecule(
        &self,
        ctx: &AuthContext,
        molecule_id: Uuid,
        descriptors_de: &str,
        solubility_de: &str,
        variation: Option<Variation>,
    ) -> Result<(), AromaError> {
        self.require_admin(ctx)?;

        let molecule = self
            .molecules
            .find_by_id(molecule_id)
            .await
            .map_err(internal)?
            .ok_or_else(|| AromaError::not_found("molecule", molecule_id))?;

        if let Some(variation) = &variation {
            self.check_variation_parent(molecule.group_id, Some(molecule_id), variation)
                .await?;
        }

        self.molecules
            .update(molecule_id, descriptors_de, solubility_de, variation.as_ref())
            .await
            .map_err(internal)?;
        Ok(())
    }

    /// Replace the three flags of an (ingredient, molecule) association
    pub async fn update_molecule_flags(
        &self,
        ctx: &AuthContext,
        ingredient_id: Uuid,
        molecule_id: Uuid,
        flags: MoleculeFlags,
    ) -> Result<(), AromaError> {
        self.require_admin(ctx)?;

        let updated = self
            .molecules
            .update_link(ingredient_id, molecule_id, flags)
            .await
            .map_err(internal)?;
        if !updated {
            return Err(AromaError::not_found(
                "ingredient molecule",
                format!("{ingredient_id}/{molecule_id}"),
            ));
        }
        Ok(())
    }

    /// Detach a molecule from an ingredient; the molecule itself stays
    pub async fn detach_molecule(
        &self,
        ctx: &AuthContext,
        ingredient_id: Uuid,
        molecule_id: Uuid,
    ) -> Result<(), AromaError> {
        self.require_admin(ctx)?;

        let removed = self
            .molecules
            .remove_link(ingredient_id, molecule_id)
            .await
            .map_err(internal)?;
        if !removed {
            return Err(AromaError::not_found(
                "ingredient molecule",
                format!("{ingredient_id}/{molecule_id}"),
            ));
        }
        Ok(())
    }

    // ===== Temperature Writes =====

    /// Insert or replace the temperature range of an (ingredient, group)
    /// pair
    pub async fn upsert_temperature_range(
        &self,
        ctx: &AuthContext,
        ingredient_id: Uuid,
        group_id: Uuid,
        range: TemperatureRange,
    ) -> Result<(), AromaError> {
        self.require_admin(ctx)?;
        validation::validate_temperature_range(range.temp_start_c, range.temp_end_c)?;
        self.require_ingredient(ingredient_id).await?;
        self.require_group(group_id).await?;

        self.temperatures
            .upsert_range(ingredient_id, group_id, &range)
            .await
            .map_err(internal)
    }

    /// Delete the temperature range of an (ingredient, group) pair
    pub async fn delete_temperature_range(
        &self,
        ctx: &AuthContext,
        ingredient_id: Uuid,
        group_id: Uuid,
    ) -> Result<(), AromaError> {
        self.require_admin(ctx)?;

        let removed = self
            .temperatures
            .delete_range(ingredient_id, group_id)
            .await
            .map_err(internal)?;
        if !removed {
            return Err(AromaError::not_found(
                "temperature range",
                format!("{ingredient_id}/{group_id}"),
            ));
        }
        Ok(())
    }

    /// Insert or update a temperature phase. Phase names stay unique per
    /// ingredient; a clash with another phase is a conflict.
    pub async fn upsert_temperature_phase(
        &self,
        ctx: &AuthContext,
        ingredient_id: Uuid,
        id: Option<Uuid>,
        phase_name: &str,
        temp_start_c: i32,
        temp_end_c: i32,
        description_de: Option<String>,
    ) -> Result<TemperaturePhase, AromaError> {
        self.require_admin(ctx)?;
        validation::validate_phase_name(phase_name)?;
        validation::validate_temperature_range(temp_start_c, temp_end_c)?;
        self.require_ingredient(ingredient_id).await?;

        let phase_id = id.unwrap_or_else(Uuid::new_v4);
        let existing = self
            .temperatures
            .phases_for_ingredient(ingredient_id)
            .await
            .map_err(internal)?;
        if existing
            .iter()
            .any(|p| p.phase_name == phase_name && p.id != phase_id)
        {
            return Err(AromaError::conflict(format!(
                "phase '{phase_name}' already exists for ingredient {ingredient_id}"
            )));
        }

        let phase = TemperaturePhase {
            id: phase_id,
            ingredient_id,
            phase_name: phase_name.to_string(),
            temp_start_c,
            temp_end_c,
            description_de,
        };
        self.temperatures
            .upsert_phase(&phase)
            .await
            .map_err(internal)?;
        Ok(phase)
    }

    /// Delete a temperature phase
    pub async fn delete_temperature_phase(
        &self,
        ctx: &AuthContext,
        phase_id: Uuid,
    ) -> Result<(), AromaError> {
        self.require_admin(ctx)?;

        let removed = self
            .temperatures
            .delete_phase(phase_id)
            .await
            .map_err(internal)?;
        if !removed {
            return Err(AromaError::not_found("temperature phase", phase_id));
        }
        Ok(())
    }

    // ===== Match Writes =====

    /// Create a directed flavor match. Matches stay one-directional; no
    /// reciprocal record is derived.
    pub async fn create_flavor_match(
        &self,
        ctx: &AuthContext,
        source_ingredient_id: Uuid,
        target_ingredient_id: Uuid,
        note: Option<String>,
    ) -> Result<MatchRecord, AromaError> {
        self.require_admin(ctx)?;
        validation::validate_flavor_match(source_ingredient_id, target_ingredient_id)?;
        self.require_ingredient(source_ingredient_id).await?;
        self.require_ingredient(target_ingredient_id).await?;

        let record = MatchRecord {
            id: Uuid::new_v4(),
            source_ingredient_id,
            target_ingredient_id,
            note,
            created_at: chrono::Utc::now(),
        };
        self.matches.create(&record).await.map_err(internal)?;
        Ok(record)
    }

    /// Delete a flavor match
    pub async fn delete_flavor_match(
        &self,
        ctx: &AuthContext,
        id: Uuid,
    ) -> Result<(), AromaError> {
        self.require_admin(ctx)?;

        let removed = self.matches.delete(id).await.map_err(internal)?;
        if !removed {
            return Err(AromaError::not_found("flavor match", id));
        }
        Ok(())
    }

    // ===== Helper Methods =====

    fn require_admin(&self, ctx: &AuthContext) -> Result<(), AromaError> {
        if !ctx.is_admin {
            return Err(AromaError::Forbidden);
        }
        Ok(())
    }

    async fn require_ingredient(&self, id: Uuid) -> Result<Ingredient, AromaError> {
        self.ingredients
            .find_by_id(id)
            .await
            .map_err(internal)?
            .ok_or_else(|| AromaError::not_found("ingredient", id))
    }

    async fn require_group(&self, id: Uuid) -> Result<AromaGroup, AromaError> {
        self.groups
            .find_by_id(id)
            .await
            .map_err(internal)?
            .ok_or_else(|| AromaError::not_found("aroma group", id))
    }

    /// A variation parent must be another molecule of the same group.
    async fn check_variation_parent(
        &self,
        group_id: Uuid,
        molecule_id: Option<Uuid>,
        variation: &Variation,
    ) -> Result<(), AromaError> {
        if molecule_id == Some(variation.parent_id) {
            return Err(AromaError::validation(
                "a molecule cannot be a variation of itself",
            ));
        }
        let parent = self
            .molecules
            .find_by_id(variation.parent_id)
            .await
            .map_err(internal)?
            .ok_or_else(|| AromaError::not_found("molecule", variation.parent_id))?;
        if parent.group_id != group_id {
            return Err(AromaError::validation(
                "variation parent must belong to the same aroma group",
            ));
        }
        Ok(())
    }

    /// Resolve all nine group slots for one ingredient: static group rows,
    /// linked molecules bucketed by group, and stored temperature ranges.
    async fn assemble_groups(&self, ingredient_id: Uuid) -> Result<Vec<GroupProfile>, AromaError> {
        let groups = self.groups.list_all().await.map_err(internal)?;
        let molecules = self
            .molecules
            .molecules_for_ingredient(ingredient_id)
            .await
            .map_err(internal)?;
        let ranges = self
            .temperatures
            .ranges_for_ingredient(ingredient_id)
            .await
            .map_err(internal)?;

        let mut by_group: HashMap<Uuid, Vec<_>> = HashMap::new();
        for molecule in molecules {
            by_group
                .entry(molecule.molecule.group_id)
                .or_default()
                .push(molecule);
        }
        let mut range_by_group: HashMap<Uuid, TemperatureRange> = ranges.into_iter().collect();

        Ok(groups
            .into_iter()
            .map(|group| {
                let molecules = by_group.remove(&group.id).unwrap_or_default();
                let temperature = range_by_group.remove(&group.id);
                GroupProfile {
                    group,
                    molecules,
                    temperature,
                }
            })
            .collect())
    }
}
