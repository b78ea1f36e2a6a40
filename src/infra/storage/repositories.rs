//! SeaORM repository implementations

use crate::contract::{
    AromaGroup, Ingredient, IngredientRef, MatchRecord, Molecule, MoleculeFlags,
    MoleculeWithFlags, TasteProfile, TemperaturePhase, TemperatureRange, Variation,
};
use crate::domain::repository::{
    GroupRepository, IngredientRepository, MatchRepository, MoleculeRepository,
    TemperatureRepository,
};
use anyhow::Result;
use async_trait::async_trait;
use sea_orm::{
    prelude::Expr, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use super::entity;

// ===== Ingredient Repository =====

pub struct SeaOrmIngredientRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmIngredientRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl IngredientRepository for SeaOrmIngredientRepository {
    async fn create(&self, ingredient: &Ingredient) -> Result<()> {
        let active: entity::ingredient::ActiveModel = ingredient.into();
        entity::ingredient::Entity::insert(active)
            .exec(&*self.db)
            .await?;
        Ok(())
    }

    async fn rename(&self, id: Uuid, name_de: &str) -> Result<bool> {
        let result = entity::ingredient::Entity::update_many()
            .col_expr(entity::ingredient::Column::NameDe, Expr::value(name_de))
            .filter(entity::ingredient::Column::Id.eq(id))
            .exec(&*self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn update_taste(
        &self,
        id: Uuid,
        taste: &TasteProfile,
        description_de: Option<&str>,
    ) -> Result<bool> {
        let result = entity::ingredient::Entity::update_many()
            .col_expr(
                entity::ingredient::Column::TasteSweet,
                Expr::value(taste.sweet.map(i16::from)),
            )
            .col_expr(
                entity::ingredient::Column::TasteSour,
                Expr::value(taste.sour.map(i16::from)),
            )
            .col_expr(
                entity::ingredient::Column::TasteSalty,
                Expr::value(taste.salty.map(i16::from)),
            )
            .col_expr(
                entity::ingredient::Column::TasteBitter,
                Expr::value(taste.bitter.map(i16::from)),
            )
            .col_expr(
                entity::ingredient::Column::TasteUmami,
                Expr::value(taste.umami.map(i16::from)),
            )
            .col_expr(
                entity::ingredient::Column::TasteDescriptionDe,
                Expr::value(description_de),
            )
            .filter(entity::ingredient::Column::Id.eq(id))
            .exec(&*self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Ingredient>> {
        let result = entity::ingredient::Entity::find_by_id(id)
            .one(&*self.db)
            .await?;
        Ok(result.map(|e| e.into()))
    }

    async fn list_all(&self) -> Result<Vec<IngredientRef>> {
        let results = entity::ingredient::Entity::find()
            .order_by_asc(entity::ingredient::Column::NameDe)
            .all(&*self.db)
            .await?;

        Ok(results
            .into_iter()
            .map(|e| IngredientRef {
                id: e.id,
                name_de: e.name_de,
            })
            .collect())
    }
}

// ===== Group Repository =====

pub struct SeaOrmGroupRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmGroupRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GroupRepository for SeaOrmGroupRepository {
    async fn list_all(&self) -> Result<Vec<AromaGroup>> {
        let results = entity::aroma_group::Entity::find()
            .order_by_asc(entity::aroma_group::Column::Slot)
            .all(&*self.db)
            .await?;
        Ok(results.into_iter().map(|e| e.into()).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AromaGroup>> {
        let result = entity::aroma_group::Entity::find_by_id(id)
            .one(&*self.db)
            .await?;
        Ok(result.map(|e| e.into()))
    }
}

// ===== Molecule Repository =====

pub struct SeaOrmMoleculeRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmMoleculeRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MoleculeRepository for SeaOrmMoleculeRepository {
    async fn create(&self, molecule: &Molecule) -> Result<()> {
        let active: entity::molecule::ActiveModel = molecule.into();
        entity::molecule::Entity::insert(active)
            .exec(&*self.db)
            .await?;
        Ok(())
    }

    async fn update(
        &self,
        id: Uuid,
        descriptors_de: &str,
        solubility_de: &str,
        variation: Option<&Variation>,
    ) -> Result<bool> {
        let result = entity::molecule::Entity::update_many()
            .col_expr(
                entity::molecule::Column::DescriptorsDe,
                Expr::value(descriptors_de),
            )
            .col_expr(
                entity::molecule::Column::SolubilityDe,
                Expr::value(solubility_de),
            )
            .col_expr(
                entity::molecule::Column::ParentId,
                Expr::value(variation.map(|v| v.parent_id)),
            )
            .col_expr(
                entity::molecule::Column::VariationLabel,
                Expr::value(variation.map(|v| v.label.clone())),
            )
            .filter(entity::molecule::Column::Id.eq(id))
            .exec(&*self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Molecule>> {
        let result = entity::molecule::Entity::find_by_id(id)
            .one(&*self.db)
            .await?;
        Ok(result.map(|e| e.into()))
    }

    async fn search_by_group(&self, group_id: Uuid, query: Option<&str>) -> Result<Vec<Molecule>> {
        let results = entity::molecule::Entity::find()
            .filter(entity::molecule::Column::GroupId.eq(group_id))
            .order_by_asc(entity::molecule::Column::NameDe)
            .all(&*self.db)
            .await?;

        // LOWER() and LIKE fold only ASCII on sqlite, so the
        // case-insensitive substring filter runs here after the
        // group-scoped query.
        let needle = query
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);
        Ok(results
            .into_iter()
            .map(Molecule::from)
            .filter(|m| match &needle {
                Some(needle) => m.name_de.to_lowercase().contains(needle),
                None => true,
            })
            .collect())
    }

    async fn link_exists(&self, ingredient_id: Uuid, molecule_id: Uuid) -> Result<bool> {
        let count = entity::ingredient_molecule::Entity::find_by_id((ingredient_id, molecule_id))
            .count(&*self.db)
            .await?;
        Ok(count > 0)
    }

    async fn add_link(
        &self,
        ingredient_id: Uuid,
        molecule_id: Uuid,
        flags: MoleculeFlags,
    ) -> Result<()> {
        use sea_orm::ActiveValue::Set;

        let active = entity::ingredient_molecule::ActiveModel {
            ingredient_id: Set(ingredient_id),
            molecule_id: Set(molecule_id),
            is_key: Set(flags.is_key),
            is_tracked: Set(flags.is_tracked),
            has_trigeminal_activation: Set(flags.has_trigeminal_activation),
        };
        entity::ingredient_molecule::Entity::insert(active)
            .exec(&*self.db)
            .await?;
        Ok(())
    }

    async fn update_link(
        &self,
        ingredient_id: Uuid,
        molecule_id: Uuid,
        flags: MoleculeFlags,
    ) -> Result<bool> {
        let result = entity::ingredient_molecule::Entity::update_many()
            .col_expr(
                entity::ingredient_molecule::Column::IsKey,
                Expr::value(flags.is_key),
            )
            .col_expr(
                entity::ingredient_molecule::Column::IsTracked,
                Expr::value(flags.is_tracked),
            )
            .col_expr(
                entity::ingredient_molecule::Column::HasTrigeminalActivation,
                Expr::value(flags.has_trigeminal_activation),
            )
            .filter(entity::ingredient_molecule::Column::IngredientId.eq(ingredient_id))
            .filter(entity::ingredient_molecule::Column::MoleculeId.eq(molecule_id))
            .exec(&*self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn remove_link(&self, ingredient_id: Uuid, molecule_id: Uuid) -> Result<bool> {
        let result = entity::ingredient_molecule::Entity::delete_many()
            .filter(entity::ingredient_molecule::Column::IngredientId.eq(ingredient_id))
            .filter(entity::ingredient_molecule::Column::MoleculeId.eq(molecule_id))
            .exec(&*self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn molecules_for_ingredient(
        &self,
        ingredient_id: Uuid,
    ) -> Result<Vec<MoleculeWithFlags>> {
        let links = entity::ingredient_molecule::Entity::find()
            .filter(entity::ingredient_molecule::Column::IngredientId.eq(ingredient_id))
            .all(&*self.db)
            .await?;
        if links.is_empty() {
            return Ok(Vec::new());
        }

        let molecule_ids: Vec<Uuid> = links.iter().map(|l| l.molecule_id).collect();
        let molecules = entity::molecule::Entity::find()
            .filter(entity::molecule::Column::Id.is_in(molecule_ids))
            .order_by_asc(entity::molecule::Column::NameDe)
            .all(&*self.db)
            .await?;

        let flags_by_molecule: HashMap<Uuid, MoleculeFlags> = links
            .into_iter()
            .map(|l| (l.molecule_id, l.into()))
            .collect();

        Ok(molecules
            .into_iter()
            .filter_map(|m| {
                let flags = flags_by_molecule.get(&m.id).copied()?;
                Some(MoleculeWithFlags {
                    molecule: m.into(),
                    flags,
                })
            })
            .collect())
    }
}

// ===== Temperature Repository =====

pub struct SeaOrmTemperatureRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmTemperatureRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TemperatureRepository for SeaOrmTemperatureRepository {
    async fn ranges_for_ingredient(
        &self,
        ingredient_id: Uuid,
    ) -> Result<Vec<(Uuid, TemperatureRange)>> {
        let results = entity::group_temperature::Entity::find()
            .filter(entity::group_temperature::Column::IngredientId.eq(ingredient_id))
            .all(&*self.db)
            .await?;
        Ok(results
            .into_iter()
            .map(|e| (e.group_id, e.into()))
            .collect())
    }

    async fn upsert_range(
        &self,
        ingredient_id: Uuid,
        group_id: Uuid,
        range: &TemperatureRange,
    ) -> Result<()> {
        use sea_orm::ActiveValue::Set;

        let existing = entity::group_temperature::Entity::find_by_id((ingredient_id, group_id))
            .one(&*self.db)
            .await?;

        if existing.is_some() {
            entity::group_temperature::Entity::update_many()
                .col_expr(
                    entity::group_temperature::Column::TempStartC,
                    Expr::value(range.temp_start_c),
                )
                .col_expr(
                    entity::group_temperature::Column::TempEndC,
                    Expr::value(range.temp_end_c),
                )
                .col_expr(
                    entity::group_temperature::Column::BehaviorDescriptionDe,
                    Expr::value(range.behavior_description_de.clone()),
                )
                .filter(entity::group_temperature::Column::IngredientId.eq(ingredient_id))
                .filter(entity::group_temperature::Column::GroupId.eq(group_id))
                .exec(&*self.db)
                .await?;
        } else {
            let active = entity::group_temperature::ActiveModel {
                ingredient_id: Set(ingredient_id),
                group_id: Set(group_id),
                temp_start_c: Set(range.temp_start_c),
                temp_end_c: Set(range.temp_end_c),
                behavior_description_de: Set(range.behavior_description_de.clone()),
            };
            entity::group_temperature::Entity::insert(active)
                .exec(&*self.db)
                .await?;
        }
        Ok(())
    }

    async fn delete_range(&self, ingredient_id: Uuid, group_id: Uuid) -> Result<bool> {
        let result = entity::group_temperature::Entity::delete_many()
            .filter(entity::group_temperature::Column::IngredientId.eq(ingredient_id))
            .filter(entity::group_temperature::Column::GroupId.eq(group_id))
            .exec(&*self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn phases_for_ingredient(&self, ingredient_id: Uuid) -> Result<Vec<TemperaturePhase>> {
        let results = entity::temperature_phase::Entity::find()
            .filter(entity::temperature_phase::Column::IngredientId.eq(ingredient_id))
            .order_by_asc(entity::temperature_phase::Column::TempStartC)
            .all(&*self.db)
            .await?;
        Ok(results.into_iter().map(|e| e.into()).collect())
    }

    async fn upsert_phase(&self, phase: &TemperaturePhase) -> Result<()> {
        let existing = entity::temperature_phase::Entity::find_by_id(phase.id)
            .one(&*self.db)
            .await?;

        let active: entity::temperature_phase::ActiveModel = phase.into();
        if existing.is_some() {
            entity::temperature_phase::Entity::update(active)
                .exec(&*self.db)
                .await?;
        } else {
            entity::temperature_phase::Entity::insert(active)
                .exec(&*self.db)
                .await?;
        }
        Ok(())
    }

    async fn delete_phase(&self, phase_id: Uuid) -> Result<bool> {
        let result = entity::temperature_phase::Entity::delete_many()
            .filter(entity::temperature_phase::Column::Id.eq(phase_id))
            .exec(&*self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}

// ===== Match Repository =====

pub struct SeaOrmMatchRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmMatchRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MatchRepository for SeaOrmMatchRepository {
    async fn create(&self, record: &MatchRecord) -> Result<()> {
        let active: entity::ingredient_match::ActiveModel = record.into();
        entity::ingredient_match::Entity::insert(active)
            .exec(&*self.db)
            .await?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = entity::ingredient_match::Entity::delete_many()
            .filter(entity::ingredient_match::Column::Id.eq(id))
            .exec(&*self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn find_by_source(&self, source_ingredient_id: Uuid) -> Result<Vec<MatchRecord>> {
        let results = entity::ingredient_match::Entity::find()
            .filter(entity::ingredient_match::Column::SourceIngredientId.eq(source_ingredient_id))
            .order_by_asc(entity::ingredient_match::Column::CreatedAt)
            .all(&*self.db)
            .await?;
        Ok(results.into_iter().map(|e| e.into()).collect())
    }
}
