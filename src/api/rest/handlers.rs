//! HTTP request handlers - thin layer that delegates to domain service

use super::{
    dto::*,
    error::{map_domain_error, Problem},
};
use crate::contract::{AuthContext, TasteProfile, TemperatureRange, Variation};
use crate::domain::Service;
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

// ===== Ingredient Handlers =====

/// List all ingredients, alphabetical
pub async fn list_ingredients(
    service: Arc<Service>,
) -> Result<Json<IngredientsListResponse>, Problem> {
    let items: Vec<IngredientRefDto> = service
        .list_ingredients()
        .await
        .map_err(map_domain_error)?
        .into_iter()
        .map(Into::into)
        .collect();
    let total = items.len();

    Ok(Json(IngredientsListResponse { items, total }))
}

/// Create a new ingredient
pub async fn create_ingredient(
    service: Arc<Service>,
    ctx: AuthContext,
    Json(req): Json<CreateIngredientRequest>,
) -> Result<(StatusCode, Json<IngredientDto>), Problem> {
    let ingredient = service
        .create_ingredient(&ctx, &req.name_de)
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(ingredient.into())))
}

/// Rename an ingredient
pub async fn rename_ingredient(
    service: Arc<Service>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
    Json(req): Json<RenameIngredientRequest>,
) -> Result<StatusCode, Problem> {
    service
        .rename_ingredient(&ctx, id, &req.name_de)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Full profile page of one ingredient: raw nested data plus derived view
pub async fn get_profile(
    service: Arc<Service>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProfilePageResponse>, Problem> {
    let page = service
        .ingredient_profile(id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(page.into()))
}

/// Replace an ingredient's taste profile
pub async fn update_taste(
    service: Arc<Service>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTasteRequest>,
) -> Result<StatusCode, Problem> {
    let taste = TasteProfile::from(&req);
    service
        .update_taste_profile(&ctx, id, taste, req.taste_description_de.as_deref())
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

// ===== Group Handlers =====

/// The nine static aroma groups
pub async fn list_groups(service: Arc<Service>) -> Result<Json<GroupsListResponse>, Problem> {
    let items: Vec<AromaGroupDto> = service
        .list_groups()
        .await
        .map_err(map_domain_error)?
        .into_iter()
        .map(Into::into)
        .collect();
    let total = items.len();

    Ok(Json(GroupsListResponse { items, total }))
}

/// Query parameters for molecule search
#[derive(Debug, Deserialize)]
pub struct SearchMoleculesQuery {
    /// Case-insensitive name substring
    pub query: Option<String>,
}

/// Search molecules within a group
pub async fn search_molecules(
    service: Arc<Service>,
    Path(group_id): Path<Uuid>,
    Query(query): Query<SearchMoleculesQuery>,
) -> Result<Json<MoleculesListResponse>, Problem> {
    let items: Vec<MoleculeDto> = service
        .search_molecules(group_id, query.query.as_deref())
        .await
        .map_err(map_domain_error)?
        .into_iter()
        .map(Into::into)
        .collect();
    let total = items.len();

    Ok(Json(MoleculesListResponse { items, total }))
}

// ===== Molecule Handlers =====

/// Attach a molecule to an ingredient, creating it first when needed
pub async fn attach_molecule(
    service: Arc<Service>,
    ctx: AuthContext,
    Path(ingredient_id): Path<Uuid>,
    Json(req): Json<AttachMoleculeRequest>,
) -> Result<(StatusCode, Json<MoleculeDto>), Problem> {
    let attach: crate::domain::AttachMolecule = (&req).try_into().map_err(map_domain_error)?;
    let flags: crate::contract::MoleculeFlags = (&req).into();
    let molecule = service
        .attach_molecule(&ctx, ingredient_id, attach, flags)
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(molecule.into())))
}

/// Replace the flags of an (ingredient, molecule) association
pub async fn update_molecule_flags(
    service: Arc<Service>,
    ctx: AuthContext,
    Path((ingredient_id, molecule_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<UpdateFlagsRequest>,
) -> Result<StatusCode, Problem> {
    service
        .update_molecule_flags(&ctx, ingredient_id, molecule_id, (&req).into())
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Detach a molecule from an ingredient
pub async fn detach_molecule(
    service: Arc<Service>,
    ctx: AuthContext,
    Path((ingredient_id, molecule_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, Problem> {
    service
        .detach_molecule(&ctx, ingredient_id, molecule_id)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Edit a molecule's global fields
pub async fn update_molecule(
    service: Arc<Service>,
    ctx: AuthContext,
    Path(molecule_id): Path<Uuid>,
    Json(req): Json<UpdateMoleculeRequest>,
) -> Result<StatusCode, Problem> {
    let variation = match (req.parent_id, req.variation_label) {
        (Some(parent_id), Some(label)) => Some(Variation { parent_id, label }),
        (None, None) => None,
        _ => {
            return Err(map_domain_error(crate::contract::AromaError::validation(
                "parent_id and variation_label must be set together",
            )))
        }
    };
    service
        .update_molecule(
            &ctx,
            molecule_id,
            &req.descriptors_de,
            &req.solubility_de,
            variation,
        )
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

// ===== Temperature Handlers =====

/// Insert or replace a group temperature range
pub async fn upsert_temperature(
    service: Arc<Service>,
    ctx: AuthContext,
    Path((ingredient_id, group_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<UpsertTemperatureRequest>,
) -> Result<StatusCode, Problem> {
    let range = TemperatureRange {
        temp_start_c: req.temp_start_c,
        temp_end_c: req.temp_end_c,
        behavior_description_de: req.behavior_description_de,
    };
    service
        .upsert_temperature_range(&ctx, ingredient_id, group_id, range)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete a group temperature range
pub async fn delete_temperature(
    service: Arc<Service>,
    ctx: AuthContext,
    Path((ingredient_id, group_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, Problem> {
    service
        .delete_temperature_range(&ctx, ingredient_id, group_id)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

/// List an ingredient's temperature phases
pub async fn list_phases(
    service: Arc<Service>,
    Path(ingredient_id): Path<Uuid>,
) -> Result<Json<PhasesListResponse>, Problem> {
    let items: Vec<TemperaturePhaseDto> = service
        .temperature_phases(ingredient_id)
        .await
        .map_err(map_domain_error)?
        .into_iter()
        .map(Into::into)
        .collect();
    let total = items.len();

    Ok(Json(PhasesListResponse { items, total }))
}

/// Insert or update a temperature phase
pub async fn upsert_phase(
    service: Arc<Service>,
    ctx: AuthContext,
    Path(ingredient_id): Path<Uuid>,
    Json(req): Json<UpsertPhaseRequest>,
) -> Result<Json<TemperaturePhaseDto>, Problem> {
    let phase = service
        .upsert_temperature_phase(
            &ctx,
            ingredient_id,
            req.id,
            &req.phase_name,
            req.temp_start_c,
            req.temp_end_c,
            req.description_de,
        )
        .await
        .map_err(map_domain_error)?;

    Ok(Json(phase.into()))
}

/// Delete a temperature phase
pub async fn delete_phase(
    service: Arc<Service>,
    ctx: AuthContext,
    Path(phase_id): Path<Uuid>,
) -> Result<StatusCode, Problem> {
    service
        .delete_temperature_phase(&ctx, phase_id)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

// ===== Match Handlers =====

/// List an ingredient's flavor matches with resolved targets
pub async fn list_matches(
    service: Arc<Service>,
    Path(ingredient_id): Path<Uuid>,
) -> Result<Json<MatchesListResponse>, Problem> {
    let items: Vec<FlavorMatchDto> = service
        .flavor_matches(ingredient_id)
        .await
        .map_err(map_domain_error)?
        .into_iter()
        .map(Into::into)
        .collect();
    let total = items.len();

    Ok(Json(MatchesListResponse { items, total }))
}

/// Create a directed flavor match
pub async fn create_match(
    service: Arc<Service>,
    ctx: AuthContext,
    Path(source_ingredient_id): Path<Uuid>,
    Json(req): Json<CreateMatchRequest>,
) -> Result<(StatusCode, Json<MatchRecordDto>), Problem> {
    let record = service
        .create_flavor_match(&ctx, source_ingredient_id, req.target_ingredient_id, req.note)
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(record.into())))
}

/// Delete a flavor match
pub async fn delete_match(
    service: Arc<Service>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, Problem> {
    service
        .delete_flavor_match(&ctx, id)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}
