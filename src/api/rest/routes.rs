//! Route registration for the aroma REST API

use super::auth::AuthState;
use super::{dto::*, handlers};
use crate::contract::AuthContext;
use crate::domain::Service;
use axum::{
    routing::{delete, get, patch, post, put},
    Extension, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use uuid::Uuid;

/// OpenAPI document assembled from the DTO schemas
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Aroma Explorer API",
        description = "Flavor/aroma reference dataset service"
    ),
    components(schemas(
        IngredientRefDto,
        IngredientDto,
        CreateIngredientRequest,
        RenameIngredientRequest,
        UpdateTasteRequest,
        AromaGroupDto,
        MoleculeDto,
        MoleculeWithFlagsDto,
        AttachMoleculeRequest,
        UpdateMoleculeRequest,
        UpdateFlagsRequest,
        TemperatureRangeDto,
        UpsertTemperatureRequest,
        TemperaturePhaseDto,
        UpsertPhaseRequest,
        GroupProfileDto,
        GroupBarDto,
        BoundaryMarkDto,
        PhaseLabelDto,
        ProfileViewDto,
        ProfilePageResponse,
        FlavorMatchDto,
        MatchRecordDto,
        CreateMatchRequest,
        IngredientsListResponse,
        GroupsListResponse,
        MoleculesListResponse,
        PhasesListResponse,
        MatchesListResponse,
    ))
)]
struct ApiDoc;

async fn openapi_handler() -> axum::Json<utoipa::openapi::OpenApi> {
    axum::Json(ApiDoc::openapi())
}

/// Build the full application router
pub fn build_router(service: Arc<Service>, auth: Arc<AuthState>) -> Router {
    Router::new()
        // Ingredient endpoints
        .route("/ingredients", get(list_ingredients_handler))
        .route("/ingredients", post(create_ingredient_handler))
        .route("/ingredients/{id}", patch(rename_ingredient_handler))
        .route("/ingredients/{id}/profile", get(get_profile_handler))
        .route("/ingredients/{id}/taste", put(update_taste_handler))
        // Molecule attachment endpoints
        .route("/ingredients/{id}/molecules", post(attach_molecule_handler))
        .route(
            "/ingredients/{id}/molecules/{molecule_id}",
            patch(update_molecule_flags_handler),
        )
        .route(
            "/ingredients/{id}/molecules/{molecule_id}",
            delete(detach_molecule_handler),
        )
        .route("/molecules/{id}", patch(update_molecule_handler))
        // Temperature endpoints
        .route(
            "/ingredients/{id}/groups/{group_id}/temperature",
            put(upsert_temperature_handler),
        )
        .route(
            "/ingredients/{id}/groups/{group_id}/temperature",
            delete(delete_temperature_handler),
        )
        .route("/ingredients/{id}/phases", get(list_phases_handler))
        .route("/ingredients/{id}/phases", post(upsert_phase_handler))
        .route("/phases/{id}", delete(delete_phase_handler))
        // Match endpoints
        .route("/ingredients/{id}/matches", get(list_matches_handler))
        .route("/ingredients/{id}/matches", post(create_match_handler))
        .route("/matches/{id}", delete(delete_match_handler))
        // Group endpoints
        .route("/groups", get(list_groups_handler))
        .route("/groups/{id}/molecules", get(search_molecules_handler))
        // Machine-readable API description
        .route("/openapi.json", get(openapi_handler))
        // Shared state and request tracing
        .layer(Extension(service))
        .layer(Extension(auth))
        .layer(TraceLayer::new_for_http())
}

// ===== Handler wrappers that extract service from Extension =====

async fn list_ingredients_handler(
    Extension(service): Extension<Arc<Service>>,
) -> Result<axum::Json<IngredientsListResponse>, super::error::Problem> {
    handlers::list_ingredients(service).await
}

async fn create_ingredient_handler(
    Extension(service): Extension<Arc<Service>>,
    ctx: AuthContext,
    json: axum::Json<CreateIngredientRequest>,
) -> Result<(axum::http::StatusCode, axum::Json<IngredientDto>), super::error::Problem> {
    handlers::create_ingredient(service, ctx, json).await
}

async fn rename_ingredient_handler(
    Extension(service): Extension<Arc<Service>>,
    ctx: AuthContext,
    path: axum::extract::Path<Uuid>,
    json: axum::Json<RenameIngredientRequest>,
) -> Result<axum::http::StatusCode, super::error::Problem> {
    handlers::rename_ingredient(service, ctx, path, json).await
}

async fn get_profile_handler(
    Extension(service): Extension<Arc<Service>>,
    path: axum::extract::Path<Uuid>,
) -> Result<axum::Json<ProfilePageResponse>, super::error::Problem> {
    handlers::get_profile(service, path).await
}

async fn update_taste_handler(
    Extension(service): Extension<Arc<Service>>,
    ctx: AuthContext,
    path: axum::extract::Path<Uuid>,
    json: axum::Json<UpdateTasteRequest>,
) -> Result<axum::http::StatusCode, super::error::Problem> {
    handlers::update_taste(service, ctx, path, json).await
}

async fn list_groups_handler(
    Extension(service): Extension<Arc<Service>>,
) -> Result<axum::Json<GroupsListResponse>, super::error::Problem> {
    handlers::list_groups(service).await
}

async fn search_molecules_handler(
    Extension(service): Extension<Arc<Service>>,
    path: axum::extract::Path<Uuid>,
    query: axum::extract::Query<handlers::SearchMoleculesQuery>,
) -> Result<axum::Json<MoleculesListResponse>, super::error::Problem> {
    handlers::search_molecules(service, path, query).await
}

async fn attach_molecule_handler(
    Extension(service): Extension<Arc<Service>>,
    ctx: AuthContext,
    path: axum::extract::Path<Uuid>,
    json: axum::Json<AttachMoleculeRequest>,
) -> Result<(axum::http::StatusCode, axum::Json<MoleculeDto>), super::error::Problem> {
    handlers::attach_molecule(service, ctx, path, json).await
}

async fn update_molecule_flags_handler(
    Extension(service): Extension<Arc<Service>>,
    ctx: AuthContext,
    path: axum::extract::Path<(Uuid, Uuid)>,
    json: axum::Json<UpdateFlagsRequest>,
) -> Result<axum::http::StatusCode, super::error::Problem> {
    handlers::update_molecule_flags(service, ctx, path, json).await
}

async fn detach_molecule_handler(
    Extension(service): Extension<Arc<Service>>,
    ctx: AuthContext,
    path: axum::extract::Path<(Uuid, Uuid)>,
) -> Result<axum::http::StatusCode, super::error::Problem> {
    handlers::detach_molecule(service, ctx, path).await
}

async fn update_molecule_handler(
    Extension(service): Extension<Arc<Service>>,
    ctx: AuthContext,
    path: axum::extract::Path<Uuid>,
    json: axum::Json<UpdateMoleculeRequest>,
) -> Result<axum::http::StatusCode, super::error::Problem> {
    handlers::update_molecule(service, ctx, path, json).await
}

async fn upsert_temperature_handler(
    Extension(service): Extension<Arc<Service>>,
    ctx: AuthContext,
    path: axum::extract::Path<(Uuid, Uuid)>,
    json: axum::Json<UpsertTemperatureRequest>,
) -> Result<axum::http::StatusCode, super::error::Problem> {
    handlers::upsert_temperature(service, ctx, path, json).await
}

async fn delete_temperature_handler(
    Extension(service): Extension<Arc<Service>>,
    ctx: AuthContext,
    path: axum::extract::Path<(Uuid, Uuid)>,
) -> Result<axum::http::StatusCode, super::error::Problem> {
    handlers::delete_temperature(service, ctx, path).await
}

async fn list_phases_handler(
    Extension(service): Extension<Arc<Service>>,
    path: axum::extract::Path<Uuid>,
) -> Result<axum::Json<PhasesListResponse>, super::error::Problem> {
    handlers::list_phases(service, path).await
}

async fn upsert_phase_handler(
    Extension(service): Extension<Arc<Service>>,
    ctx: AuthContext,
    path: axum::extract::Path<Uuid>,
    json: axum::Json<UpsertPhaseRequest>,
) -> Result<axum::Json<TemperaturePhaseDto>, super::error::Problem> {
    handlers::upsert_phase(service, ctx, path, json).await
}

async fn delete_phase_handler(
    Extension(service): Extension<Arc<Service>>,
    ctx: AuthContext,
    path: axum::extract::Path<Uuid>,
) -> Result<axum::http::StatusCode, super::error::Problem> {
    handlers::delete_phase(service, ctx, path).await
}

async fn list_matches_handler(
    Extension(service): Extension<Arc<Service>>,
    path: axum::extract::Path<Uuid>,
) -> Result<axum::Json<MatchesListResponse>, super::error::Problem> {
    handlers::list_matches(service, path).await
}

async fn create_match_handler(
    Extension(service): Extension<Arc<Service>>,
    ctx: AuthContext,
    path: axum::extract::Path<Uuid>,
    json: axum::Json<CreateMatchRequest>,
) -> Result<(axum::http::StatusCode, axum::Json<MatchRecordDto>), super::error::Problem> {
    handlers::create_match(service, ctx, path, json).await
}

async fn delete_match_handler(
    Extension(service): Extension<Arc<Service>>,
    ctx: AuthContext,
    path: axum::extract::Path<Uuid>,
) -> Result<axum::http::StatusCode, super::error::Problem> {
    handlers::delete_match(service, ctx, path).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_carries_the_dto_schemas() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        for name in [
            "IngredientDto",
            "ProfilePageResponse",
            "FlavorMatchDto",
            "UpsertPhaseRequest",
        ] {
            assert!(components.schemas.contains_key(name), "missing schema {name}");
        }
    }
}
