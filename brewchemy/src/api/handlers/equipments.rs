//! Equipment profile endpoints: `/api/equipments`.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::{
    AppState,
    api::{
        handlers::catalog,
        models::{
            common::{MessageResponse, SearchQuery},
            equipments::{EquipmentCreate, EquipmentResponse, EquipmentUpdate},
        },
    },
    auth::current_user::CurrentUser,
    db::models::equipments::EquipmentDBResponse,
    errors::Result,
    types::EquipmentId,
};

/// List the caller's equipment profiles plus the official catalog
#[utoipa::path(
    get,
    path = "/api/equipments",
    tag = "equipments",
    summary = "List equipment profiles",
    responses(
        (status = 200, description = "Own and catalog equipment profiles", body = Vec<EquipmentResponse>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_equipments(State(state): State<AppState>, current_user: CurrentUser) -> Result<Json<Vec<EquipmentResponse>>> {
    catalog::list::<EquipmentDBResponse>(&state, current_user).await
}

#[utoipa::path(
    get,
    path = "/api/equipments/search",
    tag = "equipments",
    summary = "Search equipment profiles by name",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching equipment profiles", body = Vec<EquipmentResponse>),
        (status = 400, description = "Missing search term"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn search_equipments(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<EquipmentResponse>>> {
    catalog::search::<EquipmentDBResponse>(&state, current_user, query).await
}

#[utoipa::path(
    get,
    path = "/api/equipments/{id}",
    tag = "equipments",
    summary = "Get equipment profile",
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment details", body = EquipmentResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Equipment not found"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn get_equipment(
    State(state): State<AppState>,
    Path(id): Path<EquipmentId>,
    current_user: CurrentUser,
) -> Result<Json<EquipmentResponse>> {
    catalog::get::<EquipmentDBResponse>(&state, current_user, id).await
}

#[utoipa::path(
    post,
    path = "/api/equipments",
    tag = "equipments",
    summary = "Create equipment profile",
    request_body = EquipmentCreate,
    responses(
        (status = 201, description = "Equipment created", body = EquipmentResponse),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_equipment(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(body): Json<EquipmentCreate>,
) -> Result<(StatusCode, Json<EquipmentResponse>)> {
    catalog::create::<EquipmentDBResponse>(&state, current_user, body).await
}

/// Update an own equipment profile, or personalize a catalog one
#[utoipa::path(
    put,
    path = "/api/equipments/{id}",
    tag = "equipments",
    summary = "Update equipment profile",
    request_body = EquipmentUpdate,
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Updated equipment profile, or the personalized copy of a catalog equipment profile", body = EquipmentResponse),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Equipment not found"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn update_equipment(
    State(state): State<AppState>,
    Path(id): Path<EquipmentId>,
    current_user: CurrentUser,
    Json(body): Json<EquipmentUpdate>,
) -> Result<Json<EquipmentResponse>> {
    catalog::update::<EquipmentDBResponse>(&state, current_user, id, body).await
}

#[utoipa::path(
    delete,
    path = "/api/equipments/{id}",
    tag = "equipments",
    summary = "Delete equipment profile",
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Equipment not found, or part of the official catalog"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn delete_equipment(
    State(state): State<AppState>,
    Path(id): Path<EquipmentId>,
    current_user: CurrentUser,
) -> Result<Json<MessageResponse>> {
    catalog::delete::<EquipmentDBResponse>(&state, current_user, id).await
}
