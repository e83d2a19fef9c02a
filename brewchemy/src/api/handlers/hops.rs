//! Hop endpoints: `/api/hops`.

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
            hops::{HopCreate, HopResponse, HopUpdate},
        },
    },
    auth::current_user::CurrentUser,
    db::models::hops::HopDBResponse,
    errors::Result,
    types::HopId,
};

/// List the caller's hops plus the official catalog
#[utoipa::path(
    get,
    path = "/api/hops",
    tag = "hops",
    summary = "List hops",
    responses(
        (status = 200, description = "Own and catalog hops", body = Vec<HopResponse>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_hops(State(state): State<AppState>, current_user: CurrentUser) -> Result<Json<Vec<HopResponse>>> {
    catalog::list::<HopDBResponse>(&state, current_user).await
}

#[utoipa::path(
    get,
    path = "/api/hops/search",
    tag = "hops",
    summary = "Search hops by name",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching hops", body = Vec<HopResponse>),
        (status = 400, description = "Missing search term"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn search_hops(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<HopResponse>>> {
    catalog::search::<HopDBResponse>(&state, current_user, query).await
}

#[utoipa::path(
    get,
    path = "/api/hops/{id}",
    tag = "hops",
    summary = "Get hop",
    params(("id" = i32, Path, description = "Hop ID")),
    responses(
        (status = 200, description = "Hop details", body = HopResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Hop not found"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn get_hop(
    State(state): State<AppState>,
    Path(id): Path<HopId>,
    current_user: CurrentUser,
) -> Result<Json<HopResponse>> {
    catalog::get::<HopDBResponse>(&state, current_user, id).await
}

#[utoipa::path(
    post,
    path = "/api/hops",
    tag = "hops",
    summary = "Create hop",
    request_body = HopCreate,
    responses(
        (status = 201, description = "Hop created", body = HopResponse),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_hop(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(body): Json<HopCreate>,
) -> Result<(StatusCode, Json<HopResponse>)> {
    catalog::create::<HopDBResponse>(&state, current_user, body).await
}

/// Update an own hop, or personalize a catalog one
#[utoipa::path(
    put,
    path = "/api/hops/{id}",
    tag = "hops",
    summary = "Update hop",
    request_body = HopUpdate,
    params(("id" = i32, Path, description = "Hop ID")),
    responses(
        (status = 200, description = "Updated hop, or the personalized copy of a catalog hop", body = HopResponse),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Hop not found"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn update_hop(
    State(state): State<AppState>,
    Path(id): Path<HopId>,
    current_user: CurrentUser,
    Json(body): Json<HopUpdate>,
) -> Result<Json<HopResponse>> {
    catalog::update::<HopDBResponse>(&state, current_user, id, body).await
}

#[utoipa::path(
    delete,
    path = "/api/hops/{id}",
    tag = "hops",
    summary = "Delete hop",
    params(("id" = i32, Path, description = "Hop ID")),
    responses(
        (status = 200, description = "Hop deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Hop not found, or part of the official catalog"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn delete_hop(
    State(state): State<AppState>,
    Path(id): Path<HopId>,
    current_user: CurrentUser,
) -> Result<Json<MessageResponse>> {
    catalog::delete::<HopDBResponse>(&state, current_user, id).await
}
