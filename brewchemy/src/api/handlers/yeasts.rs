//! Yeast endpoints: `/api/yeasts`.

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
            yeasts::{YeastCreate, YeastResponse, YeastUpdate},
        },
    },
    auth::current_user::CurrentUser,
    db::models::yeasts::YeastDBResponse,
    errors::Result,
    types::YeastId,
};

/// List the caller's yeasts plus the official catalog
#[utoipa::path(
    get,
    path = "/api/yeasts",
    tag = "yeasts",
    summary = "List yeasts",
    responses(
        (status = 200, description = "Own and catalog yeasts", body = Vec<YeastResponse>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_yeasts(State(state): State<AppState>, current_user: CurrentUser) -> Result<Json<Vec<YeastResponse>>> {
    catalog::list::<YeastDBResponse>(&state, current_user).await
}

#[utoipa::path(
    get,
    path = "/api/yeasts/search",
    tag = "yeasts",
    summary = "Search yeasts by name",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching yeasts", body = Vec<YeastResponse>),
        (status = 400, description = "Missing search term"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn search_yeasts(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<YeastResponse>>> {
    catalog::search::<YeastDBResponse>(&state, current_user, query).await
}

#[utoipa::path(
    get,
    path = "/api/yeasts/{id}",
    tag = "yeasts",
    summary = "Get yeast",
    params(("id" = i32, Path, description = "Yeast ID")),
    responses(
        (status = 200, description = "Yeast details", body = YeastResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Yeast not found"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn get_yeast(
    State(state): State<AppState>,
    Path(id): Path<YeastId>,
    current_user: CurrentUser,
) -> Result<Json<YeastResponse>> {
    catalog::get::<YeastDBResponse>(&state, current_user, id).await
}

#[utoipa::path(
    post,
    path = "/api/yeasts",
    tag = "yeasts",
    summary = "Create yeast",
    request_body = YeastCreate,
    responses(
        (status = 201, description = "Yeast created", body = YeastResponse),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_yeast(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(body): Json<YeastCreate>,
) -> Result<(StatusCode, Json<YeastResponse>)> {
    catalog::create::<YeastDBResponse>(&state, current_user, body).await
}

/// Update an own yeast, or personalize a catalog one
#[utoipa::path(
    put,
    path = "/api/yeasts/{id}",
    tag = "yeasts",
    summary = "Update yeast",
    request_body = YeastUpdate,
    params(("id" = i32, Path, description = "Yeast ID")),
    responses(
        (status = 200, description = "Updated yeast, or the personalized copy of a catalog yeast", body = YeastResponse),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Yeast not found"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn update_yeast(
    State(state): State<AppState>,
    Path(id): Path<YeastId>,
    current_user: CurrentUser,
    Json(body): Json<YeastUpdate>,
) -> Result<Json<YeastResponse>> {
    catalog::update::<YeastDBResponse>(&state, current_user, id, body).await
}

#[utoipa::path(
    delete,
    path = "/api/yeasts/{id}",
    tag = "yeasts",
    summary = "Delete yeast",
    params(("id" = i32, Path, description = "Yeast ID")),
    responses(
        (status = 200, description = "Yeast deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Yeast not found, or part of the official catalog"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn delete_yeast(
    State(state): State<AppState>,
    Path(id): Path<YeastId>,
    current_user: CurrentUser,
) -> Result<Json<MessageResponse>> {
    catalog::delete::<YeastDBResponse>(&state, current_user, id).await
}
