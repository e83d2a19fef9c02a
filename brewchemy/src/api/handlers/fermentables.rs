//! Fermentable endpoints: `/api/fermentables`.

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
            fermentables::{FermentableCreate, FermentableResponse, FermentableUpdate},
        },
    },
    auth::current_user::CurrentUser,
    db::models::fermentables::FermentableDBResponse,
    errors::Result,
    types::FermentableId,
};

/// List the caller's fermentables plus the official catalog
#[utoipa::path(
    get,
    path = "/api/fermentables",
    tag = "fermentables",
    summary = "List fermentables",
    responses(
        (status = 200, description = "Own and catalog fermentables", body = Vec<FermentableResponse>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_fermentables(State(state): State<AppState>, current_user: CurrentUser) -> Result<Json<Vec<FermentableResponse>>> {
    catalog::list::<FermentableDBResponse>(&state, current_user).await
}

#[utoipa::path(
    get,
    path = "/api/fermentables/search",
    tag = "fermentables",
    summary = "Search fermentables by name",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching fermentables", body = Vec<FermentableResponse>),
        (status = 400, description = "Missing search term"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn search_fermentables(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<FermentableResponse>>> {
    catalog::search::<FermentableDBResponse>(&state, current_user, query).await
}

#[utoipa::path(
    get,
    path = "/api/fermentables/{id}",
    tag = "fermentables",
    summary = "Get fermentable",
    params(("id" = i32, Path, description = "Fermentable ID")),
    responses(
        (status = 200, description = "Fermentable details", body = FermentableResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Fermentable not found"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn get_fermentable(
    State(state): State<AppState>,
    Path(id): Path<FermentableId>,
    current_user: CurrentUser,
) -> Result<Json<FermentableResponse>> {
    catalog::get::<FermentableDBResponse>(&state, current_user, id).await
}

#[utoipa::path(
    post,
    path = "/api/fermentables",
    tag = "fermentables",
    summary = "Create fermentable",
    request_body = FermentableCreate,
    responses(
        (status = 201, description = "Fermentable created", body = FermentableResponse),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_fermentable(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(body): Json<FermentableCreate>,
) -> Result<(StatusCode, Json<FermentableResponse>)> {
    catalog::create::<FermentableDBResponse>(&state, current_user, body).await
}

/// Update an own fermentable, or personalize a catalog one
#[utoipa::path(
    put,
    path = "/api/fermentables/{id}",
    tag = "fermentables",
    summary = "Update fermentable",
    request_body = FermentableUpdate,
    params(("id" = i32, Path, description = "Fermentable ID")),
    responses(
        (status = 200, description = "Updated fermentable, or the personalized copy of a catalog fermentable", body = FermentableResponse),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Fermentable not found"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn update_fermentable(
    State(state): State<AppState>,
    Path(id): Path<FermentableId>,
    current_user: CurrentUser,
    Json(body): Json<FermentableUpdate>,
) -> Result<Json<FermentableResponse>> {
    catalog::update::<FermentableDBResponse>(&state, current_user, id, body).await
}

#[utoipa::path(
    delete,
    path = "/api/fermentables/{id}",
    tag = "fermentables",
    summary = "Delete fermentable",
    params(("id" = i32, Path, description = "Fermentable ID")),
    responses(
        (status = 200, description = "Fermentable deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Fermentable not found, or part of the official catalog"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn delete_fermentable(
    State(state): State<AppState>,
    Path(id): Path<FermentableId>,
    current_user: CurrentUser,
) -> Result<Json<MessageResponse>> {
    catalog::delete::<FermentableDBResponse>(&state, current_user, id).await
}
