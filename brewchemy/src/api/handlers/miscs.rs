//! Misc ingredient endpoints: `/api/misc`.

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
            miscs::{MiscCreate, MiscResponse, MiscUpdate},
        },
    },
    auth::current_user::CurrentUser,
    db::models::miscs::MiscDBResponse,
    errors::Result,
    types::MiscId,
};

/// List the caller's misc ingredients plus the official catalog
#[utoipa::path(
    get,
    path = "/api/misc",
    tag = "misc",
    summary = "List misc ingredients",
    responses(
        (status = 200, description = "Own and catalog misc ingredients", body = Vec<MiscResponse>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_misc(State(state): State<AppState>, current_user: CurrentUser) -> Result<Json<Vec<MiscResponse>>> {
    catalog::list::<MiscDBResponse>(&state, current_user).await
}

#[utoipa::path(
    get,
    path = "/api/misc/search",
    tag = "misc",
    summary = "Search misc ingredients by name",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching misc ingredients", body = Vec<MiscResponse>),
        (status = 400, description = "Missing search term"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn search_misc(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<MiscResponse>>> {
    catalog::search::<MiscDBResponse>(&state, current_user, query).await
}

#[utoipa::path(
    get,
    path = "/api/misc/{id}",
    tag = "misc",
    summary = "Get misc ingredient",
    params(("id" = i32, Path, description = "Misc ID")),
    responses(
        (status = 200, description = "Misc details", body = MiscResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Misc not found"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn get_misc(
    State(state): State<AppState>,
    Path(id): Path<MiscId>,
    current_user: CurrentUser,
) -> Result<Json<MiscResponse>> {
    catalog::get::<MiscDBResponse>(&state, current_user, id).await
}

#[utoipa::path(
    post,
    path = "/api/misc",
    tag = "misc",
    summary = "Create misc ingredient",
    request_body = MiscCreate,
    responses(
        (status = 201, description = "Misc created", body = MiscResponse),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_misc(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(body): Json<MiscCreate>,
) -> Result<(StatusCode, Json<MiscResponse>)> {
    catalog::create::<MiscDBResponse>(&state, current_user, body).await
}

/// Update an own misc ingredient, or personalize a catalog one
#[utoipa::path(
    put,
    path = "/api/misc/{id}",
    tag = "misc",
    summary = "Update misc ingredient",
    request_body = MiscUpdate,
    params(("id" = i32, Path, description = "Misc ID")),
    responses(
        (status = 200, description = "Updated misc ingredient, or the personalized copy of a catalog misc ingredient", body = MiscResponse),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Misc not found"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn update_misc(
    State(state): State<AppState>,
    Path(id): Path<MiscId>,
    current_user: CurrentUser,
    Json(body): Json<MiscUpdate>,
) -> Result<Json<MiscResponse>> {
    catalog::update::<MiscDBResponse>(&state, current_user, id, body).await
}

#[utoipa::path(
    delete,
    path = "/api/misc/{id}",
    tag = "misc",
    summary = "Delete misc ingredient",
    params(("id" = i32, Path, description = "Misc ID")),
    responses(
        (status = 200, description = "Misc deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Misc not found, or part of the official catalog"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn delete_misc(
    State(state): State<AppState>,
    Path(id): Path<MiscId>,
    current_user: CurrentUser,
) -> Result<Json<MessageResponse>> {
    catalog::delete::<MiscDBResponse>(&state, current_user, id).await
}

#[cfg(test)]
mod tests {
    use crate::{api::models::miscs::MiscResponse, test_utils::*};
    use axum::http::StatusCode;
    use serde_json::json;
    use sqlx::PgPool;

    #[sqlx::test]
    #[test_log::test]
    async fn test_misc_lifecycle(pool: PgPool) {
        let (app, state) = create_test_app(pool.clone()).await;
        let user = create_test_user(&pool).await;
        let (name, value) = add_auth_headers(&state.config, user.id);

        let response = app
            .post("/api/misc")
            .add_header(name.clone(), value.clone())
            .json(&json!({ "name": "Whirlfloc", "type": "Fining" }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let misc: MiscResponse = response.json();
        assert_eq!(misc.r#type.as_deref(), Some("Fining"));

        let updated: MiscResponse = app
            .put(&format!("/api/misc/{}", misc.id))
            .add_header(name.clone(), value.clone())
            .json(&json!({ "type": null, "description": "Half a tablet per 20 l" }))
            .await
            .json();
        assert_eq!(updated.r#type, None);
        assert_eq!(updated.description.as_deref(), Some("Half a tablet per 20 l"));

        let found: Vec<MiscResponse> = app
            .get("/api/misc/search")
            .add_query_param("searchTerm", "FLOC")
            .add_header(name.clone(), value.clone())
            .await
            .json();
        assert_eq!(found.len(), 1);

        let response = app.delete(&format!("/api/misc/{}", misc.id)).add_header(name, value).await;
        let body: serde_json::Value = response.json();
        assert_eq!(body["message"], format!("Misc with ID {} was successfully deleted", misc.id));
    }
}
