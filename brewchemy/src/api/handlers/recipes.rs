//! Recipe endpoints: `/api/recipes`.
//!
//! Recipes are private to their owner. Every route answers 404 for a recipe the caller doesn't own,
//! the same as for one that doesn't exist.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use sqlx::PgConnection;
use tracing::info;

use crate::{
    AppState,
    api::models::{
        common::{MessageResponse, SearchQuery},
        recipes::{RecipeCopyRequest, RecipeCreate, RecipeResponse, RecipeUpdate},
    },
    auth::current_user::CurrentUser,
    db::{
        errors::DbError,
        handlers::{RecipeFilter, Recipes, Repository, Users},
        models::recipes::RecipeDBResponse,
    },
    errors::{Error, Result},
    types::RecipeId,
};

const COPY_SUFFIX: &str = " (Copy)";

/// Load a recipe only if `user` owns it.
async fn owned_recipe(conn: &mut PgConnection, id: RecipeId, user: CurrentUser) -> Result<RecipeDBResponse> {
    Recipes::new(conn)
        .get_by_id(id)
        .await?
        .filter(|recipe| recipe.user_id == user.id)
        .ok_or_else(|| Error::not_found("Recipe"))
}

/// List the caller's recipes
#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = "recipes",
    summary = "List recipes",
    responses(
        (status = 200, description = "The caller's recipes, newest first", body = [RecipeResponse]),
        (status = 401, description = "Unauthorized"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_recipes(State(state): State<AppState>, current_user: CurrentUser) -> Result<Json<Vec<RecipeResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let recipes = Recipes::new(&mut conn).list(&RecipeFilter::new(current_user.id)).await?;

    Ok(Json(recipes.into_iter().map(RecipeResponse::from).collect()))
}

/// Search the caller's recipes by name
#[utoipa::path(
    get,
    path = "/api/recipes/search",
    tag = "recipes",
    summary = "Search recipes",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching recipes", body = [RecipeResponse]),
        (status = 400, description = "Missing search term"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn search_recipes(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<RecipeResponse>>> {
    let term = query.term()?;
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let recipes = Recipes::new(&mut conn)
        .list(&RecipeFilter::new(current_user.id).with_search(term))
        .await?;

    Ok(Json(recipes.into_iter().map(RecipeResponse::from).collect()))
}

/// Get a recipe with all of its ingredients
#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    tag = "recipes",
    summary = "Get recipe",
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "Recipe", body = RecipeResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Recipe not found"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn get_recipe(State(state): State<AppState>, Path(id): Path<RecipeId>, current_user: CurrentUser) -> Result<Json<RecipeResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let recipe = owned_recipe(&mut conn, id, current_user).await?;

    Ok(Json(RecipeResponse::from(recipe)))
}

/// Create a recipe together with its ingredients
#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = "recipes",
    summary = "Create recipe",
    request_body = RecipeCreate,
    responses(
        (status = 201, description = "Created recipe", body = RecipeResponse),
        (status = 400, description = "Invalid recipe or ingredient"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_recipe(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(body): Json<RecipeCreate>,
) -> Result<(StatusCode, Json<RecipeResponse>)> {
    let request = body.into_db_request(current_user.id)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let recipe = Recipes::new(&mut conn).create(&request).await?;
    info!(recipe_id = recipe.id, user_id = current_user.id, "Created recipe");

    Ok((StatusCode::CREATED, Json(RecipeResponse::from(recipe))))
}

/// Update a recipe
///
/// Parent fields are patched. Each ingredient list replaces the stored one: rows with a known `id`
/// are merged, the rest are inserted, and stored rows missing from the list are removed. An omitted
/// list removes every row. `recipeEquipment` overwrites the stored equipment.
#[utoipa::path(
    put,
    path = "/api/recipes/{id}",
    tag = "recipes",
    summary = "Update recipe",
    request_body = RecipeUpdate,
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "Updated recipe", body = RecipeResponse),
        (status = 400, description = "Invalid recipe or ingredient"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Recipe not found"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn update_recipe(
    State(state): State<AppState>,
    Path(id): Path<RecipeId>,
    current_user: CurrentUser,
    Json(body): Json<RecipeUpdate>,
) -> Result<Json<RecipeResponse>> {
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    owned_recipe(&mut tx, id, current_user).await?;
    let request = body.into_db_request()?;

    let recipe = match Recipes::new(&mut tx).update(id, &request).await {
        Ok(recipe) => recipe,
        Err(DbError::NotFound) => return Err(Error::not_found("Recipe")),
        Err(e) => return Err(e.into()),
    };
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok(Json(RecipeResponse::from(recipe)))
}

/// Delete a recipe and its ingredients
#[utoipa::path(
    delete,
    path = "/api/recipes/{id}",
    tag = "recipes",
    summary = "Delete recipe",
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "Recipe deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Recipe not found"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn delete_recipe(State(state): State<AppState>, Path(id): Path<RecipeId>, current_user: CurrentUser) -> Result<Json<MessageResponse>> {
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    owned_recipe(&mut tx, id, current_user).await?;
    if !Recipes::new(&mut tx).delete(id).await? {
        return Err(Error::not_found("Recipe"));
    }
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok(Json(MessageResponse::new("Recipe deleted")))
}

/// Copy a recipe into an account
///
/// The copy's name gets a ` (Copy)` suffix. Without a body, or without `targetUserId`, the copy
/// lands in the caller's own account.
#[utoipa::path(
    post,
    path = "/api/recipes/{id}/copy",
    tag = "recipes",
    summary = "Copy recipe",
    request_body(content = Option<RecipeCopyRequest>),
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 201, description = "The new recipe", body = RecipeResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Recipe or target user not found"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn copy_recipe(
    State(state): State<AppState>,
    Path(id): Path<RecipeId>,
    current_user: CurrentUser,
    body: Option<Json<RecipeCopyRequest>>,
) -> Result<(StatusCode, Json<RecipeResponse>)> {
    let target_user_id = body.and_then(|Json(body)| body.target_user_id).unwrap_or(current_user.id);

    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    owned_recipe(&mut tx, id, current_user).await?;
    if target_user_id != current_user.id && Users::new(&mut tx).get_by_id(target_user_id).await?.is_none() {
        return Err(Error::not_found("User"));
    }

    let copy = match Recipes::new(&mut tx).copy(id, target_user_id, COPY_SUFFIX).await {
        Ok(copy) => copy,
        Err(DbError::NotFound) => return Err(Error::not_found("Recipe")),
        Err(e) => return Err(e.into()),
    };
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;
    info!(source_id = id, recipe_id = copy.id, target_user_id, "Copied recipe");

    Ok((StatusCode::CREATED, Json(RecipeResponse::from(copy))))
}

#[cfg(test)]
mod tests {
    use crate::{api::models::recipes::RecipeResponse, test_utils::*};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rust_decimal::Decimal;
    use serde_json::json;
    use sqlx::PgPool;

    fn stout() -> serde_json::Value {
        json!({
            "name": "Dry Stout",
            "style": "Irish Stout",
            "type": "All Grain",
            "recipeEquipment": {
                "name": "Kettle",
                "efficiency": 72,
                "batchVolume": 20,
                "boilTime": 60,
                "boilTemperature": 100
            },
            "recipeFermentables": [
                { "name": "Maris Otter", "ebc": 6, "potentialExtract": 1.037, "type": "Grain", "quantity": 3.5 },
                { "name": "Roasted Barley", "ebc": 1100, "potentialExtract": 1.025, "type": "Grain", "quantity": 0.4 }
            ],
            "recipeHops": [
                { "name": "East Kent Goldings", "alphaAcidContent": 5.5, "quantity": 40, "boilTime": 60, "usageStage": "Boil" }
            ],
            "recipeMisc": [
                { "name": "Irish Moss", "quantity": 5, "use": "Boil", "time": 15 }
            ],
            "recipeYeasts": [
                { "name": "Irish Ale", "manufacturer": "Wyeast", "quantity": 1 }
            ]
        })
    }

    async fn create_stout(app: &TestServer, auth: (axum::http::HeaderName, axum::http::HeaderValue)) -> RecipeResponse {
        let response = app.post("/api/recipes").add_header(auth.0, auth.1).json(&stout()).await;
        response.assert_status(StatusCode::CREATED);
        response.json()
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_and_get_recipe(pool: PgPool) {
        let (app, state) = create_test_app(pool.clone()).await;
        let user = create_test_user(&pool).await;
        let (name, value) = add_auth_headers(&state.config, user.id);

        let created = create_stout(&app, (name.clone(), value.clone())).await;
        assert_eq!(created.user_id, user.id);
        assert_eq!(created.author, "");
        assert_eq!(created.recipe_fermentables.len(), 2);
        assert_eq!(created.recipe_hops[0].boil_time, Some(60));
        assert_eq!(created.recipe_equipment.as_ref().unwrap().efficiency, Decimal::from(72));

        let fetched: RecipeResponse = app
            .get(&format!("/api/recipes/{}", created.id))
            .add_header(name, value)
            .await
            .json();
        assert_eq!(fetched.name, "Dry Stout");
        assert_eq!(fetched.recipe_misc[0].r#use.as_deref(), Some("Boil"));
        assert_eq!(fetched.recipe_yeasts.len(), 1);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_validates_children(pool: PgPool) {
        let (app, state) = create_test_app(pool.clone()).await;
        let user = create_test_user(&pool).await;
        let (name, value) = add_auth_headers(&state.config, user.id);

        let mut body = stout();
        body["recipeHops"][0].as_object_mut().unwrap().remove("quantity");
        let response = app.post("/api/recipes").add_header(name.clone(), value.clone()).json(&body).await;
        response.assert_status_bad_request();
        let error: serde_json::Value = response.json();
        assert_eq!(error["message"], "recipeHops.quantity is required");

        // Nothing was written
        let recipes: Vec<RecipeResponse> = app.get("/api/recipes").add_header(name, value).await.json();
        assert!(recipes.is_empty());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_recipes_are_private(pool: PgPool) {
        let (app, state) = create_test_app(pool.clone()).await;
        let owner = create_test_user(&pool).await;
        let other = create_test_user(&pool).await;
        let created = create_stout(&app, add_auth_headers(&state.config, owner.id)).await;
        let (name, value) = add_auth_headers(&state.config, other.id);

        let response = app.get(&format!("/api/recipes/{}", created.id)).add_header(name.clone(), value.clone()).await;
        response.assert_status_not_found();
        let error: serde_json::Value = response.json();
        assert_eq!(error["message"], "Recipe not found");

        app.put(&format!("/api/recipes/{}", created.id))
            .add_header(name.clone(), value.clone())
            .json(&json!({ "name": "Mine now" }))
            .await
            .assert_status_not_found();
        app.delete(&format!("/api/recipes/{}", created.id))
            .add_header(name.clone(), value.clone())
            .await
            .assert_status_not_found();
        app.post(&format!("/api/recipes/{}/copy", created.id))
            .add_header(name.clone(), value.clone())
            .await
            .assert_status_not_found();

        let listed: Vec<RecipeResponse> = app.get("/api/recipes").add_header(name, value).await.json();
        assert!(listed.is_empty());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_update_reconciles_collections(pool: PgPool) {
        let (app, state) = create_test_app(pool.clone()).await;
        let user = create_test_user(&pool).await;
        let (name, value) = add_auth_headers(&state.config, user.id);
        let created = create_stout(&app, (name.clone(), value.clone())).await;

        let base_malt = &created.recipe_fermentables[0];
        let response = app
            .put(&format!("/api/recipes/{}", created.id))
            .add_header(name.clone(), value.clone())
            .json(&json!({
                "notes": "Mash at 66C",
                "recipeEquipment": { "name": "Kettle", "efficiency": 75, "batchVolume": 20, "boilTime": 60, "boilTemperature": 100 },
                "recipeFermentables": [
                    { "id": base_malt.id, "quantity": 3.8 },
                    { "name": "Flaked Barley", "ebc": 3, "potentialExtract": 1.032, "type": "Adjunct", "quantity": 0.5 }
                ],
                "recipeHops": []
            }))
            .await;
        response.assert_status_ok();
        let updated: RecipeResponse = response.json();

        assert_eq!(updated.notes.as_deref(), Some("Mash at 66C"));
        assert_eq!(updated.style.as_deref(), Some("Irish Stout"));

        let equipment = updated.recipe_equipment.unwrap();
        assert_eq!(equipment.id, created.recipe_equipment.unwrap().id);
        assert_eq!(equipment.efficiency, Decimal::from(75));
        assert_eq!(equipment.boil_time, 60);

        let names: Vec<&str> = updated.recipe_fermentables.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Maris Otter", "Flaked Barley"]);
        let merged = &updated.recipe_fermentables[0];
        assert_eq!(merged.id, base_malt.id);
        assert_eq!(merged.quantity, Decimal::new(38, 1));
        assert_eq!(merged.ebc, base_malt.ebc);

        assert!(updated.recipe_hops.is_empty());
        // Omitted collections count as empty
        assert!(updated.recipe_misc.is_empty());
        assert!(updated.recipe_yeasts.is_empty());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_update_without_collections_clears_ingredients(pool: PgPool) {
        let (app, state) = create_test_app(pool.clone()).await;
        let user = create_test_user(&pool).await;
        let (name, value) = add_auth_headers(&state.config, user.id);
        let created = create_stout(&app, (name.clone(), value.clone())).await;

        let response = app
            .put(&format!("/api/recipes/{}", created.id))
            .add_header(name, value)
            .json(&json!({ "name": "Plain Stout" }))
            .await;
        response.assert_status_ok();
        let updated: RecipeResponse = response.json();

        assert_eq!(updated.name, "Plain Stout");
        assert!(updated.recipe_fermentables.is_empty());
        assert!(updated.recipe_hops.is_empty());
        assert!(updated.recipe_misc.is_empty());
        assert!(updated.recipe_yeasts.is_empty());
        // Equipment is only written when sent
        assert_eq!(updated.recipe_equipment.unwrap().name, "Kettle");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_update_equipment_replaces_every_field(pool: PgPool) {
        let (app, state) = create_test_app(pool.clone()).await;
        let user = create_test_user(&pool).await;
        let (name, value) = add_auth_headers(&state.config, user.id);

        let mut body = stout();
        body["recipeEquipment"]["description"] = json!("Old kettle");
        body["recipeEquipment"]["deadSpace"] = json!(1.5);
        let created: RecipeResponse = app.post("/api/recipes").add_header(name.clone(), value.clone()).json(&body).await.json();
        let original = created.recipe_equipment.unwrap();

        let response = app
            .put(&format!("/api/recipes/{}", created.id))
            .add_header(name.clone(), value.clone())
            .json(&json!({
                "recipeEquipment": {
                    "name": "New Kettle",
                    "description": null,
                    "efficiency": 80,
                    "batchVolume": 23,
                    "boilTime": 75,
                    "boilTemperature": 99
                }
            }))
            .await;
        response.assert_status_ok();
        let equipment = response.json::<RecipeResponse>().recipe_equipment.unwrap();

        assert_eq!(equipment.id, original.id);
        assert_eq!(equipment.name, "New Kettle");
        assert_eq!(equipment.boil_time, 75);
        assert_eq!(equipment.description, None);
        assert_eq!(equipment.dead_space, None);

        // A partial object can't stand in for the whole row
        app.put(&format!("/api/recipes/{}", created.id))
            .add_header(name, value)
            .json(&json!({ "recipeEquipment": { "boilTime": 90 } }))
            .await
            .assert_status_bad_request();
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_update_rejects_repeated_child_id(pool: PgPool) {
        let (app, state) = create_test_app(pool.clone()).await;
        let user = create_test_user(&pool).await;
        let (name, value) = add_auth_headers(&state.config, user.id);
        let created = create_stout(&app, (name.clone(), value.clone())).await;
        let hop_id = created.recipe_hops[0].id;

        let response = app
            .put(&format!("/api/recipes/{}", created.id))
            .add_header(name.clone(), value.clone())
            .json(&json!({
                "recipeHops": [{ "id": hop_id, "quantity": 20 }, { "id": hop_id, "quantity": 30 }]
            }))
            .await;
        response.assert_status_bad_request();
        let error: serde_json::Value = response.json();
        assert_eq!(error["message"], format!("recipeHops lists id {hop_id} more than once"));

        // Nothing was written
        let fetched: RecipeResponse = app.get(&format!("/api/recipes/{}", created.id)).add_header(name, value).await.json();
        assert_eq!(fetched.recipe_hops.len(), 1);
        assert_eq!(fetched.recipe_fermentables.len(), 2);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_update_inserts_equipment_when_missing(pool: PgPool) {
        let (app, state) = create_test_app(pool.clone()).await;
        let user = create_test_user(&pool).await;
        let (name, value) = add_auth_headers(&state.config, user.id);

        let created: RecipeResponse = app
            .post("/api/recipes")
            .add_header(name.clone(), value.clone())
            .json(&json!({ "name": "SMaSH", "type": "Extract" }))
            .await
            .json();
        assert!(created.recipe_equipment.is_none());

        // A partial object can't create a row
        let response = app
            .put(&format!("/api/recipes/{}", created.id))
            .add_header(name.clone(), value.clone())
            .json(&json!({ "recipeEquipment": { "efficiency": 75 } }))
            .await;
        response.assert_status_bad_request();

        let updated: RecipeResponse = app
            .put(&format!("/api/recipes/{}", created.id))
            .add_header(name, value)
            .json(&json!({
                "recipeEquipment": { "name": "Pot", "efficiency": 60, "batchVolume": 10, "boilTime": 45, "boilTemperature": 99 }
            }))
            .await
            .json();
        assert_eq!(updated.recipe_equipment.unwrap().name, "Pot");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_search_and_list(pool: PgPool) {
        let (app, state) = create_test_app(pool.clone()).await;
        let user = create_test_user(&pool).await;
        let (name, value) = add_auth_headers(&state.config, user.id);
        create_stout(&app, (name.clone(), value.clone())).await;
        app.post("/api/recipes")
            .add_header(name.clone(), value.clone())
            .json(&json!({ "name": "West Coast IPA", "type": "All Grain" }))
            .await
            .assert_status(StatusCode::CREATED);

        let listed: Vec<RecipeResponse> = app.get("/api/recipes").add_header(name.clone(), value.clone()).await.json();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].name, "West Coast IPA");

        let found: Vec<RecipeResponse> = app
            .get("/api/recipes/search")
            .add_query_param("searchTerm", "STOUT")
            .add_header(name.clone(), value.clone())
            .await
            .json();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Dry Stout");

        app.get("/api/recipes/search")
            .add_query_param("searchTerm", "  ")
            .add_header(name, value)
            .await
            .assert_status_bad_request();
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_delete_recipe(pool: PgPool) {
        let (app, state) = create_test_app(pool.clone()).await;
        let user = create_test_user(&pool).await;
        let (name, value) = add_auth_headers(&state.config, user.id);
        let created = create_stout(&app, (name.clone(), value.clone())).await;

        let response = app.delete(&format!("/api/recipes/{}", created.id)).add_header(name.clone(), value.clone()).await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["message"], "Recipe deleted");

        app.get(&format!("/api/recipes/{}", created.id))
            .add_header(name, value)
            .await
            .assert_status_not_found();
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_copy_recipe(pool: PgPool) {
        let (app, state) = create_test_app(pool.clone()).await;
        let user = create_test_user(&pool).await;
        let friend = create_test_user(&pool).await;
        let (name, value) = add_auth_headers(&state.config, user.id);
        let created = create_stout(&app, (name.clone(), value.clone())).await;

        let response = app.post(&format!("/api/recipes/{}/copy", created.id)).add_header(name.clone(), value.clone()).await;
        response.assert_status(StatusCode::CREATED);
        let own_copy: RecipeResponse = response.json();
        assert_eq!(own_copy.name, "Dry Stout (Copy)");
        assert_eq!(own_copy.user_id, user.id);
        assert_ne!(own_copy.id, created.id);
        assert_eq!(own_copy.recipe_fermentables.len(), 2);
        assert_ne!(own_copy.recipe_fermentables[0].id, created.recipe_fermentables[0].id);

        let response = app
            .post(&format!("/api/recipes/{}/copy", created.id))
            .add_header(name.clone(), value.clone())
            .json(&json!({ "targetUserId": friend.id }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let gift: RecipeResponse = response.json();
        assert_eq!(gift.user_id, friend.id);

        let (friend_name, friend_value) = add_auth_headers(&state.config, friend.id);
        let theirs: Vec<RecipeResponse> = app.get("/api/recipes").add_header(friend_name, friend_value).await.json();
        assert_eq!(theirs.len(), 1);
        assert_eq!(theirs[0].recipe_hops.len(), 1);

        let response = app
            .post(&format!("/api/recipes/{}/copy", created.id))
            .add_header(name, value)
            .json(&json!({ "targetUserId": 999_999 }))
            .await;
        response.assert_status_not_found();
        let error: serde_json::Value = response.json();
        assert_eq!(error["message"], "User not found");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_recipes_require_auth(pool: PgPool) {
        let (app, _state) = create_test_app(pool).await;
        app.get("/api/recipes").await.assert_status_unauthorized();
        app.post("/api/recipes").json(&stout()).await.assert_status_unauthorized();
    }
}
