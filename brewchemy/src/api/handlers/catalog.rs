//! Shared handler logic for the inventory resources.
//!
//! Each inventory resource (equipments, fermentables, hops, misc, yeasts) exposes the same six
//! routes. The per-resource modules hold the annotated axum handlers and delegate here; this module
//! owns the official/personal rules as seen over HTTP.

use axum::{Json, http::StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, info};

use crate::{
    AppState,
    api::models::common::{MessageResponse, SearchQuery},
    auth::current_user::CurrentUser,
    db::handlers::{Catalog, CatalogFilter, CatalogItem, DeleteOutcome, Repository, UpdateOutcome},
    errors::{Error, Result},
    types::UserId,
};

/// Binds a catalog row type to its wire models.
pub trait CatalogResource: CatalogItem {
    type Create: DeserializeOwned + Send;
    type Update: DeserializeOwned + Send;
    type Response: Serialize + From<Self> + Send;

    /// Validate a create body and attach the owner. The owner always comes from the token.
    fn create_request(body: Self::Create, user_id: UserId) -> Result<Self::CreateRequest>;

    fn update_request(body: Self::Update) -> Result<Self::UpdateRequest>;
}

fn filter(state: &AppState, user: CurrentUser) -> CatalogFilter {
    CatalogFilter::new(user.id, state.official_user_id, state.config.inventory.page_size)
}

pub async fn list<T: CatalogResource>(state: &AppState, user: CurrentUser) -> Result<Json<Vec<T::Response>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let items = Catalog::<T>::new(&mut conn).list(&filter(state, user)).await?;

    Ok(Json(items.into_iter().map(T::Response::from).collect()))
}

pub async fn search<T: CatalogResource>(state: &AppState, user: CurrentUser, query: SearchQuery) -> Result<Json<Vec<T::Response>>> {
    let term = query.term()?;
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let items = Catalog::<T>::new(&mut conn)
        .list(&filter(state, user).with_search(term))
        .await?;

    Ok(Json(items.into_iter().map(T::Response::from).collect()))
}

pub async fn get<T: CatalogResource>(state: &AppState, user: CurrentUser, id: i32) -> Result<Json<T::Response>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let item = Catalog::<T>::new(&mut conn)
        .resolve(id, user.id, state.official_user_id)
        .await?
        .ok_or_else(|| Error::not_found(T::LABEL))?;

    Ok(Json(T::Response::from(item)))
}

pub async fn create<T: CatalogResource>(state: &AppState, user: CurrentUser, body: T::Create) -> Result<(StatusCode, Json<T::Response>)> {
    let request = T::create_request(body, user.id)?;
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let item = Catalog::<T>::new(&mut conn).create(&request).await?;

    debug!(item = T::LABEL, id = item.id(), user_id = user.id, "Created inventory item");
    Ok((StatusCode::CREATED, Json(T::Response::from(item))))
}

/// Update the caller's own row, or personalize a catalog row by forking it.
pub async fn update<T: CatalogResource>(state: &AppState, user: CurrentUser, id: i32, body: T::Update) -> Result<Json<T::Response>> {
    let request = T::update_request(body)?;

    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    let outcome = Catalog::<T>::new(&mut tx)
        .update_for_user(id, user.id, state.official_user_id, &request)
        .await?;
    let item = match outcome {
        UpdateOutcome::Updated(item) => item,
        UpdateOutcome::Forked(item) => {
            info!(item = T::LABEL, official_id = id, id = item.id(), user_id = user.id, "Personalized catalog item");
            item
        }
        UpdateOutcome::NotFound => return Err(Error::not_found(T::LABEL)),
    };
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok(Json(T::Response::from(item)))
}

pub async fn delete<T: CatalogResource>(state: &AppState, user: CurrentUser, id: i32) -> Result<Json<MessageResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    match Catalog::<T>::new(&mut conn).delete_for_user(id, user.id, state.official_user_id).await? {
        DeleteOutcome::Deleted => Ok(Json(MessageResponse::new(format!(
            "{} with ID {id} was successfully deleted",
            T::LABEL
        )))),
        DeleteOutcome::Official => Err(Error::NotFound {
            message: "Cannot delete official record".to_string(),
        }),
        DeleteOutcome::NotFound => Err(Error::not_found(T::LABEL)),
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        api::models::hops::HopResponse,
        db::{
            handlers::{Hops, Repository},
            models::hops::HopCreateDBRequest,
        },
        test_utils::*,
        types::UserId,
    };
    use axum::http::StatusCode;
    use rust_decimal::Decimal;
    use serde_json::json;
    use sqlx::PgPool;

    async fn create_hop(pool: &PgPool, user_id: UserId, name: &str) -> i32 {
        let mut conn = pool.acquire().await.unwrap();
        let hop = Hops::new(&mut conn)
            .create(&HopCreateDBRequest {
                user_id,
                name: name.to_string(),
                supplier: None,
                alpha_acid_content: Some(Decimal::new(55, 1)),
                beta_acid_content: None,
                r#type: Some("Aroma".to_string()),
                country_of_origin: Some("US".to_string()),
                description: None,
                use_type: None,
            })
            .await
            .unwrap();
        hop.id
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_routes_require_a_token(pool: PgPool) {
        let (app, _state) = create_test_app(pool).await;

        let response = app.get("/api/hops").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = response.json();
        assert_eq!(body["message"], "Missing or invalid Authorization header");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_ignores_client_supplied_owner(pool: PgPool) {
        let (app, state) = create_test_app(pool.clone()).await;
        let user = create_test_user(&pool).await;
        let other = create_test_user(&pool).await;
        let (name, value) = add_auth_headers(&state.config, user.id);

        let response = app
            .post("/api/hops")
            .add_header(name, value)
            .json(&json!({ "name": "Simcoe", "userId": other.id, "alphaAcidContent": 13 }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let hop: HopResponse = response.json();
        assert_eq!(hop.user_id, user.id);
        assert_eq!(hop.official_id, None);
        assert_eq!(hop.alpha_acid_content, Some(Decimal::from(13)));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_with_missing_required_field_is_rejected(pool: PgPool) {
        let (app, state) = create_test_app(pool.clone()).await;
        let user = create_test_user(&pool).await;
        let (name, value) = add_auth_headers(&state.config, user.id);

        let response = app.post("/api/hops").add_header(name, value).json(&json!({ "supplier": "Yakima" })).await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_personalizing_replaces_catalog_entry(pool: PgPool) {
        let (app, state) = create_test_app(pool.clone()).await;
        let user = create_test_user(&pool).await;
        let official_id = create_hop(&pool, state.official_user_id, "Cascade").await;
        create_hop(&pool, state.official_user_id, "Centennial").await;
        let (name, value) = add_auth_headers(&state.config, user.id);

        let response = app
            .put(&format!("/api/hops/{official_id}"))
            .add_header(name.clone(), value.clone())
            .json(&json!({ "alphaAcidContent": 7.25, "description": "From my own harvest" }))
            .await;
        response.assert_status_ok();
        let fork: HopResponse = response.json();
        assert_ne!(fork.id, official_id);
        assert_eq!(fork.official_id, Some(official_id));
        assert_eq!(fork.user_id, user.id);
        assert_eq!(fork.name, "Cascade");
        assert_eq!(fork.country_of_origin.as_deref(), Some("US"));
        assert_eq!(fork.alpha_acid_content, Some(Decimal::new(725, 2)));

        let hops: Vec<HopResponse> = app.get("/api/hops").add_header(name.clone(), value.clone()).await.json();
        let ids: Vec<i32> = hops.iter().map(|h| h.id).collect();
        assert_eq!(hops.len(), 2);
        assert!(ids.contains(&fork.id));
        assert!(!ids.contains(&official_id));

        // The catalog row itself is untouched and still visible to everyone else
        let other = create_test_user(&pool).await;
        let (other_name, other_value) = add_auth_headers(&state.config, other.id);
        let hop: HopResponse = app
            .get(&format!("/api/hops/{official_id}"))
            .add_header(other_name, other_value)
            .await
            .json();
        assert_eq!(hop.alpha_acid_content, Some(Decimal::new(55, 1)));
        assert_eq!(hop.description, None);

        // Editing the personalized copy updates it in place
        let response = app
            .put(&format!("/api/hops/{}", fork.id))
            .add_header(name, value)
            .json(&json!({ "description": null }))
            .await;
        let updated: HopResponse = response.json();
        assert_eq!(updated.id, fork.id);
        assert_eq!(updated.description, None);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_other_users_rows_are_invisible(pool: PgPool) {
        let (app, state) = create_test_app(pool.clone()).await;
        let owner = create_test_user(&pool).await;
        let intruder = create_test_user(&pool).await;
        let id = create_hop(&pool, owner.id, "Private Hop").await;
        let (name, value) = add_auth_headers(&state.config, intruder.id);

        let response = app.get(&format!("/api/hops/{id}")).add_header(name.clone(), value.clone()).await;
        response.assert_status_not_found();
        let body: serde_json::Value = response.json();
        assert_eq!(body["message"], "Hop not found");

        app.put(&format!("/api/hops/{id}"))
            .add_header(name.clone(), value.clone())
            .json(&json!({ "name": "Mine now" }))
            .await
            .assert_status_not_found();
        app.delete(&format!("/api/hops/{id}"))
            .add_header(name.clone(), value.clone())
            .await
            .assert_status_not_found();

        let hops: Vec<HopResponse> = app.get("/api/hops").add_header(name, value).await.json();
        assert!(hops.is_empty());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_official_rows_cannot_be_deleted(pool: PgPool) {
        let (app, state) = create_test_app(pool.clone()).await;
        let user = create_test_user(&pool).await;
        let official_id = create_hop(&pool, state.official_user_id, "Saaz").await;

        for caller in [user.id, state.official_user_id] {
            let (name, value) = add_auth_headers(&state.config, caller);
            let response = app.delete(&format!("/api/hops/{official_id}")).add_header(name, value).await;
            response.assert_status_not_found();
            let body: serde_json::Value = response.json();
            assert_eq!(body["message"], "Cannot delete official record");
        }
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_delete_own_row(pool: PgPool) {
        let (app, state) = create_test_app(pool.clone()).await;
        let user = create_test_user(&pool).await;
        let id = create_hop(&pool, user.id, "Galaxy").await;
        let (name, value) = add_auth_headers(&state.config, user.id);

        let response = app.delete(&format!("/api/hops/{id}")).add_header(name.clone(), value.clone()).await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["message"], format!("Hop with ID {id} was successfully deleted"));

        app.get(&format!("/api/hops/{id}"))
            .add_header(name, value)
            .await
            .assert_status_not_found();
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_search_matches_wildcards_literally(pool: PgPool) {
        let (app, state) = create_test_app(pool.clone()).await;
        let user = create_test_user(&pool).await;
        create_hop(&pool, user.id, "100% Citra").await;
        create_hop(&pool, user.id, "Citra Cryo").await;
        create_hop(&pool, state.official_user_id, "Citra").await;
        let (name, value) = add_auth_headers(&state.config, user.id);

        let hops: Vec<HopResponse> = app
            .get("/api/hops/search")
            .add_query_param("searchTerm", "citra")
            .add_header(name.clone(), value.clone())
            .await
            .json();
        assert_eq!(hops.len(), 3);

        let hops: Vec<HopResponse> = app
            .get("/api/hops/search")
            .add_query_param("searchTerm", "0%")
            .add_header(name.clone(), value.clone())
            .await
            .json();
        assert_eq!(hops.len(), 1);
        assert_eq!(hops[0].name, "100% Citra");

        let response = app
            .get("/api/hops/search")
            .add_query_param("searchTerm", "  ")
            .add_header(name, value)
            .await;
        response.assert_status_bad_request();
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_list_is_limited_to_page_size(pool: PgPool) {
        let (app, state) = create_test_app(pool.clone()).await;
        let user = create_test_user(&pool).await;
        for i in 0..(state.config.inventory.page_size + 3) {
            create_hop(&pool, user.id, &format!("Hop {i:02}")).await;
        }
        let (name, value) = add_auth_headers(&state.config, user.id);

        let hops: Vec<HopResponse> = app.get("/api/hops").add_header(name, value).await.json();
        assert_eq!(hops.len() as i64, state.config.inventory.page_size);
        assert_eq!(hops[0].name, "Hop 00");
    }
}
