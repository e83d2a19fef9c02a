//! # brewchemy: Homebrewing Recipe Backend
//!
//! `brewchemy` is the HTTP backend for a homebrewing recipe designer. Brewers register, sign in with
//! a password or Google, keep an inventory of brewing equipment and ingredients, and build recipes
//! from that inventory.
//!
//! ## Overview
//!
//! Every inventory resource (equipment profiles, fermentables, hops, misc additions, yeasts) has two
//! kinds of rows. The **official catalog** belongs to a single seeded account and is visible to
//! everyone; **personal** rows belong to the brewer who created them. A brewer's listing merges
//! both. Editing a catalog item never touches the catalog: it forks a personal copy that records
//! where it came from (`officialId`) and replaces the catalog entry in that brewer's listings.
//!
//! Recipes are private aggregates: one parent row plus snapshot rows for its equipment,
//! fermentables, hops, misc additions and yeasts. Updates patch the parent and reconcile each
//! submitted child list against what is stored.
//!
//! ## Architecture
//!
//! - **API layer** ([`api`]): axum handlers and wire models, documented with utoipa
//! - **Authentication** ([`auth`]): argon2 password hashes, JWT bearer tokens, Google OAuth
//! - **Database layer** ([`db`]): repositories over a PostgreSQL pool; the generic
//!   [`db::handlers::Catalog`] implements the official/personal rules once for every inventory table
//! - **Email** ([`email`]): confirmation and password reset messages over SMTP or to files
//! - **Critiques** ([`critique`]): short recipe reviews from an OpenAI-compatible chat model
//! - **Configuration** ([`config`]): YAML file plus `BREWCHEMY_` environment overrides
//!
//! ## Startup
//!
//! [`Application::new`] connects the pool, runs migrations and seeds the official account
//! configured under `official_user`. [`Application::serve`] then serves until the shutdown future
//! resolves:
//!
//! ```no_run
//! use brewchemy::{Application, Config};
//!
//! # async fn run(config: Config) -> anyhow::Result<()> {
//! Application::new(config).await?.serve(std::future::pending()).await
//! # }
//! ```
//!
//! ## Testing
//!
//! Database tests use `#[sqlx::test]`, which creates a fresh database per test and applies the
//! migrations in `migrations/`. HTTP tests go through `axum-test` against the full router built by
//! `test_utils::create_test_app`.

pub mod api;
pub mod auth;
pub mod config;
pub mod critique;
pub mod db;
pub mod email;
pub mod errors;
pub mod openapi;
pub mod telemetry;
pub mod types;

#[cfg(test)]
pub mod test_utils;

use std::{sync::Arc, time::Duration};

use axum::{
    Json, Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use bon::Builder;
use sqlx::{PgPool, postgres::PgPoolOptions};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, debug, info, instrument};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

pub use config::Config;

use crate::{
    api::handlers::{equipments, fermentables, health, hops, miscs, recipes, users, yeasts},
    auth::password::{self, Argon2Params},
    config::CorsOrigin,
    db::{
        handlers::Users,
        models::users::{UserCreateDBRequest, UserUpdateDBRequest},
    },
    email::EmailService,
    openapi::ApiDoc,
    types::{AccountStatus, UserId},
};

/// Application state shared across all request handlers.
///
/// `official_user_id` is resolved once at startup; every inventory query needs it.
#[derive(Clone, Builder)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    pub official_user_id: UserId,
    pub email: Arc<EmailService>,
    /// Outbound client for Google OAuth and the chat completion API
    #[builder(default)]
    pub http: reqwest::Client,
}

/// Get the brewchemy database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Create the official catalog account if it doesn't exist.
///
/// Idempotent. An existing account is kept, reactivated if needed, and gets a new password hash
/// when a password is configured. Without a password the account has no password login.
#[instrument(skip_all, fields(email = %config.official_user.email))]
pub async fn seed_official_user(config: &Config, db: &PgPool) -> anyhow::Result<UserId> {
    let official = &config.official_user;
    let password_hash = match &official.password {
        Some(password) => Some(password::hash_password(password.clone(), Argon2Params::from(&config.auth.native.password)).await?),
        None => None,
    };

    let mut tx = db.begin().await?;
    let mut users = Users::new(&mut tx);

    let id = match users.get_user_by_email(&official.email).await? {
        Some(existing) => {
            let update = UserUpdateDBRequest {
                password_hash,
                status: (!existing.is_active()).then_some(AccountStatus::Active),
                ..Default::default()
            };
            users.update(existing.id, &update).await?;
            debug!(user_id = existing.id, "Official user already present");
            existing.id
        }
        None => {
            let created = users
                .create(&UserCreateDBRequest {
                    name: official.name.clone(),
                    email: official.email.clone(),
                    password_hash,
                    brewery: None,
                    google_id: None,
                    status: AccountStatus::Active,
                })
                .await?;
            info!(user_id = created.id, "Created official user");
            created.id
        }
    };

    tx.commit().await?;
    Ok(id)
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let cors_config = &config.auth.security.cors;

    let allow_origin = if cors_config.allowed_origins.iter().any(|o| matches!(o, CorsOrigin::Wildcard)) {
        AllowOrigin::any()
    } else {
        let mut origins = Vec::new();
        for origin in &cors_config.allowed_origins {
            if let CorsOrigin::Url(url) = origin {
                // Browsers send the origin without a trailing slash
                origins.push(url.as_str().trim_end_matches('/').parse::<HeaderValue>()?);
            }
        }
        AllowOrigin::list(origins)
    };

    let mut exposed = Vec::new();
    for name in &cors_config.exposed_headers {
        exposed.push(name.parse::<header::HeaderName>()?);
    }

    let mut cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(cors_config.allow_credentials)
        .expose_headers(exposed);

    if let Some(max_age) = cors_config.max_age {
        cors = cors.max_age(Duration::from_secs(max_age));
    }

    Ok(cors)
}

/// Build the application router: every API route, the docs, CORS and request tracing.
#[instrument(skip_all)]
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    let user_routes = Router::new()
        .route("/api/users", post(users::register))
        .route("/api/users/login", post(users::login))
        .route("/api/users/confirm", get(users::confirm))
        .route("/api/users/changePassword", post(users::change_password))
        .route("/api/users/sendPasswordResetEmail", post(users::send_password_reset_email))
        .route("/api/users/google/login", get(users::google_login))
        .route("/api/users/google/callback", get(users::google_callback))
        .route("/api/users/me", get(users::get_me))
        .route("/api/users/{id}", axum::routing::put(users::update_user).delete(users::delete_user));

    let inventory_routes = Router::new()
        .route(
            "/api/equipments",
            get(equipments::list_equipments).post(equipments::create_equipment),
        )
        .route("/api/equipments/search", get(equipments::search_equipments))
        .route(
            "/api/equipments/{id}",
            get(equipments::get_equipment)
                .put(equipments::update_equipment)
                .delete(equipments::delete_equipment),
        )
        .route(
            "/api/fermentables",
            get(fermentables::list_fermentables).post(fermentables::create_fermentable),
        )
        .route("/api/fermentables/search", get(fermentables::search_fermentables))
        .route(
            "/api/fermentables/{id}",
            get(fermentables::get_fermentable)
                .put(fermentables::update_fermentable)
                .delete(fermentables::delete_fermentable),
        )
        .route("/api/hops", get(hops::list_hops).post(hops::create_hop))
        .route("/api/hops/search", get(hops::search_hops))
        .route("/api/hops/{id}", get(hops::get_hop).put(hops::update_hop).delete(hops::delete_hop))
        .route("/api/misc", get(miscs::list_misc).post(miscs::create_misc))
        .route("/api/misc/search", get(miscs::search_misc))
        .route("/api/misc/{id}", get(miscs::get_misc).put(miscs::update_misc).delete(miscs::delete_misc))
        .route("/api/yeasts", get(yeasts::list_yeasts).post(yeasts::create_yeast))
        .route("/api/yeasts/search", get(yeasts::search_yeasts))
        .route(
            "/api/yeasts/{id}",
            get(yeasts::get_yeast).put(yeasts::update_yeast).delete(yeasts::delete_yeast),
        );

    let recipe_routes = Router::new()
        .route("/api/recipes", get(recipes::list_recipes).post(recipes::create_recipe))
        .route("/api/recipes/search", get(recipes::search_recipes))
        .route(
            "/api/recipes/{id}",
            get(recipes::get_recipe).put(recipes::update_recipe).delete(recipes::delete_recipe),
        )
        .route("/api/recipes/{id}/copy", post(recipes::copy_recipe))
        .route("/api/openAI", post(api::handlers::critique::critique_recipe));

    let cors_layer = create_cors_layer(&state.config)?;

    let router = Router::new()
        .route("/health", get(health::health))
        .merge(user_routes)
        .merge(inventory_routes)
        .merge(recipe_routes)
        .with_state(state)
        .route("/api/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .merge(Scalar::with_url("/api/docs", ApiDoc::openapi()))
        .layer(cors_layer)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    Ok(router)
}

/// The assembled service.
///
/// 1. **Create**: [`Application::new`] connects to PostgreSQL, runs migrations and seeds the
///    official account
/// 2. **Serve**: [`Application::serve`] binds to a TCP port and handles requests
/// 3. **Shutdown**: when the shutdown future resolves, in-flight requests finish and the pool closes
pub struct Application {
    router: Router,
    config: Config,
    pool: PgPool,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        debug!("Starting brewchemy with configuration: {:#?}", config);

        let settings = &config.database.pool;
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .min_connections(settings.min_connections)
            .acquire_timeout(settings.acquire_timeout)
            .idle_timeout(settings.idle_timeout)
            .max_lifetime(settings.max_lifetime)
            .connect(&config.database.url)
            .await?;

        Self::new_with_pool(config, pool).await
    }

    /// Build the application on an existing pool. Runs migrations and seeding.
    pub async fn new_with_pool(config: Config, pool: PgPool) -> anyhow::Result<Self> {
        migrator().run(&pool).await?;
        let official_user_id = seed_official_user(&config, &pool).await?;

        let state = AppState::builder()
            .db(pool.clone())
            .config(config.clone())
            .official_user_id(official_user_id)
            .email(Arc::new(EmailService::new(&config)?))
            .build();
        let router = build_router(state)?;

        Ok(Self { router, config, pool })
    }

    /// Convert application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "brewchemy listening on http://{}, available at {}",
            bind_addr,
            self.config.backend_base()
        );

        axum::serve(listener, self.router).with_graceful_shutdown(shutdown).await?;

        info!("Closing database connections...");
        self.pool.close().await;

        Ok(())
    }
}
