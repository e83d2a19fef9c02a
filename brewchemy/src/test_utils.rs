//! Test utilities for handler and integration tests.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use axum::http::{HeaderName, HeaderValue, header::AUTHORIZATION};
use axum_test::TestServer;
use sqlx::PgPool;

use crate::{
    AppState, Application,
    auth::{
        password::{self, Argon2Params},
        session,
    },
    config::{Config, EmailTransportConfig, PasswordConfig},
    db::{
        handlers::Users,
        models::users::{UserCreateDBRequest, UserDBResponse},
    },
    email::EmailService,
    types::{AccountStatus, UserId},
};

static COUNTER: AtomicUsize = AtomicUsize::new(0);

fn unique_suffix() -> String {
    format!("{}_{}", std::process::id(), COUNTER.fetch_add(1, Ordering::Relaxed))
}

pub fn create_test_config() -> Config {
    // Use temp directory for test emails
    let emails_dir = std::env::temp_dir().join(format!("brewchemy-test-emails-{}", unique_suffix()));

    let mut config = Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        secret_key: Some("test-secret-key-for-testing-only".to_string()),
        ..Default::default()
    };
    config.email.transport = EmailTransportConfig::File {
        path: emails_dir.to_string_lossy().into_owned(),
    };
    // Cheap hashes keep the auth tests fast
    config.auth.native.password = PasswordConfig {
        argon2_memory_kib: 1024,
        argon2_iterations: 1,
        argon2_parallelism: 1,
        ..Default::default()
    };
    config
}

/// App state over `pool` without running seeding; the caller picks the official user id.
pub fn create_test_state(pool: PgPool, official_user_id: UserId) -> AppState {
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
    let config = create_test_config();

    AppState::builder()
        .email(Arc::new(EmailService::new(&config).expect("Failed to create email service")))
        .db(pool)
        .config(config)
        .official_user_id(official_user_id)
        .build()
}

pub async fn create_test_app(pool: PgPool) -> (TestServer, AppState) {
    create_test_app_with_config(pool, create_test_config()).await
}

/// Full router over `pool`, with migrations and official-user seeding applied.
pub async fn create_test_app_with_config(pool: PgPool, config: Config) -> (TestServer, AppState) {
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let official_user_id = crate::seed_official_user(&config, &pool)
        .await
        .expect("Failed to seed official user");
    let state = AppState::builder()
        .email(Arc::new(EmailService::new(&config).expect("Failed to create email service")))
        .db(pool.clone())
        .config(config.clone())
        .official_user_id(official_user_id)
        .build();

    let server = Application::new_with_pool(config, pool)
        .await
        .expect("Failed to create application")
        .into_test_server();
    (server, state)
}

async fn insert_user(pool: &PgPool, password_hash: Option<String>, status: AccountStatus) -> UserDBResponse {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    let suffix = unique_suffix();

    Users::new(&mut conn)
        .create(&UserCreateDBRequest {
            name: format!("Brewer {suffix}"),
            email: format!("brewer_{suffix}@example.com"),
            password_hash,
            brewery: None,
            google_id: None,
            status,
        })
        .await
        .expect("Failed to create test user")
}

/// An active user without a password.
pub async fn create_test_user(pool: &PgPool) -> UserDBResponse {
    insert_user(pool, None, AccountStatus::Active).await
}

pub async fn create_test_user_with_password(pool: &PgPool, password: &str) -> UserDBResponse {
    let params = Argon2Params::from(&create_test_config().auth.native.password);
    let hash = password::hash_password(password.to_string(), params)
        .await
        .expect("Failed to hash password");
    insert_user(pool, Some(hash), AccountStatus::Active).await
}

/// A registered user who hasn't confirmed their email yet.
pub async fn create_pending_user(pool: &PgPool) -> UserDBResponse {
    insert_user(pool, None, AccountStatus::Pending).await
}

/// `Authorization: Bearer` header for `user_id`, signed with `config`'s secret.
pub fn add_auth_headers(config: &Config, user_id: UserId) -> (HeaderName, HeaderValue) {
    let token = session::create_access_token(user_id, config).expect("Failed to create access token");
    let value = HeaderValue::from_str(&format!("Bearer {token}")).expect("Invalid header value");
    (AUTHORIZATION, value)
}
