//! Account endpoints: `/api/users`.
//!
//! Registration, password login, Google sign-in, email confirmation, password reset and the
//! caller's own profile.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{
        HeaderMap, StatusCode,
        header::{COOKIE, LOCATION, SET_COOKIE},
    },
    response::{IntoResponse, Response},
};
use tracing::{info, warn};

use crate::{
    AppState,
    api::models::{
        common::MessageResponse,
        users::{
            ChangePasswordRequest, ConfirmQuery, GoogleCallbackQuery, LoginRequest, PasswordResetEmailRequest, RegisterRequest,
            TokenResponse, UserResponse, UserUpdate,
        },
    },
    auth::{
        current_user::CurrentUser,
        google::GoogleClient,
        password::{self, Argon2Params},
        session::{self, TokenType},
    },
    db::{
        errors::DbError,
        handlers::{Equipments, Users},
        models::users::{UserCreateDBRequest, UserUpdateDBRequest},
    },
    email::{OutgoingEmail, send_in_background},
    errors::{Error, Result},
    types::{AccountStatus, UserId},
};

const OAUTH_STATE_COOKIE: &str = "oauth_state";
const OAUTH_COOKIE_PATH: &str = "/api/users/google";

fn invalid_credentials() -> Error {
    Error::Unauthenticated {
        message: Some("Invalid credentials".to_string()),
    }
}

fn ensure_native_auth(state: &AppState) -> Result<()> {
    if !state.config.auth.native.enabled {
        return Err(Error::bad_request("Native authentication is disabled"));
    }
    Ok(())
}

fn token_failure(e: session::TokenError) -> Error {
    Error::Internal {
        operation: format!("create token: {e}"),
    }
}

/// A 302 with an optional cookie. `Redirect::to` answers 303, which some OAuth clients mishandle.
fn found(location: &str, cookie: Option<String>) -> Response {
    let mut response = (StatusCode::FOUND, [(LOCATION, location.to_string())]).into_response();
    if let Some(cookie) = cookie.and_then(|c| c.parse().ok()) {
        response.headers_mut().insert(SET_COOKIE, cookie);
    }
    response
}

fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

fn oauth_state_cookie(state: &AppState, value: &str, max_age: u64) -> String {
    let secure = if state.config.backend_url.starts_with("https://") { "; Secure" } else { "" };
    format!("{OAUTH_STATE_COOKIE}={value}; Path={OAUTH_COOKIE_PATH}; HttpOnly; SameSite=Lax; Max-Age={max_age}{secure}")
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    summary = "Register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created; a confirmation email is on its way", body = UserResponse),
        (status = 400, description = "Invalid input, or email already registered"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn register(State(state): State<AppState>, Json(request): Json<RegisterRequest>) -> Result<(StatusCode, Json<UserResponse>)> {
    ensure_native_auth(&state)?;
    let native = &state.config.auth.native;
    if !native.allow_registration {
        return Err(Error::bad_request("User registration is disabled"));
    }

    request.validate()?;
    password::validate_length(&request.password, &native.password)?;
    let password_hash = password::hash_password(request.password, Argon2Params::from(&native.password)).await?;

    let status = if native.require_email_confirmation {
        AccountStatus::Pending
    } else {
        AccountStatus::Active
    };

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let user = Users::new(&mut conn)
        .create(&UserCreateDBRequest {
            name: request.name.trim().to_string(),
            email: request.email.trim().to_string(),
            password_hash: Some(password_hash),
            brewery: request.brewery,
            google_id: None,
            status,
        })
        .await?;
    info!(user_id = user.id, "Registered user");

    if status == AccountStatus::Pending {
        let token = session::create_email_confirmation_token(&user.email, &state.config).map_err(token_failure)?;
        let link = format!("{}/api/users/confirm?token={token}", state.config.backend_base());
        send_in_background(
            state.email.clone(),
            OutgoingEmail::Confirmation {
                to_email: user.email.clone(),
                to_name: user.name.clone(),
                link,
            },
        );
    }

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/api/users/login",
    tag = "users",
    summary = "Log in",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Access token", body = TokenResponse),
        (status = 400, description = "Missing email or password"),
        (status = 401, description = "Invalid credentials"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn login(State(state): State<AppState>, Json(request): Json<LoginRequest>) -> Result<Json<TokenResponse>> {
    ensure_native_auth(&state)?;
    request.validate()?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut users = Users::new(&mut conn);

    let user = users.get_user_by_email(request.email.trim()).await?.ok_or_else(invalid_credentials)?;
    if !user.is_active() {
        return Err(invalid_credentials());
    }
    // Accounts created through Google have no password
    let Some(hash) = user.password_hash.clone() else {
        return Err(invalid_credentials());
    };
    if !password::verify_password(request.password, hash).await? {
        return Err(invalid_credentials());
    }

    users.record_login(user.id).await?;
    let token = session::create_access_token(user.id, &state.config).map_err(token_failure)?;
    Ok(Json(TokenResponse { token }))
}

/// Activate an account from the emailed confirmation link
#[utoipa::path(
    get,
    path = "/api/users/confirm",
    tag = "users",
    summary = "Confirm email",
    params(ConfirmQuery),
    responses(
        (status = 302, description = "Account activated; redirects to the frontend"),
        (status = 400, description = "Invalid or expired token, or account already active"),
        (status = 404, description = "User not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn confirm(State(state): State<AppState>, Query(query): Query<ConfirmQuery>) -> Result<Response> {
    let claims = session::verify_token(&query.token, TokenType::EmailConfirm, &state.config).map_err(session::TokenError::into_bad_request)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut users = Users::new(&mut conn);
    let user = users.get_user_by_email(&claims.sub).await?.ok_or_else(|| Error::not_found("User"))?;
    if user.is_active() {
        return Err(Error::bad_request("User is already active"));
    }

    users
        .update(
            user.id,
            &UserUpdateDBRequest {
                status: Some(AccountStatus::Active),
                ..Default::default()
            },
        )
        .await?;
    info!(user_id = user.id, "Confirmed account");

    Ok(found(&state.config.frontend_url, None))
}

/// Set a new password using a password reset token
#[utoipa::path(
    post,
    path = "/api/users/changePassword",
    tag = "users",
    summary = "Change password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 400, description = "Invalid token or password"),
        (status = 404, description = "User not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn change_password(State(state): State<AppState>, Json(request): Json<ChangePasswordRequest>) -> Result<Json<MessageResponse>> {
    ensure_native_auth(&state)?;
    let claims = session::verify_token(&request.token, TokenType::PwdReset, &state.config).map_err(session::TokenError::into_bad_request)?;
    let native = &state.config.auth.native;
    password::validate_length(&request.password, &native.password)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut users = Users::new(&mut conn);
    let user = users.get_user_by_email(&claims.sub).await?.ok_or_else(|| Error::not_found("User"))?;

    let password_hash = password::hash_password(request.password, Argon2Params::from(&native.password)).await?;
    users
        .update(
            user.id,
            &UserUpdateDBRequest {
                password_hash: Some(password_hash),
                ..Default::default()
            },
        )
        .await?;
    info!(user_id = user.id, "Password changed");

    Ok(Json(MessageResponse::new("Password changed successfully")))
}

/// Email a password reset link
#[utoipa::path(
    post,
    path = "/api/users/sendPasswordResetEmail",
    tag = "users",
    summary = "Request password reset",
    request_body = PasswordResetEmailRequest,
    responses(
        (status = 200, description = "Email queued", body = MessageResponse),
        (status = 404, description = "User not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn send_password_reset_email(
    State(state): State<AppState>,
    Json(request): Json<PasswordResetEmailRequest>,
) -> Result<Json<MessageResponse>> {
    ensure_native_auth(&state)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let user = Users::new(&mut conn)
        .get_user_by_email(request.email.trim())
        .await?
        .ok_or_else(|| Error::not_found("User"))?;

    let token = session::create_password_reset_token(&user.email, &state.config).map_err(token_failure)?;
    let link = format!("{}/ChangePassword?token={token}", state.config.frontend_base());
    send_in_background(
        state.email.clone(),
        OutgoingEmail::PasswordReset {
            to_email: user.email,
            to_name: user.name,
            link,
        },
    );

    Ok(Json(MessageResponse::new("Email sent successfully")))
}

/// Start Google sign-in
#[utoipa::path(
    get,
    path = "/api/users/google/login",
    tag = "users",
    summary = "Sign in with Google",
    responses(
        (status = 302, description = "Redirect to Google's consent screen"),
        (status = 400, description = "Google sign-in is disabled"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn google_login(State(state): State<AppState>) -> Result<Response> {
    let google = &state.config.auth.google;
    if !google.enabled {
        return Err(Error::bad_request("Google authentication is disabled"));
    }

    let nonce = password::generate_state_token();
    let url = GoogleClient::new(&state.http, google).authorization_url(&nonce)?;
    let cookie = oauth_state_cookie(&state, &nonce, google.state_ttl.as_secs());

    Ok(found(url.as_str(), Some(cookie)))
}

/// Finish Google sign-in
///
/// Creates the account on first sign-in, activates a pending account with the same email, and
/// redirects to the frontend with an access token.
#[utoipa::path(
    get,
    path = "/api/users/google/callback",
    tag = "users",
    summary = "Google sign-in callback",
    params(GoogleCallbackQuery),
    responses(
        (status = 302, description = "Signed in; redirects to the frontend with `?token=`"),
        (status = 400, description = "Invalid state, failed exchange, or incomplete Google profile"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn google_callback(State(state): State<AppState>, headers: HeaderMap, Query(query): Query<GoogleCallbackQuery>) -> Result<Response> {
    let google = &state.config.auth.google;
    if !google.enabled {
        return Err(Error::bad_request("Google authentication is disabled"));
    }

    let expected = read_cookie(&headers, OAUTH_STATE_COOKIE);
    match (expected, query.state.as_deref()) {
        (Some(expected), Some(received)) if !expected.is_empty() && expected == received => {}
        _ => return Err(Error::bad_request("Invalid state")),
    }

    let client = GoogleClient::new(&state.http, google);
    let code = query.code.as_deref().ok_or_else(|| Error::bad_request("Token exchange failed"))?;
    let access_token = client.exchange_code(code).await.map_err(|e| {
        warn!(error = %e, "Google code exchange failed");
        Error::bad_request("Token exchange failed")
    })?;
    let profile = client.fetch_userinfo(&access_token).await.map_err(|e| {
        warn!(error = %e, "Google userinfo request failed");
        Error::bad_request("Token exchange failed")
    })?;
    let (Some(google_id), Some(email)) = (profile.sub, profile.email) else {
        return Err(Error::bad_request("Missing Google user data"));
    };

    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    let mut users = Users::new(&mut tx);
    let user = match users.get_user_by_email_or_google_id(&email, &google_id).await? {
        Some(existing) => {
            let update = UserUpdateDBRequest {
                status: (!existing.is_active()).then_some(AccountStatus::Active),
                google_id: existing.google_id.is_none().then(|| google_id.clone()),
                ..Default::default()
            };
            users.update(existing.id, &update).await?
        }
        None => {
            let name = profile
                .name
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| email.split('@').next().unwrap_or_default().to_string());
            let created = users
                .create(&UserCreateDBRequest {
                    name,
                    email,
                    password_hash: None,
                    brewery: None,
                    google_id: Some(google_id),
                    status: AccountStatus::Active,
                })
                .await?;
            info!(user_id = created.id, "Created user from Google sign-in");
            created
        }
    };
    users.record_login(user.id).await?;
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    let token = session::create_access_token(user.id, &state.config).map_err(token_failure)?;
    let location = format!("{}/?token={token}", state.config.frontend_base());
    Ok(found(&location, Some(oauth_state_cookie(&state, "", 0))))
}

/// The caller's profile
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "users",
    summary = "Get current user",
    responses(
        (status = 200, description = "Profile", body = UserResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "User is not active"),
        (status = 404, description = "User not found"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn get_me(State(state): State<AppState>, current_user: CurrentUser) -> Result<Json<UserResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let user = Users::new(&mut conn)
        .get_by_id(current_user.id)
        .await?
        .ok_or_else(|| Error::not_found("User"))?;

    if !user.is_active() {
        return Err(Error::Forbidden {
            message: "User is not active".to_string(),
        });
    }
    Ok(Json(UserResponse::from(user)))
}

/// Update the caller's profile
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "users",
    summary = "Update user",
    request_body = UserUpdate,
    params(("id" = i32, Path, description = "User ID; must be the caller")),
    responses(
        (status = 200, description = "Updated profile", body = UserResponse),
        (status = 400, description = "Invalid input, or email already registered"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "The official account's email cannot be changed"),
        (status = 404, description = "User or default equipment not found"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    current_user: CurrentUser,
    Json(update): Json<UserUpdate>,
) -> Result<Json<UserResponse>> {
    if id != current_user.id {
        return Err(Error::not_found("User"));
    }
    update.validate()?;

    // Seeding finds the catalog owner by its configured email
    if id == state.official_user_id
        && let Some(email) = &update.email
        && email.trim() != state.config.official_user.email
    {
        return Err(Error::Forbidden {
            message: "The official account's email cannot be changed".to_string(),
        });
    }

    let password_hash = match update.password {
        Some(password) => {
            let config = &state.config.auth.native.password;
            password::validate_length(&password, config)?;
            Some(password::hash_password(password, Argon2Params::from(config)).await?)
        }
        None => None,
    };

    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;

    if let Some(Some(equipment_id)) = update.default_equipment_id {
        Equipments::new(&mut tx)
            .resolve(equipment_id, id, state.official_user_id)
            .await?
            .ok_or_else(|| Error::not_found("Equipment"))?;
    }

    let request = UserUpdateDBRequest {
        name: update.name.map(|name| name.trim().to_string()),
        email: update.email.map(|email| email.trim().to_string()),
        password_hash,
        brewery: update.brewery,
        weight_unit: update.weight_unit,
        volume_unit: update.volume_unit,
        default_equipment_id: update.default_equipment_id,
        status: None,
        google_id: None,
    };
    let user = match Users::new(&mut tx).update(id, &request).await {
        Ok(user) => user,
        Err(DbError::NotFound) => return Err(Error::not_found("User")),
        Err(e) => return Err(e.into()),
    };
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok(Json(UserResponse::from(user)))
}

/// Delete the caller's account and everything it owns
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "users",
    summary = "Delete user",
    params(("id" = i32, Path, description = "User ID; must be the caller")),
    responses(
        (status = 200, description = "Account deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "The official account cannot be deleted"),
        (status = 404, description = "User not found"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn delete_user(State(state): State<AppState>, Path(id): Path<UserId>, current_user: CurrentUser) -> Result<Json<MessageResponse>> {
    if id != current_user.id {
        return Err(Error::not_found("User"));
    }
    // Deleting the catalog owner would cascade to every catalog row
    if id == state.official_user_id {
        return Err(Error::Forbidden {
            message: "The official account cannot be deleted".to_string(),
        });
    }

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    if !Users::new(&mut conn).delete(id).await? {
        return Err(Error::not_found("User"));
    }
    info!(user_id = id, "Deleted user");

    Ok(Json(MessageResponse::new(format!("User {id} deleted successfully"))))
}
