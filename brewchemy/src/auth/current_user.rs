//! Bearer token extractor for protected routes.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::{instrument, trace};

use crate::{
    AppState,
    auth::session,
    errors::{Error, Result},
    types::UserId,
};

/// The authenticated caller, taken from `Authorization: Bearer <access token>`.
///
/// Only the token is checked. Handlers that need the account row load it themselves, so a token
/// outliving its user is caught where it matters (see `/api/users/me`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: UserId,
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    let header = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = header.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Error;

    #[instrument(skip_all)]
    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let Some(token) = bearer_token(parts) else {
            trace!("No bearer token on request");
            return Err(Error::Unauthenticated {
                message: Some("Missing or invalid Authorization header".to_string()),
            });
        };

        let id = session::verify_access_token(token, &state.config)?;
        trace!(user_id = id, "Authenticated bearer token");
        Ok(CurrentUser { id })
    }
}
