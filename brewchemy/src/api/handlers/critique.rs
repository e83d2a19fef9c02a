//! Recipe critique endpoint: `/api/openAI`.

use axum::{Json, extract::State};
use tracing::info;

use crate::{
    AppState,
    api::models::critique::{CritiqueRequest, CritiqueResponse},
    auth::current_user::CurrentUser,
    critique::CritiqueClient,
    errors::{Error, Result},
};

/// Critique a recipe
///
/// Sends the recipe text to the configured chat model and returns its short critique.
#[utoipa::path(
    post,
    path = "/api/openAI",
    tag = "critique",
    summary = "Critique recipe",
    request_body = CritiqueRequest,
    responses(
        (status = 200, description = "The critique", body = CritiqueResponse),
        (status = 400, description = "No recipe provided"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "No API key configured, or the model call failed"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn critique_recipe(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(body): Json<CritiqueRequest>,
) -> Result<Json<CritiqueResponse>> {
    let recipe = body
        .message
        .as_deref()
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .ok_or_else(|| Error::bad_request("No recipe provided"))?;

    let client = CritiqueClient::new(&state.http, &state.config.openai).ok_or_else(|| Error::Internal {
        operation: "critique recipe: OPENAI_API_KEY not configured".to_string(),
    })?;

    let response = client.critique(recipe).await?;
    info!(user_id = current_user.id, "Critiqued recipe");

    Ok(Json(CritiqueResponse { response }))
}
