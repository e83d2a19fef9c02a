//! Small payloads shared across resources.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// A plain confirmation, e.g. `{"message": "Recipe deleted"}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Query parameters for the `/search` endpoints
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Case-insensitive substring of the name. `%` and `_` match literally.
    pub search_term: Option<String>,
}

impl SearchQuery {
    /// The trimmed term, or 400 when it is missing or blank.
    pub fn term(&self) -> crate::errors::Result<&str> {
        match self.search_term.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => Ok(term),
            _ => Err(crate::errors::Error::bad_request("searchTerm is required")),
        }
    }
}

/// Reject blank strings for fields that must carry text.
pub fn require_non_blank(field: &str, value: &str) -> crate::errors::Result<()> {
    if value.trim().is_empty() {
        return Err(crate::errors::Error::bad_request(format!("{field} is required")));
    }
    Ok(())
}

/// Reject negative quantities, volumes and times. `None` passes.
pub fn require_non_negative<V: PartialOrd + Default>(field: &str, value: Option<V>) -> crate::errors::Result<()> {
    if value.is_some_and(|v| v < V::default()) {
        return Err(crate::errors::Error::bad_request(format!("{field} must not be negative")));
    }
    Ok(())
}

/// Reject values outside `0..=max`. `None` passes.
pub fn require_at_most<V: PartialOrd + Default + std::fmt::Display>(field: &str, value: Option<V>, max: V) -> crate::errors::Result<()> {
    if let Some(v) = value {
        if v < V::default() || v > max {
            return Err(crate::errors::Error::bad_request(format!("{field} must be between 0 and {max}")));
        }
    }
    Ok(())
}
