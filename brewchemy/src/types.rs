//! Common type definitions shared by the database and API layers.
//!
//! All entity IDs are Postgres `SERIAL` integers wrapped in type aliases so signatures say which
//! table an id belongs to.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

pub type UserId = i32;
pub type EquipmentId = i32;
pub type FermentableId = i32;
pub type HopId = i32;
pub type MiscId = i32;
pub type YeastId = i32;
pub type RecipeId = i32;

/// Lifecycle state of a user account.
///
/// Accounts created through registration start as `Pending` until the confirmation link is
/// followed; only `Active` accounts may log in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "account_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Pending,
    Active,
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountStatus::Pending => write!(f, "pending"),
            AccountStatus::Active => write!(f, "active"),
        }
    }
}

/// Escape `%`, `_` and `\` so a user-supplied term matches literally inside an `ILIKE` pattern.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_passes_plain_text_through() {
        assert_eq!(escape_like("Pale Ale"), "Pale Ale");
    }

    #[test]
    fn test_escape_like_escapes_wildcards() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("c:\\"), "c:\\\\");
    }

    #[test]
    fn test_account_status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&AccountStatus::Pending).unwrap(), "\"pending\"");
        assert_eq!(AccountStatus::Active.to_string(), "active");
    }
}
