//! API request/response models for accounts and authentication.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::common::require_non_blank;
use crate::db::models::users::UserDBResponse;
use crate::errors::Result;
use crate::types::{AccountStatus, EquipmentId, UserId};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<()> {
        require_non_blank("email", &self.email)?;
        require_non_blank("password", &self.password)
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub brewery: Option<String>,
}

impl RegisterRequest {
    /// Field presence only; password length depends on configuration.
    pub fn validate(&self) -> Result<()> {
        require_non_blank("name", &self.name)?;
        require_non_blank("email", &self.email)
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ChangePasswordRequest {
    /// Password reset token from the email link
    pub token: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PasswordResetEmailRequest {
    pub email: String,
}

/// Partial profile update. `null` clears `brewery` or `defaultEquipmentId`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub brewery: Option<Option<String>>,
    /// e.g. `g`, `kg`, `oz`, `lb`
    pub weight_unit: Option<String>,
    /// e.g. `l`, `gal`
    pub volume_unit: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<i32>)]
    pub default_equipment_id: Option<Option<EquipmentId>>,
}

impl UserUpdate {
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            require_non_blank("name", name)?;
        }
        if let Some(email) = &self.email {
            require_non_blank("email", email)?;
        }
        if let Some(unit) = &self.weight_unit {
            require_non_blank("weightUnit", unit)?;
        }
        if let Some(unit) = &self.volume_unit {
            require_non_blank("volumeUnit", unit)?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ConfirmQuery {
    /// Email confirmation token
    pub token: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct GoogleCallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// Access token for the `Authorization: Bearer` header
    pub token: String,
}

/// A user's own profile. Credentials are never serialized.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub brewery: Option<String>,
    pub status: AccountStatus,
    pub weight_unit: String,
    pub volume_unit: String,
    pub default_equipment_id: Option<EquipmentId>,
}

impl From<UserDBResponse> for UserResponse {
    fn from(db: UserDBResponse) -> Self {
        Self {
            user_id: db.id,
            name: db.name,
            email: db.email,
            brewery: db.brewery,
            status: db.status,
            weight_unit: db.weight_unit,
            volume_unit: db.volume_unit,
            default_equipment_id: db.default_equipment_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn test_user_response_hides_credentials() {
        let db = UserDBResponse {
            id: 4,
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            password_hash: Some("$argon2id$...".to_string()),
            brewery: None,
            google_id: Some("g-1".to_string()),
            status: AccountStatus::Active,
            weight_unit: "g".to_string(),
            volume_unit: "l".to_string(),
            default_equipment_id: None,
            created_at: Utc::now(),
            last_login: None,
        };

        let value = serde_json::to_value(UserResponse::from(db)).unwrap();
        assert_eq!(value["userId"], 4);
        assert_eq!(value["status"], "active");
        assert_eq!(value["weightUnit"], "g");
        assert!(value.get("passwordHash").is_none());
        assert!(value.get("googleId").is_none());
    }

    #[test]
    fn test_update_clears_default_equipment_with_null() {
        let update: UserUpdate = serde_json::from_value(json!({ "defaultEquipmentId": null, "volumeUnit": "gal" })).unwrap();
        assert_eq!(update.default_equipment_id, Some(None));
        assert_eq!(update.brewery, None);
        assert_eq!(update.volume_unit.as_deref(), Some("gal"));
    }

    #[test]
    fn test_register_validation() {
        let request: RegisterRequest = serde_json::from_value(json!({
            "name": "",
            "email": "jane@example.com",
            "password": "hunter22"
        }))
        .unwrap();
        assert_eq!(request.validate().unwrap_err().user_message(), "name is required");
    }
}
