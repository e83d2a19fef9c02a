//! Database models for users.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::types::{AccountStatus, EquipmentId, UserId};

/// Database request for creating a new user
#[derive(Debug, Clone)]
pub struct UserCreateDBRequest {
    pub name: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub brewery: Option<String>,
    pub google_id: Option<String>,
    pub status: AccountStatus,
}

/// Database request for updating a user. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct UserUpdateDBRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub brewery: Option<Option<String>>,
    pub weight_unit: Option<String>,
    pub volume_unit: Option<String>,
    pub default_equipment_id: Option<Option<EquipmentId>>,
    pub status: Option<AccountStatus>,
    pub google_id: Option<String>,
}

/// Database response for a user
#[derive(Debug, Clone, FromRow)]
pub struct UserDBResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub brewery: Option<String>,
    pub google_id: Option<String>,
    pub status: AccountStatus,
    pub weight_unit: String,
    pub volume_unit: String,
    pub default_equipment_id: Option<EquipmentId>,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl UserDBResponse {
    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }
}
