//! Database models for equipment profiles.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

use crate::db::handlers::{catalog::CatalogItem, columns::Columns};
use crate::types::{EquipmentId, UserId};

/// Database request for creating an equipment profile
#[derive(Debug, Clone)]
pub struct EquipmentCreateDBRequest {
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub efficiency: Decimal,
    pub batch_volume: Decimal,
    pub batch_time: Option<i32>,
    pub boil_time: Option<i32>,
    pub boil_temperature: Decimal,
    pub boil_off: Option<Decimal>,
    pub trub_loss: Option<Decimal>,
    pub dead_space: Option<Decimal>,
}

/// Database request for updating an equipment profile. `None` leaves a field untouched; for
/// nullable columns `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct EquipmentUpdateDBRequest {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub efficiency: Option<Decimal>,
    pub batch_volume: Option<Decimal>,
    pub batch_time: Option<Option<i32>>,
    pub boil_time: Option<Option<i32>>,
    pub boil_temperature: Option<Decimal>,
    pub boil_off: Option<Option<Decimal>>,
    pub trub_loss: Option<Option<Decimal>>,
    pub dead_space: Option<Option<Decimal>>,
}

/// Database response for an equipment profile
#[derive(Debug, Clone, FromRow)]
pub struct EquipmentDBResponse {
    pub id: EquipmentId,
    pub official_id: Option<EquipmentId>,
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub efficiency: Decimal,
    pub batch_volume: Decimal,
    pub batch_time: Option<i32>,
    pub boil_time: Option<i32>,
    pub boil_temperature: Decimal,
    pub boil_off: Option<Decimal>,
    pub trub_loss: Option<Decimal>,
    pub dead_space: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

impl CatalogItem for EquipmentDBResponse {
    const TABLE: &'static str = "equipments";
    const LABEL: &'static str = "Equipment";
    const DATA_COLUMNS: &'static [&'static str] = &[
        "name",
        "description",
        "efficiency",
        "batch_volume",
        "batch_time",
        "boil_time",
        "boil_temperature",
        "boil_off",
        "trub_loss",
        "dead_space",
    ];

    type CreateRequest = EquipmentCreateDBRequest;
    type UpdateRequest = EquipmentUpdateDBRequest;

    fn id(&self) -> i32 {
        self.id
    }

    fn owner(&self) -> UserId {
        self.user_id
    }

    fn create_columns(r: &Self::CreateRequest) -> Columns {
        Columns::new()
            .set("user_id", r.user_id)
            .set("name", r.name.clone())
            .set("description", r.description.clone())
            .set("efficiency", r.efficiency)
            .set("batch_volume", r.batch_volume)
            .set("batch_time", r.batch_time)
            .set("boil_time", r.boil_time)
            .set("boil_temperature", r.boil_temperature)
            .set("boil_off", r.boil_off)
            .set("trub_loss", r.trub_loss)
            .set("dead_space", r.dead_space)
    }

    fn update_columns(r: &Self::UpdateRequest) -> Columns {
        Columns::new()
            .set_if("name", r.name.clone())
            .set_if("description", r.description.clone())
            .set_if("efficiency", r.efficiency)
            .set_if("batch_volume", r.batch_volume)
            .set_if("batch_time", r.batch_time)
            .set_if("boil_time", r.boil_time)
            .set_if("boil_temperature", r.boil_temperature)
            .set_if("boil_off", r.boil_off)
            .set_if("trub_loss", r.trub_loss)
            .set_if("dead_space", r.dead_space)
    }
}
