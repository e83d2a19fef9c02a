//! API request/response models for equipment profiles.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::common::{require_at_most, require_non_blank, require_non_negative};
use crate::api::handlers::catalog::CatalogResource;
use crate::db::models::equipments::{EquipmentCreateDBRequest, EquipmentDBResponse, EquipmentUpdateDBRequest};
use crate::errors::Result;
use crate::types::{EquipmentId, UserId};

/// A brewing system: volumes, losses and efficiency used by recipe calculations.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentCreate {
    pub name: String,
    pub description: Option<String>,
    /// Mash efficiency, percent
    pub efficiency: Decimal,
    /// Liters into the fermenter
    pub batch_volume: Decimal,
    /// Minutes
    pub batch_time: Option<i32>,
    /// Minutes
    pub boil_time: Option<i32>,
    pub boil_temperature: Decimal,
    /// Liters per hour
    pub boil_off: Option<Decimal>,
    pub trub_loss: Option<Decimal>,
    pub dead_space: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentUpdate {
    pub name: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    pub efficiency: Option<Decimal>,
    pub batch_volume: Option<Decimal>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<i32>)]
    pub batch_time: Option<Option<i32>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<i32>)]
    pub boil_time: Option<Option<i32>>,
    pub boil_temperature: Option<Decimal>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<f64>)]
    pub boil_off: Option<Option<Decimal>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<f64>)]
    pub trub_loss: Option<Option<Decimal>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<f64>)]
    pub dead_space: Option<Option<Decimal>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentResponse {
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

impl From<EquipmentDBResponse> for EquipmentResponse {
    fn from(db: EquipmentDBResponse) -> Self {
        Self {
            id: db.id,
            official_id: db.official_id,
            user_id: db.user_id,
            name: db.name,
            description: db.description,
            efficiency: db.efficiency,
            batch_volume: db.batch_volume,
            batch_time: db.batch_time,
            boil_time: db.boil_time,
            boil_temperature: db.boil_temperature,
            boil_off: db.boil_off,
            trub_loss: db.trub_loss,
            dead_space: db.dead_space,
            created_at: db.created_at,
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn check_numbers(
    efficiency: Option<Decimal>,
    batch_volume: Option<Decimal>,
    batch_time: Option<i32>,
    boil_time: Option<i32>,
    boil_temperature: Option<Decimal>,
    boil_off: Option<Decimal>,
    trub_loss: Option<Decimal>,
    dead_space: Option<Decimal>,
) -> Result<()> {
    require_non_negative("efficiency", efficiency)?;
    require_non_negative("batchVolume", batch_volume)?;
    require_non_negative("batchTime", batch_time)?;
    require_non_negative("boilTime", boil_time)?;
    require_at_most("boilTemperature", boil_temperature, Decimal::from(100))?;
    require_non_negative("boilOff", boil_off)?;
    require_non_negative("trubLoss", trub_loss)?;
    require_non_negative("deadSpace", dead_space)
}

impl CatalogResource for EquipmentDBResponse {
    type Create = EquipmentCreate;
    type Update = EquipmentUpdate;
    type Response = EquipmentResponse;

    fn create_request(body: EquipmentCreate, user_id: UserId) -> Result<EquipmentCreateDBRequest> {
        require_non_blank("name", &body.name)?;
        check_numbers(
            Some(body.efficiency),
            Some(body.batch_volume),
            body.batch_time,
            body.boil_time,
            Some(body.boil_temperature),
            body.boil_off,
            body.trub_loss,
            body.dead_space,
        )?;
        Ok(EquipmentCreateDBRequest {
            user_id,
            name: body.name,
            description: body.description,
            efficiency: body.efficiency,
            batch_volume: body.batch_volume,
            batch_time: body.batch_time,
            boil_time: body.boil_time,
            boil_temperature: body.boil_temperature,
            boil_off: body.boil_off,
            trub_loss: body.trub_loss,
            dead_space: body.dead_space,
        })
    }

    fn update_request(body: EquipmentUpdate) -> Result<EquipmentUpdateDBRequest> {
        if let Some(name) = &body.name {
            require_non_blank("name", name)?;
        }
        check_numbers(
            body.efficiency,
            body.batch_volume,
            body.batch_time.flatten(),
            body.boil_time.flatten(),
            body.boil_temperature,
            body.boil_off.flatten(),
            body.trub_loss.flatten(),
            body.dead_space.flatten(),
        )?;
        Ok(EquipmentUpdateDBRequest {
            name: body.name,
            description: body.description,
            efficiency: body.efficiency,
            batch_volume: body.batch_volume,
            batch_time: body.batch_time,
            boil_time: body.boil_time,
            boil_temperature: body.boil_temperature,
            boil_off: body.boil_off,
            trub_loss: body.trub_loss,
            dead_space: body.dead_space,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_required_field_fails_to_deserialize() {
        let result = serde_json::from_value::<EquipmentCreate>(json!({
            "name": "Grainfather G30",
            "efficiency": 72.5
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_numeric_validation() {
        let body: EquipmentCreate = serde_json::from_value(json!({
            "name": "Pot",
            "efficiency": 70,
            "batchVolume": 20,
            "boilTemperature": 100,
            "trubLoss": -0.5
        }))
        .unwrap();

        let err = EquipmentDBResponse::create_request(body, 1).unwrap_err();
        assert_eq!(err.user_message(), "trubLoss must not be negative");

        let update = EquipmentUpdate {
            boil_temperature: Some(Decimal::from(120)),
            ..Default::default()
        };
        assert!(EquipmentDBResponse::update_request(update).is_err());
    }
}
