//! API request/response models for yeasts.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::common::{require_at_most, require_non_blank};
use crate::api::handlers::catalog::CatalogResource;
use crate::db::models::yeasts::{YeastCreateDBRequest, YeastDBResponse, YeastUpdateDBRequest};
use crate::errors::Result;
use crate::types::{UserId, YeastId};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct YeastCreate {
    pub name: String,
    pub manufacturer: Option<String>,
    /// Ale, Lager, Wheat, ...
    #[serde(rename = "type")]
    pub r#type: Option<String>,
    /// Dry or Liquid
    pub form: Option<String>,
    /// Apparent attenuation, percent
    pub attenuation: Option<Decimal>,
    /// Free text, e.g. "18-22°C"
    pub temperature_range: Option<String>,
    pub flavor_profile: Option<String>,
    pub flocculation: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct YeastUpdate {
    pub name: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub manufacturer: Option<Option<String>>,
    #[serde(default, rename = "type", with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub r#type: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub form: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<f64>)]
    pub attenuation: Option<Option<Decimal>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub temperature_range: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub flavor_profile: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub flocculation: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct YeastResponse {
    pub id: YeastId,
    pub official_id: Option<YeastId>,
    pub user_id: UserId,
    pub name: String,
    pub manufacturer: Option<String>,
    #[serde(rename = "type")]
    pub r#type: Option<String>,
    pub form: Option<String>,
    pub attenuation: Option<Decimal>,
    pub temperature_range: Option<String>,
    pub flavor_profile: Option<String>,
    pub flocculation: Option<String>,
    pub description: Option<String>,
}

impl From<YeastDBResponse> for YeastResponse {
    fn from(db: YeastDBResponse) -> Self {
        Self {
            id: db.id,
            official_id: db.official_id,
            user_id: db.user_id,
            name: db.name,
            manufacturer: db.manufacturer,
            r#type: db.r#type,
            form: db.form,
            attenuation: db.attenuation,
            temperature_range: db.temperature_range,
            flavor_profile: db.flavor_profile,
            flocculation: db.flocculation,
            description: db.description,
        }
    }
}

impl CatalogResource for YeastDBResponse {
    type Create = YeastCreate;
    type Update = YeastUpdate;
    type Response = YeastResponse;

    fn create_request(body: YeastCreate, user_id: UserId) -> Result<YeastCreateDBRequest> {
        require_non_blank("name", &body.name)?;
        require_at_most("attenuation", body.attenuation, Decimal::from(100))?;
        Ok(YeastCreateDBRequest {
            user_id,
            name: body.name,
            manufacturer: body.manufacturer,
            r#type: body.r#type,
            form: body.form,
            attenuation: body.attenuation,
            temperature_range: body.temperature_range,
            flavor_profile: body.flavor_profile,
            flocculation: body.flocculation,
            description: body.description,
        })
    }

    fn update_request(body: YeastUpdate) -> Result<YeastUpdateDBRequest> {
        if let Some(name) = &body.name {
            require_non_blank("name", name)?;
        }
        require_at_most("attenuation", body.attenuation.flatten(), Decimal::from(100))?;
        Ok(YeastUpdateDBRequest {
            name: body.name,
            manufacturer: body.manufacturer,
            r#type: body.r#type,
            form: body.form,
            attenuation: body.attenuation,
            temperature_range: body.temperature_range,
            flavor_profile: body.flavor_profile,
            flocculation: body.flocculation,
            description: body.description,
        })
    }
}
