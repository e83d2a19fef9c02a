//! API request/response models for hops.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::common::{require_at_most, require_non_blank};
use crate::api::handlers::catalog::CatalogResource;
use crate::db::models::hops::{HopCreateDBRequest, HopDBResponse, HopUpdateDBRequest};
use crate::errors::Result;
use crate::types::{HopId, UserId};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HopCreate {
    pub name: String,
    pub supplier: Option<String>,
    pub alpha_acid_content: Option<Decimal>,
    pub beta_acid_content: Option<Decimal>,
    #[serde(rename = "type")]
    pub r#type: Option<String>,
    pub country_of_origin: Option<String>,
    pub description: Option<String>,
    pub use_type: Option<String>,
}

/// Omitted fields are left alone; `null` clears a nullable field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HopUpdate {
    pub name: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub supplier: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<f64>)]
    pub alpha_acid_content: Option<Option<Decimal>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<f64>)]
    pub beta_acid_content: Option<Option<Decimal>>,
    #[serde(default, rename = "type", with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub r#type: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub country_of_origin: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub use_type: Option<Option<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HopResponse {
    pub id: HopId,
    pub official_id: Option<HopId>,
    pub user_id: UserId,
    pub name: String,
    pub supplier: Option<String>,
    pub alpha_acid_content: Option<Decimal>,
    pub beta_acid_content: Option<Decimal>,
    #[serde(rename = "type")]
    pub r#type: Option<String>,
    pub country_of_origin: Option<String>,
    pub description: Option<String>,
    pub use_type: Option<String>,
}

impl From<HopDBResponse> for HopResponse {
    fn from(db: HopDBResponse) -> Self {
        Self {
            id: db.id,
            official_id: db.official_id,
            user_id: db.user_id,
            name: db.name,
            supplier: db.supplier,
            alpha_acid_content: db.alpha_acid_content,
            beta_acid_content: db.beta_acid_content,
            r#type: db.r#type,
            country_of_origin: db.country_of_origin,
            description: db.description,
            use_type: db.use_type,
        }
    }
}

fn check_acids(alpha: Option<Decimal>, beta: Option<Decimal>) -> Result<()> {
    require_at_most("alphaAcidContent", alpha, Decimal::from(30))?;
    require_at_most("betaAcidContent", beta, Decimal::from(30))
}

impl CatalogResource for HopDBResponse {
    type Create = HopCreate;
    type Update = HopUpdate;
    type Response = HopResponse;

    fn create_request(body: HopCreate, user_id: UserId) -> Result<HopCreateDBRequest> {
        require_non_blank("name", &body.name)?;
        check_acids(body.alpha_acid_content, body.beta_acid_content)?;
        Ok(HopCreateDBRequest {
            user_id,
            name: body.name,
            supplier: body.supplier,
            alpha_acid_content: body.alpha_acid_content,
            beta_acid_content: body.beta_acid_content,
            r#type: body.r#type,
            country_of_origin: body.country_of_origin,
            description: body.description,
            use_type: body.use_type,
        })
    }

    fn update_request(body: HopUpdate) -> Result<HopUpdateDBRequest> {
        if let Some(name) = &body.name {
            require_non_blank("name", name)?;
        }
        check_acids(body.alpha_acid_content.flatten(), body.beta_acid_content.flatten())?;
        Ok(HopUpdateDBRequest {
            name: body.name,
            supplier: body.supplier,
            alpha_acid_content: body.alpha_acid_content,
            beta_acid_content: body.beta_acid_content,
            r#type: body.r#type,
            country_of_origin: body.country_of_origin,
            description: body.description,
            use_type: body.use_type,
        })
    }
}
