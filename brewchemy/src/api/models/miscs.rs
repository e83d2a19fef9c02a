//! API request/response models for miscellaneous ingredients (spices, finings, water agents).

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::common::require_non_blank;
use crate::api::handlers::catalog::CatalogResource;
use crate::db::models::miscs::{MiscCreateDBRequest, MiscDBResponse, MiscUpdateDBRequest};
use crate::errors::Result;
use crate::types::{MiscId, UserId};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MiscCreate {
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub r#type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MiscUpdate {
    pub name: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, rename = "type", with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub r#type: Option<Option<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MiscResponse {
    pub id: MiscId,
    pub official_id: Option<MiscId>,
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub r#type: Option<String>,
}

impl From<MiscDBResponse> for MiscResponse {
    fn from(db: MiscDBResponse) -> Self {
        Self {
            id: db.id,
            official_id: db.official_id,
            user_id: db.user_id,
            name: db.name,
            description: db.description,
            r#type: db.r#type,
        }
    }
}

impl CatalogResource for MiscDBResponse {
    type Create = MiscCreate;
    type Update = MiscUpdate;
    type Response = MiscResponse;

    fn create_request(body: MiscCreate, user_id: UserId) -> Result<MiscCreateDBRequest> {
        require_non_blank("name", &body.name)?;
        Ok(MiscCreateDBRequest {
            user_id,
            name: body.name,
            description: body.description,
            r#type: body.r#type,
        })
    }

    fn update_request(body: MiscUpdate) -> Result<MiscUpdateDBRequest> {
        if let Some(name) = &body.name {
            require_non_blank("name", name)?;
        }
        Ok(MiscUpdateDBRequest {
            name: body.name,
            description: body.description,
            r#type: body.r#type,
        })
    }
}
