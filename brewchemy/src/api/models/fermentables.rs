//! API request/response models for fermentables (malts, sugars, adjuncts).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::common::{require_at_most, require_non_blank, require_non_negative};
use crate::api::handlers::catalog::CatalogResource;
use crate::db::models::fermentables::{FermentableCreateDBRequest, FermentableDBResponse, FermentableUpdateDBRequest};
use crate::errors::Result;
use crate::types::{FermentableId, UserId};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FermentableCreate {
    pub name: String,
    pub description: Option<String>,
    /// Color, EBC
    pub ebc: Option<Decimal>,
    pub potential_extract: Decimal,
    /// e.g. Base, Specialty, Adjunct
    #[serde(rename = "type")]
    pub r#type: String,
    pub stock_quantity: Option<i32>,
    pub supplier: Option<String>,
    pub unit_price: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FermentableUpdate {
    pub name: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<f64>)]
    pub ebc: Option<Option<Decimal>>,
    pub potential_extract: Option<Decimal>,
    #[serde(rename = "type")]
    pub r#type: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<i32>)]
    pub stock_quantity: Option<Option<i32>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub supplier: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<f64>)]
    pub unit_price: Option<Option<Decimal>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FermentableResponse {
    pub id: FermentableId,
    pub official_id: Option<FermentableId>,
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub ebc: Option<Decimal>,
    pub potential_extract: Decimal,
    #[serde(rename = "type")]
    pub r#type: String,
    pub stock_quantity: Option<i32>,
    pub supplier: Option<String>,
    pub unit_price: Option<Decimal>,
}

impl From<FermentableDBResponse> for FermentableResponse {
    fn from(db: FermentableDBResponse) -> Self {
        Self {
            id: db.id,
            official_id: db.official_id,
            user_id: db.user_id,
            name: db.name,
            description: db.description,
            ebc: db.ebc,
            potential_extract: db.potential_extract,
            r#type: db.r#type,
            stock_quantity: db.stock_quantity,
            supplier: db.supplier,
            unit_price: db.unit_price,
        }
    }
}

fn check_numbers(ebc: Option<Decimal>, potential_extract: Option<Decimal>, unit_price: Option<Decimal>) -> Result<()> {
    require_non_negative("ebc", ebc)?;
    require_at_most("potentialExtract", potential_extract, Decimal::from(2))?;
    require_non_negative("unitPrice", unit_price)
}

impl CatalogResource for FermentableDBResponse {
    type Create = FermentableCreate;
    type Update = FermentableUpdate;
    type Response = FermentableResponse;

    fn create_request(body: FermentableCreate, user_id: UserId) -> Result<FermentableCreateDBRequest> {
        require_non_blank("name", &body.name)?;
        require_non_blank("type", &body.r#type)?;
        check_numbers(body.ebc, Some(body.potential_extract), body.unit_price)?;
        Ok(FermentableCreateDBRequest {
            user_id,
            name: body.name,
            description: body.description,
            ebc: body.ebc,
            potential_extract: body.potential_extract,
            r#type: body.r#type,
            stock_quantity: body.stock_quantity,
            supplier: body.supplier,
            unit_price: body.unit_price,
        })
    }

    fn update_request(body: FermentableUpdate) -> Result<FermentableUpdateDBRequest> {
        if let Some(name) = &body.name {
            require_non_blank("name", name)?;
        }
        if let Some(r#type) = &body.r#type {
            require_non_blank("type", r#type)?;
        }
        check_numbers(body.ebc.flatten(), body.potential_extract, body.unit_price.flatten())?;
        Ok(FermentableUpdateDBRequest {
            name: body.name,
            description: body.description,
            ebc: body.ebc,
            potential_extract: body.potential_extract,
            r#type: body.r#type,
            stock_quantity: body.stock_quantity,
            supplier: body.supplier,
            unit_price: body.unit_price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_names() {
        let body: FermentableCreate = serde_json::from_value(json!({
            "name": "Pilsner Malt",
            "ebc": 3.5,
            "potentialExtract": 1.037,
            "type": "Base",
            "unitPrice": 2.10
        }))
        .unwrap();
        let request = FermentableDBResponse::create_request(body, 3).unwrap();
        assert_eq!(request.potential_extract, Decimal::new(1037, 3));
        assert_eq!(request.r#type, "Base");
    }

    #[test]
    fn test_potential_extract_bounds() {
        let update = FermentableUpdate {
            potential_extract: Some(Decimal::new(25, 1)),
            ..Default::default()
        };
        let err = FermentableDBResponse::update_request(update).unwrap_err();
        assert_eq!(err.user_message(), "potentialExtract must be between 0 and 2");
    }
}
