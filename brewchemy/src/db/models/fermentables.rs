//! Database models for fermentables.

use rust_decimal::Decimal;
use sqlx::FromRow;

use crate::db::handlers::{catalog::CatalogItem, columns::Columns};
use crate::types::{FermentableId, UserId};

#[derive(Debug, Clone)]
pub struct FermentableCreateDBRequest {
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub ebc: Option<Decimal>,
    pub potential_extract: Decimal,
    pub r#type: String,
    pub stock_quantity: Option<i32>,
    pub supplier: Option<String>,
    pub unit_price: Option<Decimal>,
}

#[derive(Debug, Clone, Default)]
pub struct FermentableUpdateDBRequest {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub ebc: Option<Option<Decimal>>,
    pub potential_extract: Option<Decimal>,
    pub r#type: Option<String>,
    pub stock_quantity: Option<Option<i32>>,
    pub supplier: Option<Option<String>>,
    pub unit_price: Option<Option<Decimal>>,
}

#[derive(Debug, Clone, FromRow)]
pub struct FermentableDBResponse {
    pub id: FermentableId,
    pub official_id: Option<FermentableId>,
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub ebc: Option<Decimal>,
    pub potential_extract: Decimal,
    #[sqlx(rename = "type")]
    pub r#type: String,
    pub stock_quantity: Option<i32>,
    pub supplier: Option<String>,
    pub unit_price: Option<Decimal>,
}

impl CatalogItem for FermentableDBResponse {
    const TABLE: &'static str = "fermentables";
    const LABEL: &'static str = "Fermentable";
    const DATA_COLUMNS: &'static [&'static str] = &[
        "name",
        "description",
        "ebc",
        "potential_extract",
        "type",
        "stock_quantity",
        "supplier",
        "unit_price",
    ];

    type CreateRequest = FermentableCreateDBRequest;
    type UpdateRequest = FermentableUpdateDBRequest;

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
            .set("ebc", r.ebc)
            .set("potential_extract", r.potential_extract)
            .set("type", r.r#type.clone())
            .set("stock_quantity", r.stock_quantity)
            .set("supplier", r.supplier.clone())
            .set("unit_price", r.unit_price)
    }

    fn update_columns(r: &Self::UpdateRequest) -> Columns {
        Columns::new()
            .set_if("name", r.name.clone())
            .set_if("description", r.description.clone())
            .set_if("ebc", r.ebc)
            .set_if("potential_extract", r.potential_extract)
            .set_if("type", r.r#type.clone())
            .set_if("stock_quantity", r.stock_quantity)
            .set_if("supplier", r.supplier.clone())
            .set_if("unit_price", r.unit_price)
    }
}
