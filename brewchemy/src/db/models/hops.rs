//! Database models for hops.

use rust_decimal::Decimal;
use sqlx::FromRow;

use crate::db::handlers::{catalog::CatalogItem, columns::Columns};
use crate::types::{HopId, UserId};

#[derive(Debug, Clone)]
pub struct HopCreateDBRequest {
    pub user_id: UserId,
    pub name: String,
    pub supplier: Option<String>,
    pub alpha_acid_content: Option<Decimal>,
    pub beta_acid_content: Option<Decimal>,
    pub r#type: Option<String>,
    pub country_of_origin: Option<String>,
    pub description: Option<String>,
    pub use_type: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct HopUpdateDBRequest {
    pub name: Option<String>,
    pub supplier: Option<Option<String>>,
    pub alpha_acid_content: Option<Option<Decimal>>,
    pub beta_acid_content: Option<Option<Decimal>>,
    pub r#type: Option<Option<String>>,
    pub country_of_origin: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub use_type: Option<Option<String>>,
}

#[derive(Debug, Clone, FromRow)]
pub struct HopDBResponse {
    pub id: HopId,
    pub official_id: Option<HopId>,
    pub user_id: UserId,
    pub name: String,
    pub supplier: Option<String>,
    pub alpha_acid_content: Option<Decimal>,
    pub beta_acid_content: Option<Decimal>,
    #[sqlx(rename = "type")]
    pub r#type: Option<String>,
    pub country_of_origin: Option<String>,
    pub description: Option<String>,
    pub use_type: Option<String>,
}

impl CatalogItem for HopDBResponse {
    const TABLE: &'static str = "hops";
    const LABEL: &'static str = "Hop";
    const DATA_COLUMNS: &'static [&'static str] = &[
        "name",
        "supplier",
        "alpha_acid_content",
        "beta_acid_content",
        "type",
        "country_of_origin",
        "description",
        "use_type",
    ];

    type CreateRequest = HopCreateDBRequest;
    type UpdateRequest = HopUpdateDBRequest;

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
            .set("supplier", r.supplier.clone())
            .set("alpha_acid_content", r.alpha_acid_content)
            .set("beta_acid_content", r.beta_acid_content)
            .set("type", r.r#type.clone())
            .set("country_of_origin", r.country_of_origin.clone())
            .set("description", r.description.clone())
            .set("use_type", r.use_type.clone())
    }

    fn update_columns(r: &Self::UpdateRequest) -> Columns {
        Columns::new()
            .set_if("name", r.name.clone())
            .set_if("supplier", r.supplier.clone())
            .set_if("alpha_acid_content", r.alpha_acid_content)
            .set_if("beta_acid_content", r.beta_acid_content)
            .set_if("type", r.r#type.clone())
            .set_if("country_of_origin", r.country_of_origin.clone())
            .set_if("description", r.description.clone())
            .set_if("use_type", r.use_type.clone())
    }
}
