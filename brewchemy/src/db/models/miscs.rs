//! Database models for miscellaneous ingredients (finings, salts, spices...).

use sqlx::FromRow;

use crate::db::handlers::{catalog::CatalogItem, columns::Columns};
use crate::types::{MiscId, UserId};

#[derive(Debug, Clone)]
pub struct MiscCreateDBRequest {
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub r#type: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct MiscUpdateDBRequest {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub r#type: Option<Option<String>>,
}

#[derive(Debug, Clone, FromRow)]
pub struct MiscDBResponse {
    pub id: MiscId,
    pub official_id: Option<MiscId>,
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,
    #[sqlx(rename = "type")]
    pub r#type: Option<String>,
}

impl CatalogItem for MiscDBResponse {
    const TABLE: &'static str = "misc";
    const LABEL: &'static str = "Misc";
    const DATA_COLUMNS: &'static [&'static str] = &["name", "description", "type"];

    type CreateRequest = MiscCreateDBRequest;
    type UpdateRequest = MiscUpdateDBRequest;

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
            .set("type", r.r#type.clone())
    }

    fn update_columns(r: &Self::UpdateRequest) -> Columns {
        Columns::new()
            .set_if("name", r.name.clone())
            .set_if("description", r.description.clone())
            .set_if("type", r.r#type.clone())
    }
}
