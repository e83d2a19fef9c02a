//! Database models for yeasts.

use rust_decimal::Decimal;
use sqlx::FromRow;

use crate::db::handlers::{catalog::CatalogItem, columns::Columns};
use crate::types::{UserId, YeastId};

#[derive(Debug, Clone)]
pub struct YeastCreateDBRequest {
    pub user_id: UserId,
    pub name: String,
    pub manufacturer: Option<String>,
    pub r#type: Option<String>,
    pub form: Option<String>,
    pub attenuation: Option<Decimal>,
    pub temperature_range: Option<String>,
    pub flavor_profile: Option<String>,
    pub flocculation: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct YeastUpdateDBRequest {
    pub name: Option<String>,
    pub manufacturer: Option<Option<String>>,
    pub r#type: Option<Option<String>>,
    pub form: Option<Option<String>>,
    pub attenuation: Option<Option<Decimal>>,
    pub temperature_range: Option<Option<String>>,
    pub flavor_profile: Option<Option<String>>,
    pub flocculation: Option<Option<String>>,
    pub description: Option<Option<String>>,
}

#[derive(Debug, Clone, FromRow)]
pub struct YeastDBResponse {
    pub id: YeastId,
    pub official_id: Option<YeastId>,
    pub user_id: UserId,
    pub name: String,
    pub manufacturer: Option<String>,
    #[sqlx(rename = "type")]
    pub r#type: Option<String>,
    pub form: Option<String>,
    pub attenuation: Option<Decimal>,
    pub temperature_range: Option<String>,
    pub flavor_profile: Option<String>,
    pub flocculation: Option<String>,
    pub description: Option<String>,
}

impl CatalogItem for YeastDBResponse {
    const TABLE: &'static str = "yeasts";
    const LABEL: &'static str = "Yeast";
    const DATA_COLUMNS: &'static [&'static str] = &[
        "name",
        "manufacturer",
        "type",
        "form",
        "attenuation",
        "temperature_range",
        "flavor_profile",
        "flocculation",
        "description",
    ];

    type CreateRequest = YeastCreateDBRequest;
    type UpdateRequest = YeastUpdateDBRequest;

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
            .set("manufacturer", r.manufacturer.clone())
            .set("type", r.r#type.clone())
            .set("form", r.form.clone())
            .set("attenuation", r.attenuation)
            .set("temperature_range", r.temperature_range.clone())
            .set("flavor_profile", r.flavor_profile.clone())
            .set("flocculation", r.flocculation.clone())
            .set("description", r.description.clone())
    }

    fn update_columns(r: &Self::UpdateRequest) -> Columns {
        Columns::new()
            .set_if("name", r.name.clone())
            .set_if("manufacturer", r.manufacturer.clone())
            .set_if("type", r.r#type.clone())
            .set_if("form", r.form.clone())
            .set_if("attenuation", r.attenuation)
            .set_if("temperature_range", r.temperature_range.clone())
            .set_if("flavor_profile", r.flavor_profile.clone())
            .set_if("flocculation", r.flocculation.clone())
            .set_if("description", r.description.clone())
    }
}
