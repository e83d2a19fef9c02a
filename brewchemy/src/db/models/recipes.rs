//! Database models for recipes and their ingredient rows.
//!
//! A recipe owns at most one equipment snapshot and any number of fermentable, hop, misc and yeast
//! rows. Child rows are copies of inventory data taken when the recipe was written, so later edits
//! to the inventory never change a recipe.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{FromRow, postgres::PgRow};

use crate::db::handlers::columns::Columns;
use crate::types::{RecipeId, UserId};

/// A table holding rows that belong to a recipe.
pub trait RecipeChild: for<'r> FromRow<'r, PgRow> + Send + Sync + Unpin + 'static {
    const TABLE: &'static str;
    /// Data columns, i.e. everything except `id`, `recipe_id` and `user_id`
    const DATA_COLUMNS: &'static [&'static str];

    /// Incoming row. Fields left `None` are `NULL` on insert and unchanged on update.
    type Input: Send + Sync;

    fn id(&self) -> i32;
    fn recipe_id(&self) -> RecipeId;
    fn input_id(input: &Self::Input) -> Option<i32>;
    fn columns(input: &Self::Input) -> Columns;
}

#[derive(Debug, Clone, Default)]
pub struct RecipeEquipmentInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub efficiency: Option<Decimal>,
    pub batch_volume: Option<Decimal>,
    pub batch_time: Option<i32>,
    pub boil_time: Option<i32>,
    pub boil_temperature: Option<Decimal>,
    pub boil_off: Option<Decimal>,
    pub trub_loss: Option<Decimal>,
    pub dead_space: Option<Decimal>,
}

#[derive(Debug, Clone, FromRow)]
pub struct RecipeEquipmentRow {
    pub id: i32,
    pub recipe_id: RecipeId,
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub efficiency: Decimal,
    pub batch_volume: Decimal,
    pub batch_time: Option<i32>,
    pub boil_time: i32,
    pub boil_temperature: Decimal,
    pub boil_off: Option<Decimal>,
    pub trub_loss: Option<Decimal>,
    pub dead_space: Option<Decimal>,
}

impl RecipeChild for RecipeEquipmentRow {
    const TABLE: &'static str = "recipe_equipment";
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
    type Input = RecipeEquipmentInput;

    fn id(&self) -> i32 {
        self.id
    }

    fn recipe_id(&self) -> RecipeId {
        self.recipe_id
    }

    fn input_id(_: &Self::Input) -> Option<i32> {
        None
    }

    fn columns(i: &Self::Input) -> Columns {
        Columns::new()
            .set("name", i.name.clone())
            .set("description", i.description.clone())
            .set("efficiency", i.efficiency)
            .set("batch_volume", i.batch_volume)
            .set("batch_time", i.batch_time)
            .set("boil_time", i.boil_time)
            .set("boil_temperature", i.boil_temperature)
            .set("boil_off", i.boil_off)
            .set("trub_loss", i.trub_loss)
            .set("dead_space", i.dead_space)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecipeFermentableInput {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub ebc: Option<Decimal>,
    pub potential_extract: Option<Decimal>,
    pub r#type: Option<String>,
    pub supplier: Option<String>,
    pub unit_price: Option<Decimal>,
    pub quantity: Option<Decimal>,
}

#[derive(Debug, Clone, FromRow)]
pub struct RecipeFermentableRow {
    pub id: i32,
    pub recipe_id: RecipeId,
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub ebc: Decimal,
    pub potential_extract: Decimal,
    #[sqlx(rename = "type")]
    pub r#type: String,
    pub supplier: Option<String>,
    pub unit_price: Option<Decimal>,
    pub quantity: Decimal,
}

impl RecipeChild for RecipeFermentableRow {
    const TABLE: &'static str = "recipe_fermentables";
    const DATA_COLUMNS: &'static [&'static str] = &[
        "name",
        "description",
        "ebc",
        "potential_extract",
        "type",
        "supplier",
        "unit_price",
        "quantity",
    ];
    type Input = RecipeFermentableInput;

    fn id(&self) -> i32 {
        self.id
    }

    fn recipe_id(&self) -> RecipeId {
        self.recipe_id
    }

    fn input_id(i: &Self::Input) -> Option<i32> {
        i.id
    }

    fn columns(i: &Self::Input) -> Columns {
        Columns::new()
            .set("name", i.name.clone())
            .set("description", i.description.clone())
            .set("ebc", i.ebc)
            .set("potential_extract", i.potential_extract)
            .set("type", i.r#type.clone())
            .set("supplier", i.supplier.clone())
            .set("unit_price", i.unit_price)
            .set("quantity", i.quantity)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecipeHopInput {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub alpha_acid_content: Option<Decimal>,
    pub beta_acid_content: Option<Decimal>,
    pub r#type: Option<String>,
    pub use_type: Option<String>,
    pub country_of_origin: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<Decimal>,
    pub boil_time: Option<i32>,
    pub usage_stage: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct RecipeHopRow {
    pub id: i32,
    pub recipe_id: RecipeId,
    pub user_id: UserId,
    pub name: String,
    pub alpha_acid_content: Option<Decimal>,
    pub beta_acid_content: Option<Decimal>,
    #[sqlx(rename = "type")]
    pub r#type: Option<String>,
    pub use_type: Option<String>,
    pub country_of_origin: Option<String>,
    pub description: Option<String>,
    pub quantity: Decimal,
    pub boil_time: Option<i32>,
    pub usage_stage: Option<String>,
}

impl RecipeChild for RecipeHopRow {
    const TABLE: &'static str = "recipe_hops";
    const DATA_COLUMNS: &'static [&'static str] = &[
        "name",
        "alpha_acid_content",
        "beta_acid_content",
        "type",
        "use_type",
        "country_of_origin",
        "description",
        "quantity",
        "boil_time",
        "usage_stage",
    ];
    type Input = RecipeHopInput;

    fn id(&self) -> i32 {
        self.id
    }

    fn recipe_id(&self) -> RecipeId {
        self.recipe_id
    }

    fn input_id(i: &Self::Input) -> Option<i32> {
        i.id
    }

    fn columns(i: &Self::Input) -> Columns {
        Columns::new()
            .set("name", i.name.clone())
            .set("alpha_acid_content", i.alpha_acid_content)
            .set("beta_acid_content", i.beta_acid_content)
            .set("type", i.r#type.clone())
            .set("use_type", i.use_type.clone())
            .set("country_of_origin", i.country_of_origin.clone())
            .set("description", i.description.clone())
            .set("quantity", i.quantity)
            .set("boil_time", i.boil_time)
            .set("usage_stage", i.usage_stage.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecipeMiscInput {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub r#type: Option<String>,
    pub quantity: Option<Decimal>,
    pub r#use: Option<String>,
    pub time: Option<i32>,
}

#[derive(Debug, Clone, FromRow)]
pub struct RecipeMiscRow {
    pub id: i32,
    pub recipe_id: RecipeId,
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,
    #[sqlx(rename = "type")]
    pub r#type: Option<String>,
    pub quantity: Decimal,
    #[sqlx(rename = "use")]
    pub r#use: Option<String>,
    pub time: Option<i32>,
}

impl RecipeChild for RecipeMiscRow {
    const TABLE: &'static str = "recipe_misc";
    const DATA_COLUMNS: &'static [&'static str] = &["name", "description", "type", "quantity", "use", "time"];
    type Input = RecipeMiscInput;

    fn id(&self) -> i32 {
        self.id
    }

    fn recipe_id(&self) -> RecipeId {
        self.recipe_id
    }

    fn input_id(i: &Self::Input) -> Option<i32> {
        i.id
    }

    fn columns(i: &Self::Input) -> Columns {
        Columns::new()
            .set("name", i.name.clone())
            .set("description", i.description.clone())
            .set("type", i.r#type.clone())
            .set("quantity", i.quantity)
            .set("use", i.r#use.clone())
            .set("time", i.time)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecipeYeastInput {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub manufacturer: Option<String>,
    pub r#type: Option<String>,
    pub form: Option<String>,
    pub attenuation: Option<Decimal>,
    pub temperature_range: Option<String>,
    pub flavor_profile: Option<String>,
    pub flocculation: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<Decimal>,
}

#[derive(Debug, Clone, FromRow)]
pub struct RecipeYeastRow {
    pub id: i32,
    pub recipe_id: RecipeId,
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
    pub quantity: Option<Decimal>,
}

impl RecipeChild for RecipeYeastRow {
    const TABLE: &'static str = "recipe_yeasts";
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
        "quantity",
    ];
    type Input = RecipeYeastInput;

    fn id(&self) -> i32 {
        self.id
    }

    fn recipe_id(&self) -> RecipeId {
        self.recipe_id
    }

    fn input_id(i: &Self::Input) -> Option<i32> {
        i.id
    }

    fn columns(i: &Self::Input) -> Columns {
        Columns::new()
            .set("name", i.name.clone())
            .set("manufacturer", i.manufacturer.clone())
            .set("type", i.r#type.clone())
            .set("form", i.form.clone())
            .set("attenuation", i.attenuation)
            .set("temperature_range", i.temperature_range.clone())
            .set("flavor_profile", i.flavor_profile.clone())
            .set("flocculation", i.flocculation.clone())
            .set("description", i.description.clone())
            .set("quantity", i.quantity)
    }
}

/// Database request for creating a recipe with all of its children
#[derive(Debug, Clone)]
pub struct RecipeCreateDBRequest {
    pub user_id: UserId,
    pub name: String,
    pub style: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub author: String,
    pub r#type: String,
    pub equipment: Option<RecipeEquipmentInput>,
    pub fermentables: Vec<RecipeFermentableInput>,
    pub hops: Vec<RecipeHopInput>,
    pub misc: Vec<RecipeMiscInput>,
    pub yeasts: Vec<RecipeYeastInput>,
}

/// Database request for updating a recipe.
///
/// Each child list replaces the stored collection: matching ids are updated, new rows inserted,
/// and rows missing from the list deleted. An empty list clears the collection. `equipment` is
/// only written when present.
#[derive(Debug, Clone, Default)]
pub struct RecipeUpdateDBRequest {
    pub name: Option<String>,
    pub style: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub notes: Option<Option<String>>,
    pub author: Option<String>,
    pub r#type: Option<String>,
    pub equipment: Option<RecipeEquipmentInput>,
    pub fermentables: Vec<RecipeFermentableInput>,
    pub hops: Vec<RecipeHopInput>,
    pub misc: Vec<RecipeMiscInput>,
    pub yeasts: Vec<RecipeYeastInput>,
}

impl RecipeUpdateDBRequest {
    pub(crate) fn parent_columns(&self) -> Columns {
        Columns::new()
            .set_if("name", self.name.clone())
            .set_if("style", self.style.clone())
            .set_if("description", self.description.clone())
            .set_if("notes", self.notes.clone())
            .set_if("author", self.author.clone())
            .set_if("type", self.r#type.clone())
    }
}

/// Database response for a recipe, children included
#[derive(Debug, Clone, FromRow)]
pub struct RecipeDBResponse {
    pub id: RecipeId,
    pub user_id: UserId,
    pub name: String,
    pub style: Option<String>,
    pub description: Option<String>,
    pub creation_date: NaiveDate,
    pub notes: Option<String>,
    pub author: String,
    #[sqlx(rename = "type")]
    pub r#type: String,
    #[sqlx(skip)]
    pub equipment: Option<RecipeEquipmentRow>,
    #[sqlx(skip)]
    pub fermentables: Vec<RecipeFermentableRow>,
    #[sqlx(skip)]
    pub hops: Vec<RecipeHopRow>,
    #[sqlx(skip)]
    pub misc: Vec<RecipeMiscRow>,
    #[sqlx(skip)]
    pub yeasts: Vec<RecipeYeastRow>,
}
