//! API request/response models for recipes.
//!
//! Child rows travel inside the recipe as `recipeEquipment` (a single object) and the
//! `recipeFermentables`, `recipeHops`, `recipeMisc` and `recipeYeasts` lists. On update, a child
//! carrying the `id` of an existing row is merged into it; any other child is inserted. Equipment
//! has no id: an update overwrites the recipe's equipment row or creates it.

use std::collections::HashSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::common::{require_at_most, require_non_blank, require_non_negative};
use crate::db::models::recipes::{
    RecipeCreateDBRequest, RecipeDBResponse, RecipeEquipmentInput, RecipeEquipmentRow, RecipeFermentableInput,
    RecipeFermentableRow, RecipeHopInput, RecipeHopRow, RecipeMiscInput, RecipeMiscRow, RecipeUpdateDBRequest,
    RecipeYeastInput, RecipeYeastRow,
};
use crate::errors::{Error, Result};
use crate::types::{RecipeId, UserId};

/// A child row in a request body.
trait ChildBody {
    type Input;

    /// Check the body. `inserting` is true when the row will be created rather than merged into an
    /// existing one, so required columns must be present.
    fn check(&self, field: &str, inserting: bool) -> Result<()>;
    fn into_input(self) -> Self::Input;
    fn id(&self) -> Option<i32>;
}

fn require_present<V>(field: &str, name: &str, value: &Option<V>) -> Result<()> {
    if value.is_none() {
        return Err(Error::bad_request(format!("{field}.{name} is required")));
    }
    Ok(())
}

fn check_name(field: &str, name: &Option<String>, inserting: bool) -> Result<()> {
    match name {
        Some(name) => require_non_blank(&format!("{field}.name"), name),
        None if inserting => require_present(field, "name", name),
        None => Ok(()),
    }
}

fn convert_all<B: ChildBody>(field: &str, items: Vec<B>) -> Result<Vec<B::Input>> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .map(|item| {
            if let Some(id) = item.id()
                && !seen.insert(id)
            {
                return Err(Error::bad_request(format!("{field} lists id {id} more than once")));
            }
            item.check(field, item.id().is_none())?;
            Ok(item.into_input())
        })
        .collect()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeEquipmentBody {
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

impl ChildBody for RecipeEquipmentBody {
    type Input = RecipeEquipmentInput;

    fn check(&self, field: &str, inserting: bool) -> Result<()> {
        check_name(field, &self.name, inserting)?;
        if inserting {
            require_present(field, "efficiency", &self.efficiency)?;
            require_present(field, "batchVolume", &self.batch_volume)?;
            require_present(field, "boilTime", &self.boil_time)?;
            require_present(field, "boilTemperature", &self.boil_temperature)?;
        }
        require_non_negative(&format!("{field}.efficiency"), self.efficiency)?;
        require_non_negative(&format!("{field}.batchVolume"), self.batch_volume)?;
        require_non_negative(&format!("{field}.batchTime"), self.batch_time)?;
        require_non_negative(&format!("{field}.boilTime"), self.boil_time)?;
        require_at_most(&format!("{field}.boilTemperature"), self.boil_temperature, Decimal::from(100))?;
        require_non_negative(&format!("{field}.boilOff"), self.boil_off)?;
        require_non_negative(&format!("{field}.trubLoss"), self.trub_loss)?;
        require_non_negative(&format!("{field}.deadSpace"), self.dead_space)
    }

    fn into_input(self) -> RecipeEquipmentInput {
        RecipeEquipmentInput {
            name: self.name,
            description: self.description,
            efficiency: self.efficiency,
            batch_volume: self.batch_volume,
            batch_time: self.batch_time,
            boil_time: self.boil_time,
            boil_temperature: self.boil_temperature,
            boil_off: self.boil_off,
            trub_loss: self.trub_loss,
            dead_space: self.dead_space,
        }
    }

    fn id(&self) -> Option<i32> {
        None
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeFermentableBody {
    /// Existing row to merge into
    pub id: Option<i32>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub ebc: Option<Decimal>,
    pub potential_extract: Option<Decimal>,
    #[serde(rename = "type")]
    pub r#type: Option<String>,
    pub supplier: Option<String>,
    pub unit_price: Option<Decimal>,
    /// Kilograms
    pub quantity: Option<Decimal>,
}

impl ChildBody for RecipeFermentableBody {
    type Input = RecipeFermentableInput;

    fn check(&self, field: &str, inserting: bool) -> Result<()> {
        check_name(field, &self.name, inserting)?;
        if inserting {
            require_present(field, "ebc", &self.ebc)?;
            require_present(field, "potentialExtract", &self.potential_extract)?;
            require_present(field, "type", &self.r#type)?;
            require_present(field, "quantity", &self.quantity)?;
        }
        require_non_negative(&format!("{field}.ebc"), self.ebc)?;
        require_at_most(&format!("{field}.potentialExtract"), self.potential_extract, Decimal::from(2))?;
        require_non_negative(&format!("{field}.unitPrice"), self.unit_price)?;
        require_non_negative(&format!("{field}.quantity"), self.quantity)
    }

    fn into_input(self) -> RecipeFermentableInput {
        RecipeFermentableInput {
            id: self.id,
            name: self.name,
            description: self.description,
            ebc: self.ebc,
            potential_extract: self.potential_extract,
            r#type: self.r#type,
            supplier: self.supplier,
            unit_price: self.unit_price,
            quantity: self.quantity,
        }
    }

    fn id(&self) -> Option<i32> {
        self.id
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeHopBody {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub alpha_acid_content: Option<Decimal>,
    pub beta_acid_content: Option<Decimal>,
    #[serde(rename = "type")]
    pub r#type: Option<String>,
    pub use_type: Option<String>,
    pub country_of_origin: Option<String>,
    pub description: Option<String>,
    /// Grams
    pub quantity: Option<Decimal>,
    /// Minutes
    pub boil_time: Option<i32>,
    /// e.g. Boil, Whirlpool, Dry Hop
    pub usage_stage: Option<String>,
}

impl ChildBody for RecipeHopBody {
    type Input = RecipeHopInput;

    fn check(&self, field: &str, inserting: bool) -> Result<()> {
        check_name(field, &self.name, inserting)?;
        if inserting {
            require_present(field, "quantity", &self.quantity)?;
        }
        require_at_most(&format!("{field}.alphaAcidContent"), self.alpha_acid_content, Decimal::from(30))?;
        require_at_most(&format!("{field}.betaAcidContent"), self.beta_acid_content, Decimal::from(30))?;
        require_non_negative(&format!("{field}.quantity"), self.quantity)?;
        require_non_negative(&format!("{field}.boilTime"), self.boil_time)
    }

    fn into_input(self) -> RecipeHopInput {
        RecipeHopInput {
            id: self.id,
            name: self.name,
            alpha_acid_content: self.alpha_acid_content,
            beta_acid_content: self.beta_acid_content,
            r#type: self.r#type,
            use_type: self.use_type,
            country_of_origin: self.country_of_origin,
            description: self.description,
            quantity: self.quantity,
            boil_time: self.boil_time,
            usage_stage: self.usage_stage,
        }
    }

    fn id(&self) -> Option<i32> {
        self.id
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeMiscBody {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub r#type: Option<String>,
    pub quantity: Option<Decimal>,
    /// e.g. Boil, Mash, Secondary
    #[serde(rename = "use")]
    pub r#use: Option<String>,
    /// Minutes
    pub time: Option<i32>,
}

impl ChildBody for RecipeMiscBody {
    type Input = RecipeMiscInput;

    fn check(&self, field: &str, inserting: bool) -> Result<()> {
        check_name(field, &self.name, inserting)?;
        if inserting {
            require_present(field, "quantity", &self.quantity)?;
        }
        require_non_negative(&format!("{field}.quantity"), self.quantity)?;
        require_non_negative(&format!("{field}.time"), self.time)
    }

    fn into_input(self) -> RecipeMiscInput {
        RecipeMiscInput {
            id: self.id,
            name: self.name,
            description: self.description,
            r#type: self.r#type,
            quantity: self.quantity,
            r#use: self.r#use,
            time: self.time,
        }
    }

    fn id(&self) -> Option<i32> {
        self.id
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeYeastBody {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub manufacturer: Option<String>,
    #[serde(rename = "type")]
    pub r#type: Option<String>,
    pub form: Option<String>,
    pub attenuation: Option<Decimal>,
    pub temperature_range: Option<String>,
    pub flavor_profile: Option<String>,
    pub flocculation: Option<String>,
    pub description: Option<String>,
    /// Packs, or grams for dry yeast
    pub quantity: Option<Decimal>,
}

impl ChildBody for RecipeYeastBody {
    type Input = RecipeYeastInput;

    fn check(&self, field: &str, inserting: bool) -> Result<()> {
        check_name(field, &self.name, inserting)?;
        require_at_most(&format!("{field}.attenuation"), self.attenuation, Decimal::from(100))?;
        require_non_negative(&format!("{field}.quantity"), self.quantity)
    }

    fn into_input(self) -> RecipeYeastInput {
        RecipeYeastInput {
            id: self.id,
            name: self.name,
            manufacturer: self.manufacturer,
            r#type: self.r#type,
            form: self.form,
            attenuation: self.attenuation,
            temperature_range: self.temperature_range,
            flavor_profile: self.flavor_profile,
            flocculation: self.flocculation,
            description: self.description,
            quantity: self.quantity,
        }
    }

    fn id(&self) -> Option<i32> {
        self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeCreate {
    pub name: String,
    pub style: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub author: Option<String>,
    /// e.g. All Grain, Extract, Partial Mash
    #[serde(rename = "type")]
    pub r#type: String,
    pub recipe_equipment: Option<RecipeEquipmentBody>,
    #[serde(default)]
    pub recipe_fermentables: Vec<RecipeFermentableBody>,
    #[serde(default)]
    pub recipe_hops: Vec<RecipeHopBody>,
    #[serde(default)]
    pub recipe_misc: Vec<RecipeMiscBody>,
    #[serde(default)]
    pub recipe_yeasts: Vec<RecipeYeastBody>,
}

impl RecipeCreate {
    pub fn into_db_request(self, user_id: UserId) -> Result<RecipeCreateDBRequest> {
        require_non_blank("name", &self.name)?;
        require_non_blank("type", &self.r#type)?;

        let equipment = match self.recipe_equipment {
            Some(body) => {
                body.check("recipeEquipment", true)?;
                Some(body.into_input())
            }
            None => None,
        };

        // Ids are meaningless on a new recipe; every child is inserted.
        let strip = |id: &mut Option<i32>| *id = None;
        let mut fermentables = self.recipe_fermentables;
        fermentables.iter_mut().for_each(|f| strip(&mut f.id));
        let mut hops = self.recipe_hops;
        hops.iter_mut().for_each(|h| strip(&mut h.id));
        let mut misc = self.recipe_misc;
        misc.iter_mut().for_each(|m| strip(&mut m.id));
        let mut yeasts = self.recipe_yeasts;
        yeasts.iter_mut().for_each(|y| strip(&mut y.id));

        Ok(RecipeCreateDBRequest {
            user_id,
            name: self.name,
            style: self.style,
            description: self.description,
            notes: self.notes,
            author: self.author.unwrap_or_default(),
            r#type: self.r#type,
            equipment,
            fermentables: convert_all("recipeFermentables", fermentables)?,
            hops: convert_all("recipeHops", hops)?,
            misc: convert_all("recipeMisc", misc)?,
            yeasts: convert_all("recipeYeasts", yeasts)?,
        })
    }
}

/// Partial recipe update.
///
/// Each child list replaces the stored collection: rows whose `id` is missing from the list are
/// deleted. An omitted list counts as `[]` and removes them all. `recipeEquipment`, when present,
/// overwrites the stored equipment row field by field, `null`s included.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeUpdate {
    pub name: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub style: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub notes: Option<Option<String>>,
    pub author: Option<String>,
    #[serde(rename = "type")]
    pub r#type: Option<String>,
    pub recipe_equipment: Option<RecipeEquipmentBody>,
    pub recipe_fermentables: Option<Vec<RecipeFermentableBody>>,
    pub recipe_hops: Option<Vec<RecipeHopBody>>,
    pub recipe_misc: Option<Vec<RecipeMiscBody>>,
    pub recipe_yeasts: Option<Vec<RecipeYeastBody>>,
}

impl RecipeUpdate {
    pub fn into_db_request(self) -> Result<RecipeUpdateDBRequest> {
        if let Some(name) = &self.name {
            require_non_blank("name", name)?;
        }
        if let Some(r#type) = &self.r#type {
            require_non_blank("type", r#type)?;
        }

        let equipment = match self.recipe_equipment {
            Some(body) => {
                // The stored row is replaced wholesale, so the body must be complete
                body.check("recipeEquipment", true)?;
                Some(body.into_input())
            }
            None => None,
        };

        Ok(RecipeUpdateDBRequest {
            name: self.name,
            style: self.style,
            description: self.description,
            notes: self.notes,
            author: self.author,
            r#type: self.r#type,
            equipment,
            fermentables: convert_all("recipeFermentables", self.recipe_fermentables.unwrap_or_default())?,
            hops: convert_all("recipeHops", self.recipe_hops.unwrap_or_default())?,
            misc: convert_all("recipeMisc", self.recipe_misc.unwrap_or_default())?,
            yeasts: convert_all("recipeYeasts", self.recipe_yeasts.unwrap_or_default())?,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeCopyRequest {
    /// Account receiving the copy. Defaults to the caller.
    pub target_user_id: Option<UserId>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeEquipmentResponse {
    pub id: i32,
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

impl From<RecipeEquipmentRow> for RecipeEquipmentResponse {
    fn from(row: RecipeEquipmentRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            efficiency: row.efficiency,
            batch_volume: row.batch_volume,
            batch_time: row.batch_time,
            boil_time: row.boil_time,
            boil_temperature: row.boil_temperature,
            boil_off: row.boil_off,
            trub_loss: row.trub_loss,
            dead_space: row.dead_space,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeFermentableResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub ebc: Decimal,
    pub potential_extract: Decimal,
    #[serde(rename = "type")]
    pub r#type: String,
    pub supplier: Option<String>,
    pub unit_price: Option<Decimal>,
    pub quantity: Decimal,
}

impl From<RecipeFermentableRow> for RecipeFermentableResponse {
    fn from(row: RecipeFermentableRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            ebc: row.ebc,
            potential_extract: row.potential_extract,
            r#type: row.r#type,
            supplier: row.supplier,
            unit_price: row.unit_price,
            quantity: row.quantity,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeHopResponse {
    pub id: i32,
    pub name: String,
    pub alpha_acid_content: Option<Decimal>,
    pub beta_acid_content: Option<Decimal>,
    #[serde(rename = "type")]
    pub r#type: Option<String>,
    pub use_type: Option<String>,
    pub country_of_origin: Option<String>,
    pub description: Option<String>,
    pub quantity: Decimal,
    pub boil_time: Option<i32>,
    pub usage_stage: Option<String>,
}

impl From<RecipeHopRow> for RecipeHopResponse {
    fn from(row: RecipeHopRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            alpha_acid_content: row.alpha_acid_content,
            beta_acid_content: row.beta_acid_content,
            r#type: row.r#type,
            use_type: row.use_type,
            country_of_origin: row.country_of_origin,
            description: row.description,
            quantity: row.quantity,
            boil_time: row.boil_time,
            usage_stage: row.usage_stage,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeMiscResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub r#type: Option<String>,
    pub quantity: Decimal,
    #[serde(rename = "use")]
    pub r#use: Option<String>,
    pub time: Option<i32>,
}

impl From<RecipeMiscRow> for RecipeMiscResponse {
    fn from(row: RecipeMiscRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            r#type: row.r#type,
            quantity: row.quantity,
            r#use: row.r#use,
            time: row.time,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeYeastResponse {
    pub id: i32,
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
    pub quantity: Option<Decimal>,
}

impl From<RecipeYeastRow> for RecipeYeastResponse {
    fn from(row: RecipeYeastRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            manufacturer: row.manufacturer,
            r#type: row.r#type,
            form: row.form,
            attenuation: row.attenuation,
            temperature_range: row.temperature_range,
            flavor_profile: row.flavor_profile,
            flocculation: row.flocculation,
            description: row.description,
            quantity: row.quantity,
        }
    }
}

/// A recipe with all of its children.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeResponse {
    pub id: RecipeId,
    pub user_id: UserId,
    pub name: String,
    pub style: Option<String>,
    pub description: Option<String>,
    pub creation_date: NaiveDate,
    pub notes: Option<String>,
    pub author: String,
    #[serde(rename = "type")]
    pub r#type: String,
    pub recipe_equipment: Option<RecipeEquipmentResponse>,
    pub recipe_fermentables: Vec<RecipeFermentableResponse>,
    pub recipe_hops: Vec<RecipeHopResponse>,
    pub recipe_misc: Vec<RecipeMiscResponse>,
    pub recipe_yeasts: Vec<RecipeYeastResponse>,
}

impl From<RecipeDBResponse> for RecipeResponse {
    fn from(db: RecipeDBResponse) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            name: db.name,
            style: db.style,
            description: db.description,
            creation_date: db.creation_date,
            notes: db.notes,
            author: db.author,
            r#type: db.r#type,
            recipe_equipment: db.equipment.map(Into::into),
            recipe_fermentables: db.fermentables.into_iter().map(Into::into).collect(),
            recipe_hops: db.hops.into_iter().map(Into::into).collect(),
            recipe_misc: db.misc.into_iter().map(Into::into).collect(),
            recipe_yeasts: db.yeasts.into_iter().map(Into::into).collect(),
        }
    }
}
