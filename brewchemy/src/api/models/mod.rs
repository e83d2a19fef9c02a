//! API request and response data models.
//!
//! These types define the public JSON contract. They are distinct from the database models in
//! [`crate::db::models`], so storage can change without breaking clients.
//!
//! - Field names are camelCase on the wire (`batchVolume`, `potentialExtract`, `recipeHops`).
//! - Numeric columns travel as JSON numbers.
//! - Update payloads distinguish an omitted field (left alone) from `null` (cleared) using
//!   `serde_with`'s double option.
//! - Business validation (blank names, negative quantities, ranges) happens when converting into a
//!   `*DBRequest` and surfaces as 400. Structural problems (a missing required field, a string
//!   where a number belongs) are rejected earlier by the JSON extractor.
//!
//! ```ignore
//! use brewchemy::api::models::hops::{HopCreate, HopResponse};
//!
//! let body: HopCreate = serde_json::from_str(r#"{"name": "Cascade", "alphaAcidContent": 5.5}"#)?;
//! ```

pub mod common;
pub mod critique;
pub mod equipments;
pub mod fermentables;
pub mod hops;
pub mod miscs;
pub mod recipes;
pub mod users;
pub mod yeasts;
