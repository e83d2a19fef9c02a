//! Database record models matching table schemas.
//!
//! Models derive `sqlx::FromRow` and are kept separate from the API models in
//! [`crate::api::models`], which own the wire format (camelCase, validation). Conversions go from
//! the API types into `*DBRequest`s and from `*DBResponse`s back out.
//!
//! The inventory models also describe their columns for the generic catalog repository by
//! implementing [`crate::db::handlers::CatalogItem`]; recipe children do the same through
//! [`recipes::RecipeChild`].

pub mod equipments;
pub mod fermentables;
pub mod hops;
pub mod miscs;
pub mod recipes;
pub mod users;
pub mod yeasts;
