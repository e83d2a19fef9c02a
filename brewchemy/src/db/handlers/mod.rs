//! Repository implementations for database access.
//!
//! Each repository wraps a borrowed `PgConnection` (a pooled connection or a transaction) and
//! returns models from [`crate::db::models`]. The listable ones implement [`Repository`].
//!
//! - [`Users`]: accounts, credentials and preferences
//! - [`Catalog`]: the inventory tables, one generic implementation of the official/personal
//!   ownership model, aliased per table ([`Equipments`], [`Fermentables`], [`Hops`], [`Miscs`],
//!   [`Yeasts`])
//! - [`Recipes`]: recipe aggregates and child reconciliation
//!
//! ```ignore
//! let mut tx = pool.begin().await?;
//! let mut hops = Hops::new(&mut tx);
//! let outcome = hops.update_for_user(id, user_id, official_user_id, &request).await?;
//! tx.commit().await?;
//! ```

pub mod catalog;
pub mod columns;
pub mod recipes;
pub mod repository;
pub mod users;

use crate::db::models::{
    equipments::EquipmentDBResponse, fermentables::FermentableDBResponse, hops::HopDBResponse, miscs::MiscDBResponse,
    yeasts::YeastDBResponse,
};

pub use catalog::{Catalog, CatalogFilter, CatalogItem, DeleteOutcome, UpdateOutcome};
pub use recipes::{RecipeFilter, Recipes};
pub use repository::Repository;
pub use users::Users;

pub type Equipments<'c> = Catalog<'c, EquipmentDBResponse>;
pub type Fermentables<'c> = Catalog<'c, FermentableDBResponse>;
pub type Hops<'c> = Catalog<'c, HopDBResponse>;
pub type Miscs<'c> = Catalog<'c, MiscDBResponse>;
pub type Yeasts<'c> = Catalog<'c, YeastDBResponse>;
