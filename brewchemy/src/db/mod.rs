//! Database layer for data persistence and access.
//!
//! Implemented with SQLx on PostgreSQL, following the Repository pattern:
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  (API request handlers)
//! └──────┬──────┘
//!        ↓
//! ┌─────────────┐
//! │ Repositories│  (db::handlers - queries and ownership rules)
//! └──────┬──────┘
//!        ↓
//! ┌─────────────┐
//! │   Models    │  (db::models - database records)
//! └──────┬──────┘
//!        ↓
//! ┌─────────────┐
//! │  PostgreSQL │
//! └─────────────┘
//! ```
//!
//! Repositories borrow a `PgConnection`, so callers choose between a pooled connection for reads
//! and a transaction for multi-statement writes:
//!
//! ```ignore
//! let mut tx = pool.begin().await?;
//! let mut recipes = Recipes::new(&mut tx);
//! let recipe = recipes.create(&request).await?;
//! tx.commit().await?;
//! ```
//!
//! Migrations live in `migrations/` and are applied through [`crate::migrator`].

pub mod errors;
pub mod handlers;
pub mod models;
