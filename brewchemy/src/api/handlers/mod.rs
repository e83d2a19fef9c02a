//! HTTP request handlers for all API endpoints.
//!
//! Handlers validate the request, run it against the database repositories and map the result to
//! a response. Protected handlers take a [`crate::auth::current_user::CurrentUser`]; failures come
//! back as [`crate::errors::Error`], which renders as `{"message": ...}` with a matching status.
//!
//! # Handler Modules
//!
//! - [`users`]: Registration, login, Google sign-in, email confirmation, password reset, profile
//! - [`equipments`], [`fermentables`], [`hops`], [`miscs`], [`yeasts`]: Inventory, all built on
//!   [`catalog`]
//! - [`recipes`]: Recipe aggregates and copies
//! - [`critique`]: Recipe critiques from a chat model
//! - [`health`]: Liveness

pub mod catalog;
pub mod critique;
pub mod equipments;
pub mod fermentables;
pub mod health;
pub mod hops;
pub mod miscs;
pub mod recipes;
pub mod users;
pub mod yeasts;
