//! API layer for HTTP request handling and data models.
//!
//! This module contains the REST API implementation, organized into:
//!
//! - **[`handlers`]**: Axum route handlers for all API endpoints
//! - **[`models`]**: Request/response data structures for API communication
//!
//! # API Structure
//!
//! - **Users** (`/api/users/*`): registration, login, Google sign-in, password reset, profile
//! - **Inventory** (`/api/equipments`, `/api/fermentables`, `/api/hops`, `/api/misc`,
//!   `/api/yeasts`): personal ingredients on top of the shared official catalog
//! - **Recipes** (`/api/recipes/*`): recipes with their ingredient rows
//! - **Health** (`/health`)
//!
//! # OpenAPI Documentation
//!
//! All endpoints are documented with OpenAPI annotations using `utoipa`. The document is served at
//! `/api/openapi.json` and rendered at `/api/docs`.

pub mod handlers;
pub mod models;
