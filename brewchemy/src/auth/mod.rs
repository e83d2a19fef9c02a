//! Authentication.
//!
//! Brewchemy authenticates API calls with a stateless bearer token:
//!
//! - Users log in with email and password at `/api/users/login`, or through Google at
//!   `/api/users/google/login`, and receive a signed access token.
//! - Protected handlers take a [`current_user::CurrentUser`] argument, which verifies the
//!   `Authorization: Bearer <token>` header.
//! - The same signing key issues short-lived link tokens for password resets and email
//!   confirmation. See [`session`].
//!
//! There is no refresh token and no revocation list; a token is valid until it expires.
//!
//! # Modules
//!
//! - [`current_user`]: the bearer extractor
//! - [`google`]: Google OAuth client
//! - [`password`]: Argon2 password hashing
//! - [`session`]: JWT creation and verification
//!
//! # Usage in Handlers
//!
//! ```ignore
//! use brewchemy::auth::current_user::CurrentUser;
//!
//! async fn protected_handler(current_user: CurrentUser) -> String {
//!     format!("Hello, user {}!", current_user.id)
//! }
//! ```

pub mod current_user;
pub mod google;
pub mod password;
pub mod session;
