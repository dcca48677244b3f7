//! Request extractors.
//!
//! - [`auth`]: Resolves the caller's identity once per request
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::{Identity, RequireUser};
//!
//! // Anonymous callers are allowed and see only what anonymous may see
//! async fn list_orders(State(state): State<AppState>, Identity(ctx): Identity) { /* ... */ }
//!
//! // Anonymous callers get 401
//! async fn list_addresses(RequireUser(user): RequireUser) { /* ... */ }
//! ```

pub mod auth;
