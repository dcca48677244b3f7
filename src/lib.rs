//! # OrderDesk API
//!
//! A multi-tenant order management REST API built with Axum and PostgreSQL.
//!
//! ## Tenancy
//!
//! Users belong to projects. Warehouses and carriers are linked to one or
//! more projects, orders to exactly one, and order lines follow their order.
//! Every read of those resources is filtered to the caller's memberships:
//!
//! - an anonymous caller, or one presenting an invalid token, gets `[]`
//! - a record outside the caller's projects is reported as 404
//! - addresses, contacts and the order catalogues are shared, but need a
//!   signed-in caller
//!
//! ## Authentication
//!
//! A JWT access token is read from `Authorization: Bearer <token>`, or from
//! the `access_token` cookie when no `Authorization` header is sent. Login
//! sets both the access and refresh cookies.
//!
//! ## Layout
//!
//! ```text
//! crates/
//! ├── orderdesk-core/     # AppError, password hashing
//! ├── orderdesk-config/   # Environment-driven configuration
//! ├── orderdesk-db/       # Pool and migrations
//! ├── orderdesk-auth/     # Credential extraction, JWT, principal resolution
//! ├── orderdesk-access/   # Project memberships and scoped queries
//! └── orderdesk-models/   # Entities and DTOs
//! src/
//! ├── cli/                # Administrative commands
//! ├── middleware/         # Identity extractors
//! ├── modules/            # controller / service / router per resource
//! └── utils/              # Shared handler helpers
//! ```
//!
//! ## Modules
//!
//! - [`cli`]: Operations behind `orderdesk-cli`
//! - [`docs`]: OpenAPI document
//! - [`logging`]: Tracing setup and request logging
//! - [`metrics`]: Prometheus metrics
//! - [`middleware`]: Identity extractors
//! - [`modules`]: Feature modules
//! - [`router`]: Application router
//! - [`state`]: Shared application state
//! - [`utils`]: Handler helpers
//! - [`validator`]: JSON body validation

pub mod cli;
pub mod docs;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;

pub use orderdesk_access;
pub use orderdesk_auth;
pub use orderdesk_config;
pub use orderdesk_core;
pub use orderdesk_db;
pub use orderdesk_models;
