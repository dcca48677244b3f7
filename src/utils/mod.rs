//! Helpers shared by the resource modules.
//!
//! - [`auth_helpers`]: Authentication and project membership checks
//! - [`db_errors`]: Mapping of constraint violations to client errors
//! - [`project_links`]: Maintenance of resource-to-project join tables

pub mod auth_helpers;
pub mod db_errors;
pub mod project_links;
