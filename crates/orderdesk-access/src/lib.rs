//! # OrderDesk Access
//!
//! Decides which project-scoped rows a request may see.
//!
//! - [`membership`]: Resolves a principal to its [`ProjectSet`]
//! - [`scope`]: Filters resources by project intersection
//!
//! # Example
//!
//! ```ignore
//! use orderdesk_access::{resolve_memberships, scoped_fetch};
//!
//! let projects = resolve_memberships(&state.db, &ctx.principal).await?;
//! let warehouses = scoped_fetch(&projects, |ids| WarehouseService::list_in(&state.db, ids)).await?;
//! ```

pub mod membership;
pub mod scope;

pub use membership::{MembershipStore, ProjectSet, resolve_memberships};
pub use scope::{ProjectScoped, is_visible, scoped_fetch, scoped_fetch_one, visible};
