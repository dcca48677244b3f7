//! Order CSV export configuration.
//!
//! - `ORDER_EXPORT_DIR`: directory (typically a mounted network share) that
//!   receives `order_<lookup code>.csv` files (default: `storage/exports`)

use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct ExportConfig {
    pub directory: PathBuf,
}

impl ExportConfig {
    pub fn from_env() -> Self {
        Self {
            directory: env::var("ORDER_EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("storage/exports")),
        }
    }
}
