//! CSV export of a single order to the import share.
//!
//! Writes `order_<lookup code>.csv` with a header row and one data row:
//!
//! ```text
//! lookup_code_order,order_type,order_status
//! ORD-000042,Outbound,Submitted
//! ```
//!
//! and then stamps the order with `file_generated = true` and the time.

use std::fmt::Write as _;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use orderdesk_config::ExportConfig;
use orderdesk_core::AppError;
use orderdesk_models::{OrderExportResponse, OrderExportRow};
use sqlx::PgPool;
use tracing::{error, info, instrument};

use crate::metrics::track_order_export;

const HEADER: [&str; 3] = ["lookup_code_order", "order_type", "order_status"];

pub struct OrderExporter;

impl OrderExporter {
    /// `order_<lookup code>.csv`, refusing codes that could escape the
    /// export directory.
    pub fn file_name(lookup_code: &str) -> Result<String, AppError> {
        let safe = !lookup_code.is_empty()
            && lookup_code != "."
            && lookup_code != ".."
            && lookup_code
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !safe {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Lookup code cannot be used as a file name"
            )));
        }
        Ok(format!("order_{lookup_code}.csv"))
    }

    pub fn render_csv(lookup_code: &str, row: &OrderExportRow) -> String {
        let mut csv = String::new();
        write_record(&mut csv, &HEADER);
        write_record(
            &mut csv,
            &[lookup_code, row.type_name.as_str(), row.status_name.as_str()],
        );
        csv
    }

    /// Writes the file and marks the order as exported.
    #[instrument(skip(db, config))]
    pub async fn export(
        db: &PgPool,
        config: &ExportConfig,
        order_id: i64,
    ) -> Result<OrderExportResponse, AppError> {
        let result = Self::write_and_mark(db, config, order_id).await;
        match &result {
            Ok(response) => {
                info!(order_id, file = %response.file_name, "Order exported");
                track_order_export(true);
            }
            Err(e) => {
                error!(order_id, error = %e.message(), "Order export failed");
                track_order_export(false);
            }
        }
        result
    }

    async fn write_and_mark(
        db: &PgPool,
        config: &ExportConfig,
        order_id: i64,
    ) -> Result<OrderExportResponse, AppError> {
        let row = sqlx::query_as::<_, OrderExportRow>(
            r#"SELECT o.id, o.lookup_code_order, t.type_name, s.status_name
               FROM orders o
               JOIN order_types t ON t.id = o.order_type_id
               JOIN order_statuses s ON s.id = o.order_status_id
               WHERE o.id = $1"#,
        )
        .bind(order_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Order not found")))?;

        let lookup_code = row.lookup_code_order.as_deref().ok_or_else(|| {
            AppError::bad_request(anyhow::anyhow!("Order has no lookup code"))
        })?;
        let file_name = Self::file_name(lookup_code)?;
        let path: PathBuf = config.directory.join(&file_name);

        tokio::fs::create_dir_all(&config.directory).await?;
        tokio::fs::write(&path, Self::render_csv(lookup_code, &row)).await?;

        let file_generated_at = sqlx::query_scalar::<_, DateTime<Utc>>(
            r#"UPDATE orders
               SET file_generated = TRUE, file_generated_at = NOW()
               WHERE id = $1
               RETURNING file_generated_at"#,
        )
        .bind(order_id)
        .fetch_one(db)
        .await?;

        Ok(OrderExportResponse {
            order_id,
            file_name,
            file_generated_at,
        })
    }
}

/// One CSV record terminated by CRLF, quoting fields that need it.
fn write_record(out: &mut String, fields: &[&str]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        if field.contains([',', '"', '\r', '\n']) {
            let _ = write!(out, "\"{}\"", field.replace('"', "\"\""));
        } else {
            out.push_str(field);
        }
    }
    out.push_str("\r\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(type_name: &str, status_name: &str) -> OrderExportRow {
        OrderExportRow {
            id: 42,
            lookup_code_order: Some("ORD-000042".to_string()),
            type_name: type_name.to_string(),
            status_name: status_name.to_string(),
        }
    }

    #[test]
    fn test_render_csv_layout() {
        let csv = OrderExporter::render_csv("ORD-000042", &row("Outbound", "Submitted"));
        assert_eq!(
            csv,
            "lookup_code_order,order_type,order_status\r\nORD-000042,Outbound,Submitted\r\n"
        );
    }

    #[test]
    fn test_render_csv_quotes_special_fields() {
        let csv = OrderExporter::render_csv("A1", &row("Inbound, returns", "Say \"hi\""));
        let data = csv.lines().nth(1).unwrap();
        assert_eq!(data, r#"A1,"Inbound, returns","Say ""hi""""#);
    }

    #[test]
    fn test_file_name() {
        assert_eq!(
            OrderExporter::file_name("ORD-000042").unwrap(),
            "order_ORD-000042.csv"
        );
    }

    #[test]
    fn test_file_name_rejects_path_components() {
        for bad in ["", "..", "../etc/passwd", "a/b", r"a\b", "with space"] {
            assert!(OrderExporter::file_name(bad).is_err(), "{bad:?}");
        }
    }
}
