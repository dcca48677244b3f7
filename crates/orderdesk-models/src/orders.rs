//! Orders and order lines.
//!
//! An order belongs to exactly one project; its lines inherit its visibility.

use chrono::{DateTime, NaiveDate, Utc};
use orderdesk_access::ProjectScoped;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Status assigned to orders created without one.
pub const DEFAULT_ORDER_STATUS_LOOKUP: &str = "01_created";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Order {
    pub id: i64,
    pub lookup_code_order: Option<String>,
    pub lookup_code_shipment: Option<String>,
    pub reference_number: Option<String>,
    #[sqlx(rename = "order_type_id")]
    pub order_type: i64,
    #[sqlx(rename = "order_class_id")]
    pub order_class: Option<i64>,
    #[sqlx(rename = "project_id")]
    pub project: i64,
    #[sqlx(rename = "warehouse_id")]
    pub warehouse: Option<i64>,
    #[sqlx(rename = "contact_id")]
    pub contact: Option<i64>,
    #[sqlx(rename = "shipping_address_id")]
    pub shipping_address: Option<i64>,
    #[sqlx(rename = "billing_address_id")]
    pub billing_address: Option<i64>,
    #[sqlx(rename = "carrier_id")]
    pub carrier: Option<i64>,
    #[sqlx(rename = "service_type_id")]
    pub service_type: Option<i64>,
    pub expected_delivery_date: Option<NaiveDate>,
    pub delivery_date: Option<NaiveDate>,
    pub notes: Option<String>,
    #[sqlx(rename = "order_status_id")]
    pub order_status: i64,
    pub order_status_name: String,
    pub file_generated: bool,
    pub file_generated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProjectScoped for Order {
    fn scope_id(&self) -> i64 {
        self.id
    }

    fn project_ids(&self) -> &[i64] {
        std::slice::from_ref(&self.project)
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOrderDto {
    /// Generated as `ORD-<id>` when omitted
    #[validate(length(min = 1, max = 50))]
    pub lookup_code_order: Option<String>,
    #[validate(length(max = 50))]
    pub lookup_code_shipment: Option<String>,
    #[validate(length(max = 50))]
    pub reference_number: Option<String>,
    pub order_type: i64,
    pub order_class: Option<i64>,
    pub project: i64,
    pub warehouse: Option<i64>,
    pub contact: Option<i64>,
    pub shipping_address: Option<i64>,
    pub billing_address: Option<i64>,
    pub carrier: Option<i64>,
    pub service_type: Option<i64>,
    pub expected_delivery_date: Option<NaiveDate>,
    pub delivery_date: Option<NaiveDate>,
    pub notes: Option<String>,
    /// Defaults to the `01_created` status
    pub order_status: Option<i64>,
}

/// Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateOrderDto {
    #[validate(length(min = 1, max = 50))]
    pub lookup_code_order: Option<String>,
    #[validate(length(max = 50))]
    pub lookup_code_shipment: Option<String>,
    #[validate(length(max = 50))]
    pub reference_number: Option<String>,
    pub order_type: Option<i64>,
    pub order_class: Option<i64>,
    pub project: Option<i64>,
    pub warehouse: Option<i64>,
    pub contact: Option<i64>,
    pub shipping_address: Option<i64>,
    pub billing_address: Option<i64>,
    pub carrier: Option<i64>,
    pub service_type: Option<i64>,
    pub expected_delivery_date: Option<NaiveDate>,
    pub delivery_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub order_status: Option<i64>,
}

/// The fields written to an order's CSV file.
#[derive(Debug, Clone, FromRow)]
pub struct OrderExportRow {
    pub id: i64,
    pub lookup_code_order: Option<String>,
    pub type_name: String,
    pub status_name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderExportResponse {
    pub order_id: i64,
    pub file_name: String,
    pub file_generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct OrderLine {
    pub id: i64,
    #[sqlx(rename = "order_id")]
    pub order: i64,
    #[sqlx(rename = "material_id")]
    pub material: i64,
    pub quantity: i32,
    pub lot: Option<String>,
    pub license_plate: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOrderLineDto {
    pub order: i64,
    pub material: i64,
    #[validate(range(min = 1))]
    pub quantity: i32,
    #[validate(length(max = 100))]
    pub lot: Option<String>,
    #[validate(length(max = 100))]
    pub license_plate: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateOrderLineDto {
    pub material: Option<i64>,
    #[validate(range(min = 1))]
    pub quantity: Option<i32>,
    #[validate(length(max = 100))]
    pub lot: Option<String>,
    #[validate(length(max = 100))]
    pub license_plate: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClearOrderLinesResponse {
    pub order_id: i64,
    pub deleted: u64,
}
