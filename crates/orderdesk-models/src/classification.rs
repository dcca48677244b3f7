//! Order types, classes and statuses. Shared reference data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct OrderType {
    pub id: i64,
    pub type_name: String,
    pub lookup_code: String,
    pub is_inbound: bool,
    pub is_outbound: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOrderTypeDto {
    #[validate(length(min = 1, max = 100))]
    pub type_name: String,
    #[validate(length(min = 1, max = 50))]
    pub lookup_code: String,
    #[serde(default)]
    pub is_inbound: bool,
    #[serde(default)]
    pub is_outbound: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateOrderTypeDto {
    #[validate(length(min = 1, max = 100))]
    pub type_name: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub lookup_code: Option<String>,
    pub is_inbound: Option<bool>,
    pub is_outbound: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct OrderClass {
    pub id: i64,
    pub class_name: String,
    pub lookup_code: String,
    #[sqlx(rename = "order_type_id")]
    pub order_type: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOrderClassDto {
    #[validate(length(min = 1, max = 100))]
    pub class_name: String,
    #[validate(length(min = 1, max = 50))]
    pub lookup_code: String,
    pub order_type: Option<i64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateOrderClassDto {
    #[validate(length(min = 1, max = 100))]
    pub class_name: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub lookup_code: Option<String>,
    pub order_type: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct OrderStatus {
    pub id: i64,
    pub status_name: String,
    pub lookup_code: String,
    /// Entering this status triggers the CSV export
    pub is_terminal: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOrderStatusDto {
    #[validate(length(min = 1, max = 100))]
    pub status_name: String,
    #[validate(length(min = 1, max = 50))]
    pub lookup_code: String,
    #[serde(default)]
    pub is_terminal: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateOrderStatusDto {
    #[validate(length(min = 1, max = 100))]
    pub status_name: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub lookup_code: Option<String>,
    pub is_terminal: Option<bool>,
}
