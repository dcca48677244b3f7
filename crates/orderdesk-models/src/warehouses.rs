//! Warehouses. Visible through any of their projects.

use chrono::{DateTime, Utc};
use orderdesk_access::ProjectScoped;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Warehouse {
    pub id: i64,
    pub name: String,
    pub lookup_code: String,
    #[sqlx(rename = "address_id")]
    pub address: Option<i64>,
    /// Associated project ids, ascending
    pub projects: Vec<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProjectScoped for Warehouse {
    fn scope_id(&self) -> i64 {
        self.id
    }

    fn project_ids(&self) -> &[i64] {
        &self.projects
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateWarehouseDto {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    pub lookup_code: String,
    pub address: Option<i64>,
    /// Must name at least one project the caller belongs to
    #[validate(length(min = 1))]
    pub projects: Vec<i64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateWarehouseDto {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub lookup_code: Option<String>,
    pub address: Option<i64>,
    /// Replaces the caller's own project links when present
    pub projects: Option<Vec<i64>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_warehouse_requires_a_project() {
        let dto: CreateWarehouseDto =
            serde_json::from_str(r#"{"name":"Main","lookup_code":"WH1","projects":[]}"#).unwrap();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_warehouse_serializes_address_field_name() {
        let warehouse = Warehouse {
            id: 1,
            name: "Main".to_string(),
            lookup_code: "WH1".to_string(),
            address: Some(4),
            projects: vec![1, 2],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&warehouse).unwrap();
        assert_eq!(json["address"], 4);
        assert_eq!(json["projects"], serde_json::json!([1, 2]));
    }
}
