use chrono::{DateTime, Utc};
use orderdesk_access::ProjectScoped;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Carrier {
    pub id: i64,
    pub name: String,
    pub lookup_code: String,
    pub projects: Vec<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProjectScoped for Carrier {
    fn scope_id(&self) -> i64 {
        self.id
    }

    fn project_ids(&self) -> &[i64] {
        &self.projects
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCarrierDto {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    pub lookup_code: String,
    #[validate(length(min = 1))]
    pub projects: Vec<i64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCarrierDto {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub lookup_code: Option<String>,
    pub projects: Option<Vec<i64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CarrierService {
    pub id: i64,
    #[sqlx(rename = "carrier_id")]
    pub carrier: i64,
    pub name: String,
    pub lookup_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCarrierServiceDto {
    pub carrier: i64,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    pub lookup_code: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCarrierServiceDto {
    pub carrier: Option<i64>,
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub lookup_code: Option<String>,
}
