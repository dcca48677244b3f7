use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Contact {
    pub id: i64,
    pub company_name: String,
    pub contact_name: String,
    pub attention: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub title: Option<String>,
    pub notes: Option<String>,
    /// Linked address ids
    pub addresses: Vec<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateContactDto {
    #[serde(default)]
    #[validate(length(max = 255))]
    pub company_name: String,
    #[validate(length(min = 1, max = 255))]
    pub contact_name: String,
    pub attention: Option<String>,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 50))]
    pub mobile: Option<String>,
    #[validate(length(max = 100))]
    pub title: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub addresses: Vec<i64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateContactDto {
    #[validate(length(max = 255))]
    pub company_name: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub contact_name: Option<String>,
    pub attention: Option<String>,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 50))]
    pub mobile: Option<String>,
    #[validate(length(max = 100))]
    pub title: Option<String>,
    pub notes: Option<String>,
    /// Replaces the linked addresses when present
    pub addresses: Option<Vec<i64>>,
}
