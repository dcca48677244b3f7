use chrono::{DateTime, Utc};
use orderdesk_access::ProjectScoped;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub lookup_code: String,
    pub description: Option<String>,
    /// Member user ids
    pub users: Vec<i64>,
    /// Linked contact ids
    pub contacts: Vec<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A project is visible to its own members.
impl ProjectScoped for Project {
    fn scope_id(&self) -> i64 {
        self.id
    }

    fn project_ids(&self) -> &[i64] {
        std::slice::from_ref(&self.id)
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectDto {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    pub lookup_code: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddContactDto {
    #[validate(range(min = 1))]
    pub contact_id: i64,
}
