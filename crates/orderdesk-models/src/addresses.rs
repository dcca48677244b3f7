use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Address {
    pub id: i64,
    pub entity_type: String,
    pub address_type: String,
    pub address_line_1: String,
    pub address_line_2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAddressDto {
    #[serde(default)]
    #[validate(length(max = 50))]
    pub entity_type: String,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub address_type: String,
    #[validate(length(min = 1, max = 255))]
    pub address_line_1: String,
    #[validate(length(max = 255))]
    pub address_line_2: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub city: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub state: String,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub postal_code: String,
    #[validate(length(min = 1, max = 100))]
    pub country: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAddressDto {
    #[validate(length(max = 50))]
    pub entity_type: Option<String>,
    #[validate(length(max = 50))]
    pub address_type: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub address_line_1: Option<String>,
    #[validate(length(max = 255))]
    pub address_line_2: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub city: Option<String>,
    #[validate(length(max = 100))]
    pub state: Option<String>,
    #[validate(length(max = 20))]
    pub postal_code: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub country: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_address_defaults_optional_text() {
        let dto: CreateAddressDto = serde_json::from_str(
            r#"{"address_line_1":"1 Dock Rd","city":"Rotterdam","country":"NL"}"#,
        )
        .unwrap();
        assert_eq!(dto.state, "");
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_create_address_requires_city() {
        let dto: CreateAddressDto = serde_json::from_str(
            r#"{"address_line_1":"1 Dock Rd","city":"","country":"NL"}"#,
        )
        .unwrap();
        assert!(dto.validate().is_err());
    }
}
