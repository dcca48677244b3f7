use orderdesk_core::AppError;
use orderdesk_models::{Address, CreateAddressDto, UpdateAddressDto};
use sqlx::PgPool;
use tracing::instrument;

use crate::utils::db_errors::{map_delete_error, map_write_error};

const COLUMNS: &str = "id, entity_type, address_type, address_line_1, address_line_2, \
                       city, state, postal_code, country, created_at, updated_at";

pub struct AddressService;

impl AddressService {
    #[instrument(skip(db))]
    pub async fn list(db: &PgPool) -> Result<Vec<Address>, AppError> {
        let addresses =
            sqlx::query_as::<_, Address>(&format!("SELECT {COLUMNS} FROM addresses ORDER BY id"))
                .fetch_all(db)
                .await?;
        Ok(addresses)
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, id: i64) -> Result<Address, AppError> {
        sqlx::query_as::<_, Address>(&format!("SELECT {COLUMNS} FROM addresses WHERE id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Address not found")))
    }

    #[instrument(skip(db))]
    pub async fn create(db: &PgPool, dto: CreateAddressDto) -> Result<Address, AppError> {
        sqlx::query_as::<_, Address>(&format!(
            r#"INSERT INTO addresses (entity_type, address_type, address_line_1, address_line_2,
                   city, state, postal_code, country)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
               RETURNING {COLUMNS}"#
        ))
        .bind(&dto.entity_type)
        .bind(&dto.address_type)
        .bind(&dto.address_line_1)
        .bind(&dto.address_line_2)
        .bind(&dto.city)
        .bind(&dto.state)
        .bind(&dto.postal_code)
        .bind(&dto.country)
        .fetch_one(db)
        .await
        .map_err(|e| map_write_error(e, "Address already exists"))
    }

    #[instrument(skip(db))]
    pub async fn update(db: &PgPool, id: i64, dto: UpdateAddressDto) -> Result<Address, AppError> {
        let existing = Self::get(db, id).await?;

        sqlx::query_as::<_, Address>(&format!(
            r#"UPDATE addresses
               SET entity_type = $1, address_type = $2, address_line_1 = $3,
                   address_line_2 = $4, city = $5, state = $6, postal_code = $7,
                   country = $8, updated_at = NOW()
               WHERE id = $9
               RETURNING {COLUMNS}"#
        ))
        .bind(dto.entity_type.unwrap_or(existing.entity_type))
        .bind(dto.address_type.unwrap_or(existing.address_type))
        .bind(dto.address_line_1.unwrap_or(existing.address_line_1))
        .bind(dto.address_line_2.or(existing.address_line_2))
        .bind(dto.city.unwrap_or(existing.city))
        .bind(dto.state.unwrap_or(existing.state))
        .bind(dto.postal_code.unwrap_or(existing.postal_code))
        .bind(dto.country.unwrap_or(existing.country))
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(|e| map_write_error(e, "Address already exists"))
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM addresses WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| map_delete_error(e, "Address is still referenced"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Address not found")));
        }
        Ok(())
    }
}
