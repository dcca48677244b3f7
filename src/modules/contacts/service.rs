use orderdesk_core::AppError;
use orderdesk_models::{Contact, CreateContactDto, UpdateContactDto};
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;

use crate::utils::db_errors::{map_delete_error, map_write_error};

const SELECT_CONTACT: &str = r#"
    SELECT c.id, c.company_name, c.contact_name, c.attention, c.phone, c.email, c.mobile,
           c.title, c.notes,
           ARRAY(SELECT ca.address_id FROM contact_addresses ca
                 WHERE ca.contact_id = c.id ORDER BY ca.address_id) AS addresses,
           c.created_at, c.updated_at
    FROM contacts c
"#;

const DUPLICATE: &str = "Contact already exists";

pub struct ContactService;

impl ContactService {
    #[instrument(skip(db))]
    pub async fn list(db: &PgPool) -> Result<Vec<Contact>, AppError> {
        let contacts = sqlx::query_as::<_, Contact>(&format!("{SELECT_CONTACT} ORDER BY c.id"))
            .fetch_all(db)
            .await?;
        Ok(contacts)
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, id: i64) -> Result<Contact, AppError> {
        sqlx::query_as::<_, Contact>(&format!("{SELECT_CONTACT} WHERE c.id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Contact not found")))
    }

    async fn link_addresses(
        tx: &mut Transaction<'_, Postgres>,
        contact_id: i64,
        addresses: &[i64],
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"INSERT INTO contact_addresses (contact_id, address_id)
               SELECT $1, UNNEST($2::BIGINT[])
               ON CONFLICT DO NOTHING"#,
        )
        .bind(contact_id)
        .bind(addresses)
        .execute(&mut **tx)
        .await
        .map_err(|e| map_write_error(e, DUPLICATE))?;
        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn create(db: &PgPool, dto: CreateContactDto) -> Result<Contact, AppError> {
        let mut tx = db.begin().await?;
        let id = sqlx::query_scalar::<_, i64>(
            r#"INSERT INTO contacts (company_name, contact_name, attention, phone, email,
                   mobile, title, notes)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
               RETURNING id"#,
        )
        .bind(&dto.company_name)
        .bind(&dto.contact_name)
        .bind(&dto.attention)
        .bind(&dto.phone)
        .bind(&dto.email)
        .bind(&dto.mobile)
        .bind(&dto.title)
        .bind(&dto.notes)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, DUPLICATE))?;

        Self::link_addresses(&mut tx, id, &dto.addresses).await?;
        tx.commit().await?;

        Self::get(db, id).await
    }

    #[instrument(skip(db))]
    pub async fn update(db: &PgPool, id: i64, dto: UpdateContactDto) -> Result<Contact, AppError> {
        let existing = Self::get(db, id).await?;

        let mut tx = db.begin().await?;
        sqlx::query(
            r#"UPDATE contacts
               SET company_name = $1, contact_name = $2, attention = $3, phone = $4,
                   email = $5, mobile = $6, title = $7, notes = $8, updated_at = NOW()
               WHERE id = $9"#,
        )
        .bind(dto.company_name.unwrap_or(existing.company_name))
        .bind(dto.contact_name.unwrap_or(existing.contact_name))
        .bind(dto.attention.or(existing.attention))
        .bind(dto.phone.or(existing.phone))
        .bind(dto.email.or(existing.email))
        .bind(dto.mobile.or(existing.mobile))
        .bind(dto.title.or(existing.title))
        .bind(dto.notes.or(existing.notes))
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, DUPLICATE))?;

        if let Some(addresses) = &dto.addresses {
            sqlx::query("DELETE FROM contact_addresses WHERE contact_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            Self::link_addresses(&mut tx, id, addresses).await?;
        }
        tx.commit().await?;

        Self::get(db, id).await
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| map_delete_error(e, "Contact is still referenced"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Contact not found")));
        }
        Ok(())
    }
}
