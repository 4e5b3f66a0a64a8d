use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::db::models::{Owner, UpdateOwnerSettings};
use crate::db::DatabaseError;

const OWNER_COLUMNS: &str = "id, user_id, full_name, phone_number, business_name, upi_id, \
     account_holder_name, bank_name, account_number, ifsc_code, preferences, qr_code_data, \
     created_at";

pub struct OwnerRepository;

impl OwnerRepository {
    pub async fn create(
        tx: &mut Transaction<'_, Postgres>,
        user_id: Uuid,
        full_name: &str,
        phone_number: Option<&str>,
    ) -> Result<Owner, DatabaseError> {
        let owner = sqlx::query_as::<_, Owner>(&format!(
            "INSERT INTO owners (user_id, full_name, phone_number)
             VALUES ($1, $2, $3)
             RETURNING {OWNER_COLUMNS}"
        ))
        .bind(user_id)
        .bind(full_name)
        .bind(phone_number)
        .fetch_one(&mut **tx)
        .await?;

        Ok(owner)
    }

    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Option<Owner>, DatabaseError> {
        let owner = sqlx::query_as::<_, Owner>(&format!(
            "SELECT {OWNER_COLUMNS} FROM owners WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(owner)
    }

    pub async fn find_by_id(pool: &PgPool, owner_id: Uuid) -> Result<Option<Owner>, DatabaseError> {
        let owner = sqlx::query_as::<_, Owner>(&format!(
            "SELECT {OWNER_COLUMNS} FROM owners WHERE id = $1"
        ))
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;

        Ok(owner)
    }

    /// The owner's login email, for owner-facing notifications.
    pub async fn account_email(pool: &PgPool, owner_id: Uuid) -> Result<Option<String>, DatabaseError> {
        let email = sqlx::query_scalar::<_, String>(
            r#"
            SELECT u.email
            FROM owners o
            JOIN users u ON o.user_id = u.id
            WHERE o.id = $1
            "#,
        )
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;

        Ok(email)
    }

    pub async fn update_settings(
        pool: &PgPool,
        owner_id: Uuid,
        update: &UpdateOwnerSettings,
    ) -> Result<(), DatabaseError> {
        let preferences = update
            .preferences
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| DatabaseError::InvalidInput(e.to_string()))?;

        sqlx::query(
            r#"
            UPDATE owners
            SET full_name = COALESCE($1, full_name),
                phone_number = COALESCE($2, phone_number),
                upi_id = COALESCE($3, upi_id),
                account_holder_name = COALESCE($4, account_holder_name),
                bank_name = COALESCE($5, bank_name),
                account_number = COALESCE($6, account_number),
                ifsc_code = COALESCE($7, ifsc_code),
                preferences = COALESCE($8, preferences),
                qr_code_data = COALESCE($9, qr_code_data)
            WHERE id = $10
            "#,
        )
        .bind(update.full_name.as_deref())
        .bind(update.phone_number.as_deref())
        .bind(update.upi_id.as_deref())
        .bind(update.account_holder_name.as_deref())
        .bind(update.bank_name.as_deref())
        .bind(update.account_number.as_deref())
        .bind(update.ifsc_code.as_deref())
        .bind(preferences)
        .bind(update.qr_code_data.as_deref())
        .bind(owner_id)
        .execute(pool)
        .await?;

        Ok(())
    }
}
