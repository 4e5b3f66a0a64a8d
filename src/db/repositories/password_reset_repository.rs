use sqlx::{PgPool, Postgres, Transaction};
use time::OffsetDateTime;

use crate::db::models::PasswordResetToken;
use crate::db::DatabaseError;

pub struct PasswordResetRepository;

impl PasswordResetRepository {
    /// One live token per email; reissue replaces it.
    pub async fn upsert(
        pool: &PgPool,
        email: &str,
        token: &str,
        expires_at: OffsetDateTime,
    ) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO password_resets (email, token, expires_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (email) DO UPDATE
            SET token = EXCLUDED.token, expires_at = EXCLUDED.expires_at
            "#,
        )
        .bind(email.to_lowercase())
        .bind(token)
        .bind(expires_at)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Look up a token that has not expired yet.
    pub async fn find_valid(
        pool: &PgPool,
        token: &str,
    ) -> Result<Option<PasswordResetToken>, DatabaseError> {
        let reset = sqlx::query_as::<_, PasswordResetToken>(
            "SELECT email, token, created_at, expires_at
             FROM password_resets
             WHERE token = $1 AND expires_at > NOW()",
        )
        .bind(token)
        .fetch_optional(pool)
        .await?;

        Ok(reset)
    }

    /// Single use: consumed together with the password update.
    pub async fn delete(
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
    ) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM password_resets WHERE email = $1")
            .bind(email.to_lowercase())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}
