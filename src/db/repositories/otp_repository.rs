use sqlx::{PgPool, Postgres, Transaction};
use time::OffsetDateTime;

use crate::db::models::OtpVerification;
use crate::db::DatabaseError;

pub struct OtpRepository;

impl OtpRepository {
    /// Store a code for the email, invalidating any previous one.
    pub async fn upsert(
        pool: &PgPool,
        email: &str,
        otp_code: &str,
        expires_at: OffsetDateTime,
    ) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO otp_verifications (email, otp_code, expires_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (email) DO UPDATE
            SET otp_code = EXCLUDED.otp_code, expires_at = EXCLUDED.expires_at
            "#,
        )
        .bind(email.to_lowercase())
        .bind(otp_code)
        .bind(expires_at)
        .execute(pool)
        .await?;

        Ok(())
    }

    pub async fn find(pool: &PgPool, email: &str) -> Result<Option<OtpVerification>, DatabaseError> {
        let otp = sqlx::query_as::<_, OtpVerification>(
            "SELECT email, otp_code, created_at, expires_at
             FROM otp_verifications
             WHERE email = $1",
        )
        .bind(email.to_lowercase())
        .fetch_optional(pool)
        .await?;

        Ok(otp)
    }

    /// Consume the code as part of the signup transaction.
    pub async fn delete(
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
    ) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM otp_verifications WHERE email = $1")
            .bind(email.to_lowercase())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}
