use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{Property, UpdatePropertySettings};
use crate::db::DatabaseError;

const PROPERTY_COLUMNS: &str = "id, owner_id, name, address, wifi_ssid, wifi_password, \
     gate_closing_time, house_rules, late_fee_daily, rent_grace_period_days, created_at";

pub struct PropertyRepository;

impl PropertyRepository {
    pub async fn list_by_owner(
        pool: &PgPool,
        owner_id: Uuid,
    ) -> Result<Vec<Property>, DatabaseError> {
        let properties = sqlx::query_as::<_, Property>(&format!(
            "SELECT {PROPERTY_COLUMNS} FROM properties WHERE owner_id = $1 ORDER BY created_at"
        ))
        .bind(owner_id)
        .fetch_all(pool)
        .await?;

        Ok(properties)
    }

    /// The owner's default property (first created). Current usage keeps
    /// one effective property per owner.
    pub async fn find_default(
        pool: &PgPool,
        owner_id: Uuid,
    ) -> Result<Option<Property>, DatabaseError> {
        let property = sqlx::query_as::<_, Property>(&format!(
            "SELECT {PROPERTY_COLUMNS} FROM properties
             WHERE owner_id = $1 ORDER BY created_at LIMIT 1"
        ))
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;

        Ok(property)
    }

    /// Create the default property on first use.
    pub async fn create_default(pool: &PgPool, owner_id: Uuid) -> Result<Property, DatabaseError> {
        let property = sqlx::query_as::<_, Property>(&format!(
            "INSERT INTO properties (owner_id) VALUES ($1) RETURNING {PROPERTY_COLUMNS}"
        ))
        .bind(owner_id)
        .fetch_one(pool)
        .await?;

        Ok(property)
    }

    pub async fn update_settings(
        pool: &PgPool,
        property_id: Uuid,
        update: &UpdatePropertySettings,
    ) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            UPDATE properties
            SET wifi_ssid = COALESCE($1, wifi_ssid),
                wifi_password = COALESCE($2, wifi_password),
                gate_closing_time = COALESCE($3, gate_closing_time),
                house_rules = COALESCE($4, house_rules),
                late_fee_daily = COALESCE($5, late_fee_daily),
                rent_grace_period_days = COALESCE($6, rent_grace_period_days)
            WHERE id = $7
            "#,
        )
        .bind(update.wifi_ssid.as_deref())
        .bind(update.wifi_password.as_deref())
        .bind(update.gate_closing_time.as_deref())
        .bind(update.house_rules.as_deref())
        .bind(update.late_fee_daily)
        .bind(update.rent_grace_period_days)
        .bind(property_id)
        .execute(pool)
        .await?;

        Ok(())
    }
}
