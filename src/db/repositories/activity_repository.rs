use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::db::models::{ActivityLog, EventType};
use crate::db::DatabaseError;

pub struct ActivityRepository;

impl ActivityRepository {
    /// Append an event inside an ongoing transaction, so the feed entry
    /// commits or rolls back with the state change it records.
    pub async fn append_tx(
        tx: &mut Transaction<'_, Postgres>,
        owner_id: Uuid,
        event_type: EventType,
        description: &str,
        metadata: Option<serde_json::Value>,
    ) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO activity_logs (owner_id, event_type, description, metadata)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(owner_id)
        .bind(event_type.as_str())
        .bind(description)
        .bind(metadata)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    pub async fn append(
        pool: &PgPool,
        owner_id: Uuid,
        event_type: EventType,
        description: &str,
        metadata: Option<serde_json::Value>,
    ) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO activity_logs (owner_id, event_type, description, metadata)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(owner_id)
        .bind(event_type.as_str())
        .bind(description)
        .bind(metadata)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Newest-first tail of the owner's feed.
    pub async fn tail(
        pool: &PgPool,
        owner_id: Uuid,
        limit: i64,
    ) -> Result<Vec<ActivityLog>, DatabaseError> {
        let entries = sqlx::query_as::<_, ActivityLog>(
            "SELECT id, owner_id, event_type, description, metadata, created_at
             FROM activity_logs
             WHERE owner_id = $1
             ORDER BY created_at DESC
             LIMIT $2",
        )
        .bind(owner_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(entries)
    }
}
