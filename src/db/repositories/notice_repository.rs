use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{NewNotice, Notice};
use crate::db::DatabaseError;

const NOTICE_COLUMNS: &str = "id, owner_id, title, description, priority, created_at";

pub struct NoticeRepository;

impl NoticeRepository {
    pub async fn create(
        pool: &PgPool,
        owner_id: Uuid,
        notice: &NewNotice,
    ) -> Result<Notice, DatabaseError> {
        let notice = sqlx::query_as::<_, Notice>(&format!(
            "INSERT INTO notices (owner_id, title, description, priority)
             VALUES ($1, $2, $3, $4)
             RETURNING {NOTICE_COLUMNS}"
        ))
        .bind(owner_id)
        .bind(&notice.title)
        .bind(&notice.description)
        .bind(notice.priority)
        .fetch_one(pool)
        .await?;

        Ok(notice)
    }

    pub async fn list_for_owner(
        pool: &PgPool,
        owner_id: Uuid,
        limit: Option<i64>,
    ) -> Result<Vec<Notice>, DatabaseError> {
        let notices = sqlx::query_as::<_, Notice>(&format!(
            "SELECT {NOTICE_COLUMNS} FROM notices
             WHERE owner_id = $1
             ORDER BY created_at DESC
             LIMIT $2"
        ))
        .bind(owner_id)
        .bind(limit.unwrap_or(i64::MAX))
        .fetch_all(pool)
        .await?;

        Ok(notices)
    }

    /// Ownership enforced in the predicate; returns rows touched.
    pub async fn delete(
        pool: &PgPool,
        owner_id: Uuid,
        notice_id: Uuid,
    ) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM notices WHERE id = $1 AND owner_id = $2")
            .bind(notice_id)
            .bind(owner_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }
}
