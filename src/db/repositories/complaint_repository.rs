use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{
    Complaint, ComplaintStatus, ComplaintWithTenant, NewComplaint, PriorityLevel,
};
use crate::db::DatabaseError;

const COMPLAINT_COLUMNS: &str =
    "id, tenant_id, owner_id, title, description, priority, status, created_at";

pub struct ComplaintRepository;

impl ComplaintRepository {
    pub async fn create(
        pool: &PgPool,
        tenant_id: Uuid,
        owner_id: Uuid,
        complaint: &NewComplaint,
    ) -> Result<Complaint, DatabaseError> {
        let complaint = sqlx::query_as::<_, Complaint>(&format!(
            "INSERT INTO complaints (tenant_id, owner_id, title, description, priority, status)
             VALUES ($1, $2, $3, $4, $5, 'PENDING')
             RETURNING {COMPLAINT_COLUMNS}"
        ))
        .bind(tenant_id)
        .bind(owner_id)
        .bind(&complaint.title)
        .bind(&complaint.description)
        .bind(complaint.priority)
        .fetch_one(pool)
        .await?;

        Ok(complaint)
    }

    pub async fn list_for_tenant(
        pool: &PgPool,
        tenant_id: Uuid,
    ) -> Result<Vec<Complaint>, DatabaseError> {
        let complaints = sqlx::query_as::<_, Complaint>(&format!(
            "SELECT {COMPLAINT_COLUMNS} FROM complaints
             WHERE tenant_id = $1
             ORDER BY created_at DESC"
        ))
        .bind(tenant_id)
        .fetch_all(pool)
        .await?;

        Ok(complaints)
    }

    /// Owner's complaints for one status, urgent first then newest.
    pub async fn list_for_owner(
        pool: &PgPool,
        owner_id: Uuid,
        status: ComplaintStatus,
    ) -> Result<Vec<ComplaintWithTenant>, DatabaseError> {
        let complaints = sqlx::query_as::<_, ComplaintWithTenant>(
            r#"
            SELECT c.id, c.title, c.description, c.priority, c.status, c.created_at,
                   t.full_name AS tenant_name, t.room_number
            FROM complaints c
            JOIN tenants t ON c.tenant_id = t.id
            WHERE c.owner_id = $1 AND c.status = $2
            ORDER BY
                CASE c.priority::text
                    WHEN 'HIGH' THEN 1
                    WHEN 'MEDIUM' THEN 2
                    WHEN 'LOW' THEN 3
                END,
                c.created_at DESC
            "#,
        )
        .bind(owner_id)
        .bind(status)
        .fetch_all(pool)
        .await?;

        Ok(complaints)
    }

    /// Top pending complaints for the dashboard widget.
    pub async fn pending_top(
        pool: &PgPool,
        owner_id: Uuid,
        limit: i64,
    ) -> Result<Vec<ComplaintWithTenant>, DatabaseError> {
        let complaints = sqlx::query_as::<_, ComplaintWithTenant>(
            r#"
            SELECT c.id, c.title, c.description, c.priority, c.status, c.created_at,
                   t.full_name AS tenant_name, t.room_number
            FROM complaints c
            JOIN tenants t ON c.tenant_id = t.id
            WHERE c.owner_id = $1 AND c.status = 'PENDING'
            ORDER BY
                CASE c.priority::text
                    WHEN 'HIGH' THEN 1
                    WHEN 'MEDIUM' THEN 2
                    WHEN 'LOW' THEN 3
                END,
                c.created_at DESC
            LIMIT $2
            "#,
        )
        .bind(owner_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(complaints)
    }

    pub async fn count_pending_by_priority(
        pool: &PgPool,
        owner_id: Uuid,
        priority: PriorityLevel,
    ) -> Result<i64, DatabaseError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM complaints
             WHERE owner_id = $1 AND status = 'PENDING' AND priority = $2",
        )
        .bind(owner_id)
        .bind(priority)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }

    /// Ownership enforced in the predicate; returns rows touched.
    pub async fn resolve(
        pool: &PgPool,
        owner_id: Uuid,
        complaint_id: Uuid,
    ) -> Result<u64, DatabaseError> {
        let result = sqlx::query(
            "UPDATE complaints SET status = 'RESOLVED' WHERE id = $1 AND owner_id = $2",
        )
        .bind(complaint_id)
        .bind(owner_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }
}
