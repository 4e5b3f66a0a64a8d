use serde::Serialize;
use sqlx::{PgPool, Postgres, Transaction};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::db::models::{Payment, PaymentStatus};
use crate::db::DatabaseError;

const PAYMENT_COLUMNS: &str = "id, tenant_id, owner_id, amount, payment_date, payment_month, \
     status, payment_mode, remarks, created_at";

/// Everything the approval side effects need, fetched in one join.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PaymentFacts {
    pub payment_id: Uuid,
    pub amount: i64,
    pub payment_date: Date,
    pub payment_month: String,
    pub payment_mode: Option<String>,
    pub status: PaymentStatus,
    pub tenant_name: String,
    pub tenant_email: String,
    pub room_number: Option<String>,
    pub owner_id: Uuid,
    pub owner_name: String,
}

/// Row shape for the pending-approvals widget.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct PendingApproval {
    pub id: Uuid,
    pub tenant_name: String,
    pub room_number: Option<String>,
    pub amount: i64,
    pub payment_date: Date,
    pub remarks: Option<String>,
    pub created_at: OffsetDateTime,
}

pub struct PaymentRepository;

impl PaymentRepository {
    /// Whether a PENDING or COMPLETED payment already exists for the
    /// tenant and month. Check-then-insert; two concurrent submissions
    /// can both pass — an accepted gap, matching the business rule
    /// being a pre-insert check rather than a constraint.
    pub async fn exists_blocking_for_month(
        pool: &PgPool,
        tenant_id: Uuid,
        month: &str,
    ) -> Result<bool, DatabaseError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                 SELECT 1 FROM payments
                 WHERE tenant_id = $1 AND payment_month = $2
                   AND status IN ('PENDING', 'COMPLETED')
             )",
        )
        .bind(tenant_id)
        .bind(month)
        .fetch_one(pool)
        .await?;

        Ok(exists)
    }

    pub async fn insert(
        pool: &PgPool,
        tenant_id: Uuid,
        owner_id: Uuid,
        amount: i64,
        payment_date: Date,
        month: &str,
        status: PaymentStatus,
        mode: &str,
        remarks: Option<&str>,
    ) -> Result<Payment, DatabaseError> {
        let payment = sqlx::query_as::<_, Payment>(&format!(
            "INSERT INTO payments (tenant_id, owner_id, amount, payment_date, payment_month, \
             status, payment_mode, remarks)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {PAYMENT_COLUMNS}"
        ))
        .bind(tenant_id)
        .bind(owner_id)
        .bind(amount)
        .bind(payment_date)
        .bind(month)
        .bind(status)
        .bind(mode)
        .bind(remarks)
        .fetch_one(pool)
        .await?;

        Ok(payment)
    }

    /// Payment facts joined with tenant and owner, scoped to the
    /// owner — the ownership check for the approval flow.
    pub async fn fetch_facts(
        tx: &mut Transaction<'_, Postgres>,
        payment_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<PaymentFacts>, DatabaseError> {
        let facts = sqlx::query_as::<_, PaymentFacts>(
            r#"
            SELECT p.id AS payment_id, p.amount, p.payment_date, p.payment_month,
                   p.payment_mode, p.status,
                   t.full_name AS tenant_name, t.email AS tenant_email, t.room_number,
                   t.owner_id, o.full_name AS owner_name
            FROM payments p
            JOIN tenants t ON p.tenant_id = t.id
            JOIN owners o ON t.owner_id = o.id
            WHERE p.id = $1 AND t.owner_id = $2
            "#,
        )
        .bind(payment_id)
        .bind(owner_id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(facts)
    }

    pub async fn set_status(
        tx: &mut Transaction<'_, Postgres>,
        payment_id: Uuid,
        status: PaymentStatus,
    ) -> Result<(), DatabaseError> {
        sqlx::query("UPDATE payments SET status = $1 WHERE id = $2")
            .bind(status)
            .bind(payment_id)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Latest payment status for the tenant and month, for the
    /// rent-status projection.
    pub async fn latest_status_for_month(
        pool: &PgPool,
        tenant_id: Uuid,
        month: &str,
    ) -> Result<Option<PaymentStatus>, DatabaseError> {
        let status = sqlx::query_scalar::<_, PaymentStatus>(
            "SELECT status FROM payments
             WHERE tenant_id = $1 AND payment_month = $2
             ORDER BY created_at DESC
             LIMIT 1",
        )
        .bind(tenant_id)
        .bind(month)
        .fetch_optional(pool)
        .await?;

        Ok(status)
    }

    pub async fn history_for_tenant(
        pool: &PgPool,
        tenant_id: Uuid,
    ) -> Result<Vec<Payment>, DatabaseError> {
        let payments = sqlx::query_as::<_, Payment>(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments
             WHERE tenant_id = $1
             ORDER BY payment_date DESC, created_at DESC"
        ))
        .bind(tenant_id)
        .fetch_all(pool)
        .await?;

        Ok(payments)
    }

    pub async fn pending_for_owner(
        pool: &PgPool,
        owner_id: Uuid,
        limit: Option<i64>,
    ) -> Result<Vec<PendingApproval>, DatabaseError> {
        let pending = sqlx::query_as::<_, PendingApproval>(
            r#"
            SELECT p.id, t.full_name AS tenant_name, t.room_number, p.amount,
                   p.payment_date, p.remarks, p.created_at
            FROM payments p
            JOIN tenants t ON p.tenant_id = t.id
            WHERE t.owner_id = $1 AND p.status = 'PENDING'
            ORDER BY p.created_at DESC
            LIMIT $2
            "#,
        )
        .bind(owner_id)
        .bind(limit.unwrap_or(i64::MAX))
        .fetch_all(pool)
        .await?;

        Ok(pending)
    }

    pub async fn pending_count(pool: &PgPool, owner_id: Uuid) -> Result<i64, DatabaseError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM payments p
             JOIN tenants t ON p.tenant_id = t.id
             WHERE t.owner_id = $1 AND p.status = 'PENDING'",
        )
        .bind(owner_id)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }

    /// (distinct paying tenants, total collected) of COMPLETED payments
    /// for the month.
    pub async fn collected_for_month(
        pool: &PgPool,
        owner_id: Uuid,
        month: &str,
    ) -> Result<(i64, i64), DatabaseError> {
        let collected = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT COUNT(DISTINCT p.tenant_id), COALESCE(SUM(p.amount), 0)::BIGINT
            FROM payments p
            JOIN tenants t ON p.tenant_id = t.id
            WHERE t.owner_id = $1 AND p.payment_month = $2 AND p.status = 'COMPLETED'
            "#,
        )
        .bind(owner_id)
        .bind(month)
        .fetch_one(pool)
        .await?;

        Ok(collected)
    }

    /// COMPLETED payment (amount, date) per tenant for the month,
    /// keyed by tenant id — the finance page join.
    pub async fn completed_by_tenant_for_month(
        pool: &PgPool,
        owner_id: Uuid,
        month: &str,
    ) -> Result<Vec<(Uuid, i64, Date)>, DatabaseError> {
        let rows = sqlx::query_as::<_, (Uuid, i64, Date)>(
            r#"
            SELECT p.tenant_id, p.amount, p.payment_date
            FROM payments p
            JOIN tenants t ON p.tenant_id = t.id
            WHERE t.owner_id = $1 AND p.payment_month = $2 AND p.status = 'COMPLETED'
            "#,
        )
        .bind(owner_id)
        .bind(month)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }
}
