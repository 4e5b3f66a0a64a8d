use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, Transaction};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::db::models::{NewTenant, OnboardingStatus, Tenant};
use crate::db::DatabaseError;

const TENANT_COLUMNS: &str = "id, owner_id, user_id, room_id, full_name, email, phone_number, \
     room_number, bed_number, monthly_rent, security_deposit, lease_start, lease_end, \
     onboarding_status, created_at";

/// List filters offered on the owner's tenants page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TenantFilter {
    #[default]
    All,
    Active,
    RentDue,
    LeaseExpiring,
    Past,
}

/// Row shape for the tenants list.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct TenantSummary {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub room_number: Option<String>,
    pub onboarding_status: OnboardingStatus,
    pub monthly_rent: i64,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct ExpiringLease {
    pub full_name: String,
    pub lease_end: Date,
    pub days_remaining: i32,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct RecentMovement {
    pub full_name: String,
    pub room_number: Option<String>,
    pub created_at: OffsetDateTime,
}

/// ACTIVE tenant still owing rent for the month — reminder target.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReminderTarget {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub room_number: Option<String>,
    pub monthly_rent: i64,
}

pub struct TenantRepository;

impl TenantRepository {
    pub async fn create(
        pool: &PgPool,
        owner_id: Uuid,
        tenant: &NewTenant,
        room_id: Option<Uuid>,
        status: OnboardingStatus,
    ) -> Result<Tenant, DatabaseError> {
        let tenant = sqlx::query_as::<_, Tenant>(&format!(
            "INSERT INTO tenants (owner_id, room_id, full_name, email, phone_number, \
             room_number, bed_number, monthly_rent, lease_start, lease_end, onboarding_status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {TENANT_COLUMNS}"
        ))
        .bind(owner_id)
        .bind(room_id)
        .bind(&tenant.full_name)
        .bind(tenant.email.to_lowercase())
        .bind(&tenant.phone_number)
        .bind(tenant.room_number.as_deref())
        .bind(tenant.bed_number.as_deref())
        .bind(tenant.monthly_rent)
        .bind(tenant.lease_start)
        .bind(tenant.lease_end)
        .bind(status)
        .fetch_one(pool)
        .await?;

        Ok(tenant)
    }

    /// Earliest invitation row for an email, across owners. Signup
    /// links against this row.
    pub async fn find_invitation_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<Tenant>, DatabaseError> {
        let tenant = sqlx::query_as::<_, Tenant>(&format!(
            "SELECT {TENANT_COLUMNS} FROM tenants WHERE email = $1 ORDER BY created_at LIMIT 1"
        ))
        .bind(email.to_lowercase())
        .fetch_optional(pool)
        .await?;

        Ok(tenant)
    }

    pub async fn find_owned(
        pool: &PgPool,
        owner_id: Uuid,
        tenant_id: Uuid,
    ) -> Result<Option<Tenant>, DatabaseError> {
        let tenant = sqlx::query_as::<_, Tenant>(&format!(
            "SELECT {TENANT_COLUMNS} FROM tenants WHERE id = $1 AND owner_id = $2"
        ))
        .bind(tenant_id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;

        Ok(tenant)
    }

    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Option<Tenant>, DatabaseError> {
        let tenant = sqlx::query_as::<_, Tenant>(&format!(
            "SELECT {TENANT_COLUMNS} FROM tenants WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(tenant)
    }

    pub async fn exists_email_for_owner(
        pool: &PgPool,
        owner_id: Uuid,
        email: &str,
    ) -> Result<bool, DatabaseError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM tenants WHERE owner_id = $1 AND email = $2)",
        )
        .bind(owner_id)
        .bind(email.to_lowercase())
        .fetch_one(pool)
        .await?;

        Ok(exists)
    }

    pub async fn exists_phone_for_owner(
        pool: &PgPool,
        owner_id: Uuid,
        phone: &str,
    ) -> Result<bool, DatabaseError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM tenants WHERE owner_id = $1 AND phone_number = $2)",
        )
        .bind(owner_id)
        .bind(phone)
        .fetch_one(pool)
        .await?;

        Ok(exists)
    }

    /// Attach a freshly created login account to the invitation row
    /// and activate it.
    pub async fn link_user(
        tx: &mut Transaction<'_, Postgres>,
        tenant_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), DatabaseError> {
        sqlx::query(
            "UPDATE tenants SET user_id = $1, onboarding_status = 'ACTIVE' WHERE id = $2",
        )
        .bind(user_id)
        .bind(tenant_id)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    pub async fn update_status(
        pool: &PgPool,
        tenant_id: Uuid,
        status: OnboardingStatus,
    ) -> Result<(), DatabaseError> {
        sqlx::query("UPDATE tenants SET onboarding_status = $1 WHERE id = $2")
            .bind(status)
            .bind(tenant_id)
            .execute(pool)
            .await?;

        Ok(())
    }

    pub async fn update_phone(
        pool: &PgPool,
        user_id: Uuid,
        phone: &str,
    ) -> Result<(), DatabaseError> {
        sqlx::query("UPDATE tenants SET phone_number = $1 WHERE user_id = $2")
            .bind(phone)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(())
    }

    pub async fn delete(pool: &PgPool, tenant_id: Uuid) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM tenants WHERE id = $1")
            .bind(tenant_id)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Tenants holding a bed right now (ACTIVE, PENDING or NOTICE).
    pub async fn occupied_count(pool: &PgPool, owner_id: Uuid) -> Result<i64, DatabaseError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM tenants
             WHERE owner_id = $1 AND onboarding_status IN ('ACTIVE', 'PENDING', 'NOTICE')",
        )
        .bind(owner_id)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }

    pub async fn count_all(pool: &PgPool, owner_id: Uuid) -> Result<i64, DatabaseError> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tenants WHERE owner_id = $1")
                .bind(owner_id)
                .fetch_one(pool)
                .await?;

        Ok(count)
    }

    pub async fn count_by_status(
        pool: &PgPool,
        owner_id: Uuid,
        status: OnboardingStatus,
    ) -> Result<i64, DatabaseError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM tenants WHERE owner_id = $1 AND onboarding_status = $2",
        )
        .bind(owner_id)
        .bind(status)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }

    /// (active tenant count, total expected rent) in one pass.
    pub async fn active_stats(pool: &PgPool, owner_id: Uuid) -> Result<(i64, i64), DatabaseError> {
        let stats = sqlx::query_as::<_, (i64, i64)>(
            "SELECT COUNT(*), COALESCE(SUM(monthly_rent), 0)::BIGINT
             FROM tenants
             WHERE owner_id = $1 AND onboarding_status = 'ACTIVE'",
        )
        .bind(owner_id)
        .fetch_one(pool)
        .await?;

        Ok(stats)
    }

    pub async fn expiring_leases(
        pool: &PgPool,
        owner_id: Uuid,
        window_end: Date,
        limit: i64,
    ) -> Result<Vec<ExpiringLease>, DatabaseError> {
        let leases = sqlx::query_as::<_, ExpiringLease>(
            r#"
            SELECT full_name, lease_end, (lease_end - CURRENT_DATE)::INT AS days_remaining
            FROM tenants
            WHERE owner_id = $1
              AND lease_end BETWEEN CURRENT_DATE AND $2
              AND onboarding_status = 'ACTIVE'
            ORDER BY lease_end ASC
            LIMIT $3
            "#,
        )
        .bind(owner_id)
        .bind(window_end)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(leases)
    }

    pub async fn recent_movements(
        pool: &PgPool,
        owner_id: Uuid,
        limit: i64,
    ) -> Result<Vec<RecentMovement>, DatabaseError> {
        let movements = sqlx::query_as::<_, RecentMovement>(
            "SELECT full_name, room_number, created_at
             FROM tenants
             WHERE owner_id = $1
             ORDER BY created_at DESC
             LIMIT $2",
        )
        .bind(owner_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(movements)
    }

    /// ACTIVE tenants without a COMPLETED payment for the month.
    pub async fn reminder_targets(
        pool: &PgPool,
        owner_id: Uuid,
        month: &str,
    ) -> Result<Vec<ReminderTarget>, DatabaseError> {
        let targets = sqlx::query_as::<_, ReminderTarget>(
            r#"
            SELECT t.id, t.full_name, t.email, t.room_number, t.monthly_rent
            FROM tenants t
            WHERE t.owner_id = $1
              AND t.onboarding_status = 'ACTIVE'
              AND t.id NOT IN (
                  SELECT tenant_id FROM payments
                  WHERE payment_month = $2 AND status = 'COMPLETED'
              )
            "#,
        )
        .bind(owner_id)
        .bind(month)
        .fetch_all(pool)
        .await?;

        Ok(targets)
    }

    /// Filtered, searched and paginated list plus the total match count.
    pub async fn list(
        pool: &PgPool,
        owner_id: Uuid,
        filter: TenantFilter,
        search: Option<&str>,
        month: &str,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<TenantSummary>, i64), DatabaseError> {
        let mut predicate = String::from("owner_id = $1");
        let mut next_arg = 2;
        let mut needs_month = false;

        match filter {
            TenantFilter::All => {}
            TenantFilter::Active => {
                predicate.push_str(" AND onboarding_status = 'ACTIVE'");
            }
            TenantFilter::RentDue => {
                predicate.push_str(&format!(
                    " AND onboarding_status = 'ACTIVE' AND id NOT IN (
                         SELECT tenant_id FROM payments
                         WHERE payment_month = ${next_arg} AND status = 'COMPLETED')"
                ));
                next_arg += 1;
                needs_month = true;
            }
            TenantFilter::LeaseExpiring => {
                predicate.push_str(
                    " AND onboarding_status = 'ACTIVE'
                      AND lease_end BETWEEN CURRENT_DATE AND CURRENT_DATE + INTERVAL '30 days'",
                );
            }
            TenantFilter::Past => {
                predicate.push_str(
                    " AND onboarding_status IN ('EXITED', 'LEFT', 'MOVED_OUT', 'REJECTED')",
                );
            }
        }

        let search_term = search.map(|s| format!("%{}%", s));
        if search_term.is_some() {
            predicate.push_str(&format!(
                " AND (full_name ILIKE ${next_arg} OR email ILIKE ${next_arg} \
                 OR room_number ILIKE ${next_arg})"
            ));
            next_arg += 1;
        }

        let count_sql = format!("SELECT COUNT(*) FROM tenants WHERE {predicate}");
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql).bind(owner_id);
        if needs_month {
            count_query = count_query.bind(month);
        }
        if let Some(ref term) = search_term {
            count_query = count_query.bind(term);
        }
        let total = count_query.fetch_one(pool).await?;

        let list_sql = format!(
            "SELECT id, full_name, email, phone_number, room_number, onboarding_status, \
             monthly_rent, created_at
             FROM tenants WHERE {predicate}
             ORDER BY created_at DESC
             LIMIT ${next_arg} OFFSET ${}",
            next_arg + 1
        );
        let mut list_query = sqlx::query_as::<_, TenantSummary>(&list_sql).bind(owner_id);
        if needs_month {
            list_query = list_query.bind(month);
        }
        if let Some(ref term) = search_term {
            list_query = list_query.bind(term);
        }
        let tenants = list_query.bind(limit).bind(offset).fetch_all(pool).await?;

        Ok((tenants, total))
    }
}
