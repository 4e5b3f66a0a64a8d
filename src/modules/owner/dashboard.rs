use axum::extract::State;
use axum::Json;
use serde::Serialize;
use sqlx::PgPool;
use time::{Duration, OffsetDateTime};
use tracing::warn;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::db::models::{month_key, ActivityFeedItem, ComplaintWithTenant, Notice, PriorityLevel};
use crate::db::repositories::{
    ActivityRepository, ComplaintRepository, ExpenseRepository, ExpiringLease, NoticeRepository,
    PaymentRepository, PendingApproval, RecentMovement, RoomRepository, TenantRepository,
};
use crate::error::AppResult;
use crate::middleware::auth::OwnerSession;

use super::current_owner;

const EXPIRING_LEASES_CAP: i64 = 5;
const ACTIVITY_FEED_CAP: i64 = 5;
const WIDGET_CAP: i64 = 3;
const LEASE_WINDOW_DAYS: i64 = 30;

/// Percentage of bed capacity filled, floored. Zero capacity reads as
/// zero occupancy rather than dividing by it.
pub fn occupancy_rate(occupied: i64, capacity: i64) -> i64 {
    if capacity > 0 {
        occupied * 100 / capacity
    } else {
        0
    }
}

/// Share of expected rent collected this month, floored; zero expected
/// rent reads as zero.
pub fn collection_percentage(collected: i64, expected: i64) -> i64 {
    if expected > 0 {
        collected * 100 / expected
    } else {
        0
    }
}

pub fn available_beds(capacity: i64, occupied: i64) -> i64 {
    (capacity - occupied).max(0)
}

/// Everything the owner dashboard shows, recomputed per request from
/// current rows. No caching, no incremental maintenance.
#[derive(Debug, Default, Serialize)]
pub struct DashboardView {
    pub total_income: i64,
    pub total_spent: i64,
    pub net_profit: i64,

    pub occupancy_rate: i64,
    pub total_capacity: i64,
    pub total_occupied: i64,
    pub available_beds: i64,

    pub collection_percentage: i64,
    pub total_collected: i64,
    pub total_expected: i64,
    pub tenants_paid: i64,
    pub tenants_pending: i64,

    pub expiring_leases: Vec<ExpiringLease>,
    pub recent_movements: Vec<RecentMovement>,
    pub pending_approvals: Vec<PendingApproval>,
    pub total_pending_count: i64,
    pub pending_complaints: Vec<ComplaintWithTenant>,
    pub high_priority_count: i64,
    pub recent_notices: Vec<Notice>,
    pub recent_activity: Vec<ActivityFeedItem>,
}

pub async fn assemble(pool: &PgPool, owner_id: Uuid) -> AppResult<DashboardView> {
    let today = OffsetDateTime::now_utc().date();
    let current_month = month_key(today);

    let (active_count, total_income) = TenantRepository::active_stats(pool, owner_id).await?;
    let total_spent = ExpenseRepository::total_for_month(pool, owner_id, &current_month).await?;

    let total_capacity = RoomRepository::total_capacity(pool, owner_id).await?;
    let total_occupied = TenantRepository::occupied_count(pool, owner_id).await?;

    let (tenants_paid, total_collected) =
        PaymentRepository::collected_for_month(pool, owner_id, &current_month).await?;

    let window_end = today + Duration::days(LEASE_WINDOW_DAYS);
    let expiring_leases =
        TenantRepository::expiring_leases(pool, owner_id, window_end, EXPIRING_LEASES_CAP).await?;
    let recent_movements = TenantRepository::recent_movements(pool, owner_id, WIDGET_CAP).await?;

    let pending_approvals =
        PaymentRepository::pending_for_owner(pool, owner_id, Some(WIDGET_CAP)).await?;
    let total_pending_count = PaymentRepository::pending_count(pool, owner_id).await?;

    let pending_complaints = ComplaintRepository::pending_top(pool, owner_id, WIDGET_CAP).await?;
    let high_priority_count =
        ComplaintRepository::count_pending_by_priority(pool, owner_id, PriorityLevel::High)
            .await?;

    let recent_notices = NoticeRepository::list_for_owner(pool, owner_id, Some(WIDGET_CAP)).await?;

    let recent_activity = ActivityRepository::tail(pool, owner_id, ACTIVITY_FEED_CAP)
        .await?
        .into_iter()
        .map(ActivityFeedItem::from)
        .collect();

    Ok(DashboardView {
        total_income,
        total_spent,
        net_profit: total_income - total_spent,

        occupancy_rate: occupancy_rate(total_occupied, total_capacity),
        total_capacity,
        total_occupied,
        available_beds: available_beds(total_capacity, total_occupied),

        collection_percentage: collection_percentage(total_collected, total_income),
        total_collected,
        total_expected: total_income,
        tenants_paid,
        tenants_pending: (active_count - tenants_paid).max(0),

        expiring_leases,
        recent_movements,
        pending_approvals,
        total_pending_count,
        pending_complaints,
        high_priority_count,
        recent_notices,
        recent_activity,
    })
}

/// Dashboard handler. Any failure while aggregating degrades to a
/// zeroed view instead of an error page.
pub async fn owner_dashboard(
    State(state): State<AppState>,
    session: OwnerSession,
) -> Json<DashboardView> {
    let view = match current_owner(&state.db, &session).await {
        Ok(owner) => match assemble(&state.db, owner.id).await {
            Ok(view) => view,
            Err(e) => {
                warn!(error = %e, "dashboard aggregation failed, serving zeroed view");
                DashboardView::default()
            }
        },
        Err(e) => {
            warn!(error = %e, "owner profile unavailable, serving zeroed view");
            DashboardView::default()
        }
    };

    Json(view)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn occupancy_is_floored() {
        // 2 rooms (capacity 2 and 3), 4 occupying tenants.
        assert_eq!(occupancy_rate(4, 5), 80);
        assert_eq!(occupancy_rate(1, 3), 33);
        assert_eq!(occupancy_rate(2, 3), 66);
    }

    #[test]
    fn occupancy_with_no_capacity_is_zero() {
        assert_eq!(occupancy_rate(0, 0), 0);
        assert_eq!(occupancy_rate(7, 0), 0);
    }

    #[test]
    fn full_house_is_one_hundred() {
        assert_eq!(occupancy_rate(5, 5), 100);
    }

    #[test]
    fn collection_is_floored() {
        assert_eq!(collection_percentage(8_500, 17_000), 50);
        assert_eq!(collection_percentage(9_999, 10_000), 99);
        assert_eq!(collection_percentage(1, 101), 0);
    }

    #[test]
    fn collection_with_no_expected_rent_is_zero() {
        assert_eq!(collection_percentage(0, 0), 0);
        assert_eq!(collection_percentage(5_000, 0), 0);
    }

    #[test]
    fn available_beds_never_negative() {
        assert_eq!(available_beds(5, 3), 2);
        assert_eq!(available_beds(3, 5), 0);
    }
}
