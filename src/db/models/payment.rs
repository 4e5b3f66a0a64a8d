use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::{Date, OffsetDateTime};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "payment_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
}

impl PaymentStatus {
    /// Approval always lands on COMPLETED; re-approving a completed
    /// payment leaves the stored state untouched.
    pub fn approve(self) -> PaymentStatus {
        PaymentStatus::Completed
    }

    /// Rejection is only defined for payments still awaiting review.
    pub fn can_reject(&self) -> bool {
        matches!(self, PaymentStatus::Pending)
    }

    /// Statuses that block a new submission for the same month.
    pub fn blocks_resubmission(&self) -> bool {
        matches!(self, PaymentStatus::Pending | PaymentStatus::Completed)
    }
}

/// The month a rent payment is attributed to, as `YYYY-MM`.
pub fn month_key(date: Date) -> String {
    format!("{:04}-{:02}", date.year(), u8::from(date.month()))
}

/// Tenant-facing rent state for the current month, projected from the
/// latest payment row. Latest-wins: a FAILED latest row reads as
/// unpaid, the tenant can submit again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RentStatus {
    Unpaid,
    Verifying,
    Paid,
}

impl RentStatus {
    pub fn from_latest(latest: Option<PaymentStatus>) -> RentStatus {
        match latest {
            Some(PaymentStatus::Completed) => RentStatus::Paid,
            Some(PaymentStatus::Pending) => RentStatus::Verifying,
            Some(PaymentStatus::Failed) | None => RentStatus::Unpaid,
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub owner_id: Uuid,
    pub amount: i64,
    pub payment_date: Date,
    pub payment_month: String,
    pub status: PaymentStatus,
    pub payment_mode: Option<String>,
    pub remarks: Option<String>,
    pub created_at: OffsetDateTime,
}

/// Tenant-submitted payment, pending owner verification.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitPayment {
    #[validate(range(min = 1, message = "Amount must be positive"))]
    pub amount: i64,
    #[validate(length(min = 1, message = "Transaction reference is required"))]
    pub transaction_id: String,
}

/// Owner-recorded offline collection; lands directly on COMPLETED.
#[derive(Debug, Deserialize, Validate)]
pub struct RecordManualPayment {
    pub tenant_id: Uuid,
    #[validate(range(min = 1, message = "Amount must be positive"))]
    pub amount: i64,
    pub payment_date: Date,
    pub payment_mode: String,
    pub remarks: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Month;

    #[test]
    fn month_key_is_year_dash_month() {
        let d = Date::from_calendar_date(2025, Month::March, 7).unwrap();
        assert_eq!(month_key(d), "2025-03");
        let d = Date::from_calendar_date(2025, Month::December, 31).unwrap();
        assert_eq!(month_key(d), "2025-12");
    }

    #[test]
    fn approve_is_idempotent_on_state() {
        assert_eq!(PaymentStatus::Pending.approve(), PaymentStatus::Completed);
        assert_eq!(PaymentStatus::Completed.approve(), PaymentStatus::Completed);
    }

    #[test]
    fn reject_only_from_pending() {
        assert!(PaymentStatus::Pending.can_reject());
        assert!(!PaymentStatus::Completed.can_reject());
        assert!(!PaymentStatus::Failed.can_reject());
    }

    #[test]
    fn pending_and_completed_block_resubmission() {
        assert!(PaymentStatus::Pending.blocks_resubmission());
        assert!(PaymentStatus::Completed.blocks_resubmission());
        assert!(!PaymentStatus::Failed.blocks_resubmission());
    }

    #[test]
    fn rent_status_projection() {
        assert_eq!(RentStatus::from_latest(None), RentStatus::Unpaid);
        assert_eq!(
            RentStatus::from_latest(Some(PaymentStatus::Pending)),
            RentStatus::Verifying
        );
        assert_eq!(
            RentStatus::from_latest(Some(PaymentStatus::Completed)),
            RentStatus::Paid
        );
        assert_eq!(
            RentStatus::from_latest(Some(PaymentStatus::Failed)),
            RentStatus::Unpaid
        );
    }
}
