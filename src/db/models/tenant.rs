use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::{Date, OffsetDateTime};
use validator::Validate;

/// Tenant lifecycle. DRAFT rows are owner-side scratch entries not yet
/// visible to the tenant; EXITED, LEFT, MOVED_OUT and REJECTED are all
/// terminal (the latter two survive from older data).
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "onboarding_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OnboardingStatus {
    Draft,
    Pending,
    Active,
    Notice,
    Exited,
    Left,
    MovedOut,
    Rejected,
}

impl OnboardingStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OnboardingStatus::Exited
                | OnboardingStatus::Left
                | OnboardingStatus::MovedOut
                | OnboardingStatus::Rejected
        )
    }

    /// States that count towards room occupancy and bed capacity.
    pub fn occupies_bed(&self) -> bool {
        matches!(
            self,
            OnboardingStatus::Active | OnboardingStatus::Pending | OnboardingStatus::Notice
        )
    }

    /// Whether the owner may move a tenant from `self` to `to`.
    ///
    /// Signup (PENDING -> ACTIVE) and rejection (row deletion from
    /// DRAFT/PENDING) are handled separately; this table covers the
    /// owner-driven status updates.
    pub fn can_transition_to(&self, to: OnboardingStatus) -> bool {
        matches!(
            (self, to),
            (OnboardingStatus::Draft, OnboardingStatus::Pending)
                | (OnboardingStatus::Pending, OnboardingStatus::Active)
                | (OnboardingStatus::Active, OnboardingStatus::Notice)
                | (OnboardingStatus::Notice, OnboardingStatus::Exited)
        )
    }

    /// Rejection deletes the row; only pre-occupancy states qualify.
    pub fn can_reject(&self) -> bool {
        matches!(self, OnboardingStatus::Draft | OnboardingStatus::Pending)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OnboardingStatus::Draft => "DRAFT",
            OnboardingStatus::Pending => "PENDING",
            OnboardingStatus::Active => "ACTIVE",
            OnboardingStatus::Notice => "NOTICE",
            OnboardingStatus::Exited => "EXITED",
            OnboardingStatus::Left => "LEFT",
            OnboardingStatus::MovedOut => "MOVED_OUT",
            OnboardingStatus::Rejected => "REJECTED",
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Tenant {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub user_id: Option<Uuid>,
    pub room_id: Option<Uuid>,
    pub full_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub room_number: Option<String>,
    pub bed_number: Option<String>,
    pub monthly_rent: i64,
    pub security_deposit: Option<i64>,
    pub lease_start: Option<Date>,
    pub lease_end: Option<Date>,
    pub onboarding_status: OnboardingStatus,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewTenant {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub full_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(equal = 10, message = "Phone number must contain exactly 10 digits"))]
    pub phone_number: String,
    pub room_number: Option<String>,
    pub bed_number: Option<String>,
    #[validate(range(min = 1, message = "Monthly rent is mandatory"))]
    pub monthly_rent: i64,
    pub lease_start: Option<Date>,
    pub lease_end: Option<Date>,
    /// "draft" stores the entry as DRAFT; anything else invites the
    /// tenant directly (PENDING).
    pub action: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTenantStatus {
    pub tenant_id: Uuid,
    pub status: OnboardingStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states_are_terminal() {
        for status in [
            OnboardingStatus::Exited,
            OnboardingStatus::Left,
            OnboardingStatus::MovedOut,
            OnboardingStatus::Rejected,
        ] {
            assert!(status.is_terminal());
            assert!(!status.occupies_bed());
        }
    }

    #[test]
    fn occupancy_counts_active_pending_notice() {
        assert!(OnboardingStatus::Active.occupies_bed());
        assert!(OnboardingStatus::Pending.occupies_bed());
        assert!(OnboardingStatus::Notice.occupies_bed());
        assert!(!OnboardingStatus::Draft.occupies_bed());
    }

    #[test]
    fn lifecycle_edges() {
        assert!(OnboardingStatus::Draft.can_transition_to(OnboardingStatus::Pending));
        assert!(OnboardingStatus::Pending.can_transition_to(OnboardingStatus::Active));
        assert!(OnboardingStatus::Active.can_transition_to(OnboardingStatus::Notice));
        assert!(OnboardingStatus::Notice.can_transition_to(OnboardingStatus::Exited));
    }

    #[test]
    fn no_shortcuts_or_reversals() {
        assert!(!OnboardingStatus::Draft.can_transition_to(OnboardingStatus::Active));
        assert!(!OnboardingStatus::Active.can_transition_to(OnboardingStatus::Exited));
        assert!(!OnboardingStatus::Notice.can_transition_to(OnboardingStatus::Active));
        assert!(!OnboardingStatus::Exited.can_transition_to(OnboardingStatus::Active));
        assert!(!OnboardingStatus::Pending.can_transition_to(OnboardingStatus::Draft));
    }

    #[test]
    fn rejection_only_before_occupancy() {
        assert!(OnboardingStatus::Draft.can_reject());
        assert!(OnboardingStatus::Pending.can_reject());
        assert!(!OnboardingStatus::Active.can_reject());
        assert!(!OnboardingStatus::Notice.can_reject());
        assert!(!OnboardingStatus::Exited.can_reject());
    }

    #[test]
    fn terminal_states_admit_nothing() {
        for from in [
            OnboardingStatus::Exited,
            OnboardingStatus::Left,
            OnboardingStatus::MovedOut,
            OnboardingStatus::Rejected,
        ] {
            for to in [
                OnboardingStatus::Draft,
                OnboardingStatus::Pending,
                OnboardingStatus::Active,
                OnboardingStatus::Notice,
                OnboardingStatus::Exited,
            ] {
                assert!(!from.can_transition_to(to));
            }
        }
    }
}
