use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "priority_level", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum PriorityLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "complaint_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplaintStatus {
    Pending,
    InProgress,
    Resolved,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Complaint {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
    pub priority: PriorityLevel,
    pub status: ComplaintStatus,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewComplaint {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "Description must not be empty"))]
    pub description: String,
    pub priority: PriorityLevel,
}

/// Complaint joined with the raising tenant, for the owner views.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct ComplaintWithTenant {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub priority: PriorityLevel,
    pub status: ComplaintStatus,
    pub created_at: OffsetDateTime,
    pub tenant_name: String,
    pub room_number: Option<String>,
}
