use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;

/// Category of a dashboard feed event. Stored as text so old rows
/// survive enum evolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    Payment,
    TenantAdd,
    Complaint,
    Notice,
    System,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Payment => "PAYMENT",
            EventType::TenantAdd => "TENANT_ADD",
            EventType::Complaint => "COMPLAINT",
            EventType::Notice => "NOTICE",
            EventType::System => "SYSTEM",
        }
    }

    pub fn from_str_lossy(s: &str) -> EventType {
        match s {
            "PAYMENT" => EventType::Payment,
            "TENANT_ADD" => EventType::TenantAdd,
            "COMPLAINT" => EventType::Complaint,
            "NOTICE" => EventType::Notice,
            _ => EventType::System,
        }
    }

    /// Accent color used by the dashboard feed widget.
    pub fn accent_color(&self) -> &'static str {
        match self {
            EventType::Payment => "green",
            EventType::TenantAdd => "blue",
            EventType::Complaint => "red",
            EventType::Notice => "amber",
            EventType::System => "gray",
        }
    }
}

/// Append-only dashboard feed row. State-changing operations append
/// one event; the dashboard reads the tail.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct ActivityLog {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub event_type: String,
    pub description: String,
    pub metadata: Option<serde_json::Value>,
    pub created_at: OffsetDateTime,
}

/// Feed entry as served to the dashboard, tagged with its category
/// color.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityFeedItem {
    pub event_type: EventType,
    pub description: String,
    pub color: &'static str,
    pub metadata: Option<serde_json::Value>,
    pub created_at: OffsetDateTime,
}

impl From<ActivityLog> for ActivityFeedItem {
    fn from(row: ActivityLog) -> Self {
        let event_type = EventType::from_str_lossy(&row.event_type);
        ActivityFeedItem {
            event_type,
            description: row.description,
            color: event_type.accent_color(),
            metadata: row.metadata,
            created_at: row.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_type_round_trips() {
        for et in [
            EventType::Payment,
            EventType::TenantAdd,
            EventType::Complaint,
            EventType::Notice,
            EventType::System,
        ] {
            assert_eq!(EventType::from_str_lossy(et.as_str()), et);
        }
    }

    #[test]
    fn unknown_event_type_falls_back_to_system() {
        assert_eq!(EventType::from_str_lossy("BULK_IMPORT"), EventType::System);
    }
}
