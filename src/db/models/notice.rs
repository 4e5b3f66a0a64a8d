use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;
use validator::Validate;

use super::PriorityLevel;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Notice {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
    pub priority: PriorityLevel,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewNotice {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "Description must not be empty"))]
    pub description: String,
    pub priority: PriorityLevel,
}
