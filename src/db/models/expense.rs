use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::{Date, OffsetDateTime};
use validator::Validate;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub category: String,
    pub amount: i64,
    pub description: Option<String>,
    pub expense_date: Date,
    pub expense_month: String,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewExpense {
    #[validate(length(min = 1, message = "Category must not be empty"))]
    pub category: String,
    #[validate(range(min = 1, message = "Amount must be positive"))]
    pub amount: i64,
    pub description: Option<String>,
    pub expense_date: Date,
}
