use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{Expense, NewExpense};
use crate::db::DatabaseError;

const EXPENSE_COLUMNS: &str =
    "id, owner_id, category, amount, description, expense_date, expense_month, created_at";

pub struct ExpenseRepository;

impl ExpenseRepository {
    pub async fn create(
        pool: &PgPool,
        owner_id: Uuid,
        expense: &NewExpense,
        month: &str,
    ) -> Result<Expense, DatabaseError> {
        let expense = sqlx::query_as::<_, Expense>(&format!(
            "INSERT INTO expenses (owner_id, category, amount, description, expense_date, \
             expense_month)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {EXPENSE_COLUMNS}"
        ))
        .bind(owner_id)
        .bind(&expense.category)
        .bind(expense.amount)
        .bind(expense.description.as_deref())
        .bind(expense.expense_date)
        .bind(month)
        .fetch_one(pool)
        .await?;

        Ok(expense)
    }

    pub async fn list_for_month(
        pool: &PgPool,
        owner_id: Uuid,
        month: &str,
    ) -> Result<Vec<Expense>, DatabaseError> {
        let expenses = sqlx::query_as::<_, Expense>(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expenses
             WHERE owner_id = $1 AND expense_month = $2
             ORDER BY expense_date DESC"
        ))
        .bind(owner_id)
        .bind(month)
        .fetch_all(pool)
        .await?;

        Ok(expenses)
    }

    pub async fn total_for_month(
        pool: &PgPool,
        owner_id: Uuid,
        month: &str,
    ) -> Result<i64, DatabaseError> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(amount), 0)::BIGINT FROM expenses
             WHERE owner_id = $1 AND expense_month = $2",
        )
        .bind(owner_id)
        .bind(month)
        .fetch_one(pool)
        .await?;

        Ok(total)
    }
}
