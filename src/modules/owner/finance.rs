use std::collections::HashMap;

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use time::{Date, OffsetDateTime};
use uuid::Uuid;
use validator::Validate;

use crate::app_state::AppState;
use crate::db::models::{month_key, Expense, NewExpense, OnboardingStatus};
use crate::db::repositories::{
    ExpenseRepository, PaymentRepository, PendingApproval, TenantFilter, TenantRepository,
};
use crate::error::AppResult;
use crate::middleware::auth::OwnerSession;

use super::current_owner;

/// Per-tenant rent line for the month.
#[derive(Debug, Serialize)]
pub struct RentLine {
    pub tenant_id: Uuid,
    pub name: String,
    pub room_number: Option<String>,
    pub rent: i64,
    pub payment_status: &'static str,
    pub paid_amount: i64,
    pub paid_date: Option<Date>,
}

#[derive(Debug, Serialize)]
pub struct FinanceView {
    pub current_month: String,
    pub tenants: Vec<RentLine>,
    pub expenses: Vec<Expense>,
    pub pending_approvals: Vec<PendingApproval>,
    pub total_income: i64,
    pub total_expenses: i64,
    pub net_profit: i64,
}

/// Month ledger: who has paid, what was spent, what awaits approval.
pub async fn finance_overview(
    State(state): State<AppState>,
    session: OwnerSession,
) -> AppResult<Json<FinanceView>> {
    let owner = current_owner(&state.db, &session).await?;
    let current_month = month_key(OffsetDateTime::now_utc().date());

    let paid: HashMap<Uuid, (i64, Date)> =
        PaymentRepository::completed_by_tenant_for_month(&state.db, owner.id, &current_month)
            .await?
            .into_iter()
            .map(|(tenant_id, amount, date)| (tenant_id, (amount, date)))
            .collect();

    // ACTIVE and NOTICE tenants are both expected to pay this month.
    let (tenants, _) = TenantRepository::list(
        &state.db,
        owner.id,
        TenantFilter::All,
        None,
        &current_month,
        i64::MAX,
        0,
    )
    .await?;

    let mut lines = Vec::new();
    let mut total_income = 0;
    for tenant in tenants.iter().filter(|t| {
        matches!(
            t.onboarding_status,
            OnboardingStatus::Active | OnboardingStatus::Notice
        )
    }) {
        let payment = paid.get(&tenant.id);
        let paid_amount = payment.map(|(amount, _)| *amount).unwrap_or(0);
        total_income += paid_amount;
        lines.push(RentLine {
            tenant_id: tenant.id,
            name: tenant.full_name.clone(),
            room_number: tenant.room_number.clone(),
            rent: tenant.monthly_rent,
            payment_status: if payment.is_some() { "PAID" } else { "PENDING" },
            paid_amount,
            paid_date: payment.map(|(_, date)| *date),
        });
    }
    lines.sort_by(|a, b| a.room_number.cmp(&b.room_number));

    let expenses = ExpenseRepository::list_for_month(&state.db, owner.id, &current_month).await?;
    let total_expenses = expenses.iter().map(|e| e.amount).sum::<i64>();

    let pending_approvals = PaymentRepository::pending_for_owner(&state.db, owner.id, None).await?;

    Ok(Json(FinanceView {
        current_month,
        tenants: lines,
        expenses,
        pending_approvals,
        total_income,
        total_expenses,
        net_profit: total_income - total_expenses,
    }))
}

pub async fn add_expense(
    State(state): State<AppState>,
    session: OwnerSession,
    Json(req): Json<NewExpense>,
) -> AppResult<Json<Expense>> {
    req.validate()?;
    let owner = current_owner(&state.db, &session).await?;

    let month = month_key(req.expense_date);
    let expense = ExpenseRepository::create(&state.db, owner.id, &req, &month).await?;

    Ok(Json(expense))
}
