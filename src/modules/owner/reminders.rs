use axum::extract::{Path, State};
use axum::Json;
use serde_json::json;
use time::OffsetDateTime;
use tracing::{error, info};
use uuid::Uuid;

use crate::app_state::AppState;
use crate::db::models::month_key;
use crate::db::repositories::{PropertyRepository, TenantRepository};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::OwnerSession;
use crate::notify::OutboundEmail;

use super::current_owner;

fn reminder_email(
    to: &str,
    tenant_name: &str,
    room_number: Option<&str>,
    rent: i64,
    month: &str,
    owner_name: &str,
    property_name: &str,
) -> OutboundEmail {
    OutboundEmail::new(
        to,
        format!("Rent Reminder - {}", property_name),
        "emails/rent_reminder",
    )
    .with("tenant_name", tenant_name)
    .with("rent_amount", rent.to_string())
    .with("room_number", room_number.unwrap_or_default())
    .with("payment_month", month)
    .with("owner_name", owner_name)
}

/// Email a single tenant their rent reminder.
pub async fn remind_tenant(
    State(state): State<AppState>,
    session: OwnerSession,
    Path(tenant_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let owner = current_owner(&state.db, &session).await?;
    let tenant = TenantRepository::find_owned(&state.db, owner.id, tenant_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Tenant not found".into()))?;

    let property_name = PropertyRepository::find_default(&state.db, owner.id)
        .await?
        .map(|p| p.name)
        .unwrap_or_else(|| "your PG".to_string());

    let month = month_key(OffsetDateTime::now_utc().date());
    let email = reminder_email(
        &tenant.email,
        &tenant.full_name,
        tenant.room_number.as_deref(),
        tenant.monthly_rent,
        &month,
        &owner.full_name,
        &property_name,
    );

    if state.mailer.send(&email) {
        Ok(Json(json!({
            "success": true,
            "message": format!("Reminder email sent to {}", tenant.full_name)
        })))
    } else {
        Err(AppError::InternalServerError(
            "Failed to send email".into(),
        ))
    }
}

/// Kick off a background sweep that emails every ACTIVE tenant still
/// owing rent this month. Fire-and-forget: the request returns
/// immediately, failures are only logged.
pub async fn remind_all_tenants(
    State(state): State<AppState>,
    session: OwnerSession,
) -> AppResult<Json<serde_json::Value>> {
    let owner = current_owner(&state.db, &session).await?;

    tokio::spawn(async move {
        if let Err(e) = bulk_reminder_sweep(&state, owner.id, &owner.full_name).await {
            error!(error = %e, owner_id = %owner.id, "bulk reminder sweep failed");
        }
    });

    Ok(Json(json!({
        "success": true,
        "message": "Background process started! Emails are being sent."
    })))
}

async fn bulk_reminder_sweep(
    state: &AppState,
    owner_id: Uuid,
    owner_name: &str,
) -> AppResult<()> {
    let month = month_key(OffsetDateTime::now_utc().date());
    let property_name = PropertyRepository::find_default(&state.db, owner_id)
        .await?
        .map(|p| p.name)
        .unwrap_or_else(|| "your PG".to_string());

    let targets = TenantRepository::reminder_targets(&state.db, owner_id, &month).await?;

    let mut sent = 0usize;
    for target in &targets {
        let email = reminder_email(
            &target.email,
            &target.full_name,
            target.room_number.as_deref(),
            target.monthly_rent,
            &month,
            owner_name,
            &property_name,
        );
        if state.mailer.send(&email) {
            sent += 1;
        } else {
            error!(to = %target.email, "failed to send rent reminder");
        }
    }

    info!(owner_id = %owner_id, sent, total = targets.len(), "bulk reminder sweep complete");
    Ok(())
}
