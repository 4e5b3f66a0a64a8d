use axum::extract::State;
use axum::Json;
use secrecy::{ExposeSecret, SecretBox};
use serde::{Deserialize, Serialize};
use serde_json::json;
use time::OffsetDateTime;
use uuid::Uuid;
use validator::Validate;

use crate::app_state::AppState;
use crate::db::models::{
    month_key, Complaint, NewComplaint, Notice, Payment, PaymentStatus, RentStatus, SubmitPayment,
};
use crate::db::repositories::{
    ComplaintRepository, NoticeRepository, OwnerRepository, PaymentRepository, TenantRepository,
    UserRepository,
};
use crate::db::DatabaseError;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::TenantSession;
use crate::modules::auth::password;

use super::current_tenant;

#[derive(Debug, Serialize)]
pub struct TenantDashboard {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub room_number: Option<String>,
    pub bed_number: Option<String>,
    pub monthly_rent: i64,
    pub onboarding_status: crate::db::models::OnboardingStatus,
    pub rent_status: RentStatus,
    pub owner_upi: Option<String>,
    pub owner_id: Option<Uuid>,
}

/// Tenant home view: profile plus the latest-wins rent status for the
/// current month.
pub async fn tenant_dashboard(
    State(state): State<AppState>,
    session: TenantSession,
) -> AppResult<Json<TenantDashboard>> {
    let tenant = current_tenant(&state.db, &session).await?;

    let current_month = month_key(OffsetDateTime::now_utc().date());
    let latest =
        PaymentRepository::latest_status_for_month(&state.db, tenant.id, &current_month).await?;
    let rent_status = RentStatus::from_latest(latest);

    let owner = OwnerRepository::find_by_id(&state.db, tenant.owner_id).await?;

    Ok(Json(TenantDashboard {
        id: tenant.id,
        full_name: tenant.full_name,
        email: tenant.email,
        phone_number: tenant.phone_number,
        room_number: tenant.room_number,
        bed_number: tenant.bed_number,
        monthly_rent: tenant.monthly_rent,
        onboarding_status: tenant.onboarding_status,
        rent_status,
        owner_upi: owner.as_ref().and_then(|o| o.upi_id.clone()),
        owner_id: owner.map(|o| o.id),
    }))
}

/// Submit this month's rent for owner verification. One PENDING or
/// COMPLETED payment per month; the pre-insert check leaves a narrow
/// race between concurrent submissions.
pub async fn pay_rent(
    State(state): State<AppState>,
    session: TenantSession,
    Json(req): Json<SubmitPayment>,
) -> AppResult<Json<serde_json::Value>> {
    req.validate()?;
    let tenant = current_tenant(&state.db, &session).await?;

    let today = OffsetDateTime::now_utc().date();
    let current_month = month_key(today);

    if PaymentRepository::exists_blocking_for_month(&state.db, tenant.id, &current_month).await? {
        return Err(AppError::Conflict(
            "Payment for this month is already recorded or pending.".into(),
        ));
    }

    PaymentRepository::insert(
        &state.db,
        tenant.id,
        tenant.owner_id,
        req.amount,
        today,
        &current_month,
        PaymentStatus::Pending,
        "UPI",
        Some(&format!("Txn Ref: {}", req.transaction_id)),
    )
    .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Payment submitted for verification!"
    })))
}

pub async fn payment_history(
    State(state): State<AppState>,
    session: TenantSession,
) -> AppResult<Json<Vec<Payment>>> {
    let tenant = current_tenant(&state.db, &session).await?;
    let payments = PaymentRepository::history_for_tenant(&state.db, tenant.id).await?;
    Ok(Json(payments))
}

pub async fn list_complaints(
    State(state): State<AppState>,
    session: TenantSession,
) -> AppResult<Json<Vec<Complaint>>> {
    let tenant = current_tenant(&state.db, &session).await?;
    let complaints = ComplaintRepository::list_for_tenant(&state.db, tenant.id).await?;
    Ok(Json(complaints))
}

pub async fn raise_complaint(
    State(state): State<AppState>,
    session: TenantSession,
    Json(req): Json<NewComplaint>,
) -> AppResult<Json<Complaint>> {
    req.validate()?;
    let tenant = current_tenant(&state.db, &session).await?;

    let complaint =
        ComplaintRepository::create(&state.db, tenant.id, tenant.owner_id, &req).await?;

    Ok(Json(complaint))
}

/// Notices broadcast by this tenant's owner.
pub async fn list_notices(
    State(state): State<AppState>,
    session: TenantSession,
) -> AppResult<Json<Vec<Notice>>> {
    let tenant = current_tenant(&state.db, &session).await?;
    let notices = NoticeRepository::list_for_owner(&state.db, tenant.owner_id, None).await?;
    Ok(Json(notices))
}

#[derive(Debug, Serialize)]
pub struct TenantProfile {
    pub full_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub room_number: Option<String>,
    pub bed_number: Option<String>,
    pub lease_start: Option<time::Date>,
}

pub async fn get_settings(
    State(state): State<AppState>,
    session: TenantSession,
) -> AppResult<Json<TenantProfile>> {
    let tenant = current_tenant(&state.db, &session).await?;
    Ok(Json(TenantProfile {
        full_name: tenant.full_name,
        email: tenant.email,
        phone_number: tenant.phone_number,
        room_number: tenant.room_number,
        bed_number: tenant.bed_number,
        lease_start: tenant.lease_start,
    }))
}

#[derive(Debug, Deserialize, Validate)]
pub struct TenantSettingsUpdate {
    #[validate(length(equal = 10, message = "Phone number must contain exactly 10 digits"))]
    pub phone: String,
    pub password: Option<SecretBox<String>>,
}

/// Update contact phone and, when provided, the login password.
pub async fn update_settings(
    State(state): State<AppState>,
    session: TenantSession,
    Json(req): Json<TenantSettingsUpdate>,
) -> AppResult<Json<serde_json::Value>> {
    req.validate()?;
    current_tenant(&state.db, &session).await?;

    TenantRepository::update_phone(&state.db, session.0.user_id, &req.phone).await?;

    if let Some(new_password) = &req.password {
        let password_hash = password::hash_password(new_password.expose_secret())?;
        let mut tx = state.db.begin().await.map_err(DatabaseError::from)?;
        UserRepository::update_password(&mut tx, session.0.user_id, &password_hash).await?;
        tx.commit().await.map_err(DatabaseError::from)?;
    }

    Ok(Json(json!({ "success": true, "message": "Settings updated successfully!" })))
}
