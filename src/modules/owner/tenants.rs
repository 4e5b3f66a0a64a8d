use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use time::OffsetDateTime;
use tracing::{error, info};
use uuid::Uuid;
use validator::Validate;

use crate::app_state::AppState;
use crate::db::models::{
    month_key, EventType, NewTenant, OnboardingStatus, Tenant, UpdateTenantStatus,
};
use crate::db::repositories::{
    ActivityRepository, PaymentRepository, PropertyRepository, RoomRepository, TenantFilter,
    TenantRepository, TenantSummary, UserRepository,
};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::OwnerSession;
use crate::notify::OutboundEmail;

use super::current_owner;

const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct TenantListQuery {
    #[serde(default)]
    pub filter: TenantFilter,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct Pagination {
    pub current_page: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
    pub total_count: i64,
    pub per_page: i64,
}

#[derive(Debug, Serialize)]
pub struct TenantStats {
    pub total: i64,
    pub active: i64,
    pub rent_due: i64,
    pub notice: i64,
}

#[derive(Debug, Serialize)]
pub struct TenantListResponse {
    pub tenants: Vec<TenantSummary>,
    pub pagination: Pagination,
    pub stats: TenantStats,
}

pub async fn list_tenants(
    State(state): State<AppState>,
    session: OwnerSession,
    Query(query): Query<TenantListQuery>,
) -> AppResult<Json<TenantListResponse>> {
    let owner = current_owner(&state.db, &session).await?;

    let page = query.page.unwrap_or(1).max(1);
    let per_page = query
        .per_page
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let offset = (page - 1) * per_page;

    let current_month = month_key(OffsetDateTime::now_utc().date());
    let (tenants, total_count) = TenantRepository::list(
        &state.db,
        owner.id,
        query.filter,
        query.search.as_deref(),
        &current_month,
        per_page,
        offset,
    )
    .await?;

    let total_pages = (total_count + per_page - 1) / per_page;

    let (active, _) = TenantRepository::active_stats(&state.db, owner.id).await?;
    let notice =
        TenantRepository::count_by_status(&state.db, owner.id, OnboardingStatus::Notice).await?;
    let (paid_count, _) =
        PaymentRepository::collected_for_month(&state.db, owner.id, &current_month).await?;
    let all_count = TenantRepository::count_all(&state.db, owner.id).await?;

    Ok(Json(TenantListResponse {
        tenants,
        pagination: Pagination {
            current_page: page,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
            total_count,
            per_page,
        },
        stats: TenantStats {
            total: all_count,
            active,
            rent_due: (active - paid_count).max(0),
            notice,
        },
    }))
}

/// Register a tenant under this owner. `action = "draft"` keeps the
/// entry owner-side only; otherwise the tenant is invited (PENDING)
/// and can complete signup.
pub async fn add_tenant(
    State(state): State<AppState>,
    session: OwnerSession,
    Json(req): Json<NewTenant>,
) -> AppResult<Json<Tenant>> {
    req.validate()?;
    if !req.phone_number.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::Validation(
            "Phone number must contain exactly 10 digits".into(),
        ));
    }

    let owner = current_owner(&state.db, &session).await?;

    if TenantRepository::exists_email_for_owner(&state.db, owner.id, &req.email).await? {
        return Err(AppError::Conflict(format!(
            "Tenant with email '{}' already exists.",
            req.email
        )));
    }
    if let Some(user) = UserRepository::find_by_email(&state.db, &req.email).await? {
        return Err(AppError::Conflict(format!(
            "Email '{}' is already registered as a {}. Cannot add as new tenant.",
            req.email,
            user.role.as_str()
        )));
    }
    if TenantRepository::exists_phone_for_owner(&state.db, owner.id, &req.phone_number).await? {
        return Err(AppError::Conflict(format!(
            "Tenant with phone number '{}' is already added.",
            req.phone_number
        )));
    }

    let status = if req.action.as_deref() == Some("draft") {
        OnboardingStatus::Draft
    } else {
        OnboardingStatus::Pending
    };

    let room_id = match req.room_number.as_deref() {
        Some(number) => RoomRepository::find_by_number(&state.db, owner.id, number)
            .await?
            .map(|r| r.id),
        None => None,
    };

    let tenant = TenantRepository::create(&state.db, owner.id, &req, room_id, status).await?;

    ActivityRepository::append(
        &state.db,
        owner.id,
        EventType::TenantAdd,
        &format!(
            "Added new tenant {} to Room {}",
            tenant.full_name,
            tenant.room_number.as_deref().unwrap_or("N/A")
        ),
        Some(json!({ "room": tenant.room_number })),
    )
    .await?;

    info!(tenant_id = %tenant.id, status = status.as_str(), "tenant added");
    Ok(Json(tenant))
}

pub async fn tenant_details(
    State(state): State<AppState>,
    session: OwnerSession,
    Path(tenant_id): Path<Uuid>,
) -> AppResult<Json<Tenant>> {
    let owner = current_owner(&state.db, &session).await?;
    let tenant = TenantRepository::find_owned(&state.db, owner.id, tenant_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Tenant not found".into()))?;
    Ok(Json(tenant))
}

/// Drive the onboarding lifecycle. REJECTED deletes the row (allowed
/// from DRAFT/PENDING only); a manual move to ACTIVE also sends the
/// welcome kit.
pub async fn update_tenant_status(
    State(state): State<AppState>,
    session: OwnerSession,
    Json(req): Json<UpdateTenantStatus>,
) -> AppResult<Json<serde_json::Value>> {
    let owner = current_owner(&state.db, &session).await?;
    let tenant = TenantRepository::find_owned(&state.db, owner.id, req.tenant_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Tenant not found".into()))?;

    if req.status == OnboardingStatus::Rejected {
        if !tenant.onboarding_status.can_reject() {
            return Err(AppError::StateConflict(format!(
                "Cannot reject a tenant in state {}",
                tenant.onboarding_status.as_str()
            )));
        }
        TenantRepository::delete(&state.db, tenant.id).await?;
        return Ok(Json(
            json!({ "success": true, "message": "Draft tenant rejected and removed." }),
        ));
    }

    if !tenant.onboarding_status.can_transition_to(req.status) {
        return Err(AppError::StateConflict(format!(
            "Cannot move tenant from {} to {}",
            tenant.onboarding_status.as_str(),
            req.status.as_str()
        )));
    }

    TenantRepository::update_status(&state.db, tenant.id, req.status).await?;

    if req.status == OnboardingStatus::Active {
        send_welcome_kit(&state, owner.id, &tenant).await;
        return Ok(Json(
            json!({ "success": true, "message": "Tenant activated! Welcome Kit sent." }),
        ));
    }

    Ok(Json(json!({
        "success": true,
        "message": format!("Tenant status updated to {}", req.status.as_str())
    })))
}

/// Best-effort welcome email with the property's house rules.
async fn send_welcome_kit(state: &AppState, owner_id: Uuid, tenant: &Tenant) {
    let property = match PropertyRepository::find_default(&state.db, owner_id).await {
        Ok(p) => p,
        Err(e) => {
            error!(error = %e, "could not load property for welcome kit");
            None
        }
    };

    let property_name = property
        .as_ref()
        .map(|p| p.name.clone())
        .unwrap_or_else(|| "your new PG".to_string());

    let mut email = OutboundEmail::new(
        &tenant.email,
        format!("Welcome to {}!", property_name),
        "emails/welcome_kit",
    )
    .with("tenant_name", &tenant.full_name)
    .with(
        "room_number",
        tenant.room_number.clone().unwrap_or_default(),
    )
    .with("property_name", property_name);

    if let Some(p) = property {
        email = email
            .with("wifi_ssid", p.wifi_ssid.unwrap_or_default())
            .with("wifi_password", p.wifi_password.unwrap_or_default())
            .with("gate_closing_time", p.gate_closing_time.unwrap_or_default())
            .with("house_rules", p.house_rules.unwrap_or_default());
    }

    if !state.mailer.send(&email) {
        error!(to = %tenant.email, "failed to send welcome kit");
    }
}
