use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::db::models::{ComplaintStatus, ComplaintWithTenant};
use crate::db::repositories::ComplaintRepository;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::OwnerSession;

use super::current_owner;

#[derive(Debug, Deserialize)]
pub struct ComplaintListQuery {
    pub status: Option<ComplaintStatus>,
}

/// Full complaints page: one status at a time, urgent first, unbounded.
pub async fn list_complaints(
    State(state): State<AppState>,
    session: OwnerSession,
    Query(query): Query<ComplaintListQuery>,
) -> AppResult<Json<Vec<ComplaintWithTenant>>> {
    let owner = current_owner(&state.db, &session).await?;
    let status = query.status.unwrap_or(ComplaintStatus::Pending);

    let complaints = ComplaintRepository::list_for_owner(&state.db, owner.id, status).await?;
    Ok(Json(complaints))
}

pub async fn resolve_complaint(
    State(state): State<AppState>,
    session: OwnerSession,
    Path(complaint_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let owner = current_owner(&state.db, &session).await?;

    let updated = ComplaintRepository::resolve(&state.db, owner.id, complaint_id).await?;
    if updated == 0 {
        return Err(AppError::NotFound("Complaint not found".into()));
    }

    Ok(Json(json!({ "success": true, "message": "Complaint marked as resolved!" })))
}
