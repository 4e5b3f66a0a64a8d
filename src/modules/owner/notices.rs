use axum::extract::{Path, State};
use axum::Json;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::app_state::AppState;
use crate::db::models::{EventType, NewNotice, Notice};
use crate::db::repositories::{ActivityRepository, NoticeRepository};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::OwnerSession;

use super::current_owner;

pub async fn list_notices(
    State(state): State<AppState>,
    session: OwnerSession,
) -> AppResult<Json<Vec<Notice>>> {
    let owner = current_owner(&state.db, &session).await?;
    let notices = NoticeRepository::list_for_owner(&state.db, owner.id, None).await?;
    Ok(Json(notices))
}

/// Broadcast a notice to all of the owner's tenants.
pub async fn add_notice(
    State(state): State<AppState>,
    session: OwnerSession,
    Json(req): Json<NewNotice>,
) -> AppResult<Json<Notice>> {
    req.validate()?;
    let owner = current_owner(&state.db, &session).await?;

    let notice = NoticeRepository::create(&state.db, owner.id, &req).await?;

    ActivityRepository::append(
        &state.db,
        owner.id,
        EventType::Notice,
        &format!("Posted notice: {}", notice.title),
        Some(json!({ "priority": notice.priority })),
    )
    .await?;

    Ok(Json(notice))
}

pub async fn delete_notice(
    State(state): State<AppState>,
    session: OwnerSession,
    Path(notice_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let owner = current_owner(&state.db, &session).await?;

    let deleted = NoticeRepository::delete(&state.db, owner.id, notice_id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound(
            "Notice not found or permission denied.".into(),
        ));
    }

    Ok(Json(json!({ "success": true, "message": "Notice deleted successfully!" })))
}
