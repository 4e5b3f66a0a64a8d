use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use uuid::Uuid;

use crate::app_state::AppState;
use crate::db::models::UserRole;
use crate::error::AppError;
use crate::modules::auth::token::decode_session_token;

/// Authenticated principal, decoded from the bearer token. Handlers
/// receive this value explicitly; nothing reads ambient session state.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: Uuid,
    pub role: UserRole,
    pub name: String,
}

#[async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Authentication("missing authorization header".into()))?;

        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Authentication("expected bearer token".into()))?;

        let claims = decode_session_token(token, &state.env.auth)?;
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Authentication("malformed subject claim".into()))?;

        Ok(Session {
            user_id,
            role: claims.role,
            name: claims.name,
        })
    }
}

/// Session gated to the OWNER role.
#[derive(Debug, Clone)]
pub struct OwnerSession(pub Session);

#[async_trait]
impl FromRequestParts<AppState> for OwnerSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state).await?;
        if session.role != UserRole::Owner {
            return Err(AppError::Authorization(
                "owner account required".into(),
            ));
        }
        Ok(OwnerSession(session))
    }
}

/// Session gated to the TENANT role.
#[derive(Debug, Clone)]
pub struct TenantSession(pub Session);

#[async_trait]
impl FromRequestParts<AppState> for TenantSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state).await?;
        if session.role != UserRole::Tenant {
            return Err(AppError::Authorization(
                "tenant account required".into(),
            ));
        }
        Ok(TenantSession(session))
    }
}
