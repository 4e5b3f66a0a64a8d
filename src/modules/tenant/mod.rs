pub mod handlers;
pub mod routes;

use sqlx::PgPool;

use crate::db::models::Tenant;
use crate::db::repositories::TenantRepository;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::TenantSession;

/// Resolve the tenant record linked to an authenticated session.
pub async fn current_tenant(pool: &PgPool, session: &TenantSession) -> AppResult<Tenant> {
    TenantRepository::find_by_user_id(pool, session.0.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Tenant record not found".into()))
}
