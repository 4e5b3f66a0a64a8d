pub mod complaints;
pub mod dashboard;
pub mod finance;
pub mod notices;
pub mod payments;
pub mod properties;
pub mod reminders;
pub mod routes;
pub mod settings;
pub mod tenants;

use sqlx::PgPool;

use crate::db::models::Owner;
use crate::db::repositories::OwnerRepository;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::OwnerSession;

/// Resolve the owner profile behind an authenticated session. Every
/// owner handler goes through this before touching owner-scoped data.
pub async fn current_owner(pool: &PgPool, session: &OwnerSession) -> AppResult<Owner> {
    OwnerRepository::find_by_user_id(pool, session.0.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Owner profile not found".into()))
}
