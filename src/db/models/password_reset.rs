use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// One live reset token per email; reissue overwrites, use deletes.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct PasswordResetToken {
    pub email: String,
    pub token: String,
    pub created_at: OffsetDateTime,
    pub expires_at: OffsetDateTime,
}
