use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// One live verification code per email; reissue overwrites.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct OtpVerification {
    pub email: String,
    pub otp_code: String,
    pub created_at: OffsetDateTime,
    pub expires_at: OffsetDateTime,
}
