use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;
use validator::Validate;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Owner {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub phone_number: Option<String>,
    pub business_name: Option<String>,
    pub upi_id: Option<String>,
    pub account_holder_name: Option<String>,
    pub bank_name: Option<String>,
    pub account_number: Option<String>,
    pub ifsc_code: Option<String>,
    pub preferences: Option<serde_json::Value>,
    #[serde(skip_serializing)]
    pub qr_code_data: Option<Vec<u8>>,
    pub created_at: OffsetDateTime,
}

/// Alert and display preferences stored as JSONB on the owner row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerPreferences {
    pub email_alerts: bool,
    pub sms_alerts: bool,
    pub dark_mode: bool,
}

impl Default for OwnerPreferences {
    fn default() -> Self {
        Self {
            email_alerts: true,
            sms_alerts: true,
            dark_mode: false,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateOwnerSettings {
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub upi_id: Option<String>,
    pub account_holder_name: Option<String>,
    pub bank_name: Option<String>,
    pub account_number: Option<String>,
    pub ifsc_code: Option<String>,
    pub preferences: Option<OwnerPreferences>,
    /// Raw PNG bytes of an uploaded payment QR code.
    pub qr_code_data: Option<Vec<u8>>,
}
