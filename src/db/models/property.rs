use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;
use validator::Validate;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Property {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub address: Option<String>,
    pub wifi_ssid: Option<String>,
    pub wifi_password: Option<String>,
    pub gate_closing_time: Option<String>,
    pub house_rules: Option<String>,
    pub late_fee_daily: i64,
    pub rent_grace_period_days: i32,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePropertySettings {
    pub wifi_ssid: Option<String>,
    pub wifi_password: Option<String>,
    pub gate_closing_time: Option<String>,
    pub house_rules: Option<String>,
    #[validate(range(min = 0))]
    pub late_fee_daily: Option<i64>,
    #[validate(range(min = 0))]
    pub rent_grace_period_days: Option<i32>,
}
