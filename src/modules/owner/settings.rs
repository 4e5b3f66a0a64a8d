use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use crate::app_state::AppState;
use crate::db::models::{
    Owner, OwnerPreferences, Property, UpdateOwnerSettings, UpdatePropertySettings,
};
use crate::db::repositories::{OwnerRepository, PropertyRepository};
use crate::error::AppResult;
use crate::middleware::auth::OwnerSession;

use super::current_owner;

#[derive(Debug, Serialize)]
pub struct SettingsView {
    pub full_name: String,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub upi_id: Option<String>,
    pub account_holder_name: Option<String>,
    pub bank_name: Option<String>,
    pub account_number: Option<String>,
    pub ifsc_code: Option<String>,
    pub preferences: OwnerPreferences,
    pub has_qr_code: bool,
    pub property: Option<Property>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SettingsUpdate {
    #[serde(flatten)]
    #[validate(nested)]
    pub owner: UpdateOwnerSettings,
    #[validate(nested)]
    pub property: Option<UpdatePropertySettings>,
}

fn preferences_of(owner: &Owner) -> OwnerPreferences {
    owner
        .preferences
        .clone()
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default()
}

pub async fn get_settings(
    State(state): State<AppState>,
    session: OwnerSession,
) -> AppResult<Json<SettingsView>> {
    let owner = current_owner(&state.db, &session).await?;
    let email = OwnerRepository::account_email(&state.db, owner.id).await?;
    let property = PropertyRepository::find_default(&state.db, owner.id).await?;

    Ok(Json(SettingsView {
        full_name: owner.full_name.clone(),
        phone_number: owner.phone_number.clone(),
        email,
        upi_id: owner.upi_id.clone(),
        account_holder_name: owner.account_holder_name.clone(),
        bank_name: owner.bank_name.clone(),
        account_number: owner.account_number.clone(),
        ifsc_code: owner.ifsc_code.clone(),
        preferences: preferences_of(&owner),
        has_qr_code: owner.qr_code_data.is_some(),
        property,
    }))
}

/// Update profile, billing and preferences; the property's house-rule
/// fields are upserted alongside (the default property is created on
/// first save).
pub async fn update_settings(
    State(state): State<AppState>,
    session: OwnerSession,
    Json(req): Json<SettingsUpdate>,
) -> AppResult<Json<serde_json::Value>> {
    req.validate()?;
    let owner = current_owner(&state.db, &session).await?;

    OwnerRepository::update_settings(&state.db, owner.id, &req.owner).await?;

    if let Some(property_update) = &req.property {
        let property = match PropertyRepository::find_default(&state.db, owner.id).await? {
            Some(property) => property,
            None => PropertyRepository::create_default(&state.db, owner.id).await?,
        };
        PropertyRepository::update_settings(&state.db, property.id, property_update).await?;
    }

    Ok(Json(json!({ "success": true, "message": "Settings updated successfully!" })))
}
