use axum::extract::State;
use axum::Json;
use serde_json::json;
use validator::Validate;

use crate::app_state::AppState;
use crate::db::models::{
    ForgotPasswordRequest, LoginRequest, OtpRequest, ResetPasswordRequest, SignupRequest,
};
use crate::error::AppResult;

use super::service;

pub async fn send_otp(
    State(state): State<AppState>,
    Json(req): Json<OtpRequest>,
) -> AppResult<Json<serde_json::Value>> {
    req.validate()?;
    service::request_otp(&state.db, state.mailer.as_ref(), &req.email).await?;
    Ok(Json(json!({ "success": true, "message": "OTP sent successfully!" })))
}

pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> AppResult<Json<service::AuthResponse>> {
    req.validate()?;
    let response = service::signup(&state.db, &state.env.auth, &req).await?;
    Ok(Json(response))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<service::AuthResponse>> {
    req.validate()?;
    let response = service::login(&state.db, &state.env.auth, &req).await?;
    Ok(Json(response))
}

pub async fn forgot_password(
    State(state): State<AppState>,
    Json(req): Json<ForgotPasswordRequest>,
) -> AppResult<Json<serde_json::Value>> {
    req.validate()?;
    service::request_password_reset(&state.db, state.mailer.as_ref(), &req.email).await?;
    // Identical response for known and unknown emails.
    Ok(Json(json!({
        "success": true,
        "message": "If that email has an account, a reset link is on its way."
    })))
}

pub async fn reset_password(
    State(state): State<AppState>,
    Json(req): Json<ResetPasswordRequest>,
) -> AppResult<Json<serde_json::Value>> {
    use secrecy::ExposeSecret;
    req.validate()?;
    service::reset_password(&state.db, &req.token, req.new_password.expose_secret()).await?;
    Ok(Json(json!({ "success": true, "message": "Password updated. Please log in." })))
}
