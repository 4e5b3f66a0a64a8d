use axum::{routing::post, Router};

use crate::app_state::AppState;

use super::handlers::{forgot_password, login, reset_password, send_otp, signup};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/send-otp", post(send_otp))
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/forgot-password", post(forgot_password))
        .route("/reset-password", post(reset_password))
}
