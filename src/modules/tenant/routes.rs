use axum::routing::{get, post};
use axum::Router;

use crate::app_state::AppState;

use super::handlers::{
    get_settings, list_complaints, list_notices, pay_rent, payment_history, raise_complaint,
    tenant_dashboard, update_settings,
};

pub fn tenant_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(tenant_dashboard))
        .route("/pay", post(pay_rent))
        .route("/payments", get(payment_history))
        .route("/complaints", get(list_complaints))
        .route("/complaint", post(raise_complaint))
        .route("/notices", get(list_notices))
        .route("/settings", get(get_settings).post(update_settings))
}
