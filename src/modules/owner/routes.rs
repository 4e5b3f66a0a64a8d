use axum::routing::{get, post};
use axum::Router;

use crate::app_state::AppState;

use super::complaints::{list_complaints, resolve_complaint};
use super::dashboard::owner_dashboard;
use super::finance::{add_expense, finance_overview};
use super::notices::{add_notice, delete_notice, list_notices};
use super::payments::{approve_payment, record_payment, reject_payment};
use super::properties::{add_room, available_rooms, edit_room, list_properties};
use super::reminders::{remind_all_tenants, remind_tenant};
use super::settings::{get_settings, update_settings};
use super::tenants::{add_tenant, list_tenants, tenant_details, update_tenant_status};

pub fn owner_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(owner_dashboard))
        .route("/tenants", get(list_tenants).post(add_tenant))
        .route("/tenants/:tenant_id", get(tenant_details))
        .route("/tenants/update-status", post(update_tenant_status))
        .route("/tenants/remind/:tenant_id", post(remind_tenant))
        .route("/tenants/remind-all", post(remind_all_tenants))
        .route("/properties", get(list_properties))
        .route("/properties/rooms/available", get(available_rooms))
        .route("/properties/add-room", post(add_room))
        .route("/properties/edit-room", post(edit_room))
        .route("/finance", get(finance_overview))
        .route("/add-expense", post(add_expense))
        .route("/payment/approve/:payment_id", post(approve_payment))
        .route("/payment/reject/:payment_id", post(reject_payment))
        .route("/record-payment", post(record_payment))
        .route("/complaints", get(list_complaints))
        .route("/complaints/resolve/:complaint_id", post(resolve_complaint))
        .route("/notices", get(list_notices).post(add_notice))
        .route("/notices/delete/:notice_id", post(delete_notice))
        .route("/settings", get(get_settings).post(update_settings))
}
