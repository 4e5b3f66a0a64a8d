use axum::extract::{Path, State};
use axum::Json;
use serde_json::json;
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;
use validator::Validate;

use crate::app_state::AppState;
use crate::db::models::{month_key, EventType, PaymentStatus, RecordManualPayment};
use crate::db::repositories::{
    ActivityRepository, OwnerRepository, PaymentFacts, PaymentRepository, TenantRepository,
};
use crate::db::DatabaseError;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::OwnerSession;
use crate::notify::{Mailer, OutboundEmail, ReceiptFacts, ReceiptRenderer};

use super::current_owner;

/// Post-commit notifications for an approved payment: receipt to the
/// tenant, confirmation to the owner's account email. Failures are
/// logged and swallowed — the approval has already committed.
pub fn send_approval_notifications(
    mailer: &dyn Mailer,
    receipts: &dyn ReceiptRenderer,
    facts: &PaymentFacts,
    owner_email: Option<&str>,
) {
    let receipt = receipts.render(&ReceiptFacts {
        transaction_id: facts.payment_id,
        date: facts.payment_date,
        tenant_name: facts.tenant_name.clone(),
        tenant_room: facts.room_number.clone(),
        amount: facts.amount,
        month: facts.payment_month.clone(),
        payment_mode: facts.payment_mode.clone(),
        owner_name: facts.owner_name.clone(),
    });

    let tenant_mail = OutboundEmail::new(
        &facts.tenant_email,
        format!("Rent Receipt: {}", facts.payment_month),
        "emails/rent_receipt",
    )
    .with("tenant_name", &facts.tenant_name)
    .with("month", &facts.payment_month)
    .with("amount", facts.amount.to_string())
    .attach(
        format!("Receipt_{}.pdf", facts.payment_month),
        "application/pdf",
        receipt,
    );
    if !mailer.send(&tenant_mail) {
        error!(to = %facts.tenant_email, "failed to send rent receipt");
    }

    match owner_email {
        Some(to) => {
            let owner_mail = OutboundEmail::new(
                to,
                format!("Payment Verified: ₹{}", facts.amount),
                "emails/payment_notification",
            )
            .with("owner_name", &facts.owner_name)
            .with("tenant_name", &facts.tenant_name)
            .with("room_number", facts.room_number.clone().unwrap_or_default())
            .with("month", &facts.payment_month)
            .with("amount", facts.amount.to_string());
            if !mailer.send(&owner_mail) {
                error!(to, "failed to send owner payment confirmation");
            }
        }
        None => error!("owner account email missing, skipping confirmation"),
    }
}

/// Mark a pending payment COMPLETED. Re-approving an already completed
/// payment leaves the row unchanged but re-runs the notifications.
pub async fn approve(
    pool: &PgPool,
    mailer: &dyn Mailer,
    receipts: &dyn ReceiptRenderer,
    owner_id: Uuid,
    payment_id: Uuid,
) -> AppResult<()> {
    let mut tx = pool.begin().await.map_err(DatabaseError::from)?;

    let facts = PaymentRepository::fetch_facts(&mut tx, payment_id, owner_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Payment not found".into()))?;

    PaymentRepository::set_status(&mut tx, payment_id, facts.status.approve()).await?;
    ActivityRepository::append_tx(
        &mut tx,
        owner_id,
        EventType::Payment,
        &format!(
            "Verified payment of ₹{} from {}",
            facts.amount, facts.tenant_name
        ),
        Some(json!({ "payment_id": payment_id })),
    )
    .await?;

    tx.commit().await.map_err(DatabaseError::from)?;

    info!(%payment_id, owner_id = %owner_id, amount = facts.amount, "payment verified");

    let owner_email = OwnerRepository::account_email(pool, owner_id)
        .await
        .unwrap_or_else(|e| {
            error!(error = %e, "could not resolve owner email");
            None
        });
    send_approval_notifications(mailer, receipts, &facts, owner_email.as_deref());

    Ok(())
}

/// Mark a pending payment FAILED. No tenant notification is sent on
/// rejection.
pub async fn reject(pool: &PgPool, owner_id: Uuid, payment_id: Uuid) -> AppResult<()> {
    let mut tx = pool.begin().await.map_err(DatabaseError::from)?;

    let facts = PaymentRepository::fetch_facts(&mut tx, payment_id, owner_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Payment not found".into()))?;

    if !facts.status.can_reject() {
        return Err(AppError::StateConflict(
            "Only pending payments can be rejected".into(),
        ));
    }

    PaymentRepository::set_status(&mut tx, payment_id, PaymentStatus::Failed).await?;
    ActivityRepository::append_tx(
        &mut tx,
        owner_id,
        EventType::Payment,
        &format!(
            "Rejected payment of ₹{} from {}",
            facts.amount, facts.tenant_name
        ),
        Some(json!({ "payment_id": payment_id })),
    )
    .await?;

    tx.commit().await.map_err(DatabaseError::from)?;

    info!(%payment_id, owner_id = %owner_id, "payment rejected");
    Ok(())
}

pub async fn approve_payment(
    State(state): State<AppState>,
    session: OwnerSession,
    Path(payment_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let owner = current_owner(&state.db, &session).await?;
    approve(
        &state.db,
        state.mailer.as_ref(),
        state.receipts.as_ref(),
        owner.id,
        payment_id,
    )
    .await?;
    Ok(Json(json!({ "success": true, "message": "Payment verified successfully!" })))
}

pub async fn reject_payment(
    State(state): State<AppState>,
    session: OwnerSession,
    Path(payment_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let owner = current_owner(&state.db, &session).await?;
    reject(&state.db, owner.id, payment_id).await?;
    Ok(Json(json!({ "success": true, "message": "Payment rejected." })))
}

/// Offline collection entered by the owner; lands directly on
/// COMPLETED without passing the pending stage.
pub async fn record_payment(
    State(state): State<AppState>,
    session: OwnerSession,
    Json(req): Json<RecordManualPayment>,
) -> AppResult<Json<serde_json::Value>> {
    req.validate()?;
    let owner = current_owner(&state.db, &session).await?;

    let tenant = TenantRepository::find_owned(&state.db, owner.id, req.tenant_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Tenant not found".into()))?;

    let month = month_key(req.payment_date);
    let payment = PaymentRepository::insert(
        &state.db,
        tenant.id,
        owner.id,
        req.amount,
        req.payment_date,
        &month,
        PaymentStatus::Completed,
        &req.payment_mode,
        req.remarks.as_deref(),
    )
    .await?;

    ActivityRepository::append(
        &state.db,
        owner.id,
        EventType::Payment,
        &format!(
            "Recorded payment of ₹{} from {}",
            payment.amount, tenant.full_name
        ),
        Some(json!({ "payment_id": payment.id })),
    )
    .await?;

    Ok(Json(json!({ "success": true, "message": "Payment recorded!" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use time::{Date, Month};

    struct CountingMailer {
        sent: Mutex<Vec<String>>,
    }

    impl CountingMailer {
        fn new() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
            }
        }
    }

    impl Mailer for CountingMailer {
        fn send(&self, email: &OutboundEmail) -> bool {
            self.sent.lock().unwrap().push(email.to.clone());
            true
        }
    }

    fn facts() -> PaymentFacts {
        PaymentFacts {
            payment_id: Uuid::new_v4(),
            amount: 8_500,
            payment_date: Date::from_calendar_date(2025, Month::June, 2).unwrap(),
            payment_month: "2025-06".into(),
            payment_mode: Some("UPI".into()),
            status: PaymentStatus::Pending,
            tenant_name: "Asha Rao".into(),
            tenant_email: "asha@example.com".into(),
            room_number: Some("101".into()),
            owner_id: Uuid::new_v4(),
            owner_name: "R. Mehta".into(),
        }
    }

    #[test]
    fn approval_notifies_tenant_and_owner() {
        let mailer = CountingMailer::new();
        send_approval_notifications(
            &mailer,
            &crate::notify::TextReceiptRenderer,
            &facts(),
            Some("mehta@example.com"),
        );

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(
            *sent,
            vec!["asha@example.com".to_string(), "mehta@example.com".to_string()]
        );
    }

    #[test]
    fn notifications_are_not_idempotent() {
        // The stored transition is idempotent, the side effects are
        // not: a second approval sends everything again.
        let mailer = CountingMailer::new();
        let facts = facts();
        send_approval_notifications(
            &mailer,
            &crate::notify::TextReceiptRenderer,
            &facts,
            Some("mehta@example.com"),
        );
        send_approval_notifications(
            &mailer,
            &crate::notify::TextReceiptRenderer,
            &facts,
            Some("mehta@example.com"),
        );

        assert_eq!(mailer.sent.lock().unwrap().len(), 4);
    }

    #[test]
    fn missing_owner_email_still_notifies_tenant() {
        let mailer = CountingMailer::new();
        send_approval_notifications(&mailer, &crate::notify::TextReceiptRenderer, &facts(), None);

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(*sent, vec!["asha@example.com".to_string()]);
    }
}
