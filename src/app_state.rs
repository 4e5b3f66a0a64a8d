use std::sync::Arc;

use sqlx::PgPool;

use crate::config;
use crate::notify::{Mailer, ReceiptRenderer};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub env: config::Config,
    pub mailer: Arc<dyn Mailer>,
    pub receipts: Arc<dyn ReceiptRenderer>,
}

impl AppState {
    pub fn new(
        db: PgPool,
        env: config::Config,
        mailer: Arc<dyn Mailer>,
        receipts: Arc<dyn ReceiptRenderer>,
    ) -> Self {
        Self {
            db,
            env,
            mailer,
            receipts,
        }
    }
}
