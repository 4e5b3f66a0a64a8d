use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::config::MailConfig;

/// A file attached to an outbound email.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub name: String,
    pub mime: &'static str,
    pub data: Vec<u8>,
}

/// Outbound email: a template id plus its substitution context. The
/// wire delivery (SMTP) lives outside the core; this is the narrow
/// interface the workflows call through.
#[derive(Debug, Clone)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub template: &'static str,
    pub context: BTreeMap<&'static str, String>,
    pub attachments: Vec<Attachment>,
}

impl OutboundEmail {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, template: &'static str) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            template,
            context: BTreeMap::new(),
            attachments: Vec::new(),
        }
    }

    pub fn with(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.context.insert(key, value.into());
        self
    }

    pub fn attach(mut self, name: impl Into<String>, mime: &'static str, data: Vec<u8>) -> Self {
        self.attachments.push(Attachment {
            name: name.into(),
            mime,
            data,
        });
        self
    }
}

/// Delivery failure is reported as `false`, never as an error: state
/// transitions that already committed must not be rolled back by a
/// notification problem.
pub trait Mailer: Send + Sync {
    fn send(&self, email: &OutboundEmail) -> bool;
}

/// Logs outbound mail instead of delivering it. Used whenever SMTP
/// credentials are not configured, and as the delivery stand-in in
/// tests.
pub struct LogMailer {
    from_name: String,
    configured: bool,
}

impl LogMailer {
    pub fn from_config(config: &MailConfig) -> Self {
        let configured = config.username.is_some() && config.password.is_some();
        if configured {
            warn!("SMTP credentials set but wire delivery is handled externally; logging only");
        }
        Self {
            from_name: config.from_name.clone(),
            configured,
        }
    }
}

impl Mailer for LogMailer {
    fn send(&self, email: &OutboundEmail) -> bool {
        info!(
            to = %email.to,
            subject = %email.subject,
            template = email.template,
            from = %self.from_name,
            attachments = email.attachments.len(),
            configured = self.configured,
            "outbound email"
        );
        true
    }
}
