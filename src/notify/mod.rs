// SPDX-License-Identifier: MIT

//! Notification email for a satisfied condition
//!
//! This module composes the email and hands it to a [`MailTransport`]:
//! - [template] - body template and placeholder substitution
//! - [resend] - the Resend API transport

pub mod resend;
pub mod template;

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;
use std::sync::Arc;

pub use resend::ResendClient;
pub use template::MailTemplate;

use crate::config::NotifyConfig;
use crate::error::Result;

/// Local timestamp format used in the subject and the body
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y - %H:%M";

pub fn format_timestamp<Tz>(time: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    time.format(TIMESTAMP_FORMAT).to_string()
}

pub fn subject_for(timestamp: &str) -> String {
    format!("Concheck: condition satisfied on {}", timestamp)
}

/// One email, built when a condition is satisfied and sent once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    pub recipient: String,
    pub subject: String,
    pub timestamp: String,
    pub html: String,
}

impl NotificationRequest {
    pub fn compose(template: &MailTemplate, recipient: &str, timestamp: String) -> Result<Self> {
        let html = template.render(recipient, &timestamp)?;
        Ok(Self {
            recipient: recipient.to_string(),
            subject: subject_for(&timestamp),
            timestamp,
            html,
        })
    }
}

/// Delivers a composed email
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Send the email, returning the provider's message id
    async fn send(&self, request: &NotificationRequest) -> Result<String>;
}

/// Composes and sends the notification email
pub struct Notifier {
    template: MailTemplate,
    transport: Arc<dyn MailTransport>,
}

impl Notifier {
    pub fn new(template: MailTemplate, transport: Arc<dyn MailTransport>) -> Self {
        Self {
            template,
            transport,
        }
    }

    /// Notifier backed by the Resend API
    pub fn resend(config: &NotifyConfig, template: MailTemplate) -> Self {
        Self::new(template, Arc::new(ResendClient::new(config)))
    }

    pub fn compose<Tz>(&self, recipient: &str, at: &DateTime<Tz>) -> Result<NotificationRequest>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        NotificationRequest::compose(&self.template, recipient, format_timestamp(at))
    }

    /// Compose with the current local time and send
    pub async fn notify(&self, recipient: &str) -> Result<NotificationRequest> {
        let request = self.compose(recipient, &Local::now())?;
        self.transport.send(&request).await?;
        Ok(request)
    }
}
