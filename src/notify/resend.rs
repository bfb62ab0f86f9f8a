// SPDX-License-Identifier: MIT

//! Resend transactional email API

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{MailTransport, NotificationRequest};
use crate::config::NotifyConfig;
use crate::error::{ConcheckError, Result};

#[derive(Debug, Deserialize)]
struct SentEmail {
    id: String,
}

/// Sends one email per call through `POST {base_url}/emails`
pub struct ResendClient {
    client: Client,
    api_key: String,
    base_url: String,
    from: String,
}

impl ResendClient {
    pub fn new(config: &NotifyConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            from: config.from_header(),
        }
    }

    fn payload(&self, request: &NotificationRequest) -> Value {
        json!({
            "from": self.from,
            "to": [request.recipient],
            "subject": request.subject,
            "html": request.html,
        })
    }
}

#[async_trait]
impl MailTransport for ResendClient {
    async fn send(&self, request: &NotificationRequest) -> Result<String> {
        let url = format!("{}/emails", self.base_url);
        let body = self.payload(request);

        log::debug!("Sending notification to {} via {}", request.recipient, url);

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ConcheckError::notification(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(ConcheckError::notification(format!(
                "Resend API error ({}): {}",
                status, text
            )));
        }

        let sent: SentEmail = resp
            .json()
            .await
            .map_err(|e| ConcheckError::notification(format!("Invalid Resend response: {}", e)))?;

        log::info!("Resend accepted email {} for {}", sent.id, request.recipient);
        Ok(sent.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> NotifyConfig {
        NotifyConfig {
            sender: "alerts@example.com".to_string(),
            sender_name: "Concheck Script".to_string(),
            api_key: "re_test".to_string(),
            base_url: "https://api.resend.com".to_string(),
        }
    }

    fn request() -> NotificationRequest {
        NotificationRequest {
            recipient: "me@example.com".to_string(),
            subject: "Concheck: condition satisfied on 03/02/2024 - 09:05".to_string(),
            timestamp: "03/02/2024 - 09:05".to_string(),
            html: "<p>done</p>".to_string(),
        }
    }

    #[test]
    fn test_payload_shape() {
        let client = ResendClient::new(&config());
        let payload = client.payload(&request());

        assert_eq!(payload["from"], "Concheck Script <alerts@example.com>");
        assert_eq!(payload["to"], json!(["me@example.com"]));
        assert_eq!(
            payload["subject"],
            "Concheck: condition satisfied on 03/02/2024 - 09:05"
        );
        assert_eq!(payload["html"], "<p>done</p>");
    }

    #[test]
    fn test_sent_email_parses() {
        let sent: SentEmail =
            serde_json::from_value(json!({"id": "49a3999c-0ce1-4ea6-ab68-afcd6dc2e794"})).unwrap();
        assert_eq!(sent.id, "49a3999c-0ce1-4ea6-ab68-afcd6dc2e794");
    }
}
