//! Email delivery client
//!
//! Sends validated contact messages through the hosted template service.

use chrono::Local;
use serde_json::json;
use tracing::{error, info};

use shared::models::ContactMessage;

use crate::config::EmailSettings;
use crate::http::{build_client, handle_empty};
use crate::ClientResult;

/// HTTP client for the hosted email delivery service
#[derive(Debug, Clone)]
pub struct EmailClient {
    client: reqwest::Client,
    settings: EmailSettings,
}

/// Template parameters for a contact message
fn template_params(message: &ContactMessage, to_email: &str, time: &str) -> serde_json::Value {
    json!({
        "name": message.name,
        "email": message.email,
        "subject": message.subject,
        "message": message.message,
        "time": time,
        "to_email": to_email,
    })
}

impl EmailClient {
    /// Create a new email client
    pub fn new(settings: EmailSettings, timeout_secs: u64) -> Self {
        Self {
            client: build_client(timeout_secs),
            settings,
        }
    }

    /// Send a contact message through the template service
    pub async fn send_contact(&self, message: &ContactMessage) -> ClientResult<()> {
        message.validate()?;

        let time = Local::now().format("%A %e %B %Y").to_string();
        let body = json!({
            "service_id": self.settings.service_id,
            "template_id": self.settings.template_id,
            "user_id": self.settings.public_key,
            "template_params": template_params(message, &self.settings.to_email, &time),
        });

        let response = self
            .client
            .post(&self.settings.endpoint)
            .json(&body)
            .send()
            .await?;
        handle_empty(response).await?;

        info!(subject = %message.subject, "Contact message sent");
        Ok(())
    }

    /// Fire-and-forget send; failures are logged, not returned
    pub fn send_contact_detached(&self, message: ContactMessage) {
        let client = self.clone();
        tokio::spawn(async move {
            if let Err(e) = client.send_contact(&message).await {
                error!(error = %e, "Failed to send contact message");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_params_carry_the_message_and_destination() {
        let message = ContactMessage {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            subject: "Consulta".to_string(),
            message: "Hola, quisiera saber si tienen stock.".to_string(),
        };

        let params = template_params(&message, "ventas@example.com", "lunes 3 agosto 2026");
        assert_eq!(params["name"], "Ana");
        assert_eq!(params["email"], "ana@example.com");
        assert_eq!(params["to_email"], "ventas@example.com");
        assert_eq!(params["time"], "lunes 3 agosto 2026");
    }
}
