use serde_json::json;
use thiserror::Error;
use tracing::info;

use crate::config::EmailConfig;

const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

#[derive(Debug, Error)]
pub enum EmailError {
    #[error("email provider not configured (RESEND_API_KEY is empty)")]
    NotConfigured,

    #[error("email provider rejected the request ({status}): {body}")]
    Provider { status: u16, body: String },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Thin client over the Resend HTTP API. The contract with the provider is
/// boundary-only: one POST per message, no retries.
#[derive(Clone)]
pub struct EmailClient {
    http: reqwest::Client,
    api_key: String,
    from_address: String,
    base_url: String,
}

impl EmailClient {
    pub fn new(config: &EmailConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: config.resend_api_key.clone(),
            from_address: config.from_address.clone(),
            base_url: config.base_url.clone(),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    pub async fn send_password_reset(&self, to: &str, token: &str) -> Result<(), EmailError> {
        let link = self.reset_link(token);
        let html = format!(
            "<p>A password reset was requested for your Loadboard account.</p>\
             <p><a href=\"{link}\">Reset your password</a></p>\
             <p>If you did not request this, you can ignore this email.</p>"
        );

        self.send(to, "Reset your Loadboard password", &html).await
    }

    fn reset_link(&self, token: &str) -> String {
        format!("{}/reset-password?token={}", self.base_url.trim_end_matches('/'), token)
    }

    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), EmailError> {
        if !self.is_configured() {
            return Err(EmailError::NotConfigured);
        }

        let response = self
            .http
            .post(RESEND_ENDPOINT)
            .bearer_auth(&self.api_key)
            .json(&json!({
                "from": self.from_address,
                "to": [to],
                "subject": subject,
                "html": html,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmailError::Provider { status: status.as_u16(), body });
        }

        info!("sent email to {} ({})", to, subject);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EmailConfig;

    fn client(api_key: &str, base_url: &str) -> EmailClient {
        EmailClient::new(&EmailConfig {
            resend_api_key: api_key.to_string(),
            from_address: "Loadboard <noreply@loadboard.local>".to_string(),
            base_url: base_url.to_string(),
        })
    }

    #[test]
    fn unconfigured_client_reports_itself() {
        assert!(!client("", "http://localhost:3000").is_configured());
        assert!(client("re_123", "http://localhost:3000").is_configured());
    }

    #[test]
    fn reset_link_handles_trailing_slash() {
        let c = client("re_123", "https://loadboard.app/");
        assert_eq!(
            c.reset_link("tok-1"),
            "https://loadboard.app/reset-password?token=tok-1"
        );
    }

    #[tokio::test]
    async fn send_without_key_fails_before_any_network_call() {
        let c = client("", "http://localhost:3000");
        let err = c.send_password_reset("a@b.c", "tok").await.unwrap_err();
        assert!(matches!(err, EmailError::NotConfigured));
    }
}
