use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

use crate::config::CarrierConfig;

#[derive(Debug, Error)]
pub enum CarrierError {
    /// The registry looked at the identifier and said no. User-correctable,
    /// surfaced at 400 with the upstream message.
    #[error("{0}")]
    Rejected(String),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Which identifier drives the registry call. Exactly one; DOT wins when the
/// caller supplies both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CarrierIdentifier {
    Dot(String),
    Mc(String),
}

impl CarrierIdentifier {
    /// Blank and whitespace-only values count as absent.
    pub fn from_parts(dot: Option<String>, mc: Option<String>) -> Option<Self> {
        let dot = dot.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        let mc = mc.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

        match (dot, mc) {
            (Some(dot), _) => Some(CarrierIdentifier::Dot(dot)),
            (None, Some(mc)) => Some(CarrierIdentifier::Mc(mc)),
            (None, None) => None,
        }
    }
}

/// Gateway to the external carrier registry (SAFER). The registry's internals
/// are not ours; this client only shapes the request and classifies the
/// outcome.
#[derive(Clone)]
pub struct CarrierClient {
    http: reqwest::Client,
    validation_url: String,
}

impl CarrierClient {
    pub fn new(config: &CarrierConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self { http, validation_url: config.validation_url.clone() })
    }

    /// Returns the upstream carrier record on success, passed through to the
    /// client verbatim as `carrierData`.
    pub async fn validate(&self, identifier: &CarrierIdentifier) -> Result<Value, CarrierError> {
        let payload = match identifier {
            CarrierIdentifier::Dot(dot) => json!({ "dotNumber": dot }),
            CarrierIdentifier::Mc(mc) => json!({ "mcNumber": mc }),
        };

        let response = self
            .http
            .post(&self.validation_url)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);

        if !status.is_success() {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("Carrier validation failed")
                .to_string();
            return Err(CarrierError::Rejected(message));
        }

        Ok(body)
    }
}
