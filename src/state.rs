use anyhow::Context;

use crate::config::AppConfig;
use crate::database::Database;
use crate::services::carrier::CarrierClient;
use crate::services::email::EmailClient;

/// Shared per-process collaborators, built once in `main` and handed to
/// handlers through axum state.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub email: EmailClient,
    pub carrier: CarrierClient,
}

impl AppState {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        Ok(Self {
            db: Database::connect(&config.database).context("database pool")?,
            email: EmailClient::new(&config.email),
            carrier: CarrierClient::new(&config.carrier).context("carrier http client")?,
        })
    }
}
