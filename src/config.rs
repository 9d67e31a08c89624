//! Store credentials and endpoint, loaded from the environment.

use std::env;

use crate::error::SyncError;

pub const DEFAULT_API_URL: &str = "https://api.reco-store.io";

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub database: String,
    pub token: String,
    pub api_url: String,
}

impl StoreConfig {
    /// Reads `RECO_DB_ID`, `RECO_PRIVATE_TOKEN`, and optionally `RECO_API_URL`
    /// from the environment, loading a `.env` file first when one is present.
    ///
    /// Missing credentials fail here, before any network call is attempted.
    pub fn from_env() -> Result<Self, SyncError> {
        dotenvy::dotenv().ok();
        let database = required_var("RECO_DB_ID")?;
        let token = required_var("RECO_PRIVATE_TOKEN")?;
        let api_url = env::var("RECO_API_URL")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Ok(Self {
            database,
            token,
            api_url,
        })
    }
}

fn required_var(name: &str) -> Result<String, SyncError> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| SyncError::Config(format!("{name} is not set")))
}
