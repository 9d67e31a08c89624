//! Blocking REST implementation of [`EntityStore`].
//!
//! Wire protocol:
//!
//! - `GET {base}/{db}/{kind}/properties` → `[{"name": "...", "type": "..."}]`
//! - `POST {base}/{db}/batch` with `{"kind": "...", "requests": [...]}`
//!
//! Authentication is a bearer token; timeouts and connection reuse are left
//! to the underlying client.

use log::debug;
use reqwest::blocking::{Client, Response};
use serde::Serialize;

use crate::config::StoreConfig;

use super::{EntityKind, EntityStore, Operation, PropertyInfo, StoreError};

pub struct HttpStore {
    client: Client,
    base_url: String,
    database: String,
    token: String,
}

#[derive(Serialize)]
struct BatchRequest<'a> {
    kind: &'static str,
    requests: &'a [Operation],
}

impl HttpStore {
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .user_agent(concat!("reco-sync/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            database: config.database.clone(),
            token: config.token.clone(),
        })
    }

    fn url(&self, tail: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.database, tail)
    }

    fn check(response: Response) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .text()
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        Err(StoreError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

impl EntityStore for HttpStore {
    fn list_properties(&self, kind: EntityKind) -> Result<Vec<PropertyInfo>, StoreError> {
        let url = self.url(&format!("{}/properties", kind.path_segment()));
        debug!("GET {url}");
        let response = self.client.get(&url).bearer_auth(&self.token).send()?;
        let listed = Self::check(response)?.json::<Vec<PropertyInfo>>()?;
        Ok(listed)
    }

    fn submit_batch(&self, kind: EntityKind, operations: &[Operation]) -> Result<(), StoreError> {
        let url = self.url("batch");
        debug!("POST {url} ({} {kind} request(s))", operations.len());
        let body = BatchRequest {
            kind: kind.path_segment(),
            requests: operations,
        };
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()?;
        Self::check(response)?;
        Ok(())
    }
}
