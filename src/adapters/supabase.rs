use crate::config::StoreConfig;
use crate::domain::model::{Lead, RecordSet};
use crate::domain::ports::{LeadStore, RemoteError, StoreError};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Inserts leads through the PostgREST endpoint of a Supabase project.
#[derive(Debug, Clone)]
pub struct SupabaseStore {
    client: Client,
    endpoint: String,
    anon_key: String,
}

impl SupabaseStore {
    pub fn new(config: &StoreConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/rest/v1/{}",
                config.url.trim_end_matches('/'),
                config.table
            ),
            anon_key: config.anon_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LeadStore for SupabaseStore {
    async fn insert(&self, lead: &Lead) -> std::result::Result<RecordSet, StoreError> {
        tracing::debug!("POST {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .header("Prefer", "return=representation")
            .json(&[lead])
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let status = response.status();
        tracing::debug!("Store response status: {}", status);

        if status.is_success() {
            // the row is written at this point; an unreadable echo is not a failure
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!("⚠️ Lead stored but the response body could not be read: {}", e);
                    return Ok(Vec::new());
                }
            };
            if body.trim().is_empty() {
                return Ok(Vec::new());
            }
            return Ok(serde_json::from_str(&body).unwrap_or_else(|e| {
                tracing::warn!("⚠️ Lead stored but the returned rows did not decode: {}", e);
                Vec::new()
            }));
        }

        let body = response
            .text()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let mut remote: RemoteError = serde_json::from_str(&body).unwrap_or_else(|_| {
            tracing::debug!("Non-JSON error body from store: {}", body);
            RemoteError::default()
        });
        remote.status = Some(status.as_u16());
        Err(StoreError::Rejected(remote))
    }
}
