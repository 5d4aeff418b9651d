//! Seed sources for (re)initializing the record store

use crate::core::error::SeedError;
use crate::core::record::NewSaleRecord;
use crate::core::service::SeedSource;
use async_trait::async_trait;
use std::sync::Arc;

/// Fetches the seed feed with a single HTTP GET
///
/// The feed must answer 2xx with a JSON array of sale records. No retries.
#[derive(Clone, Debug)]
pub struct HttpSeedSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSeedSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    /// Use a preconfigured client (proxies, timeouts, TLS roots)
    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl SeedSource for HttpSeedSource {
    async fn fetch(&self) -> Result<Vec<NewSaleRecord>, SeedError> {
        tracing::debug!(url = %self.url, "fetching seed data");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| SeedError::Request {
                url: self.url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SeedError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let records: Vec<NewSaleRecord> =
            response.json().await.map_err(|e| SeedError::Decode {
                url: self.url.clone(),
                message: e.to_string(),
            })?;

        tracing::info!(url = %self.url, records = records.len(), "fetched seed data");
        Ok(records)
    }
}

/// Serves a fixed set of records; useful for tests and offline development
#[derive(Clone, Debug, Default)]
pub struct StaticSeedSource {
    records: Arc<Vec<NewSaleRecord>>,
}

impl StaticSeedSource {
    pub fn new(records: Vec<NewSaleRecord>) -> Self {
        Self {
            records: Arc::new(records),
        }
    }
}

#[async_trait]
impl SeedSource for StaticSeedSource {
    async fn fetch(&self) -> Result<Vec<NewSaleRecord>, SeedError> {
        Ok(self.records.as_ref().clone())
    }
}
