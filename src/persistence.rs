// src/persistence.rs
use crate::error::WatchlistError;
use crate::http::{describe, join};
use crate::models::HoldingRecord;
use async_trait::async_trait;
use log::{error, info};
use reqwest::{Client, StatusCode};
use serde::Serialize;

/// Remote store holding the whole watchlist as one payload.
#[async_trait]
pub trait WatchlistStore: Send + Sync {
    /// Replaces the stored list with `records`. Saving the same list twice has
    /// the same effect as saving it once.
    async fn save(&self, records: &[HoldingRecord]) -> Result<(), WatchlistError>;

    async fn load(&self) -> Result<Vec<HoldingRecord>, WatchlistError>;
}

#[derive(Serialize)]
struct SaveRequest<'a> {
    watchlist: &'a [HoldingRecord],
}

/// HTTP persistence service exposing `save_watchlist` and `load_watchlist`.
#[derive(Clone)]
pub struct StoreClient {
    client: Client,
    base_url: String,
}

impl StoreClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl WatchlistStore for StoreClient {
    async fn save(&self, records: &[HoldingRecord]) -> Result<(), WatchlistError> {
        let url = join(&self.base_url, "save_watchlist");
        let response = self
            .client
            .post(&url)
            .json(&SaveRequest { watchlist: records })
            .send()
            .await
            .map_err(|e| {
                error!("Save request failed: {}", e);
                WatchlistError::PersistFailed(describe(&e))
            })?;

        if response.status() != StatusCode::OK {
            error!("Save answered HTTP {}", response.status());
            return Err(WatchlistError::PersistFailed(format!(
                "HTTP {}",
                response.status()
            )));
        }
        info!("Saved {} stocks to {}", records.len(), url);
        Ok(())
    }

    async fn load(&self) -> Result<Vec<HoldingRecord>, WatchlistError> {
        let url = join(&self.base_url, "load_watchlist");
        let response = self.client.get(&url).send().await.map_err(|e| {
            error!("Load request failed: {}", e);
            WatchlistError::LoadFailed(describe(&e))
        })?;

        if response.status() != StatusCode::OK {
            error!("Load answered HTTP {}", response.status());
            return Err(WatchlistError::LoadFailed(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let records = response
            .json::<Vec<HoldingRecord>>()
            .await
            .map_err(|e| WatchlistError::LoadFailed(describe(&e)))?;
        info!("Loaded {} stocks from {}", records.len(), url);
        Ok(records)
    }
}
