// src/sort_client.rs
use crate::error::WatchlistError;
use crate::http::describe;
use crate::models::{HoldingRecord, SortBy, SortOrder};
use async_trait::async_trait;
use log::{error, info};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;

/// Remote ranking endpoint. The order of the returned entries is the
/// service's, and the entries are passed back untouched.
#[async_trait]
pub trait SortService: Send + Sync {
    async fn sort(
        &self,
        sort_by: SortBy,
        sort_order: SortOrder,
        stocks: &[HoldingRecord],
    ) -> Result<Vec<Value>, WatchlistError>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SortRequest<'a> {
    sort_by: SortBy,
    sort_order: SortOrder,
    stocks: &'a [HoldingRecord],
}

#[derive(Clone)]
pub struct SortClient {
    client: Client,
    url: String,
}

impl SortClient {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl SortService for SortClient {
    async fn sort(
        &self,
        sort_by: SortBy,
        sort_order: SortOrder,
        stocks: &[HoldingRecord],
    ) -> Result<Vec<Value>, WatchlistError> {
        let request = SortRequest {
            sort_by,
            sort_order,
            stocks,
        };
        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Sort request failed: {}", e);
                WatchlistError::SortService(describe(&e))
            })?;

        if response.status() != StatusCode::OK {
            error!("Sort service answered HTTP {}", response.status());
            return Err(WatchlistError::SortService(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let sorted = response
            .json::<Vec<Value>>()
            .await
            .map_err(|e| WatchlistError::SortService(describe(&e)))?;
        info!(
            "Sorted {} stocks by {} {}",
            sorted.len(),
            sort_by,
            sort_order
        );
        Ok(sorted)
    }
}
