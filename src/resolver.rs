// src/resolver.rs
use crate::error::WatchlistError;
use crate::http::describe;
use crate::models::{canonical_symbol, Holding};
use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::{Client, Url};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Source of live quote data for a ticker.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// `true` only if the source reports a live current price. Unknown symbols
    /// and unreachable sources both answer `false`.
    async fn validate(&self, symbol: &str) -> bool;

    async fn fetch(&self, symbol: &str) -> Result<Holding, WatchlistError>;
}

/// Quote fields as published by the data source.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteFields {
    pub current_price: Option<Decimal>,
    pub regular_market_previous_close: Option<Decimal>,
    pub fifty_two_week_high: Option<Decimal>,
    pub fifty_two_week_low: Option<Decimal>,
    pub recommendation_key: Option<String>,
}

impl QuoteFields {
    pub fn into_holding(self, symbol: &str) -> Result<Holding, WatchlistError> {
        let price = self
            .current_price
            .ok_or_else(|| WatchlistError::data_unavailable(symbol, "missing currentPrice"))?;
        let previous_close = self.regular_market_previous_close.ok_or_else(|| {
            WatchlistError::data_unavailable(symbol, "missing regularMarketPreviousClose")
        })?;
        let change = percent_change(price, previous_close).ok_or_else(|| {
            WatchlistError::data_unavailable(
                symbol,
                format!("cannot compute change against previous close {}", previous_close),
            )
        })?;
        Ok(Holding::new(
            symbol,
            price,
            change,
            self.fifty_two_week_high,
            self.fifty_two_week_low,
            self.recommendation_key,
        ))
    }
}

/// `(price - previous_close) / previous_close * 100`, rounded to 2 places.
///
/// `None` when the previous close is zero or the quotient overflows the
/// decimal range; the result is never truncated.
pub fn percent_change(price: Decimal, previous_close: Decimal) -> Option<Decimal> {
    if previous_close.is_zero() {
        return None;
    }
    price
        .checked_sub(previous_close)?
        .checked_div(previous_close)?
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|change| change.round_dp(2))
}

/// HTTP quote service: `GET {base_url}/{SYMBOL}` answers with [`QuoteFields`].
#[derive(Clone)]
pub struct QuoteClient {
    client: Client,
    base_url: String,
}

impl QuoteClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// `{base_url}/{symbol}` with the symbol encoded as one path segment.
    fn quote_url(&self, symbol: &str) -> Result<Url, String> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| format!("invalid quote url {}: {}", self.base_url, e))?;
        url.path_segments_mut()
            .map_err(|_| format!("invalid quote url {}", self.base_url))?
            .pop_if_empty()
            .push(symbol);
        Ok(url)
    }

    async fn quote_fields(&self, symbol: &str) -> Result<QuoteFields, String> {
        let url = self.quote_url(symbol)?;
        debug!("Requesting quote from {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| describe(&e))?;
        if !response.status().is_success() {
            return Err(format!("HTTP {}", response.status()));
        }
        response
            .json::<QuoteFields>()
            .await
            .map_err(|e| describe(&e))
    }
}

#[async_trait]
impl QuoteSource for QuoteClient {
    async fn validate(&self, symbol: &str) -> bool {
        let symbol = canonical_symbol(symbol);
        match self.quote_fields(&symbol).await {
            Ok(fields) => fields.current_price.is_some(),
            Err(e) => {
                warn!("Could not validate {}: {}", symbol, e);
                false
            }
        }
    }

    async fn fetch(&self, symbol: &str) -> Result<Holding, WatchlistError> {
        let symbol = canonical_symbol(symbol);
        let fields = self
            .quote_fields(&symbol)
            .await
            .map_err(|e| WatchlistError::data_unavailable(&symbol, e))?;
        let holding = fields.into_holding(&symbol)?;
        info!("Fetched {}", holding);
        Ok(holding)
    }
}
