// src/watchlist.rs
use crate::error::WatchlistError;
use crate::models::{Holding, HoldingRecord, Projection, Row, SortBy, SortOrder};
use crate::persistence::WatchlistStore;
use crate::resolver::QuoteSource;
use crate::sort_client::SortService;
use log::{info, warn};
use std::collections::HashSet;
use std::sync::Arc;

/// Outcome of the save that follows a committed add or remove.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStatus {
    Saved,
    /// The local change stands; only the remote copy is behind.
    Failed(WatchlistError),
}

/// The user's tracked holdings in insertion order, plus the services used to
/// resolve, rank and persist them.
pub struct Watchlist {
    holdings: Vec<Holding>,
    quotes: Arc<dyn QuoteSource>,
    sorter: Arc<dyn SortService>,
    store: Arc<dyn WatchlistStore>,
}

impl Watchlist {
    pub fn new(
        quotes: Arc<dyn QuoteSource>,
        sorter: Arc<dyn SortService>,
        store: Arc<dyn WatchlistStore>,
    ) -> Self {
        Self {
            holdings: Vec::new(),
            quotes,
            sorter,
            store,
        }
    }

    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, symbol: &str) -> bool {
        let symbol = symbol.trim();
        self.holdings
            .iter()
            .any(|h| h.symbol().eq_ignore_ascii_case(symbol))
    }

    pub async fn validate(&self, symbol: &str) -> bool {
        self.quotes.validate(symbol).await
    }

    pub async fn fetch(&self, symbol: &str) -> Result<Holding, WatchlistError> {
        self.quotes.fetch(symbol).await
    }

    /// Appends `holding` and saves the whole list. The symbol must already have
    /// been validated and the user must have confirmed the add.
    pub async fn add(
        &mut self,
        symbol: &str,
        holding: Holding,
    ) -> Result<SaveStatus, WatchlistError> {
        if self.contains(symbol) || self.contains(holding.symbol()) {
            return Err(WatchlistError::DuplicateSymbol(holding.symbol().to_string()));
        }
        info!("{} has been added to the watchlist", holding.symbol());
        self.holdings.push(holding);
        Ok(self.save_status().await)
    }

    pub async fn remove(&mut self, symbol: &str) -> Result<SaveStatus, WatchlistError> {
        let index = self
            .holdings
            .iter()
            .position(|h| h.symbol() == symbol)
            .ok_or_else(|| WatchlistError::NotInWatchlist(symbol.to_string()))?;
        self.holdings.remove(index);
        info!("{} has been removed from the watchlist", symbol);
        Ok(self.save_status().await)
    }

    /// Asks the sort service for an ordering of the current holdings. The
    /// canonical order is left as it was, whatever the outcome.
    pub async fn sort(
        &self,
        sort_by: SortBy,
        sort_order: SortOrder,
    ) -> Result<Projection, WatchlistError> {
        let sorted = self
            .sorter
            .sort(sort_by, sort_order, &self.records())
            .await?;
        let rows = sorted
            .iter()
            .map(|entry| {
                Row::from_value(entry).ok_or_else(|| {
                    WatchlistError::SortService(format!("unexpected entry in response: {}", entry))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Projection {
            sort_by,
            sort_order,
            rows,
        })
    }

    pub async fn save(&self) -> Result<(), WatchlistError> {
        self.store.save(&self.records()).await
    }

    /// Appends the stored holdings without re-fetching quotes. Symbols already
    /// tracked, or repeated in the stored payload, are skipped. Returns the
    /// number of holdings appended.
    pub async fn load(&mut self) -> Result<usize, WatchlistError> {
        let records = self.store.load().await?;
        let mut seen: HashSet<String> = self
            .holdings
            .iter()
            .map(|h| h.symbol().to_string())
            .collect();
        let mut appended = 0;
        for record in records {
            let holding = Holding::from(record);
            if !seen.insert(holding.symbol().to_string()) {
                warn!("Skipping duplicate {} from saved watchlist", holding.symbol());
                continue;
            }
            self.holdings.push(holding);
            appended += 1;
        }
        Ok(appended)
    }

    pub fn records(&self) -> Vec<HoldingRecord> {
        self.holdings.iter().map(Holding::to_record).collect()
    }

    /// Rows to display: the projection's order when one is given, else the
    /// canonical order.
    pub fn rows(&self, projection: Option<&Projection>) -> Vec<Row> {
        match projection {
            Some(projection) => projection.rows.clone(),
            None => self.holdings.iter().map(Row::from).collect(),
        }
    }

    async fn save_status(&self) -> SaveStatus {
        match self.save().await {
            Ok(()) => SaveStatus::Saved,
            Err(e) => {
                warn!("Keeping local change after failed save: {}", e);
                SaveStatus::Failed(e)
            }
        }
    }
}
