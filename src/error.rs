// src/error.rs
use thiserror::Error;

/// Every failure the watchlist core reports. All of them are recoverable at
/// the command level.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WatchlistError {
    #[error("{0} is an invalid ticker symbol")]
    InvalidSymbol(String),

    #[error("Data unavailable for {symbol}: {reason}")]
    DataUnavailable { symbol: String, reason: String },

    #[error("{0} is already in watchlist")]
    DuplicateSymbol(String),

    #[error("{0} is not in watchlist")]
    NotInWatchlist(String),

    #[error("Sort service error: {0}")]
    SortService(String),

    #[error("Save unsuccessful: {0}")]
    PersistFailed(String),

    #[error("Load unsuccessful: {0}")]
    LoadFailed(String),
}

impl WatchlistError {
    pub fn data_unavailable(symbol: &str, reason: impl Into<String>) -> Self {
        WatchlistError::DataUnavailable {
            symbol: symbol.to_string(),
            reason: reason.into(),
        }
    }
}

/// Rejected command-line input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Please enter a command")]
    Empty,

    #[error("Invalid command: {0}. Refer to list of commands for help")]
    Unknown(String),

    #[error("Invalid command. Use either add or remove followed by ticker symbol")]
    MissingSymbol,

    #[error("Invalid sort field {0}. Use ticker or price")]
    SortField(String),

    #[error("Invalid sort order {0}. Use asc or dsc")]
    SortOrder(String),

    #[error("Invalid command. Enter Y/N")]
    Confirmation,
}
