// src/lib.rs
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod persistence;
pub mod render;
pub mod resolver;
pub mod sort_client;
pub mod watchlist;

pub use error::{CommandError, WatchlistError};
pub use models::{Holding, HoldingRecord, Projection, Row, SortBy, SortOrder};
pub use watchlist::{SaveStatus, Watchlist};
