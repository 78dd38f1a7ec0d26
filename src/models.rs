// src/models.rs
use crate::error::CommandError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Placeholder shown for fields the data source did not provide.
pub const MISSING: &str = "-";

/// Snapshot of one tracked ticker, fixed at the moment it was fetched or loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Holding {
    symbol: String,
    price: Decimal,
    change: Decimal,
    high_52: Option<Decimal>,
    low_52: Option<Decimal>,
    recommend: Option<String>,
}

impl Holding {
    pub fn new(
        symbol: &str,
        price: Decimal,
        change: Decimal,
        high_52: Option<Decimal>,
        low_52: Option<Decimal>,
        recommend: Option<String>,
    ) -> Self {
        Self {
            symbol: canonical_symbol(symbol),
            price,
            change,
            high_52,
            low_52,
            recommend,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Percent change since the previous close, rounded to 2 places.
    pub fn change(&self) -> Decimal {
        self.change
    }

    pub fn high_52(&self) -> Option<Decimal> {
        self.high_52
    }

    pub fn low_52(&self) -> Option<Decimal> {
        self.low_52
    }

    pub fn recommend(&self) -> Option<&str> {
        self.recommend.as_deref()
    }

    pub fn to_record(&self) -> HoldingRecord {
        HoldingRecord {
            ticker: self.symbol.clone(),
            price: self.price,
            change: self.change,
            high_52: self.high_52,
            low_52: self.low_52,
            recommend: self.recommend.clone(),
        }
    }
}

impl From<HoldingRecord> for Holding {
    fn from(record: HoldingRecord) -> Self {
        Holding::new(
            &record.ticker,
            record.price,
            record.change,
            record.high_52,
            record.low_52,
            record.recommend,
        )
    }
}

impl fmt::Display for Holding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ticker: {}, Price: {}, % Change: {}, 52 Week High: {}, 52 Week Low: {}",
            self.symbol,
            self.price,
            self.change,
            display_opt(self.high_52),
            display_opt(self.low_52)
        )
    }
}

/// Field mapping exchanged with the sort and persistence services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldingRecord {
    pub ticker: String,
    pub price: Decimal,
    pub change: Decimal,
    #[serde(default)]
    pub high_52: Option<Decimal>,
    #[serde(default)]
    pub low_52: Option<Decimal>,
    #[serde(default)]
    pub recommend: Option<String>,
}

/// Uniform render row. Values are kept as display text so that nothing the
/// sort service returned is lost, whatever type it came back as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub symbol: String,
    pub price: String,
    pub change: String,
    pub low52: String,
    pub high52: String,
    pub recommend: String,
}

impl Row {
    /// Normalizes one entry of a sort service response. Returns `None` when the
    /// entry is not an object or carries no ticker.
    pub fn from_value(value: &Value) -> Option<Row> {
        let fields = value.as_object()?;
        let symbol = match fields.get("ticker")? {
            Value::String(s) if !s.trim().is_empty() => s.clone(),
            _ => return None,
        };
        let text = |key: &str| fields.get(key).map_or_else(|| MISSING.to_string(), display_value);
        Some(Row {
            symbol,
            price: text("price"),
            change: text("change"),
            low52: text("low_52"),
            high52: text("high_52"),
            recommend: text("recommend"),
        })
    }
}

impl From<&Holding> for Row {
    fn from(holding: &Holding) -> Self {
        Row {
            symbol: holding.symbol.clone(),
            price: display_decimal(holding.price),
            change: display_decimal(holding.change),
            low52: display_opt(holding.low_52),
            high52: display_opt(holding.high_52),
            recommend: holding
                .recommend
                .clone()
                .unwrap_or_else(|| MISSING.to_string()),
        }
    }
}

/// Externally ordered view returned by the sort service. Never written back
/// into the watchlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    Ticker,
    Price,
}

impl FromStr for SortBy {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ticker" => Ok(SortBy::Ticker),
            "price" => Ok(SortBy::Price),
            _ => Err(CommandError::SortField(s.to_string())),
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortBy::Ticker => write!(f, "ticker"),
            SortBy::Price => write!(f, "price"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Dsc,
}

impl FromStr for SortOrder {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "dsc" => Ok(SortOrder::Dsc),
            _ => Err(CommandError::SortOrder(s.to_string())),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "asc"),
            SortOrder::Dsc => write!(f, "dsc"),
        }
    }
}

pub fn canonical_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

/// At least 2 decimal places, so a value whose scale was dropped on the
/// wire renders the same as when it was fetched.
fn display_decimal(mut value: Decimal) -> String {
    if value.scale() < 2 {
        value.rescale(2);
    }
    value.to_string()
}

fn display_opt(value: Option<Decimal>) -> String {
    value.map_or_else(|| MISSING.to_string(), display_decimal)
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => MISSING.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
