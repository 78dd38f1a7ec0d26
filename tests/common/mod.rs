// tests/common/mod.rs
#![allow(dead_code)]

use serde_json::{json, Value};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use stock_tracker::http::build_client;
use stock_tracker::persistence::StoreClient;
use stock_tracker::resolver::QuoteClient;
use stock_tracker::sort_client::SortClient;
use stock_tracker::Watchlist;
use warp::http::StatusCode;
use warp::Filter;

pub const TIMEOUT: Duration = Duration::from_secs(5);

pub fn quote(price: f64, previous_close: f64, recommendation: &str) -> Value {
    json!({
        "currentPrice": price,
        "regularMarketPreviousClose": previous_close,
        "fiftyTwoWeekHigh": price * 1.2,
        "fiftyTwoWeekLow": price * 0.8,
        "recommendationKey": recommendation,
        "shortName": "Test Corp"
    })
}

/// Quote service: `/quote/{SYMBOL}` answers from `quotes`, `/slow/{SYMBOL}`
/// stalls for longer than any test deadline.
pub fn spawn_quotes(quotes: HashMap<String, Value>) -> String {
    let quotes = Arc::new(quotes);
    let lookup = warp::path!("quote" / String)
        .and(warp::get())
        .map(move |symbol: String| match quotes.get(&symbol) {
            Some(fields) => warp::reply::with_status(warp::reply::json(fields), StatusCode::OK),
            None => warp::reply::with_status(
                warp::reply::json(&json!({"error": "not found"})),
                StatusCode::NOT_FOUND,
            ),
        });
    let slow = warp::path!("slow" / String).and_then(|_symbol: String| async {
        tokio::time::sleep(Duration::from_secs(10)).await;
        Ok::<_, Infallible>(warp::reply::json(&quote(1.0, 1.0, "hold")))
    });

    let (addr, server) = warp::serve(lookup.or(slow)).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    format!("http://{}", addr)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBehaviour {
    Ranked,
    /// Ranked, but prices come back as strings.
    RankedAsText,
    Failing,
    Garbage,
}

pub struct MockSorter {
    pub url: String,
    pub last_request: Arc<Mutex<Option<Value>>>,
}

pub fn spawn_sorter(behaviour: SortBehaviour) -> MockSorter {
    let last_request = Arc::new(Mutex::new(None));
    let recorded = last_request.clone();
    let route = warp::path("stocksort")
        .and(warp::post())
        .and(warp::body::json())
        .map(move |body: Value| {
            *recorded.lock().unwrap() = Some(body.clone());
            let mut stocks = body["stocks"].as_array().cloned().unwrap_or_default();
            let by_price = body["sortBy"] == "price";
            stocks.sort_by(|a, b| {
                if by_price {
                    a["price"]
                        .as_f64()
                        .partial_cmp(&b["price"].as_f64())
                        .unwrap_or(Ordering::Equal)
                } else {
                    a["ticker"].as_str().cmp(&b["ticker"].as_str())
                }
            });
            if body["sortOrder"] == "dsc" {
                stocks.reverse();
            }
            match behaviour {
                SortBehaviour::Ranked => {
                    warp::reply::with_status(warp::reply::json(&stocks), StatusCode::OK)
                }
                SortBehaviour::RankedAsText => {
                    for stock in stocks.iter_mut() {
                        let text = stock["price"].to_string();
                        stock["price"] = Value::String(text);
                    }
                    warp::reply::with_status(warp::reply::json(&stocks), StatusCode::OK)
                }
                SortBehaviour::Failing => warp::reply::with_status(
                    warp::reply::json(&json!({"error": "boom"})),
                    StatusCode::INTERNAL_SERVER_ERROR,
                ),
                SortBehaviour::Garbage => {
                    warp::reply::with_status(warp::reply::json(&json!([1, 2])), StatusCode::OK)
                }
            }
        });

    let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    MockSorter {
        url: format!("http://{}/stocksort", addr),
        last_request,
    }
}

pub struct MockStore {
    pub url: String,
    pub saved: Arc<Mutex<Value>>,
    pub saves: Arc<AtomicUsize>,
}

impl MockStore {
    pub fn saved(&self) -> Value {
        self.saved.lock().unwrap().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(AtomicOrdering::SeqCst)
    }
}

/// Persistence service. A save is only stored when `status` is 200.
pub fn spawn_store(status: StatusCode, initial: Value) -> MockStore {
    let saved = Arc::new(Mutex::new(initial));
    let saves = Arc::new(AtomicUsize::new(0));

    let on_save = saved.clone();
    let save_count = saves.clone();
    let save = warp::path("save_watchlist")
        .and(warp::post())
        .and(warp::body::json())
        .map(move |body: Value| {
            save_count.fetch_add(1, AtomicOrdering::SeqCst);
            if status == StatusCode::OK {
                *on_save.lock().unwrap() = body["watchlist"].clone();
            }
            warp::reply::with_status("saved", status)
        });

    let on_load = saved.clone();
    let load = warp::path("load_watchlist")
        .and(warp::get())
        .map(move || {
            let list = on_load.lock().unwrap().clone();
            warp::reply::with_status(warp::reply::json(&list), status)
        });

    let (addr, server) = warp::serve(save.or(load)).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    MockStore {
        url: format!("http://{}", addr),
        saved,
        saves,
    }
}

pub fn watchlist(quote_url: &str, sort_url: &str, store_url: &str) -> Watchlist {
    let client = build_client(TIMEOUT).unwrap();
    Watchlist::new(
        Arc::new(QuoteClient::new(client.clone(), quote_url)),
        Arc::new(SortClient::new(client.clone(), sort_url)),
        Arc::new(StoreClient::new(client, store_url)),
    )
}
