// src/main.rs
use anyhow::Context;
use env_logger::Builder;
use log::{info, LevelFilter};
use std::sync::Arc;
use stock_tracker::cli::Session;
use stock_tracker::config::Config;
use stock_tracker::http::build_client;
use stock_tracker::persistence::StoreClient;
use stock_tracker::resolver::QuoteClient;
use stock_tracker::sort_client::SortClient;
use stock_tracker::Watchlist;
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .format_timestamp_secs()
        .init();

    let config = Config::from_env()?;
    info!("Starting the stock tracker with {:?}", config);

    let client = build_client(config.timeout).context("Failed to build HTTP client")?;
    let mut watchlist = Watchlist::new(
        Arc::new(QuoteClient::new(client.clone(), config.quote_url)),
        Arc::new(SortClient::new(client.clone(), config.sort_url)),
        Arc::new(StoreClient::new(client, config.store_url)),
    );

    let mut stdout = std::io::stdout();
    Session::new(&mut watchlist, &mut stdout)
        .run(BufReader::new(tokio::io::stdin()))
        .await
        .context("Terminal I/O failed")?;
    Ok(())
}
