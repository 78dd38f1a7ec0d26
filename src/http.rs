// src/http.rs
use reqwest::Client;
use std::time::Duration;

/// Builds the client shared by all three services. Every request made with it
/// is bounded by `timeout`.
pub fn build_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .build()
}

pub(crate) fn describe(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "request timed out".to_string()
    } else if err.is_connect() {
        format!("connection failed: {}", err)
    } else if err.is_decode() {
        format!("malformed response: {}", err)
    } else {
        err.to_string()
    }
}

pub(crate) fn join(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_strips_trailing_slash() {
        assert_eq!(
            join("http://127.0.0.1:5003/", "save_watchlist"),
            "http://127.0.0.1:5003/save_watchlist"
        );
        assert_eq!(join("http://localhost/quote", "AAPL"), "http://localhost/quote/AAPL");
    }
}
