use crate::error::FetchError;
use crate::history::DEFAULT_BASE_URL;
use crate::types::{BoardQuote, BoardSnapshot, DEFAULT_CURRENCIES};
use serde::Deserialize;

/// Client for the live cash exchange board.
#[derive(Debug, Clone)]
pub struct ExchangeBoard {
    client: reqwest::Client,
    base_url: String,
}

impl ExchangeBoard {
    pub fn new(client: reqwest::Client) -> Self {
        Self::with_base_url(client, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Fetches the current EUR/USD cash rates.
    pub async fn snapshot(&self) -> Result<BoardSnapshot, FetchError> {
        let url = format!("{}/pubinfo?json&exchange&coursid=5", self.base_url);

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::transport(&url, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::status(&url, status));
        }

        let entries: Vec<BoardEntry> = resp
            .json()
            .await
            .map_err(|e| FetchError::transport(&url, e))?;

        let mut snapshot = BoardSnapshot::new();
        for entry in entries {
            if !DEFAULT_CURRENCIES.contains(&entry.ccy.as_str()) {
                continue;
            }
            let quote = BoardQuote {
                buy: parse_rate(&url, &entry.ccy, "buy", &entry.buy)?,
                sell: parse_rate(&url, &entry.ccy, "sale", &entry.sale)?,
            };
            snapshot.insert(entry.ccy, quote);
        }

        Ok(snapshot)
    }
}

// The board serves its numbers as strings.
fn parse_rate(url: &str, ccy: &str, field: &str, raw: &str) -> Result<f64, FetchError> {
    raw.trim().parse::<f64>().map_err(|_| {
        FetchError::decode(url, format!("{} {} is not a number: '{}'", ccy, field, raw))
    })
}

#[derive(Debug, Deserialize)]
struct BoardEntry {
    ccy: String,
    buy: String,
    sale: String,
}
