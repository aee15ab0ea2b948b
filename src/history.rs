use crate::error::{DayLimitExceeded, FetchError};
use crate::types::{CurrencyQuote, DaySnapshot, DATE_KEY_FORMAT};
use chrono::{Days, Local, NaiveDate};
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::warn;

/// Public PrivatBank API root shared by both fetchers.
pub const DEFAULT_BASE_URL: &str = "https://api.privatbank.ua/p24api";

/// Deepest history batch the archive endpoint is asked for.
pub const MAX_HISTORY_DAYS: u32 = 10;

/// Client for the daily exchange-rates archive.
#[derive(Debug, Clone)]
pub struct RateHistory {
    client: reqwest::Client,
    base_url: String,
}

impl RateHistory {
    pub fn new(client: reqwest::Client) -> Self {
        Self::with_base_url(client, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Fetches snapshots for the `days` calendar days before today, oldest
    /// first. A day whose request fails is logged and left out; the rest of
    /// the batch still goes through.
    pub async fn fetch_days(
        &self,
        days: u32,
        allowed: &[String],
    ) -> Result<Vec<DaySnapshot>, DayLimitExceeded> {
        self.fetch_days_before(Local::now().date_naive(), days, allowed)
            .await
    }

    /// Same as [`fetch_days`](Self::fetch_days) with an explicit anchor date.
    pub async fn fetch_days_before(
        &self,
        today: NaiveDate,
        days: u32,
        allowed: &[String],
    ) -> Result<Vec<DaySnapshot>, DayLimitExceeded> {
        if days > MAX_HISTORY_DAYS {
            return Err(DayLimitExceeded {
                requested: days,
                max: MAX_HISTORY_DAYS,
            });
        }

        let mut snapshots = Vec::with_capacity(days as usize);
        for date in date_range(today, days) {
            match self.fetch_day(date, allowed).await {
                Ok(snapshot) => snapshots.push(snapshot),
                Err(e) => warn!("skipping {}: {}", date.format(DATE_KEY_FORMAT), e),
            }
        }

        Ok(snapshots)
    }

    /// Fetches the archive for one date and keeps the allowed currencies.
    pub async fn fetch_day(
        &self,
        date: NaiveDate,
        allowed: &[String],
    ) -> Result<DaySnapshot, FetchError> {
        let url = format!(
            "{}/exchange_rates?date={}",
            self.base_url,
            date.format(DATE_KEY_FORMAT)
        );

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

        let body: ArchiveDay = resp
            .json()
            .await
            .map_err(|e| FetchError::transport(&url, e))?;

        let rates: BTreeMap<String, CurrencyQuote> = body
            .exchange_rate
            .into_iter()
            .filter(|entry| allowed.iter().any(|code| code == &entry.currency))
            .map(|entry| {
                (
                    entry.currency,
                    CurrencyQuote {
                        sale_rate: entry.sale_rate,
                        purchase_rate: entry.purchase_rate,
                    },
                )
            })
            .collect();

        Ok(DaySnapshot { date, rates })
    }
}

/// The `days` dates before `today`, oldest first; empty when `days` is 0.
fn date_range(today: NaiveDate, days: u32) -> Vec<NaiveDate> {
    (1..=days)
        .rev()
        .map(|back| today - Days::new(u64::from(back)))
        .collect()
}

#[derive(Debug, Deserialize)]
struct ArchiveDay {
    #[serde(rename = "exchangeRate")]
    exchange_rate: Vec<ArchiveEntry>,
}

/// One row of the archive response. The bank publishes cash-desk rates as
/// `saleRate`/`purchaseRate` and omits them for currencies it only quotes
/// through the national bank.
#[derive(Debug, Deserialize)]
struct ArchiveEntry {
    currency: String,
    #[serde(rename = "saleRate")]
    sale_rate: Option<f64>,
    #[serde(rename = "purchaseRate")]
    purchase_rate: Option<f64>,
}
