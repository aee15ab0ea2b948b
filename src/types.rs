use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

/// Date format used in archive request URLs and output keys.
pub const DATE_KEY_FORMAT: &str = "%d.%m.%Y";

/// Currencies every report carries; also the cash-board filter.
pub const DEFAULT_CURRENCIES: [&str; 2] = ["EUR", "USD"];

/// Sale/purchase pair for one currency on one date. Sides the archive did
/// not publish stay `None` and serialize as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrencyQuote {
    #[serde(rename = "saleRate")]
    pub sale_rate: Option<f64>,
    #[serde(rename = "purchaseRate")]
    pub purchase_rate: Option<f64>,
}

/// Filtered quotes for a single calendar day.
///
/// Serializes as a single-entry object keyed by the formatted date,
/// `{"01.12.2014": {"EUR": {...}, "USD": {...}}}`, so a fetched range prints
/// as a plain JSON array of these.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySnapshot {
    pub date: NaiveDate,
    pub rates: BTreeMap<String, CurrencyQuote>,
}

impl DaySnapshot {
    pub fn date_key(&self) -> String {
        self.date.format(DATE_KEY_FORMAT).to_string()
    }
}

impl Serialize for DaySnapshot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.date_key(), &self.rates)?;
        map.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoardQuote {
    #[serde(rename = "Buy")]
    pub buy: f64,
    #[serde(rename = "Sell")]
    pub sell: f64,
}

pub type BoardSnapshot = BTreeMap<String, BoardQuote>;

/// EUR and USD plus any extra codes, uppercased, first mention wins.
pub fn currency_allow_list(extra: &[String]) -> Vec<String> {
    let mut list: Vec<String> = DEFAULT_CURRENCIES.iter().map(|c| c.to_string()).collect();
    for code in extra {
        let code = code.trim().to_uppercase();
        if !code.is_empty() && !list.contains(&code) {
            list.push(code);
        }
    }
    list
}
