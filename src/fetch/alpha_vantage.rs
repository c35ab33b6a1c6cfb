// =============================================================================
// Alpha Vantage Client — daily adjusted time series over REST
// =============================================================================
//
// GET {base}/query?function=TIME_SERIES_DAILY_ADJUSTED
//     &symbol=<ticker>&outputsize=<compact|full>&apikey=<key>
//
// The API reports quota violations and unknown symbols inside 200 OK bodies
// (top-level "Note" / "Error Message" keys), so body inspection is part of
// the happy path here, not an afterthought.

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{debug, instrument};

use crate::market_data::series::DailyBar;

const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co";
/// Key of the dated entries object in the response body.
const SERIES_KEY: &str = "Time Series (Daily)";

/// How much history one fetch pulls: the latest ~100 sessions, or everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputSize {
    Compact,
    Full,
}

impl OutputSize {
    fn as_param(self) -> &'static str {
        match self {
            OutputSize::Compact => "compact",
            OutputSize::Full => "full",
        }
    }
}

#[derive(Clone)]
pub struct AlphaVantageClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl AlphaVantageClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Point the client at a different endpoint (tests, proxies).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("failed to build reqwest client");

        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            client,
        }
    }

    /// Fetch the daily adjusted series for `ticker`, ascending by date.
    #[instrument(skip(self), name = "alpha_vantage::daily_adjusted")]
    pub async fn daily_adjusted(&self, ticker: &str, size: OutputSize) -> Result<Vec<DailyBar>> {
        let url = format!(
            "{}/query?function=TIME_SERIES_DAILY_ADJUSTED&symbol={}&outputsize={}&apikey={}",
            self.base_url,
            ticker,
            size.as_param(),
            self.api_key
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("daily series request for {ticker} failed"))?;

        let status = response.status();
        let body: serde_json::Value = response
            .json()
            .await
            .with_context(|| format!("unparseable daily series response for {ticker}"))?;

        if !status.is_success() {
            anyhow::bail!("Alpha Vantage returned {status} for {ticker}: {body}");
        }

        let bars = parse_daily_series(&body)
            .with_context(|| format!("unusable daily series body for {ticker}"))?;
        debug!(ticker, sessions = bars.len(), "daily series fetched");
        Ok(bars)
    }
}

impl std::fmt::Debug for AlphaVantageClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlphaVantageClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Extract ascending daily bars from a response body, surfacing the API's
/// in-band failure modes: "Error Message" for unknown symbols and bad
/// parameters, "Note" for a throttled key.
fn parse_daily_series(body: &serde_json::Value) -> Result<Vec<DailyBar>> {
    if let Some(message) = body.get("Error Message").and_then(|v| v.as_str()) {
        anyhow::bail!("API error: {message}");
    }
    if let Some(note) = body.get("Note").and_then(|v| v.as_str()) {
        anyhow::bail!("API throttled the request: {note}");
    }

    let entries = body
        .get(SERIES_KEY)
        .and_then(|v| v.as_object())
        .context("response has no daily time series object")?;

    let mut bars = Vec::with_capacity(entries.len());
    for (date, fields) in entries {
        let date: NaiveDate = date
            .parse()
            .with_context(|| format!("bad series date '{date}'"))?;
        let adjusted_close = parse_str_f64(fields.get("5. adjusted close"))
            .with_context(|| format!("bad adjusted close on {date}"))?;
        let volume = parse_str_u64(fields.get("6. volume"))
            .with_context(|| format!("bad volume on {date}"))?;

        bars.push(DailyBar {
            date,
            adjusted_close,
            volume,
        });
    }

    bars.sort_by_key(|b| b.date);
    Ok(bars)
}

/// Alpha Vantage serialises every numeric field as a string.
fn parse_str_f64(value: Option<&serde_json::Value>) -> Result<f64> {
    let value = value.context("field missing")?;
    if let Some(s) = value.as_str() {
        s.parse::<f64>()
            .with_context(|| format!("failed to parse '{s}' as f64"))
    } else if let Some(n) = value.as_f64() {
        Ok(n)
    } else {
        anyhow::bail!("expected string or number, got: {value}")
    }
}

fn parse_str_u64(value: Option<&serde_json::Value>) -> Result<u64> {
    let value = value.context("field missing")?;
    if let Some(s) = value.as_str() {
        s.parse::<u64>()
            .with_context(|| format!("failed to parse '{s}' as u64"))
    } else if let Some(n) = value.as_u64() {
        Ok(n)
    } else {
        anyhow::bail!("expected string or integer, got: {value}")
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_daily_series_body() {
        let body = serde_json::json!({
            "Meta Data": { "2. Symbol": "D05.SI" },
            "Time Series (Daily)": {
                "2018-08-10": {
                    "4. close": "25.16",
                    "5. adjusted close": "25.16",
                    "6. volume": "4118800"
                },
                "2018-08-09": {
                    "4. close": "25.40",
                    "5. adjusted close": "25.40",
                    "6. volume": "3607300"
                }
            }
        });

        let bars = parse_daily_series(&body).unwrap();
        assert_eq!(bars.len(), 2);
        // Ascending regardless of the body's key order.
        assert_eq!(bars[0].date, NaiveDate::from_ymd_opt(2018, 8, 9).unwrap());
        assert_eq!(bars[0].adjusted_close, 25.40);
        assert_eq!(bars[0].volume, 3_607_300);
        assert_eq!(bars[1].date, NaiveDate::from_ymd_opt(2018, 8, 10).unwrap());
    }

    #[test]
    fn surfaces_the_error_message_key() {
        let body = serde_json::json!({
            "Error Message": "Invalid API call. Please retry or visit the documentation."
        });
        let err = parse_daily_series(&body).unwrap_err();
        assert!(err.to_string().contains("API error"));
    }

    #[test]
    fn surfaces_the_throttle_note() {
        let body = serde_json::json!({
            "Note": "Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute."
        });
        let err = parse_daily_series(&body).unwrap_err();
        assert!(err.to_string().contains("throttled"));
    }

    #[test]
    fn rejects_a_body_without_the_series_object() {
        let body = serde_json::json!({ "Meta Data": {} });
        assert!(parse_daily_series(&body).is_err());
    }

    #[test]
    fn rejects_malformed_fields() {
        let body = serde_json::json!({
            "Time Series (Daily)": {
                "2018-08-10": {
                    "5. adjusted close": "twenty-five",
                    "6. volume": "4118800"
                }
            }
        });
        assert!(parse_daily_series(&body).is_err());
    }
}
