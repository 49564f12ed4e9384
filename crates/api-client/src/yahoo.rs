// In crates/api-client/src/yahoo.rs

use crate::types::ChartResponse;
use crate::{Error, MarketDataProvider, Result};
use app_config::types::MarketDataSettings;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use core_types::{PriceBar, Symbol};
use reqwest::Client;

/// Daily bars from the Yahoo Finance v8 chart API.
#[derive(Debug, Clone)]
pub struct YahooClient {
    http_client: Client,
    base_url: String,
}

impl YahooClient {
    pub fn new(settings: &MarketDataSettings) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(settings.timeout_secs))
            .user_agent("Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36")
            .build()
            .map_err(|e| Error::ClientBuildError(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The chart URL for `symbol` covering `lookback_days` calendar days up to `end`.
    pub fn chart_url(&self, symbol: &Symbol, lookback_days: u32, end: DateTime<Utc>) -> String {
        let start = end - Duration::days(i64::from(lookback_days));
        format!(
            "{}/{}?period1={}&period2={}&interval=1d",
            self.base_url,
            symbol,
            start.timestamp(),
            end.timestamp()
        )
    }
}

/// Converts a chart response into ascending daily bars. Rows with any
/// missing OHLC value are dropped.
pub fn parse_chart(symbol: &Symbol, response: ChartResponse) -> Result<Vec<PriceBar>> {
    let result = match (response.chart.result, response.chart.error) {
        (_, Some(err)) => {
            return Err(Error::ApiError {
                code: err.code,
                msg: err.description,
            });
        }
        (Some(result), None) => result,
        (None, None) => {
            return Err(Error::MalformedResponse("empty result with no error".into()));
        }
    };

    let data = result
        .into_iter()
        .next()
        .ok_or_else(|| Error::MalformedResponse("result array is empty".into()))?;
    let timestamps = data.timestamp.unwrap_or_default();
    let quote = data
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| Error::MalformedResponse("no quote data".into()))?;

    let cell = |column: &[Option<f64>], i: usize| column.get(i).copied().flatten();

    let mut bars: Vec<PriceBar> = timestamps
        .iter()
        .enumerate()
        .filter_map(|(i, &ts)| {
            let date = DateTime::from_timestamp(ts, 0)?.date_naive();
            Some(PriceBar {
                date,
                open: cell(&quote.open, i)?,
                high: cell(&quote.high, i)?,
                low: cell(&quote.low, i)?,
                close: cell(&quote.close, i)?,
            })
        })
        .collect();

    bars.sort_by_key(|bar| bar.date);
    bars.dedup_by_key(|bar| bar.date);

    if bars.is_empty() {
        return Err(Error::NoData(symbol.clone()));
    }
    Ok(bars)
}

#[async_trait]
impl MarketDataProvider for YahooClient {
    fn name(&self) -> &'static str {
        "YahooClient"
    }

    async fn fetch(&self, symbol: &Symbol, lookback_days: u32) -> Result<Vec<PriceBar>> {
        let url = self.chart_url(symbol, lookback_days, Utc::now());
        tracing::debug!(%symbol, %url, "Fetching daily bars.");

        let body = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(Error::RequestFailed)?
            .text()
            .await
            .map_err(Error::RequestFailed)?;

        let response: ChartResponse = serde_json::from_str(&body).map_err(Error::DeserializationFailed)?;
        let bars = parse_chart(symbol, response)?;
        tracing::debug!(%symbol, bars = bars.len(), "Daily bars received.");
        Ok(bars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Result<Vec<PriceBar>> {
        let response: ChartResponse = serde_json::from_str(body).unwrap();
        parse_chart(&Symbol::from("WDC"), response)
    }

    #[test]
    fn null_rows_are_dropped() {
        let bars = parse(
            r#"{"chart":{"result":[{
                "timestamp":[1704205800,1704292200,1704378600],
                "indicators":{"quote":[{
                    "open":[10.0,null,12.0],
                    "high":[11.0,null,13.0],
                    "low":[9.0,null,11.5],
                    "close":[10.5,null,12.5]
                }]}
            }],"error":null}}"#,
        )
        .unwrap();

        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].close, 10.5);
        assert_eq!(bars[1].high, 13.0);
        assert!(bars[0].date < bars[1].date);
    }

    #[test]
    fn api_error_is_reported() {
        let err = parse(r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#)
            .unwrap_err();
        assert!(matches!(err, Error::ApiError { ref code, .. } if code == "Not Found"));
    }

    #[test]
    fn empty_range_is_no_data() {
        let err = parse(r#"{"chart":{"result":[{"indicators":{"quote":[{}]}}],"error":null}}"#).unwrap_err();
        assert!(matches!(err, Error::NoData(_)));
    }

    #[test]
    fn url_covers_the_lookback_window() {
        let client = YahooClient::new(&MarketDataSettings {
            base_url: "https://example.test/chart/".to_string(),
            ..Default::default()
        })
        .unwrap();
        let end = DateTime::from_timestamp(1_700_000_000, 0).unwrap();

        assert_eq!(
            client.chart_url(&Symbol::from("HOOD"), 300, end),
            "https://example.test/chart/HOOD?period1=1674080000&period2=1700000000&interval=1d"
        );
    }
}
