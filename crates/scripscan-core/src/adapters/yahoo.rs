//! Yahoo Finance chart adapter.
//!
//! Secondary source used to cross-check NSE quotes. The v8 chart
//! endpoint is keyless, so there is no session to manage; NSE-listed
//! symbols are addressed with an `.NS` suffix. Upstream omits metadata
//! freely, which is why every snapshot metric is optional.

use std::sync::Arc;

use serde::Deserialize;

use crate::adapters::FetchError;
use crate::domain::{MarketSnapshot, Symbol};
use crate::http::{HttpClient, HttpErrorKind, HttpRequest, HttpResponse};
use crate::retry::RetryConfig;
use crate::time::UtcDateTime;

const YAHOO_CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Suffix Yahoo uses for National Stock Exchange listings.
const NSE_SUFFIX: &str = ".NS";

/// Yahoo chart client over the shared [`HttpClient`] seam.
#[derive(Clone)]
pub struct YahooChartClient {
    http_client: Arc<dyn HttpClient>,
    retry: RetryConfig,
    timeout_ms: u64,
}

impl YahooChartClient {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            retry: RetryConfig::exponential(3),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Fetch a one-day chart and lift its metadata into a snapshot.
    pub async fn snapshot(&self, symbol: &Symbol) -> Result<MarketSnapshot, FetchError> {
        let listed = format!("{}{}", symbol.as_str(), NSE_SUFFIX);
        let endpoint = format!(
            "{}/{}?interval=1d&range=1d",
            YAHOO_CHART_URL,
            urlencoding::encode(&listed)
        );

        let response = self.fetch_with_retry(&endpoint).await?;

        if response.status == 429 {
            return Err(
                FetchError::rate_limited("Yahoo throttled the chart request").with_status(429)
            );
        }

        if !response.is_success() {
            return Err(FetchError::unavailable(format!(
                "Yahoo returned status {}",
                response.status
            ))
            .with_status(response.status));
        }

        parse_chart_response(&response.body, symbol)
    }

    async fn fetch_with_retry(&self, endpoint: &str) -> Result<HttpResponse, FetchError> {
        let mut attempt: u32 = 0;

        loop {
            let request = HttpRequest::get(endpoint)
                .with_header("referer", "https://finance.yahoo.com/")
                .with_header("accept", "application/json")
                .with_timeout_ms(self.timeout_ms);

            match self.http_client.execute(request).await {
                Ok(response) => {
                    if self.retry.enabled
                        && attempt < self.retry.max_retries
                        && self.retry.should_retry_status(response.status)
                    {
                        tokio::time::sleep(self.retry.delay_for_attempt(attempt)).await;
                        attempt += 1;
                        continue;
                    }
                    return Ok(response);
                }
                Err(error) => {
                    let transient = match error.kind() {
                        HttpErrorKind::Timeout => self.retry.retry_on_timeout,
                        HttpErrorKind::Connect => self.retry.retry_on_connect,
                        HttpErrorKind::Other => false,
                    };
                    if self.retry.enabled && transient && attempt < self.retry.max_retries {
                        tokio::time::sleep(self.retry.delay_for_attempt(attempt)).await;
                        attempt += 1;
                        continue;
                    }
                    return Err(FetchError::unavailable(format!(
                        "Yahoo transport error: {}",
                        error.message()
                    )));
                }
            }
        }
    }
}

fn parse_chart_response(body: &str, symbol: &Symbol) -> Result<MarketSnapshot, FetchError> {
    let response: YahooChartResponse = serde_json::from_str(body)
        .map_err(|e| FetchError::decode(format!("failed to parse Yahoo chart response: {e}")))?;

    if let Some(error) = response.chart.error {
        let detail = error
            .description
            .or(error.code)
            .unwrap_or_else(|| "unknown error".to_owned());
        return Err(FetchError::unavailable(format!("Yahoo chart error: {detail}")));
    }

    let meta = response
        .chart
        .result
        .unwrap_or_default()
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::decode("Yahoo chart response had no result"))?
        .meta;

    MarketSnapshot::new(
        symbol.clone(),
        meta.currency,
        meta.regular_market_price,
        // The chart meta spells previous close two ways across versions.
        meta.chart_previous_close.or(meta.previous_close),
        meta.fifty_two_week_high,
        meta.fifty_two_week_low,
        UtcDateTime::now(),
    )
    .map_err(|e| FetchError::decode(format!("Yahoo snapshot failed validation: {e}")))
}

// ============================================================================
// Yahoo Chart API Response Structures
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
struct YahooChartResponse {
    chart: YahooChartData,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartData {
    #[serde(default)]
    result: Option<Vec<YahooChartResult>>,
    #[serde(default)]
    error: Option<YahooChartError>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartResult {
    meta: YahooChartMeta,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartMeta {
    #[serde(default)]
    currency: Option<String>,
    #[serde(rename = "regularMarketPrice")]
    #[serde(default)]
    regular_market_price: Option<f64>,
    #[serde(rename = "chartPreviousClose")]
    #[serde(default)]
    chart_previous_close: Option<f64>,
    #[serde(rename = "previousClose")]
    #[serde(default)]
    previous_close: Option<f64>,
    #[serde(rename = "fiftyTwoWeekHigh")]
    #[serde(default)]
    fifty_two_week_high: Option<f64>,
    #[serde(rename = "fiftyTwoWeekLow")]
    #[serde(default)]
    fifty_two_week_low: Option<f64>,
}
