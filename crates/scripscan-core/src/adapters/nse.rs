//! NSE adapter.
//!
//! NSE's quote API is cookie-gated: it rejects callers that have not
//! recently visited the homepage with a browser user agent, and the
//! issued cookies expire after a few minutes of quiet. [`NseSession`]
//! tracks that warm-up state so concurrent quote calls share a single
//! homepage visit; [`NseClient`] warms the session, fetches with
//! bounded retries, and re-warms once when the cookies go stale.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use serde::Deserialize;

use crate::adapters::FetchError;
use crate::domain::{LiveQuote, Symbol};
use crate::http::{HttpClient, HttpErrorKind, HttpRequest, HttpResponse};
use crate::retry::RetryConfig;
use crate::time::UtcDateTime;

const NSE_HOME_URL: &str = "https://www.nseindia.com";
const NSE_QUOTE_URL: &str = "https://www.nseindia.com/api/quote-equity";
const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Seconds a homepage visit keeps the cookie jar valid.
const DEFAULT_SESSION_TTL_SECS: u64 = 300;

// ============================================================================
// NSE Session
// ============================================================================

/// Shared warm-up state for the NSE cookie session.
#[derive(Clone)]
pub struct NseSession {
    /// When the homepage was last visited successfully
    warmed_at: Arc<Mutex<Option<Instant>>>,
    /// Guards against concurrent warm-up visits
    warming: Arc<AtomicBool>,
    /// Session TTL in seconds (default: 5 minutes)
    session_ttl_secs: u64,
}

impl Default for NseSession {
    fn default() -> Self {
        Self {
            warmed_at: Arc::new(Mutex::new(None)),
            warming: Arc::new(AtomicBool::new(false)),
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
        }
    }
}

impl NseSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl_secs(mut self, session_ttl_secs: u64) -> Self {
        self.session_ttl_secs = session_ttl_secs;
        self
    }

    /// Check if the session is warm (visited and not expired)
    pub fn is_warm(&self) -> bool {
        let warmed_at = self.warmed_at.lock().unwrap();

        if let Some(at) = *warmed_at {
            return at.elapsed().as_secs() < self.session_ttl_secs;
        }

        false
    }

    /// Drop the session so the next call re-warms
    pub fn invalidate(&self) {
        *self.warmed_at.lock().unwrap() = None;
    }

    /// Visit the homepage to collect session cookies, unless already warm
    pub async fn ensure_warm(&self, http_client: &Arc<dyn HttpClient>) -> Result<(), FetchError> {
        if self.is_warm() {
            return Ok(());
        }

        // Check if another task is already warming
        if self
            .warming
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::Relaxed)
            .is_err()
        {
            // Another task is warming, wait a bit and check if done
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
            if self.is_warm() {
                return Ok(());
            }
        }

        let result = self.visit_homepage(http_client).await;

        // Reset warming flag
        self.warming.store(false, Ordering::SeqCst);

        result
    }

    async fn visit_homepage(&self, http_client: &Arc<dyn HttpClient>) -> Result<(), FetchError> {
        let request = HttpRequest::get(NSE_HOME_URL)
            .with_header("accept", "text/html,application/xhtml+xml")
            .with_timeout_ms(DEFAULT_TIMEOUT_MS);

        let response = http_client.execute(request).await.map_err(|e| {
            FetchError::session(format!("failed to warm NSE session: {}", e.message()))
        })?;

        if !response.is_success() {
            return Err(FetchError::session(format!(
                "NSE homepage returned status {}",
                response.status
            ))
            .with_status(response.status));
        }

        *self.warmed_at.lock().unwrap() = Some(Instant::now());
        Ok(())
    }
}

// ============================================================================
// NSE Client
// ============================================================================

/// NSE quote client over the shared [`HttpClient`] seam.
#[derive(Clone)]
pub struct NseClient {
    http_client: Arc<dyn HttpClient>,
    session: NseSession,
    retry: RetryConfig,
    timeout_ms: u64,
}

impl NseClient {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            session: NseSession::default(),
            retry: RetryConfig::exponential(3),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn with_session(mut self, session: NseSession) -> Self {
        self.session = session;
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn session(&self) -> &NseSession {
        &self.session
    }

    /// Fetch a live quote, warming the cookie session as needed.
    pub async fn quote(&self, symbol: &Symbol) -> Result<LiveQuote, FetchError> {
        self.session.ensure_warm(&self.http_client).await?;

        let endpoint = format!(
            "{}?symbol={}",
            NSE_QUOTE_URL,
            urlencoding::encode(symbol.as_str())
        );
        let mut response = self.fetch_with_retry(&endpoint).await?;

        // Stale cookies surface as 401/403; re-warm once and retry
        if response.status == 401 || response.status == 403 {
            self.session.invalidate();
            self.session.ensure_warm(&self.http_client).await?;
            response = self.fetch_with_retry(&endpoint).await?;
        }

        if response.status == 429 {
            return Err(
                FetchError::rate_limited("NSE throttled the quote request").with_status(429)
            );
        }

        if !response.is_success() {
            return Err(FetchError::unavailable(format!(
                "NSE returned status {}",
                response.status
            ))
            .with_status(response.status));
        }

        parse_quote_response(&response.body, symbol)
    }

    /// Execute with the retry policy; returns the last response even
    /// when its status is a failure, so the caller can classify it.
    async fn fetch_with_retry(&self, endpoint: &str) -> Result<HttpResponse, FetchError> {
        let mut attempt: u32 = 0;

        loop {
            let request = HttpRequest::get(endpoint)
                .with_header("referer", NSE_HOME_URL)
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
                        "NSE transport error: {}",
                        error.message()
                    )));
                }
            }
        }
    }
}

fn parse_quote_response(body: &str, symbol: &Symbol) -> Result<LiveQuote, FetchError> {
    let response: NseQuoteResponse = serde_json::from_str(body)
        .map_err(|e| FetchError::decode(format!("failed to parse NSE quote response: {e}")))?;

    let range = response.price_info.intra_day_high_low;

    LiveQuote::new(
        symbol.clone(),
        response.info.company_name,
        response.price_info.last_price,
        response.price_info.open,
        response.price_info.previous_close,
        range.as_ref().and_then(|r| r.max),
        range.as_ref().and_then(|r| r.min),
        response.security_wise_dp.and_then(|dp| dp.quantity_traded),
        UtcDateTime::now(),
    )
    .map_err(|e| FetchError::decode(format!("NSE quote failed validation: {e}")))
}

// ============================================================================
// NSE API Response Structures
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
struct NseQuoteResponse {
    info: NseInfo,
    #[serde(rename = "priceInfo")]
    price_info: NsePriceInfo,
    #[serde(rename = "securityWiseDP")]
    #[serde(default)]
    security_wise_dp: Option<NseSecurityWiseDp>,
}

#[derive(Debug, Clone, Deserialize)]
struct NseInfo {
    #[serde(rename = "companyName")]
    #[serde(default)]
    company_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct NsePriceInfo {
    #[serde(rename = "lastPrice")]
    last_price: f64,
    #[serde(default)]
    open: Option<f64>,
    #[serde(rename = "previousClose")]
    #[serde(default)]
    previous_close: Option<f64>,
    #[serde(rename = "intraDayHighLow")]
    #[serde(default)]
    intra_day_high_low: Option<NseHighLowRange>,
}

#[derive(Debug, Clone, Deserialize)]
struct NseHighLowRange {
    #[serde(default)]
    min: Option<f64>,
    #[serde(default)]
    max: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
struct NseSecurityWiseDp {
    #[serde(rename = "quantityTraded")]
    #[serde(default)]
    quantity_traded: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::FetchErrorKind;
    use crate::http::HttpError;
    use std::collections::VecDeque;
    use std::future::Future;
    use std::pin::Pin;

    struct ScriptedHttpClient {
        responses: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl ScriptedHttpClient {
        fn new(responses: Vec<Result<HttpResponse, HttpError>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn request_urls(&self) -> Vec<String> {
            self.requests
                .lock()
                .unwrap()
                .iter()
                .map(|r| r.url.clone())
                .collect()
        }
    }

    impl HttpClient for ScriptedHttpClient {
        fn execute<'a>(
            &'a self,
            request: HttpRequest,
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
            Box::pin(async move {
                self.requests.lock().unwrap().push(request);
                self.responses
                    .lock()
                    .unwrap()
                    .pop_front()
                    .unwrap_or_else(|| Ok(HttpResponse {
                        status: 500,
                        body: String::new(),
                    }))
            })
        }
    }

    fn quote_body() -> String {
        r#"{
            "info": {"symbol": "HDFCBANK", "companyName": "HDFC Bank Limited"},
            "priceInfo": {
                "lastPrice": 937.0,
                "open": 930.0,
                "previousClose": 928.5,
                "intraDayHighLow": {"min": 925.0, "max": 941.2}
            },
            "securityWiseDP": {"quantityTraded": 1441457}
        }"#
        .to_owned()
    }

    fn symbol() -> Symbol {
        Symbol::parse("HDFCBANK").expect("valid symbol")
    }

    #[tokio::test]
    async fn warms_the_session_before_the_first_quote() {
        let http = ScriptedHttpClient::new(vec![
            Ok(HttpResponse::ok_json("<html></html>")),
            Ok(HttpResponse::ok_json(quote_body())),
        ]);
        let client = NseClient::new(http.clone())
            .with_retry(RetryConfig::no_retry());

        let quote = client.quote(&symbol()).await.expect("quote should succeed");

        assert_eq!(quote.last_price, 937.0);
        assert_eq!(quote.company_name.as_deref(), Some("HDFC Bank Limited"));
        assert_eq!(quote.day_high, Some(941.2));
        assert_eq!(quote.volume, Some(1441457));

        let urls = http.request_urls();
        assert_eq!(urls.len(), 2);
        assert_eq!(urls[0], NSE_HOME_URL);
        assert!(urls[1].starts_with(NSE_QUOTE_URL));
    }

    #[tokio::test]
    async fn skips_warm_up_while_the_session_is_fresh() {
        let http = ScriptedHttpClient::new(vec![
            Ok(HttpResponse::ok_json("<html></html>")),
            Ok(HttpResponse::ok_json(quote_body())),
            Ok(HttpResponse::ok_json(quote_body())),
        ]);
        let client = NseClient::new(http.clone())
            .with_retry(RetryConfig::no_retry());

        client.quote(&symbol()).await.expect("first quote");
        client.quote(&symbol()).await.expect("second quote");

        // One homepage visit serves both quotes.
        assert_eq!(http.request_urls().len(), 3);
    }

    #[tokio::test]
    async fn stale_cookies_trigger_one_rewarm() {
        let http = ScriptedHttpClient::new(vec![
            Ok(HttpResponse::ok_json("<html></html>")),
            Ok(HttpResponse {
                status: 403,
                body: String::new(),
            }),
            Ok(HttpResponse::ok_json("<html></html>")),
            Ok(HttpResponse::ok_json(quote_body())),
        ]);
        let client = NseClient::new(http.clone())
            .with_retry(RetryConfig::no_retry());

        let quote = client.quote(&symbol()).await.expect("re-warm should recover");

        assert_eq!(quote.last_price, 937.0);
        let urls = http.request_urls();
        assert_eq!(urls.len(), 4);
        assert_eq!(urls[2], NSE_HOME_URL);
    }

    #[tokio::test]
    async fn throttling_maps_to_a_rate_limited_error() {
        let http = ScriptedHttpClient::new(vec![
            Ok(HttpResponse::ok_json("<html></html>")),
            Ok(HttpResponse {
                status: 429,
                body: String::new(),
            }),
        ]);
        let client = NseClient::new(http.clone())
            .with_retry(RetryConfig::no_retry());

        let error = client.quote(&symbol()).await.expect_err("throttled");
        assert_eq!(error.kind(), FetchErrorKind::RateLimited);
        assert!(error.retryable());
    }

    #[tokio::test]
    async fn retries_transient_statuses_before_giving_up() {
        let http = ScriptedHttpClient::new(vec![
            Ok(HttpResponse::ok_json("<html></html>")),
            Ok(HttpResponse {
                status: 503,
                body: String::new(),
            }),
            Ok(HttpResponse::ok_json(quote_body())),
        ]);
        let client = NseClient::new(http.clone())
            .with_retry(RetryConfig::fixed(std::time::Duration::from_millis(1), 2));

        let quote = client.quote(&symbol()).await.expect("retry should recover");
        assert_eq!(quote.last_price, 937.0);
        assert_eq!(http.request_urls().len(), 3);
    }

    #[tokio::test]
    async fn undecodable_body_is_a_decode_error() {
        let http = ScriptedHttpClient::new(vec![
            Ok(HttpResponse::ok_json("<html></html>")),
            Ok(HttpResponse::ok_json("not json")),
        ]);
        let client = NseClient::new(http.clone())
            .with_retry(RetryConfig::no_retry());

        let error = client.quote(&symbol()).await.expect_err("bad body");
        assert_eq!(error.kind(), FetchErrorKind::Decode);
        assert!(!error.retryable());
    }

    #[test]
    fn session_expires_after_its_ttl() {
        let session = NseSession::new().with_ttl_secs(0);
        *session.warmed_at.lock().unwrap() = Some(Instant::now());
        assert!(!session.is_warm());

        let fresh = NseSession::new();
        *fresh.warmed_at.lock().unwrap() = Some(Instant::now());
        assert!(fresh.is_warm());
        fresh.invalidate();
        assert!(!fresh.is_warm());
    }
}
