//! Core contracts for scripscan.
//!
//! This crate contains:
//! - Canonical domain models and validation
//! - The report text extraction engine and presentation mapper
//! - Response envelope and structured errors
//! - NSE and Yahoo fetch adapters over a shared HTTP seam

pub mod adapters;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod extract;
pub mod http;
pub mod retry;
pub mod source;
pub mod time;

pub use adapters::{FetchError, FetchErrorKind, NseClient, NseSession, YahooChartClient};
pub use domain::{LiveQuote, MarketSnapshot, Symbol};
pub use envelope::{Envelope, EnvelopeError, EnvelopeMeta};
pub use error::{ExtractError, ValidationError};
pub use extract::{
    display_fields, format_indian_grouping, parse_numeric_token, parse_report, round2,
    CompletenessSummary, CorporateSignals, FieldView, FinancialStrength, Growth, PriceVolume,
    Shareholding, StockRecord, Valuation, ABSENT_PLACEHOLDER,
};
pub use http::{
    HttpClient, HttpError, HttpErrorKind, HttpMethod, HttpRequest, HttpResponse, NoopHttpClient,
    ReqwestHttpClient,
};
pub use retry::{Backoff, RetryConfig};
pub use source::SourceId;
pub use time::UtcDateTime;
