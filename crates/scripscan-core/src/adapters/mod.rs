//! Live market data adapters.
//!
//! Each adapter speaks one upstream API and returns validated domain
//! types. Failures surface as [`FetchError`] with a stable code and a
//! retryable flag so callers can decide what to do next.

mod nse;
mod yahoo;

pub use nse::{NseClient, NseSession};
pub use yahoo::YahooChartClient;

/// What went wrong while fetching from an upstream source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// Session warm-up failed or the session was rejected.
    Session,
    /// Upstream is unreachable or returned a failure status.
    Unavailable,
    /// Upstream throttled the request.
    RateLimited,
    /// Response arrived but could not be decoded into domain types.
    Decode,
    /// The request was malformed before it left the process.
    InvalidRequest,
}

/// Adapter failure with upstream status when one was seen.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message} ({})", self.code())]
pub struct FetchError {
    kind: FetchErrorKind,
    message: String,
    status: Option<u16>,
    retryable: bool,
}

impl FetchError {
    pub fn session(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Session,
            message: message.into(),
            status: None,
            retryable: true,
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Unavailable,
            message: message.into(),
            status: None,
            retryable: true,
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::RateLimited,
            message: message.into(),
            status: None,
            retryable: true,
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Decode,
            message: message.into(),
            status: None,
            retryable: false,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::InvalidRequest,
            message: message.into(),
            status: None,
            retryable: false,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn kind(&self) -> FetchErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn retryable(&self) -> bool {
        self.retryable
    }

    /// Stable machine-readable code for envelopes and logs.
    pub fn code(&self) -> &'static str {
        match self.kind {
            FetchErrorKind::Session => "fetch.session",
            FetchErrorKind::Unavailable => "fetch.unavailable",
            FetchErrorKind::RateLimited => "fetch.rate_limited",
            FetchErrorKind::Decode => "fetch.decode",
            FetchErrorKind::InvalidRequest => "fetch.invalid_request",
        }
    }
}
