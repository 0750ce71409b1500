use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Canonical data source identifiers used in metadata and envelopes.
///
/// Sources are additive: a report may draw on any subset, and a failure in
/// one source never suppresses data from another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceId {
    /// Free-form text pasted from a fundamentals page.
    Paste,
    /// National Stock Exchange public quote API.
    Nse,
    /// Yahoo Finance chart API.
    Yahoo,
}

impl SourceId {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Paste => "paste",
            Self::Nse => "nse",
            Self::Yahoo => "yahoo",
        }
    }
}

impl Display for SourceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
