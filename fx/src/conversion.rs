//! Rate sources for conversions.

use std::fmt;

/// Where a conversion takes its rate from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateSource {
    /// Rate stored on the source currency's exchange table.
    Static,
    /// `low` price of a live quote from the price source.
    Live,
}

impl RateSource {
    /// Label used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            RateSource::Static => "static",
            RateSource::Live => "live",
        }
    }
}

impl fmt::Display for RateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
