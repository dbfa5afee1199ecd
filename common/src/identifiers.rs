//! Identifier types for CurrencyApi records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for a stored currency record.
///
/// Assigned by the store on insert from a monotonic sequence and never
/// changed afterwards. Serialized as a bare number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyId(i64);

impl CurrencyId {
    /// Create from a raw value.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw value.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for CurrencyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for CurrencyId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl FromStr for CurrencyId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}
