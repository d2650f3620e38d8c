use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Sampling interval token forwarded to the upstream provider.
///
/// Kept as an open token rather than a closed enum: the validator contract
/// only rejects non-string values, and the provider owns the set of tokens
/// it accepts. Blank or absent input falls back to the daily default.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Interval(String);

impl Interval {
    pub const DEFAULT_TOKEN: &'static str = "1d";

    /// Normalize an interval token; blank input yields the daily default.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Self::default();
        }

        Self(trimmed.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self(Self::DEFAULT_TOKEN.to_owned())
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Interval {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<Interval> for String {
    fn from(value: Interval) -> Self {
        value.0
    }
}
