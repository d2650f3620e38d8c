use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::ValidationError;

static DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Calendar date with no time-of-day component, parsed strictly from
/// `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TradeDate(Date);

impl TradeDate {
    /// Parse a `YYYY-MM-DD` string as a real calendar date.
    ///
    /// Month 13, day 32, two-digit years, and alternate separators are all
    /// rejected rather than silently adjusted.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        Date::parse(input, DATE_FORMAT)
            .map(Self)
            .map_err(|_| ValidationError::InvalidDate {
                value: input.to_owned(),
            })
    }

    /// The calendar date of a Unix timestamp, interpreted in UTC.
    pub fn from_unix_seconds(seconds: i64) -> Option<Self> {
        OffsetDateTime::from_unix_timestamp(seconds)
            .ok()
            .map(|dt| Self(dt.date()))
    }

    /// Unix timestamp of this date's midnight, UTC.
    pub fn start_of_day_unix(self) -> i64 {
        self.0.midnight().assume_utc().unix_timestamp()
    }

    /// The following calendar day. Saturates at the calendar boundary.
    pub fn next_day(self) -> Self {
        Self(self.0.next_day().unwrap_or(self.0))
    }

    pub fn into_inner(self) -> Date {
        self.0
    }

    pub fn format_ymd(self) -> String {
        self.0
            .format(DATE_FORMAT)
            .expect("TradeDate must be YYYY-MM-DD formattable")
    }
}

impl Display for TradeDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_ymd())
    }
}

impl Serialize for TradeDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_ymd())
    }
}

impl<'de> Deserialize<'de> for TradeDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}
