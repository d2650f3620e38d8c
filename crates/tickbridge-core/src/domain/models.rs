use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Symbol, TradeDate};

/// Simplified company officer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyOfficer {
    pub name: Option<String>,
    pub title: Option<String>,
    pub age: Option<u32>,
    pub year_born: Option<u32>,
}

impl CompanyOfficer {
    /// Extract an officer from a loosely-typed upstream record.
    ///
    /// Known fields are pulled option-wise; entries that are not objects
    /// yield `None` and are skipped by the caller.
    pub fn from_value(value: &Value) -> Option<Self> {
        let record = value.as_object()?;

        Some(Self {
            name: record.get("name").and_then(Value::as_str).map(str::to_owned),
            title: record
                .get("title")
                .and_then(Value::as_str)
                .map(str::to_owned),
            age: record.get("age").and_then(Value::as_u64).map(|v| v as u32),
            year_born: record
                .get("yearBorn")
                .and_then(Value::as_u64)
                .map(|v| v as u32),
        })
    }
}

/// Company profile shaped for the company-info endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub symbol: Symbol,
    pub name: Option<String>,
    pub summary: Option<String>,
    pub industry: Option<String>,
    pub sector: Option<String>,
    pub website: Option<String>,
    pub officers: Vec<CompanyOfficer>,
}

impl CompanyProfile {
    /// True when upstream returned no usable profile fields at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.summary.is_none()
            && self.industry.is_none()
            && self.sector.is_none()
            && self.website.is_none()
            && self.officers.is_empty()
    }
}

/// Real-time quote snapshot shaped for the stock-data endpoint.
///
/// Every market field is optional: the upstream provider omits fields
/// freely depending on asset class and market hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSnapshot {
    pub symbol: Symbol,
    pub currency: Option<String>,
    pub last_price: Option<f64>,
    pub previous_close: Option<f64>,
    pub open: Option<f64>,
    pub day_high: Option<f64>,
    pub day_low: Option<f64>,
    pub volume: Option<u64>,
    pub market_cap: Option<f64>,
    pub fifty_two_week_high: Option<f64>,
    pub fifty_two_week_low: Option<f64>,
}

impl QuoteSnapshot {
    /// True when no market field is populated.
    pub fn is_empty(&self) -> bool {
        self.last_price.is_none()
            && self.previous_close.is_none()
            && self.open.is_none()
            && self.day_high.is_none()
            && self.day_low.is_none()
            && self.volume.is_none()
            && self.market_cap.is_none()
    }
}

/// OHLCV record for one period of the historical endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalBar {
    pub date: TradeDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub adj_close: f64,
    pub volume: Option<u64>,
}

/// One (date, close) observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: TradeDate,
    pub close: f64,
}

/// Chronologically ascending closing-price series.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceSeries(Vec<PricePoint>);

impl PriceSeries {
    pub fn new(points: Vec<PricePoint>) -> Self {
        Self(points)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.0
    }

    pub fn closes(&self) -> Vec<f64> {
        self.0.iter().map(|point| point.close).collect()
    }
}

impl FromIterator<PricePoint> for PriceSeries {
    fn from_iter<I: IntoIterator<Item = PricePoint>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
