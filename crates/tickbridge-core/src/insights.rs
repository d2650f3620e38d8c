use serde::{Deserialize, Serialize};

use crate::{PriceSeries, ValidationError};

/// Summary statistics derived from a closing-price series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InsightReport {
    pub average_close: f64,
    pub highest_close: f64,
    pub lowest_close: f64,
    pub closing_price_volatility: f64,
    pub total_return: f64,
}

impl InsightReport {
    /// Reduce a non-empty, chronologically ordered sequence of closes.
    ///
    /// Volatility is the sample standard deviation (n-1 divisor); a
    /// single-observation series has no dispersion and reports 0.0.
    /// Total return guards against a zero first close by reporting 0.0
    /// instead of failing.
    pub fn from_closes(closes: &[f64]) -> Result<Self, ValidationError> {
        let (first, last) = match (closes.first(), closes.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return Err(ValidationError::EmptyPriceSeries),
        };

        let count = closes.len() as f64;
        let average_close = closes.iter().sum::<f64>() / count;
        let highest_close = closes.iter().copied().fold(f64::MIN, f64::max);
        let lowest_close = closes.iter().copied().fold(f64::MAX, f64::min);

        let closing_price_volatility = if closes.len() < 2 {
            0.0
        } else {
            let squared_deviation = closes
                .iter()
                .map(|close| (close - average_close).powi(2))
                .sum::<f64>();
            (squared_deviation / (count - 1.0)).sqrt()
        };

        let total_return = if first != 0.0 {
            (last - first) / first
        } else {
            0.0
        };

        Ok(Self {
            average_close,
            highest_close,
            lowest_close,
            closing_price_volatility,
            total_return,
        })
    }

    pub fn from_series(series: &PriceSeries) -> Result<Self, ValidationError> {
        Self::from_closes(&series.closes())
    }
}
