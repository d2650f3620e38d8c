use thiserror::Error;

/// Client-input and contract errors exposed by `tickbridge-core`.
///
/// Every variant's display string is the user-facing message the HTTP
/// layer returns in a 400-class body.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("request body must be a JSON object")]
    PayloadNotObject,

    #[error("field '{field}' is required")]
    MissingField { field: &'static str },
    #[error("field '{field}' must be a string")]
    NotAString { field: &'static str },
    #[error("symbol cannot be empty")]
    EmptySymbol,

    #[error("dates must follow the YYYY-MM-DD format: '{value}'")]
    InvalidDate { value: String },
    #[error("'start_date' must not be after 'end_date'")]
    StartAfterEnd,

    #[error("price series cannot be empty")]
    EmptyPriceSeries,

    #[error("no company information found for symbol '{symbol}'")]
    NoCompanyData { symbol: String },
    #[error("no market data found for symbol '{symbol}'")]
    NoMarketData { symbol: String },
    #[error("no historical data found for the specified parameters")]
    NoHistoricalData,
    #[error("no analytical data found for the specified parameters")]
    NoAnalyticalData,
}
