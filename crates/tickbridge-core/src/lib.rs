//! Core contracts for tickbridge.
//!
//! This crate contains:
//! - Canonical domain models and validation
//! - The request validator for date-ranged queries
//! - The insight calculator over closing-price series
//! - The upstream source trait and the Yahoo Finance adapter

pub mod adapters;
pub mod domain;
pub mod error;
pub mod insights;
pub mod query;
pub mod source;
pub mod transport;

pub use adapters::YahooSource;
pub use domain::{
    CompanyOfficer, CompanyProfile, HistoricalBar, Interval, PricePoint, PriceSeries,
    QuoteSnapshot, Symbol, TradeDate,
};
pub use error::ValidationError;
pub use insights::InsightReport;
pub use query::QueryDescriptor;
pub use source::{MarketDataSource, SourceError, SourceErrorKind, SourceFuture};
pub use transport::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};
