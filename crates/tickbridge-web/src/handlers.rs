use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};
use tickbridge_core::{
    CompanyProfile, HistoricalBar, InsightReport, Interval, PricePoint, PriceSeries,
    QueryDescriptor, QuoteSnapshot, Symbol, TradeDate, ValidationError,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Liveness probe.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Company profile lookup by symbol.
pub async fn company_info(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<CompanyProfile>, ApiError> {
    let symbol = Symbol::parse(&symbol)?;
    let profile = state.source.company_profile(&symbol).await?;

    if profile.is_empty() {
        return Err(ValidationError::NoCompanyData {
            symbol: symbol.as_str().to_owned(),
        }
        .into());
    }

    Ok(Json(profile))
}

/// Real-time quote snapshot by symbol.
pub async fn stock_data(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<QuoteSnapshot>, ApiError> {
    let symbol = Symbol::parse(&symbol)?;
    let snapshot = state.source.quote(&symbol).await?;

    if snapshot.is_empty() {
        return Err(ValidationError::NoMarketData {
            symbol: symbol.as_str().to_owned(),
        }
        .into());
    }

    Ok(Json(snapshot))
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub symbol: Symbol,
    pub interval: Interval,
    pub data: Vec<HistoricalBar>,
}

/// Historical OHLCV series for a validated date-ranged query.
pub async fn historical_data(
    State(state): State<AppState>,
    body: Option<Json<Value>>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let query = descriptor_from_body(body)?;
    let bars = state.source.history(&query).await?;

    if bars.is_empty() {
        return Err(ValidationError::NoHistoricalData.into());
    }

    Ok(Json(HistoryResponse {
        symbol: query.symbol,
        interval: query.interval,
        data: bars,
    }))
}

#[derive(Debug, Serialize)]
pub struct InsightsResponse {
    pub symbol: Symbol,
    pub interval: Interval,
    pub start_date: TradeDate,
    pub end_date: TradeDate,
    #[serde(flatten)]
    pub report: InsightReport,
}

/// Derived statistics over the adjusted closing prices of a date-ranged
/// query.
pub async fn analytical_insights(
    State(state): State<AppState>,
    body: Option<Json<Value>>,
) -> Result<Json<InsightsResponse>, ApiError> {
    let query = descriptor_from_body(body)?;
    let bars = state.source.history(&query).await?;

    if bars.is_empty() {
        return Err(ValidationError::NoAnalyticalData.into());
    }

    let series: PriceSeries = bars
        .iter()
        .map(|bar| PricePoint {
            date: bar.date,
            close: bar.adj_close,
        })
        .collect();
    let report = InsightReport::from_series(&series)?;

    Ok(Json(InsightsResponse {
        symbol: query.symbol,
        interval: query.interval,
        start_date: query.start_date,
        end_date: query.end_date,
        report,
    }))
}

/// A missing or non-JSON body validates exactly like a non-object payload.
fn descriptor_from_body(body: Option<Json<Value>>) -> Result<QueryDescriptor, ValidationError> {
    let payload = body.map(|Json(value)| value).unwrap_or(Value::Null);
    QueryDescriptor::from_payload(&payload)
}
