use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::source::{MarketDataSource, SourceError, SourceFuture};
use crate::transport::{HttpClient, HttpRequest};
use crate::{
    CompanyOfficer, CompanyProfile, HistoricalBar, QueryDescriptor, QuoteSnapshot, Symbol,
    TradeDate,
};

const QUOTE_SUMMARY_BASE: &str = "https://query1.finance.yahoo.com/v10/finance/quoteSummary";
const CHART_BASE: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const REFERER: &str = "https://finance.yahoo.com/";
const REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Yahoo Finance source adapter.
///
/// Talks to the unofficial quoteSummary and chart JSON endpoints through an
/// injected transport. One fetch attempt per call; a 404 body carrying an
/// API-level error is treated as an empty result set rather than an outage,
/// so callers can distinguish "no data" from "unreachable".
#[derive(Clone)]
pub struct YahooSource {
    http: Arc<dyn HttpClient>,
}

impl YahooSource {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self { http }
    }

    async fn fetch_body(&self, url: &str) -> Result<String, SourceError> {
        let request = HttpRequest::get(url)
            .with_header("referer", REFERER)
            .with_timeout_ms(REQUEST_TIMEOUT_MS);

        let response = self.http.execute(request).await.map_err(|error| {
            SourceError::unavailable(format!("yahoo transport error: {}", error.message()))
        })?;

        // Yahoo reports unknown symbols as a 404 with a structured error
        // body; that is an answer, not an outage.
        if response.is_success() || response.status == 404 {
            return Ok(response.body);
        }

        Err(SourceError::unavailable(format!(
            "yahoo upstream returned status {}",
            response.status
        )))
    }

    async fn fetch_summary(
        &self,
        symbol: &Symbol,
        modules: &str,
    ) -> Result<Option<QuoteSummaryResult>, SourceError> {
        let url = format!(
            "{QUOTE_SUMMARY_BASE}/{}?modules={}",
            urlencoding::encode(symbol.as_str()),
            urlencoding::encode(modules),
        );

        let body = self.fetch_body(&url).await?;
        let parsed: QuoteSummaryResponse = serde_json::from_str(&body).map_err(|e| {
            SourceError::internal(format!("failed to parse yahoo summary response: {e}"))
        })?;

        if is_api_error(&parsed.quote_summary.error) {
            return Ok(None);
        }

        Ok(parsed.quote_summary.result.into_iter().flatten().next())
    }
}

impl MarketDataSource for YahooSource {
    fn company_profile<'a>(&'a self, symbol: &'a Symbol) -> SourceFuture<'a, CompanyProfile> {
        Box::pin(async move {
            let result = self.fetch_summary(symbol, "assetProfile,price").await?;
            Ok(profile_from_summary(symbol, result))
        })
    }

    fn quote<'a>(&'a self, symbol: &'a Symbol) -> SourceFuture<'a, QuoteSnapshot> {
        Box::pin(async move {
            let result = self.fetch_summary(symbol, "price,summaryDetail").await?;
            Ok(snapshot_from_summary(symbol, result))
        })
    }

    fn history<'a>(&'a self, query: &'a QueryDescriptor) -> SourceFuture<'a, Vec<HistoricalBar>> {
        Box::pin(async move {
            // period2 is exclusive upstream; extending one day past end_date
            // keeps the final requested trading day in the window.
            let url = format!(
                "{CHART_BASE}/{}?period1={}&period2={}&interval={}&includeAdjustedClose=true",
                urlencoding::encode(query.symbol.as_str()),
                query.start_date.start_of_day_unix(),
                query.end_date.next_day().start_of_day_unix(),
                urlencoding::encode(query.interval.as_str()),
            );

            let body = self.fetch_body(&url).await?;
            let parsed: ChartResponse = serde_json::from_str(&body).map_err(|e| {
                SourceError::internal(format!("failed to parse yahoo chart response: {e}"))
            })?;

            if is_api_error(&parsed.chart.error) {
                return Ok(Vec::new());
            }

            let Some(result) = parsed.chart.result.into_iter().flatten().next() else {
                return Ok(Vec::new());
            };

            Ok(bars_from_chart(result))
        })
    }
}

fn is_api_error(error: &Option<Value>) -> bool {
    error.as_ref().is_some_and(|value| !value.is_null())
}

fn profile_from_summary(symbol: &Symbol, result: Option<QuoteSummaryResult>) -> CompanyProfile {
    let result = result.unwrap_or_default();
    let price = result.price.unwrap_or_default();
    let asset_profile = result.asset_profile.unwrap_or_default();

    CompanyProfile {
        symbol: symbol.clone(),
        name: price.long_name.or(price.short_name),
        summary: asset_profile.long_business_summary,
        industry: asset_profile.industry,
        sector: asset_profile.sector,
        website: asset_profile.website,
        officers: asset_profile
            .company_officers
            .iter()
            .filter_map(CompanyOfficer::from_value)
            .collect(),
    }
}

fn snapshot_from_summary(symbol: &Symbol, result: Option<QuoteSummaryResult>) -> QuoteSnapshot {
    let result = result.unwrap_or_default();
    let price = result.price.unwrap_or_default();
    let detail = result.summary_detail.unwrap_or_default();

    QuoteSnapshot {
        symbol: symbol.clone(),
        currency: price.currency,
        last_price: price.regular_market_price.and_then(RawValue::as_f64),
        previous_close: price
            .regular_market_previous_close
            .and_then(RawValue::as_f64)
            .or_else(|| detail.previous_close.and_then(RawValue::as_f64)),
        open: price
            .regular_market_open
            .and_then(RawValue::as_f64)
            .or_else(|| detail.open.and_then(RawValue::as_f64)),
        day_high: price.regular_market_day_high.and_then(RawValue::as_f64),
        day_low: price.regular_market_day_low.and_then(RawValue::as_f64),
        volume: price
            .regular_market_volume
            .and_then(RawValue::as_u64)
            .or_else(|| detail.volume.and_then(RawValue::as_u64)),
        market_cap: price.market_cap.and_then(RawValue::as_f64),
        fifty_two_week_high: detail.fifty_two_week_high.and_then(RawValue::as_f64),
        fifty_two_week_low: detail.fifty_two_week_low.and_then(RawValue::as_f64),
    }
}

fn bars_from_chart(result: ChartResult) -> Vec<HistoricalBar> {
    let timestamps = result.timestamp.unwrap_or_default();
    let Some(quote) = result.indicators.quote.into_iter().next() else {
        return Vec::new();
    };
    let adjclose = result
        .indicators
        .adjclose
        .unwrap_or_default()
        .into_iter()
        .next()
        .map(|series| series.adjclose)
        .unwrap_or_default();

    let mut bars = Vec::with_capacity(timestamps.len());
    for (index, &seconds) in timestamps.iter().enumerate() {
        let Some(date) = TradeDate::from_unix_seconds(seconds) else {
            continue;
        };

        // Rows with incomplete OHLC data are skipped, not zero-filled.
        if let (Some(Some(open)), Some(Some(high)), Some(Some(low)), Some(Some(close))) = (
            quote.open.get(index),
            quote.high.get(index),
            quote.low.get(index),
            quote.close.get(index),
        ) {
            let adj_close = adjclose
                .get(index)
                .copied()
                .flatten()
                .unwrap_or(*close);
            let volume = quote
                .volume
                .get(index)
                .copied()
                .flatten()
                .map(|v| v as u64);

            bars.push(HistoricalBar {
                date,
                open: *open,
                high: *high,
                low: *low,
                close: *close,
                adj_close,
                volume,
            });
        }
    }

    bars
}

// Yahoo Finance API response structures.

#[derive(Debug, Clone, Deserialize)]
struct QuoteSummaryResponse {
    #[serde(rename = "quoteSummary")]
    quote_summary: QuoteSummaryData,
}

#[derive(Debug, Clone, Deserialize)]
struct QuoteSummaryData {
    #[serde(default)]
    result: Option<Vec<QuoteSummaryResult>>,
    #[serde(default)]
    error: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct QuoteSummaryResult {
    #[serde(rename = "assetProfile", default)]
    asset_profile: Option<AssetProfileData>,
    #[serde(rename = "price", default)]
    price: Option<PriceData>,
    #[serde(rename = "summaryDetail", default)]
    summary_detail: Option<SummaryDetailData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct AssetProfileData {
    #[serde(rename = "longBusinessSummary", default)]
    long_business_summary: Option<String>,
    #[serde(default)]
    industry: Option<String>,
    #[serde(default)]
    sector: Option<String>,
    #[serde(default)]
    website: Option<String>,
    #[serde(rename = "companyOfficers", default)]
    company_officers: Vec<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct PriceData {
    #[serde(rename = "longName", default)]
    long_name: Option<String>,
    #[serde(rename = "shortName", default)]
    short_name: Option<String>,
    #[serde(default)]
    currency: Option<String>,
    #[serde(rename = "regularMarketPrice", default)]
    regular_market_price: Option<RawValue>,
    #[serde(rename = "regularMarketPreviousClose", default)]
    regular_market_previous_close: Option<RawValue>,
    #[serde(rename = "regularMarketOpen", default)]
    regular_market_open: Option<RawValue>,
    #[serde(rename = "regularMarketDayHigh", default)]
    regular_market_day_high: Option<RawValue>,
    #[serde(rename = "regularMarketDayLow", default)]
    regular_market_day_low: Option<RawValue>,
    #[serde(rename = "regularMarketVolume", default)]
    regular_market_volume: Option<RawValue>,
    #[serde(rename = "marketCap", default)]
    market_cap: Option<RawValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SummaryDetailData {
    #[serde(rename = "previousClose", default)]
    previous_close: Option<RawValue>,
    #[serde(rename = "open", default)]
    open: Option<RawValue>,
    #[serde(rename = "volume", default)]
    volume: Option<RawValue>,
    #[serde(rename = "fiftyTwoWeekHigh", default)]
    fifty_two_week_high: Option<RawValue>,
    #[serde(rename = "fiftyTwoWeekLow", default)]
    fifty_two_week_low: Option<RawValue>,
}

/// Yahoo wraps numbers in `{"raw": ..., "fmt": ...}` objects.
#[derive(Debug, Clone, Default, Deserialize)]
struct RawValue {
    #[serde(default)]
    raw: Option<f64>,
}

impl RawValue {
    fn as_f64(self) -> Option<f64> {
        self.raw.filter(|v| v.is_finite())
    }

    fn as_u64(self) -> Option<u64> {
        self.as_f64().filter(|v| *v >= 0.0).map(|v| v as u64)
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ChartResponse {
    chart: ChartData,
}

#[derive(Debug, Clone, Deserialize)]
struct ChartData {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Option<Vec<i64>>,
    indicators: ChartIndicators,
}

#[derive(Debug, Clone, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<ChartQuote>,
    #[serde(default)]
    adjclose: Option<Vec<ChartAdjClose>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ChartQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<i64>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ChartAdjClose {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}
