use serde::Serialize;
use serde_json::Value;

use crate::{Interval, Symbol, TradeDate, ValidationError};

/// Normalized descriptor for historical and analytical queries.
///
/// Built once per request from an untrusted JSON payload and immutable
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryDescriptor {
    pub symbol: Symbol,
    pub start_date: TradeDate,
    pub end_date: TradeDate,
    pub interval: Interval,
}

impl QueryDescriptor {
    /// Validate and normalize an inbound payload.
    ///
    /// Accepts a JSON object with string fields `symbol`, `start_date`,
    /// `end_date` (`YYYY-MM-DD`) and an optional string `interval`. Pure
    /// function of its input; re-validating the serialized output of a
    /// descriptor yields an identical descriptor.
    pub fn from_payload(payload: &Value) -> Result<Self, ValidationError> {
        let body = payload
            .as_object()
            .ok_or(ValidationError::PayloadNotObject)?;

        let symbol = match body.get("symbol") {
            None => return Err(ValidationError::MissingField { field: "symbol" }),
            Some(Value::String(raw)) => Symbol::parse(raw)?,
            Some(_) => return Err(ValidationError::NotAString { field: "symbol" }),
        };

        let start_date = require_date(body, "start_date")?;
        let end_date = require_date(body, "end_date")?;
        if start_date > end_date {
            return Err(ValidationError::StartAfterEnd);
        }

        let interval = match body.get("interval") {
            None => Interval::default(),
            Some(Value::String(raw)) => Interval::parse(raw),
            Some(_) => return Err(ValidationError::NotAString { field: "interval" }),
        };

        Ok(Self {
            symbol,
            start_date,
            end_date,
            interval,
        })
    }
}

fn require_date(
    body: &serde_json::Map<String, Value>,
    field: &'static str,
) -> Result<TradeDate, ValidationError> {
    match body.get(field) {
        None => Err(ValidationError::MissingField { field }),
        Some(Value::String(raw)) => TradeDate::parse(raw),
        Some(_) => Err(ValidationError::NotAString { field }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_payload() -> Value {
        json!({
            "symbol": " aapl ",
            "start_date": "2024-01-01",
            "end_date": "2024-01-31"
        })
    }

    #[test]
    fn normalizes_symbol_and_defaults_interval() {
        let query = QueryDescriptor::from_payload(&valid_payload()).expect("must validate");

        assert_eq!(query.symbol.as_str(), "AAPL");
        assert_eq!(query.interval.as_str(), "1d");
        assert_eq!(query.start_date.format_ymd(), "2024-01-01");
        assert_eq!(query.end_date.format_ymd(), "2024-01-31");
    }

    #[test]
    fn blank_interval_falls_back_to_daily() {
        let mut payload = valid_payload();
        payload["interval"] = json!("   ");

        let query = QueryDescriptor::from_payload(&payload).expect("must validate");
        assert_eq!(query.interval.as_str(), "1d");
    }

    #[test]
    fn preserves_explicit_interval() {
        let mut payload = valid_payload();
        payload["interval"] = json!(" 1wk ");

        let query = QueryDescriptor::from_payload(&payload).expect("must validate");
        assert_eq!(query.interval.as_str(), "1wk");
    }

    #[test]
    fn revalidation_is_idempotent() {
        let first = QueryDescriptor::from_payload(&valid_payload()).expect("must validate");
        let reserialized = serde_json::to_value(&first).expect("descriptor serializes");
        let second = QueryDescriptor::from_payload(&reserialized).expect("must revalidate");

        assert_eq!(first, second);
    }

    #[test]
    fn rejects_non_object_payloads() {
        for payload in [json!(null), json!("body"), json!([1, 2]), json!(7)] {
            let err = QueryDescriptor::from_payload(&payload).expect_err("must fail");
            assert!(matches!(err, ValidationError::PayloadNotObject));
        }
    }

    #[test]
    fn rejects_missing_fields() {
        for field in ["symbol", "start_date", "end_date"] {
            let mut payload = valid_payload();
            payload.as_object_mut().expect("object").remove(field);

            let err = QueryDescriptor::from_payload(&payload).expect_err("must fail");
            assert_eq!(err, ValidationError::MissingField { field });
        }
    }

    #[test]
    fn rejects_non_string_fields() {
        let mut payload = valid_payload();
        payload["symbol"] = json!(123);
        assert_eq!(
            QueryDescriptor::from_payload(&payload).expect_err("must fail"),
            ValidationError::NotAString { field: "symbol" }
        );

        let mut payload = valid_payload();
        payload["start_date"] = json!(20240101);
        assert_eq!(
            QueryDescriptor::from_payload(&payload).expect_err("must fail"),
            ValidationError::NotAString { field: "start_date" }
        );

        let mut payload = valid_payload();
        payload["interval"] = json!(["1d"]);
        assert_eq!(
            QueryDescriptor::from_payload(&payload).expect_err("must fail"),
            ValidationError::NotAString { field: "interval" }
        );
    }

    #[test]
    fn rejects_blank_symbol() {
        let mut payload = valid_payload();
        payload["symbol"] = json!("   ");

        let err = QueryDescriptor::from_payload(&payload).expect_err("must fail");
        assert!(matches!(err, ValidationError::EmptySymbol));
    }

    #[test]
    fn rejects_invalid_calendar_dates() {
        let mut payload = valid_payload();
        payload["start_date"] = json!("2024-13-01");

        let err = QueryDescriptor::from_payload(&payload).expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidDate { .. }));
    }

    #[test]
    fn rejects_start_after_end() {
        let payload = json!({
            "symbol": "AAPL",
            "start_date": "2024-02-01",
            "end_date": "2024-01-01"
        });

        let err = QueryDescriptor::from_payload(&payload).expect_err("must fail");
        assert!(matches!(err, ValidationError::StartAfterEnd));
    }

    #[test]
    fn accepts_equal_start_and_end() {
        let payload = json!({
            "symbol": "AAPL",
            "start_date": "2024-01-15",
            "end_date": "2024-01-15"
        });

        assert!(QueryDescriptor::from_payload(&payload).is_ok());
    }
}
