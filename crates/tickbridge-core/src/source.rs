use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::{CompanyProfile, HistoricalBar, QueryDescriptor, QuoteSnapshot, Symbol};

/// Upstream-failure classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    Unavailable,
    InvalidRequest,
    Internal,
}

/// Structured error returned by upstream source adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
}

impl SourceError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unavailable,
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidRequest,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Internal,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::InvalidRequest => "source.invalid_request",
            SourceErrorKind::Internal => "source.internal",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// Boxed future alias used by the object-safe source contract.
pub type SourceFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, SourceError>> + Send + 'a>>;

/// Upstream market-data source contract.
///
/// Implementations perform a single fetch attempt per call; retry and
/// caching policy belongs to callers that want one, not here.
pub trait MarketDataSource: Send + Sync {
    fn company_profile<'a>(&'a self, symbol: &'a Symbol) -> SourceFuture<'a, CompanyProfile>;
    fn quote<'a>(&'a self, symbol: &'a Symbol) -> SourceFuture<'a, QuoteSnapshot>;
    fn history<'a>(&'a self, query: &'a QueryDescriptor) -> SourceFuture<'a, Vec<HistoricalBar>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exposes_kind_and_code() {
        let error = SourceError::unavailable("connection refused");
        assert_eq!(error.kind(), SourceErrorKind::Unavailable);
        assert_eq!(error.code(), "source.unavailable");
        assert_eq!(error.to_string(), "connection refused (source.unavailable)");
    }
}
