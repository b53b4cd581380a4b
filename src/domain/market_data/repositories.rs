use crate::domain::errors::AppError;
use crate::domain::market_data::{Symbol, SymbolSuggestion, TimeSeriesSample};
use std::future::Future;

/// Source of symbol lookups and intraday bars.
///
/// Futures are not `Send`: implementations run on the browser event loop.
pub trait StockDataRepository {
    /// `Ok(vec![])` when the provider has no matches; `Err` only for
    /// transport or decoding failures.
    fn search_symbols(
        &self,
        keywords: &str,
    ) -> impl Future<Output = Result<Vec<SymbolSuggestion>, AppError>>;

    /// Samples ordered oldest first.
    fn fetch_intraday(
        &self,
        symbol: &Symbol,
    ) -> impl Future<Output = Result<Vec<TimeSeriesSample>, AppError>>;
}
