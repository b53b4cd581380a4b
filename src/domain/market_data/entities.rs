pub use super::value_objects::{Price, Symbol};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One search hit from `SYMBOL_SEARCH`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolSuggestion {
    pub symbol: String,
    pub name: String,
}

impl SymbolSuggestion {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self { symbol: symbol.into(), name: name.into() }
    }

    /// Selection target; `None` when the provider returned a blank symbol.
    pub fn to_symbol(&self) -> Option<Symbol> {
        Symbol::new(self.symbol.clone()).ok()
    }
}

impl fmt::Display for SymbolSuggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.symbol, self.name)
    }
}

/// One intraday bar. `timestamp` is the provider's local exchange time
/// string, e.g. `"2024-01-05 16:00:00"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesSample {
    pub timestamp: String,
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
}

impl TimeSeriesSample {
    pub fn new(timestamp: impl Into<String>, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            timestamp: timestamp.into(),
            open: Price::from(open),
            high: Price::from(high),
            low: Price::from(low),
            close: Price::from(close),
        }
    }

    pub fn ohlc(&self) -> [f64; 4] {
        [self.open.value(), self.high.value(), self.low.value(), self.close.value()]
    }
}

/// Orders samples oldest first. Alpha Vantage timestamps are fixed-width
/// `YYYY-MM-DD HH:MM:SS`, so lexical order is chronological order.
pub fn sort_chronologically(samples: &mut [TimeSeriesSample]) {
    samples.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
}
