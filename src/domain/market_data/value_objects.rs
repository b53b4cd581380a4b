use crate::domain::errors::AppError;
use derive_more::{Constructor, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;
use strum::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString};

/// Value Object - price in the quote currency
#[derive(Debug, Clone, Copy, PartialEq, From, Into, Deref, Constructor, Serialize, Deserialize)]
pub struct Price(f64);

impl Price {
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

/// Alpha Vantage sends prices as decimal strings ("187.4100").
impl FromStr for Price {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let value = raw
            .trim()
            .parse::<f64>()
            .map_err(|e| AppError::Parse(format!("invalid price {:?}: {}", raw, e)))?;
        if !value.is_finite() {
            return Err(AppError::Parse(format!("non-finite price {:?}", raw)));
        }
        Ok(Self(value))
    }
}

/// Value Object - ticker symbol, kept exactly as the API spelled it
/// ("AAPL", "TSCO.LON").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deref, Display, Serialize, Deserialize)]
#[display(fmt = "{}", _0)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(symbol: impl Into<String>) -> Result<Self, AppError> {
        let symbol = symbol.into();
        if symbol.is_empty() {
            return Err(AppError::Validation("Symbol cannot be empty".to_string()));
        }
        Ok(Self(symbol))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Sampling interval accepted by `TIME_SERIES_INTRADAY`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, StrumDisplay, EnumIter, EnumString, AsRefStr,
    Serialize, Deserialize,
)]
pub enum IntradayInterval {
    #[strum(serialize = "1min")]
    #[serde(rename = "1min")]
    OneMinute,

    #[default]
    #[strum(serialize = "5min")]
    #[serde(rename = "5min")]
    FiveMinutes,

    #[strum(serialize = "15min")]
    #[serde(rename = "15min")]
    FifteenMinutes,

    #[strum(serialize = "30min")]
    #[serde(rename = "30min")]
    ThirtyMinutes,

    #[strum(serialize = "60min")]
    #[serde(rename = "60min")]
    SixtyMinutes,
}

impl IntradayInterval {
    pub fn as_query_value(&self) -> &str {
        self.as_ref()
    }

    /// Key of the sample map in the intraday response body.
    pub fn series_key(&self) -> String {
        format!("Time Series ({})", self.as_query_value())
    }
}
