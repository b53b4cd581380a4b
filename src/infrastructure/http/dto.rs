//! Wire shapes of the Alpha Vantage `query` endpoint.

use crate::domain::{
    errors::AppError,
    market_data::{IntradayInterval, Price, SymbolSuggestion, TimeSeriesSample},
};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Alpha Vantage reports misuse and throttling with HTTP 200 and one of
/// these top-level fields.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct ApiNotice {
    #[serde(rename = "Error Message", default)]
    pub error_message: Option<String>,
    #[serde(rename = "Note", default)]
    pub note: Option<String>,
    #[serde(rename = "Information", default)]
    pub information: Option<String>,
}

impl ApiNotice {
    pub fn from_body(body: &Value) -> Self {
        Self::deserialize(body).unwrap_or_default()
    }

    pub fn message(&self) -> Option<&str> {
        self.error_message
            .as_deref()
            .or(self.note.as_deref())
            .or(self.information.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SymbolMatch {
    #[serde(rename = "1. symbol", default)]
    pub symbol: String,
    #[serde(rename = "2. name", default)]
    pub name: String,
}

impl From<SymbolMatch> for SymbolSuggestion {
    fn from(m: SymbolMatch) -> Self {
        SymbolSuggestion::new(m.symbol, m.name)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SymbolSearchResponse {
    #[serde(rename = "bestMatches", default)]
    pub best_matches: Option<Vec<SymbolMatch>>,
    #[serde(flatten)]
    pub notice: ApiNotice,
}

impl SymbolSearchResponse {
    /// Bodies that are not JSON objects (`[]`, `null`, bare strings) carry
    /// no `bestMatches` and decode to an empty response.
    pub fn from_body(body: &Value) -> Result<Self, AppError> {
        if !body.is_object() {
            return Ok(Self::default());
        }
        Ok(Self::deserialize(body)?)
    }

    /// A missing `bestMatches` field means "no matches".
    pub fn into_suggestions(self) -> Vec<SymbolSuggestion> {
        self.best_matches.unwrap_or_default().into_iter().map(SymbolSuggestion::from).collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct IntradayBar {
    #[serde(rename = "1. open")]
    pub open: String,
    #[serde(rename = "2. high")]
    pub high: String,
    #[serde(rename = "3. low")]
    pub low: String,
    #[serde(rename = "4. close")]
    pub close: String,
    #[serde(rename = "5. volume", default)]
    pub volume: Option<String>,
}

impl IntradayBar {
    pub fn into_sample(self, timestamp: String) -> Result<TimeSeriesSample, AppError> {
        Ok(TimeSeriesSample {
            open: self.open.parse::<Price>()?,
            high: self.high.parse::<Price>()?,
            low: self.low.parse::<Price>()?,
            close: self.close.parse::<Price>()?,
            timestamp,
        })
    }
}

/// Pulls the `"Time Series (<interval>)"` map out of an intraday body and
/// returns its samples oldest first.
pub fn decode_intraday(
    body: &Value,
    interval: IntradayInterval,
) -> Result<Vec<TimeSeriesSample>, AppError> {
    let key = interval.series_key();
    let Some(series) = body.get(&key) else {
        let notice = ApiNotice::from_body(body);
        return Err(AppError::InvalidResponse(match notice.message() {
            Some(message) => message.to_string(),
            None => format!("response has no {:?} field", key),
        }));
    };

    // BTreeMap iterates keys ascending, which is chronological for these timestamps.
    let bars = BTreeMap::<String, IntradayBar>::deserialize(series)
        .map_err(|e| AppError::InvalidResponse(format!("malformed {:?}: {}", key, e)))?;

    bars.into_iter().map(|(timestamp, bar)| bar.into_sample(timestamp)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn notice_prefers_error_message() {
        let notice = ApiNotice::from_body(&json!({
            "Error Message": "Invalid API call.",
            "Note": "Thank you for using Alpha Vantage!"
        }));
        assert_eq!(notice.message(), Some("Invalid API call."));
        assert_eq!(ApiNotice::from_body(&json!([1, 2])).message(), None);
    }

    #[test]
    fn bar_with_bad_number_is_parse_error() {
        let bar = IntradayBar {
            open: "abc".into(),
            high: "1".into(),
            low: "1".into(),
            close: "1".into(),
            volume: None,
        };
        assert!(matches!(bar.into_sample("09:30".into()), Err(AppError::Parse(_))));
    }
}
