use crate::domain::market_data::TimeSeriesSample;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinePoint {
    pub timestamp: String,
    pub value: f64,
}

/// Open price per sample.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineSeries {
    pub points: Vec<LinePoint>,
}

impl LineSeries {
    pub fn from_samples(samples: &[TimeSeriesSample]) -> Self {
        Self {
            points: samples
                .iter()
                .map(|s| LinePoint { timestamp: s.timestamp.clone(), value: s.open.value() })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn timestamps(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.timestamp.as_str()).collect()
    }

    /// (min, max) over the plotted values.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        range_of(self.points.iter().map(|p| (p.value, p.value)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandlePoint {
    pub timestamp: String,
    /// open, high, low, close
    pub ohlc: [f64; 4],
}

impl CandlePoint {
    pub fn open(&self) -> f64 {
        self.ohlc[0]
    }
    pub fn high(&self) -> f64 {
        self.ohlc[1]
    }
    pub fn low(&self) -> f64 {
        self.ohlc[2]
    }
    pub fn close(&self) -> f64 {
        self.ohlc[3]
    }
    pub fn is_bullish(&self) -> bool {
        self.close() >= self.open()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandlestickSeries {
    pub points: Vec<CandlePoint>,
}

impl CandlestickSeries {
    pub fn from_samples(samples: &[TimeSeriesSample]) -> Self {
        Self {
            points: samples
                .iter()
                .map(|s| CandlePoint { timestamp: s.timestamp.clone(), ohlc: s.ohlc() })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn timestamps(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.timestamp.as_str()).collect()
    }

    /// (lowest low, highest high).
    pub fn price_range(&self) -> Option<(f64, f64)> {
        range_of(self.points.iter().map(|p| (p.low(), p.high())))
    }
}

/// Both projections of one fetch. Built in a single step so the line and
/// candle views can never come from different responses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSeries {
    pub line: LineSeries,
    pub candles: CandlestickSeries,
}

impl ChartSeries {
    /// `samples` must already be ordered oldest first.
    pub fn derive(samples: &[TimeSeriesSample]) -> Self {
        Self {
            line: LineSeries::from_samples(samples),
            candles: CandlestickSeries::from_samples(samples),
        }
    }

    pub fn len(&self) -> usize {
        self.line.len()
    }

    pub fn is_empty(&self) -> bool {
        self.line.is_empty()
    }
}

fn range_of(values: impl Iterator<Item = (f64, f64)>) -> Option<(f64, f64)> {
    values.fold(None, |acc, (lo, hi)| match acc {
        None => Some((lo, hi)),
        Some((min, max)) => Some((min.min(lo), max.max(hi))),
    })
}
