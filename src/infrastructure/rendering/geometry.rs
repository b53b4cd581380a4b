//! Pixel geometry for the canvas charts. No browser types here, so the
//! layout math runs in native tests.

use crate::domain::chart::{CandlestickSeries, LineSeries};

/// Plot rectangle inside the canvas, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    /// Room on the left for price labels.
    pub axis_space: f64,
    /// Room at the bottom for time labels.
    pub label_space: f64,
}

impl PlotArea {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width: width as f64, height: height as f64, padding: 40.0, axis_space: 70.0, label_space: 50.0 }
    }

    pub fn left(&self) -> f64 {
        self.padding + self.axis_space
    }

    pub fn right(&self) -> f64 {
        (self.width - self.padding).max(self.left())
    }

    pub fn top(&self) -> f64 {
        self.padding
    }

    pub fn bottom(&self) -> f64 {
        (self.height - self.padding - self.label_space).max(self.top())
    }

    pub fn plot_width(&self) -> f64 {
        self.right() - self.left()
    }

    pub fn plot_height(&self) -> f64 {
        self.bottom() - self.top()
    }

    /// Center of slot `index` out of `count` equal slots.
    pub fn x_for(&self, index: usize, count: usize) -> f64 {
        let slot = self.slot_width(count);
        self.left() + slot * index as f64 + slot / 2.0
    }

    pub fn slot_width(&self, count: usize) -> f64 {
        self.plot_width() / count.max(1) as f64
    }
}

/// Vertical price mapping. A flat range is widened so it still has height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceScale {
    pub min: f64,
    pub max: f64,
}

impl PriceScale {
    pub fn new(min: f64, max: f64) -> Self {
        if (max - min).abs() < f64::EPSILON {
            let pad = if min.abs() > f64::EPSILON { min.abs() * 0.01 } else { 1.0 };
            Self { min: min - pad, max: max + pad }
        } else {
            Self { min: min.min(max), max: max.max(min) }
        }
    }

    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    pub fn y_for(&self, price: f64, area: &PlotArea) -> f64 {
        area.top() + (self.max - price) / self.range() * area.plot_height()
    }

    /// `count` evenly spaced prices from max down to min.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        match count {
            0 => Vec::new(),
            1 => vec![self.max],
            n => (0..n).map(|i| self.max - self.range() * i as f64 / (n - 1) as f64).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineGeometry {
    pub scale: PriceScale,
    pub points: Vec<(f64, f64)>,
}

pub fn line_geometry(series: &LineSeries, area: &PlotArea) -> Option<LineGeometry> {
    let (min, max) = series.value_range()?;
    let scale = PriceScale::new(min, max);
    let count = series.len();
    let points = series
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| (area.x_for(i, count), scale.y_for(p.value, area)))
        .collect();
    Some(LineGeometry { scale, points })
}

/// Per-candle pixel positions.
#[derive(Debug, Clone, PartialEq)]
pub struct CandleRenderData {
    pub x: f64,
    pub high_y: f64,
    pub low_y: f64,
    pub open_y: f64,
    pub close_y: f64,
    pub body_width: f64,
    pub is_bullish: bool,
}

impl CandleRenderData {
    pub fn body_top(&self) -> f64 {
        self.open_y.min(self.close_y)
    }

    pub fn body_height(&self) -> f64 {
        (self.open_y - self.close_y).abs()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CandleGeometry {
    pub scale: PriceScale,
    pub candles: Vec<CandleRenderData>,
}

pub fn candle_geometry(series: &CandlestickSeries, area: &PlotArea) -> Option<CandleGeometry> {
    let (min, max) = series.price_range()?;
    let scale = PriceScale::new(min, max);
    let count = series.len();
    let body_width = (area.slot_width(count) * 0.6).max(1.0);
    let candles = series
        .points
        .iter()
        .enumerate()
        .map(|(i, c)| CandleRenderData {
            x: area.x_for(i, count),
            high_y: scale.y_for(c.high(), area),
            low_y: scale.y_for(c.low(), area),
            open_y: scale.y_for(c.open(), area),
            close_y: scale.y_for(c.close(), area),
            body_width,
            is_bullish: c.is_bullish(),
        })
        .collect();
    Some(CandleGeometry { scale, candles })
}

/// Up to `max_labels` sample indices spread across `count`, always including
/// the first and last.
pub fn label_indices(count: usize, max_labels: usize) -> Vec<usize> {
    if count == 0 || max_labels == 0 {
        return Vec::new();
    }
    if count <= max_labels {
        return (0..count).collect();
    }
    if max_labels == 1 {
        return vec![0];
    }
    let step = (count - 1) as f64 / (max_labels - 1) as f64;
    let mut indices: Vec<usize> = (0..max_labels).map(|i| (i as f64 * step).round() as usize).collect();
    indices.dedup();
    indices
}
