pub mod series;
pub mod value_objects;

pub use series::{CandlePoint, CandlestickSeries, ChartSeries, LinePoint, LineSeries};
pub use value_objects::ChartMode;
