use derive_more::Display;
use strum::{AsRefStr, EnumIter, EnumString};

/// Value Object - which projection of the samples is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, EnumString, AsRefStr)]
pub enum ChartMode {
    #[display(fmt = "Line Chart")]
    #[strum(serialize = "line")]
    Line,
    #[default]
    #[display(fmt = "Candlestick Chart")]
    #[strum(serialize = "candlestick")]
    Candlestick,
}

impl ChartMode {
    pub fn button_label(&self) -> &'static str {
        match self {
            ChartMode::Line => "LINE CHART",
            ChartMode::Candlestick => "CANDLESTICK CHART",
        }
    }
}
