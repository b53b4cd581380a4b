use crate::domain::{
    chart::ChartMode,
    errors::AppError,
    market_data::{Symbol, SymbolSuggestion, TimeSeriesSample},
};

/// Identifies one intraday fetch. A settlement is applied only while its
/// token is still the pending one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FetchToken {
    pub generation: u64,
    pub symbol: Symbol,
}

/// Everything that can change the dashboard. Fed to `DashboardState::apply`.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    QueryChanged(String),
    SuggestionsLoaded {
        generation: u64,
        suggestions: Vec<SymbolSuggestion>,
    },
    SymbolSelected(Symbol),
    FetchSucceeded {
        token: FetchToken,
        samples: Vec<TimeSeriesSample>,
    },
    FetchFailed {
        token: FetchToken,
        error: AppError,
    },
    /// The fetch future was dropped before it settled (aborted or unmounted).
    FetchAbandoned {
        token: FetchToken,
    },
    ChartModeChanged(ChartMode),
}

impl DashboardEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            DashboardEvent::QueryChanged(_) => "QueryChanged",
            DashboardEvent::SuggestionsLoaded { .. } => "SuggestionsLoaded",
            DashboardEvent::SymbolSelected(_) => "SymbolSelected",
            DashboardEvent::FetchSucceeded { .. } => "FetchSucceeded",
            DashboardEvent::FetchFailed { .. } => "FetchFailed",
            DashboardEvent::FetchAbandoned { .. } => "FetchAbandoned",
            DashboardEvent::ChartModeChanged(_) => "ChartModeChanged",
        }
    }
}
