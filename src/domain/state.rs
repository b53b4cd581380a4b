use std::sync::Arc;

use crate::domain::{
    chart::{ChartMode, ChartSeries},
    events::{DashboardEvent, FetchToken},
    market_data::{Symbol, SymbolSuggestion, sort_chronologically},
};

/// Whole widget state. Never mutated in place: every change goes through
/// [`DashboardState::apply`], which returns the next value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardState {
    pub query: String,
    /// Bumped on every query change; stale search responses are dropped.
    pub search_generation: u64,
    pub suggestions: Arc<Vec<SymbolSuggestion>>,
    pub selected: Option<Symbol>,
    /// Bumped on every selection.
    pub fetch_generation: u64,
    /// Token of the fetch currently in flight, if any.
    pub pending_fetch: Option<FetchToken>,
    pub series: Arc<ChartSeries>,
    pub mode: ChartMode,
    pub last_error: Option<String>,
}

/// Exactly one of these is on screen at a time.
#[derive(Clone, Debug, PartialEq)]
pub enum ChartView {
    Prompt,
    Loading { symbol: Symbol },
    Line { symbol: Symbol, series: Arc<ChartSeries> },
    Candlestick { symbol: Symbol, series: Arc<ChartSeries> },
    NoData { symbol: Symbol, mode: ChartMode },
    /// Fetch failed and there is no earlier series to keep showing.
    Failed { symbol: Symbol },
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.pending_fetch.is_some()
    }

    pub fn is_current_fetch(&self, token: &FetchToken) -> bool {
        self.pending_fetch.as_ref() == Some(token)
    }

    pub fn is_current_search(&self, generation: u64) -> bool {
        self.search_generation == generation
    }

    /// Events carrying a stale token leave the state as it was.
    pub fn accepts(&self, event: &DashboardEvent) -> bool {
        match event {
            DashboardEvent::SuggestionsLoaded { generation, .. } => {
                self.is_current_search(*generation)
            }
            DashboardEvent::FetchSucceeded { token, .. }
            | DashboardEvent::FetchFailed { token, .. }
            | DashboardEvent::FetchAbandoned { token } => self.is_current_fetch(token),
            _ => true,
        }
    }

    pub fn apply(self, event: DashboardEvent) -> Self {
        if !self.accepts(&event) {
            return self;
        }

        match event {
            DashboardEvent::QueryChanged(query) => {
                let suggestions =
                    if query.is_empty() { Arc::new(Vec::new()) } else { self.suggestions };
                Self {
                    query,
                    search_generation: self.search_generation + 1,
                    suggestions,
                    ..self
                }
            }
            DashboardEvent::SuggestionsLoaded { suggestions, .. } => {
                Self { suggestions: Arc::new(suggestions), ..self }
            }
            DashboardEvent::SymbolSelected(symbol) => {
                let generation = self.fetch_generation + 1;
                Self {
                    query: symbol.value().to_string(),
                    search_generation: self.search_generation + 1,
                    suggestions: Arc::new(Vec::new()),
                    selected: Some(symbol.clone()),
                    fetch_generation: generation,
                    pending_fetch: Some(FetchToken { generation, symbol }),
                    last_error: None,
                    ..self
                }
            }
            DashboardEvent::FetchSucceeded { mut samples, .. } => {
                sort_chronologically(&mut samples);
                Self {
                    pending_fetch: None,
                    series: Arc::new(ChartSeries::derive(&samples)),
                    last_error: None,
                    ..self
                }
            }
            DashboardEvent::FetchFailed { error, .. } => {
                Self { pending_fetch: None, last_error: Some(error.to_string()), ..self }
            }
            DashboardEvent::FetchAbandoned { .. } => Self { pending_fetch: None, ..self },
            DashboardEvent::ChartModeChanged(mode) => Self { mode, ..self },
        }
    }

    pub fn chart_view(&self) -> ChartView {
        let Some(symbol) = self.selected.clone() else {
            return ChartView::Prompt;
        };
        if self.is_loading() {
            return ChartView::Loading { symbol };
        }
        let has_data = match self.mode {
            ChartMode::Line => !self.series.line.is_empty(),
            ChartMode::Candlestick => !self.series.candles.is_empty(),
        };
        match (self.mode, has_data) {
            (ChartMode::Line, true) => ChartView::Line { symbol, series: self.series.clone() },
            (ChartMode::Candlestick, true) => {
                ChartView::Candlestick { symbol, series: self.series.clone() }
            }
            (_, false) if self.last_error.is_some() => ChartView::Failed { symbol },
            (mode, false) => ChartView::NoData { symbol, mode },
        }
    }
}
