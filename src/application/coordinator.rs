use std::future::Future;
use std::rc::Rc;

use futures::future::{AbortHandle, Abortable};

use crate::application::store::StateStore;
use crate::domain::{
    chart::ChartMode,
    events::{DashboardEvent, FetchToken},
    logging::{LogComponent, LogLevel, get_logger},
    market_data::{StockDataRepository, Symbol, SymbolSuggestion},
    state::ChartView,
};
use crate::{log_debug, log_info};

/// Drives the search → select → fetch flow against a repository, feeding
/// every outcome to the store as a [`DashboardEvent`].
pub struct DashboardCoordinator<R, S> {
    repository: Rc<R>,
    store: S,
}

impl<R, S: Clone> Clone for DashboardCoordinator<R, S> {
    fn clone(&self) -> Self {
        Self { repository: self.repository.clone(), store: self.store.clone() }
    }
}

impl<R, S> DashboardCoordinator<R, S>
where
    R: StockDataRepository + 'static,
    S: StateStore,
{
    pub fn new(repository: R, store: S) -> Self {
        log_info!(LogComponent::Application("DashboardCoordinator"), "Creating dashboard coordinator");
        Self { repository: Rc::new(repository), store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Keystroke in the search box. Empty text clears the suggestions
    /// without a request; otherwise the matches replace them, unless the
    /// query changed again before the response arrived.
    pub fn handle_query_input(&self, text: String) -> impl Future<Output = ()> + use<R, S> {
        self.store.dispatch(DashboardEvent::QueryChanged(text.clone()));
        let generation = self.store.read(|s| s.search_generation);
        let repository = self.repository.clone();
        let store = self.store.clone();

        async move {
            if text.is_empty() {
                return;
            }
            match repository.search_symbols(&text).await {
                Ok(suggestions) => {
                    if !store.read(|s| s.is_current_search(generation)) {
                        log_debug!(
                            LogComponent::Application("SymbolSearch"),
                            "Dropping stale matches for {:?}",
                            text
                        );
                        return;
                    }
                    log_debug!(
                        LogComponent::Application("SymbolSearch"),
                        "{} matches for {:?}",
                        suggestions.len(),
                        text
                    );
                    store.dispatch(DashboardEvent::SuggestionsLoaded { generation, suggestions });
                }
                Err(error) => get_logger().log_with_metadata(
                    LogLevel::Error,
                    LogComponent::Application("SymbolSearch"),
                    &format!("❌ Error fetching stock symbols for {:?}: {}", text, error),
                    error.kind(),
                ),
            }
        }
    }

    /// Makes `symbol` active and returns the token of the fetch it needs,
    /// as recorded in `pending_fetch`. The fetch itself is started by
    /// whoever watches that field.
    pub fn select_symbol(&self, symbol: Symbol) -> Option<FetchToken> {
        log_info!(LogComponent::Application("DashboardCoordinator"), "🎯 Selected {}", symbol);
        self.store.dispatch(DashboardEvent::SymbolSelected(symbol));
        self.store.read(|s| s.pending_fetch.clone())
    }

    /// `None` when the suggestion has a blank symbol.
    pub fn select_suggestion(&self, suggestion: &SymbolSuggestion) -> Option<FetchToken> {
        suggestion.to_symbol().and_then(|symbol| self.select_symbol(symbol))
    }

    /// Fetches the series for `token`. Whatever happens to the returned
    /// future (completion, error, drop) the token gets settled exactly once.
    pub fn load_series(&self, token: FetchToken) -> impl Future<Output = ()> + use<R, S> {
        let guard = SettleGuard::new(self.store.clone(), token.clone());
        let repository = self.repository.clone();

        async move {
            let result = repository.fetch_intraday(&token.symbol).await;
            let event = match result {
                Ok(samples) => {
                    log_info!(
                        LogComponent::Application("DataFetcher"),
                        "✅ {} samples for {} (#{})",
                        samples.len(),
                        token.symbol,
                        token.generation
                    );
                    DashboardEvent::FetchSucceeded { token, samples }
                }
                Err(error) => {
                    get_logger().log_with_metadata(
                        LogLevel::Error,
                        LogComponent::Application("DataFetcher"),
                        &format!("❌ Error fetching stock data for {}: {}", token.symbol, error),
                        error.kind(),
                    );
                    DashboardEvent::FetchFailed { token, error }
                }
            };
            guard.settle(event);
        }
    }

    /// [`Self::load_series`] wrapped so a newer selection can cancel it.
    pub fn abortable_load(
        &self,
        token: FetchToken,
    ) -> (impl Future<Output = ()> + use<R, S>, AbortHandle) {
        let (handle, registration) = AbortHandle::new_pair();
        let future = Abortable::new(self.load_series(token), registration);
        (async move { let _ = future.await; }, handle)
    }

    /// Never fetches; only the displayed projection changes.
    pub fn set_chart_mode(&self, mode: ChartMode) {
        self.store.dispatch(DashboardEvent::ChartModeChanged(mode));
    }

    pub fn chart_view(&self) -> ChartView {
        self.store.read(|s| s.chart_view())
    }
}

/// Settles a fetch token on drop unless [`SettleGuard::settle`] ran first.
struct SettleGuard<S: StateStore> {
    store: S,
    token: Option<FetchToken>,
}

impl<S: StateStore> SettleGuard<S> {
    fn new(store: S, token: FetchToken) -> Self {
        Self { store, token: Some(token) }
    }

    fn settle(mut self, event: DashboardEvent) {
        let Some(token) = self.token.take() else {
            return;
        };
        if !self.store.read(|s| s.accepts(&event)) {
            log_debug!(
                LogComponent::Application("DataFetcher"),
                "Ignoring stale {} for {} (#{})",
                event.event_type(),
                token.symbol,
                token.generation
            );
        }
        self.store.dispatch(event);
    }
}

impl<S: StateStore> Drop for SettleGuard<S> {
    fn drop(&mut self) {
        if let Some(token) = self.token.take() {
            log_debug!(
                LogComponent::Application("DataFetcher"),
                "Fetch for {} (#{}) dropped before settling",
                token.symbol,
                token.generation
            );
            self.store.dispatch(DashboardEvent::FetchAbandoned { token });
        }
    }
}
