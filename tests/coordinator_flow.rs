use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use futures::channel::oneshot;
use futures::executor::LocalPool;
use futures::task::LocalSpawnExt;
use stock_chart_wasm::application::{DashboardCoordinator, StateStore};
use stock_chart_wasm::domain::chart::ChartMode;
use stock_chart_wasm::domain::errors::AppError;
use stock_chart_wasm::domain::market_data::{
    StockDataRepository, Symbol, SymbolSuggestion, TimeSeriesSample,
};
use stock_chart_wasm::domain::state::{ChartView, DashboardState};
use wasm_bindgen_test::*;

type SearchReply = Result<Vec<SymbolSuggestion>, AppError>;
type FetchReply = Result<Vec<TimeSeriesSample>, AppError>;

/// Repository whose responses are released by the test, in any order.
#[derive(Clone, Default)]
struct ScriptedRepository {
    searches: Rc<RefCell<Vec<(String, Option<oneshot::Sender<SearchReply>>)>>>,
    fetches: Rc<RefCell<Vec<(String, Option<oneshot::Sender<FetchReply>>)>>>,
}

impl ScriptedRepository {
    fn search_calls(&self) -> Vec<String> {
        self.searches.borrow().iter().map(|(k, _)| k.clone()).collect()
    }

    fn fetch_calls(&self) -> Vec<String> {
        self.fetches.borrow().iter().map(|(s, _)| s.clone()).collect()
    }

    fn reply_search(&self, call: usize, reply: SearchReply) {
        let sender = self.searches.borrow_mut()[call].1.take().unwrap();
        let _ = sender.send(reply);
    }

    fn reply_fetch(&self, call: usize, reply: FetchReply) {
        let sender = self.fetches.borrow_mut()[call].1.take().unwrap();
        let _ = sender.send(reply);
    }
}

impl StockDataRepository for ScriptedRepository {
    fn search_symbols(&self, keywords: &str) -> impl Future<Output = SearchReply> {
        let (tx, rx) = oneshot::channel();
        self.searches.borrow_mut().push((keywords.to_string(), Some(tx)));
        async move { rx.await.unwrap_or_else(|_| Err(AppError::Network("request dropped".into()))) }
    }

    fn fetch_intraday(&self, symbol: &Symbol) -> impl Future<Output = FetchReply> {
        let (tx, rx) = oneshot::channel();
        self.fetches.borrow_mut().push((symbol.to_string(), Some(tx)));
        async move { rx.await.unwrap_or_else(|_| Err(AppError::Network("request dropped".into()))) }
    }
}

type Store = Rc<RefCell<DashboardState>>;

struct Harness {
    repo: ScriptedRepository,
    store: Store,
    coordinator: DashboardCoordinator<ScriptedRepository, Store>,
    pool: LocalPool,
}

impl Harness {
    fn new() -> Self {
        let repo = ScriptedRepository::default();
        let store: Store = Rc::new(RefCell::new(DashboardState::new()));
        let coordinator = DashboardCoordinator::new(repo.clone(), store.clone());
        Self { repo, store, coordinator, pool: LocalPool::new() }
    }

    fn spawn(&self, future: impl Future<Output = ()> + 'static) {
        self.pool.spawner().spawn_local(future).unwrap();
    }

    fn settle(&mut self) {
        self.pool.run_until_stalled();
    }

    /// Select `symbol` and start its fetch the way the UI effect does.
    fn select(&mut self, symbol: &str) {
        let token = self.coordinator.select_symbol(Symbol::from(symbol)).unwrap();
        self.spawn(self.coordinator.load_series(token));
        self.settle();
    }

    fn state(&self) -> DashboardState {
        self.store.snapshot()
    }
}

fn bars(open: f64) -> Vec<TimeSeriesSample> {
    vec![
        TimeSeriesSample::new("2024-01-05 09:35:00", open + 1.0, open + 3.0, open, open + 2.0),
        TimeSeriesSample::new("2024-01-05 09:30:00", open, open + 1.5, open - 1.0, open + 1.0),
    ]
}

fn open_prices(state: &DashboardState) -> Vec<f64> {
    state.series.line.points.iter().map(|p| p.value).collect()
}

#[wasm_bindgen_test]
fn loading_is_true_only_while_fetch_is_outstanding() {
    let mut h = Harness::new();
    assert!(!h.state().is_loading());

    h.select("IBM");
    assert!(h.state().is_loading());
    assert_eq!(h.repo.fetch_calls(), ["IBM"]);
    assert_eq!(h.coordinator.chart_view(), ChartView::Loading { symbol: Symbol::from("IBM") });

    h.repo.reply_fetch(0, Ok(bars(100.0)));
    h.settle();
    let state = h.state();
    assert!(!state.is_loading());
    assert_eq!(open_prices(&state), [100.0, 101.0]);
    assert!(matches!(h.coordinator.chart_view(), ChartView::Candlestick { .. }));
}

#[wasm_bindgen_test]
fn failed_fetch_clears_loading_and_keeps_prior_chart() {
    let mut h = Harness::new();
    h.select("IBM");
    h.repo.reply_fetch(0, Ok(bars(100.0)));
    h.settle();
    let before = h.state().series.clone();

    h.select("IBM");
    assert_eq!(h.repo.fetch_calls(), ["IBM", "IBM"]);
    h.repo.reply_fetch(1, Err(AppError::Network("HTTP 503".into())));
    h.settle();

    let state = h.state();
    assert!(!state.is_loading());
    assert_eq!(state.series, before);
    assert_eq!(state.last_error.as_deref(), Some("Network Error: HTTP 503"));
}

#[wasm_bindgen_test]
fn toggling_mode_never_fetches() {
    let mut h = Harness::new();
    h.select("IBM");
    h.repo.reply_fetch(0, Ok(bars(100.0)));
    h.settle();

    for mode in [ChartMode::Line, ChartMode::Candlestick, ChartMode::Line] {
        h.coordinator.set_chart_mode(mode);
        h.settle();
    }
    assert_eq!(h.repo.fetch_calls().len(), 1);
    assert!(matches!(h.coordinator.chart_view(), ChartView::Line { .. }));
}

#[wasm_bindgen_test]
fn late_response_for_previous_symbol_is_dropped() {
    let mut h = Harness::new();
    h.select("AAPL");
    h.select("MSFT");
    assert_eq!(h.repo.fetch_calls(), ["AAPL", "MSFT"]);

    h.repo.reply_fetch(1, Ok(bars(400.0)));
    h.settle();
    h.repo.reply_fetch(0, Ok(bars(180.0)));
    h.settle();

    let state = h.state();
    assert_eq!(state.selected, Some(Symbol::from("MSFT")));
    assert_eq!(open_prices(&state), [400.0, 401.0]);
    assert!(!state.is_loading());
}

#[wasm_bindgen_test]
fn earlier_response_arriving_first_does_not_end_loading() {
    let mut h = Harness::new();
    h.select("AAPL");
    h.select("MSFT");

    h.repo.reply_fetch(0, Ok(bars(180.0)));
    h.settle();
    let state = h.state();
    assert!(state.is_loading(), "MSFT is still outstanding");
    assert!(state.series.is_empty());

    h.repo.reply_fetch(1, Err(AppError::Network("timeout".into())));
    h.settle();
    let state = h.state();
    assert!(!state.is_loading());
    assert!(state.series.is_empty());
    assert!(state.last_error.is_some());
}

#[wasm_bindgen_test]
fn selection_returns_the_pending_token() {
    let h = Harness::new();
    let first = h.coordinator.select_symbol(Symbol::from("IBM")).unwrap();
    assert_eq!(h.state().pending_fetch.as_ref(), Some(&first));
    assert_eq!(first.symbol, Symbol::from("IBM"));

    let second = h.coordinator.select_symbol(Symbol::from("IBM")).unwrap();
    assert_eq!(second.generation, first.generation + 1);
    assert_eq!(h.state().pending_fetch, Some(second));

    let blank = SymbolSuggestion::new("", "Nameless");
    assert!(h.coordinator.select_suggestion(&blank).is_none());
}

#[wasm_bindgen_test]
fn dropping_fetch_future_clears_loading() {
    let h = Harness::new();
    let token = h.coordinator.select_symbol(Symbol::from("IBM")).unwrap();
    let future = h.coordinator.load_series(token);
    assert!(h.state().is_loading());

    drop(future);
    assert!(!h.state().is_loading());
    assert!(h.repo.fetch_calls().is_empty());
}

#[wasm_bindgen_test]
fn aborted_fetch_settles_once_and_ignores_reply() {
    let mut h = Harness::new();
    let token = h.coordinator.select_symbol(Symbol::from("IBM")).unwrap();
    let (future, handle) = h.coordinator.abortable_load(token);
    h.spawn(future);
    h.settle();
    assert!(h.state().is_loading());

    handle.abort();
    h.settle();
    assert!(!h.state().is_loading());

    h.repo.reply_fetch(0, Ok(bars(100.0)));
    h.settle();
    assert!(h.state().series.is_empty());
}

#[wasm_bindgen_test]
fn superseded_fetch_is_aborted_without_touching_new_one() {
    let mut h = Harness::new();
    let first = h.coordinator.select_symbol(Symbol::from("AAPL")).unwrap();
    let (future, first_handle) = h.coordinator.abortable_load(first);
    h.spawn(future);
    h.settle();

    let second = h.coordinator.select_symbol(Symbol::from("MSFT")).unwrap();
    first_handle.abort();
    let (future, _second_handle) = h.coordinator.abortable_load(second);
    h.spawn(future);
    h.settle();
    assert!(h.state().is_loading());

    h.repo.reply_fetch(1, Ok(bars(400.0)));
    h.settle();
    assert_eq!(open_prices(&h.state()), [400.0, 401.0]);
}

#[wasm_bindgen_test]
fn search_results_become_suggestions() {
    let mut h = Harness::new();
    h.spawn(h.coordinator.handle_query_input("AAP".into()));
    h.settle();
    assert_eq!(h.repo.search_calls(), ["AAP"]);
    assert_eq!(h.state().query, "AAP");

    h.repo.reply_search(
        0,
        Ok(vec![
            SymbolSuggestion::new("AAPL", "Apple Inc."),
            SymbolSuggestion::new("AAP", "Advance Auto Parts Inc."),
        ]),
    );
    h.settle();
    let state = h.state();
    assert_eq!(state.suggestions.len(), 2);
    assert_eq!(state.suggestions[0].to_string(), "AAPL - Apple Inc.");

    let suggestion = state.suggestions[0].clone();
    let token = h.coordinator.select_suggestion(&suggestion).unwrap();
    assert_eq!(token.symbol, Symbol::from("AAPL"));
    let state = h.state();
    assert_eq!(state.query, "AAPL");
    assert!(state.suggestions.is_empty());
}

#[wasm_bindgen_test]
fn empty_query_skips_request() {
    let mut h = Harness::new();
    h.spawn(h.coordinator.handle_query_input(String::new()));
    h.settle();
    assert!(h.repo.search_calls().is_empty());
    assert!(h.state().suggestions.is_empty());
}

#[wasm_bindgen_test]
fn out_of_order_search_replies_keep_latest_query() {
    let mut h = Harness::new();
    h.spawn(h.coordinator.handle_query_input("A".into()));
    h.spawn(h.coordinator.handle_query_input("AA".into()));
    h.settle();
    assert_eq!(h.repo.search_calls(), ["A", "AA"]);

    h.repo.reply_search(1, Ok(vec![SymbolSuggestion::new("AAL", "American Airlines Group Inc")]));
    h.settle();
    h.repo.reply_search(0, Ok(vec![SymbolSuggestion::new("A", "Agilent Technologies Inc")]));
    h.settle();

    let state = h.state();
    assert_eq!(state.suggestions.len(), 1);
    assert_eq!(state.suggestions[0].symbol, "AAL");
}

#[wasm_bindgen_test]
fn search_failure_keeps_previous_suggestions() {
    let mut h = Harness::new();
    h.spawn(h.coordinator.handle_query_input("A".into()));
    h.settle();
    h.repo.reply_search(0, Ok(vec![SymbolSuggestion::new("A", "Agilent Technologies Inc")]));
    h.settle();
    assert_eq!(h.state().suggestions.len(), 1);

    h.spawn(h.coordinator.handle_query_input("AB".into()));
    h.settle();
    h.repo.reply_search(1, Err(AppError::Network("offline".into())));
    h.settle();

    let state = h.state();
    assert_eq!(state.query, "AB");
    assert_eq!(*state.suggestions, [SymbolSuggestion::new("A", "Agilent Technologies Inc")]);
    assert!(state.last_error.is_none());
}
