use crate::domain::state::DashboardState;
use futures::future::AbortHandle;
use leptos::*;
use once_cell::sync::OnceCell;

pub struct Globals {
    pub dashboard: RwSignal<DashboardState>,
    /// Cancels the intraday fetch currently in flight.
    pub fetch_abort: RwSignal<Option<AbortHandle>>,
}

static GLOBALS: OnceCell<Globals> = OnceCell::new();

pub fn globals() -> &'static Globals {
    GLOBALS.get_or_init(|| Globals {
        dashboard: create_rw_signal(DashboardState::new()),
        fetch_abort: create_rw_signal(None),
    })
}

crate::global_signals! {
    pub dashboard_state => dashboard: DashboardState,
    pub fetch_abort_handle => fetch_abort: Option<AbortHandle>,
}

/// Aborts the fetch started by the previous selection, if still running.
pub fn abort_previous_fetch() {
    if let Some(handle) = fetch_abort_handle().get_untracked() {
        handle.abort();
    }
    fetch_abort_handle().set(None);
}
