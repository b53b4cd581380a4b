use std::cell::RefCell;
use std::rc::Rc;

use leptos::{RwSignal, SignalUpdate, SignalWithUntracked};

use crate::domain::{events::DashboardEvent, state::DashboardState};

/// Holder of the current [`DashboardState`]. The coordinator only talks to
/// this, so the same flow runs against a Leptos signal in the browser and
/// a plain `Rc<RefCell<_>>` in native tests.
pub trait StateStore: Clone + 'static {
    fn read<R>(&self, f: impl FnOnce(&DashboardState) -> R) -> R;

    fn replace_with(&self, f: impl FnOnce(&DashboardState) -> DashboardState);

    fn snapshot(&self) -> DashboardState {
        self.read(DashboardState::clone)
    }

    fn dispatch(&self, event: DashboardEvent) {
        self.replace_with(|state| state.clone().apply(event));
    }
}

impl StateStore for Rc<RefCell<DashboardState>> {
    fn read<R>(&self, f: impl FnOnce(&DashboardState) -> R) -> R {
        f(&self.borrow())
    }

    fn replace_with(&self, f: impl FnOnce(&DashboardState) -> DashboardState) {
        let next = f(&self.borrow());
        *self.borrow_mut() = next;
    }
}

impl StateStore for RwSignal<DashboardState> {
    fn read<R>(&self, f: impl FnOnce(&DashboardState) -> R) -> R {
        self.with_untracked(f)
    }

    fn replace_with(&self, f: impl FnOnce(&DashboardState) -> DashboardState) {
        self.update(|state| *state = f(state));
    }
}
