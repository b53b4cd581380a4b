#![cfg(target_arch = "wasm32")]
use futures::future::{AbortHandle, Abortable};
use gloo_timers::future::sleep;
use leptos::*;
use std::time::Duration;
use stock_chart_wasm::global_state::{abort_previous_fetch, fetch_abort_handle};
use wasm_bindgen_test::*;
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test(async)]
async fn aborts_previous_fetch() {
    let (handle, reg) = AbortHandle::new_pair();
    fetch_abort_handle().set(Some(handle));
    let fut = Abortable::new(sleep(Duration::from_millis(50)), reg);

    abort_previous_fetch();
    assert!(fut.await.is_err());
    assert!(fetch_abort_handle().get_untracked().is_none());
}

#[wasm_bindgen_test]
fn abort_without_fetch_is_noop() {
    fetch_abort_handle().set(None);
    abort_previous_fetch();
    assert!(fetch_abort_handle().get_untracked().is_none());
}
