use leptos::html::Canvas;
use leptos::*;
use strum::IntoEnumIterator;

use crate::{
    application::DashboardCoordinator,
    domain::{
        chart::ChartMode,
        events::FetchToken,
        logging::{LogComponent, get_logger},
        state::{ChartView, DashboardState},
    },
    global_state::{abort_previous_fetch, dashboard_state, fetch_abort_handle},
    infrastructure::{AlphaVantageClient, ApiConfig, rendering::CanvasRenderer},
};

pub const CHART_WIDTH: u32 = 900;
pub const CHART_HEIGHT: u32 = 480;

pub type AppCoordinator = DashboardCoordinator<AlphaVantageClient, RwSignal<DashboardState>>;

/// Cancels whatever the previous selection started and spawns the fetch for `token`.
pub fn start_fetch(coordinator: &AppCoordinator, token: FetchToken) {
    abort_previous_fetch();
    let (future, handle) = coordinator.abortable_load(token);
    fetch_abort_handle().set(Some(handle));
    wasm_bindgen_futures::spawn_local(future);
}

/// 📊 Stock search + intraday chart dashboard
#[component]
pub fn App(config: ApiConfig) -> impl IntoView {
    let state = dashboard_state();
    let coordinator = store_value(DashboardCoordinator::new(AlphaVantageClient::new(config), state));

    // Every new fetch token (including reselecting the same symbol) starts one request.
    let pending = create_memo(move |_| state.with(|s| s.pending_fetch.clone()));
    create_effect(move |_| {
        if let Some(token) = pending.get() {
            coordinator.with_value(|c| start_fetch(c, token));
        }
    });

    view! {
        <style>
            {r#"
            .dashboard {
                font-family: 'SF Pro Display', -apple-system, BlinkMacSystemFont, sans-serif;
                display: flex;
                flex-wrap: wrap;
                gap: 2%;
                min-height: 100vh;
                padding: 16px;
                background: #000;
                color: white;
            }

            .sidebar {
                flex: 0 0 20%;
                min-width: 220px;
            }

            .search {
                position: relative;
                margin-bottom: 16px;
            }

            .search input {
                width: 100%;
                height: 40px;
                padding: 0 12px;
                font-size: 12px;
                color: #e5e7eb;
                background: #000;
                border: 1px solid #d1d5db;
                border-radius: 8px;
                box-sizing: border-box;
            }

            .search input:focus {
                outline: none;
                border-color: #ef4444;
                box-shadow: 0 0 0 2px #ef4444;
            }

            .suggestions {
                position: absolute;
                z-index: 10;
                width: 100%;
                max-height: 240px;
                overflow-y: auto;
                margin: 4px 0 0 0;
                padding: 0;
                list-style: none;
                background: white;
                color: black;
                font-size: 12px;
                border-radius: 8px;
                box-shadow: 0 4px 12px rgba(0, 0, 0, 0.5);
            }

            .suggestions li {
                padding: 8px;
                cursor: pointer;
            }

            .suggestions li:hover {
                background: #f3f4f6;
            }

            .mode-btn {
                display: block;
                width: 100%;
                margin-top: 8px;
                padding: 8px;
                font-size: 14px;
                color: white;
                background: transparent;
                border: 1px solid white;
                border-radius: 8px;
                cursor: pointer;
            }

            .mode-btn:hover, .mode-btn.active {
                background: white;
                color: black;
                font-weight: bold;
            }

            .chart-panel {
                flex: 1 1 70%;
                background: white;
                color: #374151;
                overflow: hidden;
            }

            .panel-title {
                text-align: center;
                font-size: 36px;
                padding: 8px;
            }

            .prompt {
                display: flex;
                align-items: center;
                justify-content: center;
                height: 256px;
                color: #6b7280;
                font-size: 20px;
                font-weight: 600;
            }

            .loading {
                text-align: center;
            }

            .chart h2 {
                text-align: center;
                font-size: 20px;
                color: black;
            }

            .fetch-error {
                margin: 8px;
                padding: 8px 12px;
                color: #991b1b;
                background: #fee2e2;
                border: 1px solid #ef4444;
                border-radius: 6px;
                font-size: 13px;
            }
            "#}
        </style>
        <div class="dashboard">
            <aside class="sidebar">
                <SearchBox coordinator=coordinator />
                <ChartModeToggle coordinator=coordinator />
            </aside>
            <main class="chart-panel">
                <div class="panel-title">"FINANCE DASHBOARD"</div>
                <ChartPanel />
            </main>
        </div>
    }
}

/// 🔎 Search input with the suggestion dropdown
#[component]
fn SearchBox(coordinator: StoredValue<AppCoordinator>) -> impl IntoView {
    let state = dashboard_state();
    let query = create_memo(move |_| state.with(|s| s.query.clone()));
    let suggestions = create_memo(move |_| state.with(|s| s.suggestions.clone()));

    let on_input = move |ev: ev::Event| {
        let text = event_target_value(&ev);
        wasm_bindgen_futures::spawn_local(coordinator.with_value(|c| c.handle_query_input(text)));
    };

    view! {
        <div class="search">
            <input
                type="text"
                placeholder="Search for a symbol..."
                prop:value=move || query.get()
                on:input=on_input
            />
            {move || {
                let items = suggestions.get();
                (!items.is_empty()).then(|| view! {
                    <ul class="suggestions">
                        {items
                            .iter()
                            .cloned()
                            .map(|item| {
                                let symbol = item.symbol.clone();
                                let name = item.name.clone();
                                view! {
                                    <li on:click=move |_| {
                                        coordinator.with_value(|c| {
                                            c.select_suggestion(&item);
                                        });
                                    }>
                                        <b>{symbol}</b>
                                        " - "
                                        {name}
                                    </li>
                                }
                            })
                            .collect_view()}
                    </ul>
                })
            }}
        </div>
    }
}

/// LINE CHART / CANDLESTICK CHART switch. Purely local, never refetches.
#[component]
fn ChartModeToggle(coordinator: StoredValue<AppCoordinator>) -> impl IntoView {
    let state = dashboard_state();
    let mode = create_memo(move |_| state.with(|s| s.mode));

    ChartMode::iter()
        .map(|m| {
            view! {
                <button
                    class="mode-btn"
                    class:active=move || mode.get() == m
                    on:click=move |_| coordinator.with_value(|c| c.set_chart_mode(m))
                >
                    {m.button_label()}
                </button>
            }
        })
        .collect_view()
}

/// 🎨 Prompt / loading / chart / no-data area
#[component]
fn ChartPanel() -> impl IntoView {
    let state = dashboard_state();
    let chart_view = create_memo(move |_| state.with(|s| s.chart_view()));
    let last_error = create_memo(move |_| state.with(|s| s.last_error.clone()));
    let is_chart =
        move || matches!(chart_view.get(), ChartView::Line { .. } | ChartView::Candlestick { .. });

    let canvas_ref = create_node_ref::<Canvas>();
    let renderer = store_value(CanvasRenderer::new(CHART_WIDTH, CHART_HEIGHT));

    create_effect(move |_| {
        let view = chart_view.get();
        let Some(canvas) = canvas_ref.get() else {
            return;
        };
        if let ChartView::Line { .. } | ChartView::Candlestick { .. } = view {
            renderer.with_value(|r| {
                if let Err(e) = r.render(&canvas, &view) {
                    get_logger().error(
                        LogComponent::Presentation("ChartPanel"),
                        &format!("❌ Render error: {:?}", e),
                    );
                }
            });
        }
    });

    view! {
        <div class="chart-area">
            {move || match chart_view.get() {
                ChartView::Prompt => {
                    view! { <div class="prompt">"Enter a symbol to view charts"</div> }.into_view()
                }
                ChartView::Loading { .. } => view! { <p class="loading">"Loading..."</p> }.into_view(),
                ChartView::NoData { symbol, mode } => {
                    view! {
                        <div class="prompt">
                            {format!("No intraday data for {} ({})", symbol, mode)}
                        </div>
                    }
                        .into_view()
                }
                ChartView::Failed { .. }
                | ChartView::Line { .. }
                | ChartView::Candlestick { .. } => ().into_view(),
            }}
            <div class="chart" style:display=move || if is_chart() { "block" } else { "none" }>
                <h2>{move || state.with(|s| s.mode.to_string())}</h2>
                <canvas
                    node_ref=canvas_ref
                    width=CHART_WIDTH
                    height=CHART_HEIGHT
                    style="max-width: 100%;"
                />
            </div>
            {move || last_error.get().map(|msg| view! { <div class="fetch-error">{msg}</div> })}
        </div>
    }
}
