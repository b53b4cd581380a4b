use leptos::*;
use wasm_bindgen::prelude::*;

use crate::app::App;
use crate::domain::logging::{LogComponent, get_logger};
use crate::infrastructure::{
    ApiConfig,
    services::{BrowserTimeProvider, ConsoleLogger},
};

pub mod app;
pub mod application;
pub mod domain;
pub mod infrastructure;
#[macro_use]
pub mod macros;
pub mod global_state;
pub mod time_utils;

/// Wires the browser logger and clock, then mounts the dashboard.
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    domain::logging::init_logger(Box::new(ConsoleLogger::for_build()));
    domain::logging::init_time_provider(Box::new(BrowserTimeProvider::new()));

    let config = ApiConfig::from_env();
    if let Err(e) = config.validate() {
        get_logger().error(
            LogComponent::Presentation("Initialize"),
            &format!("❌ Invalid API configuration: {}", e),
        );
    }

    get_logger().info(
        LogComponent::Presentation("Initialize"),
        &format!("🚀 Stock dashboard starting against {}", config.base_url),
    );

    mount_to_body(move || view! { <App config=config.clone() /> });
}
