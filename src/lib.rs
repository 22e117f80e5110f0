//! Live candlestick viewport engine.
//!
//! Maps a zoom level and pan position onto a window of an append-only OHLC
//! series, keeps that window consistent while live bars arrive, and hands
//! keyed enter/update/exit frames to a pluggable render sink.

pub mod application;
pub mod domain;
pub mod ecs;
pub mod infrastructure;
#[cfg(target_arch = "wasm32")]
pub mod presentation;

/// Install panic reporting, the console logger and the browser clock.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn initialize() {
    use crate::domain::logging::{LogComponent, init_logger, init_time_provider};
    use crate::infrastructure::services::{BrowserTimeProvider, ConsoleLogger};

    console_error_panic_hook::set_once();
    init_logger(Box::new(ConsoleLogger::new_development()));
    init_time_provider(Box::new(BrowserTimeProvider));

    log_info!(LogComponent::Presentation("Initialize"), "candle viewport initialized");
}
