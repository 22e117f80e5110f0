//! wasm-bindgen surface for browser hosts.

pub mod wasm_api;

pub use wasm_api::ChartHandle;
