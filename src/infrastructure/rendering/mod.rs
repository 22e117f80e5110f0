pub mod recording_sink;
#[cfg(target_arch = "wasm32")]
pub mod js_sink;

pub use recording_sink::RecordingSink;
#[cfg(target_arch = "wasm32")]
pub use js_sink::JsCallbackSink;
