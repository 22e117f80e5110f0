use crate::application::render::{RenderFrame, RenderSink};
use crate::domain::errors::{AppError, RenderingResult};
use wasm_bindgen::JsValue;

/// Hands each frame to a JS function as a plain object.
pub struct JsCallbackSink {
    on_frame: js_sys::Function,
}

impl JsCallbackSink {
    pub fn new(on_frame: js_sys::Function) -> Self {
        Self { on_frame }
    }
}

impl RenderSink for JsCallbackSink {
    fn render(&mut self, frame: &RenderFrame) -> RenderingResult<()> {
        let json = serde_json::to_string(frame).map_err(|err| AppError::RenderingError(err.to_string()))?;
        let value = js_sys::JSON::parse(&json)
            .map_err(|err| AppError::RenderingError(format!("frame is not valid JSON: {:?}", err)))?;
        self.on_frame
            .call1(&JsValue::NULL, &value)
            .map(|_| ())
            .map_err(|err| AppError::RenderingError(format!("frame callback threw: {:?}", err)))
    }
}
