use crate::application::render::{ElementOp, RenderFrame, RenderSink};
use crate::domain::errors::RenderingResult;
use crate::domain::market_data::Timestamp;
use std::collections::BTreeMap;

/// Sink that keeps every frame and the element set those frames produced.
///
/// Stands in for a drawing surface in headless hosts and tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    frames: Vec<RenderFrame>,
    elements: BTreeMap<Timestamp, f64>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[RenderFrame] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&RenderFrame> {
        self.frames.last()
    }

    /// Keys currently drawn, oldest first.
    pub fn element_keys(&self) -> Vec<Timestamp> {
        self.elements.keys().copied().collect()
    }

    /// Target x of the drawn element for `key`.
    pub fn element_x(&self, key: Timestamp) -> Option<f64> {
        self.elements.get(&key).copied()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

impl RenderSink for RecordingSink {
    fn render(&mut self, frame: &RenderFrame) -> RenderingResult<()> {
        for op in &frame.ops {
            match op {
                ElementOp::Enter { glyph, .. } | ElementOp::Update { glyph, .. } => {
                    self.elements.insert(glyph.key, glyph.x);
                }
                ElementOp::Exit { key } => {
                    self.elements.remove(key);
                }
            }
        }
        self.frames.push(frame.clone());
        Ok(())
    }
}
