use crate::domain::chart::{BarDirection, ScaleState, Viewport};
use crate::domain::errors::RenderingResult;
use crate::domain::market_data::{Bar, Timestamp};
use derive_more::Display;
use serde::Serialize;
use strum::AsRefStr;

/// Pixel geometry of one bar: a high-low wick and an open-close body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BarGlyph {
    /// Identity of the element across frames.
    pub key: Timestamp,
    /// Centre of the bar.
    pub x: f64,
    pub width: f64,
    pub body_top: f64,
    pub body_height: f64,
    pub wick_top: f64,
    pub wick_bottom: f64,
    pub direction: BarDirection,
}

impl BarGlyph {
    pub fn layout(bar: &Bar, scales: &ScaleState, width: f64) -> Self {
        let open_y = scales.y(bar.ohlc.open);
        let close_y = scales.y(bar.ohlc.close);

        Self {
            key: bar.timestamp,
            x: scales.x(bar.timestamp),
            width,
            body_top: scales.y(bar.ohlc.body_top()),
            body_height: (open_y - close_y).abs(),
            wick_top: scales.y(bar.ohlc.high),
            wick_bottom: scales.y(bar.ohlc.low),
            direction: if bar.is_bullish() { BarDirection::Bullish } else { BarDirection::Bearish },
        }
    }

    pub fn body_left(&self) -> f64 {
        self.x - self.width / 2.0
    }
}

/// Enter / update / exit instruction for one keyed element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ElementOp {
    /// New element: place at `from_x`, then move to `glyph.x`.
    Enter { glyph: BarGlyph, from_x: f64, duration_ms: u64 },
    /// Existing element: retarget from wherever it is now.
    Update { glyph: BarGlyph, from_x: f64, duration_ms: u64 },
    Exit { key: Timestamp },
}

impl ElementOp {
    pub fn key(&self) -> Timestamp {
        match self {
            ElementOp::Enter { glyph, .. } | ElementOp::Update { glyph, .. } => glyph.key,
            ElementOp::Exit { key } => *key,
        }
    }

    pub fn is_enter(&self) -> bool {
        matches!(self, ElementOp::Enter { .. })
    }

    pub fn is_exit(&self) -> bool {
        matches!(self, ElementOp::Exit { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameReason {
    #[display(fmt = "initial")]
    Initial,
    #[display(fmt = "interactive")]
    Interactive,
    #[display(fmt = "live_append")]
    LiveAppend,
}

/// Everything a sink needs to draw one update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderFrame {
    pub reason: FrameReason,
    pub viewport: Viewport,
    pub scales: ScaleState,
    pub bars: Vec<Bar>,
    pub ops: Vec<ElementOp>,
    pub duration_ms: u64,
}

impl RenderFrame {
    pub fn entering(&self) -> impl Iterator<Item = &ElementOp> + '_ {
        self.ops.iter().filter(|op| op.is_enter())
    }

    pub fn exiting(&self) -> impl Iterator<Item = &ElementOp> + '_ {
        self.ops.iter().filter(|op| op.is_exit())
    }
}

/// Drawing collaborator. Elements are keyed by bar timestamp, so repeated
/// calls with overlapping sets stay distinguishable.
pub trait RenderSink {
    fn render(&mut self, frame: &RenderFrame) -> RenderingResult<()>;
}

impl<S: RenderSink + ?Sized> RenderSink for Box<S> {
    fn render(&mut self, frame: &RenderFrame) -> RenderingResult<()> {
        (**self).render(frame)
    }
}
