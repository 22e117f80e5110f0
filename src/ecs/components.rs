use crate::application::render::BarGlyph;
use crate::domain::market_data::Timestamp;

/// ECS component identifying the bar an element draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementKey(pub Timestamp);

/// ECS component storing the element's target geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarElement(pub BarGlyph);

/// ECS component for an in-flight horizontal move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub from_x: f64,
    pub to_x: f64,
    pub started_at_ms: u64,
    pub duration_ms: u64,
}

impl Transition {
    pub fn new(from_x: f64, to_x: f64, started_at_ms: u64, duration_ms: u64) -> Self {
        Self { from_x, to_x, started_at_ms, duration_ms }
    }

    /// Eased position at `now_ms`; clamps to the endpoints outside the run.
    pub fn position_at(&self, now_ms: u64) -> f64 {
        let progress = self.progress(now_ms);
        if progress >= 1.0 {
            return self.to_x;
        }
        self.from_x + (self.to_x - self.from_x) * ease_cubic_in_out(progress)
    }

    pub fn progress(&self, now_ms: u64) -> f64 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        let elapsed = now_ms.saturating_sub(self.started_at_ms) as f64;
        (elapsed / self.duration_ms as f64).min(1.0)
    }

    pub fn is_finished(&self, now_ms: u64) -> bool {
        self.progress(now_ms) >= 1.0
    }
}

fn ease_cubic_in_out(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}
