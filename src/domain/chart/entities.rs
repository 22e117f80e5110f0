use super::value_objects::{Viewport, ZoomPolicy};
use crate::domain::errors::{AppError, ChartResult};
use crate::domain::logging::LogComponent;
use crate::{log_debug, log_warn};

/// Domain entity - owner of the visible window over the bar series.
///
/// Every viewport mutation goes through this type. It never addresses an
/// index at or past `available`, the series length it was last told about.
#[derive(Debug, Clone)]
pub struct ViewportController {
    viewport: Viewport,
    policy: ZoomPolicy,
    available: usize,
}

impl ViewportController {
    /// Window of `initial_window` bars anchored at the first bar, shrunk to
    /// `available` when the series is shorter.
    pub fn new(policy: ZoomPolicy, initial_window: usize, available: usize) -> ChartResult<Self> {
        let window = initial_window.min(available).max(1);
        let viewport = Viewport::new(0, window, available)?;
        Ok(Self { viewport, policy, available })
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn visible_range(&self) -> (usize, usize) {
        self.viewport.range()
    }

    pub fn window_size(&self) -> usize {
        self.viewport.window_size
    }

    pub fn available(&self) -> usize {
        self.available
    }

    pub fn policy(&self) -> &ZoomPolicy {
        &self.policy
    }

    /// Record a new series length. The series is append-only, so this only grows.
    pub fn set_available(&mut self, len: usize) {
        debug_assert!(len > self.viewport.end_index, "series shrank under the viewport");
        self.available = len;
    }

    /// Map a zoom factor to a window and a pan position.
    ///
    /// Higher factors narrow the window and move it toward the right edge of
    /// the candle budget. The factor must already be clamped to
    /// `[1, max_zoom]`; anything else is rejected.
    pub fn set_zoom(&mut self, zoom_factor: f64) -> ChartResult<Viewport> {
        if !self.policy.accepts(zoom_factor) {
            log_warn!(LogComponent::Domain("Viewport"), "rejected zoom factor {}", zoom_factor);
            return Err(AppError::InvalidZoom(zoom_factor));
        }

        let total = self.policy.candle_budget.min(self.available).max(1);
        let candles_per_view = (self.policy.candle_budget as f64 / zoom_factor).floor() as usize;
        let window_size = candles_per_view.max(self.policy.min_window).clamp(1, total);

        let start_index = ((total - window_size) as f64 * (1.0 - 1.0 / zoom_factor)).floor().max(0.0) as usize;
        let end_index = (total - 1).min(start_index + window_size - 1);

        self.viewport = Viewport { window_size, start_index, end_index };
        log_debug!(LogComponent::Domain("Viewport"), "zoom {:.3} -> {}", zoom_factor, self.viewport);
        Ok(self.viewport)
    }

    /// Advance the window by one bar. No-op returning `false` when the next
    /// bar is not in the series yet.
    pub fn slide_forward(&mut self) -> bool {
        if self.viewport.end_index + 1 >= self.available {
            return false;
        }
        self.viewport.start_index += 1;
        self.viewport.end_index += 1;
        true
    }

    /// Shift the window by `delta_bars` without touching its size, clamped to
    /// the series. Returns whether the window moved.
    pub fn pan_by(&mut self, delta_bars: i64) -> bool {
        let max_start = (self.available - self.viewport.window_size) as i64;
        let start_index = (self.viewport.start_index as i64).saturating_add(delta_bars).clamp(0, max_start) as usize;
        if start_index == self.viewport.start_index {
            return false;
        }

        self.viewport.start_index = start_index;
        self.viewport.end_index = start_index + self.viewport.window_size - 1;
        log_debug!(LogComponent::Domain("Viewport"), "pan {:+} -> {}", delta_bars, self.viewport);
        true
    }
}
