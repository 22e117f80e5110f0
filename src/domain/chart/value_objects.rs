use crate::domain::errors::{AppError, ChartResult};
use crate::domain::market_data::{Price, Timestamp};
use derive_more::{Constructor, Display};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

/// Value Object - Viewport
///
/// Contiguous inclusive index range `[start_index, end_index]` over the
/// series, with `end_index - start_index + 1 == window_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[display(fmt = "[{}..={}] ({} bars)", start_index, end_index, window_size)]
pub struct Viewport {
    pub window_size: usize,
    pub start_index: usize,
    pub end_index: usize,
}

impl Viewport {
    /// Window of `window_size` bars starting at `start_index`.
    pub fn new(start_index: usize, window_size: usize, available: usize) -> ChartResult<Self> {
        let end_index = (start_index + window_size).saturating_sub(1);
        if window_size == 0 || end_index >= available {
            return Err(AppError::RangeError { start: start_index, end: end_index, len: available });
        }
        Ok(Self { window_size, start_index, end_index })
    }

    pub fn range(&self) -> (usize, usize) {
        (self.start_index, self.end_index)
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.start_index..=self.end_index).contains(&index)
    }
}

/// Value Object - Margins around the drawing area, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self { top: 20.0, right: 30.0, bottom: 40.0, left: 50.0 }
    }
}

/// Value Object - Rules mapping a zoom factor to a window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomPolicy {
    /// Narrowest window a zoom may produce.
    pub min_window: usize,
    /// Bar count that zoom factor 1 spans.
    pub candle_budget: usize,
    pub max_zoom: f64,
}

impl Default for ZoomPolicy {
    fn default() -> Self {
        Self { min_window: 30, candle_budget: 240, max_zoom: 8.0 }
    }
}

impl ZoomPolicy {
    pub fn accepts(&self, zoom_factor: f64) -> bool {
        zoom_factor.is_finite() && (1.0..=self.max_zoom).contains(&zoom_factor)
    }
}

/// Value Object - Drawing surface extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
}

impl Default for SurfaceSize {
    fn default() -> Self {
        Self { width: 900.0, height: 500.0, margin: Margin::default() }
    }
}

impl SurfaceSize {
    pub fn new(width: f64, height: f64, margin: Margin) -> Self {
        Self { width, height, margin }
    }

    /// Horizontal pixel range, left to right.
    pub fn x_range(&self) -> PixelRange {
        PixelRange::new(self.margin.left, self.width - self.margin.right)
    }

    /// Vertical pixel range, top to bottom.
    pub fn y_range(&self) -> PixelRange {
        PixelRange::new(self.margin.top, self.height - self.margin.bottom)
    }

    pub fn has_drawing_area(&self) -> bool {
        self.x_range().span() > 0.0 && self.y_range().span() > 0.0
    }
}

/// Value Object - Pixel interval `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Constructor, Serialize, Deserialize)]
pub struct PixelRange {
    pub start: f64,
    pub end: f64,
}

impl PixelRange {
    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    pub fn midpoint(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// Value Object - Time domain of the x axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeDomain {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl TimeDomain {
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        Self { start, end }
    }

    pub fn span_ms(&self) -> f64 {
        self.end.as_f64() - self.start.as_f64()
    }
}

/// Value Object - Price domain of the y axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceDomain {
    pub min: Price,
    pub max: Price,
}

impl PriceDomain {
    pub fn new(min: Price, max: Price) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max.value() - self.min.value()
    }
}

/// Value Object - Which way a bar moved; the sink picks the colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarDirection {
    #[display(fmt = "Bullish")]
    #[strum(serialize = "bullish")]
    Bullish,
    #[display(fmt = "Bearish")]
    #[strum(serialize = "bearish")]
    Bearish,
}
