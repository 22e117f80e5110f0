use crate::domain::chart::{SurfaceSize, ZoomPolicy};
use crate::domain::errors::{AppError, ChartResult};
use serde::{Deserialize, Serialize};

/// Full chart configuration. Every section falls back to its defaults
/// when omitted from JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub surface: SurfaceSize,
    pub data: DataConfig,
    pub viewport: ViewportConfig,
    pub animation: AnimationConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Bars generated at startup.
    pub initial_bars: usize,
    /// Bars appended by live ticks before the ticker is exhausted.
    pub live_bars: usize,
    pub seed_price: f64,
    pub bar_interval_ms: u64,
    pub max_step: f64,
    pub max_wick: f64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            initial_bars: 240,
            live_bars: 40,
            seed_price: 100.0,
            bar_interval_ms: 60_000,
            max_step: 2.0,
            max_wick: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub min_window: usize,
    pub candle_budget: usize,
    pub initial_window: usize,
    pub max_zoom: f64,
    /// Added below the lowest low and above the highest high.
    pub price_padding: f64,
    /// Share of a bar slot the body occupies.
    pub bar_width_ratio: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_window: 30,
            candle_budget: 240,
            initial_window: 30,
            max_zoom: 8.0,
            price_padding: 1.0,
            bar_width_ratio: 0.8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub interactive_ms: u64,
    pub slide_ms: u64,
    pub tick_period_ms: u64,
    pub initial_delay_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self { interactive_ms: 500, slide_ms: 1_000, tick_period_ms: 2_000, initial_delay_ms: 1_000 }
    }
}

impl ChartConfig {
    pub fn from_json(json: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> ChartResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> ChartResult<()> {
        let fail = |msg: &str| Err(AppError::ConfigError(msg.to_string()));

        if self.surface.width <= 0.0 || self.surface.height <= 0.0 {
            return fail("surface width and height must be positive");
        }
        if !self.surface.has_drawing_area() {
            return fail("margins leave no drawing area");
        }
        if self.data.initial_bars == 0 {
            return fail("initial_bars must be at least 1");
        }
        if self.data.bar_interval_ms == 0 {
            return fail("bar_interval_ms must be positive");
        }
        if !self.data.seed_price.is_finite() {
            return fail("seed_price must be finite");
        }
        let positive = |bound: f64| bound.is_finite() && bound > 0.0;
        if !positive(self.data.max_step) || !positive(self.data.max_wick) {
            return fail("random walk bounds must be finite and positive");
        }
        if self.viewport.min_window == 0 || self.viewport.candle_budget == 0 {
            return fail("min_window and candle_budget must be at least 1");
        }
        if self.viewport.initial_window == 0 || self.viewport.initial_window > self.data.initial_bars {
            return fail("initial_window must be within 1..=initial_bars");
        }
        if !(self.viewport.price_padding.is_finite() && self.viewport.price_padding >= 0.0) {
            return fail("price_padding must be finite and non-negative");
        }
        if !(self.viewport.max_zoom >= 1.0) {
            return fail("max_zoom must be at least 1");
        }
        if !(self.viewport.bar_width_ratio > 0.0 && self.viewport.bar_width_ratio <= 1.0) {
            return fail("bar_width_ratio must be within (0, 1]");
        }
        if self.animation.tick_period_ms == 0 {
            return fail("tick_period_ms must be positive");
        }
        Ok(())
    }

    pub fn zoom_policy(&self) -> ZoomPolicy {
        ZoomPolicy {
            min_window: self.viewport.min_window,
            candle_budget: self.viewport.candle_budget,
            max_zoom: self.viewport.max_zoom,
        }
    }

    /// Series length at which live ticking stops.
    pub fn series_bound(&self) -> usize {
        self.data.initial_bars + self.data.live_bars
    }
}
