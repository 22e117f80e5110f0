use crate::domain::errors::{AppError, ChartResult};
use crate::domain::market_data::{Bar, Ohlc, Price, Timestamp};
use rand::Rng;

/// Synthetic bar source: a bounded random walk over consecutive buckets.
///
/// `close = open + U(-max_step, max_step)`, the wicks extend the body by
/// `U(0, max_wick)` on each side and every open equals the previous close.
/// The RNG is injected so seeded runs are reproducible.
pub struct RandomWalkGenerator<R: Rng> {
    rng: R,
    interval_ms: u64,
    max_step: f64,
    max_wick: f64,
}

impl<R: Rng> RandomWalkGenerator<R> {
    /// Both bounds must be finite and positive.
    pub fn new(rng: R, interval_ms: u64, max_step: f64, max_wick: f64) -> ChartResult<Self> {
        let positive = |bound: f64| bound.is_finite() && bound > 0.0;
        if !positive(max_step) || !positive(max_wick) {
            return Err(AppError::ConfigError(format!(
                "random walk bounds must be finite and positive, got step {} wick {}",
                max_step, max_wick
            )));
        }
        Ok(Self { rng, interval_ms, max_step, max_wick })
    }

    /// One-minute buckets, ±2 drift and 0..2 wicks.
    pub fn with_defaults(rng: R) -> Self {
        Self { rng, interval_ms: 60_000, max_step: 2.0, max_wick: 2.0 }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// `count` consecutive bars, the first opening at `seed_price`.
    pub fn generate(&mut self, count: usize, start_time: Timestamp, seed_price: Price) -> Vec<Bar> {
        let mut bars = Vec::with_capacity(count);
        let mut timestamp = start_time;
        let mut open = seed_price;

        for _ in 0..count {
            let bar = self.next_bar(timestamp, open);
            open = bar.ohlc.close;
            timestamp = timestamp.offset_by(self.interval_ms);
            bars.push(bar);
        }

        bars
    }

    /// The bar that follows `previous` in the walk.
    pub fn continue_from(&mut self, previous: &Bar) -> Bar {
        self.next_bar(previous.timestamp.offset_by(self.interval_ms), previous.ohlc.close)
    }

    fn next_bar(&mut self, timestamp: Timestamp, open: Price) -> Bar {
        let open = open.value();
        let close = open + self.rng.gen_range(-self.max_step..=self.max_step);
        let high = open.max(close) + self.rng.gen_range(0.0..=self.max_wick);
        let low = open.min(close) - self.rng.gen_range(0.0..=self.max_wick);

        Bar::new(
            timestamp,
            Ohlc::new(Price::from(open), Price::from(high), Price::from(low), Price::from(close)),
        )
    }
}
