use super::value_objects::{Ohlc, Price, Timestamp};
use crate::domain::errors::{AppError, ChartResult};
use serde::{Deserialize, Serialize};

/// Domain entity - one OHLC bar. Created once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: Timestamp,
    pub ohlc: Ohlc,
}

impl Bar {
    pub fn new(timestamp: Timestamp, ohlc: Ohlc) -> Self {
        Self { timestamp, ohlc }
    }

    pub fn is_bullish(&self) -> bool {
        self.ohlc.close > self.ohlc.open
    }

    pub fn is_bearish(&self) -> bool {
        self.ohlc.close < self.ohlc.open
    }
}

/// Domain entity - ordered, append-only bar history.
///
/// Insertion order is chronological order. Nothing is ever evicted: the
/// viewport windows the history, the buffer keeps all of it.
#[derive(Debug, Clone, Default)]
pub struct TimeSeriesBuffer {
    bars: Vec<Bar>,
}

impl TimeSeriesBuffer {
    pub fn new() -> Self {
        Self { bars: Vec::new() }
    }

    pub fn from_bars(bars: Vec<Bar>) -> Self {
        Self { bars }
    }

    /// O(1) amortized; never rejects.
    pub fn append(&mut self, bar: Bar) {
        self.bars.push(bar);
    }

    /// Inclusive slice `[start, end]`.
    pub fn slice(&self, start: usize, end: usize) -> ChartResult<&[Bar]> {
        if start > end || end >= self.bars.len() {
            return Err(AppError::RangeError { start, end, len: self.bars.len() });
        }
        Ok(&self.bars[start..=end])
    }

    pub fn get(&self, index: usize) -> Option<&Bar> {
        self.bars.get(index)
    }

    pub fn latest(&self) -> Option<&Bar> {
        self.bars.last()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Lowest low and highest high over `bars`.
    pub fn price_range(bars: &[Bar]) -> Option<(Price, Price)> {
        let first = bars.first()?;
        let (mut min_price, mut max_price) = (first.ohlc.low, first.ohlc.high);

        for bar in bars {
            if bar.ohlc.low < min_price {
                min_price = bar.ohlc.low;
            }
            if bar.ohlc.high > max_price {
                max_price = bar.ohlc.high;
            }
        }

        Some((min_price, max_price))
    }
}
