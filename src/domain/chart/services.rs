use super::value_objects::{PixelRange, PriceDomain, SurfaceSize, TimeDomain};
use crate::domain::errors::{AppError, ChartResult};
use crate::domain::market_data::{Bar, Price, TimeSeriesBuffer, Timestamp};
use serde::Serialize;

/// Pure (time, price) <-> (pixel x, pixel y) mapping.
///
/// Holds no state: a domain taken from one slice can be applied while a
/// different slice is on screen, which is what interpolating mid-transition
/// relies on. A zero-width domain maps to the middle of the range.
pub struct CoordinateMapper;

impl CoordinateMapper {
    /// Linear time interpolation, left to right.
    pub fn x_scale(timestamp: Timestamp, domain: TimeDomain, range: PixelRange) -> f64 {
        let span = domain.span_ms();
        if span == 0.0 {
            return range.midpoint();
        }
        let normalized = (timestamp.as_f64() - domain.start.as_f64()) / span;
        range.start + normalized * range.span()
    }

    /// Linear and inverted: `range.start` is the top edge and receives the
    /// highest price.
    pub fn y_scale(price: Price, domain: PriceDomain, range: PixelRange) -> f64 {
        let span = domain.span();
        if span == 0.0 {
            return range.midpoint();
        }
        let normalized = (price.value() - domain.min.value()) / span;
        range.end - normalized * range.span()
    }

    pub fn x_invert(pixel_x: f64, domain: TimeDomain, range: PixelRange) -> f64 {
        if range.span() == 0.0 {
            return domain.start.as_f64();
        }
        let normalized = (pixel_x - range.start) / range.span();
        domain.start.as_f64() + normalized * domain.span_ms()
    }

    pub fn y_invert(pixel_y: f64, domain: PriceDomain, range: PixelRange) -> Price {
        if range.span() == 0.0 {
            return domain.min;
        }
        let normalized = (range.end - pixel_y) / range.span();
        Price::from(domain.min.value() + normalized * domain.span())
    }
}

/// Scales derived from a visible slice and the surface.
///
/// Never cached across viewport changes: derive it again from the current
/// window every time a frame is issued.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScaleState {
    pub x_domain: TimeDomain,
    pub y_domain: PriceDomain,
    pub x_range: PixelRange,
    pub y_range: PixelRange,
}

impl ScaleState {
    /// `x_domain` spans the first to last timestamp, `y_domain` the lowest low
    /// to the highest high widened by `price_padding` on both sides.
    pub fn derive(visible: &[Bar], surface: &SurfaceSize, price_padding: f64) -> ChartResult<Self> {
        let empty = AppError::RangeError { start: 0, end: 0, len: 0 };
        let (Some(first), Some(last)) = (visible.first(), visible.last()) else {
            return Err(empty);
        };
        let (low, high) = TimeSeriesBuffer::price_range(visible).ok_or(empty)?;

        Ok(Self {
            x_domain: TimeDomain::new(first.timestamp, last.timestamp),
            y_domain: PriceDomain::new(
                Price::from(low.value() - price_padding),
                Price::from(high.value() + price_padding),
            ),
            x_range: surface.x_range(),
            y_range: surface.y_range(),
        })
    }

    pub fn x(&self, timestamp: Timestamp) -> f64 {
        CoordinateMapper::x_scale(timestamp, self.x_domain, self.x_range)
    }

    pub fn y(&self, price: Price) -> f64 {
        CoordinateMapper::y_scale(price, self.y_domain, self.y_range)
    }
}
