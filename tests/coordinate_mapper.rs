use candle_viewport::domain::chart::{CoordinateMapper, PixelRange, PriceDomain, ScaleState, SurfaceSize, TimeDomain};
use candle_viewport::domain::errors::AppError;
use candle_viewport::domain::market_data::{Bar, Ohlc, Price, Timestamp};
use quickcheck_macros::quickcheck;

fn time_domain() -> TimeDomain {
    TimeDomain::new(Timestamp::from_millis(0), Timestamp::from_millis(1_000_000))
}

fn price_domain() -> PriceDomain {
    PriceDomain::new(Price::from(90.0), Price::from(110.0))
}

fn bar(i: u64, low: f64, high: f64) -> Bar {
    Bar::new(
        Timestamp::from_millis(i * 60_000),
        Ohlc::new(Price::from(low + 0.5), Price::from(high), Price::from(low), Price::from(high - 0.5)),
    )
}

#[test]
fn surface_ranges_exclude_margins() {
    let surface = SurfaceSize::default();
    assert_eq!(surface.x_range(), PixelRange::new(50.0, 870.0));
    assert_eq!(surface.y_range(), PixelRange::new(20.0, 460.0));
}

#[test]
fn x_scale_maps_domain_ends_to_range_ends() {
    let range = PixelRange::new(50.0, 870.0);
    assert_eq!(CoordinateMapper::x_scale(Timestamp::from_millis(0), time_domain(), range), 50.0);
    assert_eq!(CoordinateMapper::x_scale(Timestamp::from_millis(1_000_000), time_domain(), range), 870.0);
    assert_eq!(CoordinateMapper::x_scale(Timestamp::from_millis(500_000), time_domain(), range), 460.0);
}

#[test]
fn y_scale_is_inverted() {
    let range = PixelRange::new(20.0, 460.0);
    assert_eq!(CoordinateMapper::y_scale(Price::from(110.0), price_domain(), range), 20.0);
    assert_eq!(CoordinateMapper::y_scale(Price::from(90.0), price_domain(), range), 460.0);
    assert_eq!(CoordinateMapper::y_scale(Price::from(100.0), price_domain(), range), 240.0);
}

#[test]
fn degenerate_domains_map_to_midpoint() {
    let one_bar = TimeDomain::new(Timestamp::from_millis(42), Timestamp::from_millis(42));
    let flat = PriceDomain::new(Price::from(100.0), Price::from(100.0));
    let x = CoordinateMapper::x_scale(Timestamp::from_millis(42), one_bar, PixelRange::new(50.0, 870.0));
    let y = CoordinateMapper::y_scale(Price::from(100.0), flat, PixelRange::new(20.0, 460.0));
    assert_eq!(x, 460.0);
    assert_eq!(y, 240.0);
    assert!(x.is_finite() && y.is_finite());
}

#[test]
fn inverse_mapping_recovers_inputs() {
    let x_range = PixelRange::new(50.0, 870.0);
    let y_range = PixelRange::new(20.0, 460.0);
    let x = CoordinateMapper::x_scale(Timestamp::from_millis(250_000), time_domain(), x_range);
    let y = CoordinateMapper::y_scale(Price::from(104.25), price_domain(), y_range);
    assert!((CoordinateMapper::x_invert(x, time_domain(), x_range) - 250_000.0).abs() < 1e-6);
    assert!((CoordinateMapper::y_invert(y, price_domain(), y_range).value() - 104.25).abs() < 1e-9);
}

#[quickcheck]
fn x_scale_is_monotonic(a: u32, b: u32) -> bool {
    let (a, b) = (a as u64 % 1_000_001, b as u64 % 1_000_001);
    let range = PixelRange::new(50.0, 870.0);
    let xa = CoordinateMapper::x_scale(Timestamp::from_millis(a), time_domain(), range);
    let xb = CoordinateMapper::x_scale(Timestamp::from_millis(b), time_domain(), range);
    (a < b) == (xa < xb) && (50.0..=870.0).contains(&xa)
}

#[quickcheck]
fn higher_price_is_never_lower_on_screen(a: u16, b: u16) -> bool {
    let (pa, pb) = (90.0 + (a % 2001) as f64 / 100.0, 90.0 + (b % 2001) as f64 / 100.0);
    let range = PixelRange::new(20.0, 460.0);
    let ya = CoordinateMapper::y_scale(Price::from(pa), price_domain(), range);
    let yb = CoordinateMapper::y_scale(Price::from(pb), price_domain(), range);
    (pa > pb) == (ya < yb)
}

#[test]
fn scales_span_visible_slice_with_padding() {
    let bars = vec![bar(0, 95.0, 101.0), bar(1, 97.0, 104.0), bar(2, 93.0, 99.0)];
    let scales = ScaleState::derive(&bars, &SurfaceSize::default(), 1.0).unwrap();
    assert_eq!(scales.x_domain, TimeDomain::new(Timestamp::from_millis(0), Timestamp::from_millis(120_000)));
    assert_eq!(scales.y_domain, PriceDomain::new(Price::from(92.0), Price::from(105.0)));
    assert_eq!(scales.x(Timestamp::from_millis(0)), 50.0);
    assert_eq!(scales.x(Timestamp::from_millis(120_000)), 870.0);
}

#[test]
fn scales_of_single_bar_are_finite() {
    let bars = vec![bar(3, 100.0, 100.0)];
    let scales = ScaleState::derive(&bars, &SurfaceSize::default(), 0.0).unwrap();
    assert_eq!(scales.x(Timestamp::from_millis(180_000)), 460.0);
    assert_eq!(scales.y(Price::from(100.0)), 240.0);
}

#[test]
fn scales_of_empty_slice_fail() {
    let err = ScaleState::derive(&[], &SurfaceSize::default(), 1.0).unwrap_err();
    assert!(matches!(err, AppError::RangeError { .. }));
}
