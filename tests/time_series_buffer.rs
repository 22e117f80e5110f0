use candle_viewport::domain::errors::AppError;
use candle_viewport::domain::market_data::{Bar, Ohlc, Price, TimeSeriesBuffer, Timestamp};

fn make_bar(i: u64) -> Bar {
    let base = 100.0 + i as f64;
    Bar::new(
        Timestamp::from_millis(i * 60_000),
        Ohlc::new(Price::from(base), Price::from(base + 2.0), Price::from(base - 1.0), Price::from(base + 1.0)),
    )
}

fn buffer(len: u64) -> TimeSeriesBuffer {
    TimeSeriesBuffer::from_bars((0..len).map(make_bar).collect())
}

#[test]
fn slice_is_inclusive() {
    let buf = buffer(5);
    let bars = buf.slice(1, 3).unwrap();
    assert_eq!(bars.len(), 3);
    assert_eq!(bars[0].timestamp, Timestamp::from_millis(60_000));
    assert_eq!(bars[2].timestamp, Timestamp::from_millis(180_000));
    assert_eq!(buf.slice(4, 4).unwrap().len(), 1);
}

#[test]
fn slice_past_end_is_range_error() {
    let buf = buffer(5);
    assert_eq!(buf.slice(0, 5).unwrap_err(), AppError::RangeError { start: 0, end: 5, len: 5 });
}

#[test]
fn reversed_slice_is_range_error() {
    let buf = buffer(5);
    assert!(matches!(buf.slice(3, 1), Err(AppError::RangeError { start: 3, end: 1, len: 5 })));
}

#[test]
fn empty_buffer_has_no_slices() {
    let buf = TimeSeriesBuffer::new();
    assert!(buf.is_empty());
    assert!(buf.slice(0, 0).is_err());
    assert!(buf.latest().is_none());
}

#[test]
fn append_keeps_order_and_is_visible_to_slices() {
    let mut buf = buffer(3);
    buf.append(make_bar(3));
    assert_eq!(buf.len(), 4);
    assert_eq!(buf.latest().unwrap().timestamp, Timestamp::from_millis(180_000));
    assert_eq!(buf.slice(2, 3).unwrap()[1], make_bar(3));
}

#[test]
fn price_range_covers_wicks() {
    let buf = buffer(3);
    let (low, high) = TimeSeriesBuffer::price_range(buf.bars()).unwrap();
    assert_eq!(low, Price::from(99.0));
    assert_eq!(high, Price::from(104.0));
    assert!(TimeSeriesBuffer::price_range(&[]).is_none());
}

#[test]
fn bar_direction_follows_close() {
    let bar = make_bar(0);
    assert!(bar.is_bullish());
    assert!(!bar.is_bearish());
    assert_eq!(bar.ohlc.body_top(), Price::from(101.0));
    assert_eq!(bar.ohlc.body_bottom(), Price::from(100.0));
}
