use candle_viewport::domain::market_data::{Price, RandomWalkGenerator, Timestamp};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn generator(seed: u64) -> RandomWalkGenerator<StdRng> {
    RandomWalkGenerator::with_defaults(StdRng::seed_from_u64(seed))
}

#[test]
fn same_seed_same_bars() {
    let t0 = Timestamp::from_millis(1_700_000_000_000);
    let first = generator(7).generate(3, t0, Price::from(100.0));
    let second = generator(7).generate(3, t0, Price::from(100.0));
    assert_eq!(first, second);
}

#[test]
fn walk_is_continuous_and_bounded() {
    let t0 = Timestamp::from_millis(0);
    let bars = generator(11).generate(240, t0, Price::from(100.0));

    assert_eq!(bars.len(), 240);
    assert_eq!(bars[0].ohlc.open, Price::from(100.0));
    for (i, bar) in bars.iter().enumerate() {
        assert_eq!(bar.timestamp, Timestamp::from_millis(i as u64 * 60_000));
        assert!(bar.ohlc.is_valid());
        assert!((bar.ohlc.close.value() - bar.ohlc.open.value()).abs() <= 2.0 + 1e-9);
        assert!(bar.ohlc.high.value() - bar.ohlc.body_top().value() <= 2.0 + 1e-9);
        assert!(bar.ohlc.body_bottom().value() - bar.ohlc.low.value() <= 2.0 + 1e-9);
    }
    for pair in bars.windows(2) {
        assert_eq!(pair[1].ohlc.open, pair[0].ohlc.close);
    }
}

#[test]
fn continuation_follows_last_bar() {
    let mut walk = generator(3);
    let bars = walk.generate(5, Timestamp::from_millis(0), Price::from(100.0));
    let last = bars.last().unwrap();
    let next = walk.continue_from(last);

    assert_eq!(next.timestamp, Timestamp::from_millis(5 * 60_000));
    assert_eq!(next.ohlc.open, last.ohlc.close);
    assert!(next.ohlc.is_valid());
}

#[test]
fn zero_count_yields_nothing() {
    assert!(generator(1).generate(0, Timestamp::from_millis(0), Price::from(100.0)).is_empty());
}

#[test]
fn unusable_bounds_are_rejected() {
    assert!(RandomWalkGenerator::new(StdRng::seed_from_u64(1), 60_000, -2.0, 2.0).is_err());
    assert!(RandomWalkGenerator::new(StdRng::seed_from_u64(1), 60_000, 2.0, 0.0).is_err());
    assert!(RandomWalkGenerator::new(StdRng::seed_from_u64(1), 60_000, 0.5, 0.25).is_ok());
}
