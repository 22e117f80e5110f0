use candle_viewport::application::{ChartConfig, LiveChart};
use candle_viewport::domain::chart::{ScaleState, SurfaceSize, ViewportController, ZoomPolicy};
use candle_viewport::domain::market_data::{Price, RandomWalkGenerator, Timestamp};
use candle_viewport::infrastructure::{ManualTimerHost, RecordingSink};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn bench_set_zoom(c: &mut Criterion) {
    let mut ctrl = ViewportController::new(ZoomPolicy::default(), 30, 240).unwrap();
    c.bench_function("set_zoom", |b| {
        b.iter(|| {
            for step in 0..70 {
                let _ = ctrl.set_zoom(black_box(1.0 + step as f64 * 0.1));
            }
        })
    });
}

fn bench_slide_forward(c: &mut Criterion) {
    c.bench_function("slide_forward_240", |b| {
        b.iter(|| {
            let mut ctrl = ViewportController::new(ZoomPolicy::default(), 30, 480).unwrap();
            while ctrl.slide_forward() {}
            black_box(ctrl.visible_range())
        })
    });
}

fn bench_scale_derive(c: &mut Criterion) {
    let bars = RandomWalkGenerator::with_defaults(StdRng::seed_from_u64(7)).generate(
        240,
        Timestamp::from_millis(0),
        Price::from(100.0),
    );
    let surface = SurfaceSize::default();
    c.bench_function("scale_derive_240", |b| {
        b.iter(|| ScaleState::derive(black_box(&bars), &surface, 1.0))
    });
}

fn bench_live_session(c: &mut Criterion) {
    c.bench_function("live_session_40_ticks", |b| {
        b.iter(|| {
            let mut chart = LiveChart::new(
                ChartConfig::default(),
                RecordingSink::new(),
                StdRng::seed_from_u64(42),
                Timestamp::from_millis(0),
            )
            .unwrap();
            let mut host = ManualTimerHost::new(0);
            chart.render_initial(0).unwrap();
            chart.start(&mut host);
            host.run_until(100_000, |id, host| chart.on_timer(id, host)).unwrap()
        })
    });
}

criterion_group!(benches, bench_set_zoom, bench_slide_forward, bench_scale_derive, bench_live_session);
criterion_main!(benches);
