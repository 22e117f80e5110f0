use candle_viewport::application::{AnimationConfig, AnimationScheduler, TickerState, TimerHost, TransitionFamily};
use candle_viewport::infrastructure::ManualTimerHost;

#[test]
fn durations_follow_families() {
    let scheduler = AnimationScheduler::new(&AnimationConfig::default());
    assert_eq!(scheduler.duration_for(TransitionFamily::Interactive), 500);
    assert_eq!(scheduler.duration_for(TransitionFamily::LiveAppend), 1_000);
}

#[test]
fn period_is_measured_from_tick_start() {
    let mut scheduler = AnimationScheduler::new(&AnimationConfig::default());
    let mut host = ManualTimerHost::new(0);

    assert!(scheduler.start(&mut host, true));
    assert_eq!(host.next_deadline(), Some(1_000));

    let id = host.pop_due(1_000).unwrap();
    assert!(scheduler.accept(id));
    assert!(!scheduler.accept(id));
    assert_eq!(scheduler.rearm(&mut host, true), TickerState::Running);
    assert_eq!(host.next_deadline(), Some(3_000));
    assert_eq!(scheduler.ticks(), 1);
}

#[test]
fn rearm_without_data_exhausts() {
    let mut scheduler = AnimationScheduler::new(&AnimationConfig::default());
    let mut host = ManualTimerHost::new(0);
    scheduler.start(&mut host, true);

    let id = host.pop_due(1_000).unwrap();
    scheduler.accept(id);
    assert_eq!(scheduler.rearm(&mut host, false), TickerState::Exhausted);
    assert!(scheduler.state().is_terminal());
    assert_eq!(scheduler.pending(), None);
    assert_eq!(host.pending_count(), 0);
}

#[test]
fn stop_clears_host_timer() {
    let mut scheduler = AnimationScheduler::new(&AnimationConfig::default());
    let mut host = ManualTimerHost::new(0);
    scheduler.start(&mut host, true);
    let id = scheduler.pending().unwrap();

    assert!(scheduler.stop(&mut host));
    assert_eq!(host.pending_count(), 0);
    assert!(!scheduler.accept(id));
    assert!(!scheduler.stop(&mut host));
    assert_eq!(scheduler.state().to_string(), "Cancelled");
}

#[test]
fn manual_host_fires_in_deadline_order() {
    let mut host = ManualTimerHost::new(100);
    let late = host.set_timeout(50);
    let early = host.set_timeout(10);
    let cleared = host.set_timeout(20);
    host.clear_timeout(cleared);

    let mut order = Vec::new();
    let fired = host
        .run_until(1_000, |id, host| {
            order.push((id, host.now_ms()));
            Ok(())
        })
        .unwrap();

    assert_eq!(fired, 2);
    assert_eq!(order, vec![(early, 110), (late, 150)]);
    assert_eq!(host.now_ms(), 1_000);
}
