use candle_viewport::domain::chart::{Viewport, ViewportController, ZoomPolicy};
use candle_viewport::domain::errors::AppError;
use quickcheck_macros::quickcheck;

fn policy() -> ZoomPolicy {
    ZoomPolicy { min_window: 30, candle_budget: 240, max_zoom: 8.0 }
}

fn controller(available: usize) -> ViewportController {
    ViewportController::new(policy(), 30, available).unwrap()
}

#[test]
fn initial_window_starts_at_first_bar() {
    let ctrl = controller(240);
    assert_eq!(ctrl.visible_range(), (0, 29));
    assert_eq!(ctrl.window_size(), 30);
}

#[test]
fn initial_window_shrinks_to_short_series() {
    let ctrl = controller(10);
    assert_eq!(ctrl.viewport(), Viewport { window_size: 10, start_index: 0, end_index: 9 });
}

#[test]
fn max_zoom_shows_minimum_window_near_right_edge() {
    let mut ctrl = controller(240);
    let vp = ctrl.set_zoom(8.0).unwrap();
    assert_eq!(vp, Viewport { window_size: 30, start_index: 183, end_index: 212 });
}

#[test]
fn zoom_one_shows_whole_budget() {
    let mut ctrl = controller(240);
    let vp = ctrl.set_zoom(1.0).unwrap();
    assert_eq!(vp, Viewport { window_size: 240, start_index: 0, end_index: 239 });
}

#[test]
fn intermediate_zoom_levels() {
    let mut ctrl = controller(240);
    assert_eq!(ctrl.set_zoom(2.0).unwrap().range(), (60, 179));
    assert_eq!(ctrl.set_zoom(4.0).unwrap().range(), (135, 194));
}

#[test]
fn zoom_on_short_series_stays_in_bounds() {
    let mut ctrl = controller(100);
    assert_eq!(ctrl.set_zoom(1.0).unwrap().range(), (0, 99));
    assert_eq!(ctrl.set_zoom(8.0).unwrap().range(), (61, 90));
}

#[test]
fn out_of_range_zoom_is_rejected() {
    let mut ctrl = controller(240);
    let before = ctrl.viewport();
    for z in [0.5, 0.0, -1.0, 8.5, f64::INFINITY, f64::NAN] {
        assert!(matches!(ctrl.set_zoom(z), Err(AppError::InvalidZoom(_))));
    }
    assert_eq!(ctrl.viewport(), before);
}

#[quickcheck]
fn zoom_window_follows_budget(raw: u16) -> bool {
    let z = 1.0 + (raw % 7001) as f64 / 1000.0;
    let mut ctrl = controller(240);
    let vp = ctrl.set_zoom(z).unwrap();
    let expected = ((240.0 / z).floor() as usize).max(30);
    vp.window_size == expected && vp.end_index - vp.start_index + 1 == vp.window_size && vp.end_index < 240
}

#[quickcheck]
fn zoom_is_idempotent(raw: u16) -> bool {
    let z = 1.0 + (raw % 7001) as f64 / 1000.0;
    let mut ctrl = controller(240);
    let first = ctrl.set_zoom(z).unwrap();
    let second = ctrl.set_zoom(z).unwrap();
    first == second
}
