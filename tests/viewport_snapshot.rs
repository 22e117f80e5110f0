use candle_viewport::application::ElementOp;
use candle_viewport::domain::chart::{ViewportController, ZoomPolicy};
use candle_viewport::domain::market_data::Timestamp;

#[test]
fn max_zoom_viewport_snapshot() {
    let mut ctrl = ViewportController::new(ZoomPolicy::default(), 30, 240).unwrap();
    let viewport = ctrl.set_zoom(8.0).unwrap();
    insta::assert_json_snapshot!(viewport, @r###"
    {
      "window_size": 30,
      "start_index": 183,
      "end_index": 212
    }
    "###);
}

#[test]
fn exit_op_snapshot() {
    let op = ElementOp::Exit { key: Timestamp::from_millis(60_000) };
    insta::assert_json_snapshot!(op, @r###"
    {
      "op": "exit",
      "key": 60000
    }
    "###);
}
