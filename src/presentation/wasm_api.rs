use futures::StreamExt;
use gloo_timers::future::sleep;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::cell::{RefCell, RefMut};
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::application::{ChartConfig, LiveChart, TimerHost, TimerId};
use crate::domain::{errors::AppError, logging::LogComponent, market_data::Timestamp};
use crate::infrastructure::{BrowserTimerHost, JsCallbackSink};
use crate::{log_error, log_info, log_warn};
use futures::channel::mpsc::UnboundedReceiver;

struct Session {
    chart: LiveChart<JsCallbackSink, StdRng>,
    timers: BrowserTimerHost,
}

impl Session {
    fn shut_down(&mut self) {
        self.chart.stop(&mut self.timers);
        self.timers.shutdown();
    }
}

fn to_js(err: AppError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn busy() -> JsValue {
    JsValue::from_str("chart is busy rendering")
}

/// Borrow `cell` mutably, yielding to the event loop while another borrow is
/// alive. A fired timer is deferred this way instead of being lost.
pub async fn borrow_when_free<T>(cell: &RefCell<T>) -> RefMut<'_, T> {
    loop {
        if let Ok(guard) = cell.try_borrow_mut() {
            return guard;
        }
        sleep(Duration::ZERO).await;
    }
}

/// JS-facing handle of one live chart.
#[wasm_bindgen]
pub struct ChartHandle {
    session: Rc<RefCell<Session>>,
    fired: RefCell<Option<UnboundedReceiver<TimerId>>>,
}

#[wasm_bindgen]
impl ChartHandle {
    /// Build the chart and draw the initial window. `on_frame` receives every
    /// render frame as a plain object.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>, on_frame: js_sys::Function) -> Result<ChartHandle, JsValue> {
        let config = match config_json {
            Some(json) => ChartConfig::from_json(&json).map_err(to_js)?,
            None => ChartConfig::default(),
        };

        let (timers, fired) = BrowserTimerHost::new();
        let now = timers.now_ms();
        let history_ms = (config.data.initial_bars as u64).saturating_sub(1) * config.data.bar_interval_ms;
        let start_time = Timestamp::from_millis(now.saturating_sub(history_ms));

        let mut chart = LiveChart::new(config, JsCallbackSink::new(on_frame), StdRng::seed_from_u64(now), start_time)
            .map_err(to_js)?;
        chart.render_initial(now).map_err(to_js)?;

        Ok(Self {
            session: Rc::new(RefCell::new(Session { chart, timers })),
            fired: RefCell::new(Some(fired)),
        })
    }

    /// Start live ticking. Calling it again is a no-op.
    pub fn start(&self) -> Result<(), JsValue> {
        let Some(mut fired) = self.fired.borrow_mut().take() else {
            return Ok(());
        };

        {
            let mut session = self.session.try_borrow_mut().map_err(|_| busy())?;
            let Session { chart, timers } = &mut *session;
            chart.start(timers);
        }

        let shared = Rc::clone(&self.session);
        spawn_local(async move {
            while let Some(id) = fired.next().await {
                let mut session = borrow_when_free(&*shared).await;
                let Session { chart, timers } = &mut *session;
                timers.acknowledge(id);
                if let Err(err) = chart.on_timer(id, timers) {
                    log_error!(LogComponent::Presentation("ChartHandle"), "tick failed: {}", err);
                }
            }
            log_info!(LogComponent::Presentation("ChartHandle"), "dispatch loop finished");
        });
        Ok(())
    }

    /// Zoom factor from the gesture layer, already clamped to `[1, max_zoom]`.
    pub fn zoom(&self, zoom_factor: f64) -> Result<(), JsValue> {
        let mut session = self.session.try_borrow_mut().map_err(|_| busy())?;
        let Session { chart, timers } = &mut *session;
        chart.set_zoom(zoom_factor, timers.now_ms()).map(|_| ()).map_err(to_js)
    }

    /// Pan by whole bars; negative moves toward older data.
    pub fn pan(&self, delta_bars: i32) -> Result<(), JsValue> {
        let mut session = self.session.try_borrow_mut().map_err(|_| busy())?;
        let Session { chart, timers } = &mut *session;
        chart.pan_by(delta_bars as i64, timers.now_ms()).map(|_| ()).map_err(to_js)
    }

    /// Cancel live ticking and release every timer.
    pub fn stop(&self) -> Result<(), JsValue> {
        self.session.try_borrow_mut().map_err(|_| busy())?.shut_down();
        Ok(())
    }

    pub fn state(&self) -> String {
        self.session
            .try_borrow()
            .map(|session| session.chart.ticker_state().to_string())
            .unwrap_or_else(|_| "Busy".to_string())
    }

    #[wasm_bindgen(js_name = visibleRange)]
    pub fn visible_range(&self) -> Vec<u32> {
        self.session
            .try_borrow()
            .map(|session| {
                let (start, end) = session.chart.controller().visible_range();
                vec![start as u32, end as u32]
            })
            .unwrap_or_default()
    }
}

impl Drop for ChartHandle {
    /// Freeing the handle from JS stops the ticker and closes the dispatch
    /// channel, which ends the loop and releases the session. Freed from
    /// inside a frame callback, the shutdown runs once that tick returns.
    fn drop(&mut self) {
        if let Ok(mut session) = self.session.try_borrow_mut() {
            session.shut_down();
            return;
        }
        log_warn!(LogComponent::Presentation("ChartHandle"), "freed during a tick, deferring shutdown");
        let shared = Rc::clone(&self.session);
        spawn_local(async move {
            borrow_when_free(&*shared).await.shut_down();
        });
    }
}
