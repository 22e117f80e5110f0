use crate::application::config::ChartConfig;
use crate::application::render::{BarGlyph, ElementOp, FrameReason, RenderFrame, RenderSink};
use crate::application::scheduler::{AnimationScheduler, TickerState, TimerHost, TimerId, TransitionFamily};
use crate::domain::{
    chart::{ScaleState, Viewport, ViewportController},
    errors::{AppError, ChartResult},
    events::{ChartEvent, EventDispatcher, InMemoryEventDispatcher},
    logging::LogComponent,
    market_data::{Bar, Price, RandomWalkGenerator, TimeSeriesBuffer, Timestamp},
};
use crate::ecs::{EcsWorld, systems};
use crate::{log_debug, log_error, log_info};
use rand::Rng;
use std::collections::HashSet;

/// Live chart: one series, one viewport, one scene, one sink.
///
/// Zoom/pan and live ticks both go through the same [`ViewportController`]
/// and every frame derives its scales from the controller at the moment it
/// is issued, so the two paths can never draw from different windows.
pub struct LiveChart<S: RenderSink, R: Rng> {
    config: ChartConfig,
    buffer: TimeSeriesBuffer,
    controller: ViewportController,
    generator: RandomWalkGenerator<R>,
    scene: EcsWorld,
    scheduler: AnimationScheduler,
    sink: S,
    events: InMemoryEventDispatcher,
}

impl<S: RenderSink, R: Rng> LiveChart<S, R> {
    /// Generate the startup history from `start_time` and open the initial window.
    pub fn new(config: ChartConfig, sink: S, rng: R, start_time: Timestamp) -> ChartResult<Self> {
        config.validate()?;
        let mut generator = RandomWalkGenerator::new(
            rng,
            config.data.bar_interval_ms,
            config.data.max_step,
            config.data.max_wick,
        )?;
        let bars = generator.generate(config.data.initial_bars, start_time, Price::from(config.data.seed_price));
        Self::with_history(config, TimeSeriesBuffer::from_bars(bars), generator, sink)
    }

    /// Use an existing history; live ticks continue the walk from its last bar.
    pub fn with_history(
        config: ChartConfig,
        buffer: TimeSeriesBuffer,
        generator: RandomWalkGenerator<R>,
        sink: S,
    ) -> ChartResult<Self> {
        let controller = ViewportController::new(config.zoom_policy(), config.viewport.initial_window, buffer.len())?;
        let scheduler = AnimationScheduler::new(&config.animation);

        log_info!(
            LogComponent::Application("LiveChart"),
            "chart ready: {} bars, window {}",
            buffer.len(),
            controller.viewport()
        );

        Ok(Self {
            config,
            buffer,
            controller,
            generator,
            scene: EcsWorld::new(),
            scheduler,
            sink,
            events: InMemoryEventDispatcher::new(),
        })
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn buffer(&self) -> &TimeSeriesBuffer {
        &self.buffer
    }

    pub fn controller(&self) -> &ViewportController {
        &self.controller
    }

    pub fn viewport(&self) -> Viewport {
        self.controller.viewport()
    }

    pub fn scheduler(&self) -> &AnimationScheduler {
        &self.scheduler
    }

    pub fn ticker_state(&self) -> TickerState {
        self.scheduler.state()
    }

    pub fn scene(&self) -> &EcsWorld {
        &self.scene
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn subscribe<F>(&mut self, handler: F)
    where
        F: Fn(&ChartEvent) + 'static,
    {
        self.events.subscribe_to_chart_events(handler);
    }

    /// Scales of the current window, derived fresh.
    pub fn scales(&self) -> ChartResult<ScaleState> {
        let (start, end) = self.controller.visible_range();
        ScaleState::derive(
            self.buffer.slice(start, end)?,
            &self.config.surface,
            self.config.viewport.price_padding,
        )
    }

    /// Body width for the current window size.
    pub fn bar_width(&self) -> f64 {
        self.config.surface.width / self.controller.window_size() as f64 * self.config.viewport.bar_width_ratio
    }

    /// First draw, no animation.
    pub fn render_initial(&mut self, now_ms: u64) -> ChartResult<()> {
        self.reconcile(FrameReason::Initial, 0, now_ms)
    }

    /// Apply a gesture's zoom factor, already clamped to `[1, max_zoom]`.
    pub fn set_zoom(&mut self, zoom_factor: f64, now_ms: u64) -> ChartResult<Viewport> {
        let old = self.controller.viewport();
        let new = self.controller.set_zoom(zoom_factor)?;
        self.publish_viewport_change(old, new);
        self.reconcile(
            FrameReason::Interactive,
            self.scheduler.duration_for(TransitionFamily::Interactive),
            now_ms,
        )?;
        Ok(new)
    }

    /// Pan by whole bars, independent of zoom.
    pub fn pan_by(&mut self, delta_bars: i64, now_ms: u64) -> ChartResult<Viewport> {
        let old = self.controller.viewport();
        if self.controller.pan_by(delta_bars) {
            let new = self.controller.viewport();
            self.publish_viewport_change(old, new);
            self.reconcile(
                FrameReason::Interactive,
                self.scheduler.duration_for(TransitionFamily::Interactive),
                now_ms,
            )?;
        }
        Ok(self.controller.viewport())
    }

    /// Arm the live ticker.
    pub fn start<H: TimerHost + ?Sized>(&mut self, host: &mut H) {
        let has_more = self.has_more_data();
        if self.scheduler.start(host, has_more) {
            self.publish_ticker_state();
        }
    }

    /// Cancel the pending tick. Ticks already queued by the host are ignored.
    pub fn stop<H: TimerHost + ?Sized>(&mut self, host: &mut H) {
        if self.scheduler.stop(host) {
            self.publish_ticker_state();
        }
    }

    /// Host callback for a fired timer.
    pub fn on_timer<H: TimerHost + ?Sized>(&mut self, id: TimerId, host: &mut H) -> ChartResult<()> {
        if !self.scheduler.accept(id) {
            return Ok(());
        }

        let result = self.live_tick(host.now_ms());
        if let Err(err) = &result {
            log_error!(LogComponent::Application("LiveChart"), "live tick failed: {}", err);
        }

        let before = self.scheduler.state();
        let has_more = self.has_more_data();
        if self.scheduler.rearm(host, has_more) != before {
            self.publish_ticker_state();
        }
        result
    }

    fn has_more_data(&self) -> bool {
        self.buffer.len() < self.config.series_bound()
    }

    /// Append one bar, slide the window, shift what is on screen left and
    /// slide the newly visible bar in from the right edge.
    fn live_tick(&mut self, now_ms: u64) -> ChartResult<()> {
        let previous = self
            .buffer
            .latest()
            .cloned()
            .ok_or(AppError::RangeError { start: 0, end: 0, len: 0 })?;
        let bar = self.generator.continue_from(&previous);
        let timestamp = bar.timestamp;
        self.buffer.append(bar);
        self.controller.set_available(self.buffer.len());
        self.events.publish_chart_event(ChartEvent::BarAppended { timestamp, series_len: self.buffer.len() });

        let old = self.controller.viewport();
        if self.controller.slide_forward() {
            self.publish_viewport_change(old, self.controller.viewport());
        }

        let (bars, scales, glyphs) = self.layout_visible()?;
        let duration_ms = self.scheduler.duration_for(TransitionFamily::LiveAppend);
        let mut ops = Vec::with_capacity(glyphs.len() + 1);

        for glyph in &glyphs {
            let enter_from_x = glyph.x + glyph.width;
            ops.push(self.scene.transition_to(*glyph, enter_from_x, now_ms, duration_ms));
        }

        let window_size = self.controller.window_size();
        while self.scene.len() > window_size {
            let Some(oldest) = self.scene.oldest() else { break };
            ops.extend(self.scene.remove(oldest));
        }
        ops.extend(self.evict_invisible(&glyphs));
        systems::settle_transitions(&mut self.scene.world, now_ms);

        log_debug!(
            LogComponent::Application("LiveChart"),
            "tick {} appended {} window {}",
            self.scheduler.ticks() + 1,
            timestamp,
            self.controller.viewport()
        );
        self.emit(FrameReason::LiveAppend, bars, scales, ops, duration_ms)
    }

    /// Full enter / update / exit pass against the current window.
    fn reconcile(&mut self, reason: FrameReason, duration_ms: u64, now_ms: u64) -> ChartResult<()> {
        let (bars, scales, glyphs) = self.layout_visible()?;

        let mut ops = self.evict_invisible(&glyphs);
        for glyph in &glyphs {
            ops.push(self.scene.transition_to(*glyph, glyph.x, now_ms, duration_ms));
        }
        systems::settle_transitions(&mut self.scene.world, now_ms);

        self.emit(reason, bars, scales, ops, duration_ms)
    }

    fn layout_visible(&self) -> ChartResult<(Vec<Bar>, ScaleState, Vec<BarGlyph>)> {
        let (start, end) = self.controller.visible_range();
        let visible = self.buffer.slice(start, end)?;
        let scales = ScaleState::derive(visible, &self.config.surface, self.config.viewport.price_padding)?;
        let width = self.bar_width();
        let glyphs = visible.iter().map(|bar| BarGlyph::layout(bar, &scales, width)).collect();
        Ok((visible.to_vec(), scales, glyphs))
    }

    fn evict_invisible(&mut self, glyphs: &[BarGlyph]) -> Vec<ElementOp> {
        let visible: HashSet<Timestamp> = glyphs.iter().map(|glyph| glyph.key).collect();
        systems::stale_keys(&self.scene.world, &visible)
            .into_iter()
            .filter_map(|key| self.scene.remove(key))
            .collect()
    }

    fn emit(
        &mut self,
        reason: FrameReason,
        bars: Vec<Bar>,
        scales: ScaleState,
        ops: Vec<ElementOp>,
        duration_ms: u64,
    ) -> ChartResult<()> {
        let frame = RenderFrame { reason, viewport: self.controller.viewport(), scales, bars, ops, duration_ms };
        self.sink.render(&frame)
    }

    fn publish_viewport_change(&self, old: Viewport, new: Viewport) {
        if old != new {
            self.events.publish_chart_event(ChartEvent::ViewportChanged { old, new });
        }
    }

    fn publish_ticker_state(&self) {
        let state = self.scheduler.state();
        self.events.publish_chart_event(ChartEvent::TickerStateChanged {
            state: state.into(),
            ticks: self.scheduler.ticks(),
        });
    }
}
