use crate::application::config::AnimationConfig;
use crate::domain::logging::LogComponent;
use crate::{log_debug, log_info};
use derive_more::{Display, From};
use strum::{AsRefStr, IntoStaticStr};

/// Handle of one delayed callback issued by a [`TimerHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Display)]
#[display(fmt = "timer#{}", _0)]
pub struct TimerId(u64);

impl TimerId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Delayed-callback facility the host environment provides.
///
/// Firing is delivered by the host calling back into the chart with the
/// [`TimerId`]; a cleared timer must never be delivered afterwards.
pub trait TimerHost {
    fn now_ms(&self) -> u64;
    fn set_timeout(&mut self, delay_ms: u64) -> TimerId;
    fn clear_timeout(&mut self, id: TimerId);
}

/// Live-append ticker lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr, IntoStaticStr)]
pub enum TickerState {
    #[display(fmt = "Idle")]
    Idle,
    #[display(fmt = "Running")]
    Running,
    /// Series bound reached. Terminal, not an error.
    #[display(fmt = "Exhausted")]
    Exhausted,
    #[display(fmt = "Cancelled")]
    Cancelled,
}

impl TickerState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TickerState::Exhausted | TickerState::Cancelled)
    }
}

/// The two independent transition families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionFamily {
    /// Zoom/pan re-renders. Last writer wins per element, nothing is queued.
    Interactive,
    /// Shift-left and slide-in animations of a live tick.
    LiveAppend,
}

/// Cooperative scheduler for the live-append ticker.
///
/// Ticks are self re-arming on a fixed period measured from when the
/// previous tick was kicked off, never from when its transitions finish.
/// The terminal check runs before every re-arm.
#[derive(Debug, Clone)]
pub struct AnimationScheduler {
    state: TickerState,
    pending: Option<TimerId>,
    ticks: u32,
    initial_delay_ms: u64,
    period_ms: u64,
    interactive_ms: u64,
    slide_ms: u64,
}

impl AnimationScheduler {
    pub fn new(config: &AnimationConfig) -> Self {
        Self {
            state: TickerState::Idle,
            pending: None,
            ticks: 0,
            initial_delay_ms: config.initial_delay_ms,
            period_ms: config.tick_period_ms,
            interactive_ms: config.interactive_ms,
            slide_ms: config.slide_ms,
        }
    }

    pub fn state(&self) -> TickerState {
        self.state
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn pending(&self) -> Option<TimerId> {
        self.pending
    }

    pub fn duration_for(&self, family: TransitionFamily) -> u64 {
        match family {
            TransitionFamily::Interactive => self.interactive_ms,
            TransitionFamily::LiveAppend => self.slide_ms,
        }
    }

    /// Idle -> Running with the first tick armed after the initial delay, or
    /// Idle -> Exhausted when there is nothing to append. Returns whether the
    /// state changed.
    pub fn start<H: TimerHost + ?Sized>(&mut self, host: &mut H, has_more: bool) -> bool {
        if self.state != TickerState::Idle {
            return false;
        }
        if has_more {
            self.pending = Some(host.set_timeout(self.initial_delay_ms));
            self.transition(TickerState::Running);
        } else {
            self.transition(TickerState::Exhausted);
        }
        true
    }

    /// Whether `id` is the armed timer of a running ticker. Consumes it.
    pub fn accept(&mut self, id: TimerId) -> bool {
        if self.state != TickerState::Running || self.pending != Some(id) {
            log_debug!(LogComponent::Application("Scheduler"), "ignoring stale {} in {}", id, self.state);
            return false;
        }
        self.pending = None;
        true
    }

    /// Count the tick that was just kicked off, then re-arm or exhaust.
    pub fn rearm<H: TimerHost + ?Sized>(&mut self, host: &mut H, has_more: bool) -> TickerState {
        self.ticks += 1;
        if self.state != TickerState::Running {
            return self.state;
        }
        if has_more {
            self.pending = Some(host.set_timeout(self.period_ms));
        } else {
            self.transition(TickerState::Exhausted);
        }
        self.state
    }

    /// Cancel the pending timer. Safe to call at any point, including from
    /// inside a tick. Returns whether the state changed.
    pub fn stop<H: TimerHost + ?Sized>(&mut self, host: &mut H) -> bool {
        if let Some(id) = self.pending.take() {
            host.clear_timeout(id);
        }
        if self.state.is_terminal() {
            return false;
        }
        self.transition(TickerState::Cancelled);
        true
    }

    fn transition(&mut self, next: TickerState) {
        log_info!(
            LogComponent::Application("Scheduler"),
            "ticker {} -> {} after {} ticks",
            self.state,
            next,
            self.ticks
        );
        self.state = next;
    }
}
