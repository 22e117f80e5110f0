use crate::application::scheduler::{TimerHost, TimerId};
use crate::domain::errors::ChartResult;
use std::collections::BTreeSet;

/// Deterministic timer host driven by a virtual clock.
///
/// Nothing fires on its own: the owner advances the clock and dispatches
/// due timers, which makes tick sequences exact and repeatable.
#[derive(Debug, Default)]
pub struct ManualTimerHost {
    now_ms: u64,
    next_id: u64,
    pending: BTreeSet<(u64, TimerId)>,
}

impl ManualTimerHost {
    pub fn new(start_ms: u64) -> Self {
        Self { now_ms: start_ms, next_id: 0, pending: BTreeSet::new() }
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.pending.first().map(|(deadline, _)| *deadline)
    }

    /// Remove the earliest timer due at or before `until_ms` and move the
    /// clock to its deadline.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<TimerId> {
        let &(deadline, id) = self.pending.first()?;
        if deadline > until_ms {
            return None;
        }
        self.pending.remove(&(deadline, id));
        self.now_ms = self.now_ms.max(deadline);
        Some(id)
    }

    /// Fire every timer due up to `until_ms`, in deadline order, including
    /// timers armed by the callbacks themselves. Returns how many fired.
    pub fn run_until<F>(&mut self, until_ms: u64, mut on_fire: F) -> ChartResult<usize>
    where
        F: FnMut(TimerId, &mut Self) -> ChartResult<()>,
    {
        let mut fired = 0;
        while let Some(id) = self.pop_due(until_ms) {
            on_fire(id, self)?;
            fired += 1;
        }
        self.now_ms = self.now_ms.max(until_ms);
        Ok(fired)
    }
}

impl TimerHost for ManualTimerHost {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn set_timeout(&mut self, delay_ms: u64) -> TimerId {
        self.next_id += 1;
        let id = TimerId::from(self.next_id);
        self.pending.insert((self.now_ms + delay_ms, id));
        id
    }

    fn clear_timeout(&mut self, id: TimerId) {
        self.pending.retain(|(_, pending)| *pending != id);
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserTimerHost;

#[cfg(target_arch = "wasm32")]
mod browser {
    use crate::application::scheduler::{TimerHost, TimerId};
    use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
    use futures::future::{AbortHandle, Abortable};
    use gloo_timers::future::sleep;
    use std::collections::HashMap;
    use std::time::Duration;
    use wasm_bindgen_futures::spawn_local;

    /// Browser timers: every timeout is an abortable sleep future whose
    /// completion is sent to the single dispatch loop.
    pub struct BrowserTimerHost {
        next_id: u64,
        pending: HashMap<TimerId, AbortHandle>,
        fired: UnboundedSender<TimerId>,
    }

    impl BrowserTimerHost {
        pub fn new() -> (Self, UnboundedReceiver<TimerId>) {
            let (fired, receiver) = mpsc::unbounded();
            (Self { next_id: 0, pending: HashMap::new(), fired }, receiver)
        }

        /// Forget a timer the dispatch loop has received.
        pub fn acknowledge(&mut self, id: TimerId) {
            self.pending.remove(&id);
        }

        /// Abort every sleep and close the channel so the dispatch loop ends.
        pub fn shutdown(&mut self) {
            for (_, handle) in self.pending.drain() {
                handle.abort();
            }
            self.fired.close_channel();
        }
    }

    impl TimerHost for BrowserTimerHost {
        fn now_ms(&self) -> u64 {
            js_sys::Date::now() as u64
        }

        fn set_timeout(&mut self, delay_ms: u64) -> TimerId {
            self.next_id += 1;
            let id = TimerId::from(self.next_id);
            let (handle, registration) = AbortHandle::new_pair();
            let fired = self.fired.clone();

            spawn_local(async move {
                let timeout = Abortable::new(sleep(Duration::from_millis(delay_ms)), registration);
                if timeout.await.is_ok() {
                    let _ = fired.unbounded_send(id);
                }
            });

            self.pending.insert(id, handle);
            id
        }

        fn clear_timeout(&mut self, id: TimerId) {
            if let Some(handle) = self.pending.remove(&id) {
                handle.abort();
            }
        }
    }
}
