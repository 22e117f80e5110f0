use crate::domain::chart::Viewport;
use crate::domain::market_data::Timestamp;
use std::fmt::Debug;

/// Base trait for all domain events
pub trait DomainEvent: Debug + Clone {
    fn event_type(&self) -> &'static str;
}

/// Events related to chart
#[derive(Debug, Clone, PartialEq)]
pub enum ChartEvent {
    ViewportChanged {
        old: Viewport,
        new: Viewport,
    },
    BarAppended {
        timestamp: Timestamp,
        series_len: usize,
    },
    /// The live ticker moved between Idle / Running / Exhausted / Cancelled.
    TickerStateChanged {
        state: &'static str,
        ticks: u32,
    },
}

impl DomainEvent for ChartEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ChartEvent::ViewportChanged { .. } => "ViewportChanged",
            ChartEvent::BarAppended { .. } => "BarAppended",
            ChartEvent::TickerStateChanged { .. } => "TickerStateChanged",
        }
    }
}

/// Event dispatcher for publishing events
pub trait EventDispatcher {
    fn publish_chart_event(&self, event: ChartEvent);
}

/// Simple in-memory event dispatcher
#[derive(Default)]
pub struct InMemoryEventDispatcher {
    chart_handlers: Vec<Box<dyn Fn(&ChartEvent)>>,
}

impl InMemoryEventDispatcher {
    pub fn new() -> Self {
        Self { chart_handlers: Vec::new() }
    }

    pub fn subscribe_to_chart_events<F>(&mut self, handler: F)
    where
        F: Fn(&ChartEvent) + 'static,
    {
        self.chart_handlers.push(Box::new(handler));
    }
}

impl EventDispatcher for InMemoryEventDispatcher {
    fn publish_chart_event(&self, event: ChartEvent) {
        for handler in &self.chart_handlers {
            handler(&event);
        }
    }
}
