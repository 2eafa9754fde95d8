//! Event bus with pluggable sinks over `std::sync::mpsc`.
//!
//! Sinks are registered once at initialization; `flush` drains pending
//! events to every sink.

use std::sync::mpsc;

use crate::events::SimulationEvent;
use crate::sinks::EventSink;

/// Broadcast event bus for simulation telemetry.
///
/// The producer side (`emit`) queues events; `flush` dispatches the
/// queue to all registered sinks.
pub struct EventBus {
    sender: mpsc::Sender<SimulationEvent>,
    receiver: mpsc::Receiver<SimulationEvent>,
    sinks: Vec<Box<dyn EventSink>>,
    /// Disabled bus drops events silently.
    enabled: bool,
}

impl EventBus {
    /// Creates a new event bus with no sinks.
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            sinks: Vec::new(),
            enabled: true,
        }
    }

    /// Registers a sink to receive events.
    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    /// Enables or disables the bus.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Returns true if the bus is active.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Emit an event. If the bus is disabled, this is a no-op.
    pub fn emit(&self, event: SimulationEvent) {
        if !self.enabled {
            return;
        }
        // The receiver lives as long as the bus; a send error is unreachable.
        let _ = self.sender.send(event);
    }

    /// Flush all pending events to registered sinks.
    ///
    /// Call at the end of each timestep or at shutdown.
    pub fn flush(&mut self) {
        while let Ok(event) = self.receiver.try_recv() {
            for sink in &mut self.sinks {
                sink.handle(&event);
            }
        }
    }

    /// Returns the number of registered sinks.
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;
    use crate::sinks::VecSink;

    struct Probe {
        seen: std::sync::Arc<std::sync::Mutex<u32>>,
    }

    impl EventSink for Probe {
        fn handle(&mut self, _event: &SimulationEvent) {
            *self.seen.lock().unwrap() += 1;
        }

        fn name(&self) -> &str {
            "probe"
        }
    }

    #[test]
    fn flush_dispatches_queued_events_to_all_sinks() {
        let seen = std::sync::Arc::new(std::sync::Mutex::new(0));
        let mut bus = EventBus::new();
        bus.add_sink(Box::new(Probe { seen: seen.clone() }));
        bus.add_sink(Box::new(VecSink::new()));

        bus.emit(SimulationEvent::new(0, EventKind::TimestepBegin { sim_time: 0.0 }));
        bus.emit(SimulationEvent::new(0, EventKind::TimestepEnd { wall_time: 0.001 }));
        bus.flush();

        assert_eq!(*seen.lock().unwrap(), 2);
    }

    #[test]
    fn disabled_bus_drops_events() {
        let seen = std::sync::Arc::new(std::sync::Mutex::new(0));
        let mut bus = EventBus::new();
        bus.add_sink(Box::new(Probe { seen: seen.clone() }));
        bus.set_enabled(false);

        bus.emit(SimulationEvent::new(0, EventKind::TimestepBegin { sim_time: 0.0 }));
        bus.flush();

        assert_eq!(*seen.lock().unwrap(), 0);
    }
}
