//! Pluggable event sinks.

use crate::events::{EventKind, SimulationEvent};

/// Trait for event consumers.
pub trait EventSink: Send {
    /// Process a single event.
    fn handle(&mut self, event: &SimulationEvent);

    /// Called when the simulation ends. Flush buffers, close files, etc.
    fn finalize(&mut self) {}

    /// Returns a human-readable name for this sink.
    fn name(&self) -> &str;
}

/// A sink that collects events into a `Vec` for testing and inspection.
pub struct VecSink {
    /// Collected events.
    pub events: Vec<SimulationEvent>,
}

impl VecSink {
    /// Creates an empty vec sink.
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }
}

impl Default for VecSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for VecSink {
    fn handle(&mut self, event: &SimulationEvent) {
        self.events.push(event.clone());
    }

    fn name(&self) -> &str {
        "vec_sink"
    }
}

/// A sink that logs events through the `tracing` crate.
///
/// Per-step events (timestep brackets, energy snapshots) log at INFO;
/// per-substep events (collision counts, sweep reports) log at DEBUG.
/// Events more verbose than the configured level are dropped.
pub struct TracingSink {
    level: tracing::Level,
    logged: u64,
}

impl TracingSink {
    /// Creates a tracing sink that logs events up to `level`.
    pub fn new(level: tracing::Level) -> Self {
        Self { level, logged: 0 }
    }

    /// Number of events this sink has logged so far.
    pub fn logged(&self) -> u64 {
        self.logged
    }

    fn event_level(kind: &EventKind) -> tracing::Level {
        match kind {
            EventKind::TimestepBegin { .. }
            | EventKind::TimestepEnd { .. }
            | EventKind::Energy { .. } => tracing::Level::INFO,
            EventKind::CollisionConstraints { .. } | EventKind::ConstraintSweeps { .. } => {
                tracing::Level::DEBUG
            }
        }
    }
}

impl EventSink for TracingSink {
    fn handle(&mut self, event: &SimulationEvent) {
        // ERROR < WARN < INFO < DEBUG < TRACE; greater means more verbose.
        let level = Self::event_level(&event.kind);
        if level > self.level {
            return;
        }
        self.logged += 1;
        // The macros take a const level, so dispatch here.
        if level == tracing::Level::DEBUG {
            tracing::debug!(
                timestep = event.timestep,
                event = ?event.kind,
                "simulation_event"
            );
        } else {
            tracing::info!(
                timestep = event.timestep,
                event = ?event.kind,
                "simulation_event"
            );
        }
    }

    fn finalize(&mut self) {
        tracing::info!(events = self.logged, "tracing sink closed");
    }

    fn name(&self) -> &str {
        "tracing_sink"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn substep_event() -> SimulationEvent {
        SimulationEvent::new(
            3,
            EventKind::ConstraintSweeps {
                substep: 0,
                sweeps: 1,
                persistent_count: 12,
            },
        )
    }

    #[test]
    fn tracing_sink_drops_events_below_its_level() {
        let mut sink = TracingSink::new(tracing::Level::INFO);
        sink.handle(&substep_event());
        assert_eq!(sink.logged(), 0, "substep detail is DEBUG-only");

        sink.handle(&SimulationEvent::new(
            3,
            EventKind::TimestepBegin { sim_time: 0.05 },
        ));
        assert_eq!(sink.logged(), 1);
    }

    #[test]
    fn tracing_sink_at_debug_logs_substep_detail() {
        let mut sink = TracingSink::new(tracing::Level::DEBUG);
        sink.handle(&substep_event());
        sink.handle(&SimulationEvent::new(
            3,
            EventKind::Energy {
                kinetic: 1.0,
                potential: 2.0,
            },
        ));
        sink.finalize();
        assert_eq!(sink.logged(), 2);
    }
}
