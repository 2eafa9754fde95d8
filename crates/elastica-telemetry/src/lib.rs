//! # elastica-telemetry
//!
//! Event bus for simulation telemetry. The solver emits structured
//! events (step timing, collision counts, sweep counts, energy) that
//! pluggable sinks consume (in-memory capture, `tracing` logs).

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{EventKind, SimulationEvent};
