//! Simulation event types.
//!
//! Structured events emitted by the timestep driver. Events are
//! lightweight value types carrying just enough data for monitoring and
//! debugging.

use serde::{Deserialize, Serialize};

/// A simulation event emitted by the solver.
///
/// Events are tagged with a timestep index and carry domain-specific data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationEvent {
    /// Timestep number (0-indexed).
    pub timestep: u32,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EventKind {
    /// Timestep started.
    TimestepBegin {
        /// Accumulated simulation time at the start of this step (seconds).
        sim_time: f64,
    },

    /// Timestep completed.
    TimestepEnd {
        /// Wall-clock time for the entire timestep (seconds).
        wall_time: f64,
    },

    /// Collision detection completed for one substep.
    CollisionConstraints {
        /// Substep index within the timestep.
        substep: u32,
        /// Number of transient collision constraints generated.
        constraint_count: u32,
    },

    /// Constraint projection completed for one substep.
    ConstraintSweeps {
        /// Substep index within the timestep.
        substep: u32,
        /// Gauss-Seidel sweeps run this substep.
        sweeps: u32,
        /// Persistent constraints projected per sweep.
        persistent_count: u32,
    },

    /// Energy snapshot at the end of the timestep.
    Energy {
        /// Kinetic energy (0.5 * m * v^2).
        kinetic: f64,
        /// Gravitational potential energy (m * g * h).
        potential: f64,
    },
}

impl SimulationEvent {
    /// Creates a new event for the given timestep.
    pub fn new(timestep: u32, kind: EventKind) -> Self {
        Self { timestep, kind }
    }
}
