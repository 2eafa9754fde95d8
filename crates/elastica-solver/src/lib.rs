//! # elastica-solver
//!
//! The XPBD constraint-projection core: configuration, the closed
//! constraint set, transient collision constraint generation, and the
//! substep/iteration timestep driver.
//!
//! ## Key Types
//!
//! - [`SolverConfig`] — global timestep configuration
//! - [`SimulationParameters`] — per-body compliance/damping/material
//! - [`Constraint`] — closed constraint set with the uniform projection
//! - [`XpbdSolver`] — the timestep driver

pub mod collision;
pub mod config;
pub mod constraint;
pub mod xpbd;

pub use collision::generate_collision_constraints;
pub use config::{ConstraintType, SimulationParameters, SolverConfig};
pub use constraint::Constraint;
pub use xpbd::XpbdSolver;
