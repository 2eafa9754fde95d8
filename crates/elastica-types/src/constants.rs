//! Physical constants and simulation defaults.

use crate::scalar::Scalar;

/// Gravitational acceleration (m/s²).
pub const GRAVITY: Scalar = 9.81;

/// Default simulation timestep (seconds). 1/60th of a second.
pub const DEFAULT_DT: Scalar = 1.0 / 60.0;

/// Default substep count per timestep.
pub const DEFAULT_SUBSTEPS: u32 = 30;

/// Default total constraint-projection sweep count per timestep,
/// distributed over the substeps.
pub const DEFAULT_ITERATIONS: u32 = 30;

/// Threshold under which a constraint's weighted gradient norm
/// Σ wₖ‖∇Cₖ‖² counts as degenerate and the projection is skipped.
pub const GRADIENT_EPSILON: Scalar = 1.0e-20;

/// Epsilon for geometric degeneracy checks (zero-length edges,
/// collapsed tetrahedra, singular correction matrices).
pub const GEOMETRIC_EPSILON: Scalar = 1.0e-12;
