//! Scalar type alias for the simulation.
//!
//! Using `f64` throughout: the XPBD Lagrange-multiplier updates divide by
//! a weighted gradient norm guarded at 1e-20, which is below f32 denormal
//! range, and the constitutive stress formulas accumulate small strain
//! terms that drift visibly in single precision.

/// The floating-point type used throughout the simulation.
pub type Scalar = f64;
