//! # elastica-math
//!
//! Linear algebra primitives for the elastica simulation engine.
//!
//! Provides:
//! - Re-exports of `glam` f64 types as the canonical `Vec3`/`Mat3`
//! - Polar decomposition of 3×3 deformation gradients (Jacobi-based,
//!   robust for degenerate/collapsed elements)
//! - Small tensor helpers (trace, double contraction, outer product)

pub mod decomposition;
pub mod tensor;

// Re-export glam's double-precision types as the canonical math types.
pub use glam::{DMat3 as Mat3, DQuat as Quat, DVec3 as Vec3};
