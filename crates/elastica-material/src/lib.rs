//! # elastica-material
//!
//! Constitutive models for elastic soft bodies.
//!
//! Everything here is a pure function of a 3×3 deformation gradient and a
//! pair of Lamé parameters: strain measures, scalar strain-energy
//! densities, and the stress tensors (∂Ψ/∂F) that the constraint gradients
//! chain through. No state, no side effects; degenerate gradients produce
//! finite, bounded results rather than errors.
//!
//! ## Key Types
//!
//! - [`LameParameters`] — μ, λ derived from Young's modulus + Poisson ratio
//! - [`MaterialParams`] — per-body material configuration surface
//! - [`ElasticModel`] — closed set of stress formulas (StVK, corotational)

pub mod model;
pub mod properties;
pub mod strain;

pub use model::{ElasticModel, EnergyStress};
pub use properties::{LameParameters, MaterialParams};
pub use strain::{green_strain, small_strain, strain_energy_density};
