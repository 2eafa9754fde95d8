//! # elastica-mechanics
//!
//! Particle storage and body representations for the XPBD solver.
//!
//! ## Key Types
//!
//! - [`Particle`] — kinematic state record (x, predicted xi, previous xn,
//!   velocity, force accumulator, inverse mass, fixed flag)
//! - [`TetrahedralBody`] — mesh body with per-tetrahedron rest caches
//! - [`MeshlessBody`] — SPH-style node cloud with embedded surface vertices
//! - [`HybridBody`] — mesh particles + meshless nodes sharing one arena
//! - [`SoftBody`] — closed set over the three body kinds, carrying the
//!   refresh notifications the timestep driver fires after each step

pub mod body;
pub mod generators;
pub mod hybrid;
pub mod kernel;
pub mod meshless;
pub mod particle;
pub mod tetrahedral;

pub use body::SoftBody;
pub use hybrid::HybridBody;
pub use kernel::Poly6Kernel;
pub use meshless::{MeshlessBody, MeshlessNode, SurfaceVertex};
pub use particle::Particle;
pub use tetrahedral::{Edge, TetrahedralBody, Tetrahedron};
