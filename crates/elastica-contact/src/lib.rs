//! # elastica-contact
//!
//! Contact geometry and the collision detector interface.
//!
//! The solver consumes contacts through the [`CollisionDetector`] trait:
//! which tetrahedra (or free points) of a body's collision representation
//! intersect the environment, and against which triangle. Spatial
//! acceleration lives behind the trait; this crate ships the interface
//! plus a half-space detector for floors and walls.
//!
//! ## Key Types
//! - [`ContactTriangle`] — a contact plane: supporting triangle + unit normal
//! - [`CollisionDetector`] — detector interface over collision positions
//! - [`HalfSpace`] — analytic plane detector

pub mod contact;
pub mod detector;
pub mod half_space;

pub use contact::ContactTriangle;
pub use detector::{CollisionDetector, PointContact, TetrahedronContact};
pub use half_space::HalfSpace;
