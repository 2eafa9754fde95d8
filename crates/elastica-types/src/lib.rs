//! # elastica-types
//!
//! Shared types, identifiers, error types, and physical constants
//! for the elastica soft-body simulation engine.
//!
//! This crate has zero domain logic — it defines the vocabulary
//! that all other elastica crates share.

pub mod constants;
pub mod error;
pub mod ids;
pub mod scalar;

pub use error::{ElasticaError, ElasticaResult};
pub use ids::{BodyId, NodeId, ParticleId, TetrahedronId};
pub use scalar::Scalar;
