//! The closed set of simulated body kinds.
//!
//! The solver owns bodies through this enum and addresses their particle
//! arenas uniformly; constraints match on the kind to reach topology and
//! node caches. The refresh methods are the fire-and-forget notifications
//! the timestep driver issues after each full step; the core never waits
//! on rendering.

use crate::hybrid::HybridBody;
use crate::meshless::MeshlessBody;
use crate::particle::Particle;
use crate::tetrahedral::TetrahedralBody;

/// A simulated soft body.
#[derive(Debug, Clone)]
pub enum SoftBody {
    /// Tetrahedral mesh body.
    Tetrahedral(TetrahedralBody),
    /// Meshless node-cloud body.
    Meshless(MeshlessBody),
    /// Hybrid mesh + meshless body.
    Hybrid(HybridBody),
}

impl SoftBody {
    /// The body's particle arena.
    pub fn particles(&self) -> &[Particle] {
        match self {
            SoftBody::Tetrahedral(b) => &b.particles,
            SoftBody::Meshless(b) => &b.particles,
            SoftBody::Hybrid(b) => &b.particles,
        }
    }

    /// Mutable access to the particle arena.
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        match self {
            SoftBody::Tetrahedral(b) => &mut b.particles,
            SoftBody::Meshless(b) => &mut b.particles,
            SoftBody::Hybrid(b) => &mut b.particles,
        }
    }

    /// Refresh derived physical quantities (meshless deformation
    /// gradients). Mesh-only bodies have nothing to refresh.
    pub fn update_physical_model(&mut self) {
        match self {
            SoftBody::Tetrahedral(_) => {}
            SoftBody::Meshless(b) => b.refresh_deformation_gradients(),
            SoftBody::Hybrid(b) => b.refresh_deformation_gradients(),
        }
    }

    /// Refresh the visual representation from committed positions.
    pub fn update_visual_model(&mut self) {
        match self {
            SoftBody::Tetrahedral(b) => b.refresh_visual(),
            SoftBody::Meshless(b) => b.refresh_visual(),
            SoftBody::Hybrid(_) => {}
        }
    }

    /// Refresh the collision representation from committed positions.
    pub fn update_collision_model(&mut self) {
        match self {
            SoftBody::Tetrahedral(b) => b.refresh_collision(),
            SoftBody::Meshless(b) => b.refresh_collision(),
            SoftBody::Hybrid(_) => {}
        }
    }

    /// Flag the body for renderer re-upload.
    pub fn mark_render_dirty(&mut self) {
        match self {
            SoftBody::Tetrahedral(b) => b.set_render_dirty(),
            SoftBody::Meshless(b) => b.set_render_dirty(),
            SoftBody::Hybrid(b) => b.set_render_dirty(),
        }
    }

    /// Downcast to a tetrahedral body.
    pub fn as_tetrahedral(&self) -> Option<&TetrahedralBody> {
        match self {
            SoftBody::Tetrahedral(b) => Some(b),
            _ => None,
        }
    }

    /// Downcast to a meshless body.
    pub fn as_meshless(&self) -> Option<&MeshlessBody> {
        match self {
            SoftBody::Meshless(b) => Some(b),
            _ => None,
        }
    }

    /// Downcast to a hybrid body.
    pub fn as_hybrid(&self) -> Option<&HybridBody> {
        match self {
            SoftBody::Hybrid(b) => Some(b),
            _ => None,
        }
    }
}
