//! Collision detector interface.
//!
//! The solver queries a detector once per substep against each body's
//! collision representation: tetrahedron queries for mesh and hybrid
//! bodies, point queries for meshless surface vertices. Implementations
//! own whatever acceleration structure they need.

use elastica_math::Vec3;

use crate::contact::ContactTriangle;

/// An environment contact against one tetrahedron.
#[derive(Debug, Clone, Copy)]
pub struct TetrahedronContact {
    /// Index into the body's tetrahedron list.
    pub tetrahedron: u32,
    /// The intersected contact plane.
    pub triangle: ContactTriangle,
}

/// An environment contact against one free point.
#[derive(Debug, Clone, Copy)]
pub struct PointContact {
    /// Index into the queried point list.
    pub point: u32,
    /// The intersected contact plane.
    pub triangle: ContactTriangle,
}

/// Environment collision queries over a body's collision positions.
pub trait CollisionDetector {
    /// Tetrahedra whose vertices reach the environment. `positions` is
    /// the body's collision mirror; `tetrahedra` its vertex indices.
    fn intersect_tetrahedra(
        &self,
        positions: &[Vec3],
        tetrahedra: &[[u32; 4]],
    ) -> Vec<TetrahedronContact>;

    /// Free points (meshless surface vertices) that reach the
    /// environment.
    fn intersect_points(&self, points: &[Vec3]) -> Vec<PointContact>;
}
