//! Analytic half-space detector.
//!
//! Covers the floor-and-wall environments the scenarios use without any
//! spatial structure: a point penetrates when its signed distance to the
//! plane is negative.

use serde::{Deserialize, Serialize};

use elastica_math::Vec3;
use elastica_types::Scalar;

use crate::contact::ContactTriangle;
use crate::detector::{CollisionDetector, PointContact, TetrahedronContact};

/// Extent of the synthetic supporting triangle reported per contact.
const TRIANGLE_EXTENT: Scalar = 100.0;

/// An infinite half-space obstacle. Free space is the side the normal
/// points into.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HalfSpace {
    /// A point on the boundary plane.
    pub point: Vec3,
    /// Unit normal, pointing into free space.
    pub normal: Vec3,
}

impl HalfSpace {
    /// Builds a half-space; the normal is normalized.
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self {
            point,
            normal: normal.normalize(),
        }
    }

    /// Horizontal floor at `y = height`, free space above.
    pub fn floor(height: Scalar) -> Self {
        Self {
            point: Vec3::new(0.0, height, 0.0),
            normal: Vec3::new(0.0, 1.0, 0.0),
        }
    }

    /// Signed distance of `p` to the boundary plane.
    #[inline]
    pub fn signed_distance(&self, p: Vec3) -> Scalar {
        (p - self.point).dot(self.normal)
    }

    /// The contact plane reported for any intersection, as a large
    /// triangle in the boundary plane anchored at `self.point`.
    fn contact_triangle(&self) -> ContactTriangle {
        // Any vector not parallel to the normal seeds the tangent basis.
        let seed = if self.normal.x.abs() < 0.9 {
            Vec3::new(1.0, 0.0, 0.0)
        } else {
            Vec3::new(0.0, 1.0, 0.0)
        };
        let t1 = self.normal.cross(seed).normalize();
        let t2 = self.normal.cross(t1);
        ContactTriangle::with_normal(
            self.point,
            self.point + t1 * TRIANGLE_EXTENT,
            self.point + t2 * TRIANGLE_EXTENT,
            self.normal,
        )
    }
}

impl CollisionDetector for HalfSpace {
    fn intersect_tetrahedra(
        &self,
        positions: &[Vec3],
        tetrahedra: &[[u32; 4]],
    ) -> Vec<TetrahedronContact> {
        let triangle = self.contact_triangle();
        tetrahedra
            .iter()
            .enumerate()
            .filter(|(_, tet)| {
                tet.iter()
                    .any(|&v| self.signed_distance(positions[v as usize]) < 0.0)
            })
            .map(|(ti, _)| TetrahedronContact {
                tetrahedron: ti as u32,
                triangle,
            })
            .collect()
    }

    fn intersect_points(&self, points: &[Vec3]) -> Vec<PointContact> {
        let triangle = self.contact_triangle();
        points
            .iter()
            .enumerate()
            .filter(|(_, &p)| self.signed_distance(p) < 0.0)
            .map(|(pi, _)| PointContact {
                point: pi as u32,
                triangle,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_reports_only_penetrating_tetrahedra() {
        let floor = HalfSpace::floor(0.0);
        let positions = vec![
            Vec3::new(0.0, -0.1, 0.0),
            Vec3::new(1.0, 0.5, 0.0),
            Vec3::new(0.0, 0.5, 1.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(2.0, 1.0, 0.0),
            Vec3::new(2.0, 2.0, 0.0),
            Vec3::new(3.0, 1.0, 0.0),
            Vec3::new(2.0, 1.0, 1.0),
        ];
        let tetrahedra = vec![[0, 1, 2, 3], [4, 5, 6, 7]];

        let contacts = floor.intersect_tetrahedra(&positions, &tetrahedra);
        assert_eq!(contacts.len(), 1, "only the first tet dips below the floor");
        assert_eq!(contacts[0].tetrahedron, 0);
        assert!(
            (contacts[0].triangle.normal - Vec3::new(0.0, 1.0, 0.0)).length() < 1.0e-12
        );
    }

    #[test]
    fn point_query_matches_signed_distance() {
        let floor = HalfSpace::floor(1.0);
        let points = vec![Vec3::new(0.0, 0.5, 0.0), Vec3::new(0.0, 1.5, 0.0)];
        let contacts = floor.intersect_points(&points);
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].point, 0);
    }
}
