//! Contact plane data type.

use serde::{Deserialize, Serialize};

use elastica_math::Vec3;
use elastica_types::Scalar;

/// A contact plane, carried as its supporting triangle plus unit normal.
///
/// The normal points away from the obstacle, towards free space; a point
/// `p` with `(p − a)·n < 0` is penetrating.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ContactTriangle {
    /// First triangle vertex, also the plane's anchor point.
    pub a: Vec3,
    /// Second triangle vertex.
    pub b: Vec3,
    /// Third triangle vertex.
    pub c: Vec3,
    /// Unit normal.
    pub normal: Vec3,
}

impl ContactTriangle {
    /// Builds a contact triangle, deriving the normal from the winding
    /// `(b − a) × (c − a)`. Degenerate triangles get a zero normal, which
    /// downstream projection treats as a vanishing gradient.
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        let n = (b - a).cross(c - a);
        let normal = if n.length_squared() > 0.0 {
            n.normalize()
        } else {
            Vec3::ZERO
        };
        Self { a, b, c, normal }
    }

    /// Builds a contact triangle with an explicit (already unit) normal.
    pub fn with_normal(a: Vec3, b: Vec3, c: Vec3, normal: Vec3) -> Self {
        Self { a, b, c, normal }
    }

    /// Signed distance of `p` to the contact plane; negative means
    /// penetrating.
    #[inline]
    pub fn signed_distance(&self, p: Vec3) -> Scalar {
        (p - self.a).dot(self.normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_normal_is_unit_and_follows_winding() {
        let tri = ContactTriangle::new(
            Vec3::ZERO,
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -2.0),
        );
        assert!(
            (tri.normal - Vec3::new(0.0, 1.0, 0.0)).length() < 1.0e-12,
            "expected +Y normal, got {:?}",
            tri.normal
        );
    }

    #[test]
    fn signed_distance_sign_convention() {
        let tri = ContactTriangle::with_normal(
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(0.0, 1.0, 0.0),
        );
        assert!(tri.signed_distance(Vec3::new(0.0, 0.5, 0.0)) > 0.0);
        assert!(tri.signed_distance(Vec3::new(0.0, -0.5, 0.0)) < 0.0);
    }
}
