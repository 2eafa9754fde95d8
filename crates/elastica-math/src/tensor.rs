//! Small tensor helpers used by the constitutive models.
//!
//! `glam` covers products and transposes; these are the handful of
//! contractions it does not expose directly.

use crate::{Mat3, Vec3};
use elastica_types::Scalar;

/// Trace of a 3×3 matrix.
#[inline]
pub fn trace(m: &Mat3) -> Scalar {
    m.x_axis.x + m.y_axis.y + m.z_axis.z
}

/// Double contraction A:B = Σᵢⱼ AᵢⱼBᵢⱼ.
#[inline]
pub fn double_contraction(a: &Mat3, b: &Mat3) -> Scalar {
    a.x_axis.dot(b.x_axis) + a.y_axis.dot(b.y_axis) + a.z_axis.dot(b.z_axis)
}

/// Outer product a·bᵀ as a 3×3 matrix.
#[inline]
pub fn outer(a: Vec3, b: Vec3) -> Mat3 {
    Mat3::from_cols(a * b.x, a * b.y, a * b.z)
}

/// Row `r` of a 3×3 matrix (glam stores columns).
#[inline]
pub fn row(m: &Mat3, r: usize) -> Vec3 {
    Vec3::new(m.x_axis[r], m.y_axis[r], m.z_axis[r])
}

/// True when every entry of the matrix is finite.
#[inline]
pub fn is_finite_mat(m: &Mat3) -> bool {
    m.x_axis.is_finite() && m.y_axis.is_finite() && m.z_axis.is_finite()
}
