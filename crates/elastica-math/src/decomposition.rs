//! Matrix decompositions for constitutive models.
//!
//! Provides the polar decomposition F = R·S needed by the corotational
//! stress formula. The rotation is recovered through the SVD identity:
//! if F = UΣVᵀ then R = UVᵀ and S = VΣVᵀ. Rather than a full SVD, the
//! symmetric matrix C = FᵀF is eigendecomposed with cyclic Jacobi sweeps
//! (C = VΣ²Vᵀ), which gives Σ and V directly; R follows as F·VΣ⁻¹Vᵀ.

use crate::{Mat3, Vec3};
use elastica_types::constants::GEOMETRIC_EPSILON;
use elastica_types::Scalar;

/// Result of a 3×3 polar decomposition: F = R · S.
///
/// - `rotation` has orthonormal columns (R = UVᵀ from the SVD of F)
/// - `stretch` is symmetric positive semi-definite (S = VΣVᵀ)
#[derive(Debug, Clone, Copy)]
pub struct PolarDecomposition {
    /// Rotational part.
    pub rotation: Mat3,
    /// Symmetric stretch part.
    pub stretch: Mat3,
}

const JACOBI_SWEEPS: usize = 24;
const JACOBI_OFF_TOLERANCE: Scalar = 1.0e-30;

/// Eigendecomposition of a symmetric 3×3 matrix via cyclic Jacobi.
///
/// Returns `(eigenvalues, eigenvectors)` with eigenvectors as the columns
/// of the returned matrix, paired with the eigenvalues in order.
pub fn symmetric_eigen(m: &Mat3) -> (Vec3, Mat3) {
    // Row-major working copy; glam stores columns, entry (r, c) = col_c[r].
    let mut a = [
        [m.x_axis.x, m.y_axis.x, m.z_axis.x],
        [m.x_axis.y, m.y_axis.y, m.z_axis.y],
        [m.x_axis.z, m.y_axis.z, m.z_axis.z],
    ];
    let mut v = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

    for _ in 0..JACOBI_SWEEPS {
        let off = a[0][1] * a[0][1] + a[0][2] * a[0][2] + a[1][2] * a[1][2];
        if off < JACOBI_OFF_TOLERANCE {
            break;
        }

        for &(p, q) in &[(0usize, 1usize), (0, 2), (1, 2)] {
            if a[p][q].abs() < JACOBI_OFF_TOLERANCE {
                continue;
            }

            let theta = (a[q][q] - a[p][p]) / (2.0 * a[p][q]);
            let t = theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt());
            let c = 1.0 / (t * t + 1.0).sqrt();
            let s = t * c;

            // A ← GᵀAG applied from both sides (G rotates columns p and q).
            for k in 0..3 {
                let akp = a[k][p];
                let akq = a[k][q];
                a[k][p] = c * akp - s * akq;
                a[k][q] = s * akp + c * akq;
            }
            for k in 0..3 {
                let apk = a[p][k];
                let aqk = a[q][k];
                a[p][k] = c * apk - s * aqk;
                a[q][k] = s * apk + c * aqk;
            }
            for vk in &mut v {
                let vkp = vk[p];
                let vkq = vk[q];
                vk[p] = c * vkp - s * vkq;
                vk[q] = s * vkp + c * vkq;
            }
        }
    }

    let eigenvalues = Vec3::new(a[0][0], a[1][1], a[2][2]);
    let eigenvectors = Mat3::from_cols(
        Vec3::new(v[0][0], v[1][0], v[2][0]),
        Vec3::new(v[0][1], v[1][1], v[2][1]),
        Vec3::new(v[0][2], v[1][2], v[2][2]),
    );
    (eigenvalues, eigenvectors)
}

/// Compute the polar decomposition of a 3×3 deformation gradient.
///
/// For fully degenerate gradients (all singular values ≈ 0) the rotation
/// falls back to the identity and the stretch to zero, so callers always
/// receive finite, bounded results.
pub fn polar_decomposition(f: &Mat3) -> PolarDecomposition {
    let c = f.transpose().mul_mat3(f);
    let (eigenvalues, v) = symmetric_eigen(&c);

    // C is positive semi-definite; clamp tiny negative round-off.
    let sigma = Vec3::new(
        eigenvalues.x.max(0.0).sqrt(),
        eigenvalues.y.max(0.0).sqrt(),
        eigenvalues.z.max(0.0).sqrt(),
    );

    if sigma.max_element() < GEOMETRIC_EPSILON {
        return PolarDecomposition {
            rotation: Mat3::IDENTITY,
            stretch: Mat3::ZERO,
        };
    }

    let inv = |s: Scalar| if s > GEOMETRIC_EPSILON { 1.0 / s } else { 0.0 };
    let sigma_inv = Mat3::from_diagonal(Vec3::new(inv(sigma.x), inv(sigma.y), inv(sigma.z)));

    let vt = v.transpose();
    let stretch = v.mul_mat3(&Mat3::from_diagonal(sigma)).mul_mat3(&vt);
    let rotation = f.mul_mat3(&v).mul_mat3(&sigma_inv).mul_mat3(&vt);

    PolarDecomposition { rotation, stretch }
}
