//! Strain measures and the shared strain-energy density.

use elastica_math::decomposition::{polar_decomposition, PolarDecomposition};
use elastica_math::tensor::{double_contraction, trace};
use elastica_math::Mat3;
use elastica_types::Scalar;

use crate::properties::LameParameters;

/// Green strain E = ½(FᵀF − I). Rotation-invariant.
#[inline]
pub fn green_strain(f: &Mat3) -> Mat3 {
    (f.transpose().mul_mat3(f) - Mat3::IDENTITY) * 0.5
}

/// Small (corotated) strain E = S − I, where F = R·S by polar
/// decomposition. Returns the decomposition alongside the strain since
/// the corotational stress needs R as well.
pub fn small_strain(f: &Mat3) -> (Mat3, PolarDecomposition) {
    let polar = polar_decomposition(f);
    (polar.stretch - Mat3::IDENTITY, polar)
}

/// Strain-energy density Ψ(E) = μ(E:E) + ½λ·tr(E)².
///
/// Shared by the St. Venant-Kirchhoff and corotational models; only the
/// strain measure fed in differs.
#[inline]
pub fn strain_energy_density(e: &Mat3, lame: &LameParameters) -> Scalar {
    let tr = trace(e);
    lame.mu * double_contraction(e, e) + 0.5 * lame.lambda * tr * tr
}
