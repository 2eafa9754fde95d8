//! Stress formulas and model dispatch.
//!
//! The two closed forms of ∂Ψ/∂F:
//! - St. Venant-Kirchhoff:  P = F(2μE + λ·tr(E)·I) with E the Green strain
//! - corotational linear:   P = 2μ(F−R) + λ·tr(RᵀF−I)·R with R from the
//!   polar decomposition F = RS
//!
//! Dispatch goes through the closed [`ElasticModel`] set so the hot loop
//! is an exhaustive match, not a virtual call.

use elastica_math::tensor::trace;
use elastica_math::Mat3;
use elastica_types::Scalar;
use serde::{Deserialize, Serialize};

use crate::properties::LameParameters;
use crate::strain::{green_strain, small_strain, strain_energy_density};

/// Energy density and first Piola-Kirchhoff stress at one deformation
/// gradient — everything a constraint needs for C and ∇C.
#[derive(Debug, Clone, Copy)]
pub struct EnergyStress {
    /// Scalar strain-energy density Ψ.
    pub energy_density: Scalar,
    /// Stress tensor ∂Ψ/∂F.
    pub stress: Mat3,
}

/// First Piola-Kirchhoff stress for St. Venant-Kirchhoff:
/// P = F(2μE + λ·tr(E)·I).
pub fn stvk_stress(f: &Mat3, e: &Mat3, lame: &LameParameters) -> Mat3 {
    let tr = trace(e);
    let inner = *e * (2.0 * lame.mu) + Mat3::IDENTITY * (lame.lambda * tr);
    f.mul_mat3(&inner)
}

/// Corotational linear elasticity stress:
/// P = 2μ(F−R) + λ·tr(RᵀF−I)·R.
pub fn corotational_stress(f: &Mat3, r: &Mat3, lame: &LameParameters) -> Mat3 {
    let rtf_i = r.transpose().mul_mat3(f) - Mat3::IDENTITY;
    (*f - *r) * (2.0 * lame.mu) + *r * (lame.lambda * trace(&rtf_i))
}

/// The closed set of elastic stress formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ElasticModel {
    /// St. Venant-Kirchhoff (Green strain). The default.
    #[default]
    StVenantKirchhoff,
    /// Corotational linear elasticity (small strain in the rotated frame).
    Corotational,
}

impl ElasticModel {
    /// Evaluate Ψ and ∂Ψ/∂F at the given deformation gradient.
    ///
    /// Near-singular F is tolerated: the polar decomposition falls back to
    /// an identity rotation and all returned values stay finite. Callers
    /// still check gradient finiteness before projecting.
    pub fn energy_and_stress(&self, f: &Mat3, lame: &LameParameters) -> EnergyStress {
        match self {
            ElasticModel::StVenantKirchhoff => {
                let e = green_strain(f);
                EnergyStress {
                    energy_density: strain_energy_density(&e, lame),
                    stress: stvk_stress(f, &e, lame),
                }
            }
            ElasticModel::Corotational => {
                let (e, polar) = small_strain(f);
                EnergyStress {
                    energy_density: strain_energy_density(&e, lame),
                    stress: corotational_stress(f, &polar.rotation, lame),
                }
            }
        }
    }

    /// Human-readable model name.
    pub fn name(&self) -> &'static str {
        match self {
            ElasticModel::StVenantKirchhoff => "st_venant_kirchhoff",
            ElasticModel::Corotational => "corotational",
        }
    }
}
