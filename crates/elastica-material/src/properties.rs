//! Material parameters and their validation.
//!
//! Invalid material parameters are configuration errors, rejected before
//! any step runs — never discovered mid-solve.

use elastica_types::{ElasticaError, ElasticaResult, Scalar};
use serde::{Deserialize, Serialize};

/// Lamé parameters derived from engineering constants.
///
/// μ = Y / (2(1+ν)),  λ = Yν / ((1+ν)(1−2ν)).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LameParameters {
    /// Second Lamé parameter (shear modulus).
    pub mu: Scalar,
    /// First Lamé parameter.
    pub lambda: Scalar,
}

impl LameParameters {
    /// Derive Lamé parameters from Young's modulus and Poisson ratio.
    ///
    /// Rejects `young_modulus <= 0` and `poisson_ratio` outside the open
    /// interval (−1, 0.5). ν = 0.5 (incompressible limit) makes λ blow up
    /// and is excluded strictly.
    pub fn from_young_poisson(
        young_modulus: Scalar,
        poisson_ratio: Scalar,
    ) -> ElasticaResult<Self> {
        if !(young_modulus > 0.0) {
            return Err(ElasticaError::InvalidMaterial(format!(
                "Young's modulus must be positive, got {young_modulus}"
            )));
        }
        if !(poisson_ratio > -1.0 && poisson_ratio < 0.5) {
            return Err(ElasticaError::InvalidMaterial(format!(
                "Poisson ratio must lie in (-1, 0.5), got {poisson_ratio}"
            )));
        }

        let mu = young_modulus / (2.0 * (1.0 + poisson_ratio));
        let lambda = young_modulus * poisson_ratio
            / ((1.0 + poisson_ratio) * (1.0 - 2.0 * poisson_ratio));
        Ok(Self { mu, lambda })
    }
}

/// Per-body material configuration.
///
/// Elastic constraint types consume Young's modulus + Poisson ratio;
/// distance constraints consume a direct Hooke coefficient whose inverse
/// becomes the constraint compliance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialParams {
    /// Engineering constants for elastic (strain-energy) constraints.
    YoungPoisson {
        /// Young's modulus (Pa). Must be positive.
        young_modulus: Scalar,
        /// Poisson ratio, strictly inside (−1, 0.5).
        poisson_ratio: Scalar,
    },
    /// Direct spring stiffness for distance constraints.
    Hooke {
        /// Hooke coefficient (N/m). Must be positive.
        stiffness: Scalar,
    },
}

impl MaterialParams {
    /// Validate the parameters, returning a fatal configuration error
    /// for out-of-range values.
    pub fn validate(&self) -> ElasticaResult<()> {
        match *self {
            MaterialParams::YoungPoisson {
                young_modulus,
                poisson_ratio,
            } => LameParameters::from_young_poisson(young_modulus, poisson_ratio).map(|_| ()),
            MaterialParams::Hooke { stiffness } => {
                if stiffness > 0.0 {
                    Ok(())
                } else {
                    Err(ElasticaError::InvalidMaterial(format!(
                        "Hooke coefficient must be positive, got {stiffness}"
                    )))
                }
            }
        }
    }

    /// Lamé parameters, if this is an elastic material.
    pub fn lame(&self) -> ElasticaResult<LameParameters> {
        match *self {
            MaterialParams::YoungPoisson {
                young_modulus,
                poisson_ratio,
            } => LameParameters::from_young_poisson(young_modulus, poisson_ratio),
            MaterialParams::Hooke { .. } => Err(ElasticaError::InvalidMaterial(
                "elastic constraint types need Young's modulus and Poisson ratio".into(),
            )),
        }
    }
}
