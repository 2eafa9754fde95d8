//! Solver and per-body configuration.
//!
//! All parameters are validated up front; a bad value is a fatal
//! configuration error before the first step, never a mid-solve surprise.

use serde::{Deserialize, Serialize};

use elastica_material::{ElasticModel, MaterialParams};
use elastica_math::Vec3;
use elastica_types::constants::{DEFAULT_DT, DEFAULT_ITERATIONS, DEFAULT_SUBSTEPS, GRAVITY};
use elastica_types::{ElasticaError, ElasticaResult, Scalar};

/// Global timestep configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Full timestep length (seconds). Must be positive.
    pub dt: Scalar,
    /// Substeps per timestep. At least 1.
    pub substeps: u32,
    /// Constraint-projection iterations per timestep, distributed over
    /// the substeps. 0 means integrate-and-collide only.
    pub iterations: u32,
    /// Gravitational acceleration applied to every free particle.
    pub gravity: Vec3,
    /// Compliance of transient collision constraints. 0 = hard contact.
    pub collision_compliance: Scalar,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            dt: DEFAULT_DT,
            substeps: DEFAULT_SUBSTEPS,
            iterations: DEFAULT_ITERATIONS,
            gravity: Vec3::new(0.0, -GRAVITY, 0.0),
            collision_compliance: 0.0,
        }
    }
}

impl SolverConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> ElasticaResult<()> {
        if !(self.dt > 0.0) {
            return Err(ElasticaError::InvalidConfig(format!(
                "timestep must be positive, got {}",
                self.dt
            )));
        }
        if self.substeps == 0 {
            return Err(ElasticaError::InvalidConfig(
                "substep count must be at least 1".into(),
            ));
        }
        if !(self.collision_compliance >= 0.0) {
            return Err(ElasticaError::InvalidConfig(format!(
                "collision compliance must be non-negative, got {}",
                self.collision_compliance
            )));
        }
        if !self.gravity.is_finite() {
            return Err(ElasticaError::InvalidConfig(
                "gravity must be finite".into(),
            ));
        }
        Ok(())
    }

    /// Substep length in seconds.
    #[inline]
    pub fn dt_substep(&self) -> Scalar {
        self.dt / self.substeps as Scalar
    }

    /// Gauss-Seidel sweeps per substep.
    ///
    /// When `iterations >= substeps` the iterations are distributed
    /// evenly (integer division). Fewer iterations than substeps fall
    /// back to one sweep per substep, so the total becomes `substeps`
    /// rather than `iterations`. Zero iterations means zero sweeps.
    #[inline]
    pub fn sweeps_per_substep(&self) -> u32 {
        if self.iterations == 0 {
            0
        } else if self.iterations >= self.substeps {
            self.iterations / self.substeps
        } else {
            1
        }
    }
}

/// Which persistent constraints a body's setup generates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintType {
    /// One distance constraint per unique mesh edge.
    Distance,
    /// One Green-strain elastic constraint per tetrahedron.
    TetrahedralElastic,
    /// Per-node elastic constraints coupling mesh and meshless particles.
    HybridElastic,
    /// One elastic constraint per meshless node.
    MeshlessElastic,
}

/// Per-body simulation parameters, immutable during a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Constraint compliance (inverse stiffness). 0 = rigid.
    pub alpha: Scalar,
    /// Constraint damping.
    pub beta: Scalar,
    /// Material constants.
    pub material: MaterialParams,
    /// Persistent constraint type generated at setup.
    pub constraint_type: ConstraintType,
    /// Stress formula for elastic constraint types.
    #[serde(default)]
    pub model: ElasticModel,
}

impl SimulationParameters {
    /// Elastic body parameters from engineering constants, rigid and
    /// undamped by default.
    pub fn elastic(
        young_modulus: Scalar,
        poisson_ratio: Scalar,
        constraint_type: ConstraintType,
    ) -> Self {
        Self {
            alpha: 0.0,
            beta: 0.0,
            material: MaterialParams::YoungPoisson {
                young_modulus,
                poisson_ratio,
            },
            constraint_type,
            model: ElasticModel::default(),
        }
    }

    /// Distance-constraint body parameters; the Hooke coefficient's
    /// inverse becomes the constraint compliance.
    pub fn distance(stiffness: Scalar) -> Self {
        Self {
            alpha: if stiffness > 0.0 { 1.0 / stiffness } else { 0.0 },
            beta: 0.0,
            material: MaterialParams::Hooke { stiffness },
            constraint_type: ConstraintType::Distance,
            model: ElasticModel::default(),
        }
    }

    /// Validates the parameters.
    ///
    /// Elastic constraint types additionally require engineering
    /// constants; a Hooke material there is rejected here rather than at
    /// constraint build time.
    pub fn validate(&self) -> ElasticaResult<()> {
        if !(self.alpha >= 0.0) {
            return Err(ElasticaError::InvalidConfig(format!(
                "compliance must be non-negative, got {}",
                self.alpha
            )));
        }
        if !(self.beta >= 0.0) {
            return Err(ElasticaError::InvalidConfig(format!(
                "damping must be non-negative, got {}",
                self.beta
            )));
        }
        self.material.validate()?;
        match self.constraint_type {
            ConstraintType::Distance => Ok(()),
            ConstraintType::TetrahedralElastic
            | ConstraintType::HybridElastic
            | ConstraintType::MeshlessElastic => self.material.lame().map(|_| ()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = SolverConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.substeps, 30);
        assert_eq!(config.iterations, 30);
    }

    #[test]
    fn rejects_zero_dt_and_zero_substeps() {
        let mut config = SolverConfig::default();
        config.dt = 0.0;
        assert!(config.validate().is_err(), "dt = 0 must be rejected");

        let mut config = SolverConfig::default();
        config.substeps = 0;
        assert!(config.validate().is_err(), "substeps = 0 must be rejected");
    }

    #[test]
    fn sweep_schedule_distributes_iterations() {
        let mut config = SolverConfig::default();

        config.substeps = 60;
        config.iterations = 60;
        assert_eq!(config.sweeps_per_substep(), 1);

        config.substeps = 30;
        config.iterations = 90;
        assert_eq!(config.sweeps_per_substep(), 3);

        // Fewer iterations than substeps: one sweep per substep, so the
        // total exceeds the requested count.
        config.substeps = 30;
        config.iterations = 10;
        assert_eq!(config.sweeps_per_substep(), 1);

        config.iterations = 0;
        assert_eq!(config.sweeps_per_substep(), 0);
    }

    #[test]
    fn elastic_params_reject_hooke_material() {
        let params = SimulationParameters {
            alpha: 0.0,
            beta: 0.0,
            material: MaterialParams::Hooke { stiffness: 100.0 },
            constraint_type: ConstraintType::TetrahedralElastic,
            model: ElasticModel::default(),
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = SolverConfig::default();
        let text = toml::to_string(&config).unwrap();
        let back: SolverConfig = toml::from_str(&text).unwrap();
        assert_eq!(config, back);
    }
}
