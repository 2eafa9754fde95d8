//! Scenario configuration and body construction.
//!
//! A scenario file pairs the global `[solver]` table with a `[scenario]`
//! table describing a procedural body, its material, and an optional
//! floor.

use serde::{Deserialize, Serialize};

use elastica_math::Vec3;
use elastica_mechanics::{
    generators, HybridBody, MeshlessBody, SoftBody, TetrahedralBody,
};
use elastica_solver::{ConstraintType, SimulationParameters, SolverConfig};
use elastica_types::{ElasticaError, ElasticaResult, Scalar};

/// Top-level scenario file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Global solver configuration.
    pub solver: SolverConfig,
    /// Body and environment description.
    pub scenario: Scenario,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            solver: SolverConfig::default(),
            scenario: Scenario::default(),
        }
    }
}

/// Which procedural body the scenario builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    /// Tetrahedral beam dropped onto the floor.
    BeamDrop,
    /// Tetrahedral beam with one end face pinned.
    BeamHang,
    /// Meshless node block dropped onto the floor.
    MeshlessDrop,
    /// Hybrid beam: mesh plus an overlapping node cloud.
    HybridDrop,
}

/// Procedural scenario description.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    /// Body kind.
    pub kind: ScenarioKind,
    /// Cells (beam) or nodes (meshless) per axis.
    pub resolution: [usize; 3],
    /// Cell / node spacing (meters).
    pub spacing: Scalar,
    /// Mass per particle (kg).
    pub particle_mass: Scalar,
    /// Kernel support radius as a multiple of the spacing (meshless and
    /// hybrid bodies).
    pub support_scale: Scalar,
    /// Vertical offset applied to the whole body at setup.
    pub drop_height: Scalar,
    /// Floor height; omit for an unbounded world.
    pub floor: Option<Scalar>,
    /// Full timesteps to simulate.
    pub steps: u32,
    /// Constraint compliance.
    pub alpha: Scalar,
    /// Constraint damping.
    pub beta: Scalar,
    /// Young's modulus (Pa).
    pub young_modulus: Scalar,
    /// Poisson ratio.
    pub poisson_ratio: Scalar,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            kind: ScenarioKind::BeamDrop,
            resolution: [4, 2, 2],
            spacing: 0.1,
            particle_mass: 1.0,
            support_scale: 2.2,
            drop_height: 0.5,
            floor: Some(0.0),
            steps: 120,
            alpha: 1.0e-8,
            beta: 0.0,
            young_modulus: 1.0e4,
            poisson_ratio: 0.3,
        }
    }
}

impl Scenario {
    /// The per-body solver parameters this scenario implies.
    pub fn parameters(&self) -> SimulationParameters {
        let constraint_type = match self.kind {
            ScenarioKind::BeamDrop | ScenarioKind::BeamHang => {
                ConstraintType::TetrahedralElastic
            }
            ScenarioKind::MeshlessDrop => ConstraintType::MeshlessElastic,
            ScenarioKind::HybridDrop => ConstraintType::HybridElastic,
        };
        let mut params =
            SimulationParameters::elastic(self.young_modulus, self.poisson_ratio, constraint_type);
        params.alpha = self.alpha;
        params.beta = self.beta;
        params
    }

    /// Builds the scenario body, lifted by `drop_height`.
    pub fn build_body(&self) -> ElasticaResult<SoftBody> {
        let [nx, ny, nz] = self.resolution;
        if nx == 0 || ny == 0 || nz == 0 {
            return Err(ElasticaError::InvalidConfig(format!(
                "scenario resolution must be positive on every axis, got {:?}",
                self.resolution
            )));
        }
        let lift = Vec3::new(0.0, self.drop_height, 0.0);

        match self.kind {
            ScenarioKind::BeamDrop | ScenarioKind::BeamHang => {
                let (mut positions, tets) = generators::beam(nx, ny, nz, self.spacing);
                for p in &mut positions {
                    *p += lift;
                }
                let mut body = TetrahedralBody::new(&positions, &tets, self.particle_mass)?;
                if self.kind == ScenarioKind::BeamHang {
                    for (i, p) in positions.iter().enumerate() {
                        if p.x <= lift.x + 1.0e-9 {
                            body.fix_particle(i);
                        }
                    }
                }
                Ok(SoftBody::Tetrahedral(body))
            }

            ScenarioKind::MeshlessDrop => {
                let (mut positions, volumes) = generators::node_grid(nx, ny, nz, self.spacing);
                for p in &mut positions {
                    *p += lift;
                }
                // The grid's outer shell doubles as the embedded surface.
                let surface: Vec<Vec3> = shell_indices(nx, ny, nz)
                    .into_iter()
                    .map(|i| positions[i])
                    .collect();
                let body = MeshlessBody::new(
                    &positions,
                    &volumes,
                    &surface,
                    self.support_scale * self.spacing,
                    self.particle_mass,
                )?;
                Ok(SoftBody::Meshless(body))
            }

            ScenarioKind::HybridDrop => {
                let (mut mesh_positions, tets) = generators::beam(nx, ny, nz, self.spacing);
                for p in &mut mesh_positions {
                    *p += lift;
                }
                // Node samples at the cell centers overlap the mesh, so
                // every node is a mixed particle.
                let (mut node_positions, volumes) =
                    generators::node_grid(nx, ny, nz, self.spacing);
                let half = 0.5 * self.spacing;
                for p in &mut node_positions {
                    *p += lift + Vec3::new(half, half, half);
                }
                let body = HybridBody::new(
                    &mesh_positions,
                    &tets,
                    &node_positions,
                    &volumes,
                    self.support_scale * self.spacing,
                    self.particle_mass,
                )?;
                Ok(SoftBody::Hybrid(body))
            }
        }
    }
}

/// Indices of the boundary nodes of an (nx × ny × nz) grid laid out
/// x-fastest.
fn shell_indices(nx: usize, ny: usize, nz: usize) -> Vec<usize> {
    let mut indices = Vec::new();
    for z in 0..nz {
        for y in 0..ny {
            for x in 0..nx {
                if x == 0 || y == 0 || z == 0 || x == nx - 1 || y == ny - 1 || z == nz - 1 {
                    indices.push((z * ny + y) * nx + x);
                }
            }
        }
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scenario_builds_and_validates() {
        let config = ScenarioConfig::default();
        assert!(config.solver.validate().is_ok());
        assert!(config.scenario.parameters().validate().is_ok());
        assert!(config.scenario.build_body().is_ok());
    }

    #[test]
    fn scenario_round_trips_through_toml() {
        let config = ScenarioConfig::default();
        let text = toml::to_string(&config).unwrap();
        let back: ScenarioConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.scenario.kind, ScenarioKind::BeamDrop);
        assert_eq!(back.scenario.resolution, config.scenario.resolution);
    }

    #[test]
    fn hang_scenario_pins_the_root_face() {
        let mut scenario = Scenario::default();
        scenario.kind = ScenarioKind::BeamHang;
        let body = scenario.build_body().unwrap();
        let pinned = body.particles().iter().filter(|p| p.is_fixed()).count();
        let [_, ny, nz] = scenario.resolution;
        assert_eq!(pinned, (ny + 1) * (nz + 1));
    }
}
