//! The XPBD timestep driver.
//!
//! One full step runs `substeps` substeps at dt/substeps each. Per
//! substep: semi-implicit integration of external forces into predicted
//! positions, one collision detection pass, multiplier reset, then the
//! configured number of Gauss-Seidel sweeps over all constraints
//! (persistent first, then this substep's transient collisions), and
//! finally velocity reconciliation from the positional correction.
//!
//! Setup is fail-fast: every configuration and material error surfaces
//! before the first step. `step` itself never errors on numerical
//! trouble; degenerate elements are skipped locally by the projection.

use std::time::Instant;

use elastica_contact::CollisionDetector;
use elastica_math::Vec3;
use elastica_mechanics::SoftBody;
use elastica_telemetry::{EventBus, EventKind, SimulationEvent};
use elastica_types::{
    BodyId, ElasticaError, ElasticaResult, NodeId, ParticleId, Scalar, TetrahedronId,
};

use crate::collision::generate_collision_constraints;
use crate::config::{ConstraintType, SimulationParameters, SolverConfig};
use crate::constraint::Constraint;

/// The XPBD solver: bodies, persistent constraints, multipliers, and the
/// substep schedule.
pub struct XpbdSolver {
    config: SolverConfig,
    bodies: Vec<SoftBody>,
    constraints: Vec<Constraint>,
    /// Multipliers for [persistent..., collision...], reset per substep.
    multipliers: Vec<Scalar>,
    detector: Option<Box<dyn CollisionDetector>>,
    bus: EventBus,
    timestep: u32,
    sim_time: f64,
    ready: bool,
}

impl XpbdSolver {
    /// Creates a solver with a validated configuration and no bodies.
    pub fn new(config: SolverConfig) -> ElasticaResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            bodies: Vec::new(),
            constraints: Vec::new(),
            multipliers: Vec::new(),
            detector: None,
            bus: EventBus::new(),
            timestep: 0,
            sim_time: 0.0,
            ready: false,
        })
    }

    /// Adds a body, returning its id. Invalidates any previous setup.
    pub fn add_body(&mut self, body: SoftBody) -> BodyId {
        self.ready = false;
        self.bodies.push(body);
        BodyId(self.bodies.len() as u32 - 1)
    }

    /// A single body by id.
    pub fn body(&self, id: BodyId) -> &SoftBody {
        &self.bodies[id.index()]
    }

    /// Installs the environment collision detector. Without one, steps
    /// run elastic-only.
    pub fn set_detector(&mut self, detector: Box<dyn CollisionDetector>) {
        self.detector = Some(detector);
    }

    /// The telemetry bus; register sinks here before stepping.
    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    /// Solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// The simulated bodies.
    pub fn bodies(&self) -> &[SoftBody] {
        &self.bodies
    }

    /// Mutable access to the simulated bodies (pinning particles,
    /// inspecting state between steps).
    pub fn bodies_mut(&mut self) -> &mut [SoftBody] {
        &mut self.bodies
    }

    /// Completed timesteps.
    pub fn timestep(&self) -> u32 {
        self.timestep
    }

    /// Accumulated simulation time in seconds.
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    /// Number of persistent constraints built by `setup`.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Validates all per-body parameters and builds the persistent
    /// constraints. Must be called once per body configuration; `step`
    /// refuses to run before it.
    pub fn setup(&mut self, params: &[SimulationParameters]) -> ElasticaResult<()> {
        if params.len() != self.bodies.len() {
            return Err(ElasticaError::InvalidConfig(format!(
                "parameter count ({}) != body count ({})",
                params.len(),
                self.bodies.len()
            )));
        }
        for p in params {
            p.validate()?;
        }

        let mut constraints = Vec::new();
        for (bi, (body, p)) in self.bodies.iter().zip(params).enumerate() {
            build_body_constraints(BodyId(bi as u32), body, p, &mut constraints)?;
        }

        tracing::debug!(
            bodies = self.bodies.len(),
            constraints = constraints.len(),
            "solver setup complete"
        );

        self.constraints = constraints;
        self.multipliers.clear();
        self.ready = true;
        Ok(())
    }

    /// Advances the simulation by one full timestep.
    pub fn step(&mut self) -> ElasticaResult<()> {
        if !self.ready {
            return Err(ElasticaError::SolverNotSetUp);
        }

        let wall_start = Instant::now();
        self.bus.emit(SimulationEvent::new(
            self.timestep,
            EventKind::TimestepBegin {
                sim_time: self.sim_time,
            },
        ));

        let dt = self.config.dt_substep();
        let sweeps = self.config.sweeps_per_substep();
        let persistent = self.constraints.len();

        for substep in 0..self.config.substeps {
            self.integrate(dt);

            let collisions = match &self.detector {
                Some(detector) => generate_collision_constraints(
                    &self.bodies,
                    detector.as_ref(),
                    self.config.collision_compliance,
                ),
                None => Vec::new(),
            };
            self.bus.emit(SimulationEvent::new(
                self.timestep,
                EventKind::CollisionConstraints {
                    substep,
                    constraint_count: collisions.len() as u32,
                },
            ));

            self.multipliers.clear();
            self.multipliers.resize(persistent + collisions.len(), 0.0);

            for _ in 0..sweeps {
                for (ci, constraint) in self.constraints.iter().enumerate() {
                    constraint.project(&mut self.bodies, dt, &mut self.multipliers[ci]);
                }
                for (ci, constraint) in collisions.iter().enumerate() {
                    constraint.project(
                        &mut self.bodies,
                        dt,
                        &mut self.multipliers[persistent + ci],
                    );
                }
            }

            self.reconcile(dt);

            self.bus.emit(SimulationEvent::new(
                self.timestep,
                EventKind::ConstraintSweeps {
                    substep,
                    sweeps,
                    persistent_count: persistent as u32,
                },
            ));
        }

        for body in &mut self.bodies {
            body.update_physical_model();
            body.update_visual_model();
            body.update_collision_model();
            body.mark_render_dirty();
        }

        let (kinetic, potential) = self.energy();
        self.bus.emit(SimulationEvent::new(
            self.timestep,
            EventKind::Energy { kinetic, potential },
        ));
        self.bus.emit(SimulationEvent::new(
            self.timestep,
            EventKind::TimestepEnd {
                wall_time: wall_start.elapsed().as_secs_f64(),
            },
        ));
        self.bus.flush();

        self.sim_time += self.config.dt;
        self.timestep += 1;
        Ok(())
    }

    /// Semi-implicit integration into predicted positions. Gravity goes
    /// through the force accumulator so externally applied forces
    /// compose with it.
    fn integrate(&mut self, dt: Scalar) {
        let gravity = self.config.gravity;
        for body in &mut self.bodies {
            for p in body.particles_mut() {
                p.xn = p.x;
                if p.is_fixed() {
                    p.xi = p.x;
                    continue;
                }
                p.f += gravity * p.mass();
                p.v += p.f * (dt * p.inv_mass());
                p.xi = p.x + p.v * dt;
            }
        }
    }

    /// Commits predicted positions and reconstructs velocities from the
    /// actual displacement.
    fn reconcile(&mut self, dt: Scalar) {
        for body in &mut self.bodies {
            for p in body.particles_mut() {
                if p.is_fixed() {
                    p.xn = p.x;
                    p.f = Vec3::ZERO;
                    continue;
                }
                p.v = (p.xi - p.xn) / dt;
                p.x = p.xi;
                p.xn = p.x;
                p.f = Vec3::ZERO;
            }
        }
    }

    /// Kinetic and gravitational potential energy over all free
    /// particles.
    fn energy(&self) -> (f64, f64) {
        let gravity = self.config.gravity;
        let mut kinetic = 0.0;
        let mut potential = 0.0;
        for body in &self.bodies {
            for p in body.particles() {
                if p.is_fixed() {
                    continue;
                }
                kinetic += 0.5 * p.mass() * p.v.length_squared();
                potential -= p.mass() * gravity.dot(p.x);
            }
        }
        (kinetic, potential)
    }
}

/// Builds the persistent constraints of one body according to its
/// constraint-type selector.
fn build_body_constraints(
    bi: BodyId,
    body: &SoftBody,
    p: &SimulationParameters,
    out: &mut Vec<Constraint>,
) -> ElasticaResult<()> {
    match p.constraint_type {
        ConstraintType::Distance => {
            let Some(b) = body.as_tetrahedral() else {
                return Err(ElasticaError::InvalidConfig(
                    "distance constraints need a tetrahedral body".into(),
                ));
            };
            for e in &b.edges {
                out.push(Constraint::Distance {
                    body: bi,
                    v1: ParticleId(e.v1),
                    v2: ParticleId(e.v2),
                    rest_length: e.rest_length,
                    alpha: p.alpha,
                    beta: p.beta,
                });
            }
        }
        ConstraintType::TetrahedralElastic => {
            let Some(b) = body.as_tetrahedral() else {
                return Err(ElasticaError::InvalidConfig(
                    "tetrahedral elastic constraints need a tetrahedral body".into(),
                ));
            };
            let lame = p.material.lame()?;
            for ti in 0..b.tetrahedra.len() {
                out.push(Constraint::TetrahedralElastic {
                    body: bi,
                    tet: TetrahedronId(ti as u32),
                    lame,
                    model: p.model,
                    alpha: p.alpha,
                    beta: p.beta,
                });
            }
        }
        ConstraintType::HybridElastic => {
            let Some(b) = body.as_hybrid() else {
                return Err(ElasticaError::InvalidConfig(
                    "hybrid elastic constraints need a hybrid body".into(),
                ));
            };
            let lame = p.material.lame()?;
            // The mesh keeps its own elasticity; node constraints couple
            // the two representations.
            for ti in 0..b.tetrahedra.len() {
                out.push(Constraint::TetrahedralElastic {
                    body: bi,
                    tet: TetrahedronId(ti as u32),
                    lame,
                    model: p.model,
                    alpha: p.alpha,
                    beta: p.beta,
                });
            }
            for ni in 0..b.nodes.len() {
                out.push(Constraint::HybridElastic {
                    body: bi,
                    node: NodeId(ni as u32),
                    lame,
                    model: p.model,
                    alpha: p.alpha,
                    beta: p.beta,
                });
            }
        }
        ConstraintType::MeshlessElastic => {
            let Some(b) = body.as_meshless() else {
                return Err(ElasticaError::InvalidConfig(
                    "meshless elastic constraints need a meshless body".into(),
                ));
            };
            let lame = p.material.lame()?;
            for ni in 0..b.nodes.len() {
                out.push(Constraint::MeshlessElastic {
                    body: bi,
                    node: NodeId(ni as u32),
                    lame,
                    model: p.model,
                    alpha: p.alpha,
                    beta: p.beta,
                });
            }
        }
    }
    Ok(())
}
