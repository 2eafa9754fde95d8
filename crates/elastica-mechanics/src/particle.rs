//! Per-particle kinematic state.
//!
//! This is the primary mutable record during simulation. The solver
//! borrows a body's particle array for the duration of a step; constraint
//! projections mutate only the predicted position `xi`.

use elastica_math::Vec3;
use elastica_types::Scalar;

/// One simulated particle.
///
/// Invariant: fixed particles have `inv_mass == 0` and are never displaced
/// by integration or by any constraint projection.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    /// Current (committed) position.
    pub x: Vec3,
    /// Predicted position, mutated by constraint projection.
    pub xi: Vec3,
    /// Previous confirmed position, used for velocity reconstruction
    /// and the XPBD damping displacement term.
    pub xn: Vec3,
    /// Velocity.
    pub v: Vec3,
    /// Force accumulator, cleared at the end of every substep.
    pub f: Vec3,
    mass: Scalar,
    inv_mass: Scalar,
    fixed: bool,
}

impl Particle {
    /// Creates a free particle at rest.
    pub fn new(position: Vec3, mass: Scalar) -> Self {
        Self {
            x: position,
            xi: position,
            xn: position,
            v: Vec3::ZERO,
            f: Vec3::ZERO,
            mass,
            inv_mass: 1.0 / mass,
            fixed: false,
        }
    }

    /// Creates a fixed (kinematic) particle. Infinite mass, zero inverse.
    pub fn fixed_at(position: Vec3) -> Self {
        Self {
            x: position,
            xi: position,
            xn: position,
            v: Vec3::ZERO,
            f: Vec3::ZERO,
            mass: Scalar::INFINITY,
            inv_mass: 0.0,
            fixed: true,
        }
    }

    /// Particle mass.
    #[inline]
    pub fn mass(&self) -> Scalar {
        self.mass
    }

    /// Inverse mass; zero for fixed particles.
    #[inline]
    pub fn inv_mass(&self) -> Scalar {
        self.inv_mass
    }

    /// Whether this particle is pinned in place.
    #[inline]
    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    /// Pin this particle at its current position.
    pub fn fix(&mut self) {
        self.fixed = true;
        self.mass = Scalar::INFINITY;
        self.inv_mass = 0.0;
        self.v = Vec3::ZERO;
    }
}
