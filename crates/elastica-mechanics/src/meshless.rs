//! Meshless (SPH-style) body: node cloud + embedded surface vertices.
//!
//! Each node caches its neighbourhood in material space: neighbour
//! indices, per-neighbour rest volumes, kernel gradients, and the
//! correction matrix L that makes the corrected gradient operator exactly
//! reproduce linear fields (F = I at rest). These caches are computed once
//! at setup from the rest configuration; only the deformation gradient F
//! is refreshed at runtime.

use elastica_math::tensor::outer;
use elastica_math::{Mat3, Vec3};
use elastica_types::constants::GEOMETRIC_EPSILON;
use elastica_types::{ElasticaError, ElasticaResult, Scalar};

use crate::kernel::Poly6Kernel;
use crate::particle::Particle;

/// Per-node cache for the meshless gradient operator.
#[derive(Debug, Clone)]
pub struct MeshlessNode {
    /// Neighbour node indices (includes the node itself).
    pub neighbours: Vec<u32>,
    /// Per-neighbour rest volume Vⱼ.
    pub vj: Vec<Scalar>,
    /// Rest-space kernel gradients ∇Wᵢⱼ (with respect to xᵢ).
    pub grad_w: Vec<Vec3>,
    /// Correction matrix Lᵢ = (Σⱼ Vⱼ ∇Wᵢⱼ (x̄ⱼ−x̄ᵢ)ᵀ)⁻¹.
    pub l: Mat3,
    /// Own rest volume Vᵢ.
    pub rest_volume: Scalar,
    /// Cached deformation gradient, refreshed each step.
    pub f: Mat3,
}

impl MeshlessNode {
    /// Builds the material-space cache for node `i`.
    ///
    /// Neighbour search is a brute-force range query over the rest
    /// positions; runtime neighbour maintenance is out of scope (the
    /// neighbour set is fixed until the rest configuration changes).
    pub fn build(
        i: usize,
        rest_positions: &[Vec3],
        volumes: &[Scalar],
        kernel: &Poly6Kernel,
    ) -> Self {
        let xi = rest_positions[i];
        let h2 = kernel.h() * kernel.h();

        let mut neighbours = Vec::new();
        let mut vj = Vec::new();
        let mut grad_w = Vec::new();
        let mut correction = Mat3::ZERO;

        for (j, &xj) in rest_positions.iter().enumerate() {
            if (xi - xj).length_squared() > h2 {
                continue;
            }
            let g = kernel.grad_w(xi - xj);
            neighbours.push(j as u32);
            vj.push(volumes[j]);
            grad_w.push(g);
            correction += outer(g, xj - xi) * volumes[j];
        }

        let l = if correction.determinant().abs() > GEOMETRIC_EPSILON {
            correction.inverse()
        } else {
            Mat3::IDENTITY
        };

        Self {
            neighbours,
            vj,
            grad_w,
            l,
            rest_volume: volumes[i],
            f: Mat3::IDENTITY,
        }
    }

    /// Corrected kernel gradient Lᵢ·∇Wᵢⱼ for neighbour slot `a`.
    #[inline]
    pub fn corrected_grad(&self, a: usize) -> Vec3 {
        self.l * self.grad_w[a]
    }

    /// Deformation gradient from current neighbour positions:
    /// Fᵢ = Σⱼ Vⱼ (xⱼ−xᵢ)(Lᵢ∇Wᵢⱼ)ᵀ.
    ///
    /// `node_index` is this node's own index; `position` maps a neighbour
    /// node index to its current position.
    pub fn deformation_gradient<P>(&self, node_index: u32, position: P) -> Mat3
    where
        P: Fn(u32) -> Vec3,
    {
        let xi = position(node_index);
        let mut f = Mat3::ZERO;
        for (a, &j) in self.neighbours.iter().enumerate() {
            let xji = position(j) - xi;
            f += outer(xji, self.corrected_grad(a)) * self.vj[a];
        }
        f
    }
}

/// A surface vertex embedded in the node cloud.
///
/// The vertex has no particle of its own: its world position is
/// interpolated from neighbouring nodes as
/// vₖ = sₖ Σⱼ Vⱼ Wₖⱼ (Fⱼ·Xₖⱼ + xⱼ).
#[derive(Debug, Clone)]
pub struct SurfaceVertex {
    /// Material-space position.
    pub rest_position: Vec3,
    /// Current interpolated world position.
    pub position: Vec3,
    /// Supporting node indices.
    pub neighbours: Vec<u32>,
    /// Rest offsets Xₖⱼ = X̄ₖ − x̄ⱼ.
    pub xkj: Vec<Vec3>,
    /// Kernel weights Wₖⱼ at rest.
    pub wkj: Vec<Scalar>,
    /// Supporting node rest volumes Vⱼ.
    pub vj: Vec<Scalar>,
    /// Shepard normalization sₖ = 1 / Σⱼ Vⱼ Wₖⱼ.
    pub sk: Scalar,
}

impl SurfaceVertex {
    /// Embeds a surface vertex at `rest_position` into the node cloud.
    pub fn build(
        rest_position: Vec3,
        node_rest_positions: &[Vec3],
        volumes: &[Scalar],
        kernel: &Poly6Kernel,
    ) -> Self {
        let h2 = kernel.h() * kernel.h();
        let mut neighbours = Vec::new();
        let mut xkj = Vec::new();
        let mut wkj = Vec::new();
        let mut vj = Vec::new();
        let mut weight_sum = 0.0;

        for (j, &xj) in node_rest_positions.iter().enumerate() {
            let d = rest_position - xj;
            if d.length_squared() > h2 {
                continue;
            }
            let w = kernel.w(d);
            neighbours.push(j as u32);
            xkj.push(d);
            wkj.push(w);
            vj.push(volumes[j]);
            weight_sum += volumes[j] * w;
        }

        let sk = if weight_sum > GEOMETRIC_EPSILON {
            1.0 / weight_sum
        } else {
            0.0
        };

        Self {
            rest_position,
            position: rest_position,
            neighbours,
            xkj,
            wkj,
            vj,
            sk,
        }
    }

    /// Interpolate the world position from the supporting nodes.
    ///
    /// `position` maps a node index to the particle position to use
    /// (committed `x` for visual refresh, predicted `xi` during collision
    /// projection).
    pub fn interpolate<P>(&self, nodes: &[MeshlessNode], position: P) -> Vec3
    where
        P: Fn(u32) -> Vec3,
    {
        let mut vk = Vec3::ZERO;
        for (a, &j) in self.neighbours.iter().enumerate() {
            let fj = nodes[j as usize].f;
            vk += (fj * self.xkj[a] + position(j)) * (self.vj[a] * self.wkj[a]);
        }
        vk * self.sk
    }
}

/// Meshless soft body.
#[derive(Debug, Clone)]
pub struct MeshlessBody {
    /// Particle arena, one particle per node.
    pub particles: Vec<Particle>,
    /// Node caches, parallel to `particles`.
    pub nodes: Vec<MeshlessNode>,
    /// Embedded surface vertices.
    pub surface: Vec<SurfaceVertex>,
    kernel: Poly6Kernel,
    /// Particle positions mirrored for the collision detector.
    collision_positions: Vec<Vec3>,
    render_dirty: bool,
}

impl MeshlessBody {
    /// Builds a body from node rest positions, per-node volumes, surface
    /// vertex rest positions, and the kernel support radius.
    pub fn new(
        rest_positions: &[Vec3],
        volumes: &[Scalar],
        surface_rest_positions: &[Vec3],
        h: Scalar,
        particle_mass: Scalar,
    ) -> ElasticaResult<Self> {
        if rest_positions.is_empty() {
            return Err(ElasticaError::InvalidBody("meshless body has no nodes".into()));
        }
        if rest_positions.len() != volumes.len() {
            return Err(ElasticaError::InvalidBody(format!(
                "node count ({}) != volume count ({})",
                rest_positions.len(),
                volumes.len()
            )));
        }
        if !(h > 0.0) {
            return Err(ElasticaError::InvalidBody(format!(
                "support radius must be positive, got {h}"
            )));
        }
        if !(particle_mass > 0.0) {
            return Err(ElasticaError::InvalidBody(format!(
                "particle mass must be positive, got {particle_mass}"
            )));
        }

        let kernel = Poly6Kernel::new(h);
        let particles: Vec<Particle> = rest_positions
            .iter()
            .map(|&p| Particle::new(p, particle_mass))
            .collect();
        let nodes: Vec<MeshlessNode> = (0..rest_positions.len())
            .map(|i| MeshlessNode::build(i, rest_positions, volumes, &kernel))
            .collect();
        let surface: Vec<SurfaceVertex> = surface_rest_positions
            .iter()
            .map(|&p| SurfaceVertex::build(p, rest_positions, volumes, &kernel))
            .collect();

        Ok(Self {
            particles,
            nodes,
            surface,
            kernel,
            collision_positions: rest_positions.to_vec(),
            render_dirty: false,
        })
    }

    /// The smoothing kernel shared by all nodes.
    pub fn kernel(&self) -> &Poly6Kernel {
        &self.kernel
    }

    /// Pin a node's particle in place.
    pub fn fix_particle(&mut self, index: usize) {
        self.particles[index].fix();
    }

    /// Positions mirrored for the collision detector.
    pub fn collision_positions(&self) -> &[Vec3] {
        &self.collision_positions
    }

    /// Whether the renderer should re-upload vertex data.
    pub fn is_render_dirty(&self) -> bool {
        self.render_dirty
    }

    /// Clear the dirty flag once the renderer has consumed it.
    pub fn clear_render_dirty(&mut self) {
        self.render_dirty = false;
    }

    /// Refresh each node's cached deformation gradient from committed
    /// particle positions.
    pub(crate) fn refresh_deformation_gradients(&mut self) {
        let particles = &self.particles;
        for i in 0..self.nodes.len() {
            let f = self.nodes[i]
                .deformation_gradient(i as u32, |j| particles[j as usize].x);
            self.nodes[i].f = f;
        }
    }

    /// Re-interpolate surface vertex positions from committed particles.
    pub(crate) fn refresh_visual(&mut self) {
        let (nodes, particles) = (&self.nodes, &self.particles);
        for vertex in &mut self.surface {
            vertex.position = vertex.interpolate(nodes, |j| particles[j as usize].x);
        }
    }

    pub(crate) fn refresh_collision(&mut self) {
        for (mirror, p) in self.collision_positions.iter_mut().zip(&self.particles) {
            *mirror = p.x;
        }
    }

    pub(crate) fn set_render_dirty(&mut self) {
        self.render_dirty = true;
    }
}
