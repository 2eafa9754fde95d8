//! Hybrid mesh/meshless body.
//!
//! A tetrahedral mesh and a meshless node cloud share one particle arena:
//! mesh particles first, meshless particles after (so constraints address
//! either through a stable offset). Nodes whose rest position falls inside
//! a tetrahedron are *mixed* particles: their elastic constraint also
//! spreads corrections onto the interior vertices of that tetrahedron via
//! the linear shape-function gradients.

use elastica_math::Vec3;
use elastica_types::{ElasticaError, ElasticaResult, Scalar};

use crate::kernel::Poly6Kernel;
use crate::meshless::MeshlessNode;
use crate::particle::Particle;
use crate::tetrahedral::{extract_boundary_vertices, Tetrahedron};

/// Hybrid mesh + meshless soft body.
#[derive(Debug, Clone)]
pub struct HybridBody {
    /// Particle arena: mesh particles at [0, mesh_particle_count),
    /// meshless particles after.
    pub particles: Vec<Particle>,
    /// Mesh topology with rest caches.
    pub tetrahedra: Vec<Tetrahedron>,
    /// Meshless node caches. Neighbour indices are node indices; add
    /// `meshless_offset()` to address the arena.
    pub nodes: Vec<MeshlessNode>,
    /// Containing tetrahedron per node, when the node lies inside the
    /// mesh (a mixed particle).
    pub node_tet: Vec<Option<u32>>,
    /// Per mesh vertex: true when the vertex lies on the boundary
    /// surface. Boundary vertices carry no shape function and take no
    /// part in the hybrid gradient.
    pub boundary_vertex: Vec<bool>,
    mesh_particle_count: usize,
    kernel: Poly6Kernel,
    render_dirty: bool,
}

impl HybridBody {
    /// Builds a hybrid body.
    ///
    /// `mesh_positions`/`tetrahedra` define the mesh part;
    /// `node_rest_positions`/`node_volumes` the meshless part; `h` the
    /// kernel support radius shared by all nodes.
    pub fn new(
        mesh_positions: &[Vec3],
        tetrahedra: &[[u32; 4]],
        node_rest_positions: &[Vec3],
        node_volumes: &[Scalar],
        h: Scalar,
        particle_mass: Scalar,
    ) -> ElasticaResult<Self> {
        if node_rest_positions.len() != node_volumes.len() {
            return Err(ElasticaError::InvalidBody(format!(
                "node count ({}) != volume count ({})",
                node_rest_positions.len(),
                node_volumes.len()
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
        let n = mesh_positions.len() as u32;
        for tet in tetrahedra {
            for &v in tet {
                if v >= n {
                    return Err(ElasticaError::InvalidBody(format!(
                        "tetrahedron vertex {v} out of range (mesh particle count {n})"
                    )));
                }
            }
        }

        let kernel = Poly6Kernel::new(h);

        let mut particles: Vec<Particle> = mesh_positions
            .iter()
            .map(|&p| Particle::new(p, particle_mass))
            .collect();
        particles.extend(
            node_rest_positions
                .iter()
                .map(|&p| Particle::new(p, particle_mass)),
        );

        let tets: Vec<Tetrahedron> = tetrahedra
            .iter()
            .map(|&vs| Tetrahedron::from_rest_positions(vs, mesh_positions))
            .collect();

        let nodes: Vec<MeshlessNode> = (0..node_rest_positions.len())
            .map(|i| MeshlessNode::build(i, node_rest_positions, node_volumes, &kernel))
            .collect();

        let node_tet: Vec<Option<u32>> = node_rest_positions
            .iter()
            .map(|&p| {
                tets.iter()
                    .position(|t| t.contains_rest_point(mesh_positions, p))
                    .map(|ti| ti as u32)
            })
            .collect();

        let boundary_vertex = extract_boundary_vertices(tetrahedra, mesh_positions.len());

        Ok(Self {
            particles,
            tetrahedra: tets,
            nodes,
            node_tet,
            boundary_vertex,
            mesh_particle_count: mesh_positions.len(),
            kernel,
            render_dirty: false,
        })
    }

    /// Number of mesh particles; also the arena offset of the first
    /// meshless particle.
    #[inline]
    pub fn meshless_offset(&self) -> usize {
        self.mesh_particle_count
    }

    /// Number of mesh particles.
    #[inline]
    pub fn mesh_particle_count(&self) -> usize {
        self.mesh_particle_count
    }

    /// Whether node `ni` overlaps the mesh (has a containing tetrahedron).
    #[inline]
    pub fn is_mixed_node(&self, ni: usize) -> bool {
        self.node_tet[ni].is_some()
    }

    /// The smoothing kernel shared by all nodes.
    pub fn kernel(&self) -> &Poly6Kernel {
        &self.kernel
    }

    /// Pin a particle (mesh or meshless) in place.
    pub fn fix_particle(&mut self, index: usize) {
        self.particles[index].fix();
    }

    /// Whether the renderer should re-upload vertex data.
    pub fn is_render_dirty(&self) -> bool {
        self.render_dirty
    }

    /// Clear the dirty flag once the renderer has consumed it.
    pub fn clear_render_dirty(&mut self) {
        self.render_dirty = false;
    }

    /// Refresh node deformation gradients from committed positions.
    pub(crate) fn refresh_deformation_gradients(&mut self) {
        let offset = self.mesh_particle_count;
        let particles = &self.particles;
        for i in 0..self.nodes.len() {
            let f = self.nodes[i]
                .deformation_gradient(i as u32, |j| particles[offset + j as usize].x);
            self.nodes[i].f = f;
        }
    }

    pub(crate) fn set_render_dirty(&mut self) {
        self.render_dirty = true;
    }
}
