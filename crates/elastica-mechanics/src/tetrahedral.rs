//! Tetrahedral mesh body.
//!
//! Owns the particle arena plus topology: tetrahedra with precomputed
//! rest-shape caches (inverse rest-edge matrix, rest volume, linear
//! shape-function gradients), the unique edge set used by distance
//! constraints, and the boundary surface triangles that back the visual
//! and collision representations.

use std::collections::HashMap;

use elastica_math::{Mat3, Vec3};
use elastica_types::constants::GEOMETRIC_EPSILON;
use elastica_types::{ElasticaError, ElasticaResult, Scalar};

use crate::particle::Particle;

/// One tetrahedron with its rest-state caches.
#[derive(Debug, Clone, Copy)]
pub struct Tetrahedron {
    /// The four particle indices.
    pub vertices: [u32; 4],
    /// Rest volume V₀ = |det Dm| / 6.
    pub rest_volume: Scalar,
    /// Inverse rest-edge matrix Dm⁻¹ where Dm = [X₂−X₁, X₃−X₁, X₄−X₁].
    /// Zero for degenerate (collapsed) tetrahedra.
    pub dm_inv: Mat3,
    /// Gradients of the linear shape functions ∇φᵢ, one per vertex.
    /// ∇φᵢ for i = 1..3 are the rows of Dm⁻¹; ∇φ₀ = −Σᵢ∇φᵢ.
    pub grad_phi: [Vec3; 4],
}

impl Tetrahedron {
    /// Builds the rest caches from rest positions.
    ///
    /// Degenerate tetrahedra (near-zero rest volume) get zeroed caches;
    /// downstream constraints then see vanishing gradients and skip.
    pub fn from_rest_positions(vertices: [u32; 4], positions: &[Vec3]) -> Self {
        let x1 = positions[vertices[0] as usize];
        let dm = Mat3::from_cols(
            positions[vertices[1] as usize] - x1,
            positions[vertices[2] as usize] - x1,
            positions[vertices[3] as usize] - x1,
        );

        let det = dm.determinant();
        if det.abs() < GEOMETRIC_EPSILON {
            return Self {
                vertices,
                rest_volume: 0.0,
                dm_inv: Mat3::ZERO,
                grad_phi: [Vec3::ZERO; 4],
            };
        }

        let dm_inv = dm.inverse();
        let dm_inv_t = dm_inv.transpose();
        // Columns of Dm⁻ᵀ are the rows of Dm⁻¹, i.e. ∇φ₁..∇φ₃.
        let g1 = dm_inv_t.x_axis;
        let g2 = dm_inv_t.y_axis;
        let g3 = dm_inv_t.z_axis;

        Self {
            vertices,
            rest_volume: det.abs() / 6.0,
            dm_inv,
            grad_phi: [-(g1 + g2 + g3), g1, g2, g3],
        }
    }

    /// Barycentric-style inside test against the rest configuration.
    pub fn contains_rest_point(&self, positions: &[Vec3], p: Vec3) -> bool {
        if self.rest_volume <= 0.0 {
            return false;
        }
        let c = self.dm_inv * (p - positions[self.vertices[0] as usize]);
        let tol = 1.0e-9;
        c.x >= -tol && c.y >= -tol && c.z >= -tol && c.x + c.y + c.z <= 1.0 + tol
    }
}

/// A unique mesh edge with its rest length.
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    /// First particle index (always < `v2`).
    pub v1: u32,
    /// Second particle index.
    pub v2: u32,
    /// Rest length at setup.
    pub rest_length: Scalar,
}

/// Tetrahedral soft body.
#[derive(Debug, Clone)]
pub struct TetrahedralBody {
    /// Particle arena. Constraints address into this by index.
    pub particles: Vec<Particle>,
    /// Tetrahedra with rest caches.
    pub tetrahedra: Vec<Tetrahedron>,
    /// Unique edges, for distance constraints.
    pub edges: Vec<Edge>,
    /// Boundary surface triangles (faces belonging to exactly one tet).
    pub surface: Vec<[u32; 3]>,
    /// Surface vertex positions mirrored for the renderer.
    visual_positions: Vec<Vec3>,
    /// Particle positions mirrored for the collision detector.
    collision_positions: Vec<Vec3>,
    render_dirty: bool,
}

impl TetrahedralBody {
    /// Builds a body from rest positions and tetrahedron indices.
    pub fn new(
        positions: &[Vec3],
        tetrahedra: &[[u32; 4]],
        particle_mass: Scalar,
    ) -> ElasticaResult<Self> {
        if !(particle_mass > 0.0) {
            return Err(ElasticaError::InvalidBody(format!(
                "particle mass must be positive, got {particle_mass}"
            )));
        }
        let n = positions.len() as u32;
        for tet in tetrahedra {
            for &v in tet {
                if v >= n {
                    return Err(ElasticaError::InvalidBody(format!(
                        "tetrahedron vertex {v} out of range (particle count {n})"
                    )));
                }
            }
        }

        let particles: Vec<Particle> = positions
            .iter()
            .map(|&p| Particle::new(p, particle_mass))
            .collect();

        let tets: Vec<Tetrahedron> = tetrahedra
            .iter()
            .map(|&vs| Tetrahedron::from_rest_positions(vs, positions))
            .collect();

        let edges = extract_edges(tetrahedra, positions);
        let surface = extract_surface(tetrahedra);

        Ok(Self {
            particles,
            tetrahedra: tets,
            edges,
            surface,
            visual_positions: positions.to_vec(),
            collision_positions: positions.to_vec(),
            render_dirty: false,
        })
    }

    /// Pin a particle in place.
    pub fn fix_particle(&mut self, index: usize) {
        self.particles[index].fix();
    }

    /// Positions mirrored for rendering.
    pub fn visual_positions(&self) -> &[Vec3] {
        &self.visual_positions
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

    pub(crate) fn refresh_visual(&mut self) {
        for (mirror, p) in self.visual_positions.iter_mut().zip(&self.particles) {
            *mirror = p.x;
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

/// Unique edges over all tetrahedra, with rest lengths.
fn extract_edges(tetrahedra: &[[u32; 4]], positions: &[Vec3]) -> Vec<Edge> {
    const PAIRS: [(usize, usize); 6] = [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];
    let mut seen: HashMap<(u32, u32), ()> = HashMap::new();
    let mut edges = Vec::new();
    for tet in tetrahedra {
        for &(a, b) in &PAIRS {
            let (lo, hi) = if tet[a] < tet[b] {
                (tet[a], tet[b])
            } else {
                (tet[b], tet[a])
            };
            if seen.insert((lo, hi), ()).is_none() {
                let rest_length =
                    (positions[hi as usize] - positions[lo as usize]).length();
                edges.push(Edge {
                    v1: lo,
                    v2: hi,
                    rest_length,
                });
            }
        }
    }
    edges
}

/// Per-vertex boundary flags: vertices touched by a face that belongs to
/// exactly one tetrahedron.
pub(crate) fn extract_boundary_vertices(
    tetrahedra: &[[u32; 4]],
    vertex_count: usize,
) -> Vec<bool> {
    let mut boundary = vec![false; vertex_count];
    for tri in extract_surface(tetrahedra) {
        for v in tri {
            boundary[v as usize] = true;
        }
    }
    boundary
}

/// Boundary faces: triangles belonging to exactly one tetrahedron.
fn extract_surface(tetrahedra: &[[u32; 4]]) -> Vec<[u32; 3]> {
    const FACES: [[usize; 3]; 4] = [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]];
    let mut counts: HashMap<[u32; 3], ([u32; 3], u32)> = HashMap::new();
    for tet in tetrahedra {
        for face in &FACES {
            let tri = [tet[face[0]], tet[face[1]], tet[face[2]]];
            let mut key = tri;
            key.sort_unstable();
            counts
                .entry(key)
                .and_modify(|(_, c)| *c += 1)
                .or_insert((tri, 1));
        }
    }
    counts
        .into_values()
        .filter_map(|(tri, c)| (c == 1).then_some(tri))
        .collect()
}
