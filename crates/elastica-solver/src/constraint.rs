//! The constraint set and the XPBD projection step.
//!
//! Every constraint kind shares one projection contract: evaluate the
//! scalar C and per-particle gradients from predicted positions, then
//! apply the compliant multiplier update
//!
//!   Δλ = −(C + α̃λ + γ·Σ∇C·(xi−xn)) / ((1+γ)·S + α̃)
//!
//! with α̃ = α/dt², β̃ = β·dt², γ = α̃β̃/dt and S = Σ w‖∇C‖². Projection
//! skips silently when S vanishes or a gradient is non-finite; a
//! degenerate element must never poison the sweep.
//!
//! Dispatch is a closed enum. The sweep is the hottest loop in the
//! solver and an exhaustive match keeps it free of virtual calls.

use elastica_contact::ContactTriangle;
use elastica_material::{ElasticModel, LameParameters};
use elastica_math::{Mat3, Vec3};
use elastica_mechanics::{Particle, SoftBody, Tetrahedron};
use elastica_types::constants::GRADIENT_EPSILON;
use elastica_types::{BodyId, NodeId, ParticleId, Scalar, TetrahedronId};

/// One constraint over particles of a single body.
///
/// Persistent variants live from setup to teardown; the two collision
/// variants are transient, rebuilt every substep. The accumulated
/// Lagrange multiplier lives in a solver-owned vector parallel to the
/// constraint list, not in the constraint itself.
#[derive(Debug, Clone)]
pub enum Constraint {
    /// C = ‖x₁−x₂‖ − L₀ over one mesh edge.
    Distance {
        body: BodyId,
        v1: ParticleId,
        v2: ParticleId,
        rest_length: Scalar,
        alpha: Scalar,
        beta: Scalar,
    },
    /// C = V₀·Ψ(F) over one tetrahedron, F = Ds·Dm⁻¹.
    TetrahedralElastic {
        body: BodyId,
        tet: TetrahedronId,
        lame: LameParameters,
        model: ElasticModel,
        alpha: Scalar,
        beta: Scalar,
    },
    /// C = Vᵢ·Ψ(Fᵢ) over one meshless node and its neighbourhood.
    MeshlessElastic {
        body: BodyId,
        node: NodeId,
        lame: LameParameters,
        model: ElasticModel,
        alpha: Scalar,
        beta: Scalar,
    },
    /// Meshless node constraint that additionally spreads corrections
    /// onto interior mesh vertices of the node's containing tetrahedron.
    HybridElastic {
        body: BodyId,
        node: NodeId,
        lame: LameParameters,
        model: ElasticModel,
        alpha: Scalar,
        beta: Scalar,
    },
    /// Inequality contact C = (x−a)·n on one mesh vertex; active only
    /// while penetrating.
    Collision {
        body: BodyId,
        vertex: ParticleId,
        contact: ContactTriangle,
        alpha: Scalar,
    },
    /// Inequality contact on one embedded surface vertex of a meshless
    /// body; corrections spread over the supporting nodes.
    MeshlessCollision {
        body: BodyId,
        surface_vertex: u32,
        contact: ContactTriangle,
        alpha: Scalar,
    },
}

impl Constraint {
    /// The body this constraint addresses.
    pub fn body(&self) -> BodyId {
        match *self {
            Constraint::Distance { body, .. }
            | Constraint::TetrahedralElastic { body, .. }
            | Constraint::MeshlessElastic { body, .. }
            | Constraint::HybridElastic { body, .. }
            | Constraint::Collision { body, .. }
            | Constraint::MeshlessCollision { body, .. } => body,
        }
    }

    /// Projects the constraint once, mutating predicted positions and the
    /// accumulated multiplier. `dt` is the substep length.
    pub fn project(&self, bodies: &mut [SoftBody], dt: Scalar, lambda: &mut Scalar) {
        match *self {
            Constraint::Distance {
                body,
                v1,
                v2,
                rest_length,
                alpha,
                beta,
            } => {
                let particles = bodies[body.index()].particles_mut();
                let d = particles[v1.index()].xi - particles[v2.index()].xi;
                let len = d.length();
                if len < GRADIENT_EPSILON {
                    return;
                }
                let n = d / len;
                let c = len - rest_length;
                apply_update(
                    particles,
                    c,
                    &[(v1.0, n), (v2.0, -n)],
                    dt,
                    alpha,
                    beta,
                    lambda,
                );
            }

            Constraint::TetrahedralElastic {
                body,
                tet,
                ref lame,
                model,
                alpha,
                beta,
            } => {
                let (t, particles): (Tetrahedron, &mut [Particle]) =
                    match &mut bodies[body.index()] {
                        SoftBody::Tetrahedral(b) => {
                            (b.tetrahedra[tet.index()], b.particles.as_mut_slice())
                        }
                        SoftBody::Hybrid(b) => {
                            (b.tetrahedra[tet.index()], b.particles.as_mut_slice())
                        }
                        SoftBody::Meshless(_) => return,
                    };
                if t.rest_volume <= 0.0 {
                    return;
                }

                let x1 = particles[t.vertices[0] as usize].xi;
                let ds = Mat3::from_cols(
                    particles[t.vertices[1] as usize].xi - x1,
                    particles[t.vertices[2] as usize].xi - x1,
                    particles[t.vertices[3] as usize].xi - x1,
                );
                let f = ds.mul_mat3(&t.dm_inv);
                let es = model.energy_and_stress(&f, lame);
                let c = t.rest_volume * es.energy_density;

                // H = V₀·P·Dm⁻ᵀ; columns are the gradients for vertices
                // 2..4, vertex 1 balances them.
                let h = es.stress.mul_mat3(&t.dm_inv.transpose()) * t.rest_volume;
                let grads = [
                    (t.vertices[0], -(h.x_axis + h.y_axis + h.z_axis)),
                    (t.vertices[1], h.x_axis),
                    (t.vertices[2], h.y_axis),
                    (t.vertices[3], h.z_axis),
                ];
                apply_update(particles, c, &grads, dt, alpha, beta, lambda);
            }

            Constraint::MeshlessElastic {
                body,
                node,
                ref lame,
                model,
                alpha,
                beta,
            } => {
                let SoftBody::Meshless(b) = &mut bodies[body.index()] else {
                    return;
                };
                let ni = node.index();

                let f = {
                    let particles = &b.particles;
                    b.nodes[ni].deformation_gradient(node.0, |j| particles[j as usize].xi)
                };
                b.nodes[ni].f = f;

                let es = model.energy_and_stress(&f, lame);
                let vi = b.nodes[ni].rest_volume;
                let c = vi * es.energy_density;
                let grads = meshless_gradients(&b.nodes[ni], ni, 0, vi, &es.stress);
                apply_update(&mut b.particles, c, &grads, dt, alpha, beta, lambda);
            }

            Constraint::HybridElastic {
                body,
                node,
                ref lame,
                model,
                alpha,
                beta,
            } => {
                let SoftBody::Hybrid(b) = &mut bodies[body.index()] else {
                    return;
                };
                let ni = node.index();
                let offset = b.meshless_offset();

                let f = {
                    let particles = &b.particles;
                    b.nodes[ni]
                        .deformation_gradient(node.0, |j| particles[offset + j as usize].xi)
                };
                b.nodes[ni].f = f;

                let es = model.energy_and_stress(&f, lame);
                let vi = b.nodes[ni].rest_volume;
                let c = vi * es.energy_density;
                let mut grads = meshless_gradients(&b.nodes[ni], ni, offset, vi, &es.stress);

                // Mixed particle: the node sits inside a tetrahedron, so
                // the correction also reaches that tet's interior mesh
                // vertices through the linear shape functions.
                if let Some(ti) = b.node_tet[ni] {
                    let t = &b.tetrahedra[ti as usize];
                    for k in 0..4 {
                        let v = t.vertices[k];
                        if b.boundary_vertex[v as usize] {
                            continue;
                        }
                        grads.push((v, es.stress * t.grad_phi[k] * vi));
                    }
                }
                apply_update(&mut b.particles, c, &grads, dt, alpha, beta, lambda);
            }

            Constraint::Collision {
                body,
                vertex,
                ref contact,
                alpha,
            } => {
                let particles = bodies[body.index()].particles_mut();
                let c = contact.signed_distance(particles[vertex.index()].xi);
                if c >= 0.0 {
                    return;
                }
                apply_update(
                    particles,
                    c,
                    &[(vertex.0, contact.normal)],
                    dt,
                    alpha,
                    0.0,
                    lambda,
                );
            }

            Constraint::MeshlessCollision {
                body,
                surface_vertex,
                ref contact,
                alpha,
            } => {
                let SoftBody::Meshless(b) = &mut bodies[body.index()] else {
                    return;
                };
                let svi = surface_vertex as usize;

                let (c, grads) = {
                    let particles = &b.particles;
                    let sv = &b.surface[svi];
                    let vk = sv.interpolate(&b.nodes, |j| particles[j as usize].xi);
                    let c = contact.signed_distance(vk);
                    if c >= 0.0 {
                        return;
                    }
                    let grads: Vec<(u32, Vec3)> = sv
                        .neighbours
                        .iter()
                        .enumerate()
                        .map(|(a, &j)| (j, contact.normal * (sv.sk * sv.vj[a] * sv.wkj[a])))
                        .collect();
                    (c, grads)
                };
                apply_update(&mut b.particles, c, &grads, dt, alpha, 0.0, lambda);

                // The moved nodes shift the embedded vertex; keep its
                // cached position consistent for the next projection.
                let position = {
                    let particles = &b.particles;
                    b.surface[svi].interpolate(&b.nodes, |j| particles[j as usize].xi)
                };
                b.surface[svi].position = position;
            }
        }
    }
}

/// Per-neighbour gradients of a meshless elastic constraint:
/// ∇Cⱼ = Vᵢ·P·(Vⱼ·Lᵢ·∇Wᵢⱼ) for j ≠ i, with the node's own slot
/// balancing their sum. `offset` maps node indices into the arena.
fn meshless_gradients(
    node: &elastica_mechanics::MeshlessNode,
    ni: usize,
    offset: usize,
    vi: Scalar,
    stress: &Mat3,
) -> Vec<(u32, Vec3)> {
    let mut grads = Vec::with_capacity(node.neighbours.len());
    let mut own = Vec3::ZERO;
    let mut own_slot = usize::MAX;

    for (a, &j) in node.neighbours.iter().enumerate() {
        if j as usize == ni {
            own_slot = grads.len();
            grads.push(((offset + ni) as u32, Vec3::ZERO));
            continue;
        }
        let g = *stress * (node.corrected_grad(a) * (vi * node.vj[a]));
        own -= g;
        grads.push(((offset + j as usize) as u32, g));
    }
    if own_slot != usize::MAX {
        grads[own_slot].1 = own;
    } else {
        grads.push(((offset + ni) as u32, own));
    }
    grads
}

/// The shared XPBD update. No-op when the weighted gradient norm
/// vanishes or any input is non-finite.
fn apply_update(
    particles: &mut [Particle],
    c: Scalar,
    grads: &[(u32, Vec3)],
    dt: Scalar,
    alpha: Scalar,
    beta: Scalar,
    lambda: &mut Scalar,
) {
    if !c.is_finite() {
        return;
    }

    let mut s = 0.0;
    let mut damping_dot = 0.0;
    for &(k, g) in grads {
        if !g.is_finite() {
            return;
        }
        let p = &particles[k as usize];
        s += p.inv_mass() * g.length_squared();
        damping_dot += g.dot(p.xi - p.xn);
    }
    if s < GRADIENT_EPSILON {
        return;
    }

    let alpha_tilde = alpha / (dt * dt);
    let beta_tilde = beta * dt * dt;
    let gamma = alpha_tilde * beta_tilde / dt;

    let dlambda = -(c + alpha_tilde * *lambda + gamma * damping_dot)
        / ((1.0 + gamma) * s + alpha_tilde);
    *lambda += dlambda;

    for &(k, g) in grads {
        let p = &mut particles[k as usize];
        p.xi += g * (p.inv_mass() * dlambda);
    }
}
