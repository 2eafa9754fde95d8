//! Transient collision constraint generation.
//!
//! Runs once per substep, after integration: the detector is queried
//! against predicted positions and every penetrating vertex of a reported
//! intersection becomes a transient inequality constraint. A claimed-flag
//! bitmap caps the constraints at one per vertex per substep, so
//! overlapping tetrahedra cannot stack corrections on a shared vertex.
//! The constraints are discarded after the substep's sweeps.

use elastica_contact::CollisionDetector;
use elastica_math::Vec3;
use elastica_mechanics::SoftBody;
use elastica_types::{BodyId, ParticleId, Scalar};

use crate::constraint::Constraint;

/// Generates this substep's collision constraints from predicted
/// positions.
pub fn generate_collision_constraints(
    bodies: &[SoftBody],
    detector: &dyn CollisionDetector,
    collision_compliance: Scalar,
) -> Vec<Constraint> {
    let mut constraints = Vec::new();

    for (bi, body) in bodies.iter().enumerate() {
        match body {
            SoftBody::Tetrahedral(b) => {
                let positions: Vec<Vec3> = b.particles.iter().map(|p| p.xi).collect();
                let tets: Vec<[u32; 4]> = b.tetrahedra.iter().map(|t| t.vertices).collect();
                claim_tetrahedron_contacts(
                    BodyId(bi as u32),
                    &positions,
                    &tets,
                    detector,
                    collision_compliance,
                    &mut constraints,
                );
            }
            SoftBody::Hybrid(b) => {
                let positions: Vec<Vec3> = b.particles.iter().map(|p| p.xi).collect();
                let tets: Vec<[u32; 4]> = b.tetrahedra.iter().map(|t| t.vertices).collect();
                claim_tetrahedron_contacts(
                    BodyId(bi as u32),
                    &positions,
                    &tets,
                    detector,
                    collision_compliance,
                    &mut constraints,
                );
            }
            SoftBody::Meshless(b) => {
                // Contacts act on the embedded surface, interpolated from
                // predicted node positions through the cached gradients.
                let particles = &b.particles;
                let surface_positions: Vec<Vec3> = b
                    .surface
                    .iter()
                    .map(|sv| sv.interpolate(&b.nodes, |j| particles[j as usize].xi))
                    .collect();
                for contact in detector.intersect_points(&surface_positions) {
                    constraints.push(Constraint::MeshlessCollision {
                        body: BodyId(bi as u32),
                        surface_vertex: contact.point,
                        contact: contact.triangle,
                        alpha: collision_compliance,
                    });
                }
            }
        }
    }

    constraints
}

/// One collision constraint per penetrating vertex of each intersecting
/// tetrahedron. A vertex above the contact surface is skipped *without*
/// being claimed, so a later contact the vertex actually penetrates can
/// still claim it; among penetrating contacts, first wins.
fn claim_tetrahedron_contacts(
    body: BodyId,
    positions: &[Vec3],
    tetrahedra: &[[u32; 4]],
    detector: &dyn CollisionDetector,
    collision_compliance: Scalar,
    out: &mut Vec<Constraint>,
) {
    let mut claimed = vec![false; positions.len()];
    for contact in detector.intersect_tetrahedra(positions, tetrahedra) {
        for &v in &tetrahedra[contact.tetrahedron as usize] {
            if claimed[v as usize] {
                continue;
            }
            if contact.triangle.signed_distance(positions[v as usize]) >= 0.0 {
                continue;
            }
            claimed[v as usize] = true;
            out.push(Constraint::Collision {
                body,
                vertex: ParticleId(v),
                contact: contact.triangle,
                alpha: collision_compliance,
            });
        }
    }
}
