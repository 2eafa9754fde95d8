//! Integration tests for elastica-mechanics.

use elastica_math::{Mat3, Vec3};
use elastica_mechanics::{
    generators, HybridBody, MeshlessBody, Particle, Poly6Kernel, SoftBody, TetrahedralBody,
    Tetrahedron,
};

fn mat_close(a: &Mat3, b: &Mat3, tol: f64) -> bool {
    (a.x_axis - b.x_axis).length() < tol
        && (a.y_axis - b.y_axis).length() < tol
        && (a.z_axis - b.z_axis).length() < tol
}

fn unit_tet_body() -> TetrahedralBody {
    let (positions, tets) = generators::single_tetrahedron();
    TetrahedralBody::new(&positions, &tets, 1.0).unwrap()
}

// ─── Tetrahedra ─────────────────────────────────────────────────

#[test]
fn unit_tetrahedron_rest_caches() {
    let body = unit_tet_body();
    let t = &body.tetrahedra[0];
    assert!((t.rest_volume - 1.0 / 6.0).abs() < 1.0e-12);

    // At rest, Ds = Dm so F = Ds·Dm⁻¹ = I.
    let positions = generators::single_tetrahedron().0;
    let x1 = positions[0];
    let ds = Mat3::from_cols(positions[1] - x1, positions[2] - x1, positions[3] - x1);
    let f = ds.mul_mat3(&t.dm_inv);
    assert!(mat_close(&f, &Mat3::IDENTITY, 1.0e-12));

    // Shape-function gradients sum to zero.
    let sum = t.grad_phi[0] + t.grad_phi[1] + t.grad_phi[2] + t.grad_phi[3];
    assert!(sum.length() < 1.0e-12);
}

#[test]
fn degenerate_tetrahedron_gets_zeroed_caches() {
    // All four vertices coplanar.
    let positions = vec![
        Vec3::ZERO,
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(1.0, 1.0, 0.0),
    ];
    let t = Tetrahedron::from_rest_positions([0, 1, 2, 3], &positions);
    assert_eq!(t.rest_volume, 0.0);
    assert_eq!(t.grad_phi[0], Vec3::ZERO);
}

#[test]
fn single_tet_has_six_edges_and_four_surface_faces() {
    let body = unit_tet_body();
    assert_eq!(body.edges.len(), 6);
    assert_eq!(body.surface.len(), 4);
    for e in &body.edges {
        assert!(e.v1 < e.v2, "edges are stored with ordered endpoints");
        assert!(e.rest_length > 0.0);
    }
}

#[test]
fn beam_generator_produces_positive_conforming_volumes() {
    let (positions, tets) = generators::beam(2, 1, 1, 0.5);
    assert_eq!(positions.len(), 3 * 2 * 2);
    assert_eq!(tets.len(), 2 * 6);

    let cell = 0.5_f64.powi(3);
    let mut total = 0.0;
    for &vs in &tets {
        let t = Tetrahedron::from_rest_positions(vs, &positions);
        assert!(t.rest_volume > 0.0, "degenerate tet in beam: {vs:?}");
        total += t.rest_volume;
    }
    // Six tets tile each cell exactly.
    assert!((total - 2.0 * cell).abs() < 1.0e-12);
}

#[test]
fn body_rejects_out_of_range_indices_and_bad_mass() {
    let positions = vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z];
    assert!(TetrahedralBody::new(&positions, &[[0, 1, 2, 9]], 1.0).is_err());
    assert!(TetrahedralBody::new(&positions, &[[0, 1, 2, 3]], 0.0).is_err());
}

// ─── Meshless nodes ─────────────────────────────────────────────

fn node_block() -> (Vec<Vec3>, Vec<f64>, f64) {
    let (positions, volumes) = generators::node_grid(3, 3, 3, 0.1);
    (positions, volumes, 0.22)
}

#[test]
fn kernel_is_normalized_enough_and_compact() {
    let kernel = Poly6Kernel::new(0.2);
    assert!(kernel.w(Vec3::ZERO) > 0.0);
    assert_eq!(kernel.w(Vec3::new(0.3, 0.0, 0.0)), 0.0);
    assert_eq!(kernel.grad_w(Vec3::new(0.3, 0.0, 0.0)), Vec3::ZERO);
    // The kernel decays with distance, so ∇W points back towards xj.
    let g = kernel.grad_w(Vec3::new(0.1, 0.0, 0.0));
    assert!(g.x < 0.0);
}

#[test]
fn corrected_gradient_reproduces_identity_at_rest() {
    let (positions, volumes, h) = node_block();
    let body = MeshlessBody::new(&positions, &volumes, &[], h, 1.0).unwrap();

    // The correction matrix makes the gradient operator first-order
    // consistent: F at the rest configuration is the identity.
    for (i, node) in body.nodes.iter().enumerate() {
        let f = node.deformation_gradient(i as u32, |j| positions[j as usize]);
        assert!(
            mat_close(&f, &Mat3::IDENTITY, 1.0e-9),
            "node {i}: F(rest) = {f:?}"
        );
    }
}

#[test]
fn deformation_gradient_tracks_uniform_stretch() {
    let (positions, volumes, h) = node_block();
    let body = MeshlessBody::new(&positions, &volumes, &[], h, 1.0).unwrap();

    let stretch = Mat3::from_diagonal(Vec3::new(1.1, 1.0, 0.9));
    let center = 13; // interior node of the 3x3x3 grid
    let f = body.nodes[center]
        .deformation_gradient(center as u32, |j| stretch * positions[j as usize]);
    assert!(
        mat_close(&f, &stretch, 1.0e-9),
        "affine deformation must be reproduced exactly, got {f:?}"
    );
}

#[test]
fn surface_vertex_interpolates_to_rest_position_at_rest() {
    let (positions, volumes, h) = node_block();
    let surface = vec![positions[0], positions[26] + Vec3::new(0.03, 0.0, 0.0)];
    let body = MeshlessBody::new(&positions, &volumes, &surface, h, 1.0).unwrap();

    for (k, sv) in body.surface.iter().enumerate() {
        let v = sv.interpolate(&body.nodes, |j| positions[j as usize]);
        assert!(
            (v - sv.rest_position).length() < 1.0e-9,
            "vertex {k} drifted at rest: {v:?}"
        );
    }
}

#[test]
fn meshless_body_rejects_mismatched_inputs() {
    let (positions, mut volumes, h) = node_block();
    volumes.pop();
    assert!(MeshlessBody::new(&positions, &volumes, &[], h, 1.0).is_err());
    let (positions, volumes, _) = node_block();
    assert!(MeshlessBody::new(&positions, &volumes, &[], 0.0, 1.0).is_err());
    assert!(MeshlessBody::new(&[], &[], &[], h, 1.0).is_err());
}

// ─── Hybrid bodies ──────────────────────────────────────────────

#[test]
fn hybrid_arena_layout_and_mixed_nodes() {
    let (mesh_positions, tets) = generators::beam(2, 2, 2, 0.5);
    // Cell-center samples all fall inside the mesh.
    let node_positions: Vec<Vec3> = (0..2)
        .flat_map(|z| {
            (0..2).flat_map(move |y| {
                (0..2).map(move |x| {
                    Vec3::new(
                        0.25 + 0.5 * x as f64,
                        0.25 + 0.5 * y as f64,
                        0.25 + 0.5 * z as f64,
                    )
                })
            })
        })
        .collect();
    let volumes = vec![0.125; node_positions.len()];

    let body = HybridBody::new(&mesh_positions, &tets, &node_positions, &volumes, 0.6, 1.0)
        .unwrap();

    assert_eq!(body.meshless_offset(), mesh_positions.len());
    assert_eq!(
        body.particles.len(),
        mesh_positions.len() + node_positions.len()
    );
    for ni in 0..node_positions.len() {
        assert!(
            body.is_mixed_node(ni),
            "cell-center node {ni} must sit inside a tetrahedron"
        );
    }
}

// ─── SoftBody dispatch ──────────────────────────────────────────

#[test]
fn fixed_particles_have_zero_inverse_mass() {
    let mut body = SoftBody::Tetrahedral(unit_tet_body());
    body.particles_mut()[2].fix();
    assert!(body.particles()[2].is_fixed());
    assert_eq!(body.particles()[2].inv_mass(), 0.0);
    assert!(body.particles()[0].inv_mass() > 0.0);

    let anchor = Particle::fixed_at(Vec3::new(0.0, 2.0, 0.0));
    assert!(anchor.is_fixed());
    assert_eq!(anchor.inv_mass(), 0.0);
}

#[test]
fn render_dirty_flag_round_trip() {
    let mut body = SoftBody::Tetrahedral(unit_tet_body());
    body.mark_render_dirty();
    let SoftBody::Tetrahedral(b) = &mut body else {
        unreachable!()
    };
    assert!(b.is_render_dirty());
    b.clear_render_dirty();
    assert!(!b.is_render_dirty());
}
