//! Integration tests for elastica-math.

use elastica_math::decomposition::{polar_decomposition, symmetric_eigen};
use elastica_math::tensor::{double_contraction, outer, row, trace};
use elastica_math::{Mat3, Vec3};

fn mat_close(a: &Mat3, b: &Mat3, tol: f64) -> bool {
    (a.x_axis - b.x_axis).length() <= tol
        && (a.y_axis - b.y_axis).length() <= tol
        && (a.z_axis - b.z_axis).length() <= tol
}

fn rotation_z(angle: f64) -> Mat3 {
    let (s, c) = angle.sin_cos();
    Mat3::from_cols(
        Vec3::new(c, s, 0.0),
        Vec3::new(-s, c, 0.0),
        Vec3::new(0.0, 0.0, 1.0),
    )
}

// ─── Tensor helpers ─────────────────────────────────────────────

#[test]
fn trace_and_double_contraction() {
    let m = Mat3::from_diagonal(Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(trace(&m), 6.0);
    assert_eq!(double_contraction(&m, &m), 14.0);
}

#[test]
fn outer_product_entries() {
    let m = outer(Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0));
    // (a·bᵀ)ᵣ꜀ = aᵣ·b꜀
    assert_eq!(m.x_axis, Vec3::new(4.0, 8.0, 12.0));
    assert_eq!(row(&m, 0), Vec3::new(4.0, 5.0, 6.0));
}

// ─── Symmetric eigendecomposition ───────────────────────────────

#[test]
fn eigen_reconstructs_symmetric_matrix() {
    let r = rotation_z(0.7);
    let d = Mat3::from_diagonal(Vec3::new(4.0, 1.0, 0.25));
    let m = r.mul_mat3(&d).mul_mat3(&r.transpose());

    let (values, vectors) = symmetric_eigen(&m);
    let rebuilt = vectors
        .mul_mat3(&Mat3::from_diagonal(values))
        .mul_mat3(&vectors.transpose());
    assert!(
        mat_close(&rebuilt, &m, 1.0e-10),
        "V·Σ·Vᵀ must reproduce the input"
    );
}

// ─── Polar decomposition ────────────────────────────────────────

#[test]
fn polar_recovers_pure_rotation() {
    let r = rotation_z(1.1);
    let polar = polar_decomposition(&r);
    assert!(mat_close(&polar.rotation, &r, 1.0e-9));
    assert!(mat_close(&polar.stretch, &Mat3::IDENTITY, 1.0e-9));
}

#[test]
fn polar_recovers_pure_stretch() {
    let s = Mat3::from_diagonal(Vec3::new(2.0, 0.5, 1.0));
    let polar = polar_decomposition(&s);
    assert!(mat_close(&polar.rotation, &Mat3::IDENTITY, 1.0e-9));
    assert!(mat_close(&polar.stretch, &s, 1.0e-9));
}

#[test]
fn polar_splits_rotation_times_stretch() {
    let r = rotation_z(-0.4);
    let s = Mat3::from_diagonal(Vec3::new(1.5, 0.8, 1.2));
    let f = r.mul_mat3(&s);

    let polar = polar_decomposition(&f);
    assert!(mat_close(&polar.rotation, &r, 1.0e-9));
    let rebuilt = polar.rotation.mul_mat3(&polar.stretch);
    assert!(mat_close(&rebuilt, &f, 1.0e-9), "R·S must reproduce F");
}

#[test]
fn degenerate_gradient_falls_back_to_identity() {
    let polar = polar_decomposition(&Mat3::ZERO);
    assert!(mat_close(&polar.rotation, &Mat3::IDENTITY, 0.0));
    assert!(mat_close(&polar.stretch, &Mat3::ZERO, 0.0));
}

#[test]
fn rank_deficient_gradient_stays_finite() {
    // One collapsed axis.
    let f = Mat3::from_diagonal(Vec3::new(1.0, 1.0, 0.0));
    let polar = polar_decomposition(&f);
    assert!(elastica_math::tensor::is_finite_mat(&polar.rotation));
    assert!(elastica_math::tensor::is_finite_mat(&polar.stretch));
}
