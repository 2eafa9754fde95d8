//! Integration tests for elastica-material.

use elastica_material::strain::{green_strain, small_strain, strain_energy_density};
use elastica_material::{ElasticModel, LameParameters, MaterialParams};
use elastica_math::tensor::is_finite_mat;
use elastica_math::{Mat3, Vec3};

fn lame() -> LameParameters {
    LameParameters::from_young_poisson(1.0e4, 0.3).unwrap()
}

fn mat_norm(m: &Mat3) -> f64 {
    (m.x_axis.length_squared() + m.y_axis.length_squared() + m.z_axis.length_squared()).sqrt()
}

fn rotation_z(angle: f64) -> Mat3 {
    let (s, c) = angle.sin_cos();
    Mat3::from_cols(
        Vec3::new(c, s, 0.0),
        Vec3::new(-s, c, 0.0),
        Vec3::new(0.0, 0.0, 1.0),
    )
}

// ─── Parameter validation ───────────────────────────────────────

#[test]
fn lame_from_engineering_constants() {
    let l = lame();
    // μ = Y/(2(1+ν)) and λ = Yν/((1+ν)(1−2ν)) at Y = 1e4, ν = 0.3.
    assert!((l.mu - 3846.1538).abs() < 1.0e-3, "mu = {}", l.mu);
    assert!((l.lambda - 5769.2308).abs() < 1.0e-3, "lambda = {}", l.lambda);
}

#[test]
fn rejects_out_of_range_constants() {
    assert!(LameParameters::from_young_poisson(0.0, 0.3).is_err());
    assert!(LameParameters::from_young_poisson(-1.0, 0.3).is_err());
    assert!(
        LameParameters::from_young_poisson(1.0e4, 0.5).is_err(),
        "the incompressible limit must be rejected"
    );
    assert!(LameParameters::from_young_poisson(1.0e4, -1.0).is_err());
    assert!(LameParameters::from_young_poisson(1.0e4, 0.499).is_ok());
}

#[test]
fn hooke_material_validation() {
    assert!(MaterialParams::Hooke { stiffness: 50.0 }.validate().is_ok());
    assert!(MaterialParams::Hooke { stiffness: 0.0 }.validate().is_err());
    assert!(
        MaterialParams::Hooke { stiffness: 50.0 }.lame().is_err(),
        "a spring coefficient has no Lamé parameters"
    );
}

// ─── Strain measures ────────────────────────────────────────────

#[test]
fn undeformed_state_has_zero_strain_and_energy() {
    let e = green_strain(&Mat3::IDENTITY);
    assert!(mat_norm(&e) < 1.0e-14, "E(I) must vanish");
    assert!(strain_energy_density(&e, &lame()).abs() < 1.0e-14);

    let es = ElasticModel::StVenantKirchhoff.energy_and_stress(&Mat3::IDENTITY, &lame());
    assert!(es.energy_density.abs() < 1.0e-14);
    assert!(mat_norm(&es.stress) < 1.0e-10, "P(I) must vanish");
}

#[test]
fn green_strain_is_rotation_invariant() {
    let f = Mat3::from_diagonal(Vec3::new(1.2, 0.9, 1.0));
    let rf = rotation_z(0.8).mul_mat3(&f);
    let e = green_strain(&f);
    let er = green_strain(&rf);
    assert!(
        mat_norm(&(e - er)) < 1.0e-10,
        "rigid rotation must not change the Green strain"
    );
}

#[test]
fn small_strain_vanishes_under_pure_rotation() {
    let (e, polar) = small_strain(&rotation_z(0.6));
    assert!(mat_norm(&e) < 1.0e-9);
    assert!(mat_norm(&(polar.stretch - Mat3::IDENTITY)) < 1.0e-9);
}

// ─── Stress formulas ────────────────────────────────────────────

#[test]
fn stvk_uniaxial_stretch_resists_extension() {
    let f = Mat3::from_diagonal(Vec3::new(1.1, 1.0, 1.0));
    let es = ElasticModel::StVenantKirchhoff.energy_and_stress(&f, &lame());
    assert!(es.energy_density > 0.0);
    // Stretched along x: the stress must pull back along x.
    assert!(es.stress.x_axis.x > 0.0);
}

#[test]
fn corotational_ignores_rigid_rotation() {
    let r = rotation_z(1.3);
    let es = ElasticModel::Corotational.energy_and_stress(&r, &lame());
    assert!(
        es.energy_density.abs() < 1.0e-9,
        "pure rotation stores no energy, got {}",
        es.energy_density
    );
    assert!(mat_norm(&es.stress) < 1.0e-6);
}

#[test]
fn corotational_and_stvk_agree_for_small_strains() {
    let f = Mat3::from_diagonal(Vec3::new(1.001, 1.0, 1.0));
    let l = lame();
    let stvk = ElasticModel::StVenantKirchhoff.energy_and_stress(&f, &l);
    let coro = ElasticModel::Corotational.energy_and_stress(&f, &l);
    let rel = (stvk.energy_density - coro.energy_density).abs()
        / stvk.energy_density.max(1.0e-30);
    assert!(rel < 1.0e-2, "relative energy gap {rel}");
}

#[test]
fn collapsed_gradient_stays_finite() {
    for model in [ElasticModel::StVenantKirchhoff, ElasticModel::Corotational] {
        let es = model.energy_and_stress(&Mat3::ZERO, &lame());
        assert!(es.energy_density.is_finite(), "{} energy", model.name());
        assert!(is_finite_mat(&es.stress), "{} stress", model.name());
    }
}
