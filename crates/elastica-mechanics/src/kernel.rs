//! Poly6 smoothing kernel for the meshless (SPH-like) interpolation.

use elastica_math::Vec3;
use elastica_types::Scalar;
use std::f64::consts::PI;

/// Poly6 kernel with compact support radius `h`.
///
/// W(r, h) = 315/(64πh⁹) · (h² − r²)³ for r ≤ h, zero outside.
#[derive(Debug, Clone, Copy)]
pub struct Poly6Kernel {
    h: Scalar,
    h2: Scalar,
    w_factor: Scalar,
    grad_factor: Scalar,
}

impl Poly6Kernel {
    /// Creates a kernel with the given support radius.
    pub fn new(h: Scalar) -> Self {
        let h9 = h.powi(9);
        Self {
            h,
            h2: h * h,
            w_factor: 315.0 / (64.0 * PI * h9),
            grad_factor: -945.0 / (32.0 * PI * h9),
        }
    }

    /// Support radius.
    #[inline]
    pub fn h(&self) -> Scalar {
        self.h
    }

    /// Kernel value for the offset xi − xj.
    #[inline]
    pub fn w(&self, d: Vec3) -> Scalar {
        let r2 = d.length_squared();
        if r2 > self.h2 {
            return 0.0;
        }
        let q = self.h2 - r2;
        self.w_factor * q * q * q
    }

    /// Kernel gradient with respect to xi, for the offset d = xi − xj.
    ///
    /// ∇W = −945/(32πh⁹) · (h² − ‖d‖²)² · d, zero outside the support.
    #[inline]
    pub fn grad_w(&self, d: Vec3) -> Vec3 {
        let r2 = d.length_squared();
        if r2 > self.h2 {
            return Vec3::ZERO;
        }
        let q = self.h2 - r2;
        d * (self.grad_factor * q * q)
    }
}
