/// Rigid rotation of the sector grid
use nalgebra::{Matrix4, Vector3};
use std::f64::consts::TAU;

/// Default per-tick spin increment: 15 degrees.
pub const DEFAULT_SPIN_STEP: f64 = std::f64::consts::PI / 12.0;

/// Cosine of the fixed 45 degree viewing tilt, kept at the truncated
/// value rather than 1/sqrt(2).
pub const TILT_COS: f64 = 0.7071;
/// Sine of the fixed 45 degree viewing tilt, same truncation.
pub const TILT_SIN: f64 = 0.7071;

/// Spin angle around the Z axis, always normalized to [0, 2π).
#[derive(Debug, Clone, Copy)]
pub struct SpinState {
    angle: f64,
}

impl SpinState {
    pub fn new(angle: f64) -> Self {
        Self {
            angle: angle.rem_euclid(TAU),
        }
    }

    pub fn zero() -> Self {
        Self { angle: 0.0 }
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Advance by `step` radians and wrap back into [0, 2π).
    pub fn advance(&mut self, step: f64) {
        self.angle = (self.angle + step).rem_euclid(TAU);
    }
}

impl Default for SpinState {
    fn default() -> Self {
        Self::zero()
    }
}

/// Transform builder for the per-frame rigid rotation
pub struct Transform;

impl Transform {
    /// Rotation about the Z axis by `angle`: the spin itself.
    pub fn z_rotation(angle: f64) -> Matrix4<f64> {
        Matrix4::new_rotation(Vector3::new(0.0, 0.0, angle))
    }

    /// The fixed 45 degree tilt about the Y axis:
    /// x' = x·cos45 − z·sin45, y' = y, z' = z·cos45 + x·sin45.
    #[rustfmt::skip]
    pub fn tilt() -> Matrix4<f64> {
        Matrix4::new(
            TILT_COS, 0.0, -TILT_SIN, 0.0,
            0.0,      1.0,  0.0,      0.0,
            TILT_SIN, 0.0,  TILT_COS, 0.0,
            0.0,      0.0,  0.0,      1.0,
        )
    }

    /// The complete per-frame transform: spin about Z, then tilt.
    /// Applied to the rest pose each frame; the tilt enters exactly once.
    pub fn spin(angle: f64) -> Matrix4<f64> {
        Self::tilt() * Self::z_rotation(angle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{SectorGrid, SectorSpec};

    const EPS: f64 = 1e-9;

    #[test]
    fn test_spin_state_wraps() {
        let mut state = SpinState::zero();
        for _ in 0..24 {
            state.advance(DEFAULT_SPIN_STEP);
            assert!(state.angle() >= 0.0 && state.angle() < TAU);
        }
        // 24 steps of 15 degrees is a full turn, modulo float drift.
        let distance = state.angle().min(TAU - state.angle());
        assert!(distance < EPS, "angle did not return to start: {}", state.angle());
    }

    #[test]
    fn test_spin_state_negative_step_wraps() {
        let mut state = SpinState::zero();
        state.advance(-DEFAULT_SPIN_STEP);
        assert!(state.angle() >= 0.0 && state.angle() < TAU);
        assert!((state.angle() - (TAU - DEFAULT_SPIN_STEP)).abs() < EPS);
    }

    #[test]
    fn test_z_rotation_quarter_turn() {
        let m = Transform::z_rotation(std::f64::consts::FRAC_PI_2);
        let p = m.transform_point(&nalgebra::Point3::new(1.0, 0.0, 0.0));
        assert!(p.x.abs() < EPS);
        assert!((p.y - 1.0).abs() < EPS);
        assert!(p.z.abs() < EPS);
    }

    #[test]
    fn test_identity_spin_is_tilt_only() {
        let spin = Transform::spin(0.0);
        let tilt = Transform::tilt();
        assert!((spin - tilt).norm() < EPS);
    }

    #[test]
    fn test_spin_matches_componentwise_formulas() {
        let grid = SectorGrid::generate(SectorSpec::default());
        let angle = DEFAULT_SPIN_STEP;
        let m = Transform::spin(angle);
        let (sin_a, cos_a) = angle.sin_cos();
        for p in grid.points() {
            let rx = p.x * cos_a - p.y * sin_a;
            let ry = p.x * sin_a + p.y * cos_a;
            let tx = rx * TILT_COS - p.z * TILT_SIN;
            let tz = p.z * TILT_COS + rx * TILT_SIN;

            let out = m.transform_point(p);
            assert!((out.x - tx).abs() < EPS);
            assert!((out.y - ry).abs() < EPS);
            assert!((out.z - tz).abs() < EPS);
        }
    }

    #[test]
    fn test_identity_spin_reproduces_tilted_rest_pose() {
        // Spinning by zero must leave only the fixed tilt applied to the
        // generated grid.
        let grid = SectorGrid::generate(SectorSpec::default());
        let m = Transform::spin(0.0);
        for p in grid.points() {
            let out = m.transform_point(p);
            assert!((out.x - (p.x * TILT_COS - p.z * TILT_SIN)).abs() < EPS);
            assert!((out.y - p.y).abs() < EPS);
            assert!((out.z - (p.z * TILT_COS + p.x * TILT_SIN)).abs() < EPS);
        }
    }
}
