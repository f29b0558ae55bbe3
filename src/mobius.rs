//! Möbius strip geometry
//!
//! The playfield is a one-sided strip: the initial segment x = R,
//! y in [-w, w], z = 0 swept around the x-z circle while twisting 180
//! degrees over one full traversal. A fixed lateral coordinate v therefore
//! lands on the opposite physical side of the strip after each loop, which
//! is what drives the catch-side sign and the delayed polarity flip in the
//! simulation.

use glam::{EulerRot, Quat, Vec3};

use crate::config::MobiusConfig;
use crate::lerp;

/// Orthonormal surface frame at a point on the strip
#[derive(Debug, Clone, Copy)]
pub struct MobiusFrame {
    pub point: Vec3,
    pub tangent_u: Vec3,
    pub tangent_v: Vec3,
    pub normal: Vec3,
}

/// Parametric strip surface; captures its configuration at construction
#[derive(Debug, Clone)]
pub struct Mobius {
    radius: f32,
    half_width: f32,
    u_offset: f32,
    lane_count: u32,
    world_rotation: Quat,
}

impl Mobius {
    pub fn new(config: &MobiusConfig) -> Self {
        Self {
            radius: config.radius,
            half_width: config.half_width,
            u_offset: config.u_offset,
            lane_count: config.lane_count.max(2),
            world_rotation: Quat::from_euler(
                EulerRot::XYZ,
                config.pitch,
                config.yaw_tilt,
                config.roll,
            ),
        }
    }

    /// Surface point in strip-local coordinates
    pub fn point(&self, u: f32, v: f32) -> Vec3 {
        let offset_u = u + self.u_offset;
        let half_u = offset_u * 0.5;
        let cos_u = offset_u.cos();
        let sin_u = offset_u.sin();
        let cos_half = half_u.cos();
        let sin_half = half_u.sin();

        Vec3::new(
            self.radius * cos_u - v * cos_u * sin_half,
            v * cos_half,
            self.radius * sin_u - v * sin_u * sin_half,
        )
    }

    /// Surface point with the configured world orientation applied
    pub fn world_point(&self, u: f32, v: f32) -> Vec3 {
        self.world_rotation * self.point(u, v)
    }

    /// Surface point plus an orthonormal tangent/normal frame
    pub fn frame(&self, u: f32, v: f32) -> MobiusFrame {
        let offset_u = u + self.u_offset;
        let half_u = offset_u * 0.5;
        let cos_u = offset_u.cos();
        let sin_u = offset_u.sin();
        let cos_half = half_u.cos();
        let sin_half = half_u.sin();

        let point = Vec3::new(
            self.radius * cos_u - v * cos_u * sin_half,
            v * cos_half,
            self.radius * sin_u - v * sin_u * sin_half,
        );

        let tangent_u = Vec3::new(
            -self.radius * sin_u + v * sin_u * sin_half - 0.5 * v * cos_u * cos_half,
            -0.5 * v * sin_half,
            self.radius * cos_u - v * cos_u * sin_half - 0.5 * v * sin_u * cos_half,
        )
        .normalize();

        let tangent_v = Vec3::new(-cos_u * sin_half, cos_half, -sin_u * sin_half).normalize();

        let normal = tangent_u.cross(tangent_v).normalize();

        MobiusFrame {
            point,
            tangent_u,
            tangent_v,
            normal,
        }
    }

    /// Map a (possibly fractional) lane index to a lateral offset.
    /// Input is clamped to the lane range.
    pub fn lane_to_v(&self, lane: f32) -> f32 {
        let t = (lane / (self.lane_count - 1) as f32).clamp(0.0, 1.0);
        lerp(-self.half_width, self.half_width, t)
    }

    /// Inverse of `lane_to_v`; unclamped, so off-strip offsets map to
    /// out-of-range fractional lanes
    pub fn lane_from_v(&self, v: f32) -> f32 {
        let t = (v + self.half_width) / (2.0 * self.half_width);
        t * (self.lane_count - 1) as f32
    }

    /// Traversal parity at longitudinal position `u`: +1 or -1.
    ///
    /// The 180 degree twist flips the strip-width direction exactly once
    /// per full loop. Derived from the single-twist mapping above; a
    /// different twist count would need a different rule.
    pub fn side_sign(&self, u: f32) -> f32 {
        if ((u + self.u_offset) * 0.5).cos() >= 0.0 {
            1.0
        } else {
            -1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wrap_angle;
    use std::f32::consts::{PI, TAU};

    fn strip() -> Mobius {
        Mobius::new(&MobiusConfig::default())
    }

    #[test]
    fn test_wrap_angle_range() {
        for &a in &[0.0, 0.5, -0.5, PI, -PI, 3.0 * PI, -3.0 * PI, 100.0, -100.0] {
            let w = wrap_angle(a);
            assert!((-PI..PI).contains(&w), "wrap_angle({a}) = {w}");
        }
        assert!((wrap_angle(0.5) - 0.5).abs() < 1e-6);
        assert!((wrap_angle(TAU + 0.3) - 0.3).abs() < 1e-6);
        assert!((wrap_angle(PI) + PI).abs() < 1e-6);
    }

    #[test]
    fn test_centerline_lies_on_circle() {
        let strip = strip();
        for i in 0..16 {
            let u = i as f32 / 16.0 * TAU;
            let p = strip.point(u, 0.0);
            assert!((p.length() - 3.6).abs() < 1e-4);
            assert!(p.y.abs() < 1e-4);
        }
    }

    #[test]
    fn test_full_loop_flips_lateral_side() {
        let strip = strip();
        for i in 0..8 {
            let u = i as f32 / 8.0 * TAU;
            for &v in &[-1.5, -0.6, 0.9] {
                let once_around = strip.point(u + TAU, v);
                let mirrored = strip.point(u, -v);
                assert!(
                    once_around.distance(mirrored) < 1e-3,
                    "u={u} v={v}: {once_around:?} vs {mirrored:?}"
                );
            }
        }
    }

    #[test]
    fn test_frame_is_orthonormal() {
        let strip = strip();
        for i in 0..12 {
            let u = i as f32 / 12.0 * TAU;
            let f = strip.frame(u, 0.7);
            assert!((f.tangent_u.length() - 1.0).abs() < 1e-4);
            assert!((f.tangent_v.length() - 1.0).abs() < 1e-4);
            assert!((f.normal.length() - 1.0).abs() < 1e-4);
            assert!(f.tangent_u.dot(f.normal).abs() < 1e-3);
            assert!(f.tangent_v.dot(f.normal).abs() < 1e-3);
        }
    }

    #[test]
    fn test_lane_mapping() {
        let strip = strip();
        assert!((strip.lane_to_v(0.0) + 1.8).abs() < 1e-6);
        assert!((strip.lane_to_v(3.0)).abs() < 1e-6);
        assert!((strip.lane_to_v(6.0) - 1.8).abs() < 1e-6);
        // Out-of-range lanes clamp
        assert!((strip.lane_to_v(99.0) - 1.8).abs() < 1e-6);

        for lane in 0..7 {
            let v = strip.lane_to_v(lane as f32);
            assert!((strip.lane_from_v(v) - lane as f32).abs() < 1e-5);
        }
        // The inverse stays fractional and unclamped
        assert!((strip.lane_from_v(2.7) - 7.5).abs() < 1e-5);
    }

    #[test]
    fn test_side_sign_alternates_per_loop() {
        let strip = strip();
        assert_eq!(strip.side_sign(0.0), 1.0);
        assert_eq!(strip.side_sign(3.0), 1.0);
        assert_eq!(strip.side_sign(3.2), -1.0);
        assert_eq!(strip.side_sign(TAU - 0.1), -1.0);
        assert_eq!(strip.side_sign(TAU + 0.1), -1.0);
        assert_eq!(strip.side_sign(2.0 * TAU + 0.1), 1.0);
        assert_eq!(strip.side_sign(-3.2), -1.0);
    }

    #[test]
    fn test_world_point_identity_rotation() {
        let strip = strip();
        let local = strip.point(1.2, 0.8);
        let world = strip.world_point(1.2, 0.8);
        assert!(local.distance(world) < 1e-5);
    }
}
