//! Spherical coordinates with +Y as the zenith and +X as the azimuth reference.
//!
//! `polar` is the azimuth of the point's projection on the XZ plane, measured
//! from +X towards +Z. `elevation` is the angle above the XZ plane. Both are
//! in radians.

use glam::Vec3;
use std::f32::consts::{FRAC_PI_2, PI};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Spherical {
    pub radius: f32,
    pub polar: f32,
    pub elevation: f32,
}

impl Spherical {
    pub fn new(radius: f32, polar: f32, elevation: f32) -> Self {
        Self {
            radius,
            polar,
            elevation,
        }
    }

    /// Converts a Cartesian point (Y up) to spherical form.
    ///
    /// A point on the YZ plane (x == 0) gets a polar angle of +π/2 or -π/2
    /// depending on the sign of z, and 0 on the Y axis itself. The origin maps
    /// to all zeros.
    pub fn from_cartesian(p: Vec3) -> Self {
        let radius = p.length();
        if radius == 0.0 {
            return Self::default();
        }

        let polar = if p.x == 0.0 {
            if p.z > 0.0 {
                FRAC_PI_2
            } else if p.z < 0.0 {
                -FRAC_PI_2
            } else {
                0.0
            }
        } else {
            let base = (p.z / p.x).atan();
            if p.x < 0.0 { base + PI } else { base }
        };

        // same as asin(y / radius) but stable near the poles
        let elevation = p.y.atan2(p.x.hypot(p.z));

        Self {
            radius,
            polar,
            elevation,
        }
    }

    pub fn to_cartesian(&self) -> Vec3 {
        let a = self.radius * self.elevation.cos();
        Vec3::new(
            a * self.polar.cos(),
            self.radius * self.elevation.sin(),
            a * self.polar.sin(),
        )
    }
}

pub fn to_cartesian(radius: f32, polar: f32, elevation: f32) -> Vec3 {
    Spherical::new(radius, polar, elevation).to_cartesian()
}

pub fn to_spherical(p: Vec3) -> Spherical {
    Spherical::from_cartesian(p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TOLERANCE: f32 = 1e-4;

    fn assert_close(a: Vec3, b: Vec3) {
        assert!(
            (a - b).abs().max_element() <= TOLERANCE,
            "{a:?} != {b:?}"
        );
    }

    #[test]
    fn axis_points_map_to_expected_angles() {
        let s = to_spherical(Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(s, Spherical::new(2.0, 0.0, 0.0));

        let s = to_spherical(Vec3::new(0.0, 3.0, 0.0));
        assert!((s.radius - 3.0).abs() < TOLERANCE);
        assert!((s.elevation - FRAC_PI_2).abs() < TOLERANCE);

        let s = to_spherical(Vec3::new(-1.0, 0.0, 0.0));
        assert!((s.polar - PI).abs() < TOLERANCE);
    }

    #[test]
    fn zero_x_uses_quarter_turn_instead_of_epsilon() {
        let s = to_spherical(Vec3::new(0.0, 1.0, 4.0));
        assert_eq!(s.polar, FRAC_PI_2);
        assert_close(s.to_cartesian(), Vec3::new(0.0, 1.0, 4.0));

        let s = to_spherical(Vec3::new(0.0, 0.0, -4.0));
        assert_eq!(s.polar, -FRAC_PI_2);
        assert_close(s.to_cartesian(), Vec3::new(0.0, 0.0, -4.0));
    }

    #[test]
    fn origin_is_all_zero() {
        assert_eq!(to_spherical(Vec3::ZERO), Spherical::default());
        assert_eq!(to_cartesian(0.0, 1.0, 2.0), Vec3::ZERO);
    }

    #[test]
    fn to_cartesian_follows_y_up_convention() {
        assert_close(to_cartesian(1.0, 0.0, FRAC_PI_2), Vec3::Y);
        assert_close(to_cartesian(1.0, FRAC_PI_2, 0.0), Vec3::Z);
        assert_close(to_cartesian(2.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0));
    }

    fn nonzero_x() -> impl Strategy<Value = f32> {
        prop_oneof![-20.0f32..-0.01, 0.01f32..20.0]
    }

    proptest! {
        #[test]
        fn prop_round_trip_through_spherical(
            x in nonzero_x(),
            y in -20.0f32..20.0,
            z in -20.0f32..20.0,
        ) {
            let p = Vec3::new(x, y, z);
            let back = to_spherical(p).to_cartesian();
            prop_assert!((back - p).abs().max_element() <= TOLERANCE, "{:?} -> {:?}", p, back);
        }
    }
}
