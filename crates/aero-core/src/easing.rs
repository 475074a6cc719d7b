//! Scalar interpolation helpers shared by the camera, intro and idle motion.

use glam::Vec3;

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Quadratic ease-in for the first half, quadratic ease-out for the second.
#[inline]
pub fn ease_in_out_quad(s: f32) -> f32 {
    if s < 0.5 {
        2.0 * s * s
    } else {
        let k = -2.0 * s + 2.0;
        1.0 - k * k / 2.0
    }
}

#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let k = 1.0 - t;
    1.0 - k * k * k
}

/// Move `current` a fixed fraction of the way toward `target`.
///
/// Applied once per tick, this converges exponentially and hides step changes
/// in `target` (segment switches, scroll jumps).
#[inline]
pub fn damp(current: f32, target: f32, blend: f32) -> f32 {
    lerp(current, target, blend)
}

#[inline]
pub fn damp_vec3(current: Vec3, target: Vec3, blend: f32) -> Vec3 {
    current.lerp(target, blend)
}

#[inline]
pub fn clamp01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_in_out_quad_hits_endpoints_and_midpoint() {
        assert_eq!(ease_in_out_quad(0.0), 0.0);
        assert!((ease_in_out_quad(0.5) - 0.5).abs() < 1e-6);
        assert!((ease_in_out_quad(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn ease_in_out_quad_is_monotonic() {
        let mut prev = ease_in_out_quad(0.0);
        for i in 1..=100 {
            let v = ease_in_out_quad(i as f32 / 100.0);
            assert!(v >= prev, "not monotonic at step {i}");
            prev = v;
        }
    }

    #[test]
    fn ease_out_cubic_front_loads_motion() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!(ease_out_cubic(0.5) > 0.5);
    }

    #[test]
    fn damp_converges() {
        let mut x = 0.0;
        for _ in 0..200 {
            x = damp(x, 10.0, 0.08);
        }
        assert!((x - 10.0).abs() < 1e-3);
    }
}
