//! First-order smoothing used by every animated quantity.
//!
//! Each call covers a fixed fraction `k` of the remaining distance, so a value
//! held against a constant target approaches it monotonically and never
//! overshoots as long as `k` lies in (0, 1]. The step is applied per tick, not
//! per second.

use glam::{Vec2, Vec3};

#[inline]
pub fn ease(current: f32, target: f32, k: f32) -> f32 {
    current + (target - current) * k
}

#[inline]
pub fn ease_vec2(current: Vec2, target: Vec2, k: f32) -> Vec2 {
    current + (target - current) * k
}

#[inline]
pub fn ease_vec3(current: Vec3, target: Vec3, k: f32) -> Vec3 {
    current + (target - current) * k
}

/// Clamp a smoothing constant into (0, 1], falling back when it is unusable.
#[inline]
pub fn sanitize_factor(k: f32, fallback: f32) -> f32 {
    if k.is_finite() && k > 0.0 {
        k.min(1.0)
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_moves_a_fraction_of_the_gap() {
        assert!((ease(0.0, 1.0, 0.25) - 0.25).abs() < 1e-6);
        assert!((ease(1.0, 0.0, 0.5) - 0.5).abs() < 1e-6);
        assert_eq!(ease(3.0, 3.0, 0.1), 3.0);
    }

    #[test]
    fn unit_factor_lands_on_target() {
        let v = ease_vec3(Vec3::new(1.0, -2.0, 4.0), Vec3::new(-3.0, 5.0, 0.5), 1.0);
        assert!((v - Vec3::new(-3.0, 5.0, 0.5)).length() < 1e-6);
    }

    #[test]
    fn sanitize_rejects_nonpositive_and_nan() {
        assert_eq!(sanitize_factor(0.0, 0.06), 0.06);
        assert_eq!(sanitize_factor(-1.0, 0.06), 0.06);
        assert_eq!(sanitize_factor(f32::NAN, 0.06), 0.06);
        assert_eq!(sanitize_factor(3.0, 0.06), 1.0);
        assert_eq!(sanitize_factor(0.2, 0.06), 0.2);
    }
}
