//! Vector geometry shared by the hand and face pipelines.
//!
//! Everything here is a pure function over `nalgebra` vectors. Angles are
//! returned in degrees unless the name says otherwise.

use crate::constants::MAX_BEND_ANGLE;
use nalgebra::{Vector2, Vector3};

/// Vectors shorter than this are treated as zero-length.
const NORM_EPSILON: f32 = 1e-8;

/// Cubic ease-in-out over `t` in [0, 1].
#[must_use]
pub fn cubic_in_out_ease(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Maps a raw angle onto [0, 90] degrees through the cubic ease.
///
/// `input_limit` is the raw angle that reads as a full 90 degree bend. Small
/// angles are pushed toward zero so a nearly straight joint reads straight.
#[must_use]
pub fn ease_bend_angle(angle: f32, input_limit: f32) -> f32 {
    cubic_in_out_ease((angle / input_limit).clamp(0.0, 1.0)) * MAX_BEND_ANGLE
}

/// Unsigned angle between two vectors in degrees, 0 if either is degenerate.
#[must_use]
pub fn angle_between(a: &Vector3<f32>, b: &Vector3<f32>) -> f32 {
    if a.norm() < NORM_EPSILON || b.norm() < NORM_EPSILON {
        return 0.0;
    }
    a.angle(b).to_degrees()
}

/// Bend at `b` for the chain `a -> b -> c`: 0 when the three points are collinear.
#[must_use]
pub fn bend_angle(a: &Vector3<f32>, b: &Vector3<f32>, c: &Vector3<f32>) -> f32 {
    angle_between(&(b - a), &(c - b))
}

/// Removes the component of `v` along the unit vector `normal`.
#[must_use]
pub fn project_on_plane(v: &Vector3<f32>, normal: &Vector3<f32>) -> Vector3<f32> {
    v - normal * v.dot(normal)
}

/// Signed angle from `a` to `b` around `normal`, in degrees within [-90, 90].
///
/// The magnitude comes from `|a x b|` on the normalized inputs and the sign
/// from which side of the plane the cross product lies on.
#[must_use]
pub fn signed_angle_about(a: &Vector3<f32>, b: &Vector3<f32>, normal: &Vector3<f32>) -> f32 {
    let (Some(a), Some(b)) = (a.try_normalize(NORM_EPSILON), b.try_normalize(NORM_EPSILON)) else {
        return 0.0;
    };
    let cross = a.cross(&b);
    let sign = if cross.dot(normal) < 0.0 { -1.0 } else { 1.0 };
    (sign * cross.norm().min(1.0)).asin().to_degrees()
}

/// Signed perpendicular distance of `p` from the line through `from` and `to`.
///
/// Positive when `p` is on the counter-clockwise side of the direction
/// `from -> to` in a y-up frame. Returns 0 for a degenerate line.
#[must_use]
pub fn signed_distance_to_line(p: &Vector2<f32>, from: &Vector2<f32>, to: &Vector2<f32>) -> f32 {
    let dir = to - from;
    let len = dir.norm();
    if len < NORM_EPSILON {
        return 0.0;
    }
    let rel = p - from;
    (dir.x * rel.y - dir.y * rel.x) / len
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_cubic_ease_endpoints() {
        assert_eq!(cubic_in_out_ease(0.0), 0.0);
        assert_eq!(cubic_in_out_ease(1.0), 1.0);
        assert!((cubic_in_out_ease(0.5) - 0.5).abs() < 1e-6);
        // Suppresses small inputs
        assert!(cubic_in_out_ease(0.1) < 0.01);
    }

    #[test]
    fn test_ease_bend_angle_bounds() {
        assert_eq!(ease_bend_angle(-20.0, 90.0), 0.0);
        assert_eq!(ease_bend_angle(170.0, 90.0), 90.0);
        assert_eq!(ease_bend_angle(60.0, 60.0), 90.0);
        assert!((ease_bend_angle(45.0, 90.0) - 45.0).abs() < 1e-4);
    }

    #[test]
    fn test_bend_angle() {
        let a = Vector3::new(0.0, 0.0, 0.0);
        let b = Vector3::new(0.0, 1.0, 0.0);
        assert!(bend_angle(&a, &b, &Vector3::new(0.0, 2.0, 0.0)).abs() < 1e-4);
        assert!((bend_angle(&a, &b, &Vector3::new(1.0, 1.0, 0.0)) - 90.0).abs() < 1e-4);
        // Coincident points read as straight
        assert_eq!(bend_angle(&a, &a, &b), 0.0);
    }

    #[test]
    fn test_project_on_plane() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        let projected = project_on_plane(&v, &Vector3::z());
        assert_eq!(projected, Vector3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn test_signed_angle_about() {
        let y = Vector3::y();
        let toward_x = Vector3::new(20.0_f32.to_radians().sin(), 20.0_f32.to_radians().cos(), 0.0);
        let angle = signed_angle_about(&toward_x, &y, &Vector3::z());
        assert!((angle - 20.0).abs() < 1e-3);

        let toward_neg_x = Vector3::new(-toward_x.x, toward_x.y, 0.0);
        let angle = signed_angle_about(&toward_neg_x, &y, &Vector3::z());
        assert!((angle + 20.0).abs() < 1e-3);

        assert_eq!(signed_angle_about(&Vector3::zeros(), &y, &Vector3::z()), 0.0);
    }

    #[test]
    fn test_signed_distance_to_line() {
        let from = Vector2::new(0.0, 0.0);
        let to = Vector2::new(0.0, -2.0);
        // Heading down, the counter-clockwise side is +x
        assert!((signed_distance_to_line(&Vector2::new(1.5, -1.0), &from, &to) - 1.5).abs() < 1e-6);
        assert!((signed_distance_to_line(&Vector2::new(-0.5, 3.0), &from, &to) + 0.5).abs() < 1e-6);
        assert_eq!(signed_distance_to_line(&Vector2::new(1.0, 1.0), &from, &from), 0.0);
    }

    proptest! {
        #[test]
        fn prop_ease_bend_angle_in_range(angle in -360.0f32..360.0, limit in 1.0f32..180.0) {
            let eased = ease_bend_angle(angle, limit);
            prop_assert!((0.0..=MAX_BEND_ANGLE).contains(&eased));
        }

        #[test]
        fn prop_cubic_ease_is_monotonic(a in 0.0f32..=1.0, b in 0.0f32..=1.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(cubic_in_out_ease(lo) <= cubic_in_out_ease(hi) + 1e-6);
        }

        #[test]
        fn prop_signed_angle_flips_with_normal(
            ax in -1.0f32..1.0, ay in -1.0f32..1.0, az in -1.0f32..1.0,
            bx in -1.0f32..1.0, by in -1.0f32..1.0, bz in -1.0f32..1.0,
        ) {
            let a = Vector3::new(ax, ay, az);
            let b = Vector3::new(bx, by, bz);
            let angle = signed_angle_about(&a, &b, &Vector3::z());
            prop_assert!((-90.0..=90.0).contains(&angle));
            let flipped = signed_angle_about(&a, &b, &-Vector3::z());
            // A cross product lying in the plane reads positive either way
            prop_assert!(angle == 0.0 || (angle + flipped).abs() < 1e-3 || angle == flipped);
        }
    }
}
