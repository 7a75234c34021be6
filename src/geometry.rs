//! Stateless 3D vector helpers used by the velocity estimator.
//!
//! Indeterminate results (zero-length vectors, an `acos` argument pushed past
//! ±1 by rounding) come back as NaN. Callers check with `is_nan()`.

use std::ops::{Neg, Sub};

/// A point or direction in the tracker's user coordinate system (millimeters).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn dot(&self, other: &Vector3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn length(&self) -> f64 {
        self.dot(self).sqrt()
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Vector3 {
    type Output = Vector3;

    fn neg(self) -> Vector3 {
        Vector3::new(-self.x, -self.y, -self.z)
    }
}

/// Vector pointing from `from` to `to`.
pub fn vector_between(from: &Vector3, to: &Vector3) -> Vector3 {
    *to - *from
}

/// Angle between two vectors in radians, or NaN when it cannot be determined.
///
/// The cosine is clamped to [-1, 1] before `acos` so that parallel vectors
/// whose normalized dot product rounds to 1.0000000000000002 still give 0.
/// Zero-length or non-finite vectors still give NaN.
pub fn angle_between(u: &Vector3, v: &Vector3) -> f64 {
    let norms = u.length() * v.length();
    if norms == 0.0 {
        return f64::NAN;
    }
    (u.dot(v) / norms).clamp(-1.0, 1.0).acos()
}

pub fn euclidean_distance(a: &Vector3, b: &Vector3) -> f64 {
    vector_between(a, b).length()
}

pub fn rad_to_deg(radians: f64) -> f64 {
    radians.to_degrees()
}

pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees.to_radians()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn vector_between_subtracts_from_target() {
        let from = Vector3::new(1.0, 2.0, 3.0);
        let to = Vector3::new(4.0, 0.0, 3.5);
        assert_eq!(vector_between(&from, &to), Vector3::new(3.0, -2.0, 0.5));
    }

    #[test]
    fn angle_between_identical_vectors_is_zero() {
        let v = Vector3::new(0.0, 0.0, 600.0);
        assert!(angle_between(&v, &v).abs() < EPSILON);
    }

    #[test]
    fn angle_between_parallel_vectors_survives_rounding() {
        let v = Vector3::new(0.1, 0.2, 0.3);
        let w = Vector3::new(52.49, -7.3, -600.0);
        assert!(!angle_between(&v, &v).is_nan());
        assert!(angle_between(&v, &v).abs() < 1e-6);
        assert!(angle_between(&w, &w).abs() < 1e-6);
        let scaled = Vector3::new(w.x * 3.0, w.y * 3.0, w.z * 3.0);
        assert!(angle_between(&w, &scaled).abs() < 1e-6);
    }

    #[test]
    fn angle_between_opposite_vectors_is_pi() {
        let v = Vector3::new(0.0, 0.0, 600.0);
        assert!((angle_between(&v, &-v) - PI).abs() < EPSILON);
    }

    #[test]
    fn angle_between_orthogonal_vectors_is_right_angle() {
        let u = Vector3::new(1.0, 0.0, 0.0);
        let v = Vector3::new(0.0, 5.0, 0.0);
        assert!((angle_between(&u, &v) - PI / 2.0).abs() < EPSILON);
    }

    #[test]
    fn angle_between_zero_length_vector_is_nan() {
        let zero = Vector3::default();
        let v = Vector3::new(1.0, 1.0, 1.0);
        assert!(angle_between(&zero, &v).is_nan());
        assert!(angle_between(&v, &zero).is_nan());
    }

    #[test]
    fn angle_between_propagates_nan_components() {
        let u = Vector3::new(f64::NAN, 0.0, 1.0);
        let v = Vector3::new(0.0, 0.0, 1.0);
        assert!(angle_between(&u, &v).is_nan());
    }

    #[test]
    fn euclidean_distance_matches_pythagoras() {
        let a = Vector3::new(0.0, 0.0, 0.0);
        let b = Vector3::new(2.0, 3.0, 6.0);
        assert!((euclidean_distance(&a, &b) - 7.0).abs() < EPSILON);
    }

    #[test]
    fn degree_radian_conversions_are_inverse() {
        assert!((rad_to_deg(PI) - 180.0).abs() < EPSILON);
        assert!((deg_to_rad(90.0) - PI / 2.0).abs() < EPSILON);
        assert!((rad_to_deg(deg_to_rad(37.5)) - 37.5).abs() < EPSILON);
    }
}
