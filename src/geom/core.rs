use std::ops::{Add, Mul, Neg, Sub};

/// Free vector in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    /// World up.
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub const fn from_array([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }

    #[must_use]
    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    #[must_use]
    pub const fn dot(self, rhs: Self) -> f64 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    #[must_use]
    pub const fn cross(self, rhs: Self) -> Self {
        Self::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction, `None` for zero or non-finite input.
    #[must_use]
    pub fn normalized(self) -> Option<Self> {
        let len = self.length();
        (len.is_finite() && len > 0.0).then(|| self * len.recip())
    }

    /// Drops the part of `self` along the unit vector `normal`.
    #[must_use]
    pub fn reject_from(self, normal: Self) -> Self {
        self - normal * self.dot(normal)
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.to_array().iter().all(|c| c.is_finite())
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(arr: [f64; 3]) -> Self {
        Self::from_array(arr)
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        self + -rhs
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;
    fn mul(self, s: f64) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s)
    }
}

impl Mul<Vec3> for f64 {
    type Output = Vec3;
    fn mul(self, v: Vec3) -> Vec3 {
        v * self
    }
}

/// Location in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub const fn from_array([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }

    #[must_use]
    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Point at fraction `t` from `self` towards `rhs`.
    #[must_use]
    pub fn lerp(self, rhs: Self, t: f64) -> Self {
        self + (rhs - self) * t
    }

    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        (self - other).length()
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.to_array().iter().all(|c| c.is_finite())
    }

    const fn as_vec(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

impl From<[f64; 3]> for Point3 {
    fn from(arr: [f64; 3]) -> Self {
        Self::from_array(arr)
    }
}

impl From<Point3> for [f64; 3] {
    fn from(p: Point3) -> Self {
        p.to_array()
    }
}

impl Add<Vec3> for Point3 {
    type Output = Self;
    fn add(self, v: Vec3) -> Self {
        Self::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }
}

impl Sub<Vec3> for Point3 {
    type Output = Self;
    fn sub(self, v: Vec3) -> Self {
        self + -v
    }
}

impl Sub for Point3 {
    type Output = Vec3;
    fn sub(self, rhs: Self) -> Vec3 {
        self.as_vec() - rhs.as_vec()
    }
}

/// Rigid rotation: `p' = R·p + t`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    rows: [Vec3; 3],
    translation: Vec3,
}

impl Transform {
    /// Rotation by `angle` radians about the line through `pivot` along `axis`.
    /// Positive angles turn counter-clockwise when looking down `axis`.
    #[must_use]
    pub fn rotate_about(pivot: Point3, axis: Vec3, angle: f64) -> Option<Self> {
        let Vec3 { x, y, z } = axis.normalized()?;
        let (s, c) = angle.sin_cos();
        let t = 1.0 - c;
        let rows = [
            Vec3::new(t * x * x + c, t * x * y - s * z, t * x * z + s * y),
            Vec3::new(t * x * y + s * z, t * y * y + c, t * y * z - s * x),
            Vec3::new(t * x * z - s * y, t * y * z + s * x, t * z * z + c),
        ];
        let mut transform = Self {
            rows,
            translation: Vec3::ZERO,
        };
        // keep the pivot fixed
        let pivot = pivot.as_vec();
        transform.translation = pivot - transform.apply_vec(pivot);
        Some(transform)
    }

    #[must_use]
    pub fn apply_point(self, p: Point3) -> Point3 {
        Point3::ORIGIN + self.apply_vec(p.as_vec()) + self.translation
    }

    #[must_use]
    pub fn apply_vec(self, v: Vec3) -> Vec3 {
        let [r0, r1, r2] = self.rows;
        Vec3::new(r0.dot(v), r1.dot(v), r2.dot(v))
    }
}

/// Axis-aligned bounds in plane-local 2D coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds2 {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl Bounds2 {
    #[must_use]
    pub fn from_points(points: &[[f64; 2]]) -> Option<Self> {
        let (&first, rest) = points.split_first()?;
        Some(rest.iter().fold(
            Self {
                min: first,
                max: first,
            },
            |acc, p| Self {
                min: [acc.min[0].min(p[0]), acc.min[1].min(p[1])],
                max: [acc.max[0].max(p[0]), acc.max[1].max(p[1])],
            },
        ))
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.max[0] - self.min[0]
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.max[1] - self.min[1]
    }

    /// Maps `(u, v)` in the unit square linearly onto the bounds.
    #[must_use]
    pub fn point_at_normalized(self, u: f64, v: f64) -> [f64; 2] {
        [
            self.min[0] + self.width() * u,
            self.min[1] + self.height() * v,
        ]
    }
}

/// Distance threshold for geometric comparisons.
///
/// `DEFAULT` (1e-9) guards degenerate sizes, `ZERO_LENGTH` (1e-12) guards
/// zero-length edges and normals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    pub eps: f64,
}

impl Tolerance {
    pub const DEFAULT: Self = Self::new(1e-9);
    pub const ZERO_LENGTH: Self = Self::new(1e-12);

    #[must_use]
    pub const fn new(eps: f64) -> Self {
        Self { eps }
    }

    #[must_use]
    pub fn approx_eq_point3(self, a: Point3, b: Point3) -> bool {
        self.is_zero_vec3(a - b)
    }

    #[must_use]
    pub fn is_zero_vec3(self, v: Vec3) -> bool {
        v.dot(v) <= self.eps * self.eps
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Shoelace area of a closed 2D loop, positive when counter-clockwise.
#[must_use]
pub fn signed_area_2d(points: &[[f64; 2]]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let wrapped = points.iter().zip(points.iter().cycle().skip(1));
    0.5 * wrapped
        .map(|(a, b)| a[0] * b[1] - b[0] * a[1])
        .sum::<f64>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec3_arithmetic() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);

        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Vec3::new(3.0, 3.0, 3.0));
        assert_eq!(2.0 * a, a * 2.0);
        assert_eq!(-a, Vec3::new(-1.0, -2.0, -3.0));
    }

    #[test]
    fn cross_follows_right_hand_rule() {
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
        assert_eq!(Vec3::Z.cross(Vec3::X), Vec3::Y);
    }

    #[test]
    fn normalized_rejects_zero_vector() {
        assert!(Vec3::ZERO.normalized().is_none());
        let n = Vec3::new(3.0, 0.0, 4.0).normalized().unwrap();
        assert!((n.length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn point_lerp_and_distance() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(4.0, 0.0, 3.0);
        assert_eq!(a.lerp(b, 0.5), Point3::new(2.0, 0.0, 1.5));
        assert_eq!(a.distance_to(b), 5.0);
    }

    #[test]
    fn rotation_keeps_pivot_fixed() {
        let pivot = Point3::new(2.0, 3.0, 0.0);
        let t = Transform::rotate_about(pivot, Vec3::Z, std::f64::consts::FRAC_PI_2).unwrap();
        let tol = Tolerance::new(1e-12);

        assert!(tol.approx_eq_point3(t.apply_point(pivot), pivot));
        let moved = t.apply_point(Point3::new(3.0, 3.0, 0.0));
        assert!(tol.approx_eq_point3(moved, Point3::new(2.0, 4.0, 0.0)));
        assert!(tol.is_zero_vec3(t.apply_vec(Vec3::X) - Vec3::Y));
    }

    #[test]
    fn rotation_needs_an_axis() {
        assert!(Transform::rotate_about(Point3::ORIGIN, Vec3::ZERO, 1.0).is_none());
    }

    #[test]
    fn bounds_map_normalized_corners() {
        let bounds = Bounds2::from_points(&[[1.0, 2.0], [5.0, 2.0], [5.0, 4.0]]).unwrap();
        assert_eq!(bounds.point_at_normalized(0.0, 0.0), [1.0, 2.0]);
        assert_eq!(bounds.point_at_normalized(1.0, 1.0), [5.0, 4.0]);
        assert_eq!(bounds.point_at_normalized(0.5, 0.5), [3.0, 3.0]);
        assert!(Bounds2::from_points(&[]).is_none());
    }

    #[test]
    fn signed_area_follows_orientation() {
        let ccw = [[0.0, 0.0], [2.0, 0.0], [2.0, 3.0], [0.0, 3.0]];
        let mut cw = ccw;
        cw.reverse();
        assert_eq!(signed_area_2d(&ccw), 6.0);
        assert_eq!(signed_area_2d(&cw), -6.0);
    }
}
