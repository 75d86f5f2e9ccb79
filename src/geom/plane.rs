//! Oriented planes and plane-local coordinate remapping.

use super::core::{Point3, Tolerance, Vec3};

/// A right-handed orthonormal frame: origin plus x/y axes and normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub origin: Point3,
    pub x_axis: Vec3,
    pub y_axis: Vec3,
    pub z_axis: Vec3,
}

impl Plane {
    pub const WORLD_XY: Self = Self {
        origin: Point3::ORIGIN,
        x_axis: Vec3::X,
        y_axis: Vec3::Y,
        z_axis: Vec3::Z,
    };

    /// Builds a plane from an origin and two in-plane directions.
    ///
    /// The x direction is kept, the y direction is re-orthogonalized against it.
    /// Returns `None` when the directions are degenerate or parallel.
    #[must_use]
    pub fn new(origin: Point3, x_dir: Vec3, y_dir: Vec3) -> Option<Self> {
        let x_axis = x_dir.normalized()?;
        let z_axis = x_axis.cross(y_dir).normalized()?;
        let y_axis = z_axis.cross(x_axis).normalized()?;
        Some(Self {
            origin,
            x_axis,
            y_axis,
            z_axis,
        })
    }

    /// Builds a plane from an origin, a normal and a preferred x direction.
    #[must_use]
    pub fn from_normal(origin: Point3, normal: Vec3, x_hint: Vec3) -> Option<Self> {
        let z_axis = normal.normalized()?;
        let x_axis = x_hint.reject_from(z_axis).normalized().or_else(|| {
            let fallback = if z_axis.x.abs() < 0.9 { Vec3::X } else { Vec3::Y };
            fallback.reject_from(z_axis).normalized()
        })?;
        let y_axis = z_axis.cross(x_axis);
        Some(Self {
            origin,
            x_axis,
            y_axis,
            z_axis,
        })
    }

    /// Fits a plane to a closed loop of points.
    ///
    /// The normal is the Newell normal of the loop, so a loop that runs
    /// counter-clockwise around the normal keeps that orientation. The x axis
    /// follows the first non-degenerate edge and the origin is the first point.
    #[must_use]
    pub fn fit_loop(points: &[Point3], tol: Tolerance) -> Option<Self> {
        if points.len() < 3 {
            return None;
        }
        let normal = newell_normal(points);
        if tol.is_zero_vec3(normal) {
            return None;
        }
        let origin = points[0];
        let x_hint = points
            .iter()
            .skip(1)
            .map(|p| *p - origin)
            .find(|edge| !tol.is_zero_vec3(*edge))?;
        Self::from_normal(origin, normal, x_hint)
    }

    /// Same normal, turned so the x axis is horizontal and the y axis points
    /// up. The x axis is `world-Z × normal`, so seen from the side the normal
    /// points to, x runs left to right. Horizontal planes are returned as is.
    #[must_use]
    pub fn upright(self, tol: Tolerance) -> Self {
        let horizontal = Vec3::Z.cross(self.z_axis);
        if tol.is_zero_vec3(horizontal) {
            return self;
        }
        Self::from_normal(self.origin, self.z_axis, horizontal).unwrap_or(self)
    }

    /// Remaps a world point into plane coordinates `(x, y, z)`.
    #[must_use]
    pub fn remap_to_local(&self, point: Point3) -> Point3 {
        let relative = point - self.origin;
        Point3::new(
            relative.dot(self.x_axis),
            relative.dot(self.y_axis),
            relative.dot(self.z_axis),
        )
    }

    /// In-plane `(x, y)` coordinates of a world point.
    #[must_use]
    pub fn local_2d(&self, point: Point3) -> [f64; 2] {
        let local = self.remap_to_local(point);
        [local.x, local.y]
    }

    #[must_use]
    pub fn point_at(&self, x: f64, y: f64) -> Point3 {
        self.origin + self.x_axis * x + self.y_axis * y
    }

    #[must_use]
    pub fn point_at_3d(&self, x: f64, y: f64, z: f64) -> Point3 {
        self.point_at(x, y) + self.z_axis * z
    }

    /// Signed distance from the plane along its normal.
    #[must_use]
    pub fn distance_to(&self, point: Point3) -> f64 {
        (point - self.origin).dot(self.z_axis)
    }

    /// Whether every point lies within `tol` of the plane.
    #[must_use]
    pub fn contains_all(&self, points: &[Point3], tol: f64) -> bool {
        points.iter().all(|p| self.distance_to(*p).abs() <= tol)
    }
}

impl Default for Plane {
    fn default() -> Self {
        Self::WORLD_XY
    }
}

/// Newell's method: area-weighted normal of a (possibly non-convex) loop.
#[must_use]
pub fn newell_normal(points: &[Point3]) -> Vec3 {
    let n = points.len();
    let mut normal = Vec3::ZERO;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        normal.x += (a.y - b.y) * (a.z + b.z);
        normal.y += (a.z - b.z) * (a.x + b.x);
        normal.z += (a.x - b.x) * (a.y + b.y);
    }
    normal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_orthogonalizes_y() {
        let plane = Plane::new(Point3::ORIGIN, Vec3::X, Vec3::new(1.0, 1.0, 0.0)).unwrap();
        assert!((plane.y_axis.dot(Vec3::Y) - 1.0).abs() < 1e-12);
        assert!((plane.z_axis.dot(Vec3::Z) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn new_rejects_parallel_axes() {
        assert!(Plane::new(Point3::ORIGIN, Vec3::X, Vec3::X * 2.0).is_none());
    }

    #[test]
    fn fit_vertical_wall_points_up() {
        let wall = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, 3.0),
            Point3::new(0.0, 0.0, 3.0),
        ];
        let plane = Plane::fit_loop(&wall, Tolerance::DEFAULT).unwrap();
        assert!((plane.x_axis.dot(Vec3::X) - 1.0).abs() < 1e-12);
        assert!((plane.y_axis.dot(Vec3::Z) - 1.0).abs() < 1e-12);
        assert!((plane.z_axis.dot(-Vec3::Y) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn remap_round_trips_through_point_at() {
        let plane = Plane::new(
            Point3::new(1.0, 2.0, 3.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        )
        .unwrap();
        let world = plane.point_at_3d(2.5, -1.0, 0.25);
        let local = plane.remap_to_local(world);
        assert!((local.x - 2.5).abs() < 1e-12);
        assert!((local.y + 1.0).abs() < 1e-12);
        assert!((local.z - 0.25).abs() < 1e-12);
    }

    #[test]
    fn upright_ignores_loop_start() {
        let tol = Tolerance::new(1e-9);
        let corners = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, 3.0),
            Point3::new(0.0, 0.0, 3.0),
        ];
        let mut rotated = corners;
        rotated.rotate_left(3);

        for points in [corners, rotated] {
            let plane = Plane::fit_loop(&points, tol).unwrap().upright(tol);
            assert!(tol.is_zero_vec3(plane.x_axis - Vec3::X));
            assert!(tol.is_zero_vec3(plane.y_axis - Vec3::Z));
        }
    }

    #[test]
    fn upright_keeps_horizontal_planes() {
        let tol = Tolerance::new(1e-9);
        let plane = Plane::new(Point3::ORIGIN, Vec3::Y, -Vec3::X).unwrap();
        assert_eq!(plane.upright(tol), plane);
    }

    #[test]
    fn contains_all_respects_tolerance() {
        let points = [Point3::new(0.0, 0.0, 0.0005), Point3::new(4.0, 1.0, -0.0005)];
        assert!(Plane::WORLD_XY.contains_all(&points, 0.001));
        assert!(!Plane::WORLD_XY.contains_all(&points, 0.0001));
    }
}
