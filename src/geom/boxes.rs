//! Oriented boxes described by a base plane and three local intervals.

use super::core::{Point3, Transform};
use super::plane::Plane;

/// Closed interval `[min, max]`; constructors sort their bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    #[must_use]
    pub fn new(a: f64, b: f64) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// `[-half, half]`.
    #[must_use]
    pub fn centered(half: f64) -> Self {
        Self::new(-half, half)
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.max - self.min
    }

    #[must_use]
    pub fn mid(self) -> f64 {
        (self.min + self.max) * 0.5
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedBox {
    pub plane: Plane,
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl OrientedBox {
    #[must_use]
    pub fn new(plane: Plane, x: Interval, y: Interval, z: Interval) -> Self {
        Self { plane, x, y, z }
    }

    /// Bottom face counter-clockwise, then top face in the same order.
    #[must_use]
    pub fn corners(&self) -> [Point3; 8] {
        let p = &self.plane;
        [
            p.point_at_3d(self.x.min, self.y.min, self.z.min),
            p.point_at_3d(self.x.max, self.y.min, self.z.min),
            p.point_at_3d(self.x.max, self.y.max, self.z.min),
            p.point_at_3d(self.x.min, self.y.max, self.z.min),
            p.point_at_3d(self.x.min, self.y.min, self.z.max),
            p.point_at_3d(self.x.max, self.y.min, self.z.max),
            p.point_at_3d(self.x.max, self.y.max, self.z.max),
            p.point_at_3d(self.x.min, self.y.max, self.z.max),
        ]
    }

    #[must_use]
    pub fn center(&self) -> Point3 {
        self.plane
            .point_at_3d(self.x.mid(), self.y.mid(), self.z.mid())
    }

    #[must_use]
    pub fn volume(&self) -> f64 {
        self.x.length() * self.y.length() * self.z.length()
    }

    /// Applies a rigid transform to the base plane; intervals are unchanged.
    #[must_use]
    pub fn transformed(&self, transform: Transform) -> Self {
        let plane = Plane {
            origin: transform.apply_point(self.plane.origin),
            x_axis: transform.apply_vec(self.plane.x_axis),
            y_axis: transform.apply_vec(self.plane.y_axis),
            z_axis: transform.apply_vec(self.plane.z_axis),
        };
        Self { plane, ..*self }
    }
}
