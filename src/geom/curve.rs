//! Polyline curves with arc-length parameterization.
//!
//! Parameters follow the usual polyline convention: the integer part selects
//! the segment, the fractional part the position along it, so a curve with
//! `n` segments has domain `[0, n]`.

use super::core::{Point3, Tolerance, Vec3};
use super::plane::Plane;

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum CurveError {
    #[error("curve needs at least 2 distinct points, got {count}")]
    InsufficientPoints { count: usize },

    #[error("curve contains a non-finite coordinate")]
    NonFinite,

    #[error("curve has zero length")]
    ZeroLength,
}

/// A piecewise-linear curve.
///
/// Closed polylines do not repeat their first vertex; the closing segment is
/// implied by `closed`.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline3 {
    points: Vec<Point3>,
    closed: bool,
}

impl Polyline3 {
    /// Builds a polyline, dropping consecutive duplicates. A last point equal to
    /// the first (within `tol`) closes the curve.
    pub fn from_points(points: &[Point3], tol: Tolerance) -> Result<Self, CurveError> {
        if points.iter().any(|p| !p.is_finite()) {
            return Err(CurveError::NonFinite);
        }

        let mut cleaned: Vec<Point3> = Vec::with_capacity(points.len());
        for point in points {
            if cleaned
                .last()
                .is_none_or(|last| !tol.approx_eq_point3(*last, *point))
            {
                cleaned.push(*point);
            }
        }

        let mut closed = false;
        if cleaned.len() >= 3 {
            if let (Some(first), Some(last)) = (cleaned.first(), cleaned.last()) {
                if tol.approx_eq_point3(*first, *last) {
                    cleaned.pop();
                    closed = true;
                }
            }
        }

        if cleaned.len() < 2 {
            return Err(CurveError::InsufficientPoints {
                count: cleaned.len(),
            });
        }

        let polyline = Self {
            points: cleaned,
            closed,
        };
        if polyline.length() <= tol.eps {
            return Err(CurveError::ZeroLength);
        }
        Ok(polyline)
    }

    /// A closed loop from vertices that do not repeat the first point.
    pub fn closed_loop(points: &[Point3], tol: Tolerance) -> Result<Self, CurveError> {
        let mut polyline = Self::from_points(points, tol)?;
        if polyline.points.len() < 3 {
            return Err(CurveError::InsufficientPoints {
                count: polyline.points.len(),
            });
        }
        polyline.closed = true;
        Ok(polyline)
    }

    #[must_use]
    pub fn line(start: Point3, end: Point3) -> Self {
        Self {
            points: vec![start, end],
            closed: false,
        }
    }

    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    #[must_use]
    pub fn segment_count(&self) -> usize {
        if self.closed {
            self.points.len()
        } else {
            self.points.len() - 1
        }
    }

    #[must_use]
    pub fn segment(&self, index: usize) -> (Point3, Point3) {
        let a = self.points[index];
        let b = self.points[(index + 1) % self.points.len()];
        (a, b)
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        (0..self.segment_count())
            .map(|i| {
                let (a, b) = self.segment(i);
                a.distance_to(b)
            })
            .sum()
    }

    /// Maps an arc length from the start to a curve parameter.
    ///
    /// Lengths within `tol` outside `[0, length]` are clamped; anything further
    /// out returns `None`.
    #[must_use]
    pub fn parameter_at_length(&self, length: f64, tol: Tolerance) -> Option<f64> {
        if !length.is_finite() {
            return None;
        }
        let total = self.length();
        if length < -tol.eps || length > total + tol.eps {
            return None;
        }
        let mut remaining = length.clamp(0.0, total);

        let count = self.segment_count();
        for index in 0..count {
            let (a, b) = self.segment(index);
            let seg_len = a.distance_to(b);
            if seg_len <= Tolerance::ZERO_LENGTH.eps {
                continue;
            }
            if remaining <= seg_len || index + 1 == count {
                let fraction = (remaining / seg_len).clamp(0.0, 1.0);
                return Some(index as f64 + fraction);
            }
            remaining -= seg_len;
        }
        None
    }

    #[must_use]
    pub fn point_at(&self, t: f64) -> Option<Point3> {
        let (index, fraction) = self.locate(t)?;
        let (a, b) = self.segment(index);
        Some(a.lerp(b, fraction))
    }

    /// Unit tangent at parameter `t`. At an interior vertex the outgoing segment
    /// wins; at the very end the last segment is used.
    #[must_use]
    pub fn tangent_at(&self, t: f64) -> Option<Vec3> {
        let (index, _) = self.locate(t)?;
        let (a, b) = self.segment(index);
        (b - a).normalized()
    }

    /// Plane through the curve when every vertex lies within `tol` of it.
    #[must_use]
    pub fn planar_plane(&self, tol: f64) -> Option<Plane> {
        let plane = Plane::fit_loop(&self.points, Tolerance::ZERO_LENGTH)?;
        plane.contains_all(&self.points, tol).then_some(plane)
    }

    fn locate(&self, t: f64) -> Option<(usize, f64)> {
        let count = self.segment_count();
        if !t.is_finite() || count == 0 {
            return None;
        }
        let max = count as f64;
        if t < 0.0 || t > max {
            return None;
        }
        let index = (t.floor() as usize).min(count - 1);
        Some((index, t - index as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f64, y: f64) -> Point3 {
        Point3::new(x, y, 0.0)
    }

    #[test]
    fn repeated_endpoint_closes_polyline() {
        let square = [pt(0.0, 0.0), pt(1.0, 0.0), pt(1.0, 1.0), pt(0.0, 1.0), pt(0.0, 0.0)];
        let curve = Polyline3::from_points(&square, Tolerance::DEFAULT).unwrap();
        assert!(curve.is_closed());
        assert_eq!(curve.points().len(), 4);
        assert_eq!(curve.length(), 4.0);
    }

    #[test]
    fn rejects_degenerate_input() {
        let err = Polyline3::from_points(&[pt(1.0, 1.0), pt(1.0, 1.0)], Tolerance::DEFAULT)
            .unwrap_err();
        assert_eq!(err, CurveError::InsufficientPoints { count: 1 });
    }

    #[test]
    fn parameter_at_length_walks_segments() {
        let curve =
            Polyline3::from_points(&[pt(0.0, 0.0), pt(10.0, 0.0), pt(10.0, 5.0)], Tolerance::DEFAULT)
                .unwrap();
        let tol = Tolerance::DEFAULT;

        assert_eq!(curve.parameter_at_length(0.0, tol), Some(0.0));
        assert_eq!(curve.parameter_at_length(5.0, tol), Some(0.5));
        assert_eq!(curve.parameter_at_length(12.5, tol), Some(1.5));
        assert_eq!(curve.parameter_at_length(15.0, tol), Some(2.0));
        assert_eq!(curve.parameter_at_length(15.5, tol), None);

        let point = curve.point_at(1.5).unwrap();
        assert_eq!(point, pt(10.0, 2.5));
    }

    #[test]
    fn tangent_prefers_outgoing_segment() {
        let curve =
            Polyline3::from_points(&[pt(0.0, 0.0), pt(10.0, 0.0), pt(10.0, 5.0)], Tolerance::DEFAULT)
                .unwrap();
        assert_eq!(curve.tangent_at(1.0), Some(Vec3::Y));
        assert_eq!(curve.tangent_at(2.0), Some(Vec3::Y));
        assert_eq!(curve.tangent_at(0.25), Some(Vec3::X));
    }

    #[test]
    fn planar_plane_detects_warped_loop() {
        let flat = Polyline3::closed_loop(
            &[pt(0.0, 0.0), pt(2.0, 0.0), pt(2.0, 2.0), pt(0.0, 2.0)],
            Tolerance::DEFAULT,
        )
        .unwrap();
        assert!(flat.planar_plane(1e-3).is_some());

        let warped = Polyline3::closed_loop(
            &[
                pt(0.0, 0.0),
                pt(2.0, 0.0),
                Point3::new(2.0, 2.0, 0.5),
                pt(0.0, 2.0),
            ],
            Tolerance::DEFAULT,
        )
        .unwrap();
        assert!(warped.planar_plane(1e-3).is_none());
    }
}
