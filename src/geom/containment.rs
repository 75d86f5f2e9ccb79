//! Point-in-loop classification in plane coordinates.

/// Where a point sits relative to a closed loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointContainment {
    Inside,
    Outside,
    /// Within tolerance of the loop itself.
    Coincident,
}

impl PointContainment {
    /// `true` for `Outside` only; boundary points are not outside.
    #[must_use]
    pub fn is_outside(self) -> bool {
        matches!(self, Self::Outside)
    }
}

/// Classifies `point` against the closed 2D loop `polygon` (no repeated
/// closing vertex). Points closer than `tol` to any edge are `Coincident`;
/// otherwise the even-odd crossing rule decides.
#[must_use]
pub fn classify_point(polygon: &[[f64; 2]], point: [f64; 2], tol: f64) -> PointContainment {
    let n = polygon.len();
    if n < 3 {
        return PointContainment::Outside;
    }

    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        if distance_to_segment(point, a, b) <= tol {
            return PointContainment::Coincident;
        }
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let pi = polygon[i];
        let pj = polygon[j];
        if (pi[1] > point[1]) != (pj[1] > point[1]) {
            let x_cross = pj[0] + (point[1] - pj[1]) * (pi[0] - pj[0]) / (pi[1] - pj[1]);
            if point[0] < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }

    if inside {
        PointContainment::Inside
    } else {
        PointContainment::Outside
    }
}

#[must_use]
pub fn distance_to_segment(point: [f64; 2], a: [f64; 2], b: [f64; 2]) -> f64 {
    let ab = [b[0] - a[0], b[1] - a[1]];
    let ap = [point[0] - a[0], point[1] - a[1]];
    let len_sq = ab[0] * ab[0] + ab[1] * ab[1];
    let t = if len_sq > 0.0 {
        ((ap[0] * ab[0] + ap[1] * ab[1]) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let closest = [a[0] + ab[0] * t, a[1] + ab[1] * t];
    ((point[0] - closest[0]).powi(2) + (point[1] - closest[1]).powi(2)).sqrt()
}

/// Proper or touching intersection test between segments `ab` and `cd`.
#[must_use]
pub fn segments_intersect(a: [f64; 2], b: [f64; 2], c: [f64; 2], d: [f64; 2], tol: f64) -> bool {
    let d1 = orient(c, d, a);
    let d2 = orient(c, d, b);
    let d3 = orient(a, b, c);
    let d4 = orient(a, b, d);

    if ((d1 > tol && d2 < -tol) || (d1 < -tol && d2 > tol))
        && ((d3 > tol && d4 < -tol) || (d3 < -tol && d4 > tol))
    {
        return true;
    }

    distance_to_segment(a, c, d) <= tol
        || distance_to_segment(b, c, d) <= tol
        || distance_to_segment(c, a, b) <= tol
        || distance_to_segment(d, a, b) <= tol
}

fn orient(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> f64 {
    (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: [[f64; 2]; 4] = [[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0]];

    #[test]
    fn classifies_inside_outside_and_boundary() {
        assert_eq!(classify_point(&SQUARE, [2.0, 2.0], 1e-6), PointContainment::Inside);
        assert_eq!(classify_point(&SQUARE, [5.0, 2.0], 1e-6), PointContainment::Outside);
        assert_eq!(classify_point(&SQUARE, [4.0, 2.0], 1e-6), PointContainment::Coincident);
        assert_eq!(classify_point(&SQUARE, [0.0, 0.0], 1e-6), PointContainment::Coincident);
    }

    #[test]
    fn concave_notch_is_outside() {
        let notched = [
            [0.0, 0.0],
            [4.0, 0.0],
            [4.0, 4.0],
            [2.5, 4.0],
            [2.5, 1.0],
            [1.5, 1.0],
            [1.5, 4.0],
            [0.0, 4.0],
        ];
        assert_eq!(classify_point(&notched, [2.0, 3.0], 1e-6), PointContainment::Outside);
        assert_eq!(classify_point(&notched, [0.5, 3.0], 1e-6), PointContainment::Inside);
    }

    #[test]
    fn crossing_segments_intersect() {
        assert!(segments_intersect([0.0, 0.0], [2.0, 2.0], [0.0, 2.0], [2.0, 0.0], 1e-9));
        assert!(!segments_intersect([0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0], 1e-9));
    }
}
