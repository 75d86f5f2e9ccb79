//! Sharp-corner offset of closed planar loops.
//!
//! Every edge is moved along its in-plane normal by the offset distance and
//! neighbouring offset edges are re-intersected, so corners stay mitred
//! instead of being rounded. Collinear neighbours simply shift their shared
//! vertex.

use super::core::{Point3, Tolerance, signed_area_2d};
use super::plane::Plane;
use super::region::to_local;

/// Cosine above which two consecutive edge directions count as collinear.
const COLLINEAR_COS: f64 = 1.0 - 1e-12;

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum OffsetError {
    #[error("loop must have at least 3 vertices, got {count}")]
    InsufficientPoints { count: usize },

    #[error("offset distance must be finite and positive: {distance}")]
    InvalidDistance { distance: f64 },

    #[error("loop encloses no area")]
    DegenerateLoop,

    #[error("offset of {distance} collapses the loop")]
    Collapsed { distance: f64 },
}

/// Diagnostics for a loop offset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OffsetDiagnostics {
    /// Corners rebuilt by intersecting two offset edges.
    pub mitred_corners: usize,
    /// Vertices between collinear edges, shifted along the shared normal.
    pub collinear_corners: usize,
}

/// Offsets a closed loop inward by `distance` inside `plane`.
///
/// The result has the same vertex count and orientation as the input. An
/// offset that flips any edge or removes the enclosed area fails with
/// [`OffsetError::Collapsed`].
pub fn offset_loop_inward(
    points: &[Point3],
    plane: &Plane,
    distance: f64,
    tol: Tolerance,
) -> Result<(Vec<Point3>, OffsetDiagnostics), OffsetError> {
    if points.len() < 3 {
        return Err(OffsetError::InsufficientPoints {
            count: points.len(),
        });
    }
    if !distance.is_finite() || distance <= 0.0 {
        return Err(OffsetError::InvalidDistance { distance });
    }

    let mut coords = to_local(plane, points);
    let original_area = signed_area_2d(&coords);
    if original_area.abs() <= tol.eps {
        return Err(OffsetError::DegenerateLoop);
    }

    // Work counter-clockwise so the left normal points inward.
    let reversed = original_area < 0.0;
    if reversed {
        coords.reverse();
    }

    let mut diagnostics = OffsetDiagnostics::default();
    let count = coords.len();
    let mut offset = Vec::with_capacity(count);
    for i in 0..count {
        let prev = coords[(i + count - 1) % count];
        let current = coords[i];
        let next = coords[(i + 1) % count];

        let d0 = direction(prev, current).ok_or(OffsetError::DegenerateLoop)?;
        let d1 = direction(current, next).ok_or(OffsetError::DegenerateLoop)?;
        let n0 = left_normal(d0);
        let n1 = left_normal(d1);

        let cos = d0[0] * d1[0] + d0[1] * d1[1];
        if cos >= COLLINEAR_COS {
            diagnostics.collinear_corners += 1;
            offset.push([
                current[0] + n1[0] * distance,
                current[1] + n1[1] * distance,
            ]);
            continue;
        }

        let a = [current[0] + n0[0] * distance, current[1] + n0[1] * distance];
        let b = [current[0] + n1[0] * distance, current[1] + n1[1] * distance];
        let corner = intersect_lines(a, d0, b, d1).ok_or(OffsetError::Collapsed { distance })?;
        diagnostics.mitred_corners += 1;
        offset.push(corner);
    }

    // An inward offset that is too large turns edges around or inverts the loop.
    for i in 0..count {
        let j = (i + 1) % count;
        let before = [coords[j][0] - coords[i][0], coords[j][1] - coords[i][1]];
        let after = [offset[j][0] - offset[i][0], offset[j][1] - offset[i][1]];
        if before[0] * after[0] + before[1] * after[1] <= 0.0 {
            return Err(OffsetError::Collapsed { distance });
        }
    }
    if signed_area_2d(&offset) <= tol.eps {
        return Err(OffsetError::Collapsed { distance });
    }

    if reversed {
        offset.reverse();
    }
    let points = offset.iter().map(|c| plane.point_at(c[0], c[1])).collect();
    Ok((points, diagnostics))
}

fn direction(from: [f64; 2], to: [f64; 2]) -> Option<[f64; 2]> {
    let dx = to[0] - from[0];
    let dy = to[1] - from[1];
    let len = (dx * dx + dy * dy).sqrt();
    if len < Tolerance::ZERO_LENGTH.eps {
        return None;
    }
    Some([dx / len, dy / len])
}

fn left_normal(d: [f64; 2]) -> [f64; 2] {
    [-d[1], d[0]]
}

/// Intersection of the lines `p + s·d` and `q + t·e`.
fn intersect_lines(p: [f64; 2], d: [f64; 2], q: [f64; 2], e: [f64; 2]) -> Option<[f64; 2]> {
    let denom = d[0] * e[1] - d[1] * e[0];
    if denom.abs() < Tolerance::ZERO_LENGTH.eps {
        return None;
    }
    let s = ((q[0] - p[0]) * e[1] - (q[1] - p[1]) * e[0]) / denom;
    Some([p[0] + d[0] * s, p[1] + d[1] * s])
}
