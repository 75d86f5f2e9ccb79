//! Splitting planar regions with a closed cutting loop.
//!
//! The cutter is projected into the region plane and the region is overlaid
//! with it twice: once as an intersection (pieces under the cutter) and once
//! as a difference (pieces outside it). Together these are the split
//! fragments. A cutter that misses the region yields the region itself as the
//! only fragment.

use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::single::SingleFloatOverlay;

use super::core::{Point3, signed_area_2d};
use super::region::{PlanarRegion, to_local};

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum SplitError {
    #[error("cutting loop needs at least 3 vertices, got {count}")]
    InsufficientPoints { count: usize },

    #[error("split tolerance must be finite and positive: {tolerance}")]
    InvalidTolerance { tolerance: f64 },

    #[error("cutting loop projects to zero area on the face plane")]
    DegenerateCutter,
}

/// Splits `region` by the closed loop `cutter` at tolerance `tol`.
///
/// Consecutive fragment vertices closer than `tol` are merged.
pub fn split_region_by_loop(
    region: &PlanarRegion,
    cutter: &[Point3],
    tol: f64,
) -> Result<Vec<PlanarRegion>, SplitError> {
    if cutter.len() < 3 {
        return Err(SplitError::InsufficientPoints {
            count: cutter.len(),
        });
    }
    if !tol.is_finite() || tol <= 0.0 {
        return Err(SplitError::InvalidTolerance { tolerance: tol });
    }

    let plane = region.plane();
    let clip_contour = to_local(plane, cutter);
    if signed_area_2d(&clip_contour).abs() <= tol * tol {
        return Err(SplitError::DegenerateCutter);
    }

    let subject = region_to_paths(region);
    let clip: Vec<Vec<[f64; 2]>> = vec![clip_contour];

    let inside = subject.overlay(&clip, OverlayRule::Intersect, FillRule::EvenOdd);
    let outside = subject.overlay(&clip, OverlayRule::Difference, FillRule::EvenOdd);

    let mut fragments = Vec::new();
    for shape in inside.iter().chain(outside.iter()) {
        if let Some(fragment) = shape_to_region(region, shape, tol) {
            fragments.push(fragment);
        }
    }
    log::debug!(
        "split_region_by_loop: {} fragment(s) ({} inside, {} outside shapes)",
        fragments.len(),
        inside.len(),
        outside.len()
    );
    Ok(fragments)
}

/// Outer boundary followed by holes, in plane coordinates.
fn region_to_paths(region: &PlanarRegion) -> Vec<Vec<[f64; 2]>> {
    let mut paths = Vec::with_capacity(1 + region.holes().len());
    paths.push(region.outer_2d());
    paths.extend(region.holes_2d());
    paths
}

/// Converts one overlay shape (first contour outer, rest holes) back into a
/// region on the source plane. Shapes that shrink below 3 vertices after
/// merging are dropped. Overlay output is already well formed, so the loops
/// are taken as-is.
fn shape_to_region(
    source: &PlanarRegion,
    shape: &[Vec<[f64; 2]>],
    tol: f64,
) -> Option<PlanarRegion> {
    let plane = *source.plane();
    let mut contours = shape.iter().map(|contour| {
        dedup_contour(contour, tol)
            .into_iter()
            .map(|c| plane.point_at(c[0], c[1]))
            .collect::<Vec<_>>()
    });

    let outer = contours.next()?;
    if outer.len() < 3 {
        return None;
    }
    let holes: Vec<Vec<Point3>> = contours.filter(|hole| hole.len() >= 3).collect();
    Some(PlanarRegion::from_parts(plane, outer, holes))
}

fn dedup_contour(contour: &[[f64; 2]], tol: f64) -> Vec<[f64; 2]> {
    let mut cleaned: Vec<[f64; 2]> = Vec::with_capacity(contour.len());
    for point in contour {
        let duplicate = cleaned
            .last()
            .is_some_and(|last| (last[0] - point[0]).hypot(last[1] - point[1]) <= tol);
        if !duplicate {
            cleaned.push(*point);
        }
    }
    while cleaned.len() > 1 {
        let (first, last) = (cleaned[0], cleaned[cleaned.len() - 1]);
        if (first[0] - last[0]).hypot(first[1] - last[1]) <= tol {
            cleaned.pop();
        } else {
            break;
        }
    }
    cleaned
}
