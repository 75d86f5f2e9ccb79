//! Planar regions: a single flat face bounded by one outer loop and optional
//! hole loops.
//!
//! Loops are stored in world space without a repeated closing vertex. After
//! construction the outer loop runs counter-clockwise around the plane normal
//! and holes run clockwise.

use super::containment::{PointContainment, classify_point, segments_intersect};
use super::core::{Bounds2, Point3, Tolerance, signed_area_2d};
use super::plane::Plane;

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum RegionError {
    #[error("a planar region needs at least one boundary loop")]
    NoBoundary,

    #[error("boundary loop {index} has {count} vertices, at least 3 are required")]
    TooFewVertices { index: usize, count: usize },

    #[error("boundary loops do not span a plane")]
    DegeneratePlane,

    #[error("boundary deviates {deviation} from its plane (tolerance {tolerance})")]
    NonPlanar { deviation: f64, tolerance: f64 },

    #[error("boundary loop {index} encloses no area")]
    ZeroArea { index: usize },

    #[error("hole loop {index} is not strictly inside the outer boundary")]
    HoleOutsideBoundary { index: usize },

    #[error("hole loop {index} overlaps another loop")]
    HoleOverlap { index: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanarRegion {
    plane: Plane,
    outer: Vec<Point3>,
    holes: Vec<Vec<Point3>>,
}

impl PlanarRegion {
    /// Builds a region from boundary loops, fitting the plane to the loop with
    /// the largest enclosed area. That loop becomes the outer boundary; every
    /// other loop must be a hole strictly inside it.
    pub fn from_loops(loops: &[Vec<Point3>], tol: f64) -> Result<Self, RegionError> {
        if loops.is_empty() {
            return Err(RegionError::NoBoundary);
        }
        for (index, lp) in loops.iter().enumerate() {
            if lp.len() < 3 {
                return Err(RegionError::TooFewVertices {
                    index,
                    count: lp.len(),
                });
            }
        }

        let largest = loops
            .iter()
            .enumerate()
            .filter_map(|(index, lp)| {
                let plane = Plane::fit_loop(lp, Tolerance::ZERO_LENGTH)?;
                let area = signed_area_2d(&to_local(&plane, lp)).abs();
                Some((index, plane, area))
            })
            .max_by(|a, b| a.2.total_cmp(&b.2));
        let Some((outer_index, plane, _)) = largest else {
            return Err(RegionError::DegeneratePlane);
        };

        let outer = loops[outer_index].clone();
        let holes: Vec<Vec<Point3>> = loops
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != outer_index)
            .map(|(_, lp)| lp.clone())
            .collect();
        Self::with_plane(plane, outer, holes, tol)
    }

    /// Builds a region on a known plane. Validates planarity, non-zero area and
    /// hole placement, then normalizes loop orientation.
    pub fn with_plane(
        plane: Plane,
        outer: Vec<Point3>,
        holes: Vec<Vec<Point3>>,
        tol: f64,
    ) -> Result<Self, RegionError> {
        let region = Self::from_parts(plane, outer, holes);
        region.validate(tol)?;
        Ok(region.normalized())
    }

    /// Assembles a region without validation. Used when reading host values,
    /// where components run their own planarity checks.
    #[must_use]
    pub fn from_parts(plane: Plane, outer: Vec<Point3>, holes: Vec<Vec<Point3>>) -> Self {
        Self {
            plane,
            outer,
            holes,
        }
    }

    #[must_use]
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    #[must_use]
    pub fn outer(&self) -> &[Point3] {
        &self.outer
    }

    #[must_use]
    pub fn holes(&self) -> &[Vec<Point3>] {
        &self.holes
    }

    /// All loop vertices, outer boundary first.
    pub fn vertices(&self) -> impl Iterator<Item = &Point3> {
        self.outer.iter().chain(self.holes.iter().flatten())
    }

    /// Largest distance of any vertex from the region plane.
    #[must_use]
    pub fn planarity_deviation(&self) -> f64 {
        self.vertices()
            .map(|p| self.plane.distance_to(*p).abs())
            .fold(0.0, f64::max)
    }

    #[must_use]
    pub fn outer_2d(&self) -> Vec<[f64; 2]> {
        to_local(&self.plane, &self.outer)
    }

    #[must_use]
    pub fn holes_2d(&self) -> Vec<Vec<[f64; 2]>> {
        self.holes
            .iter()
            .map(|hole| to_local(&self.plane, hole))
            .collect()
    }

    /// Net area: outer loop minus holes.
    #[must_use]
    pub fn area(&self) -> f64 {
        let outer = signed_area_2d(&self.outer_2d()).abs();
        let holes: f64 = self
            .holes_2d()
            .iter()
            .map(|hole| signed_area_2d(hole).abs())
            .sum();
        (outer - holes).max(0.0)
    }

    /// Bounds of the outer loop in the coordinates of `plane`.
    #[must_use]
    pub fn bounds_in(&self, plane: &Plane) -> Option<Bounds2> {
        Bounds2::from_points(&to_local(plane, &self.outer))
    }

    /// The 2D parameter domain: outer-loop bounds in the region's own plane.
    #[must_use]
    pub fn domain(&self) -> Option<Bounds2> {
        self.bounds_in(&self.plane)
    }

    /// Evaluates normalized `(u, v)` over the parameter domain.
    #[must_use]
    pub fn point_at_normalized(&self, u: f64, v: f64) -> Option<Point3> {
        let [x, y] = self.domain()?.point_at_normalized(u, v);
        Some(self.plane.point_at(x, y))
    }

    /// Classifies a point (projected onto the plane) against the region,
    /// holes included.
    #[must_use]
    pub fn contains(&self, point: Point3, tol: f64) -> PointContainment {
        let local = self.plane.local_2d(point);
        match classify_point(&self.outer_2d(), local, tol) {
            PointContainment::Inside => {}
            other => return other,
        }
        for hole in self.holes_2d() {
            match classify_point(&hole, local, tol) {
                PointContainment::Inside => return PointContainment::Outside,
                PointContainment::Coincident => return PointContainment::Coincident,
                PointContainment::Outside => {}
            }
        }
        PointContainment::Inside
    }

    /// Adds a hole loop, the planar equivalent of building a face from the
    /// outer boundary plus an inner curve.
    pub fn with_hole(&self, hole: &[Point3], tol: f64) -> Result<Self, RegionError> {
        let mut holes = self.holes.clone();
        holes.push(hole.to_vec());
        Self::with_plane(self.plane, self.outer.clone(), holes, tol)
    }

    fn validate(&self, tol: f64) -> Result<(), RegionError> {
        let loops = std::iter::once(&self.outer).chain(self.holes.iter());
        for (index, lp) in loops.enumerate() {
            if lp.len() < 3 {
                return Err(RegionError::TooFewVertices {
                    index,
                    count: lp.len(),
                });
            }
        }

        let deviation = self.planarity_deviation();
        if deviation > tol {
            return Err(RegionError::NonPlanar {
                deviation,
                tolerance: tol,
            });
        }

        let outer = self.outer_2d();
        if signed_area_2d(&outer).abs() <= tol * tol {
            return Err(RegionError::ZeroArea { index: 0 });
        }

        let holes = self.holes_2d();
        for (offset, hole) in holes.iter().enumerate() {
            let index = offset + 1;
            if signed_area_2d(hole).abs() <= tol * tol {
                return Err(RegionError::ZeroArea { index });
            }
            let strictly_inside = hole
                .iter()
                .all(|p| classify_point(&outer, *p, tol) == PointContainment::Inside);
            if !strictly_inside || loops_cross(hole, &outer, tol) {
                return Err(RegionError::HoleOutsideBoundary { index });
            }
            for other in holes.iter().skip(offset + 1) {
                let nested = hole
                    .iter()
                    .any(|p| classify_point(other, *p, tol) != PointContainment::Outside)
                    || other
                        .iter()
                        .any(|p| classify_point(hole, *p, tol) != PointContainment::Outside);
                if nested || loops_cross(hole, other, tol) {
                    return Err(RegionError::HoleOverlap { index });
                }
            }
        }
        Ok(())
    }

    fn normalized(mut self) -> Self {
        if signed_area_2d(&self.outer_2d()) < 0.0 {
            self.outer.reverse();
        }
        let plane = self.plane;
        for hole in &mut self.holes {
            if signed_area_2d(&to_local(&plane, hole)) > 0.0 {
                hole.reverse();
            }
        }
        self
    }
}

/// Plane-local 2D coordinates of a loop.
#[must_use]
pub fn to_local(plane: &Plane, points: &[Point3]) -> Vec<[f64; 2]> {
    points.iter().map(|p| plane.local_2d(*p)).collect()
}

fn loops_cross(a: &[[f64; 2]], b: &[[f64; 2]], tol: f64) -> bool {
    let na = a.len();
    let nb = b.len();
    (0..na).any(|i| {
        (0..nb).any(|j| segments_intersect(a[i], a[(i + 1) % na], b[j], b[(j + 1) % nb], tol))
    })
}
