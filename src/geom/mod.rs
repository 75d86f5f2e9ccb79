mod boxes;
mod containment;
mod core;
mod curve;
mod offset;
mod plane;
mod region;
mod split;

pub use boxes::{Interval, OrientedBox};
pub use containment::{PointContainment, classify_point, distance_to_segment, segments_intersect};
pub use core::{Bounds2, Point3, Tolerance, Transform, Vec3, signed_area_2d};
pub use curve::{CurveError, Polyline3};
pub use offset::{OffsetDiagnostics, OffsetError, offset_loop_inward};
pub use plane::{Plane, newell_normal};
pub use region::{PlanarRegion, RegionError, to_local};
pub use split::{SplitError, split_region_by_loop};

#[cfg(test)]
mod tests;
