//! Hulpfuncties voor het converteren van `Value`-types.

use crate::geom::{OrientedBox, PlanarRegion, Plane, Point3, Polyline3, Tolerance, Vec3};
use crate::graph::value::{BoxValue, PlaneValue, RegionValue, Value, ValueError};

use super::ComponentError;

pub fn coerce_number(value: &Value) -> Result<f64, ComponentError> {
    match value {
        Value::Number(n) => Ok(*n),
        Value::Integer(i) => Ok(*i as f64),
        Value::Boolean(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::List(l) if l.len() == 1 => coerce_number(&l[0]),
        other => Err(ValueError::type_mismatch("Number", other.kind()).into()),
    }
}

/// Gehele waarde; getallen worden afgerond.
pub fn coerce_integer(value: &Value) -> Result<i64, ComponentError> {
    match value {
        Value::Integer(i) => Ok(*i),
        Value::Number(n) if n.is_finite() => Ok(n.round() as i64),
        Value::Boolean(b) => Ok(i64::from(*b)),
        Value::List(l) if l.len() == 1 => coerce_integer(&l[0]),
        other => Err(ValueError::type_mismatch("Integer", other.kind()).into()),
    }
}

pub fn coerce_boolean(value: &Value) -> Result<bool, ComponentError> {
    match value {
        Value::Boolean(b) => Ok(*b),
        Value::Number(n) => Ok(*n != 0.0),
        Value::Integer(i) => Ok(*i != 0),
        Value::List(l) if l.len() == 1 => coerce_boolean(&l[0]),
        other => Err(ValueError::type_mismatch("Boolean", other.kind()).into()),
    }
}

/// Lijst van getallen; een enkel getal wordt een lijst van één.
pub fn coerce_numbers(value: &Value) -> Result<Vec<f64>, ComponentError> {
    match value {
        Value::List(values) => values.iter().map(coerce_number).collect(),
        other => Ok(vec![coerce_number(other)?]),
    }
}

pub fn coerce_plane(value: &PlaneValue) -> Result<Plane, ComponentError> {
    // De z-as volgt uit x en y; de meegegeven normaal dient alleen als opslag.
    Plane::new(
        Point3::from_array(value.origin),
        Vec3::from_array(value.x_axis),
        Vec3::from_array(value.y_axis),
    )
    .ok_or_else(|| ComponentError::Geometry("Vlak heeft gedegenereerde assen".to_owned()))
}

/// Eén vlak gebied. Een gesloten polyline wordt als gebied zonder gaten
/// gelezen; een lijst met meerdere gebieden wordt geweigerd.
pub fn coerce_region(value: &Value, tol: f64) -> Result<PlanarRegion, ComponentError> {
    match value {
        Value::Region(region) => region_from_value(region),
        Value::Polyline(points) => {
            let points: Vec<Point3> = points.iter().copied().map(Point3::from_array).collect();
            let curve = Polyline3::from_points(&points, Tolerance::new(tol))
                .map_err(|err| ComponentError::Geometry(format!("Ongeldige rand: {err}")))?;
            if !curve.is_closed() {
                return Err(ComponentError::Geometry(
                    "Een open polyline beschrijft geen vlak".to_owned(),
                ));
            }
            PlanarRegion::from_loops(&[curve.points().to_vec()], tol)
                .map_err(|err| ComponentError::Geometry(format!("Ongeldig vlak: {err}")))
        }
        Value::List(values) if values.len() == 1 => coerce_region(&values[0], tol),
        Value::List(values) => Err(ComponentError::Geometry(format!(
            "Verwachtte precies één vlak, kreeg {}",
            values.len()
        ))),
        other => Err(ValueError::type_mismatch("Region", other.kind()).into()),
    }
}

/// Lijst van optionele gebieden: `Null`-entries blijven `None`.
pub fn coerce_optional_regions(
    value: &Value,
    tol: f64,
) -> Result<Vec<Option<PlanarRegion>>, ComponentError> {
    match value {
        Value::List(values) => values
            .iter()
            .map(|entry| match entry {
                Value::Null => Ok(None),
                other => coerce_region(other, tol).map(Some),
            })
            .collect(),
        Value::Null => Ok(vec![None]),
        other => Ok(vec![Some(coerce_region(other, tol)?)]),
    }
}

/// Polyline uit een lijn, polyline, puntenlijst of gebiedsrand.
pub fn coerce_polyline(value: &Value, tol: Tolerance) -> Result<Polyline3, ComponentError> {
    let curve = match value {
        Value::CurveLine { p1, p2 } => {
            Polyline3::from_points(&[Point3::from_array(*p1), Point3::from_array(*p2)], tol)
        }
        Value::Polyline(points) => {
            let points: Vec<Point3> = points.iter().copied().map(Point3::from_array).collect();
            Polyline3::from_points(&points, tol)
        }
        Value::Region(region) => {
            let points: Vec<Point3> = region
                .outer
                .iter()
                .copied()
                .map(Point3::from_array)
                .collect();
            Polyline3::closed_loop(&points, tol)
        }
        Value::List(values) if values.len() == 1 => return coerce_polyline(&values[0], tol),
        Value::List(values) if values.iter().all(|v| matches!(v, Value::Point(_))) => {
            let points: Vec<Point3> = values
                .iter()
                .filter_map(|v| match v {
                    Value::Point(p) => Some(Point3::from_array(*p)),
                    _ => None,
                })
                .collect();
            Polyline3::from_points(&points, tol)
        }
        other => return Err(ValueError::type_mismatch("Curve", other.kind()).into()),
    };
    curve.map_err(|err| ComponentError::Validation(format!("Ongeldige curve: {err}")))
}

fn region_from_value(region: &RegionValue) -> Result<PlanarRegion, ComponentError> {
    let plane = coerce_plane(&region.plane)?;
    let to_points =
        |loop_: &[[f64; 3]]| loop_.iter().copied().map(Point3::from_array).collect::<Vec<_>>();
    let outer = strip_closing_point(to_points(&region.outer));
    let holes = region
        .holes
        .iter()
        .map(|hole| strip_closing_point(to_points(hole)))
        .collect();
    Ok(PlanarRegion::from_parts(plane, outer, holes))
}

fn strip_closing_point(mut points: Vec<Point3>) -> Vec<Point3> {
    if points.len() > 3 && points.first() == points.last() {
        points.pop();
    }
    points
}

#[must_use]
pub fn plane_to_value(plane: &Plane) -> PlaneValue {
    PlaneValue {
        origin: plane.origin.to_array(),
        x_axis: plane.x_axis.to_array(),
        y_axis: plane.y_axis.to_array(),
        z_axis: plane.z_axis.to_array(),
    }
}

#[must_use]
pub fn region_to_value(region: &PlanarRegion) -> Value {
    let to_arrays = |points: &[Point3]| points.iter().map(|p| p.to_array()).collect::<Vec<_>>();
    Value::Region(RegionValue {
        plane: plane_to_value(region.plane()),
        outer: to_arrays(region.outer()),
        holes: region.holes().iter().map(|hole| to_arrays(hole)).collect(),
    })
}

/// Gesloten polyline: het eerste punt wordt aan het eind herhaald.
#[must_use]
pub fn closed_polyline_to_value(points: &[Point3]) -> Value {
    let mut coords: Vec<[f64; 3]> = points.iter().map(|p| p.to_array()).collect();
    if let Some(first) = coords.first().copied() {
        coords.push(first);
    }
    Value::Polyline(coords)
}

#[must_use]
pub fn box_to_value(value: &OrientedBox) -> Value {
    Value::Box(BoxValue {
        plane: plane_to_value(&value.plane),
        x: [value.x.min, value.x.max],
        y: [value.y.min, value.y.max],
        z: [value.z.min, value.z.max],
    })
}
