//! LouverArrayGenerator: gelijkmatig verdeelde, gedraaide lamellen langs een
//! padcurve.

use std::collections::BTreeMap;
use std::ops::Range;

use crate::geom::{Interval, OrientedBox, Plane, Polyline3, Tolerance, Transform, Vec3};
use crate::graph::node::MetaMap;
use crate::graph::value::Value;
use crate::settings::SolveSettings;

use super::coerce::{
    box_to_value, coerce_boolean, coerce_integer, coerce_number, coerce_polyline, plane_to_value,
};
use super::{Component, ComponentError, ComponentResult};

pub const PIN_INPUT_CURVE: &str = "C";
pub const PIN_INPUT_COUNT: &str = "N";
pub const PIN_INPUT_ANGLE: &str = "A";
pub const PIN_INPUT_LENGTH: &str = "L";
pub const PIN_INPUT_WIDTH: &str = "W";
pub const PIN_INPUT_HEIGHT: &str = "H";
pub const PIN_INPUT_REMOVE_ENDS: &str = "R";

pub const INPUT_PINS: &[&str] = &[
    PIN_INPUT_CURVE,
    PIN_INPUT_COUNT,
    PIN_INPUT_ANGLE,
    PIN_INPUT_LENGTH,
    PIN_INPUT_WIDTH,
    PIN_INPUT_HEIGHT,
    PIN_INPUT_REMOVE_ENDS,
];

const PIN_OUTPUT_BOXES: &str = "B";
const PIN_OUTPUT_PLANES: &str = "P";

/// Hoogtes met een kleinere absolute waarde gelden als nul.
const MIN_HEIGHT: f64 = 1e-9;

#[derive(Debug, Clone)]
pub struct LouverArrayParams {
    pub path: Polyline3,
    pub count: i64,
    /// Rotatie om de verticale as, in graden.
    pub angle_degrees: f64,
    /// Maat loodrecht op de curve.
    pub length: f64,
    /// Maat langs de curve.
    pub width: f64,
    /// Extrusiehoogte; het teken bepaalt de richting.
    pub height: f64,
    pub remove_ends: bool,
}

#[derive(Debug, Clone, Default)]
pub struct LouverArrayOutput {
    pub boxes: Vec<OrientedBox>,
    /// Ongedraaide basisvlakken van de geplaatste lamellen.
    pub planes: Vec<Plane>,
    /// Booglengte van elk lamelmidden.
    pub stations: Vec<f64>,
}

/// Markerstruct voor de LouverArrayGenerator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ComponentImpl;

impl Component for ComponentImpl {
    fn evaluate(&self, inputs: &[Value], meta: &MetaMap) -> ComponentResult {
        if inputs.len() < 6 {
            return Err(ComponentError::Input(
                "LouverArrayGenerator vereist een curve, aantal, hoek, lengte, breedte en hoogte"
                    .to_owned(),
            ));
        }
        let settings = SolveSettings::from_meta(meta);

        let params = LouverArrayParams {
            path: coerce_polyline(&inputs[0], settings.tolerance())?,
            count: coerce_integer(&inputs[1])?,
            angle_degrees: coerce_number(&inputs[2])?,
            length: coerce_number(&inputs[3])?,
            width: coerce_number(&inputs[4])?,
            height: coerce_number(&inputs[5])?,
            remove_ends: match inputs.get(6) {
                None | Some(Value::Null) => false,
                Some(value) => coerce_boolean(value)?,
            },
        };
        let output = run(&params, &settings)?;

        let mut outputs = BTreeMap::new();
        outputs.insert(
            PIN_OUTPUT_BOXES.to_owned(),
            Value::List(output.boxes.iter().map(box_to_value).collect()),
        );
        outputs.insert(
            PIN_OUTPUT_PLANES.to_owned(),
            Value::List(
                output
                    .planes
                    .iter()
                    .map(|plane| Value::Plane(plane_to_value(plane)))
                    .collect(),
            ),
        );
        Ok(outputs)
    }
}

/// Halve voetafdruk langs de curve van een lamel die over `angle` radialen
/// is gedraaid.
#[must_use]
pub fn rotated_half_width(width: f64, length: f64, angle: f64) -> f64 {
    (width * 0.5) * angle.cos().abs() + (length * 0.5) * angle.sin().abs()
}

pub fn run(
    params: &LouverArrayParams,
    settings: &SolveSettings,
) -> Result<LouverArrayOutput, ComponentError> {
    let minimum = if params.remove_ends { 3 } else { 1 };
    if params.count < minimum {
        return Err(ComponentError::Warning(format!(
            "Aantal lamellen moet minstens {minimum} zijn, kreeg {}",
            params.count
        )));
    }
    if !(params.length.is_finite() && params.length > 0.0) {
        return Err(ComponentError::Validation(format!(
            "Lengte moet groter dan 0 zijn, kreeg {}",
            params.length
        )));
    }
    if !(params.width.is_finite() && params.width > 0.0) {
        return Err(ComponentError::Validation(format!(
            "Breedte moet groter dan 0 zijn, kreeg {}",
            params.width
        )));
    }
    if !params.height.is_finite() || params.height.abs() <= MIN_HEIGHT {
        return Err(ComponentError::Validation(format!(
            "Hoogte mag niet nul zijn, kreeg {}",
            params.height
        )));
    }
    if !params.angle_degrees.is_finite() {
        return Err(ComponentError::Validation(
            "Hoek moet een eindig getal zijn".to_owned(),
        ));
    }
    let curve_length = params.path.length();
    if !curve_length.is_finite() || curve_length <= settings.angle_tolerance {
        return Err(ComponentError::Validation(
            "Padcurve heeft geen lengte".to_owned(),
        ));
    }

    let angle = params.angle_degrees.to_radians();
    let half_footprint = rotated_half_width(params.width, params.length, angle);
    let span = curve_length - 2.0 * half_footprint;
    if span < -settings.absolute_tolerance {
        return Err(ComponentError::Warning(format!(
            "Lamellen passen niet: curve {curve_length}, nodig {}",
            2.0 * half_footprint
        )));
    }

    let tol = settings.tolerance();
    let mut output = LouverArrayOutput::default();
    for index in slot_range(params.count, params.remove_ends) {
        let fraction = if params.count > 1 {
            index as f64 / (params.count - 1) as f64
        } else {
            0.0
        };
        let station = half_footprint + span * fraction;
        let Some((plane, louver)) = place_louver(&params.path, station, angle, params, tol) else {
            log::debug!("LouverArrayGenerator: positie {station} overgeslagen");
            continue;
        };
        output.planes.push(plane);
        output.boxes.push(louver);
        output.stations.push(station);
    }

    log::debug!(
        "LouverArrayGenerator: {} van {} lamellen geplaatst",
        output.boxes.len(),
        params.count
    );
    Ok(output)
}

fn slot_range(count: i64, remove_ends: bool) -> Range<i64> {
    if remove_ends { 1..count - 1 } else { 0..count }
}

fn place_louver(
    path: &Polyline3,
    station: f64,
    angle: f64,
    params: &LouverArrayParams,
    tol: Tolerance,
) -> Option<(Plane, OrientedBox)> {
    let t = path.parameter_at_length(station, tol)?;
    let origin = path.point_at(t)?;
    // x volgt de horizontale richting van de curve, z blijft verticaal
    let tangent = path.tangent_at(t)?.reject_from(Vec3::Z);
    if tol.is_zero_vec3(tangent) {
        return None;
    }
    let plane = Plane::new(origin, tangent, Vec3::Z.cross(tangent))?;

    let louver = OrientedBox::new(
        plane,
        Interval::centered(params.width * 0.5),
        Interval::centered(params.length * 0.5),
        Interval::new(0.0, params.height),
    );
    let rotation = Transform::rotate_about(origin, Vec3::Z, angle)?;
    Some((plane, louver.transformed(rotation)))
}
