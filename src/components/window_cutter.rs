//! WindowCutter: snijdt een rechthoekige raamopening in een vlak wandvlak.
//!
//! De opening wordt op relatieve (u, v)-coördinaten binnen het werkgebied
//! geplaatst. Het werkgebied is de wandrand, eventueel naar binnen verschoven
//! met de marge. Een opening die groter is dan de beschikbare ruimte wordt
//! stil verkleind.

use std::collections::BTreeMap;

use crate::geom::{OffsetError, PlanarRegion, Point3, offset_loop_inward};
use crate::graph::node::MetaMap;
use crate::graph::value::Value;
use crate::settings::SolveSettings;

use super::coerce::{closed_polyline_to_value, coerce_number, coerce_region, region_to_value};
use super::{Component, ComponentError, ComponentResult};

pub const PIN_INPUT_WALL: &str = "S";
pub const PIN_INPUT_WIDTH: &str = "W";
pub const PIN_INPUT_HEIGHT: &str = "H";
pub const PIN_INPUT_U: &str = "U";
pub const PIN_INPUT_V: &str = "V";
pub const PIN_INPUT_MARGIN: &str = "M";

pub const INPUT_PINS: &[&str] = &[
    PIN_INPUT_WALL,
    PIN_INPUT_WIDTH,
    PIN_INPUT_HEIGHT,
    PIN_INPUT_U,
    PIN_INPUT_V,
    PIN_INPUT_MARGIN,
];

const PIN_OUTPUT_WALL: &str = "W";
const PIN_OUTPUT_OUTLINE: &str = "O";
const PIN_OUTPUT_WORK_AREA: &str = "A";

/// Marges tot en met deze waarde gebruiken de wandrand zelf.
const MARGIN_EPSILON: f64 = 1e-9;

/// Invoer van de WindowCutter.
#[derive(Debug, Clone)]
pub struct WindowCutterParams {
    pub wall: PlanarRegion,
    pub width: f64,
    pub height: f64,
    pub u: f64,
    pub v: f64,
    pub margin: f64,
}

/// Afstanden van het openingsmidden tot de vier rechthoekzijden, in
/// wandvlakcoördinaten.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutoutOffsets {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

#[derive(Debug, Clone)]
pub struct WindowCutterOutput {
    /// Wand met opening, of de oorspronkelijke wand als de opening niet
    /// als gat kon worden toegevoegd.
    pub wall: PlanarRegion,
    /// Rand van de opening; `None` wanneer de opening niet is gemaakt.
    pub outline: Option<Vec<Point3>>,
    /// Rand van het werkgebied waarbinnen is begrensd.
    pub work_area: Vec<Point3>,
    pub center: Point3,
    pub offsets: CutoutOffsets,
}

/// Markerstruct voor de WindowCutter.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ComponentImpl;

impl Component for ComponentImpl {
    fn evaluate(&self, inputs: &[Value], meta: &MetaMap) -> ComponentResult {
        if inputs.len() < 5 {
            return Err(ComponentError::Input(
                "WindowCutter vereist een wandvlak, breedte, hoogte, u en v".to_owned(),
            ));
        }
        let settings = SolveSettings::from_meta(meta);

        let params = WindowCutterParams {
            wall: coerce_region(&inputs[0], settings.planarity_tolerance)?,
            width: coerce_number(&inputs[1])?,
            height: coerce_number(&inputs[2])?,
            u: coerce_number(&inputs[3])?,
            v: coerce_number(&inputs[4])?,
            margin: match inputs.get(5) {
                None | Some(Value::Null) => 0.0,
                Some(value) => coerce_number(value)?,
            },
        };

        let output = run(&params, &settings)?;

        let mut outputs = BTreeMap::new();
        outputs.insert(PIN_OUTPUT_WALL.to_owned(), region_to_value(&output.wall));
        outputs.insert(
            PIN_OUTPUT_OUTLINE.to_owned(),
            output
                .outline
                .as_deref()
                .map_or(Value::Null, closed_polyline_to_value),
        );
        outputs.insert(
            PIN_OUTPUT_WORK_AREA.to_owned(),
            closed_polyline_to_value(&output.work_area),
        );
        Ok(outputs)
    }
}

/// Snijdt de opening. Alle validatie gebeurt vóór de constructie.
pub fn run(
    params: &WindowCutterParams,
    settings: &SolveSettings,
) -> Result<WindowCutterOutput, ComponentError> {
    let wall = &params.wall;
    if wall.outer().len() < 3 {
        return Err(ComponentError::Geometry(
            "Wandvlak heeft minstens drie hoekpunten nodig".to_owned(),
        ));
    }
    let deviation = wall.planarity_deviation();
    if deviation > settings.planarity_tolerance {
        return Err(ComponentError::Geometry(format!(
            "Wandvlak is niet planair (afwijking {deviation}, tolerantie {})",
            settings.planarity_tolerance
        )));
    }
    for (label, value) in [("u", params.u), ("v", params.v)] {
        if !(0.0..=1.0).contains(&value) {
            return Err(ComponentError::Range(format!(
                "{label} moet tussen 0 en 1 liggen, kreeg {value}"
            )));
        }
    }
    for (label, value) in [
        ("Breedte", params.width),
        ("Hoogte", params.height),
        ("Marge", params.margin),
    ] {
        if !value.is_finite() {
            return Err(ComponentError::Range(format!(
                "{label} moet eindig zijn, kreeg {value}"
            )));
        }
    }

    // breedte loopt horizontaal en hoogte verticaal, los van het startpunt van de rand
    let plane = wall.plane().upright(settings.tolerance());
    let work_area = if params.margin <= MARGIN_EPSILON {
        wall.outer().to_vec()
    } else {
        let (inset, diagnostics) =
            offset_loop_inward(wall.outer(), &plane, params.margin, settings.tolerance())
                .map_err(|err| match err {
                    OffsetError::Collapsed { distance } => ComponentError::Warning(format!(
                        "Marge {distance} is te groot voor het wandvlak"
                    )),
                    other => {
                        ComponentError::Geometry(format!("Marge-offset is mislukt: {other}"))
                    }
                })?;
        log::debug!(
            "WindowCutter: werkgebied verschoven met {} ({} hoeken)",
            params.margin,
            diagnostics.mitred_corners
        );
        inset
    };

    let work_region = PlanarRegion::with_plane(
        plane,
        work_area.clone(),
        Vec::new(),
        settings.planarity_tolerance,
    )
    .map_err(|err| ComponentError::Geometry(format!("Werkgebied is ongeldig: {err}")))?;

    let center = work_region
        .point_at_normalized(params.u, params.v)
        .ok_or_else(|| ComponentError::Geometry("Werkgebied heeft geen domein".to_owned()))?;
    let bounds = work_region
        .bounds_in(&plane)
        .ok_or_else(|| ComponentError::Geometry("Werkgebied heeft geen begrenzing".to_owned()))?;

    let [cx, cy] = plane.local_2d(center);
    let half_width = params.width.abs() * 0.5;
    let half_height = params.height.abs() * 0.5;
    let offsets = CutoutOffsets {
        left: half_width.min((cx - bounds.min[0]).max(0.0)),
        right: half_width.min((bounds.max[0] - cx).max(0.0)),
        bottom: half_height.min((cy - bounds.min[1]).max(0.0)),
        top: half_height.min((bounds.max[1] - cy).max(0.0)),
    };

    let rectangle = vec![
        plane.point_at(cx - offsets.left, cy - offsets.bottom),
        plane.point_at(cx + offsets.right, cy - offsets.bottom),
        plane.point_at(cx + offsets.right, cy + offsets.top),
        plane.point_at(cx - offsets.left, cy + offsets.top),
    ];

    // bestaande gaten vervallen: het resultaat is buitenrand plus opening
    let face = PlanarRegion::from_parts(plane, wall.outer().to_vec(), Vec::new());
    let (wall, outline) = match face.with_hole(&rectangle, settings.absolute_tolerance) {
        Ok(cut) => (cut, Some(rectangle)),
        Err(err) => {
            log::debug!("WindowCutter: opening niet toegevoegd ({err}), wand blijft ongewijzigd");
            (wall.clone(), None)
        }
    };

    Ok(WindowCutterOutput {
        wall,
        outline,
        work_area,
        center,
        offsets,
    })
}
