//! FactoredIntersectionArea: per vlak de gewogen oppervlakte binnen een
//! gesloten kadercurve.
//!
//! Elk vlak wordt met de kadercurve gesplitst. Een fragment telt als
//! "binnen" wanneer geen van zijn hoekpunten strikt buiten de kadercurve ligt.
//! Die hoekpuntregel is een benadering: een fragment buiten de curve waarvan
//! alle hoekpunten op de curve liggen telt ook mee.

use std::collections::BTreeMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::geom::{
    PlanarRegion, Plane, Point3, Polyline3, classify_point,
    split_region_by_loop, to_local,
};
use crate::graph::node::MetaMap;
use crate::graph::value::Value;
use crate::settings::SolveSettings;

use super::coerce::{coerce_numbers, coerce_optional_regions, coerce_polyline, region_to_value};
use super::{Component, ComponentError, ComponentResult};

pub const PIN_INPUT_CURVE: &str = "C";
pub const PIN_INPUT_SURFACES: &str = "S";
pub const PIN_INPUT_FACTORS: &str = "F";

pub const INPUT_PINS: &[&str] = &[PIN_INPUT_CURVE, PIN_INPUT_SURFACES, PIN_INPUT_FACTORS];

const PIN_OUTPUT_AREAS: &str = "A";
const PIN_OUTPUT_FRAGMENTS: &str = "F";
const PIN_OUTPUT_TOTAL: &str = "T";

/// Fragmenten kleiner dan deze oppervlakte worden genegeerd.
const MIN_FRAGMENT_AREA: f64 = 1e-9;

#[derive(Debug, Clone)]
pub struct IntersectionAreaParams {
    pub frame: Polyline3,
    /// Vlakken; `None` voor lege entries.
    pub surfaces: Vec<Option<PlanarRegion>>,
    pub factors: Vec<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct IntersectionAreaOutput {
    /// Gewogen oppervlakte per vlak, in invoervolgorde.
    pub areas: Vec<f64>,
    /// Alle geaccepteerde fragmenten, vlak na vlak.
    pub fragments: Vec<PlanarRegion>,
    pub total: f64,
}

/// Kadercurve in zijn eigen vlak, klaar voor puntclassificatie.
struct Frame {
    points: Vec<Point3>,
    plane: Plane,
    polygon: Vec<[f64; 2]>,
}

impl Frame {
    fn vertex_is_inside(&self, point: Point3, tol: f64) -> bool {
        !classify_point(&self.polygon, self.plane.local_2d(point), tol).is_outside()
    }
}

/// Markerstruct voor de FactoredIntersectionArea.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ComponentImpl;

impl Component for ComponentImpl {
    fn evaluate(&self, inputs: &[Value], meta: &MetaMap) -> ComponentResult {
        if inputs.len() < 3 {
            return Err(ComponentError::Input(
                "FactoredIntersectionArea vereist een curve, vlakken en factoren".to_owned(),
            ));
        }
        let settings = SolveSettings::from_meta(meta);

        let params = IntersectionAreaParams {
            frame: coerce_polyline(&inputs[0], settings.tolerance())?,
            surfaces: coerce_optional_regions(&inputs[1], settings.planarity_tolerance)?,
            factors: coerce_numbers(&inputs[2])?,
        };
        let output = run(&params, &settings)?;

        let mut outputs = BTreeMap::new();
        outputs.insert(
            PIN_OUTPUT_AREAS.to_owned(),
            Value::List(output.areas.iter().copied().map(Value::Number).collect()),
        );
        outputs.insert(
            PIN_OUTPUT_FRAGMENTS.to_owned(),
            Value::List(output.fragments.iter().map(region_to_value).collect()),
        );
        outputs.insert(PIN_OUTPUT_TOTAL.to_owned(), Value::Number(output.total));
        Ok(outputs)
    }
}

pub fn run(
    params: &IntersectionAreaParams,
    settings: &SolveSettings,
) -> Result<IntersectionAreaOutput, ComponentError> {
    if params.surfaces.len() != params.factors.len() {
        return Err(ComponentError::Validation(format!(
            "Aantal vlakken ({}) en factoren ({}) verschilt",
            params.surfaces.len(),
            params.factors.len()
        )));
    }
    if !params.frame.is_closed() {
        return Err(ComponentError::Validation(
            "Kadercurve moet gesloten zijn".to_owned(),
        ));
    }
    let plane = params
        .frame
        .planar_plane(settings.planarity_tolerance)
        .ok_or_else(|| ComponentError::Validation("Kadercurve moet planair zijn".to_owned()))?;

    let points = params.frame.points().to_vec();
    let frame = Frame {
        polygon: to_local(&plane, &points),
        points,
        plane,
    };

    let per_surface = evaluate_surfaces(&frame, params, settings.absolute_tolerance);

    let mut output = IntersectionAreaOutput::default();
    for (area, fragments) in per_surface {
        output.total += area;
        output.areas.push(area);
        output.fragments.extend(fragments);
    }
    log::debug!(
        "FactoredIntersectionArea: {} vlak(ken), {} fragment(en), totaal {}",
        output.areas.len(),
        output.fragments.len(),
        output.total
    );
    Ok(output)
}

#[cfg(feature = "parallel")]
fn evaluate_surfaces(
    frame: &Frame,
    params: &IntersectionAreaParams,
    tol: f64,
) -> Vec<(f64, Vec<PlanarRegion>)> {
    params
        .surfaces
        .par_iter()
        .zip(params.factors.par_iter())
        .map(|(surface, factor)| evaluate_surface(frame, surface.as_ref(), *factor, tol))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn evaluate_surfaces(
    frame: &Frame,
    params: &IntersectionAreaParams,
    tol: f64,
) -> Vec<(f64, Vec<PlanarRegion>)> {
    params
        .surfaces
        .iter()
        .zip(params.factors.iter())
        .map(|(surface, factor)| evaluate_surface(frame, surface.as_ref(), *factor, tol))
        .collect()
}

fn evaluate_surface(
    frame: &Frame,
    surface: Option<&PlanarRegion>,
    factor: f64,
    tol: f64,
) -> (f64, Vec<PlanarRegion>) {
    let Some(surface) = surface else {
        return (0.0, Vec::new());
    };

    let fragments = match split_region_by_loop(surface, &frame.points, tol) {
        Ok(fragments) => fragments,
        Err(err) => {
            log::debug!("FactoredIntersectionArea: splitsen mislukt ({err}), oppervlakte 0");
            return (0.0, Vec::new());
        }
    };

    let inside: Vec<PlanarRegion> = fragments
        .into_iter()
        .filter(|fragment| fragment.area() >= MIN_FRAGMENT_AREA)
        .filter(|fragment| {
            fragment
                .vertices()
                .all(|vertex| frame.vertex_is_inside(*vertex, tol))
        })
        .collect();

    let area: f64 = inside.iter().map(PlanarRegion::area).sum();
    (area * factor, inside)
}
