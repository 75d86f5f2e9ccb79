//! Basis Value-enum waarin componentwaarden en -resultaten worden
//! opgeslagen.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Beschikbare waardetypes binnen de solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Value {
    /// Geen waarde (lege of ongeldige invoer).
    Null,
    /// Een enkele numerieke waarde.
    Number(f64),
    /// Een geheel getal.
    Integer(i64),
    /// Een booleaanse waarde.
    Boolean(bool),
    /// Een 3D-punt.
    Point([f64; 3]),
    /// Een georiënteerd vlak.
    Plane(PlaneValue),
    /// Een lijnsegment, beschreven door twee punten.
    CurveLine { p1: [f64; 3], p2: [f64; 3] },
    /// Een polyline; gesloten wanneer het laatste punt gelijk is aan het eerste.
    Polyline(Vec<[f64; 3]>),
    /// Een vlak gebied met buitenrand en eventuele gaten.
    Region(RegionValue),
    /// Een georiënteerde box.
    Box(BoxValue),
    /// Een lijst van waarden.
    List(Vec<Value>),
}

/// Vlak als origin plus assen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaneValue {
    pub origin: [f64; 3],
    pub x_axis: [f64; 3],
    pub y_axis: [f64; 3],
    pub z_axis: [f64; 3],
}

/// Vlak gebied: randen zonder herhaald sluitpunt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionValue {
    pub plane: PlaneValue,
    pub outer: Vec<[f64; 3]>,
    #[serde(default)]
    pub holes: Vec<Vec<[f64; 3]>>,
}

/// Box als basisvlak met drie intervallen in lokale coördinaten.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxValue {
    pub plane: PlaneValue,
    pub x: [f64; 2],
    pub y: [f64; 2],
    pub z: [f64; 2],
}

impl Value {
    /// Geeft de variantnaam terug. Wordt gebruikt in foutmeldingen.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Number(_) => ValueKind::Number,
            Self::Integer(_) => ValueKind::Integer,
            Self::Boolean(_) => ValueKind::Boolean,
            Self::Point(_) => ValueKind::Point,
            Self::Plane(_) => ValueKind::Plane,
            Self::CurveLine { .. } => ValueKind::CurveLine,
            Self::Polyline(_) => ValueKind::Polyline,
            Self::Region(_) => ValueKind::Region,
            Self::Box(_) => ValueKind::Box,
            Self::List(_) => ValueKind::List,
        }
    }
}

/// Typefout voor wanneer een `Value` naar het verkeerde type wordt
/// geconverteerd.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("verwachtte type `{expected}` maar kreeg `{found}`")]
pub struct ValueError {
    expected: &'static str,
    found: ValueKind,
}

impl ValueError {
    #[must_use]
    pub fn type_mismatch(expected: &'static str, found: ValueKind) -> Self {
        Self { expected, found }
    }
}

/// Beschrijft het soort `Value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Number,
    Integer,
    Boolean,
    Point,
    Plane,
    CurveLine,
    Polyline,
    Region,
    Box,
    List,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "Null",
            Self::Number => "Number",
            Self::Integer => "Integer",
            Self::Boolean => "Boolean",
            Self::Point => "Point",
            Self::Plane => "Plane",
            Self::CurveLine => "CurveLine",
            Self::Polyline => "Polyline",
            Self::Region => "Region",
            Self::Box => "Box",
            Self::List => "List",
        };
        f.write_str(name)
    }
}
