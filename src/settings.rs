//! Toleranties die per solve aan de componenten worden meegegeven.

use serde::{Deserialize, Serialize};

use crate::geom::Tolerance;
use crate::graph::node::{MetaLookupExt, MetaMap, MetaValue};

pub const META_TOLERANCE: &str = "tolerance";
pub const META_PLANARITY_TOLERANCE: &str = "planarity_tolerance";
pub const META_ANGLE_TOLERANCE: &str = "angle_tolerance";

/// Absolute toleranties voor een solve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolveSettings {
    /// Modeltolerantie voor splitsen, samenvoegen en randcontact.
    pub absolute_tolerance: f64,
    /// Maximale afwijking van een vlak voordat een vlak als niet-planair geldt.
    pub planarity_tolerance: f64,
    /// Hoeken en lengtes onder deze waarde gelden als nul.
    pub angle_tolerance: f64,
}

impl Default for SolveSettings {
    fn default() -> Self {
        Self {
            absolute_tolerance: 0.001,
            planarity_tolerance: 0.001,
            angle_tolerance: 1e-9,
        }
    }
}

impl SolveSettings {
    /// Leest toleranties uit node-metadata. Ontbrekende of ongeldige
    /// waarden vallen terug op de standaard.
    #[must_use]
    pub fn from_meta(meta: &MetaMap) -> Self {
        let defaults = Self::default();
        Self {
            absolute_tolerance: read_positive(meta, META_TOLERANCE)
                .unwrap_or(defaults.absolute_tolerance),
            planarity_tolerance: read_positive(meta, META_PLANARITY_TOLERANCE)
                .unwrap_or(defaults.planarity_tolerance),
            angle_tolerance: read_positive(meta, META_ANGLE_TOLERANCE)
                .unwrap_or(defaults.angle_tolerance),
        }
    }

    #[must_use]
    pub fn to_meta(&self) -> MetaMap {
        let mut meta = MetaMap::new();
        meta.insert(
            META_TOLERANCE.to_owned(),
            MetaValue::from(self.absolute_tolerance),
        );
        meta.insert(
            META_PLANARITY_TOLERANCE.to_owned(),
            MetaValue::from(self.planarity_tolerance),
        );
        meta.insert(
            META_ANGLE_TOLERANCE.to_owned(),
            MetaValue::from(self.angle_tolerance),
        );
        meta
    }

    #[must_use]
    pub fn tolerance(&self) -> Tolerance {
        Tolerance::new(self.absolute_tolerance)
    }
}

fn read_positive(meta: &MetaMap, key: &str) -> Option<f64> {
    meta.get_normalized(key)
        .and_then(MetaValue::as_number)
        .filter(|value| value.is_finite() && *value > 0.0)
}
