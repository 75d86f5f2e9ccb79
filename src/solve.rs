//! Eenmalige evaluatie van één component.
//!
//! Een mislukte evaluatie levert geen outputs op: de fout gaat met haar
//! ernstniveau naar de [`DiagnosticsSink`] en de outputs blijven leeg.
//! Elke melding gaat daarnaast via [`LogSink`] naar de `log`-facade.

use serde::Serialize;

use crate::components::{ComponentError, ComponentKind, ComponentRegistry, OutputMap};
use crate::diagnostics::{Diagnostic, DiagnosticsCollector, DiagnosticsSink, LogSink};
use crate::graph::value::Value;
use crate::settings::SolveSettings;

/// Resultaat van een solve zoals dat naar de host gaat.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SolveReport {
    /// `None` wanneer de solve niets heeft opgeleverd.
    pub outputs: Option<OutputMap>,
    pub diagnostics: Vec<Diagnostic>,
}

impl SolveReport {
    #[must_use]
    pub fn output(&self, pin: &str) -> Option<&Value> {
        self.outputs.as_ref().and_then(|outputs| outputs.get(pin))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolveError {
    #[error("geen component gevonden voor `{0}`")]
    UnknownComponent(String),
}

/// Evalueert `component` en rapporteert een eventuele fout aan `sink`.
pub fn solve(
    component: ComponentKind,
    inputs: &[Value],
    settings: &SolveSettings,
    sink: &mut dyn DiagnosticsSink,
) -> Option<OutputMap> {
    log::debug!("solve `{}` met {} input(s)", component.name(), inputs.len());
    let missing = component.missing_input_pins(inputs.len());
    let result = if missing.is_empty() {
        component.evaluate(inputs, &settings.to_meta())
    } else {
        Err(ComponentError::Input(format!(
            "ontbrekende invoer: {}",
            missing.join(", ")
        )))
    };

    match result {
        Ok(outputs) => {
            log::debug!("solve `{}` leverde {} output(s)", component.name(), outputs.len());
            Some(outputs)
        }
        Err(error) => {
            let message = format!("{}: {}", component.name(), error.message());
            LogSink.report(error.severity(), &message);
            sink.report(error.severity(), &message);
            None
        }
    }
}

/// Zoekt het component op naam, GUID of nickname en verzamelt de
/// diagnostiek in een rapport.
pub fn solve_by_name(
    registry: &ComponentRegistry,
    component: &str,
    inputs: &[Value],
    settings: &SolveSettings,
) -> Result<SolveReport, SolveError> {
    let kind = registry
        .lookup(component)
        .ok_or_else(|| SolveError::UnknownComponent(component.to_owned()))?;

    let mut collector = DiagnosticsCollector::new();
    let outputs = solve(kind, inputs, settings, &mut collector);
    Ok(SolveReport {
        outputs,
        diagnostics: collector.into_diagnostics(),
    })
}
