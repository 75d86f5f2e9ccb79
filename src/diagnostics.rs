//! Rapportage van component-diagnostiek naar de host.
//!
//! Een mislukte solve levert geen outputs op; de reden komt als diagnostiek
//! met een ernstniveau bij een [`DiagnosticsSink`] terecht.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Ernstniveau van een diagnostiek-melding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => f.write_str("warning"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// Eén melding, zoals die naar de host gaat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

/// Ontvanger van diagnostiek tijdens een solve.
pub trait DiagnosticsSink {
    fn report(&mut self, severity: Severity, message: &str);
}

/// Verzamelt meldingen in geheugen, bv. voor een solve-rapport of tests.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticsCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticsCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diagnostic| diagnostic.severity == Severity::Error)
    }

    #[must_use]
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl DiagnosticsSink for DiagnosticsCollector {
    fn report(&mut self, severity: Severity, message: &str) {
        self.diagnostics.push(Diagnostic {
            severity,
            message: message.to_owned(),
        });
    }
}

/// Stuurt meldingen door naar de `log`-facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticsSink for LogSink {
    fn report(&mut self, severity: Severity, message: &str) {
        match severity {
            Severity::Warning => log::warn!("{message}"),
            Severity::Error => log::error!("{message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DiagnosticsCollector, DiagnosticsSink, LogSink, Severity};

    #[test]
    fn collector_keeps_report_order() {
        let mut sink = DiagnosticsCollector::new();
        sink.report(Severity::Warning, "eerste");
        assert!(!sink.has_errors());
        sink.report(Severity::Error, "tweede");

        let diagnostics = sink.into_diagnostics();
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].message, "eerste");
        assert_eq!(diagnostics[1].severity, Severity::Error);
    }

    #[test]
    fn log_sink_accepts_both_severities() {
        let mut sink = LogSink;
        sink.report(Severity::Warning, "waarschuwing");
        sink.report(Severity::Error, "fout");
    }
}
