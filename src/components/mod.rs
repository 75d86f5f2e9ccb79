//! Component registry en evaluatie-logica.

use std::collections::HashMap;

use crate::diagnostics::Severity;
use crate::graph::node::MetaMap;
use crate::graph::value::{Value, ValueError};

pub mod coerce;
pub mod intersection_area;
pub mod louver_array;
pub mod window_cutter;

/// Output-map van een component: pinnickname → waarde.
pub type OutputMap = std::collections::BTreeMap<String, Value>;

/// Fouttype voor component-evaluaties.
///
/// Elke variant hoort bij één ernstniveau; alleen [`ComponentError::Warning`]
/// wordt als waarschuwing gerapporteerd.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ComponentError {
    /// Ongeldige of gedegenereerde geometrie.
    #[error("{0}")]
    Geometry(String),
    /// Parameter buiten het toegestane domein.
    #[error("{0}")]
    Range(String),
    /// Inconsistente invoer, zoals lijsten van ongelijke lengte.
    #[error("{0}")]
    Validation(String),
    /// Herstelbaar maatprobleem; de solve stopt wel.
    #[error("{0}")]
    Warning(String),
    /// Ontbrekende of verkeerd getypeerde invoer.
    #[error("{0}")]
    Input(String),
}

impl ComponentError {
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            Self::Warning(_) => Severity::Warning,
            _ => Severity::Error,
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Geometry(s)
            | Self::Range(s)
            | Self::Validation(s)
            | Self::Warning(s)
            | Self::Input(s) => s,
        }
    }
}

impl From<ValueError> for ComponentError {
    fn from(error: ValueError) -> Self {
        Self::Input(error.to_string())
    }
}

/// Resultaat van een component-executie.
pub type ComponentResult = Result<OutputMap, ComponentError>;

/// Trait die alle componentimplementaties dienen te implementeren.
pub trait Component {
    fn evaluate(&self, inputs: &[Value], meta: &MetaMap) -> ComponentResult;
}

/// Beschikbare componenttypen binnen de registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    WindowCutter(window_cutter::ComponentImpl),
    IntersectionArea(intersection_area::ComponentImpl),
    LouverArray(louver_array::ComponentImpl),
}

impl ComponentKind {
    /// Alle componenten, in registratievolgorde.
    pub const ALL: [Self; 3] = [
        Self::WindowCutter(window_cutter::ComponentImpl),
        Self::IntersectionArea(intersection_area::ComponentImpl),
        Self::LouverArray(louver_array::ComponentImpl),
    ];

    pub fn evaluate(&self, inputs: &[Value], meta: &MetaMap) -> ComponentResult {
        match self {
            Self::WindowCutter(component) => component.evaluate(inputs, meta),
            Self::IntersectionArea(component) => component.evaluate(inputs, meta),
            Self::LouverArray(component) => component.evaluate(inputs, meta),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::WindowCutter(_) => "WindowCutter",
            Self::IntersectionArea(_) => "FactoredIntersectionArea",
            Self::LouverArray(_) => "LouverArrayGenerator",
        }
    }

    #[must_use]
    pub fn input_pins(&self) -> &'static [&'static str] {
        match self {
            Self::WindowCutter(_) => window_cutter::INPUT_PINS,
            Self::IntersectionArea(_) => intersection_area::INPUT_PINS,
            Self::LouverArray(_) => louver_array::INPUT_PINS,
        }
    }

    #[must_use]
    pub fn optional_input_pins(&self) -> &'static [&'static str] {
        match self {
            Self::WindowCutter(_) => &[window_cutter::PIN_INPUT_MARGIN],
            Self::IntersectionArea(_) => &[],
            Self::LouverArray(_) => &[louver_array::PIN_INPUT_REMOVE_ENDS],
        }
    }

    /// Verplichte pins die ontbreken wanneer er `supplied` inputs zijn.
    #[must_use]
    pub fn missing_input_pins(&self, supplied: usize) -> Vec<&'static str> {
        let optional = self.optional_input_pins();
        self.input_pins()
            .iter()
            .skip(supplied)
            .filter(|pin| !optional.contains(pin))
            .copied()
            .collect()
    }
}

/// Metadata voor registraties in de componentregistry.
#[derive(Debug, Clone, Copy)]
pub struct Registration {
    pub guids: &'static [&'static str],
    pub names: &'static [&'static str],
    pub kind: ComponentKind,
}

/// Registraties van alle gevelcomponenten.
pub const REGISTRATIONS: &[Registration] = &[
    Registration {
        guids: &["{3f9c1a52-7d4e-4b8a-9e21-6a0c5d8b4f17}"],
        names: &["WindowCutter", "Window Cutter", "WinCut"],
        kind: ComponentKind::WindowCutter(window_cutter::ComponentImpl),
    },
    Registration {
        guids: &["{b6e2d0f8-41c3-4a97-8d5e-2c7f19a3e604}"],
        names: &[
            "FactoredIntersectionArea",
            "Factored Intersection Area",
            "FIA",
        ],
        kind: ComponentKind::IntersectionArea(intersection_area::ComponentImpl),
    },
    Registration {
        guids: &["{8a4d7c3e-25b1-4f60-b9c8-e13a6f02d5b9}"],
        names: &["LouverArrayGenerator", "Louver Array", "Louvers"],
        kind: ComponentKind::LouverArray(louver_array::ComponentImpl),
    },
];

/// Registry die componentimplementaties opzoekt op GUID of naam.
#[derive(Debug, Clone)]
pub struct ComponentRegistry {
    by_guid: HashMap<String, ComponentKind>,
    by_name: HashMap<String, ComponentKind>,
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        let mut registry = Self::new();
        for registration in REGISTRATIONS {
            for guid in registration.guids {
                registry.register_guid(guid, registration.kind);
            }
            registry.register_names(registration.names, registration.kind);
        }
        registry
    }
}

impl ComponentRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            by_guid: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    pub fn register_guid(&mut self, guid: impl AsRef<str>, kind: ComponentKind) {
        let key = normalize_guid(guid.as_ref());
        self.by_guid.insert(key, kind);
    }

    pub fn register_names(&mut self, names: &[&str], kind: ComponentKind) {
        for name in names {
            let key = normalize_name(name);
            self.by_name.insert(key, kind);
        }
    }

    #[must_use]
    pub fn resolve(
        &self,
        guid: Option<&str>,
        name: Option<&str>,
        nickname: Option<&str>,
    ) -> Option<ComponentKind> {
        if let Some(guid) = guid {
            if let Some(component) = self.by_guid.get(&normalize_guid(guid)) {
                return Some(*component);
            }
        }

        if let Some(name) = name {
            if let Some(component) = self.by_name.get(&normalize_name(name)) {
                return Some(*component);
            }
        }

        if let Some(nickname) = nickname {
            if let Some(component) = self.by_name.get(&normalize_name(nickname)) {
                return Some(*component);
            }
        }

        None
    }

    /// Zoekt een component op een willekeurige sleutel: GUID, naam of nickname.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<ComponentKind> {
        self.resolve(Some(key), Some(key), None)
    }
}

fn normalize_guid(guid: &str) -> String {
    guid.trim_matches(|c| c == '{' || c == '}').to_lowercase()
}

fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::{ComponentError, ComponentKind, ComponentRegistry};
    use crate::diagnostics::Severity;
    use crate::graph::value::{ValueError, ValueKind};

    #[test]
    fn lookup_by_guid_and_name() {
        let registry = ComponentRegistry::default();

        let component = registry
            .resolve(Some("{3F9C1A52-7D4E-4B8A-9E21-6A0C5D8B4F17}"), None, None)
            .unwrap();
        assert_eq!(component.name(), "WindowCutter");

        let by_name = registry
            .resolve(None, Some("Factored Intersection Area"), None)
            .unwrap();
        assert!(matches!(by_name, ComponentKind::IntersectionArea(_)));

        let by_nickname = registry.resolve(None, None, Some("louvers")).unwrap();
        assert!(matches!(by_nickname, ComponentKind::LouverArray(_)));

        assert!(registry.lookup("Extrude").is_none());
    }

    #[test]
    fn every_component_is_registered() {
        let registry = ComponentRegistry::default();
        for kind in ComponentKind::ALL {
            assert_eq!(registry.lookup(kind.name()), Some(kind));
        }
    }

    #[test]
    fn optional_pins_are_never_missing() {
        let cutter = ComponentKind::ALL[0];
        assert_eq!(cutter.missing_input_pins(3), vec!["U", "V"]);
        assert!(cutter.missing_input_pins(5).is_empty());

        let louvers = ComponentKind::ALL[2];
        assert!(louvers.missing_input_pins(6).is_empty());
        assert_eq!(louvers.missing_input_pins(5), vec!["H"]);
    }

    #[test]
    fn only_warnings_have_warning_severity() {
        assert_eq!(
            ComponentError::Warning("past niet".into()).severity(),
            Severity::Warning
        );
        assert_eq!(
            ComponentError::Range("u buiten bereik".into()).severity(),
            Severity::Error
        );

        let from_value: ComponentError =
            ValueError::type_mismatch("Number", ValueKind::Box).into();
        assert!(matches!(from_value, ComponentError::Input(_)));
        assert_eq!(from_value.message(), "verwachtte type `Number` maar kreeg `Box`");
        assert_eq!(from_value.severity(), Severity::Error);
    }
}
