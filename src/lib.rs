#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod components;
pub mod diagnostics;
pub mod geom;
pub mod graph;
pub mod settings;
pub mod solve;

use std::fmt;

use components::{ComponentKind, ComponentRegistry};
use graph::value::Value;
use settings::SolveSettings;
use solve::{SolveError, SolveReport};
use wasm_bindgen::prelude::*;

cfg_if::cfg_if! {
    if #[cfg(all(feature = "console_error_panic_hook", target_arch = "wasm32"))] {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            console_error_panic_hook::set_once();
            init_logger();
        }
    } else {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            // no-op fallback when panic hook is disabled
            init_logger();
        }
    }
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    if log::set_logger(&DEFAULT_LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {
    // no-op fallback when debug logs are disabled
}

#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
#[wasm_bindgen]
pub async fn initialize_parallel(worker_count: Option<u32>) -> Result<(), wasm_bindgen::JsError> {
    let threads = worker_count
        .map(|count| count.max(1) as usize)
        .or_else(|| {
            std::thread::available_parallelism()
                .map(|value| value.get())
                .ok()
        })
        .unwrap_or(1);

    wasm_bindgen_rayon::init_thread_pool(threads)
        .await
        .map_err(|err| {
            wasm_bindgen::JsError::new(&format!("kon rayon threadpool niet initialiseren: {err}"))
        })
}

#[macro_export]
macro_rules! debug_log {
    ($($t:tt)*) => {{
        #[cfg(feature = "debug_logs")]
        {
            #[cfg(target_arch = "wasm32")]
            {
                ::web_sys::console::log_1(&::wasm_bindgen::JsValue::from_str(&format!($($t)*)));
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                println!("{}", format!($($t)*));
            }
        }
    }};
}

/// Public entry point for consumers.
#[wasm_bindgen]
pub struct Engine {
    initialized: bool,
    registry: ComponentRegistry,
    settings: SolveSettings,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl Engine {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Engine {
        Engine {
            initialized: true,
            registry: ComponentRegistry::default(),
            settings: SolveSettings::default(),
        }
    }

    /// Geeft terug of de engine de minimale initialisatie heeft doorlopen.
    #[wasm_bindgen]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Namen van alle beschikbare componenten.
    #[wasm_bindgen]
    pub fn component_names(&self) -> Result<JsValue, JsValue> {
        let names: Vec<&'static str> = ComponentKind::ALL.iter().map(ComponentKind::name).collect();
        serde_wasm_bindgen::to_value(&names).map_err(to_js_error)
    }

    /// Vervangt de standaardtoleranties voor volgende solves.
    #[wasm_bindgen]
    pub fn set_settings(&mut self, settings: JsValue) -> Result<(), JsValue> {
        self.settings = serde_wasm_bindgen::from_value(settings).map_err(to_js_error)?;
        Ok(())
    }

    /// Evalueert één component. `inputs` is een lijst van `Value`s in
    /// pinvolgorde; `settings` is optioneel en overschrijft de
    /// engine-toleranties voor deze solve.
    #[wasm_bindgen]
    pub fn solve(
        &self,
        component: &str,
        inputs: JsValue,
        settings: JsValue,
    ) -> Result<JsValue, JsValue> {
        let inputs: Vec<Value> = serde_wasm_bindgen::from_value(inputs).map_err(to_js_error)?;
        let settings: Option<SolveSettings> = if settings.is_undefined() || settings.is_null() {
            None
        } else {
            Some(serde_wasm_bindgen::from_value(settings).map_err(to_js_error)?)
        };

        let report = self
            .solve_values(component, &inputs, settings.as_ref())
            .map_err(to_js_error)?;
        debug_log!(
            "solve `{component}`: {} diagnostiek-melding(en)",
            report.diagnostics.len()
        );
        serde_wasm_bindgen::to_value(&report).map_err(to_js_error)
    }
}

impl Engine {
    /// Native variant van [`Engine::solve`].
    pub fn solve_values(
        &self,
        component: &str,
        inputs: &[Value],
        settings: Option<&SolveSettings>,
    ) -> Result<SolveReport, SolveError> {
        let settings = settings.unwrap_or(&self.settings);
        solve::solve_by_name(&self.registry, component, inputs, settings)
    }

    #[must_use]
    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    #[must_use]
    pub fn settings(&self) -> &SolveSettings {
        &self.settings
    }

    pub fn set_solve_settings(&mut self, settings: SolveSettings) {
        self.settings = settings;
    }
}

fn to_js_error<E: fmt::Display>(error: E) -> JsValue {
    js_error(&error.to_string())
}

fn js_error(message: &str) -> JsValue {
    #[cfg(target_arch = "wasm32")]
    {
        wasm_bindgen::JsError::new(message).into()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
        JsValue::NULL
    }
}
