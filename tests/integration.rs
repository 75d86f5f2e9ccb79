use ghx_facade::Engine;
use ghx_facade::components::{ComponentKind, ComponentRegistry};
use ghx_facade::diagnostics::{DiagnosticsCollector, Severity};
use ghx_facade::graph::value::{BoxValue, RegionValue, Value};
use ghx_facade::settings::SolveSettings;
use ghx_facade::solve::solve;

#[test]
fn engine_initializes() {
    let engine = Engine::new();
    assert!(engine.is_initialized());
}

#[test]
fn registry_resolves_every_component_by_name() {
    let registry = ComponentRegistry::default();
    for kind in ComponentKind::ALL {
        assert_eq!(registry.lookup(kind.name()), Some(kind));
        assert!(!kind.input_pins().is_empty());
    }
}

#[test]
fn window_cutter_cuts_vertical_wall() {
    let engine = Engine::new();
    let report = engine
        .solve_values(
            "WindowCutter",
            &[
                wall_10x3(),
                Value::Number(2.0),
                Value::Number(1.0),
                Value::Number(0.5),
                Value::Number(0.5),
                Value::Number(0.25),
            ],
            None,
        )
        .expect("known component");

    assert!(report.diagnostics.is_empty(), "{:?}", report.diagnostics);
    let Some(Value::Region(RegionValue { holes, .. })) = report.output("W") else {
        panic!("expected a wall region, got {:?}", report.output("W"));
    };
    assert_eq!(holes.len(), 1);

    let Some(Value::Polyline(outline)) = report.output("O") else {
        panic!("expected an outline");
    };
    assert_eq!(outline.len(), 5);
    assert_point_close(&outline[0], [4.0, 0.0, 1.0]);
    assert_point_close(&outline[2], [6.0, 0.0, 2.0]);

    let Some(Value::Polyline(work_area)) = report.output("A") else {
        panic!("expected a work area");
    };
    assert_point_close(&work_area[0], [0.25, 0.0, 0.25]);
}

#[test]
fn window_cutter_reports_range_error_without_outputs() {
    let engine = Engine::new();
    let report = engine
        .solve_values(
            "WindowCutter",
            &[
                wall_10x3(),
                Value::Number(2.0),
                Value::Number(1.0),
                Value::Number(1.2),
                Value::Number(0.5),
            ],
            None,
        )
        .unwrap();
    assert!(report.outputs.is_none());
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].severity, Severity::Error);
}

#[test]
fn intersection_area_keeps_list_positions() {
    let engine = Engine::new();
    let report = engine
        .solve_values(
            "FactoredIntersectionArea",
            &[
                square(0.0, 0.0, 10.0),
                Value::List(vec![
                    square(2.0, 2.0, 2.0),
                    Value::Null,
                    square(8.0, 0.0, 4.0),
                ]),
                Value::List(vec![
                    Value::Number(1.5),
                    Value::Number(3.0),
                    Value::Number(1.0),
                ]),
            ],
            None,
        )
        .unwrap();

    let Some(Value::List(areas)) = report.output("A") else {
        panic!("expected area list");
    };
    let areas: Vec<f64> = areas
        .iter()
        .map(|value| match value {
            Value::Number(n) => *n,
            other => panic!("unexpected value: {other:?}"),
        })
        .collect();
    assert_eq!(areas.len(), 3);
    assert_close(areas[0], 6.0, 1e-6);
    assert_eq!(areas[1], 0.0);
    assert_close(areas[2], 8.0, 1e-6);

    let Some(Value::List(fragments)) = report.output("F") else {
        panic!("expected fragment list");
    };
    assert_eq!(fragments.len(), 2);
    assert!(matches!(report.output("T"), Some(Value::Number(t)) if (t - 14.0).abs() < 1e-6));
}

#[test]
fn intersection_area_rejects_mismatched_lists() {
    let mut sink = DiagnosticsCollector::new();
    let outputs = solve(
        ComponentKind::ALL[1],
        &[
            square(0.0, 0.0, 10.0),
            Value::List(vec![square(1.0, 1.0, 1.0)]),
            Value::List(vec![Value::Number(1.0), Value::Number(2.0)]),
        ],
        &SolveSettings::default(),
        &mut sink,
    );
    assert!(outputs.is_none());
    assert!(sink.has_errors());
}

#[test]
fn louvers_are_evenly_spaced_boxes() {
    let engine = Engine::new();
    let report = engine
        .solve_values(
            "LouverArrayGenerator",
            &[
                Value::CurveLine {
                    p1: [0.0, 0.0, 0.0],
                    p2: [1000.0, 0.0, 0.0],
                },
                Value::Integer(5),
                Value::Number(0.0),
                Value::Number(200.0),
                Value::Number(100.0),
                Value::Number(-40.0),
                Value::Boolean(false),
            ],
            None,
        )
        .unwrap();

    let Some(Value::List(boxes)) = report.output("B") else {
        panic!("expected boxes");
    };
    let expected_x = [50.0, 275.0, 500.0, 725.0, 950.0];
    assert_eq!(boxes.len(), expected_x.len());
    for (value, x) in boxes.iter().zip(expected_x) {
        let Value::Box(BoxValue { plane, x: xs, y, z }) = value else {
            panic!("expected box, got {value:?}");
        };
        assert_point_close(&plane.origin, [x, 0.0, 0.0]);
        assert_eq!(*xs, [-50.0, 50.0]);
        assert_eq!(*y, [-100.0, 100.0]);
        assert_eq!(*z, [-40.0, 0.0]);
    }
}

#[test]
fn louvers_that_do_not_fit_warn() {
    let engine = Engine::new();
    let report = engine
        .solve_values(
            "Louvers",
            &[
                Value::CurveLine {
                    p1: [0.0, 0.0, 0.0],
                    p2: [150.0, 0.0, 0.0],
                },
                Value::Integer(4),
                Value::Number(45.0),
                Value::Number(200.0),
                Value::Number(100.0),
                Value::Number(20.0),
            ],
            None,
        )
        .unwrap();
    assert!(report.outputs.is_none());
    assert_eq!(report.diagnostics[0].severity, Severity::Warning);
}

fn wall_10x3() -> Value {
    Value::Polyline(vec![
        [0.0, 0.0, 0.0],
        [10.0, 0.0, 0.0],
        [10.0, 0.0, 3.0],
        [0.0, 0.0, 3.0],
        [0.0, 0.0, 0.0],
    ])
}

fn square(x: f64, y: f64, size: f64) -> Value {
    Value::Polyline(vec![
        [x, y, 0.0],
        [x + size, y, 0.0],
        [x + size, y + size, 0.0],
        [x, y + size, 0.0],
        [x, y, 0.0],
    ])
}

fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() < tol,
        "expected {expected}, got {actual}"
    );
}

fn assert_point_close(actual: &[f64; 3], expected: [f64; 3]) {
    for (idx, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        let diff = (a - e).abs();
        assert!(diff < 1e-9, "coordinate {idx} differs: {a} vs {e}");
    }
}
