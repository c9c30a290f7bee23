//! Requests over real Python files, through the library bridge.

use std::path::PathBuf;

use hover_bridge::bridge::Bridge;
use hover_bridge::engine::python::PythonEngine;
use hover_bridge::engine::PositionConvention;
use serde_json::{json, Value};

fn fixture(name: &str) -> (String, String) {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    let source = std::fs::read_to_string(&path).unwrap();
    (source, path.to_string_lossy().into_owned())
}

/// Send `(line, column)` queries against one fixture; returns parsed responses.
fn hover(name: &str, positions: &[(i64, i64)]) -> Vec<Value> {
    let (source, path) = fixture(name);
    let mut input = String::new();
    for (line, column) in positions {
        let req = json!({"source": source, "path": path, "line": line, "column": column});
        input.push_str(&req.to_string());
        input.push('\n');
    }

    let engine = PythonEngine::new().unwrap();
    let mut bridge = Bridge::new(engine, PositionConvention::default());
    let mut out = Vec::new();
    let summary = bridge.run(input.as_bytes(), &mut out).unwrap();
    assert_eq!(summary.requests, positions.len() as u64);

    String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[test]
fn class_and_instance() {
    let got = hover("shapes.py", &[(31, 8), (31, 1)]);

    assert_eq!(got[0]["name"], "Circle");
    assert_eq!(got[0]["type"], "class");
    assert_eq!(got[0]["full_name"], "shapes.Circle");
    assert_eq!(got[0]["module_name"], "shapes");
    assert_eq!(got[0]["docstring"], "Circle(radius)\n\nA round shape.");

    assert_eq!(got[1]["name"], "Circle");
    assert_eq!(got[1]["type"], "instance");
}

#[test]
fn function_definition() {
    let got = hover("shapes.py", &[(24, 5)]);
    assert_eq!(got[0]["type"], "function");
    assert_eq!(got[0]["full_name"], "shapes.describe");
    assert_eq!(
        got[0]["docstring"],
        "describe(shape, precision=2)\n\nDescribe a shape in words."
    );
}

#[test]
fn method_full_name() {
    let got = hover("shapes.py", &[(9, 9)]);
    assert_eq!(got[0]["name"], "area");
    assert_eq!(got[0]["full_name"], "shapes.Shape.area");
}

#[test]
fn standard_library_and_builtins() {
    let got = hover("shapes.py", &[(2, 8), (21, 16), (30, 2), (32, 9)]);

    for module in &got[..2] {
        assert_eq!(module["name"], "math");
        assert_eq!(module["type"], "module");
        assert_eq!(module["module_name"], "math");
    }

    assert_eq!(got[2]["type"], "instance");
    assert_eq!(got[2]["full_name"], "collections.OrderedDict");

    assert_eq!(got[3]["full_name"], "builtins.len");
    assert_eq!(got[3]["type"], "function");
}

#[test]
fn every_response_has_the_five_fields() {
    let got = hover("shapes.py", &[(31, 8), (24, 5), (2, 8)]);
    for resp in got {
        let obj = resp.as_object().unwrap();
        let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["docstring", "full_name", "module_name", "name", "type"]);
    }
}

#[test]
fn comments_and_bad_positions() {
    let got = hover("shapes.py", &[(29, 5), (99, 0), (31, 2)]);
    assert_eq!(got[0], Value::Null);
    assert_eq!(got[1]["error"], "`line` parameter is not in a valid range.");
    assert_eq!(got[2]["name"], "Circle");
}
