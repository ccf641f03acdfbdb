//! End-to-end tests for vertex property resolution.
//!
//! Vertices are decoded from wire JSON, then queried for single, multi,
//! meta and typed properties. Fixtures are named literals passed explicitly
//! into each scenario.

use std::collections::HashMap;

use graphson::{Error, Vertex, decode_vertex_list};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

const PROP: &str = "proppy";

fn generic_id() -> Value {
    json!({"@type": "g:String", "@value": "id123"})
}

fn occurrence(label: &str, value: Value) -> Value {
    json!({"@type": "g:VertexProperty", "@value": {"id": generic_id(), "label": label, "value": value}})
}

fn decode_one(label: &str, properties: Value) -> Vertex {
    let raw = json!({"@type": "g:List", "@value": [
        {"@type": "g:Vertex", "@value": {"id": "test-id1", "label": label, "properties": properties}}
    ]});
    let mut vertices = decode_vertex_list(&serde_json::to_vec(&raw).unwrap()).unwrap();
    assert_eq!(vertices.len(), 1);
    vertices.remove(0)
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

// ============================================================================
// 1. No properties
// ============================================================================

#[test]
fn test_no_properties() {
    let v = decode_one("lable1::lable2", json!({}));

    assert_eq!(v.labels(), vec!["lable1", "lable2"]);
    assert!(matches!(v.get_multi_property("not-there"), Err(Error::PropertyNotFound(_))));
    assert!(matches!(v.get_property(PROP), Err(Error::PropertyNotFound(_))));
}

// ============================================================================
// 2. Single property, with typed siblings
// ============================================================================

fn simple_vertex() -> Vertex {
    decode_one("lable", json!({
        PROP: [occurrence(PROP, json!("tSimple"))],
        "counter": [occurrence("counter", json!({"@type": "g:Int32", "@value": 1234}))],
        "big-counter": [occurrence("big-counter", json!({"@type": "g:Int64", "@value": 1234}))],
        "George": [occurrence("George", json!(true))]
    }))
}

#[test]
fn test_single_property() {
    let v = simple_vertex();

    assert_eq!(v.labels(), vec!["lable"]);
    assert_eq!(v.get_property(PROP).unwrap(), "tSimple");
    assert_eq!(v.get_multi_property(PROP).unwrap(), strings(&["tSimple"]));
    assert_eq!(
        v.get_meta_property(PROP).unwrap(),
        HashMap::from([(PROP.to_string(), strings(&["tSimple"]))])
    );
}

#[test]
fn test_typed_properties() {
    let v = simple_vertex();

    assert_eq!(v.get_multi_property_i32("counter").unwrap(), vec![1234]);
    assert_eq!(v.get_multi_property_i64("big-counter").unwrap(), vec![1234_i64]);
    assert_eq!(v.get_multi_property_bool("George").unwrap(), vec![true]);
}

#[test]
fn test_typed_property_width_mismatch() {
    let v = simple_vertex();

    let err = v.get_multi_property_i32("big-counter").unwrap_err();
    assert_eq!(err.to_string(), r#"property "big-counter": expected `g:Int32` value, but got "g:Int64""#);

    assert!(matches!(
        v.get_multi_property_i64("counter"),
        Err(Error::TypeCoercion { expected: "g:Int64", .. })
    ));
    assert!(matches!(
        v.get_multi_property_bool(PROP),
        Err(Error::TypeCoercion { expected: "g:Bool", .. })
    ));
    assert!(matches!(v.get_multi_property_i32("missing"), Err(Error::PropertyNotFound(_))));
}

// ============================================================================
// 3. Multi-property
// ============================================================================

#[test]
fn test_multi_property() {
    let v = decode_one("lable", json!({
        PROP: [occurrence(PROP, json!("tMulti1")), occurrence(PROP, json!("tMulti2"))]
    }));

    assert!(matches!(
        v.get_property(PROP),
        Err(Error::PropertyIsMulti { ref label, count: 2 }) if label == PROP
    ));
    assert_eq!(v.get_multi_property(PROP).unwrap(), strings(&["tMulti1", "tMulti2"]));
    assert_eq!(
        v.get_meta_property(PROP).unwrap(),
        HashMap::from([(PROP.to_string(), strings(&["tMulti1", "tMulti2"]))])
    );
}

// ============================================================================
// 4. Meta-property
// ============================================================================

#[test]
fn test_meta_property() {
    let v = decode_one("lable", json!({
        PROP: [occurrence("proppy1", json!("tMeta1")), occurrence("proppy2", json!("tMeta2"))]
    }));

    assert!(matches!(v.get_property(PROP), Err(Error::PropertyIsMulti { .. })));
    assert_eq!(v.get_multi_property(PROP).unwrap(), strings(&["tMeta1", "tMeta2"]));
    assert_eq!(
        v.get_meta_property(PROP).unwrap(),
        HashMap::from([
            ("proppy1".to_string(), strings(&["tMeta1"])),
            ("proppy2".to_string(), strings(&["tMeta2"])),
        ])
    );
}

#[test]
fn test_meta_property_with_colliding_sub_labels_reads_as_multi() {
    let v = decode_one("lable", json!({
        PROP: [occurrence("proppy1", json!("x")), occurrence("proppy1", json!("y"))]
    }));

    assert_eq!(
        v.get_meta_property(PROP).unwrap(),
        HashMap::from([("proppy1".to_string(), strings(&["x", "y"]))])
    );
}

// ============================================================================
// 5. Concurrent readers
// ============================================================================

#[test]
fn test_shared_vertex_across_threads() {
    let v = simple_vertex();
    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                assert_eq!(v.get_property(PROP).unwrap(), "tSimple");
                assert_eq!(v.get_multi_property_i32("counter").unwrap(), vec![1234]);
            });
        }
    });
}
