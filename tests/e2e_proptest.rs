//! Property-based tests over generated `g:List` responses.

use graphson::{GenericValue, decode_map, decode_string_list, decode_vertex_list, to_clean_vertices};
use proptest::prelude::*;
use serde_json::{Value, json};

/// Strategy for a vertex id and a label built from one or more `::` parts.
fn arb_vertex() -> impl Strategy<Value = (i64, Vec<String>)> {
    (any::<i64>(), prop::collection::vec("[a-zA-Z][a-zA-Z0-9_]*", 1..4))
}

fn vertex_json(id: i64, label: &str) -> Value {
    json!({"@type": "g:Vertex", "@value": {
        "id": {"@type": "g:Int64", "@value": id},
        "label": label
    }})
}

proptest! {
    #[test]
    fn clean_vertices_match_source(vertices in prop::collection::vec(arb_vertex(), 0..20)) {
        let items: Vec<Value> = vertices
            .iter()
            .map(|(id, parts)| vertex_json(*id, &parts.join("::")))
            .collect();
        let raw = serde_json::to_vec(&json!({"@type": "g:List", "@value": items})).unwrap();

        let decoded = decode_vertex_list(&raw).unwrap();
        let clean = to_clean_vertices(&decoded);
        prop_assert_eq!(clean.len(), vertices.len());
        for ((id, parts), (projection, vertex)) in vertices.iter().zip(clean.iter().zip(&decoded)) {
            prop_assert_eq!(&projection.id, &GenericValue::Int64(*id));
            prop_assert_eq!(&projection.label, &parts.join("::"));
            prop_assert_eq!(vertex.labels(), parts.iter().map(String::as_str).collect::<Vec<_>>());
        }

        prop_assert_eq!(decode_vertex_list(&raw).unwrap(), decoded);
    }

    #[test]
    fn string_list_keeps_order(strings in prop::collection::vec(".*", 0..20)) {
        let raw = serde_json::to_vec(&json!({"@type": "g:List", "@value": &strings})).unwrap();
        prop_assert_eq!(decode_string_list(&raw).unwrap(), strings);
    }

    #[test]
    fn map_pairs_decode(entries in prop::collection::btree_map("[a-z]{1,8}", any::<i32>(), 0..10)) {
        let flat: Vec<Value> = entries
            .iter()
            .flat_map(|(k, v)| [json!(k), json!({"@type": "g:Int32", "@value": v})])
            .collect();
        let raw = serde_json::to_vec(&json!({"@type": "g:Map", "@value": flat})).unwrap();

        let map = decode_map(&raw).unwrap();
        prop_assert_eq!(map.len(), entries.len());
        for (k, v) in &entries {
            prop_assert_eq!(&map[k], &GenericValue::Int32(*v));
        }
    }
}
