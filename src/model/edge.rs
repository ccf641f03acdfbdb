//! Edge in the property graph.

use serde::Serialize;
use super::{EdgePropertyMap, GenericValue};

/// A decoded `g:Edge`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    pub id: GenericValue,
    pub label: String,
    #[serde(rename = "inV")]
    pub in_v: GenericValue,
    #[serde(rename = "outV")]
    pub out_v: GenericValue,
    #[serde(rename = "inVLabel", skip_serializing_if = "Option::is_none")]
    pub in_v_label: Option<String>,
    #[serde(rename = "outVLabel", skip_serializing_if = "Option::is_none")]
    pub out_v_label: Option<String>,
    pub properties: EdgePropertyMap,
}

/// A key/value property on an edge (`g:Property`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeProperty {
    pub key: String,
    pub value: GenericValue,
}

impl Edge {
    pub fn new(
        id: impl Into<GenericValue>,
        label: impl Into<String>,
        out_v: impl Into<GenericValue>,
        in_v: impl Into<GenericValue>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            in_v: in_v.into(),
            out_v: out_v.into(),
            in_v_label: None,
            out_v_label: None,
            properties: EdgePropertyMap::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<GenericValue>) -> Self {
        let key = key.into();
        self.properties.insert(key.clone(), EdgeProperty { key, value: value.into() });
        self
    }

    pub fn get(&self, key: &str) -> Option<&GenericValue> {
        self.properties.get(key).map(|p| &p.value)
    }

    /// The endpoint opposite `from`, if `from` is one of this edge's endpoints.
    pub fn other_vertex(&self, from: &GenericValue) -> Option<&GenericValue> {
        if *from == self.out_v { Some(&self.in_v) }
        else if *from == self.in_v { Some(&self.out_v) }
        else { None }
    }
}
