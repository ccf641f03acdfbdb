//! Strict decoding of vertices, edges and their properties.
//!
//! Every payload object is checked against an allow-list of fields at every
//! nesting level. A field the format did not have when this was written is
//! an error, not something to skip.

use serde_json::{Map, Value};

use super::Decoder;
use super::envelope::{check_fields, json_kind, required, required_str};
use crate::model::{
    Edge, EdgeProperty, EdgePropertyMap, Vertex, VertexProperty, VertexPropertyMap, tag,
};
use crate::{Error, Result};

const VERTEX_FIELDS: &[&str] = &["id", "label", "properties"];
const VERTEX_PROPERTY_FIELDS: &[&str] = &["id", "label", "value"];
const EDGE_FIELDS: &[&str] = &["id", "label", "inV", "outV", "inVLabel", "outVLabel", "properties"];
const PROPERTY_FIELDS: &[&str] = &["key", "value"];

impl Decoder {
    pub(crate) fn vertex(&self, raw: &Value, cx: &str) -> Result<Vertex> {
        let env = self.envelope(raw, cx)?;
        env.expect_tag(tag::VERTEX, cx)?;
        self.vertex_payload(env.payload, cx)
    }

    pub(crate) fn edge(&self, raw: &Value, cx: &str) -> Result<Edge> {
        let env = self.envelope(raw, cx)?;
        env.expect_tag(tag::EDGE, cx)?;
        self.edge_payload(env.payload, cx)
    }

    pub(crate) fn vertex_property(&self, raw: &Value, cx: &str) -> Result<VertexProperty> {
        let env = self.envelope(raw, cx)?;
        env.expect_tag(tag::VERTEX_PROPERTY, cx)?;
        self.vertex_property_payload(env.payload, cx)
    }

    fn edge_property(&self, raw: &Value, cx: &str) -> Result<EdgeProperty> {
        let env = self.envelope(raw, cx)?;
        env.expect_tag(tag::PROPERTY, cx)?;
        self.edge_property_payload(env.payload, cx)
    }

    pub(crate) fn vertex_payload(&self, payload: &Value, cx: &str) -> Result<Vertex> {
        let obj = self.payload_object(payload, tag::VERTEX, VERTEX_FIELDS, cx)?;
        let id = self.value(required(obj, "id", cx, tag::VERTEX)?, cx)?;
        let label = required_str(obj, "label", cx, tag::VERTEX)?.to_owned();

        let mut properties = VertexPropertyMap::new();
        for (key, occurrences) in optional_object(obj, "properties", cx, tag::VERTEX)?.into_iter().flatten() {
            let Value::Array(items) = occurrences else {
                return Err(Error::malformed(
                    cx,
                    format!("g:Vertex.properties.{key} must be an array, got {}", json_kind(occurrences)),
                ));
            };
            let props = items
                .iter()
                .map(|item| self.vertex_property(item, cx))
                .collect::<Result<Vec<_>>>()?;
            properties.insert(key.clone(), props);
        }

        Ok(Vertex { id, label, properties })
    }

    pub(crate) fn vertex_property_payload(&self, payload: &Value, cx: &str) -> Result<VertexProperty> {
        let what = tag::VERTEX_PROPERTY;
        let obj = self.payload_object(payload, what, VERTEX_PROPERTY_FIELDS, cx)?;
        Ok(VertexProperty {
            id: self.value(required(obj, "id", cx, what)?, cx)?,
            label: required_str(obj, "label", cx, what)?.to_owned(),
            value: self.value(required(obj, "value", cx, what)?, cx)?,
        })
    }

    pub(crate) fn edge_payload(&self, payload: &Value, cx: &str) -> Result<Edge> {
        let obj = self.payload_object(payload, tag::EDGE, EDGE_FIELDS, cx)?;

        let mut properties = EdgePropertyMap::new();
        for (key, raw) in optional_object(obj, "properties", cx, tag::EDGE)?.into_iter().flatten() {
            properties.insert(key.clone(), self.edge_property(raw, cx)?);
        }

        Ok(Edge {
            id: self.value(required(obj, "id", cx, tag::EDGE)?, cx)?,
            label: required_str(obj, "label", cx, tag::EDGE)?.to_owned(),
            in_v: self.value(required(obj, "inV", cx, tag::EDGE)?, cx)?,
            out_v: self.value(required(obj, "outV", cx, tag::EDGE)?, cx)?,
            in_v_label: optional_str(obj, "inVLabel", cx)?,
            out_v_label: optional_str(obj, "outVLabel", cx)?,
            properties,
        })
    }

    pub(crate) fn edge_property_payload(&self, payload: &Value, cx: &str) -> Result<EdgeProperty> {
        let obj = self.payload_object(payload, tag::PROPERTY, PROPERTY_FIELDS, cx)?;
        Ok(EdgeProperty {
            key: required_str(obj, "key", cx, tag::PROPERTY)?.to_owned(),
            value: self.value(required(obj, "value", cx, tag::PROPERTY)?, cx)?,
        })
    }

    fn payload_object<'a>(
        &self,
        payload: &'a Value,
        what: &str,
        allowed: &[&str],
        cx: &str,
    ) -> Result<&'a Map<String, Value>> {
        let Value::Object(obj) = payload else {
            return Err(Error::malformed(cx, format!("{what} payload must be an object, got {}", json_kind(payload))));
        };
        if self.config.deny_unknown_fields {
            check_fields(obj, allowed, cx, what)?;
        }
        Ok(obj)
    }
}

/// An optional nested object. Absent and `null` read as empty.
fn optional_object<'a>(
    obj: &'a Map<String, Value>,
    field: &str,
    cx: &str,
    what: &str,
) -> Result<Option<&'a Map<String, Value>>> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(inner)) => Ok(Some(inner)),
        Some(other) => Err(Error::malformed(
            cx,
            format!("{what}.{field} must be an object, got {}", json_kind(other)),
        )),
    }
}

fn optional_str(obj: &Map<String, Value>, field: &str, cx: &str) -> Result<Option<String>> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(Error::malformed(
            cx,
            format!("g:Edge.{field} must be a string, got {}", json_kind(other)),
        )),
    }
}
