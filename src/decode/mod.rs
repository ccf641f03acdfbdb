//! # GraphSON Decoding
//!
//! Entry points that turn a raw response buffer into typed results.
//!
//! ```text
//! bytes → serde_json::Value → Envelope → GenericValue | Vertex | Edge
//! ```
//!
//! Every entry point treats an empty buffer or a JSON `null` as "no result":
//! collection entry points return an empty collection, single-value entry
//! points fail with `CardinalityMismatch`. Errors carry the entry point's
//! name as their context.

pub mod envelope;
mod entity;
mod value;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{Edge, GenericValue, PropertiesMap, Vertex, tag};
use crate::{Error, Result};
use envelope::parse_response;

pub use envelope::Envelope;

// ============================================================================
// Configuration
// ============================================================================

/// Decoder settings.
///
/// Both checks default to on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
    /// Reject envelope and entity fields outside the known schema.
    pub deny_unknown_fields: bool,
    /// Reject `g:Int32`/`g:Int64` payloads with a fractional part or outside
    /// the declared width. When off, such values are truncated and wrapped.
    pub exact_integers: bool,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self { deny_unknown_fields: true, exact_integers: true }
    }
}

// ============================================================================
// Decoder
// ============================================================================

/// Decodes response buffers under a fixed `DecodeConfig`.
///
/// Holds no state besides its configuration; one decoder can be shared
/// freely across threads.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    config: DecodeConfig,
}

impl Decoder {
    pub fn new(config: DecodeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecodeConfig {
        &self.config
    }

    /// A bare JSON array of `g:Vertex`, without a `g:List` envelope.
    pub fn decode_vertices(&self, raw: &[u8]) -> Result<Vec<Vertex>> {
        const CX: &str = "decode_vertices";
        let Some(json) = parse_response(raw, CX)? else { return Ok(Vec::new()) };
        let vertices = bare_array(&json, CX)?
            .iter()
            .map(|item| self.vertex(item, CX))
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(entry = CX, count = vertices.len(), "decoded vertices");
        Ok(vertices)
    }

    /// A `g:List` of `g:Vertex`.
    pub fn decode_vertex_list(&self, raw: &[u8]) -> Result<Vec<Vertex>> {
        const CX: &str = "decode_vertex_list";
        let Some(json) = parse_response(raw, CX)? else { return Ok(Vec::new()) };
        let vertices = self
            .list_items(&json, CX)?
            .iter()
            .map(|item| self.vertex(item, CX))
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(entry = CX, count = vertices.len(), "decoded vertices");
        Ok(vertices)
    }

    /// A bare JSON array of `g:Edge`, without a `g:List` envelope.
    pub fn decode_edges(&self, raw: &[u8]) -> Result<Vec<Edge>> {
        const CX: &str = "decode_edges";
        let Some(json) = parse_response(raw, CX)? else { return Ok(Vec::new()) };
        let edges = bare_array(&json, CX)?
            .iter()
            .map(|item| self.edge(item, CX))
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(entry = CX, count = edges.len(), "decoded edges");
        Ok(edges)
    }

    /// A `g:List` of `g:Edge`.
    pub fn decode_edge_list(&self, raw: &[u8]) -> Result<Vec<Edge>> {
        const CX: &str = "decode_edge_list";
        let Some(json) = parse_response(raw, CX)? else { return Ok(Vec::new()) };
        let edges = self
            .list_items(&json, CX)?
            .iter()
            .map(|item| self.edge(item, CX))
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(entry = CX, count = edges.len(), "decoded edges");
        Ok(edges)
    }

    /// A `g:List` of anything, each element decoded generically.
    pub fn decode_list(&self, raw: &[u8]) -> Result<Vec<GenericValue>> {
        const CX: &str = "decode_list";
        let Some(json) = parse_response(raw, CX)? else { return Ok(Vec::new()) };
        let values = self.values(self.list_items(&json, CX)?, CX)?;
        tracing::debug!(entry = CX, count = values.len(), "decoded list");
        Ok(values)
    }

    /// A `g:List` whose elements are all strings.
    pub fn decode_string_list(&self, raw: &[u8]) -> Result<Vec<String>> {
        const CX: &str = "decode_string_list";
        let Some(json) = parse_response(raw, CX)? else { return Ok(Vec::new()) };
        self.list_items(&json, CX)?
            .iter()
            .map(|item| match self.value(item, CX)? {
                GenericValue::String(s) => Ok(s),
                other => Err(Error::tag_mismatch(CX, tag::STRING, other.tag())),
            })
            .collect()
    }

    /// A `g:Map`, keyed by string. When a key repeats, the last value wins.
    pub fn decode_map(&self, raw: &[u8]) -> Result<HashMap<String, GenericValue>> {
        const CX: &str = "decode_map";
        let Some(json) = parse_response(raw, CX)? else { return Ok(HashMap::new()) };
        let env = self.envelope(&json, CX)?;
        env.expect_tag(tag::MAP, CX)?;

        let mut map = HashMap::new();
        for (key, value) in self.pairs(&env, CX)? {
            if let Some(previous) = map.insert(key, value) {
                tracing::debug!(entry = CX, %previous, "g:Map key repeated, keeping the later value");
            }
        }
        Ok(map)
    }

    /// A `properties()` result: a `g:List` of `g:VertexProperty`, grouped
    /// by property label.
    pub fn decode_properties(&self, raw: &[u8]) -> Result<PropertiesMap> {
        let mut props = PropertiesMap::new();
        self.decode_properties_into(raw, &mut props)?;
        Ok(props)
    }

    /// Like `decode_properties`, appending into `props`.
    ///
    /// The first occurrence of a label creates its list, later ones append
    /// in arrival order. On error `props` is left untouched.
    pub fn decode_properties_into(&self, raw: &[u8], props: &mut PropertiesMap) -> Result<()> {
        const CX: &str = "decode_properties";
        let Some(json) = parse_response(raw, CX)? else { return Ok(()) };
        let decoded = self
            .list_items(&json, CX)?
            .iter()
            .map(|item| self.vertex_property(item, CX))
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(entry = CX, count = decoded.len(), "decoded vertex properties");
        for prop in decoded {
            props.entry(prop.label).or_default().push(prop.value);
        }
        Ok(())
    }

    /// One envelope, decoded generically. Empty input decodes to `Null`.
    pub fn decode_generic_value(&self, raw: &[u8]) -> Result<GenericValue> {
        const CX: &str = "decode_generic_value";
        match parse_response(raw, CX)? {
            Some(json) => self.value(&json, CX),
            None => Ok(GenericValue::Null),
        }
    }

    /// A bare JSON array of envelopes.
    pub fn decode_generic_values(&self, raw: &[u8]) -> Result<Vec<GenericValue>> {
        const CX: &str = "decode_generic_values";
        let Some(json) = parse_response(raw, CX)? else { return Ok(Vec::new()) };
        self.values(bare_array(&json, CX)?, CX)
    }

    /// The lone element of a `g:List`.
    pub fn decode_single(&self, raw: &[u8]) -> Result<GenericValue> {
        self.single(raw, "decode_single")
    }

    /// A count: a `g:List` holding exactly one `g:Int64`.
    pub fn decode_count(&self, raw: &[u8]) -> Result<i64> {
        const CX: &str = "decode_count";
        match self.single(raw, CX)? {
            GenericValue::Int64(count) => Ok(count),
            other => Err(Error::tag_mismatch(CX, tag::INT64, other.tag())),
        }
    }

    /// A `g:List` holding exactly one `g:Int32`.
    pub fn decode_int32(&self, raw: &[u8]) -> Result<i32> {
        const CX: &str = "decode_int32";
        match self.single(raw, CX)? {
            GenericValue::Int32(n) => Ok(n),
            other => Err(Error::tag_mismatch(CX, tag::INT32, other.tag())),
        }
    }

    fn single(&self, raw: &[u8], cx: &str) -> Result<GenericValue> {
        let Some(json) = parse_response(raw, cx)? else {
            return Err(Error::CardinalityMismatch { context: cx.to_owned(), count: 0 });
        };
        let values = self.values(self.list_items(&json, cx)?, cx)?;
        match <[GenericValue; 1]>::try_from(values) {
            Ok([value]) => Ok(value),
            Err(values) => Err(Error::CardinalityMismatch { context: cx.to_owned(), count: values.len() }),
        }
    }

    /// The elements of a `g:List` envelope, undecoded.
    fn list_items<'a>(&self, json: &'a Value, cx: &str) -> Result<&'a [Value]> {
        let env = self.envelope(json, cx)?;
        env.expect_tag(tag::LIST, cx)?;
        env.payload_array(cx)
    }
}

fn bare_array<'a>(json: &'a Value, cx: &str) -> Result<&'a [Value]> {
    match json {
        Value::Array(items) => Ok(items),
        other => Err(Error::malformed(
            cx,
            format!("expected a JSON array, got {}", envelope::json_kind(other)),
        )),
    }
}

// ============================================================================
// Free functions (default configuration)
// ============================================================================

/// A bare JSON array of vertices. See [`Decoder::decode_vertices`].
pub fn decode_vertices(raw: &[u8]) -> Result<Vec<Vertex>> {
    Decoder::default().decode_vertices(raw)
}

/// A `g:List` of vertices. See [`Decoder::decode_vertex_list`].
pub fn decode_vertex_list(raw: &[u8]) -> Result<Vec<Vertex>> {
    Decoder::default().decode_vertex_list(raw)
}

pub fn decode_edges(raw: &[u8]) -> Result<Vec<Edge>> {
    Decoder::default().decode_edges(raw)
}

pub fn decode_edge_list(raw: &[u8]) -> Result<Vec<Edge>> {
    Decoder::default().decode_edge_list(raw)
}

pub fn decode_list(raw: &[u8]) -> Result<Vec<GenericValue>> {
    Decoder::default().decode_list(raw)
}

pub fn decode_string_list(raw: &[u8]) -> Result<Vec<String>> {
    Decoder::default().decode_string_list(raw)
}

pub fn decode_map(raw: &[u8]) -> Result<HashMap<String, GenericValue>> {
    Decoder::default().decode_map(raw)
}

pub fn decode_properties(raw: &[u8]) -> Result<PropertiesMap> {
    Decoder::default().decode_properties(raw)
}

pub fn decode_properties_into(raw: &[u8], props: &mut PropertiesMap) -> Result<()> {
    Decoder::default().decode_properties_into(raw, props)
}

pub fn decode_generic_value(raw: &[u8]) -> Result<GenericValue> {
    Decoder::default().decode_generic_value(raw)
}

pub fn decode_generic_values(raw: &[u8]) -> Result<Vec<GenericValue>> {
    Decoder::default().decode_generic_values(raw)
}

pub fn decode_single(raw: &[u8]) -> Result<GenericValue> {
    Decoder::default().decode_single(raw)
}

pub fn decode_count(raw: &[u8]) -> Result<i64> {
    Decoder::default().decode_count(raw)
}

pub fn decode_int32(raw: &[u8]) -> Result<i32> {
    Decoder::default().decode_int32(raw)
}
