//! # graphson-rs — Strict GraphSON Decoder
//!
//! Decodes the tagged JSON that graph servers return for query results
//! (`{"@type": "g:List", "@value": [...]}`) into typed vertices, edges and
//! values, and resolves vertex properties by cardinality.
//!
//! ## Design Principles
//!
//! 1. **Fail on drift**: every structured payload is checked against an
//!    allow-list of fields, so a changed server format errors out instead of
//!    silently losing data
//! 2. **Clean DTOs**: `Vertex`, `Edge`, `GenericValue` are immutable values
//! 3. **Decoding is a pure function**: bytes in, entities or `Error` out
//! 4. **Errors name their entry point**: several extraction paths share a
//!    failure shape, so every decode error carries where it happened
//!
//! ## Quick Start
//!
//! ```rust
//! let raw = br#"{"@type":"g:List","@value":[
//!     {"@type":"g:Vertex","@value":{"id":{"@type":"g:Int64","@value":1},"label":"person",
//!      "properties":{"name":[{"@type":"g:VertexProperty",
//!        "@value":{"id":{"@type":"g:Int64","@value":10},"label":"name","value":"Ada"}}]}}}
//! ]}"#;
//!
//! let vertices = graphson::decode_vertex_list(raw)?;
//! assert_eq!(vertices[0].get_property("name")?, "Ada");
//! # Ok::<(), graphson::Error>(())
//! ```
//!
//! ## Entry Points
//!
//! | Function | Input | Output |
//! |----------|-------|--------|
//! | `decode_vertex_list` | `g:List` of `g:Vertex` | `Vec<Vertex>` |
//! | `decode_edge_list` | `g:List` of `g:Edge` | `Vec<Edge>` |
//! | `decode_string_list` | `g:List` of strings | `Vec<String>` |
//! | `decode_map` | `g:Map` | `HashMap<String, GenericValue>` |
//! | `decode_properties` | `g:List` of `g:VertexProperty` | label → values |
//! | `decode_single` / `decode_count` / `decode_int32` | `g:List` of one item | scalar |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod decode;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    tag, CleanEdge, CleanVertex, Edge, EdgeProperty, GenericValue, Vertex, VertexProperty,
    EdgePropertyMap, PropertiesMap, VertexPropertyMap, to_clean_edges, to_clean_vertices,
};

// ============================================================================
// Re-exports: Decoding
// ============================================================================

pub use decode::{
    DecodeConfig, Decoder,
    decode_count, decode_edge_list, decode_edges, decode_generic_value,
    decode_generic_values, decode_int32, decode_list, decode_map, decode_properties,
    decode_properties_into, decode_single, decode_string_list, decode_vertex_list,
    decode_vertices,
};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{context}: malformed envelope: {message}")]
    MalformedEnvelope { context: String, message: String },

    #[error("{context}: expected `{expected}` type, but got {actual:?}")]
    TagMismatch { context: String, expected: &'static str, actual: String },

    #[error(
        "{context}: odd number of values ({count}), maps should have an even number of values to construct key-value pairs"
    )]
    OddPairCount { context: String, count: usize },

    #[error("property not found: {0:?}")]
    PropertyNotFound(String),

    #[error("property {label:?} is multi-valued ({count} values)")]
    PropertyIsMulti { label: String, count: usize },

    #[error("property {label:?}: expected `{expected}` value, but got {actual:?}")]
    TypeCoercion { label: String, expected: &'static str, actual: String },

    #[error("{context}: expected single value, got {count}")]
    CardinalityMismatch { context: String, count: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn malformed(context: &str, message: impl Into<String>) -> Self {
        Error::MalformedEnvelope { context: context.to_owned(), message: message.into() }
    }

    pub(crate) fn tag_mismatch(context: &str, expected: &'static str, actual: &str) -> Self {
        Error::TagMismatch {
            context: context.to_owned(),
            expected,
            actual: actual.to_owned(),
        }
    }
}
