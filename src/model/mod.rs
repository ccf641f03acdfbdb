//! # Graph Model
//!
//! Clean DTOs produced by the decoder: vertices, edges, their properties,
//! and the generic value every tagged payload decodes into.
//!
//! Design rule: this module is pure data plus property resolution.
//! No JSON parsing, no I/O, no state.

pub mod vertex;
pub mod edge;
pub mod value;
pub mod property_map;
pub mod clean;

pub use vertex::{Vertex, VertexProperty, LABEL_SEPARATOR};
pub use edge::{Edge, EdgeProperty};
pub use value::{GenericValue, tag};
pub use property_map::{EdgePropertyMap, PropertiesMap, VertexPropertyMap};
pub use clean::{CleanEdge, CleanVertex, to_clean_edges, to_clean_vertices};
