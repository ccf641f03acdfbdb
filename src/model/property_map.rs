//! Property maps carried by vertices and edges, and produced by `properties()` decoding.

use std::collections::HashMap;
use super::{EdgeProperty, GenericValue, VertexProperty};

/// Property name → occurrences, in wire order.
pub type VertexPropertyMap = HashMap<String, Vec<VertexProperty>>;

/// Property key → the edge's single value for it.
pub type EdgePropertyMap = HashMap<String, EdgeProperty>;

/// Property label → values, accumulated from a `properties()` result.
pub type PropertiesMap = HashMap<String, Vec<GenericValue>>;
