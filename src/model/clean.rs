//! Clean projections — identifier-only summaries of decoded entities.

use serde::Serialize;
use super::{Edge, GenericValue, Vertex};

/// A vertex reduced to its id and label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanVertex {
    pub id: GenericValue,
    pub label: String,
}

/// An edge reduced to its endpoints.
///
/// `source` is taken from the edge's `inV` and `target` from its `outV`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanEdge {
    pub source: GenericValue,
    pub target: GenericValue,
}

impl From<&Vertex> for CleanVertex {
    fn from(vertex: &Vertex) -> Self {
        Self { id: vertex.id.clone(), label: vertex.label.clone() }
    }
}

impl From<&Edge> for CleanEdge {
    fn from(edge: &Edge) -> Self {
        Self { source: edge.in_v.clone(), target: edge.out_v.clone() }
    }
}

pub fn to_clean_vertices(vertices: &[Vertex]) -> Vec<CleanVertex> {
    vertices.iter().map(CleanVertex::from).collect()
}

pub fn to_clean_edges(edges: &[Edge]) -> Vec<CleanEdge> {
    edges.iter().map(CleanEdge::from).collect()
}
