//! Node records shared by every pipeline stage.

use std::collections::HashMap;

use serde::Serialize;

/// A transformer vertex in the generated grid.
///
/// Created once by [`generate_nodes`](super::generate_nodes) and never
/// mutated afterwards. Neighbor lists are directed: `A` listing `B` does not
/// imply `B` lists `A`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    /// Zero-padded ordinal identifier (`"T01"`..`"TNN"`).
    pub id: String,
    /// Presentational x coordinate (column * x spacing).
    pub x: f64,
    /// Presentational y coordinate (-row * y spacing).
    pub y: f64,
    /// Capacity rating in kVA.
    pub rating_kva: u32,
    /// Ordered neighbor ids; no self-loops, no duplicates.
    pub neighbors: Vec<String>,
}

/// Builds an id -> neighbor-list lookup over the given nodes.
pub fn neighbor_map(nodes: &[Node]) -> HashMap<&str, &[String]> {
    nodes
        .iter()
        .map(|n| (n.id.as_str(), n.neighbors.as_slice()))
        .collect()
}
