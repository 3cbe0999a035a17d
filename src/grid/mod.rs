//! Grid topology: node records and the seeded topology generator.

/// Deterministic grid layout and neighbor selection.
pub mod topology;
pub mod types;

pub use topology::generate_nodes;
pub use types::Node;
