//! Toy distribution-grid heatwave stress simulator.
//!
//! Generates a seeded transformer grid, simulates a heatwave temperature
//! ramp over it, scores every node at every timestep and explains each
//! score in plain language. [`pipeline::run`] chains the stages;
//! [`io::export`] writes the resulting snapshot.

pub mod config;
pub mod error;
/// Grid topology types and generator.
pub mod grid;
pub mod io;
pub mod pipeline;
pub mod report;
/// Risk scoring and explanations.
pub mod risk;
/// Heatwave simulation types and engine.
pub mod sim;

pub use error::{Error, Result};
