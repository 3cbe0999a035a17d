//! Core simulation types: timesteps, per-node states and risk levels.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

/// Explanation text carried by a state before explanations are generated.
pub const PLACEHOLDER_EXPLANATION: &str = "Placeholder (risk/explanation added next step).";

/// Discrete risk band, serialized as its one-letter code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RiskLevel {
    /// Low risk.
    #[default]
    #[serde(rename = "G")]
    Green,
    /// Elevated risk.
    #[serde(rename = "Y")]
    Yellow,
    /// High or critical risk.
    #[serde(rename = "R")]
    Red,
}

impl RiskLevel {
    /// One-letter code used by the export schema.
    pub fn code(self) -> &'static str {
        match self {
            Self::Green => "G",
            Self::Yellow => "Y",
            Self::Red => "R",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One node's reading at one timestep.
///
/// Fields are written in pipeline order: the simulator sets `load_pct`,
/// the scorer sets `risk_score`/`risk_level`, the explainer sets
/// `explanation`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeState {
    /// Id of the node this reading belongs to.
    pub id: String,
    /// Utilization in `[0, 1]`.
    pub load_pct: f64,
    /// Continuous risk in `[0, 1]`, `0.0` until scored.
    pub risk_score: f64,
    /// Risk band, `Green` until scored.
    pub risk_level: RiskLevel,
    pub explanation: String,
}

impl NodeState {
    /// Creates an unscored state with placeholder risk fields.
    pub fn new(id: impl Into<String>, load_pct: f64) -> Self {
        Self {
            id: id.into(),
            load_pct,
            risk_score: 0.0,
            risk_level: RiskLevel::Green,
            explanation: PLACEHOLDER_EXPLANATION.to_string(),
        }
    }
}

/// One simulated instant with every node's state, in node generation order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timestep {
    /// Zero-based sequential index.
    pub t: usize,
    /// Ambient temperature shared by all nodes (°F).
    pub ambient_temp_f: f64,
    pub states: Vec<NodeState>,
}

impl Timestep {
    /// Builds an id -> load lookup over this timestep's own states.
    pub fn load_by_id(&self) -> HashMap<&str, f64> {
        self.states
            .iter()
            .map(|s| (s.id.as_str(), s.load_pct))
            .collect()
    }
}
