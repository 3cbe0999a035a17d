//! Per-timestep risk summary for the command-line report.

use std::fmt;

use crate::sim::{RiskLevel, Timestep};

/// Risk band counts and the riskiest node for one timestep.
#[derive(Debug, Clone, PartialEq)]
pub struct TimestepSummary {
    pub t: usize,
    pub ambient_temp_f: f64,
    pub green: usize,
    pub yellow: usize,
    pub red: usize,
    /// Highest risk score at this timestep.
    pub max_score: f64,
    /// Id of the first node holding `max_score`; `None` for an empty step.
    pub max_node: Option<String>,
}

/// Summary of a whole run, one entry per timestep.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskSummary {
    pub steps: Vec<TimestepSummary>,
}

impl RiskSummary {
    pub fn from_timesteps(timesteps: &[Timestep]) -> Self {
        let steps = timesteps
            .iter()
            .map(|ts| {
                let count = |level: RiskLevel| {
                    ts.states.iter().filter(|s| s.risk_level == level).count()
                };
                let peak = ts
                    .states
                    .iter()
                    .reduce(|best, s| if s.risk_score > best.risk_score { s } else { best });
                TimestepSummary {
                    t: ts.t,
                    ambient_temp_f: ts.ambient_temp_f,
                    green: count(RiskLevel::Green),
                    yellow: count(RiskLevel::Yellow),
                    red: count(RiskLevel::Red),
                    max_score: peak.map_or(0.0, |s| s.risk_score),
                    max_node: peak.map(|s| s.id.clone()),
                }
            })
            .collect();
        Self { steps }
    }

    /// Number of red node-timesteps across the run.
    pub fn total_red(&self) -> usize {
        self.steps.iter().map(|s| s.red).sum()
    }
}

impl fmt::Display for TimestepSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t={:>2} ({:>5.1}F) | G={:>2} Y={:>2} R={:>2} | peak={:.4} ({})",
            self.t,
            self.ambient_temp_f,
            self.green,
            self.yellow,
            self.red,
            self.max_score,
            self.max_node.as_deref().unwrap_or("-"),
        )
    }
}

impl fmt::Display for RiskSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Risk Summary ---")?;
        for step in &self.steps {
            writeln!(f, "{step}")?;
        }
        write!(f, "Red node-timesteps: {}", self.total_red())
    }
}
