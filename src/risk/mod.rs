//! Interpretable risk scoring and rule-based explanations.
//!
//! Both stages read their cutoffs from [`thresholds`] and count stressed
//! neighbors with the same [`thresholds::stressed_neighbors`] helper, so a
//! score and its explanation always agree on what "stressed" means.

/// Rule-based explanation text per node-timestep.
pub mod explain;
/// Three-factor risk score and level assignment.
pub mod scorer;
pub mod thresholds;

pub use explain::apply_explanations;
pub use scorer::{apply_risk_model, compute_risk_score, risk_level_from_score};
