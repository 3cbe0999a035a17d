use std::collections::HashMap;

use tracing::debug;

use crate::grid::Node;
use crate::grid::types::neighbor_map;
use crate::sim::numeric::{clamp_unit, ramp, round4};
use crate::sim::types::{RiskLevel, Timestep};

use super::thresholds::{
    LOAD_STRESS_FULL, LOAD_STRESS_START, LOAD_WEIGHT, NEIGHBOR_WEIGHT, RED_MIN_SCORE,
    TEMP_STRESS_FULL_F, TEMP_STRESS_START_F, TEMP_WEIGHT, YELLOW_MIN_SCORE, stressed_neighbors,
};

/// Weighted combination of load, temperature and neighbor stress.
///
/// * load component: 0 at 0.75 load, 1 at 0.95
/// * temperature component: 0 at 90°F, 1 at 100°F
/// * neighbor component: share of stressed neighbors
///
/// The result is clamped to `[0, 1]` but not rounded.
///
/// # Examples
///
/// ```
/// use grid_stress::risk::compute_risk_score;
///
/// let score = compute_risk_score(0.95, 100.0, 0.0);
/// assert!((score - 0.80).abs() < 1e-9);
/// ```
pub fn compute_risk_score(load_pct: f64, ambient_temp_f: f64, neighbor_stress_frac: f64) -> f64 {
    let load_component = ramp(load_pct, LOAD_STRESS_START, LOAD_STRESS_FULL);
    let temp_component = ramp(ambient_temp_f, TEMP_STRESS_START_F, TEMP_STRESS_FULL_F);
    let neighbor_component = clamp_unit(neighbor_stress_frac);

    clamp_unit(
        LOAD_WEIGHT * load_component
            + TEMP_WEIGHT * temp_component
            + NEIGHBOR_WEIGHT * neighbor_component,
    )
}

/// Maps a score onto its band. Lower bounds are inclusive.
pub fn risk_level_from_score(score: f64) -> RiskLevel {
    if score < YELLOW_MIN_SCORE {
        RiskLevel::Green
    } else if score < RED_MIN_SCORE {
        RiskLevel::Yellow
    } else {
        RiskLevel::Red
    }
}

/// Share of `neighbors` that are stressed, `0.0` for a node without neighbors.
pub fn neighbor_stress_frac(neighbors: &[String], load_by_id: &HashMap<&str, f64>) -> f64 {
    if neighbors.is_empty() {
        return 0.0;
    }
    stressed_neighbors(neighbors, load_by_id) as f64 / neighbors.len() as f64
}

/// Overwrites `risk_score` and `risk_level` on every state in place.
///
/// Neighbor stress is read from the same timestep's loads. Scores are
/// rounded to 4 decimal places before the level is assigned, so the level
/// always matches the stored score. Re-running on unchanged loads yields
/// identical results.
pub fn apply_risk_model(nodes: &[Node], timesteps: &mut [Timestep]) {
    let neighbors_of = neighbor_map(nodes);

    for ts in timesteps.iter_mut() {
        let ambient = ts.ambient_temp_f;
        let scored: Vec<(f64, RiskLevel)> = {
            let load_by_id = ts.load_by_id();
            ts.states
                .iter()
                .map(|s| {
                    let neighbors = neighbors_of.get(s.id.as_str()).copied().unwrap_or(&[]);
                    let frac = neighbor_stress_frac(neighbors, &load_by_id);
                    let score = round4(compute_risk_score(s.load_pct, ambient, frac));
                    (score, risk_level_from_score(score))
                })
                .collect()
        };

        for (state, (score, level)) in ts.states.iter_mut().zip(scored) {
            state.risk_score = score;
            state.risk_level = level;
        }

        debug!(
            t = ts.t,
            red = ts.states.iter().filter(|s| s.risk_level == RiskLevel::Red).count(),
            "scored timestep"
        );
    }
}
