//! Cutoffs shared by the risk scorer and the explanation generator.

use std::collections::HashMap;

/// Load where the load component starts rising.
pub const LOAD_STRESS_START: f64 = 0.75;
/// Load where the load component saturates.
pub const LOAD_STRESS_FULL: f64 = 0.95;
/// Temperature where the temperature component starts rising (°F).
pub const TEMP_STRESS_START_F: f64 = 90.0;
/// Temperature where the temperature component saturates (°F).
pub const TEMP_STRESS_FULL_F: f64 = 100.0;
/// A neighbor is stressed when its load is strictly above this value.
pub const NEIGHBOR_STRESS_LOAD: f64 = 0.85;

/// Weight of the load component in the risk score.
pub const LOAD_WEIGHT: f64 = 0.50;
/// Weight of the temperature component.
pub const TEMP_WEIGHT: f64 = 0.30;
/// Weight of the stressed-neighbor fraction.
pub const NEIGHBOR_WEIGHT: f64 = 0.20;

/// Scores at or above this are at least Yellow.
pub const YELLOW_MIN_SCORE: f64 = 0.40;
/// Scores at or above this are Red.
pub const RED_MIN_SCORE: f64 = 0.70;

/// Explanation band for extreme ambient heat (°F).
pub const EXTREME_HEAT_F: f64 = 100.0;
/// Explanation band for heatwave-level temperature (°F).
pub const HEATWAVE_F: f64 = 95.0;
/// Explanation band for elevated summer temperature (°F).
pub const ELEVATED_TEMP_F: f64 = TEMP_STRESS_START_F;

/// Explanation band for near-capacity load.
pub const NEAR_CAPACITY_LOAD: f64 = LOAD_STRESS_FULL;
/// Explanation band for high load.
pub const HIGH_LOAD: f64 = 0.90;
/// Explanation band for elevated load.
pub const ELEVATED_LOAD: f64 = NEIGHBOR_STRESS_LOAD;

/// Returns whether a neighbor load counts as stressed.
pub fn is_stressed(load: f64) -> bool {
    load > NEIGHBOR_STRESS_LOAD
}

/// Counts `neighbors` whose load in `load_by_id` is stressed.
///
/// Ids missing from the lookup count as zero load.
pub fn stressed_neighbors(neighbors: &[String], load_by_id: &HashMap<&str, f64>) -> usize {
    neighbors
        .iter()
        .filter(|id| is_stressed(load_by_id.get(id.as_str()).copied().unwrap_or(0.0)))
        .count()
}
