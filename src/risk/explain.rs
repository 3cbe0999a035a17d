use crate::grid::Node;
use crate::grid::types::neighbor_map;
use crate::sim::types::{RiskLevel, Timestep};

use super::thresholds::{
    ELEVATED_LOAD, ELEVATED_TEMP_F, EXTREME_HEAT_F, HEATWAVE_F, HIGH_LOAD, NEAR_CAPACITY_LOAD,
    stressed_neighbors,
};

/// Sentence used when no rule fires.
pub const LOW_RISK_EXPLANATION: &str = "Low risk under moderate load and temperature.";

/// Temperature reasons, hottest band first; the first match wins.
const TEMPERATURE_RULES: &[(f64, &str)] = &[
    (EXTREME_HEAT_F, "extreme ambient heat"),
    (HEATWAVE_F, "heatwave-level temperature"),
    (ELEVATED_TEMP_F, "elevated summer temperature"),
];

/// Load reasons, highest band first; the first match wins.
const LOAD_RULES: &[(f64, &str)] = &[
    (NEAR_CAPACITY_LOAD, "near-capacity load"),
    (HIGH_LOAD, "high load"),
    (ELEVATED_LOAD, "elevated load"),
];

/// Stressed-neighbor reasons by minimum count; the first match wins.
const NEIGHBOR_RULES: &[(usize, &str)] = &[
    (2, "multiple stressed neighboring transformers"),
    (1, "a stressed neighboring transformer"),
];

fn first_band<T: PartialOrd + Copy>(rules: &[(T, &'static str)], value: T) -> Option<&'static str> {
    rules
        .iter()
        .find(|(min, _)| value >= *min)
        .map(|(_, text)| *text)
}

fn level_suffix(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Red => " Prioritize review.",
        RiskLevel::Yellow => " Monitor conditions.",
        RiskLevel::Green => "",
    }
}

/// Load as a whole percentage, e.g. `0.934` -> `"93%"`. Ties go to even.
fn pct(load: f64) -> String {
    format!("{}%", (load * 100.0).round_ties_even() as i64)
}

/// Builds the justification for one node-timestep.
///
/// Reasons are collected in a fixed order (temperature, load, neighbors),
/// each from its own rule table, then joined into one sentence with a
/// suffix chosen by `level`.
///
/// # Examples
///
/// ```
/// use grid_stress::risk::explain::explain;
/// use grid_stress::sim::RiskLevel;
///
/// let text = explain(100.0, 0.95, 0, RiskLevel::Red);
/// assert_eq!(
///     text,
///     "Risk driven by extreme ambient heat, near-capacity load (95%). Prioritize review."
/// );
/// ```
pub fn explain(
    ambient_temp_f: f64,
    load_pct: f64,
    stressed_neighbor_count: usize,
    level: RiskLevel,
) -> String {
    let mut reasons: Vec<String> = Vec::with_capacity(3);

    if let Some(text) = first_band(TEMPERATURE_RULES, ambient_temp_f) {
        reasons.push(text.to_string());
    }
    if let Some(text) = first_band(LOAD_RULES, load_pct) {
        reasons.push(format!("{text} ({})", pct(load_pct)));
    }
    if let Some(text) = first_band(NEIGHBOR_RULES, stressed_neighbor_count) {
        reasons.push(text.to_string());
    }

    if reasons.is_empty() {
        return LOW_RISK_EXPLANATION.to_string();
    }
    format!(
        "Risk driven by {}.{}",
        reasons.join(", "),
        level_suffix(level)
    )
}

/// Fills `explanation` on every state in place.
///
/// Must run after [`apply_risk_model`](super::apply_risk_model): the suffix
/// reads each state's `risk_level`. Neighbor stress is read from the same
/// timestep's loads.
pub fn apply_explanations(nodes: &[Node], timesteps: &mut [Timestep]) {
    let neighbors_of = neighbor_map(nodes);

    for ts in timesteps.iter_mut() {
        let ambient = ts.ambient_temp_f;
        let texts: Vec<String> = {
            let load_by_id = ts.load_by_id();
            ts.states
                .iter()
                .map(|s| {
                    let neighbors = neighbors_of.get(s.id.as_str()).copied().unwrap_or(&[]);
                    let stressed = stressed_neighbors(neighbors, &load_by_id);
                    explain(ambient, s.load_pct, stressed, s.risk_level)
                })
                .collect()
        };

        for (state, text) in ts.states.iter_mut().zip(texts) {
            state.explanation = text;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::apply_risk_model;
    use crate::sim::types::NodeState;

    #[test]
    fn quiet_conditions_read_as_low_risk() {
        assert_eq!(explain(85.0, 0.6, 0, RiskLevel::Green), LOW_RISK_EXPLANATION);
    }

    #[test]
    fn temperature_bands_pick_hottest_match() {
        assert_eq!(
            explain(90.0, 0.5, 0, RiskLevel::Green),
            "Risk driven by elevated summer temperature."
        );
        assert_eq!(
            explain(95.0, 0.5, 0, RiskLevel::Yellow),
            "Risk driven by heatwave-level temperature. Monitor conditions."
        );
        assert_eq!(
            explain(104.0, 0.5, 0, RiskLevel::Yellow),
            "Risk driven by extreme ambient heat. Monitor conditions."
        );
    }

    #[test]
    fn load_bands_report_rounded_percent() {
        assert_eq!(
            explain(80.0, 0.851, 0, RiskLevel::Green),
            "Risk driven by elevated load (85%)."
        );
        assert_eq!(
            explain(80.0, 0.934, 0, RiskLevel::Yellow),
            "Risk driven by high load (93%). Monitor conditions."
        );
        assert_eq!(
            explain(80.0, 1.0, 0, RiskLevel::Yellow),
            "Risk driven by near-capacity load (100%). Monitor conditions."
        );
        assert_eq!(explain(80.0, 0.849, 0, RiskLevel::Green), LOW_RISK_EXPLANATION);
    }

    #[test]
    fn percent_ties_round_to_even() {
        assert_eq!(
            explain(80.0, 0.865, 0, RiskLevel::Green),
            "Risk driven by elevated load (86%)."
        );
        assert_eq!(
            explain(80.0, 0.905, 0, RiskLevel::Green),
            "Risk driven by high load (90%)."
        );
        assert_eq!(
            explain(80.0, 0.945, 0, RiskLevel::Yellow),
            "Risk driven by high load (94%). Monitor conditions."
        );
    }

    #[test]
    fn neighbor_rules_distinguish_one_from_many() {
        assert_eq!(
            explain(80.0, 0.5, 1, RiskLevel::Green),
            "Risk driven by a stressed neighboring transformer."
        );
        assert_eq!(
            explain(80.0, 0.5, 3, RiskLevel::Green),
            "Risk driven by multiple stressed neighboring transformers."
        );
    }

    #[test]
    fn all_reasons_join_in_fixed_order() {
        assert_eq!(
            explain(97.0, 0.91, 2, RiskLevel::Red),
            "Risk driven by heatwave-level temperature, high load (91%), \
             multiple stressed neighboring transformers. Prioritize review."
        );
    }

    #[test]
    fn explanations_follow_scored_levels() {
        let nodes = vec![
            Node {
                id: "T1".into(),
                x: 0.0,
                y: 0.0,
                rating_kva: 500,
                neighbors: vec!["T2".into(), "T3".into()],
            },
            Node {
                id: "T2".into(),
                x: 2.0,
                y: 0.0,
                rating_kva: 500,
                neighbors: vec![],
            },
            Node {
                id: "T3".into(),
                x: 4.0,
                y: 0.0,
                rating_kva: 500,
                neighbors: vec![],
            },
        ];
        let mut steps = vec![Timestep {
            t: 0,
            ambient_temp_f: 100.0,
            states: vec![
                NodeState::new("T1", 0.95),
                NodeState::new("T2", 0.90),
                NodeState::new("T3", 0.90),
            ],
        }];
        apply_risk_model(&nodes, &mut steps);
        apply_explanations(&nodes, &mut steps);

        let t1 = &steps[0].states[0];
        assert_eq!(t1.risk_level, RiskLevel::Red);
        assert!(t1.explanation.contains("multiple stressed neighboring transformers"));
        assert!(t1.explanation.ends_with("Prioritize review."));

        let t2 = &steps[0].states[1];
        assert!(t2.explanation.starts_with("Risk driven by extreme ambient heat, high load (90%)"));
    }
}
