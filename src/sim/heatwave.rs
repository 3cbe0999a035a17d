//! Multi-timestep heatwave load simulation.

use rand::Rng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::config::HeatwaveConfig;
use crate::error::{Error, Result};
use crate::grid::Node;

use super::numeric::{clamp_unit, round4};
use super::types::{NodeState, Timestep};

/// Temperature at which heat stress starts (°F).
pub const TEMP_STRESS_LOW_F: f64 = 85.0;
/// Temperature at which heat stress saturates (°F).
pub const TEMP_STRESS_HIGH_F: f64 = 100.0;
/// Load uplift at full heat stress (fraction of rating).
pub const MAX_HEAT_UPLIFT: f64 = 0.25;
/// Bounds of the persistent per-node demand skew.
pub const DEMAND_FACTOR_RANGE: (f64, f64) = (0.90, 1.15);
/// Half-width of the per-step uniform load noise.
pub const NOISE_AMPLITUDE: f64 = 0.02;

/// Normalizes an ambient temperature to a heat-stress fraction in `[0, 1]`.
///
/// # Examples
///
/// ```
/// use grid_stress::sim::heatwave::heat_stress;
///
/// assert_eq!(heat_stress(80.0), 0.0);
/// assert_eq!(heat_stress(100.0), 1.0);
/// ```
pub fn heat_stress(ambient_f: f64) -> f64 {
    clamp_unit((ambient_f - TEMP_STRESS_LOW_F) / (TEMP_STRESS_HIGH_F - TEMP_STRESS_LOW_F))
}

/// Simulates one timestep per temperature in `cfg.ramp_f`.
///
/// Each node draws a baseline load and a demand factor once, then every
/// step adds a heat-driven uplift and uniform noise:
/// `load = clamp((baseline + uplift + noise) * factor)`.
///
/// Draw order is part of the contract: all baselines (node order), all
/// demand factors (node order), then one noise draw per node per step.
/// States start with placeholder risk fields.
///
/// # Errors
///
/// Returns [`Error::InvalidConfig`] if `cfg` fails [`HeatwaveConfig::validate`].
pub fn simulate_heatwave(
    nodes: &[Node],
    cfg: &HeatwaveConfig,
    rng: &mut StdRng,
) -> Result<Vec<Timestep>> {
    let errors = cfg.validate();
    if !errors.is_empty() {
        return Err(Error::InvalidConfig(errors));
    }

    let baseline: Vec<f64> = nodes
        .iter()
        .map(|_| rng.random_range(cfg.baseline_load_min..=cfg.baseline_load_max))
        .collect();
    let (factor_lo, factor_hi) = DEMAND_FACTOR_RANGE;
    let demand_factor: Vec<f64> = nodes
        .iter()
        .map(|_| rng.random_range(factor_lo..=factor_hi))
        .collect();

    let mut timesteps = Vec::with_capacity(cfg.ramp_f.len());
    for (t, &ambient) in cfg.ramp_f.iter().enumerate() {
        let uplift = heat_stress(ambient) * MAX_HEAT_UPLIFT;
        debug!(t, ambient_temp_f = ambient, uplift, "simulating timestep");

        let states = nodes
            .iter()
            .zip(baseline.iter().zip(&demand_factor))
            .map(|(node, (&base, &factor))| {
                let noise = rng.random_range(-NOISE_AMPLITUDE..=NOISE_AMPLITUDE);
                let load = clamp_unit((base + uplift + noise) * factor);
                NodeState::new(node.id.clone(), round4(load))
            })
            .collect();

        timesteps.push(Timestep {
            t,
            ambient_temp_f: ambient,
            states,
        });
    }

    Ok(timesteps)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;
    use crate::config::GridConfig;
    use crate::grid::generate_nodes;
    use crate::sim::types::{PLACEHOLDER_EXPLANATION, RiskLevel};

    fn run(seed: u64, heat: &HeatwaveConfig) -> (Vec<Node>, Vec<Timestep>) {
        let mut rng = StdRng::seed_from_u64(seed);
        let grid = GridConfig {
            num_nodes: 10,
            ..GridConfig::default()
        };
        let nodes = generate_nodes(&grid, &mut rng).expect("valid grid");
        let steps = simulate_heatwave(&nodes, heat, &mut rng).expect("valid heatwave");
        (nodes, steps)
    }

    #[test]
    fn heat_stress_is_linear_between_anchors() {
        assert_eq!(heat_stress(85.0), 0.0);
        assert!((heat_stress(92.5) - 0.5).abs() < 1e-12);
        assert_eq!(heat_stress(110.0), 1.0);
    }

    #[test]
    fn one_timestep_per_ramp_entry() {
        let heat = HeatwaveConfig::default();
        let (nodes, steps) = run(42, &heat);
        assert_eq!(steps.len(), 7);
        for (i, ts) in steps.iter().enumerate() {
            assert_eq!(ts.t, i);
            assert_eq!(ts.ambient_temp_f, heat.ramp_f[i]);
            let ids: Vec<&str> = ts.states.iter().map(|s| s.id.as_str()).collect();
            let expected: Vec<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
            assert_eq!(ids, expected);
        }
    }

    #[test]
    fn loads_stay_in_unit_interval_and_start_unscored() {
        let heat = HeatwaveConfig {
            baseline_load_min: 0.95,
            baseline_load_max: 1.0,
            ramp_f: vec![70.0, 100.0, 120.0],
        };
        let (_, steps) = run(5, &heat);
        for s in steps.iter().flat_map(|ts| &ts.states) {
            assert!((0.0..=1.0).contains(&s.load_pct), "{s:?}");
            assert_eq!(s.risk_score, 0.0);
            assert_eq!(s.risk_level, RiskLevel::Green);
            assert_eq!(s.explanation, PLACEHOLDER_EXPLANATION);
        }
        // baseline >= 0.95 with full uplift and factor >= 0.9 always saturates
        assert!(steps[2].states.iter().all(|s| s.load_pct == 1.0));
    }

    #[test]
    fn load_stays_within_noise_envelope() {
        let heat = HeatwaveConfig {
            baseline_load_min: 0.5,
            baseline_load_max: 0.5,
            ramp_f: vec![85.0],
        };
        let (_, steps) = run(9, &heat);
        let (lo, hi) = DEMAND_FACTOR_RANGE;
        for s in &steps[0].states {
            assert!(s.load_pct >= round4((0.5 - NOISE_AMPLITUDE) * lo));
            assert!(s.load_pct <= round4((0.5 + NOISE_AMPLITUDE) * hi));
        }
    }

    #[test]
    fn hotter_steps_carry_more_load_on_average() {
        let heat = HeatwaveConfig {
            ramp_f: vec![85.0, 100.0],
            ..HeatwaveConfig::default()
        };
        let (_, steps) = run(42, &heat);
        let mean = |ts: &Timestep| {
            ts.states.iter().map(|s| s.load_pct).sum::<f64>() / ts.states.len() as f64
        };
        assert!(mean(&steps[1]) > mean(&steps[0]) + 0.1);
    }

    #[test]
    fn same_seed_same_loads() {
        let heat = HeatwaveConfig::default();
        assert_eq!(run(77, &heat).1, run(77, &heat).1);
    }

    #[test]
    fn rejects_inverted_baseline_range() {
        let heat = HeatwaveConfig {
            baseline_load_min: 0.8,
            baseline_load_max: 0.6,
            ..HeatwaveConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let err = simulate_heatwave(&[], &heat, &mut rng).expect_err("must fail");
        assert!(matches!(err, Error::InvalidConfig(_)));
    }
}
