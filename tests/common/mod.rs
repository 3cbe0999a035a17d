//! Shared test fixtures for integration tests.

use grid_stress::config::{GridConfig, HeatwaveConfig, ScenarioConfig, SimulationConfig};
use grid_stress::pipeline::{self, Snapshot};

/// Default heat ramp: normal day into peak heat.
pub const DEFAULT_RAMP_F: [f64; 7] = [88.0, 90.0, 92.0, 95.0, 97.0, 99.0, 100.0];

/// Ten-node scenario with seed 42 and the default ramp.
pub fn ten_node_config() -> ScenarioConfig {
    ScenarioConfig {
        grid: GridConfig {
            num_nodes: 10,
            ..GridConfig::default()
        },
        heatwave: HeatwaveConfig {
            ramp_f: DEFAULT_RAMP_F.to_vec(),
            ..HeatwaveConfig::default()
        },
        simulation: SimulationConfig { seed: 42 },
    }
}

/// Runs the pipeline, failing the test on configuration errors.
pub fn run(cfg: &ScenarioConfig) -> Snapshot {
    pipeline::run(cfg).expect("pipeline should run")
}
