//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Topology layout, ratings and neighbor-degree bounds.
    #[serde(default)]
    pub grid: GridConfig,
    /// Heatwave load parameters and the temperature ramp.
    #[serde(default)]
    pub heatwave: HeatwaveConfig,
    /// Global run parameters.
    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// Topology generator parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// Number of transformer nodes (10-20 typical, must be >= 1).
    pub num_nodes: usize,
    /// Horizontal distance between grid columns.
    pub x_spacing: f64,
    /// Vertical distance between grid rows.
    pub y_spacing: f64,
    /// Capacity ratings a node may be assigned (kVA).
    pub rating_kva_options: Vec<u32>,
    /// Minimum neighbor count per node.
    pub min_neighbors: usize,
    /// Maximum neighbor count per node.
    pub max_neighbors: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            num_nodes: 12,
            x_spacing: 2.0,
            y_spacing: 2.0,
            rating_kva_options: vec![250, 500, 750, 1000],
            min_neighbors: 1,
            max_neighbors: 3,
        }
    }
}

/// Heatwave simulator parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeatwaveConfig {
    /// Lower bound of the per-node baseline load draw (fraction of rating).
    pub baseline_load_min: f64,
    /// Upper bound of the per-node baseline load draw (fraction of rating).
    pub baseline_load_max: f64,
    /// Ambient temperature per timestep (°F), in simulation order.
    pub ramp_f: Vec<f64>,
}

impl Default for HeatwaveConfig {
    fn default() -> Self {
        Self {
            baseline_load_min: 0.55,
            baseline_load_max: 0.75,
            ramp_f: vec![88.0, 90.0, 92.0, 95.0, 97.0, 99.0, 100.0],
        }
    }
}

/// Global run parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Master random seed shared by every pipeline stage.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"grid.num_nodes"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl GridConfig {
    /// Checks the preconditions of the topology generator.
    ///
    /// `min_neighbors` must be reachable with the nodes that exist, otherwise
    /// the random fill could never terminate. A single-node grid is therefore
    /// only valid with `min_neighbors = 0`.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.num_nodes == 0 {
            errors.push(ConfigError::new("grid.num_nodes", "must be >= 1"));
        }
        if !self.x_spacing.is_finite() {
            errors.push(ConfigError::new("grid.x_spacing", "must be finite"));
        }
        if !self.y_spacing.is_finite() {
            errors.push(ConfigError::new("grid.y_spacing", "must be finite"));
        }
        if self.rating_kva_options.is_empty() {
            errors.push(ConfigError::new(
                "grid.rating_kva_options",
                "must not be empty",
            ));
        }
        if self.min_neighbors > self.max_neighbors {
            errors.push(ConfigError::new(
                "grid.min_neighbors",
                "must be <= grid.max_neighbors",
            ));
        }
        if self.num_nodes > 0 && self.min_neighbors > self.num_nodes - 1 {
            errors.push(ConfigError::new(
                "grid.min_neighbors",
                format!(
                    "must be <= grid.num_nodes - 1 ({}), got {}",
                    self.num_nodes - 1,
                    self.min_neighbors
                ),
            ));
        }

        errors
    }
}

impl HeatwaveConfig {
    /// Checks the preconditions of the heatwave simulator.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        for (field, value) in [
            ("heatwave.baseline_load_min", self.baseline_load_min),
            ("heatwave.baseline_load_max", self.baseline_load_max),
        ] {
            if !(0.0..=1.0).contains(&value) {
                errors.push(ConfigError::new(field, "must be in [0.0, 1.0]"));
            }
        }
        if self.baseline_load_min > self.baseline_load_max {
            errors.push(ConfigError::new(
                "heatwave.baseline_load_min",
                "must be <= heatwave.baseline_load_max",
            ));
        }
        if self.ramp_f.is_empty() {
            errors.push(ConfigError::new("heatwave.ramp_f", "must not be empty"));
        }
        if let Some(idx) = self.ramp_f.iter().position(|t| !t.is_finite()) {
            errors.push(ConfigError::new(
                format!("heatwave.ramp_f[{idx}]"),
                "must be finite",
            ));
        }

        errors
    }
}

impl ScenarioConfig {
    /// Returns the baseline scenario: 12 nodes under the default heat ramp.
    pub fn baseline() -> Self {
        Self {
            grid: GridConfig::default(),
            heatwave: HeatwaveConfig::default(),
            simulation: SimulationConfig::default(),
        }
    }

    /// Returns the dense preset: a 20-node grid with up to four neighbors each.
    pub fn dense() -> Self {
        Self {
            grid: GridConfig {
                num_nodes: 20,
                max_neighbors: 4,
                ..GridConfig::default()
            },
            heatwave: HeatwaveConfig::default(),
            simulation: SimulationConfig::default(),
        }
    }

    /// Returns the extreme preset: higher baseline demand and a ramp that
    /// climbs past 100°F before easing off.
    pub fn extreme() -> Self {
        Self {
            grid: GridConfig::default(),
            heatwave: HeatwaveConfig {
                baseline_load_min: 0.65,
                baseline_load_max: 0.80,
                ramp_f: vec![92.0, 95.0, 98.0, 101.0, 104.0, 105.0, 103.0, 99.0],
            },
            simulation: SimulationConfig::default(),
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "dense", "extreme"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "dense" => Ok(Self::dense()),
            "extreme" => Ok(Self::extreme()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all sections and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = self.grid.validate();
        errors.extend(self.heatwave.validate());
        errors
    }
}
