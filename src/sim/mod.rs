/// Heatwave load simulator.
pub mod heatwave;
pub mod numeric;
pub mod types;

pub use heatwave::simulate_heatwave;
pub use types::{NodeState, RiskLevel, Timestep};
