//! Small numeric helpers shared by the simulator and the risk model.

/// Clamps `x` into `[0, 1]`.
pub fn clamp_unit(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// Maps `x` linearly from `[x0, x1]` onto `[0, 1]`, clamped outside.
pub fn ramp(x: f64, x0: f64, x1: f64) -> f64 {
    if x <= x0 {
        return 0.0;
    }
    if x >= x1 {
        return 1.0;
    }
    (x - x0) / (x1 - x0)
}

/// Rounds to 4 decimal places, ties to even.
pub fn round4(x: f64) -> f64 {
    (x * 10_000.0).round_ties_even() / 10_000.0
}
