/// JSON snapshot and CSV telemetry export.
pub mod export;
