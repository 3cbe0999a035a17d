//! Snapshot export: JSON document for visualization clients and a flat CSV
//! telemetry table.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::grid::Node;
use crate::pipeline::Snapshot;
use crate::sim::Timestep;

/// Column header for CSV telemetry export.
const HEADER: &str = "t,ambient_temp_f,id,load_pct,risk_score,risk_level";

#[derive(Serialize)]
struct Document<'a> {
    nodes: &'a [Node],
    timesteps: &'a [Timestep],
}

/// Serializes nodes and timesteps as a pretty-printed JSON document.
///
/// The document has two top-level fields, `nodes` and `timesteps`, with the
/// field names the visualization client expects.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_bytes(nodes: &[Node], timesteps: &[Timestep]) -> Result<Vec<u8>> {
    let bytes = serde_json::to_vec_pretty(&Document { nodes, timesteps })?;
    Ok(bytes)
}

/// Writes the snapshot as JSON to `path`, creating parent directories.
///
/// # Errors
///
/// Returns an error if serialization, directory creation or writing fails.
pub fn export_json(snapshot: &Snapshot, path: &Path) -> Result<()> {
    let bytes = to_json_bytes(&snapshot.nodes, &snapshot.timesteps)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, bytes)?;
    Ok(())
}

/// Exports one CSV row per node-timestep to the given path.
///
/// # Errors
///
/// Returns an error if file creation or writing fails.
pub fn export_csv(timesteps: &[Timestep], path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(timesteps, buf)
}

/// Writes timestep states as CSV to any writer.
///
/// Produces deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_csv(timesteps: &[Timestep], writer: impl Write) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;

    for ts in timesteps {
        for s in &ts.states {
            wtr.write_record(&[
                ts.t.to_string(),
                format!("{:.1}", ts.ambient_temp_f),
                s.id.clone(),
                format!("{:.4}", s.load_pct),
                format!("{:.4}", s.risk_score),
                s.risk_level.code().to_string(),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
