//! Grid stress entry point: CLI wiring, logging setup and snapshot export.

use std::path::{Path, PathBuf};
use std::process;

use tracing::info;
use tracing_subscriber::EnvFilter;

use grid_stress::Error;
use grid_stress::config::ScenarioConfig;
use grid_stress::io::export::{export_csv, export_json};
use grid_stress::pipeline;
use grid_stress::report::RiskSummary;

const DEFAULT_OUT: &str = "sim_output.json";

/// Parsed CLI arguments.
#[derive(Debug, Default)]
struct CliArgs {
    scenario_path: Option<PathBuf>,
    preset: Option<String>,
    seed_override: Option<u64>,
    nodes_override: Option<usize>,
    out: Option<PathBuf>,
    telemetry_out: Option<PathBuf>,
}

fn print_help() {
    eprintln!("grid-stress: heatwave risk simulator for a toy distribution grid");
    eprintln!();
    eprintln!("Usage: grid-stress [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>        Load scenario from TOML config file");
    eprintln!("  --preset <name>          Use a built-in preset (baseline, dense, extreme)");
    eprintln!("  --seed <u64>             Override random seed");
    eprintln!("  --nodes <n>              Override grid.num_nodes");
    eprintln!("  --out <path>             JSON snapshot path (default: {DEFAULT_OUT})");
    eprintln!("  --telemetry-out <path>   Also export node states to CSV");
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the baseline preset is used.");
    eprintln!("Log verbosity follows RUST_LOG (default: info).");
}

fn parse_args_from(args: &[String]) -> Result<CliArgs, String> {
    let mut cli = CliArgs::default();

    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        if flag == "--help" || flag == "-h" {
            print_help();
            process::exit(0);
        }
        i += 1;
        let value = || {
            args.get(i)
                .cloned()
                .ok_or_else(|| format!("{flag} requires a value"))
        };
        match flag {
            "--scenario" => cli.scenario_path = Some(PathBuf::from(value()?)),
            "--preset" => cli.preset = Some(value()?),
            "--seed" => {
                let raw = value()?;
                let seed = raw
                    .parse::<u64>()
                    .map_err(|_| format!("--seed value \"{raw}\" is not a valid u64"))?;
                cli.seed_override = Some(seed);
            }
            "--nodes" => {
                let raw = value()?;
                let n = raw
                    .parse::<usize>()
                    .map_err(|_| format!("--nodes value \"{raw}\" is not a valid count"))?;
                cli.nodes_override = Some(n);
            }
            "--out" => cli.out = Some(PathBuf::from(value()?)),
            "--telemetry-out" => cli.telemetry_out = Some(PathBuf::from(value()?)),
            other => return Err(format!("unknown argument \"{other}\"")),
        }
        i += 1;
    }

    if cli.scenario_path.is_some() && cli.preset.is_some() {
        return Err("--scenario and --preset are mutually exclusive".to_string());
    }

    Ok(cli)
}

fn load_scenario(cli: &CliArgs) -> ScenarioConfig {
    // --scenario takes priority, then --preset, then baseline default
    let loaded = if let Some(ref path) = cli.scenario_path {
        ScenarioConfig::from_toml_file(path)
    } else if let Some(ref name) = cli.preset {
        ScenarioConfig::from_preset(name)
    } else {
        Ok(ScenarioConfig::baseline())
    };
    let mut scenario = loaded.unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    if let Some(seed) = cli.seed_override {
        scenario.simulation.seed = seed;
    }
    if let Some(n) = cli.nodes_override {
        scenario.grid.num_nodes = n;
    }
    scenario
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Prints one line per config error, or the error itself otherwise.
fn report_failure(err: &Error) {
    match err {
        Error::InvalidConfig(errors) => {
            for e in errors {
                eprintln!("{e}");
            }
        }
        other => eprintln!("error: {other}"),
    }
}

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = parse_args_from(&args).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        print_help();
        process::exit(1);
    });

    let scenario = load_scenario(&cli);

    let snapshot = pipeline::run(&scenario).unwrap_or_else(|e| {
        report_failure(&e);
        process::exit(1);
    });

    println!("{}", RiskSummary::from_timesteps(&snapshot.timesteps));

    let out = cli.out.as_deref().unwrap_or(Path::new(DEFAULT_OUT));
    if let Err(e) = export_json(&snapshot, out) {
        eprintln!("error: failed to write snapshot: {e}");
        process::exit(1);
    }
    info!(path = %out.display(), "snapshot written");

    if let Some(ref path) = cli.telemetry_out {
        if let Err(e) = export_csv(&snapshot.timesteps, path) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        info!(path = %path.display(), "telemetry written");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_overrides() {
        let cli = parse_args_from(&args(&["--preset", "dense", "--seed", "7", "--nodes", "15"]))
            .expect("parse should succeed");
        assert_eq!(cli.preset.as_deref(), Some("dense"));
        assert_eq!(cli.seed_override, Some(7));
        assert_eq!(cli.nodes_override, Some(15));

        let scenario = load_scenario(&cli);
        assert_eq!(scenario.simulation.seed, 7);
        assert_eq!(scenario.grid.num_nodes, 15);
        assert_eq!(scenario.grid.max_neighbors, 4);
    }

    #[test]
    fn rejects_missing_value_and_bad_numbers() {
        assert!(parse_args_from(&args(&["--out"])).is_err());
        assert!(parse_args_from(&args(&["--seed", "abc"])).is_err());
        assert!(parse_args_from(&args(&["--bogus"])).is_err());
    }

    #[test]
    fn scenario_and_preset_are_exclusive() {
        let err = parse_args_from(&args(&["--scenario", "a.toml", "--preset", "dense"]))
            .expect_err("must fail");
        assert!(err.contains("mutually exclusive"));
    }
}
