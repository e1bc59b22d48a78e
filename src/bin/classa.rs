use anyhow::{bail, Context};
use clap::Parser;
use serde_json::json;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::{info, Level};

use classa_entropy::{
    AngleUnit, ClassAConfig, ClassAEngine, ReconstructionMethod, Symbolization,
};

// --- CLI Arguments ---
#[derive(Parser, Debug)]
#[command(version, about = "ClassA entropy of a univariate series", long_about = None)]
struct Args {
    /// Signal file: numbers separated by whitespace, commas or newlines (stdin if omitted or "-")
    input: Option<PathBuf>,

    /// JSON options file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Coarse-graining scale
    #[arg(short, long)]
    scale: Option<usize>,

    /// Number of symbols
    #[arg(short, long)]
    k: Option<usize>,

    /// Reconstruction: 1 improved second-order diff, 2 second-order diff, 3 Takens lag-1
    #[arg(short, long)]
    phase: Option<u8>,

    /// equal | cluster | normcdf | sigmoid | gaussian | arctanh
    #[arg(short = 'y', long)]
    symbolization: Option<String>,

    /// Logarithm base of the entropy
    #[arg(short = 'b', long)]
    log_base: Option<f64>,

    /// Report the raw entropy instead of the normalized one
    #[arg(long)]
    no_normalize: bool,

    /// deg | rad
    #[arg(short = 'u', long)]
    angle_unit: Option<String>,

    /// Request the phase-space plot (needs a renderer; the CLI only warns)
    #[arg(long)]
    plot: bool,

    /// Evaluate several scales, e.g. --scales 1,2,3,4
    #[arg(long, value_delimiter = ',')]
    scales: Vec<usize>,

    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn build_config(&self) -> anyhow::Result<ClassAConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                ClassAConfig::from_json(&text)?
            }
            None => ClassAConfig::default(),
        };

        if let Some(scale) = self.scale {
            config.scale = scale;
        }
        if let Some(k) = self.k {
            config.k = k;
        }
        if let Some(phase) = self.phase {
            config.phase = ReconstructionMethod::try_from(phase)?;
        }
        if let Some(name) = &self.symbolization {
            config.symbolization = name.parse::<Symbolization>()?;
        }
        if let Some(base) = self.log_base {
            config.log_base = base;
        }
        if self.no_normalize {
            config.normalize = false;
        }
        if let Some(unit) = &self.angle_unit {
            config.angle_unit = unit.parse::<AngleUnit>()?;
        }
        if self.plot {
            config.plot = true;
        }

        config.validate()?;
        Ok(config)
    }
}

fn read_signal(input: Option<&PathBuf>) -> anyhow::Result<Vec<f64>> {
    let text = match input {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let signal = text
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|tok| !tok.is_empty())
        .map(|tok| {
            tok.parse::<f64>()
                .with_context(|| format!("'{}' is not a number", tok))
        })
        .collect::<anyhow::Result<Vec<f64>>>()?;

    if signal.is_empty() {
        bail!("no samples in input");
    }
    Ok(signal)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to stderr so stdout is clean JSON
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let config = args.build_config()?;
    let signal = read_signal(args.input.as_ref())?;
    info!(samples = signal.len(), "signal loaded");

    let engine = ClassAEngine::with_config(config);

    let output = if args.scales.is_empty() {
        serde_json::to_value(engine.classify(&signal)?)?
    } else {
        let rows: Vec<serde_json::Value> = args
            .scales
            .iter()
            .zip(engine.classify_scales(&signal, &args.scales))
            .map(|(scale, result)| match result {
                Ok(r) => json!({ "scale": scale, "result": r }),
                Err(e) => json!({ "scale": scale, "error": e.to_string() }),
            })
            .collect();
        serde_json::Value::Array(rows)
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let args = Args::parse_from(["classa", "-k", "6", "-p", "2", "-y", "sigmoid", "--plot"]);
        let config = args.build_config().unwrap();
        assert_eq!(config.k, 6);
        assert_eq!(config.phase, ReconstructionMethod::SecondOrderDiff);
        assert_eq!(config.symbolization, Symbolization::Sigmoid);
        assert!(config.plot);
        assert!(config.normalize);
    }

    #[test]
    fn test_plot_off_by_default() {
        let args = Args::parse_from(["classa", "--no-normalize"]);
        let config = args.build_config().unwrap();
        assert!(!config.plot);
        assert!(!config.normalize);
    }

    #[test]
    fn test_invalid_flag_value_rejected() {
        let args = Args::parse_from(["classa", "-k", "1"]);
        assert!(args.build_config().is_err());
    }
}
