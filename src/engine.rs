//! ClassA engine - the full pipeline.
//!
//! ```text
//! signal ─► coarse_grain ─► reconstruct ─► classification_angles ─┬─► ClassificationStats
//!                                                                 └─► symbolize ─► entropy
//! ```
//!
//! Every call validates its inputs first and allocates its own buffers, so
//! one engine can be shared between threads.

use crate::angle::{classification_angles, ClassificationStats};
use crate::cluster::{Clusterer, KMeans1d};
use crate::coarse::coarse_grain;
use crate::config::{validate_signal, AngleUnit, ClassAConfig};
use crate::entropy::{symbol_entropy, SymbolCounts};
use crate::error::{ClassAError, Result};
use crate::phase_space::reconstruct;
use crate::plot::{PhasePlotRenderer, PhasePlotView};
use crate::symbolize::{symbolize, SymbolSequence};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Output of one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassAResult {
    /// (RAS, P1, P24, P3) in `angle_unit`
    pub stats: ClassificationStats,
    pub angle_unit: AngleUnit,

    /// Entropy, normalized when the config asked for it
    pub entropy: f64,

    /// Probabilities of the non-empty symbols, ascending by label
    pub probabilities: Vec<f64>,

    /// Per-point classification angles in degrees
    pub angles: Vec<f64>,

    pub symbols: SymbolSequence,
    pub counts: SymbolCounts,

    /// Scale used for coarse-graining and the resulting series length
    pub scale: usize,
    pub coarse_len: usize,
}

impl ClassAResult {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| ClassAError::Serialization(e.to_string()))
    }
}

/// Pipeline with its configuration and pluggable collaborators.
pub struct ClassAEngine {
    config: ClassAConfig,
    clusterer: Box<dyn Clusterer>,
    renderer: Option<Box<dyn PhasePlotRenderer>>,
}

impl ClassAEngine {
    /// Create an engine with default configuration
    pub fn new() -> Self {
        Self::with_config(ClassAConfig::default())
    }

    /// Create with custom configuration
    pub fn with_config(config: ClassAConfig) -> Self {
        Self {
            config,
            clusterer: Box::new(KMeans1d),
            renderer: None,
        }
    }

    /// Replace the clusterer used by cluster-based symbolization
    pub fn with_clusterer(mut self, clusterer: Box<dyn Clusterer>) -> Self {
        self.clusterer = clusterer;
        self
    }

    /// Attach a renderer for `plot = true` runs
    pub fn with_renderer(mut self, renderer: Box<dyn PhasePlotRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Get engine configuration
    pub fn config(&self) -> &ClassAConfig {
        &self.config
    }

    /// Run the pipeline on `signal`.
    pub fn classify(&self, signal: &[f64]) -> Result<ClassAResult> {
        self.run(signal, &self.config)
    }

    /// Run the pipeline once per scale.
    ///
    /// A failing scale (typically too short after coarse-graining) does not
    /// stop the others.
    pub fn classify_scales(&self, signal: &[f64], scales: &[usize]) -> Vec<Result<ClassAResult>> {
        scales
            .iter()
            .map(|&scale| {
                let config = ClassAConfig {
                    scale,
                    ..self.config.clone()
                };
                self.run(signal, &config)
            })
            .collect()
    }

    fn run(&self, signal: &[f64], config: &ClassAConfig) -> Result<ClassAResult> {
        config.validate()?;
        validate_signal(signal)?;

        let coarse = coarse_grain(signal, config.scale)?;
        let pair = reconstruct(&coarse, config.phase)?;
        tracing::debug!(
            len = signal.len(),
            scale = config.scale,
            coarse_len = coarse.len(),
            points = pair.len(),
            method = %config.phase,
            "reconstructed phase space"
        );

        let theta = classification_angles(&pair);
        let stats = ClassificationStats::from_angles(theta.as_slice()).in_unit(config.angle_unit);

        let symbols = symbolize(
            theta.as_slice(),
            config.k,
            config.symbolization,
            self.clusterer.as_ref(),
            config.cluster_max_iter,
        )?;
        let counts = SymbolCounts::tally(&symbols, config.k);
        let estimate = symbol_entropy(&counts, config.log_base, config.normalize)?;
        tracing::debug!(
            entropy = estimate.entropy,
            occupied = counts.occupied(),
            k = config.k,
            "symbol entropy"
        );

        if config.plot {
            match &self.renderer {
                Some(renderer) => renderer.render(&PhasePlotView {
                    xn: pair.xn.as_slice(),
                    yn: pair.yn.as_slice(),
                    symbols: &symbols,
                    k: config.k,
                    method: config.phase,
                })?,
                None => tracing::warn!("plot requested but no renderer attached"),
            }
        }

        Ok(ClassAResult {
            stats,
            angle_unit: config.angle_unit,
            entropy: estimate.entropy,
            probabilities: estimate.probabilities,
            angles: theta.as_slice().to_vec(),
            symbols,
            counts,
            scale: config.scale,
            coarse_len: coarse.len(),
        })
    }
}

impl Default for ClassAEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ClassAEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassAEngine")
            .field("config", &self.config)
            .field("renderer", &self.renderer.is_some())
            .finish_non_exhaustive()
    }
}

/// Run the pipeline once with `config` and the default clusterer.
pub fn classify(signal: &[f64], config: &ClassAConfig) -> Result<ClassAResult> {
    ClassAEngine::with_config(config.clone()).classify(signal)
}
