//! # ClassA Entropy
//!
//! Classification-angle statistics and symbolic entropy for univariate
//! physiological series such as heart-rate variability.
//!
//! ## Theory
//!
//! The series is coarse-grained, embedded as a planar point cloud
//! (Yn, Xn), and every point is reduced to its polar angle θ ∈ [0°, 360°).
//! The angles yield two kinds of output:
//!
//! ```text
//! RAS = mean(θ)
//! P1  = P(θ ∈ [0°, 90°))            both coordinates increasing
//! P24 = P(θ ∈ [90°,180°) ∪ [270°,360°))
//! P3  = P(θ ∈ [180°, 270°))         both coordinates decreasing
//!
//! H   = -Σ p_i log(p_i) / log(b)    over K angle symbols
//! ```
//!
//! ## Features
//!
//! - `cli`: the `classa` command-line tool (`cargo install --features cli`)
//! - `wasm`: WebAssembly bindings via wasm-bindgen
//!
//! ## Example
//!
//! ```rust
//! use classa_entropy::{classify, ClassAConfig, Symbolization};
//!
//! let rr = vec![0.81, 0.79, 0.83, 0.80, 0.78, 0.82, 0.84, 0.80, 0.79, 0.81, 0.83, 0.82];
//!
//! let config = ClassAConfig {
//!     k: 4,
//!     symbolization: Symbolization::Equal,
//!     ..Default::default()
//! };
//! let result = classify(&rr, &config).unwrap();
//!
//! let [ras, p1, p24, p3] = result.stats.as_array();
//! println!("RAS = {:.2}°  P1 = {:.2}  P24 = {:.2}  P3 = {:.2}", ras, p1, p24, p3);
//! println!("entropy = {:.4}", result.entropy);
//! ```

pub mod angle;
pub mod cluster;
pub mod coarse;
pub mod config;
pub mod engine;
pub mod entropy;
pub mod error;
pub mod phase_space;
pub mod plot;
pub mod symbolize;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-exports
pub use angle::{classification_angles, AngleClass, ClassificationStats};
pub use cluster::{Clusterer, KMeans1d};
pub use coarse::coarse_grain;
pub use config::{AngleUnit, ClassAConfig, ReconstructionMethod, Symbolization};
pub use engine::{classify, ClassAEngine, ClassAResult};
pub use entropy::{symbol_entropy, EntropyEstimate, SymbolCounts};
pub use error::{ClassAError, Result};
pub use phase_space::{reconstruct, CoordinatePair};
pub use plot::{PhasePlotRenderer, PhasePlotView};
pub use symbolize::{bin_uniform, symbolize, SymbolSequence};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_workflow() {
        let rr = vec![0.81, 0.79, 0.83, 0.80, 0.78, 0.82, 0.84, 0.80, 0.79, 0.81, 0.83, 0.82];
        let result = classify(&rr, &ClassAConfig::default()).unwrap();

        assert_eq!(result.angles.len(), rr.len() - 3);
        assert!(result.entropy >= 0.0 && result.entropy <= 1.0);
        let [ras, p1, p24, p3] = result.stats.as_array();
        assert!((0.0..360.0).contains(&ras));
        assert!((p1 + p24 + p3 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
