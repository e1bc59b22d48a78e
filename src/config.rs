//! Pipeline configuration and the pre-condition contract.
//!
//! The JSON form uses the conventional option names (`scale`, `K`, `phase`,
//! `symbolization`, `logBase`, `normalize`, `angleUnit`, `plot`) and every
//! field falls back to its default when absent.

use crate::error::{ClassAError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Signals must be strictly longer than this
pub const MIN_SIGNAL_LEN: usize = 10;

/// Iteration cap handed to the clusterer by default
pub const DEFAULT_CLUSTER_MAX_ITER: usize = 100;

/// How (Yn, Xn) are derived from the coarse-grained series.
///
/// Encoded on the wire as the integer `phase` option (1, 2 or 3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ReconstructionMethod {
    /// phase = 1: weighted second-order difference over four samples
    ImprovedSecondOrderDiff,
    /// phase = 2: consecutive first differences
    SecondOrderDiff,
    /// phase = 3: lag-1 Poincaré embedding
    TakensLag1,
}

impl ReconstructionMethod {
    /// Samples consumed beyond the output length
    pub fn lost_samples(self) -> usize {
        match self {
            ReconstructionMethod::ImprovedSecondOrderDiff => 3,
            ReconstructionMethod::SecondOrderDiff => 2,
            ReconstructionMethod::TakensLag1 => 1,
        }
    }

    pub fn phase_id(self) -> u8 {
        match self {
            ReconstructionMethod::ImprovedSecondOrderDiff => 1,
            ReconstructionMethod::SecondOrderDiff => 2,
            ReconstructionMethod::TakensLag1 => 3,
        }
    }
}

impl TryFrom<u8> for ReconstructionMethod {
    type Error = ClassAError;

    fn try_from(phase: u8) -> Result<Self> {
        match phase {
            1 => Ok(ReconstructionMethod::ImprovedSecondOrderDiff),
            2 => Ok(ReconstructionMethod::SecondOrderDiff),
            3 => Ok(ReconstructionMethod::TakensLag1),
            other => Err(ClassAError::invalid(format!(
                "phase must be 1, 2 or 3, got {}",
                other
            ))),
        }
    }
}

impl From<ReconstructionMethod> for u8 {
    fn from(method: ReconstructionMethod) -> Self {
        method.phase_id()
    }
}

impl fmt::Display for ReconstructionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReconstructionMethod::ImprovedSecondOrderDiff => "improved second-order difference",
            ReconstructionMethod::SecondOrderDiff => "second-order difference",
            ReconstructionMethod::TakensLag1 => "Takens lag-1",
        };
        f.write_str(name)
    }
}

/// Quantization strategy mapping angles (radians) to K symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Symbolization {
    Equal,
    ClusterBased,
    NormalCdf,
    Sigmoid,
    Gaussian,
    ArcTanh,
}

impl Symbolization {
    pub const ALL: [Symbolization; 6] = [
        Symbolization::Equal,
        Symbolization::ClusterBased,
        Symbolization::NormalCdf,
        Symbolization::Sigmoid,
        Symbolization::Gaussian,
        Symbolization::ArcTanh,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Symbolization::Equal => "equal",
            Symbolization::ClusterBased => "cluster",
            Symbolization::NormalCdf => "normcdf",
            Symbolization::Sigmoid => "sigmoid",
            Symbolization::Gaussian => "gaussian",
            Symbolization::ArcTanh => "arctanh",
        }
    }
}

impl FromStr for Symbolization {
    type Err = ClassAError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "equal" => Ok(Symbolization::Equal),
            "cluster" | "kmeans" => Ok(Symbolization::ClusterBased),
            "normcdf" => Ok(Symbolization::NormalCdf),
            "sigmoid" => Ok(Symbolization::Sigmoid),
            "gaussian" => Ok(Symbolization::Gaussian),
            "arctanh" => Ok(Symbolization::ArcTanh),
            _ => Err(ClassAError::invalid(format!(
                "unknown symbolization '{}'",
                s
            ))),
        }
    }
}

impl TryFrom<String> for Symbolization {
    type Error = ClassAError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Symbolization> for String {
    fn from(s: Symbolization) -> Self {
        s.name().to_string()
    }
}

impl fmt::Display for Symbolization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unit of the returned classification statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AngleUnit {
    Deg,
    Rad,
}

impl FromStr for AngleUnit {
    type Err = ClassAError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deg" => Ok(AngleUnit::Deg),
            "rad" => Ok(AngleUnit::Rad),
            _ => Err(ClassAError::invalid(format!(
                "angleUnit must be 'deg' or 'rad', got '{}'",
                s
            ))),
        }
    }
}

impl TryFrom<String> for AngleUnit {
    type Error = ClassAError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<AngleUnit> for String {
    fn from(unit: AngleUnit) -> Self {
        unit.to_string()
    }
}

impl fmt::Display for AngleUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AngleUnit::Deg => f.write_str("deg"),
            AngleUnit::Rad => f.write_str("rad"),
        }
    }
}

/// Pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClassAConfig {
    /// Coarse-graining block size
    pub scale: usize,

    /// Number of symbols
    #[serde(rename = "K")]
    pub k: usize,

    /// Phase-space reconstruction method
    pub phase: ReconstructionMethod,

    /// Symbolization strategy
    pub symbolization: Symbolization,

    /// Logarithm base for the entropy
    pub log_base: f64,

    /// Divide the entropy by its maximum for K symbols
    pub normalize: bool,

    /// Unit of the returned classification statistics
    pub angle_unit: AngleUnit,

    /// Hand the phase-space view to an attached renderer
    pub plot: bool,

    /// Iteration budget for cluster-based symbolization
    pub cluster_max_iter: usize,
}

impl Default for ClassAConfig {
    fn default() -> Self {
        Self {
            scale: 1,
            k: 4,
            phase: ReconstructionMethod::ImprovedSecondOrderDiff,
            symbolization: Symbolization::Equal,
            log_base: std::f64::consts::E,
            normalize: true,
            angle_unit: AngleUnit::Deg,
            plot: false,
            cluster_max_iter: DEFAULT_CLUSTER_MAX_ITER,
        }
    }
}

impl ClassAConfig {
    /// Check every option against its pre-condition.
    pub fn validate(&self) -> Result<()> {
        if self.scale == 0 {
            return Err(ClassAError::invalid("scale must be a positive integer"));
        }
        if self.k < 2 {
            return Err(ClassAError::invalid(format!(
                "K must be an integer > 1, got {}",
                self.k
            )));
        }
        validate_log_base(self.log_base)?;
        if self.cluster_max_iter == 0 {
            return Err(ClassAError::invalid("clusterMaxIter must be positive"));
        }
        Ok(())
    }

    /// Parse a configuration from JSON; absent fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ClassAError::invalid(format!("bad options: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| ClassAError::Serialization(e.to_string()))
    }
}

/// Logarithm base must be positive, finite and not 1.
pub fn validate_log_base(base: f64) -> Result<()> {
    if !base.is_finite() || base <= 0.0 || base == 1.0 {
        return Err(ClassAError::invalid(format!(
            "logBase must be positive, finite and != 1, got {}",
            base
        )));
    }
    Ok(())
}

/// Signal must be longer than [`MIN_SIGNAL_LEN`] and hold finite values only.
pub fn validate_signal(signal: &[f64]) -> Result<()> {
    if signal.len() <= MIN_SIGNAL_LEN {
        return Err(ClassAError::invalid(format!(
            "signal length must be > {}, got {}",
            MIN_SIGNAL_LEN,
            signal.len()
        )));
    }
    if let Some(pos) = signal.iter().position(|x| !x.is_finite()) {
        return Err(ClassAError::invalid(format!(
            "signal[{}] is not a finite number",
            pos
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ClassAConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.k, 4);
        assert_eq!(config.phase, ReconstructionMethod::ImprovedSecondOrderDiff);
        assert_eq!(config.angle_unit, AngleUnit::Deg);
    }

    #[test]
    fn test_rejects_bad_options() {
        let k1 = ClassAConfig { k: 1, ..Default::default() };
        assert!(matches!(k1.validate(), Err(ClassAError::InvalidParameter(_))));

        let scale0 = ClassAConfig { scale: 0, ..Default::default() };
        assert!(matches!(scale0.validate(), Err(ClassAError::InvalidParameter(_))));

        for base in [0.0, -2.0, 1.0, f64::NAN, f64::INFINITY] {
            let cfg = ClassAConfig { log_base: base, ..Default::default() };
            assert!(cfg.validate().is_err(), "base {} accepted", base);
        }
    }

    #[test]
    fn test_symbolization_names_case_insensitive() {
        assert_eq!("Equal".parse::<Symbolization>().unwrap(), Symbolization::Equal);
        assert_eq!("NORMCDF".parse::<Symbolization>().unwrap(), Symbolization::NormalCdf);
        assert_eq!("kmeans".parse::<Symbolization>().unwrap(), Symbolization::ClusterBased);
        assert!("median".parse::<Symbolization>().is_err());

        for s in Symbolization::ALL {
            assert_eq!(s.name().parse::<Symbolization>().unwrap(), s);
        }
    }

    #[test]
    fn test_phase_ids() {
        for id in 1..=3u8 {
            let method = ReconstructionMethod::try_from(id).unwrap();
            assert_eq!(u8::from(method), id);
        }
        assert!(ReconstructionMethod::try_from(0).is_err());
        assert!(ReconstructionMethod::try_from(4).is_err());
    }

    #[test]
    fn test_from_json() {
        let cfg = ClassAConfig::from_json(
            r#"{"scale": 2, "K": 6, "phase": 3, "symbolization": "Sigmoid",
                "logBase": 2.0, "normalize": false, "angleUnit": "RAD"}"#,
        )
        .unwrap();
        assert_eq!(cfg.scale, 2);
        assert_eq!(cfg.k, 6);
        assert_eq!(cfg.phase, ReconstructionMethod::TakensLag1);
        assert_eq!(cfg.symbolization, Symbolization::Sigmoid);
        assert_eq!(cfg.angle_unit, AngleUnit::Rad);
        assert!(!cfg.normalize);
        assert!(!cfg.plot);

        let empty = ClassAConfig::from_json("{}").unwrap();
        assert_eq!(empty, ClassAConfig::default());

        let round = ClassAConfig::from_json(&cfg.to_json().unwrap()).unwrap();
        assert_eq!(round, cfg);
    }

    #[test]
    fn test_from_json_rejects() {
        for bad in [
            r#"{"phase": 4}"#,
            r#"{"symbolization": "median"}"#,
            r#"{"angleUnit": "grad"}"#,
            r#"{"K": 1}"#,
            r#"{"scale": -1}"#,
            r#"{"scale": 1.5}"#,
            r#"{"normalize": "yes"}"#,
        ] {
            let err = ClassAConfig::from_json(bad).unwrap_err();
            assert!(matches!(err, ClassAError::InvalidParameter(_)), "{}", bad);
        }
    }

    #[test]
    fn test_validate_signal() {
        assert!(validate_signal(&[1.0; 8]).is_err());
        assert!(validate_signal(&[1.0; 10]).is_err());
        assert!(validate_signal(&[1.0; 11]).is_ok());

        let mut with_nan = vec![1.0; 12];
        with_nan[5] = f64::NAN;
        assert!(validate_signal(&with_nan).is_err());
    }
}
