//! Symbol-distribution entropy.
//!
//! H = -Σ p_i · log(p_i) / log(base), summed over non-empty symbols only,
//! optionally divided by the K-symbol maximum log(K) / log(base).

use crate::config::validate_log_base;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Occurrence counts of the symbols that actually appear.
///
/// Labels outside `1..=K` and unassigned positions are not counted; empty
/// labels are dropped so they never reach a logarithm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolCounts {
    k: usize,
    /// (label, count), ascending by label, count > 0
    counts: Vec<(usize, usize)>,
}

impl SymbolCounts {
    pub fn tally(symbols: &[Option<usize>], k: usize) -> Self {
        let mut bins = vec![0usize; k];
        for label in symbols.iter().flatten() {
            if (1..=k).contains(label) {
                bins[label - 1] += 1;
            }
        }

        let counts = bins
            .into_iter()
            .enumerate()
            .filter(|&(_, c)| c > 0)
            .map(|(i, c)| (i + 1, c))
            .collect();

        Self { k, counts }
    }

    /// Alphabet size
    pub fn k(&self) -> usize {
        self.k
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|&(_, c)| c).sum()
    }

    /// Number of non-empty symbols
    pub fn occupied(&self) -> usize {
        self.counts.len()
    }

    pub fn get(&self, label: usize) -> usize {
        self.counts
            .iter()
            .find(|&&(l, _)| l == label)
            .map_or(0, |&(_, c)| c)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.counts.iter().copied()
    }

    /// Probabilities of the non-empty symbols, ascending by label.
    pub fn probabilities(&self) -> Vec<f64> {
        let total = self.total() as f64;
        self.counts.iter().map(|&(_, c)| c as f64 / total).collect()
    }
}

/// Entropy with the probabilities it was computed from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntropyEstimate {
    pub entropy: f64,
    pub probabilities: Vec<f64>,
    pub normalized: bool,
}

/// Entropy of a tallied symbol distribution in logarithm base `base`.
pub fn symbol_entropy(counts: &SymbolCounts, base: f64, normalize: bool) -> Result<EntropyEstimate> {
    validate_log_base(base)?;

    let probabilities = counts.probabilities();
    let ln_base = base.ln();
    let raw: f64 = probabilities.iter().map(|&p| -p * p.ln()).sum::<f64>() / ln_base;

    let entropy = if normalize {
        raw / ((counts.k() as f64).ln() / ln_base)
    } else {
        raw
    };

    Ok(EntropyEstimate {
        entropy: entropy + 0.0,
        probabilities,
        normalized: normalize,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClassAError;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    fn labels(xs: &[usize]) -> Vec<Option<usize>> {
        xs.iter().map(|&x| Some(x)).collect()
    }

    #[test]
    fn test_tally_drops_empty_bins() {
        let mut symbols = labels(&[1, 3, 3, 4, 4, 4]);
        symbols.push(None);
        let counts = SymbolCounts::tally(&symbols, 4);
        assert_eq!(counts.total(), 6);
        assert_eq!(counts.occupied(), 3);
        assert_eq!(counts.get(2), 0);
        assert_eq!(counts.iter().collect::<Vec<_>>(), vec![(1, 1), (3, 2), (4, 3)]);

        let probs = counts.probabilities();
        assert!(approx_eq(probs[0], 1.0 / 6.0, 1e-12));
        assert!(approx_eq(probs[1], 2.0 / 6.0, 1e-12));
        assert!(approx_eq(probs[2], 3.0 / 6.0, 1e-12));
    }

    #[test]
    fn test_uniform_is_maximal() {
        let counts = SymbolCounts::tally(&labels(&[1, 2, 3, 4, 1, 2, 3, 4]), 4);

        let nats = symbol_entropy(&counts, std::f64::consts::E, false).unwrap();
        assert!(approx_eq(nats.entropy, 4f64.ln(), 1e-12));

        let bits = symbol_entropy(&counts, 2.0, false).unwrap();
        assert!(approx_eq(bits.entropy, 2.0, 1e-12));

        let norm = symbol_entropy(&counts, 2.0, true).unwrap();
        assert!(approx_eq(norm.entropy, 1.0, 1e-12));
    }

    #[test]
    fn test_normalization_independent_of_base() {
        let counts = SymbolCounts::tally(&labels(&[1, 1, 1, 2, 3, 3]), 5);
        let a = symbol_entropy(&counts, 2.0, true).unwrap().entropy;
        let b = symbol_entropy(&counts, 10.0, true).unwrap().entropy;
        assert!(approx_eq(a, b, 1e-12));
        assert!(a > 0.0 && a < 1.0);
    }

    #[test]
    fn test_single_symbol_has_zero_entropy() {
        let counts = SymbolCounts::tally(&labels(&[2, 2, 2]), 4);
        let h = symbol_entropy(&counts, 2.0, true).unwrap();
        assert_eq!(h.entropy, 0.0);
        assert!(h.entropy.is_sign_positive());
        assert_eq!(h.probabilities, vec![1.0]);
    }

    #[test]
    fn test_nothing_assigned() {
        let counts = SymbolCounts::tally(&[None, None], 3);
        let h = symbol_entropy(&counts, 2.0, false).unwrap();
        assert_eq!(h.entropy, 0.0);
        assert!(h.probabilities.is_empty());
    }

    #[test]
    fn test_bad_base() {
        let counts = SymbolCounts::tally(&labels(&[1, 2]), 2);
        for base in [0.0, -1.0, 1.0] {
            assert!(matches!(
                symbol_entropy(&counts, base, false),
                Err(ClassAError::InvalidParameter(_))
            ));
        }
    }
}
