//! Symbolization: classification angles to an alphabet of K symbols.
//!
//! Angles arrive in degrees and are converted to radians before the chosen
//! strategy transforms and bins them. Binning is equal-width with
//! half-open bins `[e_i, e_{i+1})`, except that the last bin also takes its
//! right edge. Values outside the binned range stay unassigned (`None`).
//!
//! | strategy  | transform                                  | binned range       |
//! |-----------|--------------------------------------------|--------------------|
//! | equal     | none                                       | [0, 2π]            |
//! | cluster   | delegated to a [`Clusterer`]               | —                  |
//! | normcdf   | Φ((x − μ) / σ), population σ               | [0, 1]             |
//! | sigmoid   | 1 / (1 + exp((x − 2) / (1.5 s)))           | [0, 1]             |
//! | gaussian  | z = zscore(x), exp(−z² / s_z)              | [min, max]         |
//! | arctanh   | atan(tanh(0.5 s / x)) / max\|·\|           | [−1, 1]            |
//!
//! `s` is the sample standard deviation. A zero spread never yields an
//! error: each transform falls back to a constant.

use crate::cluster::Clusterer;
use crate::config::Symbolization;
use crate::error::{ClassAError, Result};
use nalgebra::DVector;
use std::f64::consts::{PI, SQRT_2};

/// One label in `1..=K` per angle, `None` where no bin applies.
pub type SymbolSequence = Vec<Option<usize>>;

/// Symbolize angles given in degrees.
pub fn symbolize(
    theta_deg: &[f64],
    k: usize,
    strategy: Symbolization,
    clusterer: &dyn Clusterer,
    max_iter: usize,
) -> Result<SymbolSequence> {
    if k < 2 {
        return Err(ClassAError::invalid(format!(
            "K must be an integer > 1, got {}",
            k
        )));
    }
    let radians = DVector::from_iterator(theta_deg.len(), theta_deg.iter().map(|t| t.to_radians()));
    strategy.apply(&radians, k, clusterer, max_iter)
}

impl Symbolization {
    /// Map radian values to `k` symbols.
    pub fn apply(
        self,
        x: &DVector<f64>,
        k: usize,
        clusterer: &dyn Clusterer,
        max_iter: usize,
    ) -> Result<SymbolSequence> {
        if x.is_empty() {
            return Ok(Vec::new());
        }

        let symbols = match self {
            Symbolization::Equal => bin_uniform(x.as_slice(), 0.0, 2.0 * PI, k),
            Symbolization::ClusterBased => cluster_labels(x.as_slice(), k, clusterer, max_iter)?,
            Symbolization::NormalCdf => bin_uniform(normal_cdf(x).as_slice(), 0.0, 1.0, k),
            Symbolization::Sigmoid => bin_uniform(sigmoid(x).as_slice(), 0.0, 1.0, k),
            Symbolization::Gaussian => {
                let zx = gaussian(x);
                let lo = zx.min();
                let hi = zx.max();
                bin_uniform(zx.as_slice(), lo, hi, k)
            }
            Symbolization::ArcTanh => bin_uniform(arctanh(x).as_slice(), -1.0, 1.0, k),
        };

        tracing::debug!(
            strategy = %self,
            k,
            assigned = symbols.iter().filter(|s| s.is_some()).count(),
            total = symbols.len(),
            "symbolized angles"
        );
        Ok(symbols)
    }
}

/// Equal-width bins over `[lo, hi]`; the last bin is closed on the right.
pub fn bin_uniform(values: &[f64], lo: f64, hi: f64, k: usize) -> SymbolSequence {
    let width = (hi - lo) / k as f64;
    let edges: Vec<f64> = (1..k).map(|i| lo + i as f64 * width).collect();

    values
        .iter()
        .map(|&v| {
            if !(lo..=hi).contains(&v) {
                return None;
            }
            if width == 0.0 {
                // Degenerate range: everything sits in the first bin
                return Some(1);
            }
            Some(edges.partition_point(|&e| e <= v) + 1)
        })
        .collect()
}

fn cluster_labels(
    x: &[f64],
    k: usize,
    clusterer: &dyn Clusterer,
    max_iter: usize,
) -> Result<SymbolSequence> {
    let labels = clusterer.cluster(x, k, max_iter)?;
    if labels.len() != x.len() {
        return Err(ClassAError::Clustering(format!(
            "clusterer returned {} labels for {} values",
            labels.len(),
            x.len()
        )));
    }
    if let Some(bad) = labels.iter().find(|&&l| l == 0 || l > k) {
        return Err(ClassAError::Clustering(format!(
            "label {} outside 1..={}",
            bad, k
        )));
    }
    Ok(labels.into_iter().map(Some).collect())
}

/// Σ(v − μ)² computed about the mean; bit-identical values give exactly 0.
fn sum_sq_dev(x: &DVector<f64>) -> f64 {
    if x.iter().all(|&v| v == x[0]) {
        return 0.0;
    }
    let mu = x.mean();
    x.add_scalar(-mu).norm_squared()
}

/// Population standard deviation
fn pop_std(x: &DVector<f64>) -> f64 {
    if x.is_empty() {
        return 0.0;
    }
    (sum_sq_dev(x) / x.len() as f64).sqrt()
}

/// Sample (n − 1) standard deviation
fn sample_std(x: &DVector<f64>) -> f64 {
    let n = x.len();
    if n < 2 {
        return 0.0;
    }
    (sum_sq_dev(x) / (n - 1) as f64).sqrt()
}

fn normal_cdf(x: &DVector<f64>) -> DVector<f64> {
    let mu = x.mean();
    let sigma = pop_std(x);
    if sigma == 0.0 {
        tracing::warn!("zero angle variance, normcdf maps every angle to 0.5");
        return DVector::from_element(x.len(), 0.5);
    }
    x.map(|v| 0.5 * (1.0 + libm::erf((v - mu) / (sigma * SQRT_2))))
}

fn sigmoid(x: &DVector<f64>) -> DVector<f64> {
    let s = sample_std(x);
    if s == 0.0 {
        tracing::warn!("zero angle variance, sigmoid maps every angle to 0.5");
        return DVector::from_element(x.len(), 0.5);
    }
    x.map(|v| 1.0 / (1.0 + ((v - 2.0) / (1.5 * s)).exp()))
}

fn gaussian(x: &DVector<f64>) -> DVector<f64> {
    let mu = x.mean();
    let s = sample_std(x);
    let z = if s == 0.0 {
        DVector::zeros(x.len())
    } else {
        x.map(|v| (v - mu) / s)
    };

    let sz = sample_std(&z);
    if sz == 0.0 {
        tracing::warn!("zero angle variance, gaussian maps every angle to 1");
        return DVector::from_element(x.len(), 1.0);
    }
    z.map(|v| (-v * v / sz).exp())
}

fn arctanh(x: &DVector<f64>) -> DVector<f64> {
    let s = sample_std(x);
    let zx = x.map(|v| {
        let ratio = if s == 0.0 { 0.0 } else { 0.5 * s / v };
        ratio.tanh().atan()
    });

    let scale = zx.amax();
    if scale == 0.0 {
        tracing::warn!("arctanh transform collapsed to zero");
        return zx;
    }
    zx / scale
}
