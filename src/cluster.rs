//! One-dimensional clustering used by cluster-based symbolization.
//!
//! Any routine that maps values to labels `1..=k` can be plugged into the
//! engine through [`Clusterer`]. [`KMeans1d`] is the default.

use crate::error::{ClassAError, Result};

/// Assigns each value one of `k` labels in `1..=k`.
pub trait Clusterer: Send + Sync {
    /// `max_iter` bounds the number of refinement passes.
    fn cluster(&self, values: &[f64], k: usize, max_iter: usize) -> Result<Vec<usize>>;
}

/// Lloyd's k-means on the real line.
///
/// Deterministic: centroids start at the midpoints of `k` equal-count
/// slices of the sorted data, and labels are numbered by ascending centroid
/// so label 1 is always the lowest-valued cluster.
#[derive(Debug, Clone, Copy, Default)]
pub struct KMeans1d;

impl Clusterer for KMeans1d {
    fn cluster(&self, values: &[f64], k: usize, max_iter: usize) -> Result<Vec<usize>> {
        if k == 0 {
            return Err(ClassAError::invalid("cluster count must be positive"));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ClassAError::Clustering(
                "k-means input contains non-finite values".into(),
            ));
        }
        let n = values.len();
        if n == 0 {
            return Ok(Vec::new());
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let mut centroids: Vec<f64> = (0..k)
            .map(|c| sorted[((2 * c + 1) * n / (2 * k)).min(n - 1)])
            .collect();

        let mut assignments = vec![usize::MAX; n];
        let mut iterations = 0;
        for _ in 0..max_iter {
            iterations += 1;
            let mut changed = false;
            for (slot, &v) in assignments.iter_mut().zip(values) {
                let nearest = nearest_centroid(&centroids, v);
                if *slot != nearest {
                    *slot = nearest;
                    changed = true;
                }
            }
            if !changed {
                break;
            }

            let mut sums = vec![0.0; k];
            let mut counts = vec![0usize; k];
            for (&c, &v) in assignments.iter().zip(values) {
                sums[c] += v;
                counts[c] += 1;
            }
            for c in 0..k {
                // Empty clusters keep their previous centroid
                if counts[c] > 0 {
                    centroids[c] = sums[c] / counts[c] as f64;
                }
            }
        }
        tracing::debug!(k, iterations, "k-means finished");

        let mut order: Vec<usize> = (0..k).collect();
        order.sort_by(|&a, &b| centroids[a].total_cmp(&centroids[b]));
        let mut rank = vec![0usize; k];
        for (r, &c) in order.iter().enumerate() {
            rank[c] = r + 1;
        }

        Ok(assignments.into_iter().map(|c| rank[c]).collect())
    }
}

fn nearest_centroid(centroids: &[f64], v: f64) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (c, &m) in centroids.iter().enumerate() {
        let d = (v - m).abs();
        if d < best_dist {
            best = c;
            best_dist = d;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separated_groups() {
        let values = vec![5.5, 0.1, 3.0, 0.2, 5.4, 3.1, 0.15, 2.9, 5.6];
        let labels = KMeans1d.cluster(&values, 3, 100).unwrap();
        assert_eq!(labels, vec![3, 1, 2, 1, 3, 2, 1, 2, 3]);
    }

    #[test]
    fn test_labels_follow_value_order() {
        let values: Vec<f64> = (0..40).map(|i| ((i * 37) % 40) as f64 * 0.15).collect();
        let labels = KMeans1d.cluster(&values, 4, 100).unwrap();
        assert!(labels.iter().all(|&l| (1..=4).contains(&l)));

        for i in 0..values.len() {
            for j in 0..values.len() {
                if values[i] < values[j] {
                    assert!(labels[i] <= labels[j]);
                }
            }
        }
    }

    #[test]
    fn test_constant_input() {
        let labels = KMeans1d.cluster(&[1.0; 6], 3, 100).unwrap();
        assert!(labels.iter().all(|&l| l == labels[0]));
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(matches!(
            KMeans1d.cluster(&[1.0, f64::NAN], 2, 10),
            Err(ClassAError::Clustering(_))
        ));
    }

    #[test]
    fn test_empty_input() {
        assert!(KMeans1d.cluster(&[], 3, 10).unwrap().is_empty());
    }
}
