//! Phase-space reconstruction of a coarse-grained series into (Yn, Xn).
//!
//! ```text
//! phase 1  Yn[i] = 2x[i+2] - 1.5x[i+1] - 0.5x[i+3]    N - 3 points
//!          Xn[i] = 2x[i+1] - 1.5x[i]   - 0.5x[i+2]
//! phase 2  Yn[i] = x[i+2] - x[i+1]                      N - 2 points
//!          Xn[i] = x[i+1] - x[i]
//! phase 3  Yn[i] = x[i],  Xn[i] = x[i+1]                N - 1 points
//! ```

use crate::config::ReconstructionMethod;
use crate::error::{ClassAError, Result};
use nalgebra::DVector;

/// Reconstructed point cloud; `yn` and `xn` always share a length.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinatePair {
    pub yn: DVector<f64>,
    pub xn: DVector<f64>,
    pub method: ReconstructionMethod,
}

impl CoordinatePair {
    pub fn len(&self) -> usize {
        self.yn.len()
    }

    pub fn is_empty(&self) -> bool {
        self.yn.is_empty()
    }
}

/// Build (Yn, Xn) from `x` with the chosen method.
///
/// Fails with `InsufficientLength` when no point can be formed.
pub fn reconstruct(x: &[f64], method: ReconstructionMethod) -> Result<CoordinatePair> {
    let lost = method.lost_samples();
    if x.len() <= lost {
        return Err(ClassAError::InsufficientLength {
            required: lost + 1,
            got: x.len(),
        });
    }
    let n = x.len() - lost;

    let (yn, xn) = match method {
        ReconstructionMethod::ImprovedSecondOrderDiff => (
            DVector::from_fn(n, |i, _| 2.0 * x[i + 2] - 1.5 * x[i + 1] - 0.5 * x[i + 3]),
            DVector::from_fn(n, |i, _| 2.0 * x[i + 1] - 1.5 * x[i] - 0.5 * x[i + 2]),
        ),
        ReconstructionMethod::SecondOrderDiff => (
            DVector::from_fn(n, |i, _| x[i + 2] - x[i + 1]),
            DVector::from_fn(n, |i, _| x[i + 1] - x[i]),
        ),
        ReconstructionMethod::TakensLag1 => (
            DVector::from_vec(x[..n].to_vec()),
            DVector::from_vec(x[1..].to_vec()),
        ),
    };

    Ok(CoordinatePair { yn, xn, method })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    #[test]
    fn test_output_lengths() {
        let x: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let cases = [
            (ReconstructionMethod::ImprovedSecondOrderDiff, 7),
            (ReconstructionMethod::SecondOrderDiff, 8),
            (ReconstructionMethod::TakensLag1, 9),
        ];
        for (method, expected) in cases {
            let pair = reconstruct(&x, method).unwrap();
            assert_eq!(pair.len(), expected);
            assert_eq!(pair.xn.len(), pair.yn.len());
        }
    }

    #[test]
    fn test_improved_second_order_diff() {
        let x = vec![1.0, 2.0, 4.0, 7.0, 11.0];
        let pair = reconstruct(&x, ReconstructionMethod::ImprovedSecondOrderDiff).unwrap();
        assert_eq!(pair.len(), 2);
        // Yn[0] = 2*4 - 1.5*2 - 0.5*7, Xn[0] = 2*2 - 1.5*1 - 0.5*4
        assert!(approx_eq(pair.yn[0], 1.5, 1e-12));
        assert!(approx_eq(pair.xn[0], 0.5, 1e-12));
        // Yn[1] = 2*7 - 1.5*4 - 0.5*11, Xn[1] = 2*4 - 1.5*2 - 0.5*7
        assert!(approx_eq(pair.yn[1], 2.5, 1e-12));
        assert!(approx_eq(pair.xn[1], 1.5, 1e-12));
    }

    #[test]
    fn test_second_order_diff() {
        let x = vec![1.0, 3.0, 2.0, 5.0];
        let pair = reconstruct(&x, ReconstructionMethod::SecondOrderDiff).unwrap();
        assert_eq!(pair.xn.as_slice(), &[2.0, -1.0]);
        assert_eq!(pair.yn.as_slice(), &[-1.0, 3.0]);
    }

    #[test]
    fn test_takens_lag_one() {
        let x = vec![0.8, 0.9, 0.7, 0.85];
        let pair = reconstruct(&x, ReconstructionMethod::TakensLag1).unwrap();
        assert_eq!(pair.yn.as_slice(), &x[..3]);
        assert_eq!(pair.xn.as_slice(), &x[1..]);
    }

    #[test]
    fn test_insufficient_length() {
        let err = reconstruct(&[1.0, 2.0, 3.0], ReconstructionMethod::ImprovedSecondOrderDiff)
            .unwrap_err();
        assert_eq!(err, ClassAError::InsufficientLength { required: 4, got: 3 });

        assert!(reconstruct(&[1.0], ReconstructionMethod::TakensLag1).is_err());
        assert!(reconstruct(&[1.0, 2.0], ReconstructionMethod::TakensLag1).is_ok());
    }
}
