//! Coarse-graining by non-overlapping block averages.

use crate::error::{ClassAError, Result};

/// Average consecutive blocks of `scale` samples.
///
/// Output length is `floor(len / scale)`; trailing samples that do not fill
/// a whole block are dropped. `scale = 1` returns a copy of the input.
pub fn coarse_grain(signal: &[f64], scale: usize) -> Result<Vec<f64>> {
    if scale == 0 {
        return Err(ClassAError::invalid("scale must be a positive integer"));
    }
    if scale == 1 {
        return Ok(signal.to_vec());
    }

    let inv_scale = 1.0 / scale as f64;
    Ok(signal
        .chunks_exact(scale)
        .map(|block| block.iter().sum::<f64>() * inv_scale)
        .collect())
}
