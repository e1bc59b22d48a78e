//! Hand-off point for phase-space visualisation.
//!
//! Rendering lives outside this crate. When plotting is requested the engine
//! passes the reconstructed cloud and its symbols to an attached
//! [`PhasePlotRenderer`]; the numeric results do not depend on it.

use crate::config::ReconstructionMethod;
use crate::error::Result;

/// Everything a scatter plot of (Xn, Yn) coloured by symbol needs
#[derive(Debug, Clone, Copy)]
pub struct PhasePlotView<'a> {
    pub xn: &'a [f64],
    pub yn: &'a [f64],
    pub symbols: &'a [Option<usize>],
    pub k: usize,
    pub method: ReconstructionMethod,
}

impl PhasePlotView<'_> {
    /// Axis labels conventional for each reconstruction
    pub fn axis_labels(&self) -> (&'static str, &'static str) {
        match self.method {
            ReconstructionMethod::ImprovedSecondOrderDiff | ReconstructionMethod::SecondOrderDiff => {
                ("X(n+1) - X(n)", "X(n+2) - X(n+1)")
            }
            ReconstructionMethod::TakensLag1 => ("X(n+1)", "X(n)"),
        }
    }
}

/// External renderer for the phase-space view
pub trait PhasePlotRenderer: Send + Sync {
    fn render(&self, view: &PhasePlotView<'_>) -> Result<()>;
}
