//! Classification angles and their summary statistics.
//!
//! Each reconstructed point (Xn, Yn) gets the polar angle
//! θ = atan(Yn / Xn) in degrees, corrected into [0°, 360°):
//!
//! ```text
//!   Yn < 0, Xn < 0   θ + 180
//!   Yn < 0, Xn > 0   θ + 360
//!   Yn > 0, Xn < 0   θ + 180
//!   Yn = 0, Xn = 0   0
//! ```
//!
//! Angles then fall into three groups: [0, 90) both coordinates rising,
//! [180, 270) both falling, and the mixed quadrants [90, 180) ∪ [270, 360).

use crate::config::AngleUnit;
use crate::phase_space::CoordinatePair;
use nalgebra::DVector;
use serde::{Deserialize, Serialize};

/// Quadrant group of a classification angle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AngleClass {
    /// [0°, 90°)
    First,
    /// [90°, 180°) ∪ [270°, 360°)
    SecondFourth,
    /// [180°, 270°)
    Third,
}

impl AngleClass {
    /// Group of an angle in degrees; bins are lower-inclusive.
    pub fn of(theta: f64) -> Self {
        if theta < 90.0 {
            AngleClass::First
        } else if theta < 180.0 {
            AngleClass::SecondFourth
        } else if theta < 270.0 {
            AngleClass::Third
        } else {
            AngleClass::SecondFourth
        }
    }
}

/// Per-point angles in degrees, each in [0, 360).
pub fn classification_angles(pair: &CoordinatePair) -> DVector<f64> {
    let raw = pair.yn.zip_map(&pair.xn, |y, x| (y / x).atan().to_degrees());
    raw.zip_zip_map(&pair.yn, &pair.xn, correct_quadrant)
}

fn correct_quadrant(raw: f64, y: f64, x: f64) -> f64 {
    if raw.is_nan() {
        // 0/0
        return 0.0;
    }
    let theta = if x == 0.0 {
        // atan of ±inf; sign of a zero divisor must not flip the axis
        if y > 0.0 {
            90.0
        } else {
            270.0
        }
    } else if y < 0.0 && x < 0.0 {
        raw + 180.0
    } else if y < 0.0 && x > 0.0 {
        raw + 360.0
    } else if y > 0.0 && x < 0.0 {
        raw + 180.0
    } else {
        raw
    };

    if theta >= 360.0 {
        theta - 360.0
    } else {
        // folds -0.0 into 0.0
        theta + 0.0
    }
}

/// Classification statistics (RAS, P1, P24, P3).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationStats {
    /// Mean classification angle
    pub ras: f64,
    /// Share of angles in [0°, 90°)
    pub p1: f64,
    /// Share of angles in [90°, 180°) ∪ [270°, 360°)
    pub p24: f64,
    /// Share of angles in [180°, 270°)
    pub p3: f64,
}

impl ClassificationStats {
    /// Summarise an angle sequence in degrees.
    pub fn from_angles(theta: &[f64]) -> Self {
        if theta.is_empty() {
            return Self {
                ras: 0.0,
                p1: 0.0,
                p24: 0.0,
                p3: 0.0,
            };
        }

        let (mut n1, mut n24, mut n3) = (0usize, 0usize, 0usize);
        for &t in theta {
            match AngleClass::of(t) {
                AngleClass::First => n1 += 1,
                AngleClass::SecondFourth => n24 += 1,
                AngleClass::Third => n3 += 1,
            }
        }

        let n = theta.len() as f64;
        Self {
            ras: theta.iter().sum::<f64>() / n,
            p1: n1 as f64 / n,
            p24: n24 as f64 / n,
            p3: n3 as f64 / n,
        }
    }

    /// Express the statistics in `unit`.
    ///
    /// Radians scale all four fields by π/180, the proportions included.
    /// Only RAS is an angle, so P1/P24/P3 in radian output are not
    /// proportions any more; the scaling is kept for output compatibility.
    pub fn in_unit(self, unit: AngleUnit) -> Self {
        match unit {
            AngleUnit::Deg => self,
            AngleUnit::Rad => {
                let f = std::f64::consts::PI / 180.0;
                Self {
                    ras: self.ras * f,
                    p1: self.p1 * f,
                    p24: self.p24 * f,
                    p3: self.p3 * f,
                }
            }
        }
    }

    /// (RAS, P1, P24, P3)
    pub fn as_array(&self) -> [f64; 4] {
        [self.ras, self.p1, self.p24, self.p3]
    }
}
