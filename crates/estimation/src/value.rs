//! Sample Value Types

use serde::{Deserialize, Serialize};

/// One raw sensor reading
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputValue {
    /// Measured value
    pub value: f64,
    /// Timing/measurement uncertainty of this sample (>= 0)
    pub jitter: f64,
}

impl InputValue {
    /// Create a new input sample
    pub fn new(value: f64, jitter: f64) -> Self {
        Self { value, jitter }
    }
}

impl From<f64> for InputValue {
    fn from(value: f64) -> Self {
        Self { value, jitter: 0.0 }
    }
}

/// One filtered estimate
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputValue {
    /// Estimated value
    pub value: f64,
    /// Estimator's confidence in `value` (>= 0)
    pub variance: f64,
    /// Jitter propagated from the contributing input
    pub jitter: f64,
}

impl OutputValue {
    /// Create a new output sample
    pub fn new(value: f64, variance: f64, jitter: f64) -> Self {
        Self {
            value,
            variance,
            jitter,
        }
    }

    /// Unfiltered pass-through of `input`, used while a window is filling
    pub fn bypass(input: &InputValue) -> Self {
        Self {
            value: input.value,
            variance: 0.0,
            jitter: input.jitter,
        }
    }
}
