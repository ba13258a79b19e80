//! Weighted Moving Average Filter (FIR and IIR)
//!
//! Implements the recurrence
//!
//! ```text
//! y[n] = b[0] x[n] + sum_{k=1}^{N-1} ( a[k-1] y[n-k] + b[k] x[n-k] )
//! ```
//!
//! over a window of the `N` most recent inputs and the `N-1` most recent
//! estimates. Until `N` inputs are available the filter passes samples through.

use crate::error::EstimationError;
use crate::method::EstimationMethod;
use crate::value::{InputValue, OutputValue};
use history_window::HistoryWindow;
use tracing::{debug, warn};

/// Window size of a freshly constructed filter
pub const DEFAULT_WINDOW_SIZE: usize = 3;

/// Weighted moving average filter with optional feedback terms
#[derive(Debug, Clone)]
pub struct MovingAverage {
    /// Number of inputs taking part in the recurrence
    window_size: usize,
    /// Whether the feedback weights are active
    is_iir: bool,
    /// Feed-forward weights `b`, length `window_size`, sums to 1
    coefficients_in: Vec<f64>,
    /// Feedback weights `a`, length `window_size - 1`
    coefficients_out: Vec<f64>,
    /// Recent raw samples, newest first
    inputs: HistoryWindow<InputValue>,
    /// Recent estimates, newest first
    outputs: HistoryWindow<OutputValue>,
}

impl MovingAverage {
    /// Create a uniform FIR filter with the default window size
    pub fn new() -> Self {
        Self::uniform(DEFAULT_WINDOW_SIZE)
    }

    /// Create a uniform FIR filter over `window_size` samples
    pub fn with_window_size(window_size: usize) -> Result<Self, EstimationError> {
        check_window_size(window_size)?;
        Ok(Self::uniform(window_size))
    }

    fn uniform(window_size: usize) -> Self {
        Self {
            window_size,
            is_iir: false,
            coefficients_in: vec![1.0 / window_size as f64; window_size],
            coefficients_out: vec![0.0; window_size - 1],
            inputs: HistoryWindow::new(window_size),
            outputs: HistoryWindow::new(window_size),
        }
    }

    /// Get the window size
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Change the window size.
    ///
    /// Coefficients go back to uniform FIR weights and the history is
    /// dropped, so the filter warms up again.
    pub fn set_window_size(&mut self, window_size: usize) -> Result<(), EstimationError> {
        if let Err(e) = check_window_size(window_size) {
            warn!("Rejected window size: {}", e);
            return Err(e);
        }

        *self = Self::uniform(window_size);
        debug!("Moving average window size set to {}", window_size);
        Ok(())
    }

    /// Whether feedback weights take part in the recurrence
    pub fn is_iir(&self) -> bool {
        self.is_iir
    }

    /// Normalized feed-forward weights `b`
    pub fn coefficients_in(&self) -> &[f64] {
        &self.coefficients_in
    }

    /// Normalized feedback weights `a`
    pub fn coefficients_out(&self) -> &[f64] {
        &self.coefficients_out
    }

    /// Replace the feed-forward weights `b`.
    ///
    /// Expects exactly `window_size` values, stored divided by their sum.
    pub fn set_weighting_coefficients_in(
        &mut self,
        coefficients: &[f64],
    ) -> Result<(), EstimationError> {
        match self.normalize_in(coefficients) {
            Ok(normalized) => {
                self.coefficients_in = normalized;
                debug!("Feed-forward coefficients set to {:?}", self.coefficients_in);
                Ok(())
            }
            Err(e) => {
                warn!("Rejected feed-forward coefficients: {}", e);
                Err(e)
            }
        }
    }

    /// Replace the feedback weights `a`.
    ///
    /// Expects exactly `window_size - 1` values. A positive sum normalizes
    /// them and switches the filter to IIR; all zeros switch it back to FIR.
    pub fn set_weighting_coefficients_out(
        &mut self,
        coefficients: &[f64],
    ) -> Result<(), EstimationError> {
        match self.normalize_out(coefficients) {
            Ok(Some(normalized)) => {
                self.coefficients_out = normalized;
                self.is_iir = true;
                debug!("Feedback coefficients set to {:?} (IIR)", self.coefficients_out);
                Ok(())
            }
            Ok(None) => {
                self.coefficients_out = vec![0.0; self.window_size - 1];
                self.is_iir = false;
                debug!("Feedback coefficients cleared (FIR)");
                Ok(())
            }
            Err(e) => {
                warn!("Rejected feedback coefficients: {}", e);
                Err(e)
            }
        }
    }

    fn normalize_in(&self, coefficients: &[f64]) -> Result<Vec<f64>, EstimationError> {
        check_count(coefficients, self.window_size)?;
        let sum = normalization_factor(coefficients)?;
        if sum == 0.0 || !sum.is_finite() {
            return Err(EstimationError::DegenerateNormalization { sum });
        }
        Ok(coefficients.iter().map(|c| c / sum).collect())
    }

    /// `None` means the feedback path is switched off
    fn normalize_out(&self, coefficients: &[f64]) -> Result<Option<Vec<f64>>, EstimationError> {
        check_count(coefficients, self.window_size - 1)?;
        let sum = normalization_factor(coefficients)?;
        if sum > 0.0 && sum.is_finite() {
            Ok(Some(coefficients.iter().map(|c| c / sum).collect()))
        } else if coefficients.iter().all(|&c| c == 0.0) {
            Ok(None)
        } else {
            Err(EstimationError::DegenerateNormalization { sum })
        }
    }
}

impl Default for MovingAverage {
    fn default() -> Self {
        Self::new()
    }
}

impl EstimationMethod for MovingAverage {
    fn estimate(&mut self, next: InputValue) -> OutputValue {
        self.inputs.push(next);

        let estimate = if self.inputs.is_full() {
            let mut y = self.coefficients_in[0] * self.inputs[0].value;
            for i in 1..self.window_size {
                // inputs[0] is the newest sample, inputs[window_size - 1] the oldest
                y += self.coefficients_out[i - 1] * self.outputs[i - 1].value
                    + self.coefficients_in[i] * self.inputs[i].value;
            }
            // Fixed IIR scaling, independent of the feedback weights
            if self.is_iir {
                y /= 2.0;
            }
            OutputValue::new(y, 0.0, next.jitter)
        } else {
            OutputValue::bypass(&next)
        };

        self.outputs.push(estimate);
        estimate
    }

    fn last_estimate(&self) -> Option<OutputValue> {
        self.outputs.front().copied()
    }

    fn reset(&mut self) {
        self.inputs.clear();
        self.outputs.clear();
    }
}

fn check_window_size(window_size: usize) -> Result<(), EstimationError> {
    if window_size == 0 {
        Err(EstimationError::InvalidWindowSize(window_size))
    } else {
        Ok(())
    }
}

fn check_count(coefficients: &[f64], expected: usize) -> Result<(), EstimationError> {
    if coefficients.len() != expected {
        return Err(EstimationError::CoefficientCount {
            expected,
            actual: coefficients.len(),
        });
    }
    Ok(())
}

/// Sum of the coefficients, rejecting NaN and infinite entries
fn normalization_factor(coefficients: &[f64]) -> Result<f64, EstimationError> {
    let mut sum = 0.0;
    for (index, &value) in coefficients.iter().enumerate() {
        if !value.is_finite() {
            return Err(EstimationError::NonFiniteCoefficient { index, value });
        }
        sum += value;
    }
    Ok(sum)
}
