//! Moving Median Filter for Spike Rejection

use crate::error::EstimationError;
use crate::method::EstimationMethod;
use crate::moving_average::DEFAULT_WINDOW_SIZE;
use crate::value::{InputValue, OutputValue};
use history_window::HistoryWindow;
use tracing::{debug, warn};

/// Percentile of a freshly constructed filter (the median)
pub const DEFAULT_PERCENTILE: f64 = 0.5;

/// Sliding window rank filter
///
/// Returns the configured percentile of the last `window_size` inputs, with
/// the window's spread reported as variance.
#[derive(Debug, Clone)]
pub struct MovingMedian {
    percentile: f64,
    inputs: HistoryWindow<InputValue>,
    last: Option<OutputValue>,
}

impl MovingMedian {
    /// Create a median filter with the default window size
    pub fn new() -> Self {
        Self {
            percentile: DEFAULT_PERCENTILE,
            inputs: HistoryWindow::new(DEFAULT_WINDOW_SIZE),
            last: None,
        }
    }

    /// Create a median filter over `window_size` samples
    pub fn with_window_size(window_size: usize) -> Result<Self, EstimationError> {
        let mut filter = Self::new();
        filter.set_window_size(window_size)?;
        Ok(filter)
    }

    /// Get the window size
    pub fn window_size(&self) -> usize {
        self.inputs.capacity()
    }

    /// Change the window size, dropping the history
    pub fn set_window_size(&mut self, window_size: usize) -> Result<(), EstimationError> {
        if window_size == 0 {
            let e = EstimationError::InvalidWindowSize(window_size);
            warn!("Rejected window size: {}", e);
            return Err(e);
        }

        self.inputs = HistoryWindow::new(window_size);
        self.last = None;
        debug!("Moving median window size set to {}", window_size);
        Ok(())
    }

    /// Get the selected percentile (0 = minimum, 1 = maximum)
    pub fn percentile(&self) -> f64 {
        self.percentile
    }

    /// Select which percentile of the window is returned
    pub fn set_percentile(&mut self, percentile: f64) -> Result<(), EstimationError> {
        if !(0.0..=1.0).contains(&percentile) {
            let e = EstimationError::InvalidParameter {
                name: "percentile",
                value: percentile,
            };
            warn!("Rejected percentile: {}", e);
            return Err(e);
        }

        self.percentile = percentile;
        debug!("Moving median percentile set to {}", percentile);
        Ok(())
    }

    fn window_estimate(&self, jitter: f64) -> OutputValue {
        // Sort a copy and interpolate between neighbouring ranks
        let mut sorted: Vec<f64> = self.inputs.iter().map(|s| s.value).collect();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let rank = self.percentile * (sorted.len() - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = rank.ceil() as usize;
        let value = sorted[lower] + (sorted[upper] - sorted[lower]) * (rank - lower as f64);

        let n = sorted.len() as f64;
        let mean = sorted.iter().sum::<f64>() / n;
        let variance = sorted.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;

        OutputValue::new(value, variance, jitter)
    }
}

impl Default for MovingMedian {
    fn default() -> Self {
        Self::new()
    }
}

impl EstimationMethod for MovingMedian {
    fn estimate(&mut self, next: InputValue) -> OutputValue {
        self.inputs.push(next);

        let estimate = if self.inputs.is_full() {
            self.window_estimate(next.jitter)
        } else {
            // Return input until window is filled
            OutputValue::bypass(&next)
        };

        self.last = Some(estimate);
        estimate
    }

    fn last_estimate(&self) -> Option<OutputValue> {
        self.last
    }

    fn reset(&mut self) {
        self.inputs.clear();
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(filter: &mut MovingMedian, values: &[f64]) -> Vec<f64> {
        values
            .iter()
            .map(|&v| filter.estimate(v.into()).value)
            .collect()
    }

    #[test]
    fn test_median_filter_basic() {
        let mut filter = MovingMedian::with_window_size(5).unwrap();

        feed(&mut filter, &[10.0, 12.0, 11.0, 100.0]);
        // Median of [10, 12, 11, 100, 13] = 12
        let result = filter.estimate(13.0.into());
        assert!((result.value - 12.0).abs() < 0.01);

        // Median of [12, 11, 100, 13, 12] = 12
        let result = filter.estimate(12.0.into());
        assert!((result.value - 12.0).abs() < 0.01);
    }

    #[test]
    fn test_median_filter_removes_spike() {
        let mut filter = MovingMedian::with_window_size(5).unwrap();

        // Normal values with one spike
        let outputs = feed(&mut filter, &[10.0, 11.0, 10.0, 100.0, 10.0, 11.0]);
        assert!(outputs[4] < 20.0);
        assert!(outputs[5] < 20.0);
    }

    #[test]
    fn test_warm_up_bypasses_input() {
        let mut filter = MovingMedian::new();
        let first = filter.estimate(InputValue::new(3.0, 0.5));
        let second = filter.estimate(InputValue::new(-1.0, 0.25));

        assert_eq!(first, OutputValue::new(3.0, 0.0, 0.5));
        assert_eq!(second, OutputValue::new(-1.0, 0.0, 0.25));
    }

    #[test]
    fn test_variance_is_window_spread() {
        let mut filter = MovingMedian::new();
        let outputs: Vec<_> = [1.0, 2.0, 3.0]
            .into_iter()
            .map(|v| filter.estimate(v.into()))
            .collect();

        // Population variance of [1, 2, 3]
        assert!((outputs[2].value - 2.0).abs() < 1e-12);
        assert!((outputs[2].variance - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_even_window_averages_middle_ranks() {
        let mut filter = MovingMedian::with_window_size(4).unwrap();
        let outputs = feed(&mut filter, &[4.0, 1.0, 3.0, 2.0]);
        assert!((outputs[3] - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_percentile_selection() {
        let mut filter = MovingMedian::with_window_size(5).unwrap();
        filter.set_percentile(1.0).unwrap();
        assert_eq!(feed(&mut filter, &[5.0, 1.0, 9.0, 3.0, 7.0])[4], 9.0);

        filter.set_percentile(0.0).unwrap();
        assert_eq!(filter.estimate(4.0.into()).value, 1.0);

        filter.set_percentile(0.25).unwrap();
        // Window [1, 9, 3, 7, 4] sorted [1, 3, 4, 7, 9], rank 1
        assert_eq!(filter.estimate(1.0.into()).value, 3.0);
    }

    #[test]
    fn test_invalid_configuration_is_rejected() {
        let mut filter = MovingMedian::new();
        feed(&mut filter, &[1.0, 2.0]);

        assert!(filter.set_percentile(1.5).is_err());
        assert!(filter.set_percentile(f64::NAN).is_err());
        assert_eq!(
            filter.set_window_size(0),
            Err(EstimationError::InvalidWindowSize(0))
        );

        assert_eq!(filter.percentile(), DEFAULT_PERCENTILE);
        assert_eq!(filter.window_size(), 3);
        assert_eq!(filter.estimate(9.0.into()).value, 2.0);
    }

    #[test]
    fn test_set_window_size_restarts_warm_up() {
        let mut filter = MovingMedian::new();
        feed(&mut filter, &[1.0, 2.0, 3.0, 4.0]);

        filter.set_window_size(3).unwrap();
        assert!(filter.last_estimate().is_none());
        assert_eq!(feed(&mut filter, &[50.0, 60.0, 0.0]), vec![50.0, 60.0, 50.0]);
    }
}
