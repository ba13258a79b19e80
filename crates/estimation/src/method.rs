//! Estimation Method Contract

use crate::kalman::KalmanFilter;
use crate::moving_average::MovingAverage;
use crate::moving_median::MovingMedian;
use crate::value::{InputValue, OutputValue};

/// Streaming single-input, single-output estimator
///
/// Samples must be fed strictly in chronological order, one call per reading.
pub trait EstimationMethod {
    /// Consume one new sample and return the new estimate
    fn estimate(&mut self, next: InputValue) -> OutputValue;

    /// Most recent estimate, `None` until the first sample arrives
    fn last_estimate(&self) -> Option<OutputValue>;

    /// Drop all history, keeping the configuration
    fn reset(&mut self);
}

/// Closed set of available estimators
#[derive(Debug, Clone)]
pub enum Estimator {
    MovingAverage(MovingAverage),
    MovingMedian(MovingMedian),
    Kalman(KalmanFilter),
}

impl Estimator {
    /// Short, stable name of the variant
    pub fn name(&self) -> &'static str {
        match self {
            Estimator::MovingAverage(_) => "moving_average",
            Estimator::MovingMedian(_) => "moving_median",
            Estimator::Kalman(_) => "kalman",
        }
    }
}

impl Default for Estimator {
    fn default() -> Self {
        Estimator::MovingAverage(MovingAverage::default())
    }
}

impl EstimationMethod for Estimator {
    fn estimate(&mut self, next: InputValue) -> OutputValue {
        match self {
            Estimator::MovingAverage(f) => f.estimate(next),
            Estimator::MovingMedian(f) => f.estimate(next),
            Estimator::Kalman(f) => f.estimate(next),
        }
    }

    fn last_estimate(&self) -> Option<OutputValue> {
        match self {
            Estimator::MovingAverage(f) => f.last_estimate(),
            Estimator::MovingMedian(f) => f.last_estimate(),
            Estimator::Kalman(f) => f.last_estimate(),
        }
    }

    fn reset(&mut self) {
        match self {
            Estimator::MovingAverage(f) => f.reset(),
            Estimator::MovingMedian(f) => f.reset(),
            Estimator::Kalman(f) => f.reset(),
        }
    }
}

impl From<MovingAverage> for Estimator {
    fn from(filter: MovingAverage) -> Self {
        Estimator::MovingAverage(filter)
    }
}

impl From<MovingMedian> for Estimator {
    fn from(filter: MovingMedian) -> Self {
        Estimator::MovingMedian(filter)
    }
}

impl From<KalmanFilter> for Estimator {
    fn from(filter: KalmanFilter) -> Self {
        Estimator::Kalman(filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variants() -> Vec<Estimator> {
        vec![
            MovingAverage::new().into(),
            MovingMedian::new().into(),
            KalmanFilter::new().into(),
        ]
    }

    #[test]
    fn test_no_estimate_before_first_sample() {
        for filter in variants() {
            assert!(filter.last_estimate().is_none(), "{}", filter.name());
        }
    }

    #[test]
    fn test_last_estimate_matches_returned() {
        for mut filter in variants() {
            for i in 0..6 {
                let out = filter.estimate(InputValue::new(i as f64, 0.1));
                assert_eq!(filter.last_estimate(), Some(out), "{}", filter.name());
            }
        }
    }

    #[test]
    fn test_jitter_propagates_from_newest_input() {
        for mut filter in variants() {
            for i in 0..5 {
                let jitter = 0.01 * (i + 1) as f64;
                let out = filter.estimate(InputValue::new(10.0, jitter));
                assert_eq!(out.jitter, jitter, "{}", filter.name());
            }
        }
    }

    #[test]
    fn test_reset_clears_last_estimate() {
        for mut filter in variants() {
            filter.estimate(1.0.into());
            filter.reset();
            assert!(filter.last_estimate().is_none(), "{}", filter.name());
        }
    }

    #[test]
    fn test_default_is_moving_average() {
        assert_eq!(Estimator::default().name(), "moving_average");
    }
}
