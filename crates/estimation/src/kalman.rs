//! Scalar Kalman Filter

use crate::error::EstimationError;
use crate::method::EstimationMethod;
use crate::value::{InputValue, OutputValue};
use tracing::{debug, warn};

/// Default process noise (how fast the true value drifts per step)
pub const DEFAULT_PROCESS_NOISE: f64 = 0.01;
/// Default measurement noise (variance of a single reading)
pub const DEFAULT_MEASUREMENT_NOISE: f64 = 1.0;

/// Kalman filter for a scalar random-walk state
#[derive(Debug, Clone)]
pub struct KalmanFilter {
    /// Process noise q (>= 0)
    process_noise: f64,
    /// Measurement noise r (> 0)
    measurement_noise: f64,
    /// Current state estimate and its covariance, `None` until seeded
    state: Option<(f64, f64)>,
    /// Most recent output
    last: Option<OutputValue>,
}

impl KalmanFilter {
    /// Create a filter with default noise parameters
    pub fn new() -> Self {
        Self {
            process_noise: DEFAULT_PROCESS_NOISE,
            measurement_noise: DEFAULT_MEASUREMENT_NOISE,
            state: None,
            last: None,
        }
    }

    /// Create a filter with the given process and measurement noise
    pub fn with_noise(process_noise: f64, measurement_noise: f64) -> Result<Self, EstimationError> {
        let mut filter = Self::new();
        filter.set_process_noise(process_noise)?;
        filter.set_measurement_noise(measurement_noise)?;
        Ok(filter)
    }

    /// Get the process noise
    pub fn process_noise(&self) -> f64 {
        self.process_noise
    }

    /// Set the process noise, must be finite and >= 0
    pub fn set_process_noise(&mut self, process_noise: f64) -> Result<(), EstimationError> {
        if !process_noise.is_finite() || process_noise < 0.0 {
            let e = EstimationError::InvalidParameter {
                name: "process_noise",
                value: process_noise,
            };
            warn!("Rejected Kalman parameter: {}", e);
            return Err(e);
        }
        self.process_noise = process_noise;
        debug!("Kalman process noise set to {}", process_noise);
        Ok(())
    }

    /// Get the measurement noise
    pub fn measurement_noise(&self) -> f64 {
        self.measurement_noise
    }

    /// Set the measurement noise, must be finite and > 0
    pub fn set_measurement_noise(&mut self, measurement_noise: f64) -> Result<(), EstimationError> {
        if !measurement_noise.is_finite() || measurement_noise <= 0.0 {
            let e = EstimationError::InvalidParameter {
                name: "measurement_noise",
                value: measurement_noise,
            };
            warn!("Rejected Kalman parameter: {}", e);
            return Err(e);
        }
        self.measurement_noise = measurement_noise;
        debug!("Kalman measurement noise set to {}", measurement_noise);
        Ok(())
    }
}

impl Default for KalmanFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl EstimationMethod for KalmanFilter {
    fn estimate(&mut self, next: InputValue) -> OutputValue {
        let z = next.value;
        let (x, p) = match self.state {
            // First reading seeds the state with measurement uncertainty
            None => (z, self.measurement_noise),
            Some((x0, p0)) => {
                // Predict
                let p_prior = p0 + self.process_noise;
                // Update
                let gain = p_prior / (p_prior + self.measurement_noise);
                (x0 + gain * (z - x0), (1.0 - gain) * p_prior)
            }
        };

        self.state = Some((x, p));
        let estimate = OutputValue::new(x, p, next.jitter);
        self.last = Some(estimate);
        estimate
    }

    fn last_estimate(&self) -> Option<OutputValue> {
        self.last
    }

    fn reset(&mut self) {
        self.state = None;
        self.last = None;
    }
}
