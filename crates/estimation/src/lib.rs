//! Online Estimation Filters
//!
//! Single-input, single-output filters that smooth noisy, jittered sensor
//! readings one sample at a time:
//! - Weighted moving average (FIR and IIR)
//! - Moving median / percentile
//! - Scalar Kalman filter
//!
//! Every filter implements [`EstimationMethod`]; [`Estimator`] holds any of them.

mod config;
mod error;
mod kalman;
mod method;
mod moving_average;
mod moving_median;
mod value;

pub use config::EstimatorConfig;
pub use error::EstimationError;
pub use kalman::{KalmanFilter, DEFAULT_MEASUREMENT_NOISE, DEFAULT_PROCESS_NOISE};
pub use method::{EstimationMethod, Estimator};
pub use moving_average::{MovingAverage, DEFAULT_WINDOW_SIZE};
pub use moving_median::{MovingMedian, DEFAULT_PERCENTILE};
pub use value::{InputValue, OutputValue};
