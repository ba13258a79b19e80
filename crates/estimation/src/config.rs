//! Estimator Configuration

use crate::error::EstimationError;
use crate::kalman::{KalmanFilter, DEFAULT_MEASUREMENT_NOISE, DEFAULT_PROCESS_NOISE};
use crate::method::Estimator;
use crate::moving_average::{MovingAverage, DEFAULT_WINDOW_SIZE};
use crate::moving_median::{MovingMedian, DEFAULT_PERCENTILE};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Filter selection and parameters, tagged by `method`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum EstimatorConfig {
    /// Weighted moving average (FIR, or IIR when feedback weights are given)
    MovingAverage {
        #[serde(default = "default_window_size")]
        window_size: usize,
        /// Feed-forward weights, uniform when absent
        #[serde(default, deserialize_with = "coefficient_list::deserialize")]
        coefficients_in: Option<Vec<f64>>,
        /// Feedback weights, none when absent
        #[serde(default, deserialize_with = "coefficient_list::deserialize")]
        coefficients_out: Option<Vec<f64>>,
    },
    /// Percentile over a sliding window
    MovingMedian {
        #[serde(default = "default_window_size")]
        window_size: usize,
        #[serde(default = "default_percentile")]
        percentile: f64,
    },
    /// Scalar Kalman filter
    Kalman {
        #[serde(default = "default_process_noise")]
        process_noise: f64,
        #[serde(default = "default_measurement_noise")]
        measurement_noise: f64,
    },
}

/// Coefficient arrays given as a list, a single number, or a comma-separated
/// string (the form environment variables arrive in)
mod coefficient_list {
    use serde::de::{self, Deserializer, SeqAccess, Visitor};
    use serde::Deserialize;
    use std::fmt;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<f64>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ListVisitor)
    }

    fn parse_list<E: de::Error>(list: &str) -> Result<Vec<f64>, E> {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.parse().map_err(|_| E::custom(format!("invalid coefficient {:?}", s))))
            .collect()
    }

    struct ListVisitor;

    impl<'de> Visitor<'de> for ListVisitor {
        type Value = Option<Vec<f64>>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a list of coefficients")
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(ListVisitor)
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(Some(vec![v]))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(vec![v as f64]))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(vec![v as f64]))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            parse_list(v).map(Some)
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut list = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(Coefficient(c)) = seq.next_element()? {
                list.push(c);
            }
            Ok(Some(list))
        }
    }

    /// One list element, numeric or numeric string
    struct Coefficient(f64);

    impl<'de> Deserialize<'de> for Coefficient {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            match deserializer.deserialize_any(ListVisitor)? {
                Some(list) if list.len() == 1 => Ok(Coefficient(list[0])),
                _ => Err(de::Error::custom("expected a single coefficient")),
            }
        }
    }
}

fn default_window_size() -> usize {
    DEFAULT_WINDOW_SIZE
}

fn default_percentile() -> f64 {
    DEFAULT_PERCENTILE
}

fn default_process_noise() -> f64 {
    DEFAULT_PROCESS_NOISE
}

fn default_measurement_noise() -> f64 {
    DEFAULT_MEASUREMENT_NOISE
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        EstimatorConfig::MovingAverage {
            window_size: DEFAULT_WINDOW_SIZE,
            coefficients_in: None,
            coefficients_out: None,
        }
    }
}

impl EstimatorConfig {
    /// Construct the configured estimator
    pub fn build(&self) -> Result<Estimator, EstimationError> {
        let estimator: Estimator = match self {
            EstimatorConfig::MovingAverage {
                window_size,
                coefficients_in,
                coefficients_out,
            } => {
                let mut filter = MovingAverage::with_window_size(*window_size)?;
                if let Some(b) = coefficients_in {
                    filter.set_weighting_coefficients_in(b)?;
                }
                if let Some(a) = coefficients_out {
                    filter.set_weighting_coefficients_out(a)?;
                }
                filter.into()
            }
            EstimatorConfig::MovingMedian {
                window_size,
                percentile,
            } => {
                let mut filter = MovingMedian::with_window_size(*window_size)?;
                filter.set_percentile(*percentile)?;
                filter.into()
            }
            EstimatorConfig::Kalman {
                process_noise,
                measurement_noise,
            } => KalmanFilter::with_noise(*process_noise, *measurement_noise)?.into(),
        };

        info!("Created {} estimator from config: {:?}", estimator.name(), self);
        Ok(estimator)
    }
}
