//! Runner Settings

use anyhow::Context;
use config::{Config, Environment, File};
use estimation::EstimatorConfig;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Prefix of environment variables overriding the settings file
pub const ENV_PREFIX: &str = "SENSOR_FILTER";

/// Top-level runner settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    /// Estimator to run, default moving average when absent
    #[serde(default)]
    pub filter: EstimatorConfig,
}

/// Load settings from an optional file, overridden by the environment
///
/// Nested keys use `__` in variable names, e.g.
/// `SENSOR_FILTER_FILTER__WINDOW_SIZE=5`. Coefficient arrays are given
/// comma-separated: `SENSOR_FILTER_FILTER__COEFFICIENTS_IN=3,2,1`.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(File::from(path));
    }

    let settings: Settings = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Failed to read settings")?
        .try_deserialize()
        .context("Invalid settings")?;

    debug!("Loaded settings: {:?}", settings);
    Ok(settings)
}
