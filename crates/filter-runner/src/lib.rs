//! Sensor Filter Runner
//!
//! Loads an estimator configuration and drives it over a line-oriented
//! stream of samples, standing in for the fusion framework that normally
//! owns one estimator per sensor stream.

mod settings;
mod stream;

pub use settings::{load_settings, Settings, ENV_PREFIX};
pub use stream::{parse_sample, run_stream};

use anyhow::Context;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Initialize logging on stderr, `verbosity` counts `-v` flags
pub fn init_logging(verbosity: u8) -> anyhow::Result<()> {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}
