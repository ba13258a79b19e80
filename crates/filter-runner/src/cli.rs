use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "sensor-filter",
    version,
    about = "Smooth a stream of sensor readings with an online estimation filter",
    long_about = "Reads one sample per line from stdin (`value` or `value,jitter`) and writes\n\
                  one JSON estimate per line to stdout. Settings come from --config and\n\
                  SENSOR_FILTER_* environment variables (e.g. SENSOR_FILTER_FILTER__METHOD=kalman);\n\
                  coefficient arrays are comma-separated (SENSOR_FILTER_FILTER__COEFFICIENTS_IN=3,2,1)."
)]
pub struct Cli {
    /// Settings file (TOML, YAML, JSON, ...)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
