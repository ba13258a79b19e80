//! Line-Oriented Sample Stream

use anyhow::{bail, Context};
use estimation::{EstimationMethod, Estimator, InputValue};
use std::io::{BufRead, Write};
use tracing::{debug, trace};

/// Parse one input line as `value` or `value,jitter`.
///
/// Blank lines and lines starting with `#` yield `None`.
pub fn parse_sample(line: &str) -> anyhow::Result<Option<InputValue>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut fields = line.split(',').map(str::trim);
    let value: f64 = match fields.next() {
        Some(field) => field
            .parse()
            .with_context(|| format!("invalid value {:?}", field))?,
        None => bail!("missing value"),
    };
    let jitter: f64 = match fields.next() {
        Some(field) => field
            .parse()
            .with_context(|| format!("invalid jitter {:?}", field))?,
        None => 0.0,
    };
    if fields.next().is_some() {
        bail!("expected `value` or `value,jitter`, got {:?}", line);
    }
    if !value.is_finite() {
        bail!("value must be finite, got {}", value);
    }
    if jitter.is_nan() || jitter < 0.0 {
        bail!("jitter must be >= 0, got {}", jitter);
    }

    Ok(Some(InputValue::new(value, jitter)))
}

/// Feed every sample of `input` to `estimator` in order, writing one JSON
/// estimate per line to `output`. Returns the number of samples processed.
pub fn run_stream<R: BufRead, W: Write>(
    estimator: &mut Estimator,
    input: R,
    mut output: W,
) -> anyhow::Result<usize> {
    let mut count = 0;

    for (index, line) in input.lines().enumerate() {
        let line = line.context("Failed to read input")?;
        let sample = match parse_sample(&line).with_context(|| format!("line {}", index + 1))? {
            Some(sample) => sample,
            None => continue,
        };

        let estimate = estimator.estimate(sample);
        trace!("{:?} -> {:?}", sample, estimate);

        serde_json::to_writer(&mut output, &estimate).context("Failed to write estimate")?;
        writeln!(output).context("Failed to write estimate")?;
        count += 1;
    }

    output.flush().context("Failed to flush output")?;
    debug!("Stream finished after {} samples", count);
    Ok(count)
}
