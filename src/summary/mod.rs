//! Per-name accumulators.
//!
//! A summary folds every observation of one metric name, within one window,
//! into a running statistic. Counters keep a running total, gauges and timers
//! keep the last value and enough to compute the mean.

use metric::{Metric, MetricKind, Value};
use std::error;
use std::fmt;
use std::time::Duration;

mod count;
mod gauge;

pub use self::count::CountSummary;
pub use self::gauge::GaugeSummary;

/// Errors from folding a metric into a summary.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// The metric carries the wrong value variant for this summary.
    ValueMismatch(MetricKind, Value),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::ValueMismatch(kind, value) => write!(
                f,
                "cannot summarize value {} of metric type {}",
                value, kind
            ),
        }
    }
}

impl error::Error for Error {}

/// The contract shared by every summary variant.
pub trait Summary {
    /// Fold `metric` into the running statistic. The metric also replaces
    /// the stored sample, so the most recently seen tags are the ones
    /// displayed.
    ///
    /// # Errors
    ///
    /// Fails with `Error::ValueMismatch` if the value variant does not belong
    /// to this summary. State is left untouched in that case.
    fn add_value(&mut self, metric: &Metric) -> Result<(), Error>;

    /// The representative metric, used for its name, kind, sample rate and
    /// tags. Never for its value.
    fn sample(&self) -> &Metric;

    /// Render the accumulated values. `elapsed` is the age of the window the
    /// summary lives in.
    fn render_values(&self, elapsed: Duration) -> String;
}

/// Seconds in `d` as a float.
pub fn seconds(d: Duration) -> f64 {
    d.as_secs() as f64 + f64::from(d.subsec_nanos()) / 1_000_000_000.0
}
