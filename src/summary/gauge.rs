use metric::{Metric, Value};
use std::time::Duration;
use summary::{Error, Summary};

/// Last value and mean of a gauge or timer.
#[derive(Clone, Debug, PartialEq)]
pub struct GaugeSummary {
    sample: Metric,
    sum: f64,
    count: u64,
    last: f64,
}

impl GaugeSummary {
    /// Start a summary from its first observation, which is counted.
    ///
    /// # Errors
    ///
    /// Fails if `metric` does not carry a float.
    pub fn new(metric: &Metric) -> Result<GaugeSummary, Error> {
        match metric.value() {
            Value::Float(x) => Ok(GaugeSummary {
                sample: metric.clone(),
                sum: x,
                count: 1,
                last: x,
            }),
            v @ Value::Integer(_) => Err(Error::ValueMismatch(metric.kind(), v)),
        }
    }

    /// The most recently observed value.
    pub fn last(&self) -> f64 {
        self.last
    }

    /// The number of observations.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// The sum of every observation.
    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// The arithmetic mean. `count` is never zero, a summary is only created
    /// from an observation.
    pub fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }
}

impl Summary for GaugeSummary {
    fn add_value(&mut self, metric: &Metric) -> Result<(), Error> {
        match metric.value() {
            Value::Float(x) => {
                self.sum += x;
                self.count += 1;
                self.last = x;
                self.sample = metric.clone();
                Ok(())
            }
            v @ Value::Integer(_) => Err(Error::ValueMismatch(metric.kind(), v)),
        }
    }

    fn sample(&self) -> &Metric {
        &self.sample
    }

    fn render_values(&self, _elapsed: Duration) -> String {
        format!("{:.4} (last)\t{:.4} (avg)", self.last, self.mean())
    }
}
