//! The metric record and its companions.
//!
//! A `Metric` is one decoded statsd observation. It is immutable once built:
//! the kind fixes which value variant it carries and, downstream, which
//! summary it is folded into.

use std::error;
use std::fmt;

mod event;
mod tagmap;
mod value;

pub use self::event::Event;
pub use self::tagmap::TagMap;
pub use self::value::Value;

/// The statsd type of a `Metric`, taken from the type token of the line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MetricKind {
    /// `c`, a monotonic running total
    Counter,
    /// `g`, a point-in-time value
    Gauge,
    /// `ms`, a duration measurement
    Timer,
    /// `ts`, an older spelling of timer. Aggregated exactly like `Timer`.
    LegacyTimer,
    /// `h`
    Histogram,
    /// `s`
    Set,
    /// `d`
    Distribution,
}

impl MetricKind {
    /// The statsd type token for this kind.
    pub fn as_str(&self) -> &'static str {
        match *self {
            MetricKind::Counter => "c",
            MetricKind::Gauge => "g",
            MetricKind::Timer => "ms",
            MetricKind::LegacyTimer => "ts",
            MetricKind::Histogram => "h",
            MetricKind::Set => "s",
            MetricKind::Distribution => "d",
        }
    }

    /// Look up a kind by its statsd type token.
    pub fn from_token(token: &str) -> Option<MetricKind> {
        match token {
            "c" => Some(MetricKind::Counter),
            "g" => Some(MetricKind::Gauge),
            "ms" => Some(MetricKind::Timer),
            "ts" => Some(MetricKind::LegacyTimer),
            "h" => Some(MetricKind::Histogram),
            "s" => Some(MetricKind::Set),
            "d" => Some(MetricKind::Distribution),
            _ => None,
        }
    }

    /// Counters carry integers, every other kind carries floats.
    fn accepts(&self, value: &Value) -> bool {
        match (*self, *value) {
            (MetricKind::Counter, Value::Integer(_)) => true,
            (MetricKind::Counter, Value::Float(_)) => false,
            (_, Value::Float(_)) => true,
            (_, Value::Integer(_)) => false,
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from building a `Metric`.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// The value variant does not belong to the kind, for instance a
    /// fractional counter.
    ValueMismatch(MetricKind, Value),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::ValueMismatch(kind, value) => {
                write!(f, "value {} is not valid for metric type {}", value, kind)
            }
        }
    }
}

impl error::Error for Error {}

/// One statsd observation.
#[derive(Clone, Debug, PartialEq)]
pub struct Metric {
    name: String,
    kind: MetricKind,
    value: Value,
    sample_rate: f64,
    tags: TagMap,
}

impl Metric {
    /// Create a new `Metric` with a sample rate of 1 and no tags.
    ///
    /// Fails if `value` is not the variant `kind` requires.
    ///
    /// # Examples
    ///
    /// ```
    /// use peekd::metric::{Metric, MetricKind, Value};
    ///
    /// assert!(Metric::new("foo", MetricKind::Counter, Value::Integer(1)).is_ok());
    /// assert!(Metric::new("foo", MetricKind::Counter, Value::Float(1.5)).is_err());
    /// ```
    pub fn new<S>(name: S, kind: MetricKind, value: Value) -> Result<Metric, Error>
    where
        S: Into<String>,
    {
        if !kind.accepts(&value) {
            return Err(Error::ValueMismatch(kind, value));
        }
        Ok(Metric {
            name: name.into(),
            kind: kind,
            value: value,
            sample_rate: 1.0,
            tags: TagMap::default(),
        })
    }

    /// Create a counter.
    pub fn counter<S>(name: S, value: i64) -> Metric
    where
        S: Into<String>,
    {
        Metric::unchecked(name.into(), MetricKind::Counter, Value::Integer(value))
    }

    /// Create a gauge.
    pub fn gauge<S>(name: S, value: f64) -> Metric
    where
        S: Into<String>,
    {
        Metric::unchecked(name.into(), MetricKind::Gauge, Value::Float(value))
    }

    /// Create a timer.
    pub fn timer<S>(name: S, value: f64) -> Metric
    where
        S: Into<String>,
    {
        Metric::unchecked(name.into(), MetricKind::Timer, Value::Float(value))
    }

    fn unchecked(name: String, kind: MetricKind, value: Value) -> Metric {
        Metric {
            name: name,
            kind: kind,
            value: value,
            sample_rate: 1.0,
            tags: TagMap::default(),
        }
    }

    /// Replace the sample rate.
    pub fn set_sample_rate(mut self, rate: f64) -> Metric {
        self.sample_rate = rate;
        self
    }

    /// Add a tag, overwriting any previous value stored under `key`.
    pub fn overlay_tag<S>(mut self, key: S, val: S) -> Metric
    where
        S: Into<String>,
    {
        self.tags.insert(key.into(), val.into());
        self
    }

    /// Replace the whole tag set.
    pub fn set_tags(mut self, tags: TagMap) -> Metric {
        self.tags = tags;
        self
    }

    /// The metric name, the grouping key for aggregation.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The metric kind.
    pub fn kind(&self) -> MetricKind {
        self.kind
    }

    /// The observed value.
    pub fn value(&self) -> Value {
        self.value
    }

    /// The client side sample rate. Carried for display.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// The tags attached to this observation.
    pub fn tags(&self) -> &TagMap {
        &self.tags
    }
}
