use std::fmt;

/// The numeric payload of a `Metric`.
///
/// Which variant a metric carries is decided by its kind when the metric is
/// built: counters are `Integer`, everything else is `Float`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    /// A whole number, used by counters.
    Integer(i64),
    /// A floating point number, used by gauges, timers and the rest.
    Float(f64),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
        }
    }
}
