use chrono::{DateTime, Utc};
use metric::Metric;

/// Everything that travels from the sources to the collector.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// A decoded observation.
    Telemetry(Metric),
    /// A flush pulse, stamped with the moment the timer fired.
    TimerFlush(DateTime<Utc>),
}
