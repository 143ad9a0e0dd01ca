//! Sources produce `metric::Event`s for the collector.
//!
//! Each source runs on its own thread and owns a clone of the hand-off
//! `util::Channel`. A source stops once the collector has hung up.

mod flush;
mod statsd;

pub use self::flush::FlushTimer;
pub use self::statsd::{Statsd, StatsdConfig, STATSD_BAD_PACKET, STATSD_GOOD_PACKET};

/// A source of events. `run` blocks for the life of the source.
pub trait Source {
    /// Produce events until the receiving end of the channel is gone.
    fn run(&mut self);
}
