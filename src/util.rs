//! Utility module, a grab-bag of functionality

use metric;
use std::sync::mpsc;
use std::time::Duration;

/// Seconds between flushes when none, or zero, is configured.
pub const DEFAULT_FLUSH_INTERVAL: u64 = 30;

/// The sending half shared by every source.
pub type Channel = mpsc::SyncSender<metric::Event>;

/// Create the hand-off channel between the sources and the collector.
///
/// The channel has no buffer: a send blocks until the collector takes the
/// event. Slow collection therefore pushes back on the statsd source, and from
/// there into the kernel's UDP receive buffer.
pub fn channel() -> (Channel, mpsc::Receiver<metric::Event>) {
    mpsc::sync_channel(0)
}

/// Send a `metric::Event` into a `Channel`.
///
/// Returns false once the receiving end is gone, at which point the caller
/// should stop producing.
pub fn send(chan: &Channel, event: metric::Event) -> bool {
    chan.send(event).is_ok()
}

/// The flush interval for `secs`, with zero taken to mean the default.
pub fn flush_interval(secs: u64) -> Duration {
    if secs == 0 {
        Duration::from_secs(DEFAULT_FLUSH_INTERVAL)
    } else {
        Duration::from_secs(secs)
    }
}
