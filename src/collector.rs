//! The collector owns both aggregation windows and is the only code that
//! touches them.
//!
//! Every metric lands in the interval window and the total window. On each
//! flush pulse the interval window is printed together with the total window
//! and then replaced by an empty one. The total window is never reset.

use buckets::Buckets;
use chrono::{DateTime, Utc};
use metric::{Event, Metric};
use std::io::{self, Write};
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};
use util;

/// The interval and total windows, plus the interval length used in the
/// report header.
pub struct Collector {
    interval: Buckets,
    total: Buckets,
    flush_interval: Duration,
}

impl Collector {
    /// Create a collector reporting every `interval` seconds. Zero means the
    /// default of `util::DEFAULT_FLUSH_INTERVAL`.
    pub fn new(interval: u64) -> Collector {
        let now = Instant::now();
        Collector {
            interval: Buckets::new(now),
            total: Buckets::new(now),
            flush_interval: util::flush_interval(interval),
        }
    }

    /// Fold `metric` into both windows.
    pub fn deliver(&mut self, metric: &Metric) {
        self.interval.add(metric);
        self.total.add(metric);
    }

    /// Write the report for a flush pulse fired at `at`, then start a new
    /// interval window.
    ///
    /// Nothing is written, and nothing reset, when the interval window saw no
    /// metrics. Returns whether a report was written.
    ///
    /// # Errors
    ///
    /// Fails if writing to `out` fails. The interval window is still reset in
    /// that case so that a broken pipe does not grow it without bound.
    pub fn flush<W: Write>(&mut self, out: &mut W, at: DateTime<Utc>) -> io::Result<bool> {
        if self.interval.is_empty() {
            debug!("nothing received in the last interval, skipping report");
            return Ok(false);
        }
        let res = self.report(out, at);
        self.interval = Buckets::new(Instant::now());
        res.map(|()| true)
    }

    fn report<W: Write>(&mut self, out: &mut W, at: DateTime<Utc>) -> io::Result<()> {
        write!(out, "\n\nDumping Metrics at {}\n", at.to_rfc3339())?;
        write!(out, "\nLast {}s\n", self.flush_interval.as_secs())?;
        self.interval.render(out)?;
        write!(out, "\nLast {}s\n", self.total.start().elapsed().as_secs())?;
        self.total.render(out)?;
        out.flush()
    }

    /// Consume events until every sender has hung up.
    ///
    /// Events are handled strictly in the order received. Write failures are
    /// logged and collection carries on.
    pub fn run<W: Write>(&mut self, recv: &Receiver<Event>, mut out: W) {
        for event in recv.iter() {
            match event {
                Event::Telemetry(metric) => self.deliver(&metric),
                Event::TimerFlush(at) => {
                    if let Err(e) = self.flush(&mut out, at) {
                        error!("could not write report: {}", e);
                    }
                }
            }
        }
        debug!("all sources hung up, collector stopping");
    }

    /// The window reset on every flush.
    pub fn interval(&self) -> &Buckets {
        &self.interval
    }

    /// The window that accumulates for the life of the collector.
    pub fn total(&self) -> &Buckets {
        &self.total
    }

    /// The configured time between reports.
    pub fn flush_interval(&self) -> Duration {
        self.flush_interval
    }
}
