//! Buckets are the primary internal storage type.
//!
//! Each bucket is one aggregation window: three tables of summaries, one per
//! summary shape, keyed by metric name. Tables are ordered maps so that
//! rendering is in name order without a sort.

use metric::{Metric, MetricKind};
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::time::{Duration, Instant};
use summary::{self, CountSummary, GaugeSummary, Summary};

/// Column widths for rendering. They only ever grow, so that columns line up
/// from one flush to the next.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Widths {
    name: usize,
    tags: usize,
}

impl Widths {
    fn fit(&mut self, name: &str, tags: &str) {
        self.name = self.name.max(name.chars().count());
        self.tags = self.tags.max(tags.chars().count());
    }
}

/// Buckets stores all summaries until they are rendered.
pub struct Buckets {
    counters: BTreeMap<String, CountSummary>,
    gauges: BTreeMap<String, GaugeSummary>,
    timers: BTreeMap<String, GaugeSummary>,
    start: Instant,
    widths: Widths,
}

impl Default for Buckets {
    /// Create a default Buckets, started now.
    ///
    /// # Examples
    ///
    /// ```
    /// use peekd::buckets::Buckets;
    ///
    /// let bucket = Buckets::default();
    /// assert!(bucket.is_empty());
    /// ```
    fn default() -> Buckets {
        Buckets::new(Instant::now())
    }
}

fn fold<S, F>(
    table: &mut BTreeMap<String, S>,
    metric: &Metric,
    create: F,
) -> Result<(), summary::Error>
where
    S: Summary,
    F: FnOnce(&Metric) -> Result<S, summary::Error>,
{
    if let Some(existing) = table.get_mut(metric.name()) {
        return existing.add_value(metric);
    }
    let fresh = create(metric)?;
    table.insert(metric.name().to_owned(), fresh);
    Ok(())
}

fn write_line<W, S>(
    out: &mut W,
    widths: &mut Widths,
    summary: &S,
    elapsed: Duration,
) -> io::Result<()>
where
    W: Write,
    S: Summary,
{
    let sample = summary.sample();
    let tags = sample.tags().to_string();
    widths.fit(sample.name(), &tags);
    writeln!(
        out,
        "{}\t{:<nw$}\t{:.2}\t{:<tw$}\t{}",
        sample.kind(),
        sample.name(),
        sample.sample_rate(),
        tags,
        summary.render_values(elapsed),
        nw = widths.name,
        tw = widths.tags
    )
}

impl Buckets {
    /// Create an empty Buckets whose age is measured from `start`.
    pub fn new(start: Instant) -> Buckets {
        Buckets {
            counters: BTreeMap::new(),
            gauges: BTreeMap::new(),
            timers: BTreeMap::new(),
            start: start,
            widths: Widths::default(),
        }
    }

    /// Adds a metric to the bucket storage.
    ///
    /// Counters, gauges and timers (including the `ts` spelling) are
    /// summarized. Any other kind is logged and dropped. Returns whether the
    /// metric was taken in.
    ///
    /// # Examples
    /// ```
    /// extern crate peekd;
    ///
    /// use peekd::buckets::Buckets;
    /// use peekd::metric::Metric;
    ///
    /// let mut bucket = Buckets::default();
    /// assert!(bucket.add(&Metric::counter("foo", 1)));
    /// assert_eq!(1, bucket.counters()["foo"].sum());
    /// ```
    pub fn add(&mut self, metric: &Metric) -> bool {
        let res = match metric.kind() {
            MetricKind::Counter => fold(&mut self.counters, metric, CountSummary::new),
            MetricKind::Gauge => fold(&mut self.gauges, metric, GaugeSummary::new),
            MetricKind::Timer | MetricKind::LegacyTimer => {
                fold(&mut self.timers, metric, GaugeSummary::new)
            }
            MetricKind::Histogram | MetricKind::Set | MetricKind::Distribution => {
                warn!("ignoring metric of type {}", metric.kind());
                return false;
            }
        };
        match res {
            Ok(()) => true,
            Err(e) => {
                warn!("ignoring metric {}: {}", metric.name(), e);
                false
            }
        }
    }

    /// True when no table holds a summary.
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty() && self.gauges.is_empty() && self.timers.is_empty()
    }

    /// Render every summary to `out`, aged from the bucket's start to now.
    ///
    /// # Errors
    ///
    /// Fails if writing to `out` fails.
    pub fn render<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let elapsed = self.start.elapsed();
        self.render_elapsed(out, elapsed)
    }

    /// Render every summary to `out` as though the bucket were `elapsed` old.
    ///
    /// Counters come first, then gauges, then timers. Within each table
    /// lines are in ascending name order. Nothing is written for an empty
    /// bucket.
    ///
    /// # Errors
    ///
    /// Fails if writing to `out` fails.
    pub fn render_elapsed<W: Write>(&mut self, out: &mut W, elapsed: Duration) -> io::Result<()> {
        for s in self.counters.values() {
            write_line(out, &mut self.widths, s, elapsed)?;
        }
        for s in self.gauges.values() {
            write_line(out, &mut self.widths, s, elapsed)?;
        }
        for s in self.timers.values() {
            write_line(out, &mut self.widths, s, elapsed)?;
        }
        Ok(())
    }

    /// The moment this bucket started accumulating.
    pub fn start(&self) -> Instant {
        self.start
    }

    /// Counter summaries by name.
    pub fn counters(&self) -> &BTreeMap<String, CountSummary> {
        &self.counters
    }

    /// Gauge summaries by name.
    pub fn gauges(&self) -> &BTreeMap<String, GaugeSummary> {
        &self.gauges
    }

    /// Timer summaries by name, `ms` and `ts` together.
    pub fn timers(&self) -> &BTreeMap<String, GaugeSummary> {
        &self.timers
    }
}
