//! peekd is a local statsd collector. It listens for statsd datagrams, folds
//! them into in-memory summaries and periodically prints what it has seen to
//! stdout. It is meant to sit next to an application under development so
//! that engineers can see which metrics are being emitted, how often and with
//! which tags, without standing up a real metrics pipeline.
//!
//! Two windows are kept. The interval window is printed and discarded on
//! every flush. The total window accumulates for the lifetime of the
//! process.
//!
//! peekd is intentionally simple:
//!
//!  * Nothing is persisted.
//!  * Tags are displayed, never used to group.
//!  * Counters report a sum and a per-second rate, gauges and timers report
//!    the last value and the mean.
#![allow(unknown_lints)]
#![deny(trivial_numeric_casts, missing_docs, unstable_features, unused_import_braces)]
extern crate chrono;
#[macro_use]
extern crate clap;
extern crate toml;

#[macro_use]
extern crate log;

#[macro_use]
extern crate lazy_static;

#[cfg(test)]
extern crate quickcheck;
#[cfg(test)]
extern crate rand;
#[cfg(test)]
extern crate tempdir;

#[cfg(test)]
mod logcapture;

pub mod buckets;
pub mod collector;
pub mod config;
pub mod metric;
pub mod protocols;
pub mod source;
pub mod summary;
pub mod util;
