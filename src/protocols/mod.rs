//! Wire protocols peekd understands.

pub mod statsd;
