use metric::{Metric, Value};
use std::time::Duration;
use summary::{seconds, Error, Summary};

/// Running total of a counter.
#[derive(Clone, Debug, PartialEq)]
pub struct CountSummary {
    sample: Metric,
    sum: i64,
}

impl CountSummary {
    /// Start a summary from its first observation, which is counted.
    ///
    /// # Errors
    ///
    /// Fails if `metric` does not carry an integer.
    pub fn new(metric: &Metric) -> Result<CountSummary, Error> {
        match metric.value() {
            Value::Integer(i) => Ok(CountSummary {
                sample: metric.clone(),
                sum: i,
            }),
            v @ Value::Float(_) => Err(Error::ValueMismatch(metric.kind(), v)),
        }
    }

    /// The sum of every value seen.
    pub fn sum(&self) -> i64 {
        self.sum
    }

    /// Per-second rate of the sum over `elapsed`. A zero duration yields a
    /// rate of zero.
    pub fn rate(&self, elapsed: Duration) -> f64 {
        let secs = seconds(elapsed);
        if secs > 0.0 {
            self.sum as f64 / secs
        } else {
            0.0
        }
    }
}

impl Summary for CountSummary {
    fn add_value(&mut self, metric: &Metric) -> Result<(), Error> {
        match metric.value() {
            Value::Integer(i) => {
                self.sum = self.sum.saturating_add(i);
                self.sample = metric.clone();
                Ok(())
            }
            v @ Value::Float(_) => Err(Error::ValueMismatch(metric.kind(), v)),
        }
    }

    fn sample(&self) -> &Metric {
        &self.sample
    }

    fn render_values(&self, elapsed: Duration) -> String {
        format!("{}\t{:.6}/s", self.sum, self.rate(elapsed))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use metric::{Metric, MetricKind};
    use quickcheck::{QuickCheck, TestResult};

    #[test]
    fn first_observation_is_counted() {
        let cs = CountSummary::new(&Metric::counter("requests.count", 1)).unwrap();
        assert_eq!(1, cs.sum());
    }

    #[test]
    fn sums_integers() {
        let mut cs = CountSummary::new(&Metric::counter("requests.count", 1)).unwrap();
        cs.add_value(&Metric::counter("requests.count", 1)).unwrap();
        cs.add_value(&Metric::counter("requests.count", 3)).unwrap();
        assert_eq!(5, cs.sum());
    }

    #[test]
    fn rejects_floats() {
        let gauge = Metric::gauge("requests.count", 1.5);
        assert_eq!(
            Err(Error::ValueMismatch(MetricKind::Gauge, Value::Float(1.5))),
            CountSummary::new(&gauge)
        );

        let mut cs = CountSummary::new(&Metric::counter("requests.count", 2)).unwrap();
        assert!(cs.add_value(&gauge).is_err());
        assert_eq!(2, cs.sum());
        assert_eq!(Value::Integer(2), cs.sample().value());
    }

    #[test]
    fn sample_tracks_latest_tags() {
        let mut cs = CountSummary::new(&Metric::counter("hits", 1).overlay_tag("route", "a"))
            .unwrap();
        cs.add_value(&Metric::counter("hits", 1).overlay_tag("route", "b"))
            .unwrap();
        assert_eq!(Some("b"), cs.sample().tags().get("route"));
    }

    #[test]
    fn saturates_rather_than_overflows() {
        let mut cs = CountSummary::new(&Metric::counter("big", i64::max_value())).unwrap();
        cs.add_value(&Metric::counter("big", 1)).unwrap();
        assert_eq!(i64::max_value(), cs.sum());
    }

    #[test]
    fn render_sum_and_rate() {
        let mut cs = CountSummary::new(&Metric::counter("hits", 10)).unwrap();
        cs.add_value(&Metric::counter("hits", 5)).unwrap();
        assert_eq!("15\t0.500000/s", cs.render_values(Duration::from_secs(30)));
    }

    #[test]
    fn render_zero_elapsed() {
        let cs = CountSummary::new(&Metric::counter("hits", 10)).unwrap();
        assert_eq!("10\t0.000000/s", cs.render_values(Duration::from_secs(0)));
    }

    #[test]
    fn sum_is_order_independent() {
        fn inner(vals: Vec<i32>) -> TestResult {
            if vals.is_empty() {
                return TestResult::discard();
            }
            let expected: i64 = vals.iter().map(|v| i64::from(*v)).sum();

            let mut forward: Option<CountSummary> = None;
            for v in &vals {
                let m = Metric::counter("c", i64::from(*v));
                match forward {
                    Some(ref mut cs) => cs.add_value(&m).unwrap(),
                    None => forward = Some(CountSummary::new(&m).unwrap()),
                }
            }
            let mut backward: Option<CountSummary> = None;
            for v in vals.iter().rev() {
                let m = Metric::counter("c", i64::from(*v));
                match backward {
                    Some(ref mut cs) => cs.add_value(&m).unwrap(),
                    None => backward = Some(CountSummary::new(&m).unwrap()),
                }
            }

            assert_eq!(Some(expected), forward.map(|cs| cs.sum()));
            assert_eq!(Some(expected), backward.map(|cs| cs.sum()));
            TestResult::passed()
        }
        QuickCheck::new()
            .tests(1000)
            .max_tests(10000)
            .quickcheck(inner as fn(Vec<i32>) -> TestResult);
    }
}
