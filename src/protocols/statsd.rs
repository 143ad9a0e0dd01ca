//! Decoding of the statsd line protocol, with dogstatsd style tags.

use metric::{Metric, MetricKind, TagMap, Value};
use std::error;
use std::fmt;
use std::str::FromStr;

/// Reasons a statsd line could not be decoded.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// Nothing before the `:`.
    EmptyName,
    /// No `:<value>` after the name.
    MissingValue,
    /// No `|<type>` after the value.
    MissingKind,
    /// A type token peekd does not know.
    UnknownKind(String),
    /// The value does not parse for the metric type. Counters must be whole
    /// numbers, everything else a finite float.
    InvalidValue(String),
    /// The `@` section is not a finite float in (0, 1].
    InvalidSampleRate(String),
    /// A trailing `|` section that is neither `@rate` nor `#tags`.
    UnknownSection(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::EmptyName => f.write_str("metric name is empty"),
            Error::MissingValue => f.write_str("missing ':<value>'"),
            Error::MissingKind => f.write_str("missing '|<type>'"),
            Error::UnknownKind(ref k) => write!(f, "unknown metric type {:?}", k),
            Error::InvalidValue(ref v) => write!(f, "invalid value {:?}", v),
            Error::InvalidSampleRate(ref r) => write!(f, "invalid sample rate {:?}", r),
            Error::UnknownSection(ref s) => write!(f, "unknown section {:?}", s),
        }
    }
}

impl error::Error for Error {}

/// The value every set line decodes to, one member seen.
pub const SET_MEMBER: f64 = 1.0;

fn parse_value(kind: MetricKind, src: &str) -> Result<Value, Error> {
    match kind {
        MetricKind::Counter => i64::from_str(src)
            .map(Value::Integer)
            .map_err(|_| Error::InvalidValue(src.to_string())),
        // set members are identities, user ids and the like, never magnitudes
        MetricKind::Set => Ok(Value::Float(SET_MEMBER)),
        _ => match f64::from_str(src) {
            Ok(f) if f.is_finite() => Ok(Value::Float(f)),
            _ => Err(Error::InvalidValue(src.to_string())),
        },
    }
}

fn parse_sample_rate(src: &str) -> Result<f64, Error> {
    match f64::from_str(src) {
        Ok(r) if r > 0.0 && r <= 1.0 => Ok(r),
        _ => Err(Error::InvalidSampleRate(src.to_string())),
    }
}

fn parse_tags(src: &str, tags: &mut TagMap) {
    for tag in src.split(',').filter(|t| !t.is_empty()) {
        match tag.find(':') {
            Some(idx) => {
                tags.insert(tag[..idx].to_string(), tag[(idx + 1)..].to_string());
            }
            None => {
                tags.insert(tag.to_string(), String::new());
            }
        }
    }
}

/// Decode a single statsd line.
///
/// Valid lines are:
///
/// - `<str:metric_name>:<value>|<str:type>`
/// - `<str:metric_name>:<value>|<str:type>|@<f64:sample_rate>`
/// - `<str:metric_name>:<value>|<str:type>|#<tag>,<tag>`
/// - `<str:metric_name>:<value>|<str:type>|@<f64:sample_rate>|#<tag>,<tag>`
///
/// where a tag is `key:value` or a bare `key`, and type is one of `c`, `g`,
/// `ms`, `ts`, `h`, `s` or `d`. Counter values are `i64`. A set member may be
/// any text and decodes to `SET_MEMBER`. Every other value is `f64`. The
/// sample rate is kept as given; it does not scale the value.
///
/// # Examples
///
/// ```
/// use peekd::metric::{MetricKind, Value};
/// use peekd::protocols::statsd::parse_statsd;
///
/// let m = parse_statsd("api.hits:3|c|@0.5|#route:users").unwrap();
/// assert_eq!("api.hits", m.name());
/// assert_eq!(MetricKind::Counter, m.kind());
/// assert_eq!(Value::Integer(3), m.value());
/// assert_eq!(Some("users"), m.tags().get("route"));
/// ```
///
/// # Errors
///
/// See `Error` for the reasons a line is rejected.
pub fn parse_statsd(src: &str) -> Result<Metric, Error> {
    let mut sections = src.split('|');
    let head = sections.next().unwrap_or("");
    let colon_idx = match head.find(':') {
        Some(idx) => idx,
        None => return Err(Error::MissingValue),
    };
    let name = &head[..colon_idx];
    if name.is_empty() {
        return Err(Error::EmptyName);
    }
    let raw_value = &head[(colon_idx + 1)..];
    if raw_value.is_empty() {
        return Err(Error::MissingValue);
    }

    let kind = match sections.next() {
        None | Some("") => return Err(Error::MissingKind),
        Some(token) => match MetricKind::from_token(token) {
            Some(kind) => kind,
            None => return Err(Error::UnknownKind(token.to_string())),
        },
    };
    let value = parse_value(kind, raw_value)?;

    let mut sample_rate = 1.0;
    let mut tags = TagMap::default();
    for section in sections {
        if section.starts_with('@') {
            sample_rate = parse_sample_rate(&section[1..])?;
        } else if section.starts_with('#') {
            parse_tags(&section[1..], &mut tags);
        } else {
            return Err(Error::UnknownSection(section.to_string()));
        }
    }

    let metric = Metric::new(name, kind, value)
        .map_err(|_| Error::InvalidValue(raw_value.to_string()))?;
    Ok(metric.set_sample_rate(sample_rate).set_tags(tags))
}

#[cfg(test)]
mod tests {
    use super::*;
    use metric::{MetricKind, Value};
    use quickcheck::{QuickCheck, TestResult};

    #[test]
    fn test_parse_statsd_every_kind() {
        let cases = [
            ("a:1|c", MetricKind::Counter, Value::Integer(1)),
            ("a:-2|c", MetricKind::Counter, Value::Integer(-2)),
            ("a:+3|c", MetricKind::Counter, Value::Integer(3)),
            ("a:1.5|g", MetricKind::Gauge, Value::Float(1.5)),
            ("a:-1.5|g", MetricKind::Gauge, Value::Float(-1.5)),
            ("a:12|ms", MetricKind::Timer, Value::Float(12.0)),
            ("a:12|ts", MetricKind::LegacyTimer, Value::Float(12.0)),
            ("a:3.3|h", MetricKind::Histogram, Value::Float(3.3)),
            ("a:42|s", MetricKind::Set, Value::Float(SET_MEMBER)),
            ("a:0.5|d", MetricKind::Distribution, Value::Float(0.5)),
        ];
        for &(line, kind, value) in &cases {
            let m = parse_statsd(line).unwrap();
            assert_eq!("a", m.name());
            assert_eq!(kind, m.kind(), "{}", line);
            assert_eq!(value, m.value(), "{}", line);
            assert_eq!(1.0, m.sample_rate());
            assert!(m.tags().is_empty());
        }
    }

    #[test]
    fn test_parse_statsd_set_members_are_text() {
        for line in &["users.unique:alice|s", "users.unique:user-42|s", "users.unique:42|s"] {
            match parse_statsd(line) {
                Ok(m) => {
                    assert_eq!("users.unique", m.name());
                    assert_eq!(MetricKind::Set, m.kind());
                    assert_eq!(Value::Float(SET_MEMBER), m.value());
                }
                Err(e) => panic!("{}: {}", line, e),
            }
        }
        let m = parse_statsd("users.unique:bob|s|#env:dev").unwrap();
        assert_eq!(Some("dev"), m.tags().get("env"));
        assert_eq!(Err(Error::MissingValue), parse_statsd("users.unique:|s"));
    }

    #[test]
    fn test_parse_statsd_sample_rate_does_not_scale() {
        let m = parse_statsd("fvth:5|c|@0.1").unwrap();
        assert_eq!(Value::Integer(5), m.value());
        assert_eq!(0.1, m.sample_rate());
    }

    #[test]
    fn test_parse_statsd_tags() {
        let m = parse_statsd("page.views:1|c|#region:us-east,canary,env:prod").unwrap();
        assert_eq!(3, m.tags().len());
        assert_eq!(Some("us-east"), m.tags().get("region"));
        assert_eq!(Some(""), m.tags().get("canary"));
        assert_eq!(Some("prod"), m.tags().get("env"));
        assert_eq!("canary:,env:prod,region:us-east", format!("{}", m.tags()));
    }

    #[test]
    fn test_parse_statsd_tag_value_with_colon() {
        let m = parse_statsd("a:1|g|#url:http://x").unwrap();
        assert_eq!(Some("http://x"), m.tags().get("url"));
    }

    #[test]
    fn test_parse_statsd_sections_any_order() {
        let m = parse_statsd("db.query:12.5|ms|#table:users|@0.25").unwrap();
        assert_eq!(0.25, m.sample_rate());
        assert_eq!(Some("users"), m.tags().get("table"));
    }

    #[test]
    fn test_parse_statsd_errors() {
        let cases = [
            ("", Error::MissingValue),
            ("foo", Error::MissingValue),
            ("foo:", Error::MissingValue),
            ("foo:|c", Error::MissingValue),
            (":1|c", Error::EmptyName),
            ("foo:1", Error::MissingKind),
            ("foo:1|", Error::MissingKind),
            ("foo:1|x", Error::UnknownKind("x".to_string())),
            ("foo:1.5|c", Error::InvalidValue("1.5".to_string())),
            ("foo:abc|g", Error::InvalidValue("abc".to_string())),
            ("foo:inf|g", Error::InvalidValue("inf".to_string())),
            ("foo:NaN|ms", Error::InvalidValue("NaN".to_string())),
            ("foo:1|c|@", Error::InvalidSampleRate("".to_string())),
            ("foo:1|c|@0", Error::InvalidSampleRate("0".to_string())),
            ("foo:1|c|@1.5", Error::InvalidSampleRate("1.5".to_string())),
            ("foo:1|c|@x", Error::InvalidSampleRate("x".to_string())),
            ("foo:1|c|T1656581400", Error::UnknownSection("T1656581400".to_string())),
        ];
        for &(line, ref err) in &cases {
            assert_eq!(Err(err.clone()), parse_statsd(line), "{:?}", line);
        }
    }

    #[test]
    fn test_parse_statsd_never_panics() {
        fn inner(line: String) -> TestResult {
            let _ = parse_statsd(&line);
            TestResult::passed()
        }
        QuickCheck::new()
            .tests(10000)
            .max_tests(100000)
            .quickcheck(inner as fn(String) -> TestResult);
    }
}
