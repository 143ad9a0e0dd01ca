//! Provides the CLI option parser
//!
//! Used to parse the argv/config file into a struct that the binary can
//! consume and use as configuration data.

use clap::{App, Arg, ArgMatches};
use source::StatsdConfig;
use std::error;
use std::ffi::OsString;
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use toml;
use util;

const VERSION: Option<&'static str> = option_env!("CARGO_PKG_VERSION");

/// Errors from reading configuration.
#[derive(Debug)]
pub enum Error {
    /// The config file could not be read.
    Io(io::Error),
    /// The config file is not TOML.
    Toml(toml::de::Error),
    /// A key held a value of the wrong type or out of range. Carries the key.
    InvalidValue(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Io(ref e) => write!(f, "could not read config file: {}", e),
            Error::Toml(ref e) => write!(f, "could not parse config file: {}", e),
            Error::InvalidValue(key) => write!(f, "invalid value for config key {:?}", key),
        }
    }
}

impl error::Error for Error {}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Error {
        Error::Io(e)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Error {
        Error::Toml(e)
    }
}

/// Configuration for the peekd executable
///
/// Built by `parse_args` from the command line and, optionally, a config
/// file.
#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    /// The host the statsd socket binds to.
    pub host: String,
    /// The UDP port the statsd socket listens on.
    pub port: u16,
    /// Seconds between reports. Never zero once parsed.
    pub interval: u64,
    /// The verbosity setting of peekd. The higher the value the more chatty
    /// peekd gets.
    pub verbose: u64,
    /// peekd version string. This is set automatically.
    pub version: String,
}

impl Default for Args {
    fn default() -> Self {
        let statsd = StatsdConfig::default();
        Args {
            host: statsd.host,
            port: statsd.port,
            interval: util::DEFAULT_FLUSH_INTERVAL,
            verbose: 0,
            version: VERSION.unwrap_or("unknown").to_string(),
        }
    }
}

impl Args {
    /// The statsd source configuration these arguments describe.
    pub fn statsd_config(&self) -> StatsdConfig {
        StatsdConfig {
            host: self.host.clone(),
            port: self.port,
        }
    }
}

fn app() -> App<'static, 'static> {
    App::new("peekd")
        .version(VERSION.unwrap_or("unknown"))
        .about("statsd listener that prints a running summary of what it hears")
        .arg(
            Arg::with_name("config-file")
                .long("config")
                .short("C")
                .value_name("config")
                .help("An optional TOML config file.")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("host")
                .long("host")
                .value_name("host")
                .help("The host to bind the statsd socket to. [default: 127.0.0.1]")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("port")
                .long("port")
                .value_name("port")
                .help("The UDP port to listen on. [default: 8125]")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("interval")
                .long("interval")
                .value_name("seconds")
                .help("Seconds between reports. [default: 30]")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("Turn on verbose output."),
        )
}

/// Parse the process arguments.
///
/// Malformed flags print clap's usage message and exit the process.
///
/// # Errors
///
/// Fails if a config file was given and could not be read or parsed.
pub fn parse_args() -> Result<Args, Error> {
    parse_args_from(::std::env::args_os())
}

/// Parse `argv` as though it were the process arguments. The first item is
/// the program name.
///
/// # Errors
///
/// See `parse_args`.
pub fn parse_args_from<I, T>(argv: I) -> Result<Args, Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = app().get_matches_from(argv);

    let verb = if matches.is_present("verbose") {
        matches.occurrences_of("verbose")
    } else {
        0
    };

    let args = match matches.value_of("config-file") {
        Some(filename) => {
            let mut fp = File::open(filename)?;
            let mut buffer = String::new();
            fp.read_to_string(&mut buffer)?;
            parse_config_file(&buffer, verb)?
        }
        None => {
            let mut args = Args::default();
            args.verbose = verb;
            args
        }
    };
    Ok(apply_flags(args, &matches))
}

fn apply_flags(mut args: Args, matches: &ArgMatches) -> Args {
    if let Some(host) = matches.value_of("host") {
        args.host = host.to_string();
    }
    if matches.is_present("port") {
        args.port = value_t!(matches, "port", u16).unwrap_or_else(|e| e.exit());
    }
    if matches.is_present("interval") {
        let secs = value_t!(matches, "interval", u64).unwrap_or_else(|e| e.exit());
        args.interval = util::flush_interval(secs).as_secs();
    }
    args
}

/// Parse the peekd configuration file.
///
/// Every key is optional:
///
/// ```toml
/// host = "0.0.0.0"
/// port = 8125
/// interval = 10
/// ```
///
/// An interval of 0 is taken to mean the default.
///
/// # Errors
///
/// Fails if `buffer` is not TOML or a key has a value of the wrong type.
pub fn parse_config_file(buffer: &str, verbosity: u64) -> Result<Args, Error> {
    let mut args = Args::default();
    let value: toml::Value = toml::from_str(buffer)?;

    args.verbose = verbosity;

    if let Some(host) = value.get("host") {
        args.host = host
            .as_str()
            .ok_or(Error::InvalidValue("host"))?
            .to_string();
    }

    if let Some(port) = value.get("port") {
        let port = port.as_integer().ok_or(Error::InvalidValue("port"))?;
        if port < 1 || port > i64::from(u16::max_value()) {
            return Err(Error::InvalidValue("port"));
        }
        args.port = port as u16;
    }

    if let Some(interval) = value.get("interval") {
        let interval = interval
            .as_integer()
            .ok_or(Error::InvalidValue("interval"))?;
        if interval < 0 {
            return Err(Error::InvalidValue("interval"));
        }
        args.interval = util::flush_interval(interval as u64).as_secs();
    }

    Ok(args)
}
