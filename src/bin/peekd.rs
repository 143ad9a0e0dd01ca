#![allow(unknown_lints)]

extern crate chrono;
extern crate fern;
extern crate peekd;

#[macro_use]
extern crate log;

use chrono::Utc;
use peekd::collector::Collector;
use peekd::source::{FlushTimer, Source, Statsd};
use peekd::util;
use std::io;
use std::process;
use std::thread;

fn main() {
    let args = match peekd::config::parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    let level = match args.verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    // stdout carries the report, so logs go to stderr
    let logging = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}][{}][{}] {}",
                record.module_path().unwrap_or("peekd"),
                record.line().unwrap_or(0),
                Utc::now().to_rfc3339(),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(io::stderr())
        .apply();
    if let Err(e) = logging {
        eprintln!("could not set up logging: {}", e);
        process::exit(1);
    }

    info!("peekd - {}", args.version);

    let (send, recv) = util::channel();

    let mut statsd = match Statsd::bind(send.clone(), &args.statsd_config()) {
        Ok(statsd) => statsd,
        Err(e) => {
            error!("could not bind {}:{}: {}", args.host, args.port, e);
            process::exit(1);
        }
    };
    let mut flush = FlushTimer::new(send, args.interval);

    info!(
        "listening on {}:{} and dumping every {}s",
        args.host,
        args.port,
        flush.interval().as_secs()
    );

    thread::spawn(move || statsd.run());
    thread::spawn(move || flush.run());

    let mut collector = Collector::new(args.interval);
    collector.run(&recv, io::stdout());
}
