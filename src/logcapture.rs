//! Records log lines emitted on the current thread, for tests that assert on
//! diagnostics.

use log::{self, Level, Log, Metadata, Record};
use std::cell::RefCell;
use std::sync::Once;

struct Capture;

static LOGGER: Capture = Capture;
static INIT: Once = Once::new();

thread_local! {
    static LINES: RefCell<Option<Vec<(Level, String)>>> = RefCell::new(None);
}

impl Log for Capture {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        LINES.with(|lines| {
            if let Some(ref mut lines) = *lines.borrow_mut() {
                lines.push((record.level(), format!("{}", record.args())));
            }
        });
    }

    fn flush(&self) {}
}

/// Run `f`, returning every line it logged on this thread.
pub fn capture<F: FnOnce()>(f: F) -> Vec<(Level, String)> {
    INIT.call_once(|| {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(log::LevelFilter::Trace);
        }
    });
    LINES.with(|lines| *lines.borrow_mut() = Some(Vec::new()));
    f();
    LINES.with(|lines| lines.borrow_mut().take().unwrap_or_default())
}
