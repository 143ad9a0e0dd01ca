use chrono::Utc;
use metric;
use source::Source;
use std::thread::sleep;
use std::time::Duration;
use util;

/// The source of all flush pulses. See `FlushTimer::run` for more details.
pub struct FlushTimer {
    chans: util::Channel,
    interval: Duration,
}

impl FlushTimer {
    /// Create a new FlushTimer firing every `interval` seconds, zero meaning
    /// the default. This will not produce a new thread, that must be managed
    /// by the end-user.
    pub fn new(chans: util::Channel, interval: u64) -> FlushTimer {
        FlushTimer {
            chans: chans,
            interval: util::flush_interval(interval),
        }
    }

    /// The time between pulses.
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Source for FlushTimer {
    /// Sleep for the interval, then send a `TimerFlush` stamped with the
    /// current wall clock time. The hand-off blocks until the collector is
    /// ready, so a slow flush delays the next pulse rather than queueing it.
    fn run(&mut self) {
        loop {
            sleep(self.interval);
            if !util::send(&self.chans, metric::Event::TimerFlush(Utc::now())) {
                debug!("collector hung up, flush timer stopping");
                return;
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::mpsc;
    use std::thread;

    #[test]
    fn zero_interval_uses_default() {
        let (snd, _rcv) = mpsc::sync_channel(1);
        assert_eq!(Duration::from_secs(30), FlushTimer::new(snd, 0).interval());
    }

    #[test]
    fn pulses_then_stops_when_hung_up() {
        let (snd, rcv) = mpsc::sync_channel(0);
        let mut timer = FlushTimer::new(snd, 1);
        let worker = thread::spawn(move || timer.run());

        match rcv.recv_timeout(Duration::from_secs(5)) {
            Ok(metric::Event::TimerFlush(_)) => {}
            other => panic!("expected a flush pulse, got {:?}", other),
        }
        drop(rcv);
        worker.join().unwrap();
    }
}
