use metric;
use protocols::statsd::parse_statsd;
use source::Source;
use std::io;
use std::net::{SocketAddr, UdpSocket};
use std::str;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use util;

lazy_static! {
    /// Datagrams in which every line decoded.
    pub static ref STATSD_GOOD_PACKET: Arc<AtomicUsize> = Arc::new(AtomicUsize::new(0));
    /// Datagrams with at least one line that failed to decode, or that were
    /// not UTF-8 at all.
    pub static ref STATSD_BAD_PACKET: Arc<AtomicUsize> = Arc::new(AtomicUsize::new(0));
}

/// Largest possible UDP payload.
const RECV_BUFFER_BYTES: usize = 65_535;

/// Configuration for the statsd source.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsdConfig {
    /// The host for the statsd protocol to bind to.
    pub host: String,
    /// The port for the statsd source to listen on.
    pub port: u16,
}

impl Default for StatsdConfig {
    fn default() -> StatsdConfig {
        StatsdConfig {
            host: "127.0.0.1".to_string(),
            port: 8125,
        }
    }
}

/// The statsd source
///
/// Listens on a UDP socket. Every datagram is split on whitespace and each
/// field decoded as one statsd line. Decoded metrics are handed to the
/// collector in the order they appear; lines that fail to decode are logged
/// and skipped without affecting their neighbours.
pub struct Statsd {
    chans: util::Channel,
    socket: UdpSocket,
}

impl Statsd {
    /// Bind the statsd socket.
    ///
    /// # Errors
    ///
    /// Fails if the host does not resolve or the address cannot be bound.
    pub fn bind(chans: util::Channel, config: &StatsdConfig) -> io::Result<Statsd> {
        let socket = UdpSocket::bind((config.host.as_str(), config.port))?;
        Ok(Statsd {
            chans: chans,
            socket: socket,
        })
    }

    /// The address actually bound, useful when binding port 0.
    ///
    /// # Errors
    ///
    /// See `std::net::UdpSocket::local_addr`.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }
}

/// Decode one datagram and send its metrics on. Returns false once the
/// collector has hung up.
fn handle_packet(chans: &util::Channel, payload: &[u8]) -> bool {
    let val = match str::from_utf8(payload) {
        Ok(val) => val,
        Err(e) => {
            STATSD_BAD_PACKET.fetch_add(1, Ordering::Relaxed);
            error!("Payload not valid UTF-8: {:?}", e);
            return true;
        }
    };
    let mut bad_lines = 0;
    for line in val.split_whitespace() {
        match parse_statsd(line) {
            Ok(m) => {
                if !util::send(chans, metric::Event::Telemetry(m)) {
                    return false;
                }
            }
            Err(e) => {
                bad_lines += 1;
                error!("BAD LINE: {:?} -> {}", line, e);
            }
        }
    }
    if bad_lines > 0 {
        STATSD_BAD_PACKET.fetch_add(1, Ordering::Relaxed);
    } else {
        STATSD_GOOD_PACKET.fetch_add(1, Ordering::Relaxed);
    }
    trace!(
        "statsd packets good: {} bad: {}",
        STATSD_GOOD_PACKET.load(Ordering::Relaxed),
        STATSD_BAD_PACKET.load(Ordering::Relaxed)
    );
    true
}

impl Source for Statsd {
    fn run(&mut self) {
        let mut buf = vec![0; RECV_BUFFER_BYTES];
        loop {
            let len = match self.socket.recv_from(&mut buf) {
                Ok((len, _)) => len,
                Err(e) => {
                    error!("Could not read UDP socket with error {:?}", e);
                    continue;
                }
            };
            if !handle_packet(&self.chans, &buf[..len]) {
                debug!("collector hung up, statsd source stopping");
                return;
            }
        }
    }
}
