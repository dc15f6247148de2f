//! Network interface counter snapshots from /proc/net/dev.
//!
//! One snapshot is one point-in-time reading of the cumulative counters of
//! every interface on the host.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::error::{Result, WakeguardError};

/// Cumulative counters for one interface, one row of `/proc/net/dev`.
///
/// All counters are monotonically non-decreasing between samples except for
/// wraparound at `u64::MAX`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InterfaceCounters {
    pub rx_bytes: u64,
    pub rx_packets: u64,
    pub rx_errors: u64,
    pub rx_dropped: u64,
    pub rx_fifo: u64,
    pub rx_frame: u64,
    pub rx_compressed: u64,
    pub rx_multicast: u64,
    pub tx_bytes: u64,
    pub tx_packets: u64,
    pub tx_errors: u64,
    pub tx_dropped: u64,
    pub tx_fifo: u64,
    pub tx_collisions: u64,
    pub tx_carrier: u64,
    pub tx_compressed: u64,
}

/// Point-in-time counters for all interfaces, keyed by interface name.
pub type InterfaceSnapshot = HashMap<String, InterfaceCounters>;

/// Source of interface counter snapshots.
///
/// The daemon core only talks to this trait, so tests can feed scripted
/// snapshots without touching the real procfs.
pub trait MetricsSource {
    fn read_snapshot(&mut self) -> Result<InterfaceSnapshot>;
}

/// Reads interface counters from `/proc/net/dev`.
pub struct ProcNetDev {
    path: PathBuf,
}

impl ProcNetDev {
    pub fn new() -> Self {
        Self {
            path: PathBuf::from("/proc/net/dev"),
        }
    }

    /// Read from an alternate path instead of the real procfs entry.
    pub fn with_path<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl Default for ProcNetDev {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsSource for ProcNetDev {
    fn read_snapshot(&mut self) -> Result<InterfaceSnapshot> {
        let contents = fs::read_to_string(&self.path)?;
        parse_net_dev(&contents)
    }
}

// name: + 8 rx fields + 8 tx fields
const NET_DEV_FIELDS: usize = 17;

/// Parse the contents of `/proc/net/dev` into a snapshot.
///
/// The first two lines are column headers and are skipped. A row with missing
/// fields or a counter that is not a valid unsigned integer is an error, not a
/// row to skip: a corrupt counter table means the host environment broke an
/// assumption this daemon relies on.
pub fn parse_net_dev(contents: &str) -> Result<InterfaceSnapshot> {
    let mut snapshot = InterfaceSnapshot::new();

    for line in contents.lines().skip(2) {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        if fields.len() < NET_DEV_FIELDS {
            return Err(WakeguardError::malformed_sample(format!(
                "interface row has {} fields, expected {}: {:?}",
                fields.len(),
                NET_DEV_FIELDS,
                line
            )));
        }

        let name = fields[0].trim_end_matches(':').to_string();
        let counters = InterfaceCounters {
            rx_bytes: parse_counter(&name, "rx_bytes", fields[1])?,
            rx_packets: parse_counter(&name, "rx_packets", fields[2])?,
            rx_errors: parse_counter(&name, "rx_errors", fields[3])?,
            rx_dropped: parse_counter(&name, "rx_dropped", fields[4])?,
            rx_fifo: parse_counter(&name, "rx_fifo", fields[5])?,
            rx_frame: parse_counter(&name, "rx_frame", fields[6])?,
            rx_compressed: parse_counter(&name, "rx_compressed", fields[7])?,
            rx_multicast: parse_counter(&name, "rx_multicast", fields[8])?,
            tx_bytes: parse_counter(&name, "tx_bytes", fields[9])?,
            tx_packets: parse_counter(&name, "tx_packets", fields[10])?,
            tx_errors: parse_counter(&name, "tx_errors", fields[11])?,
            tx_dropped: parse_counter(&name, "tx_dropped", fields[12])?,
            tx_fifo: parse_counter(&name, "tx_fifo", fields[13])?,
            tx_collisions: parse_counter(&name, "tx_collisions", fields[14])?,
            tx_carrier: parse_counter(&name, "tx_carrier", fields[15])?,
            tx_compressed: parse_counter(&name, "tx_compressed", fields[16])?,
        };

        snapshot.insert(name, counters);
    }

    Ok(snapshot)
}

fn parse_counter(interface: &str, column: &str, field: &str) -> Result<u64> {
    field.parse::<u64>().map_err(|_| {
        WakeguardError::malformed_sample(format!(
            "{interface}: {column} is not an unsigned integer: {field:?}"
        ))
    })
}
