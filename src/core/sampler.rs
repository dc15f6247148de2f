//! Wraparound-safe counter deltas and per-tick traffic aggregation.

use super::netdev::InterfaceSnapshot;

/// Traffic that occurred between two readings of one cumulative counter.
///
/// Kernel interface counters never decrease; they wrap silently at `u64::MAX`.
/// The delta is therefore `current - previous` modulo 2^64, which treats every
/// observed decrease as exactly one wrap.
pub fn counter_delta(previous: u64, current: u64) -> u64 {
    current.wrapping_sub(previous)
}

/// Bytes moved across all interfaces between two snapshots.
///
/// Sums the rx-bytes and tx-bytes deltas of every interface present in both
/// snapshots. An interface present in only one snapshot has no baseline (or no
/// current reading) and contributes nothing; appearing and disappearing
/// interfaces are normal, not errors. The sum saturates rather than wraps, so
/// an absurd combined delta still reads as a burst instead of folding back to
/// quiet.
pub fn aggregate_traffic(previous: &InterfaceSnapshot, current: &InterfaceSnapshot) -> u64 {
    let mut total: u64 = 0;

    for (name, counters) in current {
        if let Some(prev) = previous.get(name) {
            total = total
                .saturating_add(counter_delta(prev.rx_bytes, counters.rx_bytes))
                .saturating_add(counter_delta(prev.tx_bytes, counters.tx_bytes));
        }
    }

    total
}
