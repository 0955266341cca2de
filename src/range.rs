//! Scaling of the visual map: metric range across directories and slots per entry.

use crate::node::{Entry, Metric};

/// Largest metric value among `dirs` (`u64::MIN` when there are none).
pub fn max_of(dirs: &[Entry], metric: Metric) -> u64 {
    dirs.iter()
        .fold(u64::MIN, |max, entry| max.max(entry.metric(metric)))
}

/// Smallest metric value among `dirs` (`u64::MAX` when there are none).
pub fn min_of(dirs: &[Entry], metric: Metric) -> u64 {
    dirs.iter()
        .fold(u64::MAX, |min, entry| min.min(entry.metric(metric)))
}

/// Metric units represented by one slot of a map `slots` wide.
///
/// Returns 0 when there is nothing to scale: no directories, no slots, or a
/// range narrower than the map.
pub fn unit_per_slot(dirs: &[Entry], metric: Metric, slots: usize) -> u64 {
    if dirs.is_empty() || slots == 0 {
        return 0;
    }
    let range = max_of(dirs, metric).saturating_sub(min_of(dirs, metric));
    range / slots as u64
}

/// Number of filled slots for `value`, never more than `slots`.
///
/// A zero unit yields an empty map rather than a division fault.
pub fn filled_slots(value: u64, unit: u64, slots: usize) -> usize {
    if unit == 0 {
        return 0;
    }
    (value / unit).min(slots as u64) as usize
}
