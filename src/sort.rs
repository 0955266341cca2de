//! Ordering of directory entries for display.

use crate::cli::SortKey;
use crate::node::{Entry, Metric};
use std::cmp::Ordering;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Ascending,
    Descending,
}

impl Order {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Order::Ascending => ordering,
            Order::Descending => ordering.reverse(),
        }
    }
}

/// Compare names ignoring case, falling back to the exact name so the order is total.
fn cmp_names(a: &Entry, b: &Entry) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.name.cmp(&b.name))
}

/// Order entries by a numeric metric; equal values are ordered by name.
///
/// Descending is the exact reverse of ascending, ties included.
pub fn sort_by_value(entries: &[Entry], metric: Metric, order: Order) -> Vec<Entry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| {
        order.apply(
            a.metric(metric)
                .cmp(&b.metric(metric))
                .then_with(|| cmp_names(a, b)),
        )
    });
    sorted
}

/// Order entries by name, ignoring case.
pub fn sort_by_name(entries: &[Entry], order: Order) -> Vec<Entry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| order.apply(cmp_names(a, b)));
    sorted
}

/// Order entries for the report: sizes and file counts largest first, names A to Z.
/// `reverse` flips the direction.
pub fn ranked(entries: &[Entry], key: SortKey, reverse: bool) -> Vec<Entry> {
    let (natural, flipped) = match key {
        SortKey::Name => (Order::Ascending, Order::Descending),
        SortKey::Size | SortKey::Files => (Order::Descending, Order::Ascending),
    };
    let order = if reverse { flipped } else { natural };

    match key {
        SortKey::Size => sort_by_value(entries, Metric::Size, order),
        SortKey::Files => sort_by_value(entries, Metric::Files, order),
        SortKey::Name => sort_by_name(entries, order),
    }
}
