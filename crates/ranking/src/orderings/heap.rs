//! Heap ordering.
//!
//! Every key goes into a max-heap keyed by `(experience, Reverse(id))` and is
//! extracted in turn: highest experience first, and among equal experience
//! the smaller id first.

use crate::types::RankKey;
use data_loader::RecordId;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Order by descending experience, ties broken by ascending id
pub fn heap_order(keys: &[RankKey]) -> Vec<RankKey> {
    let mut heap: BinaryHeap<(u32, Reverse<RecordId>)> = keys
        .iter()
        .map(|key| (key.experience, Reverse(key.id)))
        .collect();

    let mut ordered = Vec::with_capacity(keys.len());
    while let Some((experience, Reverse(id))) = heap.pop() {
        ordered.push(RankKey::new(id, experience));
    }
    ordered
}
