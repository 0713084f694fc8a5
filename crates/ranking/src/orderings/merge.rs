//! Merge ordering.
//!
//! Top-down merge sort over index ranges. The left half of a range is
//! `[lo, lo + len / 2)`; on equal experience the left element is taken
//! first.

use crate::types::RankKey;

/// Order by descending experience, ties resolved by the midpoint split
pub fn merge_order(keys: &[RankKey]) -> Vec<RankKey> {
    let mut items = keys.to_vec();
    let mut scratch = Vec::with_capacity(items.len());
    let len = items.len();
    sort_range(&mut items, &mut scratch, 0, len);
    items
}

fn sort_range(items: &mut [RankKey], scratch: &mut Vec<RankKey>, lo: usize, hi: usize) {
    if hi - lo <= 1 {
        return;
    }
    let mid = lo + (hi - lo) / 2;
    sort_range(items, scratch, lo, mid);
    sort_range(items, scratch, mid, hi);
    merge_halves(items, scratch, lo, mid, hi);
}

fn merge_halves(
    items: &mut [RankKey],
    scratch: &mut Vec<RankKey>,
    lo: usize,
    mid: usize,
    hi: usize,
) {
    scratch.clear();
    let (mut left, mut right) = (lo, mid);

    while left < mid && right < hi {
        if items[left].experience >= items[right].experience {
            scratch.push(items[left]);
            left += 1;
        } else {
            scratch.push(items[right]);
            right += 1;
        }
    }
    scratch.extend_from_slice(&items[left..mid]);
    scratch.extend_from_slice(&items[right..hi]);

    items[lo..hi].copy_from_slice(&scratch[..]);
}
