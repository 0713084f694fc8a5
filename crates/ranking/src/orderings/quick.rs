//! Quick ordering.
//!
//! Three-way quicksort over index ranges. The pivot value is the experience
//! of the middle element (`lo + len / 2`) of the current range. Each range is
//! partitioned into greater, equal and less groups, every group keeping its
//! relative input order; only the greater and less groups are sorted further.

use crate::types::RankKey;

/// Order by descending experience, tied keys kept in input order
pub fn quick_order(keys: &[RankKey]) -> Vec<RankKey> {
    let mut items = keys.to_vec();
    let mut scratch = Vec::with_capacity(items.len());

    // Sub-ranges are disjoint, so processing order does not matter
    let mut pending = vec![(0, items.len())];
    while let Some((lo, hi)) = pending.pop() {
        if hi - lo <= 1 {
            continue;
        }
        let pivot = items[lo + (hi - lo) / 2].experience;
        let (greater_end, equal_end) = partition_three_way(&mut items[lo..hi], &mut scratch, pivot);
        pending.push((lo, lo + greater_end));
        pending.push((lo + equal_end, hi));
    }

    items
}

/// Stable three-way partition of `range` around `pivot`.
///
/// Returns the end of the greater group and the end of the equal group,
/// both relative to the start of `range`.
fn partition_three_way(
    range: &mut [RankKey],
    scratch: &mut Vec<RankKey>,
    pivot: u32,
) -> (usize, usize) {
    scratch.clear();
    scratch.extend(range.iter().filter(|key| key.experience > pivot));
    let greater_end = scratch.len();
    scratch.extend(range.iter().filter(|key| key.experience == pivot));
    let equal_end = scratch.len();
    scratch.extend(range.iter().filter(|key| key.experience < pivot));

    range.copy_from_slice(&scratch[..]);
    (greater_end, equal_end)
}
