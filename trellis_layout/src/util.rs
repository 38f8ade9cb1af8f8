// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use smallvec::SmallVec;

use crate::child::LayoutChild;

/// Indices of the visible children, in slice order.
pub(crate) type Visible = SmallVec<[usize; 16]>;

pub(crate) fn visible_indices<K>(children: &[LayoutChild<K>]) -> Visible {
    children
        .iter()
        .enumerate()
        .filter(|(_, c)| c.visible)
        .map(|(i, _)| i)
        .collect()
}

/// Child counts as `i32` for pixel arithmetic.
pub(crate) fn count_i32(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

/// Sum of pixel extents, saturating at `i32::MAX`.
pub(crate) fn sum_extents(extents: impl IntoIterator<Item = i32>) -> i32 {
    extents.into_iter().fold(0, i32::saturating_add)
}

/// Total of the fixed `gap`s between `count` consecutive items.
pub(crate) fn total_gaps(count: usize, gap: i32) -> i32 {
    count_i32(count).saturating_sub(1).max(0).saturating_mul(gap)
}

/// The `weight / total` share of `amount`, truncated toward zero.
///
/// Returns zero when `total` is not positive, so callers never divide by zero.
#[allow(
    clippy::cast_possible_truncation,
    reason = "Proportional shares are truncated to whole pixels by design."
)]
pub(crate) fn share(amount: i32, weight: f32, total: f32) -> i32 {
    if total <= 0.0 {
        return 0;
    }
    (amount as f32 * (weight / total)) as i32
}

/// Split `amount` between `weights` (negative weights count as zero).
///
/// Shares are taken on the running weight sum, so the parts always add up to
/// exactly `amount` when any weight is positive, and are all zero otherwise.
pub(crate) fn distribute(amount: i32, weights: &[f32]) -> SmallVec<[i32; 16]> {
    let total: f32 = weights.iter().map(|w| w.max(0.0)).sum();
    let mut running = 0.0_f32;
    let mut given = 0;
    weights
        .iter()
        .map(|w| {
            running += w.max(0.0);
            let upto = share(amount, running, total);
            let part = upto - given;
            given = upto;
            part
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    #[test]
    fn share_guards_zero_total() {
        assert_eq!(share(100, 1.0, 0.0), 0, "zero weight total");
        assert_eq!(share(400, 2.0, 4.0), 200);
        assert_eq!(share(-150, 1.0, 2.0), -75, "negative amounts truncate toward zero");
        assert_eq!(share(10, 1.0, 3.0), 3);
    }

    #[test]
    fn extent_sums_saturate() {
        assert_eq!(sum_extents([2_000_000_000, 2_000_000_000]), i32::MAX);
        assert_eq!(sum_extents([3, 4]), 7);
        assert_eq!(total_gaps(0, 5), 0, "no items, no gaps");
        assert_eq!(total_gaps(4, 5), 15);
        assert_eq!(total_gaps(usize::MAX, 5), i32::MAX);
    }

    #[test]
    fn distribute_is_exact() {
        assert_eq!(distribute(150, &[1.0, 0.0, 1.0]).as_slice(), &[75, 0, 75]);
        assert_eq!(distribute(400, &[1.0, 2.0, 1.0]).as_slice(), &[100, 200, 100]);
        let parts = distribute(9, &[1.0, 1.0, 8.0]);
        assert_eq!(parts.iter().sum::<i32>(), 9, "no pixel lost to truncation: {parts:?}");
        let parts = distribute(-10, &[1.0, 2.0]);
        assert_eq!(parts.iter().sum::<i32>(), -10, "shrinking is exact too: {parts:?}");
        assert_eq!(
            distribute(50, &[0.0, -1.0]).as_slice(),
            &[0, 0],
            "no positive weight, nothing handed out"
        );
    }

    #[test]
    fn visible_filter_keeps_order() {
        let children = [
            LayoutChild::new(0_u32, Rect::ZERO),
            LayoutChild::new(1, Rect::ZERO).with_visible(false),
            LayoutChild::new(2, Rect::ZERO),
        ];
        assert_eq!(visible_indices(&children).as_slice(), &[0, 2]);
    }
}
