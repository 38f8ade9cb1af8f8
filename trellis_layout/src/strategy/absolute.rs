// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::child::LayoutChild;
use crate::geometry::{Padding, Size};
use crate::strategy::LayoutStrategy;
use crate::types::ContainerFrame;

/// Leaves children where they were put.
///
/// Measurement is the bounding box of the visible children (including their
/// right/bottom margins) plus the container's right/bottom padding.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct AbsoluteLayout;

impl<K> LayoutStrategy<K> for AbsoluteLayout {
    fn apply(&self, _frame: ContainerFrame, _children: &mut [LayoutChild<K>]) {}

    fn measure(&self, padding: Padding, children: &[LayoutChild<K>]) -> Size {
        let mut visible = children.iter().filter(|c| c.visible).peekable();
        if visible.peek().is_none() {
            return Size::ZERO;
        }
        let (right, bottom) = visible.fold((0, 0), |(r, b), c| {
            (
                r.max(c.bounds.right() + c.margin.right),
                b.max(c.bounds.bottom() + c.margin.bottom),
            )
        });
        Size::new(right + padding.right, bottom + padding.bottom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Margin, Rect};

    #[test]
    fn apply_keeps_bounds() {
        let mut children = [LayoutChild::new(1_u8, Rect::new(7, 8, 9, 10))];
        AbsoluteLayout.apply(ContainerFrame::default(), &mut children);
        assert_eq!(children[0].bounds, Rect::new(7, 8, 9, 10));
    }

    #[test]
    fn measure_is_bounding_box_plus_trailing_padding() {
        let children = [
            LayoutChild::new(1_u8, Rect::new(10, 10, 50, 20)).with_margin(Margin::all(5)),
            LayoutChild::new(2, Rect::new(0, 40, 20, 20)),
            LayoutChild::new(3, Rect::new(500, 500, 10, 10)).with_visible(false),
        ];
        let size = AbsoluteLayout.measure(Padding::new(100, 100, 3, 4), &children);
        assert_eq!(size, Size::new(65 + 3, 60 + 4));
    }
}
