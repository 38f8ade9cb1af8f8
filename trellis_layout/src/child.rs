// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-child view a strategy reads and writes, plus shared measurement helpers.

use crate::geometry::{Margin, Rect, Size};
use crate::types::Orientation;

/// One direct child of a container, as seen by a layout strategy.
///
/// Strategies read everything and write only [`LayoutChild::bounds`], and only
/// for visible children. `key` identifies the child in a strategy's per-child
/// tables (dock side, grid cell, flex settings); the tree uses its node handle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutChild<K> {
    /// Stable identity of the child.
    pub key: K,
    /// Current bounds in the container's local space. Input and output.
    pub bounds: Rect,
    /// Space reserved around the child.
    pub margin: Margin,
    /// Lower clamp for the preferred size.
    pub min_size: Size,
    /// Upper clamp for the preferred size.
    pub max_size: Size,
    /// Invisible children take no space and keep their bounds.
    pub visible: bool,
}

impl<K> LayoutChild<K> {
    /// A visible child with no margin and unbounded size limits.
    pub const fn new(key: K, bounds: Rect) -> Self {
        Self {
            key,
            bounds,
            margin: Margin::ZERO,
            min_size: Size::ZERO,
            max_size: Size::UNBOUNDED,
            visible: true,
        }
    }

    /// Builder-style margin.
    #[must_use]
    pub const fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    /// Builder-style minimum size.
    #[must_use]
    pub const fn with_min_size(mut self, min_size: Size) -> Self {
        self.min_size = min_size;
        self
    }

    /// Builder-style maximum size.
    #[must_use]
    pub const fn with_max_size(mut self, max_size: Size) -> Self {
        self.max_size = max_size;
        self
    }

    /// Builder-style visibility.
    #[must_use]
    pub const fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// The child's current extent clamped into `[min_size, max_size]`.
    pub fn preferred_size(&self) -> Size {
        self.bounds
            .size()
            .clamp_between(self.min_size, self.max_size)
    }

    /// Total margin per axis.
    pub const fn margin_size(&self) -> Size {
        Size::new(self.margin.horizontal(), self.margin.vertical())
    }

    /// Preferred extent plus margin on the main and cross axes of `orientation`.
    pub(crate) fn outer_extents(&self, orientation: Orientation) -> (i32, i32) {
        let size = self.preferred_size();
        let (mb, ma) = orientation.main_margins(self.margin);
        let (cb, ca) = orientation.cross_margins(self.margin);
        (
            orientation.main(size).saturating_add(mb).saturating_add(ma),
            orientation.cross(size).saturating_add(cb).saturating_add(ca),
        )
    }

    /// Store a computed rectangle, clamping negative extents to zero.
    pub(crate) fn assign(&mut self, rect: Rect) {
        self.bounds = rect.clamped();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preferred_size_applies_limits() {
        let child = LayoutChild::new((), Rect::new(5, 5, 10, 300))
            .with_min_size(Size::new(20, 0))
            .with_max_size(Size::new(100, 200));
        assert_eq!(child.preferred_size(), Size::new(20, 200));
    }

    #[test]
    fn outer_extents_include_margin() {
        let child =
            LayoutChild::new((), Rect::new(0, 0, 30, 10)).with_margin(Margin::new(1, 2, 3, 4));
        assert_eq!(child.outer_extents(Orientation::Horizontal), (34, 16));
        assert_eq!(child.outer_extents(Orientation::Vertical), (16, 34));
        assert_eq!(child.margin_size(), Size::new(4, 6));
    }

    #[test]
    fn assign_clamps() {
        let mut child = LayoutChild::new((), Rect::ZERO);
        child.assign(Rect::new(3, 4, -10, 5));
        assert_eq!(child.bounds, Rect::new(3, 4, 0, 5));
    }
}
