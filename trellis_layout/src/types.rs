// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared layout vocabulary: container frames, axes, alignment and distribution.

use crate::geometry::{Margin, Padding, Rect, Size};
use crate::util::count_i32;

/// The geometry a container hands to its strategy.
///
/// Children are positioned in the container's local space: `(0, 0)` is the
/// container's top-left corner, and the usable area is [`ContainerFrame::content`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ContainerFrame {
    /// The container's own bounds (only the extent is used).
    pub bounds: Rect,
    /// Space reserved inside the container around its children.
    pub padding: Padding,
}

impl ContainerFrame {
    /// Create a frame from bounds and padding.
    pub const fn new(bounds: Rect, padding: Padding) -> Self {
        Self { bounds, padding }
    }

    /// The padded content rectangle in local coordinates.
    ///
    /// Extents may be negative when the padding is larger than the container.
    pub const fn content(&self) -> Rect {
        Rect::new(
            self.padding.left,
            self.padding.top,
            self.bounds.width - self.padding.horizontal(),
            self.bounds.height - self.padding.vertical(),
        )
    }
}

/// Direction of child flow for single-axis strategies.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Children flow left to right.
    Horizontal,
    /// Children flow top to bottom.
    #[default]
    Vertical,
}

impl Orientation {
    /// Extent of `size` along the main axis.
    #[inline]
    pub const fn main(self, size: Size) -> i32 {
        match self {
            Self::Horizontal => size.width,
            Self::Vertical => size.height,
        }
    }

    /// Extent of `size` along the cross axis.
    #[inline]
    pub const fn cross(self, size: Size) -> i32 {
        match self {
            Self::Horizontal => size.height,
            Self::Vertical => size.width,
        }
    }

    /// Leading and trailing margin along the main axis.
    #[inline]
    pub(crate) const fn main_margins(self, m: Margin) -> (i32, i32) {
        match self {
            Self::Horizontal => (m.left, m.right),
            Self::Vertical => (m.top, m.bottom),
        }
    }

    /// Leading and trailing margin along the cross axis.
    #[inline]
    pub(crate) const fn cross_margins(self, m: Margin) -> (i32, i32) {
        match self {
            Self::Horizontal => (m.top, m.bottom),
            Self::Vertical => (m.left, m.right),
        }
    }

    /// Origin and extent of `r` as `(main_start, main_len, cross_start, cross_len)`.
    #[inline]
    pub(crate) const fn split(self, r: Rect) -> (i32, i32, i32, i32) {
        match self {
            Self::Horizontal => (r.x, r.width, r.y, r.height),
            Self::Vertical => (r.y, r.height, r.x, r.width),
        }
    }

    /// Build a rectangle from main/cross coordinates.
    #[inline]
    pub(crate) const fn compose(
        self,
        main: i32,
        cross: i32,
        main_len: i32,
        cross_len: i32,
    ) -> Rect {
        match self {
            Self::Horizontal => Rect::new(main, cross, main_len, cross_len),
            Self::Vertical => Rect::new(cross, main, cross_len, main_len),
        }
    }
}

/// Placement of a child within the space available to it on one axis.
///
/// `Start`/`End` mean left/right on the horizontal axis and top/bottom on the
/// vertical axis.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Alignment {
    /// Pack against the leading edge.
    #[default]
    Start,
    /// Center in the available space.
    Center,
    /// Pack against the trailing edge.
    End,
    /// Fill the available space minus margins.
    Stretch,
}

impl Alignment {
    /// Resolve `(position, extent)` for a child of preferred extent `size` placed in
    /// `[start, start + available)` with margins `before`/`after`.
    ///
    /// Only `Stretch` changes the extent; it never produces a negative one.
    pub fn place(
        self,
        start: i32,
        available: i32,
        size: i32,
        before: i32,
        after: i32,
    ) -> (i32, i32) {
        match self {
            Self::Start => (start + before, size),
            Self::End => (start + available - size - after, size),
            Self::Center => (start + before + (available - before - after - size) / 2, size),
            Self::Stretch => (start + before, (available - before - after).max(0)),
        }
    }

    /// Offset of a run that leaves `free` space on its main axis.
    ///
    /// `Stretch` cannot grow a run, so it behaves like `Start`.
    pub(crate) const fn run_offset(self, free: i32) -> i32 {
        match self {
            Self::Start | Self::Stretch => 0,
            Self::Center => free / 2,
            Self::End => free,
        }
    }
}

/// How leftover main-axis space is spread around a run of children.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Distribution {
    /// Children packed at the start.
    #[default]
    Start,
    /// All free space before the first child.
    End,
    /// Half of the free space before the first child.
    Center,
    /// Free space split into `n - 1` extra gaps; first and last child touch the edges.
    SpaceBetween,
    /// Free space split into `n` gaps, with half a gap before the first child.
    SpaceAround,
    /// Free space split into `n + 1` equal gaps, including before the first and after the last
    /// child.
    SpaceEvenly,
}

/// Result of [`Distribution::spread`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Spread {
    /// Offset before the first child.
    pub leading: i32,
    /// Extra space added after every child on top of the fixed gap.
    pub between: i32,
}

impl Distribution {
    /// Split `free` main-axis space for a run of `count` children.
    ///
    /// `Start`, `End` and `Center` honour negative free space (content overflows
    /// towards the end, both ends, or not at all). The `Space*` policies never
    /// produce negative extra spacing: with overflow they collapse to `Start`.
    pub fn spread(self, free: i32, count: usize) -> Spread {
        let n = count_i32(count);
        if n == 0 {
            return Spread::default();
        }
        let spaced = free.max(0);
        match self {
            Self::Start => Spread::default(),
            Self::End => Spread {
                leading: free,
                between: 0,
            },
            Self::Center => Spread {
                leading: free / 2,
                between: 0,
            },
            Self::SpaceBetween if n > 1 => Spread {
                leading: 0,
                between: spaced / (n - 1),
            },
            Self::SpaceBetween => Spread::default(),
            Self::SpaceAround => {
                let between = spaced / n;
                Spread {
                    leading: between / 2,
                    between,
                }
            }
            Self::SpaceEvenly => {
                let between = spaced / (n + 1);
                Spread {
                    leading: between,
                    between,
                }
            }
        }
    }
}
