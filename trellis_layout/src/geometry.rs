// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integer geometry primitives: rectangles, clamped sizes, margins and padding.

use core::ops::{Add, Sub};

/// Axis-aligned rectangle in integer pixel coordinates.
///
/// `width` and `height` may go negative while a strategy is computing, but every
/// rectangle assigned to a child goes through [`Rect::clamped`] first.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Horizontal extent.
    pub width: i32,
    /// Vertical extent.
    pub height: i32,
}

impl Rect {
    /// The empty rectangle at the origin.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Create a rectangle from its origin and extent.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle at the origin with the given size.
    #[inline]
    pub const fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    /// Right edge (`x + width`).
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (`y + height`).
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// The extent of this rectangle as a [`Size`] (negative components clamp to zero).
    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Whether the point lies inside the rectangle.
    ///
    /// The left and top edges are inclusive, the right and bottom edges exclusive.
    #[inline]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && y >= self.y && x < self.right() && y < self.bottom()
    }

    /// This rectangle moved by `(dx, dy)`.
    #[inline]
    #[must_use]
    pub const fn translate(self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.x.saturating_add(dx),
            self.y.saturating_add(dy),
            self.width,
            self.height,
        )
    }

    /// This rectangle with negative extents clamped to zero.
    #[inline]
    #[must_use]
    pub const fn clamped(self) -> Self {
        Self::new(
            self.x,
            self.y,
            if self.width < 0 { 0 } else { self.width },
            if self.height < 0 { 0 } else { self.height },
        )
    }

    /// Shrink this rectangle by padding on every side.
    ///
    /// The result may have negative extents when the padding exceeds the size.
    #[inline]
    #[must_use]
    pub const fn inset(self, padding: Padding) -> Self {
        Self::new(
            self.x + padding.left,
            self.y + padding.top,
            self.width - padding.horizontal(),
            self.height - padding.vertical(),
        )
    }
}

impl From<Rect> for kurbo::Rect {
    fn from(r: Rect) -> Self {
        Self::new(
            f64::from(r.x),
            f64::from(r.y),
            f64::from(r.right()),
            f64::from(r.bottom()),
        )
    }
}

/// A width and height that are never negative.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    /// Horizontal extent.
    pub width: i32,
    /// Vertical extent.
    pub height: i32,
}

impl Size {
    /// Zero in both axes.
    pub const ZERO: Self = Self::new(0, 0);

    /// The "no limit" size used as the default maximum.
    pub const UNBOUNDED: Self = Self::new(i32::MAX, i32::MAX);

    /// Create a size, clamping negative components to zero.
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self {
            width: if width < 0 { 0 } else { width },
            height: if height < 0 { 0 } else { height },
        }
    }

    /// A square size.
    #[inline]
    pub const fn splat(both: i32) -> Self {
        Self::new(both, both)
    }

    /// Clamp `self` into `[min, max]` per axis as `max(min, min(max, self))`.
    ///
    /// When `min > max` the minimum wins.
    #[inline]
    #[must_use]
    pub fn clamp_between(self, min: Self, max: Self) -> Self {
        Self::new(
            self.width.min(max.width).max(min.width),
            self.height.min(max.height).max(min.height),
        )
    }
}

impl Add for Size {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.width.saturating_add(rhs.width),
            self.height.saturating_add(rhs.height),
        )
    }
}

impl Sub for Size {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(
            self.width.saturating_sub(rhs.width),
            self.height.saturating_sub(rhs.height),
        )
    }
}

macro_rules! edge_insets {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
        pub struct $name {
            /// Left edge.
            pub left: i32,
            /// Top edge.
            pub top: i32,
            /// Right edge.
            pub right: i32,
            /// Bottom edge.
            pub bottom: i32,
        }

        impl $name {
            /// Zero on every edge.
            pub const ZERO: Self = Self::all(0);

            /// Explicit per-edge values.
            #[inline]
            pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
                Self { left, top, right, bottom }
            }

            /// The same value on every edge.
            #[inline]
            pub const fn all(value: i32) -> Self {
                Self::new(value, value, value, value)
            }

            /// `horizontal` on left/right and `vertical` on top/bottom.
            #[inline]
            pub const fn symmetric(horizontal: i32, vertical: i32) -> Self {
                Self::new(horizontal, vertical, horizontal, vertical)
            }

            /// `left + right`.
            #[inline]
            pub const fn horizontal(&self) -> i32 {
                self.left + self.right
            }

            /// `top + bottom`.
            #[inline]
            pub const fn vertical(&self) -> i32 {
                self.top + self.bottom
            }
        }
    };
}

edge_insets! {
    /// Space outside an element, reserved by its parent's layout.
    Margin
}

edge_insets! {
    /// Space inside a container, reserved around its children.
    Padding
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_clamps_on_construction() {
        assert_eq!(Size::new(-5, 10), Size::new(0, 10), "negative width clamps");
        assert_eq!(Size::new(3, 4) - Size::new(5, 1), Size::new(0, 3), "sub re-clamps");
        assert_eq!(
            Size::UNBOUNDED + Size::splat(1),
            Size::UNBOUNDED,
            "add saturates instead of wrapping"
        );
    }

    #[test]
    fn clamp_between_prefers_min() {
        let s = Size::new(50, 50);
        assert_eq!(s.clamp_between(Size::new(60, 0), Size::UNBOUNDED), Size::new(60, 50));
        assert_eq!(s.clamp_between(Size::ZERO, Size::new(40, 45)), Size::new(40, 45));
        assert_eq!(
            s.clamp_between(Size::new(80, 0), Size::new(70, 100)),
            Size::new(80, 50),
            "min beats max when the client got them backwards"
        );
    }

    #[test]
    fn rect_edges_and_inset() {
        let r = Rect::new(10, 20, 30, 40);
        assert_eq!((r.right(), r.bottom()), (40, 60));
        assert!(r.contains(10, 20), "top-left corner is inside");
        assert!(!r.contains(40, 20), "right edge is outside");
        let inner = r.inset(Padding::new(1, 2, 3, 4));
        assert_eq!(inner, Rect::new(11, 22, 26, 34));
        assert_eq!(
            Rect::new(0, 0, 4, 4).inset(Padding::all(3)).clamped(),
            Rect::new(3, 3, 0, 0),
            "over-padded rect clamps to empty"
        );
    }

    #[test]
    fn insets_totals() {
        let m = Margin::new(1, 2, 3, 4);
        assert_eq!((m.horizontal(), m.vertical()), (4, 6));
        assert_eq!(Padding::symmetric(5, 7), Padding::new(5, 7, 5, 7));
    }

    #[test]
    fn converts_into_kurbo() {
        let k: kurbo::Rect = Rect::new(1, 2, 3, 4).into();
        assert_eq!(k, kurbo::Rect::new(1.0, 2.0, 4.0, 6.0));
    }
}
