// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the element tree: node identifiers, flags, and the element record.

use alloc::string::String;

use trellis_layout::{Margin, Padding, Rect, Size};

/// Identifier for a node in the tree (generational).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Element flags controlling layout participation and updates.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ElementFlags: u8 {
        /// Element takes part in its parent's layout, drawing, and hit testing.
        const VISIBLE = 0b0000_0001;
        /// Element runs its own layout during [`crate::Tree::update`].
        const ENABLED = 0b0000_0010;
    }
}

impl Default for ElementFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::ENABLED
    }
}

bitflags::bitflags! {
    /// Edges and centers a host keeps an element attached to when its parent resizes.
    ///
    /// Layout strategies ignore anchors; they are carried for the host and for
    /// descriptions.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Anchor: u8 {
        /// Left edge.
        const LEFT = 1 << 0;
        /// Top edge.
        const TOP = 1 << 1;
        /// Right edge.
        const RIGHT = 1 << 2;
        /// Bottom edge.
        const BOTTOM = 1 << 3;
        /// Horizontal center.
        const CENTER_HORIZONTAL = 1 << 4;
        /// Vertical center.
        const CENTER_VERTICAL = 1 << 5;

        /// Top-left corner.
        const TOP_LEFT = Self::TOP.bits() | Self::LEFT.bits();
        /// Top-right corner.
        const TOP_RIGHT = Self::TOP.bits() | Self::RIGHT.bits();
        /// Middle of the top edge.
        const TOP_CENTER = Self::TOP.bits() | Self::CENTER_HORIZONTAL.bits();
        /// Bottom-left corner.
        const BOTTOM_LEFT = Self::BOTTOM.bits() | Self::LEFT.bits();
        /// Bottom-right corner.
        const BOTTOM_RIGHT = Self::BOTTOM.bits() | Self::RIGHT.bits();
        /// Middle of the bottom edge.
        const BOTTOM_CENTER = Self::BOTTOM.bits() | Self::CENTER_HORIZONTAL.bits();
        /// Middle of the left edge.
        const CENTER_LEFT = Self::CENTER_VERTICAL.bits() | Self::LEFT.bits();
        /// Middle of the right edge.
        const CENTER_RIGHT = Self::CENTER_VERTICAL.bits() | Self::RIGHT.bits();
        /// Both centers.
        const CENTER = Self::CENTER_HORIZONTAL.bits() | Self::CENTER_VERTICAL.bits();
        /// All four edges.
        const FILL = Self::TOP_LEFT.bits() | Self::BOTTOM_RIGHT.bits();
    }
}

impl Default for Anchor {
    fn default() -> Self {
        Self::TOP_LEFT
    }
}

/// The data an element node carries.
///
/// `bounds` is relative to the parent's top-left corner. For children of a
/// container with a layout strategy it is an output of that container's layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    /// Application-level identifier, unique by convention.
    pub id: String,
    /// Name used by [`crate::Tree::child_by_name`].
    pub name: String,
    /// Host type tag (for example `"Button"`); opaque to layout.
    pub kind: String,
    /// Position and extent in the parent's local space.
    pub bounds: Rect,
    /// Space reserved around the element by its parent's layout.
    pub margin: Margin,
    /// Space reserved inside the element around its children.
    pub padding: Padding,
    /// Lower clamp for the preferred size.
    pub min_size: Size,
    /// Upper clamp for the preferred size.
    pub max_size: Size,
    /// Visibility and enablement.
    pub flags: ElementFlags,
    /// Paint order among siblings; higher is drawn later (on top).
    pub draw_order: i32,
    /// Attachment hint for the host; opaque to layout.
    pub anchor: Anchor,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            kind: String::new(),
            bounds: Rect::ZERO,
            margin: Margin::ZERO,
            padding: Padding::ZERO,
            min_size: Size::ZERO,
            max_size: Size::UNBOUNDED,
            flags: ElementFlags::default(),
            draw_order: 0,
            anchor: Anchor::default(),
        }
    }
}

impl Element {
    /// A visible, enabled element with the given name and bounds.
    pub fn new(name: impl Into<String>, bounds: Rect) -> Self {
        Self {
            name: name.into(),
            bounds,
            ..Self::default()
        }
    }

    /// Builder-style application id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Builder-style type tag.
    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Builder-style margin.
    #[must_use]
    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    /// Builder-style padding.
    #[must_use]
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    /// Builder-style size limits.
    #[must_use]
    pub fn with_size_limits(mut self, min: Size, max: Size) -> Self {
        self.min_size = min;
        self.max_size = max;
        self
    }

    /// Builder-style draw order.
    #[must_use]
    pub fn with_draw_order(mut self, draw_order: i32) -> Self {
        self.draw_order = draw_order;
        self
    }

    /// Builder-style anchor.
    #[must_use]
    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Builder-style flags.
    #[must_use]
    pub fn with_flags(mut self, flags: ElementFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Whether the element takes part in layout and drawing.
    pub fn is_visible(&self) -> bool {
        self.flags.contains(ElementFlags::VISIBLE)
    }

    /// Whether the element runs its own layout.
    pub fn is_enabled(&self) -> bool {
        self.flags.contains(ElementFlags::ENABLED)
    }
}
