// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::hash::Hash;

use hashbrown::HashMap;

use crate::child::LayoutChild;
use crate::geometry::{Padding, Rect, Size};
use crate::strategy::LayoutStrategy;
use crate::types::ContainerFrame;
use crate::util::visible_indices;

/// Edge a child docks against.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Dock {
    /// Strip along the left edge, as wide as the child.
    #[default]
    Left,
    /// Strip along the top edge, as tall as the child.
    Top,
    /// Strip along the right edge, as wide as the child.
    Right,
    /// Strip along the bottom edge, as tall as the child.
    Bottom,
}

/// Docks children against the edges of a shrinking available rectangle.
///
/// Children are processed in order. Each one carves a strip off its [`Dock`]
/// edge; with [`DockLayout::last_child_fill`] the last visible child ignores its
/// side and takes whatever is left.
#[derive(Clone, Debug)]
pub struct DockLayout<K> {
    /// Whether the last visible child fills the remaining space. Defaults to `true`.
    pub last_child_fill: bool,
    docks: HashMap<K, Dock>,
}

impl<K> Default for DockLayout<K> {
    fn default() -> Self {
        Self {
            last_child_fill: true,
            docks: HashMap::new(),
        }
    }
}

impl<K> DockLayout<K> {
    /// A dock layout with `last_child_fill` enabled.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<K: Eq + Hash> DockLayout<K> {
    /// Assign the edge `key` docks against.
    pub fn set_dock(&mut self, key: K, dock: Dock) {
        self.docks.insert(key, dock);
    }

    /// The edge `key` docks against ([`Dock::Left`] if never set).
    pub fn dock(&self, key: &K) -> Dock {
        self.docks.get(key).copied().unwrap_or_default()
    }

    /// Reset `key` to the default edge.
    pub fn clear_dock(&mut self, key: &K) {
        self.docks.remove(key);
    }
}

impl<K: Copy + Eq + Hash> LayoutStrategy<K> for DockLayout<K> {
    fn apply(&self, frame: ContainerFrame, children: &mut [LayoutChild<K>]) {
        let visible = visible_indices(children);
        let fill = if self.last_child_fill {
            visible.last().copied()
        } else {
            None
        };
        let mut avail = frame.content();

        for &i in &visible {
            let child = &mut children[i];
            let m = child.margin;
            if Some(i) == fill {
                child.assign(Rect::new(
                    avail.x + m.left,
                    avail.y + m.top,
                    avail.width - m.horizontal(),
                    avail.height - m.vertical(),
                ));
                continue;
            }

            let size = child.preferred_size();
            match self.dock(&child.key) {
                Dock::Left => {
                    child.assign(Rect::new(
                        avail.x + m.left,
                        avail.y + m.top,
                        size.width,
                        avail.height - m.vertical(),
                    ));
                    let used = (size.width + m.horizontal()).clamp(0, avail.width.max(0));
                    avail.x += used;
                    avail.width -= used;
                }
                Dock::Right => {
                    child.assign(Rect::new(
                        avail.right() - size.width - m.right,
                        avail.y + m.top,
                        size.width,
                        avail.height - m.vertical(),
                    ));
                    avail.width -= (size.width + m.horizontal()).clamp(0, avail.width.max(0));
                }
                Dock::Top => {
                    child.assign(Rect::new(
                        avail.x + m.left,
                        avail.y + m.top,
                        avail.width - m.horizontal(),
                        size.height,
                    ));
                    let used = (size.height + m.vertical()).clamp(0, avail.height.max(0));
                    avail.y += used;
                    avail.height -= used;
                }
                Dock::Bottom => {
                    child.assign(Rect::new(
                        avail.x + m.left,
                        avail.bottom() - size.height - m.bottom,
                        avail.width - m.horizontal(),
                        size.height,
                    ));
                    avail.height -= (size.height + m.vertical()).clamp(0, avail.height.max(0));
                }
            }
        }
    }

    fn measure(&self, padding: Padding, children: &[LayoutChild<K>]) -> Size {
        let mut any = false;
        let (mut width, mut height) = (0, 0);
        let (mut across, mut down) = (0, 0);

        for child in children.iter().filter(|c| c.visible) {
            any = true;
            let size = child.preferred_size();
            let margin = child.margin_size();
            match self.dock(&child.key) {
                Dock::Left | Dock::Right => {
                    across += size.width + margin.width;
                    height = height.max(down + size.height + margin.height);
                }
                Dock::Top | Dock::Bottom => {
                    down += size.height + margin.height;
                    width = width.max(across + size.width + margin.width);
                }
            }
        }

        if !any {
            return Size::ZERO;
        }
        Size::new(
            width.max(across) + padding.horizontal(),
            height.max(down) + padding.vertical(),
        )
    }

    fn forget(&mut self, key: &K) {
        self.clear_dock(key);
    }
}
