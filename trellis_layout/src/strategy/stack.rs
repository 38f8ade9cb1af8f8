// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::hash::Hash;

use hashbrown::HashMap;

use crate::child::LayoutChild;
use crate::geometry::{Padding, Size};
use crate::strategy::LayoutStrategy;
use crate::types::{Alignment, ContainerFrame, Distribution, Orientation};
use crate::util::{sum_extents, total_gaps, visible_indices};

/// Places children one after another along a single axis.
///
/// The main axis is filled according to [`StackLayout::distribution`]; the cross
/// axis uses the alignment perpendicular to the orientation
/// ([`StackLayout::horizontal_alignment`] for a vertical stack,
/// [`StackLayout::vertical_alignment`] for a horizontal one).
#[derive(Clone, Debug)]
pub struct StackLayout<K> {
    /// Flow direction.
    pub orientation: Orientation,
    /// Fixed gap between consecutive children.
    pub spacing: i32,
    /// Cross-axis placement in a vertical stack.
    pub horizontal_alignment: Alignment,
    /// Cross-axis placement in a horizontal stack.
    pub vertical_alignment: Alignment,
    /// How leftover main-axis space is spread.
    ///
    /// [`Distribution::SpaceEvenly`] replaces `spacing` with its equal gaps; the
    /// other policies add their extra space on top of it.
    pub distribution: Distribution,
    /// Lay children out last to first (after ordering).
    pub reverse: bool,
    orders: HashMap<K, i32>,
}

impl<K> Default for StackLayout<K> {
    fn default() -> Self {
        Self {
            orientation: Orientation::Vertical,
            spacing: 4,
            horizontal_alignment: Alignment::Stretch,
            vertical_alignment: Alignment::Start,
            distribution: Distribution::Start,
            reverse: false,
            orders: HashMap::new(),
        }
    }
}

impl<K> StackLayout<K> {
    /// A stack flowing along `orientation` with `spacing` between children.
    pub fn new(orientation: Orientation, spacing: i32) -> Self {
        Self {
            orientation,
            spacing,
            ..Self::default()
        }
    }

    /// A stack with an explicit distribution policy.
    pub fn with_distribution(
        orientation: Orientation,
        distribution: Distribution,
        spacing: i32,
    ) -> Self {
        Self {
            distribution,
            ..Self::new(orientation, spacing)
        }
    }

    /// Offset of the first child and the advance between consecutive children.
    fn main_steps(&self, main_len: i32, content: i32, count: usize) -> (i32, i32) {
        let free = main_len.saturating_sub(content);
        if self.distribution == Distribution::SpaceEvenly && free >= 0 {
            let even = Distribution::SpaceEvenly.spread(free, count).between;
            return (even, even);
        }
        let spread = self
            .distribution
            .spread(free.saturating_sub(total_gaps(count, self.spacing)), count);
        (spread.leading, self.spacing.saturating_add(spread.between))
    }

    fn cross_alignment(&self) -> Alignment {
        match self.orientation {
            Orientation::Horizontal => self.vertical_alignment,
            Orientation::Vertical => self.horizontal_alignment,
        }
    }
}

impl<K: Eq + Hash> StackLayout<K> {
    /// Override the position of `key` in the sequence. Lower values come first;
    /// equal values keep insertion order.
    pub fn set_order(&mut self, key: K, order: i32) {
        self.orders.insert(key, order);
    }

    /// The ordering key of `key` (0 if never set).
    pub fn order(&self, key: &K) -> i32 {
        self.orders.get(key).copied().unwrap_or(0)
    }
}

impl<K: Copy + Eq + Hash> LayoutStrategy<K> for StackLayout<K> {
    fn apply(&self, frame: ContainerFrame, children: &mut [LayoutChild<K>]) {
        let mut visible = visible_indices(children);
        if visible.is_empty() {
            return;
        }
        // `sort_by_key` is stable, so ties keep insertion order.
        visible.sort_by_key(|&i| self.order(&children[i].key));
        if self.reverse {
            visible.reverse();
        }

        let o = self.orientation;
        let (main_start, main_len, cross_start, cross_len) = o.split(frame.content());
        let content = sum_extents(visible.iter().map(|&i| children[i].outer_extents(o).0));
        let (leading, step) = self.main_steps(main_len, content, visible.len());
        let cross_alignment = self.cross_alignment();

        let mut cursor = main_start.saturating_add(leading);
        for &i in &visible {
            let child = &mut children[i];
            let size = child.preferred_size();
            let (before, _) = o.main_margins(child.margin);
            let (cb, ca) = o.cross_margins(child.margin);
            let (outer, _) = child.outer_extents(o);
            let (cross, cross_size) =
                cross_alignment.place(cross_start, cross_len, o.cross(size), cb, ca);
            child.assign(o.compose(cursor.saturating_add(before), cross, o.main(size), cross_size));
            cursor = cursor.saturating_add(outer).saturating_add(step);
        }
    }

    fn measure(&self, padding: Padding, children: &[LayoutChild<K>]) -> Size {
        let o = self.orientation;
        let mut count = 0;
        let (mut main, mut cross) = (0_i32, 0);
        for child in children.iter().filter(|c| c.visible) {
            let (m, c) = child.outer_extents(o);
            main = main.saturating_add(m);
            cross = cross.max(c);
            count += 1;
        }
        if count == 0 {
            return Size::ZERO;
        }
        main = main.saturating_add(total_gaps(count, self.spacing));
        o.compose(0, 0, main, cross).size() + Size::new(padding.horizontal(), padding.vertical())
    }

    fn forget(&mut self, key: &K) {
        self.orders.remove(key);
    }
}
