// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::hash::Hash;
use core::ops::Range;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::child::LayoutChild;
use crate::geometry::{Padding, Size};
use crate::strategy::LayoutStrategy;
use crate::types::{Alignment, ContainerFrame, Distribution, Orientation};
use crate::util::{count_i32, distribute, sum_extents, total_gaps, visible_indices};

/// Main axis of a flex container.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlexDirection {
    /// Left to right.
    #[default]
    Row,
    /// Right to left.
    RowReverse,
    /// Top to bottom.
    Column,
    /// Bottom to top.
    ColumnReverse,
}

impl FlexDirection {
    /// The axis children flow along.
    pub const fn orientation(self) -> Orientation {
        match self {
            Self::Row | Self::RowReverse => Orientation::Horizontal,
            Self::Column | Self::ColumnReverse => Orientation::Vertical,
        }
    }

    /// Whether children are placed from the far end of each line.
    pub const fn is_reverse(self) -> bool {
        matches!(self, Self::RowReverse | Self::ColumnReverse)
    }
}

/// Line breaking of a flex container.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlexWrap {
    /// Everything on one line, which spans the whole cross axis.
    #[default]
    NoWrap,
    /// Break into lines stacked from the cross-axis start.
    Wrap,
    /// Break into lines stacked from the cross-axis end.
    WrapReverse,
}

/// Per-child flex settings.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FlexItem {
    /// Share of positive free space. Zero means the child never grows.
    pub grow: f32,
    /// Share of negative free space. Zero means the child never shrinks.
    pub shrink: f32,
    /// Main-axis size before growing or shrinking; `None` uses the preferred size.
    pub basis: Option<i32>,
    /// Cross-axis alignment overriding the container's `align_items`.
    pub align_self: Option<Alignment>,
    /// Sort key applied before layout; equal keys keep insertion order.
    pub order: i32,
}

impl Default for FlexItem {
    fn default() -> Self {
        Self {
            grow: 0.0,
            shrink: 1.0,
            basis: None,
            align_self: None,
            order: 0,
        }
    }
}

/// Flexbox-style layout: basis, grow and shrink along the main axis, alignment
/// across it, optional wrapping into lines.
#[derive(Clone, Debug)]
pub struct FlexLayout<K> {
    /// Main axis and placement direction.
    pub direction: FlexDirection,
    /// Line breaking.
    pub wrap: FlexWrap,
    /// Spreading of leftover main-axis space within each line.
    pub justify_content: Distribution,
    /// Default cross-axis alignment of children within their line.
    pub align_items: Alignment,
    /// Placement of lines along the cross axis when wrapping.
    pub align_content: Alignment,
    /// Uniform gap; when positive it overrides `row_gap` and `column_gap`.
    pub gap: i32,
    /// Gap between rows (cross gap of a row container, main gap of a column).
    pub row_gap: i32,
    /// Gap between columns (main gap of a row container, cross gap of a column).
    pub column_gap: i32,
    items: HashMap<K, FlexItem>,
}

impl<K> Default for FlexLayout<K> {
    fn default() -> Self {
        Self {
            direction: FlexDirection::Row,
            wrap: FlexWrap::NoWrap,
            justify_content: Distribution::Start,
            align_items: Alignment::Stretch,
            align_content: Alignment::Stretch,
            gap: 0,
            row_gap: 0,
            column_gap: 0,
            items: HashMap::new(),
        }
    }
}

impl<K> FlexLayout<K> {
    /// A single-line flex container.
    pub fn new(direction: FlexDirection, gap: i32) -> Self {
        Self {
            direction,
            gap,
            ..Self::default()
        }
    }

    /// Gap between consecutive children in a line.
    pub fn main_gap(&self) -> i32 {
        if self.gap > 0 {
            return self.gap;
        }
        match self.direction.orientation() {
            Orientation::Horizontal => self.column_gap,
            Orientation::Vertical => self.row_gap,
        }
    }

    /// Gap between consecutive lines.
    pub fn cross_gap(&self) -> i32 {
        if self.gap > 0 {
            return self.gap;
        }
        match self.direction.orientation() {
            Orientation::Horizontal => self.row_gap,
            Orientation::Vertical => self.column_gap,
        }
    }
}

impl<K: Eq + Hash> FlexLayout<K> {
    /// Replace every flex setting of `key`.
    pub fn set_item(&mut self, key: K, item: FlexItem) {
        self.items.insert(key, item);
    }

    /// The flex settings of `key` (defaults if never set).
    pub fn item(&self, key: &K) -> FlexItem {
        self.items.get(key).copied().unwrap_or_default()
    }

    /// Set how much `key` grows relative to its siblings.
    pub fn set_grow(&mut self, key: K, grow: f32) {
        self.items.entry(key).or_default().grow = grow;
    }

    /// Set how much `key` shrinks relative to its siblings.
    pub fn set_shrink(&mut self, key: K, shrink: f32) {
        self.items.entry(key).or_default().shrink = shrink;
    }

    /// Set or clear the main-axis basis of `key`.
    pub fn set_basis(&mut self, key: K, basis: Option<i32>) {
        self.items.entry(key).or_default().basis = basis;
    }

    /// Set or clear the cross-axis alignment override of `key`.
    pub fn set_align_self(&mut self, key: K, align: Option<Alignment>) {
        self.items.entry(key).or_default().align_self = align;
    }

    /// Set the sort key of `key`.
    pub fn set_order(&mut self, key: K, order: i32) {
        self.items.entry(key).or_default().order = order;
    }
}

/// A visible child with its resolved flex inputs.
#[derive(Clone, Debug)]
struct Entry {
    index: usize,
    item: FlexItem,
    /// Basis plus main-axis margins; grown or shrunk during line layout.
    main: i32,
    /// Preferred cross extent plus cross-axis margins.
    cross: i32,
}

#[derive(Clone, Debug)]
struct Line {
    entries: Range<usize>,
    cross_start: i32,
    cross: i32,
}

impl<K: Copy + Eq + Hash> FlexLayout<K> {
    fn entries(&self, children: &[LayoutChild<K>]) -> SmallVec<[Entry; 16]> {
        let o = self.direction.orientation();
        let mut entries: SmallVec<[Entry; 16]> = visible_indices(children)
            .into_iter()
            .map(|index| {
                let child = &children[index];
                let item = self.item(&child.key);
                let (main, cross) = child.outer_extents(o);
                let main = match item.basis {
                    Some(basis) => basis.max(0).saturating_add(o.main(child.margin_size())),
                    None => main,
                };
                Entry {
                    index,
                    item,
                    main,
                    cross,
                }
            })
            .collect();
        entries.sort_by_key(|e| e.item.order);
        entries
    }

    /// Pack entries into lines and give each line its cross-axis slot.
    fn lines(
        &self,
        entries: &[Entry],
        main_len: i32,
        cross_start: i32,
        cross_len: i32,
    ) -> SmallVec<[Line; 4]> {
        if self.wrap == FlexWrap::NoWrap {
            let mut single = SmallVec::new();
            single.push(Line {
                entries: 0..entries.len(),
                cross_start,
                cross: cross_len,
            });
            return single;
        }

        let gap = self.main_gap();
        let mut lines: SmallVec<[Line; 4]> = SmallVec::new();
        let mut start = 0;
        let mut used: i32 = 0;
        let mut cross = 0;
        for (i, e) in entries.iter().enumerate() {
            if i > start && used.saturating_add(gap).saturating_add(e.main) > main_len {
                lines.push(Line {
                    entries: start..i,
                    cross_start: 0,
                    cross,
                });
                start = i;
                used = 0;
                cross = 0;
            }
            if i > start {
                used = used.saturating_add(gap);
            }
            used = used.saturating_add(e.main);
            cross = cross.max(e.cross);
        }
        lines.push(Line {
            entries: start..entries.len(),
            cross_start: 0,
            cross,
        });
        if self.wrap == FlexWrap::WrapReverse {
            lines.reverse();
        }

        let cross_gap = self.cross_gap();
        let n = count_i32(lines.len());
        let total = sum_extents(lines.iter().map(|l| l.cross))
            .saturating_add(total_gaps(lines.len(), cross_gap));
        let free = cross_len.saturating_sub(total);
        let (mut cursor, extra) = match self.align_content {
            Alignment::Start => (cross_start, 0),
            Alignment::End => (cross_start + free, 0),
            Alignment::Center => (cross_start + free / 2, 0),
            Alignment::Stretch => (cross_start, free.max(0) / n),
        };
        for line in &mut lines {
            line.cross += extra;
            line.cross_start = cursor;
            cursor = cursor.saturating_add(line.cross).saturating_add(cross_gap);
        }
        lines
    }

    /// Grow or shrink the entries of one line, then place them.
    fn layout_line(
        &self,
        entries: &mut [Entry],
        line: &Line,
        main_start: i32,
        main_len: i32,
        children: &mut [LayoutChild<K>],
    ) {
        let o = self.direction.orientation();
        let gap = self.main_gap();
        let gaps = total_gaps(entries.len(), gap);
        let free = main_len
            .saturating_sub(sum_extents(entries.iter().map(|e| e.main)))
            .saturating_sub(gaps);

        let weights: SmallVec<[f32; 16]> = if free > 0 {
            entries.iter().map(|e| e.item.grow).collect()
        } else if free < 0 {
            entries.iter().map(|e| e.item.shrink).collect()
        } else {
            SmallVec::new()
        };
        if !weights.is_empty() {
            for (e, part) in entries.iter_mut().zip(distribute(free, &weights)) {
                let margins = o.main(children[e.index].margin_size());
                e.main = e.main.saturating_add(part).max(margins);
            }
        }

        let remaining = main_len
            .saturating_sub(sum_extents(entries.iter().map(|e| e.main)))
            .saturating_sub(gaps);
        let spread = self.justify_content.spread(remaining, entries.len());
        let mut cursor = main_start.saturating_add(spread.leading);
        for e in entries.iter() {
            let child = &mut children[e.index];
            let (before, after) = o.main_margins(child.margin);
            let (cb, ca) = o.cross_margins(child.margin);
            let main_pos = if self.direction.is_reverse() {
                main_start
                    .saturating_add(main_len)
                    .saturating_sub(cursor.saturating_sub(main_start))
                    .saturating_sub(e.main)
            } else {
                cursor
            };
            let align = e.item.align_self.unwrap_or(self.align_items);
            let (cross, cross_size) = align.place(
                line.cross_start,
                line.cross,
                o.cross(child.preferred_size()),
                cb,
                ca,
            );
            child.assign(o.compose(
                main_pos.saturating_add(before),
                cross,
                e.main - before - after,
                cross_size,
            ));
            cursor = cursor
                .saturating_add(e.main)
                .saturating_add(gap)
                .saturating_add(spread.between);
        }
    }
}

impl<K: Copy + Eq + Hash> LayoutStrategy<K> for FlexLayout<K> {
    fn apply(&self, frame: ContainerFrame, children: &mut [LayoutChild<K>]) {
        let mut entries = self.entries(children);
        if entries.is_empty() {
            return;
        }
        let (main_start, main_len, cross_start, cross_len) =
            self.direction.orientation().split(frame.content());
        let lines = self.lines(&entries, main_len, cross_start, cross_len);
        for line in &lines {
            self.layout_line(
                &mut entries[line.entries.clone()],
                line,
                main_start,
                main_len,
                children,
            );
        }
    }

    /// Single-line measurement using each child's basis where one is set.
    fn measure(&self, padding: Padding, children: &[LayoutChild<K>]) -> Size {
        let entries = self.entries(children);
        if entries.is_empty() {
            return Size::ZERO;
        }
        let main = sum_extents(entries.iter().map(|e| e.main))
            .saturating_add(total_gaps(entries.len(), self.main_gap()));
        let cross = entries.iter().map(|e| e.cross).max().unwrap_or(0);
        self.direction.orientation().compose(0, 0, main, cross).size()
            + Size::new(padding.horizontal(), padding.vertical())
    }

    fn forget(&mut self, key: &K) {
        self.items.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::geometry::{Margin, Rect};

    fn frame(w: i32, h: i32) -> ContainerFrame {
        ContainerFrame::new(Rect::new(0, 0, w, h), Padding::ZERO)
    }

    fn boxes(sizes: &[(i32, i32)]) -> Vec<LayoutChild<usize>> {
        sizes
            .iter()
            .enumerate()
            .map(|(i, &(w, h))| LayoutChild::new(i, Rect::new(0, 0, w, h)))
            .collect()
    }

    fn widths(children: &[LayoutChild<usize>]) -> Vec<i32> {
        children.iter().map(|c| c.bounds.width).collect()
    }

    #[test]
    fn grow_distributes_positive_free_space() {
        let mut flex = FlexLayout::new(FlexDirection::Row, 0);
        for key in 0..3 {
            flex.set_basis(key, Some(50));
        }
        flex.set_grow(0, 1.0);
        flex.set_grow(2, 1.0);
        let mut children = boxes(&[(10, 10); 3]);
        flex.apply(frame(300, 40), &mut children);
        assert_eq!(widths(&children), [125, 50, 125]);
        assert_eq!(children[2].bounds.x, 175);
        assert_eq!(children[1].bounds.height, 40, "align_items defaults to stretch");
    }

    #[test]
    fn shrink_distributes_negative_free_space() {
        let mut flex = FlexLayout::new(FlexDirection::Row, 0);
        flex.set_shrink(1, 0.0);
        let mut children = boxes(&[(100, 10), (100, 10), (100, 10)]);
        flex.apply(frame(200, 10), &mut children);
        assert_eq!(widths(&children), [50, 100, 50]);

        flex.set_shrink(1, 3.0);
        let mut children = boxes(&[(100, 10), (100, 10), (100, 10)]);
        children[1].bounds.width = 20;
        flex.apply(frame(100, 10), &mut children);
        assert_eq!(
            widths(&children),
            [76, 0, 76],
            "heavy shrinker clamps at zero instead of going negative"
        );
    }

    #[test]
    fn conservation_on_a_single_line() {
        let gap = 7;
        for justify in [
            Distribution::Start,
            Distribution::SpaceBetween,
            Distribution::SpaceAround,
            Distribution::SpaceEvenly,
        ] {
            let mut flex = FlexLayout::new(FlexDirection::Row, gap);
            flex.justify_content = justify;
            flex.set_grow(1, 2.0);
            flex.set_grow(3, 1.0);
            let mut children = boxes(&[(13, 5), (21, 5), (8, 5), (30, 5)]);
            flex.apply(frame(250, 5), &mut children);
            let extents: i32 = children.iter().map(|c| c.bounds.width).sum();
            assert_eq!(extents + 3 * gap, 250, "{justify:?}: grow absorbs all free space");
        }
    }

    #[test]
    fn row_reverse_mirrors_within_the_line() {
        let flex = FlexLayout::new(FlexDirection::RowReverse, 10);
        let mut children = boxes(&[(20, 10), (30, 10)]);
        children[0].margin = Margin::new(1, 0, 3, 0);
        flex.apply(frame(200, 10), &mut children);
        assert_eq!(children[0].bounds.x, 200 - 3 - 20, "first child hugs the far edge");
        assert_eq!(children[1].bounds.x, 200 - 24 - 10 - 30);
    }

    #[test]
    fn column_uses_row_gap_unless_uniform_gap_is_set() {
        let mut flex = FlexLayout::<u8>::new(FlexDirection::Column, 0);
        flex.row_gap = 6;
        flex.column_gap = 2;
        assert_eq!((flex.main_gap(), flex.cross_gap()), (6, 2));
        flex.gap = 9;
        assert_eq!((flex.main_gap(), flex.cross_gap()), (9, 9), "uniform gap wins");
    }

    #[test]
    fn wrap_packs_lines_and_stretches_content() {
        let mut flex = FlexLayout::new(FlexDirection::Row, 0);
        flex.wrap = FlexWrap::Wrap;
        flex.align_items = Alignment::Start;
        let mut children = boxes(&[(40, 10), (40, 20), (40, 10), (40, 10)]);
        flex.apply(frame(100, 100), &mut children);
        let origins: Vec<_> = children.iter().map(|c| (c.bounds.x, c.bounds.y)).collect();
        // Lines are 20 and 10 tall; 70px free split as 35 per line.
        assert_eq!(origins, [(0, 0), (40, 0), (0, 55), (40, 55)]);
    }

    #[test]
    fn wrap_reverse_stacks_from_the_cross_end() {
        let mut flex = FlexLayout::new(FlexDirection::Row, 0);
        flex.wrap = FlexWrap::WrapReverse;
        flex.align_content = Alignment::End;
        flex.align_items = Alignment::Start;
        let mut children = boxes(&[(60, 10), (60, 20)]);
        flex.apply(frame(100, 100), &mut children);
        assert_eq!(children[0].bounds.y, 90, "first line lands at the bottom");
        assert_eq!(children[1].bounds.y, 70);
    }

    #[test]
    fn align_self_overrides_align_items() {
        let mut flex = FlexLayout::new(FlexDirection::Row, 0);
        flex.set_align_self(1, Some(Alignment::End));
        flex.set_align_self(2, Some(Alignment::Center));
        let mut children = boxes(&[(10, 10), (10, 10), (10, 10)]);
        children[1].margin = Margin::new(0, 0, 0, 5);
        flex.apply(frame(100, 50), &mut children);
        assert_eq!(children[0].bounds, Rect::new(0, 0, 10, 50));
        assert_eq!(children[1].bounds, Rect::new(10, 35, 10, 10));
        assert_eq!(children[2].bounds, Rect::new(20, 20, 10, 10));
    }

    #[test]
    fn order_resorts_before_layout() {
        let mut flex = FlexLayout::new(FlexDirection::Row, 0);
        flex.set_order(0, 1);
        let mut children = boxes(&[(10, 10), (20, 10), (30, 10)]);
        flex.apply(frame(100, 10), &mut children);
        let xs: Vec<_> = children.iter().map(|c| c.bounds.x).collect();
        assert_eq!(xs, [50, 0, 20]);
    }

    #[test]
    fn huge_extents_saturate_instead_of_overflowing() {
        let mut flex = FlexLayout::new(FlexDirection::Row, 2);
        for key in 0..3 {
            flex.set_shrink(key, 0.0);
        }
        let mut children = boxes(&[(2_000_000_000, 10); 3]);
        flex.apply(frame(300, 10), &mut children);
        let xs: Vec<_> = children.iter().map(|c| c.bounds.x).collect();
        assert_eq!(xs, [0, 2_000_000_002, i32::MAX]);
        assert_eq!(flex.measure(Padding::ZERO, &children), Size::new(i32::MAX, 10));

        flex.wrap = FlexWrap::Wrap;
        flex.apply(frame(300, 10), &mut children);
        let ys: Vec<_> = children.iter().map(|c| c.bounds.y).collect();
        assert_eq!(ys, [0, 12, 24], "one line per child");
    }

    #[test]
    fn measure_prefers_basis() {
        let mut flex = FlexLayout::new(FlexDirection::Column, 3);
        flex.set_basis(0, Some(100));
        let children = boxes(&[(10, 10), (40, 20)]);
        assert_eq!(
            flex.measure(Padding::all(2), &children),
            Size::new(40 + 4, 100 + 3 + 20 + 4)
        );
    }
}
