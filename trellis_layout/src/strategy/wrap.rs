// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use smallvec::SmallVec;

use crate::child::LayoutChild;
use crate::geometry::{Padding, Size};
use crate::strategy::LayoutStrategy;
use crate::types::{Alignment, ContainerFrame, Orientation};
use crate::util::{count_i32, visible_indices};

/// Flows children along the main axis and starts a new line when the next one
/// would not fit.
///
/// Each line is as thick as its thickest child (margins included). Lines are
/// stacked along the cross axis with [`WrapLayout::line_spacing`] between them.
/// The alignment matching the orientation positions each line's run within
/// the available main-axis space; the other one positions children inside their
/// line, where `Stretch` fills the line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WrapLayout {
    /// Flow direction within a line.
    pub orientation: Orientation,
    /// Gap between children in a line.
    pub spacing: i32,
    /// Gap between consecutive lines.
    pub line_spacing: i32,
    /// Horizontal placement of runs (horizontal flow) or of children within
    /// columns (vertical flow).
    pub horizontal_alignment: Alignment,
    /// Vertical placement of children within rows (horizontal flow) or of runs
    /// (vertical flow).
    pub vertical_alignment: Alignment,
}

impl Default for WrapLayout {
    fn default() -> Self {
        Self {
            orientation: Orientation::Horizontal,
            spacing: 4,
            line_spacing: 4,
            horizontal_alignment: Alignment::Start,
            vertical_alignment: Alignment::Start,
        }
    }
}

impl WrapLayout {
    /// A wrap layout using `spacing` both within and between lines.
    pub fn new(orientation: Orientation, spacing: i32) -> Self {
        Self {
            orientation,
            spacing,
            line_spacing: spacing,
            ..Self::default()
        }
    }

    /// Builder-style line spacing.
    #[must_use]
    pub const fn with_line_spacing(mut self, line_spacing: i32) -> Self {
        self.line_spacing = line_spacing;
        self
    }

    fn alignments(&self) -> (Alignment, Alignment) {
        match self.orientation {
            Orientation::Horizontal => (self.horizontal_alignment, self.vertical_alignment),
            Orientation::Vertical => (self.vertical_alignment, self.horizontal_alignment),
        }
    }
}

/// A packed line: a range into the visible index list plus its extents.
#[derive(Clone, Debug)]
struct Line {
    items: Range<usize>,
    main: i32,
    cross: i32,
}

impl<K> LayoutStrategy<K> for WrapLayout {
    fn apply(&self, frame: ContainerFrame, children: &mut [LayoutChild<K>]) {
        let visible = visible_indices(children);
        if visible.is_empty() {
            return;
        }
        let o = self.orientation;
        let (main_start, main_len, cross_start, _) = o.split(frame.content());

        let mut lines: SmallVec<[Line; 4]> = SmallVec::new();
        let mut line = Line {
            items: 0..0,
            main: 0,
            cross: 0,
        };
        for (pos, &i) in visible.iter().enumerate() {
            let (main, cross) = children[i].outer_extents(o);
            if !line.items.is_empty() && line.main + self.spacing + main > main_len {
                let next = Line {
                    items: pos..pos,
                    main: 0,
                    cross: 0,
                };
                lines.push(core::mem::replace(&mut line, next));
            }
            if !line.items.is_empty() {
                line.main += self.spacing;
            }
            line.main += main;
            line.cross = line.cross.max(cross);
            line.items.end = pos + 1;
        }
        lines.push(line);

        let (run_alignment, item_alignment) = self.alignments();
        let mut cross_cursor = cross_start;
        for line in &lines {
            let mut cursor = main_start + run_alignment.run_offset(main_len - line.main);
            for &i in &visible[line.items.clone()] {
                let child = &mut children[i];
                let size = child.preferred_size();
                let (before, after) = o.main_margins(child.margin);
                let (cb, ca) = o.cross_margins(child.margin);
                let (cross, cross_size) =
                    item_alignment.place(cross_cursor, line.cross, o.cross(size), cb, ca);
                child.assign(o.compose(cursor + before, cross, o.main(size), cross_size));
                cursor += before + o.main(size) + after + self.spacing;
            }
            cross_cursor += line.cross + self.line_spacing;
        }
    }

    /// Single-line measurement: the sum of main extents by the largest cross
    /// extent. Wrapping needs an available size, which measurement does not have.
    fn measure(&self, padding: Padding, children: &[LayoutChild<K>]) -> Size {
        let o = self.orientation;
        let (mut main, mut cross, mut count) = (0, 0, 0);
        for child in children.iter().filter(|c| c.visible) {
            let (m, c) = child.outer_extents(o);
            main += m;
            cross = cross.max(c);
            count += 1;
        }
        if count == 0 {
            return Size::ZERO;
        }
        main += (count_i32(count) - 1) * self.spacing;
        o.compose(0, 0, main, cross).size() + Size::new(padding.horizontal(), padding.vertical())
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

    #[test]
    fn breaks_when_the_next_child_overflows() {
        let wrap = WrapLayout::new(Orientation::Horizontal, 0);
        let mut children = boxes(&[(40, 10); 4]);
        wrap.apply(frame(100, 100), &mut children);
        let origins: Vec<_> = children.iter().map(|c| (c.bounds.x, c.bounds.y)).collect();
        assert_eq!(origins, [(0, 0), (40, 0), (0, 10), (40, 10)], "two lines of two");
    }

    #[test]
    fn spacing_counts_toward_the_break() {
        let wrap = WrapLayout::new(Orientation::Horizontal, 10);
        let mut children = boxes(&[(45, 10), (45, 20), (45, 10)]);
        wrap.apply(frame(100, 100), &mut children);
        assert_eq!(children[1].bounds, Rect::new(55, 0, 45, 20), "45 + 10 + 45 fits");
        assert_eq!(
            children[2].bounds,
            Rect::new(0, 30, 45, 10),
            "next line starts after the tallest child plus line spacing"
        );
    }

    #[test]
    fn oversized_child_gets_its_own_line() {
        let wrap = WrapLayout::new(Orientation::Horizontal, 0);
        let mut children = boxes(&[(150, 10), (10, 10)]);
        wrap.apply(frame(100, 100), &mut children);
        assert_eq!(children[0].bounds, Rect::new(0, 0, 150, 10));
        assert_eq!(children[1].bounds, Rect::new(0, 10, 10, 10));
    }

    #[test]
    fn vertical_flow_wraps_into_columns() {
        let wrap = WrapLayout::new(Orientation::Vertical, 2).with_line_spacing(8);
        let mut children = boxes(&[(30, 40), (20, 40), (25, 40)]);
        wrap.apply(frame(200, 90), &mut children);
        assert_eq!(children[1].bounds, Rect::new(0, 42, 20, 40));
        assert_eq!(children[2].bounds, Rect::new(38, 0, 25, 40));
    }

    #[test]
    fn runs_and_items_align_independently() {
        let mut wrap = WrapLayout::new(Orientation::Horizontal, 0);
        wrap.horizontal_alignment = Alignment::End;
        wrap.vertical_alignment = Alignment::Center;
        let mut children = boxes(&[(30, 10), (30, 30)]);
        children[0].margin = Margin::new(0, 0, 0, 4);
        wrap.apply(frame(100, 100), &mut children);
        assert_eq!(children[0].bounds, Rect::new(40, 8, 30, 10));
        assert_eq!(children[1].bounds, Rect::new(70, 0, 30, 30));

        wrap.vertical_alignment = Alignment::Stretch;
        wrap.apply(frame(100, 100), &mut children);
        assert_eq!(children[0].bounds.height, 26, "stretch fills the line minus margin");
    }

    #[test]
    fn measure_assumes_a_single_line() {
        let wrap = WrapLayout::new(Orientation::Horizontal, 5);
        let children = boxes(&[(40, 10), (40, 30), (40, 20)]);
        assert_eq!(
            LayoutStrategy::<usize>::measure(&wrap, Padding::all(1), &children),
            Size::new(130 + 2, 30 + 2)
        );
    }
}
