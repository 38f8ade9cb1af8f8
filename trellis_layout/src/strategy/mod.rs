// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The strategy contract and the closed set of strategies.

use core::hash::Hash;

use crate::child::LayoutChild;
use crate::geometry::{Padding, Size};
use crate::types::ContainerFrame;

mod absolute;
mod dock;
mod flex;
mod grid;
mod stack;
mod wrap;

pub use absolute::AbsoluteLayout;
pub use dock::{Dock, DockLayout};
pub use flex::{FlexDirection, FlexItem, FlexLayout, FlexWrap};
pub use grid::{CellAlignment, GridLayout, GridLength, GridPosition};
pub use stack::StackLayout;
pub use wrap::WrapLayout;

/// A box-layout algorithm.
///
/// Implementations must be idempotent: `apply` takes `&self`, so the only state
/// that survives between calls is explicit per-child configuration keyed by `K`.
pub trait LayoutStrategy<K> {
    /// Compute and assign bounds for every visible child.
    ///
    /// Child bounds are written in the container's local space. Invisible
    /// children are neither measured nor moved.
    fn apply(&self, frame: ContainerFrame, children: &mut [LayoutChild<K>]);

    /// The container's preferred size, derived from its children's preferred sizes
    /// plus `padding`. Read-only.
    fn measure(&self, padding: Padding, children: &[LayoutChild<K>]) -> Size;

    /// Drop any per-child configuration stored for `key`.
    ///
    /// Called when a child is detached from its container.
    fn forget(&mut self, key: &K) {
        let _ = key;
    }
}

/// One of the six built-in strategies.
///
/// A container owns at most one of these. Containers without one behave like
/// [`Layout::Absolute`].
#[derive(Clone, Debug)]
pub enum Layout<K> {
    /// Children keep externally assigned bounds.
    Absolute(AbsoluteLayout),
    /// Children dock against the edges; the last may fill the rest.
    Dock(DockLayout<K>),
    /// Single-axis sequence with spacing and distribution.
    Stack(StackLayout<K>),
    /// Sequence that breaks into lines when the main axis runs out.
    Wrap(WrapLayout),
    /// Rows and columns with pixel, star and auto tracks.
    Grid(GridLayout<K>),
    /// Flexbox-style grow/shrink/basis layout.
    Flex(FlexLayout<K>),
}

impl<K> Layout<K> {
    /// Short name of the active strategy, for diagnostics.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Absolute(_) => "absolute",
            Self::Dock(_) => "dock",
            Self::Stack(_) => "stack",
            Self::Wrap(_) => "wrap",
            Self::Grid(_) => "grid",
            Self::Flex(_) => "flex",
        }
    }

    /// The dock strategy, if active.
    pub fn as_dock_mut(&mut self) -> Option<&mut DockLayout<K>> {
        match self {
            Self::Dock(d) => Some(d),
            _ => None,
        }
    }

    /// The stack strategy, if active.
    pub fn as_stack_mut(&mut self) -> Option<&mut StackLayout<K>> {
        match self {
            Self::Stack(s) => Some(s),
            _ => None,
        }
    }

    /// The wrap strategy, if active.
    pub fn as_wrap_mut(&mut self) -> Option<&mut WrapLayout> {
        match self {
            Self::Wrap(w) => Some(w),
            _ => None,
        }
    }

    /// The grid strategy, if active.
    pub fn as_grid_mut(&mut self) -> Option<&mut GridLayout<K>> {
        match self {
            Self::Grid(g) => Some(g),
            _ => None,
        }
    }

    /// The flex strategy, if active.
    pub fn as_flex_mut(&mut self) -> Option<&mut FlexLayout<K>> {
        match self {
            Self::Flex(f) => Some(f),
            _ => None,
        }
    }
}

impl<K> Default for Layout<K> {
    fn default() -> Self {
        Self::Absolute(AbsoluteLayout)
    }
}

impl<K: Copy + Eq + Hash> LayoutStrategy<K> for Layout<K> {
    fn apply(&self, frame: ContainerFrame, children: &mut [LayoutChild<K>]) {
        log::trace!(
            "{} layout: {} children in {}x{}",
            self.name(),
            children.len(),
            frame.bounds.width,
            frame.bounds.height
        );
        match self {
            Self::Absolute(l) => LayoutStrategy::<K>::apply(l, frame, children),
            Self::Dock(l) => l.apply(frame, children),
            Self::Stack(l) => l.apply(frame, children),
            Self::Wrap(l) => LayoutStrategy::<K>::apply(l, frame, children),
            Self::Grid(l) => l.apply(frame, children),
            Self::Flex(l) => l.apply(frame, children),
        }
    }

    fn measure(&self, padding: Padding, children: &[LayoutChild<K>]) -> Size {
        match self {
            Self::Absolute(l) => LayoutStrategy::<K>::measure(l, padding, children),
            Self::Dock(l) => l.measure(padding, children),
            Self::Stack(l) => l.measure(padding, children),
            Self::Wrap(l) => LayoutStrategy::<K>::measure(l, padding, children),
            Self::Grid(l) => l.measure(padding, children),
            Self::Flex(l) => l.measure(padding, children),
        }
    }

    fn forget(&mut self, key: &K) {
        match self {
            Self::Absolute(_) | Self::Wrap(_) => {}
            Self::Dock(l) => l.forget(key),
            Self::Stack(l) => l.forget(key),
            Self::Grid(l) => l.forget(key),
            Self::Flex(l) => l.forget(key),
        }
    }
}

macro_rules! impl_from_strategy {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl<K> From<$ty> for Layout<K> {
                fn from(layout: $ty) -> Self {
                    Self::$variant(layout)
                }
            }
        )*
    };
}

impl_from_strategy! {
    Absolute(AbsoluteLayout),
    Dock(DockLayout<K>),
    Stack(StackLayout<K>),
    Wrap(WrapLayout),
    Grid(GridLayout<K>),
    Flex(FlexLayout<K>),
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;
    use crate::geometry::{Margin, Rect};
    use crate::types::{Distribution, Orientation};

    fn sample_children() -> Vec<LayoutChild<u32>> {
        (0..5)
            .map(|i| {
                LayoutChild::new(i, Rect::new(0, 0, 20 + 7 * i as i32, 15 + 3 * i as i32))
                    .with_margin(Margin::new(1, 2, 3, 4))
            })
            .collect()
    }

    fn all_layouts() -> Vec<Layout<u32>> {
        let mut dock = DockLayout::new();
        dock.set_dock(1, Dock::Top);
        dock.set_dock(2, Dock::Right);
        let mut grid = GridLayout::new();
        grid.add_columns([GridLength::Auto, GridLength::star(), GridLength::pixel(40)]);
        grid.add_rows([GridLength::stars(2.0), GridLength::Auto]);
        grid.set_position(3, GridPosition::spanning(1, 0, 1, 2));
        let mut flex = FlexLayout::new(FlexDirection::RowReverse, 3);
        flex.wrap = FlexWrap::Wrap;
        flex.set_grow(0, 1.0);
        vec![
            Layout::Absolute(AbsoluteLayout),
            dock.into(),
            StackLayout::with_distribution(Orientation::Horizontal, Distribution::SpaceAround, 2)
                .into(),
            WrapLayout::new(Orientation::Vertical, 5).into(),
            grid.into(),
            flex.into(),
        ]
    }

    #[test]
    fn apply_is_idempotent_for_every_strategy() {
        let frame = ContainerFrame::new(Rect::new(0, 0, 173, 121), Padding::new(3, 1, 4, 2));
        for layout in all_layouts() {
            let mut first = sample_children();
            layout.apply(frame, &mut first);
            let mut second = first.clone();
            layout.apply(frame, &mut second);
            assert_eq!(first, second, "{} layout is not idempotent", layout.name());
        }
    }

    #[test]
    fn measure_is_read_only() {
        for layout in all_layouts() {
            let children = sample_children();
            let before = children.clone();
            let _ = layout.measure(Padding::all(4), &children);
            assert_eq!(children, before, "{} measure mutated children", layout.name());
        }
    }

    #[test]
    fn empty_container_measures_zero() {
        for layout in all_layouts() {
            let mut none: [LayoutChild<u32>; 0] = [];
            layout.apply(ContainerFrame::default(), &mut none);
            assert_eq!(
                layout.measure(Padding::all(9), &none),
                Size::ZERO,
                "{} layout",
                layout.name()
            );
        }
    }

    #[test]
    fn invisible_children_match_removed_children() {
        let frame = ContainerFrame::new(Rect::new(0, 0, 200, 160), Padding::all(2));
        for layout in all_layouts().into_iter().skip(1) {
            let mut with_hidden = sample_children();
            with_hidden[1].visible = false;
            with_hidden[3].visible = false;
            let hidden_before = (with_hidden[1].bounds, with_hidden[3].bounds);
            layout.apply(frame, &mut with_hidden);

            let mut removed: Vec<_> = sample_children()
                .into_iter()
                .filter(|c| c.key != 1 && c.key != 3)
                .collect();
            layout.apply(frame, &mut removed);

            let shown: Vec<_> = with_hidden.iter().filter(|c| c.visible).cloned().collect();
            assert_eq!(shown, removed, "{} layout", layout.name());
            assert_eq!(
                (with_hidden[1].bounds, with_hidden[3].bounds),
                hidden_before,
                "{} layout moved an invisible child",
                layout.name()
            );
        }
    }

    /// Dock, single-line stretched flex, and a star grid with stretched cells.
    fn stretching_layouts() -> Vec<Layout<u32>> {
        let mut dock = DockLayout::new();
        dock.set_dock(1, Dock::Top);
        dock.set_dock(2, Dock::Right);
        dock.set_dock(3, Dock::Bottom);
        let mut row = FlexLayout::new(FlexDirection::Row, 3);
        row.set_grow(0, 1.0);
        let mut column = FlexLayout::new(FlexDirection::ColumnReverse, 3);
        column.set_grow(4, 2.0);
        let mut grid = GridLayout::new();
        grid.add_columns([GridLength::star(), GridLength::stars(2.0), GridLength::star()]);
        grid.add_rows([GridLength::star(), GridLength::star()]);
        for key in 0..3 {
            grid.set_position(key, GridPosition::new(0, key as usize));
        }
        grid.set_position(3, GridPosition::spanning(1, 0, 1, 2));
        grid.set_position(4, GridPosition::new(1, 2));
        vec![dock.into(), row.into(), column.into(), grid.into()]
    }

    #[test]
    fn stretched_children_stay_inside_the_content_rect() {
        let paddings = [Padding::ZERO, Padding::all(3), Padding::new(10, 0, 5, 7)];
        for layout in stretching_layouts() {
            for width in (140..=380).step_by(60) {
                for height in (100..=300).step_by(50) {
                    for padding in paddings {
                        let frame = ContainerFrame::new(Rect::new(9, 9, width, height), padding);
                        let mut children = sample_children();
                        layout.apply(frame, &mut children);
                        for child in &children {
                            let m = child.margin;
                            let slot = frame
                                .content()
                                .inset(Padding::new(m.left, m.top, m.right, m.bottom));
                            let b = child.bounds;
                            assert!(
                                b.x >= slot.x
                                    && b.y >= slot.y
                                    && b.right() <= slot.right()
                                    && b.bottom() <= slot.bottom(),
                                "{} in {width}x{height} {padding:?}: {b:?} outside {slot:?}",
                                layout.name()
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn forget_drops_child_settings() {
        let mut layout: Layout<u32> = DockLayout::new().into();
        layout.as_dock_mut().unwrap().set_dock(7, Dock::Bottom);
        layout.forget(&7);
        assert_eq!(layout.as_dock_mut().unwrap().dock(&7), Dock::Left);
        assert!(layout.as_grid_mut().is_none(), "dock is not a grid");
    }
}
