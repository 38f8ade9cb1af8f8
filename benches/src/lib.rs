// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixtures shared by the Trellis benchmarks.

use trellis_layout::{
    AbsoluteLayout, Alignment, Dock, DockLayout, FlexDirection, FlexLayout, FlexWrap, GridLayout,
    GridLength, GridPosition, Layout, LayoutChild, Margin, Orientation, Rect, StackLayout,
    WrapLayout,
};
use trellis_tree::{Element, NodeId, Tree};

/// `n` children with a spread of sizes and small margins.
pub fn children(n: u32) -> Vec<LayoutChild<u32>> {
    (0..n)
        .map(|key| {
            let w = 20 + (key % 7) as i32 * 6;
            let h = 12 + (key % 5) as i32 * 4;
            LayoutChild::new(key, Rect::new(0, 0, w, h)).with_margin(Margin::all((key % 3) as i32))
        })
        .collect()
}

/// One configured instance of each strategy, with per-child settings for keys `0..n`.
pub fn strategies(n: u32) -> Vec<Layout<u32>> {
    let mut dock = DockLayout::new();
    let mut stack = StackLayout::new(Orientation::Vertical, 4);
    let mut grid = GridLayout::new();
    grid.add_columns([
        GridLength::Auto,
        GridLength::star(),
        GridLength::stars(2.0),
        GridLength::pixel(60),
    ]);
    let rows = n.div_ceil(4).max(1);
    grid.add_rows((0..rows).map(|r| {
        if r % 2 == 0 {
            GridLength::Auto
        } else {
            GridLength::star()
        }
    }));
    let mut flex = FlexLayout::new(FlexDirection::Row, 4);
    flex.wrap = FlexWrap::Wrap;
    flex.align_items = Alignment::Center;

    for key in 0..n {
        let edge = match key % 4 {
            0 => Dock::Left,
            1 => Dock::Top,
            2 => Dock::Right,
            _ => Dock::Bottom,
        };
        dock.set_dock(key, edge);
        stack.set_order(key, (key % 3) as i32);
        grid.set_position(key, GridPosition::new((key / 4) as usize, (key % 4) as usize));
        flex.set_grow(key, (key % 3) as f32);
        flex.set_order(key, (key % 5) as i32);
    }

    vec![
        AbsoluteLayout.into(),
        dock.into(),
        stack.into(),
        WrapLayout::new(Orientation::Horizontal, 4).into(),
        grid.into(),
        flex.into(),
    ]
}

/// A tree of stacked panels `depth` levels deep with `fanout` children per panel.
///
/// Returns the tree, its root, and the deepest panels.
pub fn nested_tree(depth: u32, fanout: u32) -> (Tree, NodeId, Vec<NodeId>) {
    let mut tree = Tree::new();
    let root = tree.insert(None, Element::new("root", Rect::new(0, 0, 1280, 800)));
    let mut level = vec![root];
    for d in 0..depth {
        let orientation = if d % 2 == 0 {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        let mut next = Vec::with_capacity(level.len() * fanout as usize);
        for &parent in &level {
            let mut stack = StackLayout::new(orientation, 2);
            stack.vertical_alignment = Alignment::Stretch;
            tree.set_layout(parent, stack);
            for i in 0..fanout {
                next.push(tree.insert(
                    Some(parent),
                    Element::new("panel", Rect::new(0, 0, 40 + i as i32, 30)),
                ));
            }
        }
        level = next;
    }
    (tree, root, level)
}
