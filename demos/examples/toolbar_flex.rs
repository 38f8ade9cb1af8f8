// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A wrapping flex toolbar built directly on the tree, shown at several widths.
//!
//! Run:
//! - `cargo run -p trellis_demos --example toolbar_flex`

use trellis_layout::{
    Alignment, Distribution, FlexDirection, FlexLayout, FlexWrap, Layout, Margin, Padding, Rect,
    Size,
};
use trellis_tree::{Element, Tree};

fn main() {
    env_logger::init();

    let mut tree = Tree::new();
    let toolbar = tree.insert(
        None,
        Element::new("toolbar", Rect::new(0, 0, 420, 0)).with_padding(Padding::all(6)),
    );

    let mut flex = FlexLayout::new(FlexDirection::Row, 0);
    flex.wrap = FlexWrap::Wrap;
    flex.column_gap = 6;
    flex.row_gap = 4;
    flex.align_items = Alignment::Center;
    flex.align_content = Alignment::Start;
    flex.justify_content = Distribution::Start;
    tree.set_layout(toolbar, flex);

    let labels = ["New", "Open", "Save", "Undo", "Redo", "Search", "Settings"];
    let mut buttons = Vec::new();
    for (i, label) in labels.iter().enumerate() {
        let width = 40 + 8 * label.len() as i32;
        let height = if i % 3 == 0 { 32 } else { 24 };
        let button = tree.insert(
            Some(toolbar),
            Element::new(*label, Rect::new(0, 0, width, height))
                .with_kind("Button")
                .with_margin(Margin::symmetric(2, 0)),
        );
        buttons.push(button);
    }

    // The search box soaks up spare space on its line.
    if let Some(flex) = tree.layout_mut(toolbar).and_then(Layout::as_flex_mut) {
        flex.set_grow(buttons[5], 1.0);
        flex.set_basis(buttons[5], Some(120));
    }

    for width in [420, 300, 640] {
        let measured = tree.measure(toolbar).unwrap_or(Size::ZERO);
        tree.set_size(toolbar, Size::new(width, measured.height.max(80)));
        tree.update(toolbar);
        println!("toolbar at {width}px (single-line preference {measured:?}):");
        for &button in &buttons {
            if let Some(e) = tree.element(button) {
                println!("  {:<9} {:?}", e.name, e.bounds);
            }
        }
    }
}
