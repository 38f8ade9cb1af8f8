// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Incremental layout: which containers run after different kinds of edits.
//!
//! Run:
//! - `RUST_LOG=trellis_tree=debug cargo run -p trellis_demos --example nested_update`

use trellis_layout::{
    Alignment, Dock, DockLayout, GridLayout, GridLength, GridPosition, Layout, Orientation, Rect,
    Size, StackLayout, WrapLayout,
};
use trellis_tree::{Element, LayoutReport, Tree};

fn describe(tree: &Tree, what: &str, report: &LayoutReport) {
    let names: Vec<&str> = report
        .relaid_out
        .iter()
        .filter_map(|&id| tree.element(id).map(|e| e.name.as_str()))
        .collect();
    println!(
        "{what:<28} relaid out {names:?}, {} children moved",
        report.moved.len()
    );
}

fn main() {
    env_logger::init();

    let mut tree = Tree::new();
    let window = tree.insert(None, Element::new("window", Rect::new(0, 0, 800, 600)));
    let sidebar = tree.insert(Some(window), Element::new("sidebar", Rect::new(0, 0, 200, 0)));
    let content = tree.insert(Some(window), Element::new("content", Rect::ZERO));

    let mut dock = DockLayout::new();
    dock.set_dock(sidebar, Dock::Left);
    tree.set_layout(window, dock);

    let mut stack = StackLayout::new(Orientation::Vertical, 4);
    stack.horizontal_alignment = Alignment::Stretch;
    tree.set_layout(sidebar, stack);
    for name in ["inbox", "drafts", "sent"] {
        tree.insert(Some(sidebar), Element::new(name, Rect::new(0, 0, 0, 28)));
    }

    let mut grid = GridLayout::new();
    grid.add_columns([GridLength::star(); 2]);
    grid.add_rows([GridLength::Auto, GridLength::star()]);
    let tags = tree.insert(Some(content), Element::new("tags", Rect::new(0, 0, 0, 0)));
    let preview = tree.insert(Some(content), Element::new("preview", Rect::ZERO));
    grid.set_position(tags, GridPosition::spanning(0, 0, 1, 2));
    grid.set_position(preview, GridPosition::spanning(1, 0, 1, 2));
    tree.set_layout(content, grid);
    tree.set_layout(tags, WrapLayout::new(Orientation::Horizontal, 6));
    for tag in ["work", "family", "travel", "receipts", "later"] {
        tree.insert(Some(tags), Element::new(tag, Rect::new(0, 0, 70, 22)));
    }
    if let Some(height) = tree.measure(tags).map(|s| s.height) {
        tree.set_size(tags, Size::new(0, height));
    }

    let report = tree.update(window);
    describe(&tree, "initial", &report);

    let report = tree.update(window);
    describe(&tree, "nothing changed", &report);

    tree.set_draw_order(preview, 10);
    let report = tree.update(window);
    describe(&tree, "draw order only", &report);

    tree.set_size(window, Size::new(1024, 600));
    let report = tree.update(window);
    describe(&tree, "window resized", &report);

    if let Some(stack) = tree.layout_mut(sidebar).and_then(Layout::as_stack_mut) {
        stack.spacing = 8;
    }
    let report = tree.update(window);
    describe(&tree, "sidebar spacing", &report);

    tree.set_visible(tags, false);
    let report = tree.update(window);
    describe(&tree, "tags hidden", &report);

    if let Some(bounds) = tree.element(preview).map(|e| e.bounds) {
        println!("preview now fills {bounds:?}");
    }
}
