// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Build a window from a JSON description, lay it out, resize it, and export it again.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p trellis_demos --example settings_window`

use kurbo::Point;
use trellis_description::{DescriptionError, build, from_json, snapshot_layout, to_json};
use trellis_tree::{NodeId, Tree};

fn print_tree(tree: &Tree, node: NodeId, depth: usize) {
    if let (Some(element), Some(world)) = (tree.element(node), tree.world_bounds(node)) {
        println!(
            "{:indent$}{} [{}] local={:?} world=({}, {}) {}x{}",
            "",
            element.name,
            element.kind,
            (element.bounds.x, element.bounds.y),
            world.x,
            world.y,
            world.width,
            world.height,
            indent = depth * 2
        );
    }
    for &child in tree.children_of(node) {
        print_tree(tree, child, depth + 1);
    }
}

fn main() -> Result<(), DescriptionError> {
    env_logger::init();

    let description = from_json(include_str!("../layouts/settings.json"))?;
    let mut built = build(&description)?;
    let report = built.update();
    log::info!(
        "first pass: {} containers, {} children moved",
        report.relaid_out.len(),
        report.moved.len()
    );
    print_tree(&built.tree, built.root, 0);

    if let Some(apply) = built.get("apply") {
        let hit = built.tree.hit_test_point(built.root, Point::new(600.0, 380.0));
        println!("hit at (600, 380): {hit:?} (apply button is {apply:?})");
    }

    built
        .tree
        .set_size(built.root, trellis_layout::Size::new(800, 480));
    let report = built.update();
    println!(
        "\nafter resize to 800x480: {} containers relaid out",
        report.relaid_out.len()
    );
    for change in &report.moved {
        if let Some(element) = built.tree.element(change.node) {
            println!("  {}: {:?} -> {:?}", element.name, change.old, change.new);
        }
    }

    if let Some(exported) = snapshot_layout(&built.tree, built.root, "settings (resized)") {
        println!("\n{}", to_json(&exported)?);
    }
    Ok(())
}
