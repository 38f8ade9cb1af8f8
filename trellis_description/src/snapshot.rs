// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Exporting live trees back into descriptions.

use hashbrown::HashMap;
use serde_json::{Map, Value};
use trellis_tree::{NodeId, Tree};

use crate::convert::{anchor_name, item_of, strategy_to};
use crate::data::{ElementData, ItemData, LayoutDescription};

/// Describe `node` and its subtree.
///
/// Bounds are exported as they are now, so laid-out children carry their
/// computed geometry. Returns `None` for a stale id.
pub fn snapshot(tree: &Tree, node: NodeId) -> Option<ElementData> {
    describe_node(tree, node, None)
}

/// Describe a whole tree rooted at `root`: the root's size and strategy
/// become the description's, its children become the top-level elements.
pub fn snapshot_layout(tree: &Tree, root: NodeId, name: &str) -> Option<LayoutDescription> {
    let bounds = tree.element(root)?.bounds;
    Some(LayoutDescription {
        name: name.to_owned(),
        width: bounds.width,
        height: bounds.height,
        layout: tree.layout(root).map(strategy_to),
        elements: describe_children(tree, root, None),
        ..LayoutDescription::default()
    })
}

pub(crate) fn describe_children(
    tree: &Tree,
    node: NodeId,
    properties: Option<&HashMap<NodeId, Map<String, Value>>>,
) -> Vec<ElementData> {
    tree.children_of(node)
        .iter()
        .filter_map(|&child| describe_node(tree, child, properties))
        .collect()
}

fn describe_node(
    tree: &Tree,
    node: NodeId,
    properties: Option<&HashMap<NodeId, Map<String, Value>>>,
) -> Option<ElementData> {
    let element = tree.element(node)?;
    let bounds = element.bounds;
    let item = tree
        .parent_of(node)
        .and_then(|parent| tree.layout(parent))
        .map_or_else(ItemData::default, |layout| item_of(layout, node));
    Some(ElementData {
        id: element.id.clone(),
        kind: element.kind.clone(),
        name: element.name.clone(),
        x: bounds.x,
        y: bounds.y,
        width: bounds.width,
        height: bounds.height,
        anchor: anchor_name(element.anchor),
        is_enabled: element.is_enabled(),
        is_visible: element.is_visible(),
        draw_order: element.draw_order,
        margin: element.margin.into(),
        padding: element.padding.into(),
        min_width: Some(element.min_size.width).filter(|&w| w != 0),
        min_height: Some(element.min_size.height).filter(|&h| h != 0),
        max_width: Some(element.max_size.width).filter(|&w| w != i32::MAX),
        max_height: Some(element.max_size.height).filter(|&h| h != i32::MAX),
        properties: properties
            .and_then(|p| p.get(&node))
            .cloned()
            .unwrap_or_default(),
        layout: tree.layout(node).map(strategy_to),
        item,
        children: describe_children(tree, node, properties),
    })
}
