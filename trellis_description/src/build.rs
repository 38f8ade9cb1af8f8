// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Building element trees from descriptions, and re-applying descriptions to live trees.

use hashbrown::HashMap;
use serde_json::{Map, Value};
use trellis_layout::{Layout, Rect, Size};
use trellis_tree::{Anchor, Element, ElementFlags, LayoutReport, NodeId, Tree};

use crate::convert::{anchor_from_name, apply_item, strategy_from};
use crate::data::{ElementData, LayoutDescription};
use crate::error::{DescriptionError, Result};
use crate::io::check_version;
use crate::snapshot::describe_children;

/// How an element type is built.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Role {
    /// Holds children.
    Container,
    /// A leaf control.
    Control,
}

fn role_of(kind: &str) -> Option<Role> {
    match kind {
        "Panel" | "Container" => Some(Role::Container),
        "Button" | "Label" | "TextBox" | "CheckBox" | "Slider" | "Image" => Some(Role::Control),
        _ => None,
    }
}

/// A tree built from a [`LayoutDescription`].
///
/// The root container has id `root`, name `Root`, and the description's
/// width and height.
#[derive(Debug)]
pub struct BuiltLayout {
    /// The element tree.
    pub tree: Tree,
    /// The root container.
    pub root: NodeId,
    elements: HashMap<String, NodeId>,
    properties: HashMap<NodeId, Map<String, Value>>,
}

impl BuiltLayout {
    /// The node built for the element with application id `id`.
    pub fn get(&self, id: &str) -> Option<NodeId> {
        self.elements.get(id).copied()
    }

    /// The property bag the description gave `node`, if it had one.
    pub fn properties(&self, node: NodeId) -> Option<&Map<String, Value>> {
        self.properties.get(&node)
    }

    /// Every built element with a non-empty id.
    pub fn ids(&self) -> impl Iterator<Item = (&str, NodeId)> + '_ {
        self.elements.iter().map(|(id, &node)| (id.as_str(), node))
    }

    /// Lay out everything that is dirty under the root.
    pub fn update(&mut self) -> LayoutReport {
        self.tree.update(self.root)
    }

    /// Describe the current tree, property bags included.
    pub fn describe(&self, name: &str) -> LayoutDescription {
        let bounds = self
            .tree
            .element(self.root)
            .map_or(Rect::ZERO, |e| e.bounds);
        LayoutDescription {
            name: name.to_owned(),
            width: bounds.width,
            height: bounds.height,
            layout: self.tree.layout(self.root).map(crate::convert::strategy_to),
            elements: describe_children(&self.tree, self.root, Some(&self.properties)),
            ..LayoutDescription::default()
        }
    }

    fn build_element(&mut self, parent: NodeId, data: &ElementData) -> Result<()> {
        let Some(role) = role_of(&data.kind) else {
            log::warn!(
                "skipping element {:?}: unknown type {:?}",
                data.id,
                data.kind
            );
            return Ok(());
        };
        let node = self.tree.insert(Some(parent), element_from(data)?);
        if !data.id.is_empty() && self.elements.insert(data.id.clone(), node).is_some() {
            return Err(DescriptionError::DuplicateId(data.id.clone()));
        }
        if !data.properties.is_empty() {
            self.properties.insert(node, data.properties.clone());
        }
        configure(&mut self.tree, node, data);

        match role {
            Role::Container => {
                for child in &data.children {
                    self.build_element(node, child)?;
                }
            }
            Role::Control if !data.children.is_empty() => {
                log::warn!(
                    "ignoring {} children of control {:?}",
                    data.children.len(),
                    data.id
                );
            }
            Role::Control => {}
        }
        Ok(())
    }
}

/// Build a fresh tree from `description`.
///
/// Elements of unknown type are skipped (with their subtree) and logged.
/// Fails on an unsupported version, a negative size, or a repeated id.
pub fn build(description: &LayoutDescription) -> Result<BuiltLayout> {
    check_version(&description.version)?;
    if description.width < 0 || description.height < 0 {
        return Err(DescriptionError::NegativeSize {
            id: "root".into(),
            width: description.width,
            height: description.height,
        });
    }
    let mut tree = Tree::new();
    let root = tree.insert(
        None,
        Element::new("Root", Rect::new(0, 0, description.width, description.height))
            .with_id("root")
            .with_kind("Container"),
    );
    if let Some(layout) = &description.layout {
        tree.set_layout(root, strategy_from(layout));
    }

    let mut built = BuiltLayout {
        tree,
        root,
        elements: HashMap::new(),
        properties: HashMap::new(),
    };
    for data in &description.elements {
        built.build_element(root, data)?;
    }
    log::debug!(
        "built layout {:?} with {} identified elements",
        description.name,
        built.elements.len()
    );
    Ok(built)
}

/// Update the elements of an existing tree from `description`.
///
/// Each described element is matched among the children of its container by
/// name first, then by id anywhere below the container. Matched elements take
/// the described geometry, spacing, size limits, flags, draw order, anchor, strategy,
/// and per-child settings; unmatched ones are ignored. Returns the matched
/// nodes by id.
///
/// Every matched element is validated before the tree is touched, so an error
/// leaves the tree as it was.
pub fn apply_to_existing(
    tree: &mut Tree,
    root: NodeId,
    description: &LayoutDescription,
) -> Result<HashMap<String, NodeId>> {
    check_version(&description.version)?;
    let root_layout: Option<Layout<NodeId>> = description.layout.as_ref().map(strategy_from);
    let mut planned = Vec::new();
    for data in &description.elements {
        plan_element(tree, root, data, &mut planned)?;
    }

    if let Some(layout) = root_layout {
        tree.set_layout(root, layout);
    }
    let mut matched = HashMap::new();
    for Planned {
        node,
        element,
        data,
    } in planned
    {
        tree.set_bounds(node, element.bounds);
        tree.set_margin(node, element.margin);
        tree.set_padding(node, element.padding);
        tree.set_min_size(node, element.min_size);
        tree.set_max_size(node, element.max_size);
        tree.set_flags(node, element.flags);
        tree.set_draw_order(node, element.draw_order);
        tree.set_anchor(node, element.anchor);
        configure(tree, node, data);
        if !data.id.is_empty() {
            matched.insert(data.id.clone(), node);
        }
    }
    Ok(matched)
}

/// A matched node and the state its description gives it.
struct Planned<'a> {
    node: NodeId,
    element: Element,
    data: &'a ElementData,
}

/// Match `data` and its subtree below `container`, parents before children.
fn plan_element<'a>(
    tree: &Tree,
    container: NodeId,
    data: &'a ElementData,
    planned: &mut Vec<Planned<'a>>,
) -> Result<()> {
    let by_name = (!data.name.is_empty())
        .then(|| tree.child_by_name(container, &data.name))
        .flatten();
    let by_id = || {
        (!data.id.is_empty())
            .then(|| tree.find_by_id(container, &data.id))
            .flatten()
            .filter(|&n| n != container)
    };
    let Some(node) = by_name.or_else(by_id) else {
        log::debug!(
            "no element matches name {:?} or id {:?}",
            data.name,
            data.id
        );
        return Ok(());
    };

    planned.push(Planned {
        node,
        element: element_from(data)?,
        data,
    });
    for child in &data.children {
        plan_element(tree, node, child, planned)?;
    }
    Ok(())
}

/// Attach the described strategy to `node` and its item settings to the parent's strategy.
fn configure(tree: &mut Tree, node: NodeId, data: &ElementData) {
    if let Some(layout) = &data.layout {
        tree.set_layout(node, strategy_from(layout));
    }
    if data.item.is_empty() {
        return;
    }
    if let Some(parent) = tree.parent_of(node)
        && let Some(layout) = tree.layout_mut(parent)
    {
        apply_item(layout, node, &data.item);
    } else {
        log::trace!(
            "item settings of {:?} ignored: parent has no strategy",
            data.id
        );
    }
}

fn element_from(data: &ElementData) -> Result<Element> {
    if data.width < 0 || data.height < 0 {
        return Err(DescriptionError::NegativeSize {
            id: data.id.clone(),
            width: data.width,
            height: data.height,
        });
    }
    let mut flags = ElementFlags::empty();
    flags.set(ElementFlags::VISIBLE, data.is_visible);
    flags.set(ElementFlags::ENABLED, data.is_enabled);
    let min = Size::new(data.min_width.unwrap_or(0), data.min_height.unwrap_or(0));
    let max = Size::new(
        data.max_width.unwrap_or(i32::MAX),
        data.max_height.unwrap_or(i32::MAX),
    );
    let anchor = anchor_from_name(&data.anchor).unwrap_or_else(|| {
        log::warn!(
            "element {:?}: unknown anchor {:?}, using TopLeft",
            data.id,
            data.anchor
        );
        Anchor::default()
    });
    Ok(
        Element::new(data.name.clone(), Rect::new(data.x, data.y, data.width, data.height))
            .with_id(data.id.clone())
            .with_kind(data.kind.clone())
            .with_margin(data.margin.into())
            .with_padding(data.padding.into())
            .with_size_limits(min, max)
            .with_draw_order(data.draw_order)
            .with_anchor(anchor)
            .with_flags(flags),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ItemData, LayoutData, SpacingData};
    use crate::io::from_json;
    use trellis_layout::{Alignment, Dock};

    const SETTINGS: &str = r##"{
        "version": "1.0",
        "name": "settings",
        "width": 400,
        "height": 300,
        "layout": { "type": "Dock" },
        "elements": [
            {
                "id": "header", "type": "Label", "name": "Header", "height": 40,
                "item": { "dock": "Top" },
                "properties": { "text": "Settings" }
            },
            {
                "id": "body", "type": "Panel", "name": "Body",
                "padding": { "left": 8, "top": 8, "right": 8, "bottom": 8 },
                "layout": { "type": "Stack", "spacing": 0 },
                "children": [
                    { "id": "volume", "type": "Slider", "name": "Volume", "height": 20 },
                    { "id": "mystery", "type": "Gizmo", "name": "Mystery", "height": 20 },
                    { "id": "mute", "type": "CheckBox", "name": "Mute", "height": 20 }
                ]
            }
        ]
    }"##;

    #[test]
    fn builds_and_lays_out_a_description() {
        let mut built = build(&from_json(SETTINGS).unwrap()).unwrap();
        let report = built.update();
        assert!(!report.is_empty(), "first pass does work");

        let tree = &built.tree;
        let root = tree.element(built.root).unwrap();
        assert_eq!((root.id.as_str(), root.name.as_str()), ("root", "Root"));
        assert_eq!(root.bounds, Rect::new(0, 0, 400, 300));

        let header = built.get("header").unwrap();
        let body = built.get("body").unwrap();
        assert_eq!(tree.element(header).unwrap().bounds, Rect::new(0, 0, 400, 40));
        assert_eq!(tree.element(body).unwrap().bounds, Rect::new(0, 40, 400, 260));
        let mute = built.get("mute").unwrap();
        assert_eq!(tree.element(mute).unwrap().bounds, Rect::new(8, 28, 384, 20));
        assert_eq!(tree.element(mute).unwrap().kind, "CheckBox");

        assert_eq!(built.get("mystery"), None, "unknown types are skipped");
        assert_eq!(tree.children_of(body).len(), 2);
        assert_eq!(built.properties(header).unwrap()["text"], "Settings");
        assert_eq!(built.ids().count(), 4);
    }

    #[test]
    fn rejects_bad_descriptions() {
        let mut description = LayoutDescription {
            elements: vec![
                ElementData::new("Button", "twice"),
                ElementData::new("Label", "twice"),
            ],
            ..LayoutDescription::default()
        };
        assert!(
            matches!(build(&description), Err(DescriptionError::DuplicateId(id)) if id == "twice"),
            "duplicate ids"
        );

        let mut negative = ElementData::new("Button", "neg");
        negative.width = -5;
        description.elements = vec![negative];
        assert!(
            matches!(build(&description), Err(DescriptionError::NegativeSize { width: -5, .. })),
            "negative width"
        );

        description.elements.clear();
        description.version = "2.0".into();
        assert!(
            matches!(build(&description), Err(DescriptionError::UnsupportedVersion(_))),
            "unsupported version"
        );
    }

    #[test]
    fn controls_do_not_take_children() {
        let mut button = ElementData::new("Button", "ok");
        button.children.push(ElementData::new("Label", "caption"));
        let description = LayoutDescription {
            elements: vec![button],
            ..LayoutDescription::default()
        };
        let built = build(&description).unwrap();
        let ok = built.get("ok").unwrap();
        assert!(built.tree.children_of(ok).is_empty(), "control children are dropped");
        assert_eq!(built.get("caption"), None);
    }

    #[test]
    fn applies_to_an_existing_tree() {
        let mut built = build(&from_json(SETTINGS).unwrap()).unwrap();
        built.update();
        let body = built.get("body").unwrap();
        let volume = built.get("volume").unwrap();

        let mut body_data = ElementData::new("Panel", "body");
        body_data.name = "Body".into();
        body_data.padding = SpacingData {
            left: 0,
            top: 0,
            right: 0,
            bottom: 0,
        };
        body_data.layout = Some(LayoutData::Dock {
            last_child_fill: false,
        });
        let mut volume_data = ElementData::new("Slider", "volume");
        volume_data.name = "renamed".into();
        volume_data.width = 50;
        volume_data.item = ItemData {
            dock: Some(Dock::Right),
            ..ItemData::default()
        };
        let mut missing = ElementData::new("Button", "nowhere");
        missing.name = "Nowhere".into();
        body_data.children = vec![volume_data, missing];
        let update = LayoutDescription {
            elements: vec![body_data],
            ..LayoutDescription::default()
        };

        let matched = apply_to_existing(&mut built.tree, built.root, &update).unwrap();
        assert_eq!(matched.len(), 2, "body by name, volume by id");
        assert_eq!(matched["volume"], volume);
        assert!(
            matches!(built.tree.layout(body), Some(Layout::Dock(_))),
            "strategy replaced"
        );

        built.update();
        assert_eq!(
            built.tree.element(volume).unwrap().bounds,
            Rect::new(350, 0, 50, 260)
        );
    }

    #[test]
    fn failed_apply_leaves_the_tree_untouched() {
        let mut built = build(&from_json(SETTINGS).unwrap()).unwrap();
        built.update();
        let header = built.get("header").unwrap();
        let mute = built.get("mute").unwrap();

        let update = from_json(
            r#"{
                "layout": { "type": "Stack" },
                "elements": [
                    { "id": "header", "name": "Header", "height": 55, "anchor": "Fill" },
                    { "id": "body", "name": "Body", "children": [
                        { "id": "mute", "name": "Mute", "width": -1 }
                    ] }
                ]
            }"#,
        )
        .unwrap();
        let err = apply_to_existing(&mut built.tree, built.root, &update).unwrap_err();
        assert!(
            matches!(err, DescriptionError::NegativeSize { ref id, .. } if id == "mute"),
            "{err}"
        );

        let tree = &built.tree;
        assert_eq!(tree.element(header).unwrap().bounds, Rect::new(0, 0, 400, 40));
        assert_eq!(tree.element(header).unwrap().anchor, Anchor::TOP_LEFT);
        assert_eq!(tree.element(mute).unwrap().bounds, Rect::new(8, 28, 384, 20));
        assert!(
            matches!(tree.layout(built.root), Some(Layout::Dock(_))),
            "root strategy kept"
        );
        assert!(!tree.is_dirty(built.root), "nothing invalidated");
        assert!(!tree.is_dirty(header), "header untouched");
    }

    #[test]
    fn anchors_are_built_and_described() {
        let description = from_json(
            r#"{
                "elements": [
                    { "id": "a", "type": "Button", "anchor": "Fill" },
                    { "id": "b", "type": "Button", "anchor": "Top, Right" },
                    { "id": "c", "type": "Button", "anchor": "Sideways" },
                    { "id": "d", "type": "Button" }
                ]
            }"#,
        )
        .unwrap();
        let built = build(&description).unwrap();
        let anchor = |id| built.tree.element(built.get(id).unwrap()).unwrap().anchor;
        assert_eq!(anchor("a"), Anchor::FILL);
        assert_eq!(anchor("b"), Anchor::TOP_RIGHT);
        assert_eq!(anchor("c"), Anchor::TOP_LEFT, "unknown names fall back");
        assert_eq!(anchor("d"), Anchor::TOP_LEFT);

        let described = built.describe("anchors");
        let names: Vec<_> = described.elements.iter().map(|e| e.anchor.as_str()).collect();
        assert_eq!(names, ["Fill", "TopRight", "TopLeft", "TopLeft"]);
    }

    #[test]
    fn describe_round_trips_structure() {
        let mut built = build(&from_json(SETTINGS).unwrap()).unwrap();
        built.update();
        let described = built.describe("settings");
        assert_eq!((described.width, described.height), (400, 300));
        assert!(
            matches!(described.layout, Some(LayoutData::Dock { last_child_fill: true })),
            "root strategy"
        );
        let header = &described.elements[0];
        assert_eq!(header.item.dock, Some(Dock::Top));
        assert_eq!(header.properties["text"], "Settings");
        let body = &described.elements[1];
        assert_eq!(body.children.len(), 2);
        assert!(
            matches!(
                body.layout,
                Some(LayoutData::Stack {
                    horizontal_alignment: Alignment::Stretch,
                    spacing: 0,
                    ..
                })
            ),
            "stack settings"
        );

        let rebuilt = build(&described).unwrap();
        let mute = rebuilt.get("mute").unwrap();
        assert_eq!(
            rebuilt.tree.element(mute).unwrap().bounds,
            Rect::new(8, 28, 384, 20),
            "laid-out bounds are exported"
        );
    }
}
