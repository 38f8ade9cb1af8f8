// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, mutation, layout passes, queries.

use alloc::{vec, vec::Vec};
use kurbo::Point;
use trellis_layout::{
    AbsoluteLayout, ContainerFrame, Layout, LayoutChild, LayoutStrategy, Margin, Padding, Rect,
    Size,
};

use crate::report::{BoundsChange, LayoutReport};
use crate::types::{Anchor, Element, ElementFlags, NodeId};

/// An arena of elements where any element can be a container with a layout strategy.
///
/// Each container tracks its own dirty flag. Mutations that change a container's
/// available space or its children set the flag, and [`Tree::update`] re-runs the
/// strategy of every dirty, enabled container below a root, top-down. Children
/// whose bounds change during that pass become dirty themselves, so nested
/// containers follow their parent in the same pass.
///
/// ## Example
///
/// ```rust
/// use trellis_layout::{Orientation, Rect, StackLayout};
/// use trellis_tree::{Element, Tree};
///
/// let mut tree = Tree::new();
/// let root = tree.insert(None, Element::new("root", Rect::new(0, 0, 100, 100)));
/// tree.set_layout(root, StackLayout::new(Orientation::Vertical, 0));
/// let a = tree.insert(Some(root), Element::new("a", Rect::new(0, 0, 0, 30)));
/// let b = tree.insert(Some(root), Element::new("b", Rect::new(0, 0, 0, 20)));
///
/// let report = tree.update(root);
/// assert_eq!(report.relaid_out, vec![root]);
/// assert_eq!(tree.element(b).unwrap().bounds, Rect::new(0, 30, 100, 20));
/// assert_eq!(tree.child_by_name(root, "a"), Some(a));
/// ```
pub struct Tree {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
}

impl core::fmt::Debug for Tree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let dirty = self.nodes.iter().flatten().filter(|n| n.dirty).count();
        f.debug_struct("Tree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("nodes_dirty", &dirty)
            .field("free_list", &self.free_list.len())
            .finish_non_exhaustive()
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    element: Element,
    layout: Option<Layout<NodeId>>,
    dirty: bool,
}

impl Node {
    fn new(generation: u32, element: Element) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            element,
            layout: None,
            dirty: true,
        }
    }
}

impl Tree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
        }
    }

    // --- structure ---

    /// Insert a new element as the last child of `parent` (or as a root if `None`).
    ///
    /// A stale `parent` is ignored and the element becomes a root.
    pub fn insert(&mut self, parent: Option<NodeId>, element: Element) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, element));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, element)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = NodeId::new(idx, generation);
        match parent {
            Some(p) if self.is_alive(p) => self.link_parent(id, p),
            Some(p) => log::warn!("insert under stale parent {p:?}; {id:?} becomes a root"),
            None => {}
        }
        id
    }

    /// Remove a node and its whole subtree. The ids become stale immediately.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.detach(id, parent);
        }
        let children = core::mem::take(&mut self.node_mut(id).children);
        for child in children {
            self.node_mut(child).parent = None;
            self.remove(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Make `child` the last child of `parent`, detaching it from any previous parent.
    ///
    /// Adding a child that is already present is a no-op. Returns `false` (and
    /// changes nothing) if either id is stale or if `child` is `parent` or one of
    /// its ancestors.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if !self.is_alive(parent) || !self.is_alive(child) {
            return false;
        }
        if self.is_ancestor_or_self(child, parent) {
            log::warn!("refusing to add {child:?} under {parent:?}: it would create a cycle");
            return false;
        }
        match self.node(child).parent {
            Some(p) if p == parent => return true,
            Some(old) => self.detach(child, old),
            None => {}
        }
        self.link_parent(child, parent);
        true
    }

    /// Detach `child` from `parent`, leaving it alive as a root.
    ///
    /// Returns `false` if `child` is not a child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if !self.is_alive(parent) || self.parent_of(child) != Some(parent) {
            return false;
        }
        self.detach(child, parent);
        true
    }

    /// Detach every child of `parent`, leaving them alive as roots.
    pub fn clear_children(&mut self, parent: NodeId) {
        let Some(p) = self.node_opt_mut(parent) else {
            return;
        };
        let children = core::mem::take(&mut p.children);
        if let Some(layout) = p.layout.as_mut() {
            for child in &children {
                layout.forget(child);
            }
        }
        p.dirty = true;
        for child in children {
            self.node_mut(child).parent = None;
        }
    }

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is live if its slot exists and its generation matches the
    /// generation currently stored in that slot.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .is_some_and(|n| n.generation == id.1)
    }

    /// Returns the parent of a node if live, or `None` for roots or stale ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id).and_then(|n| n.parent)
    }

    /// Get the children of a node in insertion order, or an empty slice if the node is stale.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.node_opt(id).map_or(&[], |n| &n.children)
    }

    /// The element data of a live node.
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.node_opt(id).map(|n| &n.element)
    }

    /// The first direct child of `parent` named `name`.
    pub fn child_by_name(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.children_of(parent)
            .iter()
            .copied()
            .find(|&c| self.node(c).element.name == name)
    }

    /// The first node in depth-first order below (and including) `root` whose
    /// [`Element::id`] is `id`.
    pub fn find_by_id(&self, root: NodeId, id: &str) -> Option<NodeId> {
        if !self.is_alive(root) {
            return None;
        }
        let mut stack = vec![root];
        while let Some(current) = stack.pop() {
            let node = self.node(current);
            if node.element.id == id {
                return Some(current);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        None
    }

    // --- element setters ---

    /// Update bounds (clamped to a non-negative size).
    ///
    /// A change marks the node dirty so its children are laid out against the
    /// new space. A change of size also marks the parent dirty, since the size
    /// feeds the parent's measurement.
    pub fn set_bounds(&mut self, id: NodeId, bounds: Rect) {
        let bounds = bounds.clamped();
        if let Some(n) = self.node_opt_mut(id)
            && n.element.bounds != bounds
        {
            let old = n.element.bounds;
            n.element.bounds = bounds;
            n.dirty = true;
            let resized = old.width != bounds.width || old.height != bounds.height;
            let parent = n.parent;
            if resized {
                self.mark_dirty(parent);
            }
        }
    }

    /// Move a node within its parent, keeping its size.
    pub fn set_position(&mut self, id: NodeId, x: i32, y: i32) {
        if let Some(e) = self.element(id) {
            let b = e.bounds;
            self.set_bounds(id, Rect::new(x, y, b.width, b.height));
        }
    }

    /// Resize a node, keeping its position.
    pub fn set_size(&mut self, id: NodeId, size: Size) {
        if let Some(e) = self.element(id) {
            let b = e.bounds;
            self.set_bounds(id, Rect::new(b.x, b.y, size.width, size.height));
        }
    }

    /// Update padding. Marks the node dirty.
    pub fn set_padding(&mut self, id: NodeId, padding: Padding) {
        if let Some(n) = self.node_opt_mut(id)
            && n.element.padding != padding
        {
            n.element.padding = padding;
            n.dirty = true;
        }
    }

    /// Update margin. Marks the parent dirty.
    pub fn set_margin(&mut self, id: NodeId, margin: Margin) {
        if let Some(n) = self.node_opt_mut(id)
            && n.element.margin != margin
        {
            n.element.margin = margin;
            let parent = n.parent;
            self.mark_dirty(parent);
        }
    }

    /// Update the minimum size. Marks the parent dirty.
    pub fn set_min_size(&mut self, id: NodeId, min_size: Size) {
        if let Some(n) = self.node_opt_mut(id)
            && n.element.min_size != min_size
        {
            n.element.min_size = min_size;
            let parent = n.parent;
            self.mark_dirty(parent);
        }
    }

    /// Update the maximum size. Marks the parent dirty.
    pub fn set_max_size(&mut self, id: NodeId, max_size: Size) {
        if let Some(n) = self.node_opt_mut(id)
            && n.element.max_size != max_size
        {
            n.element.max_size = max_size;
            let parent = n.parent;
            self.mark_dirty(parent);
        }
    }

    /// Update flags. A visibility change marks the parent dirty.
    pub fn set_flags(&mut self, id: NodeId, flags: ElementFlags) {
        if let Some(n) = self.node_opt_mut(id)
            && n.element.flags != flags
        {
            let visibility_changed =
                (n.element.flags ^ flags).contains(ElementFlags::VISIBLE);
            n.element.flags = flags;
            let parent = n.parent;
            if visibility_changed {
                self.mark_dirty(parent);
            }
        }
    }

    /// Show or hide a node.
    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        if let Some(e) = self.element(id) {
            let mut flags = e.flags;
            flags.set(ElementFlags::VISIBLE, visible);
            self.set_flags(id, flags);
        }
    }

    /// Enable or disable a node's own layout updates.
    pub fn set_enabled(&mut self, id: NodeId, enabled: bool) {
        if let Some(e) = self.element(id) {
            let mut flags = e.flags;
            flags.set(ElementFlags::ENABLED, enabled);
            self.set_flags(id, flags);
        }
    }

    /// Update paint order among siblings. Does not affect layout.
    pub fn set_draw_order(&mut self, id: NodeId, draw_order: i32) {
        if let Some(n) = self.node_opt_mut(id) {
            n.element.draw_order = draw_order;
        }
    }

    /// Update the host attachment hint. Does not affect layout.
    pub fn set_anchor(&mut self, id: NodeId, anchor: Anchor) {
        if let Some(n) = self.node_opt_mut(id) {
            n.element.anchor = anchor;
        }
    }

    /// Assign a layout strategy, turning the node into a laid-out container.
    pub fn set_layout(&mut self, id: NodeId, layout: impl Into<Layout<NodeId>>) {
        if let Some(n) = self.node_opt_mut(id) {
            n.layout = Some(layout.into());
            n.dirty = true;
        }
    }

    /// Drop the node's layout strategy; its children keep their current bounds.
    pub fn clear_layout(&mut self, id: NodeId) {
        if let Some(n) = self.node_opt_mut(id)
            && n.layout.take().is_some()
        {
            n.dirty = true;
        }
    }

    /// The node's layout strategy, if any.
    pub fn layout(&self, id: NodeId) -> Option<&Layout<NodeId>> {
        self.node_opt(id).and_then(|n| n.layout.as_ref())
    }

    /// Mutable access to the node's layout strategy. Marks the node dirty.
    pub fn layout_mut(&mut self, id: NodeId) -> Option<&mut Layout<NodeId>> {
        let n = self.node_opt_mut(id)?;
        let layout = n.layout.as_mut()?;
        n.dirty = true;
        Some(layout)
    }

    /// Force the node to be laid out on the next [`Tree::update`].
    pub fn invalidate(&mut self, id: NodeId) {
        self.mark_dirty(Some(id));
    }

    /// Whether the node is waiting for a layout pass.
    pub fn is_dirty(&self, id: NodeId) -> bool {
        self.node_opt(id).is_some_and(|n| n.dirty)
    }

    // --- layout passes ---

    /// Lay out every dirty, enabled container under `root` (inclusive), parents first.
    ///
    /// A disabled node and its whole subtree are skipped; their dirty flags wait
    /// until the node is enabled again.
    pub fn update(&mut self, root: NodeId) -> LayoutReport {
        let mut report = LayoutReport::default();
        if !self.is_alive(root) {
            return report;
        }
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let node = self.node(id);
            if !node.element.is_enabled() {
                continue;
            }
            if node.dirty {
                self.relayout(id, &mut report);
            }
            stack.extend(self.node(id).children.iter().rev().copied());
        }
        report
    }

    /// Run the node's layout strategy now, regardless of its dirty flag.
    ///
    /// Children whose bounds change are marked dirty but not laid out; call
    /// [`Tree::update`] to cascade.
    pub fn apply_layout(&mut self, id: NodeId) -> LayoutReport {
        let mut report = LayoutReport::default();
        if self.is_alive(id) {
            self.relayout(id, &mut report);
        }
        report
    }

    /// The node's content-driven preferred size.
    ///
    /// Nodes without a strategy measure like [`AbsoluteLayout`].
    pub fn measure(&self, id: NodeId) -> Option<Size> {
        let node = self.node_opt(id)?;
        let children = self.layout_children(id);
        let padding = node.element.padding;
        Some(match node.layout.as_ref() {
            Some(layout) => layout.measure(padding, &children),
            None => LayoutStrategy::<NodeId>::measure(&AbsoluteLayout, padding, &children),
        })
    }

    // --- queries ---

    /// Bounds of a node in the coordinate space of its root.
    pub fn world_bounds(&self, id: NodeId) -> Option<Rect> {
        let mut rect = self.element(id)?.bounds;
        let mut current = self.node(id).parent;
        while let Some(p) = current {
            let parent = self.node(p);
            rect = rect.translate(parent.element.bounds.x, parent.element.bounds.y);
            current = parent.parent;
        }
        Some(rect)
    }

    /// The topmost visible node under `point` within the subtree of `root`.
    ///
    /// `point` is in the same space as [`Tree::world_bounds`]. A node is only
    /// considered if every ancestor up to `root` contains the point too. Among
    /// siblings, the later one in [`Tree::draw_list`] wins; descendants win over
    /// their ancestors.
    pub fn hit_test_point(&self, root: NodeId, point: Point) -> Option<NodeId> {
        let world = self.world_bounds(root)?;
        let local = self.node(root).element.bounds;
        self.hit_in(root, point, (world.x - local.x, world.y - local.y))
    }

    /// Visible children of `id` in paint order: ascending draw order, ties in
    /// insertion order.
    pub fn draw_list(&self, id: NodeId) -> Vec<NodeId> {
        let mut list: Vec<NodeId> = self
            .children_of(id)
            .iter()
            .copied()
            .filter(|&c| self.node(c).element.is_visible())
            .collect();
        list.sort_by_key(|&c| self.node(c).element.draw_order);
        list
    }

    // --- internals ---

    fn hit_in(&self, id: NodeId, point: Point, origin: (i32, i32)) -> Option<NodeId> {
        let element = &self.node(id).element;
        if !element.is_visible() {
            return None;
        }
        let world = element.bounds.translate(origin.0, origin.1);
        if !kurbo::Rect::from(world).contains(point) {
            return None;
        }
        self.draw_list(id)
            .into_iter()
            .rev()
            .find_map(|child| self.hit_in(child, point, (world.x, world.y)))
            .or(Some(id))
    }

    /// Snapshot the direct children of `id` for a strategy.
    fn layout_children(&self, id: NodeId) -> Vec<LayoutChild<NodeId>> {
        self.children_of(id)
            .iter()
            .map(|&c| {
                let e = &self.node(c).element;
                LayoutChild::new(c, e.bounds)
                    .with_margin(e.margin)
                    .with_min_size(e.min_size)
                    .with_max_size(e.max_size)
                    .with_visible(e.is_visible())
            })
            .collect()
    }

    fn relayout(&mut self, id: NodeId, report: &mut LayoutReport) {
        let mut children = self.layout_children(id);
        let node = self.node(id);
        let ran = if let Some(layout) = node.layout.as_ref() {
            let frame = ContainerFrame::new(node.element.bounds, node.element.padding);
            log::debug!(
                "relayout {id:?} ({:?}) with {} layout",
                node.element.name,
                layout.name()
            );
            layout.apply(frame, &mut children);
            true
        } else {
            false
        };
        self.node_mut(id).dirty = false;
        if !ran {
            return;
        }
        report.relaid_out.push(id);
        for child in children {
            let n = self.node_mut(child.key);
            if n.element.bounds != child.bounds {
                report.moved.push(BoundsChange {
                    node: child.key,
                    old: n.element.bounds,
                    new: child.bounds,
                });
                n.element.bounds = child.bounds;
                n.dirty = true;
            }
        }
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(c) = current {
            if c == ancestor {
                return true;
            }
            current = self.parent_of(c);
        }
        false
    }

    fn mark_dirty(&mut self, id: Option<NodeId>) {
        if let Some(id) = id
            && let Some(n) = self.node_opt_mut(id)
        {
            n.dirty = true;
        }
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        let parent_node = self.node_mut(parent);
        parent_node.children.push(id);
        parent_node.dirty = true;
        self.node_mut(id).parent = Some(parent);
    }

    fn detach(&mut self, id: NodeId, parent: NodeId) {
        let p = self.node_mut(parent);
        p.children.retain(|c| *c != id);
        if let Some(layout) = p.layout.as_mut() {
            layout.forget(&id);
        }
        p.dirty = true;
        self.node_mut(id).parent = None;
    }

    fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    /// Access a live node; panics if `id` is stale.
    fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    /// Access a live node mutably; panics if `id` is stale.
    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }
}
