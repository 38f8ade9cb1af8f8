// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Summary types returned from a layout pass.

use alloc::vec::Vec;

use trellis_layout::Rect;

use crate::types::NodeId;

/// One child whose bounds a layout pass changed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BoundsChange {
    /// The moved or resized node.
    pub node: NodeId,
    /// Bounds before the pass, in the parent's local space.
    pub old: Rect,
    /// Bounds after the pass, in the parent's local space.
    pub new: Rect,
}

/// What [`crate::Tree::update`] did.
#[derive(Clone, Debug, Default)]
pub struct LayoutReport {
    /// Containers whose strategy ran, in visiting order (parents before children).
    pub relaid_out: Vec<NodeId>,
    /// Children whose bounds changed.
    pub moved: Vec<BoundsChange>,
}

impl LayoutReport {
    /// Whether the pass did nothing.
    pub fn is_empty(&self) -> bool {
        self.relaid_out.is_empty() && self.moved.is_empty()
    }

    /// The recorded change for `node`, if it moved.
    pub fn change_of(&self, node: NodeId) -> Option<&BoundsChange> {
        self.moved.iter().find(|c| c.node == node)
    }
}
