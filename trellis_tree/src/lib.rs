// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=trellis_tree --heading-base-level=0

//! Trellis Tree: a retained element tree that runs [`trellis_layout`] strategies.
//!
//! - Elements live in a generational arena addressed by [`NodeId`]; stale ids are inert.
//! - Any element can become a container by assigning it a [`Layout`].
//! - Mutations mark containers dirty, and [`Tree::update`] re-lays-out only what changed,
//!   parents before children, returning a [`LayoutReport`].
//!
//! ## Coordinates
//!
//! [`Element::bounds`] is relative to the parent's top-left corner, including the parent's
//! padding area. [`Tree::world_bounds`] sums the chain of offsets up to the root, and
//! [`Tree::hit_test_point`] works in that same space.
//!
//! ## Dirty tracking
//!
//! - Changing a node's bounds or padding marks that node dirty.
//! - Changing a node's size, margin, size limits or visibility also marks its parent dirty.
//! - Adding, removing, or re-parenting children marks the affected parents dirty.
//! - Draw order is paint-only and never triggers layout.
//!
//! Disabled elements (see [`ElementFlags::ENABLED`]) and everything below them keep their
//! dirty flags until enabled.
//!
//! ## Example
//!
//! ```rust
//! use trellis_layout::{Dock, DockLayout, Layout, Rect};
//! use trellis_tree::{Element, Tree};
//!
//! let mut tree = Tree::new();
//! let window = tree.insert(None, Element::new("window", Rect::new(0, 0, 320, 240)));
//! let toolbar = tree.insert(Some(window), Element::new("toolbar", Rect::new(0, 0, 0, 24)));
//! let body = tree.insert(Some(window), Element::new("body", Rect::ZERO));
//!
//! let mut dock = DockLayout::new();
//! dock.set_dock(toolbar, Dock::Top);
//! tree.set_layout(window, dock);
//! tree.update(window);
//! assert_eq!(tree.element(body).unwrap().bounds, Rect::new(0, 24, 320, 216));
//!
//! // Per-child settings go through the container's strategy.
//! if let Some(dock) = tree.layout_mut(window).and_then(Layout::as_dock_mut) {
//!     dock.last_child_fill = false;
//! }
//! assert!(tree.is_dirty(window));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.
//!
//! [`Layout`]: trellis_layout::Layout

#![no_std]

extern crate alloc;

mod report;
mod tree;
mod types;

pub use report::{BoundsChange, LayoutReport};
pub use tree::Tree;
pub use types::{Anchor, Element, ElementFlags, NodeId};
