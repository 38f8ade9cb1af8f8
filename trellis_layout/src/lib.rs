// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=trellis_layout --heading-base-level=0

//! Trellis Layout: integer box-layout strategies over a minimal child contract.
//!
//! A container hands its strategy a [`ContainerFrame`] (its own bounds and padding)
//! and a slice of [`LayoutChild`] views of its direct children. The strategy writes
//! new bounds for every visible child, in the container's local coordinate space.
//! Nothing else is touched, so the same strategy works over any tree that can
//! produce such a slice.
//!
//! ## Strategies
//!
//! - [`AbsoluteLayout`]: children keep the bounds they were given.
//! - [`DockLayout`]: children dock against edges of a shrinking rectangle; the last may fill it.
//! - [`StackLayout`]: one axis, fixed spacing, [`Distribution`] of leftover space.
//! - [`WrapLayout`]: like a stack, but breaks into lines when the main axis runs out.
//! - [`GridLayout`]: rows and columns sized in pixels, star weights, or to content.
//! - [`FlexLayout`]: basis, grow, shrink, per-child alignment, optional wrapping.
//!
//! [`Layout`] is the closed sum of all six. Every strategy implements
//! [`LayoutStrategy`]: `apply` assigns bounds, `measure` reports a preferred size
//! without mutating anything, and `forget` drops per-child settings when a child
//! leaves its container.
//!
//! Per-child settings (dock edge, grid cell, flex item) are keyed by a caller-chosen
//! copyable key, typically a node handle.
//!
//! ## Shared rules
//!
//! - A child's preferred size is its current extent clamped into `[min_size, max_size]`.
//! - Invisible children take no space and keep their bounds.
//! - Assigned extents never go negative; overflow clips to zero rather than failing.
//! - Applying twice without changes in between gives the same result.
//!
//! ## Example
//!
//! ```
//! use trellis_layout::{
//!     ContainerFrame, Dock, DockLayout, LayoutChild, LayoutStrategy, Padding, Rect,
//! };
//!
//! let mut dock = DockLayout::new();
//! dock.set_dock("sidebar", Dock::Left);
//! dock.set_dock("header", Dock::Top);
//!
//! let mut children = [
//!     LayoutChild::new("sidebar", Rect::new(0, 0, 50, 0)),
//!     LayoutChild::new("header", Rect::new(0, 0, 0, 30)),
//!     LayoutChild::new("content", Rect::ZERO),
//! ];
//! let frame = ContainerFrame::new(Rect::new(0, 0, 200, 200), Padding::ZERO);
//! dock.apply(frame, &mut children);
//!
//! assert_eq!(children[2].bounds, Rect::new(50, 30, 150, 170));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod child;
mod geometry;
mod strategy;
mod types;
mod util;

pub use child::LayoutChild;
pub use geometry::{Margin, Padding, Rect, Size};
pub use strategy::{
    AbsoluteLayout, CellAlignment, Dock, DockLayout, FlexDirection, FlexItem, FlexLayout, FlexWrap,
    GridLayout, GridLength, GridPosition, Layout, LayoutStrategy, StackLayout, WrapLayout,
};
pub use types::{Alignment, ContainerFrame, Distribution, Orientation, Spread};
