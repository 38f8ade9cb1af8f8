// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=trellis_description --heading-base-level=0

//! Trellis Description: JSON layout files for [`trellis_tree`].
//!
//! A [`LayoutDescription`] is a root surface plus a tree of [`ElementData`]. Each
//! element names its type, geometry, spacing, flags, an optional strategy for its
//! own children ([`LayoutData`]), and the settings it hands its parent's strategy
//! ([`ItemData`]: dock edge, grid cell, stack order, flex factors).
//!
//! - [`from_json`] / [`to_json`] / [`load`] / [`save`] move descriptions in and out of text.
//! - [`build`] turns a description into a fresh [`Tree`](trellis_tree::Tree).
//! - [`apply_to_existing`] pushes a description onto a live tree, matching by name then id.
//! - [`snapshot`] / [`snapshot_layout`] export a live tree, computed bounds included.
//!
//! The layout strategies themselves know nothing about this format.
//!
//! ## Example
//!
//! ```rust
//! use trellis_description::{build, from_json};
//! use trellis_layout::Rect;
//!
//! let description = from_json(r#"{
//!     "width": 300, "height": 200,
//!     "layout": { "type": "Flex", "direction": "Row" },
//!     "elements": [
//!         { "id": "nav", "type": "Panel", "width": 80 },
//!         { "id": "main", "type": "Panel", "item": { "grow": 1.0 } }
//!     ]
//! }"#)?;
//!
//! let mut built = build(&description)?;
//! built.update();
//! let main = built.get("main").unwrap();
//! assert_eq!(built.tree.element(main).unwrap().bounds, Rect::new(80, 0, 220, 200));
//! # Ok::<(), trellis_description::DescriptionError>(())
//! ```

mod build;
mod convert;
mod data;
mod error;
mod io;
mod snapshot;

pub use build::{BuiltLayout, apply_to_existing, build};
pub use data::{
    CURRENT_VERSION, ElementData, ItemData, LayoutData, LayoutDescription, SpacingData, TrackSize,
};
pub use error::{DescriptionError, Result};
pub use io::{from_json, load, save, to_json};
pub use snapshot::{snapshot, snapshot_layout};
