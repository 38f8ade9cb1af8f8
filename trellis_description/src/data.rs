// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The serialized shape of a layout. This is the file format, not the runtime tree.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use trellis_layout::{
    Alignment, Distribution, Dock, FlexDirection, FlexWrap, GridLength, Margin, Orientation,
    Padding,
};

use crate::error::DescriptionError;

/// Version written by [`LayoutDescription::default`].
pub const CURRENT_VERSION: &str = "1.0";

/// A whole layout: a root surface of `width` x `height` and the elements on it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutDescription {
    /// Format version; `1.x` is accepted.
    pub version: String,
    /// Display name.
    pub name: String,
    /// Free-form notes.
    pub description: String,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
    /// Strategy of the root container. Absent means absolute positioning.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutData>,
    /// Top-level elements, children of the root container.
    pub elements: Vec<ElementData>,
    /// Free-form string pairs for tools.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl Default for LayoutDescription {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION.into(),
            name: String::new(),
            description: String::new(),
            width: 1920,
            height: 1080,
            layout: None,
            elements: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }
}

/// One element and its subtree.
///
/// `type` selects how the element is built: `Panel` and `Container` hold
/// children, the control types (`Button`, `Label`, `TextBox`, `CheckBox`,
/// `Slider`, `Image`) are leaves.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementData {
    /// Application id, unique among non-empty ids.
    pub id: String,
    /// Element type, for example `Panel` or `Button`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Display name.
    pub name: String,
    /// Left edge in the parent's space.
    pub x: i32,
    /// Top edge in the parent's space.
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
    /// Attachment hint such as `TopLeft`, `Fill`, or a list like `Top, Right`.
    pub anchor: String,
    /// Whether the element runs its own layout.
    pub is_enabled: bool,
    /// Whether the element takes part in layout and drawing.
    pub is_visible: bool,
    /// Paint order among siblings.
    pub draw_order: i32,
    /// Outer spacing.
    pub margin: SpacingData,
    /// Inner spacing.
    pub padding: SpacingData,
    /// Lower width clamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_width: Option<i32>,
    /// Lower height clamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_height: Option<i32>,
    /// Upper width clamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<i32>,
    /// Upper height clamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_height: Option<i32>,
    /// Host-specific settings (text, colors, ...), passed through untouched.
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub properties: Map<String, Value>,
    /// Strategy for this element's children.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutData>,
    /// Settings this element contributes to its parent's strategy.
    #[serde(skip_serializing_if = "ItemData::is_empty")]
    pub item: ItemData,
    /// Child elements.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ElementData>,
}

impl Default for ElementData {
    fn default() -> Self {
        Self {
            id: String::new(),
            kind: String::new(),
            name: String::new(),
            x: 0,
            y: 0,
            width: 0,
            height: 0,
            anchor: "TopLeft".into(),
            is_enabled: true,
            is_visible: true,
            draw_order: 0,
            margin: SpacingData::default(),
            padding: SpacingData::default(),
            min_width: None,
            min_height: None,
            max_width: None,
            max_height: None,
            properties: Map::new(),
            layout: None,
            item: ItemData::default(),
            children: Vec::new(),
        }
    }
}

impl ElementData {
    /// An element of the given type with id and name both set to `id`.
    pub fn new(kind: impl Into<String>, id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            kind: kind.into(),
            name: id.clone(),
            id,
            ..Self::default()
        }
    }
}

/// Four edge insets, shared by margin and padding.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpacingData {
    /// Left edge.
    pub left: i32,
    /// Top edge.
    pub top: i32,
    /// Right edge.
    pub right: i32,
    /// Bottom edge.
    pub bottom: i32,
}

impl From<SpacingData> for Margin {
    fn from(s: SpacingData) -> Self {
        Self::new(s.left, s.top, s.right, s.bottom)
    }
}

impl From<SpacingData> for Padding {
    fn from(s: SpacingData) -> Self {
        Self::new(s.left, s.top, s.right, s.bottom)
    }
}

impl From<Margin> for SpacingData {
    fn from(m: Margin) -> Self {
        Self {
            left: m.left,
            top: m.top,
            right: m.right,
            bottom: m.bottom,
        }
    }
}

impl From<Padding> for SpacingData {
    fn from(p: Padding) -> Self {
        Self {
            left: p.left,
            top: p.top,
            right: p.right,
            bottom: p.bottom,
        }
    }
}

fn yes() -> bool {
    true
}

fn four() -> i32 {
    4
}

/// Container strategy, tagged by `type`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum LayoutData {
    /// Children keep their own bounds.
    Absolute,
    /// See [`trellis_layout::DockLayout`].
    Dock {
        /// Let the last visible child fill the remaining space.
        #[serde(default = "yes")]
        last_child_fill: bool,
    },
    /// See [`trellis_layout::StackLayout`].
    Stack {
        /// Flow direction.
        #[serde(default = "vertical")]
        orientation: Orientation,
        /// Gap between children along the main axis.
        #[serde(default = "four")]
        spacing: i32,
        /// Horizontal alignment.
        #[serde(default = "stretch")]
        horizontal_alignment: Alignment,
        /// Vertical alignment.
        #[serde(default)]
        vertical_alignment: Alignment,
        /// Spread of leftover main-axis space.
        #[serde(default)]
        distribution: Distribution,
        /// Reverse the sorted order.
        #[serde(default)]
        reverse: bool,
    },
    /// See [`trellis_layout::WrapLayout`].
    Wrap {
        /// Flow direction.
        #[serde(default)]
        orientation: Orientation,
        /// Gap between children along the main axis.
        #[serde(default = "four")]
        spacing: i32,
        /// Gap between lines.
        #[serde(default = "four")]
        line_spacing: i32,
        /// Horizontal alignment.
        #[serde(default)]
        horizontal_alignment: Alignment,
        /// Vertical alignment.
        #[serde(default)]
        vertical_alignment: Alignment,
    },
    /// See [`trellis_layout::GridLayout`].
    Grid {
        /// Column tracks.
        #[serde(default)]
        columns: Vec<TrackSize>,
        /// Row tracks.
        #[serde(default)]
        rows: Vec<TrackSize>,
        /// Gap between columns.
        #[serde(default = "four")]
        column_spacing: i32,
        /// Gap between rows.
        #[serde(default = "four")]
        row_spacing: i32,
    },
    /// See [`trellis_layout::FlexLayout`].
    Flex {
        /// Main axis and direction.
        #[serde(default)]
        direction: FlexDirection,
        /// Line breaking.
        #[serde(default)]
        wrap: FlexWrap,
        /// Spread of leftover main-axis space per line.
        #[serde(default)]
        justify_content: Distribution,
        /// Default cross-axis alignment.
        #[serde(default = "stretch")]
        align_items: Alignment,
        /// Cross-axis placement of lines.
        #[serde(default = "stretch")]
        align_content: Alignment,
        /// Uniform gap; wins over the per-axis gaps when positive.
        #[serde(default)]
        gap: i32,
        /// Gap between rows.
        #[serde(default)]
        row_gap: i32,
        /// Gap between columns.
        #[serde(default)]
        column_gap: i32,
    },
}

fn vertical() -> Orientation {
    Orientation::Vertical
}

fn stretch() -> Alignment {
    Alignment::Stretch
}

/// Per-child settings read by the parent's strategy.
///
/// Only the fields the parent's strategy understands are used: `dock` for
/// Dock, the cell fields for Grid, `order` for Stack, and the flex fields plus
/// `order` for Flex.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemData {
    /// Dock edge.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dock: Option<Dock>,
    /// Grid row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
    /// Grid column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    /// Grid rows covered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_span: Option<usize>,
    /// Grid columns covered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_span: Option<usize>,
    /// Horizontal alignment inside the grid cell.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal_alignment: Option<Alignment>,
    /// Vertical alignment inside the grid cell.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_alignment: Option<Alignment>,
    /// Stack or flex sort key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    /// Flex grow weight.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grow: Option<f32>,
    /// Flex shrink weight.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shrink: Option<f32>,
    /// Flex basis in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basis: Option<i32>,
    /// Flex cross-axis override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_self: Option<Alignment>,
}

impl ItemData {
    /// Whether no setting is present.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A grid track written as a string: `auto`, `*`, `2*`, or `40`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TrackSize(pub GridLength);

impl TryFrom<String> for TrackSize {
    type Error = DescriptionError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl core::str::FromStr for TrackSize {
    type Err = DescriptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || DescriptionError::InvalidTrack(s.to_owned());
        if trimmed.eq_ignore_ascii_case("auto") {
            return Ok(Self(GridLength::Auto));
        }
        if let Some(weight) = trimmed.strip_suffix('*') {
            if weight.is_empty() {
                return Ok(Self(GridLength::star()));
            }
            let weight: f32 = weight.trim().parse().map_err(|_| invalid())?;
            if !weight.is_finite() || weight < 0.0 {
                return Err(invalid());
            }
            return Ok(Self(GridLength::stars(weight)));
        }
        let pixels: i32 = trimmed.parse().map_err(|_| invalid())?;
        Ok(Self(GridLength::pixel(pixels)))
    }
}

impl fmt::Display for TrackSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            GridLength::Auto => f.write_str("auto"),
            GridLength::Star(w) if w == 1.0 => f.write_str("*"),
            GridLength::Star(w) => write!(f, "{w}*"),
            GridLength::Pixel(v) => write!(f, "{v}"),
        }
    }
}

impl From<TrackSize> for String {
    fn from(t: TrackSize) -> Self {
        t.to_string()
    }
}

impl From<GridLength> for TrackSize {
    fn from(length: GridLength) -> Self {
        Self(length)
    }
}
