// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapping between description-side settings and runtime strategies.

use trellis_layout::{
    AbsoluteLayout, CellAlignment, DockLayout, FlexItem, FlexLayout, GridLayout, GridPosition,
    Layout, StackLayout, WrapLayout,
};
use trellis_tree::{Anchor, NodeId};

use crate::data::{ItemData, LayoutData, TrackSize};

const EDGE_ANCHORS: [(&str, Anchor); 6] = [
    ("Left", Anchor::LEFT),
    ("Top", Anchor::TOP),
    ("Right", Anchor::RIGHT),
    ("Bottom", Anchor::BOTTOM),
    ("CenterHorizontal", Anchor::CENTER_HORIZONTAL),
    ("CenterVertical", Anchor::CENTER_VERTICAL),
];

const NAMED_ANCHORS: [(&str, Anchor); 11] = [
    ("None", Anchor::empty()),
    ("TopLeft", Anchor::TOP_LEFT),
    ("TopRight", Anchor::TOP_RIGHT),
    ("TopCenter", Anchor::TOP_CENTER),
    ("BottomLeft", Anchor::BOTTOM_LEFT),
    ("BottomRight", Anchor::BOTTOM_RIGHT),
    ("BottomCenter", Anchor::BOTTOM_CENTER),
    ("CenterLeft", Anchor::CENTER_LEFT),
    ("CenterRight", Anchor::CENTER_RIGHT),
    ("Center", Anchor::CENTER),
    ("Fill", Anchor::FILL),
];

/// Parse an anchor name (`TopLeft`) or a comma-separated list of names (`Top, Right`).
pub(crate) fn anchor_from_name(name: &str) -> Option<Anchor> {
    name.split(',')
        .map(str::trim)
        .try_fold(Anchor::empty(), |anchor, part| {
            NAMED_ANCHORS
                .iter()
                .chain(&EDGE_ANCHORS)
                .find(|(n, _)| *n == part)
                .map(|&(_, a)| anchor | a)
        })
}

/// The description name of `anchor`; combinations without a name become a list.
pub(crate) fn anchor_name(anchor: Anchor) -> String {
    if let Some((name, _)) = NAMED_ANCHORS
        .iter()
        .chain(&EDGE_ANCHORS)
        .find(|(_, a)| *a == anchor)
    {
        return (*name).to_owned();
    }
    EDGE_ANCHORS
        .iter()
        .filter(|(_, a)| anchor.contains(*a))
        .map(|(n, _)| *n)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Instantiate the strategy a description asks for.
pub(crate) fn strategy_from(data: &LayoutData) -> Layout<NodeId> {
    match *data {
        LayoutData::Absolute => AbsoluteLayout.into(),
        LayoutData::Dock { last_child_fill } => {
            let mut dock = DockLayout::new();
            dock.last_child_fill = last_child_fill;
            dock.into()
        }
        LayoutData::Stack {
            orientation,
            spacing,
            horizontal_alignment,
            vertical_alignment,
            distribution,
            reverse,
        } => {
            let mut stack = StackLayout::with_distribution(orientation, distribution, spacing);
            stack.horizontal_alignment = horizontal_alignment;
            stack.vertical_alignment = vertical_alignment;
            stack.reverse = reverse;
            stack.into()
        }
        LayoutData::Wrap {
            orientation,
            spacing,
            line_spacing,
            horizontal_alignment,
            vertical_alignment,
        } => {
            let mut wrap = WrapLayout::new(orientation, spacing).with_line_spacing(line_spacing);
            wrap.horizontal_alignment = horizontal_alignment;
            wrap.vertical_alignment = vertical_alignment;
            wrap.into()
        }
        LayoutData::Grid {
            ref columns,
            ref rows,
            column_spacing,
            row_spacing,
        } => {
            let mut grid = GridLayout::new();
            grid.add_columns(columns.iter().map(|t| t.0));
            grid.add_rows(rows.iter().map(|t| t.0));
            grid.column_spacing = column_spacing;
            grid.row_spacing = row_spacing;
            grid.into()
        }
        LayoutData::Flex {
            direction,
            wrap,
            justify_content,
            align_items,
            align_content,
            gap,
            row_gap,
            column_gap,
        } => {
            let mut flex = FlexLayout::new(direction, gap);
            flex.wrap = wrap;
            flex.justify_content = justify_content;
            flex.align_items = align_items;
            flex.align_content = align_content;
            flex.row_gap = row_gap;
            flex.column_gap = column_gap;
            flex.into()
        }
    }
}

/// Describe a live strategy. Per-child settings are not included; see [`item_of`].
pub(crate) fn strategy_to(layout: &Layout<NodeId>) -> LayoutData {
    match layout {
        Layout::Absolute(_) => LayoutData::Absolute,
        Layout::Dock(dock) => LayoutData::Dock {
            last_child_fill: dock.last_child_fill,
        },
        Layout::Stack(stack) => LayoutData::Stack {
            orientation: stack.orientation,
            spacing: stack.spacing,
            horizontal_alignment: stack.horizontal_alignment,
            vertical_alignment: stack.vertical_alignment,
            distribution: stack.distribution,
            reverse: stack.reverse,
        },
        Layout::Wrap(wrap) => LayoutData::Wrap {
            orientation: wrap.orientation,
            spacing: wrap.spacing,
            line_spacing: wrap.line_spacing,
            horizontal_alignment: wrap.horizontal_alignment,
            vertical_alignment: wrap.vertical_alignment,
        },
        Layout::Grid(grid) => LayoutData::Grid {
            columns: grid.columns().iter().copied().map(TrackSize).collect(),
            rows: grid.rows().iter().copied().map(TrackSize).collect(),
            column_spacing: grid.column_spacing,
            row_spacing: grid.row_spacing,
        },
        Layout::Flex(flex) => LayoutData::Flex {
            direction: flex.direction,
            wrap: flex.wrap,
            justify_content: flex.justify_content,
            align_items: flex.align_items,
            align_content: flex.align_content,
            gap: flex.gap,
            row_gap: flex.row_gap,
            column_gap: flex.column_gap,
        },
    }
}

/// Record `item` for `child` in its parent's strategy.
///
/// Fields the strategy has no use for are ignored.
pub(crate) fn apply_item(layout: &mut Layout<NodeId>, child: NodeId, item: &ItemData) {
    match layout {
        Layout::Absolute(_) | Layout::Wrap(_) => {}
        Layout::Dock(dock) => {
            if let Some(edge) = item.dock {
                dock.set_dock(child, edge);
            }
        }
        Layout::Stack(stack) => {
            if let Some(order) = item.order {
                stack.set_order(child, order);
            }
        }
        Layout::Grid(grid) => {
            let placed = item.row.is_some()
                || item.column.is_some()
                || item.row_span.is_some()
                || item.column_span.is_some();
            if placed {
                grid.set_position(
                    child,
                    GridPosition::spanning(
                        item.row.unwrap_or(0),
                        item.column.unwrap_or(0),
                        item.row_span.unwrap_or(1),
                        item.column_span.unwrap_or(1),
                    ),
                );
            }
            if item.horizontal_alignment.is_some() || item.vertical_alignment.is_some() {
                let current = grid.cell_alignment(&child);
                grid.set_cell_alignment(
                    child,
                    CellAlignment::new(
                        item.horizontal_alignment.unwrap_or(current.horizontal),
                        item.vertical_alignment.unwrap_or(current.vertical),
                    ),
                );
            }
        }
        Layout::Flex(flex) => {
            let mut settings = flex.item(&child);
            if let Some(grow) = item.grow {
                settings.grow = grow;
            }
            if let Some(shrink) = item.shrink {
                settings.shrink = shrink;
            }
            if item.basis.is_some() {
                settings.basis = item.basis;
            }
            if item.align_self.is_some() {
                settings.align_self = item.align_self;
            }
            if let Some(order) = item.order {
                settings.order = order;
            }
            flex.set_item(child, settings);
        }
    }
}

/// The per-child settings `layout` holds for `child`, omitting defaults.
pub(crate) fn item_of(layout: &Layout<NodeId>, child: NodeId) -> ItemData {
    let mut item = ItemData::default();
    match layout {
        Layout::Absolute(_) | Layout::Wrap(_) => {}
        Layout::Dock(dock) => item.dock = Some(dock.dock(&child)),
        Layout::Stack(stack) => {
            item.order = Some(stack.order(&child)).filter(|&o| o != 0);
        }
        Layout::Grid(grid) => {
            if let Some(position) = grid.position(&child) {
                item.row = Some(position.row);
                item.column = Some(position.column);
                item.row_span = Some(position.row_span).filter(|&s| s != 1);
                item.column_span = Some(position.column_span).filter(|&s| s != 1);
            }
            let alignment = grid.cell_alignment(&child);
            if alignment != CellAlignment::STRETCH {
                item.horizontal_alignment = Some(alignment.horizontal);
                item.vertical_alignment = Some(alignment.vertical);
            }
        }
        Layout::Flex(flex) => {
            let settings = flex.item(&child);
            let defaults = FlexItem::default();
            item.grow = Some(settings.grow).filter(|&g| g != defaults.grow);
            item.shrink = Some(settings.shrink).filter(|&s| s != defaults.shrink);
            item.basis = settings.basis;
            item.align_self = settings.align_self;
            item.order = Some(settings.order).filter(|&o| o != 0);
        }
    }
    item
}
