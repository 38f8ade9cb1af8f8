// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::child::LayoutChild;
use crate::geometry::{Padding, Rect, Size};
use crate::strategy::LayoutStrategy;
use crate::types::{Alignment, ContainerFrame, Orientation};
use crate::util::{count_i32, distribute};

/// Sizing mode of one grid column or row.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GridLength {
    /// A fixed number of pixels (negative values count as zero).
    Pixel(i32),
    /// A weighted share of the space left after pixel and auto tracks.
    Star(f32),
    /// As large as the largest single-span child in the track, margin included.
    Auto,
}

impl GridLength {
    /// A star track of weight 1.
    pub const fn star() -> Self {
        Self::Star(1.0)
    }

    /// A star track of the given weight.
    pub const fn stars(weight: f32) -> Self {
        Self::Star(weight)
    }

    /// A fixed pixel track.
    pub const fn pixel(value: i32) -> Self {
        Self::Pixel(value)
    }
}

impl Default for GridLength {
    fn default() -> Self {
        Self::star()
    }
}

/// A child's cell: top-left track indices plus spans.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct GridPosition {
    /// Row index.
    pub row: usize,
    /// Column index.
    pub column: usize,
    /// Number of rows covered (at least 1).
    pub row_span: usize,
    /// Number of columns covered (at least 1).
    pub column_span: usize,
}

impl GridPosition {
    /// A single cell.
    pub const fn new(row: usize, column: usize) -> Self {
        Self::spanning(row, column, 1, 1)
    }

    /// A cell spanning several tracks. Spans below 1 are raised to 1.
    pub const fn spanning(row: usize, column: usize, row_span: usize, column_span: usize) -> Self {
        Self {
            row,
            column,
            row_span: if row_span == 0 { 1 } else { row_span },
            column_span: if column_span == 0 { 1 } else { column_span },
        }
    }

    fn index(&self, axis: Orientation) -> (usize, usize) {
        match axis {
            Orientation::Horizontal => (self.column, self.column_span),
            Orientation::Vertical => (self.row, self.row_span),
        }
    }
}

impl Default for GridPosition {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

/// Placement of a child inside its cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CellAlignment {
    /// Horizontal placement.
    pub horizontal: Alignment,
    /// Vertical placement.
    pub vertical: Alignment,
}

impl CellAlignment {
    /// Fill the cell.
    pub const STRETCH: Self = Self::new(Alignment::Stretch, Alignment::Stretch);
    /// Preferred size, centered.
    pub const CENTER: Self = Self::new(Alignment::Center, Alignment::Center);
    /// Preferred size in the top-left corner.
    pub const TOP_LEFT: Self = Self::new(Alignment::Start, Alignment::Start);
    /// Preferred size in the top-right corner.
    pub const TOP_RIGHT: Self = Self::new(Alignment::End, Alignment::Start);
    /// Preferred size in the bottom-left corner.
    pub const BOTTOM_LEFT: Self = Self::new(Alignment::Start, Alignment::End);
    /// Preferred size in the bottom-right corner.
    pub const BOTTOM_RIGHT: Self = Self::new(Alignment::End, Alignment::End);

    /// Create an alignment from its two axes.
    pub const fn new(horizontal: Alignment, vertical: Alignment) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }
}

impl Default for CellAlignment {
    fn default() -> Self {
        Self::STRETCH
    }
}

type Tracks = SmallVec<[i32; 8]>;

/// Rows and columns with pixel, star and auto tracks.
///
/// Children without an explicit [`GridPosition`] go to `(0, 0)`. Children whose
/// row or column is past the last track are skipped. A grid with no columns or
/// no rows leaves its children alone.
#[derive(Clone, Debug)]
pub struct GridLayout<K> {
    /// Gap between adjacent columns.
    pub column_spacing: i32,
    /// Gap between adjacent rows.
    pub row_spacing: i32,
    columns: Vec<GridLength>,
    rows: Vec<GridLength>,
    positions: HashMap<K, GridPosition>,
    alignments: HashMap<K, CellAlignment>,
}

impl<K> Default for GridLayout<K> {
    fn default() -> Self {
        Self {
            column_spacing: 4,
            row_spacing: 4,
            columns: Vec::new(),
            rows: Vec::new(),
            positions: HashMap::new(),
            alignments: HashMap::new(),
        }
    }
}

impl<K> GridLayout<K> {
    /// An empty grid with 4px spacing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Column definitions, left to right.
    pub fn columns(&self) -> &[GridLength] {
        &self.columns
    }

    /// Row definitions, top to bottom.
    pub fn rows(&self) -> &[GridLength] {
        &self.rows
    }

    /// Append a column.
    pub fn add_column(&mut self, length: GridLength) {
        self.columns.push(length);
    }

    /// Append a row.
    pub fn add_row(&mut self, length: GridLength) {
        self.rows.push(length);
    }

    /// Append several columns.
    pub fn add_columns(&mut self, lengths: impl IntoIterator<Item = GridLength>) {
        self.columns.extend(lengths);
    }

    /// Append several rows.
    pub fn add_rows(&mut self, lengths: impl IntoIterator<Item = GridLength>) {
        self.rows.extend(lengths);
    }

    /// Insert a column before `index`. Ignored when `index > columns().len()`.
    pub fn insert_column(&mut self, index: usize, length: GridLength) {
        if index <= self.columns.len() {
            self.columns.insert(index, length);
        }
    }

    /// Insert a row before `index`. Ignored when `index > rows().len()`.
    pub fn insert_row(&mut self, index: usize, length: GridLength) {
        if index <= self.rows.len() {
            self.rows.insert(index, length);
        }
    }

    /// Remove and return the column at `index`, if any.
    pub fn remove_column(&mut self, index: usize) -> Option<GridLength> {
        (index < self.columns.len()).then(|| self.columns.remove(index))
    }

    /// Remove and return the row at `index`, if any.
    pub fn remove_row(&mut self, index: usize) -> Option<GridLength> {
        (index < self.rows.len()).then(|| self.rows.remove(index))
    }

    /// Remove every column.
    pub fn clear_columns(&mut self) {
        self.columns.clear();
    }

    /// Remove every row.
    pub fn clear_rows(&mut self) {
        self.rows.clear();
    }

    fn definitions(&self, axis: Orientation) -> (&[GridLength], i32) {
        match axis {
            Orientation::Horizontal => (&self.columns, self.column_spacing),
            Orientation::Vertical => (&self.rows, self.row_spacing),
        }
    }
}

impl<K: Eq + Hash> GridLayout<K> {
    /// Place `key` in a cell.
    pub fn set_position(&mut self, key: K, position: GridPosition) {
        self.positions.insert(key, position);
    }

    /// The explicit cell of `key`, if one was set.
    pub fn position(&self, key: &K) -> Option<GridPosition> {
        self.positions.get(key).copied()
    }

    /// Align `key` inside its cell.
    pub fn set_cell_alignment(&mut self, key: K, alignment: CellAlignment) {
        self.alignments.insert(key, alignment);
    }

    /// The in-cell alignment of `key` ([`CellAlignment::STRETCH`] if never set).
    pub fn cell_alignment(&self, key: &K) -> CellAlignment {
        self.alignments.get(key).copied().unwrap_or_default()
    }

    /// Largest single-span margin box per auto track on `axis`. Non-auto tracks stay zero.
    fn auto_sizes(&self, axis: Orientation, children: &[LayoutChild<K>]) -> Tracks {
        let (defs, _) = self.definitions(axis);
        let mut sizes: Tracks = SmallVec::from_elem(0, defs.len());
        for child in children.iter().filter(|c| c.visible) {
            let (index, span) = self.position(&child.key).unwrap_or_default().index(axis);
            if span == 1 && matches!(defs.get(index), Some(GridLength::Auto)) {
                sizes[index] = sizes[index].max(child.outer_extents(axis).0);
            }
        }
        sizes
    }

    /// Track sizes and leading offsets on `axis` for a content span starting at `start`.
    fn tracks(
        &self,
        axis: Orientation,
        start: i32,
        extent: i32,
        children: &[LayoutChild<K>],
    ) -> (Tracks, Tracks) {
        let (defs, spacing) = self.definitions(axis);
        let available = extent - (count_i32(defs.len()) - 1) * spacing;
        let sizes = resolve_tracks(defs, available, &self.auto_sizes(axis, children));
        let offsets = track_offsets(&sizes, start, spacing);
        (sizes, offsets)
    }
}

/// Pixel size of every track, given the space left after inter-track spacing.
fn resolve_tracks(defs: &[GridLength], available: i32, auto: &[i32]) -> Tracks {
    let mut sizes: Tracks = SmallVec::from_elem(0, defs.len());
    let mut weights: SmallVec<[f32; 8]> = SmallVec::from_elem(0.0, defs.len());
    for (i, def) in defs.iter().enumerate() {
        match *def {
            GridLength::Pixel(px) => sizes[i] = px.max(0),
            GridLength::Auto => sizes[i] = auto[i],
            GridLength::Star(w) => weights[i] = w,
        }
    }
    let remaining = (available - sizes.iter().sum::<i32>()).max(0);
    for (i, part) in distribute(remaining, &weights).into_iter().enumerate() {
        if matches!(defs[i], GridLength::Star(_)) {
            sizes[i] = part;
        }
    }
    sizes
}

/// Leading edge of every track.
fn track_offsets(sizes: &[i32], start: i32, spacing: i32) -> Tracks {
    let mut cursor = start;
    sizes
        .iter()
        .map(|size| {
            let offset = cursor;
            cursor += size + spacing;
            offset
        })
        .collect()
}

/// Extent of `span` tracks from `start`, including the spacing between them.
fn spanned(sizes: &[i32], start: usize, span: usize, spacing: i32) -> i32 {
    let end = start.saturating_add(span).min(sizes.len());
    let tracks = &sizes[start..end];
    tracks.iter().sum::<i32>() + (count_i32(tracks.len()) - 1).max(0) * spacing
}

impl<K: Copy + Eq + Hash> LayoutStrategy<K> for GridLayout<K> {
    fn apply(&self, frame: ContainerFrame, children: &mut [LayoutChild<K>]) {
        if self.columns.is_empty() || self.rows.is_empty() {
            return;
        }
        let content = frame.content();
        let (widths, xs) = self.tracks(Orientation::Horizontal, content.x, content.width, children);
        let (heights, ys) = self.tracks(Orientation::Vertical, content.y, content.height, children);

        for child in children.iter_mut().filter(|c| c.visible) {
            let pos = self.position(&child.key).unwrap_or_default();
            if pos.row >= heights.len() || pos.column >= widths.len() {
                log::trace!(
                    "grid cell ({}, {}) is outside {}x{} tracks; skipping",
                    pos.row,
                    pos.column,
                    heights.len(),
                    widths.len()
                );
                continue;
            }
            let cell_w = spanned(&widths, pos.column, pos.column_span, self.column_spacing);
            let cell_h = spanned(&heights, pos.row, pos.row_span, self.row_spacing);
            let align = self.cell_alignment(&child.key);
            let size = child.preferred_size();
            let m = child.margin;
            let (x, w) = align
                .horizontal
                .place(xs[pos.column], cell_w, size.width, m.left, m.right);
            let (y, h) = align
                .vertical
                .place(ys[pos.row], cell_h, size.height, m.top, m.bottom);
            child.assign(Rect::new(x, y, w, h));
        }
    }

    /// Pixel plus auto tracks plus spacing; star tracks contribute nothing.
    fn measure(&self, padding: Padding, children: &[LayoutChild<K>]) -> Size {
        if self.columns.is_empty() || self.rows.is_empty() || !children.iter().any(|c| c.visible) {
            return Size::ZERO;
        }
        let mut total = [0; 2];
        for (slot, axis) in total
            .iter_mut()
            .zip([Orientation::Horizontal, Orientation::Vertical])
        {
            let (defs, spacing) = self.definitions(axis);
            let auto = self.auto_sizes(axis, children);
            let tracks: i32 = defs
                .iter()
                .zip(&auto)
                .map(|(def, &measured)| match *def {
                    GridLength::Pixel(px) => px.max(0),
                    GridLength::Auto => measured,
                    GridLength::Star(_) => 0,
                })
                .sum();
            *slot = tracks + (count_i32(defs.len()) - 1) * spacing;
        }
        Size::new(
            total[0] + padding.horizontal(),
            total[1] + padding.vertical(),
        )
    }

    fn forget(&mut self, key: &K) {
        self.positions.remove(key);
        self.alignments.remove(key);
    }
}
