use alloc::vec::Vec;

use crate::range::compute_range;
use crate::{
    ExtentSource, GridCell, GridExtent, GridOptions, GridViewportState, Overscan, PositionIndex,
    ViewportState, VirtualizedGrid, VisibleRange,
};

/// A virtualizer for fixed-size cells laid out row-major, `columns_per_row` to a row.
///
/// Rows and columns are two independent uniform strips; the visible row range and the visible
/// column range are computed separately and their product (minus indexes past `count` on the
/// last row) is the set of cells to materialize.
///
/// Horizontal virtualization is opt-in: until a horizontal viewport is set, every column of a
/// visible row is materialized.
#[derive(Clone, Debug)]
pub struct GridVirtualizer {
    options: GridOptions,
    rows: PositionIndex,
    columns: PositionIndex,
    viewport: GridViewportState,
}

impl GridVirtualizer {
    pub fn new(options: GridOptions) -> Self {
        let mut v = Self {
            options,
            rows: PositionIndex::empty(),
            columns: PositionIndex::empty(),
            viewport: GridViewportState::default(),
        };
        v.rebuild();
        v
    }

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: GridOptions) {
        self.options = options;
        self.rebuild();
    }

    pub fn count(&self) -> usize {
        self.options.count
    }

    pub fn columns_per_row(&self) -> usize {
        self.options.columns_per_row
    }

    /// `ceil(count / columns_per_row)`; zero when `columns_per_row` is zero.
    pub fn row_count(&self) -> usize {
        match self.options.columns_per_row {
            0 => 0,
            cols => self.options.count.div_ceil(cols),
        }
    }

    pub fn set_count(&mut self, count: usize) {
        if self.options.count == count {
            return;
        }
        self.options.count = count;
        self.rebuild();
    }

    pub fn set_columns_per_row(&mut self, columns_per_row: usize) {
        if self.options.columns_per_row == columns_per_row {
            return;
        }
        self.options.columns_per_row = columns_per_row;
        self.rebuild();
    }

    pub fn set_cell_size(&mut self, cell_width: f64, cell_height: f64) {
        self.options.cell_width = cell_width;
        self.options.cell_height = cell_height;
        self.rebuild();
    }

    pub fn set_overscan(&mut self, overscan: impl Into<Overscan>) {
        self.options.overscan = overscan.into();
    }

    pub fn viewport_state(&self) -> GridViewportState {
        self.viewport
    }

    pub fn restore_viewport_state(&mut self, state: GridViewportState) {
        self.viewport = state;
    }

    pub fn set_viewport_height(&mut self, height: f64) {
        self.viewport.vertical.viewport_extent = finite_or_zero(height);
    }

    /// Enables horizontal virtualization with a viewport `width` wide; `None` disables it.
    pub fn set_viewport_width(&mut self, width: Option<f64>) {
        let scroll_left = self.scroll_left();
        self.viewport.horizontal = width.map(|w| ViewportState {
            scroll_offset: scroll_left,
            viewport_extent: finite_or_zero(w),
        });
    }

    pub fn scroll_top(&self) -> f64 {
        self.viewport.vertical.scroll_offset
    }

    pub fn scroll_left(&self) -> f64 {
        self.viewport.horizontal.map_or(0.0, |h| h.scroll_offset)
    }

    pub fn set_scroll_top(&mut self, offset: f64) {
        if offset.is_finite() {
            self.viewport.vertical.scroll_offset = offset;
        }
    }

    /// Ignored while horizontal virtualization is off.
    pub fn set_scroll_left(&mut self, offset: f64) {
        if let Some(h) = &mut self.viewport.horizontal {
            if offset.is_finite() {
                h.scroll_offset = offset;
            }
        }
    }

    pub fn total_extent(&self) -> GridExtent {
        GridExtent {
            width: self.columns.total_extent(),
            height: self.rows.total_extent(),
        }
    }

    /// Rows to materialize (overscan included).
    pub fn row_range(&self) -> VisibleRange {
        let v = self.viewport.vertical;
        compute_range(
            &self.rows,
            v.scroll_offset,
            v.viewport_extent,
            self.options.overscan,
        )
    }

    /// Columns to materialize within each visible row (overscan included).
    pub fn column_range(&self) -> VisibleRange {
        match self.viewport.horizontal {
            Some(h) => compute_range(
                &self.columns,
                h.scroll_offset,
                h.viewport_extent,
                self.options.overscan,
            ),
            None if self.columns.is_empty() || self.options.count == 0 => VisibleRange::EMPTY,
            None => VisibleRange::new(0, self.columns.len() - 1),
        }
    }

    /// The cell at a flat item index.
    pub fn cell(&self, index: usize) -> Option<GridCell> {
        let cols = self.options.columns_per_row;
        if index >= self.options.count || cols == 0 {
            return None;
        }
        Some(self.cell_at(index / cols, index % cols))
    }

    /// Visits the cells to materialize row by row, columns ascending. Indexes `>= count` on the
    /// last row are skipped.
    pub fn for_each_visible_cell(&self, mut f: impl FnMut(GridCell)) {
        let rows = self.row_range();
        let columns = self.column_range();
        if rows.is_empty() || columns.is_empty() {
            return;
        }
        let cols = self.options.columns_per_row;
        for row in rows.indices() {
            for column in columns.indices() {
                if row * cols + column >= self.options.count {
                    break;
                }
                f(self.cell_at(row, column));
            }
        }
    }

    /// Collects the cells to materialize into `out` (clears `out` first).
    pub fn collect_visible_cells(&self, out: &mut Vec<GridCell>) {
        out.clear();
        self.for_each_visible_cell(|cell| out.push(cell));
    }

    /// Runs one render pass over `items`. The cell count follows `items.len()`.
    pub fn virtualize_grid<T, R>(
        &mut self,
        items: &[T],
        mut render: impl FnMut(&T, GridCell) -> R,
    ) -> VirtualizedGrid<R> {
        self.set_count(items.len());
        let rows = self.row_range();
        let columns = self.column_range();
        let mut nodes = Vec::with_capacity(rows.len().saturating_mul(columns.len()));
        self.for_each_visible_cell(|cell| nodes.push(render(&items[cell.index], cell)));
        VirtualizedGrid {
            nodes,
            rows,
            columns,
            total_extent: self.total_extent(),
        }
    }

    fn cell_at(&self, row: usize, column: usize) -> GridCell {
        GridCell {
            index: row * self.options.columns_per_row + column,
            row,
            column,
            x: self.columns.offset_at(column),
            y: self.rows.offset_at(row),
            width: self.columns.extent_at(column).unwrap_or(0.0),
            height: self.rows.extent_at(row).unwrap_or(0.0),
        }
    }

    fn rebuild(&mut self) {
        let rows = self.row_count();
        let columns = if self.options.count == 0 {
            0
        } else {
            self.options.columns_per_row
        };
        vdebug!(rows, columns, "GridVirtualizer::rebuild");
        let on_diagnostic = self.options.on_diagnostic.as_ref();
        self.rows = PositionIndex::build(
            rows,
            &ExtentSource::Fixed(self.options.cell_height),
            on_diagnostic,
        );
        self.columns = PositionIndex::build(
            columns,
            &ExtentSource::Fixed(self.options.cell_width),
            on_diagnostic,
        );
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}
