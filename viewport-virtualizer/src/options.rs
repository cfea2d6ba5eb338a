use alloc::sync::Arc;

use crate::{Axis, DiagnosticCallback, ExtentDiagnostic, ExtentSource, ItemKey, Overscan};

/// A stable identity for the item at an index, used to keep rendered nodes attached to the same
/// data across recomputations.
pub type GetItemKey<K> = Arc<dyn Fn(usize) -> K + Send + Sync>;

/// Configuration for [`crate::ListVirtualizer`].
///
/// Closures are stored in `Arc`s so options are cheap to clone and re-apply through
/// `ListVirtualizer::set_options`.
pub struct ListOptions<K = ItemKey> {
    pub count: usize,
    pub extent: ExtentSource,
    pub overscan: Overscan,
    pub axis: Axis,
    pub get_item_key: GetItemKey<K>,
    /// Receives a diagnostic whenever an extent is clamped to zero.
    pub on_diagnostic: Option<DiagnosticCallback>,
}

impl<K> Clone for ListOptions<K> {
    fn clone(&self) -> Self {
        Self {
            count: self.count,
            extent: self.extent.clone(),
            overscan: self.overscan,
            axis: self.axis,
            get_item_key: Arc::clone(&self.get_item_key),
            on_diagnostic: self.on_diagnostic.clone(),
        }
    }
}

impl ListOptions<ItemKey> {
    /// Creates options for a list keyed by index (`ItemKey = u64`).
    pub fn new(count: usize, extent: ExtentSource) -> Self {
        Self {
            count,
            extent,
            overscan: Overscan::default(),
            axis: Axis::default(),
            get_item_key: Arc::new(|i| i as u64),
            on_diagnostic: None,
        }
    }

    /// Uniform-extent list; selects the O(1) position layout.
    pub fn fixed(count: usize, extent: f64) -> Self {
        Self::new(count, ExtentSource::Fixed(extent))
    }

    /// Heterogeneous list; `extent(i)` must be pure until the host invalidates it.
    pub fn variable(count: usize, extent: impl Fn(usize) -> f64 + Send + Sync + 'static) -> Self {
        Self::new(count, ExtentSource::variable(extent))
    }
}

impl<K> ListOptions<K> {
    /// Replaces the key mapping, possibly changing the key type.
    ///
    /// The mapping receives only the index. To key by item data, capture the data (or an
    /// `Arc` of it) in the closure and index into it; swap the options when the data changes.
    pub fn with_get_item_key<K2>(
        self,
        get_item_key: impl Fn(usize) -> K2 + Send + Sync + 'static,
    ) -> ListOptions<K2> {
        ListOptions {
            count: self.count,
            extent: self.extent,
            overscan: self.overscan,
            axis: self.axis,
            get_item_key: Arc::new(get_item_key),
            on_diagnostic: self.on_diagnostic,
        }
    }

    pub fn with_overscan(mut self, overscan: impl Into<Overscan>) -> Self {
        self.overscan = overscan.into();
        self
    }

    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_extent(mut self, extent: ExtentSource) -> Self {
        self.extent = extent;
        self
    }

    pub fn with_on_diagnostic(
        mut self,
        on_diagnostic: Option<impl Fn(ExtentDiagnostic) + Send + Sync + 'static>,
    ) -> Self {
        self.on_diagnostic = on_diagnostic.map(|f| Arc::new(f) as _);
        self
    }
}

impl<K> core::fmt::Debug for ListOptions<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListOptions")
            .field("count", &self.count)
            .field("extent", &self.extent)
            .field("overscan", &self.overscan)
            .field("axis", &self.axis)
            .finish_non_exhaustive()
    }
}

/// Configuration for [`crate::GridVirtualizer`]: `count` fixed-size cells laid out row-major,
/// `columns_per_row` per row.
#[derive(Clone)]
pub struct GridOptions {
    pub count: usize,
    pub columns_per_row: usize,
    pub cell_width: f64,
    pub cell_height: f64,
    /// Applied independently on both axes.
    pub overscan: Overscan,
    pub on_diagnostic: Option<DiagnosticCallback>,
}

impl GridOptions {
    pub fn new(count: usize, columns_per_row: usize, cell_width: f64, cell_height: f64) -> Self {
        Self {
            count,
            columns_per_row,
            cell_width,
            cell_height,
            overscan: Overscan::default(),
            on_diagnostic: None,
        }
    }

    pub fn with_overscan(mut self, overscan: impl Into<Overscan>) -> Self {
        self.overscan = overscan.into();
        self
    }

    pub fn with_on_diagnostic(
        mut self,
        on_diagnostic: Option<impl Fn(ExtentDiagnostic) + Send + Sync + 'static>,
    ) -> Self {
        self.on_diagnostic = on_diagnostic.map(|f| Arc::new(f) as _);
        self
    }
}

impl core::fmt::Debug for GridOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GridOptions")
            .field("count", &self.count)
            .field("columns_per_row", &self.columns_per_row)
            .field("cell_width", &self.cell_width)
            .field("cell_height", &self.cell_height)
            .field("overscan", &self.overscan)
            .finish_non_exhaustive()
    }
}
