use alloc::vec::Vec;
use core::cmp;

use crate::math::non_negative;
use crate::range::{compute_range, compute_visible_range};
use crate::{
    Align, Axis, ExtentSource, ItemKey, ListOptions, Overscan, PositionIndex, ScrollDirection,
    ViewportState, VirtualItem, VirtualItemKeyed, Virtualized, VisibleRange,
};

/// A headless virtualizer for one-dimensional lists and tables.
///
/// The instance owns its [`PositionIndex`] and [`ViewportState`] and nothing else: no UI objects,
/// no global state. The host drives it with viewport/scroll updates and reads back the items to
/// materialize, each with the absolute offset at which to place it inside a container sized to
/// [`Self::total_extent`].
///
/// The position index is rebuilt only when the item count or the extent source changes; every
/// range query is a binary search (or a division, for uniform extents).
#[derive(Clone, Debug)]
pub struct ListVirtualizer<K = ItemKey> {
    options: ListOptions<K>,
    index: PositionIndex,
    viewport: ViewportState,
    scroll_direction: Option<ScrollDirection>,
}

impl<K> ListVirtualizer<K> {
    pub fn new(options: ListOptions<K>) -> Self {
        vdebug!(
            count = options.count,
            fixed = options.extent.is_fixed(),
            "ListVirtualizer::new"
        );
        let index =
            PositionIndex::build(options.count, &options.extent, options.on_diagnostic.as_ref());
        Self {
            options,
            index,
            viewport: ViewportState::default(),
            scroll_direction: None,
        }
    }

    pub fn options(&self) -> &ListOptions<K> {
        &self.options
    }

    /// Replaces the options, rebuilding the position index only when the extent source identity
    /// changed (or resizing it when only the count changed).
    pub fn set_options(&mut self, options: ListOptions<K>) {
        let same_extent = self.options.extent.same_source(&options.extent);
        let prev_count = self.options.count;
        self.options = options;
        if !same_extent {
            self.rebuild_index();
        } else if self.options.count != prev_count {
            self.resize_index();
        }
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut ListOptions<K>)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn count(&self) -> usize {
        self.options.count
    }

    pub fn axis(&self) -> Axis {
        self.options.axis
    }

    pub fn overscan(&self) -> Overscan {
        self.options.overscan
    }

    pub fn set_overscan(&mut self, overscan: impl Into<Overscan>) {
        self.options.overscan = overscan.into();
    }

    pub fn set_count(&mut self, count: usize) {
        if self.options.count == count {
            return;
        }
        self.options.count = count;
        self.resize_index();
    }

    /// Swaps the extent source. A source identical to the current one (same constant, or the
    /// same `Arc`'d closure) is a no-op.
    pub fn set_extent(&mut self, extent: ExtentSource) {
        if self.options.extent.same_source(&extent) {
            return;
        }
        self.options.extent = extent;
        self.rebuild_index();
    }

    /// Tells the virtualizer that extents from `first_changed` onward may differ from what the
    /// extent function returned before, without swapping the function itself.
    pub fn invalidate_extents_from(&mut self, first_changed: usize) {
        self.index.invalidate_from(
            first_changed,
            &self.options.extent,
            self.options.on_diagnostic.as_ref(),
        );
    }

    pub fn position_index(&self) -> &PositionIndex {
        &self.index
    }

    pub fn viewport_state(&self) -> ViewportState {
        self.viewport
    }

    pub fn restore_viewport_state(&mut self, state: ViewportState) {
        self.set_viewport_extent(state.viewport_extent);
        self.set_scroll_offset(state.scroll_offset);
    }

    pub fn viewport_extent(&self) -> f64 {
        self.viewport.viewport_extent
    }

    /// Non-finite sizes are treated as `0` (an empty viewport).
    pub fn set_viewport_extent(&mut self, viewport_extent: f64) {
        self.viewport.viewport_extent = if viewport_extent.is_finite() {
            viewport_extent
        } else {
            vwarn!(viewport_extent, "non-finite viewport extent treated as 0");
            0.0
        };
    }

    pub fn scroll_offset(&self) -> f64 {
        self.viewport.scroll_offset
    }

    pub fn scroll_direction(&self) -> Option<ScrollDirection> {
        self.scroll_direction
    }

    /// Stores the offset as reported. Out-of-range (elastic) offsets are kept and clamped only
    /// when ranges are computed. Non-finite offsets are ignored.
    pub fn set_scroll_offset(&mut self, offset: f64) {
        if !offset.is_finite() {
            vwarn!(offset, "non-finite scroll offset ignored");
            return;
        }
        let prev = self.viewport.scroll_offset;
        if offset > prev {
            self.scroll_direction = Some(ScrollDirection::Forward);
        } else if offset < prev {
            self.scroll_direction = Some(ScrollDirection::Backward);
        }
        vtrace!(offset, "ListVirtualizer::set_scroll_offset");
        self.viewport.scroll_offset = offset;
    }

    pub fn set_scroll_offset_clamped(&mut self, offset: f64) {
        let clamped = self.clamp_scroll_offset(offset);
        self.set_scroll_offset(clamped);
    }

    pub fn set_viewport_and_scroll(&mut self, viewport_extent: f64, scroll_offset: f64) {
        self.set_viewport_extent(viewport_extent);
        self.set_scroll_offset(scroll_offset);
    }

    /// Sum of all item extents, independent of how many items are materialized.
    pub fn total_extent(&self) -> f64 {
        self.index.total_extent()
    }

    pub fn max_scroll_offset(&self) -> f64 {
        (self.total_extent() - non_negative(self.viewport.viewport_extent)).max(0.0)
    }

    pub fn clamp_scroll_offset(&self, offset: f64) -> f64 {
        non_negative(offset).min(self.max_scroll_offset())
    }

    /// Start offset of `index`; `offset_at(count)` is the total extent.
    pub fn offset_at(&self, index: usize) -> Option<f64> {
        (index <= self.options.count).then(|| self.index.offset_at(index))
    }

    pub fn extent_at(&self, index: usize) -> Option<f64> {
        self.index.extent_at(index)
    }

    pub fn item(&self, index: usize) -> Option<VirtualItem> {
        let extent = self.index.extent_at(index)?;
        Some(VirtualItem {
            index,
            offset: self.index.offset_at(index),
            extent,
        })
    }

    pub fn index_at_offset(&self, offset: f64) -> Option<usize> {
        self.index.index_at_offset(offset)
    }

    pub fn item_at_offset(&self, offset: f64) -> Option<VirtualItem> {
        self.item(self.index_at_offset(offset)?)
    }

    pub fn key_for(&self, index: usize) -> K {
        (self.options.get_item_key)(index)
    }

    /// Items intersecting the viewport, without overscan.
    pub fn visible_range(&self) -> VisibleRange {
        self.visible_range_for(self.viewport.scroll_offset, self.viewport.viewport_extent)
    }

    pub fn visible_range_for(&self, scroll_offset: f64, viewport_extent: f64) -> VisibleRange {
        compute_visible_range(&self.index, scroll_offset, viewport_extent)
    }

    /// Items to materialize: the visible range widened by the overscan.
    pub fn virtual_range(&self) -> VisibleRange {
        self.virtual_range_for(self.viewport.scroll_offset, self.viewport.viewport_extent)
    }

    pub fn virtual_range_for(&self, scroll_offset: f64, viewport_extent: f64) -> VisibleRange {
        compute_range(
            &self.index,
            scroll_offset,
            viewport_extent,
            self.options.overscan,
        )
    }

    pub fn for_each_virtual_item(&self, f: impl FnMut(VirtualItem)) {
        self.for_each_virtual_item_for(
            self.viewport.scroll_offset,
            self.viewport.viewport_extent,
            f,
        );
    }

    pub fn for_each_virtual_item_for(
        &self,
        scroll_offset: f64,
        viewport_extent: f64,
        mut f: impl FnMut(VirtualItem),
    ) {
        let range = self.virtual_range_for(scroll_offset, viewport_extent);
        for i in range.indices() {
            let offset = self.index.offset_at(i);
            f(VirtualItem {
                index: i,
                offset,
                extent: self.index.offset_at(i + 1) - offset,
            });
        }
    }

    pub fn for_each_virtual_item_keyed(&self, mut f: impl FnMut(VirtualItemKeyed<K>)) {
        self.for_each_virtual_item(|it| {
            f(VirtualItemKeyed {
                key: self.key_for(it.index),
                index: it.index,
                offset: it.offset,
                extent: it.extent,
            });
        });
    }

    /// Collects virtual items into `out` (clears `out` first).
    ///
    /// Reuse `out` across frames to avoid reallocating on every scroll tick.
    pub fn collect_virtual_items(&self, out: &mut Vec<VirtualItem>) {
        out.clear();
        self.for_each_virtual_item(|it| out.push(it));
    }

    /// Runs one render pass over `items`.
    ///
    /// The item count follows `items.len()` (resizing the position index when it changed), then
    /// `render` is called once per materialized item, in index order. `render` is never called
    /// for an empty collection or an empty viewport.
    pub fn virtualize<T, R>(
        &mut self,
        items: &[T],
        mut render: impl FnMut(&T, VirtualItem) -> R,
    ) -> Virtualized<R> {
        self.set_count(items.len());
        let range = self.virtual_range();
        let mut nodes = Vec::with_capacity(range.len());
        self.for_each_virtual_item(|it| nodes.push(render(&items[it.index], it)));
        Virtualized {
            nodes,
            range,
            total_extent: self.total_extent(),
        }
    }

    /// Like [`Self::virtualize`], handing each item its key from `get_item_key`.
    pub fn virtualize_keyed<T, R>(
        &mut self,
        items: &[T],
        mut render: impl FnMut(&T, VirtualItemKeyed<K>) -> R,
    ) -> Virtualized<R> {
        self.set_count(items.len());
        let range = self.virtual_range();
        let mut nodes = Vec::with_capacity(range.len());
        self.for_each_virtual_item_keyed(|it| {
            let item = &items[it.index];
            nodes.push(render(item, it));
        });
        Virtualized {
            nodes,
            range,
            total_extent: self.total_extent(),
        }
    }

    /// Computes the (clamped) scroll offset that brings `index` into view with `align`.
    pub fn scroll_to_index_offset(&self, index: usize, align: Align) -> f64 {
        let count = self.options.count;
        if count == 0 {
            return 0.0;
        }
        let index = cmp::min(index, count - 1);
        let start = self.index.offset_at(index);
        let end = self.index.offset_at(index + 1);
        let view = non_negative(self.viewport.viewport_extent);

        let target = match align {
            Align::Start => start,
            Align::End => end - view,
            Align::Center => (start + end) / 2.0 - view / 2.0,
            Align::Auto => {
                let cur = self.clamp_scroll_offset(self.viewport.scroll_offset);
                if start >= cur && end <= cur + view {
                    cur
                } else if start < cur {
                    start
                } else {
                    end - view
                }
            }
        };
        self.clamp_scroll_offset(target)
    }

    /// Scrolls to `index` (no animation). Returns the applied offset.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> f64 {
        let offset = self.scroll_to_index_offset(index, align);
        self.set_scroll_offset(offset);
        offset
    }

    fn rebuild_index(&mut self) {
        self.index = PositionIndex::build(
            self.options.count,
            &self.options.extent,
            self.options.on_diagnostic.as_ref(),
        );
    }

    fn resize_index(&mut self) {
        self.index.resize(
            self.options.count,
            &self.options.extent,
            self.options.on_diagnostic.as_ref(),
        );
    }
}
