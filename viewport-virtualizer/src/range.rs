//! Offset → index range computation over a [`PositionIndex`].
//!
//! Both functions are pure: identical inputs always produce the same range.

use crate::math::non_negative;
use crate::{PositionIndex, VisibleRange};

/// Extra content materialized around the strictly-visible window.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Overscan {
    /// A number of items on each side.
    Items(usize),
    /// A pixel margin on each side.
    Pixels(f64),
}

impl Default for Overscan {
    fn default() -> Self {
        Self::Items(1)
    }
}

impl From<usize> for Overscan {
    fn from(items: usize) -> Self {
        Self::Items(items)
    }
}

/// The items whose interval `[offset_at(i), offset_at(i + 1))` intersects
/// `[scroll_offset, scroll_offset + viewport_extent)`.
///
/// `scroll_offset` is clamped to `[0, total_extent]` first. An offset at (or past) the end maps
/// to the last item. Empty when the index is empty or `viewport_extent <= 0`.
pub fn compute_visible_range(
    index: &PositionIndex,
    scroll_offset: f64,
    viewport_extent: f64,
) -> VisibleRange {
    window(index, scroll_offset, viewport_extent, 0.0)
}

/// [`compute_visible_range`] widened by `overscan` and clamped to `[0, len - 1]`.
pub fn compute_range(
    index: &PositionIndex,
    scroll_offset: f64,
    viewport_extent: f64,
    overscan: Overscan,
) -> VisibleRange {
    match overscan {
        Overscan::Items(n) => {
            let visible = window(index, scroll_offset, viewport_extent, 0.0);
            if visible.is_empty() {
                return visible;
            }
            let last = index.len() - 1;
            VisibleRange {
                start: visible.start.saturating_sub(n),
                end: visible.end.saturating_add(n).min(last),
            }
        }
        Overscan::Pixels(px) => window(index, scroll_offset, viewport_extent, non_negative(px)),
    }
}

fn window(
    index: &PositionIndex,
    scroll_offset: f64,
    viewport_extent: f64,
    margin: f64,
) -> VisibleRange {
    if index.is_empty() || !(viewport_extent > 0.0) {
        return VisibleRange::EMPTY;
    }
    let total = index.total_extent();
    let scroll = non_negative(scroll_offset).min(total);
    let lo = (scroll - margin).max(0.0);
    let hi = scroll + viewport_extent + margin;

    let (Some(start), Some(end)) = (index.index_at_offset(lo), index.last_index_before(hi)) else {
        return VisibleRange::EMPTY;
    };
    VisibleRange {
        start,
        end: end.max(start),
    }
}
