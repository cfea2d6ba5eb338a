use alloc::vec::Vec;

use crate::extent::{DiagnosticCallback, ExtentSource, sanitize_extent};
use crate::math::{ceil_index, floor_index, non_negative};

/// Cumulative offsets for an ordered collection of items.
///
/// `offset_at(0) == 0`, `offset_at(i + 1) == offset_at(i) + extent(i)` and
/// `offset_at(len) == total_extent()`. Offsets are non-decreasing.
///
/// A [`ExtentSource::Fixed`] source uses a uniform layout (`offset_at(i) = i * extent`) without
/// any allocation; a [`ExtentSource::Variable`] source builds an `len + 1` offset table once, after
/// which lookups are direct indexing and offset → index searches are binary searches.
#[derive(Clone, Debug, PartialEq)]
pub struct PositionIndex {
    len: usize,
    layout: Layout,
}

#[derive(Clone, Debug, PartialEq)]
enum Layout {
    Uniform { extent: f64 },
    Cumulative { offsets: Vec<f64> }, // len + 1 entries
}

impl PositionIndex {
    pub fn empty() -> Self {
        Self {
            len: 0,
            layout: Layout::Uniform { extent: 0.0 },
        }
    }

    /// Builds the index for `len` items.
    ///
    /// Negative or non-finite extents are clamped to zero and reported to `on_diagnostic`.
    pub fn build(
        len: usize,
        source: &ExtentSource,
        on_diagnostic: Option<&DiagnosticCallback>,
    ) -> Self {
        vdebug!(len, fixed = source.is_fixed(), "PositionIndex::build");
        let layout = match source {
            ExtentSource::Fixed(v) => Layout::Uniform {
                extent: sanitize_extent(*v, None, on_diagnostic),
            },
            ExtentSource::Variable(_) => {
                let mut offsets = Vec::with_capacity(len + 1);
                offsets.push(0.0);
                append_offsets(&mut offsets, 0, len, source, on_diagnostic);
                Layout::Cumulative { offsets }
            }
        };
        Self { len, layout }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_uniform(&self) -> bool {
        matches!(self.layout, Layout::Uniform { .. })
    }

    /// Offset of the start of item `index`. Indexes past `len` clamp to `total_extent()`.
    pub fn offset_at(&self, index: usize) -> f64 {
        let index = index.min(self.len);
        match &self.layout {
            Layout::Uniform { extent } => index as f64 * extent,
            Layout::Cumulative { offsets } => offsets[index],
        }
    }

    pub fn extent_at(&self, index: usize) -> Option<f64> {
        if index >= self.len {
            return None;
        }
        Some(self.offset_at(index + 1) - self.offset_at(index))
    }

    pub fn total_extent(&self) -> f64 {
        self.offset_at(self.len)
    }

    /// The smallest index `i` with `offset_at(i + 1) > offset`, clamped to the last item.
    ///
    /// Returns `None` for an empty index.
    pub fn index_at_offset(&self, offset: f64) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        let offset = non_negative(offset);
        let last = self.len - 1;
        let i = match &self.layout {
            Layout::Uniform { extent } if *extent > 0.0 => {
                // The quotient can round across an item boundary that `i * extent` does not.
                let mut i = floor_index(offset / extent).min(last);
                while i < last && self.offset_at(i + 1) <= offset {
                    i += 1;
                }
                while i > 0 && self.offset_at(i) > offset {
                    i -= 1;
                }
                i
            }
            // Every item ends at 0, so no item ends past `offset`.
            Layout::Uniform { .. } => last,
            Layout::Cumulative { offsets } => offsets[1..].partition_point(|&o| o <= offset),
        };
        Some(i.min(last))
    }

    /// The largest index `j` with `offset_at(j) < end`.
    ///
    /// Returns `None` when the index is empty or `end <= 0`.
    pub fn last_index_before(&self, end: f64) -> Option<usize> {
        if self.len == 0 || !(end > 0.0) {
            return None;
        }
        let last = self.len - 1;
        let j = match &self.layout {
            Layout::Uniform { extent } if *extent > 0.0 => {
                let mut j = ceil_index(end / extent).saturating_sub(1).min(last);
                while j < last && self.offset_at(j + 1) < end {
                    j += 1;
                }
                while j > 0 && self.offset_at(j) >= end {
                    j -= 1;
                }
                j
            }
            Layout::Uniform { .. } => last,
            Layout::Cumulative { offsets } => {
                offsets[..self.len].partition_point(|&o| o < end) - 1
            }
        };
        Some(j.min(last))
    }

    /// Recomputes offsets from `first_changed` onward after the host changed extents in place.
    ///
    /// The unchanged prefix is kept. A uniform layout (or a layout whose kind no longer matches
    /// `source`) is rebuilt from scratch.
    pub fn invalidate_from(
        &mut self,
        first_changed: usize,
        source: &ExtentSource,
        on_diagnostic: Option<&DiagnosticCallback>,
    ) {
        match (&mut self.layout, source) {
            (Layout::Cumulative { offsets }, ExtentSource::Variable(_)) => {
                if first_changed >= self.len {
                    return;
                }
                vtrace!(first_changed, len = self.len, "PositionIndex::invalidate_from");
                offsets.truncate(first_changed + 1);
                append_offsets(offsets, first_changed, self.len, source, on_diagnostic);
            }
            _ => *self = Self::build(self.len, source, on_diagnostic),
        }
    }

    /// Changes the item count, keeping the offsets of items that remain.
    pub fn resize(
        &mut self,
        len: usize,
        source: &ExtentSource,
        on_diagnostic: Option<&DiagnosticCallback>,
    ) {
        if len == self.len {
            return;
        }
        match (&mut self.layout, source) {
            (Layout::Uniform { .. }, ExtentSource::Fixed(_)) => self.len = len,
            (Layout::Cumulative { offsets }, ExtentSource::Variable(_)) => {
                if len < self.len {
                    offsets.truncate(len + 1);
                } else {
                    offsets.reserve(len - self.len);
                    append_offsets(offsets, self.len, len, source, on_diagnostic);
                }
                self.len = len;
            }
            _ => *self = Self::build(len, source, on_diagnostic),
        }
    }
}

impl Default for PositionIndex {
    fn default() -> Self {
        Self::empty()
    }
}

/// Extends `offsets` (which must end with `offset_at(from)`) through `offset_at(to)`.
fn append_offsets(
    offsets: &mut Vec<f64>,
    from: usize,
    to: usize,
    source: &ExtentSource,
    on_diagnostic: Option<&DiagnosticCallback>,
) {
    debug_assert_eq!(offsets.len(), from + 1, "offset table out of sync");
    let mut acc = offsets[from];
    for i in from..to {
        let extent = sanitize_extent(source.raw(i), Some(i), on_diagnostic);
        // Saturate instead of overflowing to infinity.
        acc = (acc + extent).min(f64::MAX);
        offsets.push(acc);
    }
}
