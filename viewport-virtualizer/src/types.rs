use alloc::vec::Vec;
use core::ops::RangeInclusive;

/// The scroll axis of a one-dimensional list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    #[default]
    Vertical,
    Horizontal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
    /// Keep the current offset when the item is fully visible, otherwise scroll the minimum
    /// distance to reveal it.
    Auto,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    Forward,
    Backward,
}

/// An inclusive `[start, end]` index interval.
///
/// A range with `start > end` is empty; [`VisibleRange::EMPTY`] is the canonical empty value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleRange {
    pub start: usize,
    pub end: usize, // inclusive
}

impl VisibleRange {
    pub const EMPTY: Self = Self { start: 1, end: 0 };

    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.end - self.start + 1
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }

    /// Iterates the indexes of the range; yields nothing when empty.
    pub fn indices(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }
}

impl Default for VisibleRange {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// One materialized item: where the host should place it and how large it is.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VirtualItem {
    pub index: usize,
    /// Absolute offset of the item's start along the scroll axis.
    pub offset: f64,
    /// Size along the scroll axis.
    pub extent: f64,
}

impl VirtualItem {
    pub fn end(&self) -> f64 {
        self.offset + self.extent
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VirtualItemKeyed<K> {
    pub key: K,
    pub index: usize,
    pub offset: f64,
    pub extent: f64,
}

impl<K> VirtualItemKeyed<K> {
    pub fn end(&self) -> f64 {
        self.offset + self.extent
    }
}

pub type ItemKey = u64;

/// One materialized grid cell.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridCell {
    /// Index into the flat item collection (`row * columns_per_row + column`).
    pub index: usize,
    pub row: usize,
    pub column: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Total scrollable size of a grid.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridExtent {
    pub width: f64,
    pub height: f64,
}

/// The output of a list render pass: the host's rendered units plus the size of the scroll
/// container they are placed in.
#[derive(Clone, Debug, PartialEq)]
pub struct Virtualized<R> {
    pub nodes: Vec<R>,
    pub range: VisibleRange,
    pub total_extent: f64,
}

/// The output of a grid render pass.
#[derive(Clone, Debug, PartialEq)]
pub struct VirtualizedGrid<R> {
    pub nodes: Vec<R>,
    pub rows: VisibleRange,
    pub columns: VisibleRange,
    pub total_extent: GridExtent,
}
