//! A headless viewport virtualization engine.
//!
//! Given an ordered collection of items and a bounded scrollable viewport, this crate computes
//! the minimal contiguous run of items that must be materialized, plus the layout metrics
//! (absolute item offsets, total scroll extent) a host needs to place them:
//!
//! - [`PositionIndex`]: cumulative item offsets, O(1) for uniform extents, a prefix table plus
//!   binary search for heterogeneous ones.
//! - [`compute_visible_range`] / [`compute_range`]: offset → inclusive index range, with
//!   [`Overscan`].
//! - [`ListVirtualizer`]: one-dimensional lists and tables.
//! - [`GridVirtualizer`]: fixed-size cells in rows × columns.
//!
//! It is UI-agnostic. A host layer is expected to provide the viewport size, the scroll offset
//! and the item extents, and to render whatever the virtualizer hands back. For scroll event
//! coalescing and anchoring, see the `viewport-virtualizer-adapter` crate.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod extent;
mod grid;
mod list;
mod math;
mod options;
mod position;
mod range;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use extent::{DiagnosticCallback, ExtentDiagnostic, ExtentFn, ExtentIssue, ExtentSource};
pub use grid::GridVirtualizer;
pub use list::ListVirtualizer;
pub use options::{GetItemKey, GridOptions, ListOptions};
pub use position::PositionIndex;
pub use range::{Overscan, compute_range, compute_visible_range};
pub use state::{GridViewportState, ViewportState};
pub use types::{
    Align, Axis, GridCell, GridExtent, ItemKey, ScrollDirection, VirtualItem, VirtualItemKeyed,
    Virtualized, VirtualizedGrid, VisibleRange,
};
