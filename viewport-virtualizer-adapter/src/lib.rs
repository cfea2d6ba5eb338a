//! Host-side helpers for the `viewport-virtualizer` crate.
//!
//! The core crate only does math over a viewport the host describes. This crate covers the
//! stateful bits between a real scroll container and that math:
//!
//! - [`ScrollController`]: subscribes to a [`ScrollSource`] and coalesces scroll notifications
//!   into at most one callback per display frame, scheduled through a [`FrameScheduler`].
//! - [`ScrollAnchor`]: keeps the viewport pinned to an item across inserts above it.
//!
//! No UI toolkit is assumed; hosts implement the two traits over their own event and frame
//! primitives, or drive a [`FrameQueue`] from their own loop.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod anchor;
mod controller;
mod frame;


pub use anchor::{
    ScrollAnchor, apply_anchor, capture_anchor_at_offset, capture_first_visible_anchor,
};
pub use controller::{ControllerState, ScrollController, ScrollSource};
pub use frame::{FrameHandle, FrameQueue, FrameScheduler};
