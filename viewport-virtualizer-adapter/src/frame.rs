use alloc::vec::Vec;
use core::fmt;
use core::mem;

/// The host's "run this on the next display frame" primitive.
///
/// A browser adapter would back this with `requestAnimationFrame`/`cancelAnimationFrame`; a
/// native one with its vsync or compositor tick. The controller only ever holds one pending
/// request at a time.
pub trait FrameScheduler {
    type Handle: Copy + Eq + fmt::Debug;

    /// Requests a single callback on the next frame. The host reports it back through
    /// [`crate::ScrollController::handle_frame`] with the returned handle.
    fn request_frame(&mut self) -> Self::Handle;

    /// Cancels a request that has not fired yet. Cancelling a fired or unknown handle is a no-op.
    fn cancel_frame(&mut self, handle: Self::Handle);
}

/// A handle returned by [`FrameQueue::request_frame`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(pub(crate) u64);

impl FrameHandle {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// An in-memory [`FrameScheduler`] for hosts that run their own frame loop (and for tests).
///
/// Requests accumulate until the loop calls [`Self::take_due`] once per frame.
#[derive(Clone, Debug, Default)]
pub struct FrameQueue {
    next_id: u64,
    pending: Vec<FrameHandle>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Removes and returns every request made so far, oldest first.
    pub fn take_due(&mut self) -> Vec<FrameHandle> {
        mem::take(&mut self.pending)
    }
}

impl FrameScheduler for FrameQueue {
    type Handle = FrameHandle;

    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.pending.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.retain(|&h| h != handle);
    }
}
