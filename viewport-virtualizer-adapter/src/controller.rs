use viewport_virtualizer::ScrollDirection;

use crate::{FrameQueue, FrameScheduler};

/// Where scroll notifications come from: a DOM element, a native scroll view, a terminal pane.
///
/// `subscribe` starts delivering notifications to the host, which forwards each one to
/// [`ScrollController::handle_scroll`]; `unsubscribe` stops them.
pub trait ScrollSource {
    type Subscription;

    fn subscribe(&mut self) -> Self::Subscription;

    fn unsubscribe(&mut self, subscription: Self::Subscription);
}

/// For hosts that forward scroll events by hand and have nothing to subscribe to.
impl ScrollSource for () {
    type Subscription = ();

    fn subscribe(&mut self) {}

    fn unsubscribe(&mut self, _subscription: ()) {}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ControllerState {
    /// Attached, no frame pending.
    Idle,
    /// Attached, one frame pending. Further scroll events only replace the stored offset.
    Scheduled,
    /// Detached. Nothing is ever delivered again.
    Detached,
}

/// Coalesces bursts of scroll notifications into at most one `on_scroll(offset)` per display
/// frame, always with the most recent offset.
///
/// ```text
/// Idle --scroll--> Scheduled --frame--> Idle (on_scroll(latest))
/// Scheduled --scroll--> Scheduled (latest replaced)
/// any --detach--> Detached (pending frame cancelled)
/// ```
///
/// The controller is the detach handle: [`Self::detach`] is idempotent, and dropping the
/// controller detaches it.
pub struct ScrollController<V, S, F>
where
    V: ScrollSource,
    S: FrameScheduler,
{
    source: V,
    subscription: Option<V::Subscription>,
    scheduler: S,
    pending: Option<S::Handle>,
    on_scroll: F,
    state: ControllerState,
    latest_offset: f64,
    scroll_direction: Option<ScrollDirection>,
}

impl<V, S, F> ScrollController<V, S, F>
where
    V: ScrollSource,
    S: FrameScheduler,
    F: FnMut(f64),
{
    /// Subscribes to `source` and starts coalescing its notifications.
    pub fn attach(mut source: V, scheduler: S, on_scroll: F) -> Self {
        let subscription = source.subscribe();
        adebug!("ScrollController::attach");
        Self {
            source,
            subscription: Some(subscription),
            scheduler,
            pending: None,
            on_scroll,
            state: ControllerState::Idle,
            latest_offset: 0.0,
            scroll_direction: None,
        }
    }

    /// Records a scroll notification. Schedules a frame unless one is already pending.
    ///
    /// No-op once detached. Non-finite offsets are dropped.
    pub fn handle_scroll(&mut self, offset: f64) {
        if self.state == ControllerState::Detached {
            return;
        }
        if !offset.is_finite() {
            awarn!(offset, "non-finite scroll offset dropped");
            return;
        }
        if offset > self.latest_offset {
            self.scroll_direction = Some(ScrollDirection::Forward);
        } else if offset < self.latest_offset {
            self.scroll_direction = Some(ScrollDirection::Backward);
        }
        self.latest_offset = offset;

        if self.state == ControllerState::Idle {
            let handle = self.scheduler.request_frame();
            atrace!(offset, ?handle, "ScrollController: frame scheduled");
            self.pending = Some(handle);
            self.state = ControllerState::Scheduled;
        }
    }

    /// Delivers the pending frame: returns to `Idle`, then calls `on_scroll` with the latest
    /// offset. Returns whether `on_scroll` ran.
    ///
    /// Handles that are not the pending one (already fired, cancelled, or from another
    /// controller) are ignored.
    pub fn handle_frame(&mut self, handle: S::Handle) -> bool {
        if self.state != ControllerState::Scheduled || self.pending != Some(handle) {
            awarn!(?handle, state = ?self.state, "stale frame ignored");
            return false;
        }
        self.pending = None;
        self.state = ControllerState::Idle;
        atrace!(offset = self.latest_offset, "ScrollController: frame delivered");
        (self.on_scroll)(self.latest_offset);
        true
    }
}

impl<V, S, F> ScrollController<V, S, F>
where
    V: ScrollSource,
    S: FrameScheduler,
{
    /// Unsubscribes from the source and cancels any pending frame. Safe to call repeatedly.
    pub fn detach(&mut self) {
        if self.state == ControllerState::Detached {
            return;
        }
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        if let Some(subscription) = self.subscription.take() {
            self.source.unsubscribe(subscription);
        }
        self.state = ControllerState::Detached;
        adebug!("ScrollController::detach");
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn is_attached(&self) -> bool {
        self.state != ControllerState::Detached
    }

    pub fn is_scheduled(&self) -> bool {
        self.state == ControllerState::Scheduled
    }

    pub fn pending_frame(&self) -> Option<S::Handle> {
        self.pending
    }

    /// The most recent offset seen, delivered or not.
    pub fn latest_offset(&self) -> f64 {
        self.latest_offset
    }

    pub fn scroll_direction(&self) -> Option<ScrollDirection> {
        self.scroll_direction
    }

    pub fn source(&self) -> &V {
        &self.source
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

impl<V, F> ScrollController<V, FrameQueue, F>
where
    V: ScrollSource,
    F: FnMut(f64),
{
    /// Runs one frame of an owned [`FrameQueue`]. Returns how many `on_scroll` calls it made
    /// (zero or one).
    pub fn pump_frames(&mut self) -> usize {
        let due = self.scheduler.take_due();
        due.into_iter().filter(|&h| self.handle_frame(h)).count()
    }
}

impl<V, S, F> Drop for ScrollController<V, S, F>
where
    V: ScrollSource,
    S: FrameScheduler,
{
    fn drop(&mut self) {
        self.detach();
    }
}

impl<V, S, F> core::fmt::Debug for ScrollController<V, S, F>
where
    V: ScrollSource,
    S: FrameScheduler,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScrollController")
            .field("state", &self.state)
            .field("pending", &self.pending)
            .field("latest_offset", &self.latest_offset)
            .finish_non_exhaustive()
    }
}
