// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The orchestrator: one per host container.
//!
//! [`PopupController`] owns the presentation state, the bar, the content and
//! both interactive transitions. The bar engine lives in `bar.rs`, the content
//! engine in `content.rs`, drag handling in `drive.rs` and the peek adapter in
//! `peek.rs`; this module holds the shared plumbing they use: state changes
//! with fan-out, animation bookkeeping and frame sampling in [`advance`].
//!
//! [`advance`]: PopupController::advance

use alloc::boxed::Box;
use core::fmt;

use understory_timing::{TimerId, TimerQueue};

use crate::animation::{Easing, Frame, FrameAnimation};
use crate::config::PopupConfig;
use crate::geometry::{
    BarFrames, ContentFrames, Insets, PresentationStyle, bar_frames, content_frames,
};
use crate::host::PopupHost;
use crate::interactive::{ContentId, InteractiveTransition, TransitionRole};
use crate::observer::{ObserverId, Observers, PopupObserver};
use crate::state::PresentationState;

/// How a requested transition ended, passed to its completion.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TransitionResult {
    /// The transition ran to its end.
    Completed,
    /// The request was not legal in the current state; nothing changed.
    Rejected,
}

/// Completion callback for a requested transition. Invoked exactly once.
///
/// Completions run inside the controller call that finishes the transition
/// (the request itself when rejected or not animated, otherwise
/// [`PopupController::advance`]), while the controller is mutably borrowed.
/// A controller kept in an `Rc<RefCell<..>>` therefore cannot be re-entered
/// from a completion: record the follow-up there and issue it after the call
/// returns, typically right after `advance`.
pub type Completion = Box<dyn FnOnce(TransitionResult)>;

/// Client content presented above the bar.
pub trait PopupContent {
    /// Vertical scroll offset when the content is itself scrollable.
    ///
    /// An offset above zero means the content is scrolled away from its top
    /// and keeps dismiss drags for itself.
    fn scroll_offset(&self) -> Option<f64> {
        None
    }
}

/// The bar container as the controller sees it.
#[derive(Clone, Debug, PartialEq)]
pub struct BarView {
    height: f64,
    pub(crate) frame: Frame,
    pub(crate) highlighted: bool,
    pub(crate) tap_enabled: bool,
    pub(crate) layout_suspended: bool,
}

impl BarView {
    pub(crate) fn new(height: f64, frame: Frame) -> Self {
        Self {
            height,
            frame,
            highlighted: false,
            tap_enabled: true,
            layout_suspended: false,
        }
    }

    /// Bar height, fixed for the lifetime of this bar.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Current container frame and opacity.
    #[must_use]
    pub fn frame(&self) -> Frame {
        self.frame
    }

    /// Returns `true` while the bar shows its highlighted state.
    #[must_use]
    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    /// Returns `true` if taps on the bar open the content.
    #[must_use]
    pub fn is_tap_enabled(&self) -> bool {
        self.tap_enabled
    }

    /// Returns `true` while relayout is suspended (during dismissal).
    #[must_use]
    pub fn is_layout_suspended(&self) -> bool {
        self.layout_suspended
    }
}

/// The content as the controller sees it.
#[derive(Clone, Debug)]
pub struct ContentView<C> {
    id: ContentId,
    content: C,
    style: PresentationStyle,
    pub(crate) frame: Frame,
}

impl<C> ContentView<C> {
    pub(crate) fn new(id: ContentId, content: C, style: PresentationStyle, frame: Frame) -> Self {
        Self {
            id,
            content,
            style,
            frame,
        }
    }

    /// Identity of this content.
    #[must_use]
    pub fn id(&self) -> ContentId {
        self.id
    }

    /// The client content.
    #[must_use]
    pub fn content(&self) -> &C {
        &self.content
    }

    /// Mutable access to the client content.
    pub fn content_mut(&mut self) -> &mut C {
        &mut self.content
    }

    /// Presentation style captured when the content was attached.
    #[must_use]
    pub fn style(&self) -> PresentationStyle {
        self.style
    }

    /// Current frame and opacity.
    #[must_use]
    pub fn frame(&self) -> Frame {
        self.frame
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum BarStep {
    Present,
    Dismiss,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum ContentStep {
    Open,
    Close,
    /// Interactive cancellation back to the state the drag started in.
    Revert(PresentationState),
}

pub(crate) struct Running<S> {
    pub(crate) step: S,
    pub(crate) animation: FrameAnimation,
    pub(crate) completion: Option<Completion>,
}

/// A dismissal requested while the content was open; runs once it has closed.
pub(crate) struct QueuedDismiss {
    pub(crate) animated: bool,
    pub(crate) completion: Option<Completion>,
}

/// A drag the controller is currently following.
#[derive(Copy, Clone, Debug)]
pub(crate) struct LiveGesture {
    pub(crate) role: TransitionRole,
    pub(crate) origin: PresentationState,
    pub(crate) frames: ContentFrames,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum TimerAction {
    EndPeekCooldown,
}

#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct PeekState {
    pub(crate) active: bool,
    pub(crate) cooldown: Option<TimerId>,
    /// Tap and drag flags to restore once the cool-down ends.
    pub(crate) restore: Option<(bool, bool)>,
}

/// Presentation orchestrator for a now-playing bar and its content.
///
/// All operations borrow the host for the duration of the call; the
/// controller keeps no reference to it. Time is supplied by the host through
/// [`advance`](Self::advance).
pub struct PopupController<C> {
    pub(crate) config: PopupConfig,
    pub(crate) state: PresentationState,
    pub(crate) bar: Option<BarView>,
    pub(crate) content: Option<ContentView<C>>,
    pub(crate) presenting: InteractiveTransition,
    pub(crate) dismissing: InteractiveTransition,
    pub(crate) observers: Observers<C>,
    pub(crate) bar_run: Option<Running<BarStep>>,
    pub(crate) content_run: Option<Running<ContentStep>>,
    pub(crate) gesture: Option<LiveGesture>,
    pub(crate) queued_dismiss: Option<QueuedDismiss>,
    pub(crate) interactive_delegation: bool,
    pub(crate) applied_inset: f64,
    pub(crate) timers: TimerQueue<TimerAction>,
    pub(crate) peek: PeekState,
    pub(crate) now: u64,
    next_content_id: u64,
}

impl<C> fmt::Debug for PopupController<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PopupController")
            .field("state", &self.state)
            .field("bar", &self.bar)
            .field("content", &self.content.as_ref().map(ContentView::id))
            .field("bar_step", &self.bar_run.as_ref().map(|r| r.step))
            .field("content_step", &self.content_run.as_ref().map(|r| r.step))
            .field("gesture", &self.gesture)
            .field("interactive_delegation", &self.interactive_delegation)
            .field("applied_inset", &self.applied_inset)
            .field("now", &self.now)
            .finish_non_exhaustive()
    }
}

impl<C> Default for PopupController<C> {
    fn default() -> Self {
        Self::new(PopupConfig::default())
    }
}

impl<C> PopupController<C> {
    /// Creates a controller with the bar hidden.
    #[must_use]
    pub fn new(config: PopupConfig) -> Self {
        Self {
            config,
            state: PresentationState::Hidden,
            bar: None,
            content: None,
            presenting: InteractiveTransition::new(TransitionRole::Presenting),
            dismissing: InteractiveTransition::new(TransitionRole::Dismissing),
            observers: Observers::default(),
            bar_run: None,
            content_run: None,
            gesture: None,
            queued_dismiss: None,
            interactive_delegation: true,
            applied_inset: 0.0,
            timers: TimerQueue::new(),
            peek: PeekState::default(),
            now: 0,
            next_content_id: 0,
        }
    }

    /// Current presentation state.
    #[must_use]
    pub fn state(&self) -> PresentationState {
        self.state
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &PopupConfig {
        &self.config
    }

    /// Mutable configuration. Changes apply to the next transition.
    pub fn config_mut(&mut self) -> &mut PopupConfig {
        &mut self.config
    }

    /// The bar, while one is installed.
    #[must_use]
    pub fn bar(&self) -> Option<&BarView> {
        self.bar.as_ref()
    }

    /// The content, while one is attached.
    #[must_use]
    pub fn content(&self) -> Option<&ContentView<C>> {
        self.content.as_ref()
    }

    /// Mutable access to the content, while one is attached.
    pub fn content_mut(&mut self) -> Option<&mut ContentView<C>> {
        self.content.as_mut()
    }

    /// The transition that opens the content from the bar.
    #[must_use]
    pub fn presenting_transition(&self) -> &InteractiveTransition {
        &self.presenting
    }

    /// The transition that closes the content.
    #[must_use]
    pub fn dismissing_transition(&self) -> &InteractiveTransition {
        &self.dismissing
    }

    /// Enables or disables new drags for one direction.
    pub fn set_interactive_enabled(&mut self, role: TransitionRole, enabled: bool) {
        self.transition_mut(role).set_enabled(enabled);
    }

    /// Enables or disables opening the content by tapping the bar.
    pub fn set_bar_tap_enabled(&mut self, enabled: bool) {
        if let Some(bar) = &mut self.bar {
            bar.tap_enabled = enabled;
        }
    }

    /// The presenting transition if it is driving the live transition.
    ///
    /// Always `None` while a discrete (programmatic) transition is in flight.
    #[must_use]
    pub fn interaction_controller_for_presentation(&self) -> Option<&InteractiveTransition> {
        (self.interactive_delegation && self.presenting.is_active()).then_some(&self.presenting)
    }

    /// The dismissing transition if it is driving the live transition.
    ///
    /// Always `None` while a discrete (programmatic) transition is in flight.
    #[must_use]
    pub fn interaction_controller_for_dismissal(&self) -> Option<&InteractiveTransition> {
        (self.interactive_delegation && self.dismissing.is_active()).then_some(&self.dismissing)
    }

    /// Bottom inset currently added to the host by this controller.
    #[must_use]
    pub fn applied_bottom_inset(&self) -> f64 {
        self.applied_inset
    }

    /// Returns `true` while an animation or drag owns the frames.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.bar_run.is_some() || self.content_run.is_some() || self.gesture.is_some()
    }

    /// Earliest pending timer deadline, for hosts that sleep between frames.
    #[must_use]
    pub fn next_timer_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// Time of the most recent [`advance`](Self::advance).
    #[must_use]
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Registers an observer; observers are notified in registration order.
    pub fn add_observer(&mut self, observer: Box<dyn PopupObserver<C>>) -> ObserverId {
        self.observers.add(observer)
    }

    /// Unregisters an observer.
    pub fn remove_observer(&mut self, id: ObserverId) -> Option<Box<dyn PopupObserver<C>>> {
        self.observers.remove(id)
    }

    pub(crate) fn transition_mut(&mut self, role: TransitionRole) -> &mut InteractiveTransition {
        match role {
            TransitionRole::Presenting => &mut self.presenting,
            TransitionRole::Dismissing => &mut self.dismissing,
        }
    }

    pub(crate) fn next_content_id(&mut self) -> ContentId {
        let id = ContentId(self.next_content_id);
        self.next_content_id += 1;
        id
    }

    /// Sets the state and notifies observers with the previous state.
    pub(crate) fn set_state(&mut self, next: PresentationState) {
        let previous = self.state;
        debug_assert!(
            previous.is_legal_edge(next),
            "illegal presentation edge {previous:?} -> {next:?}"
        );
        self.state = next;
        #[cfg(feature = "tracing")]
        tracing::debug!(?previous, ?next, "popup state changed");
        self.observers.state_changed(next, previous);
    }

    pub(crate) fn reject(&self, request: &'static str, completion: Option<Completion>) -> bool {
        #[cfg(feature = "tracing")]
        tracing::trace!(state = ?self.state, request, "popup request rejected");
        #[cfg(not(feature = "tracing"))]
        let _ = request;
        finish(completion, TransitionResult::Rejected);
        false
    }

    /// Bar frames for the current host geometry.
    ///
    /// A host with empty bounds yields zero-height frames.
    pub(crate) fn bar_frames_for<H: PopupHost + ?Sized>(&self, host: &H, height: f64) -> BarFrames {
        let (height, insets) = if host.bounds().area() > 0.0 {
            (height, host.insets_for_bottom_bar())
        } else {
            (0.0, Insets::ZERO)
        };
        bar_frames(
            host.default_frame_for_bottom_bar(),
            insets,
            height,
            host.docked_element_height(),
        )
    }

    pub(crate) fn content_frames_for<H: PopupHost + ?Sized>(
        &self,
        host: &H,
        style: PresentationStyle,
    ) -> ContentFrames {
        let height = self
            .bar
            .as_ref()
            .map_or(self.config.bar_height, BarView::height);
        let bar_closed = self.bar_frames_for(host, height).closed;
        content_frames(
            host.bounds(),
            bar_closed,
            style,
            self.config.deck_top_gap,
            host.custom_content_frame(),
        )
    }
}

impl<C: PopupContent> PopupController<C> {
    /// Advances animations and timers to `now` (milliseconds).
    ///
    /// Completions and `did_*` notifications of transitions that finish by
    /// `now` run inside this call. Returns `true` while anything is still
    /// animating.
    pub fn advance<H: PopupHost + ?Sized>(&mut self, host: &mut H, now: u64) -> bool {
        self.now = self.now.max(now);

        if let Some(run) = &self.bar_run {
            let (frame, done) = run.animation.sample(self.now);
            if let Some(bar) = &mut self.bar {
                bar.frame = frame;
            }
            if done {
                if let Some(run) = self.bar_run.take() {
                    self.complete_bar(host, run.step, run.completion);
                }
            }
        }

        if let Some(run) = &self.content_run {
            let (frame, done) = run.animation.sample(self.now);
            if let Some(content) = &mut self.content {
                content.frame = frame;
            }
            if done {
                if let Some(run) = self.content_run.take() {
                    self.complete_content(host, run.step, run.completion);
                }
            }
        }

        while let Some((_, action)) = self.timers.pop_due(self.now) {
            match action {
                TimerAction::EndPeekCooldown => self.end_peek_cooldown(),
            }
        }

        self.is_animating()
    }

    /// Starts a bar animation, or completes synchronously when `duration` is zero.
    pub(crate) fn start_bar<H: PopupHost + ?Sized>(
        &mut self,
        host: &mut H,
        step: BarStep,
        to: Frame,
        duration: u64,
        easing: Easing,
        completion: Option<Completion>,
    ) {
        let Some(bar) = &mut self.bar else {
            finish(completion, TransitionResult::Rejected);
            return;
        };
        if duration == 0 {
            bar.frame = to;
            self.complete_bar(host, step, completion);
            return;
        }
        let animation = FrameAnimation::new(bar.frame, to, self.now, duration, easing);
        self.bar_run = Some(Running {
            step,
            animation,
            completion,
        });
    }

    /// Starts a content animation, or completes synchronously when `duration` is zero.
    pub(crate) fn start_content<H: PopupHost + ?Sized>(
        &mut self,
        host: &mut H,
        step: ContentStep,
        to: Frame,
        duration: u64,
        easing: Easing,
        completion: Option<Completion>,
    ) {
        let Some(content) = &mut self.content else {
            finish(completion, TransitionResult::Rejected);
            return;
        };
        if duration == 0 {
            content.frame = to;
            self.complete_content(host, step, completion);
            return;
        }
        let animation = FrameAnimation::new(content.frame, to, self.now, duration, easing);
        self.content_run = Some(Running {
            step,
            animation,
            completion,
        });
    }
}

pub(crate) fn finish(completion: Option<Completion>, result: TransitionResult) {
    if let Some(completion) = completion {
        completion(result);
    }
}

pub(crate) fn duration_if(animated: bool, duration: u64) -> u64 {
    if animated { duration } else { 0 }
}
