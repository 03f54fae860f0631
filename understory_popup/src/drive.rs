// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag entry points: route pointer drags to the matching interactive transition.

use kurbo::Point;

use crate::animation::{Easing, Frame, scale_duration};
use crate::controller::{ContentStep, LiveGesture, PopupContent, PopupController};
use crate::geometry::ContentFrames;
use crate::host::PopupHost;
use crate::interactive::{GestureDecision, TransitionRole};
use crate::state::PresentationState;

impl<C: PopupContent> PopupController<C> {
    /// A drag began at `location`.
    ///
    /// From [`Closed`](PresentationState::Closed) the presenting transition
    /// takes it (drag the bar up); from [`Open`](PresentationState::Open) the
    /// dismissing transition does (drag the content down). On acceptance the
    /// state moves to `Opening`/`Closing` and the `will_*` notification fires.
    ///
    /// The drag must start on the transition's view: the bar's frame from
    /// `Closed`, the content's frame from `Open`. Drags elsewhere belong to
    /// the host.
    ///
    /// Returns `false` when no transition accepts the drag: it started
    /// outside that view, a discrete transition is in flight, the transition
    /// is disabled, the content is scrolled, or there is no content.
    pub fn drag_began<H: PopupHost + ?Sized>(
        &mut self,
        host: &H,
        location: Point,
        time: u64,
    ) -> bool {
        self.now = self.now.max(time);
        if !self.interactive_delegation || self.is_animating() || self.peek.active {
            return false;
        }
        let Some(content) = &self.content else {
            return false;
        };
        let frames = self.content_frames_for(host, content.style());

        let (role, reference, next) = match self.state {
            PresentationState::Closed => (
                TransitionRole::Presenting,
                self.config.present_drag_distance,
                PresentationState::Opening,
            ),
            PresentationState::Open => (
                TransitionRole::Dismissing,
                frames.open.height(),
                PresentationState::Closing,
            ),
            _ => return false,
        };
        let target = match role {
            TransitionRole::Presenting => self.bar.as_ref().map(|bar| bar.frame().rect),
            TransitionRole::Dismissing => Some(content.frame().rect),
        };
        if !target.is_some_and(|rect| rect.contains(location)) {
            return false;
        }
        if !self.transition_mut(role).begin(location, time, reference) {
            return false;
        }

        self.gesture = Some(LiveGesture {
            role,
            origin: self.state,
            frames,
        });
        self.set_state(next);
        if let Some(content) = &self.content {
            match role {
                TransitionRole::Presenting => {
                    self.observers.for_each(|o| o.will_open(content.content()));
                }
                TransitionRole::Dismissing => {
                    self.observers.for_each(|o| o.will_close(content.content()));
                }
            }
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(?role, reference, "interactive transition began");
        true
    }

    /// The live drag moved; returns the new progress.
    ///
    /// Reports `interactive_presentation` to observers. Never changes the state.
    pub fn drag_changed(&mut self, location: Point, time: u64) -> Option<f64> {
        self.now = self.now.max(time);
        let gesture = self.gesture?;
        let progress = self.transition_mut(gesture.role).update(location, time)?;
        self.apply_progress(gesture, progress, location);
        Some(progress)
    }

    /// The live drag was released.
    ///
    /// Completes when progress reaches the configured threshold or the
    /// forward release velocity is high enough; otherwise cancels. Either way
    /// the content animates from where the drag left it, over the remaining
    /// fraction of the content animation duration. The `did_*` notification
    /// fires once when a completing animation finishes; a cancellation only
    /// reports the state change back to where the drag started.
    pub fn drag_ended<H: PopupHost + ?Sized>(
        &mut self,
        host: &mut H,
        location: Point,
        time: u64,
    ) -> Option<GestureDecision> {
        self.now = self.now.max(time);
        let gesture = self.gesture?;
        let completion_progress = self.config.completion_progress;
        let velocity_threshold = self.config.velocity_threshold;
        let transition = self.transition_mut(gesture.role);
        let decision = transition
            .end(location, time, completion_progress, velocity_threshold)
            .unwrap_or(GestureDecision::Cancel);
        let progress = transition.progress();
        self.apply_progress(gesture, progress, location);
        self.gesture = None;

        #[cfg(feature = "tracing")]
        tracing::debug!(role = ?gesture.role, progress, ?decision, "interactive transition ended");

        self.settle(host, gesture, decision, progress);
        Some(decision)
    }

    /// The live drag was cancelled by the system; the transition animates back.
    pub fn drag_cancelled<H: PopupHost + ?Sized>(&mut self, host: &mut H) -> bool {
        let Some(gesture) = self.gesture.take() else {
            return false;
        };
        let transition = self.transition_mut(gesture.role);
        transition.cancel();
        let progress = transition.progress();
        self.settle(host, gesture, GestureDecision::Cancel, progress);
        true
    }

    fn settle<H: PopupHost + ?Sized>(
        &mut self,
        host: &mut H,
        gesture: LiveGesture,
        decision: GestureDecision,
        progress: f64,
    ) {
        let duration = self.config.content_animation_ms;
        let (step, to, duration) = match (decision, gesture.role) {
            (GestureDecision::Complete, TransitionRole::Presenting) => (
                ContentStep::Open,
                Frame::opaque(gesture.frames.open),
                scale_duration(duration, 1.0 - progress),
            ),
            (GestureDecision::Complete, TransitionRole::Dismissing) => (
                ContentStep::Close,
                Frame::transparent(gesture.frames.closed),
                scale_duration(duration, 1.0 - progress),
            ),
            (GestureDecision::Cancel, TransitionRole::Presenting) => (
                ContentStep::Revert(gesture.origin),
                Frame::transparent(gesture.frames.closed),
                scale_duration(duration, progress),
            ),
            (GestureDecision::Cancel, TransitionRole::Dismissing) => (
                ContentStep::Revert(gesture.origin),
                Frame::opaque(gesture.frames.open),
                scale_duration(duration, progress),
            ),
        };
        self.start_content(host, step, to, duration, Easing::EaseOut, None);
    }

    fn apply_progress(&mut self, gesture: LiveGesture, progress: f64, location: Point) {
        let frame = frame_at(gesture.frames, gesture.role, progress);
        let state = self.state;
        if let Some(content) = &mut self.content {
            content.frame = frame;
        }
        if let Some(content) = &self.content {
            self.observers.for_each(|o| {
                o.interactive_presentation(content.content(), state, progress, location);
            });
        }
    }
}

/// Content frame for a drag at `progress` in the given direction.
fn frame_at(frames: ContentFrames, role: TransitionRole, progress: f64) -> Frame {
    let open_fraction = match role {
        TransitionRole::Presenting => progress,
        TransitionRole::Dismissing => 1.0 - progress,
    };
    Frame::transparent(frames.closed).lerp(Frame::opaque(frames.open), open_fraction)
}
