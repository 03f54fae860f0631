// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interactive, drag-driven transitions.
//!
//! An [`InteractiveTransition`] turns a stream of drag samples into a
//! normalized progress and, on release, a decision to complete or cancel. It
//! does not touch presentation state; the [`PopupController`] owns one per
//! direction and applies the decision.
//!
//! - The presenting transition is attached to the bar; dragging up opens the content.
//! - The dismissing transition is attached to the content; dragging down closes it.
//!
//! ```
//! use kurbo::Point;
//! use understory_popup::interactive::{
//!     DragTarget, GestureDecision, InteractiveTransition, TransitionRole,
//! };
//!
//! let mut t = InteractiveTransition::new(TransitionRole::Dismissing);
//! t.attach(DragTarget::Bar);
//!
//! // Reference distance: 800pt of content.
//! assert!(t.begin(Point::new(0.0, 100.0), 0, 800.0));
//! assert_eq!(t.update(Point::new(0.0, 420.0), 500), Some(0.4));
//!
//! // Slow release below the midpoint cancels.
//! let decision = t.end(Point::new(0.0, 420.0), 1_000, 0.5, 500.0);
//! assert_eq!(decision, Some(GestureDecision::Cancel));
//! ```
//!
//! [`PopupController`]: crate::PopupController

use kurbo::Point;

use crate::gesture::DragTracker;

/// Which direction an interactive transition drives.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TransitionRole {
    /// Opens the content by dragging the bar up.
    Presenting,
    /// Closes the content by dragging it down.
    Dismissing,
}

/// Identity of the content currently attached to the controller.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentId(pub(crate) u64);

/// The view a transition's drag recognizer is bound to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DragTarget {
    /// The popup bar.
    Bar,
    /// A content view, by identity.
    Content(ContentId),
}

/// Outcome of releasing a drag.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GestureDecision {
    /// Finish the transition from where the drag left it.
    Complete,
    /// Animate back to where the drag started.
    Cancel,
}

/// Progress model for one interactive direction.
#[derive(Clone, Debug)]
pub struct InteractiveTransition {
    role: TransitionRole,
    target: Option<DragTarget>,
    enabled: bool,
    progress: f64,
    location: Option<Point>,
    scroll_offset: Option<f64>,
    reference_distance: f64,
    tracker: DragTracker,
}

impl InteractiveTransition {
    /// Creates an unattached, enabled transition.
    #[must_use]
    pub fn new(role: TransitionRole) -> Self {
        Self {
            role,
            target: None,
            enabled: true,
            progress: 0.0,
            location: None,
            scroll_offset: None,
            reference_distance: 0.0,
            tracker: DragTracker::default(),
        }
    }

    /// Binds the drag recognizer to `target`, replacing any previous binding.
    ///
    /// Any drag in progress on the previous target is dropped.
    pub fn attach(&mut self, target: DragTarget) {
        if self.target != Some(target) {
            self.reset_gesture();
            self.scroll_offset = None;
        }
        self.target = Some(target);
    }

    /// Unbinds the recognizer and forgets any captured state.
    pub fn detach(&mut self) {
        self.target = None;
        self.scroll_offset = None;
        self.reset_gesture();
    }

    /// The direction this transition drives.
    #[must_use]
    pub fn role(&self) -> TransitionRole {
        self.role
    }

    /// The view the recognizer is bound to.
    #[must_use]
    pub fn target(&self) -> Option<DragTarget> {
        self.target
    }

    /// Returns `true` if new drags may begin.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enables or disables recognition of new drags.
    ///
    /// A drag already in progress is left to finish; no state is altered.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Returns `true` while a drag is live.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.tracker.is_dragging()
    }

    /// Normalized progress of the live (or last) drag, in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Latest raw drag location.
    #[must_use]
    pub fn location(&self) -> Option<Point> {
        self.location
    }

    /// Scroll offset of the content captured when it last settled.
    #[must_use]
    pub fn scroll_offset(&self) -> Option<f64> {
        self.scroll_offset
    }

    pub(crate) fn capture_scroll_offset(&mut self, offset: Option<f64>) {
        self.scroll_offset = offset;
    }

    /// Returns `true` if the captured scroll offset allows a dismiss drag to start.
    ///
    /// Content scrolled away from its top keeps the drag for itself.
    #[must_use]
    pub fn allows_begin_at_scroll_offset(&self) -> bool {
        match self.role {
            TransitionRole::Presenting => true,
            TransitionRole::Dismissing => self.scroll_offset.is_none_or(|offset| offset <= 0.0),
        }
    }

    /// Begins a drag at `location`.
    ///
    /// Returns `false` (and tracks nothing) when disabled, unattached,
    /// blocked by the captured scroll offset, or when `reference_distance`
    /// is not a positive finite number.
    pub fn begin(&mut self, location: Point, time: u64, reference_distance: f64) -> bool {
        if !self.enabled
            || self.target.is_none()
            || !self.allows_begin_at_scroll_offset()
            || !(reference_distance.is_finite() && reference_distance > 0.0)
        {
            return false;
        }
        self.reference_distance = reference_distance;
        self.progress = 0.0;
        self.location = Some(location);
        self.tracker.start(location, time);
        true
    }

    /// Records a drag sample, returning the new progress.
    ///
    /// Progress follows the drag in both directions and is clamped to `[0, 1]`.
    pub fn update(&mut self, location: Point, time: u64) -> Option<f64> {
        self.tracker.update(location, time)?;
        self.location = Some(location);
        self.progress = self.progress_at(location);
        Some(self.progress)
    }

    /// Ends the drag and decides whether to complete or cancel.
    ///
    /// Completes when progress reaches `completion_progress`, or when the
    /// release velocity in the forward direction exceeds `velocity_threshold`
    /// (points per second).
    pub fn end(
        &mut self,
        location: Point,
        time: u64,
        completion_progress: f64,
        velocity_threshold: f64,
    ) -> Option<GestureDecision> {
        self.update(location, time)?;
        let forward = self.forward_velocity();
        self.tracker.end();
        if self.progress >= completion_progress || forward > velocity_threshold {
            Some(GestureDecision::Complete)
        } else {
            Some(GestureDecision::Cancel)
        }
    }

    /// Abandons the live drag; the caller treats it as a cancellation.
    pub fn cancel(&mut self) -> bool {
        let was_active = self.tracker.is_dragging();
        self.tracker.end();
        was_active
    }

    /// Velocity along the direction that advances this transition, in points per second.
    #[must_use]
    pub fn forward_velocity(&self) -> f64 {
        let dy = self.tracker.velocity().y;
        match self.role {
            TransitionRole::Presenting => -dy,
            TransitionRole::Dismissing => dy,
        }
    }

    fn progress_at(&self, location: Point) -> f64 {
        let Some(offset) = self.tracker.total_offset(location) else {
            return self.progress;
        };
        let forward = match self.role {
            TransitionRole::Presenting => -offset.y,
            TransitionRole::Dismissing => offset.y,
        };
        (forward / self.reference_distance).clamp(0.0, 1.0)
    }

    fn reset_gesture(&mut self) {
        self.tracker.end();
        self.progress = 0.0;
        self.location = None;
    }
}
