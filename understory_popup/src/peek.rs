// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Peek (force-touch style preview) on the bar.
//!
//! The controller only arbitrates input around a peek: while a preview is
//! showing, and for a short cool-down after it goes away, taps on the bar and
//! drags that would open the content are ignored, so the end of a press does
//! not turn into an accidental open. What the preview shows and what
//! committing it does belong to the [`PeekProvider`].

use crate::controller::{BarView, PeekState, PopupContent, PopupController, TimerAction};
use crate::state::PresentationState;

/// Supplies the preview shown when the bar is peeked.
pub trait PeekProvider<C> {
    /// Shows a preview for `bar`. Returns `false` to decline the peek.
    fn preview(&mut self, bar: &BarView, content: Option<&C>) -> bool;

    /// The user committed to the preview.
    fn commit(&mut self, content: Option<&C>) {
        let _ = content;
    }
}

impl<C: PopupContent> PopupController<C> {
    /// Starts a peek on the bar.
    ///
    /// Only while the bar rests in [`Closed`](PresentationState::Closed).
    /// Returns `true` if the provider showed a preview.
    pub fn begin_peek<P: PeekProvider<C> + ?Sized>(&mut self, provider: &mut P) -> bool {
        if self.peek.active || self.state != PresentationState::Closed || self.is_animating() {
            return false;
        }
        let Some(bar) = &self.bar else {
            return false;
        };
        if !provider.preview(bar, self.content.as_ref().map(|c| c.content())) {
            return false;
        }

        // A peek during a previous cool-down keeps the flags saved by the first one.
        if let Some(timer) = self.peek.cooldown.take() {
            self.timers.cancel(timer);
        } else {
            let tap = self.bar.as_ref().is_some_and(BarView::is_tap_enabled);
            self.peek.restore = Some((tap, self.presenting.is_enabled()));
        }
        self.peek.active = true;
        self.set_bar_tap_enabled(false);
        self.presenting.set_enabled(false);
        true
    }

    /// The preview went away; taps and drags come back after the cool-down.
    pub fn end_peek(&mut self) -> bool {
        if !self.peek.active {
            return false;
        }
        self.peek.active = false;
        let delay = self.config.peek_cooldown_ms;
        #[cfg(feature = "tracing")]
        tracing::trace!(now = self.now, delay, "peek cool-down scheduled");
        self.peek.cooldown =
            Some(self.timers.schedule_after(self.now, delay, TimerAction::EndPeekCooldown));
        true
    }

    /// The user committed to the preview; the provider decides what that does.
    pub fn commit_peek<P: PeekProvider<C> + ?Sized>(&mut self, provider: &mut P) -> bool {
        if !self.peek.active {
            return false;
        }
        provider.commit(self.content.as_ref().map(|c| c.content()));
        self.end_peek()
    }

    /// Returns `true` while a preview is showing or its cool-down is pending.
    #[must_use]
    pub fn is_peek_suppressing_input(&self) -> bool {
        self.peek.active || self.peek.cooldown.is_some()
    }

    /// Forgets any peek when the bar goes away, so the next bar starts unsuppressed.
    pub(crate) fn reset_peek(&mut self) {
        if let Some(timer) = self.peek.cooldown.take() {
            self.timers.cancel(timer);
        }
        if let Some((_, drag)) = self.peek.restore.take() {
            self.presenting.set_enabled(drag);
        }
        self.peek = PeekState::default();
    }

    pub(crate) fn end_peek_cooldown(&mut self) {
        self.peek.cooldown = None;
        if let Some((tap, drag)) = self.peek.restore.take() {
            self.set_bar_tap_enabled(tap);
            self.presenting.set_enabled(drag);
        }
    }
}
