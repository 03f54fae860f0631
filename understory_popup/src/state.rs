// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Presentation state and the legal edges between states.
//!
//! ```text
//! hidden  -> presenting -> closed
//! closed  -> dismissing -> hidden
//! closed  -> opening    -> open
//! open    -> closing    -> closed
//! ```
//!
//! Two further edges exist only for interactive cancellation: a drag that
//! started from `closed` may fall back from `opening` to `closed`, and one
//! that started from `open` may fall back from `closing` to `open`.

use core::fmt;

/// Visibility of the bar and, once the bar is up, of the content.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum PresentationState {
    /// No bar is installed.
    #[default]
    Hidden,
    /// The bar is animating in.
    Presenting,
    /// The bar is animating out.
    Dismissing,
    /// The bar is visible and the content is collapsed.
    Closed,
    /// The content is fully presented above the bar.
    Open,
    /// The content is animating (or being dragged) open.
    Opening,
    /// The content is animating (or being dragged) closed.
    Closing,
}

impl PresentationState {
    /// Returns `true` if `self -> next` is a forward edge of the state machine.
    ///
    /// Cancellation edges are not included; see [`Self::can_cancel_to`].
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Hidden, Self::Presenting)
                | (Self::Presenting, Self::Closed)
                | (Self::Closed, Self::Dismissing)
                | (Self::Dismissing, Self::Hidden)
                | (Self::Closed, Self::Opening)
                | (Self::Opening, Self::Open)
                | (Self::Open, Self::Closing)
                | (Self::Closing, Self::Closed)
        )
    }

    /// Returns `true` if an interactive transition in `self` may be cancelled back to `origin`.
    #[must_use]
    pub fn can_cancel_to(self, origin: Self) -> bool {
        matches!(
            (self, origin),
            (Self::Opening, Self::Closed) | (Self::Closing, Self::Open)
        )
    }

    /// Returns `true` for any edge the controller may traverse, forward or cancelling.
    #[must_use]
    pub fn is_legal_edge(self, next: Self) -> bool {
        self.can_transition_to(next) || self.can_cancel_to(next)
    }

    /// Validates a forward edge, returning the new state.
    pub fn transition(self, next: Self) -> Result<Self, IllegalTransition> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(IllegalTransition {
                from: self,
                to: next,
            })
        }
    }

    /// Returns `true` while the bar is installed (any state other than `Hidden`).
    #[must_use]
    pub fn is_bar_visible(self) -> bool {
        self != Self::Hidden
    }

    /// Returns `true` for the `-ing` states, where an animation or drag owns the frames.
    #[must_use]
    pub fn is_transitioning(self) -> bool {
        matches!(
            self,
            Self::Presenting | Self::Dismissing | Self::Opening | Self::Closing
        )
    }

    /// Returns `true` for states describing the content (`closed`, `open`, `opening`, `closing`).
    #[must_use]
    pub fn is_content_state(self) -> bool {
        matches!(
            self,
            Self::Closed | Self::Open | Self::Opening | Self::Closing
        )
    }
}

/// A requested edge that the state machine does not have.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct IllegalTransition {
    /// The state the request was made in.
    pub from: PresentationState,
    /// The state that was requested.
    pub to: PresentationState,
}

impl fmt::Debug for IllegalTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "IllegalTransition {{ from: {:?}, to: {:?} }}",
            self.from, self.to
        )
    }
}

impl fmt::Display for IllegalTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no presentation edge from {:?} to {:?}",
            self.from, self.to
        )
    }
}

impl core::error::Error for IllegalTransition {}
