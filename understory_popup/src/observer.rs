// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Observer fan-out around every presentation change.
//!
//! Observers are called in registration order. For each edge the controller
//! emits, in order:
//!
//! 1. `state_changed(new, previous)` as soon as the state is set,
//! 2. the direction's `will_*` notification, before the animation starts,
//!
//! and when the animation completes:
//!
//! 3. `state_changed(settled, previous)`,
//! 4. the direction's `did_*` notification, exactly once.
//!
//! Cancelled interactive transitions only emit `state_changed` back to the
//! originating state.

use alloc::boxed::Box;

use kurbo::Point;
use smallvec::SmallVec;

use crate::controller::BarView;
use crate::state::PresentationState;

/// Receives presentation notifications. Every method defaults to a no-op.
pub trait PopupObserver<C> {
    /// The presentation state changed from `previous` to `state`.
    fn state_changed(&mut self, state: PresentationState, previous: PresentationState) {
        let _ = (state, previous);
    }

    /// The bar is about to animate in.
    fn will_present(&mut self, bar: &BarView) {
        let _ = bar;
    }

    /// The bar finished animating in.
    fn did_present(&mut self, bar: &BarView) {
        let _ = bar;
    }

    /// The bar is about to animate out.
    fn will_dismiss(&mut self, bar: &BarView) {
        let _ = bar;
    }

    /// The bar finished animating out. It is released after this call.
    fn did_dismiss(&mut self, bar: &BarView) {
        let _ = bar;
    }

    /// The content is about to open.
    fn will_open(&mut self, content: &C) {
        let _ = content;
    }

    /// The content finished opening.
    fn did_open(&mut self, content: &C) {
        let _ = content;
    }

    /// The content is about to close.
    fn will_close(&mut self, content: &C) {
        let _ = content;
    }

    /// The content finished closing.
    fn did_close(&mut self, content: &C) {
        let _ = content;
    }

    /// An interactive transition moved. May fire many times per drag.
    fn interactive_presentation(
        &mut self,
        content: &C,
        state: PresentationState,
        progress: f64,
        location: Point,
    ) {
        let _ = (content, state, progress, location);
    }
}

/// Handle returned by [`Observers::add`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// An ordered list of observers.
///
/// Most controllers have one or two observers, so they are stored inline.
pub struct Observers<C> {
    entries: SmallVec<[(ObserverId, Box<dyn PopupObserver<C>>); 2]>,
    next_id: u64,
}

impl<C> core::fmt::Debug for Observers<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Observers")
            .field("len", &self.entries.len())
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}

impl<C> Default for Observers<C> {
    fn default() -> Self {
        Self {
            entries: SmallVec::new(),
            next_id: 0,
        }
    }
}

impl<C> Observers<C> {
    /// Appends an observer; it is notified after all earlier ones.
    pub fn add(&mut self, observer: Box<dyn PopupObserver<C>>) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    /// Removes an observer, returning it if it was registered.
    pub fn remove(&mut self, id: ObserverId) -> Option<Box<dyn PopupObserver<C>>> {
        let index = self.entries.iter().position(|(entry, _)| *entry == id)?;
        Some(self.entries.remove(index).1)
    }

    /// Number of registered observers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no observers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Calls `f` on every observer in registration order.
    pub fn for_each(&mut self, mut f: impl FnMut(&mut dyn PopupObserver<C>)) {
        for (_, observer) in &mut self.entries {
            f(observer.as_mut());
        }
    }

    pub(crate) fn state_changed(&mut self, state: PresentationState, previous: PresentationState) {
        self.for_each(|o| o.state_changed(state, previous));
    }
}
