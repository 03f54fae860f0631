// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_popup --heading-base-level=0

//! Understory Popup: headless presentation for a now-playing bar.
//!
//! A persistent bar sits above a host's bottom element (tab bar, toolbar, or
//! nothing) and can expand into modal content, either by discrete animated
//! requests or by an interactive drag that can be scrubbed and cancelled.
//! This crate owns the part that is easy to get wrong: the presentation state
//! machine and the orchestration of those transitions. It draws nothing.
//!
//! ## Model
//!
//! - [`PresentationState`] has seven states. `Hidden`, `Presenting` and
//!   `Dismissing` describe the bar; `Closed`, `Opening`, `Open` and `Closing`
//!   describe the content once the bar is up. No edge skips an `-ing` state.
//! - [`PopupController`] is the single owner of that state, of the bar and
//!   content views, and of the two [`InteractiveTransition`]s (one per
//!   direction).
//! - [`PopupHost`] is the capability interface of the container: bottom
//!   element geometry, safe-area insets, and a few side effects. The stock
//!   adapters live in [`host`].
//! - [`PopupObserver`] receives `state_changed`, `will_*`, `did_*` and
//!   `interactive_presentation` notifications in a fixed order.
//!
//! ## Time
//!
//! The controller never reads a clock. Drive it once per frame with
//! [`PopupController::advance`] and a monotonic millisecond timestamp; finished
//! animations run their completion path inside that call. Non-animated
//! requests complete synchronously.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Rect;
//! use understory_popup::geometry::Insets;
//! use understory_popup::host::TabBarHost;
//! use understory_popup::{PopupContent, PopupController, PresentationState};
//!
//! struct NowPlaying;
//! impl PopupContent for NowPlaying {}
//!
//! let mut host = TabBarHost::new(Rect::new(0.0, 0.0, 390.0, 844.0), Insets::bottom(34.0), 49.0);
//! let mut popup = PopupController::default();
//!
//! popup.present_bar(&mut host, NowPlaying, true, None);
//! assert_eq!(popup.state(), PresentationState::Presenting);
//!
//! // Half a second later the bar has landed above the tab bar.
//! popup.advance(&mut host, 500);
//! assert_eq!(popup.state(), PresentationState::Closed);
//! assert_eq!(popup.bar().unwrap().frame().rect.y1, 844.0 - 83.0);
//!
//! // Tapping the bar opens the content.
//! assert!(popup.tap_bar(&mut host));
//! popup.advance(&mut host, 1_000);
//! assert_eq!(popup.state(), PresentationState::Open);
//! ```
//!
//! ## Interactive transitions
//!
//! Feed pointer drags to [`PopupController::drag_began`],
//! [`drag_changed`](PopupController::drag_changed) and
//! [`drag_ended`](PopupController::drag_ended). Dragging the bar up opens the
//! content; dragging open content down closes it. Drags that start outside
//! the bar (or the open content) are refused and stay with the host. A release at or past half
//! way, or a fast enough flick, completes the transition from where the drag
//! left it; anything else animates back and restores the original state
//! without a `did_*` notification.
//!
//! While a discrete transition is in flight, drags are not delegated, and
//! [`interaction_controller_for_presentation`](PopupController::interaction_controller_for_presentation)
//! / [`interaction_controller_for_dismissal`](PopupController::interaction_controller_for_dismissal)
//! return `None`.
//!
//! ## Features
//!
//! - `std` (default): forward `std` to Kurbo.
//! - `libm`: `no_std` float support for Kurbo.
//! - `tracing`: structured `tracing` events for state changes, rejected
//!   requests and gesture decisions.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod animation;
mod bar;
pub mod config;
mod content;
pub mod controller;
mod drive;
pub mod geometry;
pub mod gesture;
pub mod host;
pub mod interactive;
pub mod observer;
pub mod peek;
pub mod state;

pub use config::PopupConfig;
pub use controller::{
    BarView, Completion, ContentView, PopupContent, PopupController, TransitionResult,
};
pub use host::PopupHost;
pub use interactive::{GestureDecision, InteractiveTransition, TransitionRole};
pub use observer::{ObserverId, PopupObserver};
pub use peek::PeekProvider;
pub use state::{IllegalTransition, PresentationState};
