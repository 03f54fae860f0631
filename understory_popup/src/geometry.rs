// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame computation for the bar and the content.
//!
//! These are pure functions of host geometry. The controller calls them when a
//! transition starts, when it settles, and from [`layout_bar`] for steady-state
//! relayout.
//!
//! ```
//! use kurbo::Rect;
//! use understory_popup::geometry::{bar_frames, Insets};
//!
//! // A plain host: no docked element, 34pt home indicator.
//! let bottom = Rect::new(0.0, 800.0, 390.0, 800.0);
//! let frames = bar_frames(bottom, Insets::bottom(34.0), 64.0, 0.0);
//!
//! assert_eq!(frames.closed, Rect::new(0.0, 702.0, 390.0, 800.0));
//! assert_eq!(frames.hidden.height(), 0.0);
//! ```
//!
//! [`layout_bar`]: crate::PopupController::layout_bar

use kurbo::Rect;

/// Edge insets in points.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct Insets {
    /// Top inset.
    pub top: f64,
    /// Left inset.
    pub left: f64,
    /// Bottom inset.
    pub bottom: f64,
    /// Right inset.
    pub right: f64,
}

impl Insets {
    /// All-zero insets.
    pub const ZERO: Self = Self {
        top: 0.0,
        left: 0.0,
        bottom: 0.0,
        right: 0.0,
    };

    /// Creates insets from all four edges.
    #[must_use]
    pub const fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Creates insets with only a bottom edge.
    #[must_use]
    pub const fn bottom(bottom: f64) -> Self {
        Self::new(0.0, 0.0, bottom, 0.0)
    }
}

/// How the content is laid out once open.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum PresentationStyle {
    /// Card-like sheet leaving a gap at the top of the host.
    #[default]
    Deck,
    /// Covers the host bounds.
    FullScreen,
    /// Uses the frame the host supplies through
    /// [`PopupHost::custom_content_frame`](crate::host::PopupHost::custom_content_frame).
    Custom,
}

impl PresentationStyle {
    /// Default style for a platform major version.
    ///
    /// Versions before 10 only supported full-screen presentation.
    #[must_use]
    pub fn default_for_os_major(major: u32) -> Self {
        if major < 10 {
            Self::FullScreen
        } else {
            Self::Deck
        }
    }
}

/// The two resting frames of the bar container.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BarFrames {
    /// Pinned directly above the host's bottom element.
    pub closed: Rect,
    /// Tucked below the closed frame with zero height.
    pub hidden: Rect,
}

/// Computes the bar container frames above a host's bottom element.
///
/// - `default_bottom` is the host's default frame for its bottom element.
/// - `insets` are the host's bottom-bar insets; only `bottom` is consumed.
/// - `docked_height` is the height of the host's docked element (tab bar, toolbar),
///   `0` when there is none.
///
/// The safe-area inset is added to the bar's own height only when nothing is
/// docked beneath it. Non-finite or negative heights are treated as zero.
#[must_use]
pub fn bar_frames(
    default_bottom: Rect,
    insets: Insets,
    bar_height: f64,
    docked_height: f64,
) -> BarFrames {
    let bar_height = non_negative(bar_height);
    let inset = non_negative(insets.bottom);
    let undocked = non_negative(docked_height) == 0.0;

    let y0 = default_bottom.y0 - bar_height - inset;
    let height = bar_height + if undocked { inset } else { 0.0 };
    let closed = Rect::new(default_bottom.x0, y0, default_bottom.x1, y0 + height);

    let hidden_y = y0 + bar_height;
    let hidden = Rect::new(default_bottom.x0, hidden_y, default_bottom.x1, hidden_y);

    BarFrames { closed, hidden }
}

/// The two resting frames of the content.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ContentFrames {
    /// Collapsed behind the bar: the content's top edge sits on the bar's top edge.
    pub closed: Rect,
    /// Fully presented.
    pub open: Rect,
}

/// Computes the content frames for a host.
///
/// `custom` is only consulted for [`PresentationStyle::Custom`] and falls back
/// to `bounds` when absent.
#[must_use]
pub fn content_frames(
    bounds: Rect,
    bar_closed: Rect,
    style: PresentationStyle,
    deck_top_gap: f64,
    custom: Option<Rect>,
) -> ContentFrames {
    let open = match style {
        PresentationStyle::FullScreen => bounds,
        PresentationStyle::Deck => {
            let y0 = (bounds.y0 + non_negative(deck_top_gap)).min(bounds.y1);
            Rect::new(bounds.x0, y0, bounds.x1, bounds.y1)
        }
        PresentationStyle::Custom => custom.unwrap_or(bounds),
    };
    let closed = Rect::new(
        open.x0,
        bar_closed.y0,
        open.x1,
        bar_closed.y0 + open.height(),
    );
    ContentFrames { closed, open }
}

fn non_negative(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}
