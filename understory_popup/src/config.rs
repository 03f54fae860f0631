// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Controller configuration.

use crate::geometry::PresentationStyle;

/// Tunables for a [`PopupController`](crate::PopupController).
#[derive(Clone, Debug, PartialEq)]
pub struct PopupConfig {
    /// Height of the bar, queried once per presentation.
    pub bar_height: f64,
    /// How open content is laid out.
    pub presentation_style: PresentationStyle,
    /// Duration of the bar's present/dismiss animation, in milliseconds.
    pub bar_animation_ms: u64,
    /// Duration of the content's open/close animation, in milliseconds.
    pub content_animation_ms: u64,
    /// Drag distance that takes an interactive presentation from 0 to 1.
    pub present_drag_distance: f64,
    /// Forward release velocity (points per second) that completes a drag
    /// regardless of progress.
    pub velocity_threshold: f64,
    /// Progress at or beyond which a released drag completes.
    pub completion_progress: f64,
    /// Gap above deck-style content.
    pub deck_top_gap: f64,
    /// Cool-down after a peek during which taps and drags on the bar are ignored.
    pub peek_cooldown_ms: u64,
    /// Drop the content after every completed close instead of keeping it
    /// until the bar is dismissed.
    pub release_content_on_close: bool,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            bar_height: 64.0,
            presentation_style: PresentationStyle::default(),
            bar_animation_ms: 500,
            content_animation_ms: 500,
            present_drag_distance: 300.0,
            velocity_threshold: 500.0,
            completion_progress: 0.5,
            deck_top_gap: 10.0,
            peek_cooldown_ms: 100,
            release_content_on_close: false,
        }
    }
}
