// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag tracking with release velocity.
//!
//! ## Usage
//!
//! 1) Start tracking with [`DragTracker::start`] and the initial position and time.
//! 2) On each move, call [`DragTracker::update`] to get the delta since the last sample.
//! 3) Query [`DragTracker::total_offset`] and [`DragTracker::velocity`] as needed.
//! 4) Reset with [`DragTracker::end`].
//!
//! ```
//! use kurbo::{Point, Vec2};
//! ```

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

/// Samples older than this, relative to the newest one, no longer count
/// towards the velocity.
pub const VELOCITY_WINDOW_MS: u64 = 100;

/// Tracks one drag: start, last sample, and the recent samples that give the
/// release velocity.
#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    start_pos: Option<Point>,
    last_pos: Option<Point>,
    samples: SmallVec<[(Point, u64); 8]>,
}

impl DragTracker {
    /// Starts tracking a drag at `pos`, observed at `time` milliseconds.
    pub fn start(&mut self, pos: Point, time: u64) {
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
        self.samples.clear();
        self.samples.push((pos, time));
    }

    /// Records a new sample, returning the delta since the previous one.
    ///
    /// A sample sharing the newest timestamp replaces that sample's position.
    pub fn update(&mut self, pos: Point, time: u64) -> Option<Vec2> {
        self.start_pos?;
        let last = self.last_pos.replace(pos)?;
        match self.samples.last_mut() {
            Some(newest) if time <= newest.1 => newest.0 = pos,
            _ => self.samples.push((pos, time)),
        }
        while self.samples.len() > 1
            && time.saturating_sub(self.samples[0].1) > VELOCITY_WINDOW_MS
        {
            self.samples.remove(0);
        }
        Some(pos - last)
    }

    /// Offset of `current` from the drag start.
    #[must_use]
    pub fn total_offset(&self, current: Point) -> Option<Vec2> {
        self.start_pos.map(|start| current - start)
    }

    /// Velocity over the last [`VELOCITY_WINDOW_MS`], in points per second.
    ///
    /// Zero when the pointer has rested for longer than the window, so a
    /// release after a pause is slow while a release right after a flick
    /// keeps the flick's speed.
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        let (Some(&(first, t0)), Some(&(last, t1))) = (self.samples.first(), self.samples.last())
        else {
            return Vec2::ZERO;
        };
        let dt = t1.saturating_sub(t0);
        if dt == 0 {
            return Vec2::ZERO;
        }
        (last - first) * (1_000.0 / dt as f64)
    }

    /// Start position of the active drag.
    #[must_use]
    pub fn start_pos(&self) -> Option<Point> {
        self.start_pos
    }

    /// Last recorded position of the active drag.
    #[must_use]
    pub fn last_pos(&self) -> Option<Point> {
        self.last_pos
    }

    /// Ends the drag and resets all state.
    pub fn end(&mut self) {
        *self = Self::default();
    }

    /// Returns `true` while a drag is being tracked.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.start_pos.is_some()
    }
}
