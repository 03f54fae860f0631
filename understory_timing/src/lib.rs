// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_timing --heading-base-level=0

//! Understory Timing: host-agnostic timer queue primitives for UI runtimes.
//!
//! This crate does not read a clock. Callers supply time as monotonic `u64`
//! milliseconds, schedule payloads at absolute deadlines, and drain whatever
//! has come due whenever their runtime wakes up (typically once per frame).
//!
//! ## Ordering
//!
//! Due entries are yielded in deadline order. Entries that share a deadline
//! are yielded in the order they were scheduled.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_timing::TimerQueue;
//!
//! let mut timers = TimerQueue::new();
//! let blink = timers.schedule(1_000, "blink");
//! timers.schedule(250, "tooltip");
//!
//! assert_eq!(timers.next_deadline(), Some(250));
//!
//! // Nothing is due yet.
//! assert!(timers.pop_due(100).is_none());
//!
//! // The tooltip fires first.
//! assert_eq!(timers.pop_due(300).map(|(_, v)| v), Some("tooltip"));
//!
//! // Cancelled timers never fire.
//! assert_eq!(timers.cancel(blink), Some("blink"));
//! assert!(timers.pop_due(5_000).is_none());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

/// Handle for a scheduled timer.
///
/// Handles stay unique for the lifetime of the queue that issued them, so a
/// stale handle can never cancel a newer timer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId {
    deadline: u64,
    seq: u64,
}

impl TimerId {
    /// The absolute deadline, in milliseconds, this timer was scheduled for.
    #[must_use]
    pub fn deadline(self) -> u64 {
        self.deadline
    }
}

/// A queue of payloads keyed by absolute deadline.
#[derive(Clone, Debug)]
pub struct TimerQueue<T> {
    entries: BTreeMap<TimerId, T>,
    next_seq: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_seq: 0,
        }
    }

    /// Schedules `payload` to come due at `deadline`.
    pub fn schedule(&mut self, deadline: u64, payload: T) -> TimerId {
        let id = TimerId {
            deadline,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.entries.insert(id, payload);
        id
    }

    /// Schedules `payload` to come due `delay` milliseconds after `now`.
    ///
    /// Saturates at `u64::MAX` rather than wrapping.
    pub fn schedule_after(&mut self, now: u64, delay: u64, payload: T) -> TimerId {
        self.schedule(now.saturating_add(delay), payload)
    }

    /// Cancels a pending timer, returning its payload if it had not fired yet.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        self.entries.remove(&id)
    }

    /// Returns `true` if `id` is still pending.
    #[must_use]
    pub fn contains(&self, id: TimerId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Returns the earliest pending deadline, if any.
    ///
    /// Hosts can use this to decide how long to sleep before the next wake-up.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.keys().next().map(|id| id.deadline)
    }

    /// Removes and returns the earliest entry whose deadline is `<= now`.
    pub fn pop_due(&mut self, now: u64) -> Option<(TimerId, T)> {
        let first = *self.entries.keys().next()?;
        if first.deadline > now {
            return None;
        }
        self.entries.remove(&first).map(|payload| (first, payload))
    }

    /// Removes and returns every entry whose deadline is `<= now`, in firing order.
    pub fn drain_due(&mut self, now: u64) -> Vec<(TimerId, T)> {
        let mut due = Vec::new();
        while let Some(entry) = self.pop_due(now) {
            due.push(entry);
        }
        due
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no timers are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every pending timer.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
