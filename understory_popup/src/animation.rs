// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time-sampled frame animations.
//!
//! An animation is a pure description: `from`, `to`, a start time, a duration
//! and an easing curve. It holds no callbacks. The controller samples it on
//! every [`advance`](crate::PopupController::advance) and runs the owning
//! transition's completion once the sample reports it has finished.

use kurbo::Rect;

/// Easing curve applied to normalized time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Easing {
    /// Constant velocity.
    Linear,
    /// Cubic ease in, ease out.
    #[default]
    EaseInOut,
    /// Cubic ease out. Used when resuming from an interrupted drag.
    EaseOut,
}

impl Easing {
    /// Maps `t` in `[0, 1]` to eased progress in `[0, 1]`. Out-of-range input is clamped.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 1.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
            Self::EaseOut => {
                let u = 1.0 - t;
                1.0 - u * u * u
            }
        }
    }
}

/// The animatable properties of a view: its frame and its opacity.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Frame {
    /// Frame in host coordinates.
    pub rect: Rect,
    /// Opacity in `[0, 1]`.
    pub alpha: f64,
}

impl Frame {
    /// A fully opaque frame.
    #[must_use]
    pub const fn opaque(rect: Rect) -> Self {
        Self { rect, alpha: 1.0 }
    }

    /// A fully transparent frame.
    #[must_use]
    pub const fn transparent(rect: Rect) -> Self {
        Self { rect, alpha: 0.0 }
    }

    /// Linear interpolation between `self` and `other`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            rect: lerp_rect(self.rect, other.rect, t),
            alpha: lerp(self.alpha, other.alpha, t),
        }
    }
}

/// A frame animation between two values.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrameAnimation {
    from: Frame,
    to: Frame,
    start: u64,
    duration: u64,
    easing: Easing,
}

impl FrameAnimation {
    /// Creates an animation starting at `start` (milliseconds) lasting `duration` milliseconds.
    #[must_use]
    pub fn new(from: Frame, to: Frame, start: u64, duration: u64, easing: Easing) -> Self {
        Self {
            from,
            to,
            start,
            duration,
            easing,
        }
    }

    /// Start value.
    #[must_use]
    pub fn from(&self) -> Frame {
        self.from
    }

    /// End value.
    #[must_use]
    pub fn to(&self) -> Frame {
        self.to
    }

    /// Duration in milliseconds.
    #[must_use]
    pub fn duration(&self) -> u64 {
        self.duration
    }

    /// Samples the animation at `now`, returning the current value and whether it has finished.
    ///
    /// A zero-duration animation is finished on its first sample. Samples
    /// taken before `start` return the start value.
    #[must_use]
    pub fn sample(&self, now: u64) -> (Frame, bool) {
        let elapsed = now.saturating_sub(self.start);
        if elapsed >= self.duration {
            return (self.to, true);
        }
        let t = elapsed as f64 / self.duration as f64;
        (self.from.lerp(self.to, self.easing.apply(t)), false)
    }
}

/// Scales `duration` by `fraction` (clamped to `[0, 1]`), rounding to the nearest millisecond.
#[must_use]
pub fn scale_duration(duration: u64, fraction: f64) -> u64 {
    let fraction = if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    };
    let scaled = duration as f64 * fraction + 0.5;
    #[expect(
        clippy::cast_possible_truncation,
        reason = "scaled is within [0, duration + 0.5]"
    )]
    let ms = scaled as u64;
    ms.min(duration)
}

pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

pub(crate) fn lerp_rect(a: Rect, b: Rect, t: f64) -> Rect {
    Rect::new(
        lerp(a.x0, b.x0, t),
        lerp(a.y0, b.y0, t),
        lerp(a.x1, b.x1, t),
        lerp(a.y1, b.y1, t),
    )
}
