// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Vec2};

use crate::easing::Easing;

/// Linear interpolation between two values.
///
/// `t == 0` yields `self`, `t == 1` yields `other`. Implementations should
/// accept any `t` in `[0, 1]`; values outside are not produced by [`Tween`].
pub trait Lerp: Clone {
    /// Interpolates from `self` toward `other` by `t`.
    #[must_use]
    fn lerp(&self, other: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for Point {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        Self::lerp(*self, *other, t)
    }
}

impl Lerp for Vec2 {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        Self::lerp(*self, *other, t)
    }
}

/// Delay, duration and easing of one animation, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timing {
    /// Time between the start of the tween and the first change.
    pub delay: f64,
    /// Time from the end of the delay until the end value is reached.
    pub duration: f64,
    /// Curve applied to progress.
    pub easing: Easing,
}

impl Timing {
    /// A settled timing: no delay, no duration.
    pub const IMMEDIATE: Self = Self {
        delay: 0.0,
        duration: 0.0,
        easing: Easing::Linear,
    };

    /// Creates a timing with the given duration, no delay and the default easing.
    #[must_use]
    pub fn new(duration: f64) -> Self {
        Self {
            delay: 0.0,
            duration,
            easing: Easing::default(),
        }
    }

    /// Sets the delay.
    #[must_use]
    pub fn with_delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    /// Sets the easing.
    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Total time from start to end, delay included.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.delay.max(0.0) + self.duration.max(0.0)
    }
}

impl Default for Timing {
    /// 250ms, no delay, cubic in/out.
    fn default() -> Self {
        Self::new(250.0)
    }
}

/// A timed interpolation between two values.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween<T> {
    from: T,
    to: T,
    start: f64,
    timing: Timing,
}

impl<T: Lerp> Tween<T> {
    /// Creates a tween from `from` to `to` starting at time `start`.
    pub fn new(from: T, to: T, start: f64, timing: Timing) -> Self {
        Self {
            from,
            to,
            start,
            timing,
        }
    }

    /// A tween that is already at `value`.
    pub fn settled(value: T) -> Self {
        Self {
            from: value.clone(),
            to: value,
            start: f64::NEG_INFINITY,
            timing: Timing::IMMEDIATE,
        }
    }

    /// The start value.
    pub fn from(&self) -> &T {
        &self.from
    }

    /// The end value.
    pub fn to(&self) -> &T {
        &self.to
    }

    /// The timing.
    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// Eased progress in `[0, 1]` at time `now`.
    #[must_use]
    pub fn progress(&self, now: f64) -> f64 {
        let elapsed = now - self.start - self.timing.delay.max(0.0);
        if elapsed <= 0.0 && self.timing.duration > 0.0 {
            return 0.0;
        }
        if self.timing.duration <= 0.0 {
            return if elapsed >= 0.0 { 1.0 } else { 0.0 };
        }
        self.timing.easing.apply(elapsed / self.timing.duration)
    }

    /// Returns `true` once the end value has been reached.
    #[must_use]
    pub fn is_finished(&self, now: f64) -> bool {
        now - self.start >= self.timing.total()
    }

    /// Samples the tween at time `now`.
    #[must_use]
    pub fn sample(&self, now: f64) -> T {
        let t = self.progress(now);
        if t <= 0.0 {
            self.from.clone()
        } else if t >= 1.0 {
            self.to.clone()
        } else {
            self.from.lerp(&self.to, t)
        }
    }
}

/// A property that is either settled or animating toward a target.
///
/// This is the unit of "last writer wins": a new
/// [`animate_to`](Self::animate_to) replaces the animation in flight and
/// starts from the value it had reached.
#[derive(Clone, Debug, PartialEq)]
pub struct Animated<T> {
    tween: Tween<T>,
}

impl<T: Lerp> Animated<T> {
    /// Creates a settled property.
    pub fn new(value: T) -> Self {
        Self {
            tween: Tween::settled(value),
        }
    }

    /// Jumps to `value`, interrupting any animation.
    pub fn set(&mut self, value: T) {
        self.tween = Tween::settled(value);
    }

    /// Starts animating toward `value` at time `now`.
    ///
    /// The start value is the property's value at `now`, so interrupting an
    /// animation midway continues smoothly from where it was.
    pub fn animate_to(&mut self, value: T, now: f64, timing: Timing) {
        let from = self.tween.sample(now);
        self.tween = Tween::new(from, value, now, timing);
    }

    /// Starts animating from `from` toward `value` at time `now`.
    pub fn animate_from_to(&mut self, from: T, value: T, now: f64, timing: Timing) {
        self.tween = Tween::new(from, value, now, timing);
    }

    /// Moves the end value of the animation in flight, keeping its start
    /// time and timing. A settled property jumps to `value`.
    ///
    /// Use this for targets that drift while animating, such as a position
    /// that depends on the scroll offset.
    pub fn retarget(&mut self, value: T, now: f64) {
        if self.is_active(now) {
            self.tween.to = value;
        } else {
            self.set(value);
        }
    }

    /// Value at time `now`.
    #[must_use]
    pub fn value_at(&self, now: f64) -> T {
        self.tween.sample(now)
    }

    /// The value the property is heading to (or sitting at).
    pub fn target(&self) -> &T {
        self.tween.to()
    }

    /// Returns `true` while an animation is in flight at `now`, delay included.
    #[must_use]
    pub fn is_active(&self, now: f64) -> bool {
        !self.tween.is_finished(now)
    }

    /// The current tween.
    pub fn tween(&self) -> &Tween<T> {
        &self.tween
    }
}

impl<T: Lerp + Default> Default for Animated<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
