// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use core::fmt;

/// Computes a trigger point (a scroll offset) from the caller's context.
type TriggerFn<C> = Box<dyn Fn(&C) -> f64>;

/// A named scroll-position boundary.
///
/// A threshold either has a trigger function, which computes the scroll
/// offset at which it activates, or is the *baseline* that is active before
/// every other threshold.
pub struct Threshold<S, C> {
    name: S,
    trigger: Option<TriggerFn<C>>,
}

impl<S, C> Threshold<S, C> {
    /// Creates the baseline threshold (no trigger function).
    pub fn baseline(name: S) -> Self {
        Self {
            name,
            trigger: None,
        }
    }

    /// Creates a threshold that activates once the scroll offset reaches
    /// `trigger(ctx)`.
    pub fn at(name: S, trigger: impl Fn(&C) -> f64 + 'static) -> Self {
        Self {
            name,
            trigger: Some(Box::new(trigger)),
        }
    }

    /// Returns the state name of this threshold.
    pub fn name(&self) -> &S {
        &self.name
    }

    /// Returns `true` if this is the baseline threshold.
    pub fn is_baseline(&self) -> bool {
        self.trigger.is_none()
    }

    /// Evaluates the trigger point against `ctx`.
    ///
    /// Returns `None` for the baseline.
    pub fn point(&self, ctx: &C) -> Option<f64> {
        self.trigger.as_ref().map(|f| f(ctx))
    }

    /// Returns `true` if this threshold is satisfied at `offset`.
    ///
    /// The baseline is always satisfied. A NaN trigger point never is.
    pub fn is_reached(&self, offset: f64, ctx: &C) -> bool {
        match &self.trigger {
            None => true,
            Some(f) => f(ctx) <= offset,
        }
    }
}

impl<S: fmt::Debug, C> fmt::Debug for Threshold<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Threshold")
            .field("name", &self.name)
            .field("baseline", &self.is_baseline())
            .finish()
    }
}

/// Configuration errors reported by [`ThresholdMachine::new`](crate::ThresholdMachine::new).
///
/// Indices refer to positions in the declared threshold list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThresholdError {
    /// No thresholds were declared.
    Empty,
    /// No threshold without a trigger function was declared.
    MissingBaseline,
    /// More than one threshold has no trigger function.
    MultipleBaselines {
        /// Index of the first baseline.
        first: usize,
        /// Index of the offending second baseline.
        second: usize,
    },
    /// Two thresholds share a name.
    DuplicateName {
        /// Index of the first declaration.
        first: usize,
        /// Index of the duplicate.
        second: usize,
    },
}

impl fmt::Display for ThresholdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "no thresholds declared"),
            Self::MissingBaseline => write!(f, "no baseline threshold declared"),
            Self::MultipleBaselines { first, second } => write!(
                f,
                "thresholds {first} and {second} are both baselines; exactly one is allowed"
            ),
            Self::DuplicateName { first, second } => {
                write!(f, "thresholds {first} and {second} share a name")
            }
        }
    }
}

impl core::error::Error for ThresholdError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_has_no_point_and_is_always_reached() {
        let t: Threshold<&str, ()> = Threshold::baseline("off");
        assert!(t.is_baseline());
        assert_eq!(t.point(&()), None);
        assert!(t.is_reached(f64::NEG_INFINITY, &()));
    }

    #[test]
    fn trigger_is_evaluated_against_context() {
        let t = Threshold::at("on", |h: &f64| h * 1.5);
        assert_eq!(t.point(&100.0), Some(150.0));
        assert!(!t.is_reached(149.0, &100.0));
        assert!(t.is_reached(150.0, &100.0));
        // Same threshold, different context.
        assert!(t.is_reached(150.0, &50.0));
    }

    #[test]
    fn nan_trigger_is_never_reached() {
        let t = Threshold::at("on", |_: &()| f64::NAN);
        assert!(!t.is_reached(f64::INFINITY, &()));
    }
}
