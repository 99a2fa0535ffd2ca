// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::fmt;

use crate::threshold::{Threshold, ThresholdError};

/// A change of active state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Transition<S> {
    /// State before the change.
    pub from: S,
    /// State after the change.
    pub to: S,
}

impl<S: PartialEq> Transition<S> {
    /// Creates a transition from `from` to `to`.
    pub fn new(from: S, to: S) -> Self {
        Self { from, to }
    }

    /// Returns `true` if either end of the transition is `state`.
    pub fn involves(&self, state: &S) -> bool {
        self.from == *state || self.to == *state
    }

    /// Returns `true` if this transition goes exactly from `from` to `to`.
    pub fn is(&self, from: &S, to: &S) -> bool {
        self.from == *from && self.to == *to
    }
}

/// Result of [`ThresholdMachine::compute_state`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateUpdate<S> {
    /// The state active at the queried offset.
    pub state: S,
    /// The change from the previously stored state, if any.
    pub transition: Option<Transition<S>>,
}

impl<S> StateUpdate<S> {
    /// Returns `true` if the state changed.
    pub fn changed(&self) -> bool {
        self.transition.is_some()
    }
}

/// Converts scroll offsets into named states for one panel.
///
/// `S` is the state name type (an enum or `&'static str`), `C` is the context
/// handed to trigger functions on every evaluation.
///
/// Each machine owns its stored state; there is no shared instance between
/// panels.
pub struct ThresholdMachine<S, C> {
    thresholds: Vec<Threshold<S, C>>,
    baseline: usize,
    current: S,
}

impl<S: Clone + PartialEq, C> ThresholdMachine<S, C> {
    /// Creates a machine over `thresholds` in declaration order.
    ///
    /// The stored state starts out as the baseline, so the first query that
    /// lands on the baseline reports no transition. Use
    /// [`with_initial_state`](Self::with_initial_state) to start from a state
    /// outside the list (such as a "page load" marker) so the first query
    /// always reports one.
    pub fn new(thresholds: Vec<Threshold<S, C>>) -> Result<Self, ThresholdError> {
        if thresholds.is_empty() {
            return Err(ThresholdError::Empty);
        }

        let mut baseline = None;
        for (i, t) in thresholds.iter().enumerate() {
            if t.is_baseline() {
                if let Some(first) = baseline {
                    return Err(ThresholdError::MultipleBaselines { first, second: i });
                }
                baseline = Some(i);
            }
            if let Some(first) = thresholds[..i].iter().position(|p| p.name() == t.name()) {
                return Err(ThresholdError::DuplicateName { first, second: i });
            }
        }
        let baseline = baseline.ok_or(ThresholdError::MissingBaseline)?;

        let current = thresholds[baseline].name().clone();
        Ok(Self {
            thresholds,
            baseline,
            current,
        })
    }

    /// Replaces the stored state the machine starts from.
    #[must_use]
    pub fn with_initial_state(mut self, state: S) -> Self {
        self.current = state;
        self
    }

    /// Returns the stored state, as of the last [`compute_state`](Self::compute_state).
    pub fn current(&self) -> &S {
        &self.current
    }

    /// Returns the baseline state name.
    pub fn baseline(&self) -> &S {
        self.thresholds[self.baseline].name()
    }

    /// Returns the declared thresholds in declaration order.
    pub fn thresholds(&self) -> &[Threshold<S, C>] {
        &self.thresholds
    }

    /// Returns the state active at `offset` without touching the stored state.
    ///
    /// Thresholds are tested from last to first; the first one reached wins.
    pub fn peek(&self, offset: f64, ctx: &C) -> &S {
        self.thresholds
            .iter()
            .rev()
            .find(|t| t.is_reached(offset, ctx))
            .map_or_else(|| self.baseline(), |t| t.name())
    }

    /// Computes the state at `offset`, stores it and reports the transition
    /// from the previously stored state, if any.
    pub fn compute_state(&mut self, offset: f64, ctx: &C) -> StateUpdate<S> {
        let state = self.peek(offset, ctx).clone();
        if state == self.current {
            return StateUpdate {
                state,
                transition: None,
            };
        }
        let from = core::mem::replace(&mut self.current, state.clone());
        StateUpdate {
            transition: Some(Transition {
                from,
                to: state.clone(),
            }),
            state,
        }
    }

    /// Evaluates the trigger point of the threshold named `name`.
    ///
    /// Returns `None` for the baseline and for unknown names.
    pub fn trigger_point(&self, name: &S, ctx: &C) -> Option<f64> {
        self.thresholds
            .iter()
            .find(|t| t.name() == name)
            .and_then(|t| t.point(ctx))
    }

    /// Overwrites the stored state without reporting a transition.
    pub fn reset(&mut self, state: S) {
        self.current = state;
    }
}

impl<S: fmt::Debug, C> fmt::Debug for ThresholdMachine<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThresholdMachine")
            .field("thresholds", &self.thresholds)
            .field("baseline", &self.baseline)
            .field("current", &self.current)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    fn on_off(point: f64) -> ThresholdMachine<&'static str, f64> {
        ThresholdMachine::new(vec![
            Threshold::baseline("off"),
            Threshold::at("on", move |scale: &f64| point * scale),
        ])
        .unwrap()
    }

    #[test]
    fn rejects_malformed_configuration() {
        let empty: Vec<Threshold<&str, ()>> = vec![];
        assert_eq!(
            ThresholdMachine::new(empty).unwrap_err(),
            ThresholdError::Empty
        );

        let no_baseline = vec![Threshold::at("a", |_: &()| 0.0)];
        assert_eq!(
            ThresholdMachine::new(no_baseline).unwrap_err(),
            ThresholdError::MissingBaseline
        );

        let two_baselines: Vec<Threshold<&str, ()>> =
            vec![Threshold::baseline("a"), Threshold::baseline("b")];
        assert_eq!(
            ThresholdMachine::new(two_baselines).unwrap_err(),
            ThresholdError::MultipleBaselines {
                first: 0,
                second: 1
            }
        );

        let duplicate = vec![
            Threshold::baseline("a"),
            Threshold::at("b", |_: &()| 1.0),
            Threshold::at("b", |_: &()| 2.0),
        ];
        assert_eq!(
            ThresholdMachine::new(duplicate).unwrap_err(),
            ThresholdError::DuplicateName {
                first: 1,
                second: 2
            }
        );
    }

    #[test]
    fn on_off_switches_at_trigger_point() {
        let machine = on_off(100.0);
        assert_eq!(*machine.peek(99.999, &1.0), "off");
        assert_eq!(*machine.peek(100.0, &1.0), "on");
        assert_eq!(*machine.peek(-50.0, &1.0), "off");
    }

    #[test]
    fn crossing_from_below_reports_once() {
        let mut machine = on_off(100.0);
        assert_eq!(machine.compute_state(50.0, &1.0).transition, None);

        let up = machine.compute_state(120.0, &1.0);
        assert_eq!(up.state, "on");
        assert_eq!(up.transition, Some(Transition::new("off", "on")));

        let again = machine.compute_state(130.0, &1.0);
        assert_eq!(again.state, "on");
        assert!(!again.changed());
    }

    #[test]
    fn triggers_are_recomputed_per_call() {
        let mut machine = on_off(100.0);
        assert_eq!(machine.compute_state(150.0, &1.0).state, "on");

        // The viewport grew; 150 is now below the trigger.
        let shrunk = machine.compute_state(150.0, &2.0);
        assert_eq!(shrunk.state, "off");
        assert_eq!(shrunk.transition, Some(Transition::new("on", "off")));
    }

    #[test]
    fn later_declaration_wins_when_points_cross() {
        // "b" is declared after "c" in precedence order but with a higher point;
        // at 250 both are reached and the last declared one wins.
        let machine: ThresholdMachine<&str, ()> = ThresholdMachine::new(vec![
            Threshold::baseline("a"),
            Threshold::at("c", |_: &()| 200.0),
            Threshold::at("b", |_: &()| 100.0),
        ])
        .unwrap();
        assert_eq!(*machine.peek(150.0, &()), "b");
        assert_eq!(*machine.peek(250.0, &()), "b");
        assert_eq!(*machine.peek(50.0, &()), "a");
    }

    #[test]
    fn baseline_need_not_be_first() {
        let machine: ThresholdMachine<&str, ()> = ThresholdMachine::new(vec![
            Threshold::at("early", |_: &()| 10.0),
            Threshold::baseline("idle"),
            Threshold::at("late", |_: &()| 100.0),
        ])
        .unwrap();
        // Reaching the baseline during the reverse scan stops the search.
        assert_eq!(*machine.peek(50.0, &()), "idle");
        assert_eq!(*machine.peek(0.0, &()), "idle");
        assert_eq!(*machine.peek(150.0, &()), "late");
    }

    #[test]
    fn initial_state_outside_list_reports_first_transition() {
        let mut machine = on_off(100.0).with_initial_state("pageload");
        assert_eq!(*machine.current(), "pageload");
        let first = machine.compute_state(0.0, &1.0);
        assert_eq!(first.transition, Some(Transition::new("pageload", "off")));
    }

    #[test]
    fn trigger_point_lookup() {
        let machine = on_off(40.0);
        assert_eq!(machine.trigger_point(&"on", &2.0), Some(80.0));
        assert_eq!(machine.trigger_point(&"off", &2.0), None);
        assert_eq!(machine.trigger_point(&"missing", &2.0), None);
    }

    #[test]
    fn reset_overwrites_without_transition() {
        let mut machine = on_off(100.0);
        machine.reset("on");
        assert_eq!(*machine.current(), "on");
        assert!(!machine.compute_state(150.0, &1.0).changed());
    }

    #[test]
    fn transition_helpers() {
        let t = Transition::new("focused", "hover");
        assert!(t.involves(&"hover"));
        assert!(t.involves(&"focused"));
        assert!(!t.involves(&"done"));
        assert!(t.is(&"focused", &"hover"));
        assert!(!t.is(&"hover", &"focused"));
    }
}
