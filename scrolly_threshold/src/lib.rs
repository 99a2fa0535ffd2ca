// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=scrolly_threshold --heading-base-level=0

//! Scrolly Threshold: scroll-offset state machines.
//!
//! A scroll-driven panel declares an ordered list of named [`Threshold`]s. Each
//! threshold carries a trigger function that computes the scroll offset at which
//! it becomes active, except for exactly one *baseline* threshold that covers
//! everything before the first trigger. A [`ThresholdMachine`] turns a scroll
//! offset into the name of the active threshold and reports a [`Transition`]
//! whenever that name changes.
//!
//! The rules are:
//!
//! - Thresholds are tested from the **last** declared to the first; the first
//!   one whose trigger point is `<= offset` wins. Declaration order is
//!   precedence, so nested states (for example "hover" inside a map mode) can
//!   be expressed by declaring them later.
//! - Trigger functions are evaluated on **every** call against a caller-owned
//!   context, because they usually depend on viewport geometry that changes on
//!   resize. Nothing is cached.
//! - The machine stores the last computed state. Output depends on that stored
//!   state and the new input, so calling twice with the same offset yields a
//!   transition at most once.
//!
//! ## Minimal example
//!
//! ```rust
//! use scrolly_threshold::{Threshold, ThresholdMachine, Transition};
//!
//! // Context passed to trigger functions; usually viewport geometry.
//! struct Viewport {
//!     height: f64,
//! }
//!
//! let mut machine = ThresholdMachine::new(vec![
//!     Threshold::baseline("off"),
//!     Threshold::at("splitbar", |vp: &Viewport| vp.height),
//!     Threshold::at("focused", |vp: &Viewport| vp.height * 2.0),
//! ])
//! .unwrap();
//!
//! let vp = Viewport { height: 100.0 };
//!
//! let update = machine.compute_state(150.0, &vp);
//! assert_eq!(update.state, "splitbar");
//! assert_eq!(update.transition, Some(Transition::new("off", "splitbar")));
//!
//! // Same offset again: same state, no transition.
//! assert_eq!(machine.compute_state(150.0, &vp).transition, None);
//! ```
//!
//! ## Malformed configuration
//!
//! [`ThresholdMachine::new`] rejects empty lists, lists without a baseline or
//! with more than one, and duplicate names. These are programming errors; the
//! returned [`ThresholdError`] is meant to be surfaced, not recovered from.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod machine;
mod threshold;

pub use machine::{StateUpdate, ThresholdMachine, Transition};
pub use threshold::{Threshold, ThresholdError};
