// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=scrolly_timing --heading-base-level=0

//! Scrolly Timing: host-agnostic tweening primitives.
//!
//! Time is a caller-supplied `f64` in milliseconds on any monotonic clock the
//! host likes; nothing here reads a clock or owns a timer. The pieces are:
//!
//! - [`Easing`]: maps linear progress in `[0, 1]` onto eased progress.
//! - [`Timing`]: delay, duration and easing of one animation.
//! - [`Tween`]: a start value, an end value, a start time and a [`Timing`],
//!   sampled by time.
//! - [`Animated`]: a property that always has a value and may be animating
//!   toward another. Starting a new animation on the same property replaces
//!   the one in flight, starting from wherever it had got to. Two properties
//!   animate independently.
//! - [`Lerp`]: linear interpolation, implemented for `f64` and Kurbo points
//!   and vectors. Other crates implement it for their own shapes.
//!
//! ## Minimal example
//!
//! ```rust
//! use scrolly_timing::{Animated, Easing, Timing};
//!
//! let mut opacity = Animated::new(0.0_f64);
//!
//! // Fade in over 500ms after a 500ms delay, starting at t = 1000ms.
//! let timing = Timing::new(500.0).with_delay(500.0).with_easing(Easing::Linear);
//! opacity.animate_to(1.0, 1_000.0, timing);
//!
//! assert_eq!(opacity.value_at(1_200.0), 0.0); // still delayed
//! assert_eq!(opacity.value_at(1_750.0), 0.5);
//! assert_eq!(opacity.value_at(5_000.0), 1.0);
//!
//! // Interrupt: jump straight to a value.
//! opacity.set(0.25);
//! assert!(!opacity.is_active(1_750.0));
//! ```
//!
//! Cancelling an animation needs no handle beyond the property itself: stop
//! sampling it, or [`Animated::set`] it.
//!
//! This crate is `no_std`.

#![no_std]

mod easing;
mod tween;

pub use easing::Easing;
pub use tween::{Animated, Lerp, Timing, Tween};
