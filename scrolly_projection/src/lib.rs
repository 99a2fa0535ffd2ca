// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=scrolly_projection --heading-base-level=0

//! Scrolly Projection: cartographic projections and box fitting.
//!
//! This crate maps geographic `(longitude, latitude)` coordinates, in degrees
//! and stored as Kurbo [`Point`](kurbo::Point)s with `x = lon`, `y = lat`,
//! onto a y-down drawing plane, and scales a projection so that a
//! [`FeatureCollection`] fits a target box.
//!
//! - [`Projection`]: a projection with a uniform scale and a translation.
//! - [`ConicEqualArea`]: Albers-style conic equal-area projection.
//!   [`ConicEqualArea::albers`] is the conventional configuration for the
//!   contiguous United States.
//! - [`FeatureCollection`] / [`Feature`]: regions with a stable id and one or
//!   more polygon rings.
//! - [`bounds`]: projected bounding box of a collection.
//! - [`fit`]: width-first, height-fallback fitting ("fit inside, preserve
//!   aspect ratio").
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use scrolly_projection::{ConicEqualArea, Feature, FeatureCollection, VerticalAlign, bounds, fit};
//!
//! let colorado = Feature::new(
//!     "CO",
//!     vec![vec![
//!         Point::new(-109.05, 41.0),
//!         Point::new(-102.05, 41.0),
//!         Point::new(-102.05, 37.0),
//!         Point::new(-109.05, 37.0),
//!         Point::new(-109.05, 41.0),
//!     ]],
//! );
//! let collection = FeatureCollection::new(vec![colorado]);
//!
//! let target = Size::new(400.0, 300.0);
//! let projection = fit(&ConicEqualArea::albers(), &collection, target, VerticalAlign::Top).unwrap();
//!
//! let b = bounds(&collection, &projection).unwrap();
//! assert!(b.width() <= target.width + 1e-6);
//! assert!(b.height() <= target.height + 1e-6);
//! assert!(b.y0.abs() < 1e-6);
//! ```
//!
//! Projections are not adjusted incrementally; refit whenever the target box
//! changes.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod conic;
mod fit;
mod geo;

pub use conic::{ConicEqualArea, Projection};
pub use fit::{FitError, VerticalAlign, bounds, fit};
pub use geo::{Feature, FeatureCollection, Ring};
