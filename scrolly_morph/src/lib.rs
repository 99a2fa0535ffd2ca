// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=scrolly_morph --heading-base-level=0

//! Scrolly Morph: vertex-matched paths for bar ↔ region morphing.
//!
//! Morphing a bar into a map region (and back) is done by interpolating each
//! vertex of one closed polygon toward the vertex at the same index of the
//! other. That only looks right when both polygons expose the same number of
//! vertices in a comparable order, so this crate builds rectangles with a
//! *chosen* vertex count:
//!
//! - [`side_counts`] splits a vertex count over the four sides of a rectangle,
//!   distributing the remainder one per side from the first (13 → `[4, 3, 3, 3]`).
//! - [`rectangle_path`] walks the rectangle clockwise from its origin corner
//!   (right, down, left, up), placing evenly spaced vertices on each side so
//!   that the path has exactly the requested count. Counts below
//!   [`MIN_DISTRIBUTED_VERTICES`] fall back to a plain four-corner rectangle.
//! - [`region_path`] projects a ring of geographic vertices into a
//!   [`MorphPath`] with whatever projection the caller supplies.
//! - [`interpolate`] blends two paths vertex by vertex; [`MorphPath`] also
//!   implements [`scrolly_timing::Lerp`] so it can be animated directly.
//!
//! The vertex count of a [`MorphPath`] counts path elements: the initial move,
//! every line and the closing segment. For a closed GeoJSON ring (first vertex
//! repeated last) this equals the ring length, so the ring length can be passed
//! straight to [`rectangle_path`].
//!
//! Bar layout helpers mirror the scales used to place the bar:
//! [`LinearScale`] for the value axis, [`BandScale`] for the row axis and
//! [`stacked_segments`] for laying out per-region segments left to right.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use scrolly_morph::{rectangle_path, region_path, side_counts};
//!
//! // A closed ring with 13 coordinates (12 distinct vertices).
//! let ring: Vec<Point> = (0..12)
//!     .map(|i| {
//!         let a = f64::from(i) * core::f64::consts::TAU / 12.0;
//!         Point::new(a.cos(), a.sin())
//!     })
//!     .chain(core::iter::once(Point::new(1.0, 0.0)))
//!     .collect();
//!
//! let region = region_path(&ring, |p| Point::new(100.0 + p.x * 50.0, 100.0 + p.y * 50.0));
//! assert_eq!(region.vertex_count(), 13);
//!
//! assert_eq!(side_counts(13), [4, 3, 3, 3]);
//! let bar = rectangle_path(Point::new(10.0, 20.0), Size::new(300.0, 40.0), region.vertex_count());
//! assert_eq!(bar.vertex_count(), 13);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod bar;
mod path;
mod rect;
mod scale;

pub use bar::{choropleth_opacity, stacked_segments};
pub use path::{MorphPath, interpolate, region_path, region_vertex_count};
pub use rect::{
    MIN_DISTRIBUTED_VERTICES, MINIMAL_SIDES, rectangle_path, side_counts, walked_sides,
};
pub use scale::{BandScale, LinearScale};
