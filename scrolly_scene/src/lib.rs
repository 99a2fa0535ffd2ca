// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=scrolly_scene --heading-base-level=0

//! Scrolly Scene: immutable scene descriptors.
//!
//! Panels describe what they look like at one instant as a [`Scene`]: a tree
//! of [`Node`]s (groups, filled paths, rectangles and caption anchors) with
//! per-node opacity and class names. Scenes are values; a new one is built for
//! every frame and handed to whatever actually draws.
//!
//! [`to_svg`] renders a scene as an SVG document. It is meant for debugging,
//! snapshots and headless demos rather than production drawing.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Affine, Rect, Size};
//! use peniko::Color;
//! use scrolly_scene::{Group, RectNode, Scene, to_svg};
//!
//! let mut builder = Scene::builder(Size::new(200.0, 100.0));
//! builder.push(
//!     Group::new(Affine::translate((20.0, 10.0)))
//!         .with_class("bars")
//!         .with_child(RectNode::new(Rect::new(0.0, 0.0, 120.0, 12.0), Color::BLACK)),
//! );
//! let scene = builder.build();
//!
//! assert_eq!(scene.flatten().len(), 2);
//! assert!(to_svg(&scene).contains("<rect x=\"0\" y=\"0\" width=\"120\" height=\"12\""));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod node;
mod svg;

pub use node::{Caption, Group, Node, PathNode, RectNode, Scene, SceneBuilder};
pub use svg::to_svg;
