// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Size;

/// What the host knows about the page at the time of a call.
///
/// Supplied on every call; nothing here is cached by panels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Environment {
    /// Size of the visible viewport.
    pub viewport: Size,
    /// Vertical scroll offset of the document.
    pub scroll_y: f64,
    /// Offset of the story container from the document origin.
    pub container_top: f64,
}

impl Environment {
    /// An environment with the given viewport, scrolled to the top.
    #[must_use]
    pub fn new(viewport: Size) -> Self {
        Self {
            viewport,
            scroll_y: 0.0,
            container_top: 0.0,
        }
    }

    /// Sets the scroll offset.
    #[must_use]
    pub fn with_scroll(mut self, scroll_y: f64) -> Self {
        self.scroll_y = scroll_y;
        self
    }

    /// Sets the container offset.
    #[must_use]
    pub fn with_container_top(mut self, container_top: f64) -> Self {
        self.container_top = container_top;
        self
    }

    /// Height of the visible viewport.
    #[must_use]
    pub fn visible_height(&self) -> f64 {
        self.viewport.height
    }

    /// Width available to panels.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.viewport.width
    }

    /// Landscape when wider than tall.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        if self.viewport.width > self.viewport.height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }
}

/// Viewport orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Wider than tall.
    Landscape,
    /// Taller than wide, or square.
    Portrait,
}

/// Size and placement of a panel as fractions of the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dims {
    /// Fraction of the viewport width.
    pub width: f64,
    /// Fraction of the viewport height.
    pub height: f64,
    /// Top edge as a fraction of the viewport height.
    pub top: f64,
}

impl Dims {
    /// Creates a dimension entry.
    #[must_use]
    pub const fn new(width: f64, height: f64, top: f64) -> Self {
        Self { width, height, top }
    }
}

/// A pair of values, one per orientation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ByOrientation<T> {
    /// Used when the viewport is wider than tall.
    pub landscape: T,
    /// Used otherwise.
    pub portrait: T,
}

impl<T: Copy> ByOrientation<T> {
    /// Picks the value for `orientation`.
    #[must_use]
    pub fn get(&self, orientation: Orientation) -> T {
        match orientation {
            Orientation::Landscape => self.landscape,
            Orientation::Portrait => self.portrait,
        }
    }
}
