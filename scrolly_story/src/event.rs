// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Size};
use smallvec::SmallVec;

/// Why an update is happening.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// First pass after setup.
    Init,
    /// The document scrolled.
    Scroll,
    /// The viewport changed size.
    Resize,
    /// A different data row was selected.
    BarSelected,
}

/// Identifies a panel for update filtering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanelTag(&'static str);

impl PanelTag {
    /// The data table.
    pub const TABLE: Self = Self("table");
    /// The bar chart / choropleth map.
    pub const MAP: Self = Self("map");
    /// The closing panel.
    pub const FINAL: Self = Self("final");

    /// Creates a tag.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// The tag name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

/// Parameters of one orchestrated update.
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateParams {
    /// Why the update is happening.
    pub trigger: Trigger,
    /// When present, only panels with one of these tags are updated.
    pub matches: Option<SmallVec<[PanelTag; 2]>>,
    /// Host time in milliseconds, used to start animations.
    pub time: f64,
}

impl UpdateParams {
    /// An update for every panel.
    #[must_use]
    pub fn new(trigger: Trigger, time: f64) -> Self {
        Self {
            trigger,
            matches: None,
            time,
        }
    }

    /// Restricts the update to panels with the given tags.
    #[must_use]
    pub fn only(mut self, tags: impl IntoIterator<Item = PanelTag>) -> Self {
        self.matches = Some(tags.into_iter().collect());
        self
    }
}

/// Raw input from the host, translated into updates by the orchestrator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostEvent {
    /// The document scrolled to `y`.
    Scroll {
        /// New vertical scroll offset.
        y: f64,
    },
    /// The viewport was resized.
    Resize {
        /// New viewport size.
        viewport: Size,
    },
    /// The pointer moved, in viewport coordinates.
    PointerMove {
        /// Pointer position.
        position: Point,
    },
    /// The pointer left the story.
    PointerLeave,
}
