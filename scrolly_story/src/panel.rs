// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt;

use kurbo::Point;
use scrolly_scene::Scene;
use scrolly_threshold::Transition;

use crate::env::Environment;
use crate::event::{PanelTag, UpdateParams};
use crate::model::StoryModel;

/// A state change reported by a panel, by state name.
pub type PanelTransition = Transition<&'static str>;

/// A point of interest for the scroll indicator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TopPoint {
    /// Where the indicator draws the mark, in document coordinates.
    pub display_point: f64,
    /// Scroll offset at which the mark counts as reached, if any.
    pub on_point: Option<f64>,
    /// Major marks are drawn larger.
    pub major: bool,
}

/// One independently updating visual region of the story.
///
/// The orchestrator drives every panel through the same sequence:
/// [`set_height`](Self::set_height) and [`init`](Self::init) once, then
/// [`ready`](Self::ready), then any number of
/// [`update`](Self::update)/[`render`](Self::render) calls, each update
/// preceded by `set_height`.
pub trait Panel: fmt::Debug {
    /// Tag used to filter updates.
    fn tag(&self) -> PanelTag;

    /// Name of the current state.
    fn state_name(&self) -> &'static str;

    /// Marks for the scroll indicator.
    fn top_points(&self, env: &Environment, container_height: f64) -> Vec<TopPoint>;

    /// One-time setup once data and geometry are known.
    fn init(&mut self, env: &Environment, model: &StoryModel, now: f64);

    /// Called once every panel has been initialized.
    fn ready(&mut self) {}

    /// Records the current viewport height.
    fn set_height(&mut self, viewport_height: f64);

    /// Recomputes state and starts whatever animations it implies.
    fn update(
        &mut self,
        params: &UpdateParams,
        env: &Environment,
        model: &StoryModel,
    ) -> Option<PanelTransition>;

    /// Whether this panel is one of `tags`.
    fn matches(&self, tags: &[PanelTag]) -> bool {
        tags.contains(&self.tag())
    }

    /// Scroll length this panel contributes to the story; zero for overlays.
    fn content_height(&self) -> f64 {
        0.0
    }

    /// Index of the feature under `position` (viewport coordinates), if this
    /// panel tracks the pointer.
    fn hit_test(
        &self,
        _position: Point,
        _env: &Environment,
        _model: &StoryModel,
        _now: f64,
    ) -> Option<usize> {
        None
    }

    /// Describes the panel at host time `now`.
    fn render(&self, env: &Environment, model: &StoryModel, now: f64) -> Scene;
}
