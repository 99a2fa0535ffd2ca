// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Orchestrator: fan host events out to the panels that should see them.
//!
//! The orchestrator owns the panels and the shared [`StoryModel`], and applies
//! a few simple rules:
//!
//! - Panels are updated in the order they were added.
//! - Every update first hands each panel the current viewport height.
//! - An update with [`UpdateParams::matches`] set only reaches panels whose
//!   tag is listed; the rest keep their state untouched.
//! - The story's scroll length is the sum of the panels' content heights plus
//!   one viewport.
//!
//! Time never advances on its own: every call that can start an animation
//! takes the host's clock in milliseconds, and [`Orchestrator::render`] samples
//! all animations at the time it is given.

use kurbo::{Point, Size};
use scrolly_scene::Scene;

use crate::config::StoryConfig;
use crate::env::Environment;
use crate::error::StoryError;
use crate::event::{HostEvent, PanelTag, Trigger, UpdateParams};
use crate::model::StoryModel;
use crate::panel::{Panel, PanelTransition};
use crate::panels::{FinalPanel, MapPanel, TablePanel};

/// What one orchestrated update did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateReport {
    /// Panels that received the update, in order.
    pub updated: Vec<PanelTag>,
    /// State changes reported by those panels.
    pub transitions: Vec<(PanelTag, PanelTransition)>,
    /// Whether the hovered feature changed.
    pub hover_changed: bool,
}

impl UpdateReport {
    /// The transition reported by `tag`, if any.
    #[must_use]
    pub fn transition_for(&self, tag: PanelTag) -> Option<PanelTransition> {
        self.transitions
            .iter()
            .find(|(t, _)| *t == tag)
            .map(|(_, transition)| *transition)
    }

    /// Whether `tag` received the update.
    #[must_use]
    pub fn was_updated(&self, tag: PanelTag) -> bool {
        self.updated.contains(&tag)
    }
}

/// A mark for the scroll indicator, in document coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marker {
    /// Panel that placed the mark.
    pub tag: PanelTag,
    /// Where to draw the mark.
    pub display_point: f64,
    /// Scroll offset at which the mark counts as reached.
    pub on_point: Option<f64>,
    /// Drawn larger.
    pub major: bool,
    /// The current scroll offset is at or past `on_point`.
    pub reached: bool,
}

/// Everything a host needs to paint one frame.
#[derive(Clone, Debug)]
pub struct Frame {
    /// Host time the frame was sampled at.
    pub time: f64,
    /// Scroll offset at that time.
    pub scroll_y: f64,
    /// Scroll length of the story.
    pub container_height: f64,
    /// Viewport size.
    pub viewport: Size,
    /// One scene per panel, in panel order.
    pub scenes: Vec<(PanelTag, Scene)>,
    /// Scroll indicator marks, top to bottom.
    pub markers: Vec<Marker>,
    /// Feature under the pointer.
    pub hovered: Option<usize>,
}

impl Frame {
    /// The scene of panel `tag`.
    #[must_use]
    pub fn scene(&self, tag: PanelTag) -> Option<&Scene> {
        self.scenes.iter().find(|(t, _)| *t == tag).map(|(_, s)| s)
    }
}

/// Drives a stack of panels from host events.
#[derive(Debug)]
pub struct Orchestrator {
    panels: Vec<Box<dyn Panel>>,
    model: StoryModel,
    env: Environment,
    container_height: f64,
    initialized: bool,
}

impl Orchestrator {
    /// Creates an orchestrator with no panels.
    #[must_use]
    pub fn new(model: StoryModel) -> Self {
        Self {
            panels: Vec::new(),
            model,
            env: Environment::default(),
            container_height: 0.0,
            initialized: false,
        }
    }

    /// The table, map and closing panels configured by `config`.
    ///
    /// Fails if `config` places a state beyond the story's scroll length.
    pub fn standard(model: StoryModel, config: &StoryConfig) -> Result<Self, StoryError> {
        config.validate()?;
        Ok(Self::new(model)
            .with_panel(TablePanel::new(config)?)
            .with_panel(MapPanel::new(config)?)
            .with_panel(FinalPanel::new(config)?))
    }

    /// Appends a panel.
    #[must_use]
    pub fn with_panel(mut self, panel: impl Panel + 'static) -> Self {
        self.push_panel(panel);
        self
    }

    /// Appends a panel.
    pub fn push_panel(&mut self, panel: impl Panel + 'static) {
        self.panels.push(Box::new(panel));
    }

    /// Sets every panel up for `env`, then runs the initial update.
    pub fn init(&mut self, env: Environment, now: f64) -> UpdateReport {
        self.env = env;
        let vh = env.visible_height();
        for panel in &mut self.panels {
            panel.set_height(vh);
            panel.init(&self.env, &self.model, now);
        }
        self.container_height = self.measure(vh);
        for panel in &mut self.panels {
            panel.ready();
        }
        self.initialized = true;
        tracing::info!(
            panels = self.panels.len(),
            container_height = self.container_height,
            "story ready"
        );
        self.update(&UpdateParams::new(Trigger::Init, now))
    }

    /// Runs one update over the panels selected by `params`.
    pub fn update(&mut self, params: &UpdateParams) -> UpdateReport {
        let mut report = UpdateReport::default();
        if !self.initialized {
            tracing::warn!(trigger = ?params.trigger, "update before init ignored");
            return report;
        }
        let vh = self.env.visible_height();
        for panel in &mut self.panels {
            panel.set_height(vh);
        }
        self.container_height = self.measure(vh);

        for panel in &mut self.panels {
            let tag = panel.tag();
            if let Some(tags) = &params.matches {
                if !panel.matches(tags) {
                    tracing::trace!(panel = tag.as_str(), "skipped by filter");
                    continue;
                }
            }
            report.updated.push(tag);
            if let Some(transition) = panel.update(params, &self.env, &self.model) {
                tracing::debug!(
                    panel = tag.as_str(),
                    from = transition.from,
                    to = transition.to,
                    scroll_y = self.env.scroll_y,
                    "state changed"
                );
                report.transitions.push((tag, transition));
            }
        }
        report
    }

    /// Replaces the environment with `env`, then runs one update.
    pub fn update_in(&mut self, env: Environment, params: &UpdateParams) -> UpdateReport {
        self.env = env;
        self.update(params)
    }

    /// Applies a host event at host time `now`.
    pub fn handle_event(&mut self, event: HostEvent, now: f64) -> UpdateReport {
        match event {
            HostEvent::Scroll { y } => {
                self.env.scroll_y = y;
                self.update(&UpdateParams::new(Trigger::Scroll, now))
            }
            HostEvent::Resize { viewport } => {
                tracing::debug!(width = viewport.width, height = viewport.height, "resized");
                self.env.viewport = viewport;
                self.update(&UpdateParams::new(Trigger::Resize, now))
            }
            HostEvent::PointerMove { position } => {
                let hovered = self.hit_test(position, now);
                UpdateReport {
                    hover_changed: self.model.set_hovered(hovered),
                    ..UpdateReport::default()
                }
            }
            HostEvent::PointerLeave => UpdateReport {
                hover_changed: self.model.set_hovered(None),
                ..UpdateReport::default()
            },
        }
    }

    /// Selects data row `index` and updates the panels that draw it.
    pub fn select(&mut self, index: usize, now: f64) -> Result<UpdateReport, StoryError> {
        Ok(match self.model.select(index, now)? {
            Some(params) => self.update(&params),
            None => UpdateReport::default(),
        })
    }

    /// Scroll length of the story.
    #[must_use]
    pub fn container_height(&self) -> f64 {
        self.container_height
    }

    /// Scroll indicator marks of every panel, top to bottom.
    #[must_use]
    pub fn markers(&self) -> Vec<Marker> {
        let mut markers: Vec<Marker> = self
            .panels
            .iter()
            .flat_map(|panel| {
                let tag = panel.tag();
                panel
                    .top_points(&self.env, self.container_height)
                    .into_iter()
                    .map(move |p| Marker {
                        tag,
                        display_point: p.display_point,
                        on_point: p.on_point,
                        major: p.major,
                        reached: p.on_point.is_some_and(|on| self.env.scroll_y >= on),
                    })
            })
            .collect();
        markers.sort_by(|a, b| a.display_point.total_cmp(&b.display_point));
        markers
    }

    /// Samples every panel at host time `now`.
    #[must_use]
    pub fn render(&self, now: f64) -> Frame {
        Frame {
            time: now,
            scroll_y: self.env.scroll_y,
            container_height: self.container_height,
            viewport: self.env.viewport,
            scenes: self
                .panels
                .iter()
                .map(|p| (p.tag(), p.render(&self.env, &self.model, now)))
                .collect(),
            markers: self.markers(),
            hovered: self.model.hovered(),
        }
    }

    /// The shared model.
    #[must_use]
    pub fn model(&self) -> &StoryModel {
        &self.model
    }

    /// The environment as of the last event.
    #[must_use]
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Current state name of panel `tag`.
    #[must_use]
    pub fn state_of(&self, tag: PanelTag) -> Option<&'static str> {
        self.panels
            .iter()
            .find(|p| p.tag() == tag)
            .map(|p| p.state_name())
    }

    fn measure(&self, vh: f64) -> f64 {
        self.panels.iter().map(|p| p.content_height()).sum::<f64>() + vh
    }

    fn hit_test(&self, position: Point, now: f64) -> Option<usize> {
        self.panels
            .iter()
            .find_map(|p| p.hit_test(position, &self.env, &self.model, now))
    }
}

#[cfg(test)]
mod tests {
    use scrolly_projection::{Feature, FeatureCollection};
    use scrolly_threshold::Transition;

    use super::*;
    use crate::model::DataRow;
    use crate::panel::TopPoint;

    #[derive(Debug, Default)]
    struct Probe {
        updates: usize,
        ready: bool,
    }

    impl Panel for Probe {
        fn tag(&self) -> PanelTag {
            PanelTag::new("probe")
        }

        fn state_name(&self) -> &'static str {
            if self.ready { "ready" } else { "new" }
        }

        fn top_points(&self, _env: &Environment, _container_height: f64) -> Vec<TopPoint> {
            vec![TopPoint {
                display_point: 10.0,
                on_point: Some(5.0),
                major: false,
            }]
        }

        fn init(&mut self, _env: &Environment, _model: &StoryModel, _now: f64) {}

        fn ready(&mut self) {
            self.ready = true;
        }

        fn set_height(&mut self, _viewport_height: f64) {}

        fn update(
            &mut self,
            _params: &UpdateParams,
            _env: &Environment,
            _model: &StoryModel,
        ) -> Option<PanelTransition> {
            self.updates += 1;
            (self.updates == 1).then(|| Transition::new("new", "ready"))
        }

        fn content_height(&self) -> f64 {
            100.0
        }

        fn render(&self, env: &Environment, _model: &StoryModel, _now: f64) -> Scene {
            Scene::builder(env.viewport).build()
        }
    }

    fn model() -> StoryModel {
        let features = FeatureCollection::new(vec![Feature::new("a", vec![vec![Point::ZERO]])]);
        let rows = vec![DataRow {
            id: "r".into(),
            current_rating: 1.0,
            percents: vec![1.0],
        }];
        StoryModel::new(features, rows).unwrap()
    }

    #[test]
    fn init_readies_then_updates() {
        let mut story = Orchestrator::new(model()).with_panel(Probe::default());
        let env = Environment::new(Size::new(300.0, 200.0)).with_scroll(20.0);
        let report = story.init(env, 0.0);

        assert_eq!(story.state_of(PanelTag::new("probe")), Some("ready"));
        assert_eq!(
            report.transition_for(PanelTag::new("probe")),
            Some(Transition::new("new", "ready"))
        );
        assert_eq!(story.container_height(), 300.0);

        let markers = story.markers();
        assert_eq!(markers.len(), 1);
        assert!(markers[0].reached, "scrolled past the on point");
    }

    #[test]
    fn updates_before_init_are_ignored() {
        let mut story = Orchestrator::new(model()).with_panel(Probe::default());
        let report = story.handle_event(HostEvent::Scroll { y: 10.0 }, 0.0);
        assert!(report.updated.is_empty(), "not initialized");
    }

    #[test]
    fn update_in_replaces_the_environment() {
        let mut story = Orchestrator::new(model()).with_panel(Probe::default());
        story.init(Environment::new(Size::new(300.0, 200.0)), 0.0);
        let env = Environment::new(Size::new(300.0, 400.0)).with_scroll(50.0);
        story.update_in(env, &UpdateParams::new(Trigger::Resize, 1.0));
        assert_eq!(story.env().scroll_y, 50.0);
        assert_eq!(story.container_height(), 500.0);
    }

    #[test]
    fn filtered_updates_skip_other_panels() {
        let mut story = Orchestrator::new(model()).with_panel(Probe::default());
        story.init(Environment::new(Size::new(300.0, 200.0)), 0.0);
        let report = story.update(&UpdateParams::new(Trigger::Scroll, 1.0).only([PanelTag::MAP]));
        assert!(!report.was_updated(PanelTag::new("probe")), "filtered out");
    }
}
