// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Size};
use scrolly_scene::{Caption, Group, Scene};
use scrolly_threshold::{Threshold, ThresholdError, ThresholdMachine, Transition};

use crate::config::StoryConfig;
use crate::env::Environment;
use crate::event::{PanelTag, UpdateParams};
use crate::model::StoryModel;
use crate::panel::{Panel, PanelTransition, TopPoint};

/// States of the [`FinalPanel`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FinalState {
    /// Hidden.
    Off,
    /// Shown.
    On,
}

impl FinalState {
    /// State name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::On => "on",
        }
    }
}

/// Overlay shown once the reader reaches the end of the story.
#[derive(Debug)]
pub struct FinalPanel {
    machine: ThresholdMachine<FinalState, Environment>,
    text: Option<String>,
}

impl FinalPanel {
    /// Creates the panel, appearing at `config.final_on_point` viewports.
    pub fn new(config: &StoryConfig) -> Result<Self, ThresholdError> {
        let on_point = config.final_on_point;
        let machine = ThresholdMachine::new(vec![
            Threshold::baseline(FinalState::Off),
            Threshold::at(FinalState::On, move |env: &Environment| {
                env.visible_height() * on_point
            }),
        ])?;
        Ok(Self {
            machine,
            text: None,
        })
    }

    /// Sets the closing text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> FinalState {
        *self.machine.current()
    }

    /// Shown or hidden, without a fade.
    #[must_use]
    pub fn opacity(&self) -> f64 {
        match self.state() {
            FinalState::On => 1.0,
            FinalState::Off => 0.0,
        }
    }
}

impl Panel for FinalPanel {
    fn tag(&self) -> PanelTag {
        PanelTag::FINAL
    }

    fn state_name(&self) -> &'static str {
        self.state().as_str()
    }

    fn top_points(&self, env: &Environment, container_height: f64) -> Vec<TopPoint> {
        let vh = env.visible_height();
        vec![TopPoint {
            display_point: container_height - vh / 3.0,
            on_point: self.machine.trigger_point(&FinalState::On, env),
            major: true,
        }]
    }

    fn init(&mut self, _env: &Environment, _model: &StoryModel, _now: f64) {}

    fn set_height(&mut self, _viewport_height: f64) {}

    fn update(
        &mut self,
        _params: &UpdateParams,
        env: &Environment,
        _model: &StoryModel,
    ) -> Option<PanelTransition> {
        self.machine
            .compute_state(env.scroll_y, env)
            .transition
            .map(|t| Transition::new(t.from.as_str(), t.to.as_str()))
    }

    fn render(&self, env: &Environment, _model: &StoryModel, _now: f64) -> Scene {
        let vh = env.visible_height();
        let mut group = Group::new(Affine::IDENTITY)
            .with_opacity(self.opacity())
            .pinned(true)
            .with_class("final");
        if let Some(text) = &self.text {
            group = group.with_child(Caption::new(
                "final-text",
                text.as_str(),
                Point::new(env.width() * 0.5, vh * 0.5),
                1.0,
            ));
        }
        let mut scene = Scene::builder(Size::new(env.width(), vh));
        scene.push(group);
        scene.build()
    }
}

#[cfg(test)]
mod tests {
    use scrolly_projection::{Feature, FeatureCollection};

    use super::*;
    use crate::event::Trigger;
    use crate::model::DataRow;

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
    fn appears_at_its_point_without_fading() {
        let m = model();
        let mut panel = FinalPanel::new(&StoryConfig::default())
            .unwrap()
            .with_text("fin");
        let params = UpdateParams::new(Trigger::Scroll, 0.0);
        let env = Environment::new(Size::new(400.0, 300.0));

        assert_eq!(panel.update(&params, &env.with_scroll(1_100.0), &m), None);
        assert_eq!(panel.opacity(), 0.0);
        assert_eq!(
            panel.update(&params, &env.with_scroll(1_200.0), &m),
            Some(Transition::new("off", "on"))
        );
        assert_eq!(panel.opacity(), 1.0);

        let scene = panel.render(&env, &m, 0.0);
        assert_eq!(scene.find_class("final-text").count(), 1);
    }

    #[test]
    fn mark_sits_a_third_of_a_viewport_from_the_end() {
        let panel = FinalPanel::new(&StoryConfig::default()).unwrap();
        let env = Environment::new(Size::new(400.0, 300.0));
        let points = panel.top_points(&env, 1_500.0);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].display_point, 1_400.0);
        assert_eq!(points[0].on_point, Some(1_200.0));
    }
}
