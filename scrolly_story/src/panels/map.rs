// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The bar chart that turns into a choropleth map.

use kurbo::{Affine, Point, Size, Vec2};
use peniko::Color;
use scrolly_morph::{
    BandScale, LinearScale, MorphPath, choropleth_opacity, rectangle_path, region_path,
    region_vertex_count, stacked_segments,
};
use scrolly_projection::{ConicEqualArea, FeatureCollection, Projection, VerticalAlign, fit};
use scrolly_scene::{Caption, Group, Node, PathNode, Scene};
use scrolly_threshold::{Threshold, ThresholdError, ThresholdMachine, Transition};
use scrolly_timing::{Animated, Timing};

use crate::config::StoryConfig;
use crate::env::{ByOrientation, Dims, Environment};
use crate::event::{PanelTag, Trigger, UpdateParams};
use crate::model::StoryModel;
use crate::panel::{Panel, PanelTransition, TopPoint};

/// States of the [`MapPanel`], in scroll order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MapState {
    /// A single bar scrolling into view.
    Off,
    /// The bar split into one segment per feature.
    Splitbar,
    /// Segments morphed into regions; the map is pinned.
    Focused,
    /// The pinned map responds to the pointer.
    Hover,
    /// The map scrolls away with the document.
    Done,
}

impl MapState {
    /// State name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Splitbar => "splitbar",
            Self::Focused => "focused",
            Self::Hover => "hover",
            Self::Done => "done",
        }
    }

    /// Whether regions are drawn as a map rather than as bar segments.
    #[must_use]
    pub fn is_map(self) -> bool {
        matches!(self, Self::Focused | Self::Hover | Self::Done)
    }
}

const BAR_DIMS: ByOrientation<Dims> = ByOrientation {
    landscape: Dims::new(0.7, 0.7, 0.1),
    portrait: Dims::new(0.9, 0.7, 0.1),
};

const MAP_DIMS: ByOrientation<Dims> = ByOrientation {
    landscape: Dims::new(0.7, 0.6, 0.35),
    portrait: Dims::new(0.9, 0.5, 0.5),
};

/// Opacity of the visible part of a bar segment; extra parts stay hidden.
const BAR_OPACITY: f64 = 0.6;

/// Caption text, left and top as viewport fractions.
const CAPTIONS: [(&str, f64, f64); 3] = [
    ("What if you could", 0.05, 0.15),
    ("see the big picture?", 0.05, 0.23),
    ("clarify the details?", 0.05, 0.23),
];

/// Scroll distance, in viewport heights, over which captions fade once done.
const CAPTION_FADE: f64 = 0.15;

const REGION_FILL: Color = Color::from_rgb8(245, 113, 67);

fn dims(env: &Environment, state: MapState) -> Dims {
    let table = if state.is_map() { MAP_DIMS } else { BAR_DIMS };
    table.get(env.orientation())
}

#[derive(Clone, Debug)]
struct PartShape {
    path: Animated<MorphPath>,
    opacity: Animated<f64>,
}

impl PartShape {
    fn new() -> Self {
        Self {
            path: Animated::new(MorphPath::default()),
            opacity: Animated::new(0.0),
        }
    }

    fn show(&mut self, path: MorphPath, opacity: f64, now: f64, timing: Option<Timing>) {
        match timing {
            Some(timing) => {
                self.path.animate_to(path, now, timing);
                self.opacity.animate_to(opacity, now, timing);
            }
            None => {
                self.path.set(path);
                self.opacity.set(opacity);
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct PinChange {
    at: f64,
    top: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Layout {
    chart: Size,
    center_left: f64,
}

/// The bar chart / choropleth panel.
///
/// Scrolling down, the selected row's bar appears, splits into one segment
/// per feature, and each segment morphs into its region on a fitted map.
/// Every segment is built with exactly as many vertices as the region ring it
/// becomes, so the morph is a plain vertex-wise interpolation.
#[derive(Debug)]
pub struct MapPanel {
    machine: ThresholdMachine<MapState, Environment>,
    config: StoryConfig,
    content_height: f64,
    selected: Option<usize>,
    x_scale: LinearScale,
    y_scale: BandScale<String>,
    layout: Layout,
    regions: Vec<Vec<PartShape>>,
    opacity: Animated<f64>,
    top: Animated<f64>,
    translate_cause: Option<Transition<MapState>>,
    pinned: bool,
    pending_pin: Option<PinChange>,
    projection: Option<(Size, ConicEqualArea)>,
}

impl MapPanel {
    /// Creates the panel with the scroll points and timings of `config`.
    pub fn new(config: &StoryConfig) -> Result<Self, ThresholdError> {
        let t = config.map_triggers;
        let machine = ThresholdMachine::new(vec![
            Threshold::baseline(MapState::Off),
            Threshold::at(MapState::Splitbar, move |env: &Environment| {
                env.visible_height() * t.splitbar
            }),
            Threshold::at(MapState::Focused, move |env: &Environment| {
                env.visible_height() * t.focused
            }),
            Threshold::at(MapState::Hover, move |env: &Environment| {
                env.visible_height() * t.hover
            }),
            Threshold::at(MapState::Done, move |env: &Environment| {
                env.visible_height() * t.done
            }),
        ])?;
        Ok(Self {
            machine,
            config: config.clone(),
            content_height: 0.0,
            selected: None,
            x_scale: LinearScale::new((0.0, config.red_threshold * 1.5), (0.0, 0.0))
                .clamped(true)
                .rounded(true),
            y_scale: BandScale::new(Vec::new(), (0.0, 0.0)),
            layout: Layout::default(),
            regions: Vec::new(),
            opacity: Animated::new(0.0),
            top: Animated::new(0.0),
            translate_cause: None,
            pinned: false,
            pending_pin: None,
            projection: None,
        })
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> MapState {
        *self.machine.current()
    }

    /// Whether the map is anchored to the viewport at `now`.
    #[must_use]
    pub fn is_pinned(&self, now: f64) -> bool {
        self.placement(now).0
    }

    /// Vertical offset of the map group at `now`.
    ///
    /// Viewport coordinates while pinned, panel coordinates otherwise.
    #[must_use]
    pub fn top_at(&self, now: f64) -> f64 {
        self.placement(now).1
    }

    /// Drawn outline of part `part` of feature `feature` at `now`.
    #[must_use]
    pub fn shape_at(&self, feature: usize, part: usize, now: f64) -> Option<MorphPath> {
        self.regions
            .get(feature)?
            .get(part)
            .map(|p| p.path.value_at(now))
    }

    /// Opacity of part `part` of feature `feature` at `now`.
    #[must_use]
    pub fn shape_opacity_at(&self, feature: usize, part: usize, now: f64) -> Option<f64> {
        self.regions
            .get(feature)?
            .get(part)
            .map(|p| p.opacity.value_at(now))
    }

    /// Opacity of the whole map group at `now`.
    #[must_use]
    pub fn opacity_at(&self, now: f64) -> f64 {
        self.opacity.value_at(now)
    }

    /// Opacities of the three captions.
    ///
    /// Hidden while the bar shows; the first two in `Focused`; the first and
    /// third in `Hover`; after `Done` the visible ones fade out over 15% of a
    /// viewport of scrolling.
    #[must_use]
    pub fn caption_opacities(&self, env: &Environment) -> [f64; 3] {
        match self.state() {
            MapState::Off | MapState::Splitbar => [0.0; 3],
            MapState::Focused => [1.0, 1.0, 0.0],
            MapState::Hover => [1.0, 0.0, 1.0],
            MapState::Done => {
                let fade_start = self
                    .machine
                    .trigger_point(&MapState::Done, env)
                    .unwrap_or(0.0);
                let span = env.visible_height() * CAPTION_FADE;
                let remaining = fade_start + span - env.scroll_y;
                if remaining < 0.0 || span <= 0.0 {
                    return [0.0; 3];
                }
                let fading = (remaining / span).min(1.0);
                [fading, 0.0, fading]
            }
        }
    }

    fn placement(&self, now: f64) -> (bool, f64) {
        match self.pending_pin {
            Some(pin) if now >= pin.at => (true, pin.top),
            _ => (self.pinned, self.top.value_at(now)),
        }
    }

    fn apply_pending_pin(&mut self, now: f64) {
        if let Some(pin) = self.pending_pin.filter(|pin| now >= pin.at) {
            self.pinned = true;
            self.top.set(pin.top);
            self.pending_pin = None;
        }
    }

    fn relayout(&mut self, env: &Environment) {
        let dims = dims(env, self.state());
        let chart = Size::new(
            env.width() * dims.width,
            env.visible_height() * dims.height,
        );
        self.layout = Layout {
            chart,
            center_left: (env.width() - chart.width) / 2.0,
        };
        self.x_scale.set_range((0.0, chart.width));
        self.y_scale.set_range((0.0, chart.height));
    }

    fn top_position(&self, env: &Environment, cause: Option<&Transition<MapState>>) -> f64 {
        let state = self.state();
        let vh = env.visible_height();
        let fixed_top = vh * dims(env, state).top;
        match state {
            MapState::Off => fixed_top - (vh - env.scroll_y),
            MapState::Splitbar => fixed_top,
            _ if self.arriving(cause) => fixed_top + env.scroll_y - env.container_top,
            MapState::Done => {
                let done = self
                    .machine
                    .trigger_point(&MapState::Done, env)
                    .unwrap_or(0.0);
                fixed_top + done - env.container_top
            }
            _ => fixed_top,
        }
    }

    fn translate(
        &mut self,
        transition: Option<&Transition<MapState>>,
        env: &Environment,
        now: f64,
    ) {
        match transition {
            None => {
                if self.top.is_active(now) {
                    // Keep sliding toward a target that follows the scroll.
                    let target = self.top_position(env, self.translate_cause.as_ref());
                    self.top.retarget(target, now);
                } else {
                    self.top.set(self.top_position(env, None));
                }
            }
            Some(t) if matches!(t.to, MapState::Hover | MapState::Done) => {
                // Pinning switches coordinate spaces, so jump rather than slide.
                self.pinned = t.to == MapState::Hover;
                self.pending_pin = None;
                self.top.set(self.top_position(env, Some(t)));
            }
            Some(t) => {
                let focused_top = env.visible_height() * dims(env, MapState::Focused).top;
                if self.pinned && t.from.is_map() && !t.to.is_map() {
                    // Unpin first, at the same on-screen position.
                    self.top
                        .set(focused_top + env.scroll_y - env.container_top);
                    self.pinned = false;
                }
                let duration = self.config.translate_duration_ms;
                self.top
                    .animate_to(self.top_position(env, Some(t)), now, Timing::new(duration));
                self.translate_cause = Some(*t);
                self.pending_pin = self.arriving(Some(t)).then_some(PinChange {
                    at: now + duration,
                    top: focused_top,
                });
            }
        }
    }

    /// Whether `cause` slides an unpinned map into the focused position.
    fn arriving(&self, cause: Option<&Transition<MapState>>) -> bool {
        !self.pinned && cause.is_some_and(|t| t.to == MapState::Focused)
    }

    fn fitted_projection(&mut self, features: &FeatureCollection) -> Option<ConicEqualArea> {
        let target = self.layout.chart;
        if let Some((size, projection)) = &self.projection {
            if *size == target {
                return Some(projection.clone());
            }
        }
        match fit(&ConicEqualArea::albers(), features, target, VerticalAlign::Top) {
            Ok(projection) => {
                tracing::debug!(
                    width = target.width,
                    height = target.height,
                    scale = projection.scale(),
                    "fitted map projection"
                );
                self.projection = Some((target, projection.clone()));
                Some(projection)
            }
            Err(err) => {
                tracing::warn!(%err, "cannot fit map; keeping previous shapes");
                None
            }
        }
    }

    fn draw(&mut self, model: &StoryModel, now: f64, transition: Option<&Transition<MapState>>) {
        if self.state().is_map() {
            self.draw_map(model, now, transition);
        } else {
            self.draw_bar(model, now, transition);
        }
    }

    fn draw_bar(
        &mut self,
        model: &StoryModel,
        now: f64,
        transition: Option<&Transition<MapState>>,
    ) {
        let features = model.features().features();
        let row = model.selected_row();
        let percents: Vec<f64> = (0..features.len()).map(|i| row.percent(i)).collect();
        let segments = stacked_segments(
            self.layout.center_left,
            self.y_scale.position(&row.id).unwrap_or(0.0),
            self.y_scale.bandwidth(),
            self.x_scale.apply(row.current_rating),
            &percents,
        );
        // Segments leave the map one after another; other moves are in unison.
        let stagger = transition.is_some_and(|t| t.involves(&MapState::Focused));
        let (duration, step) = (self.config.morph_duration_ms, self.config.morph_stagger_ms);

        for (i, ((feature, parts), segment)) in
            features.iter().zip(&mut self.regions).zip(segments).enumerate()
        {
            let delay = if stagger { i as f64 * step } else { 0.0 };
            let timing = transition.map(|_| Timing::new(duration).with_delay(delay));
            for (j, (ring, part)) in feature.parts().iter().zip(parts.iter_mut()).enumerate() {
                let count = region_vertex_count(ring);
                let path = rectangle_path(segment.origin(), segment.size(), count);
                let opacity = if j == 0 { BAR_OPACITY } else { 0.0 };
                part.show(path, opacity, now, timing);
            }
        }
    }

    fn draw_map(
        &mut self,
        model: &StoryModel,
        now: f64,
        transition: Option<&Transition<MapState>>,
    ) {
        let Some(projection) = self.fitted_projection(model.features()) else {
            return;
        };
        let offset = Vec2::new(self.layout.center_left, 0.0);
        let row = model.selected_row();
        let max = row.max_percent();
        let (duration, step) = (self.config.morph_duration_ms, self.config.morph_stagger_ms);

        for (i, (feature, parts)) in model
            .features()
            .features()
            .iter()
            .zip(&mut self.regions)
            .enumerate()
        {
            let opacity = choropleth_opacity(row.percent(i), max);
            let timing =
                transition.map(|_| Timing::new(duration).with_delay(i as f64 * step));
            for (ring, part) in feature.parts().iter().zip(parts.iter_mut()) {
                let path = region_path(ring, |p| projection.project(p) + offset);
                part.show(path, opacity, now, timing);
            }
        }
    }
}

impl Panel for MapPanel {
    fn tag(&self) -> PanelTag {
        PanelTag::MAP
    }

    fn state_name(&self) -> &'static str {
        self.state().as_str()
    }

    fn top_points(&self, env: &Environment, _container_height: f64) -> Vec<TopPoint> {
        let vh = env.visible_height();
        let trigger = |state| self.machine.trigger_point(&state, env);
        let mark = |state, major| {
            let on_point = trigger(state);
            TopPoint {
                display_point: on_point.unwrap_or(0.0) + vh * dims(env, state).top,
                on_point,
                major,
            }
        };
        vec![
            TopPoint {
                display_point: env.container_top + vh * dims(env, MapState::Splitbar).top,
                on_point: trigger(MapState::Splitbar),
                major: false,
            },
            mark(MapState::Focused, true),
            mark(MapState::Hover, true),
        ]
    }

    fn init(&mut self, env: &Environment, model: &StoryModel, now: f64) {
        self.y_scale =
            BandScale::new(model.row_ids(), (0.0, 0.0)).with_padding(self.config.band_padding);
        self.regions = model
            .features()
            .features()
            .iter()
            .map(|f| f.parts().iter().map(|_| PartShape::new()).collect())
            .collect();
        self.selected = Some(model.selected_index());
        self.relayout(env);
        self.top.set(self.top_position(env, None));
        self.draw(model, now, None);
    }

    fn set_height(&mut self, viewport_height: f64) {
        self.content_height = viewport_height * self.config.map_height_ratio;
    }

    fn update(
        &mut self,
        params: &UpdateParams,
        env: &Environment,
        model: &StoryModel,
    ) -> Option<PanelTransition> {
        let now = params.time;
        let update = self.machine.compute_state(env.scroll_y, env);
        let reselected = self.selected != Some(model.selected_index());
        if reselected {
            tracing::debug!(
                from = ?self.selected,
                to = model.selected_index(),
                "map selection changed"
            );
            self.selected = Some(model.selected_index());
        }

        self.apply_pending_pin(now);
        self.relayout(env);
        self.translate(update.transition.as_ref(), env, now);

        if let Some(t) = &update.transition {
            let fade = if t.to == MapState::Off {
                (0.0, Timing::new(self.config.map_fade_out_ms))
            } else {
                (
                    1.0,
                    Timing::new(self.config.map_fade_in_ms)
                        .with_delay(self.config.map_fade_in_delay_ms),
                )
            };
            self.opacity.animate_to(fade.0, now, fade.1);

            if t.involves(&MapState::Hover) || t.involves(&MapState::Done) {
                self.draw(model, now, None);
            } else {
                self.draw(model, now, Some(t));
            }
        } else if reselected || params.trigger == Trigger::Resize {
            self.draw(model, now, None);
        }

        update
            .transition
            .map(|t| Transition::new(t.from.as_str(), t.to.as_str()))
    }

    fn content_height(&self) -> f64 {
        self.content_height
    }

    fn hit_test(
        &self,
        position: Point,
        _env: &Environment,
        _model: &StoryModel,
        now: f64,
    ) -> Option<usize> {
        if self.state() != MapState::Hover {
            return None;
        }
        let (_, top) = self.placement(now);
        let local = Point::new(position.x + 1.0, position.y - top);
        self.regions
            .iter()
            .position(|parts| parts.iter().any(|p| p.path.value_at(now).contains(local)))
    }

    fn render(&self, env: &Environment, model: &StoryModel, now: f64) -> Scene {
        let (pinned, top) = self.placement(now);
        let class = if self.state().is_map() {
            "map-choro"
        } else {
            "map-bar"
        };

        let regions = model
            .features()
            .features()
            .iter()
            .zip(&self.regions)
            .map(|(feature, parts)| {
                Node::from(
                    Group::new(Affine::IDENTITY)
                        .with_class(format!("path-group {}", feature.id()))
                        .with_children(parts.iter().map(|p| {
                            Node::from(
                                PathNode::new(p.path.value_at(now).to_bez_path(), REGION_FILL)
                                    .with_opacity(p.opacity.value_at(now))
                                    .with_class(class),
                            )
                        })),
                )
            });
        let map = Group::new(Affine::translate((-1.0, top)))
            .with_opacity(self.opacity.value_at(now))
            .pinned(pinned)
            .with_class("map")
            .with_children(regions);

        let vh = env.visible_height();
        let captions = Group::new(Affine::IDENTITY)
            .pinned(true)
            .with_class("captions")
            .with_children(CAPTIONS.iter().zip(self.caption_opacities(env)).map(
                |(&(text, left, top), opacity)| {
                    Node::from(Caption::new(
                        "caption",
                        text,
                        Point::new(env.width() * left, vh * top),
                        opacity,
                    ))
                },
            ));

        let mut scene = Scene::builder(Size::new(env.width(), self.content_height));
        scene.push(map).push(captions);
        scene.build()
    }
}
