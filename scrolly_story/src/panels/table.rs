// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Size};
use peniko::Color;
use scrolly_scene::{Caption, Group, Node, RectNode, Scene};
use scrolly_threshold::{Threshold, ThresholdError, ThresholdMachine, Transition};
use scrolly_timing::{Animated, Timing};

use crate::config::StoryConfig;
use crate::env::{ByOrientation, Dims, Environment};
use crate::event::{PanelTag, Trigger, UpdateParams};
use crate::model::StoryModel;
use crate::panel::{Panel, PanelTransition, TopPoint};

/// States of the [`TablePanel`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TableState {
    /// Before the first update.
    PageLoad,
    /// Fully visible.
    On,
    /// Cell text faded out.
    FadeText,
    /// Table hidden.
    Off,
}

impl TableState {
    /// State name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PageLoad => "pageload",
            Self::On => "on",
            Self::FadeText => "fadetext",
            Self::Off => "off",
        }
    }
}

const DIMS: ByOrientation<Dims> = ByOrientation {
    landscape: Dims::new(0.5, 0.7, 0.6),
    portrait: Dims::new(0.9, 0.7, 0.6),
};

/// Header row followed by one column per displayed field.
const COLUMNS: [&str; 2] = ["ID", "currentRating"];

/// Columns whose text is also drawn into the reveal mask.
const MASKED_COLUMNS: usize = 2;

const CAPTION: (&str, f64, f64) = ("Data looks lame at first glance.", 0.15, 0.25);

const HEADER_FILL: Color = Color::from_rgb8(245, 113, 67);
const CONTENT_FILL: Color = Color::from_rgb8(255, 255, 255);
const CONTENT_OPACITY: f64 = 0.2;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct TableLayout {
    left: f64,
    size: Size,
    rows: usize,
}

/// The data table that opens the story.
///
/// Its text fades early, leaving the colored grid, and the whole table fades
/// away shortly before the bar appears.
#[derive(Debug)]
pub struct TablePanel {
    machine: ThresholdMachine<TableState, Environment>,
    config: StoryConfig,
    content_height: f64,
    layout: TableLayout,
    table_opacity: Animated<f64>,
    text_opacity: Animated<f64>,
    mask_opacity: Animated<f64>,
}

fn dims(env: &Environment) -> Dims {
    DIMS.get(env.orientation())
}

fn fade_text_point(env: &Environment) -> f64 {
    env.visible_height() * (dims(env).top - 0.35)
}

fn off_point(env: &Environment) -> f64 {
    env.visible_height() * (dims(env).top - 0.15)
}

impl TablePanel {
    /// Creates the panel.
    pub fn new(config: &StoryConfig) -> Result<Self, ThresholdError> {
        let machine = ThresholdMachine::new(vec![
            Threshold::baseline(TableState::On),
            Threshold::at(TableState::FadeText, fade_text_point),
            Threshold::at(TableState::Off, off_point),
        ])?
        .with_initial_state(TableState::PageLoad);
        Ok(Self {
            machine,
            config: config.clone(),
            content_height: 0.0,
            layout: TableLayout::default(),
            table_opacity: Animated::new(0.0),
            text_opacity: Animated::new(1.0),
            mask_opacity: Animated::new(1.0),
        })
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> TableState {
        *self.machine.current()
    }

    /// Opacity of the whole table at `now`.
    #[must_use]
    pub fn opacity_at(&self, now: f64) -> f64 {
        self.table_opacity.value_at(now)
    }

    /// Opacity of the cell text at `now`.
    #[must_use]
    pub fn text_opacity_at(&self, now: f64) -> f64 {
        self.text_opacity.value_at(now)
    }

    /// Opacity of the masked text at `now`.
    #[must_use]
    pub fn mask_opacity_at(&self, now: f64) -> f64 {
        self.mask_opacity.value_at(now)
    }

    /// Caption opacity: fades linearly to zero over the first quarter viewport.
    #[must_use]
    pub fn caption_opacity(env: &Environment) -> f64 {
        let zero_point = CAPTION.2 * env.visible_height();
        let remaining = zero_point - env.scroll_y;
        if remaining < 0.0 || zero_point <= 0.0 {
            return 0.0;
        }
        (remaining / zero_point).min(1.0)
    }

    /// Box of the cell in `column`, for content row `row` or the header when
    /// `row` is `None`, relative to the table's top edge.
    #[must_use]
    pub fn cell_rect(&self, column: usize, row: Option<usize>) -> Rect {
        let TableLayout { left, size, rows } = self.layout;
        let cell = Size::new(
            size.width / COLUMNS.len() as f64,
            size.height / rows.max(1) as f64,
        );
        let r = row.map_or(-1.0, |r| r as f64);
        Rect::from_origin_size(
            Point::new(left + cell.width * column as f64, cell.height * r),
            cell,
        )
    }

    fn relayout(&mut self, env: &Environment, model: &StoryModel) {
        let dims = dims(env);
        let size = Size::new(
            env.width() * dims.width,
            env.visible_height() * dims.height,
        );
        self.layout = TableLayout {
            left: (env.width() - size.width) / 2.0,
            size,
            rows: model.rows().len(),
        };
    }

    fn cell_text(
        &self,
        column: usize,
        row: Option<usize>,
        text: String,
        class: &str,
        opacity: f64,
    ) -> Node {
        let cell = self.cell_rect(column, row);
        Caption::new(
            class,
            text,
            Point::new(cell.x0 + cell.width() * 0.1, cell.y0 + cell.height() * 0.5),
            opacity,
        )
        .into()
    }
}

impl Panel for TablePanel {
    fn tag(&self) -> PanelTag {
        PanelTag::TABLE
    }

    fn state_name(&self) -> &'static str {
        self.state().as_str()
    }

    fn top_points(&self, env: &Environment, _container_height: f64) -> Vec<TopPoint> {
        vec![TopPoint {
            display_point: env.visible_height() * CAPTION.2,
            on_point: Some(0.0),
            major: true,
        }]
    }

    fn init(&mut self, env: &Environment, model: &StoryModel, _now: f64) {
        self.relayout(env, model);
    }

    fn set_height(&mut self, viewport_height: f64) {
        self.content_height = viewport_height * self.config.table_height_ratio;
    }

    fn update(
        &mut self,
        params: &UpdateParams,
        env: &Environment,
        model: &StoryModel,
    ) -> Option<PanelTransition> {
        let now = params.time;
        let update = self.machine.compute_state(env.scroll_y, env);
        let hidden = update.state == TableState::Off;

        if update.changed() || params.trigger == Trigger::Resize {
            self.relayout(env, model);
            let text = if env.scroll_y >= fade_text_point(env) {
                0.0
            } else {
                1.0
            };
            self.text_opacity.animate_to(text, now, Timing::default());
            self.table_opacity.animate_to(
                if hidden { 0.0 } else { 1.0 },
                now,
                Timing::new(self.config.table_fade_ms),
            );
        }

        if update.changed() {
            let fade = self.config.table_fade_ms;
            if hidden {
                self.mask_opacity.animate_to(0.0, now, Timing::new(fade));
            } else {
                self.mask_opacity
                    .animate_to(1.0, now, Timing::new(fade).with_delay(fade));
            }
        }

        update
            .transition
            .map(|t| Transition::new(t.from.as_str(), t.to.as_str()))
    }

    fn content_height(&self) -> f64 {
        self.content_height
    }

    fn render(&self, env: &Environment, model: &StoryModel, now: f64) -> Scene {
        let text_opacity = self.text_opacity.value_at(now);
        let mask_opacity = self.mask_opacity.value_at(now);
        let TableLayout { left, size, .. } = self.layout;

        let mut header = Group::new(Affine::IDENTITY).with_class("table-header-row");
        for (c, name) in COLUMNS.iter().enumerate() {
            let text = (*name).to_owned();
            header = header
                .with_child(
                    RectNode::new(self.cell_rect(c, None), HEADER_FILL).with_class("table-header"),
                )
                .with_child(self.cell_text(c, None, text, "table-header-text", text_opacity));
        }

        let mut rows = Group::new(Affine::IDENTITY).with_class("table-rows").with_child(
            RectNode::new(Rect::from_origin_size((left, 0.0), size), CONTENT_FILL)
                .with_opacity(CONTENT_OPACITY)
                .with_class("table-content-background"),
        );
        let mut mask = Group::new(Affine::IDENTITY)
            .with_opacity(mask_opacity)
            .with_class("table-mask");
        for (r, row) in model.rows().iter().enumerate() {
            let values = [row.id.clone(), row.current_rating.to_string()];
            let mut cells = Group::new(Affine::IDENTITY).with_class("row-group");
            for (c, value) in values.into_iter().enumerate() {
                if c < MASKED_COLUMNS {
                    let masked = self.cell_text(c, Some(r), value.clone(), "table-mask-text", 1.0);
                    mask = mask.with_child(masked);
                }
                cells = cells
                    .with_child(
                        RectNode::new(self.cell_rect(c, Some(r)), Color::TRANSPARENT)
                            .with_class("table-row"),
                    )
                    .with_child(self.cell_text(
                        c,
                        Some(r),
                        value,
                        "table-row-text",
                        text_opacity,
                    ));
            }
            rows = rows.with_child(cells);
        }

        let table = Group::new(Affine::translate((0.0, dims(env).top * env.visible_height())))
            .with_opacity(self.table_opacity.value_at(now))
            .with_class("table")
            .with_child(header)
            .with_child(rows)
            .with_child(mask);

        let (text, caption_left, caption_top) = CAPTION;
        let caption = Group::new(Affine::IDENTITY)
            .pinned(true)
            .with_class("captions")
            .with_child(Caption::new(
                "caption",
                text,
                Point::new(env.width() * caption_left, env.visible_height() * caption_top),
                Self::caption_opacity(env),
            ));

        let mut scene = Scene::builder(Size::new(env.width(), self.content_height));
        scene.push(table).push(caption);
        scene.build()
    }
}
