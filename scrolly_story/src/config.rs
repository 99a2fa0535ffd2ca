// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DataError, StoryError};

/// Scroll points and animation timings of a story.
///
/// Scroll points are multiples of the viewport height. Every field has a
/// default, so a config file only lists what it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoryConfig {
    /// Scroll length of the table, in viewport heights.
    pub table_height_ratio: f64,
    /// Scroll length of the map, in viewport heights.
    pub map_height_ratio: f64,
    /// Where the map changes state.
    pub map_triggers: MapTriggers,
    /// Where the closing panel appears.
    pub final_on_point: f64,
    /// Rating at which a bar is considered high; the bar axis spans 1.5 times this.
    pub red_threshold: f64,
    /// Padding between bars, as a fraction of the band step.
    pub band_padding: f64,
    /// Extra delay per feature when morphing, in milliseconds.
    pub morph_stagger_ms: f64,
    /// Duration of a bar/map morph.
    pub morph_duration_ms: f64,
    /// Duration of the map's vertical slide between positions.
    pub translate_duration_ms: f64,
    /// Delay before the map fades in.
    pub map_fade_in_delay_ms: f64,
    /// Duration of the map fade-in.
    pub map_fade_in_ms: f64,
    /// Duration of the map fade-out.
    pub map_fade_out_ms: f64,
    /// Duration of table fades.
    pub table_fade_ms: f64,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            table_height_ratio: 2.0,
            map_height_ratio: 2.0,
            map_triggers: MapTriggers::default(),
            final_on_point: 4.0,
            red_threshold: 5_000.0,
            band_padding: 0.05,
            morph_stagger_ms: 20.0,
            morph_duration_ms: 1_000.0,
            translate_duration_ms: 1_000.0,
            map_fade_in_delay_ms: 500.0,
            map_fade_in_ms: 500.0,
            map_fade_out_ms: 200.0,
            table_fade_ms: 500.0,
        }
    }
}

impl StoryConfig {
    /// Parses a JSON config; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DataError> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Largest scroll offset of a story built from this config, in viewport
    /// heights.
    #[must_use]
    pub fn scroll_length(&self) -> f64 {
        self.table_height_ratio + self.map_height_ratio
    }

    /// Checks that scrolling can reach every configured state.
    ///
    /// Map triggers must be positive and strictly increasing, and every
    /// trigger must lie within [`scroll_length`](Self::scroll_length).
    pub fn validate(&self) -> Result<(), StoryError> {
        let max = self.scroll_length();
        let t = self.map_triggers;
        let mut min = 0.0;
        for (state, point) in [
            ("splitbar", t.splitbar),
            ("focused", t.focused),
            ("hover", t.hover),
            ("done", t.done),
        ] {
            check_point("map", state, point, min, max)?;
            min = point;
        }
        check_point("final", "on", self.final_on_point, 0.0, max)
    }
}

fn check_point(
    panel: &'static str,
    state: &'static str,
    point: f64,
    min: f64,
    max: f64,
) -> Result<(), StoryError> {
    if point > min && point <= max {
        Ok(())
    } else {
        Err(StoryError::UnreachableState {
            panel,
            state,
            point,
            min,
            max,
        })
    }
}

/// Scroll points of the map's states, in viewport heights.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapTriggers {
    /// Bars split into per-feature segments.
    pub splitbar: f64,
    /// Bars morph into the map.
    pub focused: f64,
    /// The map is pinned and responds to the pointer.
    pub hover: f64,
    /// The map scrolls away.
    pub done: f64,
}

impl Default for MapTriggers {
    fn default() -> Self {
        Self {
            splitbar: 1.0,
            focused: 1.3,
            hover: 1.7,
            done: 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config =
            StoryConfig::from_json(r#"{"red_threshold": 100, "map_triggers": {"done": 2.5}}"#)
                .unwrap();
        assert_eq!(config.red_threshold, 100.0);
        assert_eq!(config.map_triggers.done, 2.5);
        assert_eq!(config.map_triggers.focused, 1.3);
        assert_eq!(config.morph_duration_ms, 1_000.0);
    }

    #[test]
    fn defaults_are_reachable() {
        let config = StoryConfig::default();
        assert_eq!(config.scroll_length(), 4.0);
        assert!(config.validate().is_ok(), "default story");
    }

    #[test]
    fn final_point_past_the_end_is_rejected() {
        let config = StoryConfig::from_json(r#"{"final_on_point": 4.5}"#).unwrap();
        assert!(matches!(
            config.validate(),
            Err(StoryError::UnreachableState {
                panel: "final",
                state: "on",
                max,
                ..
            }) if max == 4.0
        ));
    }

    #[test]
    fn map_triggers_must_increase() {
        let config =
            StoryConfig::from_json(r#"{"map_triggers": {"focused": 1.8, "hover": 1.7}}"#).unwrap();
        assert!(matches!(
            config.validate(),
            Err(StoryError::UnreachableState { state: "hover", min, .. }) if min == 1.8
        ));

        let config = StoryConfig::from_json(r#"{"map_triggers": {"splitbar": 0}}"#).unwrap();
        assert!(matches!(
            config.validate(),
            Err(StoryError::UnreachableState { state: "splitbar", .. })
        ));

        let config = StoryConfig::from_json(r#"{"map_height_ratio": 0.5}"#).unwrap();
        assert!(matches!(
            config.validate(),
            Err(StoryError::UnreachableState { panel: "final", max, .. }) if max == 2.5
        ));
    }

    #[test]
    fn unknown_shape_is_an_error() {
        assert!(StoryConfig::from_json("[1, 2]").is_err());
    }
}
