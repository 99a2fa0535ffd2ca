// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use scrolly_projection::FeatureCollection;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::StoryError;
use crate::event::{PanelTag, Trigger, UpdateParams};

/// One row of the table: a rating and how it splits across features.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataRow {
    /// Row identifier, shown in the table and used as the bar's band key.
    #[serde(rename = "ID", deserialize_with = "deserialize_id")]
    pub id: String,
    /// Total value; sets the bar length.
    #[serde(rename = "currentRating")]
    pub current_rating: f64,
    /// Share of the total per feature, in feature order.
    pub percents: Vec<f64>,
}

impl DataRow {
    /// Share for feature `index`, or `0` when the row has no entry for it.
    #[must_use]
    pub fn percent(&self, index: usize) -> f64 {
        self.percents.get(index).copied().unwrap_or(0.0)
    }

    /// Largest share, or `0` for an empty row.
    #[must_use]
    pub fn max_percent(&self) -> f64 {
        self.percents.iter().copied().fold(0.0, f64::max)
    }
}

pub(crate) fn id_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn deserialize_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    id_from_value(&value).ok_or_else(|| serde::de::Error::custom("expected a string or numeric id"))
}

/// Everything the panels draw from: features, rows, and what the reader is
/// pointing at.
#[derive(Clone, Debug)]
pub struct StoryModel {
    features: FeatureCollection,
    rows: Vec<DataRow>,
    selected: usize,
    hovered: Option<usize>,
}

impl StoryModel {
    /// Creates a model with the first row selected.
    ///
    /// Rows whose `percents` length differs from the feature count are kept;
    /// missing shares read as zero.
    pub fn new(features: FeatureCollection, rows: Vec<DataRow>) -> Result<Self, StoryError> {
        if features.is_empty() {
            return Err(StoryError::NoFeatures);
        }
        if rows.is_empty() {
            return Err(StoryError::NoRows);
        }
        for row in &rows {
            if row.percents.len() != features.len() {
                tracing::warn!(
                    row = %row.id,
                    percents = row.percents.len(),
                    features = features.len(),
                    "row shares do not line up with features"
                );
            }
        }
        Ok(Self {
            features,
            rows,
            selected: 0,
            hovered: None,
        })
    }

    /// The features, in drawing order.
    #[must_use]
    pub fn features(&self) -> &FeatureCollection {
        &self.features
    }

    /// The rows, in table order.
    #[must_use]
    pub fn rows(&self) -> &[DataRow] {
        &self.rows
    }

    /// Index of the selected row.
    #[must_use]
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// The selected row.
    #[must_use]
    pub fn selected_row(&self) -> &DataRow {
        &self.rows[self.selected]
    }

    /// Row ids in table order.
    #[must_use]
    pub fn row_ids(&self) -> Vec<String> {
        self.rows.iter().map(|r| r.id.clone()).collect()
    }

    /// Selects row `index`.
    ///
    /// Returns the update that notifies the panels drawing the selection, or
    /// `None` when `index` was already selected.
    pub fn select(&mut self, index: usize, now: f64) -> Result<Option<UpdateParams>, StoryError> {
        if index >= self.rows.len() {
            return Err(StoryError::UnknownRow {
                index,
                len: self.rows.len(),
            });
        }
        if index == self.selected {
            return Ok(None);
        }
        self.selected = index;
        Ok(Some(
            UpdateParams::new(Trigger::BarSelected, now).only([PanelTag::MAP]),
        ))
    }

    /// Index of the feature under the pointer.
    #[must_use]
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Records the feature under the pointer. Returns `true` if it changed.
    pub fn set_hovered(&mut self, hovered: Option<usize>) -> bool {
        let changed = self.hovered != hovered;
        self.hovered = hovered;
        changed
    }
}
