// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reading GeoJSON features and table rows.

use std::fs;
use std::path::Path;

use kurbo::Point;
use scrolly_projection::{Feature, FeatureCollection, Ring};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::DataError;
use crate::model::{DataRow, id_from_value};

#[derive(Deserialize)]
struct RawCollection {
    features: Vec<RawFeature>,
}

#[derive(Deserialize)]
struct RawFeature {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    properties: Option<Map<String, Value>>,
    #[serde(default)]
    geometry: Option<RawGeometry>,
}

#[derive(Deserialize)]
struct RawGeometry {
    #[serde(rename = "type")]
    kind: String,
    coordinates: Value,
}

type Position = Vec<f64>;

impl RawFeature {
    fn into_feature(self, index: usize) -> Result<Feature, DataError> {
        let id = self
            .id
            .as_ref()
            .and_then(id_from_value)
            .or_else(|| {
                self.properties
                    .as_ref()
                    .and_then(|p| p.get("id"))
                    .and_then(id_from_value)
            })
            .ok_or(DataError::MissingId { index })?;
        let Some(geometry) = self.geometry else {
            return Err(DataError::EmptyGeometry { id });
        };

        let polygons: Vec<Vec<Vec<Position>>> = match geometry.kind.as_str() {
            "Polygon" => vec![serde_json::from_value(geometry.coordinates)?],
            "MultiPolygon" => serde_json::from_value(geometry.coordinates)?,
            _ => {
                return Err(DataError::UnsupportedGeometry {
                    id,
                    kind: geometry.kind,
                });
            }
        };

        // Holes are not drawn; only outer rings take part in the morph.
        let mut parts = Vec::with_capacity(polygons.len());
        for polygon in polygons {
            let Some(outer) = polygon.into_iter().next() else {
                continue;
            };
            parts.push(to_ring(&outer).ok_or_else(|| DataError::Coordinate { id: id.clone() })?);
        }
        if parts.is_empty() {
            return Err(DataError::EmptyGeometry { id });
        }
        Ok(Feature::new(id, parts))
    }
}

/// Converts positions to a ring, closing it if the last position does not
/// repeat the first.
fn to_ring(positions: &[Position]) -> Option<Ring> {
    let mut ring: Ring = positions
        .iter()
        .map(|p| match p.as_slice() {
            [lon, lat, ..] => Some(Point::new(*lon, *lat)),
            _ => None,
        })
        .collect::<Option<_>>()?;
    if let (Some(&first), Some(&last)) = (ring.first(), ring.last()) {
        if first != last {
            ring.push(first);
        }
    }
    Some(ring)
}

/// Parses a GeoJSON `FeatureCollection`.
///
/// Each feature needs an `id` (string or number), either at the top level or
/// under `properties`, and a `Polygon` or `MultiPolygon` geometry. Only the
/// outer ring of each polygon is kept.
pub fn parse_features(json: &str) -> Result<FeatureCollection, DataError> {
    let raw: RawCollection = serde_json::from_str(json)?;
    raw.features
        .into_iter()
        .enumerate()
        .map(|(index, f)| f.into_feature(index))
        .collect()
}

/// Parses a JSON array of `{"ID", "currentRating", "percents"}` rows.
pub fn parse_rows(json: &str) -> Result<Vec<DataRow>, DataError> {
    Ok(serde_json::from_str(json)?)
}

/// Reads and parses a GeoJSON file.
pub fn load_features(path: impl AsRef<Path>) -> Result<FeatureCollection, DataError> {
    let path = path.as_ref();
    let features = parse_features(&fs::read_to_string(path)?)?;
    tracing::info!(path = %path.display(), count = features.len(), "loaded features");
    Ok(features)
}

/// Reads and parses a rows file.
pub fn load_rows(path: impl AsRef<Path>) -> Result<Vec<DataRow>, DataError> {
    let path = path.as_ref();
    let rows = parse_rows(&fs::read_to_string(path)?)?;
    tracing::info!(path = %path.display(), count = rows.len(), "loaded rows");
    Ok(rows)
}
