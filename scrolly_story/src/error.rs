// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::{fmt, io};

use scrolly_threshold::ThresholdError;

/// Error while reading story data or configuration.
#[derive(Debug)]
pub enum DataError {
    /// The file could not be read.
    Io(io::Error),
    /// The input is not valid JSON or does not have the expected shape.
    Json(serde_json::Error),
    /// A feature has neither an `id` nor a `properties.id`.
    MissingId {
        /// Position of the feature in the collection.
        index: usize,
    },
    /// A feature has no geometry or its geometry has no rings.
    EmptyGeometry {
        /// Feature id.
        id: String,
    },
    /// A feature's geometry is neither `Polygon` nor `MultiPolygon`.
    UnsupportedGeometry {
        /// Feature id.
        id: String,
        /// The GeoJSON geometry type found.
        kind: String,
    },
    /// A position has fewer than two numbers.
    Coordinate {
        /// Feature id.
        id: String,
    },
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read data: {err}"),
            Self::Json(err) => write!(f, "malformed data: {err}"),
            Self::MissingId { index } => write!(f, "feature {index} has no id"),
            Self::EmptyGeometry { id } => write!(f, "feature {id:?} has no polygon rings"),
            Self::UnsupportedGeometry { id, kind } => {
                write!(f, "feature {id:?} has unsupported geometry type {kind:?}")
            }
            Self::Coordinate { id } => {
                write!(f, "feature {id:?} has a position with fewer than two numbers")
            }
        }
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for DataError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Error while assembling or driving a story.
#[derive(Debug)]
pub enum StoryError {
    /// Loading data failed.
    Data(DataError),
    /// A panel declared an invalid threshold list.
    Threshold(ThresholdError),
    /// The feature collection is empty.
    NoFeatures,
    /// There are no data rows.
    NoRows,
    /// A configured scroll point can never be reached.
    ///
    /// Points are in viewport heights and must satisfy `min < point <= max`:
    /// above the previous state's point and within the story's scroll length.
    UnreachableState {
        /// Panel the state belongs to.
        panel: &'static str,
        /// State name.
        state: &'static str,
        /// Configured scroll point.
        point: f64,
        /// Exclusive lower bound.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
    },
    /// A row index is out of range.
    UnknownRow {
        /// Requested index.
        index: usize,
        /// Number of rows.
        len: usize,
    },
}

impl fmt::Display for StoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Data(err) => err.fmt(f),
            Self::Threshold(err) => write!(f, "invalid panel thresholds: {err}"),
            Self::NoFeatures => f.write_str("the story needs at least one feature"),
            Self::NoRows => f.write_str("the story needs at least one data row"),
            Self::UnreachableState {
                panel,
                state,
                point,
                min,
                max,
            } => write!(
                f,
                "{panel} state {state:?} at {point} viewport heights is unreachable; \
                 it must be above {min} and at most {max}"
            ),
            Self::UnknownRow { index, len } => {
                write!(f, "row {index} does not exist (there are {len} rows)")
            }
        }
    }
}

impl std::error::Error for StoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Data(err) => Some(err),
            Self::Threshold(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DataError> for StoryError {
    fn from(err: DataError) -> Self {
        Self::Data(err)
    }
}

impl From<ThresholdError> for StoryError {
    fn from(err: ThresholdError) -> Self {
        Self::Threshold(err)
    }
}
