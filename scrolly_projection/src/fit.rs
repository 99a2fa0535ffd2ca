// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fitting a projection so that a feature collection fills a target box.

use core::fmt;

use kurbo::{Point, Rect, Size, Vec2};

use crate::conic::Projection;
use crate::geo::FeatureCollection;

/// Vertical placement of the fitted map inside the target box.
///
/// The map is always centered horizontally.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VerticalAlign {
    /// Top edge of the projected bounds at `y = 0`.
    #[default]
    Top,
    /// Projected bounds centered vertically in the target box.
    Center,
}

/// Error returned by [`fit`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FitError {
    /// The collection has no coordinates to fit.
    EmptyCollection,
    /// The target box has a non-positive or non-finite dimension.
    InvalidTarget(Size),
    /// The projected bounds have zero width and height.
    DegenerateBounds,
}

impl fmt::Display for FitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCollection => f.write_str("cannot fit an empty feature collection"),
            Self::InvalidTarget(size) => write!(
                f,
                "cannot fit into a {}x{} box",
                size.width, size.height
            ),
            Self::DegenerateBounds => f.write_str("projected features have zero extent"),
        }
    }
}

impl core::error::Error for FitError {}

/// Projected bounding box of every coordinate in `collection`.
///
/// Returns `None` when the collection has no coordinates.
pub fn bounds<P: Projection + ?Sized>(
    collection: &FeatureCollection,
    projection: &P,
) -> Option<Rect> {
    let mut coords = collection.coordinates().map(|c| projection.project(c));
    let first = coords.next()?;
    Some(coords.fold(Rect::from_points(first, first), |r, p| r.union_pt(p)))
}

/// Rescales and re-translates `reference` so that `collection` fits in a box
/// of size `target`.
///
/// The scale is first chosen so the projected width equals `target.width`. If
/// the resulting height overflows `target.height`, the scale is chosen from
/// the height instead. The result is centered horizontally and placed
/// vertically per `align`.
///
/// Each step re-projects the whole collection; the fit is not incremental and
/// should be recomputed whenever `target` changes.
pub fn fit<P: Projection + Clone>(
    reference: &P,
    collection: &FeatureCollection,
    target: Size,
    align: VerticalAlign,
) -> Result<P, FitError> {
    if !(target.width > 0.0 && target.height > 0.0 && target.is_finite()) {
        return Err(FitError::InvalidTarget(target));
    }
    let reference_bounds = bounds(collection, reference).ok_or(FitError::EmptyCollection)?;
    let reference_scale = reference.scale();
    let (w, h) = (reference_bounds.width(), reference_bounds.height());
    if w <= 0.0 && h <= 0.0 {
        return Err(FitError::DegenerateBounds);
    }

    let mut projection = reference.clone();
    let mut fitted = None;
    if w > 0.0 {
        projection.set_scale(reference_scale * target.width / w);
        fitted = bounds(collection, &projection).filter(|b| b.height() <= target.height);
    }
    let fitted = match fitted {
        Some(b) => b,
        None => {
            projection.set_scale(reference_scale * target.height / h);
            bounds(collection, &projection).ok_or(FitError::EmptyCollection)?
        }
    };

    let dx = (target.width - fitted.width()) / 2.0 - fitted.x0;
    let dy = match align {
        VerticalAlign::Top => -fitted.y0,
        VerticalAlign::Center => (target.height - fitted.height()) / 2.0 - fitted.y0,
    };
    let translate: Point = projection.translate() + Vec2::new(dx, dy);
    projection.set_translate(translate);
    Ok(projection)
}
