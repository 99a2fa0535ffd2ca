// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;
use smallvec::SmallVec;

/// A polygon ring in `(longitude, latitude)` degrees.
///
/// Rings follow GeoJSON conventions: the first coordinate is repeated as the
/// last one to close the ring.
pub type Ring = Vec<Point>;

/// A geographic region: a stable id and one or more outer rings.
///
/// Most regions have a single ring; multi-part regions (islands) carry one
/// ring per part.
#[derive(Clone, Debug, PartialEq)]
pub struct Feature {
    id: String,
    parts: SmallVec<[Ring; 1]>,
}

impl Feature {
    /// Creates a feature from its id and outer rings.
    pub fn new(id: impl Into<String>, parts: impl IntoIterator<Item = Ring>) -> Self {
        Self {
            id: id.into(),
            parts: parts.into_iter().collect(),
        }
    }

    /// Stable identifier, used to join the feature to a data row.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Outer rings, one per part.
    #[must_use]
    pub fn parts(&self) -> &[Ring] {
        &self.parts
    }

    /// Iterates over every coordinate of every ring.
    pub fn coordinates(&self) -> impl Iterator<Item = Point> + '_ {
        self.parts.iter().flat_map(|ring| ring.iter().copied())
    }
}

/// An ordered set of features.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeatureCollection {
    features: Vec<Feature>,
}

impl FeatureCollection {
    /// Creates a collection, keeping the given order.
    #[must_use]
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    /// The features, in order.
    #[must_use]
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Number of features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the collection has no features.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Looks up a feature by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Feature> {
        self.features.iter().find(|f| f.id == id)
    }

    /// Iterates over every coordinate of every feature.
    pub fn coordinates(&self) -> impl Iterator<Item = Point> + '_ {
        self.features.iter().flat_map(Feature::coordinates)
    }
}

impl FromIterator<Feature> for FeatureCollection {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        Self {
            features: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn lookup_by_id() {
        let a = Feature::new("a", vec![vec![Point::new(0.0, 0.0)]]);
        let b = Feature::new("b", vec![vec![Point::new(1.0, 1.0)], vec![Point::new(2.0, 2.0)]]);
        let collection: FeatureCollection = [a, b].into_iter().collect();

        assert_eq!(collection.len(), 2);
        assert_eq!(collection.get("b").map(|f| f.parts().len()), Some(2));
        assert!(collection.get("c").is_none(), "unknown ids are not found");
        assert_eq!(collection.coordinates().count(), 3);
    }
}
