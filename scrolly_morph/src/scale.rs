// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Continuous and band scales for laying out bars.

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `round`

/// Maps a continuous domain linearly onto a range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
    clamp: bool,
    round: bool,
}

impl LinearScale {
    /// Creates a scale mapping `domain` onto `range`.
    #[must_use]
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain,
            range,
            clamp: false,
            round: false,
        }
    }

    /// Clamps inputs outside the domain to the range ends.
    #[must_use]
    pub fn clamped(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    /// Rounds outputs to the nearest integer.
    #[must_use]
    pub fn rounded(mut self, round: bool) -> Self {
        self.round = round;
        self
    }

    /// Replaces the output range.
    pub fn set_range(&mut self, range: (f64, f64)) {
        self.range = range;
    }

    /// The input domain.
    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// The output range.
    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Maps `x` from the domain onto the range.
    ///
    /// A collapsed domain maps everything to the middle of the range.
    #[must_use]
    pub fn apply(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let span = d1 - d0;
        let mut t = if span == 0.0 { 0.5 } else { (x - d0) / span };
        if self.clamp {
            t = t.clamp(0.0, 1.0);
        }
        let (r0, r1) = self.range;
        let y = r0 + (r1 - r0) * t;
        if self.round { y.round() } else { y }
    }
}

/// Splits a range into equal bands, one per key.
///
/// Padding is a fraction of the step: inner padding separates bands, outer
/// padding sits before the first and after the last. Leftover space is split
/// evenly on both ends.
#[derive(Clone, Debug, PartialEq)]
pub struct BandScale<K> {
    keys: Vec<K>,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
    step: f64,
    start: f64,
}

impl<K: PartialEq> BandScale<K> {
    /// Creates a band scale over `keys` with no padding.
    pub fn new(keys: Vec<K>, range: (f64, f64)) -> Self {
        let mut scale = Self {
            keys,
            range,
            padding_inner: 0.0,
            padding_outer: 0.0,
            step: 0.0,
            start: 0.0,
        };
        scale.rescale();
        scale
    }

    /// Sets inner and outer padding to the same fraction.
    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding_inner = padding.clamp(0.0, 1.0);
        self.padding_outer = padding.max(0.0);
        self.rescale();
        self
    }

    /// Replaces the output range.
    pub fn set_range(&mut self, range: (f64, f64)) {
        self.range = range;
        self.rescale();
    }

    /// The keys, in band order.
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// Distance between the starts of adjacent bands.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Width of each band.
    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.step * (1.0 - self.padding_inner)
    }

    /// Start of the band for `key`, or `None` for unknown keys.
    pub fn position(&self, key: &K) -> Option<f64> {
        let i = self.keys.iter().position(|k| k == key)?;
        Some(self.start + self.step * i as f64)
    }

    fn rescale(&mut self) {
        let n = self.keys.len() as f64;
        let (r0, r1) = self.range;
        let (lo, hi) = if r1 < r0 { (r1, r0) } else { (r0, r1) };
        self.step = (hi - lo) / (n - self.padding_inner + self.padding_outer * 2.0).max(1.0);
        self.start = lo + (hi - lo - self.step * (n - self.padding_inner)) * 0.5;
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn linear_maps_and_clamps() {
        let scale = LinearScale::new((0.0, 7_500.0), (0.0, 300.0));
        assert_eq!(scale.apply(3_750.0), 150.0);
        assert_eq!(scale.apply(15_000.0), 600.0);

        let clamped = scale.clamped(true);
        assert_eq!(clamped.apply(15_000.0), 300.0);
        assert_eq!(clamped.apply(-1.0), 0.0);
    }

    #[test]
    fn linear_rounds_when_asked() {
        let scale = LinearScale::new((0.0, 3.0), (0.0, 100.0)).rounded(true);
        assert_eq!(scale.apply(1.0), 33.0);
        assert_eq!(scale.apply(2.0), 67.0);
    }

    #[test]
    fn collapsed_domain_maps_to_middle() {
        let scale = LinearScale::new((5.0, 5.0), (10.0, 20.0));
        assert_eq!(scale.apply(123.0), 15.0);
    }

    #[test]
    fn band_without_padding_tiles_range() {
        let scale = BandScale::new(vec!["a", "b", "c", "d"], (0.0, 100.0));
        assert_eq!(scale.step(), 25.0);
        assert_eq!(scale.bandwidth(), 25.0);
        assert_eq!(scale.position(&"a"), Some(0.0));
        assert_eq!(scale.position(&"d"), Some(75.0));
        assert_eq!(scale.position(&"z"), None);
    }

    #[test]
    fn band_with_padding_is_centered() {
        let scale = BandScale::new(vec![1, 2], (0.0, 100.0)).with_padding(0.05);
        // step = 100 / (2 - 0.05 + 0.1)
        let step = 100.0 / 2.05;
        assert!((scale.step() - step).abs() < 1e-9);
        assert!((scale.bandwidth() - step * 0.95).abs() < 1e-9);
        let first = scale.position(&1).unwrap();
        let last = scale.position(&2).unwrap();
        // Leftover space is symmetric.
        assert!((first - (100.0 - (last + scale.bandwidth()))).abs() < 1e-9);
    }

    #[test]
    fn band_range_can_be_updated() {
        let mut scale = BandScale::new(vec!['x'], (0.0, 10.0));
        scale.set_range((0.0, 40.0));
        assert_eq!(scale.bandwidth(), 40.0);
    }
}
