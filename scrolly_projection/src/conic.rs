// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conic equal-area projection.

use core::f64::consts::{PI, TAU};

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `sin`, `cos`, `sqrt`
use kurbo::Point;

const EPSILON: f64 = 1e-6;

/// A map projection with a uniform scale and a screen-space translation.
///
/// Input points are `(longitude, latitude)` in degrees. Output points are in a
/// y-down drawing space where north is up.
pub trait Projection {
    /// Projects a geographic coordinate onto the drawing plane.
    fn project(&self, lon_lat: Point) -> Point;

    /// Current scale factor.
    fn scale(&self) -> f64;

    /// Sets the scale factor.
    fn set_scale(&mut self, scale: f64);

    /// Screen position of the projection center.
    fn translate(&self) -> Point;

    /// Sets the screen position of the projection center.
    fn set_translate(&mut self, translate: Point);
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Raw {
    Conic { n: f64, c: f64, r0: f64 },
    // Degenerate case for parallels symmetric about the equator.
    Cylindrical { cos_phi0: f64 },
}

impl Raw {
    fn from_parallels(phi0: f64, phi1: f64) -> Self {
        let sy0 = phi0.sin();
        let n = (sy0 + phi1.sin()) / 2.0;
        if n.abs() < EPSILON {
            return Self::Cylindrical {
                cos_phi0: phi0.cos(),
            };
        }
        let c = 1.0 + sy0 * (2.0 * n - sy0);
        Self::Conic {
            n,
            c,
            r0: c.sqrt() / n,
        }
    }

    fn project(self, lambda: f64, phi: f64) -> Point {
        match self {
            Self::Conic { n, c, r0 } => {
                let r = (c - 2.0 * n * phi.sin()).max(0.0).sqrt() / n;
                let a = lambda * n;
                Point::new(r * a.sin(), r0 - r * a.cos())
            }
            Self::Cylindrical { cos_phi0 } => Point::new(lambda * cos_phi0, phi.sin() / cos_phi0),
        }
    }
}

/// Albers-style conic equal-area projection.
///
/// Configured by two standard parallels, a longitudinal rotation, a center
/// (in rotated coordinates), a scale and a translation. The center projects
/// to the translation point.
#[derive(Clone, Debug, PartialEq)]
pub struct ConicEqualArea {
    parallels: (f64, f64),
    rotate: f64,
    center: Point,
    scale: f64,
    translate: Point,
    raw: Raw,
    raw_center: Point,
}

impl ConicEqualArea {
    /// Creates a projection with the given standard parallels, in degrees.
    ///
    /// Rotation and center start at zero, scale at `150` and translation at
    /// `(480, 250)`.
    #[must_use]
    pub fn new(parallels: (f64, f64)) -> Self {
        let raw = Raw::from_parallels(parallels.0.to_radians(), parallels.1.to_radians());
        Self {
            parallels,
            rotate: 0.0,
            center: Point::ZERO,
            scale: 150.0,
            translate: Point::new(480.0, 250.0),
            raw,
            raw_center: raw.project(0.0, 0.0),
        }
    }

    /// The conventional equal-area projection of the contiguous United States.
    ///
    /// Parallels 29.5° and 45.5°, rotated by 96°, centered at
    /// `(-0.6, 38.7)`, scale `1070`, translation `(480, 250)`.
    #[must_use]
    pub fn albers() -> Self {
        Self::new((29.5, 45.5))
            .with_rotate(96.0)
            .with_center(Point::new(-0.6, 38.7))
            .with_scale(1070.0)
            .with_translate(Point::new(480.0, 250.0))
    }

    /// Sets the longitudinal rotation in degrees, added to every longitude.
    #[must_use]
    pub fn with_rotate(mut self, degrees: f64) -> Self {
        self.rotate = degrees;
        self
    }

    /// Sets the center, in rotated `(longitude, latitude)` degrees.
    #[must_use]
    pub fn with_center(mut self, center: Point) -> Self {
        self.center = center;
        self.raw_center = self
            .raw
            .project(center.x.to_radians(), center.y.to_radians());
        self
    }

    /// Sets the scale factor.
    #[must_use]
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the translation.
    #[must_use]
    pub fn with_translate(mut self, translate: Point) -> Self {
        self.translate = translate;
        self
    }

    /// Standard parallels, in degrees.
    #[must_use]
    pub fn parallels(&self) -> (f64, f64) {
        self.parallels
    }

    /// Longitudinal rotation, in degrees.
    #[must_use]
    pub fn rotate(&self) -> f64 {
        self.rotate
    }

    /// Center in rotated coordinates, in degrees.
    #[must_use]
    pub fn center(&self) -> Point {
        self.center
    }
}

impl Projection for ConicEqualArea {
    fn project(&self, lon_lat: Point) -> Point {
        let lambda = wrap_longitude((lon_lat.x + self.rotate).to_radians());
        let phi = lon_lat.y.to_radians();
        let p = self.raw.project(lambda, phi);
        Point::new(
            self.translate.x + self.scale * (p.x - self.raw_center.x),
            self.translate.y - self.scale * (p.y - self.raw_center.y),
        )
    }

    fn scale(&self) -> f64 {
        self.scale
    }

    fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
    }

    fn translate(&self) -> Point {
        self.translate
    }

    fn set_translate(&mut self, translate: Point) {
        self.translate = translate;
    }
}

fn wrap_longitude(lambda: f64) -> f64 {
    if lambda > PI {
        lambda - TAU
    } else if lambda < -PI {
        lambda + TAU
    } else {
        lambda
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point, b: Point) -> bool {
        (a - b).hypot() < 1e-9
    }

    #[test]
    fn albers_center_lands_on_translate() {
        let p = ConicEqualArea::albers();
        // Center is given in rotated coordinates; undo the 96° rotation.
        let at = p.project(Point::new(-96.6, 38.7));
        assert!(close(at, Point::new(480.0, 250.0)), "{at:?}");
    }

    #[test]
    fn north_is_up_and_east_is_right() {
        let p = ConicEqualArea::albers();
        let denver = p.project(Point::new(-105.0, 39.7));
        let north = p.project(Point::new(-105.0, 45.0));
        let east = p.project(Point::new(-95.0, 39.7));
        assert!(north.y < denver.y, "north should be higher on screen");
        assert!(east.x > denver.x, "east should be further right");
    }

    #[test]
    fn scale_is_uniform_about_translate() {
        let p = ConicEqualArea::albers();
        let q = p.clone().with_scale(2_140.0);
        let t = p.translate();
        let a = p.project(Point::new(-80.0, 30.0));
        let b = q.project(Point::new(-80.0, 30.0));
        assert!(close(t + (a - t) * 2.0, b), "{a:?} vs {b:?}");
    }

    #[test]
    fn set_translate_shifts_everything() {
        let mut p = ConicEqualArea::albers();
        let before = p.project(Point::new(-120.0, 47.0));
        p.set_translate(p.translate() + kurbo::Vec2::new(10.0, -5.0));
        let after = p.project(Point::new(-120.0, 47.0));
        assert!(close(after, before + kurbo::Vec2::new(10.0, -5.0)), "{after:?}");
    }

    #[test]
    fn longitudes_wrap_after_rotation() {
        assert!((wrap_longitude(1.5 * PI) + PI / 2.0).abs() < 1e-12, "wraps down");
        assert!((wrap_longitude(-1.5 * PI) - PI / 2.0).abs() < 1e-12, "wraps up");
        assert_eq!(wrap_longitude(1.0), 1.0);
    }

    #[test]
    fn symmetric_parallels_fall_back_to_cylindrical() {
        let p = ConicEqualArea::new((-20.0, 20.0));
        assert!(matches!(p.raw, Raw::Cylindrical { .. }), "{:?}", p.raw);
        let a = p.project(Point::new(10.0, 0.0));
        let b = p.project(Point::new(20.0, 0.0));
        assert!((a.y - b.y).abs() < 1e-12, "parallels project to horizontal lines");
    }
}
