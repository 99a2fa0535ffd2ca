// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Easing curve applied to linear progress.
///
/// All curves map `0 → 0` and `1 → 1`; input is clamped to `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Easing {
    /// Identity.
    Linear,
    /// Quadratic ease in and out.
    QuadInOut,
    /// Cubic ease in and out.
    #[default]
    CubicInOut,
}

impl Easing {
    /// Applies the curve to `t`.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::QuadInOut => {
                let t = t * 2.0;
                if t <= 1.0 {
                    t * t / 2.0
                } else {
                    let t = t - 1.0;
                    (t * (2.0 - t) + 1.0) / 2.0
                }
            }
            Self::CubicInOut => {
                let t = t * 2.0;
                if t <= 1.0 {
                    t * t * t / 2.0
                } else {
                    let t = t - 2.0;
                    (t * t * t + 2.0) / 2.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Easing;

    const ALL: [Easing; 3] = [Easing::Linear, Easing::QuadInOut, Easing::CubicInOut];

    #[test]
    fn endpoints_are_fixed() {
        for e in ALL {
            assert_eq!(e.apply(0.0), 0.0, "{e:?}");
            assert_eq!(e.apply(1.0), 1.0, "{e:?}");
            assert!((e.apply(0.5) - 0.5).abs() < 1e-12, "{e:?}");
        }
    }

    #[test]
    fn input_is_clamped() {
        for e in ALL {
            assert_eq!(e.apply(-3.0), 0.0, "{e:?}");
            assert_eq!(e.apply(7.0), 1.0, "{e:?}");
        }
    }

    #[test]
    fn in_out_curves_are_monotonic_and_symmetric() {
        for e in [Easing::QuadInOut, Easing::CubicInOut] {
            let mut prev = 0.0;
            for i in 1..=100 {
                let t = f64::from(i) / 100.0;
                let v = e.apply(t);
                assert!(v >= prev, "{e:?} not monotonic at {t}");
                assert!((v + e.apply(1.0 - t) - 1.0).abs() < 1e-12, "{e:?} asymmetric at {t}");
                prev = v;
            }
        }
    }

    #[test]
    fn cubic_starts_slower_than_quad() {
        assert!(Easing::CubicInOut.apply(0.2) < Easing::QuadInOut.apply(0.2));
    }
}
