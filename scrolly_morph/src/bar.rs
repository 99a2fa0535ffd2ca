// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::Rect;

use crate::scale::LinearScale;

/// Lays out a stacked horizontal bar.
///
/// Segment `i` is `total_width * percents[i]` wide and starts where segment
/// `i - 1` ended; the first starts at `left`. Percentages are independent
/// proportions of `total_width` and need not sum to one.
pub fn stacked_segments(
    left: f64,
    top: f64,
    band: f64,
    total_width: f64,
    percents: &[f64],
) -> Vec<Rect> {
    let mut next_left = left;
    percents
        .iter()
        .map(|p| {
            let width = total_width * p;
            let rect = Rect::new(next_left, top, next_left + width, top + band);
            next_left += width;
            rect
        })
        .collect()
}

/// Fill opacity of a choropleth region.
///
/// Maps `[0, max]` linearly onto `[0.3, 1.0]` so that even a zero value stays
/// faintly visible.
#[must_use]
pub fn choropleth_opacity(value: f64, max: f64) -> f64 {
    LinearScale::new((0.0, max), (0.3, 1.0)).apply(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_adjoin() {
        let rects = stacked_segments(50.0, 10.0, 20.0, 200.0, &[0.25, 0.5, 0.1]);
        assert_eq!(rects.len(), 3);
        assert_eq!(rects[0], Rect::new(50.0, 10.0, 100.0, 30.0));
        assert_eq!(rects[1].x0, rects[0].x1);
        assert_eq!(rects[2].x0, rects[1].x1);
        assert_eq!(rects[2].x1, 220.0);
    }

    #[test]
    fn percents_need_not_sum_to_one() {
        let rects = stacked_segments(0.0, 0.0, 1.0, 100.0, &[0.8, 0.8]);
        assert_eq!(rects[1].x1, 160.0);
    }

    #[test]
    fn opacity_floor_and_ceiling() {
        assert!((choropleth_opacity(0.0, 0.4) - 0.3).abs() < 1e-12);
        assert!((choropleth_opacity(0.4, 0.4) - 1.0).abs() < 1e-12);
        assert!((choropleth_opacity(0.2, 0.4) - 0.65).abs() < 1e-12);
    }
}
