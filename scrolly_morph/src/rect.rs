// Copyright 2025 the Scrolly Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::{Point, Size};

use crate::path::MorphPath;

/// Smallest vertex count for which vertices are distributed over the sides.
///
/// Below this, per-side stepping degenerates and [`MINIMAL_SIDES`] is used.
pub const MIN_DISTRIBUTED_VERTICES: usize = 6;

/// Side steps of the plain rectangle: three corners after the start, with
/// the close drawing the fourth side.
pub const MINIMAL_SIDES: [usize; 4] = [1, 1, 1, 0];

/// Splits `n` vertices over four sides.
///
/// Every side gets `n / 4`; the remainder (0–3) adds one to each side in
/// order starting from the first.
///
/// ```
/// use scrolly_morph::side_counts;
///
/// assert_eq!(side_counts(13), [4, 3, 3, 3]);
/// assert_eq!(side_counts(14), [4, 4, 3, 3]);
/// assert_eq!(side_counts(16), [4, 4, 4, 4]);
/// ```
#[must_use]
pub fn side_counts(n: usize) -> [usize; 4] {
    let base = n / 4;
    let extra = n % 4;
    core::array::from_fn(|i| if i < extra { base + 1 } else { base })
}

/// Per-side step counts actually walked by [`rectangle_path`].
///
/// For `n >= MIN_DISTRIBUTED_VERTICES` this is [`side_counts`] with the first
/// side reduced by one for the initial move and the last side reduced by one
/// for the close; otherwise [`MINIMAL_SIDES`].
#[must_use]
pub fn walked_sides(n: usize) -> [usize; 4] {
    if n < MIN_DISTRIBUTED_VERTICES {
        return MINIMAL_SIDES;
    }
    let mut sides = side_counts(n);
    sides[0] -= 1;
    sides[3] -= 1;
    sides
}

/// Builds a rectangle with exactly `n` path elements.
///
/// The walk starts at `origin` (the top-left corner in a y-down space), goes
/// right along the top, down the right side, left along the bottom and up the
/// left side, splitting each side into the number of equal steps given by
/// [`walked_sides`]. The close segment returns to `origin`.
///
/// For `n < MIN_DISTRIBUTED_VERTICES` the result is the plain four-corner
/// rectangle (five path elements) regardless of `n`.
#[must_use]
pub fn rectangle_path(origin: Point, size: Size, n: usize) -> MorphPath {
    let sides = walked_sides(n);
    let mut points = Vec::with_capacity(1 + sides.iter().sum::<usize>());
    let mut cursor = origin;
    points.push(cursor);

    for (j, &steps) in sides.iter().enumerate() {
        if steps == 0 {
            continue;
        }
        let direction = if j < 2 { 1.0 } else { -1.0 };
        let steps_f = steps as f64;
        for _ in 0..steps {
            if j % 2 == 0 {
                cursor.x += direction * size.width / steps_f;
            } else {
                cursor.y += direction * size.height / steps_f;
            }
            points.push(cursor);
        }
    }

    MorphPath::from_points(points)
}
