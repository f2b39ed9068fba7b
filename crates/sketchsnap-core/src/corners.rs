//! Corner detection by sliding-window direction analysis.
//!
//! At each interior sample the direction over the `window` samples before it
//! is compared with the direction over the `window` samples after it. A turn
//! sharper than [`CORNER_ANGLE`] marks a corner, unless another corner was
//! accepted within the last `n / 10` samples.

use crate::geometry::{angle_diff, direction, distance};
use kurbo::Point;
use std::f64::consts::FRAC_PI_4;

/// Minimum turn, in radians, for a sample to count as a corner.
pub const CORNER_ANGLE: f64 = FRAC_PI_4;

/// Smallest window ever used.
const MIN_WINDOW: usize = 3;

/// Window size for a stroke of `n` samples: `max(3, n / 20)`.
pub fn window_size(n: usize) -> usize {
    (n / 20).max(MIN_WINDOW)
}

/// Indices of corner samples, always starting with the first index and ending
/// with the last.
pub fn find_corner_indices(points: &[Point]) -> Vec<usize> {
    let n = points.len();
    match n {
        0 => return Vec::new(),
        1 => return vec![0],
        _ => {}
    }

    let window = window_size(n);
    if n < 2 * window + 1 {
        return vec![0, n - 1];
    }

    let min_gap = n as f64 / 10.0;
    let mut corners = vec![0];
    let mut last_corner = 0;

    for i in window..n - window {
        let (before, at, after) = (points[i - window], points[i], points[i + window]);
        // A pause leaves a zero-length chord, which has no direction.
        if distance(before, at) < f64::EPSILON || distance(at, after) < f64::EPSILON {
            continue;
        }

        let incoming = direction(before, at);
        let outgoing = direction(at, after);

        if angle_diff(incoming, outgoing) > CORNER_ANGLE && (i - last_corner) as f64 > min_gap {
            corners.push(i);
            last_corner = i;
        }
    }

    corners.push(n - 1);
    corners
}

/// Corner samples of the stroke, in stroke order. The first and last points
/// are always included.
pub fn find_corners(points: &[Point]) -> Vec<Point> {
    find_corner_indices(points)
        .into_iter()
        .map(|i| points[i])
        .collect()
}
