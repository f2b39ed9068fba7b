//! Ramer-Douglas-Peucker path simplification.

use crate::geometry::perpendicular_distance;
use kurbo::Point;

/// Default tolerance applied when a stroke is finalized.
pub const DEFAULT_EPSILON: f64 = 1.5;

/// Buffers longer than this are simplified with an explicit stack instead of
/// recursion.
pub const ITERATIVE_THRESHOLD: usize = 1024;

/// Simplify a polyline, keeping every point that deviates more than
/// `epsilon` from the chord of its enclosing span.
///
/// The first and last points are always kept and the result is a
/// subsequence of the input. Inputs with fewer than 3 points are returned
/// unchanged.
pub fn simplify(points: &[Point], epsilon: f64) -> Vec<Point> {
    simplify_with_threshold(points, epsilon, ITERATIVE_THRESHOLD)
}

/// Like [`simplify`], switching to the iterative formulation once the input
/// is longer than `iterative_threshold`.
pub fn simplify_with_threshold(
    points: &[Point],
    epsilon: f64,
    iterative_threshold: usize,
) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }
    simplify_indices_with_threshold(points, epsilon, iterative_threshold)
        .into_iter()
        .map(|i| points[i])
        .collect()
}

/// Indices of the points [`simplify`] keeps, in ascending order.
///
/// Useful for reducing buffers that run parallel to the points (pressure).
pub fn simplify_indices(points: &[Point], epsilon: f64) -> Vec<usize> {
    simplify_indices_with_threshold(points, epsilon, ITERATIVE_THRESHOLD)
}

fn simplify_indices_with_threshold(
    points: &[Point],
    epsilon: f64,
    iterative_threshold: usize,
) -> Vec<usize> {
    let n = points.len();
    if n < 3 {
        return (0..n).collect();
    }

    // NaN or negative tolerance behaves like zero.
    let epsilon = if epsilon > 0.0 { epsilon } else { 0.0 };

    if n > iterative_threshold {
        rdp_iterative(points, epsilon)
    } else {
        rdp_recursive(points, 0, epsilon)
    }
}

/// Point with the largest perpendicular distance from the chord of
/// `points`, as `(distance, index)`. Only interior points are considered.
fn farthest_from_chord(points: &[Point]) -> (f64, usize) {
    let first = points[0];
    let last = points[points.len() - 1];

    let mut max_dist = 0.0;
    let mut max_index = 0;

    for (i, point) in points.iter().enumerate().skip(1).take(points.len() - 2) {
        let dist = perpendicular_distance(*point, first, last);
        if dist > max_dist {
            max_dist = dist;
            max_index = i;
        }
    }

    (max_dist, max_index)
}

fn rdp_recursive(points: &[Point], offset: usize, epsilon: f64) -> Vec<usize> {
    if points.len() < 3 {
        return (offset..offset + points.len()).collect();
    }

    let (max_dist, max_index) = farthest_from_chord(points);

    if max_dist > epsilon {
        let mut left = rdp_recursive(&points[..=max_index], offset, epsilon);
        let right = rdp_recursive(&points[max_index..], offset + max_index, epsilon);

        // `max_index` ends the left run and starts the right one.
        left.pop();
        left.extend(right);
        left
    } else {
        vec![offset, offset + points.len() - 1]
    }
}

fn rdp_iterative(points: &[Point], epsilon: f64) -> Vec<usize> {
    let n = points.len();
    let mut keep = vec![false; n];
    keep[0] = true;
    keep[n - 1] = true;

    let mut stack = vec![(0usize, n - 1)];
    while let Some((start, end)) = stack.pop() {
        if end - start < 2 {
            continue;
        }
        let (max_dist, max_index) = farthest_from_chord(&points[start..=end]);
        if max_dist > epsilon {
            let split = start + max_index;
            keep[split] = true;
            stack.push((split, end));
            stack.push((start, split));
        }
    }

    keep.iter()
        .enumerate()
        .filter_map(|(i, &k)| k.then_some(i))
        .collect()
}
