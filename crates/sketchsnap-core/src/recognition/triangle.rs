//! Triangle detection from the first three detected corners.

use super::{ShapeKind, Verdict};
use crate::geometry::{CLOSURE_RATIO, distance, is_closed};
use kurbo::Point;
use std::ops::RangeInclusive;

/// Three vertices plus up to two extra samples (the stroke's start and end).
const CORNER_COUNT: RangeInclusive<usize> = 3..=5;

/// Every side should be at least this fraction of the perimeter; shorter
/// sides earn proportional credit.
const MIN_SIDE_RATIO: f64 = 0.15;

const SIDE_WEIGHT: f64 = 0.6;
const CLOSURE_WEIGHT: f64 = 0.4;

pub(super) fn analyze(points: &[Point], corners: &[Point], threshold: f64) -> Verdict {
    if !CORNER_COUNT.contains(&corners.len()) {
        return Verdict::rejected(ShapeKind::Triangle {
            vertices: [Point::ZERO; 3],
        });
    }

    let vertices = [corners[0], corners[1], corners[2]];
    let kind = ShapeKind::Triangle { vertices };

    let sides = [
        distance(vertices[0], vertices[1]),
        distance(vertices[1], vertices[2]),
        distance(vertices[2], vertices[0]),
    ];
    let perimeter: f64 = sides.iter().sum();
    if perimeter <= f64::EPSILON {
        return Verdict::rejected(kind);
    }

    let side_score = sides
        .iter()
        .map(|side| (side / perimeter / MIN_SIDE_RATIO).min(1.0))
        .fold(1.0, f64::min);
    let closure_score = if is_closed(points, CLOSURE_RATIO) { 1.0 } else { 0.5 };

    let confidence = SIDE_WEIGHT * side_score + CLOSURE_WEIGHT * closure_score;
    Verdict::scored(kind, confidence, threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outline(vertices: &[Point]) -> Vec<Point> {
        let mut points = Vec::new();
        for edge in vertices.windows(2) {
            for k in 0..10 {
                points.push(edge[0].lerp(edge[1], k as f64 / 10.0));
            }
        }
        points.extend(vertices.last());
        points
    }

    #[test]
    fn test_closed_triangle() {
        let corners = vec![
            Point::new(0.0, 100.0),
            Point::new(50.0, 0.0),
            Point::new(100.0, 100.0),
            Point::new(0.0, 100.0),
        ];
        let points = outline(&corners);
        let verdict = analyze(&points, &corners, 0.55);
        assert!(verdict.accepted);
        assert!((verdict.confidence - 1.0).abs() < 1e-12);
        assert!(matches!(verdict.kind, ShapeKind::Triangle { vertices } if vertices[1] == Point::new(50.0, 0.0)));
    }

    #[test]
    fn test_open_stroke_gets_half_closure_credit() {
        let corners = vec![
            Point::new(0.0, 100.0),
            Point::new(50.0, 0.0),
            Point::new(100.0, 100.0),
        ];
        let points = outline(&corners);
        let verdict = analyze(&points, &corners, 0.55);
        assert!(verdict.accepted);
        assert!((verdict.confidence - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_sliver_side_loses_credit() {
        // Third side is 5% of the perimeter: side score 1/3.
        let corners = vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(10.0, 0.0),
        ];
        let points = outline(&corners[..2]);
        let verdict = analyze(&points, &corners, 0.55);
        assert!(!verdict.accepted);
    }

    #[test]
    fn test_too_few_corners() {
        let corners = vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        assert!(!analyze(&corners, &corners, 0.55).accepted);
    }
}
