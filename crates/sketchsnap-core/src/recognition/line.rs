//! Straight line and arrow detection.

use super::{ArrowDirection, ShapeKind};
use crate::geometry::{BoundingBox, angle_diff, direction, distance, path_length};
use kurbo::Point;
use std::f64::consts::FRAC_PI_6;

/// Aspect ratio beyond which a line counts as horizontal (its inverse for
/// vertical).
const ORIENTATION_RATIO: f64 = 3.0;

/// An arrow needs at least this many samples to have a distinguishable head.
const ARROW_MIN_POINTS: usize = 10;

/// Minimum straightness of the shaft for the arrow check.
const ARROW_MIN_STRAIGHTNESS: f64 = 0.7;

/// Fraction of the stroke that forms the shaft; the rest is searched for a
/// head.
const SHAFT_FRACTION: f64 = 0.8;

/// Tail segments turning further than this from the shaft form a head.
const HEAD_DEVIATION: f64 = FRAC_PI_6;

/// Arrow confidence relative to the underlying line confidence.
const ARROW_CONFIDENCE_FACTOR: f64 = 0.9;

/// Classify a stroke as a line or arrow, returning the shape and its
/// confidence. `None` when the stroke is not straight enough.
pub(super) fn analyze(
    points: &[Point],
    bounds: &BoundingBox,
    min_straightness: f64,
) -> Option<(ShapeKind, f64)> {
    let (&first, &last) = (points.first()?, points.last()?);

    let length = path_length(points);
    if length <= 0.0 {
        return None;
    }

    let straightness = distance(first, last) / length;
    if straightness <= min_straightness {
        return None;
    }

    let aspect = bounds.aspect_ratio();
    let is_horizontal = aspect > ORIENTATION_RATIO;
    let is_vertical = aspect < 1.0 / ORIENTATION_RATIO;

    if points.len() >= ARROW_MIN_POINTS && straightness >= ARROW_MIN_STRAIGHTNESS {
        if let Some(direction) = arrow_head(points) {
            let kind = ShapeKind::Arrow {
                start: first,
                end: last,
                is_horizontal,
                is_vertical,
                direction,
            };
            return Some((kind, straightness * ARROW_CONFIDENCE_FACTOR));
        }
    }

    let kind = ShapeKind::Line {
        start: first,
        end: last,
        is_horizontal,
        is_vertical,
    };
    Some((kind, straightness))
}

/// Look for a head in the last part of the stroke. Returns the direction the
/// shaft points in when one is found.
fn arrow_head(points: &[Point]) -> Option<ArrowDirection> {
    let shaft_end = (points.len() as f64 * SHAFT_FRACTION) as usize;
    let start = points[0];
    let mark = points[shaft_end];
    let main = direction(start, mark);

    let has_head = points[shaft_end..].windows(2).any(|seg| {
        // Repeated samples carry no direction.
        seg[0] != seg[1] && angle_diff(direction(seg[0], seg[1]), main) > HEAD_DEVIATION
    });

    if !has_head {
        return None;
    }

    let dx = mark.x - start.x;
    let dy = mark.y - start.y;
    let dir = if dx.abs() > dy.abs() {
        if dx > 0.0 { ArrowDirection::Right } else { ArrowDirection::Left }
    } else if dy > 0.0 {
        ArrowDirection::Down
    } else {
        ArrowDirection::Up
    };
    Some(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::bounding_box;
    use std::f64::consts::FRAC_PI_4;

    fn run(points: &[Point]) -> Option<(ShapeKind, f64)> {
        analyze(points, &bounding_box(points), 0.85)
    }

    #[test]
    fn test_vertical_line() {
        let points: Vec<Point> = (0..30).map(|i| Point::new(5.0, i as f64 * 5.0)).collect();
        let (kind, confidence) = run(&points).unwrap();
        assert!(matches!(
            kind,
            ShapeKind::Line {
                is_horizontal: false,
                is_vertical: true,
                ..
            }
        ));
        assert!((confidence - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_diagonal_line_has_no_orientation() {
        let points: Vec<Point> = (0..30).map(|i| Point::new(i as f64 * 3.0, i as f64 * 3.0)).collect();
        let (kind, _) = run(&points).unwrap();
        assert!(matches!(
            kind,
            ShapeKind::Line {
                is_horizontal: false,
                is_vertical: false,
                ..
            }
        ));
    }

    #[test]
    fn test_curved_stroke_is_not_a_line() {
        // Half circle: straightness 2/π.
        let points: Vec<Point> = (0..=40)
            .map(|i| {
                let t = std::f64::consts::PI * i as f64 / 40.0;
                Point::new(50.0 * t.cos(), 50.0 * t.sin())
            })
            .collect();
        assert!(run(&points).is_none());
    }

    #[test]
    fn test_zero_length_stroke() {
        assert!(run(&[Point::new(1.0, 1.0); 12]).is_none());
    }

    #[test]
    fn test_upward_arrow() {
        let mut points: Vec<Point> = (0..=40).map(|i| Point::new(0.0, -(i as f64) * 5.0)).collect();
        for j in 1..=4 {
            let d = j as f64 * 5.0;
            points.push(Point::new(d * FRAC_PI_4.cos(), -200.0 - d * FRAC_PI_4.sin()));
        }
        let (kind, confidence) = run(&points).unwrap();
        match kind {
            ShapeKind::Arrow {
                direction,
                is_vertical,
                ..
            } => {
                assert_eq!(direction, ArrowDirection::Up);
                assert!(is_vertical);
            }
            other => panic!("expected arrow, got {other:?}"),
        }
        assert!(confidence < 0.9 + 1e-9);
    }

    fn arrow_direction_of(points: &[Point]) -> Option<ArrowDirection> {
        match run(points)?.0 {
            ShapeKind::Arrow { direction, .. } => Some(direction),
            _ => None,
        }
    }

    #[test]
    fn test_leftward_arrow() {
        let mut points: Vec<Point> = (0..=40).map(|i| Point::new(-(i as f64) * 5.0, 0.0)).collect();
        for j in 1..=4 {
            let d = j as f64 * 5.0;
            points.push(Point::new(-200.0 - d * FRAC_PI_4.cos(), -d * FRAC_PI_4.sin()));
        }
        assert_eq!(arrow_direction_of(&points), Some(ArrowDirection::Left));
    }

    #[test]
    fn test_downward_arrow() {
        let mut points: Vec<Point> = (0..=40).map(|i| Point::new(0.0, i as f64 * 5.0)).collect();
        for j in 1..=4 {
            let d = j as f64 * 5.0;
            points.push(Point::new(-d * FRAC_PI_4.sin(), 200.0 + d * FRAC_PI_4.cos()));
        }
        assert_eq!(arrow_direction_of(&points), Some(ArrowDirection::Down));
    }

    #[test]
    fn test_short_stroke_never_arrow() {
        // Below the sample count needed for a head.
        let points = [
            Point::new(0.0, 0.0),
            Point::new(20.0, 0.0),
            Point::new(40.0, 0.0),
            Point::new(60.0, 0.0),
            Point::new(70.0, -8.0),
        ];
        let (kind, _) = run(&points).unwrap();
        assert!(matches!(kind, ShapeKind::Line { .. }));
    }
}
