//! Rectangle detection from detected corners.

use super::{ShapeKind, Verdict};
use crate::geometry::{BoundingBox, distance};
use kurbo::Point;
use std::ops::RangeInclusive;

/// Corner counts that can describe a rectangle: four vertices plus the
/// stroke's own start and end samples.
const CORNER_COUNT: RangeInclusive<usize> = 4..=6;

/// Box corners must have a detected corner within this fraction of the
/// larger box extent.
const MATCH_TOLERANCE: f64 = 0.2;

/// `|cos θ|` below which a turn counts as a right angle.
const RIGHT_ANGLE_COS: f64 = 0.3;

pub(super) fn analyze(corners: &[Point], bounds: &BoundingBox, threshold: f64) -> Verdict {
    if !CORNER_COUNT.contains(&corners.len()) {
        return Verdict::rejected(ShapeKind::Rectangle);
    }

    let tolerance = MATCH_TOLERANCE * bounds.max_extent();
    let box_corners = bounds.corners();
    let matched = box_corners
        .iter()
        .filter(|bc| corners.iter().any(|c| distance(*c, **bc) < tolerance))
        .count();
    let match_score = matched as f64 / box_corners.len() as f64;

    let confidence = 0.5 * match_score + 0.5 * right_angle_fraction(corners);
    Verdict::scored(ShapeKind::Rectangle, confidence, threshold)
}

/// Fraction of consecutive corner triples whose turn is close to 90°.
fn right_angle_fraction(corners: &[Point]) -> f64 {
    let triples = corners.windows(3);
    let total = triples.len();
    if total == 0 {
        return 0.0;
    }

    let right = triples.filter(|t| is_right_turn(t[0], t[1], t[2])).count();
    right as f64 / total as f64
}

fn is_right_turn(a: Point, b: Point, c: Point) -> bool {
    let incoming = b - a;
    let outgoing = c - b;
    let norms = incoming.hypot() * outgoing.hypot();
    if norms <= f64::EPSILON {
        return false;
    }
    (incoming.dot(outgoing) / norms).abs() < RIGHT_ANGLE_COS
}
