//! Circle detection from radial uniformity and box squareness.

use super::{ShapeKind, Verdict};
use crate::geometry::{BoundingBox, centroid, distance};
use kurbo::Point;

const UNIFORMITY_WEIGHT: f64 = 0.6;
const SQUARENESS_WEIGHT: f64 = 0.4;

/// Score how circular the stroke is.
///
/// Uniformity is `1 - 2 * cv` (floored at 0), where `cv` is the coefficient
/// of variation of the centroid distances.
pub(super) fn analyze(points: &[Point], bounds: &BoundingBox, threshold: f64) -> Verdict {
    let Some(cv) = radial_variation(points) else {
        return Verdict::rejected(ShapeKind::Circle);
    };

    let uniformity = (1.0 - 2.0 * cv).max(0.0);
    let confidence = UNIFORMITY_WEIGHT * uniformity + SQUARENESS_WEIGHT * bounds.squareness();
    Verdict::scored(ShapeKind::Circle, confidence, threshold)
}

/// Coefficient of variation (`stddev / mean`) of the distances from the
/// centroid. `None` when every point sits on the centroid.
fn radial_variation(points: &[Point]) -> Option<f64> {
    if points.is_empty() {
        return None;
    }

    let center = centroid(points);
    let n = points.len() as f64;
    let radii: Vec<f64> = points.iter().map(|p| distance(*p, center)).collect();

    let mean = radii.iter().sum::<f64>() / n;
    if mean <= f64::EPSILON {
        return None;
    }

    let variance = radii.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
    Some(variance.sqrt() / mean)
}
