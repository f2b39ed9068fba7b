//! Catmull-Rom style smoothing of a polyline into cubic Bezier segments.

use kurbo::{BezPath, CubicBez, Point};

/// Tension used when rendering finished strokes.
pub const DEFAULT_TENSION: f64 = 0.25;

/// Ordered cubic segments; each segment's `p3` is the next one's `p0`.
pub type CurveSegments = Vec<CubicBez>;

/// Build an interpolating curve through `points`.
///
/// Every segment starts and ends on consecutive input points. Control
/// points are derived from the neighbouring samples, clamped at both ends
/// of the stroke.
pub fn smooth(points: &[Point], tension: f64) -> CurveSegments {
    match points.len() {
        0 | 1 => Vec::new(),
        2 => vec![straight_segment(points[0], points[1])],
        n => (0..n - 1)
            .map(|i| {
                let p0 = points[i.saturating_sub(1)];
                let p1 = points[i];
                let p2 = points[i + 1];
                let p3 = points[(i + 2).min(n - 1)];

                let cp1 = p1 + (p2 - p0) * tension;
                let cp2 = p2 - (p3 - p1) * tension;

                CubicBez::new(p1, cp1, cp2, p2)
            })
            .collect(),
    }
}

/// A cubic that traces the straight segment `start -> end`.
fn straight_segment(start: Point, end: Point) -> CubicBez {
    CubicBez::new(start, start.lerp(end, 1.0 / 3.0), start.lerp(end, 2.0 / 3.0), end)
}

/// Convert segments into a single path for drawing APIs.
pub fn to_bez_path(segments: &[CubicBez]) -> BezPath {
    let mut path = BezPath::new();

    let Some(first) = segments.first() else {
        return path;
    };

    path.move_to(first.p0);
    for seg in segments {
        path.curve_to(seg.p1, seg.p2, seg.p3);
    }

    path
}
