//! Geometry kernel shared by every stage of the stroke pipeline.
//!
//! All functions are total: degenerate input (empty slices, zero-length
//! segments, zero-area boxes) yields a defined value instead of NaN.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A stroke counts as closed when its endpoint gap is below this fraction of
/// its path length.
pub const CLOSURE_RATIO: f64 = 0.15;

/// Axis-aligned bounding box of a point set.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub const ZERO: BoundingBox = BoundingBox {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Larger of the two extents.
    pub fn max_extent(&self) -> f64 {
        self.width.max(self.height)
    }

    /// Smaller of the two extents.
    pub fn min_extent(&self) -> f64 {
        self.width.min(self.height)
    }

    /// `min/max` extent ratio in `[0, 1]`; 0 for a box with no extent.
    pub fn squareness(&self) -> f64 {
        let max = self.max_extent();
        if max > 0.0 { self.min_extent() / max } else { 0.0 }
    }

    /// `width/height`. A flat box (zero height) is infinitely wide; a box
    /// with no extent at all reports 1.
    pub fn aspect_ratio(&self) -> f64 {
        if self.height > 0.0 {
            self.width / self.height
        } else if self.width > 0.0 {
            f64::INFINITY
        } else {
            1.0
        }
    }

    /// Corners in clockwise order starting at the top-left (y grows down).
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x, self.y),
            Point::new(self.x + self.width, self.y),
            Point::new(self.x + self.width, self.y + self.height),
            Point::new(self.x, self.y + self.height),
        ]
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

impl From<Rect> for BoundingBox {
    fn from(rect: Rect) -> Self {
        let rect = rect.abs();
        Self::new(rect.x0, rect.y0, rect.width(), rect.height())
    }
}

/// Euclidean distance between two points.
pub fn distance(p1: Point, p2: Point) -> f64 {
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    (dx * dx + dy * dy).sqrt()
}

/// Sum of consecutive distances along the polyline.
pub fn path_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| distance(w[0], w[1])).sum()
}

/// Arithmetic mean of the points.
///
/// Callers are expected to pass a non-empty slice; an empty one yields
/// `Point::ZERO`.
pub fn centroid(points: &[Point]) -> Point {
    if points.is_empty() {
        return Point::ZERO;
    }
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Point::new(sx / n, sy / n)
}

/// Bounding box of the points, `{0, 0, 0, 0}` when empty.
pub fn bounding_box(points: &[Point]) -> BoundingBox {
    if points.is_empty() {
        return BoundingBox::ZERO;
    }

    let mut min_x = f64::MAX;
    let mut min_y = f64::MAX;
    let mut max_x = f64::MIN;
    let mut max_y = f64::MIN;

    for point in points {
        min_x = min_x.min(point.x);
        min_y = min_y.min(point.y);
        max_x = max_x.max(point.x);
        max_y = max_y.max(point.y);
    }

    BoundingBox::new(min_x, min_y, max_x - min_x, max_y - min_y)
}

/// Distance from `point` to the infinite line through `line_start` and
/// `line_end`. Coincident endpoints degrade to the point-to-point distance.
pub fn perpendicular_distance(point: Point, line_start: Point, line_end: Point) -> f64 {
    let chord = line_end - line_start;
    let chord_len_sq = chord.hypot2();
    if chord_len_sq < f64::EPSILON {
        return distance(point, line_start);
    }

    // Parallelogram area spanned with the chord, divided by its base.
    (point - line_start).cross(chord).abs() / chord_len_sq.sqrt()
}

/// Whether the gap between the first and last point is below `ratio` of the
/// path length. Strokes with no length are never closed.
pub fn is_closed(points: &[Point], ratio: f64) -> bool {
    let (Some(&first), Some(&last)) = (points.first(), points.last()) else {
        return false;
    };
    let length = path_length(points);
    length > 0.0 && distance(first, last) < ratio * length
}

/// Direction of the vector `from -> to` in radians.
pub fn direction(from: Point, to: Point) -> f64 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Absolute difference between two angles, folded into `[0, π]`.
pub fn angle_diff(a: f64, b: f64) -> f64 {
    let diff = (a - b).abs() % std::f64::consts::TAU;
    if diff > std::f64::consts::PI {
        std::f64::consts::TAU - diff
    } else {
        diff
    }
}
