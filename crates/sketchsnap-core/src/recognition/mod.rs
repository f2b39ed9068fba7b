//! Shape recognition for freehand strokes.
//!
//! A stroke is first checked for being a line or an arrow. Open strokes that
//! are not straight enough go through the closed-shape analyzers (circle,
//! rectangle, triangle), each of which scores the stroke independently. The
//! highest accepted score wins; otherwise the stroke stays freehand.

mod circle;
mod line;
mod rectangle;
mod triangle;

use crate::corners::find_corners;
use crate::geometry::{BoundingBox, bounding_box};
use kurbo::{BezPath, Ellipse, Point, Shape as _, Vec2};
use serde::{Deserialize, Serialize};

/// Strokes with fewer points than this are never classified.
pub const MIN_POINTS: usize = 5;

/// Flattening tolerance for canonical outlines.
const PATH_TOLERANCE: f64 = 0.1;

/// Largest arrowhead barb drawn by [`RecognizedShape::to_path`].
const ARROW_HEAD_SIZE: f64 = 15.0;

/// Shape category without per-variant data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeType {
    Circle,
    Rectangle,
    Triangle,
    Line,
    Arrow,
    Freehand,
}

/// Which way an arrow points, in canvas space (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrowDirection {
    Left,
    Right,
    Up,
    Down,
}

/// Recognized shape with its variant-specific data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeKind {
    Circle,
    Rectangle,
    Triangle {
        vertices: [Point; 3],
    },
    Line {
        start: Point,
        end: Point,
        is_horizontal: bool,
        is_vertical: bool,
    },
    Arrow {
        start: Point,
        end: Point,
        is_horizontal: bool,
        is_vertical: bool,
        direction: ArrowDirection,
    },
    Freehand,
}

impl ShapeKind {
    pub fn shape_type(&self) -> ShapeType {
        match self {
            ShapeKind::Circle => ShapeType::Circle,
            ShapeKind::Rectangle => ShapeType::Rectangle,
            ShapeKind::Triangle { .. } => ShapeType::Triangle,
            ShapeKind::Line { .. } => ShapeType::Line,
            ShapeKind::Arrow { .. } => ShapeType::Arrow,
            ShapeKind::Freehand => ShapeType::Freehand,
        }
    }
}

/// Result of classifying a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecognizedShape {
    #[serde(flatten)]
    pub kind: ShapeKind,
    /// Bounds of the classified points.
    pub bounds: BoundingBox,
    /// Analyzer-specific score in `[0, 1]`.
    pub confidence: f64,
}

impl RecognizedShape {
    fn new(kind: ShapeKind, bounds: BoundingBox, confidence: f64) -> Self {
        let confidence = if confidence.is_nan() { 0.0 } else { confidence.clamp(0.0, 1.0) };
        Self {
            kind,
            bounds,
            confidence,
        }
    }

    /// Freehand result. Confidence 0 means "too little data", 1 means
    /// "certainly not a canonical shape".
    fn freehand(bounds: BoundingBox, confidence: f64) -> Self {
        Self::new(ShapeKind::Freehand, bounds, confidence)
    }

    pub fn shape_type(&self) -> ShapeType {
        self.kind.shape_type()
    }

    pub fn is_freehand(&self) -> bool {
        matches!(self.kind, ShapeKind::Freehand)
    }

    pub fn is_horizontal(&self) -> bool {
        match self.kind {
            ShapeKind::Line { is_horizontal, .. } | ShapeKind::Arrow { is_horizontal, .. } => {
                is_horizontal
            }
            _ => false,
        }
    }

    pub fn is_vertical(&self) -> bool {
        match self.kind {
            ShapeKind::Line { is_vertical, .. } | ShapeKind::Arrow { is_vertical, .. } => {
                is_vertical
            }
            _ => false,
        }
    }

    pub fn arrow_direction(&self) -> Option<ArrowDirection> {
        match self.kind {
            ShapeKind::Arrow { direction, .. } => Some(direction),
            _ => None,
        }
    }

    /// Canonical outline that can replace the freehand stroke.
    ///
    /// Freehand results produce an empty path.
    pub fn to_path(&self) -> BezPath {
        let rect = self.bounds.to_rect();
        match self.kind {
            ShapeKind::Circle => Ellipse::from_rect(rect).to_path(PATH_TOLERANCE),
            ShapeKind::Rectangle => rect.to_path(PATH_TOLERANCE),
            ShapeKind::Triangle { vertices } => {
                let mut path = BezPath::new();
                path.move_to(vertices[0]);
                path.line_to(vertices[1]);
                path.line_to(vertices[2]);
                path.close_path();
                path
            }
            ShapeKind::Line { start, end, .. } => {
                let mut path = BezPath::new();
                path.move_to(start);
                path.line_to(end);
                path
            }
            ShapeKind::Arrow { start, end, .. } => arrow_path(start, end),
            ShapeKind::Freehand => BezPath::new(),
        }
    }
}

/// Shaft plus a two-barb head at `end`.
fn arrow_path(start: Point, end: Point) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(start);
    path.line_to(end);

    let shaft = end - start;
    let length = shaft.hypot();
    if length < f64::EPSILON {
        return path;
    }

    let head = ARROW_HEAD_SIZE.min(length * 0.25);
    let back = -shaft / length * head;
    let spread = std::f64::consts::FRAC_PI_6;
    for angle in [spread, -spread] {
        let barb = rotate(back, angle);
        path.move_to(end + barb);
        path.line_to(end);
    }
    path
}

fn rotate(v: Vec2, angle: f64) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Acceptance thresholds for each analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Minimum `chord / path length` for a line candidate.
    pub line_straightness: f64,
    pub circle: f64,
    pub rectangle: f64,
    pub triangle: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            line_straightness: 0.85,
            circle: 0.65,
            rectangle: 0.6,
            triangle: 0.55,
        }
    }
}

/// Outcome of one closed-shape analyzer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Verdict {
    pub kind: ShapeKind,
    pub accepted: bool,
    pub confidence: f64,
}

impl Verdict {
    pub(crate) fn rejected(kind: ShapeKind) -> Self {
        Self {
            kind,
            accepted: false,
            confidence: 0.0,
        }
    }

    pub(crate) fn scored(kind: ShapeKind, confidence: f64, threshold: f64) -> Self {
        Self {
            kind,
            accepted: confidence > threshold,
            confidence,
        }
    }
}

/// Classify a stroke with the default thresholds.
pub fn recognize(points: &[Point]) -> RecognizedShape {
    recognize_with(points, &Thresholds::default())
}

/// Classify a stroke.
///
/// Never fails: degenerate or ambiguous strokes come back as freehand.
pub fn recognize_with(points: &[Point], thresholds: &Thresholds) -> RecognizedShape {
    let bounds = bounding_box(points);

    if points.len() < MIN_POINTS {
        return RecognizedShape::freehand(bounds, 0.0);
    }

    if let Some((kind, confidence)) = line::analyze(points, &bounds, thresholds.line_straightness) {
        log::debug!(
            "Recognized {:?} ({} points, confidence {:.3})",
            kind.shape_type(),
            points.len(),
            confidence
        );
        return RecognizedShape::new(kind, bounds, confidence);
    }

    let corners = find_corners(points);
    // Fixed priority order: on equal confidence the earlier analyzer wins.
    let verdicts = [
        circle::analyze(points, &bounds, thresholds.circle),
        rectangle::analyze(&corners, &bounds, thresholds.rectangle),
        triangle::analyze(points, &corners, thresholds.triangle),
    ];

    for verdict in &verdicts {
        log::trace!(
            "{:?}: confidence {:.3}, accepted {}",
            verdict.kind.shape_type(),
            verdict.confidence,
            verdict.accepted
        );
    }

    match arbitrate(&verdicts) {
        Some(best) => {
            log::debug!(
                "Recognized {:?} ({} points, {} corners, confidence {:.3})",
                best.kind.shape_type(),
                points.len(),
                corners.len(),
                best.confidence
            );
            RecognizedShape::new(best.kind, bounds, best.confidence)
        }
        None => RecognizedShape::freehand(bounds, 1.0),
    }
}

/// Highest-confidence accepted verdict, first one winning ties.
fn arbitrate(verdicts: &[Verdict]) -> Option<&Verdict> {
    verdicts
        .iter()
        .filter(|v| v.accepted)
        .fold(None, |best: Option<&Verdict>, v| match best {
            Some(b) if b.confidence >= v.confidence => Some(b),
            _ => Some(v),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_few_points_is_freehand_zero() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(20.0, 5.0),
            Point::new(30.0, 0.0),
        ];
        let shape = recognize(&points);
        assert_eq!(shape.shape_type(), ShapeType::Freehand);
        assert_eq!(shape.confidence, 0.0);
        assert_eq!(shape.bounds, BoundingBox::new(0.0, 0.0, 30.0, 5.0));

        let empty = recognize(&[]);
        assert_eq!(empty.confidence, 0.0);
        assert_eq!(empty.bounds, BoundingBox::ZERO);
    }

    #[test]
    fn test_stationary_stroke_is_freehand() {
        let shape = recognize(&[Point::new(7.0, 7.0); 30]);
        assert!(shape.is_freehand());
        assert!(shape.confidence.is_finite());
    }

    #[test]
    fn test_arbitration_prefers_highest_then_priority() {
        let circle = Verdict::scored(ShapeKind::Circle, 0.8, 0.65);
        let rect = Verdict::scored(ShapeKind::Rectangle, 0.9, 0.6);
        let tri = Verdict::scored(
            ShapeKind::Triangle {
                vertices: [Point::ZERO; 3],
            },
            0.9,
            0.55,
        );
        let best = arbitrate(&[circle, rect, tri]).map(|v| v.kind.shape_type());
        assert_eq!(best, Some(ShapeType::Rectangle));

        let rejected = Verdict::rejected(ShapeKind::Circle);
        assert!(arbitrate(&[rejected]).is_none());
    }

    #[test]
    fn test_scored_threshold_is_exclusive() {
        assert!(!Verdict::scored(ShapeKind::Circle, 0.65, 0.65).accepted);
        assert!(Verdict::scored(ShapeKind::Circle, 0.651, 0.65).accepted);
    }

    #[test]
    fn test_accessors() {
        let bounds = BoundingBox::new(0.0, 0.0, 100.0, 0.0);
        let arrow = RecognizedShape::new(
            ShapeKind::Arrow {
                start: Point::new(0.0, 0.0),
                end: Point::new(100.0, 0.0),
                is_horizontal: true,
                is_vertical: false,
                direction: ArrowDirection::Right,
            },
            bounds,
            0.9,
        );
        assert_eq!(arrow.shape_type(), ShapeType::Arrow);
        assert!(arrow.is_horizontal());
        assert!(!arrow.is_vertical());
        assert_eq!(arrow.arrow_direction(), Some(ArrowDirection::Right));

        let circle = RecognizedShape::new(ShapeKind::Circle, bounds, 1.2);
        assert_eq!(circle.confidence, 1.0);
        assert!(!circle.is_horizontal());
        assert_eq!(circle.arrow_direction(), None);
    }

    #[test]
    fn test_canonical_paths() {
        let bounds = BoundingBox::new(10.0, 10.0, 80.0, 40.0);

        let rect = RecognizedShape::new(ShapeKind::Rectangle, bounds, 0.9).to_path();
        let rb = rect.bounding_box();
        assert!((rb.x0 - 10.0).abs() < 1e-9 && (rb.x1 - 90.0).abs() < 1e-9);

        let ellipse = RecognizedShape::new(ShapeKind::Circle, bounds, 0.9).to_path();
        let eb = ellipse.bounding_box();
        assert!((eb.width() - 80.0).abs() < 0.5);
        assert!((eb.height() - 40.0).abs() < 0.5);

        let arrow = RecognizedShape::new(
            ShapeKind::Arrow {
                start: Point::new(0.0, 0.0),
                end: Point::new(100.0, 0.0),
                is_horizontal: true,
                is_vertical: false,
                direction: ArrowDirection::Right,
            },
            bounds,
            0.9,
        )
        .to_path();
        // Shaft plus two barbs.
        assert_eq!(arrow.elements().len(), 6);

        assert!(RecognizedShape::freehand(bounds, 1.0).to_path().elements().is_empty());
    }

    #[test]
    fn test_serialized_shape_is_flat() {
        let shape = RecognizedShape::new(ShapeKind::Circle, BoundingBox::new(0.0, 0.0, 10.0, 10.0), 0.8);
        let json = serde_json::to_value(shape).unwrap();
        assert_eq!(json["type"], "circle");
        assert_eq!(json["bounds"]["width"], 10.0);

        let back: RecognizedShape = serde_json::from_value(json).unwrap();
        assert_eq!(back, shape);
    }
}
