//! SketchSnap Core Library
//!
//! Geometry engine for freehand strokes: simplification, smoothing, corner
//! detection and shape recognition. The geometry functions are pure and total
//! over finite input; [`StrokeSession`] wraps them for one stroke at a time.

pub mod config;
pub mod corners;
pub mod geometry;
pub mod recognition;
pub mod session;
pub mod simplify;
pub mod smooth;

pub use config::{ConfigError, ConfigResult, EngineConfig};
pub use corners::{find_corner_indices, find_corners};
pub use geometry::{BoundingBox, bounding_box, centroid, distance, path_length, perpendicular_distance};
pub use recognition::{ArrowDirection, RecognizedShape, ShapeKind, ShapeType, Thresholds, recognize, recognize_with};
pub use session::{CommittedStroke, StrokeId, StrokeSession, StrokeState};
pub use simplify::{simplify, simplify_indices};
pub use smooth::{CurveSegments, smooth, to_bez_path};

pub use kurbo::Point;
