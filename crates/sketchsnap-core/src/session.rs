//! Per-stroke drawing session.
//!
//! A session collects samples between pointer-down and pointer-up, offers a
//! live shape preview while drawing, and on release simplifies, smooths and
//! classifies the stroke. Sessions share nothing, so simultaneous pointers
//! each get their own.

use crate::config::EngineConfig;
use crate::geometry::distance;
use crate::recognition::{RecognizedShape, recognize_with};
use crate::simplify::simplify_indices;
use crate::smooth::{CurveSegments, smooth};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a stroke, assigned when drawing begins.
pub type StrokeId = Uuid;

/// State of a drawing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrokeState {
    /// Waiting for pointer-down.
    #[default]
    Idle,
    /// Pointer is down and samples are accumulating.
    Drawing { id: StrokeId },
}

/// A finished stroke handed back to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommittedStroke {
    pub id: StrokeId,
    /// Simplified polyline.
    pub points: Vec<Point>,
    /// Pressure for each simplified point.
    pub pressures: Vec<f64>,
    /// Smoothed curve through `points`, for rendering.
    pub curve: CurveSegments,
    /// Canonical shape the stroke can snap to, if one was recognized
    /// confidently.
    pub shape: Option<RecognizedShape>,
}

/// Accumulates one stroke at a time.
#[derive(Debug, Clone, Default)]
pub struct StrokeSession {
    config: EngineConfig,
    state: StrokeState,
    /// Raw samples of the active stroke.
    points: Vec<Point>,
    /// Pressure for each raw sample.
    pressures: Vec<f64>,
}

impl StrokeSession {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> StrokeState {
        self.state
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, StrokeState::Drawing { .. })
    }

    /// Raw samples accumulated so far.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Pressure values parallel to [`points`](Self::points).
    pub fn pressures(&self) -> &[f64] {
        &self.pressures
    }

    /// Start a new stroke at `point`, discarding any unfinished one.
    pub fn begin(&mut self, point: Point, pressure: f64) -> StrokeId {
        if self.is_drawing() {
            log::debug!("Discarding unfinished stroke ({} points)", self.points.len());
        }
        self.points.clear();
        self.pressures.clear();

        let id = Uuid::new_v4();
        self.state = StrokeState::Drawing { id };
        self.push_sample(point, pressure);
        id
    }

    /// Append a sample to the active stroke and return the live preview, if
    /// any. Ignored when no stroke is active.
    pub fn add_point(&mut self, point: Point, pressure: f64) -> Option<RecognizedShape> {
        if !self.is_drawing() {
            return None;
        }
        self.push_sample(point, pressure);
        self.preview_shape()
    }

    fn push_sample(&mut self, point: Point, pressure: f64) {
        if !point.is_finite() {
            log::warn!("Rejected non-finite sample {:?}", point);
            return;
        }

        if let Some(&last) = self.points.last() {
            if distance(last, point) < self.config.min_point_distance {
                return;
            }
        }

        let pressure = if pressure.is_finite() { pressure.clamp(0.0, 1.0) } else { 1.0 };
        self.points.push(point);
        self.pressures.push(pressure);
    }

    /// Shape recognized on the raw buffer, if confident enough to show.
    pub fn preview_shape(&self) -> Option<RecognizedShape> {
        if !self.is_drawing() || self.points.len() <= self.config.preview_min_points {
            return None;
        }

        let shape = recognize_with(&self.points, &self.config.thresholds);
        (!shape.is_freehand() && shape.confidence > self.config.preview_confidence).then_some(shape)
    }

    /// Smoothed curve through the raw buffer.
    pub fn preview_curve(&self) -> CurveSegments {
        smooth(&self.points, self.config.preview_tension)
    }

    /// Finish the stroke.
    ///
    /// Returns `None` when no stroke is active or it has fewer than two
    /// samples; such a stroke is dropped.
    pub fn end(&mut self) -> Option<CommittedStroke> {
        let StrokeState::Drawing { id } = self.state else {
            return None;
        };
        self.state = StrokeState::Idle;

        let points = std::mem::take(&mut self.points);
        let pressures = std::mem::take(&mut self.pressures);

        if points.len() < 2 {
            log::debug!("Stroke {} cancelled with {} point(s)", id, points.len());
            return None;
        }

        let kept = simplify_indices(&points, self.config.simplify_epsilon);
        let simplified: Vec<Point> = kept.iter().map(|&i| points[i]).collect();
        let simplified_pressures: Vec<f64> = kept.iter().map(|&i| pressures[i]).collect();
        log::debug!(
            "Stroke {} simplified from {} to {} points",
            id,
            points.len(),
            simplified.len()
        );

        let curve = smooth(&simplified, self.config.render_tension);
        let shape = recognize_with(&simplified, &self.config.thresholds);
        let shape = (!shape.is_freehand() && shape.confidence >= self.config.commit_confidence)
            .then_some(shape);

        Some(CommittedStroke {
            id,
            points: simplified,
            pressures: simplified_pressures,
            curve,
            shape,
        })
    }

    /// Abandon the active stroke.
    pub fn cancel(&mut self) {
        self.state = StrokeState::Idle;
        self.points.clear();
        self.pressures.clear();
    }
}
