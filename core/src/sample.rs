use crate::math::Vector2D;
use serde::{Deserialize, Serialize};

/// Raw pointer sample as delivered by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    pub x: f64,
    pub y: f64,
    /// Capture instant in seconds, in the session clock's domain.
    pub time: f64,
}

impl RawSample {
    pub fn new(x: f64, y: f64, time: f64) -> Self {
        Self { x, y, time }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.time.is_finite()
    }
}

/// Kinematic payload of a cursor state.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CursorData {
    pub acc: Vector2D,
    pub vel: Vector2D,
    pub pos: Vector2D,
}

impl CursorData {
    pub fn at(pos: Vector2D) -> Self {
        Self {
            acc: Vector2D::ZERO,
            vel: Vector2D::ZERO,
            pos,
        }
    }
}

/// A timestamped filter state or sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KalmanCursor {
    pub time: f64,
    /// Seconds elapsed since the previous state. `None` for freshly captured
    /// input that has not been timed yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta: Option<f64>,
    pub data: CursorData,
}

impl KalmanCursor {
    pub fn new(time: f64, delta: Option<f64>, data: CursorData) -> Self {
        Self { time, delta, data }
    }

    /// Zero state used to seed the estimation at session start.
    pub fn origin(time: f64) -> Self {
        Self::new(time, Some(0.0), CursorData::default())
    }

    pub fn from_raw(sample: &RawSample) -> Self {
        Self::new(
            sample.time,
            None,
            CursorData::at(Vector2D::new(sample.x, sample.y)),
        )
    }

    pub fn pos(&self) -> Vector2D {
        self.data.pos
    }

    pub fn with_delta(mut self, delta: f64) -> Self {
        self.delta = Some(delta);
        self
    }
}
