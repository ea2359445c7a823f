use crate::sample::KalmanCursor;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Maximum number of states kept per trail.
pub const PATH_LENGTH: usize = 64;

/// Opacity of the `index`-th most recent trail segment:
/// `log10(1 / index) + 1`, clamped to `[0, 1]`.
pub fn opacity(index: usize) -> f64 {
    if index == 0 {
        return 1.0;
    }
    ((1.0 / index as f64).log10() + 1.0).clamp(0.0, 1.0)
}

/// Which history a trail records, with the stroke colour it is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrailKind {
    Raw,
    Measured,
    Filtered,
}

impl TrailKind {
    pub const ALL: [TrailKind; 3] = [TrailKind::Raw, TrailKind::Measured, TrailKind::Filtered];

    pub fn stroke_rgb(&self) -> [u8; 3] {
        match self {
            TrailKind::Raw => [0, 255, 255],
            TrailKind::Measured => [255, 0, 255],
            TrailKind::Filtered => [255, 255, 0],
        }
    }
}

/// Bounded most-recent-first history of states.
#[derive(Debug, Clone)]
pub struct Trail {
    items: VecDeque<KalmanCursor>,
    max_len: usize,
}

impl Trail {
    pub fn new() -> Self {
        Self::with_capacity(PATH_LENGTH)
    }

    pub fn with_capacity(max_len: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(max_len + 1),
            max_len,
        }
    }

    /// Inserts at the head, evicting the oldest entry past the bound.
    pub fn push_front(&mut self, item: KalmanCursor) {
        self.items.push_front(item);
        if self.items.len() > self.max_len {
            self.items.pop_back();
        }
    }

    pub fn front(&self) -> Option<&KalmanCursor> {
        self.items.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &KalmanCursor> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn to_vec(&self) -> Vec<KalmanCursor> {
        self.items.iter().copied().collect()
    }
}

impl Default for Trail {
    fn default() -> Self {
        Self::new()
    }
}

/// The three display histories of a session.
#[derive(Debug, Clone, Default)]
pub struct Trails {
    pub raw: Trail,
    pub measured: Trail,
    pub filtered: Trail,
}

impl Trails {
    pub fn clear(&mut self) {
        self.raw.clear();
        self.measured.clear();
        self.filtered.clear();
    }

    pub fn snapshot(&self) -> TrailSnapshot {
        TrailSnapshot {
            raw: self.raw.to_vec(),
            measured: self.measured.to_vec(),
            filtered: self.filtered.to_vec(),
        }
    }
}

/// Owned copy of all trails, safe to hand to a renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrailSnapshot {
    pub raw: Vec<KalmanCursor>,
    pub measured: Vec<KalmanCursor>,
    pub filtered: Vec<KalmanCursor>,
}

impl TrailSnapshot {
    pub fn get(&self, kind: TrailKind) -> &[KalmanCursor] {
        match kind {
            TrailKind::Raw => &self.raw,
            TrailKind::Measured => &self.measured,
            TrailKind::Filtered => &self.filtered,
        }
    }
}
