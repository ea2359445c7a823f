use ghkcore::processing::{opacity, TrailKind};
use ghkcore::{Clock, FilterConfig, SessionController, TrailSnapshot};
use serde::{Deserialize, Serialize};

/// One vertex of a rendered trail.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailPoint {
    pub x: f64,
    pub y: f64,
    /// Opacity of the segment starting at this point.
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrailView {
    pub kind: TrailKind,
    pub color: [u8; 3],
    pub points: Vec<TrailPoint>,
}

impl TrailView {
    fn from_snapshot(snapshot: &TrailSnapshot, kind: TrailKind) -> Self {
        let points = snapshot
            .get(kind)
            .iter()
            .enumerate()
            .map(|(index, cursor)| TrailPoint {
                x: cursor.data.pos.i,
                y: cursor.data.pos.j,
                opacity: opacity(index),
            })
            .collect();
        Self {
            kind,
            color: kind.stroke_rgb(),
            points,
        }
    }
}

/// Render-ready view of a session, most recent point first in every trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct VisualizationModel {
    pub trails: Vec<TrailView>,
    pub config: FilterConfig,
    pub processed: usize,
    pub rejected: usize,
}

impl VisualizationModel {
    pub fn from_snapshot(snapshot: &TrailSnapshot, config: FilterConfig) -> Self {
        Self {
            trails: TrailKind::ALL
                .iter()
                .map(|&kind| TrailView::from_snapshot(snapshot, kind))
                .collect(),
            config,
            ..Default::default()
        }
    }

    pub fn from_session<C: Clock>(session: &SessionController<C>) -> Self {
        let metrics = session.metrics();
        Self {
            processed: metrics.processed,
            rejected: metrics.rejected,
            ..Self::from_snapshot(&session.snapshot(), session.config().clone())
        }
    }
}
