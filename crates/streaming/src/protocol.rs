//! Wire types exchanged with the truck backend.
//!
//! This module defines:
//! - The viewport query request (client → backend)
//! - Recorded camera events, used to replay a pan/zoom session
//!
//! The response of a viewport query is a plain JSON array of
//! [`scene::Truck`] records.

use foundation::bounds::ViewportBounds;
use foundation::coordinate::Coordinate;
use serde::{Deserialize, Serialize};

/// Bounding-box query for trucks in the visible map area.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportQuery {
    pub top_lat: f64,
    pub bottom_lat: f64,
    pub left_lng: f64,
    pub right_lng: f64,
}

impl ViewportQuery {
    /// Whether `c` lies inside the queried box (inclusive, antimeridian aware).
    pub fn contains(&self, c: Coordinate) -> bool {
        ViewportBounds::from(*self).contains(c)
    }
}

impl From<ViewportBounds> for ViewportQuery {
    fn from(b: ViewportBounds) -> Self {
        Self {
            top_lat: b.north,
            bottom_lat: b.south,
            left_lng: b.west,
            right_lng: b.east,
        }
    }
}

impl From<ViewportQuery> for ViewportBounds {
    fn from(q: ViewportQuery) -> Self {
        ViewportBounds::new(q.top_lat, q.bottom_lat, q.right_lng, q.left_lng)
    }
}

/// One camera-change event from a recorded session.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraEvent {
    /// Milliseconds since the start of the recording.
    pub at_ms: u64,
    pub bounds: ViewportBounds,
}
