use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;

/// Latitude/longitude extremes of the visible map area.
///
/// Recomputed on every camera settle and never persisted. `west > east`
/// describes a box that crosses the antimeridian.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl ViewportBounds {
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Self {
        Self {
            north,
            south,
            east,
            west,
        }
    }

    pub fn crosses_antimeridian(&self) -> bool {
        self.west > self.east
    }

    /// Inclusive containment test.
    pub fn contains(&self, c: Coordinate) -> bool {
        if c.latitude < self.south || c.latitude > self.north {
            return false;
        }
        if self.crosses_antimeridian() {
            c.longitude >= self.west || c.longitude <= self.east
        } else {
            c.longitude >= self.west && c.longitude <= self.east
        }
    }
}
