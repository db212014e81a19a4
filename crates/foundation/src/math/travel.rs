/// Minutes per mile when driving, as shown next to a truck's distance.
pub const DRIVE_MINUTES_PER_MILE: f64 = 3.0;
/// Minutes per mile when walking.
pub const WALK_MINUTES_PER_MILE: f64 = 20.0;

/// Rough travel times derived from a distance in miles.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TravelEstimate {
    pub drive_minutes: f64,
    pub walk_minutes: f64,
}

impl TravelEstimate {
    pub fn from_miles(miles: f64) -> Self {
        Self {
            drive_minutes: miles * DRIVE_MINUTES_PER_MILE,
            walk_minutes: miles * WALK_MINUTES_PER_MILE,
        }
    }
}
