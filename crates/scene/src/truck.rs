use std::collections::BTreeSet;

use foundation::coordinate::Coordinate;
use foundation::ids::TruckId;
use foundation::math::TravelEstimate;
use serde::{Deserialize, Serialize};

/// A food truck or stand as returned by the viewport query.
///
/// `distance` is never sent by the backend. It is attached by
/// [`crate::distance::annotate`] relative to one user location and is only
/// meaningful until that location changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Truck {
    pub id: TruckId,
    pub name: String,
    pub coordinate: Coordinate,
    #[serde(default)]
    pub open_status: bool,
    #[serde(default)]
    pub categories: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

impl Truck {
    pub fn new(id: impl Into<TruckId>, name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            coordinate,
            open_status: false,
            categories: BTreeSet::new(),
            rating: None,
            distance: None,
        }
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_open_status(mut self, open: bool) -> Self {
        self.open_status = open;
        self
    }

    /// Rating used for ranking; unrated trucks rank as 0.
    pub fn rating_or_zero(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }

    pub fn travel_estimate(&self) -> Option<TravelEstimate> {
        self.distance.map(TravelEstimate::from_miles)
    }
}
