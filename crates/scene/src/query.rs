use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::truck::Truck;

/// Ordering applied after filtering.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Highest rating first; unrated counts as 0.
    Rating,
    /// Nearest first. Trucks must be annotated beforehand.
    Distance,
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortKey::Rating => write!(f, "rating"),
            SortKey::Distance => write!(f, "distance"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSortKey(pub String);

impl std::fmt::Display for UnknownSortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown sort key {:?} (expected rating or distance)", self.0)
    }
}

impl std::error::Error for UnknownSortKey {}

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rating" => Ok(SortKey::Rating),
            "distance" => Ok(SortKey::Distance),
            _ => Err(UnknownSortKey(s.to_string())),
        }
    }
}

/// Set of category names picked in the category selector.
///
/// Empty means "no filter". A truck matches when it carries at least one of
/// the selected categories; this is not exact-set equality.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryFilter(BTreeSet<String>);

impl CategoryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, category: &str) -> bool {
        self.0.contains(category)
    }

    pub fn insert(&mut self, category: impl Into<String>) -> bool {
        self.0.insert(category.into())
    }

    pub fn remove(&mut self, category: &str) -> bool {
        self.0.remove(category)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(String::as_str)
    }

    pub fn matches(&self, truck: &Truck) -> bool {
        if self.is_empty() {
            return true;
        }
        // Iterate the smaller side.
        if truck.categories.len() <= self.0.len() {
            truck.categories.iter().any(|c| self.0.contains(c))
        } else {
            self.0.iter().any(|c| truck.categories.contains(c))
        }
    }
}

impl<S: Into<String>> FromIterator<S> for CategoryFilter {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        CategoryFilter(iter.into_iter().map(Into::into).collect())
    }
}

/// Filter by category, then order by `sort_key`.
///
/// Pure: the input is copied, never reordered in place. The sort is stable,
/// so trucks with equal keys keep their relative input order. With
/// `sort_key == None` the filtered order is returned as is.
///
/// Sorting by distance assumes the trucks were annotated; any truck without
/// a distance sorts after all annotated ones.
pub fn apply(trucks: &[Truck], category_filters: &CategoryFilter, sort_key: Option<SortKey>) -> Vec<Truck> {
    let mut out: Vec<Truck> = trucks
        .iter()
        .filter(|t| category_filters.matches(t))
        .cloned()
        .collect();

    match sort_key {
        Some(SortKey::Rating) => {
            out.sort_by(|a, b| b.rating_or_zero().total_cmp(&a.rating_or_zero()));
        }
        Some(SortKey::Distance) => {
            out.sort_by(|a, b| {
                let da = a.distance.unwrap_or(f64::INFINITY);
                let db = b.distance.unwrap_or(f64::INFINITY);
                da.total_cmp(&db)
            });
        }
        None => {}
    }

    out
}
