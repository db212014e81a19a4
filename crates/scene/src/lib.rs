pub mod distance;
pub mod query;
pub mod selection;
pub mod truck;

pub use distance::annotate;
pub use query::{CategoryFilter, SortKey, apply};
pub use selection::{FetchStatus, TruckSelectionStore};
pub use truck::*;
