pub mod bounds;
pub mod coordinate;
pub mod ids;
pub mod math;
pub mod time;

// Foundation crate: small, well-tested primitives only.
pub use bounds::*;
pub use coordinate::*;
pub use ids::*;
pub use time::*;
