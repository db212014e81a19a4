pub mod geodesy;
pub mod travel;

pub use geodesy::*;
pub use travel::*;
