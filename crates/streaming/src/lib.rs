pub mod error;
pub mod gateway;
pub mod pipeline;
pub mod protocol;
pub mod request;
pub mod tracker;

pub use error::*;
pub use gateway::*;
pub use pipeline::*;
pub use protocol::*;
pub use request::*;
pub use tracker::*;
