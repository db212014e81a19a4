pub mod commands;
pub mod config;
pub mod output;

pub use commands::*;
pub use config::Config;
