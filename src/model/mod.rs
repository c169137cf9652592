pub mod config;
pub mod link;
pub mod seed;

pub use config::*;
pub use link::*;
