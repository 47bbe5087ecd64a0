mod error;
mod node_config;
pub mod utils;

pub use error::*;
pub use node_config::*;
