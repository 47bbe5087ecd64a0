mod camera;
mod capture_assistant;
mod config_listener;
mod publisher;

pub use camera::*;
pub use capture_assistant::*;
pub use config_listener::*;
pub use publisher::*;
