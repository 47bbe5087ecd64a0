mod dummy_capture_assistant;
mod file_camera;
mod publisher_group;
mod topic_publisher;

pub use dummy_capture_assistant::*;
pub use file_camera::*;
pub use publisher_group::*;
pub use topic_publisher::*;
