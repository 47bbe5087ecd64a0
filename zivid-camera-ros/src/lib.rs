//! ROS1 binding of the Zivid camera driver.

#![cfg(feature = "ros")]
#![warn(rust_2018_idioms)]

mod error;
pub mod msg;
mod msg_utils;
mod parameter_endpoint;
mod ros_capture_publisher;
mod ros_zivid_camera;

// re-export
pub use rosrust::{init, is_ok, spin};

pub use crate::{
    error::Error, msg_utils::*, parameter_endpoint::*, ros_capture_publisher::*,
    ros_zivid_camera::*,
};
