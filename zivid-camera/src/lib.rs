//! Driver core of Zivid 3D cameras: acquisition settings, captures and
//! sensor message encoding, independent of the transport.

mod camera_handle;
mod capture_assistant_adapter;
mod capture_controller;
mod clients;
mod config_server;
mod error;
mod frame;
mod node;
mod settings;
mod settings_bridge;
mod traits;

pub mod config;
pub mod encode;
pub mod msg;

pub use crate::{
    camera_handle::*, capture_assistant_adapter::*, capture_controller::*, clients::*,
    config::{
        Capture2DFrameConfig, CaptureFrameConfig, CaptureGeneralConfig, ParamDescription,
        ParamType, ParamValue, Parameter, ParameterSet,
    },
    config_server::ConfigServer,
    error::*,
    frame::*,
    node::*,
    settings::*,
    settings_bridge::*,
    traits::*,
};

// re-export
pub use flume;
