use auto_impl::auto_impl;

use crate::{
    error::Error,
    frame::{CameraIntrinsics, Frame, Frame2D},
    settings::{Settings, Settings2D},
};

/// A connected camera handle.
///
/// Acquisition takes `&mut self`: a handle performs one acquisition at a time.
#[auto_impl(&mut, Box)]
pub trait Camera: Send {
    fn model_name(&self) -> Result<String, Error>;
    fn serial_number(&self) -> Result<String, Error>;
    fn is_connected(&self) -> bool;
    fn intrinsics(&self) -> Result<CameraIntrinsics, Error>;
    /// Acquires one frame per settings entry and returns them merged into one frame.
    fn capture(&mut self, settings: &[Settings]) -> Result<Frame, Error>;
    fn capture_2d(&mut self, settings: &Settings2D) -> Result<Frame2D, Error>;
}
