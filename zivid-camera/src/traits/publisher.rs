use auto_impl::auto_impl;

use crate::{
    error::Error,
    msg::{Capture2DOutput, CaptureOutput},
};

/// Sink for the messages of one successful capture.
///
/// Implementations receive every message family of a capture in one call.
#[auto_impl(&, Box, Arc)]
pub trait CapturePublisher: Send + Sync {
    fn publish(&self, output: CaptureOutput) -> Result<(), Error>;
    fn publish_2d(&self, output: Capture2DOutput) -> Result<(), Error>;
}
