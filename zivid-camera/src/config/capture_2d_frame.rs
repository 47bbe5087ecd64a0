use std::time::Duration;

use super::{capture_frame::micros_i32, parameter_set};
use crate::settings::Settings2D;

parameter_set! {
    /// Settings of the single 2D frame slot.
    pub struct Capture2DFrameConfig ("Capture2DFrame") {
        /// Allow 2D captures.
        enabled: bool = false, [false, true];
        /// Projector brightness.
        brightness: f64 = 1.0, [0.0, 1.8];
        /// Exposure time in microseconds.
        exposure_time: i32 = 10000, [6500, 100000];
        /// Analog gain.
        gain: f64 = 1.0, [1.0, 16.0];
        /// Aperture setting.
        iris: i32 = 22, [0, 72];
    }
}

impl Capture2DFrameConfig {
    pub fn from_settings(settings: &Settings2D) -> Self {
        Self {
            enabled: true,
            brightness: settings.brightness,
            exposure_time: micros_i32(settings.exposure_time),
            gain: settings.gain,
            iris: i32::try_from(settings.iris).unwrap_or(i32::MAX),
        }
    }

    pub fn to_settings(&self) -> Settings2D {
        Settings2D {
            brightness: self.brightness,
            exposure_time: Duration::from_micros(self.exposure_time.max(0) as u64),
            gain: self.gain,
            iris: self.iris.max(0) as u32,
        }
    }
}
