use std::time::Duration;

use super::{parameter_set, CaptureGeneralConfig};
use crate::settings::Settings;

parameter_set! {
    /// Settings of one 3D frame slot.
    pub struct CaptureFrameConfig ("CaptureFrame") {
        /// Include this frame in the next capture.
        enabled: bool = false, [false, true];
        /// Project patterns in both directions to reduce contrast distortion.
        bidirectional: bool = false, [false, true];
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

impl CaptureFrameConfig {
    /// Slot config that reproduces `settings`, enabled.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            enabled: true,
            bidirectional: settings.bidirectional,
            brightness: settings.brightness,
            exposure_time: micros_i32(settings.exposure_time),
            gain: settings.gain,
            iris: i32::try_from(settings.iris).unwrap_or(i32::MAX),
        }
    }

    pub fn to_settings(&self, general: &CaptureGeneralConfig) -> Settings {
        Settings {
            bidirectional: self.bidirectional,
            brightness: self.brightness,
            exposure_time: Duration::from_micros(self.exposure_time.max(0) as u64),
            gain: self.gain,
            iris: self.iris.max(0) as u32,
            blue_balance: general.blue_balance,
            red_balance: general.red_balance,
            filters: general.filters(),
        }
    }
}

pub(crate) fn micros_i32(d: Duration) -> i32 {
    i32::try_from(d.as_micros()).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_settings_and_back() {
        let frame = CaptureFrameConfig {
            enabled: true,
            bidirectional: true,
            brightness: 1.5,
            exposure_time: 20000,
            gain: 2.0,
            iris: 30,
        };
        let general = CaptureGeneralConfig {
            red_balance: 2.0,
            ..Default::default()
        };
        let settings = frame.to_settings(&general);
        assert_eq!(settings.exposure_time, Duration::from_millis(20));
        assert_eq!(settings.iris, 30);
        assert_eq!(settings.red_balance, 2.0);
        assert_eq!(CaptureFrameConfig::from_settings(&settings), frame);
        assert_eq!(CaptureGeneralConfig::from_settings(&settings), general);
    }

    #[test]
    fn test_default_is_disabled() {
        let frame = CaptureFrameConfig::default();
        assert!(!frame.enabled);
        let settings = frame.to_settings(&CaptureGeneralConfig::default());
        assert_eq!(settings, Settings::default());
    }
}
