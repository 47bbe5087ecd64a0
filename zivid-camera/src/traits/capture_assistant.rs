use std::{cmp::Ordering, ops::RangeInclusive, time::Duration};

use auto_impl::auto_impl;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{error::Error, settings::Settings, traits::Camera};

/// Valid range of [`SuggestSettingsParameters::max_capture_time`].
pub const MAX_CAPTURE_TIME_RANGE: RangeInclusive<Duration> =
    Duration::from_millis(200)..=Duration::from_secs(10);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum AmbientLightFrequency {
    #[default]
    None,
    Hz50,
    Hz60,
}

impl AmbientLightFrequency {
    /// Wire values used by the `capture_assistant/suggest_settings` service.
    pub const NONE: u8 = 0;
    pub const HZ50: u8 = 1;
    pub const HZ60: u8 = 2;

    pub fn from_wire(value: u8) -> Result<Self, Error> {
        match value {
            Self::NONE => Ok(Self::None),
            Self::HZ50 => Ok(Self::Hz50),
            Self::HZ60 => Ok(Self::Hz60),
            _ => Err(Error::invalid_argument(format!(
                "ambient_light_frequency {value} is not one of none({}), 50Hz({}), 60Hz({})",
                Self::NONE,
                Self::HZ50,
                Self::HZ60
            ))),
        }
    }

    pub fn to_wire(self) -> u8 {
        match self {
            Self::None => Self::NONE,
            Self::Hz50 => Self::HZ50,
            Self::Hz60 => Self::HZ60,
        }
    }

    /// Period of the ambient light flicker, if any.
    pub fn period(self) -> Option<Duration> {
        match self {
            Self::None => None,
            Self::Hz50 => Some(Duration::from_micros(10_000)),
            Self::Hz60 => Some(Duration::from_micros(8_333)),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SuggestSettingsParameters {
    max_capture_time: Duration,
    ambient_light_frequency: AmbientLightFrequency,
}

impl SuggestSettingsParameters {
    /// Rounds `max_capture_time` to whole milliseconds and checks it against
    /// [`MAX_CAPTURE_TIME_RANGE`].
    pub fn new(
        max_capture_time: Duration,
        ambient_light_frequency: AmbientLightFrequency,
    ) -> Result<Self, Error> {
        let max_capture_time = round_to_millis(max_capture_time);
        if !MAX_CAPTURE_TIME_RANGE.contains(&max_capture_time) {
            return Err(Error::invalid_argument(format!(
                "max_capture_time {:?} is out of range {:?}..={:?}",
                max_capture_time,
                MAX_CAPTURE_TIME_RANGE.start(),
                MAX_CAPTURE_TIME_RANGE.end()
            )));
        }
        Ok(Self {
            max_capture_time,
            ambient_light_frequency,
        })
    }

    pub fn max_capture_time(&self) -> Duration {
        self.max_capture_time
    }

    pub fn ambient_light_frequency(&self) -> AmbientLightFrequency {
        self.ambient_light_frequency
    }
}

/// Rounds to the nearest millisecond, ties to even.
fn round_to_millis(d: Duration) -> Duration {
    let nanos = d.as_nanos();
    let (millis, rest) = (nanos / 1_000_000, nanos % 1_000_000);
    let millis = match rest.cmp(&500_000) {
        Ordering::Less => millis,
        Ordering::Greater => millis + 1,
        Ordering::Equal => millis + (millis & 1),
    };
    Duration::from_millis(millis.min(u64::MAX as u128) as u64)
}

/// Proposes acquisition settings for a time budget and ambient light.
#[auto_impl(&, Box, Arc)]
pub trait CaptureAssistant: Send + Sync {
    /// Returns one settings entry per recommended acquisition, in order.
    fn suggest_settings(
        &self,
        camera: &dyn Camera,
        parameters: &SuggestSettingsParameters,
    ) -> Result<Vec<Settings>, Error>;
}
