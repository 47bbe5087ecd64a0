use std::time::Duration;

use crate::{
    error::Error,
    settings::Settings,
    settings_bridge::NUM_CAPTURE_FRAMES,
    traits::{Camera, CaptureAssistant, SuggestSettingsParameters},
};

const MIN_EXPOSURE: Duration = Duration::from_micros(6_500);
const MAX_EXPOSURE: Duration = Duration::from_micros(100_000);
/// Time budget spent per suggested frame.
const TIME_PER_FRAME: Duration = Duration::from_millis(200);

/// Deterministic capture assistant for debug or tests.
///
/// Suggests one frame per 200 ms of budget (at most 10) with exposures
/// doubling from 10 ms, snapped to the ambient light period when one is given.
#[derive(Debug, Clone, Default)]
pub struct DummyCaptureAssistant;

impl DummyCaptureAssistant {
    pub fn new() -> Self {
        Self
    }
}

impl CaptureAssistant for DummyCaptureAssistant {
    fn suggest_settings(
        &self,
        camera: &dyn Camera,
        parameters: &SuggestSettingsParameters,
    ) -> Result<Vec<Settings>, Error> {
        if !camera.is_connected() {
            return Err(Error::Device {
                message: "capture assistant requires a connected camera".to_owned(),
            });
        }
        let num_frames = (parameters.max_capture_time().as_millis()
            / TIME_PER_FRAME.as_millis())
        .clamp(1, NUM_CAPTURE_FRAMES as u128) as usize;
        let period = parameters.ambient_light_frequency().period();
        Ok((0..num_frames)
            .map(|i| {
                let exposure = Duration::from_micros(10_000 << i.min(4)).min(MAX_EXPOSURE);
                Settings {
                    brightness: 1.8,
                    exposure_time: snap_to_period(exposure, period),
                    iris: 17 + 5 * i as u32,
                    gain: if i >= 5 { 2.0 } else { 1.0 },
                    ..Default::default()
                }
            })
            .collect())
    }
}

fn snap_to_period(exposure: Duration, period: Option<Duration>) -> Duration {
    let Some(period) = period else {
        return exposure;
    };
    let periods = (exposure.as_micros() / period.as_micros()).max(1) as u32;
    let snapped = period * periods;
    if snapped < MIN_EXPOSURE {
        period * (periods + 1)
    } else {
        snapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{clients::FileCamera, AmbientLightFrequency};

    fn suggest(millis: u64, frequency: AmbientLightFrequency) -> Vec<Settings> {
        let camera = FileCamera::synthetic(4, 4);
        let parameters =
            SuggestSettingsParameters::new(Duration::from_millis(millis), frequency).unwrap();
        DummyCaptureAssistant::new()
            .suggest_settings(&camera, &parameters)
            .unwrap()
    }

    #[test]
    fn test_number_of_frames() {
        assert_eq!(suggest(200, AmbientLightFrequency::None).len(), 1);
        assert_eq!(suggest(1200, AmbientLightFrequency::None).len(), 6);
        assert_eq!(suggest(10_000, AmbientLightFrequency::None).len(), 10);
    }

    #[test]
    fn test_exposure_follows_ambient_light() {
        for s in suggest(10_000, AmbientLightFrequency::Hz50) {
            assert_eq!(s.exposure_time.as_micros() % 10_000, 0);
        }
        for s in suggest(10_000, AmbientLightFrequency::Hz60) {
            assert_eq!(s.exposure_time.as_micros() % 8_333, 0);
            assert!(s.exposure_time <= MAX_EXPOSURE);
        }
    }

    #[test]
    fn test_requires_connected_camera() {
        let mut camera = FileCamera::synthetic(4, 4);
        camera.set_connected(false);
        let parameters =
            SuggestSettingsParameters::new(Duration::from_secs(1), AmbientLightFrequency::None)
                .unwrap();
        assert!(matches!(
            DummyCaptureAssistant::new().suggest_settings(&camera, &parameters),
            Err(Error::Device { .. })
        ));
    }
}
