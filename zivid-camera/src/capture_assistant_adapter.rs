use std::{sync::Arc, time::Duration};

use tracing::{debug, warn};

use crate::{
    camera_handle::CameraHandle,
    config::{CaptureFrameConfig, CaptureGeneralConfig},
    error::Error,
    settings_bridge::{SettingsBridge, NUM_CAPTURE_FRAMES},
    traits::{AmbientLightFrequency, CaptureAssistant, SuggestSettingsParameters},
};

/// Request of the `capture_assistant/suggest_settings` service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuggestSettingsRequest {
    pub max_capture_time: Duration,
    /// One of `AmbientLightFrequency::{NONE, HZ50, HZ60}`.
    pub ambient_light_frequency: u8,
}

/// Writes the suggestions of a [`CaptureAssistant`] into the 3D settings.
pub struct CaptureAssistantAdapter {
    camera: CameraHandle,
    assistant: Arc<dyn CaptureAssistant>,
    settings: Arc<SettingsBridge>,
}

impl std::fmt::Debug for CaptureAssistantAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureAssistantAdapter")
            .field("camera", &self.camera)
            .finish_non_exhaustive()
    }
}

impl CaptureAssistantAdapter {
    pub fn new(
        camera: CameraHandle,
        assistant: Arc<dyn CaptureAssistant>,
        settings: Arc<SettingsBridge>,
    ) -> Self {
        Self {
            camera,
            assistant,
            settings,
        }
    }

    /// On success the general config comes from the first suggestion, slots
    /// `0..n` hold the `n` suggested frames and every other slot is disabled.
    /// Nothing is written on failure.
    pub fn suggest_settings(&self, request: &SuggestSettingsRequest) -> Result<(), Error> {
        let parameters = SuggestSettingsParameters::new(
            request.max_capture_time,
            AmbientLightFrequency::from_wire(request.ambient_light_frequency)?,
        )
        .inspect_err(|e| warn!("Rejected capture assistant request: {}", e))?;
        debug!(?parameters, "suggest settings");

        let suggested = {
            let camera = self.camera.lock()?;
            self.assistant.suggest_settings(&**camera, &parameters)?
        };
        let Some(first) = suggested.first() else {
            return Err(Error::Device {
                message: "capture assistant suggested no frames".to_owned(),
            });
        };
        if suggested.len() > NUM_CAPTURE_FRAMES {
            return Err(Error::Device {
                message: format!(
                    "capture assistant suggested {} frames, at most {} are supported",
                    suggested.len(),
                    NUM_CAPTURE_FRAMES
                ),
            });
        }
        self.settings
            .replace_3d(
                CaptureGeneralConfig::from_settings(first),
                suggested.iter().map(CaptureFrameConfig::from_settings).collect(),
            )
            .map_err(|e| match e {
                Error::InvalidArgument { message } => Error::Device {
                    message: format!("capture assistant suggested invalid settings: {message}"),
                },
                e => e,
            })
            .inspect_err(|e| warn!("Suggested settings were not applied: {}", e))?;
        debug!(num_frames = suggested.len(), "applied suggested settings");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        clients::{DummyCaptureAssistant, FileCamera},
        config::Parameter,
        settings::Settings,
        traits::Camera,
    };

    struct FixedAssistant(usize);

    impl CaptureAssistant for FixedAssistant {
        fn suggest_settings(
            &self,
            _camera: &dyn Camera,
            _parameters: &SuggestSettingsParameters,
        ) -> Result<Vec<Settings>, Error> {
            Ok(vec![Settings::default(); self.0])
        }
    }

    fn adapter(
        assistant: impl CaptureAssistant + 'static,
    ) -> (CaptureAssistantAdapter, Arc<SettingsBridge>) {
        let settings = Arc::new(SettingsBridge::new());
        let adapter = CaptureAssistantAdapter::new(
            CameraHandle::new(FileCamera::synthetic(4, 4)),
            Arc::new(assistant),
            settings.clone(),
        );
        (adapter, settings)
    }

    fn request(millis: u64, frequency: u8) -> SuggestSettingsRequest {
        SuggestSettingsRequest {
            max_capture_time: Duration::from_millis(millis),
            ambient_light_frequency: frequency,
        }
    }

    #[test]
    fn test_invalid_requests_change_nothing() {
        let (adapter, settings) = adapter(DummyCaptureAssistant::new());
        settings
            .frame(4)
            .unwrap()
            .update(&[Parameter::new("enabled", true)])
            .unwrap();
        let before = settings.snapshot().unwrap();
        for req in [
            request(0, 0),
            request(199, 0),
            request(10_001, 0),
            request(1000, 3),
            request(1000, 255),
        ] {
            assert!(
                matches!(adapter.suggest_settings(&req), Err(Error::InvalidArgument { .. })),
                "{req:?}"
            );
        }
        assert_eq!(settings.snapshot().unwrap(), before);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let (adapter, _) = adapter(DummyCaptureAssistant::new());
        adapter.suggest_settings(&request(200, 0)).unwrap();
        adapter.suggest_settings(&request(10_000, 2)).unwrap();
    }

    #[test]
    fn test_write_back() {
        let (adapter, settings) = adapter(FixedAssistant(3));
        settings
            .frame(8)
            .unwrap()
            .update(&[Parameter::new("enabled", true)])
            .unwrap();
        adapter.suggest_settings(&request(1000, 1)).unwrap();
        let slots: Vec<_> = settings
            .snapshot()
            .unwrap()
            .frames
            .iter()
            .map(|(slot, _)| *slot)
            .collect();
        assert_eq!(slots, vec![0, 1, 2]);
    }

    #[test]
    fn test_bad_suggestion_count() {
        for count in [0, NUM_CAPTURE_FRAMES + 1] {
            let (adapter, settings) = adapter(FixedAssistant(count));
            assert!(matches!(
                adapter.suggest_settings(&request(1000, 0)),
                Err(Error::Device { .. })
            ));
            assert_eq!(settings.num_enabled_frames().unwrap(), 0);
        }
    }

    /// Suggests two usable acquisitions and one with a NaN brightness.
    struct NanAssistant;

    impl CaptureAssistant for NanAssistant {
        fn suggest_settings(
            &self,
            _camera: &dyn Camera,
            _parameters: &SuggestSettingsParameters,
        ) -> Result<Vec<Settings>, Error> {
            let good = Settings {
                iris: 40,
                red_balance: 4.0,
                ..Default::default()
            };
            let bad = Settings {
                brightness: f64::NAN,
                ..good.clone()
            };
            Ok(vec![good.clone(), good, bad])
        }
    }

    #[test]
    fn test_invalid_suggestion_changes_nothing() {
        let (adapter, settings) = adapter(NanAssistant);
        for slot in 0..NUM_CAPTURE_FRAMES {
            settings
                .frame(slot)
                .unwrap()
                .update(&[Parameter::new("enabled", true)])
                .unwrap();
        }
        let before = settings.snapshot().unwrap();
        assert!(matches!(
            adapter.suggest_settings(&request(1000, 0)),
            Err(Error::Device { .. })
        ));
        let after = settings.snapshot().unwrap();
        assert_eq!(after, before);
        assert_eq!(after.frames.len(), NUM_CAPTURE_FRAMES);
        assert_eq!(after.frames[0].1.iris, 22);
    }
}
