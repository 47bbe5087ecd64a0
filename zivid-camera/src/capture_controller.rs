use std::{
    sync::{
        atomic::{AtomicU32, Ordering},
        Arc,
    },
    time::SystemTime,
};

use tracing::{debug, warn};

use crate::{
    camera_handle::CameraHandle,
    encode,
    error::Error,
    msg::Header,
    settings::Settings,
    settings_bridge::SettingsBridge,
    traits::CapturePublisher,
};

/// Runs captures with the current settings and publishes the results.
pub struct CaptureController {
    camera: CameraHandle,
    settings: Arc<SettingsBridge>,
    publisher: Arc<dyn CapturePublisher>,
    frame_id: String,
    seq: AtomicU32,
}

impl std::fmt::Debug for CaptureController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureController")
            .field("frame_id", &self.frame_id)
            .field("seq", &self.seq)
            .finish_non_exhaustive()
    }
}

impl CaptureController {
    pub fn new(
        camera: CameraHandle,
        settings: Arc<SettingsBridge>,
        publisher: Arc<dyn CapturePublisher>,
        frame_id: impl Into<String>,
    ) -> Self {
        Self {
            camera,
            settings,
            publisher,
            frame_id: frame_id.into(),
            seq: AtomicU32::new(0),
        }
    }

    pub fn frame_id(&self) -> &str {
        &self.frame_id
    }

    /// Captures with every enabled 3D frame slot and publishes color, depth and points.
    pub fn capture(&self) -> Result<(), Error> {
        let snapshot = self.settings.snapshot()?;
        if snapshot.frames.is_empty() {
            warn!("Capture requested with no frames enabled");
            return Err(Error::invalid_state(
                "No frames are enabled. Enable at least one capture/frame_N before capturing.",
            ));
        }
        let settings: Vec<Settings> = snapshot
            .frames
            .iter()
            .map(|(_, frame)| frame.to_settings(&snapshot.general))
            .collect();
        let slots: Vec<usize> = snapshot.frames.iter().map(|(slot, _)| *slot).collect();
        debug!(?slots, "capture");

        let mut camera = self.camera.lock()?;
        let frame = camera.capture(&settings).inspect_err(|e| {
            warn!("Capture failed: {}", e);
        })?;
        let intrinsics = camera.intrinsics()?;
        let output = encode::encode_capture(self.header(frame.stamp), &frame, &intrinsics);
        // Sink failures after a successful acquisition are only logged.
        if let Err(e) = self.publisher.publish(output) {
            warn!("Capture was not published to every sink: {}", e);
        }
        self.seq.fetch_add(1, Ordering::SeqCst);
        debug!(num_acquisitions = frame.settings.len(), "capture done");
        Ok(())
    }

    /// Captures a 2D image with 2D frame slot 0 and publishes color only.
    pub fn capture_2d(&self) -> Result<(), Error> {
        let config = self.settings.frame_2d(0)?.current()?;
        if !config.enabled {
            warn!("2D capture requested with frame 0 disabled");
            return Err(Error::invalid_state(
                "2D frame 0 is disabled. Enable capture_2d/frame_0 before capturing.",
            ));
        }
        debug!("capture 2D");

        let mut camera = self.camera.lock()?;
        let frame = camera.capture_2d(&config.to_settings()).inspect_err(|e| {
            warn!("2D capture failed: {}", e);
        })?;
        let intrinsics = camera.intrinsics()?;
        let output = encode::encode_capture_2d(self.header(frame.stamp), &frame, &intrinsics);
        if let Err(e) = self.publisher.publish_2d(output) {
            warn!("2D capture was not published to every sink: {}", e);
        }
        self.seq.fetch_add(1, Ordering::SeqCst);
        debug!(exposure_time = ?frame.settings.exposure_time, "capture 2D done");
        Ok(())
    }

    /// Number of successful acquisitions so far.
    pub fn num_captures(&self) -> u32 {
        self.seq.load(Ordering::SeqCst)
    }

    fn header(&self, stamp: SystemTime) -> Header {
        Header {
            seq: self.seq.load(Ordering::SeqCst),
            stamp,
            frame_id: self.frame_id.clone(),
        }
    }
}
