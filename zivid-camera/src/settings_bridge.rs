use anyhow::format_err;
use tracing::debug;

use crate::{
    config::{Capture2DFrameConfig, CaptureFrameConfig, CaptureGeneralConfig},
    config_server::{ConfigServer, WriteGate},
    error::Error,
};

/// Number of 3D frame slots.
pub const NUM_CAPTURE_FRAMES: usize = 10;
/// Number of 2D frame slots.
pub const NUM_CAPTURE_2D_FRAMES: usize = 1;

pub const CAPTURE_GENERAL: &str = "capture/general";

/// Name of the endpoint of 3D frame slot `slot`.
pub fn capture_frame_name(slot: usize) -> String {
    format!("capture/frame_{slot}")
}

/// Name of the endpoint of 2D frame slot `slot`.
pub fn capture_2d_frame_name(slot: usize) -> String {
    format!("capture_2d/frame_{slot}")
}

/// A configuration endpoint found by [`SettingsBridge::resolve`].
#[derive(Debug, Clone, Copy)]
pub enum Endpoint<'a> {
    CaptureGeneral(&'a ConfigServer<CaptureGeneralConfig>),
    CaptureFrame(&'a ConfigServer<CaptureFrameConfig>),
    Capture2DFrame(&'a ConfigServer<Capture2DFrameConfig>),
}

impl Endpoint<'_> {
    pub fn name(&self) -> &str {
        match self {
            Endpoint::CaptureGeneral(s) => s.name(),
            Endpoint::CaptureFrame(s) => s.name(),
            Endpoint::Capture2DFrame(s) => s.name(),
        }
    }
}

/// Point in time view of everything a 3D capture needs.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureSnapshot {
    pub general: CaptureGeneralConfig,
    /// Enabled slots only, in slot order.
    pub frames: Vec<(usize, CaptureFrameConfig)>,
}

/// All acquisition settings of the driver, exposed as configuration endpoints.
#[derive(Debug)]
pub struct SettingsBridge {
    gate: WriteGate,
    general: ConfigServer<CaptureGeneralConfig>,
    frames: [ConfigServer<CaptureFrameConfig>; NUM_CAPTURE_FRAMES],
    frames_2d: [ConfigServer<Capture2DFrameConfig>; NUM_CAPTURE_2D_FRAMES],
}

impl Default for SettingsBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsBridge {
    pub fn new() -> Self {
        let gate = WriteGate::default();
        Self {
            general: ConfigServer::with_gate(CAPTURE_GENERAL, 0, gate.clone()),
            frames: std::array::from_fn(|i| {
                ConfigServer::with_gate(capture_frame_name(i), i, gate.clone())
            }),
            frames_2d: std::array::from_fn(|i| {
                ConfigServer::with_gate(capture_2d_frame_name(i), i, gate.clone())
            }),
            gate,
        }
    }

    pub fn general(&self) -> &ConfigServer<CaptureGeneralConfig> {
        &self.general
    }

    pub fn frame(&self, slot: usize) -> Result<&ConfigServer<CaptureFrameConfig>, Error> {
        self.frames
            .get(slot)
            .ok_or_else(|| Error::not_found(capture_frame_name(slot)))
    }

    pub fn frame_2d(&self, slot: usize) -> Result<&ConfigServer<Capture2DFrameConfig>, Error> {
        self.frames_2d
            .get(slot)
            .ok_or_else(|| Error::not_found(capture_2d_frame_name(slot)))
    }

    pub fn frames(&self) -> &[ConfigServer<CaptureFrameConfig>] {
        &self.frames
    }

    pub fn frames_2d(&self) -> &[ConfigServer<Capture2DFrameConfig>] {
        &self.frames_2d
    }

    /// Names of every endpoint, general first.
    pub fn endpoint_names(&self) -> Vec<String> {
        std::iter::once(self.general.name())
            .chain(self.frames.iter().map(|s| s.name()))
            .chain(self.frames_2d.iter().map(|s| s.name()))
            .map(str::to_owned)
            .collect()
    }

    /// Finds an endpoint by name. Leading and trailing `/` are ignored.
    ///
    /// # Example
    ///
    /// ```
    /// let bridge = zivid_camera::SettingsBridge::new();
    /// assert!(bridge.resolve("/capture/frame_9/").is_ok());
    /// assert!(bridge.resolve("capture/frame_10").is_err());
    /// ```
    pub fn resolve(&self, name: &str) -> Result<Endpoint<'_>, Error> {
        let trimmed = name.trim_matches('/');
        if trimmed == CAPTURE_GENERAL {
            return Ok(Endpoint::CaptureGeneral(&self.general));
        }
        let not_found = || Error::not_found(name);
        let (group, frame) = trimmed.split_once('/').ok_or_else(not_found)?;
        let slot: usize = frame
            .strip_prefix("frame_")
            .and_then(|s| s.parse().ok())
            .ok_or_else(not_found)?;
        match group {
            "capture" if capture_frame_name(slot) == trimmed => {
                self.frame(slot).map(Endpoint::CaptureFrame)
            }
            "capture_2d" if capture_2d_frame_name(slot) == trimmed => {
                self.frame_2d(slot).map(Endpoint::Capture2DFrame)
            }
            _ => Err(not_found()),
        }
    }

    /// Reads the general config and every enabled 3D slot with no write in between.
    pub fn snapshot(&self) -> Result<CaptureSnapshot, Error> {
        let _gate = self
            .gate
            .write()
            .map_err(|e| format_err!("Failed to lock settings : {}", e))?;
        let general = self.general.current()?;
        let mut frames = Vec::new();
        for server in &self.frames {
            let config = server.current()?;
            if config.enabled {
                frames.push((server.slot(), config));
            }
        }
        Ok(CaptureSnapshot { general, frames })
    }

    pub fn num_enabled_frames(&self) -> Result<usize, Error> {
        Ok(self.snapshot()?.frames.len())
    }

    /// Writes the general config and the given slot configs as one change.
    /// Slots past the end of `frames` are disabled. Nothing is written if
    /// any config is invalid.
    pub fn replace_3d(
        &self,
        general: CaptureGeneralConfig,
        frames: Vec<CaptureFrameConfig>,
    ) -> Result<(), Error> {
        if frames.len() > NUM_CAPTURE_FRAMES {
            return Err(Error::invalid_argument(format!(
                "{} frames do not fit into {} slots",
                frames.len(),
                NUM_CAPTURE_FRAMES
            )));
        }
        let (general, frames) = {
            let _gate = self
                .gate
                .write()
                .map_err(|e| format_err!("Failed to lock settings : {}", e))?;
            let general = self.general.validate(general)?;
            let mut validated = Vec::with_capacity(NUM_CAPTURE_FRAMES);
            let mut frames = frames.into_iter();
            for server in &self.frames {
                let config = match frames.next() {
                    Some(config) => server.validate(config)?,
                    None => CaptureFrameConfig {
                        enabled: false,
                        ..server.current()?
                    },
                };
                validated.push(config);
            }

            self.general.commit(general.clone())?;
            for (server, config) in self.frames.iter().zip(&validated) {
                server.commit(config.clone())?;
            }
            (general, validated)
        };
        debug!(num_frames = frames.iter().filter(|f| f.enabled).count(), "replaced 3D settings");
        self.general.notify(&general);
        for (server, config) in self.frames.iter().zip(&frames) {
            server.notify(config);
        }
        Ok(())
    }
}
