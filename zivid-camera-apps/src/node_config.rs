use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;
use zivid_camera::{
    FileCamera, Parameter, ZividCamera, ZividCameraBuilder, DEFAULT_FRAME_ID,
    FILE_CAMERA_HEIGHT, FILE_CAMERA_SERIAL_NUMBER, FILE_CAMERA_WIDTH,
};

use crate::Error;

pub const DEFAULT_NAMESPACE: &str = "zivid_camera";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ZividCameraNodeConfig {
    /// Namespace of every service, topic and parameter endpoint.
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// `frame_id` of every published header.
    #[serde(default = "default_frame_id")]
    pub frame_id: String,
    #[serde(default = "default_queue_size")]
    pub queue_size: usize,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub initial: InitialSettingsConfig,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_owned()
}

fn default_frame_id() -> String {
    DEFAULT_FRAME_ID.to_owned()
}

const fn default_queue_size() -> usize {
    1
}

impl Default for ZividCameraNodeConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            frame_id: default_frame_id(),
            queue_size: default_queue_size(),
            camera: CameraConfig::default(),
            initial: InitialSettingsConfig::default(),
        }
    }
}

/// The camera the node connects to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", deny_unknown_fields)]
pub enum CameraConfig {
    /// Replays the misc objects scene.
    FileCamera {
        #[serde(default = "default_serial_number")]
        serial_number: String,
        #[serde(default = "default_width")]
        width: usize,
        #[serde(default = "default_height")]
        height: usize,
    },
}

fn default_serial_number() -> String {
    FILE_CAMERA_SERIAL_NUMBER.to_owned()
}

const fn default_width() -> usize {
    FILE_CAMERA_WIDTH
}

const fn default_height() -> usize {
    FILE_CAMERA_HEIGHT
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self::FileCamera {
            serial_number: default_serial_number(),
            width: default_width(),
            height: default_height(),
        }
    }
}

/// Settings applied right after startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct InitialSettingsConfig {
    /// Enables `capture/frame_0`.
    #[serde(default)]
    pub enable_first_3d_frame: bool,
    /// Enables `capture_2d/frame_0`.
    #[serde(default)]
    pub enable_first_2d_frame: bool,
}

impl ZividCameraNodeConfig {
    pub fn new(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let s = fs_err::read_to_string(path).map_err(|e| Error::NoFile(path.to_owned(), e))?;
        Self::from_str(&s, path)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str, path: impl AsRef<Path>) -> Result<Self, Error> {
        let path: PathBuf = path.as_ref().to_owned();
        let config: Self = toml::from_str(s).map_err(|e| Error::TomlParseFailure(path, e))?;
        config.validate()?;
        debug!(?config, "loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.namespace.trim_matches('/').is_empty() {
            return Err(Error::InvalidConfig("namespace must not be empty".to_owned()));
        }
        if self.frame_id.is_empty() {
            return Err(Error::InvalidConfig("frame_id must not be empty".to_owned()));
        }
        if self.queue_size == 0 {
            return Err(Error::InvalidConfig("queue_size must be positive".to_owned()));
        }
        match &self.camera {
            CameraConfig::FileCamera { width, height, .. } if *width == 0 || *height == 0 => {
                Err(Error::InvalidConfig(format!(
                    "file camera resolution {width}x{height} is empty"
                )))
            }
            CameraConfig::FileCamera { .. } => Ok(()),
        }
    }

    pub fn create_builder(&self) -> ZividCameraBuilder {
        let camera = match &self.camera {
            CameraConfig::FileCamera {
                serial_number,
                width,
                height,
            } => FileCamera::synthetic(*width, *height).with_serial_number(serial_number.clone()),
        };
        ZividCamera::builder(camera).frame_id(self.frame_id.clone())
    }

    /// Applies [`InitialSettingsConfig`] to `node`.
    pub fn apply_initial(&self, node: &ZividCamera) -> Result<(), Error> {
        let enable = [Parameter::new("enabled", true)];
        if self.initial.enable_first_3d_frame {
            node.settings().frame(0)?.update(&enable)?;
        }
        if self.initial.enable_first_2d_frame {
            node.settings().frame_2d(0)?.update(&enable)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ZividCameraNodeConfig::default();
        assert_eq!(config.namespace, "zivid_camera");
        assert_eq!(config.frame_id, "zivid_optical_frame");
        assert_eq!(config.queue_size, 1);
        assert_eq!(
            config.camera,
            CameraConfig::FileCamera {
                serial_number: "F1".to_owned(),
                width: 1920,
                height: 1200,
            }
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_config_round_trips_as_toml() {
        let s = toml::to_string(&ZividCameraNodeConfig::default()).unwrap();
        let config = ZividCameraNodeConfig::from_str(&s, "default.toml").unwrap();
        assert_eq!(config, ZividCameraNodeConfig::default());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = ZividCameraNodeConfig::from_str("", "empty.toml").unwrap();
        assert_eq!(config, ZividCameraNodeConfig::default());
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            ZividCameraNodeConfig::from_str("queue_size = 0", "a.toml"),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            ZividCameraNodeConfig::from_str("namespace = \"/\"", "a.toml"),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            ZividCameraNodeConfig::from_str(
                "[camera]\ntype = \"FileCamera\"\nwidth = 0\n",
                "a.toml"
            ),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            ZividCameraNodeConfig::from_str("unknown = 1", "a.toml"),
            Err(Error::TomlParseFailure(..))
        ));
        assert!(matches!(
            ZividCameraNodeConfig::from_str(
                "[camera]\ntype = \"FileCamera\"\nwidht = 640\n",
                "a.toml"
            ),
            Err(Error::TomlParseFailure(..))
        ));
        assert!(matches!(
            ZividCameraNodeConfig::from_str("[camera]\ntype = \"UsbCamera\"\n", "a.toml"),
            Err(Error::TomlParseFailure(..))
        ));
        assert!(matches!(
            ZividCameraNodeConfig::new("no_such_file.toml"),
            Err(Error::NoFile(..))
        ));
    }

    #[test]
    fn test_apply_initial() {
        let config = ZividCameraNodeConfig {
            camera: CameraConfig::FileCamera {
                serial_number: "F7".to_owned(),
                width: 8,
                height: 6,
            },
            initial: InitialSettingsConfig {
                enable_first_3d_frame: true,
                enable_first_2d_frame: false,
            },
            ..Default::default()
        };
        let node = config.create_builder().build().unwrap();
        assert_eq!(node.serial_number(), "F7");
        config.apply_initial(&node).unwrap();
        assert_eq!(node.settings().num_enabled_frames().unwrap(), 1);
        assert!(!node.settings().frame_2d(0).unwrap().current().unwrap().enabled);
        node.capture().unwrap();
    }
}
