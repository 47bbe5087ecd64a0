use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("zivid-camera-apps: Failed to parse {:?} as toml ({}).", .0, .1)]
    TomlParseFailure(PathBuf, #[source] toml::de::Error),
    #[error("zivid-camera-apps: No File {:?} is found ({}).", .0, .1)]
    NoFile(PathBuf, #[source] std::io::Error),
    #[error("zivid-camera-apps: Invalid config: {}", .0)]
    InvalidConfig(String),
    #[error("zivid-camera-apps: zivid-camera: {:?}", .0)]
    ZividCamera(#[from] zivid_camera::Error),
}
