use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("zivid_camera_ros: Failed to advertise {} : {}", name, message)]
    Advertise { name: String, message: String },
    #[error("zivid_camera_ros: zivid_camera: {:?}", .0)]
    ZividCamera(#[from] zivid_camera::Error),
    #[error("zivid_camera_ros: Other: {:?}", .0)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub(crate) fn advertise(name: &str, e: impl std::fmt::Display) -> Self {
        Self::Advertise {
            name: name.to_owned(),
            message: e.to_string(),
        }
    }
}
