use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("zivid_camera: Invalid state : {}", message)]
    InvalidState { message: String },
    #[error("zivid_camera: Invalid argument : {}", message)]
    InvalidArgument { message: String },
    #[error("zivid_camera: {} is not found.", name)]
    NotFound { name: String },
    #[error("zivid_camera: Device error : {}", message)]
    Device { message: String },
    #[error("zivid_camera: Other: {:?}", .0)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub(crate) fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub(crate) fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }
}
