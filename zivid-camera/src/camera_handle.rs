use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard},
};

use anyhow::format_err;

use crate::{error::Error, traits::Camera};

/// Process-wide owner of the camera. The lock is held for a whole acquisition.
#[derive(Clone)]
pub struct CameraHandle(Arc<Mutex<Box<dyn Camera>>>);

impl fmt::Debug for CameraHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CameraHandle(..)")
    }
}

impl CameraHandle {
    pub fn new(camera: impl Camera + 'static) -> Self {
        Self::from_boxed(Box::new(camera))
    }

    pub fn from_boxed(camera: Box<dyn Camera>) -> Self {
        Self(Arc::new(Mutex::new(camera)))
    }

    pub fn lock(&self) -> Result<MutexGuard<'_, Box<dyn Camera>>, Error> {
        Ok(self
            .0
            .lock()
            .map_err(|e| format_err!("Failed to lock camera : {}", e))?)
    }
}
