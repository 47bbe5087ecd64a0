use std::{sync::Arc, time::SystemTime};

use tracing::debug;

use crate::{
    error::Error,
    frame::{pack_rgba, unpack_rgba, CameraIntrinsics, Frame, Frame2D, Image2D, Point, PointCloud},
    settings::{Settings, Settings2D},
    traits::Camera,
};

/// SDK version reported in the model name of the file camera.
pub const FILE_CAMERA_SDK_VERSION: &str = "1.8.1";
pub const FILE_CAMERA_SERIAL_NUMBER: &str = "F1";
pub const FILE_CAMERA_WIDTH: usize = 1920;
pub const FILE_CAMERA_HEIGHT: usize = 1200;

const FX: f64 = 2759.12329102;
const FY: f64 = 2758.73681641;
const CX: f64 = 958.78460693;
const CY: f64 = 634.94018555;
const DISTORTION: [f64; 5] = [-0.2682, 0.3635, -0.0002, 0.0003, -0.3053];

/// Columns on the left edge without valid points.
const INVALID_BAND: usize = 8;

/// Pixels of the misc objects scene with known colors, as `(row, col, [r, g, b])`.
pub const MISC_OBJECTS_REFERENCE_PIXELS: [(usize, usize, [u8; 3]); 4] = [
    (0, 0, [4, 4, 2]),
    (1199, 1919, [10, 8, 7]),
    (280, 1500, [255, 183, 42]),
    (700, 800, [120, 105, 82]),
];

/// Camera replaying one prerecorded frame for every capture.
#[derive(Debug, Clone)]
pub struct FileCamera {
    serial_number: String,
    connected: bool,
    intrinsics: CameraIntrinsics,
    point_cloud: Arc<PointCloud>,
    image: Arc<Image2D>,
}

impl FileCamera {
    /// Replays `point_cloud`. 2D captures return its colors.
    pub fn new(point_cloud: PointCloud, intrinsics: CameraIntrinsics) -> Self {
        let pixels = point_cloud
            .points()
            .iter()
            .map(|p| unpack_rgba(p.rgba))
            .collect();
        let image = Image2D::new(point_cloud.width(), point_cloud.height(), pixels)
            .unwrap_or_default();
        Self {
            serial_number: FILE_CAMERA_SERIAL_NUMBER.to_owned(),
            connected: true,
            intrinsics,
            point_cloud: Arc::new(point_cloud),
            image: Arc::new(image),
        }
    }

    /// The full size misc objects scene.
    pub fn misc_objects() -> Self {
        Self::synthetic(FILE_CAMERA_WIDTH, FILE_CAMERA_HEIGHT)
    }

    /// The misc objects scene rendered at another resolution. Reference
    /// pixels outside the image are skipped.
    pub fn synthetic(width: usize, height: usize) -> Self {
        let scale = width as f64 / FILE_CAMERA_WIDTH as f64;
        let intrinsics = CameraIntrinsics::new(
            width as u32,
            height as u32,
            FX * scale,
            FY * scale,
            CX * scale,
            CY * (height as f64 / FILE_CAMERA_HEIGHT as f64),
        )
        .with_distortion(DISTORTION);
        Self::new(misc_objects_scene(width, height, &intrinsics), intrinsics)
    }

    pub fn with_serial_number(mut self, serial_number: impl Into<String>) -> Self {
        self.serial_number = serial_number.into();
        self
    }

    /// Simulates unplugging the camera: captures fail until reconnected.
    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    pub fn point_cloud(&self) -> &PointCloud {
        &self.point_cloud
    }

    pub fn image(&self) -> &Image2D {
        &self.image
    }

    fn ensure_connected(&self) -> Result<(), Error> {
        if self.connected {
            Ok(())
        } else {
            Err(Error::Device {
                message: format!("camera {} is not connected", self.serial_number),
            })
        }
    }
}

impl Camera for FileCamera {
    fn model_name(&self) -> Result<String, Error> {
        Ok(format!("FileCamera-{FILE_CAMERA_SDK_VERSION}"))
    }

    fn serial_number(&self) -> Result<String, Error> {
        Ok(self.serial_number.clone())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn intrinsics(&self) -> Result<CameraIntrinsics, Error> {
        Ok(self.intrinsics.clone())
    }

    fn capture(&mut self, settings: &[Settings]) -> Result<Frame, Error> {
        self.ensure_connected()?;
        if settings.is_empty() {
            return Err(Error::invalid_argument("capture requires at least one settings entry"));
        }
        debug!(num_settings = settings.len(), "file camera capture");
        Ok(Frame {
            point_cloud: self.point_cloud.clone(),
            settings: settings.to_vec(),
            stamp: SystemTime::now(),
        })
    }

    fn capture_2d(&mut self, settings: &Settings2D) -> Result<Frame2D, Error> {
        self.ensure_connected()?;
        debug!("file camera 2D capture");
        Ok(Frame2D {
            image: self.image.clone(),
            settings: settings.clone(),
            stamp: SystemTime::now(),
        })
    }
}

fn misc_objects_scene(width: usize, height: usize, intrinsics: &CameraIntrinsics) -> PointCloud {
    let mut points = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let rgba = pack_rgba(
                (col * 255 / width.max(2).saturating_sub(1)).min(255) as u8,
                (row * 255 / height.max(2).saturating_sub(1)).min(255) as u8,
                ((row + col) % 256) as u8,
                255,
            );
            let contrast = ((row * 7 + col * 13) % 100) as f32 / 10.0;
            if col < INVALID_BAND {
                points.push(Point {
                    contrast,
                    rgba,
                    ..Default::default()
                });
                continue;
            }
            // tilted plane about one meter away
            let z = 1000.0 + 0.05 * row as f64 + 0.02 * col as f64;
            points.push(Point {
                x: ((col as f64 - intrinsics.cx()) * z / intrinsics.fx()) as f32,
                y: ((row as f64 - intrinsics.cy()) * z / intrinsics.fy()) as f32,
                z: z as f32,
                contrast,
                rgba,
            });
        }
    }
    for (row, col, [r, g, b]) in MISC_OBJECTS_REFERENCE_PIXELS {
        if row < height && col < width {
            points[row * width + col].rgba = pack_rgba(r, g, b, 255);
        }
    }
    // `points` has exactly width * height entries
    PointCloud::new(width, height, points).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let camera = FileCamera::synthetic(16, 10);
        assert_eq!(camera.model_name().unwrap(), "FileCamera-1.8.1");
        assert_eq!(camera.serial_number().unwrap(), "F1");
        assert!(camera.is_connected());
        let camera = camera.with_serial_number("F2");
        assert_eq!(camera.serial_number().unwrap(), "F2");
    }

    #[test]
    fn test_synthetic_scene() {
        let camera = FileCamera::synthetic(32, 20);
        let cloud = camera.point_cloud();
        assert_eq!(cloud.width(), 32);
        assert_eq!(cloud.height(), 20);
        assert!(!cloud.get(5, 0).unwrap().is_valid());
        let p = cloud.get(10, 20).unwrap();
        assert!(p.is_valid());
        assert!(p.z > 1000.0 && p.z < 1100.0);
        // reference pixel (0, 0) fits into any size
        assert_eq!(unpack_rgba(cloud.get(0, 0).unwrap().rgba), [4, 4, 2, 255]);
        assert_eq!(camera.image().get(0, 0).unwrap(), &[4, 4, 2, 255]);
    }

    #[test]
    fn test_capture_requires_connection_and_settings() {
        let mut camera = FileCamera::synthetic(4, 4);
        assert!(matches!(
            camera.capture(&[]),
            Err(Error::InvalidArgument { .. })
        ));
        let frame = camera.capture(&vec![Settings::default(); 2]).unwrap();
        assert_eq!(frame.settings.len(), 2);
        assert_eq!(frame.point_cloud.width(), 4);

        camera.set_connected(false);
        assert!(!camera.is_connected());
        assert!(matches!(
            camera.capture(&[Settings::default()]),
            Err(Error::Device { .. })
        ));
        assert!(matches!(
            camera.capture_2d(&Settings2D::default()),
            Err(Error::Device { .. })
        ));
    }
}
