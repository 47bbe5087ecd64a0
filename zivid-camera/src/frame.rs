use std::{sync::Arc, time::SystemTime};

use nalgebra as na;

use crate::settings::{Settings, Settings2D};

/// Packs an RGBA color with red in the least significant byte.
///
/// # Example
///
/// ```
/// let rgba = zivid_camera::pack_rgba(255, 183, 42, 255);
/// assert_eq!(zivid_camera::unpack_rgba(rgba), [255, 183, 42, 255]);
/// assert_eq!(rgba.to_le_bytes(), [255, 183, 42, 255]);
/// ```
pub fn pack_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
    u32::from_le_bytes([r, g, b, a])
}

pub fn unpack_rgba(rgba: u32) -> [u8; 4] {
    rgba.to_le_bytes()
}

/// One element of a point cloud, in camera native units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    /// Millimeters. NaN for invalid points.
    pub x: f32,
    /// Millimeters. NaN for invalid points.
    pub y: f32,
    /// Millimeters. NaN for invalid points.
    pub z: f32,
    pub contrast: f32,
    pub rgba: u32,
}

impl Point {
    pub fn is_valid(&self) -> bool {
        !(self.x.is_nan() || self.y.is_nan() || self.z.is_nan())
    }
}

impl Default for Point {
    fn default() -> Self {
        Self {
            x: f32::NAN,
            y: f32::NAN,
            z: f32::NAN,
            contrast: 0.0,
            rgba: 0,
        }
    }
}

/// Organized point cloud stored row-major.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointCloud {
    width: usize,
    height: usize,
    points: Vec<Point>,
}

impl PointCloud {
    /// Returns `None` if `points.len() != width * height`.
    pub fn new(width: usize, height: usize, points: Vec<Point>) -> Option<Self> {
        (points.len() == width * height).then_some(Self {
            width,
            height,
            points,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Point> {
        if row < self.height && col < self.width {
            self.points.get(row * self.width + col)
        } else {
            None
        }
    }
}

/// 8 bit RGBA image stored row-major.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Image2D {
    width: usize,
    height: usize,
    pixels: Vec<[u8; 4]>,
}

impl Image2D {
    /// Returns `None` if `pixels.len() != width * height`.
    pub fn new(width: usize, height: usize, pixels: Vec<[u8; 4]>) -> Option<Self> {
        (pixels.len() == width * height).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&[u8; 4]> {
        if row < self.height && col < self.width {
            self.pixels.get(row * self.width + col)
        } else {
            None
        }
    }
}

/// Result of a 3D capture. With more than one settings entry the camera
/// has already merged the acquisitions.
#[derive(Clone, Debug)]
pub struct Frame {
    pub point_cloud: Arc<PointCloud>,
    pub settings: Vec<Settings>,
    pub stamp: SystemTime,
}

#[derive(Clone, Debug)]
pub struct Frame2D {
    pub image: Arc<Image2D>,
    pub settings: Settings2D,
    pub stamp: SystemTime,
}

/// Pinhole intrinsics with plumb bob distortion.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraIntrinsics {
    pub width: u32,
    pub height: u32,
    /// ```text
    ///     [fx  0 cx]
    /// K = [ 0 fy cy]
    ///     [ 0  0  1]
    /// ```
    pub camera_matrix: na::Matrix3<f64>,
    /// k1, k2, p1, p2, k3
    pub distortion: [f64; 5],
}

impl CameraIntrinsics {
    pub fn new(width: u32, height: u32, fx: f64, fy: f64, cx: f64, cy: f64) -> Self {
        Self {
            width,
            height,
            camera_matrix: na::Matrix3::new(fx, 0.0, cx, 0.0, fy, cy, 0.0, 0.0, 1.0),
            distortion: [0.0; 5],
        }
    }

    pub fn with_distortion(mut self, distortion: [f64; 5]) -> Self {
        self.distortion = distortion;
        self
    }

    pub fn fx(&self) -> f64 {
        self.camera_matrix[(0, 0)]
    }

    pub fn fy(&self) -> f64 {
        self.camera_matrix[(1, 1)]
    }

    pub fn cx(&self) -> f64 {
        self.camera_matrix[(0, 2)]
    }

    pub fn cy(&self) -> f64 {
        self.camera_matrix[(1, 2)]
    }
}
