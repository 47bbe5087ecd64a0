//! Transport independent mirrors of the `sensor_msgs` types the driver publishes.

use std::time::SystemTime;

#[derive(Clone, Debug, PartialEq)]
pub struct Header {
    pub seq: u32,
    pub stamp: SystemTime,
    pub frame_id: String,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            seq: 0,
            stamp: SystemTime::UNIX_EPOCH,
            frame_id: String::new(),
        }
    }
}

pub mod image_encodings {
    pub const RGB8: &str = "rgb8";
    pub const RGBA8: &str = "rgba8";
    pub const TYPE_32FC1: &str = "32FC1";
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Image {
    pub header: Header,
    pub height: u32,
    pub width: u32,
    pub encoding: String,
    pub is_bigendian: bool,
    pub step: u32,
    pub data: Vec<u8>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CameraInfo {
    pub header: Header,
    pub height: u32,
    pub width: u32,
    pub distortion_model: String,
    pub d: Vec<f64>,
    pub k: [f64; 9],
    pub r: [f64; 9],
    pub p: [f64; 12],
    pub binning_x: u32,
    pub binning_y: u32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointField {
    pub name: String,
    pub offset: u32,
    pub datatype: u8,
    pub count: u32,
}

impl PointField {
    pub const INT8: u8 = 1;
    pub const UINT8: u8 = 2;
    pub const INT16: u8 = 3;
    pub const UINT16: u8 = 4;
    pub const INT32: u8 = 5;
    pub const UINT32: u8 = 6;
    pub const FLOAT32: u8 = 7;
    pub const FLOAT64: u8 = 8;

    pub fn new(name: &str, offset: u32, datatype: u8) -> Self {
        Self {
            name: name.to_owned(),
            offset,
            datatype,
            count: 1,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointCloud2 {
    pub header: Header,
    pub height: u32,
    pub width: u32,
    pub fields: Vec<PointField>,
    pub is_bigendian: bool,
    pub point_step: u32,
    pub row_step: u32,
    pub data: Vec<u8>,
    pub is_dense: bool,
}

impl PointCloud2 {
    pub fn field(&self, name: &str) -> Option<&PointField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Reads a little endian `f32` of point `(row, col)` at `offset`.
    pub fn read_f32(&self, row: usize, col: usize, offset: u32) -> Option<f32> {
        self.read_bytes(row, col, offset).map(f32::from_le_bytes)
    }

    /// Reads a little endian `u32` of point `(row, col)` at `offset`.
    pub fn read_u32(&self, row: usize, col: usize, offset: u32) -> Option<u32> {
        self.read_bytes(row, col, offset).map(u32::from_le_bytes)
    }

    fn read_bytes(&self, row: usize, col: usize, offset: u32) -> Option<[u8; 4]> {
        if row >= self.height as usize || col >= self.width as usize {
            return None;
        }
        let index =
            row * self.row_step as usize + col * self.point_step as usize + offset as usize;
        self.data.get(index..index + 4)?.try_into().ok()
    }
}

/// Everything a successful 3D capture publishes.
#[derive(Clone, Debug)]
pub struct CaptureOutput {
    pub color_camera_info: CameraInfo,
    pub color_image: Image,
    pub depth_camera_info: CameraInfo,
    pub depth_image: Image,
    pub points: PointCloud2,
}

/// Everything a successful 2D capture publishes.
#[derive(Clone, Debug)]
pub struct Capture2DOutput {
    pub color_camera_info: CameraInfo,
    pub color_image: Image,
}
