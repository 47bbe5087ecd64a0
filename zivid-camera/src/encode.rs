//! Conversion of camera frames into the published messages.
//!
//! The point cloud layout is fixed: `x`, `y`, `z`, `c` as little endian
//! `f32` followed by the packed `rgba` as `u32`, 20 bytes per point.
//! Coordinates are converted from millimeters to meters.

use crate::{
    frame::{unpack_rgba, CameraIntrinsics, Frame, Frame2D, Image2D, PointCloud},
    msg::{
        image_encodings, Capture2DOutput, CameraInfo, CaptureOutput, Header, Image, PointCloud2,
        PointField,
    },
};

pub const POINT_STEP: u32 = 20;
pub const DISTORTION_MODEL_PLUMB_BOB: &str = "plumb_bob";

const MILLIMETERS_PER_METER: f32 = 1000.0;

pub fn point_cloud_fields() -> Vec<PointField> {
    vec![
        PointField::new("x", 0, PointField::FLOAT32),
        PointField::new("y", 4, PointField::FLOAT32),
        PointField::new("z", 8, PointField::FLOAT32),
        PointField::new("c", 12, PointField::FLOAT32),
        PointField::new("rgba", 16, PointField::UINT32),
    ]
}

pub fn encode_points(header: Header, point_cloud: &PointCloud) -> PointCloud2 {
    let mut data = Vec::with_capacity(point_cloud.points().len() * POINT_STEP as usize);
    for p in point_cloud.points() {
        data.extend_from_slice(&(p.x / MILLIMETERS_PER_METER).to_le_bytes());
        data.extend_from_slice(&(p.y / MILLIMETERS_PER_METER).to_le_bytes());
        data.extend_from_slice(&(p.z / MILLIMETERS_PER_METER).to_le_bytes());
        data.extend_from_slice(&p.contrast.to_le_bytes());
        data.extend_from_slice(&p.rgba.to_le_bytes());
    }
    PointCloud2 {
        header,
        height: point_cloud.height() as u32,
        width: point_cloud.width() as u32,
        fields: point_cloud_fields(),
        is_bigendian: false,
        point_step: POINT_STEP,
        row_step: point_cloud.width() as u32 * POINT_STEP,
        data,
        is_dense: false,
    }
}

/// `rgb8` image from the colors of the point cloud.
pub fn encode_color_image(header: Header, point_cloud: &PointCloud) -> Image {
    let mut data = Vec::with_capacity(point_cloud.points().len() * 3);
    for p in point_cloud.points() {
        let [r, g, b, _] = unpack_rgba(p.rgba);
        data.extend_from_slice(&[r, g, b]);
    }
    Image {
        header,
        height: point_cloud.height() as u32,
        width: point_cloud.width() as u32,
        encoding: image_encodings::RGB8.to_owned(),
        is_bigendian: false,
        step: point_cloud.width() as u32 * 3,
        data,
    }
}

/// `32FC1` image of z in meters. Invalid points stay NaN.
pub fn encode_depth_image(header: Header, point_cloud: &PointCloud) -> Image {
    let mut data = Vec::with_capacity(point_cloud.points().len() * 4);
    for p in point_cloud.points() {
        data.extend_from_slice(&(p.z / MILLIMETERS_PER_METER).to_le_bytes());
    }
    Image {
        header,
        height: point_cloud.height() as u32,
        width: point_cloud.width() as u32,
        encoding: image_encodings::TYPE_32FC1.to_owned(),
        is_bigendian: false,
        step: point_cloud.width() as u32 * 4,
        data,
    }
}

/// `rgba8` image of a 2D capture.
pub fn encode_rgba_image(header: Header, image: &Image2D) -> Image {
    Image {
        header,
        height: image.height() as u32,
        width: image.width() as u32,
        encoding: image_encodings::RGBA8.to_owned(),
        is_bigendian: false,
        step: image.width() as u32 * 4,
        data: image.pixels().iter().flatten().copied().collect(),
    }
}

pub fn encode_camera_info(header: Header, intrinsics: &CameraIntrinsics) -> CameraInfo {
    let (fx, fy, cx, cy) = (
        intrinsics.fx(),
        intrinsics.fy(),
        intrinsics.cx(),
        intrinsics.cy(),
    );
    //     [fx'  0  cx' Tx]
    // P = [ 0  fy' cy' Ty]
    //     [ 0   0   1   0]
    CameraInfo {
        header,
        height: intrinsics.height,
        width: intrinsics.width,
        distortion_model: DISTORTION_MODEL_PLUMB_BOB.to_owned(),
        d: intrinsics.distortion.to_vec(),
        k: [fx, 0.0, cx, 0.0, fy, cy, 0.0, 0.0, 1.0],
        r: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
        p: [fx, 0.0, cx, 0.0, 0.0, fy, cy, 0.0, 0.0, 0.0, 1.0, 0.0],
        binning_x: 0,
        binning_y: 0,
    }
}

pub fn encode_capture(
    header: Header,
    frame: &Frame,
    intrinsics: &CameraIntrinsics,
) -> CaptureOutput {
    let camera_info = encode_camera_info(header.clone(), intrinsics);
    CaptureOutput {
        color_camera_info: camera_info.clone(),
        color_image: encode_color_image(header.clone(), &frame.point_cloud),
        depth_camera_info: camera_info,
        depth_image: encode_depth_image(header.clone(), &frame.point_cloud),
        points: encode_points(header, &frame.point_cloud),
    }
}

pub fn encode_capture_2d(
    header: Header,
    frame: &Frame2D,
    intrinsics: &CameraIntrinsics,
) -> Capture2DOutput {
    Capture2DOutput {
        color_camera_info: encode_camera_info(header.clone(), intrinsics),
        color_image: encode_rgba_image(header, &frame.image),
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;
    use crate::frame::{pack_rgba, Point};

    fn small_cloud() -> PointCloud {
        let points = vec![
            Point {
                x: 1000.0,
                y: -500.0,
                z: 1250.0,
                contrast: 3.5,
                rgba: pack_rgba(1, 2, 3, 255),
            },
            Point::default(),
            Point {
                x: 10.0,
                y: 20.0,
                z: 30.0,
                contrast: 0.25,
                rgba: pack_rgba(200, 100, 50, 255),
            },
            Point {
                x: 0.0,
                y: 0.0,
                z: 1.0,
                contrast: 0.0,
                rgba: pack_rgba(9, 8, 7, 6),
            },
        ];
        PointCloud::new(2, 2, points).unwrap()
    }

    #[test]
    fn test_encode_points() {
        let cloud = small_cloud();
        let msg = encode_points(Header::default(), &cloud);
        assert_eq!(msg.width, 2);
        assert_eq!(msg.height, 2);
        assert_eq!(msg.point_step, 20);
        assert_eq!(msg.row_step, 40);
        assert!(!msg.is_dense);
        assert!(!msg.is_bigendian);
        assert_eq!(msg.data.len(), 80);

        let z = msg.field("z").unwrap().offset;
        let c = msg.field("c").unwrap().offset;
        let rgba = msg.field("rgba").unwrap();
        assert_eq!(rgba.datatype, PointField::UINT32);
        assert_approx_eq!(msg.read_f32(0, 0, 0).unwrap(), 1.0);
        assert_approx_eq!(msg.read_f32(0, 0, 4).unwrap(), -0.5);
        assert_approx_eq!(msg.read_f32(0, 0, z).unwrap(), 1.25);
        assert_approx_eq!(msg.read_f32(1, 0, c).unwrap(), 0.25);
        assert_eq!(
            msg.read_u32(1, 0, rgba.offset).unwrap(),
            pack_rgba(200, 100, 50, 255)
        );
        assert!(msg.read_f32(0, 1, 0).unwrap().is_nan());
        assert!(msg.read_f32(2, 0, 0).is_none());
    }

    #[test]
    fn test_encode_color_image() {
        let msg = encode_color_image(Header::default(), &small_cloud());
        assert_eq!(msg.encoding, "rgb8");
        assert_eq!(msg.step, 6);
        assert_eq!(msg.data.len(), 12);
        assert_eq!(&msg.data[0..3], &[1, 2, 3]);
        assert_eq!(&msg.data[9..12], &[9, 8, 7]);
    }

    #[test]
    fn test_encode_depth_image() {
        let msg = encode_depth_image(Header::default(), &small_cloud());
        assert_eq!(msg.encoding, "32FC1");
        assert_eq!(msg.step, 8);
        let z = |i: usize| f32::from_le_bytes(msg.data[i * 4..i * 4 + 4].try_into().unwrap());
        assert_approx_eq!(z(0), 1.25);
        assert!(z(1).is_nan());
        assert_approx_eq!(z(2), 0.03);
    }

    #[test]
    fn test_encode_rgba_image() {
        let image = Image2D::new(2, 1, vec![[1, 2, 3, 255], [4, 5, 6, 255]]).unwrap();
        let msg = encode_rgba_image(Header::default(), &image);
        assert_eq!(msg.encoding, "rgba8");
        assert_eq!(msg.step, 8);
        assert_eq!(msg.data, vec![1, 2, 3, 255, 4, 5, 6, 255]);
    }

    #[test]
    fn test_encode_camera_info() {
        let intrinsics = CameraIntrinsics::new(640, 480, 500.0, 510.0, 320.0, 240.0)
            .with_distortion([0.1, 0.2, 0.0, 0.0, 0.3]);
        let info = encode_camera_info(Header::default(), &intrinsics);
        assert_eq!(info.distortion_model, "plumb_bob");
        assert_eq!(info.d, vec![0.1, 0.2, 0.0, 0.0, 0.3]);
        assert_eq!(info.k, [500.0, 0.0, 320.0, 0.0, 510.0, 240.0, 0.0, 0.0, 1.0]);
        assert_eq!(info.p[5], 510.0);
        assert_eq!(info.p[10], 1.0);
        assert_eq!(info.r[4], 1.0);
    }
}
