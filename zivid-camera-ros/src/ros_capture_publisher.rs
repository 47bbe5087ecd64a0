use anyhow::format_err;
use zivid_camera::{
    msg::{Capture2DOutput, CaptureOutput},
    CapturePublisher, COLOR_CAMERA_INFO_TOPIC, COLOR_IMAGE_COLOR_TOPIC, DEPTH_CAMERA_INFO_TOPIC,
    DEPTH_IMAGE_RAW_TOPIC, POINTS_TOPIC,
};

use crate::{error::Error, msg::sensor_msgs};

fn advertise<T: rosrust::Message>(
    namespace: &str,
    topic: &str,
    queue_size: usize,
) -> Result<rosrust::Publisher<T>, Error> {
    let name = format!("{namespace}/{topic}");
    rosrust::publish(&name, queue_size).map_err(|e| Error::advertise(&name, e))
}

fn send<T: rosrust::Message>(
    publisher: &rosrust::Publisher<T>,
    message: T,
) -> Result<(), zivid_camera::Error> {
    publisher
        .send(message)
        .map_err(|e| format_err!("Failed to publish : {e}"))?;
    Ok(())
}

/// Publishes captures on the five ROS topics of the driver.
pub struct RosCapturePublisher {
    color_camera_info: rosrust::Publisher<sensor_msgs::CameraInfo>,
    color_image_color: rosrust::Publisher<sensor_msgs::Image>,
    depth_camera_info: rosrust::Publisher<sensor_msgs::CameraInfo>,
    depth_image_raw: rosrust::Publisher<sensor_msgs::Image>,
    points: rosrust::Publisher<sensor_msgs::PointCloud2>,
}

impl RosCapturePublisher {
    pub fn new(namespace: &str, queue_size: usize) -> Result<Self, Error> {
        Ok(Self {
            color_camera_info: advertise(namespace, COLOR_CAMERA_INFO_TOPIC, queue_size)?,
            color_image_color: advertise(namespace, COLOR_IMAGE_COLOR_TOPIC, queue_size)?,
            depth_camera_info: advertise(namespace, DEPTH_CAMERA_INFO_TOPIC, queue_size)?,
            depth_image_raw: advertise(namespace, DEPTH_IMAGE_RAW_TOPIC, queue_size)?,
            points: advertise(namespace, POINTS_TOPIC, queue_size)?,
        })
    }
}

impl CapturePublisher for RosCapturePublisher {
    fn publish(&self, output: CaptureOutput) -> Result<(), zivid_camera::Error> {
        send(&self.color_camera_info, output.color_camera_info.into())?;
        send(&self.color_image_color, output.color_image.into())?;
        send(&self.depth_camera_info, output.depth_camera_info.into())?;
        send(&self.depth_image_raw, output.depth_image.into())?;
        send(&self.points, output.points.into())
    }

    fn publish_2d(&self, output: Capture2DOutput) -> Result<(), zivid_camera::Error> {
        send(&self.color_camera_info, output.color_camera_info.into())?;
        send(&self.color_image_color, output.color_image.into())
    }
}
