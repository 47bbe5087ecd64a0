use std::{
    fmt,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};

use anyhow::format_err;

use crate::{
    error::Error,
    msg::{CameraInfo, Capture2DOutput, CaptureOutput, Image, PointCloud2},
    traits::CapturePublisher,
};

pub const COLOR_CAMERA_INFO_TOPIC: &str = "color/camera_info";
pub const COLOR_IMAGE_COLOR_TOPIC: &str = "color/image_color";
pub const DEPTH_CAMERA_INFO_TOPIC: &str = "depth/camera_info";
pub const DEPTH_IMAGE_RAW_TOPIC: &str = "depth/image_raw";
pub const POINTS_TOPIC: &str = "points";

/// In-process topic delivering every message to every live subscriber.
pub struct Topic<T> {
    name: &'static str,
    subscribers: Mutex<Vec<flume::Sender<T>>>,
    num_published: AtomicUsize,
}

impl<T> fmt::Debug for Topic<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Topic")
            .field("name", &self.name)
            .field("num_published", &self.num_published)
            .finish()
    }
}

impl<T> Topic<T>
where
    T: Clone,
{
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            subscribers: Mutex::new(Vec::new()),
            num_published: AtomicUsize::new(0),
        }
    }

    pub fn name(&self) -> &str {
        self.name
    }

    /// Receives every message published after this call.
    pub fn subscribe(&self) -> Result<flume::Receiver<T>, Error> {
        let (tx, rx) = flume::unbounded();
        self.subscribers
            .lock()
            .map_err(|e| format_err!("Failed to lock subscribers of {} : {}", self.name, e))?
            .push(tx);
        Ok(rx)
    }

    pub fn num_published(&self) -> usize {
        self.num_published.load(Ordering::SeqCst)
    }

    pub fn publish(&self, message: T) -> Result<(), Error> {
        let mut subscribers = self
            .subscribers
            .lock()
            .map_err(|e| format_err!("Failed to lock subscribers of {} : {}", self.name, e))?;
        // dropped receivers are forgotten
        subscribers.retain(|tx| tx.send(message.clone()).is_ok());
        self.num_published.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// The five topics of the driver, served in-process.
#[derive(Debug)]
pub struct TopicPublisher {
    pub color_camera_info: Topic<CameraInfo>,
    pub color_image_color: Topic<Image>,
    pub depth_camera_info: Topic<CameraInfo>,
    pub depth_image_raw: Topic<Image>,
    pub points: Topic<PointCloud2>,
}

impl Default for TopicPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl TopicPublisher {
    pub fn new() -> Self {
        Self {
            color_camera_info: Topic::new(COLOR_CAMERA_INFO_TOPIC),
            color_image_color: Topic::new(COLOR_IMAGE_COLOR_TOPIC),
            depth_camera_info: Topic::new(DEPTH_CAMERA_INFO_TOPIC),
            depth_image_raw: Topic::new(DEPTH_IMAGE_RAW_TOPIC),
            points: Topic::new(POINTS_TOPIC),
        }
    }
}

impl CapturePublisher for TopicPublisher {
    fn publish(&self, output: CaptureOutput) -> Result<(), Error> {
        self.color_camera_info.publish(output.color_camera_info)?;
        self.color_image_color.publish(output.color_image)?;
        self.depth_camera_info.publish(output.depth_camera_info)?;
        self.depth_image_raw.publish(output.depth_image)?;
        self.points.publish(output.points)
    }

    fn publish_2d(&self, output: Capture2DOutput) -> Result<(), Error> {
        self.color_camera_info.publish(output.color_camera_info)?;
        self.color_image_color.publish(output.color_image)
    }
}
