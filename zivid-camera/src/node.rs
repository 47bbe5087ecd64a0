use std::sync::Arc;

use tracing::info;

use crate::{
    camera_handle::CameraHandle,
    capture_assistant_adapter::{CaptureAssistantAdapter, SuggestSettingsRequest},
    capture_controller::CaptureController,
    clients::{DummyCaptureAssistant, PublisherGroup, TopicPublisher},
    error::Error,
    msg::{CameraInfo, Image, PointCloud2},
    settings_bridge::SettingsBridge,
    traits::{Camera, CaptureAssistant, CapturePublisher},
};

pub const DEFAULT_FRAME_ID: &str = "zivid_optical_frame";

/// Builder of [`ZividCamera`].
pub struct ZividCameraBuilder {
    camera: Box<dyn Camera>,
    assistant: Arc<dyn CaptureAssistant>,
    frame_id: String,
    publishers: Vec<Arc<dyn CapturePublisher>>,
}

impl std::fmt::Debug for ZividCameraBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZividCameraBuilder")
            .field("frame_id", &self.frame_id)
            .field("num_publishers", &self.publishers.len())
            .finish_non_exhaustive()
    }
}

impl ZividCameraBuilder {
    pub fn capture_assistant(mut self, assistant: impl CaptureAssistant + 'static) -> Self {
        self.assistant = Arc::new(assistant);
        self
    }

    pub fn frame_id(mut self, frame_id: impl Into<String>) -> Self {
        self.frame_id = frame_id.into();
        self
    }

    /// Adds a publisher receiving every capture besides the in-process topics.
    pub fn publisher(mut self, publisher: Arc<dyn CapturePublisher>) -> Self {
        self.publishers.push(publisher);
        self
    }

    pub fn build(self) -> Result<ZividCamera, Error> {
        let camera = CameraHandle::from_boxed(self.camera);
        let (model_name, serial_number) = {
            let camera = camera.lock()?;
            (camera.model_name()?, camera.serial_number()?)
        };
        info!("Connected to camera {} ({})", model_name, serial_number);

        let topics = Arc::new(TopicPublisher::new());
        let mut group = PublisherGroup::new();
        group.push(topics.clone());
        for publisher in self.publishers {
            group.push(publisher);
        }
        let settings = Arc::new(SettingsBridge::new());
        Ok(ZividCamera {
            controller: CaptureController::new(
                camera.clone(),
                settings.clone(),
                Arc::new(group),
                self.frame_id,
            ),
            assistant: CaptureAssistantAdapter::new(camera.clone(), self.assistant, settings.clone()),
            camera,
            settings,
            topics,
            model_name,
            serial_number,
        })
    }
}

/// The camera driver node.
///
/// # Example
///
/// ```
/// use zivid_camera::{FileCamera, Parameter, ZividCamera};
///
/// let camera = ZividCamera::builder(FileCamera::synthetic(16, 10)).build().unwrap();
/// let points = camera.subscribe_points().unwrap();
/// camera
///     .settings()
///     .frame(0)
///     .unwrap()
///     .update(&[Parameter::new("enabled", true)])
///     .unwrap();
/// camera.capture().unwrap();
/// assert_eq!(points.try_recv().unwrap().width, 16);
/// ```
pub struct ZividCamera {
    camera: CameraHandle,
    settings: Arc<SettingsBridge>,
    controller: CaptureController,
    assistant: CaptureAssistantAdapter,
    topics: Arc<TopicPublisher>,
    model_name: String,
    serial_number: String,
}

impl std::fmt::Debug for ZividCamera {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZividCamera")
            .field("model_name", &self.model_name)
            .field("serial_number", &self.serial_number)
            .field("frame_id", &self.controller.frame_id())
            .finish_non_exhaustive()
    }
}

impl ZividCamera {
    pub fn builder(camera: impl Camera + 'static) -> ZividCameraBuilder {
        ZividCameraBuilder {
            camera: Box::new(camera),
            assistant: Arc::new(DummyCaptureAssistant::new()),
            frame_id: DEFAULT_FRAME_ID.to_owned(),
            publishers: Vec::new(),
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn serial_number(&self) -> &str {
        &self.serial_number
    }

    pub fn is_connected(&self) -> Result<bool, Error> {
        Ok(self.camera.lock()?.is_connected())
    }

    pub fn frame_id(&self) -> &str {
        self.controller.frame_id()
    }

    pub fn capture(&self) -> Result<(), Error> {
        self.controller.capture()
    }

    pub fn capture_2d(&self) -> Result<(), Error> {
        self.controller.capture_2d()
    }

    pub fn suggest_settings(&self, request: &SuggestSettingsRequest) -> Result<(), Error> {
        self.assistant.suggest_settings(request)
    }

    pub fn settings(&self) -> &Arc<SettingsBridge> {
        &self.settings
    }

    pub fn topics(&self) -> &TopicPublisher {
        &self.topics
    }

    pub fn subscribe_color_camera_info(&self) -> Result<flume::Receiver<CameraInfo>, Error> {
        self.topics.color_camera_info.subscribe()
    }

    pub fn subscribe_color_image(&self) -> Result<flume::Receiver<Image>, Error> {
        self.topics.color_image_color.subscribe()
    }

    pub fn subscribe_depth_camera_info(&self) -> Result<flume::Receiver<CameraInfo>, Error> {
        self.topics.depth_camera_info.subscribe()
    }

    pub fn subscribe_depth_image(&self) -> Result<flume::Receiver<Image>, Error> {
        self.topics.depth_image_raw.subscribe()
    }

    pub fn subscribe_points(&self) -> Result<flume::Receiver<PointCloud2>, Error> {
        self.topics.points.subscribe()
    }
}
