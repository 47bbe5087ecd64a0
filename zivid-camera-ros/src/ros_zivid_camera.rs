use std::sync::Arc;

use tracing::info;
use zivid_camera::{SuggestSettingsRequest, ZividCamera, ZividCameraBuilder};

use crate::{
    error::Error,
    msg::zivid_camera as srv,
    msg_utils::from_ros_duration,
    parameter_endpoint::{advertise_parameter_endpoints, ParameterEndpoint},
    ros_capture_publisher::RosCapturePublisher,
};

pub const CAMERA_INFO_MODEL_NAME_SERVICE: &str = "camera_info/model_name";
pub const CAMERA_INFO_SERIAL_NUMBER_SERVICE: &str = "camera_info/serial_number";
pub const IS_CONNECTED_SERVICE: &str = "is_connected";
pub const CAPTURE_SERVICE: &str = "capture";
pub const CAPTURE_2D_SERVICE: &str = "capture_2d";
pub const CAPTURE_ASSISTANT_SUGGEST_SETTINGS_SERVICE: &str = "capture_assistant/suggest_settings";

fn advertise<T, F>(namespace: &str, service: &str, handler: F) -> Result<rosrust::Service, Error>
where
    T: rosrust::ServicePair,
    F: Fn(T::Request) -> Result<T::Response, String> + Send + Sync + 'static,
{
    let name = format!("{namespace}/{service}");
    rosrust::service::<T, _>(&name, handler).map_err(|e| Error::advertise(&name, e))
}

/// The driver served on ROS: services, topics and parameter endpoints.
pub struct RosZividCamera {
    node: Arc<ZividCamera>,
    namespace: String,
    _services: Vec<rosrust::Service>,
    parameter_endpoints: Vec<ParameterEndpoint>,
}

impl RosZividCamera {
    /// Builds the node from `builder` and advertises it under `namespace`.
    /// `rosrust::init` must have been called.
    pub fn new(
        namespace: &str,
        queue_size: usize,
        builder: ZividCameraBuilder,
    ) -> Result<Self, Error> {
        let namespace = namespace.trim_end_matches('/').to_owned();
        let publisher = Arc::new(RosCapturePublisher::new(&namespace, queue_size)?);
        let node = Arc::new(builder.publisher(publisher).build()?);

        let model_name = node.model_name().to_owned();
        let serial_number = node.serial_number().to_owned();
        let is_connected = node.clone();
        let capture = node.clone();
        let capture_2d = node.clone();
        let suggest_settings = node.clone();
        let services = vec![
            advertise::<srv::CameraInfoModelName, _>(
                &namespace,
                CAMERA_INFO_MODEL_NAME_SERVICE,
                move |_| {
                    Ok(srv::CameraInfoModelNameRes {
                        model_name: model_name.clone(),
                    })
                },
            )?,
            advertise::<srv::CameraInfoSerialNumber, _>(
                &namespace,
                CAMERA_INFO_SERIAL_NUMBER_SERVICE,
                move |_| {
                    Ok(srv::CameraInfoSerialNumberRes {
                        serial_number: serial_number.clone(),
                    })
                },
            )?,
            advertise::<srv::IsConnected, _>(&namespace, IS_CONNECTED_SERVICE, move |_| {
                Ok(srv::IsConnectedRes {
                    is_connected: is_connected.is_connected().map_err(|e| e.to_string())?,
                })
            })?,
            advertise::<srv::Capture, _>(&namespace, CAPTURE_SERVICE, move |_| {
                capture.capture().map_err(|e| e.to_string())?;
                Ok(Default::default())
            })?,
            advertise::<srv::Capture2D, _>(&namespace, CAPTURE_2D_SERVICE, move |_| {
                capture_2d.capture_2d().map_err(|e| e.to_string())?;
                Ok(Default::default())
            })?,
            advertise::<srv::CaptureAssistantSuggestSettings, _>(
                &namespace,
                CAPTURE_ASSISTANT_SUGGEST_SETTINGS_SERVICE,
                move |req| {
                    suggest_settings
                        .suggest_settings(&SuggestSettingsRequest {
                            max_capture_time: from_ros_duration(req.max_capture_time),
                            ambient_light_frequency: req.ambient_light_frequency,
                        })
                        .map_err(|e| e.to_string())?;
                    Ok(Default::default())
                },
            )?,
        ];
        let parameter_endpoints = advertise_parameter_endpoints(&namespace, node.settings())?;
        info!(
            "Serving {} ({}) under {}",
            node.model_name(),
            node.serial_number(),
            namespace
        );
        Ok(Self {
            node,
            namespace,
            _services: services,
            parameter_endpoints,
        })
    }

    pub fn node(&self) -> &Arc<ZividCamera> {
        &self.node
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn parameter_endpoints(&self) -> &[ParameterEndpoint] {
        &self.parameter_endpoints
    }
}
