use std::sync::{Arc, Mutex};

use tracing::{debug, warn};
use zivid_camera::{ConfigServer, Endpoint, ParameterSet, SettingsBridge};

use crate::{
    error::Error,
    msg::dynamic_reconfigure::{Config, ConfigDescription, Reconfigure, ReconfigureRes},
    msg_utils::{from_ros_config, to_ros_config, to_ros_config_description},
};

/// `set_parameters` service and latched `parameter_descriptions` and
/// `parameter_updates` topics of one configuration endpoint.
pub struct ParameterEndpoint {
    name: String,
    _service: rosrust::Service,
    _descriptions: rosrust::Publisher<ConfigDescription>,
}

impl ParameterEndpoint {
    /// Advertises the endpoint `name` of `bridge` under `namespace`.
    pub fn new(namespace: &str, bridge: Arc<SettingsBridge>, name: &str) -> Result<Self, Error> {
        let base = format!("{namespace}/{name}");
        let descriptions = match bridge.resolve(name)? {
            Endpoint::CaptureGeneral(server) => publish_updates(&base, server)?,
            Endpoint::CaptureFrame(server) => publish_updates(&base, server)?,
            Endpoint::Capture2DFrame(server) => publish_updates(&base, server)?,
        };

        let service_name = format!("{base}/set_parameters");
        let endpoint = name.to_owned();
        let service = rosrust::service::<Reconfigure, _>(&service_name, move |req| {
            debug!(endpoint = %endpoint, "set_parameters");
            let config = match bridge.resolve(&endpoint) {
                Ok(Endpoint::CaptureGeneral(server)) => reconfigure(server, &req.config),
                Ok(Endpoint::CaptureFrame(server)) => reconfigure(server, &req.config),
                Ok(Endpoint::Capture2DFrame(server)) => reconfigure(server, &req.config),
                Err(e) => Err(e),
            }
            .map_err(|e| e.to_string())?;
            Ok(ReconfigureRes { config })
        })
        .map_err(|e| Error::advertise(&service_name, e))?;

        Ok(Self {
            name: name.to_owned(),
            _service: service,
            _descriptions: descriptions,
        })
    }

    /// Name of the endpoint, relative to the namespace.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Parameter endpoints of every slot of `bridge`.
pub fn advertise_parameter_endpoints(
    namespace: &str,
    bridge: &Arc<SettingsBridge>,
) -> Result<Vec<ParameterEndpoint>, Error> {
    bridge
        .endpoint_names()
        .iter()
        .map(|name| ParameterEndpoint::new(namespace, bridge.clone(), name))
        .collect()
}

fn reconfigure<C: ParameterSet>(
    server: &ConfigServer<C>,
    config: &Config,
) -> Result<Config, zivid_camera::Error> {
    let accepted = server.update(&from_ros_config(config))?;
    Ok(to_ros_config(&accepted))
}

/// Publishes the latched descriptions and current config of `server`, and
/// every later change of it.
fn publish_updates<C: ParameterSet>(
    base: &str,
    server: &ConfigServer<C>,
) -> Result<rosrust::Publisher<ConfigDescription>, Error> {
    let topic = format!("{base}/parameter_descriptions");
    let mut descriptions = rosrust::publish::<ConfigDescription>(&topic, 1)
        .map_err(|e| Error::advertise(&topic, e))?;
    descriptions.set_latching(true);
    descriptions
        .send(to_ros_config_description::<C>())
        .map_err(|e| Error::advertise(&topic, e))?;

    let topic = format!("{base}/parameter_updates");
    let mut updates =
        rosrust::publish::<Config>(&topic, 1).map_err(|e| Error::advertise(&topic, e))?;
    updates.set_latching(true);
    updates
        .send(to_ros_config(&server.current()?))
        .map_err(|e| Error::advertise(&topic, e))?;

    let updates = Mutex::new(updates);
    server.add_listener(move |_slot: usize, config: &C| match updates.lock() {
        Ok(updates) => {
            if let Err(e) = updates.send(to_ros_config(config)) {
                warn!("Failed to publish parameter update : {}", e);
            }
        }
        Err(e) => warn!("Failed to lock parameter update publisher : {}", e),
    })?;
    Ok(descriptions)
}
