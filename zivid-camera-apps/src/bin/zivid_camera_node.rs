use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use zivid_camera_apps::{utils, ZividCameraNodeConfig};

/// Zivid camera driver node.
#[derive(Parser, Debug)]
#[clap(name = env!("CARGO_BIN_NAME"))]
struct ZividCameraNodeArgs {
    /// Path to the setting file.
    #[clap(short, long, value_parser)]
    config_path: Option<PathBuf>,
    /// Prints the default setting as TOML.
    #[clap(long)]
    show_default_config: bool,
}

fn main() -> Result<()> {
    utils::init_tracing();
    let args = ZividCameraNodeArgs::parse();
    info!("ParsedArgs {:?}", args);

    if args.show_default_config {
        print!("{}", toml::to_string(&ZividCameraNodeConfig::default())?);
        return Ok(());
    }

    let config = match utils::get_config_path(args.config_path) {
        Some(path) => ZividCameraNodeConfig::new(path)?,
        None => ZividCameraNodeConfig::default(),
    };
    run(&config)
}

#[cfg(feature = "ros")]
fn run(config: &ZividCameraNodeConfig) -> Result<()> {
    zivid_camera_ros::init(env!("CARGO_BIN_NAME"));
    let ros_camera = zivid_camera_ros::RosZividCamera::new(
        &config.namespace,
        config.queue_size,
        config.create_builder(),
    )?;
    config.apply_initial(ros_camera.node())?;
    zivid_camera_ros::spin();
    Ok(())
}

/// Without ROS the node runs one capture cycle and logs what it published.
#[cfg(not(feature = "ros"))]
fn run(config: &ZividCameraNodeConfig) -> Result<()> {
    use tracing::warn;

    let node = config.create_builder().build()?;
    config.apply_initial(&node)?;
    let points = node.subscribe_points()?;
    let color_image = node.subscribe_color_image()?;

    match node.capture() {
        Ok(()) => {
            for cloud in points.try_iter() {
                info!(
                    "{}/points: {}x{}, {} bytes",
                    config.namespace,
                    cloud.width,
                    cloud.height,
                    cloud.data.len()
                );
            }
        }
        Err(e) => warn!("3D capture skipped: {}", e),
    }
    if let Err(e) = node.capture_2d() {
        warn!("2D capture skipped: {}", e);
    }
    for image in color_image.try_iter() {
        info!(
            "{}/color/image_color: {}x{} {}",
            config.namespace, image.width, image.height, image.encoding
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_args() {
        let bin = env!("CARGO_BIN_NAME");
        assert!(ZividCameraNodeArgs::try_parse_from([bin]).is_ok());
        assert!(ZividCameraNodeArgs::try_parse_from([bin, "--show-default-config"]).is_ok());
        assert!(ZividCameraNodeArgs::try_parse_from([bin, "--config-path", "path"]).is_ok());
        assert!(ZividCameraNodeArgs::try_parse_from([bin, "-c", "path"]).is_ok());
        assert!(ZividCameraNodeArgs::try_parse_from([
            bin,
            "--show-default-config",
            "--config-path",
            "path"
        ])
        .is_ok());
        assert!(ZividCameraNodeArgs::try_parse_from([bin, "--unknown"]).is_err());
    }

    #[cfg(not(feature = "ros"))]
    #[test]
    fn run_local_capture_cycle() {
        let mut config = ZividCameraNodeConfig::default();
        config.camera = zivid_camera_apps::CameraConfig::FileCamera {
            serial_number: "F1".to_owned(),
            width: 8,
            height: 6,
        };
        config.initial.enable_first_3d_frame = true;
        config.initial.enable_first_2d_frame = true;
        run(&config).unwrap();
    }
}
