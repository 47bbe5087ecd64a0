use std::io::Write;

use zivid_camera_apps::{CameraConfig, Error, ZividCameraNodeConfig};

#[test]
fn verify_sample_configs() {
    let files = [
        "config/file_camera.toml",
        "config/small_file_camera_with_first_frames.toml",
    ];
    for f in files {
        let result = ZividCameraNodeConfig::new(f);
        assert!(result.is_ok(), "{:?} {:?}", f, result);
        let ser_result = toml::to_string(&result.unwrap());
        assert!(ser_result.is_ok(), "{:?} {:?}", f, ser_result);
    }
}

#[test]
fn sample_config_builds_a_node() {
    let config = ZividCameraNodeConfig::new("config/small_file_camera_with_first_frames.toml")
        .unwrap();
    assert_eq!(
        config.camera,
        CameraConfig::FileCamera {
            serial_number: "F1".to_owned(),
            width: 320,
            height: 200,
        }
    );
    let node = config.create_builder().build().unwrap();
    config.apply_initial(&node).unwrap();
    let points = node.subscribe_points().unwrap();
    node.capture().unwrap();
    node.capture_2d().unwrap();
    let cloud = points.try_recv().unwrap();
    assert_eq!(cloud.header.frame_id, "zivid_small_optical_frame");
    assert_eq!(cloud.width, 320);
}

#[test]
fn load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "namespace = \"my_camera\"\nqueue_size = 4").unwrap();
    let config = ZividCameraNodeConfig::new(file.path()).unwrap();
    assert_eq!(config.namespace, "my_camera");
    assert_eq!(config.queue_size, 4);
    assert_eq!(config.frame_id, "zivid_optical_frame");

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "queue_size = \"four\"").unwrap();
    assert!(matches!(
        ZividCameraNodeConfig::new(file.path()),
        Err(Error::TomlParseFailure(..))
    ));
}

#[test]
fn ser_default_config() {
    toml::to_string(&ZividCameraNodeConfig::default()).unwrap();
}
