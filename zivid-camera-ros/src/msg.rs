rosrust::rosmsg_include!(
    sensor_msgs / CameraInfo,
    sensor_msgs / Image,
    sensor_msgs / PointCloud2,
    sensor_msgs / PointField,
    std_msgs / Header,
    dynamic_reconfigure / BoolParameter,
    dynamic_reconfigure / Config,
    dynamic_reconfigure / ConfigDescription,
    dynamic_reconfigure / DoubleParameter,
    dynamic_reconfigure / Group,
    dynamic_reconfigure / GroupState,
    dynamic_reconfigure / IntParameter,
    dynamic_reconfigure / ParamDescription,
    dynamic_reconfigure / Reconfigure,
    zivid_camera / CameraInfoModelName,
    zivid_camera / CameraInfoSerialNumber,
    zivid_camera / Capture,
    zivid_camera / Capture2D,
    zivid_camera / CaptureAssistantSuggestSettings,
    zivid_camera / IsConnected
);
