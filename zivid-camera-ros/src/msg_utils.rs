use std::time::{SystemTime, UNIX_EPOCH};

use zivid_camera::{msg as core, ParamDescription, ParamType, ParamValue, Parameter, ParameterSet};

use crate::msg::{dynamic_reconfigure, sensor_msgs, std_msgs};

pub fn to_ros_time(stamp: SystemTime) -> rosrust::Time {
    let nanos = stamp
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    rosrust::Time::from_nanos(nanos.min(i64::MAX as u128) as i64)
}

/// Negative durations become zero.
pub fn from_ros_duration(duration: rosrust::Duration) -> std::time::Duration {
    let nanos = duration.nanos();
    std::time::Duration::from_nanos(nanos.max(0) as u64)
}

impl From<core::Header> for std_msgs::Header {
    fn from(header: core::Header) -> Self {
        Self {
            seq: header.seq,
            stamp: to_ros_time(header.stamp),
            frame_id: header.frame_id,
        }
    }
}

impl From<core::Image> for sensor_msgs::Image {
    fn from(image: core::Image) -> Self {
        Self {
            header: image.header.into(),
            height: image.height,
            width: image.width,
            encoding: image.encoding,
            is_bigendian: image.is_bigendian as u8,
            step: image.step,
            data: image.data,
        }
    }
}

impl From<core::CameraInfo> for sensor_msgs::CameraInfo {
    fn from(info: core::CameraInfo) -> Self {
        Self {
            header: info.header.into(),
            height: info.height,
            width: info.width,
            distortion_model: info.distortion_model,
            D: info.d,
            K: info.k.into(),
            R: info.r.into(),
            P: info.p.into(),
            binning_x: info.binning_x,
            binning_y: info.binning_y,
            ..Default::default()
        }
    }
}

impl From<core::PointField> for sensor_msgs::PointField {
    fn from(field: core::PointField) -> Self {
        Self {
            name: field.name,
            offset: field.offset,
            datatype: field.datatype,
            count: field.count,
        }
    }
}

impl From<core::PointCloud2> for sensor_msgs::PointCloud2 {
    fn from(cloud: core::PointCloud2) -> Self {
        Self {
            header: cloud.header.into(),
            height: cloud.height,
            width: cloud.width,
            fields: cloud.fields.into_iter().map(Into::into).collect(),
            is_bigendian: cloud.is_bigendian,
            point_step: cloud.point_step,
            row_step: cloud.row_step,
            data: cloud.data,
            is_dense: cloud.is_dense,
        }
    }
}

/// Parameters named in a reconfigure request, in the order bools, ints, doubles.
pub fn from_ros_config(config: &dynamic_reconfigure::Config) -> Vec<Parameter> {
    let bools = config
        .bools
        .iter()
        .map(|p| Parameter::new(p.name.clone(), p.value));
    let ints = config
        .ints
        .iter()
        .map(|p| Parameter::new(p.name.clone(), p.value));
    let doubles = config
        .doubles
        .iter()
        .map(|p| Parameter::new(p.name.clone(), p.value));
    bools.chain(ints).chain(doubles).collect()
}

const DEFAULT_GROUP: &str = "Default";

pub fn to_ros_config<C: ParameterSet>(config: &C) -> dynamic_reconfigure::Config {
    config_from_parameters(config.parameters())
}

/// Parameter list, defaults and bounds of `C`, published on `parameter_descriptions`.
pub fn to_ros_config_description<C: ParameterSet>() -> dynamic_reconfigure::ConfigDescription {
    let descriptions = C::descriptions();
    let config_of = |value: fn(&ParamDescription) -> ParamValue| {
        config_from_parameters(
            descriptions
                .iter()
                .map(|d| Parameter::new(d.name, value(d))),
        )
    };
    dynamic_reconfigure::ConfigDescription {
        groups: vec![dynamic_reconfigure::Group {
            name: DEFAULT_GROUP.to_owned(),
            parameters: descriptions
                .iter()
                .map(|d| dynamic_reconfigure::ParamDescription {
                    name: d.name.to_owned(),
                    type_: ros_type_name(d.param_type).to_owned(),
                    level: 0,
                    description: d.description.to_owned(),
                    edit_method: String::new(),
                })
                .collect(),
            parent: 0,
            id: 0,
            ..Default::default()
        }],
        max: config_of(|d| d.max),
        min: config_of(|d| d.min),
        dflt: config_of(|d| d.default),
    }
}

fn ros_type_name(param_type: ParamType) -> &'static str {
    match param_type {
        ParamType::Bool => "bool",
        ParamType::Int => "int",
        ParamType::Double => "double",
    }
}

fn config_from_parameters(
    parameters: impl IntoIterator<Item = Parameter>,
) -> dynamic_reconfigure::Config {
    let mut ros_config = dynamic_reconfigure::Config {
        groups: vec![dynamic_reconfigure::GroupState {
            name: DEFAULT_GROUP.to_owned(),
            state: true,
            id: 0,
            parent: 0,
        }],
        ..Default::default()
    };
    for Parameter { name, value } in parameters {
        match value {
            ParamValue::Bool(value) => ros_config
                .bools
                .push(dynamic_reconfigure::BoolParameter { name, value }),
            ParamValue::Int(value) => ros_config
                .ints
                .push(dynamic_reconfigure::IntParameter { name, value }),
            ParamValue::Double(value) => ros_config
                .doubles
                .push(dynamic_reconfigure::DoubleParameter { name, value }),
        }
    }
    ros_config
}
