use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ParamType {
    Bool,
    Int,
    Double,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i32),
    Double(f64),
}

impl ParamValue {
    pub fn param_type(&self) -> ParamType {
        match self {
            Self::Bool(_) => ParamType::Bool,
            Self::Int(_) => ParamType::Int,
            Self::Double(_) => ParamType::Double,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
        }
    }
}

/// A named value of a parameter set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Parameter {
    pub name: String,
    pub value: ParamValue,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParamDescription {
    pub name: &'static str,
    pub param_type: ParamType,
    pub default: ParamValue,
    pub min: ParamValue,
    pub max: ParamValue,
    pub description: &'static str,
}

/// Rust types a parameter can have.
pub trait ParamKind: Copy + PartialOrd + Into<ParamValue> {
    const TYPE: ParamType;

    fn from_value(value: &ParamValue) -> Option<Self>;

    fn clamp_to(self, min: Self, max: Self) -> Self {
        if self < min {
            min
        } else if self > max {
            max
        } else {
            self
        }
    }
}

impl ParamKind for bool {
    const TYPE: ParamType = ParamType::Bool;

    fn from_value(value: &ParamValue) -> Option<Self> {
        match value {
            ParamValue::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl ParamKind for i32 {
    const TYPE: ParamType = ParamType::Int;

    fn from_value(value: &ParamValue) -> Option<Self> {
        match value {
            ParamValue::Int(v) => Some(*v),
            _ => None,
        }
    }
}

impl ParamKind for f64 {
    const TYPE: ParamType = ParamType::Double;

    fn from_value(value: &ParamValue) -> Option<Self> {
        match value {
            ParamValue::Double(v) if !v.is_nan() => Some(*v),
            ParamValue::Int(v) => Some(f64::from(*v)),
            _ => None,
        }
    }
}

pub(crate) fn value_of<T: ParamKind>(v: T) -> ParamValue {
    v.into()
}

/// A typed, introspectable group of parameters served by one configuration endpoint.
pub trait ParameterSet: Clone + Default + fmt::Debug + Send + Sync + 'static {
    /// Name of the group, e.g. `CaptureFrame`.
    const GROUP: &'static str;

    fn descriptions() -> Vec<ParamDescription>;

    fn parameters(&self) -> Vec<Parameter>;

    /// Sets one parameter by name. Values outside the described range are
    /// clamped to the nearest bound; returns `true` if that happened.
    fn apply(&mut self, parameter: &Parameter) -> Result<bool, Error>;
}

macro_rules! parameter_set {
    (
        $(#[$meta:meta])*
        pub struct $name:ident ($group:literal) {
            $(
                #[doc = $doc:literal]
                $field:ident : $ty:ty = $default:expr, [$min:expr, $max:expr];
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize, schemars::JsonSchema)]
        #[serde(default, deny_unknown_fields)]
        pub struct $name {
            $(
                #[doc = $doc]
                pub $field: $ty,
            )*
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $($field: $default,)*
                }
            }
        }

        impl $crate::config::ParameterSet for $name {
            const GROUP: &'static str = $group;

            fn descriptions() -> Vec<$crate::config::ParamDescription> {
                vec![
                    $(
                        $crate::config::ParamDescription {
                            name: stringify!($field),
                            param_type: <$ty as $crate::config::ParamKind>::TYPE,
                            default: $crate::config::value_of::<$ty>($default),
                            min: $crate::config::value_of::<$ty>($min),
                            max: $crate::config::value_of::<$ty>($max),
                            description: $doc.trim(),
                        },
                    )*
                ]
            }

            fn parameters(&self) -> Vec<$crate::config::Parameter> {
                vec![
                    $($crate::config::Parameter::new(stringify!($field), self.$field),)*
                ]
            }

            fn apply(
                &mut self,
                parameter: &$crate::config::Parameter,
            ) -> Result<bool, $crate::error::Error> {
                match parameter.name.as_str() {
                    $(
                        stringify!($field) => {
                            let value: $ty =
                                $crate::config::ParamKind::from_value(&parameter.value)
                                    .ok_or_else(|| {
                                        $crate::error::Error::invalid_argument(format!(
                                            "{}.{} expects {:?}, got {:?}",
                                            $group,
                                            stringify!($field),
                                            <$ty as $crate::config::ParamKind>::TYPE,
                                            parameter.value
                                        ))
                                    })?;
                            let clamped = $crate::config::ParamKind::clamp_to(value, $min, $max);
                            self.$field = clamped;
                            Ok(clamped != value)
                        }
                    )*
                    _ => Err($crate::error::Error::invalid_argument(format!(
                        "{} has no parameter named {:?}",
                        $group, parameter.name
                    ))),
                }
            }
        }
    };
}

pub(crate) use parameter_set;
