mod capture_2d_frame;
mod capture_frame;
mod capture_general;
mod parameters;

pub use capture_2d_frame::*;
pub use capture_frame::*;
pub use capture_general::*;
pub(crate) use parameters::{parameter_set, value_of};
pub use parameters::{ParamDescription, ParamKind, ParamType, ParamValue, Parameter, ParameterSet};
