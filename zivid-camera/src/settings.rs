use std::time::Duration;

#[derive(Clone, Debug, PartialEq)]
pub struct ContrastFilter {
    pub enabled: bool,
    pub threshold: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GaussianFilter {
    pub enabled: bool,
    pub sigma: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OutlierFilter {
    pub enabled: bool,
    pub threshold: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Filters {
    pub contrast: ContrastFilter,
    pub gaussian: GaussianFilter,
    pub outlier: OutlierFilter,
    pub reflection: bool,
    pub saturated: bool,
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            contrast: ContrastFilter {
                enabled: true,
                threshold: 5.0,
            },
            gaussian: GaussianFilter {
                enabled: true,
                sigma: 1.5,
            },
            outlier: OutlierFilter {
                enabled: true,
                threshold: 5.0,
            },
            reflection: true,
            saturated: true,
        }
    }
}

/// Settings of one 3D acquisition, as handed to the camera.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub bidirectional: bool,
    pub brightness: f64,
    pub exposure_time: Duration,
    pub gain: f64,
    pub iris: u32,
    pub blue_balance: f64,
    pub red_balance: f64,
    pub filters: Filters,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bidirectional: false,
            brightness: 1.0,
            exposure_time: Duration::from_micros(10_000),
            gain: 1.0,
            iris: 22,
            blue_balance: 1.081,
            red_balance: 1.709,
            filters: Filters::default(),
        }
    }
}

/// Settings of one 2D acquisition.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings2D {
    pub brightness: f64,
    pub exposure_time: Duration,
    pub gain: f64,
    pub iris: u32,
}

impl Default for Settings2D {
    fn default() -> Self {
        Self {
            brightness: 1.0,
            exposure_time: Duration::from_micros(10_000),
            gain: 1.0,
            iris: 22,
        }
    }
}
