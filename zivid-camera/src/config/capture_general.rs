use super::parameter_set;
use crate::settings::{ContrastFilter, Filters, GaussianFilter, OutlierFilter, Settings};

parameter_set! {
    /// Settings shared by every frame of one 3D capture.
    pub struct CaptureGeneralConfig ("CaptureGeneral") {
        /// White balance of the blue channel.
        blue_balance: f64 = 1.081, [1.0, 8.0];
        /// White balance of the red channel.
        red_balance: f64 = 1.709, [1.0, 8.0];
        /// Discard points with low contrast.
        filters_contrast_enabled: bool = true, [false, true];
        /// Contrast below which points are discarded.
        filters_contrast_threshold: f64 = 5.0, [0.0, 100.0];
        /// Smooth the point cloud with a gaussian kernel.
        filters_gaussian_enabled: bool = true, [false, true];
        /// Standard deviation of the gaussian kernel, in pixels.
        filters_gaussian_sigma: f64 = 1.5, [0.5, 5.0];
        /// Discard points far from their neighbors.
        filters_outlier_enabled: bool = true, [false, true];
        /// Distance to neighbors above which points are discarded, in millimeters.
        filters_outlier_threshold: f64 = 5.0, [0.0, 100.0];
        /// Discard points caused by reflections.
        filters_reflection_enabled: bool = true, [false, true];
        /// Discard points in saturated regions.
        filters_saturated_enabled: bool = true, [false, true];
    }
}

impl CaptureGeneralConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            blue_balance: settings.blue_balance,
            red_balance: settings.red_balance,
            filters_contrast_enabled: settings.filters.contrast.enabled,
            filters_contrast_threshold: settings.filters.contrast.threshold,
            filters_gaussian_enabled: settings.filters.gaussian.enabled,
            filters_gaussian_sigma: settings.filters.gaussian.sigma,
            filters_outlier_enabled: settings.filters.outlier.enabled,
            filters_outlier_threshold: settings.filters.outlier.threshold,
            filters_reflection_enabled: settings.filters.reflection,
            filters_saturated_enabled: settings.filters.saturated,
        }
    }

    pub fn filters(&self) -> Filters {
        Filters {
            contrast: ContrastFilter {
                enabled: self.filters_contrast_enabled,
                threshold: self.filters_contrast_threshold,
            },
            gaussian: GaussianFilter {
                enabled: self.filters_gaussian_enabled,
                sigma: self.filters_gaussian_sigma,
            },
            outlier: OutlierFilter {
                enabled: self.filters_outlier_enabled,
                threshold: self.filters_outlier_threshold,
            },
            reflection: self.filters_reflection_enabled,
            saturated: self.filters_saturated_enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParameterSet;

    #[test]
    fn test_defaults_match_sdk_defaults() {
        let settings = Settings::default();
        assert_eq!(
            CaptureGeneralConfig::from_settings(&settings),
            CaptureGeneralConfig::default()
        );
        assert_eq!(CaptureGeneralConfig::default().filters(), settings.filters);
    }

    #[test]
    fn test_descriptions_cover_all_fields() {
        let names: Vec<_> = CaptureGeneralConfig::descriptions()
            .iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names.len(), 10);
        assert!(names.contains(&"filters_gaussian_sigma"));
        assert_eq!(
            CaptureGeneralConfig::default().parameters().len(),
            names.len()
        );
    }
}
