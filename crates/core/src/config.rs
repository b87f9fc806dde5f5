use serde::{Deserialize, Serialize};

use crate::{Color, PointCloudError, Result, Rgba};

/// Defaults a cloud falls back on when it has to invent colors, e.g. when
/// points are set on a cloud that has no colors to resample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CloudConfig {
    pub color: Color,
    pub opacity: f32,
}

impl CloudConfig {
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(PointCloudError::InvalidArgument(format!(
                "opacity must be within [0, 1], got {}",
                self.opacity
            )));
        }
        let rgb = self.color.to_rgb();
        if !rgb.iter().all(|c| c.is_finite()) {
            return Err(PointCloudError::InvalidArgument(
                "color components must be finite".to_string(),
            ));
        }
        Ok(())
    }

    pub fn fill_rgba(&self) -> Rgba {
        self.color.to_rgba(self.opacity)
    }
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            opacity: 1.0,
        }
    }
}
