//! Runtime knobs for the aurora background.

use crate::error::AuroraError;

/// Id of the element the canvas is inserted into when none is given.
pub const DEFAULT_CONTAINER_ID: &str = "aurora-webgl";

#[derive(Clone, Debug, PartialEq)]
pub struct AuroraConfig {
    /// DOM id of the element that receives the canvas.
    pub container_id: String,
    /// Amount the time accumulator advances per frame (shader time units).
    pub time_step: f64,
    /// Upper bound applied to `window.devicePixelRatio`.
    pub max_pixel_ratio: f32,
    /// Start time is drawn uniformly from `[0, initial_time_span)`.
    pub initial_time_span: f64,
    /// CSS opacity of the inserted canvas.
    pub canvas_opacity: f32,
}

impl Default for AuroraConfig {
    fn default() -> Self {
        Self {
            container_id: DEFAULT_CONTAINER_ID.to_string(),
            time_step: 0.2,
            max_pixel_ratio: 2.0,
            initial_time_span: 200.0,
            canvas_opacity: 0.8,
        }
    }
}

impl AuroraConfig {
    pub fn with_container_id(mut self, id: impl Into<String>) -> Self {
        self.container_id = id.into();
        self
    }

    pub fn with_time_step(mut self, step: f64) -> Self {
        self.time_step = step;
        self
    }

    pub fn with_max_pixel_ratio(mut self, ratio: f32) -> Self {
        self.max_pixel_ratio = ratio;
        self
    }

    pub fn with_canvas_opacity(mut self, opacity: f32) -> Self {
        self.canvas_opacity = opacity;
        self
    }

    pub fn validate(&self) -> Result<(), AuroraError> {
        if self.container_id.trim().is_empty() {
            return Err(AuroraError::InvalidConfig("container id is empty".into()));
        }
        if !self.time_step.is_finite() || self.time_step <= 0.0 {
            return Err(AuroraError::InvalidConfig(format!(
                "time step must be positive, got {}",
                self.time_step
            )));
        }
        if !self.max_pixel_ratio.is_finite() || self.max_pixel_ratio < 1.0 {
            return Err(AuroraError::InvalidConfig(format!(
                "max pixel ratio must be >= 1, got {}",
                self.max_pixel_ratio
            )));
        }
        if !self.initial_time_span.is_finite() || self.initial_time_span < 0.0 {
            return Err(AuroraError::InvalidConfig(format!(
                "initial time span must be >= 0, got {}",
                self.initial_time_span
            )));
        }
        if !(0.0..=1.0).contains(&self.canvas_opacity) {
            return Err(AuroraError::InvalidConfig(format!(
                "canvas opacity must be within [0, 1], got {}",
                self.canvas_opacity
            )));
        }
        Ok(())
    }
}
