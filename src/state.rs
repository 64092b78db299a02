use glam::Vec2;

use crate::config::AuroraConfig;
use crate::shade::Uniforms;

/// Seeds are drawn from `[0, SEED_SPAN)` on each axis.
pub const SEED_SPAN: f32 = 100.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Seed {
    pub x: f32,
    pub y: f32,
}

impl Seed {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Build a seed from two random values in `[0, 1)`.
    pub fn from_unit(u: f64, v: f64) -> Self {
        Self::new(u as f32 * SEED_SPAN, v as f32 * SEED_SPAN)
    }
}

impl From<Seed> for Vec2 {
    fn from(seed: Seed) -> Self {
        Vec2::new(seed.x, seed.y)
    }
}

/// Size of the drawing surface: CSS pixels plus the effective pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, device_pixel_ratio: f32, max_pixel_ratio: f32) -> Self {
        let css = |v: f32| if v.is_finite() { v.max(1.0) } else { 1.0 };
        let ratio = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };
        Self {
            width: css(width),
            height: css(height),
            pixel_ratio: ratio.min(max_pixel_ratio),
        }
    }

    /// Backing-store size in device pixels.
    pub fn buffer_size(&self) -> (u32, u32) {
        let px = |v: f32| (v * self.pixel_ratio).round().max(1.0) as u32;
        (px(self.width), px(self.height))
    }

    pub fn resolution(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Everything that changes while the aurora runs.
#[derive(Clone, Debug)]
pub struct RendererState {
    viewport: Viewport,
    time: f64,
    time_step: f64,
    max_pixel_ratio: f32,
    seed: Seed,
    frames_drawn: u64,
}

impl RendererState {
    pub fn new(config: &AuroraConfig, seed: Seed, initial_time: f64) -> Self {
        Self {
            viewport: Viewport::new(1.0, 1.0, 1.0, config.max_pixel_ratio),
            time: initial_time,
            time_step: config.time_step,
            max_pixel_ratio: config.max_pixel_ratio,
            seed,
            frames_drawn: 0,
        }
    }

    /// Apply new container bounds. Returns `true` when the viewport changed.
    pub fn resize(&mut self, width: f32, height: f32, device_pixel_ratio: f32) -> bool {
        let next = Viewport::new(width, height, device_pixel_ratio, self.max_pixel_ratio);
        let changed = next != self.viewport;
        self.viewport = next;
        changed
    }

    pub fn advance(&mut self) {
        self.time += self.time_step;
    }

    pub(crate) fn record_frame(&mut self) {
        self.frames_drawn += 1;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn seed(&self) -> Seed {
        self.seed
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    pub fn uniforms(&self) -> Uniforms {
        Uniforms {
            time: self.time as f32,
            resolution: self.viewport.resolution(),
            seed: self.seed.into(),
            pixel_ratio: self.viewport.pixel_ratio,
        }
    }
}
