//! RGBA8 pixel buffer filled by the CPU pixel function.
//!
//! Rows are stored top-down like canvas `ImageData`, so the buffer can be
//! handed to `putImageData` or written out as-is.

use glam::Vec2;

use crate::animation::FrameTarget;
use crate::error::AuroraError;
use crate::shade::{shade, Uniforms};

#[derive(Clone, Debug)]
pub struct SoftwareSurface {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl SoftwareSurface {
    pub fn new(width: usize, height: usize) -> Result<Self, AuroraError> {
        if width == 0 || height == 0 {
            return Err(AuroraError::EmptySurface { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![0; width * height * 4],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn as_rgba(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y * self.width + x) * 4;
        let mut px = [0; 4];
        px.copy_from_slice(&self.pixels[offset..offset + 4]);
        Some(px)
    }

    /// Sample the whole viewport described by `uniforms`, whatever this
    /// surface's own size, at texel centers.
    pub fn render(&mut self, uniforms: &Uniforms) {
        let extent = uniforms.resolution * uniforms.pixel_ratio;
        let scale = extent / Vec2::new(self.width as f32, self.height as f32);
        for (row, line) in self.pixels.chunks_exact_mut(self.width * 4).enumerate() {
            // ImageData row 0 is the top edge; fragment y grows upwards
            let y = (self.height - 1 - row) as f32 + 0.5;
            for (col, texel) in line.chunks_exact_mut(4).enumerate() {
                let frag = Vec2::new(col as f32 + 0.5, y) * scale;
                texel.copy_from_slice(&shade(frag, uniforms).to_rgba8());
            }
        }
    }
}

impl FrameTarget for SoftwareSurface {
    fn draw(&mut self, uniforms: &Uniforms) -> Result<(), AuroraError> {
        self.render(uniforms);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniforms() -> Uniforms {
        Uniforms {
            time: 42.0,
            resolution: Vec2::new(320.0, 180.0),
            seed: Vec2::new(17.0, 61.0),
            pixel_ratio: 2.0,
        }
    }

    #[test]
    fn rejects_empty_surface() {
        assert!(matches!(
            SoftwareSurface::new(0, 10),
            Err(AuroraError::EmptySurface { width: 0, height: 10 })
        ));
    }

    #[test]
    fn pixel_lookup_is_bounds_checked() {
        let surface = SoftwareSurface::new(4, 3).unwrap();
        assert_eq!(surface.as_rgba().len(), 4 * 3 * 4);
        assert_eq!(surface.pixel(3, 2), Some([0, 0, 0, 0]));
        assert_eq!(surface.pixel(4, 0), None);
    }

    #[test]
    fn texels_match_the_pixel_function() {
        let u = uniforms();
        let mut surface = SoftwareSurface::new(16, 9).unwrap();
        surface.render(&u);
        // top-left texel maps to the top of the viewport
        let scale = Vec2::new(640.0 / 16.0, 360.0 / 9.0);
        let frag = Vec2::new(0.5, 8.5) * scale;
        assert_eq!(surface.pixel(0, 0), Some(shade(frag, &u).to_rgba8()));
    }
}
