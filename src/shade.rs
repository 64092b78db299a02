//! CPU form of the aurora fragment shader.
//!
//! Every function here mirrors `shaders/aurora.frag` one to one so frames can
//! be reproduced (and tested) on the host. Nothing in this module holds state:
//! a pixel's color depends only on its coordinate and the [`Uniforms`].

use glam::{Vec2, Vec3};

/// Number of curtain slots evaluated per pixel.
pub const PATCH_SLOTS: usize = 5;
/// Factor applied to the time uniform before it drives any motion.
pub const TIME_SCALE: f32 = 0.022;

const FBM_OCTAVES: usize = 6;
const INTENSITY_EPSILON: f32 = 0.001;
const GAMMA: f32 = 0.92;

const GREEN: Vec3 = Vec3::new(0.1, 0.9, 0.55);
const TEAL: Vec3 = Vec3::new(0.15, 0.7, 0.9);
const VIOLET: Vec3 = Vec3::new(0.5, 0.25, 0.85);

/// Values fed to the fragment shader for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Uniforms {
    pub time: f32,
    /// Container size in CSS pixels.
    pub resolution: Vec2,
    pub seed: Vec2,
    pub pixel_ratio: f32,
}

/// Straight (non-premultiplied) color, every channel in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub fn to_rgba8(self) -> [u8; 4] {
        let quantize = |c: f32| (c * 255.0).round() as u8;
        [quantize(self.r), quantize(self.g), quantize(self.b), quantize(self.a)]
    }
}

pub fn fract(x: f32) -> f32 {
    x - x.floor()
}

pub fn mix(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// GLSL `smoothstep`, including the reversed-edge form (`edge0 > edge1`).
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

pub fn hash(p: Vec2) -> f32 {
    fract(p.dot(Vec2::new(127.1, 311.7)).sin() * 43_758.547)
}

/// Value noise: Hermite blend of the hashed corners of the lattice cell.
pub fn noise(p: Vec2) -> f32 {
    let i = p.floor();
    let f = p - i;
    let a = hash(i);
    let b = hash(i + Vec2::X);
    let c = hash(i + Vec2::Y);
    let d = hash(i + Vec2::ONE);
    let u = f * f * (Vec2::splat(3.0) - 2.0 * f);
    mix(a, b, u.x) + (c - a) * u.y * (1.0 - u.x) + (d - b) * u.x * u.y
}

pub fn fbm(mut p: Vec2) -> f32 {
    let mut value = 0.0;
    let mut amplitude = 0.5;
    for _ in 0..FBM_OCTAVES {
        value += amplitude * noise(p);
        p *= 2.0;
        amplitude *= 0.5;
    }
    value
}

pub fn rot2d(p: Vec2, angle: f32) -> Vec2 {
    let (s, c) = angle.sin_cos();
    Vec2::new(p.x * c - p.y * s, p.x * s + p.y * c)
}

fn slot_period(slot: usize) -> f32 {
    8.0 + slot as f32 * 3.5
}

/// Returns `(cycle, life)` for a slot at scaled time `t`.
///
/// `life` always lies in `[0, 1)`; `cycle` counts completed lifecycles and
/// reseeds the patch placement each time it changes.
pub fn life_phase(t: f32, slot: usize, seed: Vec2) -> (f32, f32) {
    let period = slot_period(slot);
    let offset = hash(seed + slot as f32) * period;
    let phase = (t + offset) / period;
    let life = fract(phase);
    // fract rounds up to 1.0 for tiny negative phases
    let life = if (0.0..1.0).contains(&life) { life } else { 0.0 };
    (phase.floor(), life)
}

/// Fade-in over the first 15% of a lifecycle, fade-out over the last 20%.
pub fn lifecycle_envelope(life: f32) -> f32 {
    if !(0.0..1.0).contains(&life) {
        return 0.0;
    }
    smoothstep(0.0, 0.15, life) * smoothstep(1.0, 0.8, life)
}

/// One curtain as placed for its current cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Patch {
    pub center: Vec2,
    pub width: f32,
    pub angle: f32,
    pub life: f32,
    pub hue: f32,
}

impl Patch {
    pub fn spawn(slot: usize, t: f32, seed: Vec2) -> Self {
        let fi = slot as f32;
        let (cycle, life) = life_phase(t, slot, seed);
        let cx = hash(Vec2::new(cycle, fi + seed.x)) * 1.4 - 0.2;
        let cy = hash(Vec2::new(fi + seed.y, cycle)) * 0.6 + 0.3;
        Self {
            center: Vec2::new(cx, cy),
            width: 0.06 + hash(Vec2::new(cycle + fi, seed.x)) * 0.12,
            angle: (hash(Vec2::new(cycle * 3.7, fi + seed.y * 2.0)) - 0.5) * 2.5,
            life,
            hue: hash(Vec2::new(cycle + 0.5, fi)),
        }
    }

    /// Brightness this patch adds at `uv`. Never negative.
    pub fn intensity(&self, uv: Vec2, t: f32) -> f32 {
        let c = self.center;
        let mut local = rot2d(uv - c, self.angle);
        local.x += curtain_bend(local.y, t, c);
        local = rot2d(local, (t * 0.6 + c.x * 5.0).sin() * 0.3 * self.life);

        let across = local.x / self.width;
        let falloff = (-across * across).exp();

        let rays = fbm(Vec2::new(local.y * 10.0 + c.x * 5.0, t * 0.8)) * 0.5
            + fbm(Vec2::new(local.y * 18.0 - c.y * 3.0, t * 1.2)) * 0.25;

        let len = 0.4 + self.width * 1.2;
        let shimmer = (local.y * 25.0 + t * 2.5 + c.x * 12.0).sin() * 0.04
            + (local.y * 40.0 - t * 3.2).sin() * 0.02;
        let along = smoothstep(-len, -len * 0.1, local.y)
            * smoothstep(len * 0.7, len * 0.05, local.y)
            * (1.0 + shimmer);

        falloff * (0.35 + rays) * along * lifecycle_envelope(self.life)
    }

    pub fn color(&self, uv: Vec2) -> Vec3 {
        GREEN
            .lerp(TEAL, self.hue)
            .lerp(VIOLET, smoothstep(0.0, 0.06, uv.y - self.center.y))
    }
}

/// Horizontal displacement that turns a straight band into a wavy curtain.
fn curtain_bend(y: f32, t: f32, c: Vec2) -> f32 {
    let s_curve = (y * 2.5 + t * 0.5 + c.x * 6.0).sin() * 0.25
        + (y * 1.2 - t * 0.3 + c.y * 4.0).sin() * 0.18;
    let undulation = fbm(Vec2::new(y * 3.5 + c.x * 4.0, t * 0.9)) * 0.15;
    let ripple = (y * 12.0 + t * 2.0 + c.x * 8.0).sin() * 0.04;
    s_curve + undulation + ripple
}

fn saturate(x: f32) -> f32 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}

/// Color of the fragment at `frag_coord` (device pixels, origin bottom-left).
pub fn shade(frag_coord: Vec2, uniforms: &Uniforms) -> Rgba {
    let extent = (uniforms.resolution * uniforms.pixel_ratio).max(Vec2::ONE);
    let uv = frag_coord / extent;
    let t = uniforms.time * TIME_SCALE;

    let mut intensity = 0.0;
    let mut accum = Vec3::ZERO;
    for slot in 0..PATCH_SLOTS {
        let patch = Patch::spawn(slot, t, uniforms.seed);
        let contribution = patch.intensity(uv, t);
        if !contribution.is_finite() {
            continue;
        }
        intensity += contribution;
        accum += patch.color(uv) * contribution;
    }

    let base = if intensity > INTENSITY_EPSILON {
        accum / intensity
    } else {
        GREEN
    };
    let glow = smoothstep(0.0, 1.0, intensity) * 0.2;
    let color = (base * intensity + base * glow).max(Vec3::ZERO).powf(GAMMA);

    Rgba {
        r: saturate(color.x),
        g: saturate(color.y),
        b: saturate(color.z),
        a: saturate((intensity + glow * 0.2) * 0.5),
    }
}
