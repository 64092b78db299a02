#![cfg(not(target_arch = "wasm32"))]

use aurora_wasm::shade::{life_phase, lifecycle_envelope, PATCH_SLOTS, TIME_SCALE};
use aurora_wasm::{
    shade, Animator, AuroraConfig, AuroraError, FrameTarget, LoopControl, RendererState, Seed,
    SoftwareSurface, Uniforms,
};
use glam::Vec2;

#[derive(Default)]
struct CountingTarget {
    draws: usize,
}

impl FrameTarget for CountingTarget {
    fn draw(&mut self, _uniforms: &Uniforms) -> Result<(), AuroraError> {
        self.draws += 1;
        Ok(())
    }
}

fn uniforms(time: f32, seed: Vec2) -> Uniforms {
    Uniforms {
        time,
        resolution: Vec2::new(800.0, 600.0),
        seed,
        pixel_ratio: 1.0,
    }
}

#[test]
fn life_phase_is_always_in_unit_interval() {
    let seeds = [Vec2::ZERO, Vec2::new(99.9, 0.1), Vec2::new(37.2, 81.5)];
    let times = [
        0.0, 1e-7, -1e-7, 0.5, 7.99, 8.0, 123.456, -42.0, 1e4, 1e6, 3.3e7, -1e9,
    ];
    for seed in seeds {
        for &time in &times {
            for slot in 0..PATCH_SLOTS {
                let (_, life) = life_phase(time * TIME_SCALE, slot, seed);
                assert!((0.0..1.0).contains(&life), "life={life} t={time} slot={slot}");
            }
        }
    }
}

#[test]
fn lifecycle_envelope_fades_in_holds_and_fades_out() {
    assert_eq!(lifecycle_envelope(0.0), 0.0);
    assert!(lifecycle_envelope(0.999_999) < 1e-3);
    assert_eq!(lifecycle_envelope(1.0), 0.0);
    assert_eq!(lifecycle_envelope(-0.1), 0.0);

    for i in 0..=60 {
        let life = 0.2 + i as f32 * 0.01;
        assert!(lifecycle_envelope(life) > 0.99, "life={life}");
    }
    assert!(lifecycle_envelope(0.05) < lifecycle_envelope(0.1));
    assert!(lifecycle_envelope(0.95) < lifecycle_envelope(0.9));
}

#[test]
fn output_channels_stay_within_unit_range() {
    let seed = Vec2::new(12.0, 34.0);
    let coords = [
        Vec2::ZERO,
        Vec2::new(400.0, 300.0),
        Vec2::new(799.5, 599.5),
        Vec2::new(-250.0, 1200.0),
        Vec2::new(1e6, -1e6),
        Vec2::new(3.0e38, 3.0e38),
    ];
    let times = [0.0, 0.2, 57.3, 4_000.0, 1e7, 1e20, -500.0];
    for &time in &times {
        for &coord in &coords {
            let px = shade(coord, &uniforms(time, seed));
            for c in [px.r, px.g, px.b, px.a] {
                assert!(c.is_finite() && (0.0..=1.0).contains(&c), "{px:?} at {coord:?} t={time}");
            }
        }
    }
}

#[test]
fn resize_sets_resolution_exactly() {
    let mut state = RendererState::new(&AuroraConfig::default(), Seed::new(1.0, 1.0), 0.0);
    state.resize(800.0, 600.0, 1.0);
    assert_eq!(state.uniforms().resolution, Vec2::new(800.0, 600.0));

    // high-density screens keep the CSS resolution and cap the ratio
    state.resize(800.0, 600.0, 3.0);
    assert_eq!(state.uniforms().resolution, Vec2::new(800.0, 600.0));
    assert_eq!(state.uniforms().pixel_ratio, 2.0);
    assert_eq!(state.viewport().buffer_size(), (1600, 1200));
}

#[test]
fn reduced_motion_draws_exactly_one_frame() {
    let mut state = RendererState::new(&AuroraConfig::default(), Seed::new(5.0, 6.0), 0.0);
    let mut target = CountingTarget::default();
    let animator = Animator::new(true);

    let drawn = animator.run(&mut state, &mut target, 1_000).unwrap();
    assert_eq!(drawn, 1);
    assert_eq!(target.draws, 1);
    assert_eq!(state.frames_drawn(), 1);

    // a later resize updates the resolution without drawing
    state.resize(1024.0, 768.0, 1.0);
    assert_eq!(target.draws, 1);
    assert_eq!(state.uniforms().resolution, Vec2::new(1024.0, 768.0));
}

#[test]
fn full_motion_keeps_scheduling() {
    let mut state = RendererState::new(&AuroraConfig::default(), Seed::new(5.0, 6.0), 0.0);
    let mut target = CountingTarget::default();
    let animator = Animator::new(false);
    for _ in 0..10 {
        assert_eq!(animator.tick(&mut state, &mut target).unwrap(), LoopControl::Continue);
    }
    assert_eq!(target.draws, 10);
    assert!((state.time() - 2.0).abs() < 1e-9);
}

#[test]
fn pixel_function_is_deterministic() {
    let u = uniforms(321.0, Vec2::new(44.0, 9.5));
    for i in 0..50 {
        let coord = Vec2::new(i as f32 * 16.0, 600.0 - i as f32 * 12.0);
        assert_eq!(shade(coord, &u), shade(coord, &u));
    }

    let mut a = SoftwareSurface::new(24, 18).unwrap();
    let mut b = SoftwareSurface::new(24, 18).unwrap();
    a.draw(&u).unwrap();
    b.draw(&u).unwrap();
    assert_eq!(a.as_rgba(), b.as_rgba());
}

#[test]
fn independent_instances_do_not_share_time() {
    let config = AuroraConfig::default();
    let mut first = RendererState::new(&config, Seed::new(1.0, 2.0), 0.0);
    let second = RendererState::new(&config, Seed::new(3.0, 4.0), 0.0);
    let mut target = CountingTarget::default();
    Animator::new(false).run(&mut first, &mut target, 5).unwrap();
    assert_eq!(second.time(), 0.0);
    assert_eq!(second.frames_drawn(), 0);
}
