//! Frame scheduling decisions, independent of `requestAnimationFrame`.
//!
//! The browser loop and host tests drive the same [`Animator`]; only the
//! [`FrameTarget`] differs (WebGL canvas vs. CPU buffer).

use log::trace;

use crate::error::AuroraError;
use crate::shade::Uniforms;
use crate::state::RendererState;

/// Something a frame can be drawn into.
pub trait FrameTarget {
    fn draw(&mut self, uniforms: &Uniforms) -> Result<(), AuroraError>;
}

/// Whether another frame should be scheduled after the current one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

#[derive(Clone, Copy, Debug)]
pub struct Animator {
    reduced_motion: bool,
}

impl Animator {
    /// `reduced_motion` is sampled once by the caller and never re-checked.
    pub fn new(reduced_motion: bool) -> Self {
        Self { reduced_motion }
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// Advance time, draw one frame and decide whether to continue.
    pub fn tick<T: FrameTarget + ?Sized>(
        &self,
        state: &mut RendererState,
        target: &mut T,
    ) -> Result<LoopControl, AuroraError> {
        state.advance();
        target.draw(&state.uniforms())?;
        state.record_frame();
        trace!("frame {} at t={:.2}", state.frames_drawn(), state.time());

        if self.reduced_motion {
            Ok(LoopControl::Stop)
        } else {
            Ok(LoopControl::Continue)
        }
    }

    /// Tick until the animator stops or `max_frames` frames were drawn.
    /// Returns the number of frames drawn by this call.
    pub fn run<T: FrameTarget + ?Sized>(
        &self,
        state: &mut RendererState,
        target: &mut T,
        max_frames: u64,
    ) -> Result<u64, AuroraError> {
        let mut drawn = 0;
        while drawn < max_frames {
            let control = self.tick(state, target)?;
            drawn += 1;
            if control == LoopControl::Stop {
                break;
            }
        }
        Ok(drawn)
    }
}
