//! Procedural aurora borealis background for the web.
//!
//! The pixel function, renderer state and frame scheduling are plain Rust and
//! build on every target; the DOM/WebGL2 glue only exists on `wasm32`.

pub mod animation;
pub mod config;
pub mod error;
pub mod shade;
pub mod shaders;
pub mod software;
pub mod state;

pub use animation::{Animator, FrameTarget, LoopControl};
pub use config::AuroraConfig;
pub use error::AuroraError;
pub use shade::{shade, Rgba, Uniforms};
pub use software::SoftwareSurface;
pub use state::{RendererState, Seed, Viewport};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;

    use crate::config::AuroraConfig;

    mod gl;
    mod render;

    #[wasm_bindgen(start)]
    pub fn boot() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();
    }

    /// Mount into the default `#aurora-webgl` container.
    #[wasm_bindgen]
    pub fn start() -> Result<(), JsValue> {
        render::start(AuroraConfig::default())?;
        Ok(())
    }

    #[wasm_bindgen(js_name = mountAurora)]
    pub fn mount(container_id: &str) -> Result<(), JsValue> {
        render::start(AuroraConfig::default().with_container_id(container_id))?;
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::{mount, start};
