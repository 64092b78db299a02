use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Math, Object, Reflect};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Element, HtmlCanvasElement, WebGl2RenderingContext as GL, Window};

use super::gl::WebGlSurface;
use crate::animation::{Animator, LoopControl};
use crate::config::AuroraConfig;
use crate::error::AuroraError;
use crate::state::{RendererState, Seed};

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

fn prefers_reduced_motion(window: &Window) -> bool {
    match window.match_media(REDUCED_MOTION_QUERY) {
        Ok(Some(list)) => list.matches(),
        _ => false,
    }
}

fn create_canvas(window: &Window, config: &AuroraConfig) -> Result<HtmlCanvasElement, AuroraError> {
    let document = window.document().ok_or(AuroraError::MissingGlobal("document"))?;
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")?
        .dyn_into()
        .map_err(|_| AuroraError::Js("created element is not a canvas".into()))?;
    let style = canvas.style();
    style.set_property("width", "100%")?;
    style.set_property("height", "100%")?;
    style.set_property("display", "block")?;
    style.set_property("opacity", &config.canvas_opacity.to_string())?;
    Ok(canvas)
}

fn webgl2_context(canvas: &HtmlCanvasElement) -> Result<GL, AuroraError> {
    let attrs = Object::new();
    for (key, value) in [
        ("alpha", true),
        ("antialias", true),
        ("depth", false),
        ("premultipliedAlpha", false),
    ] {
        Reflect::set(&attrs, &JsValue::from_str(key), &JsValue::from_bool(value))?;
    }
    let gl = canvas
        .get_context_with_context_options("webgl2", &attrs)?
        .ok_or(AuroraError::WebGl2Unavailable)?
        .dyn_into::<GL>()
        .map_err(|_| AuroraError::WebGl2Unavailable)?;
    Ok(gl)
}

/// Match canvas and viewport to the container. Never redraws.
fn apply_resize(
    window: &Window,
    container: &Element,
    canvas: &HtmlCanvasElement,
    surface: &RefCell<WebGlSurface>,
    state: &RefCell<RendererState>,
) {
    let rect = container.get_bounding_client_rect();
    let mut state = state.borrow_mut();
    state.resize(
        rect.width() as f32,
        rect.height() as f32,
        window.device_pixel_ratio() as f32,
    );
    let (width, height) = state.viewport().buffer_size();
    canvas.set_width(width);
    canvas.set_height(height);
    surface.borrow().set_viewport(width, height);
    log::debug!("aurora resized to {}x{} ({width}x{height} px)", rect.width(), rect.height());
}

/// Insert the aurora canvas into `config.container_id` and start animating.
pub fn start(config: AuroraConfig) -> Result<(), AuroraError> {
    config.validate()?;
    let window = web_sys::window().ok_or(AuroraError::MissingGlobal("window"))?;
    let document = window.document().ok_or(AuroraError::MissingGlobal("document"))?;
    let container = document
        .get_element_by_id(&config.container_id)
        .ok_or_else(|| AuroraError::ContainerNotFound(config.container_id.clone()))?;

    let animator = Animator::new(prefers_reduced_motion(&window));
    let canvas = create_canvas(&window, &config)?;
    let gl = webgl2_context(&canvas)?;
    let surface = Rc::new(RefCell::new(WebGlSurface::new(gl)?));
    container.append_child(&canvas)?;

    let seed = Seed::from_unit(Math::random(), Math::random());
    let initial_time = Math::random() * config.initial_time_span;
    let state = Rc::new(RefCell::new(RendererState::new(&config, seed, initial_time)));
    log::info!(
        "aurora mounted in #{} (seed {:.2},{:.2}, reduced motion: {})",
        config.container_id,
        seed.x,
        seed.y,
        animator.reduced_motion()
    );

    // Resize canvas to fit container
    apply_resize(&window, &container, &canvas, &surface, &state);
    let resize_closure = {
        let window = window.clone();
        let canvas = canvas.clone();
        let surface = surface.clone();
        let state = state.clone();
        Closure::wrap(Box::new(move || {
            apply_resize(&window, &container, &canvas, &surface, &state);
        }) as Box<dyn FnMut()>)
    };
    window.add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())?;
    resize_closure.forget();

    // Animation loop
    // `f` holds the animation-frame closure so that it can keep passing
    // itself to `request_animation_frame`. It is created empty and filled
    // once the closure exists.
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    let frame_window = window.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let control = animator.tick(&mut state.borrow_mut(), &mut *surface.borrow_mut());
        match control {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Stop) => {
                log::info!("reduced motion preferred; aurora frozen after one frame");
                return;
            }
            Err(err) => {
                log::error!("aurora draw failed, stopping: {err}");
                return;
            }
        }

        // schedule next
        if let Some(next) = f.borrow().as_ref() {
            if let Err(err) = frame_window.request_animation_frame(next.as_ref().unchecked_ref()) {
                log::error!("requestAnimationFrame failed: {err:?}");
            }
        }
    }) as Box<dyn FnMut()>));

    if let Some(first) = g.borrow().as_ref() {
        window.request_animation_frame(first.as_ref().unchecked_ref())?;
    }

    Ok(())
}
