use js_sys::Float32Array;
use web_sys::{
    WebGl2RenderingContext as GL, WebGlProgram, WebGlShader, WebGlUniformLocation,
    WebGlVertexArrayObject,
};

use crate::animation::FrameTarget;
use crate::error::AuroraError;
use crate::shade::Uniforms;
use crate::shaders;

fn compile_shader(gl: &GL, kind: u32, source: &str) -> Result<WebGlShader, AuroraError> {
    let stage = if kind == GL::VERTEX_SHADER {
        "vertex"
    } else {
        "fragment"
    };
    let shader = gl
        .create_shader(kind)
        .ok_or(AuroraError::GlResource("shader"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    let compiled = gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false);
    if compiled {
        Ok(shader)
    } else {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(AuroraError::ShaderCompile { stage, log })
    }
}

fn link_program(gl: &GL, vert: &WebGlShader, frag: &WebGlShader) -> Result<WebGlProgram, AuroraError> {
    let program = gl
        .create_program()
        .ok_or(AuroraError::GlResource("program"))?;
    gl.attach_shader(&program, vert);
    gl.attach_shader(&program, frag);
    gl.bind_attrib_location(&program, shaders::POSITION_ATTRIB, "a_position");
    gl.link_program(&program);

    let linked = gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false);
    if linked {
        Ok(program)
    } else {
        let log = gl.get_program_info_log(&program).unwrap_or_default();
        gl.delete_program(Some(&program));
        Err(AuroraError::ProgramLink(log))
    }
}

fn upload_quad(gl: &GL) -> Result<WebGlVertexArrayObject, AuroraError> {
    let vao = gl
        .create_vertex_array()
        .ok_or(AuroraError::GlResource("vertex array"))?;
    gl.bind_vertex_array(Some(&vao));

    let buffer = gl
        .create_buffer()
        .ok_or(AuroraError::GlResource("buffer"))?;
    gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
    let corners = Float32Array::from(&shaders::QUAD_STRIP[..]);
    gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &corners, GL::STATIC_DRAW);
    gl.enable_vertex_attrib_array(shaders::POSITION_ATTRIB);
    gl.vertex_attrib_pointer_with_i32(shaders::POSITION_ATTRIB, 2, GL::FLOAT, false, 0, 0);

    gl.bind_vertex_array(None);
    Ok(vao)
}

struct Locations {
    time: Option<WebGlUniformLocation>,
    resolution: Option<WebGlUniformLocation>,
    seed: Option<WebGlUniformLocation>,
    pixel_ratio: Option<WebGlUniformLocation>,
}

/// The aurora program bound to a WebGL2 context.
pub struct WebGlSurface {
    gl: GL,
    program: WebGlProgram,
    quad: WebGlVertexArrayObject,
    locations: Locations,
}

impl WebGlSurface {
    pub fn new(gl: GL) -> Result<Self, AuroraError> {
        let vert = compile_shader(&gl, GL::VERTEX_SHADER, shaders::QUAD_VERT)?;
        let frag = compile_shader(&gl, GL::FRAGMENT_SHADER, shaders::AURORA_FRAG)?;
        let program = link_program(&gl, &vert, &frag)?;
        // the linked program keeps its own copy
        gl.delete_shader(Some(&vert));
        gl.delete_shader(Some(&frag));

        let quad = upload_quad(&gl)?;
        let locations = Locations {
            time: gl.get_uniform_location(&program, shaders::U_TIME),
            resolution: gl.get_uniform_location(&program, shaders::U_RESOLUTION),
            seed: gl.get_uniform_location(&program, shaders::U_SEED),
            pixel_ratio: gl.get_uniform_location(&program, shaders::U_PIXEL_RATIO),
        };

        gl.disable(GL::DEPTH_TEST);
        gl.disable(GL::BLEND);
        gl.clear_color(0.0, 0.0, 0.0, 0.0);

        Ok(Self {
            gl,
            program,
            quad,
            locations,
        })
    }

    pub fn set_viewport(&self, width: u32, height: u32) {
        self.gl.viewport(0, 0, width as i32, height as i32);
    }
}

impl FrameTarget for WebGlSurface {
    fn draw(&mut self, uniforms: &Uniforms) -> Result<(), AuroraError> {
        let gl = &self.gl;
        if gl.is_context_lost() {
            return Err(AuroraError::ContextLost);
        }

        gl.clear(GL::COLOR_BUFFER_BIT);
        gl.use_program(Some(&self.program));
        gl.uniform1f(self.locations.time.as_ref(), uniforms.time);
        gl.uniform2f(
            self.locations.resolution.as_ref(),
            uniforms.resolution.x,
            uniforms.resolution.y,
        );
        gl.uniform2f(self.locations.seed.as_ref(), uniforms.seed.x, uniforms.seed.y);
        gl.uniform1f(self.locations.pixel_ratio.as_ref(), uniforms.pixel_ratio);

        gl.bind_vertex_array(Some(&self.quad));
        gl.draw_arrays(GL::TRIANGLE_STRIP, 0, 4);
        gl.bind_vertex_array(None);
        Ok(())
    }
}
