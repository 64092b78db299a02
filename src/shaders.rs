//! GLSL ES 3.00 sources for the WebGL2 program.

pub const QUAD_VERT: &str = include_str!("shaders/quad.vert");
pub const AURORA_FRAG: &str = include_str!("shaders/aurora.frag");

/// Vertex attribute slot of the quad corners.
pub const POSITION_ATTRIB: u32 = 0;

pub const U_TIME: &str = "u_time";
pub const U_RESOLUTION: &str = "u_resolution";
pub const U_SEED: &str = "u_seed";
pub const U_PIXEL_RATIO: &str = "u_pixel_ratio";

/// Full-screen quad as a triangle strip in clip space.
pub const QUAD_STRIP: [f32; 8] = [-1.0, -1.0, 1.0, -1.0, -1.0, 1.0, 1.0, 1.0];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_declares_every_bound_uniform() {
        for (name, ty) in [
            (U_TIME, "float"),
            (U_RESOLUTION, "vec2"),
            (U_SEED, "vec2"),
            (U_PIXEL_RATIO, "float"),
        ] {
            let decl = format!("uniform {ty} {name};");
            assert!(AURORA_FRAG.contains(&decl), "missing `{decl}`");
        }
    }

    #[test]
    fn sources_target_glsl_es_300() {
        assert!(QUAD_VERT.starts_with("#version 300 es"));
        assert!(AURORA_FRAG.starts_with("#version 300 es"));
        assert!(QUAD_VERT.contains("location = 0"));
    }

    #[test]
    fn fragment_uses_host_time_scale() {
        let scale = format!("{}", crate::shade::TIME_SCALE);
        assert!(AURORA_FRAG.contains(&format!("TIME_SCALE = {scale};")));
    }
}
