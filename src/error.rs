use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuroraError {
    #[error("aurora container '#{0}' not found")]
    ContainerNotFound(String),
    #[error("no global `{0}` available")]
    MissingGlobal(&'static str),
    #[error("WebGL2 not supported")]
    WebGl2Unavailable,
    #[error("{stage} shader failed to compile: {log}")]
    ShaderCompile { stage: &'static str, log: String },
    #[error("shader program failed to link: {0}")]
    ProgramLink(String),
    #[error("failed to allocate WebGL {0}")]
    GlResource(&'static str),
    #[error("WebGL context lost")]
    ContextLost,
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("surface must be non-empty (got {width}x{height})")]
    EmptySurface { width: usize, height: usize },
    #[error("javascript error: {0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for AuroraError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        match value.as_string() {
            Some(message) => AuroraError::Js(message),
            None => AuroraError::Js(format!("{value:?}")),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl From<AuroraError> for wasm_bindgen::JsValue {
    fn from(err: AuroraError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failing_piece() {
        let err = AuroraError::ContainerNotFound("aurora-webgl".into());
        assert_eq!(err.to_string(), "aurora container '#aurora-webgl' not found");

        let err = AuroraError::ShaderCompile {
            stage: "fragment",
            log: "ERROR: 0:1".into(),
        };
        assert!(err.to_string().starts_with("fragment shader"));
    }
}
