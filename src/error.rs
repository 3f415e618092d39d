use crate::driver::Stage;

/// A shader program that fails to build is unusable; neither error is
/// recoverable by retrying.
#[derive(thiserror::Error, Debug)]
pub enum ShaderError {
    #[error("failed to compile {stage} stage of shader `{name}`: {log}")]
    Compile {
        stage: Stage,
        name: &'static str,
        log: String,
    },
    #[error("failed to link shader `{name}`: {log}")]
    Link { name: &'static str, log: String },
}
