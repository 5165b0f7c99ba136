use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::shader::ShaderStage;

/// Why a shader program or texture could not be handed to the driver
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{stage} shader {origin} failed to compile: {log}")]
    Compile {
        stage: ShaderStage,
        origin: String,
        log: String,
    },
    #[error("program link failed: {log}")]
    Link { log: String },
    #[error("malformed PNG header: {0}")]
    MalformedHeader(&'static str),
    #[error("unsupported PNG format: {0}")]
    UnsupportedFormat(String),
    #[error("PNG decode failed: {0}")]
    Decode(String),
}

pub type Result<T, E = LoaderError> = std::result::Result<T, E>;
