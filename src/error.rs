use crate::core::renderer::Primitive;
use std::fmt;
use thiserror::Error;

/// Which geometry arena a handle or index refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferKind {
    Position,
    Index,
    Color,
}

impl fmt::Display for BufferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BufferKind::Position => "position",
            BufferKind::Index => "index",
            BufferKind::Color => "color",
        };
        f.write_str(name)
    }
}

/// Errors surfaced by the rasterizer context and its configuration loader.
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("unknown {kind} buffer handle {id}")]
    UnknownBuffer { kind: BufferKind, id: usize },

    #[error("vertex index {index} out of range for {kind} buffer of length {len}")]
    VertexOutOfRange {
        kind: BufferKind,
        index: usize,
        len: usize,
    },

    #[error("unsupported primitive: {0:?}")]
    UnsupportedPrimitive(Primitive),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to access config file {path}: {source}")]
    ConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, RasterError>;
