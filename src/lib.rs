//! # msaa-rasterizer
//!
//! A small software rasterizer: triangle lists go through a model/view/projection
//! pipeline and are rasterized with per-sample depth testing and 4x MSAA into a
//! color buffer owned by a [`Rasterizer`] context.

pub mod color_utils;
pub mod core;
pub mod error;
pub mod geometry;
pub mod io;

pub use crate::color_utils::Color;
pub use crate::core::frame_buffer::{Buffers, FrameBuffer};
pub use crate::core::geometry_buffers::{ColBufId, IndBufId, PosBufId};
pub use crate::core::renderer::{DrawStats, Primitive, Rasterizer};
pub use crate::error::{BufferKind, RasterError, Result};
pub use crate::io::config_loader::TomlConfigLoader;
pub use crate::io::render_settings::{RasterizerConfig, ResolveMode};
