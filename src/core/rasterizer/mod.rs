//! # Triangle rasterization
//!
//! Coverage, per-sample depth testing and 4x MSAA resolve for screen-space triangles.

pub mod msaa;
pub mod pixel_processor;
pub mod triangle_data;

pub use msaa::{MSAAPattern, SAMPLES_PER_PIXEL};
pub use pixel_processor::rasterize_triangle;
pub use triangle_data::{BoundingBox, Triangle};
