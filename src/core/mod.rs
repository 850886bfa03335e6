pub mod frame_buffer;
pub mod geometry_buffers;
pub mod rasterizer;
pub mod renderer;
