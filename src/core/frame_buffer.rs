use crate::color_utils::{BLACK, Color, color_to_u8};
use crate::core::rasterizer::msaa::{SAMPLES_PER_PIXEL, resolve_msaa_samples};
use bitflags::bitflags;
use nalgebra::Vector3;

bitflags! {
    /// Selects which buffers `clear` resets.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Buffers: u8 {
        const COLOR = 0b01;
        const DEPTH = 0b10;
    }
}

/// Frame buffer implementation, stores the rendering result.
///
/// Pixel `(x, y)` has row 0 at the bottom. Its linear offset is
/// `(height - 1 - y) * width + x`, so in memory the top row comes first.
/// Every pixel also owns `SAMPLES_PER_PIXEL` consecutive MSAA slots.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    color_buffer: Vec<Color>,
    /// Positive depth, smaller is closer.
    depth_buffer: Vec<f32>,
    msaa_color_buffer: Vec<Color>,
    msaa_depth_buffer: Vec<f32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        let num_pixels = width * height;
        let num_samples = num_pixels * SAMPLES_PER_PIXEL;

        FrameBuffer {
            width,
            height,
            color_buffer: vec![BLACK; num_pixels],
            depth_buffer: vec![f32::INFINITY; num_pixels],
            msaa_color_buffer: vec![BLACK; num_samples],
            msaa_depth_buffer: vec![f32::INFINITY; num_samples],
        }
    }

    /// Resets the selected buffers. The MSAA sample buffers are reset on
    /// every call, whatever `which` selects.
    pub fn clear(&mut self, which: Buffers) {
        if which.contains(Buffers::COLOR) {
            self.color_buffer.fill(BLACK);
        }
        if which.contains(Buffers::DEPTH) {
            self.depth_buffer.fill(f32::INFINITY);
        }
        self.msaa_color_buffer.fill(BLACK);
        self.msaa_depth_buffer.fill(f32::INFINITY);
    }

    /// Linear offset of pixel `(x, y)` with y flipped. The coordinate must be
    /// inside the buffer.
    #[inline]
    pub fn get_index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        (self.height - 1 - y) * self.width + x
    }

    /// Checked variant of [`FrameBuffer::get_index`].
    pub fn index_of(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| self.get_index(x, y))
    }

    /// Writes `color` at the integer-truncated `(point.x, point.y)`. Points
    /// outside the buffer are ignored.
    pub fn set_pixel(&mut self, point: &Vector3<f32>, color: Color) {
        if point.x < 0.0 || point.y < 0.0 {
            return;
        }
        if let Some(index) = self.index_of(point.x as usize, point.y as usize) {
            self.color_buffer[index] = color;
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        self.index_of(x, y).map(|i| self.color_buffer[i])
    }

    pub fn depth(&self, x: usize, y: usize) -> Option<f32> {
        self.index_of(x, y).map(|i| self.depth_buffer[i])
    }

    /// Color and depth stored in sub-sample `sub` of pixel `(x, y)`.
    pub fn sample(&self, x: usize, y: usize, sub: usize) -> Option<(Color, f32)> {
        if sub >= SAMPLES_PER_PIXEL {
            return None;
        }
        self.index_of(x, y).map(|i| {
            let s = i * SAMPLES_PER_PIXEL + sub;
            (self.msaa_color_buffer[s], self.msaa_depth_buffer[s])
        })
    }

    /// Stored depth of an MSAA slot, addressed by pixel offset and sub-sample.
    #[inline]
    pub(crate) fn sample_depth(&self, pixel_index: usize, sub: usize) -> f32 {
        self.msaa_depth_buffer[pixel_index * SAMPLES_PER_PIXEL + sub]
    }

    /// Overwrites one MSAA slot. Callers perform the depth test.
    #[inline]
    pub(crate) fn write_sample(&mut self, pixel_index: usize, sub: usize, color: Color, depth: f32) {
        let s = pixel_index * SAMPLES_PER_PIXEL + sub;
        self.msaa_depth_buffer[s] = depth;
        self.msaa_color_buffer[s] = color;
    }

    /// Resolves pixel `(x, y)` from its samples: the color becomes the average
    /// of all sub-sample colors and the depth becomes sub-sample 0's depth.
    pub fn resolve_pixel(&mut self, x: usize, y: usize) {
        let Some(index) = self.index_of(x, y) else {
            return;
        };
        let start = index * SAMPLES_PER_PIXEL;
        let color = resolve_msaa_samples(&self.msaa_color_buffer[start..start + SAMPLES_PER_PIXEL]);
        let depth = self.msaa_depth_buffer[start];

        self.color_buffer[index] = color;
        self.depth_buffer[index] = depth;
    }

    /// Resolves every pixel that has at least one covered sample. Returns the
    /// number of pixels written.
    pub fn resolve_all(&mut self) -> usize {
        let mut resolved = 0;
        for y in 0..self.height {
            for x in 0..self.width {
                let start = self.get_index(x, y) * SAMPLES_PER_PIXEL;
                let covered = self.msaa_depth_buffer[start..start + SAMPLES_PER_PIXEL]
                    .iter()
                    .any(|d| d.is_finite());
                if covered {
                    self.resolve_pixel(x, y);
                    resolved += 1;
                }
            }
        }
        resolved
    }

    /// Resolved colors, top row first.
    pub fn color_buffer(&self) -> &[Color] {
        &self.color_buffer
    }

    /// Resolved depths, top row first.
    pub fn depth_buffer(&self) -> &[f32] {
        &self.depth_buffer
    }

    /// Gets the color buffer as packed RGB8 bytes, top row first.
    pub fn get_color_buffer_bytes(&self) -> Vec<u8> {
        self.color_buffer.iter().flat_map(color_to_u8).collect()
    }

    /// Gets a copy of the depth buffer.
    pub fn get_depth_buffer_f32(&self) -> Vec<f32> {
        self.depth_buffer.clone()
    }
}
