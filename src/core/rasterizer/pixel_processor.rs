use super::msaa::{MSAAPattern, generate_sample_points};
use super::triangle_data::{BoundingBox, Triangle};
use crate::core::frame_buffer::FrameBuffer;
use crate::geometry::interpolation::{barycentric_coordinates, inside_triangle, interpolate_depth};
use crate::io::render_settings::ResolveMode;
use nalgebra::Point2;

/// Rasterizes a single triangle into the MSAA sample buffers.
///
/// Every covered sub-sample whose interpolated depth is strictly nearer than
/// the stored one takes the triangle's flat color and depth. In
/// [`ResolveMode::Incremental`] a pixel with any such write is resolved on the
/// spot; in [`ResolveMode::Deferred`] pixels wait for an explicit resolve pass.
///
/// Returns the number of pixels with at least one sample written.
pub fn rasterize_triangle(
    triangle: &Triangle,
    frame_buffer: &mut FrameBuffer,
    resolve_mode: ResolveMode,
) -> usize {
    if !triangle.is_valid() {
        return 0;
    }

    let bbox = match BoundingBox::from_triangle(triangle, frame_buffer.width, frame_buffer.height) {
        Some(bbox) => bbox,
        None => return 0,
    };

    let pattern = MSAAPattern::GRID_2X2;
    let screen = triangle.screen_points();
    let mut touched = 0;

    bbox.for_each_pixel(|x, y| {
        if process_pixel_msaa(triangle, &screen, x, y, &pattern, frame_buffer) == 0 {
            return;
        }
        touched += 1;
        if resolve_mode == ResolveMode::Incremental {
            frame_buffer.resolve_pixel(x, y);
        }
    });

    touched
}

/// Runs coverage and depth tests for each sub-sample of one pixel. Returns the
/// number of samples written.
fn process_pixel_msaa(
    triangle: &Triangle,
    screen: &[Point2<f32>; 3],
    pixel_x: usize,
    pixel_y: usize,
    pattern: &MSAAPattern,
    frame_buffer: &mut FrameBuffer,
) -> usize {
    let pixel_index = frame_buffer.get_index(pixel_x, pixel_y);
    let mut written = 0;

    for (sub, sample_point) in generate_sample_points(pixel_x, pixel_y, pattern)
        .into_iter()
        .enumerate()
    {
        if !inside_triangle(sample_point, screen) {
            continue;
        }
        let Some(bary) = barycentric_coordinates(sample_point, screen) else {
            continue;
        };

        let depth = interpolate_depth(&bary, &triangle.v);
        // NaN and +inf both fail here
        if depth < frame_buffer.sample_depth(pixel_index, sub) {
            frame_buffer.write_sample(pixel_index, sub, triangle.flat_color(), depth);
            written += 1;
        }
    }

    written
}
