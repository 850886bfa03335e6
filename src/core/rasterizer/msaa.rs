use crate::color_utils::{Color, average_colors};
use nalgebra::Point2;

/// Number of sub-samples stored per pixel.
pub const SAMPLES_PER_PIXEL: usize = 4;

/// MSAA sample offsets within a pixel, measured from the pixel's integer corner.
pub struct MSAAPattern {
    pub offsets: &'static [(f32, f32); SAMPLES_PER_PIXEL],
}

impl MSAAPattern {
    /// 2x2 ordered grid. Sub-sample `2 * i + j` sits at `(0.5 * i, 0.5 * j)`.
    pub const GRID_2X2: MSAAPattern = MSAAPattern {
        offsets: &[(0.0, 0.0), (0.0, 0.5), (0.5, 0.0), (0.5, 0.5)],
    };
}

impl Default for MSAAPattern {
    fn default() -> Self {
        Self::GRID_2X2
    }
}

/// Generates the sample positions of pixel `(pixel_x, pixel_y)`, indexed by
/// sub-sample.
pub fn generate_sample_points(
    pixel_x: usize,
    pixel_y: usize,
    pattern: &MSAAPattern,
) -> [Point2<f32>; SAMPLES_PER_PIXEL] {
    let origin_x = pixel_x as f32;
    let origin_y = pixel_y as f32;
    pattern
        .offsets
        .map(|(dx, dy)| Point2::new(origin_x + dx, origin_y + dy))
}

/// Box-filter resolve: plain average of every sample color, covered or not.
pub fn resolve_msaa_samples(samples: &[Color]) -> Color {
    average_colors(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_grid_sample_points() {
        let points = generate_sample_points(3, 7, &MSAAPattern::default());
        assert_eq!(points[0], Point2::new(3.0, 7.0));
        assert_eq!(points[1], Point2::new(3.0, 7.5));
        assert_eq!(points[2], Point2::new(3.5, 7.0));
        assert_eq!(points[3], Point2::new(3.5, 7.5));
    }

    #[test]
    fn test_resolve_half_covered() {
        let red = Color::new(255.0, 0.0, 0.0);
        let resolved = resolve_msaa_samples(&[red, Color::zeros(), red, Color::zeros()]);
        assert_relative_eq!(resolved, red * 0.5);
    }
}
