use nalgebra::Vector3;

/// Represents an RGB color with float components in [0.0, 255.0].
pub type Color = Vector3<f32>;

/// Pure black, the cleared value of every color buffer.
pub const BLACK: Color = Vector3::new(0.0, 0.0, 0.0);

/// Converts a float color to packed 8-bit channels, clamping to [0, 255].
pub fn color_to_u8(color: &Color) -> [u8; 3] {
    [
        channel_to_u8(color.x),
        channel_to_u8(color.y),
        channel_to_u8(color.z),
    ]
}

#[inline]
fn channel_to_u8(value: f32) -> u8 {
    // NaN clamps to 0 through the saturating cast
    value.round().clamp(0.0, 255.0) as u8
}

/// Averages a set of colors. An empty set averages to black.
pub fn average_colors(colors: &[Color]) -> Color {
    if colors.is_empty() {
        return BLACK;
    }
    let total: Color = colors.iter().sum();
    total / colors.len() as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_color_to_u8_clamps() {
        assert_eq!(color_to_u8(&Color::new(-3.0, 127.6, 300.0)), [0, 128, 255]);
    }

    #[test]
    fn test_average_colors() {
        let avg = average_colors(&[Color::new(255.0, 0.0, 0.0), BLACK]);
        assert_relative_eq!(avg, Color::new(127.5, 0.0, 0.0));
        assert_eq!(average_colors(&[]), BLACK);
    }
}
