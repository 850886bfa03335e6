use nalgebra::{Matrix4, Point3, Vector4};

/// Fixed mapping from normalized device coordinates to the target buffer.
///
/// x and y go from [-1, 1] to [0, width] and [0, height] (y up, no flip here;
/// the frame buffer flips rows on write). z is remapped with
/// `z * (far - near) / 2 + (far + near) / 2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: usize,
    pub height: usize,
    pub near: f32,
    pub far: f32,
}

impl Viewport {
    pub fn new(width: usize, height: usize, near: f32, far: f32) -> Self {
        Self {
            width,
            height,
            near,
            far,
        }
    }

    /// Depth scale `f1 = (far - near) / 2`.
    pub fn depth_scale(&self) -> f32 {
        (self.far - self.near) / 2.0
    }

    /// Depth offset `f2 = (far + near) / 2`.
    pub fn depth_offset(&self) -> f32 {
        (self.far + self.near) / 2.0
    }

    /// Maps an NDC vertex to screen space. The `w` component (1 after the
    /// divide) is passed through.
    pub fn ndc_to_screen(&self, ndc: &Vector4<f32>) -> Vector4<f32> {
        Vector4::new(
            0.5 * self.width as f32 * (ndc.x + 1.0),
            0.5 * self.height as f32 * (ndc.y + 1.0),
            ndc.z * self.depth_scale() + self.depth_offset(),
            ndc.w,
        )
    }
}

/// Combined model-view-projection matrix, `projection * view * model`.
pub fn mvp_matrix(
    model: &Matrix4<f32>,
    view: &Matrix4<f32>,
    projection: &Matrix4<f32>,
) -> Matrix4<f32> {
    projection * view * model
}

/// Lifts an object-space point to clip space (w = 1 before the multiply).
pub fn object_to_clip(position: &Point3<f32>, mvp: &Matrix4<f32>) -> Vector4<f32> {
    mvp * position.to_homogeneous()
}

/// Perspective division of all four components, leaving w = 1. A clip w of 0
/// yields non-finite components.
pub fn clip_to_ndc(clip: &Vector4<f32>) -> Vector4<f32> {
    clip / clip.w
}

/// Full vertex pipeline: object space to screen space.
pub fn object_to_screen(
    position: &Point3<f32>,
    mvp: &Matrix4<f32>,
    viewport: &Viewport,
) -> Vector4<f32> {
    let clip = object_to_clip(position, mvp);
    viewport.ndc_to_screen(&clip_to_ndc(&clip))
}
