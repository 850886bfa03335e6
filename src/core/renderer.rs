use crate::color_utils::Color;
use crate::core::frame_buffer::{Buffers, FrameBuffer};
use crate::core::geometry_buffers::{ColBufId, GeometryBuffers, IndBufId, PosBufId};
use crate::core::rasterizer::{Triangle, rasterize_triangle};
use crate::error::{BufferKind, RasterError, Result};
use crate::geometry::transform::{Viewport, mvp_matrix, object_to_screen};
use crate::io::render_settings::RasterizerConfig;
use log::{debug, warn};
use nalgebra::{Matrix4, Point3, Vector4};

/// Primitive topology of a draw call. Only triangle lists are rasterized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Line,
    Triangle,
}

/// Counters reported by a draw call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    /// Triangles in the index buffer.
    pub triangles: usize,
    /// Degenerate or non-finite triangles that covered nothing.
    pub skipped: usize,
    /// Pixels with at least one sample written, summed over triangles.
    pub pixels_touched: usize,
}

/// Rasterizer context. Owns the geometry arenas, the transform state and the
/// frame/depth/sample buffers; every operation goes through `&mut self`.
#[derive(Debug, Clone)]
pub struct Rasterizer {
    config: RasterizerConfig,
    buffers: GeometryBuffers,
    model: Matrix4<f32>,
    view: Matrix4<f32>,
    projection: Matrix4<f32>,
    frame_buffer: FrameBuffer,
}

impl Rasterizer {
    /// Creates a context of the given size with default depth range and
    /// incremental resolve.
    pub fn new(width: usize, height: usize) -> Self {
        let config = RasterizerConfig {
            width,
            height,
            ..Default::default()
        };
        Self::from_valid_config(config)
    }

    pub fn with_config(config: RasterizerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: RasterizerConfig) -> Self {
        Self {
            frame_buffer: FrameBuffer::new(config.width, config.height),
            buffers: GeometryBuffers::new(),
            model: Matrix4::identity(),
            view: Matrix4::identity(),
            projection: Matrix4::identity(),
            config,
        }
    }

    // ===== Geometry buffers =====

    pub fn load_positions(&mut self, positions: Vec<Point3<f32>>) -> PosBufId {
        self.buffers.load_positions(positions)
    }

    pub fn load_indices(&mut self, indices: Vec<[usize; 3]>) -> IndBufId {
        self.buffers.load_indices(indices)
    }

    pub fn load_colors(&mut self, colors: Vec<Color>) -> ColBufId {
        self.buffers.load_colors(colors)
    }

    pub fn geometry(&self) -> &GeometryBuffers {
        &self.buffers
    }

    // ===== Transform state =====

    pub fn set_model(&mut self, model: Matrix4<f32>) {
        self.model = model;
    }

    pub fn set_view(&mut self, view: Matrix4<f32>) {
        self.view = view;
    }

    pub fn set_projection(&mut self, projection: Matrix4<f32>) {
        self.projection = projection;
    }

    pub fn model(&self) -> &Matrix4<f32> {
        &self.model
    }

    pub fn view(&self) -> &Matrix4<f32> {
        &self.view
    }

    pub fn projection(&self) -> &Matrix4<f32> {
        &self.projection
    }

    pub fn mvp(&self) -> Matrix4<f32> {
        mvp_matrix(&self.model, &self.view, &self.projection)
    }

    // ===== Frame state =====

    pub fn clear(&mut self, which: Buffers) {
        self.frame_buffer.clear(which);
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.frame_buffer
    }

    pub fn config(&self) -> &RasterizerConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(
            self.config.width,
            self.config.height,
            self.config.near,
            self.config.far,
        )
    }

    /// Resolves every covered pixel from its samples. Required after drawing
    /// in deferred mode; harmless in incremental mode.
    pub fn resolve(&mut self) -> usize {
        let resolved = self.frame_buffer.resolve_all();
        debug!("Resolved {} pixels from MSAA samples", resolved);
        resolved
    }

    /// Draws one batch of primitives.
    ///
    /// All lookups are validated before the first triangle is rasterized, so a
    /// failed draw leaves the frame untouched.
    pub fn draw(
        &mut self,
        pos_buffer: PosBufId,
        ind_buffer: IndBufId,
        col_buffer: ColBufId,
        primitive: Primitive,
    ) -> Result<DrawStats> {
        if primitive != Primitive::Triangle {
            warn!("Rejected draw call with unsupported primitive {:?}", primitive);
            return Err(RasterError::UnsupportedPrimitive(primitive));
        }

        let triangles = self
            .prepare_triangles(pos_buffer, ind_buffer, col_buffer)
            .inspect_err(|e| warn!("Rejected draw call: {}", e))?;

        let mut stats = DrawStats {
            triangles: triangles.len(),
            ..Default::default()
        };
        let resolve_mode = self.config.resolve;

        for triangle in &triangles {
            if !triangle.is_valid() {
                stats.skipped += 1;
                continue;
            }
            stats.pixels_touched += rasterize_triangle(triangle, &mut self.frame_buffer, resolve_mode);
        }

        debug!(
            "Drew {} triangles ({} skipped), {} pixels touched, resolve {:?}",
            stats.triangles, stats.skipped, stats.pixels_touched, resolve_mode
        );
        Ok(stats)
    }

    /// Transforms the position buffer to screen space and assembles one
    /// triangle per index triple.
    fn prepare_triangles(
        &self,
        pos_buffer: PosBufId,
        ind_buffer: IndBufId,
        col_buffer: ColBufId,
    ) -> Result<Vec<Triangle>> {
        let positions = self.buffers.positions(pos_buffer)?;
        let indices = self.buffers.indices(ind_buffer)?;
        let colors = self.buffers.colors(col_buffer)?;

        for &index in indices.iter().flatten() {
            check_vertex(BufferKind::Position, index, positions.len())?;
            check_vertex(BufferKind::Color, index, colors.len())?;
        }

        let mvp = self.mvp();
        let viewport = self.viewport();
        let screen: Vec<Vector4<f32>> = positions
            .iter()
            .map(|p| object_to_screen(p, &mvp, &viewport))
            .collect();

        Ok(indices
            .iter()
            .map(|tri| Triangle::new(tri.map(|i| screen[i]), tri.map(|i| colors[i])))
            .collect())
    }
}

fn check_vertex(kind: BufferKind, index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(RasterError::VertexOutOfRange { kind, index, len })
    }
}
