use crate::color_utils::Color;
use crate::error::{BufferKind, RasterError, Result};
use nalgebra::Point3;

/// Handle to a loaded position buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PosBufId(pub(crate) usize);

/// Handle to a loaded index buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndBufId(pub(crate) usize);

/// Handle to a loaded color buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColBufId(pub(crate) usize);

impl PosBufId {
    pub fn id(&self) -> usize {
        self.0
    }
}

impl IndBufId {
    pub fn id(&self) -> usize {
        self.0
    }
}

impl ColBufId {
    pub fn id(&self) -> usize {
        self.0
    }
}

/// Arena storage for vertex data. Each buffer kind has its own growable
/// arena and a handle is the index of its entry, so handles are never reused.
/// Content is stored as given; indices are only checked when drawn.
#[derive(Debug, Default, Clone)]
pub struct GeometryBuffers {
    positions: Vec<Vec<Point3<f32>>>,
    indices: Vec<Vec<[usize; 3]>>,
    colors: Vec<Vec<Color>>,
}

impl GeometryBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_positions(&mut self, positions: Vec<Point3<f32>>) -> PosBufId {
        self.positions.push(positions);
        PosBufId(self.positions.len() - 1)
    }

    pub fn load_indices(&mut self, indices: Vec<[usize; 3]>) -> IndBufId {
        self.indices.push(indices);
        IndBufId(self.indices.len() - 1)
    }

    pub fn load_colors(&mut self, colors: Vec<Color>) -> ColBufId {
        self.colors.push(colors);
        ColBufId(self.colors.len() - 1)
    }

    pub fn positions(&self, id: PosBufId) -> Result<&[Point3<f32>]> {
        self.positions
            .get(id.0)
            .map(Vec::as_slice)
            .ok_or(RasterError::UnknownBuffer {
                kind: BufferKind::Position,
                id: id.0,
            })
    }

    pub fn indices(&self, id: IndBufId) -> Result<&[[usize; 3]]> {
        self.indices
            .get(id.0)
            .map(Vec::as_slice)
            .ok_or(RasterError::UnknownBuffer {
                kind: BufferKind::Index,
                id: id.0,
            })
    }

    pub fn colors(&self, id: ColBufId) -> Result<&[Color]> {
        self.colors
            .get(id.0)
            .map(Vec::as_slice)
            .ok_or(RasterError::UnknownBuffer {
                kind: BufferKind::Color,
                id: id.0,
            })
    }

    /// Total number of buffers loaded, across all kinds.
    pub fn len(&self) -> usize {
        self.positions.len() + self.indices.len() + self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
