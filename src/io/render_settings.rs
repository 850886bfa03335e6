use crate::error::{RasterError, Result};
use std::fmt;
use std::str::FromStr;

/// When MSAA samples are averaged into the frame buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResolveMode {
    /// Re-average a pixel as soon as any of its samples changes. The output
    /// depends on draw order when triangles partially overlap.
    #[default]
    Incremental,
    /// Only write samples while drawing; pixels are averaged by an explicit
    /// resolve pass after the last draw.
    Deferred,
}

impl fmt::Display for ResolveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveMode::Incremental => f.write_str("incremental"),
            ResolveMode::Deferred => f.write_str("deferred"),
        }
    }
}

impl FromStr for ResolveMode {
    type Err = RasterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "incremental" => Ok(ResolveMode::Incremental),
            "deferred" => Ok(ResolveMode::Deferred),
            _ => Err(RasterError::InvalidConfig(format!(
                "unknown resolve mode '{}', expected 'incremental' or 'deferred'",
                s
            ))),
        }
    }
}

/// Parameters of a rasterizer context. Everything here is fixed for the
/// lifetime of the context; buffers are sized from `width` and `height`.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterizerConfig {
    // ===== Target =====
    /// Frame buffer width in pixels
    pub width: usize,
    /// Frame buffer height in pixels
    pub height: usize,

    // ===== Depth remap =====
    /// Near plane of the viewport depth remap
    pub near: f32,
    /// Far plane of the viewport depth remap
    pub far: f32,

    // ===== MSAA =====
    pub resolve: ResolveMode,
}

impl Default for RasterizerConfig {
    fn default() -> Self {
        Self {
            width: 700,
            height: 700,
            near: 0.1,
            far: 50.0,
            resolve: ResolveMode::Incremental,
        }
    }
}

impl RasterizerConfig {
    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_depth_range(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    pub fn with_resolve(mut self, resolve: ResolveMode) -> Self {
        self.resolve = resolve;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RasterError::InvalidConfig(format!(
                "width and height must be greater than 0, got {}x{}",
                self.width, self.height
            )));
        }

        if !self.near.is_finite() || !self.far.is_finite() {
            return Err(RasterError::InvalidConfig(format!(
                "near and far must be finite, got near={} far={}",
                self.near, self.far
            )));
        }

        if self.near == self.far {
            return Err(RasterError::InvalidConfig(format!(
                "near and far must differ, both are {}",
                self.near
            )));
        }

        Ok(())
    }
}
