use crate::color_utils::Color;
use crate::geometry::interpolation::{EPSILON, edge_function};
use nalgebra::{Point2, Vector4};

/// Screen-space triangle handed to the rasterizer.
///
/// Each vertex is `(x, y, z, w)`: pixel coordinates, remapped depth and
/// w = 1 left by the perspective divide.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    pub v: [Vector4<f32>; 3],
    pub color: [Color; 3],
}

impl Triangle {
    pub fn new(v: [Vector4<f32>; 3], color: [Color; 3]) -> Self {
        Self { v, color }
    }

    /// Flat color written into every covered sample: the provoking vertex's.
    pub fn flat_color(&self) -> Color {
        self.color[0]
    }

    /// 2D projections of the vertices, z and w dropped.
    pub fn screen_points(&self) -> [Point2<f32>; 3] {
        self.v.map(|v| Point2::new(v.x, v.y))
    }

    /// Twice the signed screen-space area.
    pub fn area_x2(&self) -> f32 {
        let [a, b, c] = self.screen_points();
        edge_function(&a, &b, &c)
    }

    /// Degenerate triangles and triangles with non-finite vertices (e.g. clip
    /// w = 0 before the perspective divide) cover nothing and are skipped.
    pub fn is_valid(&self) -> bool {
        self.v.iter().all(|v| v.iter().all(|c| c.is_finite())) && self.area_x2().abs() >= EPSILON
    }
}

/// Screen-space bounding box, clipped to the target. Max bounds are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: usize,
    pub min_y: usize,
    pub max_x: usize,
    pub max_y: usize,
}

impl BoundingBox {
    /// Pixels from `floor(min)` through `floor(max)` inclusive. Returns None
    /// when the box misses the target entirely.
    pub fn from_triangle(triangle: &Triangle, width: usize, height: usize) -> Option<Self> {
        let [v0, v1, v2] = triangle.screen_points();

        let min_x = v0.x.min(v1.x).min(v2.x).floor().max(0.0);
        let min_y = v0.y.min(v1.y).min(v2.y).floor().max(0.0);
        let max_x = (v0.x.max(v1.x).max(v2.x).floor() + 1.0).min(width as f32);
        let max_y = (v0.y.max(v1.y).max(v2.y).floor() + 1.0).min(height as f32);

        if max_x <= min_x || max_y <= min_y {
            None
        } else {
            Some(Self {
                min_x: min_x as usize,
                min_y: min_y as usize,
                max_x: max_x as usize,
                max_y: max_y as usize,
            })
        }
    }

    pub fn for_each_pixel<F>(&self, mut callback: F)
    where
        F: FnMut(usize, usize),
    {
        for y in self.min_y..self.max_y {
            for x in self.min_x..self.max_x {
                callback(x, y);
            }
        }
    }
}
