use nalgebra::{Point2, Vector3, Vector4};

/// Small value for float comparisons.
pub const EPSILON: f32 = 1e-5;

/// z-component of the 2D cross product `(b - a) x (p - a)`.
#[inline(always)]
pub fn edge_function(a: &Point2<f32>, b: &Point2<f32>, p: &Point2<f32>) -> f32 {
    let edge = b - a;
    let to_p = p - a;
    edge.x * to_p.y - edge.y * to_p.x
}

/// Checks whether `p` lies inside the 2D triangle `v`.
///
/// The first edge decides the winding (`>= 0` positive, `< 0` negative) and the
/// remaining two edges must agree with it. Points on an edge count as inside,
/// so both CW and CCW triangles accept their own boundary. Not watertight: a
/// sample on an edge shared by two triangles is covered by both.
pub fn inside_triangle(p: Point2<f32>, v: &[Point2<f32>; 3]) -> bool {
    let positive = edge_function(&v[0], &v[1], &p) >= 0.0;
    (1..3).all(|i| {
        let cross = edge_function(&v[i], &v[(i + 1) % 3], &p);
        (cross >= 0.0) == positive
    })
}

/// Integer sample-point variant of [`inside_triangle`].
pub fn inside_triangle_px(x: i32, y: i32, v: &[Point2<f32>; 3]) -> bool {
    inside_triangle(Point2::new(x as f32, y as f32), v)
}

/// Calculates barycentric coordinates (alpha, beta, gamma) for point p
/// with respect to the 2D triangle (v0, v1, v2) using signed area ratios.
/// Returns None if the triangle is degenerate.
pub fn barycentric_coordinates(p: Point2<f32>, v: &[Point2<f32>; 3]) -> Option<Vector3<f32>> {
    // Twice the signed area of the whole triangle
    let total_area_x2 = edge_function(&v[0], &v[1], &v[2]);
    if total_area_x2.abs() < EPSILON {
        return None;
    }

    // Each weight is the sub-triangle opposite its vertex over the total
    let alpha = edge_function(&v[1], &v[2], &p) / total_area_x2;
    let beta = edge_function(&v[2], &v[0], &p) / total_area_x2;
    let gamma = edge_function(&v[0], &v[1], &p) / total_area_x2;

    Some(Vector3::new(alpha, beta, gamma))
}

/// Depth of a screen-space point from its barycentric weights.
///
/// Vertices are already perspective-divided, and the remapped depth of a
/// planar triangle is affine in screen space, so the plain barycentric blend
/// of the vertex depths is exact. Returns `f32::INFINITY` when the result is
/// not finite, which never wins a depth test.
pub fn interpolate_depth(bary: &Vector3<f32>, v: &[Vector4<f32>; 3]) -> f32 {
    let depth = bary.x * v[0].z + bary.y * v[1].z + bary.z * v[2].z;
    if depth.is_finite() { depth } else { f32::INFINITY }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn ccw() -> [Point2<f32>; 3] {
        [
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(1.0, 2.0),
        ]
    }

    fn cw() -> [Point2<f32>; 3] {
        let [a, b, c] = ccw();
        [a, c, b]
    }

    #[test]
    fn test_inside_both_windings() {
        let interior = Point2::new(1.0, 0.5);
        assert!(inside_triangle(interior, &ccw()));
        assert!(inside_triangle(interior, &cw()));

        let exterior = Point2::new(0.0, 1.5);
        assert!(!inside_triangle(exterior, &ccw()));
        assert!(!inside_triangle(exterior, &cw()));
    }

    #[test]
    fn test_inside_is_boundary_inclusive() {
        // on the bottom edge, on a vertex, and on the right edge
        for p in [
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(1.5, 1.0),
        ] {
            assert!(inside_triangle(p, &ccw()), "{p:?} should be inside");
        }
    }

    #[test]
    fn test_inside_integer_samples() {
        assert!(inside_triangle_px(1, 1, &ccw()));
        assert!(!inside_triangle_px(0, 1, &ccw()));
        assert!(!inside_triangle_px(3, 0, &ccw()));
    }

    #[test]
    fn test_barycentric_at_vertices() {
        let v = ccw();
        let expected = [Vector3::x(), Vector3::y(), Vector3::z()];
        for (vertex, unit) in v.iter().zip(expected.iter()) {
            let bary = barycentric_coordinates(*vertex, &v).unwrap();
            assert_relative_eq!(bary, *unit, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_barycentric_sums_to_one_inside() {
        let v = [
            Point2::new(3.5, 1.25),
            Point2::new(40.0, 7.0),
            Point2::new(12.0, 33.0),
        ];
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut checked = 0;
        while checked < 200 {
            let u: f32 = rng.random_range(0.05..0.9);
            let t: f32 = rng.random_range(0.05..0.9);
            // keep the sample strictly interior
            if u + t > 0.9 {
                continue;
            }
            checked += 1;
            let p = v[0] + (v[1] - v[0]) * u + (v[2] - v[0]) * t;
            assert!(inside_triangle(p, &v));

            let bary = barycentric_coordinates(p, &v).unwrap();
            assert_relative_eq!(bary.sum(), 1.0, epsilon = 1e-4);
            assert_relative_eq!(bary.y, u, epsilon = 1e-3);
            assert_relative_eq!(bary.z, t, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_barycentric_degenerate_is_none() {
        let line = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(2.0, 2.0),
        ];
        assert!(barycentric_coordinates(Point2::new(1.0, 1.0), &line).is_none());
    }

    #[test]
    fn test_depth_with_unit_w_is_linear() {
        let v = [
            Vector4::new(0.0, 0.0, 1.0, 1.0),
            Vector4::new(2.0, 0.0, 3.0, 1.0),
            Vector4::new(1.0, 2.0, 5.0, 1.0),
        ];
        let bary = Vector3::new(0.5, 0.25, 0.25);
        assert_relative_eq!(interpolate_depth(&bary, &v), 2.5);
    }

    #[test]
    fn test_depth_on_an_edge_is_the_screen_space_blend() {
        let v = [
            Vector4::new(0.0, 0.0, 10.0, 1.0),
            Vector4::new(8.0, 0.0, 20.0, 1.0),
            Vector4::new(0.0, 8.0, 10.0, 1.0),
        ];
        let bary = barycentric_coordinates(Point2::new(4.0, 0.0), &screen_points(&v)).unwrap();
        assert_relative_eq!(interpolate_depth(&bary, &v), 15.0, epsilon = 1e-5);
    }

    #[test]
    fn test_non_finite_depth_is_infinite() {
        let v = [
            Vector4::new(0.0, 0.0, f32::NAN, 1.0),
            Vector4::new(2.0, 0.0, 1.0, 1.0),
            Vector4::new(1.0, 2.0, 1.0, 1.0),
        ];
        let bary = Vector3::new(0.2, 0.3, 0.5);
        assert_eq!(interpolate_depth(&bary, &v), f32::INFINITY);
    }

    fn screen_points(v: &[Vector4<f32>; 3]) -> [Point2<f32>; 3] {
        v.map(|v| Point2::new(v.x, v.y))
    }
}
