//! Face and vertex normal synthesis for meshes that arrive without normals.

use super::{Point3, Vector3, TOLERANCE};

/// Orientation that makes a face normal point outward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    /// Front faces list their corners counter-clockwise.
    CounterClockwise,
    /// Front faces list their corners clockwise.
    Clockwise,
}

/// Unit normal of the triangle `a, b, c`, or zero for a degenerate triangle.
#[must_use]
pub fn face_normal(a: &Point3, b: &Point3, c: &Point3, winding: Winding) -> Vector3 {
    let n = (b - a).cross(&(c - a));
    let n = match winding {
        Winding::CounterClockwise => n,
        Winding::Clockwise => -n,
    };
    n.try_normalize(TOLERANCE).unwrap_or_else(Vector3::zeros)
}

/// Accumulates unit face normals onto the vertices they touch.
///
/// Every face contributes equally to each of its corners regardless of its
/// area; [`NormalAccumulator::finish`] normalises the sums.
#[derive(Debug, Clone)]
pub struct NormalAccumulator {
    winding: Winding,
    sums: Vec<Vector3>,
}

impl NormalAccumulator {
    /// Creates an accumulator for `vertex_count` vertices.
    #[must_use]
    pub fn new(vertex_count: usize, winding: Winding) -> Self {
        Self {
            winding,
            sums: vec![Vector3::zeros(); vertex_count],
        }
    }

    /// Adds the normal of triangle `[a, b, c]`, given as indices into `positions`.
    ///
    /// # Panics
    ///
    /// Panics if an index is outside `positions` or the accumulator.
    pub fn add_triangle(&mut self, positions: &[Point3], [a, b, c]: [usize; 3]) {
        let n = face_normal(&positions[a], &positions[b], &positions[c], self.winding);
        self.sums[a] += n;
        self.sums[b] += n;
        self.sums[c] += n;
    }

    /// Returns one unit normal per vertex; vertices touched by no face (or by
    /// faces whose normals cancel out) get a zero normal.
    #[must_use]
    pub fn finish(self) -> Vec<Vector3> {
        self.sums
            .into_iter()
            .map(|n| n.try_normalize(TOLERANCE).unwrap_or_else(Vector3::zeros))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn p(x: f32, y: f32, z: f32) -> Point3 {
        Point3::new(x, y, z)
    }

    fn unit_square() -> Vec<Point3> {
        vec![
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(1.0, 1.0, 0.0),
            p(0.0, 1.0, 0.0),
        ]
    }

    // ── face_normal ──

    #[test]
    fn ccw_triangle_points_up() {
        let n = face_normal(
            &p(0.0, 0.0, 0.0),
            &p(2.0, 0.0, 0.0),
            &p(0.0, 2.0, 0.0),
            Winding::CounterClockwise,
        );
        assert_relative_eq!(n, Vector3::z(), epsilon = 1e-6);
    }

    #[test]
    fn cw_winding_flips_normal() {
        let n = face_normal(
            &p(0.0, 0.0, 0.0),
            &p(1.0, 0.0, 0.0),
            &p(0.0, 1.0, 0.0),
            Winding::Clockwise,
        );
        assert_relative_eq!(n, -Vector3::z(), epsilon = 1e-6);
    }

    #[test]
    fn degenerate_triangle_has_zero_normal() {
        let a = p(1.0, 1.0, 1.0);
        let n = face_normal(&a, &a, &p(2.0, 2.0, 2.0), Winding::CounterClockwise);
        assert_eq!(n, Vector3::zeros());
    }

    // ── NormalAccumulator ──

    #[test]
    fn flat_square_normals_are_unit_z() {
        let positions = unit_square();
        let mut acc = NormalAccumulator::new(positions.len(), Winding::CounterClockwise);
        acc.add_triangle(&positions, [0, 1, 2]);
        acc.add_triangle(&positions, [0, 2, 3]);
        for n in acc.finish() {
            assert_relative_eq!(n, Vector3::z(), epsilon = 1e-6);
        }
    }

    #[test]
    fn corner_of_box_averages_faces() {
        // Three mutually perpendicular faces meeting at the origin.
        let positions = vec![
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(0.0, 1.0, 0.0),
            p(0.0, 0.0, 1.0),
        ];
        let mut acc = NormalAccumulator::new(positions.len(), Winding::CounterClockwise);
        acc.add_triangle(&positions, [0, 2, 1]); // -z
        acc.add_triangle(&positions, [0, 1, 3]); // -y
        acc.add_triangle(&positions, [0, 3, 2]); // -x
        let normals = acc.finish();
        let expected = -Vector3::new(1.0, 1.0, 1.0).normalize();
        assert_relative_eq!(normals[0], expected, epsilon = 1e-6);
    }

    #[test]
    fn isolated_vertex_keeps_zero_normal() {
        let mut positions = unit_square();
        positions.push(p(5.0, 5.0, 5.0));
        let mut acc = NormalAccumulator::new(positions.len(), Winding::CounterClockwise);
        acc.add_triangle(&positions, [0, 1, 2]);
        assert_eq!(acc.finish()[4], Vector3::zeros());
    }
}
