use crate::pool::{Cursor, Handle, Record, Slot};

use super::vertex::VertexHandle;

/// Triangle record layout: three vertex handles wound counter-clockwise,
/// followed by the handle of the face-normal record.
#[derive(Debug, Clone, Copy)]
pub struct Triangle;

impl Record for Triangle {
    type Field = u32;
    const WIDTH: usize = 4;
    const NAME: &'static str = "triangle";
}

/// Handle of a triangle record.
pub type TriangleHandle = Handle<Triangle>;

const NORMAL: usize = 3;

impl Slot<'_, Triangle> {
    /// Writes the corner and face-normal handles and returns the triangle's handle.
    pub fn init(
        self,
        v1: VertexHandle,
        v2: VertexHandle,
        v3: VertexHandle,
        normal: VertexHandle,
    ) -> TriangleHandle {
        self.write(&[v1.index(), v2.index(), v3.index(), normal.index()])
    }
}

impl Cursor<'_, Triangle> {
    /// Handle of corner `corner` (0, 1 or 2).
    ///
    /// # Panics
    ///
    /// Panics if `corner > 2`.
    #[must_use]
    pub fn vertex(&self, corner: usize) -> VertexHandle {
        assert!(corner < NORMAL, "triangle corner {corner} out of range");
        Handle::from_index(self.field(corner))
    }

    /// Handles of the three corners in winding order.
    #[must_use]
    pub fn vertices(&self) -> [VertexHandle; 3] {
        [self.vertex(0), self.vertex(1), self.vertex(2)]
    }

    /// Handle of the face-normal record in the vertex pool.
    #[must_use]
    pub fn normal(&self) -> VertexHandle {
        Handle::from_index(self.field(NORMAL))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Pool;

    #[test]
    fn corners_and_normal_are_kept_apart() {
        let mut pool = Pool::<Triangle>::new();
        let h = pool.create().init(
            Handle::from_index(4),
            Handle::from_index(2),
            Handle::from_index(9),
            Handle::from_index(11),
        );
        let mut cursor = pool.create_ref();
        let t = pool.get(h, &mut cursor);
        let corners: Vec<u32> = t.vertices().iter().map(|v| v.index()).collect();
        assert_eq!(corners, vec![4, 2, 9]);
        assert_eq!(t.normal().index(), 11);
    }

    #[test]
    #[should_panic(expected = "corner 3 out of range")]
    fn fourth_corner_panics() {
        let mut pool = Pool::<Triangle>::new();
        let h = pool.create().handle();
        let mut cursor = pool.create_ref();
        let _ = pool.get(h, &mut cursor).vertex(3);
    }
}
