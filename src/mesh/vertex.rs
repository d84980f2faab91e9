use crate::math::{Point3, Vector3};
use crate::pool::{Cursor, Handle, Record, Slot};

/// Vertex record layout: position, normal and a texture/color triple, nine
/// `f32` fields in that order.
///
/// Face-normal records reuse this layout with only the normal fields set.
#[derive(Debug, Clone, Copy)]
pub struct Vertex;

impl Record for Vertex {
    type Field = f32;
    const WIDTH: usize = 9;
    const NAME: &'static str = "vertex";
}

/// Handle of a vertex record.
pub type VertexHandle = Handle<Vertex>;

const X: usize = 0;
const NX: usize = 3;
const U: usize = 6;

impl Slot<'_, Vertex> {
    /// Writes every field of the vertex and returns its handle.
    pub fn init(self, position: Point3, normal: Vector3, texture: Vector3) -> VertexHandle {
        self.write(&[
            position.x, position.y, position.z, normal.x, normal.y, normal.z, texture.x,
            texture.y, texture.z,
        ])
    }
}

impl Cursor<'_, Vertex> {
    #[must_use]
    pub fn x(&self) -> f32 {
        self.field(X)
    }

    #[must_use]
    pub fn y(&self) -> f32 {
        self.field(X + 1)
    }

    #[must_use]
    pub fn z(&self) -> f32 {
        self.field(X + 2)
    }

    #[must_use]
    pub fn nx(&self) -> f32 {
        self.field(NX)
    }

    #[must_use]
    pub fn ny(&self) -> f32 {
        self.field(NX + 1)
    }

    #[must_use]
    pub fn nz(&self) -> f32 {
        self.field(NX + 2)
    }

    #[must_use]
    pub fn u(&self) -> f32 {
        self.field(U)
    }

    #[must_use]
    pub fn v(&self) -> f32 {
        self.field(U + 1)
    }

    #[must_use]
    pub fn w(&self) -> f32 {
        self.field(U + 2)
    }

    /// Position of the current vertex.
    #[must_use]
    pub fn position(&self) -> Point3 {
        Point3::new(self.x(), self.y(), self.z())
    }

    /// Normal of the current vertex (or the face normal of a face-normal record).
    #[must_use]
    pub fn normal(&self) -> Vector3 {
        Vector3::new(self.nx(), self.ny(), self.nz())
    }

    /// Texture/color triple of the current vertex.
    #[must_use]
    pub fn texture(&self) -> Vector3 {
        Vector3::new(self.u(), self.v(), self.w())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Pool;

    #[test]
    fn fields_are_laid_out_in_order() {
        let mut pool = Pool::<Vertex>::new();
        let h = pool.create().init(
            Point3::new(1.0, 2.0, 3.0),
            Vector3::new(4.0, 5.0, 6.0),
            Vector3::new(7.0, 8.0, 9.0),
        );
        let mut cursor = pool.create_ref();
        let v = pool.get(h, &mut cursor);
        assert_eq!(v.fields(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        assert_eq!(v.position(), Point3::new(1.0, 2.0, 3.0));
        assert_eq!(v.normal(), Vector3::new(4.0, 5.0, 6.0));
        assert_eq!(v.texture(), Vector3::new(7.0, 8.0, 9.0));
        assert_eq!(format!("{h:?}"), "vertex#0");
    }
}
