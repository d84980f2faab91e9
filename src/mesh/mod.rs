pub mod triangle;
pub mod vertex;

pub use triangle::{Triangle, TriangleHandle};
pub use vertex::{Vertex, VertexHandle};

use rustc_hash::FxHashSet;

use crate::error::{Result, TopologyError};
use crate::math::{Point3, Vector3};
use crate::pool::{Handle, Pool, Record};

/// A triangle mesh: one vertex pool, one triangle pool, and the canonical
/// order in which their records are iterated and encoded.
///
/// Filling the pools and declaring the order are separate steps. A decoder
/// appends records as it reads them and installs the order once both lists
/// are complete, so [`Mesh::vertices`] and [`Mesh::triangles`] stay empty
/// until [`Mesh::set_vertices`] and [`Mesh::set_triangles`] are called.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    vertex_pool: Pool<Vertex>,
    triangle_pool: Pool<Triangle>,
    vertices: Vec<VertexHandle>,
    triangles: Vec<TriangleHandle>,
}

impl Mesh {
    /// Creates an empty mesh sized for the expected vertex and triangle counts.
    ///
    /// The vertex pool also reserves one face-normal record per triangle.
    #[must_use]
    pub fn new(vertex_capacity: usize, triangle_capacity: usize) -> Self {
        Self {
            vertex_pool: Pool::with_capacity(vertex_capacity.saturating_add(triangle_capacity)),
            triangle_pool: Pool::with_capacity(triangle_capacity),
            vertices: Vec::with_capacity(vertex_capacity),
            triangles: Vec::with_capacity(triangle_capacity),
        }
    }

    #[must_use]
    pub fn vertex_pool(&self) -> &Pool<Vertex> {
        &self.vertex_pool
    }

    #[must_use]
    pub fn triangle_pool(&self) -> &Pool<Triangle> {
        &self.triangle_pool
    }

    /// Both pools, mutably, for callers that create triangles together with
    /// their face-normal records.
    pub fn pools_mut(&mut self) -> (&mut Pool<Vertex>, &mut Pool<Triangle>) {
        (&mut self.vertex_pool, &mut self.triangle_pool)
    }

    /// Vertices in canonical order.
    #[must_use]
    pub fn vertices(&self) -> &[VertexHandle] {
        &self.vertices
    }

    /// Triangles in canonical order.
    #[must_use]
    pub fn triangles(&self) -> &[TriangleHandle] {
        &self.triangles
    }

    /// Installs the canonical vertex order, replacing any previous one.
    pub fn set_vertices(&mut self, vertices: Vec<VertexHandle>) {
        self.vertices = vertices;
    }

    /// Installs the canonical triangle order, replacing any previous one.
    pub fn set_triangles(&mut self, triangles: Vec<TriangleHandle>) {
        self.triangles = triangles;
    }

    /// Reserves room for `vertices` more vertex records and `triangles` more
    /// triangles along with their face-normal records.
    pub fn reserve(&mut self, vertices: usize, triangles: usize) {
        self.vertex_pool.reserve(vertices.saturating_add(triangles));
        self.triangle_pool.reserve(triangles);
    }

    /// Appends a vertex record. The canonical order is left untouched.
    pub fn add_vertex(
        &mut self,
        position: Point3,
        normal: Vector3,
        texture: Vector3,
    ) -> VertexHandle {
        self.vertex_pool.create().init(position, normal, texture)
    }

    /// Appends a triangle record with a zeroed face-normal record. The
    /// canonical order is left untouched.
    ///
    /// # Panics
    ///
    /// Panics if a corner handle is not in the vertex pool.
    pub fn add_triangle(
        &mut self,
        v1: VertexHandle,
        v2: VertexHandle,
        v3: VertexHandle,
    ) -> TriangleHandle {
        for v in [v1, v2, v3] {
            assert!(
                self.vertex_pool.contains(v),
                "triangle corner {v:?} is not in the vertex pool"
            );
        }
        let normal = self
            .vertex_pool
            .create()
            .init(Point3::origin(), Vector3::zeros(), Vector3::zeros());
        self.triangle_pool.create().init(v1, v2, v3, normal)
    }

    /// Corner positions of a triangle, in winding order.
    ///
    /// # Panics
    ///
    /// Panics if `triangle` or one of its corners is outside its pool.
    #[must_use]
    pub fn triangle_positions(&self, triangle: TriangleHandle) -> [Point3; 3] {
        let mut t = self.triangle_pool.create_ref();
        let mut v = self.vertex_pool.create_ref();
        let corners = self.triangle_pool.get(triangle, &mut t).vertices();
        corners.map(|corner| self.vertex_pool.get(corner, &mut v).position())
    }

    /// Checks the canonical order against the pools.
    ///
    /// Every listed handle must be inside its pool and listed once, and every
    /// listed triangle must reference only listed vertices.
    ///
    /// # Errors
    ///
    /// Returns the first [`TopologyError`] found.
    pub fn validate(&self) -> Result<()> {
        let listed = unique_in_pool(&self.vertices, &self.vertex_pool)?;
        unique_in_pool(&self.triangles, &self.triangle_pool)?;

        let mut cursor = self.triangle_pool.create_ref();
        for &triangle in &self.triangles {
            for vertex in self.triangle_pool.get(triangle, &mut cursor).vertices() {
                if !listed.contains(&vertex) {
                    return Err(TopologyError::UnlistedVertex {
                        triangle: triangle.index(),
                        vertex: vertex.index(),
                    }
                    .into());
                }
            }
        }
        Ok(())
    }
}

fn unique_in_pool<R: Record>(
    order: &[Handle<R>],
    pool: &Pool<R>,
) -> Result<FxHashSet<Handle<R>>> {
    let mut seen = FxHashSet::default();
    seen.reserve(order.len());
    for &handle in order {
        if !pool.contains(handle) {
            return Err(TopologyError::HandleOutOfRange {
                kind: R::NAME,
                handle: handle.index(),
                len: pool.len(),
            }
            .into());
        }
        if !seen.insert(handle) {
            return Err(TopologyError::DuplicateHandle {
                kind: R::NAME,
                handle: handle.index(),
            }
            .into());
        }
    }
    Ok(seen)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::MeshError;

    fn p(x: f32, y: f32, z: f32) -> Point3 {
        Point3::new(x, y, z)
    }

    fn vertex(mesh: &mut Mesh, position: Point3) -> VertexHandle {
        mesh.add_vertex(position, Vector3::zeros(), Vector3::zeros())
    }

    fn single_triangle() -> (Mesh, [VertexHandle; 3], TriangleHandle) {
        let mut mesh = Mesh::new(3, 1);
        let a = vertex(&mut mesh, p(0.0, 0.0, 0.0));
        let b = vertex(&mut mesh, p(1.0, 0.0, 0.0));
        let c = vertex(&mut mesh, p(0.0, 1.0, 0.0));
        let t = mesh.add_triangle(a, b, c);
        (mesh, [a, b, c], t)
    }

    // ── canonical order ──

    #[test]
    fn order_is_empty_until_set() {
        let (mesh, _, _) = single_triangle();
        assert_eq!(mesh.vertex_pool().len(), 4);
        assert_eq!(mesh.triangle_pool().len(), 1);
        assert!(mesh.vertices().is_empty());
        assert!(mesh.triangles().is_empty());
    }

    #[test]
    fn set_replaces_previous_order() {
        let (mut mesh, [a, b, c], _) = single_triangle();
        mesh.set_vertices(vec![a, b, c]);
        mesh.set_vertices(vec![c, a]);
        assert_eq!(mesh.vertices(), &[c, a]);
    }

    // ── triangles ──

    #[test]
    fn add_triangle_creates_zeroed_face_normal() {
        let (mesh, corners, t) = single_triangle();
        let mut cursor = mesh.triangle_pool().create_ref();
        let triangle = mesh.triangle_pool().get(t, &mut cursor);
        assert_eq!(triangle.vertices(), corners);

        let normal = triangle.normal();
        assert!(!corners.contains(&normal));
        let mut v = mesh.vertex_pool().create_ref();
        let fields = mesh.vertex_pool().get(normal, &mut v).fields();
        assert!(fields.iter().all(|&f| f == 0.0));
    }

    #[test]
    fn triangle_positions_follow_winding() {
        let (mesh, _, t) = single_triangle();
        assert_eq!(
            mesh.triangle_positions(t),
            [p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0)]
        );
    }

    #[test]
    #[should_panic(expected = "not in the vertex pool")]
    fn triangle_with_foreign_corner_panics() {
        let (mut mesh, [a, b, _], _) = single_triangle();
        mesh.add_triangle(a, b, Handle::from_index(99));
    }

    // ── validate ──

    #[test]
    fn consistent_mesh_validates() {
        let (mut mesh, corners, t) = single_triangle();
        mesh.set_vertices(corners.to_vec());
        mesh.set_triangles(vec![t]);
        mesh.validate().unwrap();
    }

    #[test]
    fn unlisted_corner_is_reported() {
        let (mut mesh, [a, b, _], t) = single_triangle();
        mesh.set_vertices(vec![a, b]);
        mesh.set_triangles(vec![t]);
        assert!(matches!(
            mesh.validate(),
            Err(MeshError::Topology(TopologyError::UnlistedVertex {
                vertex: 2,
                ..
            }))
        ));
    }

    #[test]
    fn duplicate_vertex_is_reported() {
        let (mut mesh, [a, b, c], _) = single_triangle();
        mesh.set_vertices(vec![a, b, c, a]);
        assert!(matches!(
            mesh.validate(),
            Err(MeshError::Topology(TopologyError::DuplicateHandle {
                kind: "vertex",
                handle: 0
            }))
        ));
    }

    #[test]
    fn out_of_range_triangle_is_reported() {
        let (mut mesh, _, _) = single_triangle();
        mesh.set_triangles(vec![Handle::from_index(3)]);
        assert!(matches!(
            mesh.validate(),
            Err(MeshError::Topology(TopologyError::HandleOutOfRange {
                kind: "triangle",
                ..
            }))
        ));
    }
}
