//! Binary and ASCII PLY encoders.
//!
//! Both encodings share one walk over the mesh: render the header, assign
//! each vertex in canonical order a compact output index, emit the vertex
//! records, then emit the faces with their corners translated to compact
//! indices. Face-normal records are never written.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::{Result, TopologyError};
use crate::mesh::{Mesh, VertexHandle};

use super::float_text::push_float;
use super::header::{self, FACE_RECORD_BYTES, VERTEX_RECORD_BYTES};
use super::PlyEncoding;

/// Encodes a [`Mesh`] as PLY bytes.
pub struct EncodePly {
    encoding: PlyEncoding,
}

impl EncodePly {
    /// Creates a new `EncodePly` operation.
    #[must_use]
    pub fn new(encoding: PlyEncoding) -> Self {
        Self { encoding }
    }

    /// Executes the encode, returning the complete file.
    ///
    /// # Errors
    ///
    /// Returns a topology error if a listed triangle references a vertex that
    /// is not in the canonical vertex order, or if the mesh has more vertices
    /// than PLY's 32-bit indices can address.
    pub fn execute(&self, mesh: &Mesh) -> Result<Vec<u8>> {
        let vertex_count = mesh.vertices().len();
        let face_count = mesh.triangles().len();
        let header = header::render(self.encoding, vertex_count, face_count);

        let bytes = if vertex_count == 0 {
            header.into_bytes()
        } else {
            match self.encoding {
                PlyEncoding::BinaryLittleEndian => {
                    let mut payload = BinaryPayload::new(header, vertex_count, face_count);
                    write_records(mesh, &mut payload)?;
                    payload.finish()
                }
                PlyEncoding::Ascii => {
                    let mut payload = AsciiPayload::new(header);
                    write_records(mesh, &mut payload)?;
                    payload.finish()
                }
            }
        };

        debug!(
            encoding = ?self.encoding,
            vertices = vertex_count,
            faces = face_count,
            bytes = bytes.len(),
            "encoded PLY"
        );
        Ok(bytes)
    }
}

/// Exact length of a binary PLY file for the given counts.
#[must_use]
pub fn binary_size(vertex_count: usize, face_count: usize) -> usize {
    let header = header::render(PlyEncoding::BinaryLittleEndian, vertex_count, face_count).len();
    if vertex_count == 0 {
        header
    } else {
        header + vertex_count * VERTEX_RECORD_BYTES + face_count * FACE_RECORD_BYTES
    }
}

/// Sink for vertex and face records.
trait Payload {
    fn vertex(&mut self, fields: &[f32]);
    fn face(&mut self, corners: [i32; 3]);
    fn finish(self) -> Vec<u8>;
}

struct BinaryPayload {
    bytes: Vec<u8>,
    expected_len: usize,
}

impl BinaryPayload {
    fn new(header: String, vertex_count: usize, face_count: usize) -> Self {
        let expected_len =
            header.len() + vertex_count * VERTEX_RECORD_BYTES + face_count * FACE_RECORD_BYTES;
        let mut bytes = header.into_bytes();
        bytes.reserve_exact(expected_len - bytes.len());
        Self {
            bytes,
            expected_len,
        }
    }
}

impl Payload for BinaryPayload {
    fn vertex(&mut self, fields: &[f32]) {
        for value in fields {
            self.bytes.extend_from_slice(&value.to_le_bytes());
        }
    }

    fn face(&mut self, corners: [i32; 3]) {
        self.bytes.push(3);
        for index in corners {
            self.bytes.extend_from_slice(&index.to_le_bytes());
        }
    }

    fn finish(self) -> Vec<u8> {
        debug_assert_eq!(self.bytes.len(), self.expected_len);
        self.bytes
    }
}

struct AsciiPayload {
    text: String,
}

impl AsciiPayload {
    fn new(header: String) -> Self {
        Self { text: header }
    }
}

impl Payload for AsciiPayload {
    fn vertex(&mut self, fields: &[f32]) {
        for (i, &value) in fields.iter().enumerate() {
            if i > 0 {
                self.text.push(' ');
            }
            push_float(&mut self.text, value);
        }
        self.text.push('\n');
    }

    fn face(&mut self, [a, b, c]: [i32; 3]) {
        use std::fmt::Write;
        // Writing into a String cannot fail.
        let _ = writeln!(self.text, "3 {a} {b} {c}");
    }

    fn finish(self) -> Vec<u8> {
        self.text.into_bytes()
    }
}

/// Maps each vertex handle in canonical order to its output position.
fn compact_indices(vertices: &[VertexHandle]) -> Result<FxHashMap<VertexHandle, i32>> {
    if i32::try_from(vertices.len()).is_err() {
        return Err(TopologyError::TooManyVertices(vertices.len()).into());
    }
    let mut compact = FxHashMap::default();
    compact.reserve(vertices.len());
    for (index, &handle) in (0..).zip(vertices) {
        compact.insert(handle, index);
    }
    Ok(compact)
}

fn write_records<P: Payload>(mesh: &Mesh, payload: &mut P) -> Result<()> {
    let compact = compact_indices(mesh.vertices())?;

    let vertex_pool = mesh.vertex_pool();
    let mut vertex = vertex_pool.create_ref();
    for &handle in mesh.vertices() {
        payload.vertex(vertex_pool.get(handle, &mut vertex).fields());
    }

    let triangle_pool = mesh.triangle_pool();
    let mut triangle = triangle_pool.create_ref();
    for &handle in mesh.triangles() {
        let corners = triangle_pool.get(handle, &mut triangle).vertices();
        let mut indices = [0; 3];
        for (slot, corner) in indices.iter_mut().zip(corners) {
            *slot = *compact
                .get(&corner)
                .ok_or(TopologyError::UnlistedVertex {
                    triangle: handle.index(),
                    vertex: corner.index(),
                })?;
        }
        payload.face(indices);
    }
    Ok(())
}
