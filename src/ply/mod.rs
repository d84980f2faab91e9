//! PLY (Polygon File Format) reading and writing.
//!
//! Files are written with a fixed schema: nine `float` vertex properties
//! (`x y z nx ny nz r g b`, the last three carrying the texture/color triple)
//! and a `uchar`/`int` face index list. Reading accepts any PLY file with a
//! `vertex` element declaring `x y z`; polygons are fan-triangulated and
//! missing normals are synthesised according to [`DecodeParams`].
//!
//! ```no_run
//! use meshpool::ply::{load_ply, save_ply, PlyEncoding};
//!
//! let mesh = load_ply("cone.ply")?;
//! save_ply(&mesh, "cone_binary.ply", PlyEncoding::BinaryLittleEndian)?;
//! # Ok::<(), meshpool::MeshError>(())
//! ```

mod decode;
mod encode;
pub mod float_text;
pub mod header;
mod source;

pub use decode::{DecodeParams, DecodePly, NormalMode};
pub use encode::{binary_size, EncodePly};
pub use source::PlySource;

use std::path::Path;

use crate::error::Result;
use crate::mesh::Mesh;

/// Payload encoding of a PLY file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlyEncoding {
    /// Fixed-width little-endian records.
    BinaryLittleEndian,
    /// Space-separated decimal text, one record per line.
    Ascii,
}

impl PlyEncoding {
    /// Keyword used on the header's `format` line.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Self::BinaryLittleEndian => "binary_little_endian",
            Self::Ascii => "ascii",
        }
    }
}

/// Decodes a mesh with default [`DecodeParams`].
///
/// # Errors
///
/// See [`DecodePly::execute`].
pub fn read<S: PlySource + ?Sized>(source: &S) -> Result<Mesh> {
    read_with(source, DecodeParams::default())
}

/// Decodes a mesh with explicit parameters.
///
/// # Errors
///
/// See [`DecodePly::execute`].
pub fn read_with<S: PlySource + ?Sized>(source: &S, params: DecodeParams) -> Result<Mesh> {
    DecodePly::new(params).execute(source)
}

/// Encodes a mesh as binary little-endian PLY.
///
/// # Errors
///
/// See [`EncodePly::execute`].
pub fn write_binary(mesh: &Mesh) -> Result<Vec<u8>> {
    EncodePly::new(PlyEncoding::BinaryLittleEndian).execute(mesh)
}

/// Encodes a mesh as ASCII PLY.
///
/// # Errors
///
/// See [`EncodePly::execute`].
pub fn write_ascii(mesh: &Mesh) -> Result<Vec<u8>> {
    EncodePly::new(PlyEncoding::Ascii).execute(mesh)
}

/// Reads a mesh from a PLY file on disk.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be opened, otherwise see
/// [`DecodePly::execute`].
pub fn load_ply<P: AsRef<Path>>(path: P) -> Result<Mesh> {
    read(path.as_ref())
}

/// Writes a mesh to a PLY file on disk.
///
/// The file is only created once the whole encoding has succeeded.
///
/// # Errors
///
/// Returns an encoding error (see [`EncodePly::execute`]) or an I/O error if
/// the file cannot be written.
pub fn save_ply<P: AsRef<Path>>(mesh: &Mesh, path: P, encoding: PlyEncoding) -> Result<()> {
    let bytes = EncodePly::new(encoding).execute(mesh)?;
    std::fs::write(path, bytes)?;
    Ok(())
}
