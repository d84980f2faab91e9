pub mod error;
pub mod math;
pub mod mesh;
pub mod ply;
pub mod pool;

pub use error::{MeshError, Result};
pub use mesh::{Mesh, Triangle, TriangleHandle, Vertex, VertexHandle};
pub use ply::{read, write_ascii, write_binary, PlyEncoding};
