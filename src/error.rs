use thiserror::Error;

/// Top-level error type for mesh storage and PLY conversion.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Malformed or unsupported PLY content.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("malformed PLY header: {0}")]
    Header(String),

    #[error("missing element `{0}`")]
    MissingElement(&'static str),

    #[error("element `{element}` has no property `{property}`")]
    MissingProperty {
        element: &'static str,
        property: String,
    },

    #[error("property `{property}` of element `{element}` has an unsupported type")]
    UnsupportedProperty {
        element: &'static str,
        property: String,
    },

    #[error("malformed PLY payload: {0}")]
    Payload(String),

    #[error("face {face} lists {arity} vertex indices, at least 3 are required")]
    DegenerateFace { face: usize, arity: usize },
}

/// A face that references a vertex position outside the decoded vertex range.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("face {face} references vertex {index}, but only {vertex_count} vertices were decoded")]
    VertexOutOfRange {
        face: usize,
        index: i64,
        vertex_count: usize,
    },
}

/// Inconsistencies between a mesh's pools and its canonical order.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("triangle {triangle} references vertex handle {vertex}, which is not in the vertex order")]
    UnlistedVertex { triangle: u32, vertex: u32 },

    #[error("{kind} handle {handle} appears more than once in the canonical order")]
    DuplicateHandle { kind: &'static str, handle: u32 },

    #[error("{kind} handle {handle} is out of range (pool holds {len})")]
    HandleOutOfRange {
        kind: &'static str,
        handle: u32,
        len: usize,
    },

    #[error("{0} vertices cannot be addressed by 32-bit PLY indices")]
    TooManyVertices(usize),
}

/// Convenience type alias for results using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;
