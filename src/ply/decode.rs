//! Two-pass PLY decoder.
//!
//! Faces refer to vertices by their position in the file, so every vertex has
//! to exist as a pool record before the first face can be built. The first
//! pass reads the vertex element and records `file index -> handle`; the
//! second pass reopens the source, skips to the face element and resolves
//! each corner through that table.

use std::io::BufRead;

use ply_rs::parser::Parser;
use ply_rs::ply::{DefaultElement, ElementDef, Header, Property, PropertyType};
use tracing::debug;

use crate::error::{FormatError, IndexError, MeshError, Result};
use crate::math::normal::{NormalAccumulator, Winding};
use crate::math::{Point3, Vector3};
use crate::mesh::{Mesh, TriangleHandle, VertexHandle};

use super::source::PlySource;

/// Texture/color channels, in lookup order. The first channel whose leading
/// property is declared wins; undeclared components read as zero.
const TEXTURE_CHANNELS: [&[&str]; 4] = [
    &["r", "g", "b"],
    &["u", "v", "w"],
    &["s", "t"],
    &["texture_u", "texture_v"],
];

/// Accepted names of the face index list.
const FACE_INDEX_PROPERTIES: [&str; 2] = ["vertex_index", "vertex_indices"];

/// How vertex normals are obtained for files that do not declare them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalMode {
    /// Undeclared normals are left at zero.
    PassThrough,
    /// Synthesise normals assuming counter-clockwise front faces.
    #[default]
    AddCcw,
    /// Synthesise normals assuming clockwise front faces.
    AddCw,
}

impl NormalMode {
    fn winding(self) -> Option<Winding> {
        match self {
            Self::PassThrough => None,
            Self::AddCcw => Some(Winding::CounterClockwise),
            Self::AddCw => Some(Winding::Clockwise),
        }
    }
}

/// Parameters controlling PLY decoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecodeParams {
    /// Normal policy for files without `nx, ny, nz`.
    pub normal_mode: NormalMode,
}

/// Decodes a PLY source into a [`Mesh`].
pub struct DecodePly {
    params: DecodeParams,
}

impl DecodePly {
    /// Creates a new `DecodePly` operation.
    #[must_use]
    pub fn new(params: DecodeParams) -> Self {
        Self { params }
    }

    /// Executes the decode, opening `source` once per pass.
    ///
    /// # Errors
    ///
    /// Returns a format error for malformed or unsupported content, an index
    /// error for a face corner outside the vertex list, and an I/O error if
    /// the source cannot be opened.
    pub fn execute<S: PlySource + ?Sized>(&self, source: &S) -> Result<Mesh> {
        let parser = Parser::<DefaultElement>::new();

        let mut reader = source.open()?;
        let header = read_header(&parser, &mut reader)?;
        let layout = Layout::from_header(&header)?;
        let winding = if layout.has_normals {
            None
        } else {
            self.params.normal_mode.winding()
        };
        debug!(
            source = %source.describe(),
            vertices = layout.vertex_count,
            faces = layout.face_count,
            synthesize_normals = winding.is_some(),
            "decoding PLY"
        );

        // Declared counts are untrusted; pools grow with the payload actually read.
        let mut mesh = Mesh::new(0, 0);
        let vertices = vertex_pass(&parser, &mut reader, &header, &layout, winding, &mut mesh)?;
        drop(reader);

        let triangles = face_pass(&parser, source, &vertices, &mut mesh)?;
        debug!(
            vertices = vertices.len(),
            triangles = triangles.len(),
            "decoded PLY"
        );

        mesh.set_vertices(vertices);
        mesh.set_triangles(triangles);
        Ok(mesh)
    }
}

/// The parts of a PLY header the decoder relies on.
struct Layout {
    vertex_count: usize,
    face_count: usize,
    has_normals: bool,
    texture: &'static [&'static str],
    face_indices: Option<&'static str>,
}

impl Layout {
    fn from_header(header: &Header) -> std::result::Result<Self, FormatError> {
        let vertex = header
            .elements
            .get("vertex")
            .ok_or(FormatError::MissingElement("vertex"))?;
        for name in ["x", "y", "z"] {
            if !is_scalar(vertex, "vertex", name)? {
                return Err(FormatError::MissingProperty {
                    element: "vertex",
                    property: name.to_owned(),
                });
            }
        }

        let mut has_normals = true;
        for name in ["nx", "ny", "nz"] {
            has_normals &= is_scalar(vertex, "vertex", name)?;
        }

        let texture = TEXTURE_CHANNELS
            .into_iter()
            .find(|channel| vertex.properties.contains_key(channel[0]))
            .unwrap_or(&[]);
        for name in texture {
            is_scalar(vertex, "vertex", name)?;
        }

        let (face_count, face_indices) = match header.elements.get("face") {
            None => (0, None),
            Some(face) => {
                let name = FACE_INDEX_PROPERTIES
                    .into_iter()
                    .find(|name| face.properties.contains_key(*name))
                    .ok_or_else(|| FormatError::MissingProperty {
                        element: "face",
                        property: FACE_INDEX_PROPERTIES[0].to_owned(),
                    })?;
                let declared = face.properties.get(name).map(|def| &def.data_type);
                if !matches!(declared, Some(PropertyType::List(..))) {
                    return Err(FormatError::UnsupportedProperty {
                        element: "face",
                        property: name.to_owned(),
                    });
                }
                (face.count, Some(name))
            }
        };

        Ok(Self {
            vertex_count: vertex.count,
            face_count,
            has_normals,
            texture,
            face_indices,
        })
    }
}

/// Returns whether `name` is declared; a list where a scalar is expected is
/// an error.
fn is_scalar(
    element: &ElementDef,
    kind: &'static str,
    name: &str,
) -> std::result::Result<bool, FormatError> {
    match element.properties.get(name).map(|def| &def.data_type) {
        None => Ok(false),
        Some(PropertyType::Scalar(_)) => Ok(true),
        Some(PropertyType::List(..)) => Err(FormatError::UnsupportedProperty {
            element: kind,
            property: name.to_owned(),
        }),
    }
}

fn vertex_pass<T: BufRead>(
    parser: &Parser<DefaultElement>,
    reader: &mut T,
    header: &Header,
    layout: &Layout,
    winding: Option<Winding>,
    mesh: &mut Mesh,
) -> Result<Vec<VertexHandle>> {
    let needs_faces = winding.is_some() && layout.face_indices.is_some();
    let mut vertex_payload = None;
    let mut face_payload = None;

    for element in header.elements.values() {
        let payload = read_payload(parser, reader, element, header)?;
        match element.name.as_str() {
            "vertex" => vertex_payload = Some(payload),
            "face" if needs_faces => face_payload = Some(payload),
            _ => {}
        }
        if vertex_payload.is_some() && (!needs_faces || face_payload.is_some()) {
            break;
        }
    }
    let vertex_payload = vertex_payload.unwrap_or_default();

    let mut positions = Vec::with_capacity(vertex_payload.len());
    let mut normals = Vec::with_capacity(vertex_payload.len());
    let mut textures = Vec::with_capacity(vertex_payload.len());
    for (index, element) in vertex_payload.iter().enumerate() {
        positions.push(Point3::new(
            required_scalar(element, "x", index)?,
            required_scalar(element, "y", index)?,
            required_scalar(element, "z", index)?,
        ));
        normals.push(Vector3::new(
            scalar(element, "nx").unwrap_or(0.0),
            scalar(element, "ny").unwrap_or(0.0),
            scalar(element, "nz").unwrap_or(0.0),
        ));
        let mut texture = Vector3::zeros();
        for (slot, name) in layout.texture.iter().enumerate() {
            texture[slot] = scalar(element, name).unwrap_or(0.0);
        }
        textures.push(texture);
    }

    if let (Some(winding), Some(faces), Some(property)) =
        (winding, face_payload, layout.face_indices)
    {
        let mut accumulator = NormalAccumulator::new(positions.len(), winding);
        for (face, record) in faces.iter().enumerate() {
            let corners = face_corners(record, property, face, positions.len())?;
            for triangle in fan(&corners) {
                accumulator.add_triangle(&positions, triangle);
            }
        }
        normals = accumulator.finish();
    }

    mesh.reserve(positions.len(), 0);
    let pool = mesh.pools_mut().0;
    Ok(positions
        .into_iter()
        .zip(normals)
        .zip(textures)
        .map(|((position, normal), texture)| pool.create().init(position, normal, texture))
        .collect())
}

fn face_pass<S: PlySource + ?Sized>(
    parser: &Parser<DefaultElement>,
    source: &S,
    vertices: &[VertexHandle],
    mesh: &mut Mesh,
) -> Result<Vec<TriangleHandle>> {
    let mut reader = source.open()?;
    let header = read_header(parser, &mut reader)?;
    let Some(property) = Layout::from_header(&header)?.face_indices else {
        return Ok(Vec::new());
    };

    let mut triangles = Vec::new();
    for element in header.elements.values() {
        let payload = read_payload(parser, &mut reader, element, &header)?;
        if element.name != "face" {
            continue;
        }

        triangles.reserve(payload.len());
        mesh.reserve(0, payload.len());
        let (vertex_pool, triangle_pool) = mesh.pools_mut();
        for (face, record) in payload.iter().enumerate() {
            let corners = face_corners(record, property, face, vertices.len())?;
            for [a, b, c] in fan(&corners) {
                let normal =
                    vertex_pool
                        .create()
                        .init(Point3::origin(), Vector3::zeros(), Vector3::zeros());
                triangles.push(triangle_pool.create().init(
                    vertices[a],
                    vertices[b],
                    vertices[c],
                    normal,
                ));
            }
        }
        break;
    }
    Ok(triangles)
}

fn read_header<T: BufRead>(
    parser: &Parser<DefaultElement>,
    reader: &mut T,
) -> std::result::Result<Header, FormatError> {
    parser
        .read_header(reader)
        .map_err(|e| FormatError::Header(e.to_string()))
}

fn read_payload<T: BufRead>(
    parser: &Parser<DefaultElement>,
    reader: &mut T,
    element: &ElementDef,
    header: &Header,
) -> std::result::Result<Vec<DefaultElement>, FormatError> {
    parser
        .read_payload_for_element(reader, element, header)
        .map_err(|e| FormatError::Payload(format!("element `{}`: {e}", element.name)))
}

/// Fan triangulation of a polygon given by its corner indices.
fn fan(corners: &[usize]) -> impl Iterator<Item = [usize; 3]> + '_ {
    (1..corners.len().saturating_sub(1)).map(|i| [corners[0], corners[i], corners[i + 1]])
}

/// Reads and range-checks the corner indices of face number `face`.
fn face_corners(
    element: &DefaultElement,
    property: &str,
    face: usize,
    vertex_count: usize,
) -> Result<Vec<usize>> {
    let indices = index_list(element, property).ok_or_else(|| {
        FormatError::Payload(format!("face {face} has no integer `{property}` list"))
    })?;
    if indices.len() < 3 {
        return Err(FormatError::DegenerateFace {
            face,
            arity: indices.len(),
        }
        .into());
    }
    indices
        .into_iter()
        .map(|index| {
            usize::try_from(index)
                .ok()
                .filter(|&i| i < vertex_count)
                .ok_or_else(|| {
                    MeshError::from(IndexError::VertexOutOfRange {
                        face,
                        index,
                        vertex_count,
                    })
                })
        })
        .collect()
}

fn required_scalar(
    element: &DefaultElement,
    name: &str,
    index: usize,
) -> std::result::Result<f32, FormatError> {
    scalar(element, name)
        .ok_or_else(|| FormatError::Payload(format!("vertex {index} has no scalar `{name}`")))
}

/// Reads a scalar property of any PLY numeric type as `f32`.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn scalar(element: &DefaultElement, name: &str) -> Option<f32> {
    match element.get(name)? {
        Property::Char(v) => Some(f32::from(*v)),
        Property::UChar(v) => Some(f32::from(*v)),
        Property::Short(v) => Some(f32::from(*v)),
        Property::UShort(v) => Some(f32::from(*v)),
        Property::Int(v) => Some(*v as f32),
        Property::UInt(v) => Some(*v as f32),
        Property::Float(v) => Some(*v),
        Property::Double(v) => Some(*v as f32),
        _ => None,
    }
}

/// Reads an integer list property as signed indices.
fn index_list(element: &DefaultElement, name: &str) -> Option<Vec<i64>> {
    match element.get(name)? {
        Property::ListChar(v) => Some(v.iter().map(|&i| i64::from(i)).collect()),
        Property::ListUChar(v) => Some(v.iter().map(|&i| i64::from(i)).collect()),
        Property::ListShort(v) => Some(v.iter().map(|&i| i64::from(i)).collect()),
        Property::ListUShort(v) => Some(v.iter().map(|&i| i64::from(i)).collect()),
        Property::ListInt(v) => Some(v.iter().map(|&i| i64::from(i)).collect()),
        Property::ListUInt(v) => Some(v.iter().map(|&i| i64::from(i)).collect()),
        _ => None,
    }
}
