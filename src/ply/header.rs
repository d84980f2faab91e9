use super::PlyEncoding;

/// Comment line identifying files written by this crate.
pub const PROVENANCE_COMMENT: &str = "Binary and ASCII PLY meshes are written by meshpool.";

/// Vertex properties in record order. The last three carry the texture/color
/// triple.
pub const VERTEX_PROPERTIES: [&str; 9] = ["x", "y", "z", "nx", "ny", "nz", "r", "g", "b"];

/// Bytes per binary vertex record: nine little-endian `f32`.
pub const VERTEX_RECORD_BYTES: usize = 9 * 4;

/// Bytes per binary face record: a `u8` count of 3 and three little-endian `i32`.
pub const FACE_RECORD_BYTES: usize = 1 + 3 * 4;

/// Renders the header for a file with `vertex_count` vertices and
/// `face_count` faces, up to and including `end_header\n`.
#[must_use]
pub fn render(encoding: PlyEncoding, vertex_count: usize, face_count: usize) -> String {
    let properties: String = VERTEX_PROPERTIES
        .iter()
        .map(|name| format!("property float {name}\n"))
        .collect();
    format!(
        "ply\n\
         format {keyword} 1.0\n\
         comment {PROVENANCE_COMMENT}\n\
         element vertex {vertex_count}\n\
         {properties}\
         element face {face_count}\n\
         property list uchar int vertex_index\n\
         end_header\n",
        keyword = encoding.keyword(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_header_text() {
        let expected = "ply\n\
            format binary_little_endian 1.0\n\
            comment Binary and ASCII PLY meshes are written by meshpool.\n\
            element vertex 3\n\
            property float x\n\
            property float y\n\
            property float z\n\
            property float nx\n\
            property float ny\n\
            property float nz\n\
            property float r\n\
            property float g\n\
            property float b\n\
            element face 1\n\
            property list uchar int vertex_index\n\
            end_header\n";
        assert_eq!(render(PlyEncoding::BinaryLittleEndian, 3, 1), expected);
    }

    #[test]
    fn ascii_header_differs_only_in_format_line() {
        let ascii = render(PlyEncoding::Ascii, 81, 158);
        let binary = render(PlyEncoding::BinaryLittleEndian, 81, 158);
        assert!(ascii.starts_with("ply\nformat ascii 1.0\n"));
        assert_eq!(
            ascii.replace("format ascii", "format binary_little_endian"),
            binary
        );
    }

    #[test]
    fn header_length_for_reference_cone() {
        assert_eq!(render(PlyEncoding::BinaryLittleEndian, 81, 158).len(), 336);
    }
}
