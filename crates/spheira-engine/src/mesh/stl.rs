use std::fmt::Write as _;

use anyhow::{Context, Result};

use crate::coords::Vec3;

use super::CsgMesh;

const HEADER_LEN: usize = 80;
const RECORD_LEN: usize = 50;

/// STL output options.
#[derive(Debug, Clone)]
pub struct StlOptions {
    /// Binary STL when set, ASCII otherwise.
    pub binary: bool,
    /// Name written after `solid` in ASCII output and into the binary header.
    pub solid_name: String,
}

impl Default for StlOptions {
    fn default() -> Self {
        Self {
            binary: true,
            solid_name: "spheirahedron".to_string(),
        }
    }
}

/// Serializes `mesh` as STL.
///
/// Polygons are fan-triangulated; every triangle of a polygon carries the
/// polygon's plane normal. Polygons with fewer than three vertices are
/// dropped.
pub fn serialize_stl(mesh: &CsgMesh, options: &StlOptions) -> Result<Vec<u8>> {
    if options.binary {
        serialize_binary(mesh, &options.solid_name)
    } else {
        Ok(serialize_ascii(mesh, &options.solid_name).into_bytes())
    }
}

fn serialize_binary(mesh: &CsgMesh, solid_name: &str) -> Result<Vec<u8>> {
    let count = mesh.triangle_count();
    let count_u32 = u32::try_from(count).context("mesh has too many triangles for STL")?;

    let mut out = Vec::with_capacity(HEADER_LEN + 4 + count * RECORD_LEN);

    // Binary headers must not start with "solid" or readers take them for ASCII.
    let mut header = [0u8; HEADER_LEN];
    let label = format!("binary STL: {solid_name}");
    let n = label.len().min(HEADER_LEN);
    header[..n].copy_from_slice(&label.as_bytes()[..n]);
    out.extend_from_slice(&header);
    out.extend_from_slice(&count_u32.to_le_bytes());

    for polygon in &mesh.polygons {
        let normal = polygon.plane_normal();
        for triangle in polygon.triangles() {
            put_vec3(&mut out, normal);
            for vertex in triangle {
                put_vec3(&mut out, vertex);
            }
            out.extend_from_slice(&0u16.to_le_bytes());
        }
    }

    debug_assert_eq!(out.len(), HEADER_LEN + 4 + count * RECORD_LEN);
    Ok(out)
}

fn put_vec3(out: &mut Vec<u8>, v: Vec3) {
    for c in v.to_array() {
        out.extend_from_slice(&c.to_le_bytes());
    }
}

fn serialize_ascii(mesh: &CsgMesh, solid_name: &str) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "solid {solid_name}");
    for polygon in &mesh.polygons {
        let n = polygon.plane_normal();
        for triangle in polygon.triangles() {
            let _ = writeln!(out, "  facet normal {:e} {:e} {:e}", n.x, n.y, n.z);
            out.push_str("    outer loop\n");
            for v in triangle {
                let _ = writeln!(out, "      vertex {:e} {:e} {:e}", v.x, v.y, v.z);
            }
            out.push_str("    endloop\n");
            out.push_str("  endfacet\n");
        }
    }
    let _ = writeln!(out, "endsolid {solid_name}");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::unit_cube;

    fn f32_at(bytes: &[u8], at: usize) -> f32 {
        f32::from_le_bytes(bytes[at..at + 4].try_into().unwrap())
    }

    // ── binary ────────────────────────────────────────────────────────────

    #[test]
    fn binary_layout_matches_triangle_count() {
        let bytes = serialize_stl(&unit_cube(), &StlOptions::default()).unwrap();
        assert_eq!(bytes.len(), 80 + 4 + 12 * 50);
        assert_eq!(u32::from_le_bytes(bytes[80..84].try_into().unwrap()), 12);
        assert!(!bytes.starts_with(b"solid"));
    }

    #[test]
    fn binary_first_record_carries_face_normal() {
        let bytes = serialize_stl(&unit_cube(), &StlOptions::default()).unwrap();
        let record = 84;
        assert_eq!(f32_at(&bytes, record), 0.0);
        assert_eq!(f32_at(&bytes, record + 4), 0.0);
        assert_eq!(f32_at(&bytes, record + 8), -1.0);
        // First vertex of the fan is the polygon's first vertex.
        assert_eq!(f32_at(&bytes, record + 12), 0.0);
        // Attribute byte count.
        assert_eq!(&bytes[record + 48..record + 50], &[0, 0]);
    }

    #[test]
    fn empty_mesh_is_header_only() {
        let bytes = serialize_stl(&CsgMesh::default(), &StlOptions::default()).unwrap();
        assert_eq!(bytes.len(), 84);
        assert_eq!(&bytes[80..84], &[0, 0, 0, 0]);
    }

    // ── ascii ─────────────────────────────────────────────────────────────

    #[test]
    fn ascii_has_one_facet_per_triangle() {
        let options = StlOptions {
            binary: false,
            solid_name: "cube".to_string(),
        };
        let text = String::from_utf8(serialize_stl(&unit_cube(), &options).unwrap()).unwrap();
        assert!(text.starts_with("solid cube\n"));
        assert!(text.ends_with("endsolid cube\n"));
        assert_eq!(text.matches("facet normal").count(), 12);
        assert_eq!(text.matches("vertex ").count(), 36);
    }
}
