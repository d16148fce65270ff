//! Wavefront OBJ reader
//!
//! Minimal streaming parser for the subset exported by common modelling tools:
//! `v`, `vn` and `f` records. Faces may use `v`, `v/vt`, `v//vn` or `v/vt/vn`
//! references, including negative (relative) indices. Polygons are triangulated
//! with a fan. Vertices referenced without a normal get a smoothed normal from
//! the faces that share them; normals the file supplies are kept as-is.
//! Texture coordinates, groups and materials are skipped.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use cottage_math::Vec3;

use crate::asset_error::AssetError;
use crate::mesh::Mesh;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct VertexKey {
    position: usize,
    normal: Option<usize>,
}

/// Read an OBJ file into a single mesh
pub fn import_obj<P: AsRef<Path>>(path: P) -> Result<Mesh, AssetError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => AssetError::NotFound(path.to_path_buf()),
        _ => AssetError::Io(e),
    })?;

    let mesh = parse_obj(BufReader::new(file))?;
    if mesh.is_empty() {
        return Err(AssetError::Empty(path.to_path_buf()));
    }
    Ok(mesh)
}

/// Parse OBJ text from any buffered reader
pub fn parse_obj<R: BufRead>(reader: R) -> Result<Mesh, AssetError> {
    let mut positions: Vec<Vec3> = Vec::new();
    let mut normals: Vec<Vec3> = Vec::new();

    let mut mesh = Mesh::new();
    let mut remap: HashMap<VertexKey, u32> = HashMap::new();
    // Per mesh vertex: true where the file gave no normal
    let mut missing: Vec<bool> = Vec::new();

    for (line_idx, line) in reader.lines().enumerate() {
        let line_no = line_idx + 1;
        let line = line?;
        let s = line.trim();
        if s.is_empty() || s.starts_with('#') {
            continue;
        }
        let mut it = s.split_whitespace();
        let tag = it.next().unwrap_or("");
        match tag {
            "v" => positions.push(parse_vec3(&mut it, line_no)?),
            "vn" => normals.push(parse_vec3(&mut it, line_no)?.normalized()),
            "f" => {
                let mut face: Vec<u32> = Vec::with_capacity(4);
                for token in it {
                    let key = parse_face_vertex(token, positions.len(), normals.len(), line_no)?;
                    let index = match remap.get(&key) {
                        Some(&index) => index,
                        None => {
                            let index = mesh.positions.len() as u32;
                            mesh.positions.push(positions[key.position]);
                            mesh.normals.push(key.normal.map_or(Vec3::ZERO, |n| normals[n]));
                            missing.push(key.normal.is_none());
                            remap.insert(key, index);
                            index
                        }
                    };
                    face.push(index);
                }
                if face.len() < 3 {
                    return Err(AssetError::parse(line_no, "face needs at least three vertices"));
                }
                for i in 1..face.len() - 1 {
                    mesh.indices.extend_from_slice(&[face[0], face[i], face[i + 1]]);
                }
            }
            _ => {}
        }
    }

    if missing.contains(&true) {
        let supplied = std::mem::take(&mut mesh.normals);
        mesh.compute_normals();
        for ((normal, supplied), missing) in mesh.normals.iter_mut().zip(supplied).zip(missing) {
            if !missing {
                *normal = supplied;
            }
        }
    }

    Ok(mesh)
}

fn parse_vec3<'a>(it: &mut impl Iterator<Item = &'a str>, line_no: usize) -> Result<Vec3, AssetError> {
    let mut component = || -> Result<f32, AssetError> {
        it.next()
            .ok_or_else(|| AssetError::parse(line_no, "expected three components"))?
            .parse::<f32>()
            .map_err(|e| AssetError::parse(line_no, e.to_string()))
    };
    Ok(Vec3::new(component()?, component()?, component()?))
}

fn parse_face_vertex(token: &str, position_count: usize, normal_count: usize, line_no: usize) -> Result<VertexKey, AssetError> {
    let mut parts = token.split('/');
    let position = parts
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AssetError::parse(line_no, format!("missing vertex index in '{}'", token)))?;
    let position = resolve_index(position, position_count, line_no)?;

    let _texcoord = parts.next();
    let normal = match parts.next().filter(|s| !s.is_empty()) {
        Some(n) => Some(resolve_index(n, normal_count, line_no)?),
        None => None,
    };

    Ok(VertexKey { position, normal })
}

/// Convert a 1-based (or negative, relative) OBJ index into a 0-based one
fn resolve_index(raw: &str, len: usize, line_no: usize) -> Result<usize, AssetError> {
    let idx: i64 = raw
        .parse()
        .map_err(|_| AssetError::parse(line_no, format!("invalid index '{}'", raw)))?;
    let resolved = if idx > 0 { idx - 1 } else { len as i64 + idx };
    if idx == 0 || resolved < 0 || resolved as usize >= len {
        return Err(AssetError::parse(line_no, format!("index {} out of range", idx)));
    }
    Ok(resolved as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const QUAD: &str = "\
# unit quad
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vn 0 0 1
f 1//1 2//1 3//1 4//1
";

    #[test]
    fn test_quad_is_fan_triangulated() {
        let mesh = parse_obj(Cursor::new(QUAD)).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
        assert!(mesh.normals.iter().all(|n| *n == Vec3::Z));
    }

    #[test]
    fn test_missing_normals_are_computed() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        let mesh = parse_obj(Cursor::new(src)).unwrap();
        assert_eq!(mesh.triangle_count(), 1);
        assert!((mesh.normals[0] - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_supplied_normals_survive_mixed_faces() {
        // First face carries a tilted normal, second face has none
        let src = "\
v 0 0 0
v 1 0 0
v 0 1 0
v 1 1 0
vn 0 1 1
f 1//1 2//1 3//1
f 2 4 3
";
        let mesh = parse_obj(Cursor::new(src)).unwrap();
        assert_eq!(mesh.vertex_count(), 6);
        let tilted = Vec3::new(0.0, 1.0, 1.0).normalized();
        for i in 0..3 {
            assert_eq!(mesh.normals[i], tilted);
        }
        for i in 3..6 {
            assert!((mesh.normals[i] - Vec3::Z).length() < 1e-6);
        }
    }

    #[test]
    fn test_negative_indices_and_texcoords() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nf -3/1 -2/1 -1/1\n";
        let mesh = parse_obj(Cursor::new(src)).unwrap();
        assert_eq!(mesh.positions, vec![Vec3::ZERO, Vec3::X, Vec3::Y]);
    }

    #[test]
    fn test_shared_vertices_are_deduplicated() {
        let src = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3\nf 1 3 4\n";
        let mesh = parse_obj(Cursor::new(src)).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn test_out_of_range_index_is_error() {
        let src = "v 0 0 0\nf 1 2 3\n";
        match parse_obj(Cursor::new(src)) {
            Err(AssetError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("Expected parse error, got {:?}", other.map(|m| m.vertex_count())),
        }
    }

    #[test]
    fn test_bad_vertex_is_error() {
        let src = "v 0 zero 0\n";
        assert!(matches!(parse_obj(Cursor::new(src)), Err(AssetError::Parse { line: 1, .. })));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        match import_obj("/nonexistent/houses.obj") {
            Err(AssetError::NotFound(path)) => assert!(path.ends_with("houses.obj")),
            other => panic!("Expected NotFound, got {:?}", other.map(|m| m.vertex_count())),
        }
    }
}
