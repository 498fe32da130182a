//! Minimal OBJ scanner extracting texture coordinates and face topology.
//!
//! Only `vt ` and `f ` lines are interpreted; everything else (positions,
//! normals, groups, materials, comments) passes through untouched.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use anyhow::{Context, Result};
use glam::DVec2;

use corelib::{MeshError, MeshResult};

use crate::mesh::{FaceMesh, Uv, fan_triangulate};

/// Load a face mesh from a file path.
pub fn load_face_mesh_from_path(path: impl AsRef<Path>) -> Result<FaceMesh> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open OBJ file: {}", path.display()))?;
    let mesh = load_face_mesh_from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse OBJ file: {}", path.display()))?;
    Ok(mesh)
}

/// Load a face mesh from a [`BufRead`] implementation.
pub fn load_face_mesh_from_reader<R: BufRead>(reader: R) -> MeshResult<FaceMesh> {
    scan(reader)
}

/// Convenience helper to parse an OBJ string literal.
pub fn load_face_mesh_from_str(contents: &str) -> MeshResult<FaceMesh> {
    scan(io::Cursor::new(contents))
}

fn scan<R: BufRead>(reader: R) -> MeshResult<FaceMesh> {
    let mut mesh = FaceMesh::new();
    let mut uvs: Vec<Uv> = Vec::new();
    let mut face: Vec<u32> = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line_no = line_no + 1;
        let line = line.map_err(|source| MeshError::Read {
            line: line_no,
            source,
        })?;

        // Markers must open the line, exactly as written by exporters.
        if let Some(rest) = line.strip_prefix("vt ") {
            let mut parts = rest.split_whitespace();
            let u = parse_f64(parts.next(), line_no, "u coordinate")?;
            let v = parse_f64(parts.next(), line_no, "v coordinate")?;
            uvs.push(DVec2::new(u, v));
        } else if let Some(rest) = line.strip_prefix("f ") {
            face.clear();
            for token in rest.split_whitespace() {
                let (vertex, uv_index) = parse_face_vertex(token, line_no)?;
                face.push(vertex);
                mesh.record_vertex(vertex as usize, || lookup_uv(&uvs, uv_index, line_no))?;
            }

            if face.is_empty() {
                return Err(MeshError::EmptyFace { line: line_no });
            }
            if face.len() < 3 {
                log::warn!(
                    "Face on line {} has {} vertices; no triangles emitted",
                    line_no,
                    face.len()
                );
            }
            fan_triangulate(&face, &mut mesh.triangles);
            mesh.face_count += 1;
        }
    }

    mesh.uvs = uvs;
    log::debug!(
        "OBJ scan done: {} UVs, {} faces, {} triangles, {} mapped vertices",
        mesh.uvs.len(),
        mesh.face_count,
        mesh.triangle_count(),
        mesh.vertex_uvs.len()
    );

    Ok(mesh)
}

fn lookup_uv(uvs: &[Uv], index: usize, line_no: usize) -> MeshResult<Uv> {
    uvs.get(index)
        .copied()
        .ok_or(MeshError::UvIndexOutOfRange {
            line: line_no,
            index,
            len: uvs.len(),
        })
}

fn parse_f64(value: Option<&str>, line_no: usize, what: &'static str) -> MeshResult<f64> {
    let token = value.ok_or(MeshError::MissingField {
        line: line_no,
        what,
    })?;
    token
        .parse::<f64>()
        .map_err(|source| MeshError::MalformedFloat {
            line: line_no,
            token: token.to_owned(),
            source,
        })
}

/// Split `v/vt[/vn]` into 0-based vertex and UV indices. The normal field is
/// not inspected.
fn parse_face_vertex(token: &str, line_no: usize) -> MeshResult<(u32, usize)> {
    let mut split = token.split('/');
    let vertex = split.next().ok_or(MeshError::MissingField {
        line: line_no,
        what: "vertex index",
    })?;
    let uv = split.next().ok_or(MeshError::MissingField {
        line: line_no,
        what: "texture coordinate index",
    })?;

    let vertex = resolve_index(vertex, line_no)?;
    let uv = resolve_index(uv, line_no)?;
    Ok((vertex, uv as usize))
}

fn resolve_index(token: &str, line_no: usize) -> MeshResult<u32> {
    let raw = token
        .parse::<i64>()
        .map_err(|source| MeshError::MalformedIndex {
            line: line_no,
            token: token.to_owned(),
            source,
        })?;
    if raw <= 0 {
        return Err(MeshError::NonPositiveIndex { line: line_no, raw });
    }
    u32::try_from(raw - 1).map_err(|_| MeshError::IndexTooLarge { line: line_no, raw })
}
