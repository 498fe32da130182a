//! CPU-side face mesh representation used by the loader and the emitter.

use std::{
    collections::{HashMap, hash_map::Entry},
    fmt,
};

use glam::DVec2;

/// Texture coordinate `(u, v)` as declared in the source file.
pub type Uv = DVec2;

/// Result of a single OBJ scan.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FaceMesh {
    /// Texture coordinates in declaration order (0-based).
    pub uvs: Vec<Uv>,
    /// First UV seen for every referenced vertex.
    pub vertex_uvs: HashMap<usize, Uv>,
    /// Flattened triangle list, always a multiple of 3 long.
    pub triangles: Vec<u32>,
    pub max_vertex_index: Option<usize>,
    pub face_count: usize,
}

impl FaceMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    /// Bind a UV to `vertex` unless the vertex is already mapped.
    /// `resolve` only runs for unmapped vertices; returns `Ok(true)` when a
    /// mapping was inserted.
    pub fn record_vertex<E>(
        &mut self,
        vertex: usize,
        resolve: impl FnOnce() -> Result<Uv, E>,
    ) -> Result<bool, E> {
        self.max_vertex_index = Some(self.max_vertex_index.map_or(vertex, |m| m.max(vertex)));
        match self.vertex_uvs.entry(vertex) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(resolve()?);
                Ok(true)
            }
        }
    }

    pub fn uv_for(&self, vertex: usize) -> Option<Uv> {
        self.vertex_uvs.get(&vertex).copied()
    }

    /// UV with the v axis flipped (`1 - v`), as consumed by image-space code.
    pub fn flipped_uv(&self, vertex: usize) -> Option<Uv> {
        self.uv_for(vertex).map(flip_v)
    }

    pub fn summary(&self) -> MeshSummary {
        MeshSummary {
            max_vertex_index: self.max_vertex_index,
            uv_count: self.uvs.len(),
            triangle_count: self.triangle_count(),
        }
    }
}

pub fn flip_v(uv: Uv) -> Uv {
    DVec2::new(uv.x, 1.0 - uv.y)
}

/// Fan-triangulate one face around its first vertex, appending to `out`.
/// Faces with fewer than three vertices produce nothing.
pub fn fan_triangulate(face: &[u32], out: &mut Vec<u32>) {
    if face.len() < 3 {
        return;
    }
    let anchor = face[0];
    for pair in face[1..].windows(2) {
        out.extend_from_slice(&[anchor, pair[0], pair[1]]);
    }
}

/// Counts reported after a scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeshSummary {
    pub max_vertex_index: Option<usize>,
    pub uv_count: usize,
    pub triangle_count: usize,
}

impl fmt::Display for MeshSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max_vertex_index {
            Some(max) => writeln!(f, "Max vertex index: {max}")?,
            None => writeln!(f, "Max vertex index: -1")?,
        }
        writeln!(f, "Found {} UVs", self.uv_count)?;
        write!(f, "Parsed {} triangles", self.triangle_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fan_of_quad_shares_anchor() {
        let mut out = Vec::new();
        fan_triangulate(&[0, 1, 2, 3], &mut out);
        assert_eq!(out, vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn fan_yields_k_minus_two_triangles() {
        for k in 3..10u32 {
            let face: Vec<u32> = (10..10 + k).collect();
            let mut out = Vec::new();
            fan_triangulate(&face, &mut out);
            assert_eq!(out.len(), 3 * (k as usize - 2));
            assert!(out.chunks(3).all(|tri| tri[0] == 10));
        }
    }

    #[test]
    fn fan_skips_degenerate_faces() {
        let mut out = Vec::new();
        fan_triangulate(&[4, 5], &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn first_mapping_wins() {
        let mut mesh = FaceMesh::new();
        let first: Result<bool, ()> = mesh.record_vertex(3, || Ok(DVec2::new(0.1, 0.2)));
        assert_eq!(first, Ok(true));
        let second: Result<bool, ()> = mesh.record_vertex(3, || Err(()));
        assert_eq!(second, Ok(false));
        assert_eq!(mesh.uv_for(3), Some(DVec2::new(0.1, 0.2)));
        assert_eq!(mesh.max_vertex_index, Some(3));
    }

    #[test]
    fn flipped_uv_inverts_v() {
        let mut mesh = FaceMesh::new();
        mesh.vertex_uvs.insert(0, DVec2::new(0.25, 0.75));
        assert_eq!(mesh.flipped_uv(0), Some(DVec2::new(0.25, 0.25)));
        assert_eq!(mesh.flipped_uv(1), None);
    }

    #[test]
    fn summary_of_empty_mesh() {
        let text = FaceMesh::new().summary().to_string();
        assert_eq!(text, "Max vertex index: -1\nFound 0 UVs\nParsed 0 triangles");
    }
}
