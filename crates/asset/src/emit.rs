//! Emission of the generated JS data module (`CANONICAL_TRIANGLES` / `CANONICAL_UVS`).

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result};

use crate::mesh::{FaceMesh, Uv, flip_v};

/// Vertex count of the canonical face mesh.
pub const CANONICAL_VERTEX_COUNT: usize = 468;

/// Shape of the generated module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmitOptions {
    /// Number of entries in the UV array, independent of the vertices seen.
    pub expected_verts: usize,
    pub triangles_name: String,
    pub uvs_name: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            expected_verts: CANONICAL_VERTEX_COUNT,
            triangles_name: "CANONICAL_TRIANGLES".to_owned(),
            uvs_name: "CANONICAL_UVS".to_owned(),
        }
    }
}

/// Dense, v-flipped UV table keyed `0..expected_verts`. Unmapped slots stay `(0, 0)`.
pub fn dense_uvs(mesh: &FaceMesh, expected_verts: usize) -> Vec<Uv> {
    let mut out = vec![Uv::ZERO; expected_verts];
    let mut dropped = 0usize;
    for (&vertex, &uv) in &mesh.vertex_uvs {
        match out.get_mut(vertex) {
            Some(slot) => *slot = flip_v(uv),
            None => dropped += 1,
        }
    }
    if dropped > 0 {
        log::warn!(
            "{} mapped vertices lie beyond the {} emitted UV slots and were dropped",
            dropped,
            expected_verts
        );
    }
    out
}

/// Write the module to any writer.
pub fn write_snippet<W: Write>(mesh: &FaceMesh, opts: &EmitOptions, mut writer: W) -> io::Result<()> {
    writeln!(writer, "export const {} = [", opts.triangles_name)?;
    for (i, index) in mesh.triangles.iter().enumerate() {
        if i > 0 {
            write!(writer, ",")?;
        }
        write!(writer, "{index}")?;
    }
    writeln!(writer, "];")?;
    writeln!(writer)?;

    writeln!(writer, "export const {} = [", opts.uvs_name)?;
    for uv in dense_uvs(mesh, opts.expected_verts) {
        writeln!(writer, "  {{ x: {}, y: {} }},", uv.x, uv.y)?;
    }
    writeln!(writer, "];")?;
    Ok(())
}

/// Render the module into a string.
pub fn render_snippet(mesh: &FaceMesh, opts: &EmitOptions) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_snippet(mesh, opts, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Create (or truncate) `path` and write the module into it.
pub fn write_snippet_to_path(mesh: &FaceMesh, opts: &EmitOptions, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("Failed to create snippet file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_snippet(mesh, opts, &mut writer)
        .and_then(|()| writer.flush())
        .with_context(|| format!("Failed to write snippet: {}", path.display()))?;
    log::info!(
        "Wrote {} triangle indices and {} UV entries to {}",
        mesh.triangles.len(),
        opts.expected_verts,
        path.display()
    );
    Ok(())
}
