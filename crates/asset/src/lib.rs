//! Asset loading/parsers for the canonical face mesh.
//! OBJ scan producing per-vertex UVs and a fan-triangulated index list,
//! plus emission of the generated JS data module.

pub mod emit;
pub mod mesh;
pub mod obj;

pub use corelib::{MeshError, MeshResult};
