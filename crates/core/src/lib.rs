//! Core shared types and errors (loader-agnostic).

use std::{
    io,
    num::{ParseFloatError, ParseIntError},
};

use thiserror::Error;

/// Failures raised while scanning an OBJ stream. Line numbers are 1-based.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("Failed to read line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("Missing {what} on line {line}")]
    MissingField { line: usize, what: &'static str },

    #[error("Failed to parse float '{token}' on line {line}: {source}")]
    MalformedFloat {
        line: usize,
        token: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("Invalid index '{token}' on line {line}: {source}")]
    MalformedIndex {
        line: usize,
        token: String,
        #[source]
        source: ParseIntError,
    },

    #[error("OBJ indices are 1-based; found {raw} on line {line}")]
    NonPositiveIndex { line: usize, raw: i64 },

    #[error("Index {raw} exceeds the u32 range on line {line}")]
    IndexTooLarge { line: usize, raw: i64 },

    #[error("UV index {index} out of range (len={len}) on line {line}")]
    UvIndexOutOfRange { line: usize, index: usize, len: usize },

    #[error("Face without vertex references on line {line}")]
    EmptyFace { line: usize },
}

impl MeshError {
    /// Line the error was raised on.
    pub fn line(&self) -> usize {
        match self {
            Self::Read { line, .. }
            | Self::MissingField { line, .. }
            | Self::MalformedFloat { line, .. }
            | Self::MalformedIndex { line, .. }
            | Self::NonPositiveIndex { line, .. }
            | Self::IndexTooLarge { line, .. }
            | Self::UvIndexOutOfRange { line, .. }
            | Self::EmptyFace { line } => *line,
        }
    }
}

pub type MeshResult<T> = Result<T, MeshError>;
