//! Error types for the tessera pipeline.
//!
//! All crates return `TesseraResult<T>` from fallible operations.

use thiserror::Error;

/// Unified error type for tessera.
#[derive(Debug, Error)]
pub enum TesseraError {
    /// A face references a vertex past the end of the vertex store.
    #[error(
        "Face {face} corner {corner} references vertex {index}, but the mesh has only {vertex_count} vertices"
    )]
    IndexOutOfBounds {
        face: usize,
        corner: usize,
        index: u32,
        vertex_count: usize,
    },

    /// Mesh data is malformed or inconsistent.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The upload backend rejected a call.
    #[error("Upload error: {0}")]
    Upload(String),
}

/// Convenience alias for `Result<T, TesseraError>`.
pub type TesseraResult<T> = Result<T, TesseraError>;
