//! Buffer and vertex array handles.
//!
//! Handles are opaque ids issued by an [`UploadBackend`](crate::UploadBackend).
//! They carry no binding state; every backend call names the objects it
//! operates on.

use serde::{Deserialize, Serialize};

/// What a buffer holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BufferKind {
    /// Interleaved vertex attributes (`GL_ARRAY_BUFFER`, `VERTEX` usage).
    Vertex,
    /// `u32` triangle list indices (`GL_ELEMENT_ARRAY_BUFFER`, `INDEX` usage).
    Index,
}

/// A GPU buffer issued by a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BufferHandle(pub u32);

/// A vertex array object issued by a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VertexArrayHandle(pub u32);
