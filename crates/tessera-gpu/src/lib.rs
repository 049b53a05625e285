//! # tessera-gpu
//!
//! Hands built [`Geometry`](tessera_mesh::Geometry) to a graphics API.
//!
//! Provides an [`UploadBackend`] trait that receives explicit handles on
//! every call, so no binding state is hidden between calls, and a
//! [`RecordingBackend`] that keeps uploads in memory:
//! - [`layout`] — the interleaved position/normal attribute description.
//! - [`buffers`] — buffer and vertex array handles.
//! - [`upload`] — geometry upload and draw command derivation.

pub mod backend;
pub mod buffers;
pub mod layout;
pub mod upload;

pub use backend::{RecordingBackend, UploadBackend};
pub use buffers::{BufferHandle, BufferKind, VertexArrayHandle};
pub use layout::{VertexAttribute, VertexLayout};
pub use upload::{draw_element_count, upload, DrawCommand, GpuMesh, PrimitiveTopology};
